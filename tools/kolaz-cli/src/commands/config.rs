//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use kolaz_observability::LogFormat;

use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output
        .kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());
    if ctx.config.api.token.is_some() {
        ctx.output.kv("token", "********");
    }

    let store = &ctx.config.store;
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("currency", &store.currency);
    ctx.output.kv(
        "free_shipping_threshold",
        &store.free_shipping_threshold.to_string(),
    );
    ctx.output.kv("shipping_fee", &store.shipping_fee.to_string());
    ctx.output
        .kv("items_per_page", &store.items_per_page.to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `kolaz config init` to create one.");
    };

    // Reload from disk so environment overrides are not written back.
    let mut config = CliConfig::load(path)?;
    set_config_value(&mut config, key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => config.api.base_url = value.to_string(),
        ["api", "timeout_secs"] => config.api.timeout_secs = value.parse()?,
        ["api", "token"] => config.api.token = Some(value.to_string()).filter(|t| !t.is_empty()),
        ["store", "currency"] => config.store.currency = value.trim().to_uppercase(),
        ["store", "free_shipping_threshold"] => {
            config.store.free_shipping_threshold = value.parse()?
        }
        ["store", "shipping_fee"] => config.store.shipping_fee = value.parse()?,
        ["store", "items_per_page"] => config.store.items_per_page = value.parse()?,
        ["logging", "level"] => config.logging.level = value.parse()?,
        ["logging", "format"] => {
            config.logging.format = match value.trim() {
                "human" => LogFormat::Human,
                "json" => LogFormat::Json,
                other => bail!("Unknown log format '{}'. Use human or json.", other),
            }
        }
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let (errors, warnings) = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
        }));
    } else {
        ctx.output.header("Validating configuration");
        for warning in &warnings {
            ctx.output.warn(warning);
        }
        for error in &errors {
            ctx.output.error(error);
        }
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    if !ctx.output.is_json() {
        if warnings.is_empty() {
            ctx.output.success("Configuration is valid");
        } else {
            ctx.output.success(&format!(
                "Configuration is valid ({} warning(s))",
                warnings.len()
            ));
        }
    }

    Ok(())
}
