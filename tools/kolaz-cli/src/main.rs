//! Kolaz CLI - the storefront and admin back-office from the terminal.
//!
//! Commands:
//! - `kolaz products` - Browse catalog queries (featured, best sellers, ...)
//! - `kolaz shop` - Filter, sort and paginate the catalog
//! - `kolaz cart` - Manage the session cart and coupons
//! - `kolaz checkout` - Place a simulated order
//! - `kolaz orders` - List and track placed orders
//! - `kolaz admin` - Product CRUD, order and customer tables
//! - `kolaz session` - Inspect or reset the saved session
//! - `kolaz config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kolaz_observability::{init_logging, LogLevel};

use commands::{
    AdminArgs, CartArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductsArgs, SessionArgs,
    ShopArgs,
};

/// Kolaz CLI - Browse the Kolaz catalog, shop and manage the store
#[derive(Parser)]
#[command(name = "kolaz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog queries
    Products(ProductsArgs),

    /// Filter, sort and paginate products
    Shop(ShopArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Place an order from the cart
    Checkout(CheckoutArgs),

    /// Orders placed in this session
    Orders(OrdersArgs),

    /// Admin back-office
    Admin(AdminArgs),

    /// Inspect or reset the saved session
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let mut logging = ctx.config.logging.clone();
    if cli.verbose && logging.level > LogLevel::Debug {
        logging.level = LogLevel::Debug;
    }
    if let Err(e) = init_logging(&logging) {
        ctx.output.debug(&format!("Logging not initialized: {}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
