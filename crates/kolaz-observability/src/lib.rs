//! Observability for Kolaz.
//!
//! Installs a `tracing` subscriber for the binaries. Library crates only
//! emit events and spans; they never configure output themselves.
//!
//! ```rust,ignore
//! use kolaz_observability::{init_logging, LogFormat, LogLevel, LoggingConfig};
//!
//! init_logging(&LoggingConfig {
//!     level: LogLevel::Debug,
//!     format: LogFormat::Json,
//! })?;
//! ```

mod logging;

pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig, LoggingError};
