//! Configuration for Skyturn.
//!
//! Settings persist to disk as `config.ron`, accept CLI overrides via clap, and
//! support polling for hot reload. Missing fields fall back to defaults so old
//! config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, SkyConfig, ViewConfig};
pub use error::ConfigError;
