//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id, matching the catalog feed.
    pub product_id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    #[arg(allow_negative_numbers = true)]
    pub price: f64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product id to remove.
    pub product_id: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
