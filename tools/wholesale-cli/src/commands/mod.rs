//! CLI command implementations.

pub mod check;
pub mod config;
pub mod details;
pub mod order;
pub mod quote;
pub mod schedule;

use clap::{Args, Subcommand};

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Total number of items in the order.
    #[arg(allow_negative_numbers = true)]
    pub items: i64,
}

/// Arguments for the details command.
#[derive(Args)]
pub struct DetailsArgs {
    /// First item count (inclusive).
    #[arg(allow_negative_numbers = true)]
    pub from: i64,

    /// Last item count (inclusive).
    #[arg(allow_negative_numbers = true)]
    pub to: i64,

    /// Only print counts where the fee changes.
    #[arg(long)]
    pub changes_only: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Draft order file (JSON or TOML).
    pub file: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default wholesale.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
