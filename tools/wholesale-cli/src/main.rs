//! Wholesale CLI - quote and check the storefront's shipping schedule.
//!
//! Commands:
//! - `wholesale quote` - Quote shipping for an item count
//! - `wholesale details` - Table of quotes over a range of counts
//! - `wholesale schedule` - Show the active tiers and how they meet
//! - `wholesale check` - Run the reference quotes
//! - `wholesale order` - Price a draft order from a file
//! - `wholesale config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, DetailsArgs, OrderArgs, QuoteArgs};

/// Wholesale CLI - Quote and check tiered shipping fees
#[derive(Parser)]
#[command(name = "wholesale")]
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
    /// Quote shipping for an item count
    Quote(QuoteArgs),

    /// Quote every count in an inclusive range
    Details(DetailsArgs),

    /// Show the active schedule and its tier boundaries
    Schedule,

    /// Run the reference quotes against the active schedule
    Check,

    /// Price a draft order from a JSON or TOML file
    Order(OrderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Details(args) => commands::details::run(args, &ctx),
        Commands::Schedule => commands::schedule::run(&ctx),
        Commands::Check => commands::check::run(&ctx),
        Commands::Order(args) => commands::order::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
