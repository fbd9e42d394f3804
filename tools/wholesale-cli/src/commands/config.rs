//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde::Serialize;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, WholesaleConfig};
use crate::context::Context;

#[derive(Serialize)]
struct ConfigView<'a> {
    path: Option<String>,
    config: &'a WholesaleConfig,
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let path = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string());

    if ctx.output.is_json() {
        ctx.output.json(&ConfigView {
            path,
            config: &ctx.config,
        });
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output
        .kv("file", path.as_deref().unwrap_or("(none, using defaults)"));

    ctx.output.info("");
    ctx.output.info("[shipping]");
    if ctx.config.has_custom_schedule() {
        ctx.output.kv("tiers", &ctx.schedule.tiers.len().to_string());
        ctx.output.kv("tail_rate", &ctx.schedule.tail_rate.to_string());
    } else {
        ctx.output.kv("schedule", "standard");
    }

    ctx.output.info("");
    ctx.output.info("[output]");
    let format = match ctx.config.output.currency_format {
        crate::config::CurrencyFormat::Fr => "fr",
        crate::config::CurrencyFormat::Symbol => "symbol",
    };
    ctx.output.kv("currency_format", format);

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("format", &ctx.config.log.format);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("wholesale.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "created": config_path.display().to_string() }));
    }

    Ok(())
}
