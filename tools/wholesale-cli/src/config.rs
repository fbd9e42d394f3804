//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wholesale_commerce::money::{Currency, Money};
use wholesale_commerce::shipping::ShippingSchedule;
use wholesale_observability::{LogFormat, LogLevel};

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WholesaleConfig {
    /// Custom shipping schedule; the standard one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingSchedule>,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

impl WholesaleConfig {
    /// Load config from a file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Check the schedule and the log settings.
    pub fn validate(&self) -> Result<()> {
        if let Some(schedule) = &self.shipping {
            schedule.validate().context("shipping schedule")?;
        }
        self.log.level()?;
        self.log.format()?;
        Ok(())
    }

    /// Schedule used for quotes.
    pub fn schedule(&self) -> ShippingSchedule {
        self.shipping.clone().unwrap_or_default()
    }

    /// Whether the schedule comes from this config rather than the default.
    pub fn has_custom_schedule(&self) -> bool {
        self.shipping.is_some()
    }
}

/// How amounts are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyFormat {
    /// `"1 234,50 €"`
    #[default]
    Fr,
    /// `"€1234.50"`
    Symbol,
}

impl CurrencyFormat {
    pub fn format(&self, amount: &Money) -> String {
        match self {
            CurrencyFormat::Fr => amount.display_fr(),
            CurrencyFormat::Symbol => amount.display(),
        }
    }

    /// Format a whole-unit amount, exact even past the range of cents.
    pub fn format_units(&self, units: i64, currency: Currency) -> String {
        match self {
            CurrencyFormat::Fr => Money::display_units_fr(units, currency),
            CurrencyFormat::Symbol => Money::display_units(units, currency),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub currency_format: CurrencyFormat,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level (debug, info, warn, error).
    #[serde(default = "default_level")]
    pub level: String,

    /// `human` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "human".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LogConfig {
    pub fn level(&self) -> Result<LogLevel> {
        self.level
            .parse()
            .map_err(|e| anyhow::anyhow!("log.level: {}", e))
    }

    pub fn format(&self) -> Result<LogFormat> {
        self.format
            .parse()
            .map_err(|e| anyhow::anyhow!("log.format: {}", e))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Generate a default wholesale.toml config file.
pub fn generate_default_config() -> String {
    r#"# Wholesale shipping configuration

[output]
# "fr" prints 1 234,50 €, "symbol" prints €1234.50
currency_format = "fr"

[log]
level = "warn"
format = "human"

# Uncomment to replace the standard schedule. Tiers must start at 1 item
# and be contiguous.
#
# [shipping]
# tail_rate = 0.79
#
# [[shipping.tiers]]
# min_items = 1
# max_items = 2
# rule = { kind = "flat", cost = 13 }
#
# [[shipping.tiers]]
# min_items = 46
# max_items = 99
# rule = { kind = "interpolated", from = { items = 45, cost = 45 }, to = { items = 100, cost = 100 } }
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: WholesaleConfig = toml::from_str(&generate_default_config()).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.has_custom_schedule());
        assert_eq!(config.output.currency_format, CurrencyFormat::Fr);
        assert_eq!(config.log.level().unwrap(), LogLevel::Warn);
        assert_eq!(config.log.format().unwrap(), LogFormat::Human);
        assert_eq!(config.schedule(), ShippingSchedule::standard());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: WholesaleConfig = toml::from_str("").unwrap();
        assert_eq!(config, WholesaleConfig::default());
    }

    #[test]
    fn test_custom_schedule() {
        let config: WholesaleConfig = toml::from_str(
            r#"
            [shipping]
            tail_rate = 1.0

            [[shipping.tiers]]
            min_items = 1
            max_items = 10
            rule = { kind = "flat", cost = 9 }
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        let schedule = config.schedule();
        assert_eq!(schedule.cost_for(10), 9);
        assert_eq!(schedule.cost_for(11), 11);
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let config: WholesaleConfig = toml::from_str(
            r#"
            [shipping]
            tail_rate = 0.79

            [[shipping.tiers]]
            min_items = 3
            max_items = 10
            rule = { kind = "flat", cost = 9 }
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let config: WholesaleConfig = toml::from_str("[log]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_currency_format() {
        let amount = Money::from_units(1234, Currency::EUR);
        assert_eq!(CurrencyFormat::Fr.format(&amount), "1\u{202f}234,00\u{a0}€");
        assert_eq!(CurrencyFormat::Symbol.format(&amount), "€1234.00");

        assert_eq!(
            CurrencyFormat::Symbol.format_units(158_000_000_000_000_000, Currency::EUR),
            "€158000000000000000.00"
        );

        let config: WholesaleConfig =
            toml::from_str("[output]\ncurrency_format = \"symbol\"\n").unwrap();
        assert_eq!(config.output.currency_format, CurrencyFormat::Symbol);
    }

    #[test]
    fn test_load_json() {
        let path = std::env::temp_dir().join(format!(
            "wholesale-config-test-{}.json",
            std::process::id()
        ));
        let config = WholesaleConfig {
            shipping: Some(ShippingSchedule::standard()),
            ..WholesaleConfig::default()
        };

        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = WholesaleConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
