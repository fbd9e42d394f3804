//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use wholesale_commerce::money::{Currency, Money};
use wholesale_commerce::shipping::ShippingSchedule;
use wholesale_core::RequestId;
use wholesale_observability::{LogLevel, StructuredLogger};

use crate::config::WholesaleConfig;
use crate::output::Output;

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["wholesale.toml", ".wholesale.toml", "wholesale.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: WholesaleConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Schedule used for every quote in this run.
    pub schedule: ShippingSchedule,
    /// Output handler.
    pub output: Output,
    /// Diagnostic log, filtered by `[log]`.
    pub logger: StructuredLogger,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => WholesaleConfig::load(path)?,
            None => WholesaleConfig::default(),
        };

        let mut min_level = config.log.level()?;
        if output.is_verbose() {
            min_level = min_level.min(LogLevel::Debug);
        }
        let logger = StructuredLogger::new(RequestId::generate())
            .with_workload("wholesale-cli")
            .with_min_level(min_level)
            .with_format(config.log.format()?);

        match &config_path {
            Some(path) => logger
                .debug_builder("Loaded config")
                .field("path", path.display().to_string())
                .field_bool("custom_schedule", config.has_custom_schedule())
                .emit(),
            None => logger.debug("No config file found, using defaults"),
        }

        Ok(Self {
            schedule: config.schedule(),
            config,
            config_path,
            output,
            logger,
            cwd,
        })
    }

    /// Format an amount per `[output] currency_format`.
    pub fn money(&self, amount: &Money) -> String {
        self.config.output.currency_format.format(amount)
    }

    /// Format a whole-unit amount per `[output] currency_format`.
    pub fn money_units(&self, units: i64, currency: Currency) -> String {
        self.config.output.currency_format.format_units(units, currency)
    }

    /// Context over an in-memory config, JSON output, nothing read from disk.
    #[cfg(test)]
    pub fn for_config(config: WholesaleConfig) -> Self {
        Self {
            schedule: config.schedule(),
            config,
            config_path: None,
            output: Output::new(false, true),
            logger: StructuredLogger::new(RequestId::from_string("test"))
                .with_min_level(LogLevel::Error),
            cwd: std::env::temp_dir(),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "wholesale-context-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_in_parent() {
        let root = scratch_dir("parent");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("wholesale.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.join("wholesale.toml")));
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let root = scratch_dir("order");
        std::fs::write(root.join("wholesale.json"), "{}").unwrap();
        std::fs::write(root.join(".wholesale.toml"), "").unwrap();

        assert_eq!(find_config(&root), Some(root.join(".wholesale.toml")));
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_resolve() {
        let cwd = Path::new("/work");
        assert_eq!(resolve(cwd, "order.toml"), PathBuf::from("/work/order.toml"));
        assert_eq!(resolve(cwd, "/tmp/order.toml"), PathBuf::from("/tmp/order.toml"));
    }
}
