//! Engine configuration.
//!
//! Loaded from `SITELEDGER_*` environment variables or from a JSON document.
//! Anything not set falls back to the defaults below.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::MONEY_SCALE;
use siteledger_inventory::UnitRules;
use siteledger_observability::LogFormat;

pub const ENV_UNIT_RULES: &str = "SITELEDGER_UNIT_RULES";
pub const ENV_HOURS_PER_DAY: &str = "SITELEDGER_HOURS_PER_DAY";
pub const ENV_MONEY_SCALE: &str = "SITELEDGER_MONEY_SCALE";
pub const ENV_LOG_FORMAT: &str = "SITELEDGER_LOG_FORMAT";

const MAX_MONEY_SCALE: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quantity granularity per unit of measure.
    pub unit_rules: UnitRules,
    /// Converts daily rates into hourly allocation snapshots.
    pub hours_per_day: Decimal,
    /// Decimal places kept on computed money values.
    pub money_scale: u32,
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unit_rules: UnitRules::default(),
            hours_per_day: Decimal::from(8),
            money_scale: MONEY_SCALE,
            log_format: LogFormat::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_UNIT_RULES) {
            config.unit_rules = serde_json::from_str(&raw).map_err(|e| ConfigError::Invalid {
                key: ENV_UNIT_RULES,
                message: e.to_string(),
            })?;
        }
        if let Some(raw) = lookup(ENV_HOURS_PER_DAY) {
            config.hours_per_day = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: ENV_HOURS_PER_DAY,
                message: format!("{e}"),
            })?;
        }
        if let Some(raw) = lookup(ENV_MONEY_SCALE) {
            config.money_scale = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: ENV_MONEY_SCALE,
                message: format!("{e}"),
            })?;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw.parse().map_err(|e| ConfigError::Invalid {
                key: ENV_LOG_FORMAT,
                message: format!("{e}"),
            })?;
        }

        config.validate()
    }

    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.hours_per_day <= Decimal::ZERO || self.hours_per_day > Decimal::from(24) {
            return Err(ConfigError::Invalid {
                key: ENV_HOURS_PER_DAY,
                message: format!("{} is outside (0, 24]", self.hours_per_day),
            });
        }
        if self.money_scale > MAX_MONEY_SCALE {
            return Err(ConfigError::Invalid {
                key: ENV_MONEY_SCALE,
                message: format!("{} exceeds {MAX_MONEY_SCALE}", self.money_scale),
            });
        }
        Ok(self)
    }
}
