//! Quantity granularity per unit of measure.
//!
//! Stock of count-based units ("un", "pc") must move in whole numbers; bulk
//! units ("m3", "kg") may be fractional. Which unit behaves how is
//! configuration, not a hard-coded rule.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{DomainError, DomainResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuantityRule {
    /// Whole units only.
    Integer,
    /// Fractional quantities up to `max_scale` decimal places.
    Fractional { max_scale: u32 },
}

impl QuantityRule {
    pub fn check(&self, quantity: Decimal) -> DomainResult<()> {
        match *self {
            QuantityRule::Integer => {
                if quantity.fract() != Decimal::ZERO {
                    return Err(DomainError::validation(format!(
                        "quantity {quantity} must be a whole number of units"
                    )));
                }
            }
            QuantityRule::Fractional { max_scale } => {
                if quantity.normalize().scale() > max_scale {
                    return Err(DomainError::validation(format!(
                        "quantity {quantity} exceeds {max_scale} decimal places"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Unit -> rule table with a fallback for unlisted units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRules {
    #[serde(default = "UnitRules::default_rule")]
    pub default: QuantityRule,
    #[serde(default)]
    pub units: HashMap<String, QuantityRule>,
}

impl Default for UnitRules {
    fn default() -> Self {
        Self {
            default: Self::default_rule(),
            units: HashMap::new(),
        }
    }
}

impl UnitRules {
    fn default_rule() -> QuantityRule {
        QuantityRule::Integer
    }

    /// Register a rule for one unit (builder style).
    pub fn with_unit(mut self, unit: impl Into<String>, rule: QuantityRule) -> Self {
        self.units.insert(unit.into().to_lowercase(), rule);
        self
    }

    /// Unit lookup is case-insensitive.
    pub fn rule_for(&self, unit: &str) -> QuantityRule {
        self.units
            .get(&unit.to_lowercase())
            .copied()
            .unwrap_or(self.default)
    }

    pub fn check(&self, unit: &str, quantity: Decimal) -> DomainResult<()> {
        self.rule_for(unit).check(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_rule_rejects_fractions() {
        let rules = UnitRules::default();
        assert!(rules.check("un", dec!(3)).is_ok());
        assert!(rules.check("un", dec!(3.00)).is_ok());
        assert!(rules.check("un", dec!(2.5)).is_err());
    }

    #[test]
    fn configured_units_allow_fractions() {
        let rules = UnitRules::default().with_unit("M3", QuantityRule::Fractional { max_scale: 3 });
        assert!(rules.check("m3", dec!(1.125)).is_ok());
        assert!(rules.check("m3", dec!(1.1250)).is_ok());
        assert!(rules.check("m3", dec!(1.0001)).is_err());
        assert!(rules.check("bag", dec!(1.5)).is_err());
    }

    #[test]
    fn rules_deserialize_from_json() {
        let rules: UnitRules = serde_json::from_str(
            r#"{"units":{"kg":{"kind":"fractional","max_scale":2}}}"#,
        )
        .unwrap();
        assert_eq!(rules.default, QuantityRule::Integer);
        assert_eq!(rules.rule_for("KG"), QuantityRule::Fractional { max_scale: 2 });
    }
}
