use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{DomainError, DomainResult, Entity, MaterialId, ensure_non_negative};

/// Catalog material.
///
/// Stock is never stored here; it is derived from the movement ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    /// Unit of measure (e.g. "un", "m3", "kg"); drives quantity granularity.
    pub unit: String,
    /// Reference price per unit. `None` for materials that were never priced.
    pub reference_unit_price: Option<Decimal>,
}

impl Entity for Material {
    type Id = MaterialId;
    const NAME: &'static str = "material";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        reference_unit_price: Option<Decimal>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("material name cannot be empty"));
        }
        if let Some(price) = reference_unit_price {
            ensure_non_negative(price, "reference_unit_price")?;
        }
        Ok(Self {
            id: MaterialId::new(),
            name,
            unit: unit.into(),
            reference_unit_price,
        })
    }

    /// Reference price, required for anything whose value must be computable.
    pub fn require_reference_price(&self) -> DomainResult<Decimal> {
        match self.reference_unit_price {
            Some(price) if price > Decimal::ZERO => Ok(price),
            _ => Err(DomainError::validation(format!(
                "material '{}' has no reference price",
                self.name
            ))),
        }
    }
}
