use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{
    DomainResult, Entity, MaterialId, MovementId, ProjectId, ensure_non_negative, ensure_positive,
};

/// Direction-bearing kind of a stock movement.
///
/// Quantities are always stored positive; the kind decides the sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Material consumed by a project (leaves stock).
    Usage,
    /// Surplus returned by a project (reverses part of its usage cost).
    LeftoverReturn,
    /// Manual stock entry or correction at warehouse level.
    Adjustment,
}

impl MovementKind {
    /// +1 for stock-increasing kinds, -1 for usage.
    pub fn sign(self) -> Decimal {
        match self {
            MovementKind::Usage => Decimal::NEGATIVE_ONE,
            MovementKind::LeftoverReturn | MovementKind::Adjustment => Decimal::ONE,
        }
    }
}

/// Immutable material ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialMovement {
    pub id: MovementId,
    pub material_id: MaterialId,
    /// `None` means warehouse-level (not tied to a project).
    pub project_id: Option<ProjectId>,
    pub kind: MovementKind,
    pub quantity: Decimal,
    pub total_value: Decimal,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
    /// Set on a leftover return written together with the warehouse adjustment
    /// that carries the same quantity. A paired return moves project cost only;
    /// the adjustment moves the stock.
    #[serde(default)]
    pub paired_movement_id: Option<MovementId>,
}

impl Entity for MaterialMovement {
    type Id = MovementId;
    const NAME: &'static str = "material movement";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl MaterialMovement {
    pub fn new(
        material_id: MaterialId,
        project_id: Option<ProjectId>,
        kind: MovementKind,
        quantity: Decimal,
        total_value: Decimal,
        occurred_on: NaiveDate,
        note: Option<String>,
    ) -> DomainResult<Self> {
        ensure_positive(quantity, "quantity")?;
        ensure_non_negative(total_value, "total_value")?;
        Ok(Self {
            id: MovementId::new(),
            material_id,
            project_id,
            kind,
            quantity,
            total_value,
            occurred_on,
            note,
            paired_movement_id: None,
        })
    }

    /// Link this movement to the counterpart carrying its stock effect.
    pub fn paired_with(mut self, counterpart: MovementId) -> Self {
        self.paired_movement_id = Some(counterpart);
        self
    }

    pub fn signed_quantity(&self) -> Decimal {
        self.kind.sign() * self.quantity
    }

    pub fn signed_value(&self) -> Decimal {
        self.kind.sign() * self.total_value
    }

    /// Contribution to the material's stock balance.
    pub fn stock_delta(&self) -> Decimal {
        if self.is_paired_return() {
            Decimal::ZERO
        } else {
            self.signed_quantity()
        }
    }

    /// Contribution to the material's ledger valuation.
    pub fn stock_value_delta(&self) -> Decimal {
        if self.is_paired_return() {
            Decimal::ZERO
        } else {
            self.signed_value()
        }
    }

    /// Contribution to the material cost of `project_id`: usage costs,
    /// leftover returns reverse cost, adjustments are stock corrections only.
    pub fn project_cost_delta(&self) -> Decimal {
        match self.kind {
            MovementKind::Usage => self.total_value,
            MovementKind::LeftoverReturn => -self.total_value,
            MovementKind::Adjustment => Decimal::ZERO,
        }
    }

    fn is_paired_return(&self) -> bool {
        self.kind == MovementKind::LeftoverReturn && self.paired_movement_id.is_some()
    }

    pub fn is_warehouse_level(&self) -> bool {
        self.project_id.is_none()
    }
}
