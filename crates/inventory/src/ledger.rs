//! Material stock ledger: balances and costs derived from movement history.
//!
//! Every function here recomputes from the slice it is given; there is no
//! running balance to keep in sync.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{DateRange, DomainResult, MaterialId, ProjectId, round_money};

use crate::material::Material;
use crate::movement::{MaterialMovement, MovementKind};
use crate::units::UnitRules;

/// Derived stock position of one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPosition {
    pub material_id: MaterialId,
    /// adjustments + unpaired leftover returns - usages. Never clamped.
    pub quantity: Decimal,
    /// Signed sum of movement total values.
    pub ledger_value: Decimal,
    /// `quantity` x reference price, when the material is priced.
    pub reference_value: Option<Decimal>,
    pub movement_count: usize,
}

impl StockPosition {
    /// Negative stock is allowed but surfaced as an anomaly.
    pub fn is_negative(&self) -> bool {
        self.quantity < Decimal::ZERO
    }
}

/// Stock balance of `material_id` over the full history in `movements`.
pub fn stock_balance<'a>(
    material_id: MaterialId,
    movements: impl IntoIterator<Item = &'a MaterialMovement>,
) -> Decimal {
    movements
        .into_iter()
        .filter(|m| m.material_id == material_id)
        .map(MaterialMovement::stock_delta)
        .sum()
}

/// Full stock position (quantity + valuation) of a material.
pub fn stock_position(material: &Material, movements: &[MaterialMovement]) -> StockPosition {
    let mut quantity = Decimal::ZERO;
    let mut ledger_value = Decimal::ZERO;
    let mut movement_count = 0;

    for m in movements.iter().filter(|m| m.material_id == material.id) {
        quantity += m.stock_delta();
        ledger_value += m.stock_value_delta();
        movement_count += 1;
    }

    StockPosition {
        material_id: material.id,
        quantity,
        ledger_value,
        reference_value: material.reference_unit_price.map(|p| quantity * p),
        movement_count,
    }
}

/// Net material cost booked against a project in `range`:
/// usage values minus leftover-return reversals.
pub fn project_material_cost<'a>(
    project_id: ProjectId,
    range: &DateRange,
    movements: impl IntoIterator<Item = &'a MaterialMovement>,
) -> Decimal {
    movements
        .into_iter()
        .filter(|m| m.project_id == Some(project_id) && range.contains(m.occurred_on))
        .map(MaterialMovement::project_cost_delta)
        .sum()
}

/// Input for a usage movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRequest {
    pub project_id: ProjectId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
}

/// Input for a warehouse-level adjustment movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentRequest {
    pub quantity: Decimal,
    pub total_value: Decimal,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
}

/// Build a `usage` movement (total_value = quantity x unit_price).
pub fn usage_movement(
    material: &Material,
    request: &UsageRequest,
    rules: &UnitRules,
    money_scale: u32,
) -> DomainResult<MaterialMovement> {
    siteledger_core::ensure_positive(request.quantity, "quantity")?;
    siteledger_core::ensure_non_negative(request.unit_price, "unit_price")?;
    rules.check(&material.unit, request.quantity)?;

    MaterialMovement::new(
        material.id,
        Some(request.project_id),
        MovementKind::Usage,
        request.quantity,
        round_money(request.quantity * request.unit_price, money_scale),
        request.occurred_on,
        request.note.clone(),
    )
}

/// Build a warehouse-level `adjustment` movement.
pub fn adjustment_movement(
    material: &Material,
    request: &AdjustmentRequest,
    rules: &UnitRules,
) -> DomainResult<MaterialMovement> {
    siteledger_core::ensure_positive(request.quantity, "quantity")?;
    rules.check(&material.unit, request.quantity)?;

    MaterialMovement::new(
        material.id,
        None,
        MovementKind::Adjustment,
        request.quantity,
        request.total_value,
        request.occurred_on,
        request.note.clone(),
    )
}
