use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use siteledger_core::{DateRange, MaterialId, ProjectId};
use siteledger_inventory::{
    AdjustmentRequest, Material, MaterialMovement, StockPosition, UsageRequest,
    adjustment_movement, project_material_cost, stock_balance, stock_position, usage_movement,
};

use super::require;
use crate::config::EngineConfig;
use crate::error::ServiceResult;
use crate::store::LedgerStore;

/// Material catalog and stock ledger operations.
#[derive(Debug, Clone)]
pub struct StockService {
    store: LedgerStore,
    config: Arc<EngineConfig>,
}

impl StockService {
    pub fn new(store: LedgerStore, config: Arc<EngineConfig>) -> Self {
        Self { store, config }
    }

    #[instrument(skip(self))]
    pub fn add_material(
        &self,
        name: &str,
        unit: &str,
        reference_unit_price: Option<Decimal>,
    ) -> ServiceResult<Material> {
        let material = Material::new(name, unit, reference_unit_price)?;
        self.store.materials.insert(material.clone())?;
        info!(material = %material.id, "material added");
        Ok(material)
    }

    pub fn material(&self, id: MaterialId) -> ServiceResult<Material> {
        require(self.store.materials.as_ref(), &id)
    }

    /// Current quantity on hand. May be negative.
    #[instrument(skip(self))]
    pub fn stock_balance(&self, material_id: MaterialId) -> ServiceResult<Decimal> {
        let movements = self.movements_of(material_id)?;
        let quantity = stock_balance(material_id, &movements);
        if quantity < Decimal::ZERO {
            warn!(material = %material_id, quantity = %quantity, "stock balance is negative");
        }
        Ok(quantity)
    }

    /// Quantity plus ledger value and reference-price value. Negative stock is
    /// reported, never clamped.
    #[instrument(skip(self))]
    pub fn stock_valuation(&self, material_id: MaterialId) -> ServiceResult<StockPosition> {
        let material = self.material(material_id)?;
        let movements = self.movements_of(material_id)?;
        let position = stock_position(&material, &movements);
        if position.is_negative() {
            warn!(
                material = %material_id,
                quantity = %position.quantity,
                "stock balance is negative"
            );
        }
        Ok(position)
    }

    #[instrument(skip(self, note))]
    pub fn record_usage(
        &self,
        material_id: MaterialId,
        project_id: ProjectId,
        quantity: Decimal,
        unit_price: Decimal,
        occurred_on: NaiveDate,
        note: Option<String>,
    ) -> ServiceResult<MaterialMovement> {
        let material = self.material(material_id)?;
        require(self.store.projects.as_ref(), &project_id)?;
        let movement = usage_movement(
            &material,
            &UsageRequest {
                project_id,
                quantity,
                unit_price,
                occurred_on,
                note,
            },
            &self.config.unit_rules,
            self.config.money_scale,
        )?;
        self.store.movements.insert(movement.clone())?;
        info!(movement = %movement.id, value = %movement.total_value, "usage recorded");
        Ok(movement)
    }

    #[instrument(skip(self, note))]
    pub fn record_adjustment(
        &self,
        material_id: MaterialId,
        quantity: Decimal,
        total_value: Decimal,
        occurred_on: NaiveDate,
        note: Option<String>,
    ) -> ServiceResult<MaterialMovement> {
        let material = self.material(material_id)?;
        let movement = adjustment_movement(
            &material,
            &AdjustmentRequest {
                quantity,
                total_value,
                occurred_on,
                note,
            },
            &self.config.unit_rules,
        )?;
        self.store.movements.insert(movement.clone())?;
        info!(movement = %movement.id, "adjustment recorded");
        Ok(movement)
    }

    /// Every movement of an existing material, unordered.
    fn movements_of(&self, material_id: MaterialId) -> ServiceResult<Vec<MaterialMovement>> {
        self.material(material_id)?;
        Ok(self
            .store
            .movements
            .find(&|m| m.material_id == material_id)?)
    }

    /// Movements of one material, oldest first.
    pub fn material_movements(
        &self,
        material_id: MaterialId,
        range: Option<DateRange>,
    ) -> ServiceResult<Vec<MaterialMovement>> {
        self.material(material_id)?;
        let range = range.unwrap_or_default();
        let mut movements = self
            .store
            .movements
            .find(&|m| m.material_id == material_id && range.contains(m.occurred_on))?;
        movements.sort_by_key(|m| (m.occurred_on, m.id));
        Ok(movements)
    }

    pub fn project_material_cost(
        &self,
        project_id: ProjectId,
        range: &DateRange,
    ) -> ServiceResult<Decimal> {
        let movements = self
            .store
            .movements
            .find(&|m| m.project_id == Some(project_id))?;
        Ok(project_material_cost(project_id, range, &movements))
    }
}
