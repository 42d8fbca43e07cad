use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use siteledger_core::{Entity, LeftoverId, MaterialId, ProjectId};
use siteledger_inventory::{
    CreditRequest, LeftoverBalance, LeftoverCredit, LeftoverDraw, LeftoverRecord, LeftoverRequest,
    leftover_balance, plan_credit, plan_leftover, plan_loose_leftover,
};

use super::require;
use crate::config::EngineConfig;
use crate::error::ServiceResult;
use crate::saga;
use crate::store::{LedgerStore, StoreError};

/// Leftover lifecycle: create (saga), apply credits, delete (saga).
///
/// Writes that read a leftover's balance before changing it hold `writes`
/// so two credits cannot both pass the balance check.
#[derive(Debug, Clone)]
pub struct LeftoverService {
    store: LedgerStore,
    config: Arc<EngineConfig>,
    writes: Arc<Mutex<()>>,
}

impl LeftoverService {
    pub fn new(store: LedgerStore, config: Arc<EngineConfig>) -> Self {
        Self {
            store,
            config,
            writes: Arc::new(Mutex::new(())),
        }
    }

    fn lock(&self) -> ServiceResult<MutexGuard<'_, ()>> {
        self.writes
            .lock()
            .map_err(|_| StoreError::Poisoned(LeftoverRecord::NAME).into())
    }

    fn require_origin(&self, origin: Option<ProjectId>) -> ServiceResult<()> {
        if let Some(project_id) = origin {
            require(self.store.projects.as_ref(), &project_id)?;
        }
        Ok(())
    }

    /// Convert surplus catalog material into a leftover. With an origin
    /// project the project's material cost is reduced by the leftover value.
    #[instrument(skip(self, note))]
    pub fn create_leftover(
        &self,
        material_id: MaterialId,
        quantity: Decimal,
        origin_project_id: Option<ProjectId>,
        occurred_on: NaiveDate,
        note: Option<String>,
    ) -> ServiceResult<LeftoverRecord> {
        let material = require(self.store.materials.as_ref(), &material_id)?;
        self.require_origin(origin_project_id)?;
        let plan = plan_leftover(
            &material,
            &LeftoverRequest {
                quantity,
                origin_project_id,
                occurred_on,
                note,
            },
            &self.config.unit_rules,
            self.config.money_scale,
        )?;
        let record = saga::leftover::create(&self.store, plan)?;
        info!(leftover = %record.id, value = %record.total_value, "leftover created");
        Ok(record)
    }

    /// Register a leftover that predates the material catalog. No stock
    /// movement is written.
    #[instrument(skip(self))]
    pub fn create_loose_leftover(
        &self,
        description: &str,
        quantity: Decimal,
        total_value: Decimal,
        origin_project_id: Option<ProjectId>,
        created_on: NaiveDate,
    ) -> ServiceResult<LeftoverRecord> {
        self.require_origin(origin_project_id)?;
        let plan = plan_loose_leftover(
            description,
            quantity,
            total_value,
            origin_project_id,
            created_on,
        )?;
        let record = saga::leftover::create(&self.store, plan)?;
        info!(leftover = %record.id, "loose leftover created");
        Ok(record)
    }

    #[instrument(skip(self))]
    pub fn delete_leftover(&self, id: LeftoverId) -> ServiceResult<LeftoverRecord> {
        let _guard = self.lock()?;
        let record = saga::leftover::delete(&self.store, id)?;
        info!(leftover = %id, "leftover deleted");
        Ok(record)
    }

    /// Apply part of a leftover to a destination project. On any failure the
    /// leftover balance is unchanged.
    #[instrument(skip(self, note))]
    pub fn apply_leftover(
        &self,
        id: LeftoverId,
        destination_project_id: ProjectId,
        draw: LeftoverDraw,
        applied_on: NaiveDate,
        note: Option<String>,
    ) -> ServiceResult<LeftoverCredit> {
        let _guard = self.lock()?;
        let record = require(self.store.leftovers.as_ref(), &id)?;
        require(self.store.projects.as_ref(), &destination_project_id)?;
        let material = record
            .material_id
            .map(|material_id| require(self.store.materials.as_ref(), &material_id))
            .transpose()?;
        let credits = self.credits(id)?;
        let credit = plan_credit(
            &record,
            &credits,
            CreditRequest {
                destination_project_id,
                draw,
                applied_on,
                note,
            },
            material.as_ref().map(|m| (m.unit.as_str(), &self.config.unit_rules)),
            self.config.money_scale,
        )?;
        self.store.leftover_credits.insert(credit.clone())?;
        info!(
            leftover = %id,
            credit = %credit.id,
            quantity = %credit.applied_quantity,
            value = %credit.applied_value,
            "leftover applied"
        );
        Ok(credit)
    }

    pub fn leftover(&self, id: LeftoverId) -> ServiceResult<LeftoverRecord> {
        require(self.store.leftovers.as_ref(), &id)
    }

    pub fn leftover_balance(&self, id: LeftoverId) -> ServiceResult<LeftoverBalance> {
        let record = self.leftover(id)?;
        let credits = self.credits(id)?;
        Ok(leftover_balance(&record, &credits))
    }

    /// Credits drawn from one leftover, oldest first.
    pub fn credits(&self, id: LeftoverId) -> ServiceResult<Vec<LeftoverCredit>> {
        let mut credits = self.store.leftover_credits.find(&|c| c.leftover_id == id)?;
        credits.sort_by_key(|c| (c.applied_on, c.id));
        Ok(credits)
    }
}
