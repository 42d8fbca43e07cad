use std::sync::Arc;

use siteledger_accounting::{
    CompanyCashMovement, Project, ProjectBudget, ProjectBudgetItem, ProjectCost, ProjectRevenue,
};
use siteledger_inventory::{LeftoverCredit, LeftoverRecord, Material, MaterialMovement};
use siteledger_labor::{Employee, LaborAllocation, LaborEntry};
use siteledger_reporting::LedgerSnapshot;

use super::{InMemoryTable, StoreError, Table};

/// One handle per ledger table. Cloning shares the underlying tables.
#[derive(Clone)]
pub struct LedgerStore {
    pub projects: Arc<dyn Table<Project>>,
    pub materials: Arc<dyn Table<Material>>,
    pub movements: Arc<dyn Table<MaterialMovement>>,
    pub leftovers: Arc<dyn Table<LeftoverRecord>>,
    pub leftover_credits: Arc<dyn Table<LeftoverCredit>>,
    pub employees: Arc<dyn Table<Employee>>,
    pub allocations: Arc<dyn Table<LaborAllocation>>,
    pub labor_entries: Arc<dyn Table<LaborEntry>>,
    pub cash_movements: Arc<dyn Table<CompanyCashMovement>>,
    pub revenues: Arc<dyn Table<ProjectRevenue>>,
    pub costs: Arc<dyn Table<ProjectCost>>,
    pub budgets: Arc<dyn Table<ProjectBudget>>,
    pub budget_items: Arc<dyn Table<ProjectBudgetItem>>,
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore").finish_non_exhaustive()
    }
}

impl LedgerStore {
    pub fn in_memory() -> Self {
        Self {
            projects: Arc::new(InMemoryTable::new()),
            materials: Arc::new(InMemoryTable::new()),
            movements: Arc::new(InMemoryTable::new()),
            leftovers: Arc::new(InMemoryTable::new()),
            leftover_credits: Arc::new(InMemoryTable::new()),
            employees: Arc::new(InMemoryTable::new()),
            allocations: Arc::new(InMemoryTable::new()),
            labor_entries: Arc::new(InMemoryTable::new()),
            cash_movements: Arc::new(InMemoryTable::new()),
            revenues: Arc::new(InMemoryTable::new()),
            costs: Arc::new(InMemoryTable::new()),
            budgets: Arc::new(InMemoryTable::new()),
            budget_items: Arc::new(InMemoryTable::new()),
        }
    }

    /// Read every table in full.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, StoreError> {
        Ok(LedgerSnapshot {
            projects: self.projects.list()?,
            materials: self.materials.list()?,
            movements: self.movements.list()?,
            leftovers: self.leftovers.list()?,
            leftover_credits: self.leftover_credits.list()?,
            employees: self.employees.list()?,
            allocations: self.allocations.list()?,
            labor_entries: self.labor_entries.list()?,
            cash_movements: self.cash_movements.list()?,
            revenues: self.revenues.list()?,
            costs: self.costs.list()?,
            budgets: self.budgets.list()?,
            budget_items: self.budget_items.list()?,
        })
    }

    /// Insert every row of `snapshot`. Stops at the first failure; rows
    /// already inserted stay.
    pub fn import(&self, snapshot: LedgerSnapshot) -> Result<(), StoreError> {
        fn load<V: siteledger_core::Entity>(
            table: &dyn Table<V>,
            rows: Vec<V>,
        ) -> Result<(), StoreError> {
            rows.into_iter().try_for_each(|row| table.insert(row))
        }

        load(self.projects.as_ref(), snapshot.projects)?;
        load(self.materials.as_ref(), snapshot.materials)?;
        load(self.movements.as_ref(), snapshot.movements)?;
        load(self.leftovers.as_ref(), snapshot.leftovers)?;
        load(self.leftover_credits.as_ref(), snapshot.leftover_credits)?;
        load(self.employees.as_ref(), snapshot.employees)?;
        load(self.allocations.as_ref(), snapshot.allocations)?;
        load(self.labor_entries.as_ref(), snapshot.labor_entries)?;
        load(self.cash_movements.as_ref(), snapshot.cash_movements)?;
        load(self.revenues.as_ref(), snapshot.revenues)?;
        load(self.costs.as_ref(), snapshot.costs)?;
        load(self.budgets.as_ref(), snapshot.budgets)?;
        load(self.budget_items.as_ref(), snapshot.budget_items)?;
        Ok(())
    }
}
