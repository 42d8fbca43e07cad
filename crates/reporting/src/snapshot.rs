use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use siteledger_accounting::{
    CompanyCashMovement, Project, ProjectBudget, ProjectBudgetItem, ProjectCost, ProjectRevenue,
};
use siteledger_core::{EmployeeId, ProjectId};
use siteledger_inventory::{LeftoverCredit, LeftoverRecord, Material, MaterialMovement};
use siteledger_labor::{Employee, LaborAllocation, LaborEntry};

/// Every ledger table a rollup may read, loaded in full.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSnapshot {
    pub projects: Vec<Project>,
    pub materials: Vec<Material>,
    pub movements: Vec<MaterialMovement>,
    pub leftovers: Vec<LeftoverRecord>,
    pub leftover_credits: Vec<LeftoverCredit>,
    pub employees: Vec<Employee>,
    pub allocations: Vec<LaborAllocation>,
    pub labor_entries: Vec<LaborEntry>,
    pub cash_movements: Vec<CompanyCashMovement>,
    pub revenues: Vec<ProjectRevenue>,
    pub costs: Vec<ProjectCost>,
    pub budgets: Vec<ProjectBudget>,
    pub budget_items: Vec<ProjectBudgetItem>,
}

impl LedgerSnapshot {
    pub fn employee_book(&self) -> HashMap<EmployeeId, Employee> {
        self.employees.iter().map(|e| (e.id, e.clone())).collect()
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn budgets_of(&self, id: ProjectId) -> Vec<ProjectBudget> {
        self.budgets
            .iter()
            .filter(|b| b.project_id == id)
            .cloned()
            .collect()
    }
}
