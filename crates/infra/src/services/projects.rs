use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use siteledger_accounting::{
    CostKind, Project, ProjectBudget, ProjectBudgetItem, ProjectCost, ProjectRevenue,
    ProjectStatus,
};
use siteledger_core::{BudgetId, ProjectId};

use super::require;
use crate::error::ServiceResult;
use crate::store::LedgerStore;

/// Projects and their directly booked money: revenues, costs, budgets.
#[derive(Debug, Clone)]
pub struct ProjectService {
    store: LedgerStore,
}

impl ProjectService {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub fn add_project(&self, name: &str, client_name: Option<String>) -> ServiceResult<Project> {
        let project = Project::new(name, client_name)?;
        self.store.projects.insert(project.clone())?;
        info!(project = %project.id, "project added");
        Ok(project)
    }

    pub fn project(&self, id: ProjectId) -> ServiceResult<Project> {
        require(self.store.projects.as_ref(), &id)
    }

    #[instrument(skip(self))]
    pub fn set_status(&self, id: ProjectId, status: ProjectStatus) -> ServiceResult<Project> {
        let mut project = self.project(id)?;
        project.status = status;
        self.store.projects.update(project.clone())?;
        Ok(project)
    }

    #[instrument(skip(self))]
    pub fn record_revenue(
        &self,
        project_id: ProjectId,
        description: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> ServiceResult<ProjectRevenue> {
        self.project(project_id)?;
        let revenue = ProjectRevenue::new(project_id, description, amount, date)?;
        self.store.revenues.insert(revenue.clone())?;
        Ok(revenue)
    }

    #[instrument(skip(self))]
    pub fn record_cost(
        &self,
        project_id: ProjectId,
        kind: CostKind,
        description: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> ServiceResult<ProjectCost> {
        self.project(project_id)?;
        let cost = ProjectCost::new(project_id, kind, description, amount, date)?;
        self.store.costs.insert(cost.clone())?;
        Ok(cost)
    }

    #[instrument(skip(self))]
    pub fn add_budget(&self, project_id: ProjectId, name: &str) -> ServiceResult<ProjectBudget> {
        self.project(project_id)?;
        let budget = ProjectBudget::new(project_id, name)?;
        self.store.budgets.insert(budget.clone())?;
        Ok(budget)
    }

    #[instrument(skip(self))]
    pub fn add_budget_item(
        &self,
        budget_id: BudgetId,
        description: &str,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> ServiceResult<ProjectBudgetItem> {
        require(self.store.budgets.as_ref(), &budget_id)?;
        let item = ProjectBudgetItem::new(budget_id, description, quantity, unit_price)?;
        self.store.budget_items.insert(item.clone())?;
        Ok(item)
    }
}
