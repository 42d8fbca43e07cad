use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use siteledger_core::{AllocationId, DateRange, EmployeeId, ProjectId, ensure_non_negative};
use siteledger_labor::{
    BillingType, CompanyLaborCost, Employee, LaborAllocation, LaborEntry, ProjectLaborCost,
    company_labor_cost, project_labor_cost,
};

use super::require;
use crate::config::EngineConfig;
use crate::error::ServiceResult;
use crate::store::LedgerStore;

/// Employees, both labor recording mechanisms, and labor cost reads.
#[derive(Debug, Clone)]
pub struct LaborService {
    store: LedgerStore,
    config: Arc<EngineConfig>,
}

impl LaborService {
    pub fn new(store: LedgerStore, config: Arc<EngineConfig>) -> Self {
        Self { store, config }
    }

    #[instrument(skip(self))]
    pub fn add_employee(
        &self,
        name: &str,
        billing: BillingType,
        current_rate: Decimal,
    ) -> ServiceResult<Employee> {
        let employee = Employee::new(name, billing, current_rate)?;
        self.store.employees.insert(employee.clone())?;
        info!(employee = %employee.id, "employee added");
        Ok(employee)
    }

    /// Change an employee's current rate. Legacy entries pick it up on the
    /// next read; existing allocations keep their snapshot.
    #[instrument(skip(self))]
    pub fn set_employee_rate(&self, id: EmployeeId, rate: Decimal) -> ServiceResult<Employee> {
        ensure_non_negative(rate, "current_rate")?;
        let mut employee = require(self.store.employees.as_ref(), &id)?;
        employee.current_rate = rate;
        self.store.employees.update(employee.clone())?;
        info!(employee = %id, rate = %rate, "employee rate changed");
        Ok(employee)
    }

    /// Record hours on a project, snapshotting the employee's hourly rate.
    #[instrument(skip(self, note))]
    pub fn record_allocation(
        &self,
        employee_id: EmployeeId,
        project_id: ProjectId,
        date: NaiveDate,
        hours: Decimal,
        note: Option<String>,
    ) -> ServiceResult<LaborAllocation> {
        let employee = require(self.store.employees.as_ref(), &employee_id)?;
        require(self.store.projects.as_ref(), &project_id)?;
        let allocation = LaborAllocation::new(
            &employee,
            project_id,
            date,
            hours,
            self.config.hours_per_day,
            note,
        )?;
        self.store.allocations.insert(allocation.clone())?;
        info!(
            allocation = %allocation.id,
            rate = %allocation.hourly_rate_snapshot,
            "allocation recorded"
        );
        Ok(allocation)
    }

    /// Change the hours of an allocation. The rate snapshot is kept.
    #[instrument(skip(self))]
    pub fn update_allocation_hours(
        &self,
        id: AllocationId,
        hours: Decimal,
    ) -> ServiceResult<LaborAllocation> {
        let allocation = require(self.store.allocations.as_ref(), &id)?.with_hours(hours)?;
        self.store.allocations.update(allocation.clone())?;
        Ok(allocation)
    }

    #[instrument(skip(self, note))]
    pub fn record_labor_entry(
        &self,
        employee_id: EmployeeId,
        project_id: ProjectId,
        date: NaiveDate,
        quantity: Decimal,
        note: Option<String>,
    ) -> ServiceResult<LaborEntry> {
        require(self.store.employees.as_ref(), &employee_id)?;
        require(self.store.projects.as_ref(), &project_id)?;
        let entry = LaborEntry::new(project_id, employee_id, date, quantity, note)?;
        self.store.labor_entries.insert(entry.clone())?;
        info!(entry = %entry.id, "labor entry recorded");
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub fn project_labor_cost(
        &self,
        project_id: ProjectId,
        range: &DateRange,
    ) -> ServiceResult<ProjectLaborCost> {
        let allocations = self
            .store
            .allocations
            .find(&|a| a.project_id == project_id)?;
        let entries = self
            .store
            .labor_entries
            .find(&|e| e.project_id == project_id)?;
        let cost = project_labor_cost(
            project_id,
            range,
            &allocations,
            &entries,
            &self.employee_book()?,
        );
        report(&cost);
        Ok(cost)
    }

    #[instrument(skip(self))]
    pub fn company_labor_cost(&self, range: &DateRange) -> ServiceResult<CompanyLaborCost> {
        let cost = company_labor_cost(
            range,
            &self.store.allocations.list()?,
            &self.store.labor_entries.list()?,
            &self.employee_book()?,
        );
        cost.projects.iter().for_each(report);
        Ok(cost)
    }

    fn employee_book(&self) -> ServiceResult<HashMap<EmployeeId, Employee>> {
        Ok(self
            .store
            .employees
            .list()?
            .into_iter()
            .map(|e| (e.id, e))
            .collect())
    }
}

fn report(cost: &ProjectLaborCost) {
    debug!(
        project = %cost.project_id,
        source = ?cost.source,
        amount = %cost.amount,
        excluded_legacy_rows = cost.excluded_legacy_rows,
        "labor cost resolved"
    );
    if cost.missing_employee_rows > 0 {
        warn!(
            project = %cost.project_id,
            rows = cost.missing_employee_rows,
            "labor entries reference missing employees; counted as zero"
        );
    }
}
