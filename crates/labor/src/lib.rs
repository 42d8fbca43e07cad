//! Labor domain: employees, daily allocations, legacy labor entries and the
//! policy deciding which of the two recording mechanisms a project's labor
//! cost comes from.
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod allocation;
pub mod cost;
pub mod employee;
pub mod entry;

pub use allocation::LaborAllocation;
pub use cost::{
    CompanyLaborCost, LaborSource, ProjectLaborCost, company_labor_cost, project_labor_cost,
    totals_by_source,
};
pub use employee::{BillingType, Employee};
pub use entry::LaborEntry;
