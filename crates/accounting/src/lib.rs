//! Accounting module: projects, project revenues/costs/budgets and the
//! company cash ledger.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod budget;
pub mod cash;
pub mod project;
pub mod project_finance;

pub use budget::{ProjectBudget, ProjectBudgetItem, budget_total};
pub use cash::{
    CashCategory, CashFlow, CashPosition, CategoryTotal, CompanyCashMovement, cash_position,
    category_breakdown,
};
pub use project::{Project, ProjectStatus};
pub use project_finance::{CostKind, ProjectCost, ProjectRevenue, sum_costs, sum_revenue};
