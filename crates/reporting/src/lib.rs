//! Financial rollups: per-project P&L and company cash position.
//!
//! Rollups are pure functions over a `LedgerSnapshot`; they recompute from
//! scratch on every call. Missing related rows (a deleted employee, a project
//! that no longer exists) contribute zero instead of failing the rollup.

pub mod company;
pub mod project;
pub mod snapshot;

pub use company::{CompanySummary, PortfolioReport, company_summary, portfolio_report};
pub use project::{LaborCostBreakdown, MaterialCostBreakdown, ProjectSummary, project_summary};
pub use snapshot::LedgerSnapshot;
