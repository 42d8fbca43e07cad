//! `siteledger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, date ranges and decimal helpers shared
//! by every ledger crate.

pub mod amount;
pub mod entity;
pub mod error;
pub mod id;
pub mod range;
pub mod value_object;

pub use amount::{MONEY_SCALE, ensure_non_negative, ensure_positive, round_money};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    AllocationId, BudgetId, BudgetItemId, CashMovementId, CostId, EmployeeId, LaborEntryId,
    LeftoverCreditId, LeftoverId, MaterialId, MovementId, ProjectId, RevenueId,
};
pub use range::DateRange;
pub use value_object::ValueObject;

pub use rust_decimal::Decimal;
