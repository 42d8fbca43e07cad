//! Material inventory domain: catalog, stock movement ledger and leftovers.
//!
//! Pure domain logic only: no IO, no persistence concerns. Balances are always
//! derived from the movement history handed in by the caller.

pub mod ledger;
pub mod leftover;
pub mod material;
pub mod movement;
pub mod units;

pub use ledger::{
    AdjustmentRequest, StockPosition, UsageRequest, adjustment_movement, project_material_cost,
    stock_balance, stock_position, usage_movement,
};
pub use leftover::{
    CreditRequest, LeftoverBalance, LeftoverCredit, LeftoverDraw, LeftoverPlan, LeftoverRecord,
    LeftoverRequest, leftover_balance, plan_credit, plan_leftover, plan_loose_leftover,
};
pub use material::Material;
pub use movement::{MaterialMovement, MovementKind};
pub use units::{QuantityRule, UnitRules};
