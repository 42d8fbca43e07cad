//! Application services: load rows through the store, run the pure domain
//! functions, persist what they planned.

pub mod cash;
pub mod labor;
pub mod leftovers;
pub mod projects;
pub mod rollup;
pub mod stock;

pub use cash::CashService;
pub use labor::LaborService;
pub use leftovers::LeftoverService;
pub use projects::ProjectService;
pub use rollup::RollupService;
pub use stock::StockService;

use siteledger_core::{DomainError, Entity};

use crate::error::ServiceResult;
use crate::store::Table;

/// Fetch a row or fail with `NotFound`.
pub(crate) fn require<V: Entity>(table: &dyn Table<V>, id: &V::Id) -> ServiceResult<V> {
    table
        .get(id)?
        .ok_or_else(|| DomainError::not_found(V::NAME, id).into())
}
