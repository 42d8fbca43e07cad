//! Table storage boundary.
//!
//! Every ledger entity lives in its own `Table`. Domain crates never see a
//! table; the services in this crate load rows, hand slices to the pure
//! domain functions and write back whatever rows those functions planned.

mod in_memory;
mod ledger_store;

pub use in_memory::InMemoryTable;
pub use ledger_store::LedgerStore;

use std::sync::Arc;

use siteledger_core::Entity;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} already exists")]
    Duplicate { entity: &'static str, id: String },

    #[error("{entity} {id} does not exist")]
    Missing { entity: &'static str, id: String },

    /// Backend could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("lock poisoned on {0} table")]
    Poisoned(&'static str),
}

impl StoreError {
    pub fn duplicate<V: Entity>(id: &V::Id) -> Self {
        StoreError::Duplicate {
            entity: V::NAME,
            id: id.to_string(),
        }
    }

    pub fn missing<V: Entity>(id: &V::Id) -> Self {
        StoreError::Missing {
            entity: V::NAME,
            id: id.to_string(),
        }
    }
}

/// Keyed row storage for one entity type.
///
/// Rows are owned values; readers get clones. Implementations must be safe to
/// share across threads.
pub trait Table<V: Entity>: Send + Sync {
    /// Insert a new row. Fails with `Duplicate` if the id is taken.
    fn insert(&self, row: V) -> Result<(), StoreError>;

    fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError>;

    /// Replace an existing row. Fails with `Missing` if the id is unknown.
    fn update(&self, row: V) -> Result<(), StoreError>;

    /// Remove a row and return it. Fails with `Missing` if the id is unknown.
    fn delete(&self, id: &V::Id) -> Result<V, StoreError>;

    /// All rows, ordered by id.
    fn list(&self) -> Result<Vec<V>, StoreError>;

    /// Rows matching `predicate` (by project, date range, material...).
    fn find(&self, predicate: &dyn Fn(&V) -> bool) -> Result<Vec<V>, StoreError> {
        Ok(self.list()?.into_iter().filter(|row| predicate(row)).collect())
    }
}

impl<V, T> Table<V> for Arc<T>
where
    V: Entity,
    T: Table<V> + ?Sized,
{
    fn insert(&self, row: V) -> Result<(), StoreError> {
        (**self).insert(row)
    }

    fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        (**self).get(id)
    }

    fn update(&self, row: V) -> Result<(), StoreError> {
        (**self).update(row)
    }

    fn delete(&self, id: &V::Id) -> Result<V, StoreError> {
        (**self).delete(id)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        (**self).list()
    }

    fn find(&self, predicate: &dyn Fn(&V) -> bool) -> Result<Vec<V>, StoreError> {
        (**self).find(predicate)
    }
}
