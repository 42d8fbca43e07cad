#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use siteledger_core::Entity;
use siteledger_infra::{Engine, EngineConfig, InMemoryTable, LedgerStore, StoreError, Table};

pub fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

pub fn engine() -> Engine {
    Engine::in_memory()
}

pub fn engine_with(store: LedgerStore) -> Engine {
    Engine::new(store, EngineConfig::default())
}

/// Table wrapper that fails on demand.
pub struct FaultyTable<V: Entity> {
    inner: InMemoryTable<V>,
    /// Remaining successful inserts; `None` means unlimited.
    inserts_left: Mutex<Option<usize>>,
    fail_deletes: AtomicBool,
}

impl<V: Entity> FaultyTable<V> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryTable::new(),
            inserts_left: Mutex::new(None),
            fail_deletes: AtomicBool::new(false),
        })
    }

    pub fn allow_inserts(&self, n: usize) {
        *self.inserts_left.lock().unwrap() = Some(n);
    }

    pub fn heal(&self) {
        *self.inserts_left.lock().unwrap() = None;
        self.fail_deletes.store(false, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }
}

fn injected(what: &str) -> StoreError {
    StoreError::Unavailable(format!("injected {what} failure"))
}

impl<V> Table<V> for FaultyTable<V>
where
    V: Entity + Clone + Send + Sync + 'static,
    V::Id: Send + Sync,
{
    fn insert(&self, row: V) -> Result<(), StoreError> {
        let mut left = self.inserts_left.lock().unwrap();
        if let Some(n) = left.as_mut() {
            if *n == 0 {
                return Err(injected("insert"));
            }
            *n -= 1;
        }
        self.inner.insert(row)
    }

    fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        self.inner.get(id)
    }

    fn update(&self, row: V) -> Result<(), StoreError> {
        self.inner.update(row)
    }

    fn delete(&self, id: &V::Id) -> Result<V, StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(injected("delete"));
        }
        self.inner.delete(id)
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        self.inner.list()
    }
}
