use std::sync::Arc;

use crate::config::EngineConfig;
use crate::services::{
    CashService, LaborService, LeftoverService, ProjectService, RollupService, StockService,
};
use crate::store::LedgerStore;

/// All services wired to one store and one configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    pub config: Arc<EngineConfig>,
    pub store: LedgerStore,
    pub projects: ProjectService,
    pub stock: StockService,
    pub leftovers: LeftoverService,
    pub labor: LaborService,
    pub cash: CashService,
    pub rollups: RollupService,
}

impl Engine {
    pub fn new(store: LedgerStore, config: EngineConfig) -> Self {
        let config = Arc::new(config);
        Self {
            projects: ProjectService::new(store.clone()),
            stock: StockService::new(store.clone(), config.clone()),
            leftovers: LeftoverService::new(store.clone(), config.clone()),
            labor: LaborService::new(store.clone(), config.clone()),
            cash: CashService::new(store.clone()),
            rollups: RollupService::new(store.clone()),
            store,
            config,
        }
    }

    /// Fresh in-memory engine with default configuration.
    pub fn in_memory() -> Self {
        Self::new(LedgerStore::in_memory(), EngineConfig::default())
    }
}
