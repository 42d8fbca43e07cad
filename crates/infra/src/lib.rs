//! Infrastructure layer: table storage, sagas, application services and
//! configuration.
//!
//! Domain crates stay pure; everything that reads or writes rows goes through
//! the services here.

pub mod config;
pub mod engine;
pub mod error;
pub mod saga;
pub mod services;
pub mod store;

pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use error::{ServiceError, ServiceResult};
pub use store::{InMemoryTable, LedgerStore, StoreError, Table};
