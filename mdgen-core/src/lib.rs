//! mdgen core library — project records, the registry, backing stores, config.
//!
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`RegistryError`], [`StoreError`], [`ConfigError`]
//! - [`store`] — [`KeyValueStore`] plus memory and file backends
//! - [`config`] — [`RegistryConfig`] loaded from `~/.mdgen/config.yaml`
//! - [`registry`] — [`ProjectRegistry`]: create / update / get with persistence

pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;

pub use config::{OutOfRangeStep, RegistryConfig};
pub use error::{ConfigError, RegistryError, StoreError};
pub use registry::{ChangeObserver, ProjectRegistry, UpdateOutcome};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Project, ProjectId, ProjectStatus, ProjectUpdate};
