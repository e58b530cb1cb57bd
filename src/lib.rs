//! twinmeta — embedded persistence for device-twin metadata.
//!
//! An edge agent keeps a local cache of small key/value records describing
//! the devices it manages. This crate persists those records in an embedded
//! `SQLite` database behind the [`store::MetaStore`] trait: point lookups,
//! key+type filtered queries, partial field updates, idempotent delete, and
//! an atomic upsert that cannot lose to a racing insert.
//!
//! Backend errors are surfaced unchanged; callers that need duplicate-aware
//! logic classify them explicitly with [`is_non_unique_name_error`].

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::StoreConfig;
pub use error::{ConfigError, MetaError, Result, StoreError, is_non_unique_name_error};
pub use store::{MetaStore, SqliteMetaStore};
pub use types::{DeviceMeta, MetaColumn, MetaFilter};
