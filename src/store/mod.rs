//! Metadata store — trait, SQLite implementation, and schema.

pub mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteMetaStore;
pub use traits::MetaStore;
