/// Current schema version.
pub const SCHEMA_VERSION: &str = "1";

/// Full SQL schema for the twinmeta `SQLite` database.
///
/// Table and column names are an on-disk compatibility contract: `key`,
/// `type`, and `value` must round-trip exactly across versions.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS store_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Device-twin metadata records
CREATE TABLE IF NOT EXISTS device_meta (
    key TEXT PRIMARY KEY,
    type TEXT NOT NULL DEFAULT '',
    value TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_device_meta_type ON device_meta(type);
";

/// `SQLite` PRAGMAs for performance.
pub const PRAGMAS_SQL: &str = r"
PRAGMA synchronous = NORMAL;
PRAGMA cache_size = -64000;
PRAGMA foreign_keys = ON;
";
