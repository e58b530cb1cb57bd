/// Top-level twinmeta error type.
///
/// All fallible operations in this crate return [`Result<T, MetaError>`](Result).
/// Each variant wraps a domain-specific error enum, allowing callers to
/// match on the error source without losing type information.
#[derive(thiserror::Error, Debug)]
pub enum MetaError {
    /// Error from the metadata store layer (`SQLite` operations, schema setup).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error in configuration parsing or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MetaError {
    /// Whether this error reports a uniqueness/duplicate-key violation.
    ///
    /// Convenience wrapper around [`is_non_unique_name_error`].
    pub fn is_non_unique_name(&self) -> bool {
        is_non_unique_name_error(self)
    }
}

/// Errors from the SQLite-backed metadata store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Underlying `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors in twinmeta configuration parsing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file syntax could not be parsed (TOML error).
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias for `Result<T, MetaError>`.
pub type Result<T> = std::result::Result<T, MetaError>;

// ── Uniqueness classifier ──────────────────────────────────────────

/// Message fragments SQLite drivers emit for duplicate-key violations.
const NON_UNIQUE_SUFFIX: &str = "are not unique";
const NON_UNIQUE_PATTERNS: [&str; 2] = ["UNIQUE constraint failed", "constraint failed"];

/// Classify an error as a uniqueness/duplicate-key constraint violation.
///
/// The store surfaces backend errors unchanged; callers that want
/// duplicate-aware behavior (retry, ignore, upgrade to a domain error) run
/// the returned error through this function. Matching is on the rendered
/// message text: a suffix of `"are not unique"` or an occurrence of
/// `"UNIQUE constraint failed"` / `"constraint failed"`. The match is
/// intentionally loose — embedded backends phrase this condition
/// differently across versions, and a rare false positive on unrelated
/// error text is an accepted trade-off for not chasing driver strings at
/// every call site.
pub fn is_non_unique_name_error(err: &(dyn std::error::Error + '_)) -> bool {
    let msg = err.to_string();
    msg.ends_with(NON_UNIQUE_SUFFIX) || NON_UNIQUE_PATTERNS.iter().any(|p| msg.contains(p))
}
