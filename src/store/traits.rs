use std::collections::HashMap;

use crate::types::{DeviceMeta, MetaColumn};

/// The metadata store abstraction. Agent logic reads/writes twin metadata
/// through this trait; tests substitute a fake backend behind it.
///
/// Every operation is synchronous, issues one statement against the
/// backend, and surfaces backend errors unchanged — no wrapping, retrying,
/// or swallowing. Callers that need duplicate-aware behavior classify
/// returned errors with [`crate::is_non_unique_name_error`]; the store
/// never does that for them.
pub trait MetaStore: Send + Sync {
    // ── Write operations ───────────────────────────────────────────

    /// Insert a new record. Fails with the backend's duplicate-key error
    /// if `meta.key` already exists.
    fn save(&self, meta: &DeviceMeta) -> crate::error::Result<()>;

    /// Delete all rows with the given key. Idempotent: zero matches is
    /// still success.
    fn delete_by_key(&self, key: &str) -> crate::error::Result<()>;

    /// Replace the full row identified by `meta.key` with `meta`'s fields.
    /// A zero-match update is not an error; callers needing "exists"
    /// semantics must check separately.
    fn update(&self, meta: &DeviceMeta) -> crate::error::Result<()>;

    /// Atomic upsert: insert `meta` if its key is absent, otherwise
    /// overwrite the existing row's fields. Single native statement — the
    /// only operation that cannot lose to a racing insert.
    fn upsert(&self, meta: &DeviceMeta) -> crate::error::Result<()>;

    /// Set exactly one column on the row(s) matching `key`. Fails soft on
    /// zero matches like [`update`](Self::update).
    fn update_field(&self, key: &str, column: MetaColumn, value: &str)
    -> crate::error::Result<()>;

    /// Set an arbitrary set of columns on the row(s) matching `key` in one
    /// statement. An empty map is a no-op success: no statement is issued.
    fn update_fields(
        &self,
        key: &str,
        fields: &HashMap<MetaColumn, String>,
    ) -> crate::error::Result<()>;

    // ── Read operations ────────────────────────────────────────────

    /// All records whose key and type both match. Returns an empty vec,
    /// not an error, when nothing matches. The result is a snapshot copy.
    fn query(&self, key: &str, kind: &str) -> crate::error::Result<Vec<DeviceMeta>>;

    /// Same filter mechanics as [`query`](Self::query); intended for
    /// callers fetching the full set of typed metadata rows for one key.
    fn query_all(&self, key: &str, kind: &str) -> crate::error::Result<Vec<DeviceMeta>>;
}
