use serde::{Deserialize, Serialize};

// ── Record model ───────────────────────────────────────────────────

/// A single metadata item in the device-twin cache.
///
/// `key` is the stable identity (by caller convention a device/twin
/// identifier combined with a field name). `kind` is a caller-defined
/// classification used only for filtering. `value` is an opaque payload;
/// this layer imposes no structure on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl DeviceMeta {
    pub fn new(
        key: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }
}

// ── Partial-update columns ─────────────────────────────────────────

/// Columns of `device_meta` that a partial update may set.
///
/// The primary key is deliberately not a variant — the store never mutates
/// record identity, so no update statement can be built that touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetaColumn {
    /// The `type` classification column.
    Kind,
    /// The `value` payload column.
    Value,
}

impl MetaColumn {
    /// Column name as it appears in the schema.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kind => "type",
            Self::Value => "value",
        }
    }
}

impl std::fmt::Display for MetaColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Row filter ─────────────────────────────────────────────────────

/// Equality filter selecting rows by `key` and, optionally, `type`.
///
/// Shared by the query operations; the store builds one WHERE clause from
/// it regardless of which operation is asking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaFilter {
    pub key: String,
    pub kind: Option<String>,
}

impl MetaFilter {
    /// Filter on `key` alone.
    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: None,
        }
    }

    /// Filter on `key` and `type` together.
    pub fn by_key_and_kind(key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: Some(kind.into()),
        }
    }
}
