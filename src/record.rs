use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single versioned entry as produced by a segment cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Vec<u8>,
    pub version: u64,
    pub value: Vec<u8>,
}

impl Record {
    pub fn new<K, V>(key: K, version: u64, value: V) -> Self
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        Record {
            key: key.into(),
            version,
            value: value.into(),
        }
    }
}

// Which way equal keys are tie-broken on their version stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionOrder {
    /// Oldest version of a key first.
    #[default]
    Ascending,
    /// Newest version of a key first.
    Descending,
}

impl VersionOrder {
    /// The merge comparator: key ascending, then version in this direction.
    pub fn compare(&self, a_key: &[u8], a_version: u64, b_key: &[u8], b_version: u64) -> Ordering {
        a_key.cmp(b_key).then_with(|| match self {
            VersionOrder::Ascending => a_version.cmp(&b_version),
            VersionOrder::Descending => b_version.cmp(&a_version),
        })
    }

    pub fn compare_records(&self, a: &Record, b: &Record) -> Ordering {
        self.compare(&a.key, a.version, &b.key, b.version)
    }
}
