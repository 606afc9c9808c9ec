use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::record::VersionOrder;

/// Knobs for a single merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Tie-break for records that share a key.
    pub version_order: VersionOrder,
    /// Check every emitted record against the previous one and fail the
    /// merge if a source turns out not to be sorted.
    pub verify_order: bool,
}

impl MergeOptions {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        match fs::read_to_string(path.as_ref()) {
            Ok(contents) => Ok(serde_json::from_str(contents.as_str())?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
