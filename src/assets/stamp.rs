//! Provisioning stamp.
//!
//! A small JSON file recording which application version populated a
//! provisioned directory. Only written under [`ProvisionPolicy::Stamped`].
//!
//! [`ProvisionPolicy::Stamped`]: super::ProvisionPolicy::Stamped

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File name of the stamp inside a provisioned directory.
pub const STAMP_FILE: &str = ".provisioned.json";

/// Record of a completed provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionStamp {
    /// Version of the bundle the assets were copied from.
    pub version: String,
    /// When the copy completed.
    pub provisioned_at: DateTime<Utc>,
}

impl ProvisionStamp {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            provisioned_at: Utc::now(),
        }
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(STAMP_FILE)
    }

    /// Read the stamp from `dir`, if one exists and parses.
    pub fn load(dir: &Path) -> Option<Self> {
        let contents = fs::read_to_string(Self::path_in(dir)).ok()?;
        serde_json::from_str(&contents).ok()
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::path_in(dir);
        let json = serde_json::to_string_pretty(self).context("Failed to serialize stamp")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write stamp {}", path.display()))?;
        Ok(())
    }
}
