//! One-time asset extraction.
//!
//! The target directory's existence is the provisioning state: once it is
//! there, nothing is copied again (unless a [`ProvisionPolicy::Stamped`]
//! version no longer matches). Copies run concurrently, but the ready
//! callback only fires after every one of them has finished successfully.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

use serde::Serialize;

use crate::error::{CompanionError, Result};
use crate::host::HostPaths;
use crate::platform::Platform;

use super::stamp::ProvisionStamp;
use super::{AssetKind, AssetLocation};

/// When an existing target directory counts as provisioned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProvisionPolicy {
    /// Any existing directory is trusted; contents are not inspected.
    #[default]
    ExistenceOnly,
    /// The directory must carry a stamp naming this version.
    Stamped { version: String },
}

impl ProvisionPolicy {
    fn is_current(&self, target: &Path) -> bool {
        match self {
            ProvisionPolicy::ExistenceOnly => true,
            ProvisionPolicy::Stamped { version } => ProvisionStamp::load(target)
                .map(|stamp| &stamp.version == version)
                .unwrap_or(false),
        }
    }
}

/// What `ensure_available` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStatus {
    /// The platform runs assets straight from the bundle.
    NotRequired,
    /// A previous run already provisioned the target.
    AlreadyPresent,
    /// Assets were copied during this call.
    Copied,
}

/// Outcome of a successful `ensure_available` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub kind: AssetKind,
    pub location: AssetLocation,
    pub status: ProvisionStatus,
    /// Files written into the target, sorted.
    pub copied: Vec<PathBuf>,
}

/// Makes bundled assets available at a runnable location.
pub struct AssetProvisioner<'a> {
    platform: Platform,
    paths: &'a dyn HostPaths,
    policy: ProvisionPolicy,
}

impl<'a> AssetProvisioner<'a> {
    pub fn new(platform: Platform, paths: &'a dyn HostPaths) -> Self {
        Self {
            platform,
            paths,
            policy: ProvisionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ProvisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Location of `kind`, computed without touching the filesystem.
    pub fn location(&self, kind: AssetKind) -> Result<AssetLocation> {
        AssetLocation::resolve(self.platform, kind, self.paths)
    }

    /// Ensure `kind` assets exist at their runnable location.
    ///
    /// `on_ready` is invoked exactly once when the assets are known to be in
    /// place, and never when an error is returned. A failed extraction
    /// removes the partially populated target so the next call starts over.
    pub fn ensure_available<F>(&self, kind: AssetKind, on_ready: F) -> Result<ProvisionReport>
    where
        F: FnOnce(),
    {
        let location = self.location(kind)?;

        if !self.platform.requires_provisioning() {
            on_ready();
            return Ok(ProvisionReport {
                kind,
                location,
                status: ProvisionStatus::NotRequired,
                copied: Vec::new(),
            });
        }

        let target = &location.writable_target_dir;
        if target.exists() {
            if self.policy.is_current(target) {
                tracing::debug!("{} assets already provisioned at {}", kind, target.display());
                on_ready();
                return Ok(ProvisionReport {
                    kind,
                    location,
                    status: ProvisionStatus::AlreadyPresent,
                    copied: Vec::new(),
                });
            }
            tracing::info!("Refreshing stale {} assets at {}", kind, target.display());
            fs::remove_dir_all(target)?;
        }

        tracing::info!(
            "Provisioning {} assets from {} to {}",
            kind,
            location.bundled_source_dir.display(),
            target.display()
        );
        fs::create_dir_all(target)?;

        let copied = match self.copy_assets(kind, &location) {
            Ok(copied) => copied,
            Err(e) => {
                discard_partial(target);
                return Err(e);
            }
        };

        if let ProvisionPolicy::Stamped { version } = &self.policy {
            if let Err(e) = ProvisionStamp::new(version.as_str()).save(target) {
                discard_partial(target);
                return Err(e);
            }
        }

        tracing::info!("Provisioned {} {} file(s)", copied.len(), kind);
        on_ready();
        Ok(ProvisionReport {
            kind,
            location,
            status: ProvisionStatus::Copied,
            copied,
        })
    }

    /// Copy every matching file concurrently and wait for all of them.
    fn copy_assets(&self, kind: AssetKind, location: &AssetLocation) -> Result<Vec<PathBuf>> {
        let source = &location.bundled_source_dir;
        let target = &location.writable_target_dir;

        let entries = fs::read_dir(source).map_err(|e| CompanionError::Provisioning {
            target: target.clone(),
            failures: vec![format!("{}: {}", source.display(), e)],
        })?;

        let mut jobs = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if kind.matches(&name.to_string_lossy()) {
                jobs.push((entry.path(), target.join(&name)));
            }
        }

        let results: Vec<(PathBuf, io::Result<u64>)> = thread::scope(|scope| {
            let handles: Vec<_> = jobs
                .iter()
                .map(|(from, to)| (to.clone(), scope.spawn(move || copy_streamed(from, to))))
                .collect();

            handles
                .into_iter()
                .map(|(to, handle)| {
                    let result = handle
                        .join()
                        .unwrap_or_else(|_| Err(io::Error::other("copy thread panicked")));
                    (to, result)
                })
                .collect()
        });

        let mut copied = Vec::new();
        let mut failures = Vec::new();
        for (to, result) in results {
            match result {
                Ok(bytes) => {
                    tracing::debug!("Copied {} ({} bytes)", to.display(), bytes);
                    copied.push(to);
                }
                Err(e) => {
                    tracing::warn!("Failed to copy {}: {}", to.display(), e);
                    failures.push(format!("{}: {}", to.display(), e));
                }
            }
        }

        if !failures.is_empty() {
            return Err(CompanionError::Provisioning {
                target: target.clone(),
                failures,
            });
        }

        copied.sort();
        Ok(copied)
    }
}

/// Byte-for-byte copy through buffered streams.
fn copy_streamed(from: &Path, to: &Path) -> io::Result<u64> {
    let mut reader = BufReader::new(File::open(from)?);
    let mut writer = BufWriter::new(File::create(to)?);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

fn discard_partial(target: &Path) {
    if let Err(e) = fs::remove_dir_all(target) {
        tracing::warn!(
            "Could not remove partially provisioned {}: {}",
            target.display(),
            e
        );
    }
}
