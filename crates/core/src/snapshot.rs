//! Promoting a generated snapshot to the `current` directory.
//!
//! This is a one-shot local build step: a failure part way through leaves
//! whatever was already copied in place.

use std::fs;
use std::path::PathBuf;

use gdts_common::{CURRENT_SNAPSHOT, PackageManifest, VersionBump, validate_snapshot_name};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::GenerateError;

/// How to change the package version after promotion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionChange {
    /// Replace the version with this exact string
    Set(String),
    /// Increment one semver component of the current version
    Bump(VersionBump),
}

#[derive(Debug, Clone)]
pub struct PromoteOptions {
    /// Directory holding every snapshot, e.g. `types`
    pub types_root: PathBuf,
    /// Name of the snapshot to promote, e.g. `4.4.3-stable`
    pub snapshot: String,
    pub manifest_path: PathBuf,
    pub version: Option<VersionChange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteReport {
    pub files_copied: usize,
    /// New manifest version, when it was changed
    pub version: Option<String>,
}

/// Replace `<types_root>/current` with a copy of `<types_root>/<snapshot>`
/// and optionally update the package version.
pub fn promote_snapshot(opts: &PromoteOptions) -> Result<PromoteReport, GenerateError> {
    validate_snapshot_name(&opts.snapshot).map_err(GenerateError::Config)?;
    if opts.snapshot == CURRENT_SNAPSHOT {
        return Err(GenerateError::SelfPromotion(opts.snapshot.clone()));
    }

    let source = opts.types_root.join(&opts.snapshot);
    if !source.is_dir() {
        return Err(GenerateError::MissingSnapshot {
            name: opts.snapshot.clone(),
            path: source,
        });
    }

    // Resolve the new version up front so a bad manifest fails before
    // anything on disk changes.
    let manifest = match &opts.version {
        Some(change) => Some(prepare_manifest(opts, change)?),
        None => None,
    };

    let target = opts.types_root.join(CURRENT_SNAPSHOT);
    if target.exists() {
        debug!(path = %target.display(), "Removing previous current snapshot.");
        fs::remove_dir_all(&target).map_err(GenerateError::io("remove", &target))?;
    }
    fs::create_dir_all(&target).map_err(GenerateError::io("create directory", &target))?;

    let mut files_copied = 0;
    for entry in WalkDir::new(&source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(&source) else {
            continue;
        };
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .map_err(GenerateError::io("create directory", &destination))?;
        } else {
            fs::copy(entry.path(), &destination)
                .map_err(GenerateError::io("copy", entry.path()))?;
            files_copied += 1;
        }
    }

    let version = match manifest {
        Some(manifest) => {
            manifest.write().map_err(GenerateError::Manifest)?;
            manifest.version().map(str::to_string)
        }
        None => None,
    };

    info!(
        snapshot = %opts.snapshot,
        files_copied,
        version = version.as_deref().unwrap_or("unchanged"),
        "Snapshot promoted to current."
    );

    Ok(PromoteReport {
        files_copied,
        version,
    })
}

fn prepare_manifest(
    opts: &PromoteOptions,
    change: &VersionChange,
) -> Result<PackageManifest, GenerateError> {
    let mut manifest =
        PackageManifest::read(&opts.manifest_path).map_err(GenerateError::Manifest)?;

    match change {
        VersionChange::Set(version) => {
            let version = version.trim();
            if version.is_empty() {
                return Err(GenerateError::Manifest(
                    "Version must not be empty".to_string(),
                ));
            }
            manifest.set_version(version);
        }
        VersionChange::Bump(bump) => {
            manifest.bump(*bump).map_err(GenerateError::Manifest)?;
        }
    }

    debug!(
        manifest = %manifest.path().display(),
        version = manifest.version().unwrap_or_default(),
        "Prepared manifest version."
    );
    Ok(manifest)
}
