//! Shared types and utilities for gdts
//!
//! This crate contains the project configuration and package manifest
//! handling used by both the generator core and the `gdts` CLI.

pub mod config;
pub mod manifest;

// Re-export commonly used types
pub use config::{CONFIG_FILENAME, ProjectConfig};
pub use manifest::{PackageManifest, VersionBump, bump_version};

/// Snapshot directory that packages are published from.
pub const CURRENT_SNAPSHOT: &str = "current";

/// Header written at the top of every generated declaration file.
pub const GENERATED_HEADER: &str = "// This file is auto-generated. Do not edit it manually.";

/// Check that a snapshot name is a single plain path component.
///
/// Snapshot names end up joined onto the types root, so separators and
/// parent references are refused.
pub fn validate_snapshot_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Snapshot name must not be empty".to_string());
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(format!("Invalid snapshot name '{name}'"));
    }
    Ok(())
}
