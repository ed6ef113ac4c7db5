//! Package manifest (`package.json`) version handling.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Which semver component to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

/// Increment a `MAJOR.MINOR.PATCH` version.
///
/// Pre-release and build suffixes (`-rc.1`, `+abc`) are dropped from the
/// result, lower components are reset to zero.
pub fn bump_version(current: &str, bump: VersionBump) -> Result<String, String> {
    let core = current
        .split(['-', '+'])
        .next()
        .unwrap_or_default()
        .trim();

    let parts: Vec<&str> = core.split('.').collect();
    let &[major, minor, patch] = parts.as_slice() else {
        return Err(format!("Invalid version '{current}': expected MAJOR.MINOR.PATCH"));
    };

    let parse = |part: &str| {
        part.parse::<u64>()
            .map_err(|err| format!("Invalid version '{current}': {err}"))
    };
    let (major, minor, patch) = (parse(major)?, parse(minor)?, parse(patch)?);

    let increment = |part: u64| {
        part.checked_add(1)
            .ok_or_else(|| format!("Invalid version '{current}': component overflow"))
    };
    let bumped = match bump {
        VersionBump::Major => (increment(major)?, 0, 0),
        VersionBump::Minor => (major, increment(minor)?, 0),
        VersionBump::Patch => (major, minor, increment(patch)?),
    };
    Ok(format!("{}.{}.{}", bumped.0, bumped.1, bumped.2))
}

/// A JSON package manifest, kept as an ordered map so rewriting it only
/// changes the fields we touch.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageManifest {
    pub fn read(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read manifest {}: {err}", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .map_err(|err| format!("Failed to parse manifest {}: {err}", path.display()))?;

        let Value::Object(fields) = value else {
            return Err(format!(
                "Manifest {} must contain a JSON object",
                path.display()
            ));
        };

        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current `version` field, if present and a string.
    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: &str) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Apply a semver bump to the current version and return the new one.
    pub fn bump(&mut self, bump: VersionBump) -> Result<String, String> {
        let current = self.version().ok_or_else(|| {
            format!(
                "Manifest {} has no string \"version\" field",
                self.path.display()
            )
        })?;
        let next = bump_version(current, bump)?;
        self.set_version(&next);
        Ok(next)
    }

    pub fn write(&self) -> Result<(), String> {
        let mut contents = serde_json::to_string_pretty(&self.fields)
            .map_err(|err| format!("Failed to serialize manifest: {err}"))?;
        contents.push('\n');
        fs::write(&self.path, contents)
            .map_err(|err| format!("Failed to write manifest {}: {err}", self.path.display()))
    }
}
