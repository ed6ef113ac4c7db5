//! Project configuration loaded from `gdts.toml`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::CURRENT_SNAPSHOT;

/// Configuration filename looked up at the project root.
pub const CONFIG_FILENAME: &str = "gdts.toml";

const DEFAULT_API_PATH: &str = "extension_api.json";
const DEFAULT_TYPES_ROOT: &str = "types";
const DEFAULT_MANIFEST: &str = "package.json";

/// Settings for a gdts project. Relative paths are resolved against the
/// project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Path to the engine's `extension_api.json` dump.
    pub api: PathBuf,
    /// Directory holding one subdirectory per snapshot.
    pub types_root: PathBuf,
    /// Snapshot that `generate` writes into.
    pub snapshot: String,
    /// Package manifest whose version `build` may update.
    pub manifest: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            api: PathBuf::from(DEFAULT_API_PATH),
            types_root: PathBuf::from(DEFAULT_TYPES_ROOT),
            snapshot: CURRENT_SNAPSHOT.to_string(),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
        }
    }
}

impl ProjectConfig {
    /// Load `gdts.toml` from the project root, falling back to defaults when
    /// the file does not exist.
    pub fn load(project_root: &Path) -> Result<Self, String> {
        let config_path = project_root.join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .map_err(|err| format!("Failed to read {}: {err}", config_path.display()))?;
        Self::from_toml_str(&contents)
            .map_err(|err| format!("Failed to parse {}: {err}", config_path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| err.to_string())
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(project_root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    }

    pub fn api_path(&self, project_root: &Path) -> PathBuf {
        Self::resolve(project_root, &self.api)
    }

    pub fn types_root(&self, project_root: &Path) -> PathBuf {
        Self::resolve(project_root, &self.types_root)
    }

    pub fn manifest_path(&self, project_root: &Path) -> PathBuf {
        Self::resolve(project_root, &self.manifest)
    }
}
