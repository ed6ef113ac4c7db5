use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while generating, checking or promoting declarations.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk snapshot directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid extension API: {0}")]
    InvalidApi(String),

    #[error("Snapshot '{name}' not found at {}", .path.display())]
    MissingSnapshot { name: String, path: PathBuf },

    #[error("Snapshot '{0}' cannot be promoted onto itself")]
    SelfPromotion(String),

    #[error("{0}")]
    Manifest(String),

    #[error("{0}")]
    Config(String),
}

impl GenerateError {
    /// Build a `map_err` adapter that tags an I/O error with what was being
    /// done and to which path.
    pub fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self + use<> {
        let path = path.to_path_buf();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}
