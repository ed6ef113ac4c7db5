//! Helpers shared across CLI commands

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, ValueEnum};
use gdts_common::{ProjectConfig, VersionBump};
use indicatif::{ProgressBar, ProgressStyle};

/// Options every project-level command accepts. Anything not given falls
/// back to `gdts.toml`, then to the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    #[arg(
        long = "project-dir",
        value_name = "DIR",
        help = "Project root holding gdts.toml. Defaults to current working directory"
    )]
    pub project_dir: Option<PathBuf>,
    #[arg(long = "api", value_name = "PATH", help = "Path to extension_api.json")]
    pub api: Option<PathBuf>,
    #[arg(
        long = "types-root",
        value_name = "DIR",
        help = "Directory holding one subdirectory per snapshot"
    )]
    pub types_root: Option<PathBuf>,
}

/// Project root and configuration with command line overrides applied
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    pub fn api_path(&self) -> PathBuf {
        self.config.api_path(&self.root)
    }

    pub fn types_root(&self) -> PathBuf {
        self.config.types_root(&self.root)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.config.manifest_path(&self.root)
    }
}

impl ProjectArgs {
    pub fn resolve(&self) -> Result<Project, String> {
        let root = self
            .project_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let mut config = ProjectConfig::load(&root)?;
        if let Some(api) = &self.api {
            config.api.clone_from(api);
        }
        if let Some(types_root) = &self.types_root {
            config.types_root.clone_from(types_root);
        }

        tracing::debug!(
            root = %root.display(),
            api = %config.api.display(),
            types_root = %config.types_root.display(),
            snapshot = %config.snapshot,
            "Resolved project configuration."
        );

        Ok(Project { root, config })
    }
}

/// Semver component accepted by `--bump`
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum BumpArg {
    /// Increment MAJOR, reset MINOR and PATCH
    Major,
    /// Increment MINOR, reset PATCH
    Minor,
    /// Increment PATCH
    Patch,
}

impl From<BumpArg> for VersionBump {
    fn from(arg: BumpArg) -> Self {
        match arg {
            BumpArg::Major => VersionBump::Major,
            BumpArg::Minor => VersionBump::Minor,
            BumpArg::Patch => VersionBump::Patch,
        }
    }
}

/// Run a command body and turn its error into an exit code.
pub fn run_cli_sync<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

pub fn format_elapsed_ms(start: Instant) -> String {
    format_duration(start.elapsed())
}

fn format_duration(elapsed: Duration) -> String {
    if elapsed.as_secs() == 0 {
        return format!("{}ms", elapsed.as_millis());
    }
    let seconds = elapsed.as_secs();
    let remaining_ms = elapsed.subsec_millis();
    format!("{seconds}s {remaining_ms}ms")
}

/// Run `f` behind a spinner, returning its result together with the
/// formatted elapsed time.
pub fn run_with_spinner<T, F>(description: &str, f: F) -> Result<(T, String), String>
where
    F: FnOnce() -> Result<T, String>,
{
    let spinner = spinner(description);
    let start = Instant::now();
    let result = f();
    spinner.finish_and_clear();
    result.map(|value| (value, format_elapsed_ms(start)))
}

/// Timer utility for measuring and logging elapsed time
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
}

impl Timer {
    /// Start a new timer with a label
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        tracing::debug!("⏱️  [{}] Starting...", label);
        Self {
            start: Instant::now(),
            label,
        }
    }

    /// Log elapsed time and return duration in milliseconds
    pub fn lap(&self, step: &str) -> u128 {
        let elapsed = self.start.elapsed();
        let ms = elapsed.as_millis();
        tracing::info!(
            "⏱️  [{}] {} took {}ms ({:.2}s)",
            self.label,
            step,
            ms,
            elapsed.as_secs_f64()
        );
        ms
    }
}

/// Relative path for display, falling back to the full path.
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(2_050)), "2s 50ms");
    }

    #[test]
    fn test_resolve_uses_config_then_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("gdts.toml"),
            "api = \"godot/extension_api.json\"\nsnapshot = \"4.4.3-stable\"\n",
        )
        .unwrap();

        let args = ProjectArgs {
            project_dir: Some(dir.path().to_path_buf()),
            api: None,
            types_root: Some(PathBuf::from("out")),
        };
        let project = args.resolve().unwrap();

        assert_eq!(
            project.api_path(),
            dir.path().join("godot").join("extension_api.json")
        );
        assert_eq!(project.types_root(), dir.path().join("out"));
        assert_eq!(project.manifest_path(), dir.path().join("package.json"));
        assert_eq!(project.config.snapshot, "4.4.3-stable");
    }

    #[test]
    fn test_resolve_reports_bad_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gdts.toml"), "unknown-key = 1\n").unwrap();

        let args = ProjectArgs {
            project_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.starts_with("Failed to parse"));
    }

    #[test]
    fn test_bump_arg_conversion() {
        assert_eq!(VersionBump::from(BumpArg::Major), VersionBump::Major);
        assert_eq!(VersionBump::from(BumpArg::Patch), VersionBump::Patch);
    }

    #[test]
    fn test_run_cli_sync_exit_codes() {
        assert_eq!(run_cli_sync(|| Ok(())), 0);
        assert_eq!(run_cli_sync(|| Err("boom".to_string())), 1);
    }

    #[test]
    fn test_display_path() {
        assert_eq!(
            display_path(Path::new("/p"), Path::new("/p/types/current")),
            "types/current"
        );
        assert_eq!(display_path(Path::new("/p"), Path::new("/q/x")), "/q/x");
    }
}
