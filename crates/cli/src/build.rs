use clap::Args;
use gdts_common::CURRENT_SNAPSHOT;
use gdts_core::{PromoteOptions, VersionChange, promote_snapshot};
use std::path::PathBuf;

use crate::common::{BumpArg, ProjectArgs, display_path, run_cli_sync, run_with_spinner};

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[arg(value_name = "SNAPSHOT", help = "Snapshot to promote, e.g. 4.4.3-stable")]
    pub snapshot: String,
    #[command(flatten)]
    pub project: ProjectArgs,
    #[arg(
        long = "bump",
        value_enum,
        conflicts_with = "set_version",
        help = "Increment the package version"
    )]
    pub bump: Option<BumpArg>,
    #[arg(
        long = "set-version",
        value_name = "VERSION",
        help = "Set the package version to an exact value"
    )]
    pub set_version: Option<String>,
    #[arg(
        long = "manifest",
        value_name = "PATH",
        help = "Package manifest to update. Defaults to package.json in the project root"
    )]
    pub manifest: Option<PathBuf>,
}

impl BuildArgs {
    fn version_change(&self) -> Option<VersionChange> {
        match (&self.set_version, self.bump) {
            (Some(version), _) => Some(VersionChange::Set(version.clone())),
            (None, Some(bump)) => Some(VersionChange::Bump(bump.into())),
            (None, None) => None,
        }
    }
}

pub fn run(args: BuildArgs) -> i32 {
    run_cli_sync(|| run_inner(&args))
}

fn run_inner(args: &BuildArgs) -> Result<(), String> {
    let mut project = args.project.resolve()?;
    if let Some(manifest) = &args.manifest {
        project.config.manifest.clone_from(manifest);
    }

    let opts = PromoteOptions {
        types_root: project.types_root(),
        snapshot: args.snapshot.clone(),
        manifest_path: project.manifest_path(),
        version: args.version_change(),
    };

    let (report, elapsed) = run_with_spinner(
        &format!("Promoting {} to {CURRENT_SNAPSHOT}...", args.snapshot),
        || promote_snapshot(&opts).map_err(|err| err.to_string()),
    )?;

    println!(
        "✅ Promoted {} to {} ({} files, {elapsed})",
        args.snapshot,
        display_path(&project.root, &opts.types_root.join(CURRENT_SNAPSHOT)),
        report.files_copied
    );
    if let Some(version) = &report.version {
        println!(
            "   {} version set to {version}",
            display_path(&project.root, &opts.manifest_path)
        );
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gdts_common::VersionBump;
    use std::fs;
    use tempfile::TempDir;

    fn args(root: &std::path::Path, snapshot: &str) -> BuildArgs {
        BuildArgs {
            snapshot: snapshot.to_string(),
            project: ProjectArgs {
                project_dir: Some(root.to_path_buf()),
                ..Default::default()
            },
            bump: None,
            set_version: None,
            manifest: None,
        }
    }

    #[test]
    fn test_version_change() {
        let dir = TempDir::new().unwrap();
        let mut build = args(dir.path(), "4.4.3-stable");
        assert_eq!(build.version_change(), None);

        build.bump = Some(BumpArg::Major);
        assert_eq!(
            build.version_change(),
            Some(VersionChange::Bump(VersionBump::Major))
        );

        build.bump = None;
        build.set_version = Some("2.0.0".to_string());
        assert_eq!(
            build.version_change(),
            Some(VersionChange::Set("2.0.0".to_string()))
        );
    }

    #[test]
    fn test_build_with_custom_manifest() {
        let dir = TempDir::new().unwrap();
        let snapshot = dir.path().join("types").join("4.4.3-stable");
        fs::create_dir_all(&snapshot).unwrap();
        fs::write(snapshot.join("index.d.ts"), "").unwrap();
        fs::create_dir_all(dir.path().join("npm")).unwrap();
        fs::write(
            dir.path().join("npm").join("package.json"),
            "{ \"version\": \"1.0.0\" }",
        )
        .unwrap();

        let mut build = args(dir.path(), "4.4.3-stable");
        build.bump = Some(BumpArg::Patch);
        build.manifest = Some(PathBuf::from("npm/package.json"));

        run_inner(&build).unwrap();

        assert!(dir.path().join("types").join("current").join("index.d.ts").is_file());
        let manifest = fs::read_to_string(dir.path().join("npm").join("package.json")).unwrap();
        assert!(manifest.contains("\"version\": \"1.0.1\""));
    }

    #[test]
    fn test_build_missing_snapshot_fails() {
        let dir = TempDir::new().unwrap();
        let err = run_inner(&args(dir.path(), "9.9.9")).unwrap_err();
        assert!(err.contains("Snapshot '9.9.9' not found"));
    }
}
