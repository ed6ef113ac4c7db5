//! Writing generated declarations into a snapshot directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use similar::TextDiff;
use tracing::{debug, info};

use crate::declarations::{GeneratedFile, generate};
use crate::error::GenerateError;

const DECLARATION_SUFFIX: &str = ".d.ts";

/// Where to read the API dump from and where to put the declarations.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path to `extension_api.json`
    pub api_path: PathBuf,
    /// Snapshot directory, e.g. `types/4.4.3-stable`
    pub output_dir: PathBuf,
}

/// Outcome of [`generate_declarations`]. Paths are relative to the output
/// directory and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<String>,
    pub unchanged: usize,
    pub removed: Vec<String>,
}

/// How a file on disk differs from what would be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftKind {
    /// Would be generated but does not exist
    Missing,
    /// Exists but would no longer be generated
    Stale,
    /// Exists with different contents
    Modified { diff: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDrift {
    pub path: String,
    pub kind: DriftKind,
}

enum WriteOutcome {
    Written(String),
    Unchanged,
}

/// Render declarations from the API dump and sync them into the output
/// directory. Files whose contents did not change are left untouched and
/// leftover declaration files are removed.
pub fn generate_declarations(opts: &GenerateOptions) -> Result<GenerationReport, GenerateError> {
    let files = render(&opts.api_path)?;

    fs::create_dir_all(&opts.output_dir)
        .map_err(GenerateError::io("create directory", &opts.output_dir))?;

    let outcomes = files
        .par_iter()
        .map(|file| write_if_changed(&opts.output_dir, file))
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let mut report = GenerationReport::default();
    for outcome in outcomes {
        match outcome {
            WriteOutcome::Written(path) => report.written.push(path),
            WriteOutcome::Unchanged => report.unchanged += 1,
        }
    }
    report.written.sort();

    let expected: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();
    for stale in stale_files(&opts.output_dir, &expected)? {
        let path = opts.output_dir.join(&stale);
        fs::remove_file(&path).map_err(GenerateError::io("remove", &path))?;
        debug!(path = %path.display(), "Removed stale declaration file.");
        report.removed.push(stale);
    }

    info!(
        output_dir = %opts.output_dir.display(),
        written = report.written.len(),
        unchanged = report.unchanged,
        removed = report.removed.len(),
        "Declarations generated."
    );

    Ok(report)
}

/// Compare the output directory against freshly rendered declarations
/// without writing anything. An empty result means the directory is up to
/// date.
pub fn check_declarations(opts: &GenerateOptions) -> Result<Vec<FileDrift>, GenerateError> {
    let files = render(&opts.api_path)?;

    let mut drifts = files
        .par_iter()
        .map(|file| drift_for(&opts.output_dir, file))
        .collect::<Result<Vec<_>, GenerateError>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    let expected: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();
    drifts.extend(
        stale_files(&opts.output_dir, &expected)?
            .into_iter()
            .map(|path| FileDrift {
                path,
                kind: DriftKind::Stale,
            }),
    );
    drifts.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        output_dir = %opts.output_dir.display(),
        drifted = drifts.len(),
        "Checked declarations."
    );

    Ok(drifts)
}

fn render(api_path: &Path) -> Result<Vec<GeneratedFile>, GenerateError> {
    let api_json =
        fs::read_to_string(api_path).map_err(GenerateError::io("read", api_path))?;
    debug!(
        api_path = %api_path.display(),
        api_len = api_json.len(),
        "Read extension API dump."
    );
    generate(&api_json)
}

fn read_existing(path: &Path) -> Result<Option<String>, GenerateError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(GenerateError::io("read", path)(err)),
    }
}

fn write_if_changed(output_dir: &Path, file: &GeneratedFile) -> Result<WriteOutcome, GenerateError> {
    let target = output_dir.join(&file.path);
    if read_existing(&target)?.as_deref() == Some(file.contents.as_str()) {
        return Ok(WriteOutcome::Unchanged);
    }
    fs::write(&target, &file.contents).map_err(GenerateError::io("write", &target))?;
    Ok(WriteOutcome::Written(file.path.clone()))
}

fn drift_for(output_dir: &Path, file: &GeneratedFile) -> Result<Option<FileDrift>, GenerateError> {
    let target = output_dir.join(&file.path);
    let kind = match read_existing(&target)? {
        None => DriftKind::Missing,
        Some(existing) if existing == file.contents => return Ok(None),
        Some(existing) => DriftKind::Modified {
            diff: TextDiff::from_lines(&existing, &file.contents)
                .unified_diff()
                .context_radius(3)
                .header(&format!("{} (on disk)", file.path), &format!("{} (generated)", file.path))
                .to_string(),
        },
    };
    Ok(Some(FileDrift {
        path: file.path.clone(),
        kind,
    }))
}

/// Declaration files in `dir` that are not in `expected`, sorted. A missing
/// directory has none.
fn stale_files(dir: &Path, expected: &HashSet<&str>) -> Result<Vec<String>, GenerateError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(GenerateError::io("read directory", dir)(err)),
    };

    let mut stale = Vec::new();
    for entry in entries {
        let entry = entry.map_err(GenerateError::io("read directory", dir))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(DECLARATION_SUFFIX) && !expected.contains(name.as_str()) {
            stale.push(name);
        }
    }
    stale.sort();
    Ok(stale)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const API_JSON: &str = r#"{
        "header": { "version_major": 4, "version_minor": 3, "version_patch": 0, "version_status": "stable" },
        "classes": [
            { "name": "Object" },
            { "name": "Node", "inherits": "Object", "methods": [{ "name": "get_name", "return_value": { "type": "StringName" } }] }
        ]
    }"#;

    fn setup() -> (TempDir, GenerateOptions) {
        let dir = TempDir::new().unwrap();
        let api_path = dir.path().join("extension_api.json");
        fs::write(&api_path, API_JSON).unwrap();
        let opts = GenerateOptions {
            api_path,
            output_dir: dir.path().join("types").join("4.3.0-stable"),
        };
        (dir, opts)
    }

    #[test]
    fn test_generate_writes_all_files() {
        let (_dir, opts) = setup();
        let report = generate_declarations(&opts).unwrap();

        assert_eq!(
            report.written,
            vec!["Node.d.ts", "Object.d.ts", "godot.globals.d.ts", "index.d.ts"]
        );
        assert_eq!(report.unchanged, 0);
        assert!(report.removed.is_empty());

        let node = fs::read_to_string(opts.output_dir.join("Node.d.ts")).unwrap();
        assert!(node.contains("declare class Node extends Object {\n  get_name(): StringName;\n}\n"));
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let (_dir, opts) = setup();
        generate_declarations(&opts).unwrap();
        let report = generate_declarations(&opts).unwrap();

        assert!(report.written.is_empty());
        assert_eq!(report.unchanged, 4);
    }

    #[test]
    fn test_stale_files_removed_and_others_kept() {
        let (_dir, opts) = setup();
        fs::create_dir_all(&opts.output_dir).unwrap();
        fs::write(opts.output_dir.join("Removed.d.ts"), "declare class Removed {}\n").unwrap();
        fs::write(opts.output_dir.join("README.md"), "notes").unwrap();

        let report = generate_declarations(&opts).unwrap();

        assert_eq!(report.removed, vec!["Removed.d.ts"]);
        assert!(!opts.output_dir.join("Removed.d.ts").exists());
        assert!(opts.output_dir.join("README.md").exists());
    }

    #[test]
    fn test_check_reports_drift() {
        let (_dir, opts) = setup();
        generate_declarations(&opts).unwrap();
        assert!(check_declarations(&opts).unwrap().is_empty());

        fs::write(opts.output_dir.join("Node.d.ts"), "declare class Node {}\n").unwrap();
        fs::remove_file(opts.output_dir.join("Object.d.ts")).unwrap();
        fs::write(opts.output_dir.join("Old.d.ts"), "").unwrap();

        let drifts = check_declarations(&opts).unwrap();
        let summary: Vec<_> = drifts
            .iter()
            .map(|d| (d.path.as_str(), std::mem::discriminant(&d.kind)))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Node.d.ts", std::mem::discriminant(&DriftKind::Modified { diff: String::new() })),
                ("Object.d.ts", std::mem::discriminant(&DriftKind::Missing)),
                ("Old.d.ts", std::mem::discriminant(&DriftKind::Stale)),
            ]
        );

        let DriftKind::Modified { diff } = &drifts[0].kind else {
            panic!("expected a modified file");
        };
        assert!(diff.contains("--- Node.d.ts (on disk)"));
        assert!(diff.contains("+++ Node.d.ts (generated)"));
        assert!(diff.contains("-declare class Node {}"));
        assert!(diff.contains("+declare class Node extends Object {"));
    }

    #[test]
    fn test_check_does_not_write() {
        let (_dir, opts) = setup();
        let drifts = check_declarations(&opts).unwrap();

        assert_eq!(drifts.len(), 4);
        assert!(drifts.iter().all(|d| d.kind == DriftKind::Missing));
        assert!(!opts.output_dir.exists());
    }

    #[test]
    fn test_missing_api_file() {
        let (dir, mut opts) = setup();
        opts.api_path = dir.path().join("missing.json");
        let err = generate_declarations(&opts).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
