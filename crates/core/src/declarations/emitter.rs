//! Declaration file emitter for Godot extension API dumps.
//!
//! This module is a thin wrapper around the IR-based code generation.
//! The pipeline is:
//! 1. Parse: `extension_api.json` -> ExtensionApi
//! 2. Normalize: ExtensionApi -> ApiIR (all Godot logic resolved)
//! 3. Codegen: ApiIR -> DtsFile list (TypeScript AST)
//! 4. Emit: DtsFile -> String (via Emit trait)

use tracing::debug;

use crate::declarations::ir::{Emit, codegen_files, normalize_api, resolve_api_type};
use crate::declarations::spec::ExtensionApi;
use crate::error::GenerateError;

/// A rendered declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the snapshot directory
    pub path: String,
    pub contents: String,
}

/// Generate every declaration file from an `extension_api.json` string.
pub fn generate(api_json: &str) -> Result<Vec<GeneratedFile>, GenerateError> {
    // Parse API dump
    let api = ExtensionApi::from_json(api_json)?;

    // Normalize to API IR (all Godot logic resolved here)
    let api_ir = normalize_api(&api)?;
    debug!(
        classes = api_ir.classes.len(),
        global_enums = api_ir.global_enums.len(),
        functions = api_ir.functions.len(),
        "Normalized extension API."
    );

    // Generate TypeScript AST and emit each file
    Ok(codegen_files(&api_ir)
        .into_iter()
        .map(|file| GeneratedFile {
            contents: file.emit(),
            path: file.path,
        })
        .collect())
}

/// Map a descriptor as it appears in `extension_api.json`, decorations
/// (`typedarray::`, `enum::`, property type lists) included.
pub fn map_api_type(descriptor: &str) -> String {
    resolve_api_type(descriptor).emit()
}
