#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Godot scripting API to TypeScript declaration generator.
//!
//! The crate turns an engine `extension_api.json` dump into one `.d.ts`
//! file per engine class, keeps generated snapshots on disk and promotes a
//! chosen snapshot into the `current` directory that packages publish.

pub mod declarations;
pub mod error;
pub mod generator;
pub mod snapshot;
pub mod typemap;

pub use declarations::{GLOBALS_FILE, GeneratedFile, INDEX_FILE, generate, map_api_type};
pub use error::GenerateError;
pub use generator::{
    DriftKind, FileDrift, GenerateOptions, GenerationReport, check_declarations,
    generate_declarations,
};
pub use snapshot::{PromoteOptions, PromoteReport, VersionChange, promote_snapshot};
pub use typemap::{map_godot_type, resolve_godot_type};
