//! Godot extension API to TypeScript declaration generator.
//!
//! This module parses the engine's `extension_api.json` dump and generates:
//! - One `<Class>.d.ts` per engine class, builtin and native structure
//! - `godot.globals.d.ts` with shared aliases, global enums and utility functions
//! - `index.d.ts` referencing every other file

mod emitter;
pub(crate) mod ir;
mod spec;

pub use emitter::{GeneratedFile, generate, map_api_type};
pub use ir::{GLOBALS_FILE, INDEX_FILE};
