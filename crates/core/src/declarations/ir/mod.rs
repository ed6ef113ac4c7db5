//! Intermediate representation for Godot API to TypeScript declaration generation.
//!
//! This module defines a three-layer architecture:
//! 1. API-level IR: normalized classes, members and enums (Godot-agnostic)
//! 2. TypeScript AST: declarations, members and types of a `.d.ts` file
//! 3. Emission: AST to TypeScript text via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: TypeScript AST (TsType, TsMember, TsDecl, DtsFile)
//! - `api`: API-level IR (ClassIR, MethodIR, EnumIR)
//! - `normalize`: engine API dump -> API IR conversion
//! - `codegen`: API IR -> TypeScript AST
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: common utilities shared across modules

mod api;
mod codegen;
mod emit;
mod normalize;
pub mod types;
pub mod utils;

// Re-export the main entry points
pub use codegen::{GLOBALS_FILE, INDEX_FILE, codegen_files};
pub use emit::Emit;
pub use normalize::{normalize_api, resolve_api_type};
