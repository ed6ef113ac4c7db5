//! API-level IR for normalized engine classes.
//!
//! This module defines the intermediate representation produced by
//! normalization:
//! - ClassIR: engine classes, builtin value types and native structures
//! - MethodIR / ParamIR: callables with resolved types
//! - EnumIR: class and global enums

use super::types::{TsDoc, TsType};

/// Where a class came from in the API dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Object-derived engine class
    Engine,
    /// Builtin value type (Vector2, Color, ...)
    Builtin,
    /// C struct exposed to extensions (AudioFrame, ...)
    NativeStructure,
}

/// Normalized API ready for code generation
#[derive(Debug, Clone, Default)]
pub struct ApiIR {
    /// Engine version label, e.g. "4.4.3-stable"
    pub version: Option<String>,
    /// Sorted by name
    pub classes: Vec<ClassIR>,
    pub global_enums: Vec<EnumIR>,
    pub functions: Vec<MethodIR>,
}

#[derive(Debug, Clone)]
pub struct ClassIR {
    pub name: String,
    pub kind: ClassKind,
    pub extends: Option<String>,
    pub doc: Option<TsDoc>,
    pub constants: Vec<ConstantIR>,
    pub fields: Vec<FieldIR>,
    pub constructors: Vec<ConstructorIR>,
    pub methods: Vec<MethodIR>,
    pub signals: Vec<SignalIR>,
    pub enums: Vec<EnumIR>,
}

impl ClassIR {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            extends: None,
            doc: None,
            constants: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            signals: Vec::new(),
            enums: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstantIR {
    pub name: String,
    pub ty: TsType,
    pub doc: Option<TsDoc>,
}

/// Property, builtin member or struct field
#[derive(Debug, Clone)]
pub struct FieldIR {
    pub name: String,
    pub ty: TsType,
    /// No setter exposed
    pub readonly: bool,
    pub is_static: bool,
    pub doc: Option<TsDoc>,
}

#[derive(Debug, Clone)]
pub struct ConstructorIR {
    pub params: Vec<ParamIR>,
    pub doc: Option<TsDoc>,
}

#[derive(Debug, Clone)]
pub struct MethodIR {
    pub name: String,
    pub params: Vec<ParamIR>,
    /// Accepts extra trailing arguments
    pub vararg: bool,
    pub return_type: TsType,
    pub is_static: bool,
    pub doc: Option<TsDoc>,
}

#[derive(Debug, Clone)]
pub struct ParamIR {
    /// Sanitized identifier
    pub name: String,
    pub ty: TsType,
    /// Has a default value in the engine
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct SignalIR {
    pub name: String,
    pub params: Vec<ParamIR>,
    pub is_static: bool,
    pub doc: Option<TsDoc>,
}

#[derive(Debug, Clone)]
pub struct EnumIR {
    /// Possibly dotted: "Variant.Type"
    pub name: String,
    pub is_bitfield: bool,
    pub values: Vec<EnumValueIR>,
    pub doc: Option<TsDoc>,
}

#[derive(Debug, Clone)]
pub struct EnumValueIR {
    pub name: String,
    pub value: i64,
    pub doc: Option<TsDoc>,
}
