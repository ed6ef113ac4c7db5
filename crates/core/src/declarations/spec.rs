//! Godot `extension_api.json` structs for serde deserialization.
//!
//! This module defines the subset of the engine's API dump that we need to
//! produce declaration files. Unknown fields are ignored and collections
//! default to empty so dumps from older engine versions still parse.

#![allow(dead_code)]

use serde::Deserialize;

use crate::error::GenerateError;

/// Root of an `extension_api.json` dump.
#[derive(Debug, Default, Deserialize)]
pub struct ExtensionApi {
    pub header: Option<ApiHeader>,
    #[serde(default)]
    pub global_enums: Vec<ApiEnum>,
    #[serde(default)]
    pub utility_functions: Vec<UtilityFunction>,
    #[serde(default)]
    pub builtin_classes: Vec<BuiltinClass>,
    #[serde(default)]
    pub classes: Vec<EngineClass>,
    #[serde(default)]
    pub singletons: Vec<Singleton>,
    #[serde(default)]
    pub native_structures: Vec<NativeStructure>,
}

impl ExtensionApi {
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        serde_json::from_str(json).map_err(|err| GenerateError::InvalidApi(err.to_string()))
    }
}

/// Engine version the dump was produced by.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiHeader {
    pub version_major: u32,
    pub version_minor: u32,
    pub version_patch: u32,
    pub version_status: String,
    pub version_build: String,
    pub version_full_name: String,
}

impl ApiHeader {
    /// Short version label such as `4.4.3-stable`.
    pub fn label(&self) -> String {
        let mut label = format!(
            "{}.{}.{}",
            self.version_major, self.version_minor, self.version_patch
        );
        if !self.version_status.is_empty() {
            label.push('-');
            label.push_str(&self.version_status);
        }
        label
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnum {
    pub name: String,
    #[serde(default)]
    pub is_bitfield: bool,
    #[serde(default)]
    pub values: Vec<ApiEnumValue>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnumValue {
    pub name: String,
    pub value: i64,
    pub description: Option<String>,
}

/// Method, constructor or utility function argument.
#[derive(Debug, Clone, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub meta: Option<String>,
    /// Default value as engine source text, e.g. `false` or `Vector2(0, 0)`.
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UtilityFunction {
    pub name: String,
    pub return_type: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_vararg: bool,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    pub description: Option<String>,
}

/// Value types such as `Vector2`, `Color` or `StringName`.
#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinClass {
    pub name: String,
    pub indexing_return_type: Option<String>,
    #[serde(default)]
    pub is_keyed: bool,
    #[serde(default)]
    pub members: Vec<BuiltinMember>,
    #[serde(default)]
    pub constants: Vec<BuiltinConstant>,
    #[serde(default)]
    pub enums: Vec<ApiEnum>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    #[serde(default)]
    pub methods: Vec<BuiltinMethod>,
    pub brief_description: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinConstant {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinMethod {
    pub name: String,
    pub return_type: Option<String>,
    #[serde(default)]
    pub is_vararg: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    pub description: Option<String>,
}

/// Object-derived engine classes such as `Node` or `Resource`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineClass {
    pub name: String,
    #[serde(default)]
    pub is_refcounted: bool,
    #[serde(default)]
    pub is_instantiable: bool,
    pub inherits: Option<String>,
    #[serde(default)]
    pub api_type: String,
    #[serde(default)]
    pub constants: Vec<ClassConstant>,
    #[serde(default)]
    pub enums: Vec<ApiEnum>,
    #[serde(default)]
    pub methods: Vec<ClassMethod>,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub properties: Vec<Property>,
    pub brief_description: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassConstant {
    pub name: String,
    pub value: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassMethod {
    pub name: String,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_vararg: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_virtual: bool,
    pub return_value: Option<ReturnValue>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnValue {
    #[serde(rename = "type")]
    pub ty: String,
    pub meta: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Signal {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    pub setter: Option<String>,
    pub getter: Option<String>,
    pub index: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Singleton {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NativeStructure {
    pub name: String,
    pub format: String,
}
