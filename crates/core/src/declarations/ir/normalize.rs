//! Normalization from the engine API dump to API IR.
//!
//! This module handles all the Godot-specific logic:
//! - Descriptor decoding (`typedarray::`, `enum::`, property type lists)
//! - Class, builtin and native structure conversion
//! - Duplicate detection and deterministic ordering

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::debug;

use crate::declarations::spec::{
    ApiEnum, Argument, BuiltinClass, EngineClass, ExtensionApi, NativeStructure, UtilityFunction,
};
use crate::error::GenerateError;
use crate::typemap::resolve_godot_type;

use super::api::{
    ApiIR, ClassIR, ClassKind, ConstantIR, ConstructorIR, EnumIR, EnumValueIR, FieldIR, MethodIR,
    ParamIR, SignalIR,
};
use super::types::{TsPrimitive, TsType};
use super::utils::{make_doc, sanitize_identifier};

/// Builtins that map onto TypeScript primitives or the generic helpers and
/// therefore get no class of their own.
const SKIPPED_BUILTINS: [&str; 7] = ["Nil", "bool", "int", "float", "String", "Array", "Dictionary"];

/// Normalize an engine API dump into API IR
pub fn normalize_api(api: &ExtensionApi) -> Result<ApiIR, GenerateError> {
    let singletons: HashSet<&str> = api.singletons.iter().map(|s| s.ty.as_str()).collect();

    let mut classes = Vec::new();

    for builtin in &api.builtin_classes {
        if SKIPPED_BUILTINS.contains(&builtin.name.as_str()) {
            debug!(name = %builtin.name, "Skipping builtin mapped to a primitive.");
            continue;
        }
        classes.push(normalize_builtin(builtin));
    }

    for structure in &api.native_structures {
        classes.push(normalize_native_structure(structure));
    }

    for class in &api.classes {
        let is_singleton = singletons.contains(class.name.as_str());
        classes.push(normalize_engine_class(class, is_singleton));
    }

    // Check for class name collisions across builtins, structures and classes
    let mut class_names = HashSet::new();
    for class in &classes {
        if !class_names.insert(class.name.as_str()) {
            return Err(GenerateError::InvalidApi(format!(
                "Duplicate class '{}' detected. Each class must have a unique name.",
                class.name
            )));
        }
    }

    // Sort for deterministic output
    classes.sort_by(|a, b| a.name.cmp(&b.name));

    let mut global_enums: Vec<EnumIR> = api.global_enums.iter().map(normalize_enum).collect();
    global_enums.sort_by(|a, b| a.name.cmp(&b.name));

    let functions = api
        .utility_functions
        .iter()
        .map(normalize_utility_function)
        .collect();

    Ok(ApiIR {
        version: api.header.as_ref().map(|header| header.label()),
        classes,
        global_enums,
        functions,
    })
}

/// Resolve a type as written in the API dump.
///
/// Decorated forms are rewritten into plain descriptors first, then handed
/// to [`resolve_godot_type`]. Property type lists (`A,B,-C`) become a union
/// of their positive entries.
pub fn resolve_api_type(descriptor: &str) -> TsType {
    if !descriptor.contains(',') {
        return resolve_godot_type(&api_descriptor(descriptor));
    }

    let mut members: Vec<TsType> = Vec::new();
    for entry in descriptor.split(',').map(str::trim) {
        if entry.is_empty() || entry.starts_with('-') {
            continue;
        }
        let ty = resolve_godot_type(&api_descriptor(entry));
        if !members.contains(&ty) {
            members.push(ty);
        }
    }

    match members.len() {
        0 => TsType::any(),
        1 => members.remove(0),
        _ => TsType::Union(members),
    }
}

/// Rewrite engine type decorations into the descriptor grammar understood
/// by the type mapper.
fn api_descriptor(descriptor: &str) -> Cow<'_, str> {
    let mut base = descriptor;
    let mut depth = 0;
    while let Some(element) = base.strip_prefix("typedarray::") {
        base = element;
        depth += 1;
    }

    let base = if let Some(name) = base
        .strip_prefix("enum::")
        .or_else(|| base.strip_prefix("bitfield::"))
    {
        name
    } else if base.starts_with("typeddictionary::") {
        "Dictionary"
    } else {
        base
    };

    if depth == 0 {
        return Cow::Borrowed(base);
    }
    Cow::Owned(format!(
        "{}{base}{}",
        "Array[".repeat(depth),
        "]".repeat(depth)
    ))
}

fn normalize_params(arguments: &[Argument]) -> Vec<ParamIR> {
    arguments
        .iter()
        .map(|arg| ParamIR {
            name: sanitize_identifier(&arg.name),
            ty: resolve_api_type(&arg.ty),
            optional: arg.default_value.is_some(),
        })
        .collect()
}

fn return_type(ty: Option<&str>) -> TsType {
    ty.map_or_else(TsType::void, resolve_api_type)
}

fn normalize_enum(en: &ApiEnum) -> EnumIR {
    EnumIR {
        name: en.name.clone(),
        is_bitfield: en.is_bitfield,
        values: en
            .values
            .iter()
            .map(|v| EnumValueIR {
                name: v.name.clone(),
                value: v.value,
                doc: make_doc(v.description.as_deref(), None),
            })
            .collect(),
        doc: make_doc(en.description.as_deref(), None),
    }
}

fn normalize_utility_function(func: &UtilityFunction) -> MethodIR {
    MethodIR {
        name: sanitize_identifier(&func.name),
        params: normalize_params(&func.arguments),
        vararg: func.is_vararg,
        return_type: return_type(func.return_type.as_deref()),
        is_static: false,
        doc: make_doc(func.description.as_deref(), None),
    }
}

fn normalize_engine_class(class: &EngineClass, is_singleton: bool) -> ClassIR {
    let mut ir = ClassIR::new(&class.name, ClassKind::Engine);
    ir.extends = class.inherits.clone();
    ir.doc = make_doc(
        class.brief_description.as_deref(),
        class.description.as_deref(),
    );

    ir.constants = class
        .constants
        .iter()
        .map(|c| ConstantIR {
            name: c.name.clone(),
            ty: TsType::Primitive(TsPrimitive::Int),
            doc: make_doc(c.description.as_deref(), None),
        })
        .collect();

    ir.fields = class
        .properties
        .iter()
        .map(|p| FieldIR {
            name: p.name.clone(),
            ty: resolve_api_type(&p.ty),
            readonly: p.setter.as_deref().is_none_or(str::is_empty),
            is_static: is_singleton,
            doc: make_doc(p.description.as_deref(), None),
        })
        .collect();

    ir.methods = class
        .methods
        .iter()
        .map(|m| MethodIR {
            name: m.name.clone(),
            params: normalize_params(&m.arguments),
            vararg: m.is_vararg,
            return_type: return_type(m.return_value.as_ref().map(|r| r.ty.as_str())),
            is_static: m.is_static || is_singleton,
            doc: make_doc(m.description.as_deref(), None),
        })
        .collect();

    ir.signals = class
        .signals
        .iter()
        .map(|s| SignalIR {
            name: s.name.clone(),
            params: normalize_params(&s.arguments),
            is_static: is_singleton,
            doc: make_doc(s.description.as_deref(), None),
        })
        .collect();

    ir.enums = class.enums.iter().map(normalize_enum).collect();
    ir
}

fn normalize_builtin(builtin: &BuiltinClass) -> ClassIR {
    let mut ir = ClassIR::new(&builtin.name, ClassKind::Builtin);
    ir.doc = make_doc(
        builtin.brief_description.as_deref(),
        builtin.description.as_deref(),
    );

    ir.constants = builtin
        .constants
        .iter()
        .map(|c| ConstantIR {
            name: c.name.clone(),
            ty: resolve_api_type(&c.ty),
            doc: make_doc(c.description.as_deref(), None),
        })
        .collect();

    ir.fields = builtin
        .members
        .iter()
        .map(|m| FieldIR {
            name: m.name.clone(),
            ty: resolve_api_type(&m.ty),
            readonly: false,
            is_static: false,
            doc: make_doc(m.description.as_deref(), None),
        })
        .collect();

    let mut constructors: Vec<_> = builtin.constructors.iter().collect();
    constructors.sort_by_key(|c| c.index);
    ir.constructors = constructors
        .into_iter()
        .map(|c| ConstructorIR {
            params: normalize_params(&c.arguments),
            doc: make_doc(c.description.as_deref(), None),
        })
        .collect();

    ir.methods = builtin
        .methods
        .iter()
        .map(|m| MethodIR {
            name: m.name.clone(),
            params: normalize_params(&m.arguments),
            vararg: m.is_vararg,
            return_type: return_type(m.return_type.as_deref()),
            is_static: m.is_static,
            doc: make_doc(m.description.as_deref(), None),
        })
        .collect();

    ir.enums = builtin.enums.iter().map(normalize_enum).collect();
    ir
}

/// Native structures describe their layout as C declarations separated by
/// semicolons: `"float left;float right"`, `"Object *object;int32_t id = -1"`.
fn normalize_native_structure(structure: &NativeStructure) -> ClassIR {
    let mut ir = ClassIR::new(&structure.name, ClassKind::NativeStructure);
    ir.fields = structure
        .format
        .split(';')
        .filter_map(parse_native_field)
        .collect();
    ir
}

fn parse_native_field(decl: &str) -> Option<FieldIR> {
    // Drop default values
    let decl = decl.split('=').next().unwrap_or_default().trim();
    let (ty, name) = decl.rsplit_once(char::is_whitespace)?;

    // Sigils written against the name belong to the type
    let sigils: String = name.chars().take_while(|c| matches!(c, '*' | '&')).collect();
    let name = &name[sigils.len()..];

    // Fixed-size arrays: `uint8_t data[16]`
    let (name, is_array) = match name.split_once('[') {
        Some((base, _)) => (base, true),
        None => (name, false),
    };
    if name.is_empty() {
        return None;
    }

    let descriptor = format!("{}{sigils}", native_scalar(ty.trim()));
    let element = resolve_godot_type(&descriptor);
    let ty = if is_array {
        TsType::Array(Box::new(element))
    } else {
        element
    };

    Some(FieldIR {
        name: name.to_string(),
        ty,
        readonly: false,
        is_static: false,
        doc: None,
    })
}

/// Map C scalar spellings onto the engine's `int` and `float`.
fn native_scalar(ty: &str) -> &str {
    match ty {
        "int8_t" | "int16_t" | "int32_t" | "int64_t" | "uint8_t" | "uint16_t" | "uint32_t"
        | "uint64_t" | "size_t" => "int",
        "real_t" | "double" => "float",
        other => other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::declarations::ir::Emit;

    #[test]
    fn test_api_descriptor_decorations() {
        assert_eq!(resolve_api_type("typedarray::Node").emit(), "GodotArray<Node>");
        assert_eq!(
            resolve_api_type("typedarray::String").emit(),
            "GodotArray<string>"
        );
        assert_eq!(
            resolve_api_type("enum::Node.ProcessMode").emit(),
            "Node.ProcessMode"
        );
        assert_eq!(
            resolve_api_type("bitfield::MethodFlags").emit(),
            "MethodFlags"
        );
        assert_eq!(
            resolve_api_type("typeddictionary::StringName;Variant").emit(),
            "GodotDictionary<any>"
        );
        assert_eq!(
            resolve_api_type("typedarray::enum::Key").emit(),
            "GodotArray<Key>"
        );
    }

    #[test]
    fn test_deeply_nested_typed_arrays() {
        assert_eq!(
            resolve_api_type("typedarray::typedarray::int").emit(),
            "GodotArray<GodotArray<int>>"
        );

        let descriptor = format!("{}Node", "typedarray::".repeat(10_000));
        let emitted = resolve_api_type(&descriptor).emit();
        assert!(emitted.starts_with("GodotArray<GodotArray<"));
        assert!(emitted.contains("<any>"));
        assert!(!emitted.contains("Node"));
    }

    #[test]
    fn test_property_type_lists() {
        assert_eq!(
            resolve_api_type("Texture2D,-AnimatedTexture,-AtlasTexture").emit(),
            "Texture2D"
        );
        assert_eq!(
            resolve_api_type("ParticleProcessMaterial,ShaderMaterial").emit(),
            "ParticleProcessMaterial | ShaderMaterial"
        );
        assert_eq!(resolve_api_type("Mesh,Mesh").emit(), "Mesh");
        assert_eq!(resolve_api_type("-Foo").emit(), "any");
    }

    #[test]
    fn test_pointer_types_in_api_become_unknown() {
        assert_eq!(resolve_api_type("const void*").emit(), "unknown");
        assert_eq!(resolve_api_type("AudioFrame*").emit(), "unknown");
    }

    #[test]
    fn test_parse_native_field() {
        let field = parse_native_field("float left").unwrap();
        assert_eq!(field.name, "left");
        assert_eq!(field.ty.emit(), "float");

        let field = parse_native_field("Object *object").unwrap();
        assert_eq!(field.name, "object");
        assert_eq!(field.ty.emit(), "unknown");

        let field = parse_native_field("int32_t id = -1").unwrap();
        assert_eq!(field.name, "id");
        assert_eq!(field.ty.emit(), "int");

        let field = parse_native_field("uint8_t data[16]").unwrap();
        assert_eq!(field.name, "data");
        assert_eq!(field.ty.emit(), "int[]");

        let field = parse_native_field("StringName name").unwrap();
        assert_eq!(field.ty.emit(), "StringName");

        assert!(parse_native_field("").is_none());
        assert!(parse_native_field("orphan").is_none());
    }

    #[test]
    fn test_duplicate_class_names_rejected() {
        let api = ExtensionApi::from_json(
            r#"{
                "classes": [
                    { "name": "Node", "inherits": "Object" },
                    { "name": "Node", "inherits": "Object" }
                ]
            }"#,
        )
        .unwrap();
        let err = normalize_api(&api).unwrap_err();
        assert!(err.to_string().contains("Duplicate class 'Node'"));
    }

    #[test]
    fn test_skipped_builtins_and_sorting() {
        let api = ExtensionApi::from_json(
            r#"{
                "builtin_classes": [
                    { "name": "int" },
                    { "name": "Vector2", "members": [{ "name": "x", "type": "float" }] },
                    { "name": "Array" },
                    { "name": "Color" }
                ],
                "classes": [{ "name": "Node", "inherits": "Object" }, { "name": "Object" }]
            }"#,
        )
        .unwrap();
        let ir = normalize_api(&api).unwrap();
        let names: Vec<_> = ir.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Color", "Node", "Object", "Vector2"]);
    }

    #[test]
    fn test_singleton_members_are_static() {
        let api = ExtensionApi::from_json(
            r#"{
                "classes": [{
                    "name": "Engine",
                    "inherits": "Object",
                    "methods": [{ "name": "get_frames_drawn", "return_value": { "type": "int" } }],
                    "properties": [{ "type": "int", "name": "max_fps", "setter": "set_max_fps", "getter": "get_max_fps" }]
                }],
                "singletons": [{ "name": "Engine", "type": "Engine" }]
            }"#,
        )
        .unwrap();
        let ir = normalize_api(&api).unwrap();
        let engine = &ir.classes[0];
        assert!(engine.methods[0].is_static);
        assert!(engine.fields[0].is_static);
        assert!(!engine.fields[0].readonly);
    }

    #[test]
    fn test_property_without_setter_is_readonly() {
        let api = ExtensionApi::from_json(
            r#"{
                "classes": [{
                    "name": "Node",
                    "properties": [
                        { "type": "StringName", "name": "name", "setter": "set_name", "getter": "get_name" },
                        { "type": "int", "name": "child_count", "setter": "", "getter": "get_child_count" },
                        { "type": "Node", "name": "owner_hint", "getter": "get_owner_hint" }
                    ]
                }]
            }"#,
        )
        .unwrap();
        let ir = normalize_api(&api).unwrap();
        let readonly: Vec<_> = ir.classes[0].fields.iter().map(|f| f.readonly).collect();
        assert_eq!(readonly, vec![false, true, true]);
    }
}
