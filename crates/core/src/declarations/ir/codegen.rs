//! Code generation from API IR to the declaration AST.
//!
//! Produces one file per class, the shared globals file and an index that
//! references everything. No Godot-specific decisions are made here beyond
//! the layout of the output.

use std::collections::{BTreeMap, HashSet};

use gdts_common::GENERATED_HEADER;
use tracing::debug;

use super::api::{ApiIR, ClassIR, ClassKind, EnumIR, MethodIR, ParamIR, SignalIR};
use super::emit::Emit;
use super::types::{
    DtsFile, GODOT_ARRAY, GODOT_DICTIONARY, TsClass, TsDecl, TsDoc, TsEnum, TsEnumMember,
    TsFunction, TsInterface, TsMember, TsParam, TsPrimitive, TsType, TsTypeAlias,
};

/// Shared aliases, helper interfaces, global enums and utility functions.
pub const GLOBALS_FILE: &str = "godot.globals.d.ts";

/// Entry point referencing every other file.
pub const INDEX_FILE: &str = "index.d.ts";

const BITFIELD_NOTE: &str = "Bit flags: values can be combined with `|`.";

/// Generate every declaration file for the API
pub fn codegen_files(api: &ApiIR) -> Vec<DtsFile> {
    let header = file_header(api.version.as_deref());

    let mut files = Vec::with_capacity(api.classes.len() + 2);
    files.push(globals_file(api, &header));
    files.extend(api.classes.iter().map(|class| class_file(class, &header)));
    files.push(index_file(api, &header));
    files
}

fn file_header(version: Option<&str>) -> Vec<String> {
    let mut header = vec![GENERATED_HEADER.to_string()];
    if let Some(version) = version {
        header.push(format!("// Godot {version}"));
    }
    header
}

fn class_file_name(class: &ClassIR) -> String {
    format!("{}.d.ts", class.name)
}

// =============================================================================
// Index
// =============================================================================

fn index_file(api: &ApiIR, header: &[String]) -> DtsFile {
    let mut references = vec![GLOBALS_FILE.to_string()];
    for kind in [ClassKind::Builtin, ClassKind::NativeStructure, ClassKind::Engine] {
        references.extend(
            api.classes
                .iter()
                .filter(|class| class.kind == kind)
                .map(class_file_name),
        );
    }

    DtsFile {
        path: INDEX_FILE.to_string(),
        header: header.to_vec(),
        references,
        decls: Vec::new(),
    }
}

// =============================================================================
// Globals
// =============================================================================

fn globals_file(api: &ApiIR, header: &[String]) -> DtsFile {
    let mut decls = vec![
        type_alias("int", TsType::Primitive(TsPrimitive::Number), "Integer value."),
        type_alias(
            "float",
            TsType::Primitive(TsPrimitive::Number),
            "Floating-point value.",
        ),
        type_alias("Variant", TsType::any(), "Any engine value."),
        TsDecl::Interface(godot_array_interface()),
        TsDecl::Interface(godot_dictionary_interface()),
    ];

    // Dotted names such as `Variant.Type` live inside a namespace
    let mut namespaces: BTreeMap<&str, Vec<TsDecl>> = BTreeMap::new();
    for en in &api.global_enums {
        match en.name.rsplit_once('.') {
            Some((outer, inner)) => namespaces
                .entry(outer)
                .or_default()
                .push(TsDecl::Enum(enum_decl(en, inner))),
            None => decls.push(TsDecl::Enum(enum_decl(en, &en.name))),
        }
    }
    decls.extend(
        namespaces
            .into_iter()
            .map(|(name, body)| TsDecl::Namespace {
                name: name.to_string(),
                body,
            }),
    );

    decls.extend(api.functions.iter().map(|func| {
        TsDecl::Function(TsFunction {
            name: func.name.clone(),
            params: method_params(func),
            return_type: func.return_type.clone(),
            doc: func.doc.clone(),
        })
    }));

    DtsFile {
        path: GLOBALS_FILE.to_string(),
        header: header.to_vec(),
        references: Vec::new(),
        decls,
    }
}

fn type_alias(name: &str, ty: TsType, doc: &str) -> TsDecl {
    TsDecl::TypeAlias(TsTypeAlias {
        name: name.to_string(),
        ty,
        doc: Some(TsDoc {
            lines: vec![doc.to_string()],
        }),
    })
}

fn helper_param(name: &str, ty: TsType) -> TsParam {
    TsParam {
        name: name.to_string(),
        ty,
        optional: false,
        rest: false,
    }
}

fn helper_method(name: &str, params: Vec<TsParam>, return_type: TsType) -> TsMember {
    TsMember::Method {
        name: name.to_string(),
        params,
        return_type,
        is_static: false,
        doc: None,
    }
}

fn godot_array_interface() -> TsInterface {
    let element = || TsType::Ref("T".to_string());
    let int = || TsType::Primitive(TsPrimitive::Int);
    TsInterface {
        name: GODOT_ARRAY.to_string(),
        type_params: vec!["T".to_string()],
        members: vec![
            helper_method("size", vec![], int()),
            helper_method("is_empty", vec![], TsType::Primitive(TsPrimitive::Boolean)),
            helper_method("get", vec![helper_param("index", int())], element()),
            helper_method(
                "set",
                vec![helper_param("index", int()), helper_param("value", element())],
                TsType::void(),
            ),
            helper_method(
                "push_back",
                vec![helper_param("value", element())],
                TsType::void(),
            ),
            helper_method("clear", vec![], TsType::void()),
        ],
        doc: Some(TsDoc {
            lines: vec!["Engine array holding elements of type `T`.".to_string()],
        }),
    }
}

fn godot_dictionary_interface() -> TsInterface {
    let value = || TsType::Ref("T".to_string());
    TsInterface {
        name: GODOT_DICTIONARY.to_string(),
        type_params: vec!["T".to_string()],
        members: vec![
            helper_method("size", vec![], TsType::Primitive(TsPrimitive::Int)),
            helper_method(
                "has",
                vec![helper_param("key", TsType::any())],
                TsType::Primitive(TsPrimitive::Boolean),
            ),
            helper_method("get", vec![helper_param("key", TsType::any())], value()),
            helper_method(
                "set",
                vec![helper_param("key", TsType::any()), helper_param("value", value())],
                TsType::void(),
            ),
            helper_method("keys", vec![], TsType::godot_array(TsType::any())),
            helper_method("values", vec![], TsType::godot_array(value())),
        ],
        doc: Some(TsDoc {
            lines: vec!["Engine dictionary holding values of type `T`.".to_string()],
        }),
    }
}

// =============================================================================
// Classes
// =============================================================================

fn class_file(class: &ClassIR, header: &[String]) -> DtsFile {
    let mut decls = vec![TsDecl::Class(class_decl(class))];

    if !class.enums.is_empty() {
        decls.push(TsDecl::Namespace {
            name: class.name.clone(),
            body: class
                .enums
                .iter()
                .map(|en| TsDecl::Enum(enum_decl(en, &en.name)))
                .collect(),
        });
    }

    DtsFile {
        path: class_file_name(class),
        header: header.to_vec(),
        references: Vec::new(),
        decls,
    }
}

/// Collects members, dropping any whose name was already taken on the same
/// side (static or instance). Constructors are overloads and always kept.
struct MemberSet<'a> {
    class: &'a str,
    seen: HashSet<(String, bool)>,
    members: Vec<TsMember>,
}

impl<'a> MemberSet<'a> {
    fn new(class: &'a str) -> Self {
        Self {
            class,
            seen: HashSet::new(),
            members: Vec::new(),
        }
    }

    fn push(&mut self, member: TsMember) {
        if let Some(name) = member.name()
            && !self.seen.insert((name.to_string(), member.is_static()))
        {
            debug!(
                class = %self.class,
                member = %name,
                "Skipping member whose name is already declared."
            );
            return;
        }
        self.members.push(member);
    }
}

fn class_decl(class: &ClassIR) -> TsClass {
    let mut members = MemberSet::new(&class.name);

    for constant in &class.constants {
        members.push(TsMember::Property {
            name: constant.name.clone(),
            ty: constant.ty.clone(),
            readonly: true,
            is_static: true,
            doc: constant.doc.clone(),
        });
    }

    for field in &class.fields {
        members.push(TsMember::Property {
            name: field.name.clone(),
            ty: field.ty.clone(),
            readonly: field.readonly,
            is_static: field.is_static,
            doc: field.doc.clone(),
        });
    }

    for ctor in &class.constructors {
        members.push(TsMember::Constructor {
            params: to_params(&ctor.params),
            doc: ctor.doc.clone(),
        });
    }

    for method in &class.methods {
        members.push(TsMember::Method {
            name: method.name.clone(),
            params: method_params(method),
            return_type: method.return_type.clone(),
            is_static: method.is_static,
            doc: method.doc.clone(),
        });
    }

    for signal in &class.signals {
        members.push(TsMember::Property {
            name: signal.name.clone(),
            ty: TsType::Ref("Signal".to_string()),
            readonly: true,
            is_static: signal.is_static,
            doc: signal_doc(signal),
        });
    }

    let kind_note = match class.kind {
        ClassKind::NativeStructure => Some("Native structure exposed to extensions."),
        ClassKind::Engine | ClassKind::Builtin => None,
    };
    let doc = match (class.doc.clone(), kind_note) {
        (Some(doc), _) => Some(doc),
        (None, Some(note)) => Some(TsDoc {
            lines: vec![note.to_string()],
        }),
        (None, None) => None,
    };

    TsClass {
        name: class.name.clone(),
        extends: class.extends.clone(),
        members: members.members,
        doc,
    }
}

fn enum_decl(en: &EnumIR, name: &str) -> TsEnum {
    let doc = if en.is_bitfield {
        let mut doc = en.doc.clone().unwrap_or_default();
        if !doc.lines.is_empty() {
            doc.lines.push(String::new());
        }
        doc.lines.push(BITFIELD_NOTE.to_string());
        Some(doc)
    } else {
        en.doc.clone()
    };

    TsEnum {
        name: name.to_string(),
        members: en
            .values
            .iter()
            .map(|v| TsEnumMember {
                name: v.name.clone(),
                value: v.value,
                doc: v.doc.clone(),
            })
            .collect(),
        doc,
    }
}

fn to_params(params: &[ParamIR]) -> Vec<TsParam> {
    // A required parameter after an optional one is not valid TypeScript,
    // so optionality only applies to the trailing run.
    let required_until = params
        .iter()
        .rposition(|p| !p.optional)
        .map_or(0, |idx| idx + 1);

    params
        .iter()
        .enumerate()
        .map(|(idx, p)| TsParam {
            name: p.name.clone(),
            ty: p.ty.clone(),
            optional: p.optional && idx >= required_until,
            rest: false,
        })
        .collect()
}

/// Signals are typed as plain `Signal`, so their arguments only survive as
/// `@param` tags.
fn signal_doc(signal: &SignalIR) -> Option<TsDoc> {
    if signal.params.is_empty() {
        return signal.doc.clone();
    }

    let mut lines = signal.doc.clone().map(|doc| doc.lines).unwrap_or_default();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.extend(
        signal
            .params
            .iter()
            .map(|param| format!("@param {} {}", param.name, param.ty.emit())),
    );
    Some(TsDoc { lines })
}

fn method_params(method: &MethodIR) -> Vec<TsParam> {
    let mut params = to_params(&method.params);
    if method.vararg {
        params.push(TsParam {
            name: "args".to_string(),
            ty: TsType::Array(Box::new(TsType::any())),
            optional: false,
            rest: true,
        });
    }
    params
}
