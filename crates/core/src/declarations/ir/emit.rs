//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit` for clean, composable code generation.
//! Declarations are emitted without indentation; nesting is handled by
//! indenting the emitted text of the children.

use super::types::{
    DtsFile, TsClass, TsDecl, TsDoc, TsEnum, TsFunction, TsInterface, TsMember, TsParam,
    TsPrimitive, TsType, TsTypeAlias,
};
use super::utils::{indent, quote_if_needed};

const INDENT: &str = "  ";

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::Int => "int",
            TsPrimitive::Float => "float",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::String => "string",
            TsPrimitive::Void => "void",
            TsPrimitive::Any => "any",
            TsPrimitive::Unknown => "unknown",
        }
        .to_string()
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Generic { name, args } => {
                let args = args.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("{name}<{args}>")
            }
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                if matches!(**inner, TsType::Union(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let rest = if self.rest { "..." } else { "" };
        let opt = if self.optional && !self.rest { "?" } else { "" };
        format!("{rest}{}{opt}: {}", self.name, self.ty.emit())
    }
}

fn emit_params(params: &[TsParam]) -> String {
    params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ")
}

// =============================================================================
// Documentation
// =============================================================================

impl Emit for TsDoc {
    fn emit(&self) -> String {
        if let [line] = self.lines.as_slice() {
            return format!("/** {line} */\n");
        }
        let mut output = "/**\n".to_string();
        for line in &self.lines {
            if line.is_empty() {
                output.push_str(" *\n");
            } else {
                output.push_str(&format!(" * {line}\n"));
            }
        }
        output.push_str(" */\n");
        output
    }
}

fn emit_doc(doc: Option<&TsDoc>) -> String {
    doc.filter(|doc| !doc.is_empty())
        .map(Emit::emit)
        .unwrap_or_default()
}

// =============================================================================
// Members
// =============================================================================

impl Emit for TsMember {
    fn emit(&self) -> String {
        match self {
            TsMember::Property {
                name,
                ty,
                readonly,
                is_static,
                doc,
            } => {
                let stat = if *is_static { "static " } else { "" };
                let ro = if *readonly { "readonly " } else { "" };
                format!(
                    "{}{stat}{ro}{}: {};\n",
                    emit_doc(doc.as_ref()),
                    quote_if_needed(name),
                    ty.emit()
                )
            }
            TsMember::Method {
                name,
                params,
                return_type,
                is_static,
                doc,
            } => {
                let stat = if *is_static { "static " } else { "" };
                format!(
                    "{}{stat}{}({}): {};\n",
                    emit_doc(doc.as_ref()),
                    quote_if_needed(name),
                    emit_params(params),
                    return_type.emit()
                )
            }
            TsMember::Constructor { params, doc } => {
                format!(
                    "{}constructor({});\n",
                    emit_doc(doc.as_ref()),
                    emit_params(params)
                )
            }
        }
    }
}

fn emit_body(members: &[TsMember]) -> String {
    if members.is_empty() {
        return "{}\n".to_string();
    }
    let body: String = members.iter().map(Emit::emit).collect();
    format!("{{\n{}}}\n", indent(&body, INDENT))
}

// =============================================================================
// Declarations
// =============================================================================

impl TsDecl {
    /// Emit the declaration. `ambient` adds the `declare` keyword where
    /// TypeScript expects it at the top level of a declaration file.
    pub fn emit_with(&self, ambient: bool) -> String {
        let declare = if ambient { "declare " } else { "" };
        match self {
            TsDecl::Class(class) => emit_class(class, declare),
            TsDecl::Interface(iface) => emit_interface(iface),
            TsDecl::Enum(en) => emit_enum(en, declare),
            TsDecl::Function(func) => emit_function(func, declare),
            TsDecl::TypeAlias(alias) => emit_type_alias(alias),
            TsDecl::Namespace { name, body } => {
                let inner = body
                    .iter()
                    .map(|decl| decl.emit_with(false))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{declare}namespace {name} {{\n{}}}\n", indent(&inner, INDENT))
            }
        }
    }
}

impl Emit for TsDecl {
    fn emit(&self) -> String {
        self.emit_with(true)
    }
}

fn emit_class(class: &TsClass, declare: &str) -> String {
    let extends = class
        .extends
        .as_ref()
        .map(|parent| format!(" extends {parent}"))
        .unwrap_or_default();
    format!(
        "{}{declare}class {}{extends} {}",
        emit_doc(class.doc.as_ref()),
        class.name,
        emit_body(&class.members)
    )
}

fn emit_interface(iface: &TsInterface) -> String {
    let type_params = if iface.type_params.is_empty() {
        String::new()
    } else {
        format!("<{}>", iface.type_params.join(", "))
    };
    format!(
        "{}interface {}{type_params} {}",
        emit_doc(iface.doc.as_ref()),
        iface.name,
        emit_body(&iface.members)
    )
}

fn emit_enum(en: &TsEnum, declare: &str) -> String {
    let mut body = String::new();
    for member in &en.members {
        body.push_str(&emit_doc(member.doc.as_ref()));
        body.push_str(&format!("{} = {},\n", quote_if_needed(&member.name), member.value));
    }
    let body = if body.is_empty() {
        "{}\n".to_string()
    } else {
        format!("{{\n{}}}\n", indent(&body, INDENT))
    };
    format!(
        "{}{declare}enum {} {body}",
        emit_doc(en.doc.as_ref()),
        en.name
    )
}

fn emit_function(func: &TsFunction, declare: &str) -> String {
    format!(
        "{}{declare}function {}({}): {};\n",
        emit_doc(func.doc.as_ref()),
        func.name,
        emit_params(&func.params),
        func.return_type.emit()
    )
}

fn emit_type_alias(alias: &TsTypeAlias) -> String {
    format!(
        "{}type {} = {};\n",
        emit_doc(alias.doc.as_ref()),
        alias.name,
        alias.ty.emit()
    )
}

// =============================================================================
// Files
// =============================================================================

impl Emit for DtsFile {
    fn emit(&self) -> String {
        let mut sections = Vec::new();

        if !self.header.is_empty() {
            sections.push(
                self.header
                    .iter()
                    .map(|line| format!("{line}\n"))
                    .collect::<String>(),
            );
        }

        if !self.references.is_empty() {
            sections.push(
                self.references
                    .iter()
                    .map(|path| format!("/// <reference path=\"{path}\" />\n"))
                    .collect::<String>(),
            );
        }

        sections.extend(self.decls.iter().map(Emit::emit));

        sections.join("\n")
    }
}
