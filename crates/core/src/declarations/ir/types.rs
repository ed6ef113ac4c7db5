//! TypeScript declaration AST.
//!
//! This module defines what a generated `.d.ts` file is made of:
//! - TsType: type annotations (primitives, generics, unions, references)
//! - TsMember: class and interface members
//! - TsDecl: top-level and namespaced declarations
//! - DtsFile: one emitted file

/// Generic wrapper used for Godot arrays.
pub const GODOT_ARRAY: &str = "GodotArray";

/// Generic wrapper used for Godot dictionaries.
pub const GODOT_DICTIONARY: &str = "GodotDictionary";

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive or alias types: int, float, boolean, string, void, any, unknown
    Primitive(TsPrimitive),
    /// Generic instantiation: GodotArray<int>
    Generic { name: String, args: Vec<TsType> },
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Named type reference: Node, Node.ProcessMode
    Ref(String),
}

impl TsType {
    pub fn any() -> Self {
        TsType::Primitive(TsPrimitive::Any)
    }

    pub fn void() -> Self {
        TsType::Primitive(TsPrimitive::Void)
    }

    pub fn godot_array(element: TsType) -> Self {
        TsType::Generic {
            name: GODOT_ARRAY.to_string(),
            args: vec![element],
        }
    }

    pub fn godot_dictionary(value: TsType) -> Self {
        TsType::Generic {
            name: GODOT_DICTIONARY.to_string(),
            args: vec![value],
        }
    }
}

/// Primitive types. `int` and `float` are aliases of `number` declared in
/// the globals file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    Int,
    Float,
    Number,
    Boolean,
    String,
    Void,
    Any,
    Unknown,
}

/// JSDoc comment, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsDoc {
    pub lines: Vec<String>,
}

impl TsDoc {
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

/// Function or method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
    /// Rest parameter: ...args
    pub rest: bool,
}

/// Class or interface member
#[derive(Debug, Clone)]
pub enum TsMember {
    /// name: T; / static readonly NAME: T;
    Property {
        name: String,
        ty: TsType,
        readonly: bool,
        is_static: bool,
        doc: Option<TsDoc>,
    },
    /// name(params): T;
    Method {
        name: String,
        params: Vec<TsParam>,
        return_type: TsType,
        is_static: bool,
        doc: Option<TsDoc>,
    },
    /// constructor(params);
    Constructor {
        params: Vec<TsParam>,
        doc: Option<TsDoc>,
    },
}

impl TsMember {
    /// Member name as seen by TypeScript name resolution. Constructors have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            TsMember::Property { name, .. } | TsMember::Method { name, .. } => Some(name),
            TsMember::Constructor { .. } => None,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            TsMember::Property { is_static, .. } | TsMember::Method { is_static, .. } => {
                *is_static
            }
            TsMember::Constructor { .. } => false,
        }
    }
}

/// class Foo extends Bar { ... }
#[derive(Debug, Clone)]
pub struct TsClass {
    pub name: String,
    pub extends: Option<String>,
    pub members: Vec<TsMember>,
    pub doc: Option<TsDoc>,
}

/// interface Foo<T> { ... }
#[derive(Debug, Clone)]
pub struct TsInterface {
    pub name: String,
    pub type_params: Vec<String>,
    pub members: Vec<TsMember>,
    pub doc: Option<TsDoc>,
}

/// enum Foo { A = 0, B = 1 }
#[derive(Debug, Clone)]
pub struct TsEnum {
    pub name: String,
    pub members: Vec<TsEnumMember>,
    pub doc: Option<TsDoc>,
}

#[derive(Debug, Clone)]
pub struct TsEnumMember {
    pub name: String,
    pub value: i64,
    pub doc: Option<TsDoc>,
}

/// function foo(params): T;
#[derive(Debug, Clone)]
pub struct TsFunction {
    pub name: String,
    pub params: Vec<TsParam>,
    pub return_type: TsType,
    pub doc: Option<TsDoc>,
}

/// type Foo = T;
#[derive(Debug, Clone)]
pub struct TsTypeAlias {
    pub name: String,
    pub ty: TsType,
    pub doc: Option<TsDoc>,
}

/// A declaration. At the top level of a file, classes, enums, functions and
/// namespaces carry the `declare` keyword; inside a namespace they do not.
#[derive(Debug, Clone)]
pub enum TsDecl {
    Class(TsClass),
    Interface(TsInterface),
    Enum(TsEnum),
    Function(TsFunction),
    TypeAlias(TsTypeAlias),
    /// namespace Foo { ... }
    Namespace { name: String, body: Vec<TsDecl> },
}

/// A complete declaration file
#[derive(Debug, Clone)]
pub struct DtsFile {
    /// Path relative to the snapshot directory, e.g. "Node.d.ts"
    pub path: String,
    /// Line comments written before anything else
    pub header: Vec<String>,
    /// Triple-slash references: /// <reference path="..." />
    pub references: Vec<String>,
    pub decls: Vec<TsDecl>,
}
