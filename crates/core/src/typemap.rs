//! Godot type descriptor to TypeScript annotation mapping.
//!
//! Descriptors come straight from engine API metadata (`"int"`,
//! `"Array[Node]"`, `"const Object*"`). The mapping never fails: anything it
//! does not recognise is passed through as a class name, pointer and
//! reference types collapse to `unknown`, untyped containers to `any`.

use crate::declarations::ir::Emit;
use crate::declarations::ir::types::{TsPrimitive, TsType};

/// C-style qualifiers that do not change the underlying type.
const QUALIFIERS: [&str; 3] = ["const", "volatile", "restrict"];

const ARRAY_NAME: &str = "Array";
const DICTIONARY_NAME: &str = "Dictionary";

/// Array nesting kept before the element type degrades to `any`.
pub const MAX_ARRAY_DEPTH: usize = 32;

/// Map a Godot type descriptor to the text of a TypeScript type annotation.
///
/// ```
/// use gdts_core::map_godot_type;
///
/// assert_eq!(map_godot_type("bool"), "boolean");
/// assert_eq!(map_godot_type("Array[String]"), "GodotArray<string>");
/// assert_eq!(map_godot_type("const Node&"), "unknown");
/// assert_eq!(map_godot_type("PackedScene"), "PackedScene");
/// ```
pub fn map_godot_type(raw: &str) -> String {
    resolve_godot_type(raw).emit()
}

/// Resolve a Godot type descriptor into a TypeScript type node.
///
/// Emitting the returned node yields exactly [`map_godot_type`].
pub fn resolve_godot_type(raw: &str) -> TsType {
    // Both flags look at the untouched input.
    let had_outer_whitespace = raw.trim_matches(is_blank).len() != raw.len();
    let had_pointer = raw.contains(['*', '&']);

    if had_pointer {
        return TsType::Primitive(TsPrimitive::Unknown);
    }

    let normalized = normalize_descriptor(raw);
    let mut key = normalized.as_str();

    // Peel `Array[...]` layers. Normalization is idempotent and bracket
    // content is trimmed, so only the outermost layer can carry padding.
    let mut depth = 0;
    let element = loop {
        let Some(inner) = array_element(key) else {
            break resolve_leaf(key);
        };
        if depth == 0 && had_outer_whitespace {
            // Padded array descriptors lose their element type.
            return TsType::godot_array(TsType::any());
        }
        depth += 1;
        match inner.map(|inner| inner.trim_matches(is_blank)) {
            Some(inner) if !inner.is_empty() && depth < MAX_ARRAY_DEPTH => key = inner,
            _ => break TsType::any(),
        }
    };

    (0..depth).fold(element, |ty, _| TsType::godot_array(ty))
}

/// Everything but arrays, on an already normalized key.
fn resolve_leaf(key: &str) -> TsType {
    if let Some(primitive) = primitive_for(key) {
        return TsType::Primitive(primitive);
    }
    if key == DICTIONARY_NAME {
        return TsType::godot_dictionary(TsType::any());
    }
    TsType::Ref(key.to_string())
}

fn primitive_for(key: &str) -> Option<TsPrimitive> {
    match key {
        "int" => Some(TsPrimitive::Int),
        "float" => Some(TsPrimitive::Float),
        "bool" => Some(TsPrimitive::Boolean),
        "String" => Some(TsPrimitive::String),
        "void" => Some(TsPrimitive::Void),
        _ => None,
    }
}

/// Match `Array` or `Array[...]`.
///
/// Returns `Some(None)` for the bare form and `Some(Some(inner))` for the
/// bracketed one, with the bracket content untrimmed.
fn array_element(key: &str) -> Option<Option<&str>> {
    if key == ARRAY_NAME {
        return Some(None);
    }
    key.strip_prefix(ARRAY_NAME)
        .and_then(|rest| rest.strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
        .map(Some)
}

/// Whitespace as JavaScript's `trim` sees it, byte order mark included.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trim, drop qualifier words and sigils, collapse whitespace.
fn normalize_descriptor(raw: &str) -> String {
    let without_qualifiers = strip_qualifiers(raw.trim_matches(is_blank));
    let without_sigils: String = without_qualifiers
        .chars()
        .filter(|c| !matches!(c, '*' | '&'))
        .collect();
    without_sigils
        .split(is_blank)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Remove whole-word qualifiers, leaving every other character in place.
fn strip_qualifiers(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut word_start = None;

    for (idx, c) in input.char_indices() {
        if is_word_char(c) {
            word_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = word_start.take() {
            push_unless_qualifier(&mut output, &input[start..idx]);
        }
        output.push(c);
    }
    if let Some(start) = word_start {
        push_unless_qualifier(&mut output, &input[start..]);
    }

    output
}

fn push_unless_qualifier(output: &mut String, word: &str) {
    if !QUALIFIERS.contains(&word) {
        output.push_str(word);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert_eq!(map_godot_type("int"), "int");
        assert_eq!(map_godot_type("float"), "float");
        assert_eq!(map_godot_type("bool"), "boolean");
        assert_eq!(map_godot_type("String"), "string");
        assert_eq!(map_godot_type("void"), "void");
    }

    #[test]
    fn test_primitives_are_case_sensitive() {
        assert_eq!(map_godot_type("Int"), "Int");
        assert_eq!(map_godot_type("string"), "string");
        assert_eq!(map_godot_type("Bool"), "Bool");
    }

    #[test]
    fn test_arrays() {
        assert_eq!(map_godot_type("Array"), "GodotArray<any>");
        assert_eq!(map_godot_type("Array[int]"), "GodotArray<int>");
        assert_eq!(map_godot_type("Array[String]"), "GodotArray<string>");
        assert_eq!(map_godot_type("Array[Node]"), "GodotArray<Node>");
        assert_eq!(map_godot_type("Array[]"), "GodotArray<any>");
        assert_eq!(map_godot_type("Array[  ]"), "GodotArray<any>");
    }

    #[test]
    fn test_nested_arrays_recurse() {
        assert_eq!(
            map_godot_type("Array[Array[bool]]"),
            "GodotArray<GodotArray<boolean>>"
        );
        assert_eq!(
            map_godot_type("Array[Dictionary]"),
            "GodotArray<GodotDictionary<any>>"
        );
        assert_eq!(map_godot_type("Array[ String ]"), "GodotArray<string>");
        assert_eq!(map_godot_type("Array[const String]"), "GodotArray<string>");
    }

    #[test]
    fn test_padded_array_degrades_to_any() {
        assert_eq!(map_godot_type("  Array[int] "), "GodotArray<any>");
        assert_eq!(map_godot_type("Array[Node]\n"), "GodotArray<any>");
        assert_eq!(map_godot_type("\tArray"), "GodotArray<any>");
    }

    #[test]
    fn test_padding_is_tolerated_outside_arrays() {
        assert_eq!(map_godot_type("  bool  "), "boolean");
        assert_eq!(map_godot_type(" int"), "int");
        assert_eq!(map_godot_type("  Dictionary "), "GodotDictionary<any>");
        assert_eq!(map_godot_type("\tNode\t"), "Node");
    }

    #[test]
    fn test_dictionary() {
        assert_eq!(map_godot_type("Dictionary"), "GodotDictionary<any>");
        assert_eq!(map_godot_type("Dictionary[int]"), "Dictionary[int]");
    }

    #[test]
    fn test_class_names_pass_through() {
        for name in ["Vector2", "Vector3", "Node", "PackedScene", "RID"] {
            assert_eq!(map_godot_type(name), name);
        }
    }

    #[test]
    fn test_pointers_and_references_are_unknown() {
        assert_eq!(map_godot_type("int*"), "unknown");
        assert_eq!(map_godot_type("const Node&"), "unknown");
        assert_eq!(map_godot_type("const void*"), "unknown");
        assert_eq!(map_godot_type("bool*"), "unknown");
        assert_eq!(map_godot_type("Array[Node*]"), "unknown");
        assert_eq!(map_godot_type("  Array[int]& "), "unknown");
        assert_eq!(map_godot_type("&"), "unknown");
    }

    #[test]
    fn test_qualifiers_are_stripped() {
        assert_eq!(map_godot_type("const int"), "int");
        assert_eq!(map_godot_type("volatile float"), "float");
        assert_eq!(map_godot_type("const restrict Vector2"), "Vector2");
        assert_eq!(map_godot_type("const Array[int]"), "GodotArray<int>");
        assert_eq!(map_godot_type("Node const"), "Node");
    }

    #[test]
    fn test_qualifiers_match_whole_words_only() {
        assert_eq!(map_godot_type("constant"), "constant");
        assert_eq!(map_godot_type("Const int"), "Const int");
        assert_eq!(map_godot_type("my_const"), "my_const");
        assert_eq!(map_godot_type("const_int"), "const_int");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(map_godot_type("unsigned   long"), "unsigned long");
        assert_eq!(map_godot_type("const  \t Node"), "Node");
        assert_eq!(map_godot_type("Array [int]"), "Array [int]");
    }

    #[test]
    fn test_total_on_odd_input() {
        assert_eq!(map_godot_type(""), "");
        assert_eq!(map_godot_type("   "), "");
        assert_eq!(map_godot_type("const"), "");
        assert_eq!(map_godot_type("[]"), "[]");
        assert_eq!(map_godot_type("Array[int]]"), "GodotArray<int]>");
    }

    #[test]
    fn test_passthrough_is_idempotent() {
        for name in ["Vector2", "Node3D", "PackedStringArray", "Object", "Node.ProcessMode"] {
            let once = map_godot_type(name);
            assert_eq!(map_godot_type(&once), once);
        }
    }

    #[test]
    fn test_resolve_builds_structured_types() {
        let ty = resolve_godot_type("Array[Array[int]]");
        let TsType::Generic { name, args } = &ty else {
            panic!("expected a generic, got {ty:?}");
        };
        assert_eq!(name, "GodotArray");
        assert_eq!(args.len(), 1);
        assert!(matches!(&args[0], TsType::Generic { name, .. } if name == "GodotArray"));

        assert!(matches!(
            resolve_godot_type("Node*"),
            TsType::Primitive(TsPrimitive::Unknown)
        ));
        assert!(matches!(resolve_godot_type("RID"), TsType::Ref(name) if name == "RID"));
    }

    #[test]
    fn test_byte_order_mark_counts_as_padding() {
        assert_eq!(map_godot_type("\u{FEFF}Array[int]"), "GodotArray<any>");
        assert_eq!(map_godot_type("\u{FEFF}bool"), "boolean");
        assert_eq!(map_godot_type("Array[\u{FEFF}int]"), "GodotArray<int>");
    }

    #[test]
    fn test_nesting_below_limit_is_kept() {
        let depth = MAX_ARRAY_DEPTH - 1;
        let descriptor = format!("{}int{}", "Array[".repeat(depth), "]".repeat(depth));
        let expected = format!("{}int{}", "GodotArray<".repeat(depth), ">".repeat(depth));
        assert_eq!(map_godot_type(&descriptor), expected);
    }

    #[test]
    fn test_deep_nesting_degrades_to_any() {
        let depth = 20_000;
        let descriptor = format!("{}int{}", "Array[".repeat(depth), "]".repeat(depth));
        let expected = format!(
            "{}any{}",
            "GodotArray<".repeat(MAX_ARRAY_DEPTH),
            ">".repeat(MAX_ARRAY_DEPTH)
        );
        assert_eq!(map_godot_type(&descriptor), expected);

        let padded = format!(" {descriptor} ");
        assert_eq!(map_godot_type(&padded), "GodotArray<any>");
    }
}
