//! Common utilities for declaration generation.
//!
//! This module provides shared helper functions used across normalization and emission.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::types::TsDoc;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Check if a name needs quoting to be used as a property key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in JavaScript/TypeScript string literals.
/// Escapes backslashes and double quotes.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property or enum member name if it is not a plain identifier.
/// Godot property paths such as `theme_override_colors/font_color` end up
/// quoted.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Turn a name into something usable as a binding identifier (parameter,
/// function or enum name).
/// - Replaces characters that are not valid in identifiers with `_`
/// - Prepends `_` if it starts with a digit
/// - Appends `_` to reserved words
pub fn sanitize_identifier(name: &str) -> String {
    if name.is_empty() {
        return "_empty".to_string();
    }

    let mut result: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result.push('_');
    }

    result
}

/// Prefix every non-empty line of `text` with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            output.push_str(prefix);
        }
        output.push_str(line);
    }
    output
}

/// Build a doc comment from the brief and long descriptions the engine ships
/// with its API dump. Returns `None` when both are absent or blank.
pub fn make_doc(brief: Option<&str>, description: Option<&str>) -> Option<TsDoc> {
    let mut lines = Vec::new();

    for text in [brief, description].into_iter().flatten() {
        let text = bbcode_to_markdown(text.trim());
        if text.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(text.lines().map(|line| line.trim_end().to_string()));
    }

    let doc = TsDoc { lines };
    (!doc.is_empty()).then_some(doc)
}

/// Convert the engine's BBCode documentation markup into Markdown suitable
/// for JSDoc.
///
/// - `[code]x[/code]`, `[param x]`, `[member x]`, `[method x]` and friends become `` `x` ``
/// - `[b]`/`[i]` become `**`/`*`
/// - `[br]` becomes a line break
/// - `[ClassName]` becomes `{@link ClassName}`
/// - unknown tags are kept as written
///
/// Comment terminators are escaped so the result can sit inside `/** */`.
pub fn bbcode_to_markdown(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            output.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = &after[..close];
        output.push_str(&render_tag(tag));
        rest = &after[close + 1..];
    }
    output.push_str(rest);

    output.replace("*/", "*\\/")
}

fn render_tag(tag: &str) -> String {
    const REFERENCE_TAGS: [&str; 8] = [
        "param",
        "member",
        "method",
        "signal",
        "constant",
        "enum",
        "annotation",
        "constructor",
    ];

    match tag {
        "code" | "/code" | "kbd" | "/kbd" => "`".to_string(),
        "b" | "/b" => "**".to_string(),
        "i" | "/i" => "*".to_string(),
        "br" => "\n".to_string(),
        _ => {
            if let Some((kind, target)) = tag.split_once(' ')
                && REFERENCE_TAGS.contains(&kind)
            {
                return format!("`{}`", target.trim());
            }
            if is_class_reference(tag) {
                format!("{{@link {tag}}}")
            } else {
                format!("[{tag}]")
            }
        }
    }
}

fn is_class_reference(tag: &str) -> bool {
    tag.starts_with(|c: char| c.is_ascii_uppercase())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
