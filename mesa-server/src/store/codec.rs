//! Literal Store Codec
//!
//! Bidirectional mapping between a source-shaped text blob and a set of
//! named values. The blob is a sequence of declarations of the form
//!
//! ```text
//! export const menuItems: MenuItem[] = [ ... ];
//! ```
//!
//! where the literal is always a JSON value, because this codec is the
//! only writer. Decoding therefore locates the declaration, captures
//! the balanced bracketed literal with a small scanner (strings and
//! escapes respected, no regex over nested structure) and hands it to
//! serde_json. One corrupted export never breaks its siblings.

use serde_json::Value;
use std::collections::BTreeMap;

/// One export declaration in a logical file: its name, in declaration
/// order, plus an optional type annotation emitted on encode.
#[derive(Debug, Clone, Copy)]
pub struct ExportLayout {
    pub name: &'static str,
    pub type_annotation: Option<&'static str>,
}

/// A per-export decode failure, surfaced without aborting siblings.
#[derive(Debug, Clone)]
pub struct DecodeFailure {
    pub name: String,
    pub reason: String,
}

/// Result of decoding a blob: successfully parsed exports plus the
/// failures encountered. A missing export appears in neither map;
/// callers must treat absence distinctly from an empty collection.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    pub values: BTreeMap<String, Value>,
    pub failures: Vec<DecodeFailure>,
}

/// Decode every requested export from `source`.
pub fn decode(source: &str, names: &[&str]) -> DecodeOutcome {
    let mut outcome = DecodeOutcome::default();
    for &name in names {
        match locate_literal(source, name) {
            None => {}
            Some(Ok(literal)) => match serde_json::from_str::<Value>(literal) {
                Ok(value) => {
                    outcome.values.insert(name.to_string(), value);
                }
                Err(e) => outcome.failures.push(DecodeFailure {
                    name: name.to_string(),
                    reason: e.to_string(),
                }),
            },
            Some(Err(reason)) => outcome.failures.push(DecodeFailure {
                name: name.to_string(),
                reason,
            }),
        }
    }
    outcome
}

/// Encode `values` back into declaration form, in the fixed order given
/// by `layout`. Absent names are skipped. Output is deterministic:
/// 2-space indentation, sorted object keys (serde_json's default map),
/// one blank line between declarations.
pub fn encode(values: &BTreeMap<String, Value>, layout: &[ExportLayout]) -> String {
    let mut out = String::new();
    for export in layout {
        let Some(value) = values.get(export.name) else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("export const ");
        out.push_str(export.name);
        if let Some(ty) = export.type_annotation {
            out.push_str(": ");
            out.push_str(ty);
        }
        out.push_str(" = ");
        // Pretty printing of a Value cannot fail
        out.push_str(&serde_json::to_string_pretty(value).unwrap_or_default());
        out.push_str(";\n");
    }
    out
}

/// Locate the literal assigned to `export const <name>`.
///
/// Returns `None` when the declaration is missing, `Some(Err)` when it
/// is present but its literal is not balanced.
fn locate_literal<'a>(source: &'a str, name: &str) -> Option<Result<&'a str, String>> {
    const MARKER: &str = "export const ";
    for idx in declaration_starts(source) {
        let rest = &source[idx + MARKER.len()..];
        let ident_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        if &rest[..ident_len] != name {
            continue;
        }
        let mut tail = rest[ident_len..].trim_start();
        // Optional type annotation: everything up to the '=' sign
        if let Some(stripped) = tail.strip_prefix(':') {
            match stripped.find('=') {
                Some(eq) => tail = &stripped[eq..],
                None => return Some(Err("missing '=' after type annotation".to_string())),
            }
        }
        let Some(tail) = tail.strip_prefix('=') else {
            return Some(Err("missing '=' after declaration name".to_string()));
        };
        return Some(balanced_literal(tail.trim_start()));
    }
    None
}

/// Byte offsets of `export const ` markers in statement position: at
/// the start of a line (leading whitespace allowed) and outside any
/// string literal. A declaration quoted inside a data string is data,
/// never a statement, so it cannot shadow the real export.
fn declaration_starts(source: &str) -> Vec<usize> {
    const MARKER: &[u8] = b"export const ";
    let bytes = source.as_bytes();
    let mut starts = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut at_line_start = true;
    let mut i = 0;
    while i < bytes.len() {
        if in_string {
            match bytes[i] {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            i += 1;
            continue;
        }
        if at_line_start && bytes[i..].starts_with(MARKER) {
            starts.push(i);
            i += MARKER.len();
            at_line_start = false;
            continue;
        }
        match bytes[i] {
            b'"' => {
                in_string = true;
                at_line_start = false;
            }
            b'\n' => at_line_start = true,
            b' ' | b'\t' | b'\r' => {}
            _ => at_line_start = false,
        }
        i += 1;
    }
    starts
}

/// Capture the longest balanced `{...}` or `[...]` literal at the start
/// of `text`, respecting strings and escape sequences.
fn balanced_literal(text: &str) -> Result<&str, String> {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b'{') | Some(b'[') => {}
        _ => return Err("literal does not start with '{' or '['".to_string()),
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced closing bracket".to_string())?;
                if depth == 0 {
                    return Ok(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    Err("unterminated literal".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layout() -> Vec<ExportLayout> {
        vec![
            ExportLayout {
                name: "menuCategories",
                type_annotation: None,
            },
            ExportLayout {
                name: "menuItems",
                type_annotation: Some("MenuItem[]"),
            },
        ]
    }

    #[test]
    fn round_trip_preserves_values() {
        let mut values = BTreeMap::new();
        values.insert("menuCategories".to_string(), json!(["All", "Soups"]));
        values.insert(
            "menuItems".to_string(),
            json!([{
                "id": "1",
                "name": "Caldo verde",
                "price": "6,50 €",
                "nested": {"deep": [1, 2, {"x": null}]},
                "flags": [true, false]
            }]),
        );
        let text = encode(&values, &layout());
        let decoded = decode(&text, &["menuCategories", "menuItems"]);
        assert!(decoded.failures.is_empty());
        assert_eq!(decoded.values, values);
    }

    #[test]
    fn encode_is_deterministic_and_ordered() {
        let mut values = BTreeMap::new();
        values.insert("menuItems".to_string(), json!([]));
        values.insert("menuCategories".to_string(), json!(["All"]));
        let a = encode(&values, &layout());
        let b = encode(&values, &layout());
        assert_eq!(a, b);
        // Declaration order follows the layout, not the map order
        assert!(a.find("menuCategories").unwrap() < a.find("menuItems").unwrap());
        assert!(a.contains("export const menuItems: MenuItem[] = "));
    }

    #[test]
    fn strings_containing_brackets_and_semicolons_survive() {
        let mut values = BTreeMap::new();
        values.insert(
            "menuCategories".to_string(),
            json!(["a } tricky ]; one", "quote \" and \\ backslash"]),
        );
        let text = encode(&values, &layout());
        let decoded = decode(&text, &["menuCategories"]);
        assert!(decoded.failures.is_empty());
        assert_eq!(decoded.values, values);
    }

    #[test]
    fn missing_export_is_absent_not_empty() {
        let text = "export const menuCategories = [\n  \"All\"\n];\n";
        let decoded = decode(text, &["menuCategories", "menuItems"]);
        assert!(decoded.values.contains_key("menuCategories"));
        assert!(!decoded.values.contains_key("menuItems"));
        assert!(decoded.failures.is_empty());
    }

    #[test]
    fn broken_export_does_not_abort_siblings() {
        let text = "export const menuCategories = [\"All\", \"Soups\"];\n\n\
                    export const menuItems: MenuItem[] = [ { broken ;\n";
        let decoded = decode(text, &["menuCategories", "menuItems"]);
        assert_eq!(
            decoded.values.get("menuCategories"),
            Some(&json!(["All", "Soups"]))
        );
        assert!(!decoded.values.contains_key("menuItems"));
        assert_eq!(decoded.failures.len(), 1);
        assert_eq!(decoded.failures[0].name, "menuItems");
    }

    #[test]
    fn declaration_text_inside_a_string_is_data_not_a_statement() {
        // An admin-entered string quoting the file's own syntax must not
        // shadow the real declaration further down
        let mut values = BTreeMap::new();
        values.insert(
            "menuCategories".to_string(),
            json!(["All", "export const menuItems = [9];"]),
        );
        values.insert("menuItems".to_string(), json!([{"id": "1"}]));
        let text = encode(&values, &layout());
        let decoded = decode(&text, &["menuCategories", "menuItems"]);
        assert!(decoded.failures.is_empty());
        assert_eq!(decoded.values, values);
    }

    #[test]
    fn indented_declarations_are_still_found() {
        let text = "  export const menuCategories = [\"All\"];\n";
        let decoded = decode(text, &["menuCategories"]);
        assert_eq!(decoded.values.get("menuCategories"), Some(&json!(["All"])));
    }

    #[test]
    fn prefix_named_export_is_not_confused() {
        // "menuItemsArchive" must not satisfy a lookup for "menuItems"
        let text = "export const menuItemsArchive = [1, 2];\n\
                    export const menuItems = [3];\n";
        let decoded = decode(text, &["menuItems"]);
        assert_eq!(decoded.values.get("menuItems"), Some(&json!([3])));
    }

    #[test]
    fn repeated_round_trips_converge() {
        let mut values = BTreeMap::new();
        values.insert("menuCategories".to_string(), json!(["All", "Wine"]));
        let once = encode(&values, &layout());
        let twice = encode(&decode(&once, &["menuCategories"]).values, &layout());
        assert_eq!(once, twice);
    }
}
