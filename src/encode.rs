//! Serialize xCDN documents to text.
//!
//! The emitter walks the document model and produces a re-parseable
//! rendering. A [`Format`] selects pretty (indented, one entry per line) or
//! compact output and controls trailing commas. Comments and original
//! whitespace are not part of the model and are not reproduced.

use crate::lexer::{is_ident_part, is_ident_start};
use crate::value::{Annotation, Document, Node, Value};

/// Formatting options for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Pretty-print with indentation and newlines.
    pub pretty: bool,
    /// Indentation width in spaces.
    pub indent: usize,
    /// Emit trailing commas where allowed.
    pub trailing_commas: bool,
}

impl Default for Format {
    /// Pretty, two-space indent, trailing commas.
    fn default() -> Self {
        Format {
            pretty: true,
            indent: 2,
            trailing_commas: true,
        }
    }
}

impl Format {
    /// Single-line output without trailing commas.
    pub fn compact() -> Self {
        Format {
            pretty: false,
            indent: 0,
            trailing_commas: false,
        }
    }
}

/// Serialize a document with the given format.
pub fn encode(doc: &Document, format: Format) -> String {
    let mut out = String::new();

    for (i, directive) in doc.prolog.iter().enumerate() {
        if i > 0 && format.pretty {
            out.push('\n');
        }
        out.push('$');
        out.push_str(&directive.name);
        out.push_str(": ");
        write_value(&mut out, &directive.value, format, 0);
        if format.trailing_commas {
            out.push(',');
        }
        out.push('\n');
    }

    for (i, node) in doc.values.iter().enumerate() {
        if i > 0 && format.pretty {
            out.push('\n');
        }
        write_node(&mut out, node, format, 0);
        if i + 1 < doc.values.len() && format.pretty {
            out.push('\n');
        }
    }

    out
}

/// Serialize a document with the default pretty format.
pub fn to_string_pretty(doc: &Document) -> String {
    encode(doc, Format::default())
}

/// Serialize a document with the compact format.
pub fn to_string_compact(doc: &Document) -> String {
    encode(doc, Format::compact())
}

// =============================================================================
// Nodes and decorations
// =============================================================================

fn write_node(out: &mut String, node: &Node, format: Format, depth: usize) {
    for annotation in &node.annotations {
        write_annotation(out, annotation);
        out.push(' ');
    }
    for tag in &node.tags {
        out.push('#');
        out.push_str(tag);
        out.push(' ');
    }
    write_value(out, &node.value, format, depth);
}

fn write_annotation(out: &mut String, annotation: &Annotation) {
    out.push('@');
    out.push_str(&annotation.name);
    if !annotation.args.is_empty() {
        out.push('(');
        for (i, arg) in annotation.args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            // Arguments render compact whatever the outer format.
            write_value(out, arg, Format::compact(), 0);
        }
        out.push(')');
    }
}

// =============================================================================
// Values
// =============================================================================

fn write_value(out: &mut String, value: &Value, format: Format, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::String(s) => write_escaped_string(out, s),
        // Typed bodies are emitted verbatim between their quote wrappers.
        Value::Decimal(s) => write_typed(out, 'd', s),
        Value::DateTime(s) => write_typed(out, 't', s),
        Value::Duration(s) => write_typed(out, 'r', s),
        Value::Uuid(s) => write_typed(out, 'u', s),
        Value::Bytes(data) => {
            out.push_str("b\"");
            write_base64(out, data);
            out.push('"');
        }
        Value::Array(items) => {
            out.push('[');
            if format.pretty && !items.is_empty() {
                out.push('\n');
            }
            for (i, node) in items.iter().enumerate() {
                if format.pretty {
                    write_indent(out, depth + 1, format.indent);
                }
                write_node(out, node, format, depth + 1);
                write_separator(out, format, i + 1 == items.len());
            }
            if format.pretty && !items.is_empty() {
                write_indent(out, depth, format.indent);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            if format.pretty && !entries.is_empty() {
                out.push('\n');
            }
            for (i, (key, node)) in entries.iter().enumerate() {
                if format.pretty {
                    write_indent(out, depth + 1, format.indent);
                }
                write_key(out, key);
                out.push_str(": ");
                write_node(out, node, format, depth + 1);
                write_separator(out, format, i + 1 == entries.len());
            }
            if format.pretty && !entries.is_empty() {
                write_indent(out, depth, format.indent);
            }
            out.push('}');
        }
    }
}

/// Entry separator: `,` between entries (with a space in compact layout),
/// the final comma only when trailing commas are on.
fn write_separator(out: &mut String, format: Format, last: bool) {
    if !last {
        out.push(',');
        if !format.pretty {
            out.push(' ');
        }
    } else if format.trailing_commas {
        out.push(',');
    }
    if format.pretty {
        out.push('\n');
    }
}

fn write_indent(out: &mut String, depth: usize, width: usize) {
    for _ in 0..depth * width {
        out.push(' ');
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        // Non-finite floats have no source form; this rendering is not
        // re-parseable.
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "infinity".to_string()
        } else {
            "-infinity".to_string()
        }
    } else {
        let s = format!("{}", f);
        if s.contains('.') || s.contains('e') {
            s
        } else {
            // Keep the text float-shaped so it re-lexes as a float.
            format!("{}.0", s)
        }
    }
}

// =============================================================================
// Strings and keys
// =============================================================================

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_typed(out: &mut String, prefix: char, body: &str) {
    out.push(prefix);
    out.push('"');
    out.push_str(body);
    out.push('"');
}

/// A key emits bare when it matches the identifier production; keywords are
/// reserved and must be quoted.
fn is_simple_ident(s: &str) -> bool {
    if matches!(s, "true" | "false" | "null") {
        return false;
    }
    match s.as_bytes().split_first() {
        Some((&first, rest)) => {
            is_ident_start(first) && rest.iter().copied().all(is_ident_part)
        }
        None => false,
    }
}

fn write_key(out: &mut String, key: &str) {
    if is_simple_ident(key) {
        out.push_str(key);
    } else {
        write_escaped_string(out, key);
    }
}

// =============================================================================
// Base64
// =============================================================================

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn write_base64(out: &mut String, data: &[u8]) {
    for chunk in data.chunks(3) {
        let n = (u32::from(chunk[0]) << 16)
            | (u32::from(chunk.get(1).copied().unwrap_or(0)) << 8)
            | u32::from(chunk.get(2).copied().unwrap_or(0));
        out.push(BASE64_CHARS[(n >> 18 & 0x3F) as usize] as char);
        out.push(BASE64_CHARS[(n >> 12 & 0x3F) as usize] as char);
        if chunk.len() > 1 {
            out.push(BASE64_CHARS[(n >> 6 & 0x3F) as usize] as char);
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(BASE64_CHARS[(n & 0x3F) as usize] as char);
        } else {
            out.push('=');
        }
    }
}
