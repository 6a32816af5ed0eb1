//! xCDN (eXtensible Cognitive Data Notation) parser and serializer.
//!
//! xCDN is a human-first, machine-optimised configuration notation: a
//! JSON-like syntax with an optional prolog of `$name: value` directives,
//! implicit top-level objects, unquoted keys, optional commas, comments,
//! triple-quoted strings, typed string literals (`d"…"` decimal, `b"…"`
//! base64 bytes, `u"…"` UUID, `t"…"` RFC3339 datetime, `r"…"` ISO8601
//! duration), and per-value decorations (`#tag`, `@annotation(args)`).
//!
//! # Parsing Pipeline
//!
//! 1. **Lexer**: tokenizes the source byte by byte, skipping whitespace and
//!    comments while tracking line/column positions.
//!
//! 2. **Parser**: recursive descent over a one-token lookahead slot,
//!    building the document model.
//!
//! 3. **Encoder**: walks the model and emits pretty or compact text that
//!    parses back to an equal document.
//!
//! # Example
//!
//! ```
//! use libxcdn::{parse, to_string_pretty};
//!
//! let doc = parse("$version: 1, server: { host: \"localhost\", port: 8080 }").unwrap();
//! assert_eq!(doc.prolog[0].name, "version");
//! assert_eq!(
//!     doc.get_path("server.port").and_then(|n| n.value.as_int()),
//!     Some(8080)
//! );
//!
//! let text = to_string_pretty(&doc);
//! assert_eq!(parse(&text).unwrap(), doc);
//! ```

mod encode;
mod error;
mod lexer;
mod parser;
mod value;

pub use encode::{encode, to_string_compact, to_string_pretty, Format};
pub use error::{ErrorKind, ParseError, Result, Span};
pub use lexer::{Lexer, Token, TokenKind};
pub use value::{Annotation, Directive, Document, Node, Value};

/// Parse an xCDN document from a string.
///
/// Fails fast on the first error; no partial document is returned.
///
/// # Example
///
/// ```
/// use libxcdn::parse;
///
/// let doc = parse("answer: 42").unwrap();
/// assert_eq!(doc.get_key("answer").and_then(|n| n.value.as_int()), Some(42));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parser::parse_document(input)
}
