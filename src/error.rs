//! Error types for xCDN parsing.

use std::fmt;
use thiserror::Error;

/// Result type for xCDN parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A source location: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Zero-based byte offset into the source.
    pub offset: usize,
    /// One-based line number.
    pub line: usize,
    /// One-based column number. Columns count bytes, not characters.
    pub column: usize,
}

impl Span {
    /// The start of a document (offset 0, line 1, column 1).
    pub fn start() -> Self {
        Span {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Create a span with explicit values.
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Span {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The closed set of error categories.
///
/// The kind is the machine-discriminable part of a [`ParseError`]; the
/// message is formatted for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input ended inside an unfinished construct.
    UnexpectedEof,
    /// A byte that cannot start any token.
    InvalidToken,
    /// A syntactically valid token in the wrong place.
    Expected,
    /// A malformed string escape sequence.
    InvalidEscape,
    /// A malformed or out-of-range number literal.
    InvalidNumber,
    /// A malformed decimal literal.
    InvalidDecimal,
    /// A malformed RFC3339 datetime literal.
    InvalidDateTime,
    /// A malformed ISO8601 duration literal.
    InvalidDuration,
    /// A malformed UUID literal.
    InvalidUuid,
    /// A malformed base64 bytes literal.
    InvalidBase64,
    /// A generic error carrying only a message.
    Message,
    /// An allocation failure.
    OutOfMemory,
}

impl ErrorKind {
    /// A short human-readable phrase for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedEof => "unexpected end of input",
            ErrorKind::InvalidToken => "invalid token",
            ErrorKind::Expected => "unexpected token",
            ErrorKind::InvalidEscape => "invalid escape sequence",
            ErrorKind::InvalidNumber => "invalid number literal",
            ErrorKind::InvalidDecimal => "invalid decimal literal",
            ErrorKind::InvalidDateTime => "invalid RFC3339 datetime",
            ErrorKind::InvalidDuration => "invalid ISO8601 duration",
            ErrorKind::InvalidUuid => "invalid UUID",
            ErrorKind::InvalidBase64 => "invalid base64 encoding",
            ErrorKind::Message => "error",
            ErrorKind::OutOfMemory => "out of memory",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for xCDN parsing.
///
/// Carries the error category, the span of the offending input, and a
/// formatted message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
}

impl ParseError {
    /// Create an error with a kind, span, and message.
    pub fn new(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            span,
            message: message.into(),
        }
    }
}
