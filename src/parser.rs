//! Recursive-descent parser for xCDN.
//!
//! The parser pulls tokens through a one-slot lookahead buffer and builds
//! the document model. Exactly one decision needs two tokens of effective
//! lookahead: at the document root, `key :` selects an implicit top-level
//! object over a stream of values. The root handles it by consuming the
//! candidate key and peeking the next token.
//!
//! Errors are fail-fast: the first failure unwinds through `?`, dropping
//! every partially built structure, and no partial document is surfaced.

use crate::error::{ErrorKind, ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::{Annotation, Document, Node, Value};
use indexmap::IndexMap;

/// Parse an xCDN document from a string.
pub(crate) fn parse_document(input: &str) -> Result<Document> {
    Parser::new(input).document()
}

// ============================================================================
// Base64 / UUID validation
// ============================================================================

fn base64_value(b: u8) -> Option<u32> {
    match b {
        b'A'..=b'Z' => Some(u32::from(b - b'A')),
        b'a'..=b'z' => Some(u32::from(b - b'a') + 26),
        b'0'..=b'9' => Some(u32::from(b - b'0') + 52),
        // URL-safe variants share the last two slots.
        b'+' | b'-' => Some(62),
        b'/' | b'_' => Some(63),
        _ => None,
    }
}

/// Decode a base64 body leniently: `=` anywhere and embedded space/CR/LF
/// are skipped, missing padding is tolerated. Any other byte outside the
/// alphabet fails.
pub(crate) fn decode_base64(input: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() / 4 * 3 + 3);
    let mut accum: u32 = 0;
    let mut bits = 0u32;
    for &b in input.as_bytes() {
        if matches!(b, b'=' | b' ' | b'\n' | b'\r') {
            continue;
        }
        accum = (accum << 6) | base64_value(b)?;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push(((accum >> bits) & 0xFF) as u8);
        }
    }
    Some(out)
}

/// Surface form only: 8-4-4-4-12 hex digit groups. No version or variant
/// check.
fn is_valid_uuid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

// ============================================================================
// Parser state
// ============================================================================

struct Parser<'a> {
    lexer: Lexer<'a>,
    look: Option<Token>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            look: None,
        }
    }

    fn bump(&mut self) -> Result<Token> {
        match self.look.take() {
            Some(tok) => Ok(tok),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<&TokenKind> {
        if self.look.is_none() {
            self.look = Some(self.lexer.next_token()?);
        }
        // The slot was filled above.
        Ok(&self.look.as_ref().unwrap().kind)
    }

    /// Consume a separator comma when present.
    fn eat_comma(&mut self) -> Result<()> {
        if matches!(self.peek()?, TokenKind::Comma) {
            self.bump()?;
        }
        Ok(())
    }

    fn expect_colon(&mut self) -> Result<()> {
        let tok = self.bump()?;
        match tok.kind {
            TokenKind::Colon => Ok(()),
            kind => Err(ParseError::new(
                ErrorKind::Expected,
                tok.span,
                format!("expected \":\", found {}", kind),
            )),
        }
    }

    fn ident(&mut self) -> Result<String> {
        let tok = self.bump()?;
        match tok.kind {
            TokenKind::Ident(name) => Ok(name),
            kind => Err(ParseError::new(
                ErrorKind::Expected,
                tok.span,
                format!("expected identifier, found {}", kind),
            )),
        }
    }

    /// An object key: an identifier or a quoted string.
    fn key(&mut self) -> Result<String> {
        let tok = self.bump()?;
        match tok.kind {
            TokenKind::Ident(key) | TokenKind::Str(key) => Ok(key),
            kind => Err(ParseError::new(
                ErrorKind::Expected,
                tok.span,
                format!("expected object key, found {}", kind),
            )),
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    fn value(&mut self) -> Result<Value> {
        let tok = self.bump()?;
        match tok.kind {
            TokenKind::LBrace => self.object(),
            TokenKind::LBracket => self.array(),
            TokenKind::Str(s) | TokenKind::TripleStr(s) => Ok(Value::String(s)),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::Int(n) => Ok(Value::Int(n)),
            TokenKind::Float(x) => Ok(Value::Float(x)),
            // Decimal, datetime, and duration bodies are lenient and kept
            // verbatim.
            TokenKind::Decimal(s) => Ok(Value::Decimal(s)),
            TokenKind::DateTime(s) => Ok(Value::DateTime(s)),
            TokenKind::Duration(s) => Ok(Value::Duration(s)),
            TokenKind::Uuid(s) => {
                if !is_valid_uuid(&s) {
                    return Err(ParseError::new(
                        ErrorKind::InvalidUuid,
                        tok.span,
                        format!("invalid UUID: {}", s),
                    ));
                }
                Ok(Value::Uuid(s))
            }
            TokenKind::Bytes(s) => match decode_base64(&s) {
                Some(bytes) => Ok(Value::Bytes(bytes)),
                None => Err(ParseError::new(
                    ErrorKind::InvalidBase64,
                    tok.span,
                    format!("invalid base64: {}", s),
                )),
            },
            kind => Err(ParseError::new(
                ErrorKind::Expected,
                tok.span,
                format!("expected value, found {}", kind),
            )),
        }
    }

    /// Object body, the `{` already consumed.
    fn object(&mut self) -> Result<Value> {
        let mut entries = IndexMap::new();
        loop {
            if matches!(self.peek()?, TokenKind::RBrace) {
                self.bump()?;
                break;
            }
            let key = self.key()?;
            self.expect_colon()?;
            let node = self.node()?;
            // Duplicate keys: last write wins, original position kept.
            entries.insert(key, node);
            self.eat_comma()?;
        }
        Ok(Value::Object(entries))
    }

    /// Array body, the `[` already consumed.
    fn array(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            if matches!(self.peek()?, TokenKind::RBracket) {
                self.bump()?;
                break;
            }
            items.push(self.node()?);
            self.eat_comma()?;
        }
        Ok(Value::Array(items))
    }

    // ========================================================================
    // Nodes and decorations
    // ========================================================================

    /// A value preceded by any number of `@annotation(args)` and `#tag`
    /// decorations.
    fn node(&mut self) -> Result<Node> {
        let mut tags = Vec::new();
        let mut annotations = Vec::new();

        loop {
            match self.peek()? {
                TokenKind::At => {
                    self.bump()?;
                    let mut annotation = Annotation::new(self.ident()?);
                    if matches!(self.peek()?, TokenKind::LParen) {
                        self.bump()?;
                        self.annotation_args(&mut annotation)?;
                    }
                    annotations.push(annotation);
                }
                TokenKind::Hash => {
                    self.bump()?;
                    tags.push(self.ident()?);
                }
                _ => break,
            }
        }

        let value = self.value()?;
        Ok(Node {
            tags,
            annotations,
            value,
        })
    }

    /// Argument list body, the `(` already consumed. Arguments are plain
    /// values; decorations are not allowed inside.
    fn annotation_args(&mut self, annotation: &mut Annotation) -> Result<()> {
        if matches!(self.peek()?, TokenKind::RParen) {
            self.bump()?;
            return Ok(());
        }
        loop {
            annotation.push_arg(self.value()?);
            let tok = self.bump()?;
            match tok.kind {
                TokenKind::Comma => {
                    // A trailing comma may close the list.
                    if matches!(self.peek()?, TokenKind::RParen) {
                        self.bump()?;
                        return Ok(());
                    }
                }
                TokenKind::RParen => return Ok(()),
                kind => {
                    return Err(ParseError::new(
                        ErrorKind::Expected,
                        tok.span,
                        format!("expected \",\" or \")\", found {}", kind),
                    ));
                }
            }
        }
    }

    // ========================================================================
    // Document root
    // ========================================================================

    fn document(&mut self) -> Result<Document> {
        let mut doc = Document::new();

        // Optional prolog: $ident: node, commas optional.
        while matches!(self.peek()?, TokenKind::Dollar) {
            self.bump()?;
            let name = self.ident()?;
            self.expect_colon()?;
            // Decorations on a directive value are discarded.
            let Node { value, .. } = self.node()?;
            doc.push_directive(name, value);
            self.eat_comma()?;
        }

        match self.peek()? {
            TokenKind::Eof => {}
            TokenKind::Ident(_) | TokenKind::Str(_) => {
                // The implicit-object decision: consume the candidate key,
                // then peek for the colon.
                let tok = self.bump()?;
                let colon_follows = matches!(self.peek()?, TokenKind::Colon);
                match (tok.kind, colon_follows) {
                    (TokenKind::Ident(key), true) | (TokenKind::Str(key), true) => {
                        self.bump()?;
                        self.implicit_object(&mut doc, key)?;
                    }
                    (TokenKind::Str(text), false) => {
                        // A bare string starts a stream of values.
                        doc.push_value(Node::new(Value::String(text)));
                        self.stream(&mut doc)?;
                    }
                    (TokenKind::Ident(name), false) => {
                        return Err(ParseError::new(
                            ErrorKind::Expected,
                            tok.span,
                            format!("expected ':' after top-level key '{}'", name),
                        ));
                    }
                    (kind, _) => {
                        return Err(ParseError::new(
                            ErrorKind::Expected,
                            tok.span,
                            format!("expected object key, found {}", kind),
                        ));
                    }
                }
            }
            _ => self.stream(&mut doc)?,
        }

        Ok(doc)
    }

    /// Entries of an implicit top-level object, the first key and its colon
    /// already consumed. Runs to end of input; stray commas are ignored.
    fn implicit_object(&mut self, doc: &mut Document, first_key: String) -> Result<()> {
        let mut entries = IndexMap::new();
        let node = self.node()?;
        entries.insert(first_key, node);

        loop {
            match self.peek()? {
                TokenKind::Comma => {
                    self.bump()?;
                }
                TokenKind::Ident(_) | TokenKind::Str(_) => {
                    let key = self.key()?;
                    self.expect_colon()?;
                    let node = self.node()?;
                    entries.insert(key, node);
                }
                TokenKind::Eof => break,
                _ => {
                    let tok = self.bump()?;
                    return Err(ParseError::new(
                        ErrorKind::Expected,
                        tok.span,
                        format!("expected object key, found {}", tok.kind),
                    ));
                }
            }
        }

        doc.push_value(Node::new(Value::Object(entries)));
        Ok(())
    }

    /// A stream of nodes up to end of input.
    fn stream(&mut self, doc: &mut Document) -> Result<()> {
        while !matches!(self.peek()?, TokenKind::Eof) {
            let node = self.node()?;
            doc.push_value(node);
        }
        Ok(())
    }
}
