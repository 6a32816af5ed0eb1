//! Tokenizer for xCDN.
//!
//! The lexer walks the source byte by byte, producing one token per call.
//! It skips whitespace and `//` / `/* */` comments between tokens, tracks a
//! byte offset and 1-based line/column cursor, and recognises the typed
//! string prefixes `d" b" u" t" r"` with one byte of lookahead. Columns
//! advance per byte; multi-byte UTF-8 sequences pass through string content
//! verbatim.

use crate::error::{ErrorKind, ParseError, Result, Span};
use std::fmt;

/// Token kind, carrying the decoded payload where the token has one.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `$`
    Dollar,
    /// `#`
    Hash,
    /// `@`
    At,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// An identifier that is not a keyword.
    Ident(String),
    /// A signed 64-bit integer literal.
    Int(i64),
    /// A 64-bit float literal.
    Float(f64),
    /// A double-quoted string, with `\"` and `\\` decoded.
    Str(String),
    /// A `"""..."""` string, verbatim.
    TripleStr(String),
    /// `d"..."` decimal body, verbatim.
    Decimal(String),
    /// `b"..."` base64 body, verbatim (decoded later by the parser).
    Bytes(String),
    /// `u"..."` UUID body, verbatim (validated later by the parser).
    Uuid(String),
    /// `t"..."` RFC3339 datetime body, verbatim.
    DateTime(String),
    /// `r"..."` ISO8601 duration body, verbatim.
    Duration(String),
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dollar => "$",
            TokenKind::Hash => "#",
            TokenKind::At => "@",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Str(_) => "string",
            TokenKind::TripleStr(_) => "\"\"\"string\"\"\"",
            TokenKind::Decimal(_) => "d\"...\"",
            TokenKind::Bytes(_) => "b\"...\"",
            TokenKind::Uuid(_) => "u\"...\"",
            TokenKind::DateTime(_) => "t\"...\"",
            TokenKind::Duration(_) => "r\"...\"",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A token with the span of its first byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit() || b == b'-'
}

/// Lexer state over a borrowed source string.
pub struct Lexer<'a> {
    src: &'a str,
    idx: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            idx: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.idx).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.idx + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.idx += 1;
        if b == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(b)
    }

    fn span(&self) -> Span {
        Span::new(self.idx, self.line, self.col)
    }

    fn skip_ws_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                self.bump();
            }
            match (self.peek(), self.peek_at(1)) {
                (Some(b'/'), Some(b'/')) => {
                    self.bump();
                    self.bump();
                    while let Some(c) = self.bump() {
                        if c == b'\n' {
                            break;
                        }
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    self.bump();
                    self.bump();
                    // The terminator is optional at end of input.
                    while let Some(c) = self.bump() {
                        if c == b'*' && self.peek() == Some(b'/') {
                            self.bump();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Read a `"..."` string body, cursor on the opening quote.
    ///
    /// With `decode`, the escapes `\"` and `\\` are reduced to their literal
    /// character; all other recognised escapes are kept as their source text
    /// (this is the plain-string mode). Without `decode`, every escape is
    /// kept verbatim (typed-literal bodies). Escape validation applies in
    /// both modes.
    fn read_string(&mut self, decode: bool) -> Result<String> {
        let start = self.span();
        self.bump();
        let mut out = String::new();
        let mut seg = self.idx;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::new(
                        ErrorKind::UnexpectedEof,
                        start,
                        "unterminated string",
                    ));
                }
                Some(b'"') => {
                    out.push_str(&self.src[seg..self.idx]);
                    self.bump();
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.src[seg..self.idx]);
                    self.bump();
                    let esc = self.bump().ok_or_else(|| {
                        ParseError::new(
                            ErrorKind::InvalidEscape,
                            start,
                            "incomplete escape at end of input",
                        )
                    })?;
                    match esc {
                        b'"' if decode => out.push('"'),
                        b'\\' if decode => out.push('\\'),
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                            out.push('\\');
                            out.push(esc as char);
                        }
                        b'u' => {
                            out.push_str("\\u");
                            for _ in 0..4 {
                                match self.bump() {
                                    Some(h) if h.is_ascii_hexdigit() => out.push(h as char),
                                    _ => {
                                        return Err(ParseError::new(
                                            ErrorKind::InvalidEscape,
                                            start,
                                            "invalid \\uXXXX escape",
                                        ));
                                    }
                                }
                            }
                        }
                        other => {
                            return Err(ParseError::new(
                                ErrorKind::InvalidEscape,
                                start,
                                format!("unknown escape '\\{}'", other as char),
                            ));
                        }
                    }
                    seg = self.idx;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Read a `"""..."""` string body verbatim, cursor on the first quote.
    fn read_triple_string(&mut self) -> Result<String> {
        let start = self.span();
        self.bump();
        self.bump();
        self.bump();
        let body_start = self.idx;
        loop {
            if self.peek() == Some(b'"')
                && self.peek_at(1) == Some(b'"')
                && self.peek_at(2) == Some(b'"')
            {
                let body = self.src[body_start..self.idx].to_string();
                self.bump();
                self.bump();
                self.bump();
                return Ok(body);
            }
            if self.bump().is_none() {
                return Err(ParseError::new(
                    ErrorKind::UnexpectedEof,
                    start,
                    "unterminated triple-quoted string",
                ));
            }
        }
    }

    fn read_ident(&mut self) -> &'a str {
        let start = self.idx;
        self.bump();
        while self.peek().is_some_and(is_ident_part) {
            self.bump();
        }
        &self.src[start..self.idx]
    }

    fn read_number(&mut self) -> Result<TokenKind> {
        let start = self.idx;
        let mut has_dot = false;
        let mut has_exp = false;
        let mut has_digit = false;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.bump();
        }
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {
                    has_digit = true;
                    self.bump();
                }
                b'.' if !has_dot && !has_exp => {
                    has_dot = true;
                    self.bump();
                }
                b'e' | b'E' if !has_exp => {
                    has_exp = true;
                    self.bump();
                    if matches!(self.peek(), Some(b'+' | b'-')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        if !has_digit {
            return Err(ParseError::new(
                ErrorKind::InvalidNumber,
                self.span(),
                "no digits in number",
            ));
        }

        let text = &self.src[start..self.idx];
        if has_dot || has_exp {
            match text.parse::<f64>() {
                // Overflow to infinity is out of range for a literal.
                Ok(f) if f.is_finite() => Ok(TokenKind::Float(f)),
                _ => Err(ParseError::new(
                    ErrorKind::InvalidNumber,
                    self.span(),
                    format!("invalid float: {}", text),
                )),
            }
        } else {
            text.parse::<i64>().map(TokenKind::Int).map_err(|_| {
                ParseError::new(
                    ErrorKind::InvalidNumber,
                    self.span(),
                    format!("invalid integer: {}", text),
                )
            })
        }
    }

    /// Read and return the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_ws_and_comments();
        let start = self.span();

        let b = match self.peek() {
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    span: start,
                })
            }
            Some(b) => b,
        };

        // A triple quote wins over a plain opening quote.
        if b == b'"' && self.peek_at(1) == Some(b'"') && self.peek_at(2) == Some(b'"') {
            let body = self.read_triple_string()?;
            return Ok(Token {
                kind: TokenKind::TripleStr(body),
                span: start,
            });
        }

        let kind = match b {
            b'{' => {
                self.bump();
                TokenKind::LBrace
            }
            b'}' => {
                self.bump();
                TokenKind::RBrace
            }
            b'[' => {
                self.bump();
                TokenKind::LBracket
            }
            b']' => {
                self.bump();
                TokenKind::RBracket
            }
            b'(' => {
                self.bump();
                TokenKind::LParen
            }
            b')' => {
                self.bump();
                TokenKind::RParen
            }
            b':' => {
                self.bump();
                TokenKind::Colon
            }
            b',' => {
                self.bump();
                TokenKind::Comma
            }
            b'$' => {
                self.bump();
                TokenKind::Dollar
            }
            b'#' => {
                self.bump();
                TokenKind::Hash
            }
            b'@' => {
                self.bump();
                TokenKind::At
            }
            b'"' => TokenKind::Str(self.read_string(true)?),
            b'.' | b'+' | b'0'..=b'9' => self.read_number()?,
            b'-' => self.read_number()?,
            // Typed strings, checked before identifier recognition.
            b'd' | b'b' | b'u' | b't' | b'r' if self.peek_at(1) == Some(b'"') => {
                self.bump();
                let body = self.read_string(false)?;
                match b {
                    b'd' => TokenKind::Decimal(body),
                    b'b' => TokenKind::Bytes(body),
                    b'u' => TokenKind::Uuid(body),
                    b't' => TokenKind::DateTime(body),
                    _ => TokenKind::Duration(body),
                }
            }
            _ if is_ident_start(b) => match self.read_ident() {
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                "null" => TokenKind::Null,
                ident => TokenKind::Ident(ident.to_string()),
            },
            _ => {
                return Err(ParseError::new(
                    ErrorKind::InvalidToken,
                    start,
                    format!("unexpected character '{}' (0x{:02x})", b as char, b),
                ));
            }
        };

        Ok(Token { kind, span: start })
    }
}
