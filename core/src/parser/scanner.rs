//! Tokenizer for the expression language.
//!
//! The scanner hands out one token at a time. Identifier text is copied into a
//! reusable scratch buffer so the parser can resolve it without allocating per
//! token.

use alloc::string::ToString;

use crate::String;
use crate::parser::{ParseError, ParseErrorKind, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plus,
    Minus,
    Star,
    Slash,
    OpenParen,
    CloseParen,
    /// Decimal literal, already range checked.
    Int(i64),
    /// Identifier; the text lives in [`Scanner::ident`].
    Ident,
    Eof,
}

impl TokenKind {
    /// Human readable name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Ident => "identifier",
            TokenKind::Eof => "end of input",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub struct Scanner<'src> {
    source: &'src str,
    pos: usize,
    ident: String,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            ident: String::new(),
        }
    }

    /// Text of the most recently scanned identifier.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia();

        let bytes = self.source.as_bytes();
        let start = self.pos;
        let Some(&byte) = bytes.get(start) else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::empty(start),
            });
        };

        let kind = match byte {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'0'..=b'9' => return self.scan_integer(start),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => return self.scan_identifier(start),
            _ => return Err(self.illegal_character(start)),
        };

        self.pos += 1;
        Ok(Token {
            kind,
            span: Span::new(start, self.pos),
        })
    }

    /// Skips whitespace and `#` comments running to the end of the line.
    fn skip_trivia(&mut self) {
        let bytes = self.source.as_bytes();
        loop {
            match bytes.get(self.pos) {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'#') => {
                    while bytes.get(self.pos).is_some_and(|&b| b != b'\n') {
                        self.pos += 1;
                    }
                }
                _ => return,
            }
        }
    }

    fn scan_integer(&mut self, start: usize) -> Result<Token, ParseError> {
        let bytes = self.source.as_bytes();
        let mut value: Option<i64> = Some(0);
        while let Some(&digit @ b'0'..=b'9') = bytes.get(self.pos) {
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(i64::from(digit - b'0')));
            self.pos += 1;
        }

        let span = Span::new(start, self.pos);
        match value {
            Some(value) => Ok(Token {
                kind: TokenKind::Int(value),
                span,
            }),
            None => Err(self.error(ParseErrorKind::ValueOutOfRange, span)),
        }
    }

    fn scan_identifier(&mut self, start: usize) -> Result<Token, ParseError> {
        let bytes = self.source.as_bytes();
        while let Some(b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_') = bytes.get(self.pos) {
            self.pos += 1;
        }

        let span = Span::new(start, self.pos);
        let text = span.str_of(self.source);
        self.ident.clear();
        if self.ident.try_reserve(text.len()).is_err() {
            return Err(self.error(ParseErrorKind::OutOfMemory, span));
        }
        self.ident.push_str(text);

        Ok(Token {
            kind: TokenKind::Ident,
            span,
        })
    }

    fn illegal_character(&self, start: usize) -> ParseError {
        // Everything consumed so far is ASCII, so `start` sits on a char boundary.
        let found = self.source[start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        let span = Span::new(start, start + found.len_utf8());
        self.error(ParseErrorKind::IllegalCharacter { found }, span)
    }

    fn error(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, self.source.to_string(), span)
    }
}

/// Whether `name` is spelled like an identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b'A'..=b'Z' | b'a'..=b'z' | b'_') => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
