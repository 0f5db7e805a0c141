//! Lexer for the aaa language
//!
//! Token recognition is generated by logos; this module walks the source
//! alongside it to attach line/column positions to every token.

mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::{Position, Span};
use crate::diagnostics::{Error, SourceFile};
use logos::Logos;
use std::str::Chars;

/// Lex a source file into tokens, ending with a single `Eof`
///
/// Fails on the first character that cannot start a token.
pub fn lex(file: &SourceFile) -> Result<Vec<Token>, Error> {
    let source: &str = &file.content;
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let start = cursor.advance_to(range.start);
        let end = cursor.advance_to(range.end);
        let span = Span::new(start, end);

        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                span,
                text: lexer.slice().to_string(),
            }),
            Err(()) => {
                // Report only the first offending character
                let ch = lexer.slice().chars().next().unwrap_or_default();
                let span = Span::new(start, start.advance(ch));
                tracing::debug!("illegal character {:?} at {}", ch, start);
                return Err(Error::illegal_character(file, span, ch.to_string()));
            }
        }
    }

    let end = cursor.advance_to(source.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::point(end),
        text: String::new(),
    });

    tracing::trace!("lexed {} tokens from {}", tokens.len(), file.name);
    Ok(tokens)
}

/// Tracks the position of a byte offset, one character at a time
struct Cursor<'a> {
    chars: Chars<'a>,
    pos: Position,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            pos: Position::start(),
        }
    }

    /// Move forward to byte `offset`; offsets must be non-decreasing
    fn advance_to(&mut self, offset: usize) -> Position {
        while self.pos.index < offset {
            match self.chars.next() {
                Some(ch) => self.pos = self.pos.advance(ch),
                None => break,
            }
        }
        self.pos
    }
}
