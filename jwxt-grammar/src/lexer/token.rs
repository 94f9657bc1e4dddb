//! Lexer token types

use std::fmt;

/// Token kinds of the class-time encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    /// `星期`
    Xingqi,
    /// `第`
    Di,
    /// `节`
    Jie,
    /// `周`
    Zhou,

    // Delimiters
    LBrace,
    RBrace,
    /// `(` or full-width `（`
    LParen,
    /// `)` or full-width `）`
    RParen,
    /// `,` or full-width `，`
    Comma,
    Dash,

    // Literals
    Number(u32),
    /// Any other single character (weekday and parity glyphs land here).
    Glyph(char),

    // Special
    Eof,
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Xingqi => f.write_str("'星期'"),
            TokenKind::Di => f.write_str("'第'"),
            TokenKind::Jie => f.write_str("'节'"),
            TokenKind::Zhou => f.write_str("'周'"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Dash => f.write_str("'-'"),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Glyph(c) => write!(f, "'{}'", c),
            TokenKind::Eof => f.write_str("end of token"),
            TokenKind::Error(msg) => write!(f, "error ({})", msg),
        }
    }
}

/// Source location span.
///
/// `start`/`end` are byte offsets; `column` is the 1-based character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            column: 1,
        }
    }
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
