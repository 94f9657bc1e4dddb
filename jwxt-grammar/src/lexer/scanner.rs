//! Lexer implementation

use super::token::*;
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexer for one class-time token such as `星期一第1-2节{1-16周(单)}`.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    column: usize,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            column: 1,
            pos: 0,
        }
    }

    /// Tokenize the entire source. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start_pos = self.pos;
        let start_col = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => match c {
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '(' | '（' => self.single(TokenKind::LParen),
                ')' | '）' => self.single(TokenKind::RParen),
                ',' | '，' => self.single(TokenKind::Comma),
                '-' => self.single(TokenKind::Dash),
                '第' => self.single(TokenKind::Di),
                '节' => self.single(TokenKind::Jie),
                '周' => self.single(TokenKind::Zhou),
                '星' => {
                    self.advance();
                    if self.peek_char() == Some('期') {
                        self.advance();
                        TokenKind::Xingqi
                    } else {
                        TokenKind::Glyph('星')
                    }
                }
                c if c.is_ascii_digit() => self.scan_number(),
                c => self.single(TokenKind::Glyph(c)),
            },
        };

        Token {
            kind,
            span: Span {
                start: start_pos,
                end: self.pos,
                column: start_col,
            },
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Scan a decimal number.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let digits = &self.source[start..self.pos];
        match digits.parse::<u32>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => TokenKind::Error(format!("number out of range: {}", digits)),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        self.pos += c.len_utf8();
        self.column += 1;
        Some(c)
    }
}
