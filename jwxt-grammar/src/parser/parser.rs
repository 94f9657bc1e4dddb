//! Parser implementation

use super::ast::*;
use crate::lexer::*;
use jwxt_core::{GrammarError, Parity, Weekday, MAX_TOTAL_WEEKS};
use tracing::debug;

/// Recursive-descent parser over the tokens of one class-time token.
///
/// Both grammars share the token stream; each entry point rewinds to the
/// start so they can be tried one after the other on the same parser.
pub struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            tokens: Lexer::new(source).tokenize(),
            pos: 0,
        }
    }

    /// `星期X第a-b节{c-d周[(单|双)]}`
    pub fn parse_continuous_run(&mut self) -> Result<TimeClause, GrammarError> {
        self.rewind()?;
        let head = self.parse_head()?;
        self.expect(TokenKind::LBrace)?;

        let start_column = self.current().span.column;
        let week_start = self.expect_week()?;
        self.expect(TokenKind::Dash)?;
        let week_end = self.expect_week()?;
        self.expect(TokenKind::Zhou)?;
        if week_start > week_end {
            return Err(self.error_at(
                start_column,
                &format!("week range {}-{} is inverted", week_start, week_end),
            ));
        }

        let parity = if self.check(&TokenKind::LParen) {
            self.advance();
            let parity_column = self.current().span.column;
            let parity = self.parse_parity()?;
            self.expect(TokenKind::RParen)?;
            if !(week_start..=week_end).any(|w| parity.admits(w)) {
                return Err(self.error_at(
                    parity_column,
                    &format!(
                        "parity '{}' leaves no weeks in {}-{}",
                        parity.glyph(),
                        week_start,
                        week_end
                    ),
                ));
            }
            Some(parity)
        } else {
            None
        };

        self.expect(TokenKind::RBrace)?;
        self.expect_end()?;

        Ok(TimeClause::ContinuousRun {
            head,
            week_start,
            week_end,
            parity,
        })
    }

    /// `星期X第a-b节{w周[,w周]*}`
    pub fn parse_separated_list(&mut self) -> Result<TimeClause, GrammarError> {
        self.rewind()?;
        let head = self.parse_head()?;
        self.expect(TokenKind::LBrace)?;

        let mut weeks = vec![self.parse_list_item()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            weeks.push(self.parse_list_item()?);
        }

        self.expect(TokenKind::RBrace)?;
        self.expect_end()?;

        Ok(TimeClause::SeparatedList { head, weeks })
    }

    fn parse_list_item(&mut self) -> Result<u32, GrammarError> {
        let week = self.expect_week()?;
        self.expect(TokenKind::Zhou)?;
        Ok(week)
    }

    /// `星期X第a[-b]节`
    fn parse_head(&mut self) -> Result<SlotHead, GrammarError> {
        self.expect(TokenKind::Xingqi)?;

        let weekday = match self.current().kind {
            TokenKind::Glyph(c) => match Weekday::from_glyph(c) {
                Some(day) => {
                    self.advance();
                    day
                }
                None => return Err(self.error(&format!("unknown weekday glyph '{}'", c))),
            },
            _ => return Err(self.unexpected("weekday glyph")),
        };

        self.expect(TokenKind::Di)?;
        let start_column = self.current().span.column;
        let section_start = self.expect_section()?;
        let section_end = if self.check(&TokenKind::Dash) {
            self.advance();
            self.expect_section()?
        } else {
            section_start
        };
        self.expect(TokenKind::Jie)?;

        if section_start > section_end {
            return Err(self.error_at(
                start_column,
                &format!(
                    "period range {}-{} is inverted",
                    section_start, section_end
                ),
            ));
        }

        Ok(SlotHead {
            weekday,
            section_start,
            section_end,
        })
    }

    fn parse_parity(&mut self) -> Result<Parity, GrammarError> {
        match self.current().kind {
            TokenKind::Glyph(c) => match Parity::from_glyph(c) {
                Some(parity) => {
                    self.advance();
                    Ok(parity)
                }
                None => Err(self.error(&format!("unknown parity glyph '{}'", c))),
            },
            _ => Err(self.unexpected("parity glyph '单' or '双'")),
        }
    }

    fn expect_section(&mut self) -> Result<u8, GrammarError> {
        match self.current().kind {
            TokenKind::Number(0) => Err(self.error("period 0 is not valid")),
            TokenKind::Number(n) => match u8::try_from(n) {
                Ok(section) => {
                    self.advance();
                    Ok(section)
                }
                Err(_) => Err(self.error(&format!("period {} is out of range", n))),
            },
            _ => Err(self.unexpected("period number")),
        }
    }

    fn expect_week(&mut self) -> Result<u32, GrammarError> {
        match self.current().kind {
            TokenKind::Number(0) => Err(self.error("week 0 is not valid")),
            TokenKind::Number(n) if n > MAX_TOTAL_WEEKS => Err(self.error(&format!(
                "week {} is beyond the {}-week limit",
                n, MAX_TOTAL_WEEKS
            ))),
            TokenKind::Number(n) => {
                self.advance();
                Ok(n)
            }
            _ => Err(self.unexpected("week number")),
        }
    }

    fn expect_end(&self) -> Result<(), GrammarError> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing text after '}'"))
        }
    }

    // ========================================================================
    // TOKEN CURSOR
    // ========================================================================

    fn rewind(&mut self) -> Result<(), GrammarError> {
        self.pos = 0;
        if let Some(token) = self
            .tokens
            .iter()
            .find(|t| matches!(t.kind, TokenKind::Error(_)))
        {
            let reason = match &token.kind {
                TokenKind::Error(msg) => msg.clone(),
                _ => "lexer error".to_string(),
            };
            return Err(self.error_at(token.span.column, &reason));
        }
        Ok(())
    }

    fn current(&self) -> &Token {
        // The lexer always terminates the stream with Eof and `advance`
        // never moves past it.
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), GrammarError> {
        if self.check(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, wanted: &str) -> GrammarError {
        self.error(&format!("expected {}, found {}", wanted, self.current().kind))
    }

    fn error(&self, reason: &str) -> GrammarError {
        self.error_at(self.current().span.column, reason)
    }

    fn error_at(&self, column: usize, reason: &str) -> GrammarError {
        GrammarError::MalformedTimeToken {
            token: self.source.to_string(),
            column,
            reason: reason.to_string(),
        }
    }
}

/// Parse one token, trying the continuous-run grammar before the
/// separated-list grammar.
///
/// When both fail, the error of the grammar that got further into the
/// token is returned (the continuous-run error on a tie).
pub fn parse_clause(token: &str) -> Result<TimeClause, GrammarError> {
    let mut parser = Parser::new(token);
    let run_err = match parser.parse_continuous_run() {
        Ok(clause) => return Ok(clause),
        Err(e) => e,
    };

    match parser.parse_separated_list() {
        Ok(clause) => {
            debug!(token, "continuous-run grammar rejected token, accepted as separated list");
            Ok(clause)
        }
        Err(list_err) if list_err.column() > run_err.column() => Err(list_err),
        Err(_) => Err(run_err),
    }
}
