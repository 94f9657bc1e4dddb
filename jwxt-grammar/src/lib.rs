//! JWXT Grammar - class-time encoding parser
//!
//! Decodes the portal's compact meeting-pattern strings
//! (`星期一第1-2节{1-16周(单)}`, `星期二第3-4节{1周,3周,5周}`) into
//! [`ParsedSlot`]s and classifies week sets into [`jwxt_core::WeekSpan`]s.

pub mod lexer;
pub mod parser;
pub mod split;
pub mod week_span;

pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{parse_clause, Parser, SlotHead, TimeClause};
pub use split::split_time_tokens;
pub use week_span::{classify, classify_slot};

use jwxt_core::{GrammarError, ParsedSlot};

/// Parse one token with the continuous-run grammar only.
pub fn parse_continuous_run(token: &str) -> Result<TimeClause, GrammarError> {
    Parser::new(token).parse_continuous_run()
}

/// Parse one token with the separated-list grammar only.
pub fn parse_separated_list(token: &str) -> Result<TimeClause, GrammarError> {
    Parser::new(token).parse_separated_list()
}

/// Parse a single time token into a slot.
pub fn parse_time_token(token: &str) -> Result<ParsedSlot, GrammarError> {
    let clause = parse_clause(token)?;
    clause
        .to_slot()
        .map_err(|e| GrammarError::MalformedTimeToken {
            token: token.to_string(),
            column: token.chars().count() + 1,
            reason: e.to_string(),
        })
}

/// Parse a full meeting pattern into its slots, in source order.
///
/// Any malformed token fails the whole pattern. A blank pattern yields no
/// slots.
pub fn parse_time_string(pattern: &str) -> Result<Vec<ParsedSlot>, GrammarError> {
    split_time_tokens(pattern)
        .into_iter()
        .map(parse_time_token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwxt_core::Weekday;

    #[test]
    fn test_parse_time_token_cells() {
        let slot = parse_time_token("星期一第1-2节{1-16周}").unwrap();
        assert_eq!(slot.weekday(), Weekday::Monday);
        assert_eq!(slot.cell_count(), 32);
        assert!(slot.cells().all(|(s, w)| (1..=2).contains(&s) && (1..=16).contains(&w)));
    }

    #[test]
    fn test_parse_time_string_fails_whole_pattern() {
        let err = parse_time_string("星期一第1-2节{1-16周};星期八第1节{1周}").unwrap_err();
        assert_eq!(err.token(), "星期八第1节{1周}");
    }

    #[test]
    fn test_parse_time_string_empty() {
        assert_eq!(parse_time_string("  ").unwrap(), vec![]);
    }

    #[test]
    fn test_independent_grammar_entry_points() {
        assert!(parse_continuous_run("星期二第3-4节{1周,3周}").is_err());
        assert!(parse_separated_list("星期二第3-4节{1周,3周}").is_ok());
        assert!(parse_separated_list("星期一第1-2节{1-16周}").is_err());
    }
}
