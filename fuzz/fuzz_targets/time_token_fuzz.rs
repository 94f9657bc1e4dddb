//! Fuzz target for the meeting-pattern lexer and grammars
//!
//! Run with: cargo +nightly fuzz run time_token_fuzz -- -max_total_time=60

#![no_main]

use jwxt_grammar::{parse_time_string, parse_time_token, Lexer, TokenKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let tokens = Lexer::new(input).tokenize();
        assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "token stream must end with Eof"
        );
        for token in &tokens {
            assert!(token.span.start <= token.span.end);
            assert!(token.span.column >= 1);
        }

        match parse_time_token(input) {
            Ok(slot) => {
                assert!(slot.section_start() >= 1);
                assert!(slot.section_start() <= slot.section_end());
                assert!(!slot.weeks().is_empty());
                assert!(!slot.weeks().contains(&0));
            }
            Err(err) => assert!(err.column() >= 1),
        }

        let _ = parse_time_string(input);
    }
});
