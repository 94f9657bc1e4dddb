//! Grammar acceptance tests against real portal strings.

use jwxt_core::{Parity, WeekSpan, Weekday};
use jwxt_grammar::{classify, parse_clause, parse_time_string, parse_time_token, TimeClause};
use jwxt_test_utils::assertions::{assert_malformed, assert_slot_covers};

#[test]
fn test_continuous_run_full_term() {
    let slot = parse_time_token("星期一第1-2节{1-16周}").unwrap();
    assert_slot_covers(&slot, Weekday::Monday, 1..=2, &(1..=16).collect::<Vec<_>>());
}

#[test]
fn test_parity_odd_and_even() {
    let odd = parse_time_token("星期一第1-2节{1-16周(单)}").unwrap();
    assert_slot_covers(&odd, Weekday::Monday, 1..=2, &[1, 3, 5, 7, 9, 11, 13, 15]);

    let even = parse_time_token("星期一第1-2节{1-16周(双)}").unwrap();
    assert_slot_covers(&even, Weekday::Monday, 1..=2, &[2, 4, 6, 8, 10, 12, 14, 16]);
}

#[test]
fn test_separated_list_exact_weeks() {
    let clause = parse_clause("星期二第3-4节{1周,3周,5周}").unwrap();
    assert!(matches!(clause, TimeClause::SeparatedList { .. }));
    let slot = clause.to_slot().unwrap();
    assert_slot_covers(&slot, Weekday::Tuesday, 3..=4, &[1, 3, 5]);
}

#[test]
fn test_single_week_list_falls_back_to_separated_grammar() {
    let clause = parse_clause("星期五第9-11节{7周}").unwrap();
    assert_eq!(clause.weeks().into_iter().collect::<Vec<_>>(), vec![7]);
}

#[test]
fn test_sunday_alias_and_whitespace() {
    let slot = parse_time_token(" 星期天 第 1 - 2 节 { 3 周 ， 5 周 }").unwrap();
    assert_slot_covers(&slot, Weekday::Sunday, 1..=2, &[3, 5]);

    let slot = parse_time_token("星期天 第1-2节 {3-4周 （双）}").unwrap();
    assert_slot_covers(&slot, Weekday::Sunday, 1..=2, &[4]);
}

#[test]
fn test_continuous_clause_tag() {
    match parse_clause("星期三第5-6节{2-12周(双)}").unwrap() {
        TimeClause::ContinuousRun { parity, .. } => assert_eq!(parity, Some(Parity::Even)),
        other => panic!("unexpected clause: {other:?}"),
    }
}

#[test]
fn test_malformed_tokens() {
    for bad in [
        "星期八第1-2节{1-16周}",
        "周一第1-2节{1-16周}",
        "星期一第1-2节{1-16周(隔)}",
        "星期一第1-2节{1-16周}{1周}",
        "星期一第1-2节",
        "星期一第1-2节{}",
        "星期一第1-2节{1周,}",
        "星期一第1-2节{1-16}",
    ] {
        assert_malformed(&parse_time_token(bad));
    }
}

#[test]
fn test_pattern_with_br_delimiters() {
    let slots =
        parse_time_string("星期一第1-2节{1-16周}<br/>星期三第3-4节{1-8周}<br>星期五第1节{9周,10周}")
            .unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[1].weekday(), Weekday::Wednesday);
    assert_eq!(classify(slots[0].weeks(), 16), WeekSpan::FullTerm);
    assert_eq!(classify(slots[1].weeks(), 16), WeekSpan::FirstHalf);
    assert_eq!(classify(slots[2].weeks(), 16), WeekSpan::Custom);
}

#[test]
fn test_one_bad_token_fails_pattern() {
    let result = parse_time_string("星期一第1-2节{1-16周};not a token");
    assert_malformed(&result);
}
