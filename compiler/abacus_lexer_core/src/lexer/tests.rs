use super::{Lexer, Match};
use pretty_assertions::assert_eq;
use std::cmp::Ordering;

fn by_value(a: &u32, b: &u32) -> Ordering {
    a.cmp(b)
}

fn lexer(patterns: &[(&str, u32)]) -> Lexer<u32> {
    let mut lexer = Lexer::new();
    for &(source, id) in patterns {
        if let Err(e) = lexer.register(source, id) {
            panic!("{source:?}: {e}");
        }
    }
    lexer
}

fn spans(text: &str, matches: &[Match<u32>]) -> Vec<(String, u32)> {
    matches
        .iter()
        .map(|m| (m.as_str(text).to_string(), m.id))
        .collect()
}

// === lex_one ===

#[test]
fn picks_longest_match() {
    let lexer = lexer(&[("a", 0), ("ab", 1), ("abc", 2)]);
    let m = lexer.lex_one("abcd", 0, by_value);
    assert_eq!(m, Some(Match { start: 0, end: 3, id: 2 }));
}

#[test]
fn ties_go_to_highest_id() {
    let lexer = lexer(&[("[a-z]+", 3), ("sin", 6), ("s", 0)]);
    let m = lexer.lex_one("sin", 0, by_value);
    assert_eq!(m.map(|m| m.id), Some(6));
}

#[test]
fn full_ties_go_to_latest_registration() {
    let first = lexer(&[("x", 1), ("[a-z]", 2)]);
    let m = first.lex_one("x", 0, |_, _| Ordering::Equal);
    assert_eq!(m.map(|m| m.id), Some(2));

    let second = lexer(&[("[a-z]", 2), ("x", 1)]);
    let m = second.lex_one("x", 0, |_, _| Ordering::Equal);
    assert_eq!(m.map(|m| m.id), Some(1));
}

#[test]
fn starts_mid_text() {
    let lexer = lexer(&[("[0-9]+", 0)]);
    let m = lexer.lex_one("ab123", 2, by_value);
    assert_eq!(m, Some(Match { start: 2, end: 5, id: 0 }));
}

#[test]
fn no_match_is_none() {
    let lexer = lexer(&[("abc", 0)]);
    assert_eq!(lexer.lex_one("abd", 0, by_value), None);
}

#[test]
fn multibyte_characters_use_byte_offsets() {
    let lexer = lexer(&[("π", 0), (".", 1)]);
    let m = lexer.lex_one("π2", 0, by_value);
    assert_eq!(m.map(|m| (m.start, m.end)), Some((0, 'π'.len_utf8())));
}

// === lex_all ===

#[test]
fn optional_splits_into_single_chars() {
    let lexer = lexer(&[("a?", 0)]);
    let matches = lexer.lex_all("aaaa", 0, by_value);
    assert_eq!(matches.map(|m| m.len()), Some(4));
}

#[test]
fn star_then_literal_is_greedy() {
    let lexer = lexer(&[("a*a", 0)]);
    let matches = lexer.lex_all("aaaa", 0, by_value);
    assert_eq!(matches.map(|m| m.len()), Some(1));
}

#[test]
fn unknown_tail_fails_whole_call() {
    let lexer = lexer(&[("abc", 0), ("def", 1)]);
    assert_eq!(lexer.lex_all("abcdefabcz", 0, by_value), None);
}

#[test]
fn zero_length_match_fails() {
    let lexer = lexer(&[("a*", 0)]);
    assert_eq!(lexer.lex_all("b", 0, by_value), None);
}

#[test]
fn empty_text_fails() {
    let lexer = lexer(&[("a", 0)]);
    assert_eq!(lexer.lex_all("", 0, by_value), None);
}

#[test]
fn expression_tokens() {
    let lexer = lexer(&[
        (r"[0-9]*(\.[0-9]+)?", 5),
        ("[a-zA-Z]+", 3),
        (r"\+", 4),
        (r"\(", 7),
        (r"\)", 7),
        ("sqrt", 6),
    ]);
    let text = "sqrt(2)+x1.5";
    let matches = lexer.lex_all(text, 0, by_value).unwrap_or_default();
    assert_eq!(
        spans(text, &matches),
        vec![
            ("sqrt".to_string(), 6),
            ("(".to_string(), 7),
            ("2".to_string(), 5),
            (")".to_string(), 7),
            ("+".to_string(), 4),
            ("x".to_string(), 3),
            ("1.5".to_string(), 5),
        ]
    );
}

// === Registration ===

#[test]
fn malformed_pattern_is_not_registered() {
    let mut lexer: Lexer<u32> = Lexer::new();
    assert!(lexer.register("(a", 0).is_err());
    assert!(lexer.is_empty());
}

#[test]
fn unregister_removes_only_matching_pair() {
    let mut lexer = lexer(&[("a", 0), ("a", 1)]);
    assert!(lexer.unregister("a", &0));
    assert!(!lexer.unregister("a", &0));
    assert_eq!(lexer.len(), 1);
    assert!(lexer.contains("a", &1));
}

#[test]
fn reregistering_replaces_entry() {
    let lexer = lexer(&[("a", 0), ("a", 0)]);
    assert_eq!(lexer.len(), 1);
}

mod proptest_lex_all {
    use super::{by_value, lexer};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn matches_are_contiguous_and_total(text in "[a-z0-9 +]{1,40}") {
            let lexer = lexer(&[("[a-z]+", 1), ("[0-9]+", 2), (" ", 0), (r"\+", 3)]);
            let matches = lexer.lex_all(&text, 0, by_value);
            prop_assert!(matches.is_some());
            let matches = matches.unwrap_or_default();
            let mut expected_start = 0;
            for m in &matches {
                prop_assert_eq!(m.start, expected_start);
                prop_assert!(m.end > m.start);
                expected_start = m.end;
            }
            prop_assert_eq!(expected_start, text.len());
        }
    }
}
