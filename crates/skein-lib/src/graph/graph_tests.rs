use super::{BoundaryKind, State, StateKind, validate};
use crate::parser;

#[test]
fn invariants_hold_over_pattern_corpus() {
    let corpus = [
        "",
        "abc",
        "a|b|c",
        "a*b+c?",
        "a{0,0}",
        "a{2,}",
        "(a)(b)\\2",
        "((\\w{2} ){3,4})(19|20)\\d\\d",
        "(19|20)\\d\\d[- /.](0[1-9]|1[012])[- /.](0[1-9]|[12][0-9]|3[01])",
        "0[xX][A-Fa-f0-9]+",
        "<([A-Z]+)>.*?</\\1>",
        "(\\d{2}|\\d{4})[^0-9]+\\1",
        "(.*|.*)*",
        "^[A-Z][a-z]+$",
        "\\A\\w+\\Z",
        "\\p{L}+\\P{Nd}",
        "[\\x41-\\x5A]\\u03A9\\053",
    ];
    for pattern in corpus {
        let nfa = parser::parse(pattern).expect(pattern);
        validate(&nfa).expect(pattern);
    }
}

#[test]
fn literal_matches_at_offset() {
    let state = State::new(StateKind::Literal("ab".into()), "ab");
    assert_eq!(state.try_match("xaby", 1), Some(2));
    assert_eq!(state.try_match("xaby", 2), None);
    assert_eq!(state.try_match("ab", 2), None);
}

#[test]
fn class_matches_one_char() {
    let state = State::new(StateKind::MultiMatch(vec!['a', 'b']), "ab");
    assert_eq!(state.try_match("b", 0), Some(1));
    assert_eq!(state.try_match("c", 0), None);
    assert_eq!(state.try_match("a", 1), None);

    let negative = State::new(StateKind::NegativeMultiMatch(vec!['a']), "^a");
    assert_eq!(negative.try_match("b", 0), Some(1));
    assert_eq!(negative.try_match("a", 0), None);
    assert_eq!(negative.try_match("", 0), None);
}

#[test]
fn match_all_consumes_whole_chars() {
    let state = State::new(StateKind::MatchAll, ".");
    assert_eq!(state.try_match("Ω", 0), Some(2));
    assert_eq!(state.try_match("", 0), None);
}

#[test]
fn line_anchors() {
    let start = State::new(StateKind::Boundary(BoundaryKind::LineStart), "^");
    assert_eq!(start.try_match("ab", 0), Some(0));
    assert_eq!(start.try_match("ab", 1), None);
    assert_eq!(start.try_match("a\nb", 2), Some(0));

    let end = State::new(StateKind::Boundary(BoundaryKind::LineEnd), "$");
    assert_eq!(end.try_match("ab", 2), Some(0));
    assert_eq!(end.try_match("a\nb", 1), Some(0));
    assert_eq!(end.try_match("ab", 1), None);
}

#[test]
fn text_anchors() {
    let start = State::new(StateKind::Boundary(BoundaryKind::TextStart), "\\A");
    assert_eq!(start.try_match("ab", 0), Some(0));
    assert_eq!(start.try_match("ab", 1), None);

    // `\Z` accepts both the end position and the last character's start.
    let end = State::new(StateKind::Boundary(BoundaryKind::TextEnd), "\\Z");
    assert_eq!(end.try_match("ab", 2), Some(0));
    assert_eq!(end.try_match("ab", 1), Some(0));
    assert_eq!(end.try_match("ab", 0), None);
}

#[test]
fn word_boundary_uses_punctuation_list() {
    let boundary = State::new(StateKind::Boundary(BoundaryKind::WordBoundary), "\\b");
    // at the start of a word
    assert_eq!(boundary.try_match("ab cd", 0), Some(0));
    // at the last character of a word
    assert_eq!(boundary.try_match("ab cd", 1), Some(0));
    // inside a word
    assert_eq!(boundary.try_match("abc", 1), None);
    // at the end of text
    assert_eq!(boundary.try_match("ab", 2), Some(0));
}

#[test]
fn backref_matches_resolved_text_only() {
    let state = State::new(StateKind::BackReference(1), "\\1");
    assert_eq!(state.try_match_backref("abab", 2, Some("ab")), Some(2));
    assert_eq!(state.try_match_backref("abab", 2, Some("ba")), None);
    assert_eq!(state.try_match_backref("abab", 2, None), None);
    // the plain predicate never matches an unresolved reference
    assert_eq!(state.try_match("abab", 2), None);
}
