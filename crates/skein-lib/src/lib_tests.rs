use crate::{ParseErrorKind, Regex};

#[test]
fn dump_echoes_pattern_and_round_trips() {
    for pattern in [r"(19|20)\d\d", r"a*b|c", r"[^0-9]+x", r"\p{L}{2,}", ""] {
        let regex = Regex::new(pattern).expect(pattern);
        let dump = regex.dump();
        let echoed = dump.lines().next().expect("dump has lines");
        assert_eq!(echoed, pattern);

        // recompiling the echoed pattern reproduces the graph
        let again = Regex::new(echoed).expect(pattern);
        assert_eq!(again.dump(), dump);
    }
}

#[test]
fn pattern_is_kept_verbatim() {
    let regex = Regex::new(r"a\x41{2}").expect("compiles");
    assert_eq!(regex.pattern(), r"a\x41{2}");
}

#[test]
fn compiled_regex_is_shareable() {
    let regex = Regex::new("a+").expect("compiles");
    let clone = regex.clone();
    assert_eq!(clone.match_all("aa b").len(), regex.match_all("aa b").len());
}

#[test]
fn match_serializes_to_json() {
    let regex = Regex::new("(a)b").expect("compiles");
    let found = regex.match_first("ab").expect("matches");
    let json = serde_json::to_value(&found).expect("serializes");
    assert_eq!(json["position"], 0);
    assert_eq!(json["text"], "ab");
    assert!(json["steps"].is_array());
}

#[test]
fn parse_errors_are_typed_with_offsets() {
    let err = Regex::new("(a").expect_err("rejected");
    assert_eq!(err.offset, 2);
    assert_eq!(err.kind, ParseErrorKind::Expected(')'));
}
