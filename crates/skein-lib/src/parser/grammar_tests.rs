use crate::Regex;
use crate::graph::dump;

fn graph(pattern: &str) -> String {
    let nfa = super::parse(pattern).expect("pattern compiles");
    dump(&nfa)
}

fn error(pattern: &str) -> String {
    Regex::new(pattern).expect_err("pattern is rejected").to_string()
}

#[test]
fn literal_concatenation() {
    insta::assert_snapshot!(graph("ab"), @r"
    entry s0
    s0 literal `ab`
       out: s1
    s1 end `end`
    ");
}

#[test]
fn alternation_fans_out() {
    insta::assert_snapshot!(graph("a|b"), @r"
    entry s1
    s0 literal `a`
       out: s3
    s1 expression `EXP`
       out: s0, s2
    s2 literal `b`
       out: s3
    s3 end `end`
    ");
}

#[test]
fn star_builds_repetition_loop() {
    insta::assert_snapshot!(graph("a*"), @r"
    entry s1
    s0 literal `a`
       back: s1
    s1 repetition `*`
       out: s2
       loop: s0
    s2 end `end`
    ");
}

#[test]
fn bounded_repetition_concatenates_after_loop() {
    insta::assert_snapshot!(graph("a{2,3}b"), @r"
    entry s1
    s0 literal `a`
       back: s1
    s1 repetition `{2,3}`
       out: s2
       loop: s0
    s2 literal `b`
       out: s3
    s3 end `end`
    ");
}

#[test]
fn group_marks_entry_and_exits() {
    insta::assert_snapshot!(graph("(a)"), @r"
    entry s0
    s0 literal `a`
       out: s1
       start: 1
       end: 1
    s1 end `end`
    ");
}

#[test]
fn bare_repetition_group_gets_carriers() {
    // Repetition states stay free of group marks; carriers take them.
    insta::assert_snapshot!(graph("(a*)"), @r"
    entry s2
    s0 literal `a`
       back: s1
    s1 repetition `*`
       out: s3
       loop: s0
    s2 expression `GRP`
       out: s1
       start: 1
    s3 expression `GRP`
       out: s4
       end: 1
    s4 end `end`
    ");
}

#[test]
fn negated_class() {
    insta::assert_snapshot!(graph("[^a-c]"), @r"
    entry s0
    s0 neg multi match `^a-c`
       out: s1
    s1 end `end`
    ");
}

#[test]
fn lazy_marker_is_consumed() {
    // `.*?` parses; the quantifier stays greedy.
    insta::assert_snapshot!(graph(".*?"), @r"
    entry s1
    s0 match all `.`
       back: s1
    s1 repetition `*`
       out: s2
       loop: s0
    s2 end `end`
    ");
}

#[test]
fn missing_close_paren() {
    assert_eq!(error("(ab"), "expected `)` at offset 3");
}

#[test]
fn missing_close_brace() {
    assert_eq!(error("a{2"), "expected `}` at offset 3");
}

#[test]
fn bare_comma_bounds_rejected() {
    assert_eq!(error("a{,}"), "quantifier bound must be numeric at offset 3");
}

#[test]
fn close_brace_before_open() {
    assert_eq!(error("}"), "`}` before `{` at offset 0");
}

#[test]
fn empty_class_rejected() {
    assert_eq!(error("[]"), "set element expected at offset 1");
}

#[test]
fn unterminated_class() {
    assert_eq!(error("[a"), "unexpected end of pattern at offset 2");
}

#[test]
fn unsupported_escape() {
    assert_eq!(error(r"\q"), "unsupported escape `\\q` at offset 0");
}

#[test]
fn complement_escape_rejected_in_class() {
    assert_eq!(
        error(r"[\D]"),
        "unsupported escape `\\D` in character class at offset 1"
    );
}

#[test]
fn back_reference_rejected_in_class() {
    assert_eq!(
        error(r"[\1]"),
        "back reference `\\1` not allowed in character class at offset 1"
    );
}

#[test]
fn unknown_unicode_class() {
    assert_eq!(error(r"\p{Foo}"), "unknown unicode class `Foo` at offset 7");
}

#[test]
fn unbalanced_close_paren() {
    assert_eq!(error("a)b"), "unexpected `)` at offset 1");
}

#[test]
fn dangling_quantifier() {
    assert_eq!(error("*a"), "unexpected `*` at offset 0");
}

#[test]
fn bounds_out_of_order() {
    assert_eq!(error("a{3,1}"), "quantifier bounds out of order at offset 5");
}

#[test]
fn trailing_backslash() {
    assert_eq!(error("a\\"), "unexpected end of pattern at offset 1");
}

#[test]
fn empty_alternative_rejected() {
    assert_eq!(error("a|"), "unexpected end of pattern at offset 2");
}

#[test]
fn nesting_depth_is_bounded() {
    let pattern = format!("{}a{}", "(".repeat(201), ")".repeat(201));
    let message = error(&pattern);
    assert!(message.starts_with("pattern nested too deeply"), "{message}");
}

#[test]
fn open_question_forms_compile() {
    // `{,n}` accepted, complements as standalone atoms, lazy markers.
    for pattern in [r"a{,3}", r"\D\W\S", r"a+?", r"a{2,}?", r"\p{L}\P{Nd}"] {
        Regex::new(pattern).expect(pattern);
    }
}

#[test]
fn group_numbers_follow_open_order() {
    let nfa = super::parse(r"((a)(b))(c)").expect("pattern compiles");
    assert_eq!(nfa.group_count(), 4);
}
