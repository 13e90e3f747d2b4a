use std::path::PathBuf;

use super::{CheckParams, DumpParams, MatchParams, build_cli};

fn subcommand(args: &[&str]) -> (String, clap::ArgMatches) {
    let matches = build_cli()
        .try_get_matches_from(args)
        .expect("arguments parse");
    let (name, sub) = matches.subcommand().expect("subcommand is required");
    (name.to_string(), sub.clone())
}

#[test]
fn match_params_extraction() {
    let (name, sub) = subcommand(&["skein", "match", "-p", "a+", "-s", "aa bb", "--first", "--json"]);
    assert_eq!(name, "match");
    let params = MatchParams::from_matches(&sub);
    insta::assert_snapshot!(
        format!(
            "pattern={} text={:?} file={:?} first={} json={}",
            params.pattern, params.text, params.file, params.first, params.json
        ),
        @r#"pattern=a+ text=Some("aa bb") file=None first=true json=true"#
    );
}

#[test]
fn match_params_defaults() {
    let (_, sub) = subcommand(&["skein", "match", "--pattern", "ab"]);
    let params = MatchParams::from_matches(&sub);
    assert_eq!(params.pattern, "ab");
    assert_eq!(params.text, None);
    assert_eq!(params.file, None);
    assert!(!params.first);
    assert!(!params.json);
}

#[test]
fn match_file_is_positional() {
    let (_, sub) = subcommand(&["skein", "match", "-p", "a", "notes.txt"]);
    let params = MatchParams::from_matches(&sub);
    assert_eq!(params.file, Some(PathBuf::from("notes.txt")));
    assert_eq!(params.text, None);
}

#[test]
fn dump_and_check_params_extraction() {
    let (name, sub) = subcommand(&["skein", "dump", "-p", "a*"]);
    assert_eq!(name, "dump");
    assert_eq!(DumpParams::from_matches(&sub).pattern, "a*");

    let (name, sub) = subcommand(&["skein", "check", "--pattern", "(a"]);
    assert_eq!(name, "check");
    assert_eq!(CheckParams::from_matches(&sub).pattern, "(a");
}

#[test]
fn pattern_is_required_everywhere() {
    for command in ["match", "dump", "check"] {
        assert!(
            build_cli().try_get_matches_from(["skein", command]).is_err(),
            "{command} accepted a missing pattern"
        );
    }
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["skein"]).is_err());
}

#[test]
fn match_only_flags_stay_on_match() {
    assert!(
        build_cli()
            .try_get_matches_from(["skein", "dump", "-p", "a", "--json"])
            .is_err()
    );
    assert!(
        build_cli()
            .try_get_matches_from(["skein", "check", "-p", "a", "--first"])
            .is_err()
    );
}
