//! Command-line surface: argument builders and per-command params.

#[cfg(test)]
mod cli_tests;

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("skein")
        .about("Regex engine demo: compile patterns to an NFA and run them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("match")
                .about("Find matches of a pattern in text")
                .arg(pattern_arg())
                .arg(text_arg())
                .arg(file_arg())
                .arg(
                    Arg::new("first")
                        .long("first")
                        .action(ArgAction::SetTrue)
                        .help("Stop after the first match"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit matches as JSON"),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Print the compiled state graph")
                .arg(pattern_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Compile a pattern and report diagnostics")
                .arg(pattern_arg()),
        )
}

/// Pattern to compile (-p/--pattern).
fn pattern_arg() -> Arg {
    Arg::new("pattern")
        .short('p')
        .long("pattern")
        .value_name("PATTERN")
        .required(true)
        .help("Pattern to compile")
}

/// Inline text to search (-s/--text).
fn text_arg() -> Arg {
    Arg::new("text")
        .short('s')
        .long("text")
        .value_name("TEXT")
        .help("Inline text to search")
}

/// File to search (positional).
fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("File to search; stdin when neither text nor file is given")
}

pub struct MatchParams {
    pub pattern: String,
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub first: bool,
    pub json: bool,
}

impl MatchParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            pattern: required_pattern(matches),
            text: matches.get_one::<String>("text").cloned(),
            file: matches.get_one::<PathBuf>("file").cloned(),
            first: matches.get_flag("first"),
            json: matches.get_flag("json"),
        }
    }
}

pub struct DumpParams {
    pub pattern: String,
}

impl DumpParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            pattern: required_pattern(matches),
        }
    }
}

pub struct CheckParams {
    pub pattern: String,
}

impl CheckParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            pattern: required_pattern(matches),
        }
    }
}

fn required_pattern(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("pattern")
        .expect("pattern is a required argument")
        .clone()
}
