mod cli;
mod commands;

use std::process::ExitCode;

use cli::{CheckParams, DumpParams, MatchParams, build_cli};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("match", m)) => commands::matches::run(MatchParams::from_matches(m)),
        Some(("dump", m)) => commands::dump::run(DumpParams::from_matches(m)),
        Some(("check", m)) => commands::check::run(CheckParams::from_matches(m)),
        _ => unreachable!("clap should have caught this"),
    }
}
