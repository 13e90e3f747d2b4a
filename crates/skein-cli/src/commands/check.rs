//! `skein check`: compile a pattern and report diagnostics.

use std::process::ExitCode;

use skein_lib::Regex;

use crate::cli::CheckParams;

pub fn run(params: CheckParams) -> ExitCode {
    match Regex::new(&params.pattern) {
        Ok(_) => {
            println!("ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
