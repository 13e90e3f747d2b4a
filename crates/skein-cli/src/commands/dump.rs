//! `skein dump`: print the compiled state graph.

use std::process::ExitCode;

use skein_lib::Regex;

use crate::cli::DumpParams;

pub fn run(params: DumpParams) -> ExitCode {
    match Regex::new(&params.pattern) {
        Ok(regex) => {
            print!("{}", regex.dump());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
