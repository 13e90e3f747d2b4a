//! `skein match`: run a pattern over text and print the matches.

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use skein_lib::Regex;

use crate::cli::MatchParams;

pub fn run(params: MatchParams) -> ExitCode {
    let regex = match Regex::new(&params.pattern) {
        Ok(regex) => regex,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let text = match read_input(&params) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let matches = if params.first {
        regex.match_first(&text).into_iter().collect()
    } else {
        regex.match_all(&text)
    };

    if params.json {
        match serde_json::to_string_pretty(&matches) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for found in &matches {
            println!("{found}");
        }
    }
    ExitCode::SUCCESS
}

fn read_input(params: &MatchParams) -> std::io::Result<String> {
    if let Some(text) = &params.text {
        return Ok(text.clone());
    }
    if let Some(path) = &params.file {
        return fs::read_to_string(path);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
