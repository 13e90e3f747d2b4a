//! Skein: a regular-expression engine built on an explicit NFA.
//!
//! A pattern compiles into a graph of typed states with three edge kinds;
//! matching walks the graph breadth-first over the input, keeping the
//! full path per live thread so capture groups and back-references
//! resolve from the path itself. There is no DFA compilation and no
//! backtracking — pathological patterns complete without a match instead
//! of running away.
//!
//! # Example
//!
//! ```
//! use skein_lib::Regex;
//!
//! let re = Regex::new(r"(19|20)\d\d").expect("valid pattern");
//! let matches = re.match_all("from 1999 to 2004");
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].text, "1999");
//! assert_eq!(matches[1].position, 13);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod engine;
mod error;
mod graph;
mod parser;
mod unicode;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod unicode_tests;

pub use engine::{Match, MatchStep};
pub use error::{ParseError, ParseErrorKind};

use engine::Interpreter;
use graph::Nfa;

/// A compiled pattern. Compilation is the only fallible stage; the graph
/// is immutable afterwards, so one `Regex` can back any number of
/// concurrent matches.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    nfa: Nfa,
}

impl Regex {
    /// Compiles `pattern` into an NFA, or reports a diagnostic with the
    /// offending byte offset. No partial compilation survives an error.
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        let nfa = parser::parse(pattern)?;
        graph::check(&nfa);
        Ok(Self {
            pattern: pattern.to_string(),
            nfa,
        })
    }

    /// The verbatim pattern this regex was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// First match, scanning left to right.
    pub fn match_first(&self, text: &str) -> Option<Match> {
        Interpreter::new(&self.nfa, text).match_first()
    }

    /// All non-overlapping matches in textual order.
    pub fn match_all(&self, text: &str) -> Vec<Match> {
        Interpreter::new(&self.nfa, text).match_all()
    }

    /// Attempts one match starting exactly at byte offset `pos`,
    /// returning the longest found.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<Match> {
        Interpreter::new(&self.nfa, text).match_at(pos)
    }

    /// Textual listing of the compiled graph; the first line echoes the
    /// pattern verbatim.
    pub fn dump(&self) -> String {
        format!("{}\n{}", self.pattern, graph::dump(&self.nfa))
    }
}
