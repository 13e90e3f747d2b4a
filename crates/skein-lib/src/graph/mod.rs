//! NFA graph model.
//!
//! The graph is an index-based arena: states live in a `Vec`, edges are
//! ids. The parser is the only writer; once compiled, the graph is
//! read-only and can back any number of concurrent matchers.

mod dump;
mod invariants;

#[cfg(test)]
mod graph_tests;

pub(crate) use dump::dump;
pub(crate) use invariants::check;
#[cfg(test)]
pub(crate) use invariants::validate;

use crate::unicode::ClassMatcher;

/// Index into `Nfa::states`.
pub(crate) type StateId = u32;

/// Sentinel for `{m,}` and unbounded quantifiers.
pub(crate) const UNBOUNDED: u32 = 1_000_000;

/// Characters the word-boundary anchor treats as non-word.
const NON_WORD: &str = " \t\n\r.,;:?!-><\\()/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundaryKind {
    /// `^`: start of text or just after a line break.
    LineStart,
    /// `$`: end of text or at a line break.
    LineEnd,
    /// `\b`.
    WordBoundary,
    /// `\A`.
    TextStart,
    /// `\Z`: end of text, or the position of the last character.
    TextEnd,
}

/// State payload; the match predicate dispatches on this tag.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StateKind {
    /// Consumes the stored string.
    Literal(String),
    /// Consumes one character contained in the set.
    MultiMatch(Vec<char>),
    /// Consumes one character not contained in the set.
    NegativeMultiMatch(Vec<char>),
    /// `.`: consumes any one character.
    MatchAll,
    /// `\p{...}` / `\P{...}`: consumes one character by oracle predicate.
    UnicodeClass { class: ClassMatcher, negated: bool },
    /// Consumes the text captured earlier by the group.
    BackReference(u32),
    /// Zero-width anchor.
    Boundary(BoundaryKind),
    /// Zero-width loop head; `loop_edges` enter the body fresh,
    /// `loop_back` edges return from body exits with a counter bump.
    Repetition { min: u32, max: u32 },
    /// Zero-width fan-out for alternation and group carriers.
    Expression,
    /// Terminal; exactly one per graph.
    End,
}

#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) kind: StateKind,
    pub(crate) label: String,
    /// Ordinary forward edges.
    pub(crate) out: Vec<StateId>,
    /// Repetition only: edges into the body that reset its counter.
    pub(crate) loop_edges: Vec<StateId>,
    /// On body exits: edges back to the enclosing repetition, taken with
    /// a counter increment.
    pub(crate) loop_back: Vec<StateId>,
    pub(crate) group_starts: Vec<u32>,
    pub(crate) group_ends: Vec<u32>,
}

impl State {
    pub(crate) fn new(kind: StateKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            out: Vec::new(),
            loop_edges: Vec::new(),
            loop_back: Vec::new(),
            group_starts: Vec::new(),
            group_ends: Vec::new(),
        }
    }

    pub(crate) fn is_repetition(&self) -> bool {
        matches!(self.kind, StateKind::Repetition { .. })
    }

    pub(crate) fn is_end(&self) -> bool {
        matches!(self.kind, StateKind::End)
    }

    pub(crate) fn max_reps(&self) -> u32 {
        match self.kind {
            StateKind::Repetition { max, .. } => max,
            _ => 0,
        }
    }

    /// Tests the state against `text` at byte offset `at`; returns the
    /// number of bytes consumed on success. Back-references must go
    /// through [`State::try_match_backref`] instead.
    pub(crate) fn try_match(&self, text: &str, at: usize) -> Option<usize> {
        match &self.kind {
            StateKind::Literal(lit) => text[at..].starts_with(lit.as_str()).then_some(lit.len()),
            StateKind::MultiMatch(set) => {
                let c = text[at..].chars().next()?;
                set.contains(&c).then(|| c.len_utf8())
            }
            StateKind::NegativeMultiMatch(set) => {
                let c = text[at..].chars().next()?;
                (!set.contains(&c)).then(|| c.len_utf8())
            }
            StateKind::MatchAll => text[at..].chars().next().map(char::len_utf8),
            StateKind::UnicodeClass { class, negated } => {
                let c = text[at..].chars().next()?;
                (class.matches(c) != *negated).then(|| c.len_utf8())
            }
            StateKind::BackReference(_) => None,
            StateKind::Boundary(kind) => boundary_matches(*kind, text, at).then_some(0),
            StateKind::Repetition { .. } | StateKind::Expression | StateKind::End => Some(0),
        }
    }

    /// Back-reference predicate: matches the resolved capture literally.
    /// An unresolved reference matches nothing.
    pub(crate) fn try_match_backref(
        &self,
        text: &str,
        at: usize,
        resolved: Option<&str>,
    ) -> Option<usize> {
        let reference = resolved?;
        text[at..]
            .starts_with(reference)
            .then_some(reference.len())
    }
}

fn boundary_matches(kind: BoundaryKind, text: &str, at: usize) -> bool {
    if at >= text.len() {
        return matches!(
            kind,
            BoundaryKind::LineEnd | BoundaryKind::TextEnd | BoundaryKind::WordBoundary
        );
    }
    match kind {
        BoundaryKind::TextStart => at == 0,
        BoundaryKind::TextEnd => {
            // also true at the last character's start, not only past the end
            text.char_indices().next_back().map(|(i, _)| i) == Some(at)
        }
        BoundaryKind::LineStart => {
            at == 0 || matches!(text[..at].chars().next_back(), Some('\n' | '\r'))
        }
        BoundaryKind::LineEnd => matches!(text[at..].chars().next(), Some('\n' | '\r')),
        BoundaryKind::WordBoundary => {
            let cur = text[at..].chars().next().expect("position below length");
            let cur_nw = NON_WORD.contains(cur);
            let next_nw = text[at + cur.len_utf8()..]
                .chars()
                .next()
                .map(|c| NON_WORD.contains(c));
            let prev_nw = text[..at].chars().next_back().map(|c| NON_WORD.contains(c));
            if cur_nw {
                next_nw.map_or(true, |nw| !nw) || prev_nw.map_or(true, |nw| !nw)
            } else {
                next_nw.unwrap_or(true) || prev_nw.unwrap_or(true)
            }
        }
    }
}

/// A wired sub-graph: the state to splice upstream edges into, and the
/// states whose `out` lists receive whatever comes next.
#[derive(Debug, Clone)]
pub(crate) struct Fragment {
    pub(crate) entry: StateId,
    pub(crate) exits: Vec<StateId>,
}

impl Fragment {
    pub(crate) fn single(state: StateId) -> Self {
        Self {
            entry: state,
            exits: vec![state],
        }
    }
}

/// Compiled automaton: state arena plus the distinguished entry and
/// terminal states and the number of capture groups allocated.
#[derive(Debug, Clone)]
pub(crate) struct Nfa {
    states: Vec<State>,
    entry: StateId,
    end: StateId,
    group_count: u32,
}

impl Nfa {
    pub(crate) fn new() -> Self {
        Self {
            states: Vec::new(),
            entry: 0,
            end: 0,
            group_count: 0,
        }
    }

    pub(crate) fn add(&mut self, state: State) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(state);
        id
    }

    pub(crate) fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    pub(crate) fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id as usize]
    }

    pub(crate) fn connect(&mut self, from: StateId, to: StateId) {
        self.state_mut(from).out.push(to);
    }

    /// Allocates the next capture group number (1-indexed, open order).
    pub(crate) fn alloc_group(&mut self) -> u32 {
        self.group_count += 1;
        self.group_count
    }

    pub(crate) fn group_count(&self) -> u32 {
        self.group_count
    }

    pub(crate) fn set_entry(&mut self, entry: StateId) {
        self.entry = entry;
    }

    pub(crate) fn set_end(&mut self, end: StateId) {
        self.end = end;
    }

    pub(crate) fn entry(&self) -> StateId {
        self.entry
    }

    pub(crate) fn end(&self) -> StateId {
        self.end
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (i as StateId, s))
    }
}
