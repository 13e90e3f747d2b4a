//! Breadth-first NFA simulation.
//!
//! The simulator keeps two FIFO queues of [`Step`]s: the wavefront being
//! processed and the one being discovered. A step records which state was
//! entered, where, how much input it consumed, and its predecessor — so a
//! finished match still holds the whole path, which is what capture
//! recovery and back-references read. Steps are immutable and `Rc`-shared;
//! many paths share their prefix.

use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;

use serde::Serialize;

use crate::graph::{Nfa, StateId, StateKind};

/// One node of a path: `state` was entered at byte `position` and
/// consumed `match_len` bytes.
struct Step {
    state: StateId,
    position: usize,
    match_len: usize,
    /// Meaningful on repetition states: completed iterations plus one.
    rep_counter: u32,
    step_no: u32,
    /// Captures closed at this step, one entry per group ending here.
    captures: Vec<(u32, String)>,
    prev: Option<Rc<Step>>,
}

impl Step {
    fn consumed<'t>(&self, text: &'t str) -> &'t str {
        &text[self.position..self.position + self.match_len]
    }
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Byte offset the match starts at.
    pub position: usize,
    /// The matched substring.
    pub text: String,
    /// The full path, in order; used for capture-group recovery.
    pub steps: Vec<MatchStep>,
}

/// Flattened step record retained on a [`Match`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStep {
    pub state: u32,
    pub position: usize,
    pub len: usize,
    pub captures: Vec<(u32, String)>,
}

impl Match {
    /// Byte offset one past the matched text.
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }

    /// Text captured by group `group`, if it closed on the matched path.
    pub fn group(&self, group: u32) -> Option<&str> {
        self.steps.iter().rev().find_map(|step| {
            step.captures
                .iter()
                .find(|(g, _)| *g == group)
                .map(|(_, text)| text.as_str())
        })
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (pos: {})", self.text, self.position)
    }
}

pub(crate) struct Interpreter<'a> {
    nfa: &'a Nfa,
    text: &'a str,
}

impl<'a> Interpreter<'a> {
    pub(crate) fn new(nfa: &'a Nfa, text: &'a str) -> Self {
        Self { nfa, text }
    }

    /// All non-overlapping matches in textual order: after a match the
    /// scan resumes past its span, otherwise one character further.
    pub(crate) fn match_all(&self) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut pos = 0;
        while pos < self.text.len() {
            match self.match_at(pos) {
                Some(found) => {
                    pos = if found.text.is_empty() {
                        next_char_boundary(self.text, pos)
                    } else {
                        found.end()
                    };
                    matches.push(found);
                }
                None => pos = next_char_boundary(self.text, pos),
            }
        }
        matches
    }

    pub(crate) fn match_first(&self) -> Option<Match> {
        let mut pos = 0;
        while pos < self.text.len() {
            if let Some(found) = self.match_at(pos) {
                return Some(found);
            }
            pos = next_char_boundary(self.text, pos);
        }
        None
    }

    /// Attempts one match starting exactly at `pos`, returning the
    /// longest found. Candidates are `End` steps; a later candidate
    /// replaces an earlier one of the same length.
    pub(crate) fn match_at(&self, pos: usize) -> Option<Match> {
        let entry = self.nfa.entry();
        let entry_state = self.nfa.state(entry);
        let match_len = match entry_state.kind {
            StateKind::BackReference(_) => {
                entry_state.try_match_backref(self.text, pos, None)?
            }
            _ => entry_state.try_match(self.text, pos)?,
        };

        let mut first = Step {
            state: entry,
            position: pos,
            match_len,
            rep_counter: 1,
            step_no: 0,
            captures: Vec::new(),
            prev: None,
        };
        self.close_groups(&mut first);

        let mut current: VecDeque<Rc<Step>> = VecDeque::new();
        let mut next: VecDeque<Rc<Step>> = VecDeque::new();
        current.push_back(Rc::new(first));
        let mut best: Option<Rc<Step>> = None;

        while !current.is_empty() || !next.is_empty() {
            if current.is_empty() {
                mem::swap(&mut current, &mut next);
            }
            let step = current.pop_front().expect("queue refilled above");
            let state = self.nfa.state(step.state);

            if state.is_end() {
                if best.as_ref().is_none_or(|b| step.position >= b.position) {
                    best = Some(step);
                }
                continue;
            }

            for target in self.outgoing(&step) {
                self.try_step(&step, target, &mut next);
            }
        }

        best.map(|tail| self.collect_match(&tail))
    }

    /// Edge set leaving a step. Repetition states gate their edges on the
    /// counter: below the minimum only the body is reachable; up to the
    /// maximum the body stays open alongside the exits.
    fn outgoing(&self, step: &Step) -> Vec<StateId> {
        let state = self.nfa.state(step.state);
        let mut targets = Vec::new();
        if let StateKind::Repetition { min, max } = state.kind {
            let counter = self.counter_at(step, step.state);
            if counter < min.saturating_add(1) {
                targets.extend_from_slice(&state.loop_edges);
                return targets;
            }
            targets.extend_from_slice(&state.out);
            targets.extend_from_slice(&state.loop_back);
            if counter <= max.saturating_add(1) {
                targets.extend_from_slice(&state.loop_edges);
            }
        } else {
            targets.extend_from_slice(&state.out);
            targets.extend_from_slice(&state.loop_back);
        }
        targets
    }

    fn try_step(&self, from: &Rc<Step>, target: StateId, next: &mut VecDeque<Rc<Step>>) {
        let at = from.position + from.match_len;

        // Collapse duplicate explorations: a step for the same state at
        // an equal-or-earlier position is already queued.
        if next.iter().any(|s| s.state == target && s.position <= at) {
            return;
        }

        let target_state = self.nfa.state(target);
        let via_loop_back = self.nfa.state(from.state).loop_back.contains(&target);

        // A loop iteration must consume input: a loop-back edge whose
        // path consumed nothing since the repetition was last visited
        // would cycle forever. Every cycle in the graph closes through a
        // loop-back edge, so this bounds all zero-width loops.
        if via_loop_back && !self.consumed_since(from, target) {
            return;
        }

        let match_len = match target_state.kind {
            StateKind::BackReference(group) => {
                let resolved = self.resolve_backref(from, group);
                target_state.try_match_backref(self.text, at, resolved.as_deref())
            }
            _ => target_state.try_match(self.text, at),
        };
        let Some(match_len) = match_len else { return };

        let rep_counter = if target_state.is_repetition() && via_loop_back {
            // Returning from the body: bump the counter, refusing a
            // step that would overrun the bound.
            let counter = self.counter_at(from, target);
            if counter > target_state.max_reps() {
                return;
            }
            counter + 1
        } else {
            1
        };

        let mut step = Step {
            state: target,
            position: at,
            match_len,
            rep_counter,
            step_no: from.step_no + 1,
            captures: Vec::new(),
            prev: Some(Rc::clone(from)),
        };
        self.close_groups(&mut step);
        next.push_back(Rc::new(step));
    }

    /// Counter at the most recent visit of `rep` along the path,
    /// including `step` itself; 1 when never visited.
    fn counter_at(&self, step: &Step, rep: StateId) -> u32 {
        let mut cur = Some(step);
        while let Some(s) = cur {
            if s.state == rep {
                return s.rep_counter;
            }
            cur = s.prev.as_deref();
        }
        1
    }

    /// Whether any input was consumed since the path last visited `rep`.
    /// True when `rep` was never visited.
    fn consumed_since(&self, from: &Step, rep: StateId) -> bool {
        let mut cur = Some(from);
        while let Some(s) = cur {
            if s.match_len > 0 {
                return true;
            }
            if s.state == rep {
                return false;
            }
            cur = s.prev.as_deref();
        }
        true
    }

    /// Most recent capture for `group` along the path. Walks to the first
    /// state that closes the group; an empty (unstored) capture stays
    /// unresolved and fails the back-reference.
    fn resolve_backref(&self, from: &Step, group: u32) -> Option<String> {
        let mut cur = Some(from);
        while let Some(s) = cur {
            if self.nfa.state(s.state).group_ends.contains(&group) {
                return s
                    .captures
                    .iter()
                    .find(|(g, _)| *g == group)
                    .map(|(_, text)| text.clone());
            }
            cur = s.prev.as_deref();
        }
        None
    }

    /// Stores the capture text for every group closing at this step:
    /// the concatenated consumed text back to the matching opener.
    fn close_groups(&self, step: &mut Step) {
        let ends = self.nfa.state(step.state).group_ends.clone();
        for group in ends {
            let captured = self.capture_text(step, group);
            if !captured.is_empty() {
                step.captures.push((group, captured));
            }
        }
    }

    fn capture_text(&self, step: &Step, group: u32) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut cur = Some(step);
        while let Some(s) = cur {
            parts.push(s.consumed(self.text));
            if self.nfa.state(s.state).group_starts.contains(&group) {
                break;
            }
            cur = s.prev.as_deref();
        }
        parts.reverse();
        parts.concat()
    }

    fn collect_match(&self, tail: &Rc<Step>) -> Match {
        let mut steps = Vec::new();
        let mut cur = Some(tail.as_ref());
        while let Some(s) = cur {
            steps.push(MatchStep {
                state: s.state,
                position: s.position,
                len: s.match_len,
                captures: s.captures.clone(),
            });
            cur = s.prev.as_deref();
        }
        steps.reverse();

        let position = steps.first().map_or(0, |s| s.position);
        let end = tail.position + tail.match_len;
        Match {
            position,
            text: self.text[position..end].to_string(),
            steps,
        }
    }
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}
