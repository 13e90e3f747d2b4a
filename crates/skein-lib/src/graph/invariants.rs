//! Structural validation of compiled graphs.
//!
//! The parser is expected to uphold these; `check` runs after every
//! compile in debug builds, and the tests run `validate` over a corpus.

use super::{Nfa, StateId, StateKind};

pub(crate) fn check(nfa: &Nfa) {
    if cfg!(debug_assertions)
        && let Err(violation) = validate(nfa)
    {
        panic!("compiled graph violates an invariant: {violation}");
    }
}

pub(crate) fn validate(nfa: &Nfa) -> Result<(), String> {
    if nfa.len() == 0 {
        return Err("graph has no states".into());
    }
    let in_range = |id: StateId| (id as usize) < nfa.len();
    if !in_range(nfa.entry()) {
        return Err(format!("entry s{} out of range", nfa.entry()));
    }

    let mut end_states = Vec::new();
    for (id, state) in nfa.iter() {
        let edges = state.out.len() + state.loop_edges.len() + state.loop_back.len();
        if state.is_end() {
            end_states.push(id);
            if edges != 0 {
                return Err(format!("end state s{id} has outgoing edges"));
            }
            continue;
        }
        if edges == 0 {
            return Err(format!("state s{id} has no outgoing edges"));
        }
        if !state.loop_edges.is_empty() && !state.is_repetition() {
            return Err(format!("non-repetition state s{id} has loop edges"));
        }
        for &target in state
            .out
            .iter()
            .chain(&state.loop_edges)
            .chain(&state.loop_back)
        {
            if !in_range(target) {
                return Err(format!("state s{id} has an edge to missing s{target}"));
            }
        }
        for &target in &state.loop_back {
            if !nfa.state(target).is_repetition() {
                return Err(format!(
                    "loop-back edge s{id} -> s{target} does not target a repetition"
                ));
            }
        }
        if state.is_repetition() {
            if state.loop_edges.is_empty() {
                return Err(format!("repetition s{id} has no loop edges"));
            }
            if !state.group_starts.is_empty() || !state.group_ends.is_empty() {
                return Err(format!("repetition s{id} carries group marks"));
            }
            if let StateKind::Repetition { min, max } = state.kind
                && min > max
            {
                return Err(format!("repetition s{id} has min > max"));
            }
        }
    }

    match end_states.as_slice() {
        [single] if *single == nfa.end() => {}
        [single] => {
            return Err(format!(
                "end state s{single} is not the recorded terminal s{}",
                nfa.end()
            ));
        }
        [] => return Err("graph has no end state".into()),
        many => return Err(format!("graph has {} end states", many.len())),
    }

    for group in 1..=nfa.group_count() {
        let starts = nfa
            .iter()
            .filter(|(_, s)| s.group_starts.contains(&group))
            .count();
        let ends = nfa
            .iter()
            .filter(|(_, s)| s.group_ends.contains(&group))
            .count();
        if starts != 1 {
            return Err(format!("group {group} opens at {starts} states"));
        }
        if ends == 0 {
            return Err(format!("group {group} never closes"));
        }
    }

    Ok(())
}
