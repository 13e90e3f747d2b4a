//! Textual graph listing for debugging and the CLI `dump` command.

use std::fmt::Write as _;

use super::{Nfa, StateKind};

fn kind_name(kind: &StateKind) -> &'static str {
    match kind {
        StateKind::Literal(_) => "literal",
        StateKind::MultiMatch(_) => "multi match",
        StateKind::NegativeMultiMatch(_) => "neg multi match",
        StateKind::MatchAll => "match all",
        StateKind::UnicodeClass { .. } => "unicode class",
        StateKind::BackReference(_) => "back reference",
        StateKind::Boundary(_) => "boundary",
        StateKind::Repetition { .. } => "repetition",
        StateKind::Expression => "expression",
        StateKind::End => "end",
    }
}

fn ids_line(out: &mut String, name: &str, ids: &[u32]) {
    if ids.is_empty() {
        return;
    }
    let joined = ids
        .iter()
        .map(|id| format!("s{id}"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "   {name}: {joined}");
}

fn groups_line(out: &mut String, name: &str, groups: &[u32]) {
    if groups.is_empty() {
        return;
    }
    let joined = groups
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "   {name}: {joined}");
}

/// One line per state with its label, edges, and group marks.
pub(crate) fn dump(nfa: &Nfa) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "entry s{}", nfa.entry());
    for (id, state) in nfa.iter() {
        if state.label.is_empty() {
            let _ = writeln!(out, "s{id} {}", kind_name(&state.kind));
        } else {
            let _ = writeln!(out, "s{id} {} `{}`", kind_name(&state.kind), state.label);
        }
        ids_line(&mut out, "out", &state.out);
        ids_line(&mut out, "loop", &state.loop_edges);
        ids_line(&mut out, "back", &state.loop_back);
        groups_line(&mut out, "start", &state.group_starts);
        groups_line(&mut out, "end", &state.group_ends);
    }
    out
}
