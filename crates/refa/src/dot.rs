//! Graphviz rendering of automata.
//!
//! Emits dot source via breadth-first traversal and optionally drives the
//! external `dot` toolchain. Rendering failures are reportable but never
//! touch the in-memory automaton.

use crate::dfa::Dfa;
use crate::error::Error;
use crate::nfa::Nfa;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;

const HEADER: &str = "digraph G {\n  rankdir=LR;\n  entry [label=\"\" shape=plaintext];\n";

fn push_node(dot: &mut String, id: u32, accepting: bool) {
    let shape = if accepting { "doublecircle" } else { "circle" };
    dot.push_str(&format!("  s{id} [label=\"S{id}\" shape={shape}];\n"));
}

/// Render an NFA as Graphviz dot source.
///
/// One node per reachable state (arena ids are the node identities), one
/// edge per (state, label, target) triple with epsilon labeled `ε`.
/// Output is deterministic: states in breadth-first id-normalized order,
/// edges sorted per state.
pub fn nfa_dot(nfa: &Nfa) -> String {
    let mut dot = String::from(HEADER);

    let reachable = nfa.reachable_states();
    for &state in &reachable {
        push_node(&mut dot, state, nfa.is_accepting(state));
    }
    dot.push_str(&format!("  entry -> s{} [label=\"start\"];\n", nfa.start()));

    for &state in &reachable {
        let mut edges: Vec<(String, u32)> = Vec::new();
        for (label, targets) in nfa.moves(state) {
            for target in targets.iter() {
                edges.push((label.to_string(), target));
            }
        }
        edges.sort_unstable();
        for (label, target) in edges {
            dot.push_str(&format!("  s{state} -> s{target} [label=\"{label}\"];\n"));
        }
    }

    dot.push_str("}\n");
    dot
}

/// Render a DFA as Graphviz dot source.
pub fn dfa_dot(dfa: &Dfa) -> String {
    let mut dot = String::from(HEADER);

    for state in 0..dfa.num_states() {
        push_node(&mut dot, state, dfa.is_accepting(state));
    }
    dot.push_str(&format!("  entry -> s{} [label=\"start\"];\n", dfa.start()));

    let mut edges: Vec<(u32, char, u32)> = dfa.transitions().collect();
    edges.sort_unstable();
    for (source, symbol, target) in edges {
        dot.push_str(&format!("  s{source} -> s{target} [label=\"{symbol}\"];\n"));
    }

    dot.push_str("}\n");
    dot
}

/// Write `{base}.dot` and run the Graphviz toolchain to produce
/// `{base}.png`. Returns the png path on success.
///
/// A missing or failing `dot` binary yields [`Error::Rendering`]; the dot
/// file is still written in that case.
pub fn render_to_file(dot_source: &str, base: &str) -> Result<PathBuf, Error> {
    let dot_path = PathBuf::from(format!("{base}.dot"));
    let png_path = PathBuf::from(format!("{base}.png"));

    fs::write(&dot_path, dot_source)?;

    let status = Command::new("dot")
        .arg("-Tpng")
        .arg(&dot_path)
        .arg("-o")
        .arg(&png_path)
        .status()?;
    if !status.success() {
        return Err(Error::Rendering(io::Error::other(format!(
            "dot exited with status {status}"
        ))));
    }

    Ok(png_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::to_postfix;
    use crate::preprocess::preprocess;
    use crate::subset_construction::subset_construction;
    use crate::thompson::postfix_to_nfa;

    fn compile(pattern: &str) -> Nfa {
        postfix_to_nfa(&to_postfix(&preprocess(pattern).unwrap()).unwrap()).unwrap()
    }

    #[test]
    fn test_nfa_dot_shapes_and_edges() {
        let nfa = compile("a");
        let dot = nfa_dot(&nfa);

        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains(&format!("s{} [label=\"S{}\" shape=doublecircle]", nfa.accept(), nfa.accept())));
        assert!(dot.contains(&format!("s{} [label=\"S{}\" shape=circle]", nfa.start(), nfa.start())));
        assert!(dot.contains(&format!("entry -> s{} [label=\"start\"]", nfa.start())));
        assert!(dot.contains("[label=\"a\"]"));
    }

    #[test]
    fn test_nfa_dot_epsilon_edges() {
        let dot = nfa_dot(&compile("a|b"));
        assert!(dot.contains("[label=\"ε\"]"));
    }

    #[test]
    fn test_nfa_dot_covers_reachable_states() {
        let nfa = compile("(a|b)*c");
        let dot = nfa_dot(&nfa);
        for state in nfa.reachable_states() {
            assert!(dot.contains(&format!("s{state} [label=\"S{state}\"")));
        }
    }

    #[test]
    fn test_dfa_dot() {
        let dfa = subset_construction(&compile("a*"));
        let dot = dfa_dot(&dfa);

        // The a* start state is accepting.
        assert!(dot.contains(&format!(
            "s{} [label=\"S{}\" shape=doublecircle]",
            dfa.start(),
            dfa.start()
        )));
        assert!(dot.contains("[label=\"a\"]"));
        assert!(!dot.contains("ε"));
    }
}
