//! Subset construction: NFA to DFA via lazy power-set exploration.

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::state::{StateId, StateSet};
use indexmap::IndexMap;

/// Convert an NFA to a DFA using the powerset construction.
///
/// The DFA start state is the epsilon closure of the NFA start state; the
/// working alphabet is every non-epsilon label reachable from it, collected
/// once up front. Exploration looks up or creates one DFA state per
/// distinct closed set (keyed by the set's sorted ids), so the resulting
/// state graph is independent of processing order. A DFA state's accept
/// flag is fixed at creation: the set intersects the NFA's accepting
/// states. There is no failure mode; the power-set universe is finite.
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    let mut dfa = Dfa::new();
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut worklist: Vec<(StateId, StateSet)> = Vec::new();

    let alphabet = nfa.alphabet();
    let nfa_accepting = nfa.accepting_states();

    let initial = nfa.epsilon_closure(&StateSet::singleton(nfa.start(), nfa.num_states()));
    let initial_id = dfa.add_state(initial.to_vec(), initial.intersects(&nfa_accepting));
    dfa.set_start(initial_id);
    state_mapping.insert(initial.to_vec(), initial_id);
    worklist.push((initial_id, initial));

    while let Some((current_id, current_set)) = worklist.pop() {
        for &symbol in &alphabet {
            let next_set = nfa.move_on_symbol(&current_set, symbol);
            if next_set.is_empty() {
                // Dead end: no transition, no state.
                continue;
            }

            let key = next_set.to_vec();
            let next_id = if let Some(&existing) = state_mapping.get(&key) {
                existing
            } else {
                let id = dfa.add_state(key.clone(), next_set.intersects(&nfa_accepting));
                state_mapping.insert(key, id);
                worklist.push((id, next_set));
                id
            };

            dfa.add_transition(current_id, symbol, next_id);
        }
    }

    dfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::to_postfix;
    use crate::preprocess::preprocess;
    use crate::thompson::postfix_to_nfa;

    fn determinize(pattern: &str) -> (Nfa, Dfa) {
        let nfa = postfix_to_nfa(&to_postfix(&preprocess(pattern).unwrap()).unwrap()).unwrap();
        let dfa = subset_construction(&nfa);
        (nfa, dfa)
    }

    /// Walk a string through the DFA; `None` means it hit a dead end.
    fn walk(dfa: &Dfa, input: &str) -> Option<StateId> {
        let mut state = dfa.start();
        for c in input.chars() {
            state = dfa.transition(state, c)?;
        }
        Some(state)
    }

    fn accepts(dfa: &Dfa, input: &str) -> bool {
        walk(dfa, input).is_some_and(|s| dfa.is_accepting(s))
    }

    #[test]
    fn test_start_closure_makes_star_accepting() {
        // The closure of the NFA start for a* contains the NFA accept.
        let (_, dfa) = determinize("a*");
        assert!(dfa.is_accepting(dfa.start()));
        assert!(accepts(&dfa, ""));
        assert!(accepts(&dfa, "aaa"));
    }

    #[test]
    fn test_single_symbol() {
        let (nfa, dfa) = determinize("a");
        assert_eq!(dfa.num_states(), 2);
        assert!(!dfa.is_accepting(dfa.start()));
        assert!(accepts(&dfa, "a"));
        assert!(!accepts(&dfa, "aa"));

        // The start state stands for exactly the NFA start singleton
        // (no epsilons out of a literal's start).
        assert_eq!(dfa.state_set(dfa.start()), Some(&[nfa.start()][..]));
    }

    #[test]
    fn test_dead_ends_have_no_transition() {
        let (_, dfa) = determinize("ab");
        assert_eq!(dfa.transition(dfa.start(), 'b'), None);
    }

    #[test]
    fn test_union_and_star_language() {
        let (_, dfa) = determinize("(a|b)*c");
        assert!(accepts(&dfa, "c"));
        assert!(accepts(&dfa, "abbac"));
        assert!(!accepts(&dfa, "ab"));
        assert!(!accepts(&dfa, "ca"));
    }

    #[test]
    fn test_optional_and_plus() {
        let (_, dfa) = determinize("a?b+");
        assert!(accepts(&dfa, "b"));
        assert!(accepts(&dfa, "abbb"));
        assert!(!accepts(&dfa, "a"));
        assert!(!accepts(&dfa, "aab"));
    }

    #[test]
    fn test_determinization_is_idempotent() {
        let (nfa, first) = determinize("(a|b)*.a.b.b");
        let second = subset_construction(&nfa);

        assert_eq!(first.num_states(), second.num_states());
        for state in 0..first.num_states() {
            assert_eq!(first.is_accepting(state), second.is_accepting(state));
            assert_eq!(first.state_set(state), second.state_set(state));
        }
    }

    #[test]
    fn test_one_dfa_state_per_distinct_set() {
        let (_, dfa) = determinize("(a|b)*");
        let mut sets: Vec<_> = (0..dfa.num_states())
            .map(|s| dfa.state_set(s).unwrap().to_vec())
            .collect();
        sets.sort();
        sets.dedup();
        assert_eq!(sets.len() as StateId, dfa.num_states());
    }
}
