//! Deterministic finite automaton produced by subset construction.

use crate::state::{StateId, StateSet};
use std::collections::HashMap;
use std::fmt;

/// A DFA over reachable sets of NFA states.
///
/// Each DFA state stands for one distinct epsilon-closed set of NFA states;
/// that set is its identity and is kept around for inspection and display.
/// Each (state, symbol) pair has at most one successor and epsilon never
/// appears as a symbol.
#[derive(Debug, Clone)]
pub struct Dfa {
    num_states: StateId,
    start: StateId,
    accepting: StateSet,
    transitions: HashMap<(StateId, char), StateId>,
    /// DFA state -> the sorted NFA-state-set it stands for.
    state_sets: HashMap<StateId, Vec<StateId>>,
}

impl Dfa {
    pub(crate) fn new() -> Self {
        Self {
            num_states: 0,
            start: 0,
            accepting: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            state_sets: HashMap::new(),
        }
    }

    /// Add a new state standing for the given NFA-state-set; returns its id.
    pub(crate) fn add_state(&mut self, nfa_states: Vec<StateId>, accepting: bool) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        if accepting {
            self.accepting.insert(id);
        }
        self.state_sets.insert(id, nfa_states);
        id
    }

    pub(crate) fn set_start(&mut self, state: StateId) {
        self.start = state;
    }

    pub(crate) fn add_transition(&mut self, source: StateId, symbol: char, destination: StateId) {
        self.transitions.insert((source, symbol), destination);
    }

    /// The start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Whether the given state is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// The successor of a state on a symbol, if any (no transition is a
    /// dead end).
    pub fn transition(&self, source: StateId, symbol: char) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// All transitions as (source, symbol, destination) triples.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// The sorted NFA-state-set a DFA state stands for.
    pub fn state_set(&self, state: StateId) -> Option<&[StateId]> {
        self.state_sets.get(&state).map(Vec::as_slice)
    }

    /// The outgoing transitions of one state, sorted by symbol.
    fn sorted_moves(&self, state: StateId) -> Vec<(char, StateId)> {
        let mut moves: Vec<(char, StateId)> = self
            .transitions
            .iter()
            .filter(|((src, _), _)| *src == state)
            .map(|(&(_, sym), &dst)| (sym, dst))
            .collect();
        moves.sort_unstable();
        moves
    }
}

fn fmt_id_set(f: &mut fmt::Formatter<'_>, ids: &[StateId]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{id}")?;
    }
    write!(f, "}}")
}

/// Text dump: one line per state with its NFA id set and accept flag, one
/// indented line per outgoing transition with the symbol and target id set.
impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in 0..self.num_states {
            write!(f, "state {state} ")?;
            if let Some(ids) = self.state_set(state) {
                fmt_id_set(f, ids)?;
            }
            if self.is_accepting(state) {
                write!(f, " accepting")?;
            }
            if state == self.start {
                write!(f, " (start)")?;
            }
            writeln!(f)?;
            for (symbol, target) in self.sorted_moves(state) {
                write!(f, "  {symbol} -> ")?;
                if let Some(ids) = self.state_set(target) {
                    fmt_id_set(f, ids)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
