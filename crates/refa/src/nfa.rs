//! Nondeterministic finite automaton over an arena of states.

use crate::label::Label;
use crate::state::{StateId, StateSet};
use std::collections::{HashMap, VecDeque};

/// One state in the arena: an accept flag plus a mapping from label to the
/// set of successor states. Nondeterminism permits multiple successors per
/// label.
#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    pub(crate) accepting: bool,
    pub(crate) moves: HashMap<Label, StateSet>,
}

/// A complete NFA: an arena of states with one designated start state and
/// one designated accept state, both created during the same construction.
///
/// The arena index is a state's identity and its diagnostic id; no two
/// `Nfa`s share states.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

impl Nfa {
    pub(crate) fn from_parts(states: Vec<State>, start: StateId, accept: StateId) -> Self {
        Self {
            states,
            start,
            accept,
        }
    }

    /// The designated start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The designated accept state.
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// Total number of states in the arena, including states left behind by
    /// intermediate composition steps (e.g. intersection operands).
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Whether the given state is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states[state as usize].accepting
    }

    /// The outgoing transitions of a state.
    pub fn moves(&self, state: StateId) -> impl Iterator<Item = (Label, &StateSet)> {
        self.states[state as usize]
            .moves
            .iter()
            .map(|(&label, targets)| (label, targets))
    }

    /// The successor set of a state on one label, if any.
    pub fn targets(&self, state: StateId, label: Label) -> Option<&StateSet> {
        self.states[state as usize].moves.get(&label)
    }

    /// All states reachable from the start state, in breadth-first
    /// discovery order, following every label including epsilon.
    pub fn reachable_states(&self) -> Vec<StateId> {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(self.start);

        while let Some(state) = queue.pop_front() {
            if visited.contains(state) {
                continue;
            }
            visited.insert(state);
            order.push(state);

            for (_, targets) in self.moves(state) {
                for target in targets.iter() {
                    if !visited.contains(target) {
                        queue.push_back(target);
                    }
                }
            }
        }

        order
    }

    /// Every non-epsilon symbol on any transition reachable from the start
    /// state, sorted for deterministic iteration.
    pub fn alphabet(&self) -> Vec<char> {
        let mut symbols: Vec<char> = Vec::new();
        for state in self.reachable_states() {
            for (label, _) in self.moves(state) {
                if let Some(c) = label.symbol() {
                    symbols.push(c);
                }
            }
        }
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// All accepting states, as a set.
    pub fn accepting_states(&self) -> StateSet {
        let mut accepting = StateSet::with_capacity(self.states.len());
        for (id, state) in self.states.iter().enumerate() {
            if state.accepting {
                accepting.insert(id as StateId);
            }
        }
        accepting
    }

    /// Compute the epsilon closure of a set of states: the smallest
    /// superset closed under following epsilon-labeled transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(state) = stack.pop() {
            if closure.contains(state) {
                continue;
            }
            closure.insert(state);

            if let Some(targets) = self.targets(state, Label::Epsilon) {
                for target in targets.iter() {
                    if !closure.contains(target) {
                        stack.push(target);
                    }
                }
            }
        }

        closure
    }

    /// The states reachable from a set on a given symbol, epsilon-closed.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut reached = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            if let Some(targets) = self.targets(state, Label::Symbol(symbol)) {
                reached.union_with(targets);
            }
        }
        self.epsilon_closure(&reached)
    }
}
