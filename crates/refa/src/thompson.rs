//! Thompson's construction: postfix token sequence to NFA.

use crate::error::Error;
use crate::label::Label;
use crate::nfa::{Nfa, State};
use crate::parser::Token;
use crate::state::{StateId, StateSet};
use std::collections::{HashMap, HashSet, VecDeque};

/// An intermediate automaton fragment: a start and an accept state pair
/// into the builder's arena. The accept state stays accepting until the
/// fragment is consumed by a further composition step.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

#[derive(Default)]
struct Builder {
    states: Vec<State>,
    stack: Vec<Fragment>,
}

impl Builder {
    fn new_state(&mut self, accepting: bool) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State {
            accepting,
            moves: HashMap::new(),
        });
        id
    }

    fn add_move(&mut self, from: StateId, label: Label, to: StateId) {
        let capacity = self.states.len();
        self.states[from as usize]
            .moves
            .entry(label)
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(to);
    }

    fn set_accepting(&mut self, state: StateId, accepting: bool) {
        self.states[state as usize].accepting = accepting;
    }

    fn pop(&mut self) -> Result<Fragment, Error> {
        self.stack.pop().ok_or(Error::MalformedPostfix)
    }

    /// Operand: a fresh 2-state fragment with one labeled transition.
    fn literal(&mut self, symbol: char) {
        let start = self.new_state(false);
        let accept = self.new_state(true);
        self.add_move(start, Label::Symbol(symbol), accept);
        self.stack.push(Fragment { start, accept });
    }

    /// Concatenation: left's accept stops accepting and epsilon-connects
    /// to right's start.
    fn concat(&mut self) -> Result<(), Error> {
        let right = self.pop()?;
        let left = self.pop()?;

        self.set_accepting(left.accept, false);
        self.add_move(left.accept, Label::Epsilon, right.start);

        self.stack.push(Fragment {
            start: left.start,
            accept: right.accept,
        });
        Ok(())
    }

    /// Union: a fresh start branches into both operands, both former
    /// accepts merge into a fresh accept.
    fn union(&mut self) -> Result<(), Error> {
        let right = self.pop()?;
        let left = self.pop()?;

        let start = self.new_state(false);
        let accept = self.new_state(true);

        self.add_move(start, Label::Epsilon, left.start);
        self.add_move(start, Label::Epsilon, right.start);

        self.set_accepting(left.accept, false);
        self.set_accepting(right.accept, false);
        self.add_move(left.accept, Label::Epsilon, accept);
        self.add_move(right.accept, Label::Epsilon, accept);

        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    /// Kleene star / plus / optional share one wiring scheme:
    /// `skip` adds the zero-iteration path from the new start,
    /// `repeat` adds the loop edge from the old accept to the old start.
    fn quantify(&mut self, skip: bool, repeat: bool) -> Result<(), Error> {
        let inner = self.pop()?;

        let start = self.new_state(false);
        let accept = self.new_state(true);

        self.add_move(start, Label::Epsilon, inner.start);
        if skip {
            self.add_move(start, Label::Epsilon, accept);
        }

        self.set_accepting(inner.accept, false);
        if repeat {
            self.add_move(inner.accept, Label::Epsilon, inner.start);
        }
        self.add_move(inner.accept, Label::Epsilon, accept);

        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    /// Intersection: the synchronized cross product of both operands.
    ///
    /// A pair state (s1, s2) steps on a label only when both sides carry a
    /// transition on that exact label; epsilon pairs only with epsilon and
    /// no closure is applied first, so operands that hide their symbol
    /// transitions behind epsilons may yield an incomplete product. This
    /// mirrors the construction this crate inherited and is a known
    /// limitation.
    fn intersect(&mut self) -> Result<(), Error> {
        let right = self.pop()?;
        let left = self.pop()?;

        let mut pairs: HashMap<(StateId, StateId), StateId> = HashMap::new();
        let start = self.pair_state(&mut pairs, left.start, right.start);

        let mut queue = VecDeque::from([(left.start, right.start)]);
        let mut visited: HashSet<(StateId, StateId)> = queue.iter().copied().collect();

        while let Some((s1, s2)) = queue.pop_front() {
            let combined = self.pair_state(&mut pairs, s1, s2);

            // Clone the left side's moves so the arena can grow while we
            // materialize successor pairs.
            let moves1 = self.states[s1 as usize].moves.clone();
            for (label, targets1) in &moves1 {
                let Some(targets2) = self.states[s2 as usize].moves.get(label).cloned() else {
                    continue;
                };
                for t1 in targets1.iter() {
                    for t2 in targets2.iter() {
                        let next = self.pair_state(&mut pairs, t1, t2);
                        self.add_move(combined, *label, next);
                        if visited.insert((t1, t2)) {
                            queue.push_back((t1, t2));
                        }
                    }
                }
            }
        }

        // One common accept; every pair whose both halves accept feeds it.
        let accept = self.new_state(true);
        for (&(s1, s2), &combined) in &pairs {
            if self.states[s1 as usize].accepting && self.states[s2 as usize].accepting {
                self.add_move(combined, Label::Epsilon, accept);
            }
        }

        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    fn pair_state(
        &mut self,
        pairs: &mut HashMap<(StateId, StateId), StateId>,
        s1: StateId,
        s2: StateId,
    ) -> StateId {
        if let Some(&id) = pairs.get(&(s1, s2)) {
            return id;
        }
        let id = self.new_state(false);
        pairs.insert((s1, s2), id);
        id
    }

    fn finish(mut self) -> Result<Nfa, Error> {
        let fragment = self.pop()?;
        if !self.stack.is_empty() {
            return Err(Error::MalformedPostfix);
        }
        Ok(Nfa::from_parts(self.states, fragment.start, fragment.accept))
    }
}

/// Build a complete NFA from a postfix token sequence.
///
/// Processes tokens left to right over a fragment stack; when all tokens
/// are consumed exactly one fragment must remain, otherwise the stream was
/// malformed ([`Error::MalformedPostfix`]).
pub fn postfix_to_nfa(tokens: &[Token]) -> Result<Nfa, Error> {
    let mut builder = Builder::default();

    for &token in tokens {
        match token {
            Token::Literal(c) => builder.literal(c),
            Token::Concat => builder.concat()?,
            Token::Union => builder.union()?,
            Token::Star => builder.quantify(true, true)?,
            Token::Plus => builder.quantify(false, true)?,
            Token::Optional => builder.quantify(true, false)?,
            Token::Intersect => builder.intersect()?,
        }
    }

    builder.finish()
}
