//! Transition labels for automata.

use std::fmt;

/// A transition label: either a real input symbol or the reserved epsilon
/// (empty) label. Epsilon can never be a real input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// The empty transition.
    Epsilon,
    /// A single input symbol.
    Symbol(char),
}

impl Label {
    /// Check whether this label is the epsilon label.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// The input symbol, or `None` for epsilon.
    #[inline]
    pub fn symbol(self) -> Option<char> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(c) => Some(c),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(c) => write!(f, "{c}"),
        }
    }
}
