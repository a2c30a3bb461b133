//! Error types for the compilation pipeline.

use std::fmt;
use std::io;

/// Errors raised while compiling a pattern or rendering an automaton.
///
/// Every syntactic error aborts its stage immediately and propagates
/// unchanged to the caller; none of the stages recover or retry.
/// `Rendering` is reported at the boundary that invoked rendering and
/// leaves the in-memory automaton valid.
#[derive(Debug)]
pub enum Error {
    /// The pattern contains a character outside the supported alphabet.
    InvalidCharacter(char),
    /// The pattern starts or ends with a syntactically illegal operator.
    InvalidBoundary { ch: char, leading: bool },
    /// A `)` without a matching `(`, or a leftover `(` at end of input.
    UnbalancedParentheses,
    /// A token that is neither an operand nor a known operator.
    UnexpectedToken(char),
    /// The postfix stream did not reduce to exactly one automaton.
    MalformedPostfix,
    /// Writing the dot file or running the Graphviz toolchain failed.
    Rendering(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCharacter(c) => write!(f, "invalid character: '{c}'"),
            Error::InvalidBoundary { ch, leading: true } => {
                write!(f, "pattern cannot start with '{ch}'")
            }
            Error::InvalidBoundary { ch, leading: false } => {
                write!(f, "pattern cannot end with '{ch}'")
            }
            Error::UnbalancedParentheses => write!(f, "unbalanced parentheses"),
            Error::UnexpectedToken(c) => write!(f, "unexpected character: '{c}'"),
            Error::MalformedPostfix => write!(
                f,
                "malformed postfix expression: does not reduce to exactly one automaton"
            ),
            Error::Rendering(err) => write!(f, "rendering failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Rendering(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Rendering(err)
    }
}
