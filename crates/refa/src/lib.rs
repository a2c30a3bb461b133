//! Compile regular expressions into finite automata.
//!
//! The pipeline has three stages plus an optional fourth:
//! [`preprocess()`] inserts explicit concatenation markers,
//! [`to_postfix()`] converts the pattern to a postfix token sequence
//! (shunting-yard), [`postfix_to_nfa()`] builds an NFA via Thompson's
//! construction, and [`subset_construction()`] determinizes it into a
//! [`Dfa`].
//!
//! Supported operators: concatenation (implicit or `.`), union `|`,
//! Kleene star `*`, Kleene plus `+`, optional `?`, and — at the
//! postfix level — intersection `&`.

mod dfa;
mod dot;
mod error;
mod label;
mod nfa;
mod parser;
mod preprocess;
mod state;
mod subset_construction;
mod thompson;

pub use dfa::Dfa;
pub use dot::{dfa_dot, nfa_dot, render_to_file};
pub use error::Error;
pub use label::Label;
pub use nfa::Nfa;
pub use parser::{Token, postfix_string, to_postfix};
pub use preprocess::preprocess;
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use thompson::postfix_to_nfa;

/// Run the full pattern-to-NFA pipeline.
pub fn compile(pattern: &str) -> Result<Nfa, Error> {
    let preprocessed = preprocess(pattern)?;
    let postfix = to_postfix(&preprocessed)?;
    postfix_to_nfa(&postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_single_symbol() {
        let nfa = compile("a").unwrap();
        assert_eq!(nfa.num_states(), 2);
        assert!(nfa.is_accepting(nfa.accept()));
    }

    #[test]
    fn test_pipeline_yields_one_start_one_accept() {
        for pattern in ["a", "ab", "a|b", "a*", "(a|b)*c", "a?b+c"] {
            let nfa = compile(pattern).unwrap();
            let reachable = nfa.reachable_states();
            assert!(reachable.contains(&nfa.start()), "pattern {pattern}");
            assert!(reachable.contains(&nfa.accept()), "pattern {pattern}");

            let accepting: Vec<_> = reachable
                .iter()
                .filter(|&&s| nfa.is_accepting(s))
                .collect();
            assert_eq!(accepting.len(), 1, "pattern {pattern}");
        }
    }

    #[test]
    fn test_pipeline_errors_propagate() {
        assert!(matches!(compile("*a"), Err(Error::InvalidBoundary { .. })));
        assert!(matches!(compile("a$"), Err(Error::InvalidCharacter('$'))));
        assert!(matches!(compile("a("), Err(Error::InvalidBoundary { .. })));
        assert!(matches!(compile("(a"), Err(Error::UnbalancedParentheses)));
        assert!(matches!(compile(""), Err(Error::MalformedPostfix)));
    }

    #[test]
    fn test_pipeline_then_determinize() {
        let nfa = compile("(a|b)*c").unwrap();
        let dfa = subset_construction(&nfa);
        assert!(dfa.num_states() >= 2);
        assert!(!dfa.is_accepting(dfa.start()));
    }
}
