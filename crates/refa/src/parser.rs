//! Infix-to-postfix conversion via the shunting-yard algorithm.

use crate::error::Error;
use std::fmt;

/// A single token of a postfix (RPN) regular expression.
///
/// Operand-vs-operator is decided once, here; later stages match on the
/// variant instead of re-testing character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// An input symbol.
    Literal(char),
    /// Explicit concatenation (`.`).
    Concat,
    /// Union (`|`).
    Union,
    /// Kleene star (`*`): zero or more.
    Star,
    /// Kleene plus (`+`): one or more.
    Plus,
    /// Optional (`?`): zero or one.
    Optional,
    /// Intersection (`&`): synchronized cross product.
    Intersect,
}

impl Token {
    /// Binding strength; higher binds tighter. Operands have no precedence.
    fn precedence(self) -> u8 {
        match self {
            Token::Star | Token::Plus | Token::Optional => 3,
            Token::Concat => 2,
            Token::Union | Token::Intersect => 1,
            Token::Literal(_) => 0,
        }
    }
}

impl TryFrom<char> for Token {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Error> {
        match c {
            '.' => Ok(Token::Concat),
            '|' => Ok(Token::Union),
            '*' => Ok(Token::Star),
            '+' => Ok(Token::Plus),
            '?' => Ok(Token::Optional),
            '&' => Ok(Token::Intersect),
            c if c.is_ascii_alphanumeric() => Ok(Token::Literal(c)),
            c => Err(Error::UnexpectedToken(c)),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Token::Literal(c) => *c,
            Token::Concat => '.',
            Token::Union => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Optional => '?',
            Token::Intersect => '&',
        };
        write!(f, "{c}")
    }
}

/// Format a postfix token sequence as a plain string (e.g. `ab|*c.`).
pub fn postfix_string(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}

/// Convert a preprocessed pattern (explicit concatenation markers, balanced
/// parentheses) into a postfix token sequence.
///
/// Shunting-yard with the precedence table star/plus/optional = 3,
/// concatenation = 2, union/intersection = 1. The greater-or-equal pop rule
/// makes every operator left-associative. Parentheses group but are never
/// emitted. A `)` that empties the stack without finding `(`, or a `(`
/// still on the stack at the end, is [`Error::UnbalancedParentheses`].
pub fn to_postfix(pattern: &str) -> Result<Vec<Token>, Error> {
    // Stack entries: Some(op) for operators, None for '('.
    let mut stack: Vec<Option<Token>> = Vec::new();
    let mut output = Vec::with_capacity(pattern.len());

    for c in pattern.chars() {
        match c {
            c if c.is_ascii_alphanumeric() => output.push(Token::Literal(c)),
            '(' => stack.push(None),
            ')' => loop {
                match stack.pop() {
                    Some(Some(op)) => output.push(op),
                    Some(None) => break,
                    None => return Err(Error::UnbalancedParentheses),
                }
            },
            c => {
                let token = Token::try_from(c)?;
                while let Some(Some(top)) = stack.last() {
                    if top.precedence() >= token.precedence() {
                        output.push(*top);
                        stack.pop();
                    } else {
                        break;
                    }
                }
                stack.push(Some(token));
            }
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            Some(op) => output.push(op),
            None => return Err(Error::UnbalancedParentheses),
        }
    }

    Ok(output)
}
