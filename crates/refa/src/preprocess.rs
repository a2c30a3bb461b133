//! Pattern preprocessing: validation and explicit concatenation markers.

use crate::error::Error;

/// Characters that may end the left-hand side of an implicit concatenation.
fn ends_operand(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ')' | '*' | '+' | '?')
}

/// Characters that may start the right-hand side of an implicit concatenation.
fn starts_operand(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '('
}

/// Validate a raw pattern and insert an explicit `.` wherever two adjacent
/// characters concatenate implicitly (e.g. `ab` becomes `a.b`, `(a|b)*c`
/// becomes `(a|b)*.c`).
///
/// The accepted alphabet is ASCII alphanumerics plus `( ) * + ? | .`.
/// Validation runs before any transformation:
/// a character outside the alphabet is [`Error::InvalidCharacter`]; a
/// pattern starting with `*`, `?`, `|` or `)`, or ending with `|` or `(`,
/// is [`Error::InvalidBoundary`]. Patterns shorter than two characters are
/// returned unmodified.
pub fn preprocess(pattern: &str) -> Result<String, Error> {
    for c in pattern.chars() {
        if !c.is_ascii_alphanumeric() && !matches!(c, '(' | ')' | '*' | '+' | '?' | '|' | '.') {
            return Err(Error::InvalidCharacter(c));
        }
    }

    if let Some(first) = pattern.chars().next() {
        if matches!(first, '*' | '?' | '|' | ')') {
            return Err(Error::InvalidBoundary {
                ch: first,
                leading: true,
            });
        }
    }
    if let Some(last) = pattern.chars().last() {
        if matches!(last, '|' | '(') {
            return Err(Error::InvalidBoundary {
                ch: last,
                leading: false,
            });
        }
    }

    let chars: Vec<char> = pattern.chars().collect();
    if chars.len() < 2 {
        return Ok(pattern.to_owned());
    }

    let mut result = String::with_capacity(chars.len() * 2);
    for pair in chars.windows(2) {
        result.push(pair[0]);
        if ends_operand(pair[0]) && starts_operand(pair[1]) {
            result.push('.');
        }
    }
    result.push(chars[chars.len() - 1]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_concatenation() {
        assert_eq!(preprocess("ab").unwrap(), "a.b");
        assert_eq!(preprocess("abc").unwrap(), "a.b.c");
        assert_eq!(preprocess("(a|b)*c").unwrap(), "(a|b)*.c");
        assert_eq!(preprocess("a(b)").unwrap(), "a.(b)");
        assert_eq!(preprocess("a?b").unwrap(), "a?.b");
        assert_eq!(preprocess("a+b").unwrap(), "a+.b");
    }

    #[test]
    fn test_no_insertion_needed() {
        assert_eq!(preprocess("a|b").unwrap(), "a|b");
        assert_eq!(preprocess("a*").unwrap(), "a*");
        assert_eq!(preprocess("(a)").unwrap(), "(a)");
    }

    #[test]
    fn test_short_patterns_unmodified() {
        assert_eq!(preprocess("").unwrap(), "");
        assert_eq!(preprocess("a").unwrap(), "a");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        for pattern in ["ab", "(a|b)*c", "a?b+c", "ab|cd"] {
            let once = preprocess(pattern).unwrap();
            assert_eq!(preprocess(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_invalid_character() {
        assert!(matches!(
            preprocess("a#b"),
            Err(Error::InvalidCharacter('#'))
        ));
        // Intersection is not part of the raw-pattern alphabet.
        assert!(matches!(
            preprocess("a&b"),
            Err(Error::InvalidCharacter('&'))
        ));
    }

    #[test]
    fn test_invalid_leading_character() {
        for pattern in ["*a", "?a", "|a", ")a"] {
            assert!(matches!(
                preprocess(pattern),
                Err(Error::InvalidBoundary { leading: true, .. })
            ));
        }
    }

    #[test]
    fn test_invalid_trailing_character() {
        for pattern in ["a|", "a("] {
            assert!(matches!(
                preprocess(pattern),
                Err(Error::InvalidBoundary { leading: false, .. })
            ));
        }
    }
}
