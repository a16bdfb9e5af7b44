//! Splitting console lines into tokens.
//!
//! Lines are split with POSIX shell quoting rules: whitespace separates
//! tokens, double quotes group text and honour backslash escapes, single
//! quotes group text literally and a backslash outside quotes escapes the
//! next character.

use thiserror::Error;

use crate::error::ArgumentParseError;

/// A line that could not be split into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A quote was never closed or the line ended with a lone backslash.
    #[error("Unbalanced quote or trailing escape in: {0}")]
    Unbalanced(String),
}

impl From<TokenizeError> for ArgumentParseError {
    fn from(err: TokenizeError) -> Self {
        match err {
            TokenizeError::Unbalanced(line) => ArgumentParseError::new("closed quotes", line),
        }
    }
}

/// Split a line into tokens.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    shlex::split(line).ok_or_else(|| TokenizeError::Unbalanced(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(line: &str) -> Vec<String> {
        tokenize(line).unwrap()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(ok("  heal   50 "), vec!["heal", "50"]);
        assert!(ok("   ").is_empty());
    }

    #[test]
    fn double_quotes_group_and_escape() {
        assert_eq!(
            ok(r#"say "hello \"world\"" now"#),
            vec!["say", "hello \"world\"", "now"]
        );
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(ok(r"say 'a \ b'"), vec!["say", r"a \ b"]);
    }

    #[test]
    fn quotes_join_adjacent_text() {
        assert_eq!(ok(r#"name="steve jobs""#), vec!["name=steve jobs"]);
    }

    #[test]
    fn empty_quotes_are_a_token() {
        assert_eq!(ok(r#"set "" x"#), vec!["set", "", "x"]);
    }

    #[test]
    fn backslash_escapes_space() {
        assert_eq!(ok(r"cd my\ dir"), vec!["cd", "my dir"]);
    }

    #[test]
    fn unbalanced_input_is_an_error() {
        assert!(matches!(tokenize("say \"oops"), Err(TokenizeError::Unbalanced(_))));
        assert!(matches!(tokenize("say 'oops"), Err(TokenizeError::Unbalanced(_))));
        assert!(matches!(tokenize("say oops\\"), Err(TokenizeError::Unbalanced(_))));
    }

    #[test]
    fn error_converts_to_argument_error() {
        let err: ArgumentParseError = TokenizeError::Unbalanced("say \"oops".into()).into();
        assert_eq!(err.to_string(), "Expected closed quotes, got 'say \"oops'");
    }
}
