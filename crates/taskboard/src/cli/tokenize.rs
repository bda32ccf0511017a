//! Shell line tokenizer.
//!
//! Lines are split with POSIX shell quoting rules via `shlex`: single or
//! double quotes group words, quotes may abut unquoted text
//! (`--name="AI System"` is one token), and backslash escapes work outside
//! single quotes. `""` yields an empty token.

use thiserror::Error;

/// Errors from tokenizing a shell line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A quote was opened but never closed, or the line ends in a backslash
    #[error("Unterminated quote or trailing backslash in: {0}")]
    Unbalanced(String),
}

/// Split `line` into tokens.
///
/// # Errors
///
/// Returns `TokenizeError::Unbalanced` if the quoting does not close.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    shlex::split(line).ok_or_else(|| TokenizeError::Unbalanced(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("", &[])]
    #[case("   ", &[])]
    #[case("project list", &["project", "list"])]
    #[case("  task   show\tT0001 ", &["task", "show", "T0001"])]
    #[case(r#"project add "AI System" --budget 10"#, &["project", "add", "AI System", "--budget", "10"])]
    #[case("user add 'Ada Lovelace'", &["user", "add", "Ada Lovelace"])]
    #[case(r#"--name="AI System""#, &["--name=AI System"])]
    #[case(r#"say "" done"#, &["say", "", "done"])]
    #[case(r#""a \"quoted\" word""#, &[r#"a "quoted" word"#])]
    #[case(r#""back\\slash""#, &[r"back\slash"])]
    #[case(r"Smart\ sensor", &["Smart sensor"])]
    fn test_tokenize(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(tokenize(line).unwrap(), expected);
    }

    #[rstest]
    #[case(r#"user add "Alice"#)]
    #[case("user add 'Alice")]
    #[case(r"trailing\")]
    fn test_unbalanced_input(#[case] line: &str) {
        assert_eq!(
            tokenize(line),
            Err(TokenizeError::Unbalanced(line.to_string()))
        );
    }

    proptest! {
        #[test]
        fn prop_plain_words_split_like_split_whitespace(
            words in prop::collection::vec("[a-zA-Z0-9_.@-]{1,8}", 0..6)
        ) {
            let line = words.join("  ");
            prop_assert_eq!(tokenize(&line).unwrap(), words);
        }

        #[test]
        fn prop_quoted_token_survives(word in "[a-zA-Z0-9 ]{0,12}") {
            let line = format!("cmd \"{word}\"");
            let tokens = tokenize(&line).unwrap();
            prop_assert_eq!(tokens, vec!["cmd".to_string(), word]);
        }
    }
}
