//! Databinding lexer.
//!
//! Splits a string into literal text runs and the two-character binding
//! delimiters. Matching is purely lexical: nesting, quoting and the syntax of
//! the enclosed expression are never considered, and any input (including
//! unbalanced delimiters) lexes successfully.

pub const MUSTACHE_OPEN: &str = "{{";
pub const MUSTACHE_CLOSE: &str = "}}";
pub const BRACKET_OPEN: &str = "[[";
pub const BRACKET_CLOSE: &str = "]]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    MustacheOpen,
    MustacheClose,
    BracketOpen,
    BracketClose,
}

impl<'a> Token<'a> {
    /// Source text of the token. Delimiters render as their two-character sequence.
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Literal(text) => text,
            Token::MustacheOpen => MUSTACHE_OPEN,
            Token::MustacheClose => MUSTACHE_CLOSE,
            Token::BracketOpen => BRACKET_OPEN,
            Token::BracketClose => BRACKET_CLOSE,
        }
    }
}

fn delimiter_at(bytes: &[u8], i: usize) -> Option<Token<'static>> {
    match (bytes[i], bytes[i + 1]) {
        (b'{', b'{') => Some(Token::MustacheOpen),
        (b'}', b'}') => Some(Token::MustacheClose),
        (b'[', b'[') => Some(Token::BracketOpen),
        (b']', b']') => Some(Token::BracketClose),
        _ => None,
    }
}

/// Lex `input` into tokens. Concatenating `Token::as_str` over the result
/// reproduces `input` exactly.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    // Delimiters are ASCII, so every split point is a char boundary.
    while i + 1 < bytes.len() {
        match delimiter_at(bytes, i) {
            Some(delimiter) => {
                if literal_start < i {
                    tokens.push(Token::Literal(&input[literal_start..i]));
                }
                tokens.push(delimiter);
                i += 2;
                literal_start = i;
            }
            None => i += 1,
        }
    }

    if literal_start < input.len() {
        tokens.push(Token::Literal(&input[literal_start..]));
    }

    tokens
}

/// Inverse of [`lex`].
pub fn render(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_lex_plain_text() {
        assert_eq!(lex("hello world"), vec![Token::Literal("hello world")]);
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_lex_mustache_binding() {
        assert_eq!(
            lex("Hi {{user.name}}!"),
            vec![
                Token::Literal("Hi "),
                Token::MustacheOpen,
                Token::Literal("user.name"),
                Token::MustacheClose,
                Token::Literal("!"),
            ]
        );
    }

    #[test]
    fn test_lex_bracket_binding() {
        assert_eq!(
            lex("[[a]][[b]]"),
            vec![
                Token::BracketOpen,
                Token::Literal("a"),
                Token::BracketClose,
                Token::BracketOpen,
                Token::Literal("b"),
                Token::BracketClose,
            ]
        );
    }

    #[test]
    fn test_lex_unbalanced_delimiters() {
        assert_eq!(
            lex("{{open"),
            vec![Token::MustacheOpen, Token::Literal("open")]
        );
        assert_eq!(
            lex("close}} ]]"),
            vec![
                Token::Literal("close"),
                Token::MustacheClose,
                Token::Literal(" "),
                Token::BracketClose,
            ]
        );
    }

    #[test]
    fn test_lex_single_braces_are_literal() {
        assert_eq!(lex("{a} [b]"), vec![Token::Literal("{a} [b]")]);
    }

    #[test]
    fn test_lex_triple_brace_is_left_to_right() {
        assert_eq!(
            lex("{{{x}}}"),
            vec![
                Token::MustacheOpen,
                Token::Literal("{x"),
                Token::MustacheClose,
                Token::Literal("}"),
            ]
        );
    }

    #[test]
    fn test_lex_multibyte_text() {
        let input = "é{{ü}}ß";
        assert_eq!(
            lex(input),
            vec![
                Token::Literal("é"),
                Token::MustacheOpen,
                Token::Literal("ü"),
                Token::MustacheClose,
                Token::Literal("ß"),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_lex_is_lossless(input in "\\PC*") {
            prop_assert_eq!(render(&lex(&input)), input);
        }

        #[test]
        fn prop_lex_is_lossless_with_delimiters(input in "[{}\\[\\]a. ]{0,40}") {
            prop_assert_eq!(render(&lex(&input)), input);
        }

        #[test]
        fn prop_literals_never_adjacent(input in "[{}\\[\\]ab]{0,40}") {
            let tokens = lex(&input);
            for pair in tokens.windows(2) {
                prop_assert!(
                    !matches!((pair[0], pair[1]), (Token::Literal(_), Token::Literal(_)))
                );
            }
        }
    }
}
