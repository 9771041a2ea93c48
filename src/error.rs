use std::io;
use std::string::FromUtf8Error;

/// Why a binding expression could not be matched against the binding grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionErrorKind {
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

/// A databinding expression that is not valid binding syntax.
///
/// `offset` is a byte offset into `expression`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed binding expression `{expression}` at offset {offset}: {kind}")]
pub struct ExpressionError {
    pub expression: String,
    pub offset: usize,
    pub kind: ExpressionErrorKind,
}

impl ExpressionError {
    pub fn new(expression: &str, offset: usize, kind: ExpressionErrorKind) -> Self {
        Self {
            expression: expression.to_string(),
            offset,
            kind,
        }
    }
}

/// Errors surfaced by document-level renaming.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    #[error(transparent)]
    MalformedExpression(#[from] ExpressionError),

    #[error("failed to parse HTML document: {0}")]
    Parse(#[source] io::Error),

    #[error("failed to serialize HTML document: {0}")]
    Serialize(#[source] io::Error),

    #[error("serialized document is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("invalid rename map: {0}")]
    InvalidRenameMap(#[from] serde_json::Error),
}
