//! Binding-expression renaming.
//!
//! Databinding annotations use a restricted expression grammar in which every
//! identifier is a path relative to the component's properties:
//!
//! ```text
//! binding  := '!'? operand ('::' event)?
//! operand  := string | '-'? number ('.' number)? | path
//! path     := ident ( '.' ident | '.' number | '.' '*' | '[' (string | number) ']' | '(' args? ')' )*
//! args     := operand (',' operand)*
//! event    := ident ('-' ident)*
//! ```
//!
//! A `.*` wildcard ends its path. The output is a canonical rendering with all
//! insignificant whitespace removed.

use tracing::trace;

use crate::error::{ExpressionError, ExpressionErrorKind};
use crate::rename_map::RenameMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Identifier,
    Number,
    StringLiteral,
    Dot,
    Comma,
    ParenOpen,
    ParenClose,
    IndexOpen,
    IndexClose,
    Wildcard,
    Not,
    Minus,
    EventSeparator,
}

#[derive(Debug, Clone, Copy)]
struct ExprToken<'a> {
    kind: TokenKind,
    text: &'a str,
    offset: usize,
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

pub(crate) fn is_identifier_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

fn tokenize(expression: &str) -> Result<Vec<ExprToken<'_>>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let kind = match c {
            c if c.is_whitespace() => continue,
            c if is_identifier_start(c) => {
                while chars.next_if(|&(_, c)| is_identifier_part(c)).is_some() {}
                TokenKind::Identifier
            }
            c if c.is_ascii_digit() => {
                while chars.next_if(|&(_, c)| c.is_ascii_digit()).is_some() {}
                TokenKind::Number
            }
            '\'' | '"' => {
                let quote = c;
                let mut escaped = false;
                let mut terminated = false;
                for (_, c) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == quote {
                        terminated = true;
                        break;
                    }
                }
                if !terminated {
                    return Err(ExpressionError::new(
                        expression,
                        start,
                        ExpressionErrorKind::UnterminatedString,
                    ));
                }
                TokenKind::StringLiteral
            }
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            '[' => TokenKind::IndexOpen,
            ']' => TokenKind::IndexClose,
            '*' => TokenKind::Wildcard,
            '!' => TokenKind::Not,
            '-' => TokenKind::Minus,
            ':' if chars.next_if(|&(_, c)| c == ':').is_some() => TokenKind::EventSeparator,
            other => {
                return Err(ExpressionError::new(
                    expression,
                    start,
                    ExpressionErrorKind::UnexpectedCharacter(other),
                ))
            }
        };

        let end = chars
            .peek()
            .map(|&(i, _)| i)
            .unwrap_or(expression.len());
        tokens.push(ExprToken {
            kind,
            text: &expression[start..end],
            offset: start,
        });
    }

    Ok(tokens)
}

/// Reject unbalanced parentheses up front so the error points at the culprit
/// rather than wherever the grammar first notices.
fn check_parentheses(expression: &str, tokens: &[ExprToken<'_>]) -> Result<(), ExpressionError> {
    let mut open = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::ParenOpen => open.push(token.offset),
            TokenKind::ParenClose => {
                if open.pop().is_none() {
                    return Err(ExpressionError::new(
                        expression,
                        token.offset,
                        ExpressionErrorKind::UnbalancedParentheses,
                    ));
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(offset) => Err(ExpressionError::new(
            expression,
            offset,
            ExpressionErrorKind::UnbalancedParentheses,
        )),
        None => Ok(()),
    }
}

/// Result of rendering one binding expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExpression {
    pub text: String,
    /// Number of identifiers that were substituted.
    pub renamed: usize,
}

struct ExpressionParser<'a, 'm> {
    expression: &'a str,
    tokens: Vec<ExprToken<'a>>,
    pos: usize,
    map: &'m RenameMap,
    out: String,
    renamed: usize,
}

impl<'a, 'm> ExpressionParser<'a, 'm> {
    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn peek_kind_at(&self, ahead: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + ahead).map(|t| t.kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error_here(&self) -> ExpressionError {
        match self.tokens.get(self.pos) {
            Some(token) => ExpressionError::new(
                self.expression,
                token.offset,
                ExpressionErrorKind::UnexpectedToken(token.text.to_string()),
            ),
            None => ExpressionError::new(
                self.expression,
                self.expression.len(),
                ExpressionErrorKind::UnexpectedEnd,
            ),
        }
    }

    /// Consume a token of `kind` and emit its text unchanged.
    fn expect_verbatim(&mut self, kind: TokenKind) -> Result<(), ExpressionError> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == kind => {
                self.out.push_str(token.text);
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error_here()),
        }
    }

    fn emit_symbol(&mut self) -> Result<(), ExpressionError> {
        let token = match self.tokens.get(self.pos) {
            Some(token) if token.kind == TokenKind::Identifier => *token,
            _ => return Err(self.error_here()),
        };
        self.pos += 1;

        match self.map.resolve(token.text) {
            Some(renamed) => {
                trace!(from = token.text, to = %renamed, "renamed binding symbol");
                self.out.push_str(&renamed);
                self.renamed += 1;
            }
            None => self.out.push_str(token.text),
        }
        Ok(())
    }

    fn parse_binding(&mut self) -> Result<(), ExpressionError> {
        if self.eat(TokenKind::Not) {
            self.out.push('!');
        }
        self.parse_operand()?;
        if self.eat(TokenKind::EventSeparator) {
            self.out.push_str("::");
            self.parse_event_name()?;
        }
        if self.pos < self.tokens.len() {
            return Err(self.error_here());
        }
        Ok(())
    }

    fn parse_operand(&mut self) -> Result<(), ExpressionError> {
        match self.peek_kind() {
            Some(TokenKind::StringLiteral) => self.expect_verbatim(TokenKind::StringLiteral),
            Some(TokenKind::Minus) | Some(TokenKind::Number) => self.parse_number_literal(),
            Some(TokenKind::Identifier) => self.parse_path(),
            Some(TokenKind::IndexOpen) => {
                self.parse_list(TokenKind::IndexOpen, TokenKind::IndexClose)
            }
            _ => Err(self.error_here()),
        }
    }

    fn parse_number_literal(&mut self) -> Result<(), ExpressionError> {
        if self.eat(TokenKind::Minus) {
            self.out.push('-');
        }
        self.expect_verbatim(TokenKind::Number)?;
        if self.peek_kind() == Some(TokenKind::Dot)
            && self.peek_kind_at(1) == Some(TokenKind::Number)
        {
            self.pos += 1;
            self.out.push('.');
            self.expect_verbatim(TokenKind::Number)?;
        }
        Ok(())
    }

    fn parse_path(&mut self) -> Result<(), ExpressionError> {
        self.emit_symbol()?;

        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.pos += 1;
                    self.out.push('.');
                    match self.peek_kind() {
                        Some(TokenKind::Identifier) => self.emit_symbol()?,
                        // Array index segments are never renamed.
                        Some(TokenKind::Number) => self.expect_verbatim(TokenKind::Number)?,
                        Some(TokenKind::Wildcard) => {
                            self.pos += 1;
                            self.out.push('*');
                            return Ok(());
                        }
                        _ => return Err(self.error_here()),
                    }
                }
                Some(TokenKind::IndexOpen) => {
                    self.expect_verbatim(TokenKind::IndexOpen)?;
                    self.parse_operand()?;
                    self.expect_verbatim(TokenKind::IndexClose)?;
                }
                Some(TokenKind::ParenOpen) => {
                    self.parse_list(TokenKind::ParenOpen, TokenKind::ParenClose)?
                }
                _ => return Ok(()),
            }
        }
    }

    /// Comma-separated operands between `open` and `close`: call arguments or
    /// an array literal.
    fn parse_list(&mut self, open: TokenKind, close: TokenKind) -> Result<(), ExpressionError> {
        self.expect_verbatim(open)?;
        if self.peek_kind() == Some(close) {
            return self.expect_verbatim(close);
        }

        loop {
            self.parse_operand()?;
            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.pos += 1;
                    self.out.push(',');
                }
                Some(kind) if kind == close => return self.expect_verbatim(close),
                _ => return Err(self.error_here()),
            }
        }
    }

    /// Event names are DOM event types, not properties, and are kept as written.
    fn parse_event_name(&mut self) -> Result<(), ExpressionError> {
        self.expect_verbatim(TokenKind::Identifier)?;
        while self.peek_kind() == Some(TokenKind::Minus)
            && self.peek_kind_at(1) == Some(TokenKind::Identifier)
        {
            self.pos += 1;
            self.out.push('-');
            self.expect_verbatim(TokenKind::Identifier)?;
        }
        Ok(())
    }
}

/// Render `expression` with every mapped identifier substituted, reporting how
/// many substitutions were made. Blank input is returned unchanged.
pub fn render_expression(
    map: &RenameMap,
    expression: &str,
) -> Result<RenderedExpression, ExpressionError> {
    if expression.trim().is_empty() {
        return Ok(RenderedExpression {
            text: expression.to_string(),
            renamed: 0,
        });
    }

    let tokens = tokenize(expression)?;
    check_parentheses(expression, &tokens)?;

    let mut parser = ExpressionParser {
        expression,
        tokens,
        pos: 0,
        map,
        out: String::with_capacity(expression.len()),
        renamed: 0,
    };
    parser.parse_binding()?;

    Ok(RenderedExpression {
        text: parser.out,
        renamed: parser.renamed,
    })
}

/// Rename every property symbol in a databinding expression.
///
/// Unlike script renaming, bare identifiers and function names are renamed too:
/// inside a binding every identifier names a property path.
pub fn rename_polymer_js_expression(
    map: &RenameMap,
    expression: &str,
) -> Result<String, ExpressionError> {
    render_expression(map, expression).map(|rendered| rendered.text)
}
