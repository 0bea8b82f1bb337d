//! First pass: check the grammar and every field value of a document without building anything.

use crate::catalog::{FieldId, FIELD_COUNT};
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("signature not well opened: expected \"[\", found \"{0}\"")]
    MissingOpenBracket(String),
    #[error("unknown field \"{0}\"")]
    UnknownField(String),
    #[error("field \"{0}\" redeclared")]
    DuplicateField(FieldId),
    #[error("expecting \"=\", found \"{0}\"")]
    ExpectedEquals(String),
    #[error("field \"{0}\" has invalid data (\"{1}\")")]
    InvalidValue(FieldId, String),
    #[error("missing \",\" or \"]\", found \"{0}\"")]
    ExpectedSeparatorOrClose(String),
    #[error("signature not closed before end of input")]
    UnterminatedEntry,
}

#[derive(Debug, Clone, Copy)]
enum State {
    FieldName,
    Equals(FieldId),
    Value(FieldId),
    Separator,
}

/// Token stream of a document that passed [`check_document`].
#[derive(Debug, Clone, Copy)]
pub struct CheckedDocument<'t, 'src> {
    pub(crate) source: &'src str,
    pub(crate) tokens: &'t [Token<'src>],
}

impl<'t, 'src> CheckedDocument<'t, 'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn tokens(&self) -> &'t [Token<'src>] {
        self.tokens
    }
}

/// Check every entry of the document in order, stopping at the first error.
pub fn check_document<'t, 'src>(
    source: &'src str,
    tokens: &'t [Token<'src>],
) -> Result<CheckedDocument<'t, 'src>, SyntaxError> {
    let mut rest = tokens;
    let mut entries = 0usize;
    while !rest.is_empty() {
        rest = check_entry(source, rest)?;
        entries += 1;
    }
    tracing::debug!(entries, "syntax check passed");
    Ok(CheckedDocument { source, tokens })
}

/// Check one `[ ... ]` block at the head of `tokens`; returns the tokens after it.
fn check_entry<'t, 'src>(
    source: &str,
    tokens: &'t [Token<'src>],
) -> Result<&'t [Token<'src>], SyntaxError> {
    let (open, body) = match tokens.split_first() {
        Some(split) => split,
        None => return Ok(tokens),
    };
    if !open.is(TokenKind::Open) {
        return Err(report(
            source,
            open,
            SyntaxError::MissingOpenBracket(open.text.to_string()),
        ));
    }

    let mut seen = [false; FIELD_COUNT];
    let mut state = State::FieldName;
    for (i, token) in body.iter().enumerate() {
        state = match state {
            State::FieldName => {
                let field = match FieldId::from_label(token.text) {
                    Some(field) => field,
                    None => {
                        return Err(report(
                            source,
                            token,
                            SyntaxError::UnknownField(token.text.to_string()),
                        ))
                    }
                };
                if seen[field.index()] {
                    return Err(report(source, token, SyntaxError::DuplicateField(field)));
                }
                seen[field.index()] = true;
                State::Equals(field)
            }
            State::Equals(field) => {
                if !token.is(TokenKind::Equals) {
                    return Err(report(
                        source,
                        token,
                        SyntaxError::ExpectedEquals(token.text.to_string()),
                    ));
                }
                State::Value(field)
            }
            State::Value(field) => {
                if !field.kind().accepts(token.text) {
                    return Err(report(
                        source,
                        token,
                        SyntaxError::InvalidValue(field, token.text.to_string()),
                    ));
                }
                State::Separator
            }
            State::Separator => match token.kind {
                TokenKind::Comma => State::FieldName,
                TokenKind::Close => return Ok(&body[i + 1..]),
                _ => {
                    return Err(report(
                        source,
                        token,
                        SyntaxError::ExpectedSeparatorOrClose(token.text.to_string()),
                    ))
                }
            },
        };
    }
    Err(report(source, open, SyntaxError::UnterminatedEntry))
}

fn report(source: &str, token: &Token<'_>, err: SyntaxError) -> SyntaxError {
    let (line, column) = token.line_col(source);
    tracing::error!(line, column, token = token.text, "invalid signature: {}", err);
    err
}
