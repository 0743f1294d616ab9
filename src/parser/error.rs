use crate::lexer::{LexicalError, LexicalErrorKind, Span, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    #[error("Expected {expected} but got token {actual}.")]
    UnexpectedToken {
        actual: TokenKind,
        expected: &'static str,
    },
    #[error("Encountered a lexer error {0}.")]
    LexicalError(#[from] LexicalError),
    #[error("Arrays nest deeper than {limit} levels.")]
    NestingTooDeep { limit: usize },
}

/// A lexical or grammatical violation at a known source position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("[line {line}, column {column}] {kind}")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl ParserError {
    /// A token of kind `actual` where `expected` was needed, reported at `position`.
    pub fn unexpected(actual: TokenKind, position: &Token, expected: &'static str) -> Self {
        Self {
            kind: ParserErrorKind::UnexpectedToken { actual, expected },
            span: position.span,
            line: position.line,
            column: position.column,
        }
    }

    pub fn nesting_too_deep(open: &Token, limit: usize) -> Self {
        Self {
            kind: ParserErrorKind::NestingTooDeep { limit },
            span: open.span,
            line: open.line,
            column: open.column,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::UnexpectedToken { .. } => "SY001",
            ParserErrorKind::LexicalError(LexicalError {
                kind: LexicalErrorKind::Unrecognized(_),
                ..
            }) => "SY002",
            ParserErrorKind::LexicalError(LexicalError {
                kind: LexicalErrorKind::UnclosedString,
                ..
            }) => "SY003",
            ParserErrorKind::NestingTooDeep { .. } => "UN007",
        }
    }
}

impl From<LexicalError> for ParserError {
    fn from(value: LexicalError) -> Self {
        Self {
            span: value.span,
            line: value.line,
            column: value.column,
            kind: ParserErrorKind::LexicalError(value),
        }
    }
}
