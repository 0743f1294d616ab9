pub mod formatter;

use crate::{
    evaluator::error::EvaluationError,
    lexer::Span,
    parser::{ParserError, ParserErrorKind},
};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnclassifiedErrorKind {
    #[error("integer literal {0} is out of range")]
    LiteralOutOfRange(CompactString),
    #[error("integer overflow in {lhs} {operator} {rhs}")]
    Overflow { lhs: i64, rhs: i64, operator: char },
    #[error("chr() argument {0} is not a valid code point")]
    InvalidCodePoint(i64),
    #[error("invalid string literal: {0}")]
    MalformedString(String),
    #[error("cannot read input: {0}")]
    Input(String),
    #[error("cannot render output: {0}")]
    Render(String),
    #[error("arrays nest deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Any failure outside the syntax and evaluation categories.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct UnclassifiedError {
    #[source]
    pub kind: UnclassifiedErrorKind,
    pub span: Option<Span>,
}

impl UnclassifiedError {
    pub fn new(kind: UnclassifiedErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            UnclassifiedErrorKind::LiteralOutOfRange(_) => "UN001",
            UnclassifiedErrorKind::Overflow { .. } => "UN002",
            UnclassifiedErrorKind::InvalidCodePoint(_) => "UN003",
            UnclassifiedErrorKind::MalformedString(_) => "UN004",
            UnclassifiedErrorKind::Input(_) => "UN005",
            UnclassifiedErrorKind::Render(_) => "UN006",
            UnclassifiedErrorKind::NestingTooDeep(_) => "UN007",
        }
    }
}

impl From<UnclassifiedErrorKind> for UnclassifiedError {
    fn from(kind: UnclassifiedErrorKind) -> Self {
        Self { kind, span: None }
    }
}

/// Every way processing a configuration program can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Syntax error: line {}, column {}", .0.line, .0.column)]
    Syntax(ParserError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Unclassified(#[from] UnclassifiedError),
}

impl From<ParserError> for ConfigError {
    /// Nesting past the limit is a resource failure, not a grammar violation.
    fn from(error: ParserError) -> Self {
        match error.kind {
            ParserErrorKind::NestingTooDeep { limit } => ConfigError::Unclassified(
                UnclassifiedError::new(
                    UnclassifiedErrorKind::NestingTooDeep(limit),
                    Some(error.span),
                ),
            ),
            _ => ConfigError::Syntax(error),
        }
    }
}

impl ConfigError {
    /// The process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigError::Syntax(_) => 2,
            ConfigError::Evaluation(_) => 3,
            ConfigError::Unclassified(_) => 4,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Syntax(e) => e.code(),
            ConfigError::Evaluation(e) => e.code(),
            ConfigError::Unclassified(e) => e.code(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            ConfigError::Syntax(e) => Some(e.span),
            ConfigError::Evaluation(e) => Some(e.span),
            ConfigError::Unclassified(e) => e.span,
        }
    }
}
