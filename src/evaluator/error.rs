use crate::{lexer::Span, value::Value};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationErrorKind {
    #[error("unknown name: {0}")]
    UnknownName(CompactString),
    #[error("chr() requires 1 argument")]
    ChrArity,
    #[error("chr() expects a number")]
    ChrNonNumeric(Value),
    #[error("insufficient arguments")]
    InsufficientArguments { operator: char, available: usize },
    #[error("+ and - apply only to numbers")]
    NonNumericOperands(Value, Value),
    #[error("invalid expression")]
    InvalidExpression { remaining: usize },
}

/// A semantic violation found while evaluating a declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct EvaluationError {
    #[source]
    pub kind: EvaluationErrorKind,
    pub span: Span,
}

impl EvaluationError {
    pub fn new(kind: EvaluationErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            EvaluationErrorKind::UnknownName(_) => "EV001",
            EvaluationErrorKind::ChrArity => "EV002",
            EvaluationErrorKind::ChrNonNumeric(_) => "EV003",
            EvaluationErrorKind::InsufficientArguments { .. } => "EV004",
            EvaluationErrorKind::NonNumericOperands(_, _) => "EV005",
            EvaluationErrorKind::InvalidExpression { .. } => "EV006",
        }
    }
}
