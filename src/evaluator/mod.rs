pub mod error;
mod rpn;

use crate::{
    environment::Environment,
    error::{ConfigError, UnclassifiedError, UnclassifiedErrorKind},
    lexer::Span,
    parser::declaration::{Expression, LiteralNode},
    value::Value,
};
use compact_str::CompactString;
pub use rpn::RpnEvaluator;

/// Evaluates either form of expression against the bindings made so far.
pub fn evaluate_expression(
    expression: &Expression,
    environment: &Environment,
) -> Result<Value, ConfigError> {
    match expression {
        Expression::Literal(node) => ValueEvaluator::evaluate(node),
        Expression::Rpn(rpn) => RpnEvaluator::new(environment).evaluate(rpn),
    }
}

/// Turns literal trees into values. Literals never refer to other bindings.
pub struct ValueEvaluator;

impl ValueEvaluator {
    pub fn evaluate(node: &LiteralNode) -> Result<Value, ConfigError> {
        let value = match node {
            LiteralNode::Number { digits, span } => Value::Integer(parse_integer(digits, *span)?),
            LiteralNode::String { literal, span } => Value::Text(unescape(literal, *span)?),
            LiteralNode::Array { elements, .. } => Value::Sequence(
                elements
                    .iter()
                    .map(ValueEvaluator::evaluate)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };
        Ok(value)
    }
}

pub(crate) fn parse_integer(digits: &str, span: Span) -> Result<i64, UnclassifiedError> {
    digits.parse().map_err(|_| {
        UnclassifiedError::new(
            UnclassifiedErrorKind::LiteralOutOfRange(digits.into()),
            Some(span),
        )
    })
}

/// String literals follow JSON escaping rules, quotes included.
fn unescape(literal: &str, span: Span) -> Result<CompactString, UnclassifiedError> {
    serde_json::from_str::<String>(literal)
        .map(CompactString::from)
        .map_err(|e| {
            UnclassifiedError::new(
                UnclassifiedErrorKind::MalformedString(e.to_string()),
                Some(span),
            )
        })
}
