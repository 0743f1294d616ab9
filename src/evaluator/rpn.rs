use super::{
    error::{EvaluationError, EvaluationErrorKind},
    parse_integer,
};
use crate::{
    environment::Environment,
    error::{ConfigError, UnclassifiedError, UnclassifiedErrorKind},
    lexer::Span,
    parser::declaration::{RpnExpression, RpnOperator, RpnToken},
    value::Value,
};
use compact_str::ToCompactString;

/// A postfix stack machine over values.
#[derive(Debug)]
pub struct RpnEvaluator<'env> {
    environment: &'env Environment,
    stack: Vec<Value>,
}

impl<'env> RpnEvaluator<'env> {
    pub fn new(environment: &'env Environment) -> Self {
        Self {
            environment,
            stack: Vec::new(),
        }
    }

    /// Runs every token left to right. Exactly one value must be left on the stack.
    pub fn evaluate(mut self, expression: &RpnExpression) -> Result<Value, ConfigError> {
        for token in expression.tokens.iter() {
            self.step(token)?;
            tracing::trace!(?token, depth = self.stack.len(), "rpn step");
        }

        let remaining = self.stack.len();
        match self.stack.pop() {
            Some(result) if remaining == 1 => Ok(result),
            _ => Err(EvaluationError::new(
                EvaluationErrorKind::InvalidExpression { remaining },
                expression.span,
            )
            .into()),
        }
    }

    fn step(&mut self, token: &RpnToken) -> Result<(), ConfigError> {
        match token {
            RpnToken::Name { name, span } => {
                let value = self.environment.get(name).cloned().ok_or_else(|| {
                    EvaluationError::new(EvaluationErrorKind::UnknownName(name.clone()), *span)
                })?;
                self.stack.push(value);
            }
            RpnToken::Number { digits, span } => {
                self.stack.push(Value::Integer(parse_integer(digits, *span)?));
            }
            RpnToken::Chr { span } => {
                let value = self.chr(*span)?;
                self.stack.push(value);
            }
            RpnToken::Operator { operator, span } => {
                let value = self.arithmetic(*operator, *span)?;
                self.stack.push(value);
            }
        }
        Ok(())
    }

    fn chr(&mut self, span: Span) -> Result<Value, ConfigError> {
        let Some(argument) = self.stack.pop() else {
            return Err(EvaluationError::new(EvaluationErrorKind::ChrArity, span).into());
        };
        let Value::Integer(code) = argument else {
            return Err(
                EvaluationError::new(EvaluationErrorKind::ChrNonNumeric(argument), span).into(),
            );
        };

        let character = u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                UnclassifiedError::new(UnclassifiedErrorKind::InvalidCodePoint(code), Some(span))
            })?;
        Ok(Value::Text(character.to_compact_string()))
    }

    /// Pops `b` then `a` and computes `a <operator> b`.
    fn arithmetic(&mut self, operator: RpnOperator, span: Span) -> Result<Value, ConfigError> {
        let available = self.stack.len();
        let (Some(b), Some(a)) = (self.stack.pop(), self.stack.pop()) else {
            return Err(EvaluationError::new(
                EvaluationErrorKind::InsufficientArguments {
                    operator: operator.symbol(),
                    available,
                },
                span,
            )
            .into());
        };

        let (lhs, rhs) = match (a, b) {
            (Value::Integer(lhs), Value::Integer(rhs)) => (lhs, rhs),
            (a, b) => {
                return Err(EvaluationError::new(
                    EvaluationErrorKind::NonNumericOperands(a, b),
                    span,
                )
                .into())
            }
        };

        let result = match operator {
            RpnOperator::Add => lhs.checked_add(rhs),
            RpnOperator::Subtract => lhs.checked_sub(rhs),
        };
        result.map(Value::Integer).ok_or_else(|| {
            UnclassifiedError::new(
                UnclassifiedErrorKind::Overflow {
                    lhs,
                    rhs,
                    operator: operator.symbol(),
                },
                Some(span),
            )
            .into()
        })
    }
}
