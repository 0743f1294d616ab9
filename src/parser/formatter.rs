use super::declaration::{Declaration, Expression, LiteralNode, Program, RpnToken};

pub trait DeclarationFormatter {
    fn format(&self, declaration: &Declaration) -> String;

    fn format_program(&self, program: &Program) -> String {
        program
            .iter()
            .map(|declaration| self.format(declaration))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct DebugFormatter;

impl DeclarationFormatter for DebugFormatter {
    fn format(&self, declaration: &Declaration) -> String {
        format!("{declaration:?}")
    }
}

/// Renders declarations as S-expressions, e.g. `(var b (rpn a 5 -))`.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    fn format_literal(node: &LiteralNode) -> String {
        match node {
            LiteralNode::Number { digits, .. } => digits.to_string(),
            LiteralNode::String { literal, .. } => literal.to_string(),
            LiteralNode::Array { elements, .. } => {
                let mut buffer = String::from("(array");
                for element in elements {
                    buffer.push(' ');
                    buffer.push_str(&Self::format_literal(element));
                }
                buffer.push(')');
                buffer
            }
        }
    }

    fn format_rpn_token(token: &RpnToken) -> String {
        match token {
            RpnToken::Name { name, .. } => name.to_string(),
            RpnToken::Number { digits, .. } => digits.to_string(),
            RpnToken::Operator { operator, .. } => operator.symbol().to_string(),
            RpnToken::Chr { .. } => "chr()".into(),
        }
    }

    pub fn format_expression(expression: &Expression) -> String {
        match expression {
            Expression::Literal(node) => Self::format_literal(node),
            Expression::Rpn(rpn) => {
                let mut buffer = String::from("(rpn");
                for token in rpn.tokens.iter() {
                    buffer.push(' ');
                    buffer.push_str(&Self::format_rpn_token(token));
                }
                buffer.push(')');
                buffer
            }
        }
    }
}

impl DeclarationFormatter for SExpressionFormatter {
    fn format(&self, declaration: &Declaration) -> String {
        format!(
            "(var {} {})",
            declaration.name,
            Self::format_expression(&declaration.expression)
        )
    }
}
