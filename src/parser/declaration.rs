use crate::lexer::Span;
use compact_str::CompactString;

/// The parsed declarations of a source text, in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    declarations: Vec<Declaration>,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn get_declaration(&self, index: usize) -> Option<&Declaration> {
        self.declarations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// `var NAME = expression`
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: CompactString,
    pub name_span: Span,
    pub expression: Expression,
}

#[derive(Debug, Clone)]
pub enum Expression {
    Literal(LiteralNode),
    Rpn(RpnExpression),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(node) => node.span(),
            Expression::Rpn(rpn) => rpn.span,
        }
    }
}

/// A self-contained literal. Numbers and strings keep their source text; converting it into a
/// value is the evaluator's job.
#[derive(Debug, Clone)]
pub enum LiteralNode {
    Number {
        digits: CompactString,
        span: Span,
    },
    String {
        literal: CompactString,
        span: Span,
    },
    Array {
        elements: Vec<LiteralNode>,
        span: Span,
    },
}

impl LiteralNode {
    pub fn span(&self) -> Span {
        match self {
            LiteralNode::Number { span, .. }
            | LiteralNode::String { span, .. }
            | LiteralNode::Array { span, .. } => *span,
        }
    }
}

/// The flat token list of a `!( ... )` expression.
#[derive(Debug, Clone)]
pub struct RpnExpression {
    pub tokens: Vec<RpnToken>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpnOperator {
    Add,
    Subtract,
}

impl RpnOperator {
    pub fn symbol(&self) -> char {
        match self {
            RpnOperator::Add => '+',
            RpnOperator::Subtract => '-',
        }
    }
}

#[derive(Debug, Clone)]
pub enum RpnToken {
    Name { name: CompactString, span: Span },
    Number { digits: CompactString, span: Span },
    Operator { operator: RpnOperator, span: Span },
    Chr { span: Span },
}

impl RpnToken {
    pub fn span(&self) -> Span {
        match self {
            RpnToken::Name { span, .. }
            | RpnToken::Number { span, .. }
            | RpnToken::Operator { span, .. }
            | RpnToken::Chr { span } => *span,
        }
    }
}
