pub mod declaration;
pub mod error;
pub mod formatter;

use crate::lexer::{Lexer, Span, Token, TokenKind};
use compact_str::CompactString;
use declaration::{
    Declaration, Expression, LiteralNode, Program, RpnExpression, RpnOperator, RpnToken,
};
pub use error::{ParserError, ParserErrorKind};

/// How many arrays may be open at once.
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    lookahead: Option<Token>,
    /// The last token other than EOF handed out by `next_token`.
    previous: Option<Token>,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
            previous: None,
            depth: 0,
        }
    }

    fn peek(&mut self) -> Result<Token, ParserError> {
        match self.lookahead {
            Some(token) => Ok(token),
            None => {
                let token = self.lexer.next_token()?;
                self.lookahead = Some(token);
                Ok(token)
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParserError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        if token.kind != TokenKind::Eof {
            self.previous = Some(token);
        }
        Ok(token)
    }

    fn expect(
        &mut self,
        expected: TokenKind,
        description: &'static str,
    ) -> Result<Token, ParserError> {
        let token = self.next_token()?;
        if token.kind != expected {
            Err(self.unexpected(&token, description))
        } else {
            Ok(token)
        }
    }

    /// Running out of input is reported at the last real token.
    fn unexpected(&self, token: &Token, expected: &'static str) -> ParserError {
        let position = match (token.kind, self.previous) {
            (TokenKind::Eof, Some(previous)) => previous,
            _ => *token,
        };
        ParserError::unexpected(token.kind, &position, expected)
    }

    fn lexeme(&self, token: &Token) -> CompactString {
        self.lexer
            .get_lexeme(&token.span)
            .map(CompactString::from)
            .unwrap_or_default()
    }
}

// Program/declarations
impl<'src> Parser<'src> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let mut declarations = Vec::new();

        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Newline => {
                    self.next_token()?;
                }
                TokenKind::KeywordVar => {
                    let declaration = self.parse_declaration()?;
                    tracing::trace!(name = %declaration.name, "parsed declaration");
                    declarations.push(declaration);
                }
                TokenKind::Eof => break,
                _ => return Err(self.unexpected(&token, "`var` or a line break")),
            }
        }

        tracing::debug!(count = declarations.len(), "parsed program");
        Ok(Program::new(declarations))
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParserError> {
        self.expect(TokenKind::KeywordVar, "`var`")?;
        let name_token = self.expect(TokenKind::Name, "a name")?;
        self.expect(TokenKind::Equal, "`=`")?;
        let expression = self.parse_expression()?;

        // A declaration ends at a line break or at the end of the input.
        let terminator = self.peek()?;
        match terminator.kind {
            TokenKind::Newline => {
                self.next_token()?;
            }
            TokenKind::Eof => {}
            _ => return Err(self.unexpected(&terminator, "a line break")),
        }

        Ok(Declaration {
            name: self.lexeme(&name_token),
            name_span: name_token.span,
            expression,
        })
    }

    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::RpnOpen => Ok(Expression::Rpn(self.parse_rpn()?)),
            _ => Ok(Expression::Literal(self.parse_value()?)),
        }
    }
}

// Expressions
impl<'src> Parser<'src> {
    fn parse_rpn(&mut self) -> Result<RpnExpression, ParserError> {
        let open = self.expect(TokenKind::RpnOpen, "`!(`")?;
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let span = token.span;
            let rpn_token = match token.kind {
                TokenKind::Name => RpnToken::Name {
                    name: self.lexeme(&token),
                    span,
                },
                TokenKind::Number => RpnToken::Number {
                    digits: self.lexeme(&token),
                    span,
                },
                TokenKind::Plus => RpnToken::Operator {
                    operator: RpnOperator::Add,
                    span,
                },
                TokenKind::Minus => RpnToken::Operator {
                    operator: RpnOperator::Subtract,
                    span,
                },
                TokenKind::Chr => RpnToken::Chr { span },
                TokenKind::RpnClose if !tokens.is_empty() => {
                    return Ok(RpnExpression {
                        tokens,
                        span: open.span.merge(&span),
                    });
                }
                TokenKind::RpnClose => {
                    return Err(self.unexpected(&token, "a name, number, operator or `chr()`"));
                }
                _ => {
                    return Err(self.unexpected(&token, "a name, number, operator, `chr()` or `)`"));
                }
            };
            tokens.push(rpn_token);
        }
    }

    fn parse_value(&mut self) -> Result<LiteralNode, ParserError> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Number => Ok(LiteralNode::Number {
                digits: self.lexeme(&token),
                span: token.span,
            }),
            TokenKind::String => Ok(LiteralNode::String {
                literal: self.lexeme(&token),
                span: token.span,
            }),
            TokenKind::ArrayOpen => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParserError::nesting_too_deep(&token, MAX_NESTING_DEPTH));
                }
                self.depth += 1;
                let array = self.parse_array(token.span);
                self.depth -= 1;
                array
            }
            _ => Err(self.unexpected(&token, "a number, string or `<<`")),
        }
    }

    fn parse_array(&mut self, open: Span) -> Result<LiteralNode, ParserError> {
        let mut elements = Vec::new();

        let first = self.peek()?;
        if first.kind == TokenKind::ArrayClose {
            self.next_token()?;
            return Ok(LiteralNode::Array {
                elements,
                span: open.merge(&first.span),
            });
        }

        loop {
            elements.push(self.parse_value()?);
            let token = self.next_token()?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::ArrayClose => {
                    return Ok(LiteralNode::Array {
                        elements,
                        span: open.merge(&token.span),
                    })
                }
                _ => return Err(self.unexpected(&token, "`,` or `>>`")),
            }
        }
    }
}
