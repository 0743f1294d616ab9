use super::{
    token::{Token, TokenKind},
    Lexer, LexicalError, LexicalErrorKind,
};

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

pub trait ToFormatter<F>
where
    F: TokenFormatter,
{
    fn create_formatter(&self) -> F;
}

/// Prints one token per line as `line:column KIND lexeme`.
pub struct BasicFormatter<'src> {
    text: &'src str,
}

impl<'src> BasicFormatter<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { text }
    }
}

impl<'src> ToFormatter<BasicFormatter<'src>> for Lexer<'src> {
    fn create_formatter(&self) -> BasicFormatter<'src> {
        BasicFormatter::new(self.get_source())
    }
}

impl<'src> TokenFormatter for BasicFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        let position = format!("{}:{}", token.line, token.column);
        match token.kind {
            TokenKind::Newline | TokenKind::Eof => format!("{position} {}", token.kind),
            kind => {
                let lexeme = &self.text[token.span.range()];
                format!("{position} {kind} {lexeme}")
            }
        }
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let position = format!("{}:{}", error.line, error.column);
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                format!("{position} ERROR UNEXPECTED_CHAR {}", c.escape_debug())
            }
            LexicalErrorKind::UnclosedString => {
                format!("{position} ERROR UNTERMINATED_STRING")
            }
        }
    }
}

pub struct DebugFormatter;

impl<'src> ToFormatter<DebugFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> DebugFormatter {
        DebugFormatter {}
    }
}

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}
