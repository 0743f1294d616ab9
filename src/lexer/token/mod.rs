mod span;

pub use span::{Span, SpanIndex, SpanLength};
use std::fmt::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Structural punctuation
    Equal,
    Comma,
    /// `<<`
    ArrayOpen,
    /// `>>`
    ArrayClose,
    /// `!(`
    RpnOpen,
    /// `)`
    RpnClose,
    Newline,

    // RPN operators
    Plus,
    Minus,
    /// `chr()`
    Chr,

    // Literals
    Name,
    Number,
    String,

    // Keywords
    KeywordVar,

    // End of file.
    Eof,
}

impl TokenKind {
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        match lexeme {
            "var" => Some(TokenKind::KeywordVar),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Equal => write!(f, "EQUAL"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::ArrayOpen => write!(f, "ARRAY_OPEN"),
            TokenKind::ArrayClose => write!(f, "ARRAY_CLOSE"),
            TokenKind::RpnOpen => write!(f, "RPN_OPEN"),
            TokenKind::RpnClose => write!(f, "RPN_CLOSE"),
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Minus => write!(f, "MINUS"),
            TokenKind::Chr => write!(f, "CHR"),
            TokenKind::Name => write!(f, "NAME"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::String => write!(f, "STRING"),
            TokenKind::KeywordVar => write!(f, "VAR"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character, counted in characters.
    pub column: u32,
}
