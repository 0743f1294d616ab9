mod error;
pub mod formatter;
mod token;

pub use error::{LexicalError, LexicalErrorKind};
pub use token::{Span, SpanIndex, SpanLength, Token, TokenKind};

const CHR_LITERAL: &str = "chr()";

/// Byte offsets of the start of every line, used to turn offsets into line/column pairs.
#[derive(Debug, Clone)]
pub struct LineBreaks {
    line_starts: Box<[usize]>,
}

impl LineBreaks {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(offset, _)| offset + 1),
        );
        Self {
            line_starts: line_starts.into(),
        }
    }

    /// Returns the 1-based line containing the byte `offset`.
    pub fn get_line(&self, offset: usize) -> u32 {
        self.line_starts.partition_point(|start| *start <= offset) as u32
    }

    /// Returns the 1-based line and character column of the byte `offset`.
    pub fn get_position(&self, text: &str, offset: usize) -> (u32, u32) {
        let line = self.get_line(offset);
        let line_start = self.line_starts[(line - 1) as usize];
        let column = text
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);
        (line, column as u32 + 1)
    }
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    line_breaks: LineBreaks,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line_breaks: LineBreaks::new(source),
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_lexeme(&self, span: &Span) -> Option<&'src str> {
        self.source.get(span.range())
    }
}

impl<'src> Lexer<'src> {
    fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn emit(&mut self, kind: TokenKind, start: usize, length: usize) -> Token {
        self.offset = start + length;
        let (line, column) = self.line_breaks.get_position(self.source, start);
        Token {
            kind,
            span: Span::new(start, start + length),
            line,
            column,
        }
    }

    fn fail(&mut self, kind: LexicalErrorKind, start: usize, end: usize) -> LexicalError {
        self.offset = end;
        let (line, column) = self.line_breaks.get_position(self.source, start);
        LexicalError {
            kind,
            span: Span::new(start, end),
            line,
            column,
        }
    }

    /// Skips inline whitespace and `*` comments. Line breaks are significant and kept.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t') => self.offset += 1,
                Some('*') => {
                    let length = self
                        .rest()
                        .find(['\r', '\n'])
                        .unwrap_or(self.rest().len());
                    self.offset += length;
                }
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_trivia();

        let start = self.offset;
        let rest = self.rest();
        let Some(c) = self.peek_char() else {
            return Ok(self.emit(TokenKind::Eof, start, 0));
        };

        match c {
            '\n' => Ok(self.lex_newlines(start)),
            '\r' if rest.starts_with("\r\n") => Ok(self.lex_newlines(start)),
            '=' => Ok(self.emit(TokenKind::Equal, start, 1)),
            ',' => Ok(self.emit(TokenKind::Comma, start, 1)),
            ')' => Ok(self.emit(TokenKind::RpnClose, start, 1)),
            '+' => Ok(self.emit(TokenKind::Plus, start, 1)),
            '-' => Ok(self.emit(TokenKind::Minus, start, 1)),
            '<' if rest.starts_with("<<") => Ok(self.emit(TokenKind::ArrayOpen, start, 2)),
            '>' if rest.starts_with(">>") => Ok(self.emit(TokenKind::ArrayClose, start, 2)),
            '!' if rest.starts_with("!(") => Ok(self.emit(TokenKind::RpnOpen, start, 2)),
            '"' => self.lex_string(start),
            // `chr()` wins over a name starting with the same letters.
            'c' if rest.starts_with(CHR_LITERAL) => {
                Ok(self.emit(TokenKind::Chr, start, CHR_LITERAL.len()))
            }
            'a'..='z' => self.lex_name(start),
            '1'..='9' => {
                let length = rest.bytes().take_while(u8::is_ascii_digit).count();
                Ok(self.emit(TokenKind::Number, start, length))
            }
            c => Err(self.fail(
                LexicalErrorKind::Unrecognized(c),
                start,
                start + c.len_utf8(),
            )),
        }
    }

    fn lex_newlines(&mut self, start: usize) -> Token {
        let mut length = 0;
        loop {
            let rest = &self.source[start + length..];
            if rest.starts_with('\n') {
                length += 1;
            } else if rest.starts_with("\r\n") {
                length += 2;
            } else {
                break;
            }
        }
        self.emit(TokenKind::Newline, start, length)
    }

    fn lex_name(&mut self, start: usize) -> Result<Token, LexicalError> {
        let rest = self.rest();
        let run = rest.bytes().take_while(u8::is_ascii_lowercase).count();
        // A name may not be directly followed by `(`, so the last letter of such a run is
        // left behind and fails on its own.
        let length = if rest[run..].starts_with('(') {
            run - 1
        } else {
            run
        };

        if length == 0 {
            let c = rest.chars().next().unwrap_or_default();
            return Err(self.fail(LexicalErrorKind::Unrecognized(c), start, start + 1));
        }

        let lexeme = &rest[..length];
        let kind = TokenKind::keyword(lexeme).unwrap_or(TokenKind::Name);
        Ok(self.emit(kind, start, length))
    }

    fn lex_string(&mut self, start: usize) -> Result<Token, LexicalError> {
        let rest = self.rest();
        let mut escaped = false;
        for (index, c) in rest.char_indices().skip(1) {
            match c {
                '\n' => break,
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => return Ok(self.emit(TokenKind::String, start, index + 1)),
                _ => {}
            }
        }

        let line_end = rest.find('\n').unwrap_or(rest.len());
        Err(self.fail(LexicalErrorKind::UnclosedString, start, start + line_end))
    }
}
