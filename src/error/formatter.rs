use super::{ConfigError, UnclassifiedErrorKind};
use crate::{
    evaluator::error::EvaluationErrorKind,
    lexer::{LexicalErrorKind, Span},
    parser::ParserErrorKind,
};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::ops::Range;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

pub trait DiagnosticFormatter {
    fn format(&self, error: &ConfigError) -> String;
}

pub struct DebugFormatter;

impl DiagnosticFormatter for DebugFormatter {
    fn format(&self, error: &ConfigError) -> String {
        format!("{error:?}")
    }
}

/// One line per failure: the position for syntax errors, the message otherwise.
pub struct BasicFormatter;

impl DiagnosticFormatter for BasicFormatter {
    fn format(&self, error: &ConfigError) -> String {
        format!("{error}")
    }
}

/// Source-annotated reports.
pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src str,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src str) -> Self {
        Self { text, path }
    }

    /// Ariadne counts characters, spans count bytes.
    fn char_range(&self, span: Span) -> Range<usize> {
        let range = span.range();
        let start = self
            .text
            .get(..range.start)
            .map_or(0, |prefix| prefix.chars().count());
        let length = self
            .text
            .get(range)
            .map_or(0, |inner| inner.chars().count());
        start..start + length
    }

    fn label_message(error: &ConfigError) -> String {
        match error {
            ConfigError::Syntax(e) => match &e.kind {
                ParserErrorKind::UnexpectedToken { actual, expected } => format!(
                    "Expected {} but got {}",
                    expected.fg(Color::BrightCyan),
                    actual.fg(Color::BrightRed)
                ),
                ParserErrorKind::LexicalError(lexical) => match lexical.kind {
                    LexicalErrorKind::Unrecognized(c) => {
                        format!("No token starts with {}", c.escape_debug().fg(Color::BrightRed))
                    }
                    LexicalErrorKind::UnclosedString => "This string is never closed".into(),
                },
                ParserErrorKind::NestingTooDeep { .. } => format!("{}", e.kind),
            },
            ConfigError::Evaluation(e) => match &e.kind {
                EvaluationErrorKind::UnknownName(name) => {
                    format!("{} has not been declared yet", name.fg(Color::BrightRed))
                }
                EvaluationErrorKind::ChrArity => "The stack is empty here".into(),
                EvaluationErrorKind::ChrNonNumeric(value) => {
                    format!("Got a {}", value.type_name().fg(Color::BrightRed))
                }
                EvaluationErrorKind::InsufficientArguments {
                    operator,
                    available,
                } => format!(
                    "{} needs 2 operands but the stack holds {}",
                    operator.fg(Color::BrightCyan),
                    available.fg(Color::BrightRed)
                ),
                EvaluationErrorKind::NonNumericOperands(lhs, rhs) => format!(
                    "Operands are a {} and a {}",
                    lhs.type_name().fg(Color::BrightRed),
                    rhs.type_name().fg(Color::BrightRed)
                ),
                EvaluationErrorKind::InvalidExpression { remaining } => format!(
                    "Leaves {} values on the stack instead of 1",
                    remaining.fg(Color::BrightRed)
                ),
            },
            ConfigError::Unclassified(e) => match &e.kind {
                UnclassifiedErrorKind::LiteralOutOfRange(_)
                | UnclassifiedErrorKind::Overflow { .. } => "Does not fit a 64-bit integer".into(),
                UnclassifiedErrorKind::InvalidCodePoint(code) => {
                    format!("{} is not a Unicode scalar value", code.fg(Color::BrightRed))
                }
                kind => format!("{kind}"),
            },
        }
    }
}

impl<'src> DiagnosticFormatter for PrettyFormatter<'src> {
    fn format(&self, error: &ConfigError) -> String {
        let path = self.path;
        let range = error
            .span()
            .map(|span| self.char_range(span))
            .unwrap_or(0..0);
        let mut output = std::io::Cursor::new(Vec::new());

        Report::build(ReportKind::Error, (path, range.clone()))
            .with_code(error.code())
            .with_message(format!("{error}"))
            .with_label(
                Label::new((path, range))
                    .with_message(Self::label_message(error))
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
