use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::lang::{Language, Message};

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed numbers, strings or stray characters.
    LexError,
    /// Grammar violations, including arity checked at parse time.
    SyntaxError,
    /// Undefined variables and unknown functions.
    NameError,
    /// Type mismatches, division by zero, math-domain failures.
    DomainError,
    /// Limits the interpreter refuses to exceed, such as nesting depth.
    ResourceError,
}

impl ErrorKind {
    fn title(self) -> Message {
        match self {
            ErrorKind::LexError => Message::LexicalErrorTitle,
            ErrorKind::SyntaxError => Message::SyntaxErrorTitle,
            ErrorKind::NameError => Message::NameErrorTitle,
            ErrorKind::DomainError => Message::DomainErrorTitle,
            ErrorKind::ResourceError => Message::ResourceErrorTitle,
        }
    }

    fn color(self) -> Color {
        match self {
            ErrorKind::LexError => Color::Red,
            ErrorKind::SyntaxError => Color::Yellow,
            ErrorKind::NameError => Color::Blue,
            ErrorKind::DomainError => Color::Magenta,
            ErrorKind::ResourceError => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct RudisError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl RudisError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn lex_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::LexError, span, message)
    }

    pub fn syntax_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::SyntaxError, span, message)
    }

    pub fn name_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::NameError, span, message)
    }

    pub fn domain_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::DomainError, span, message)
    }

    pub fn resource_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::ResourceError, span, message)
    }

    /// One-line rendering, e.g. `Error: Division by zero`.
    pub fn line(&self, language: Language) -> String {
        format!("{}: {}", Message::ErrorPrefix.text(language), self.message)
    }

    /// Prints a full diagnostic with the offending source underlined.
    pub fn report(&self, source: &str, filename: Option<&str>, language: Language) {
        let filename = filename.unwrap_or("<repl>");
        let color = self.kind.color();
        let title = self.kind.title().text(language);

        // Spans may point one past the end (unexpected end of input).
        let start = self.span.start.min(source.len());
        let end = self.span.end.clamp(start, source.len());

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", title.fg(color), self.message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder = report_builder.with_note(format!(
                "{}: {}",
                Message::HelpNote.text(language).fg(Color::Cyan),
                help_text
            ));
        }

        if let Err(err) = report_builder
            .finish()
            .print((filename, Source::from(source)))
        {
            log::warn!("could not render diagnostic: {}", err);
            eprintln!("{}", self.line(language));
        }
    }
}
