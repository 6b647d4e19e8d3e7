use std::fmt;

use thiserror::Error;

/// Byte range within the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// All errors produced by cronplan.
///
/// The convenience entry points (`is_valid`, `describe`, `next_occurrences`)
/// never surface these; they collapse to `false`, the invalid description or
/// an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CronError {
    #[error("expected {expected} fields, got {found}")]
    FieldCount {
        expected: &'static str,
        found: usize,
        input: String,
    },

    #[error("invalid character in {field} field: {token:?}")]
    InvalidCharacter {
        field: &'static str,
        token: String,
        span: Span,
        input: String,
    },

    #[error("step must be a positive integer: {token:?}")]
    InvalidStep {
        token: String,
        span: Span,
        input: String,
    },

    #[error("{message}")]
    Eval { message: String },
}

impl CronError {
    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval {
            message: message.into(),
        }
    }

    /// Format a rich error with the offending token underlined.
    pub fn display_rich(&self) -> String {
        match self {
            Self::InvalidCharacter { span, input, .. } | Self::InvalidStep { span, input, .. } => {
                format_span_error(&self.to_string(), span, input)
            }
            Self::FieldCount { input, .. } => {
                let whole = Span::new(0, input.len());
                format_span_error(&self.to_string(), &whole, input)
            }
            Self::Eval { .. } => format!("error: {self}"),
        }
    }
}

fn format_span_error(message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("error: {message}\n");
    out.push_str(&format!("  {input}\n"));
    out.push_str(&" ".repeat(span.start + 2));
    out.push_str(&"^".repeat((span.end - span.start).max(1)));
    out
}

impl From<jiff::Error> for CronError {
    fn from(e: jiff::Error) -> Self {
        Self::eval(format!("calendar arithmetic failed: {e}"))
    }
}
