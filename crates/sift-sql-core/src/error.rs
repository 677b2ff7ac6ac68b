//! Diagnostic types shared by the lexer, parser, and facade.

use serde::Serialize;

use crate::lexer::Location;

/// The category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SqlErrorKind {
    /// General syntax error.
    Syntax,
    /// The lexer hit a character sequence it cannot tokenize.
    Lexical,
    /// A token other than the required one was found.
    UnexpectedToken,
    /// Input ended where a token was required.
    UnexpectedEnd,
    /// A string literal was opened but never closed.
    UnterminatedString,
    /// An identifier is malformed.
    InvalidIdentifier,
    /// A recognized construct the parser does not support.
    UnsupportedFeature,
    /// The input value itself is unusable.
    InvalidInput,
    /// The input contains no statement.
    EmptyInput,
    /// Post-parse validation failed.
    Validation,
    /// An internal failure surfaced as a diagnostic.
    Unexpected,
}

impl SqlErrorKind {
    /// Returns the stable tag for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "SYNTAX_ERROR",
            Self::Lexical => "LEXICAL_ERROR",
            Self::UnexpectedToken => "UNEXPECTED_TOKEN",
            Self::UnexpectedEnd => "UNEXPECTED_END",
            Self::UnterminatedString => "UNTERMINATED_STRING",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::UnsupportedFeature => "UNSUPPORTED_FEATURE",
            Self::InvalidInput => "INVALID_INPUT",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::Validation => "VALIDATION_ERROR",
            Self::Unexpected => "UNEXPECTED_ERROR",
        }
    }
}

/// Structured context for programmatic inspection of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorContext {
    /// What the parser required at this point.
    pub expected: String,
    /// What it found instead.
    pub actual: String,
}

/// A diagnostic produced by the lexer, parser, or facade.
///
/// Diagnostics are plain values. Positions are 1-based and point at
/// the first character of the offending token, or at end of input
/// when the input ends prematurely.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct SqlError {
    /// The category of the error.
    pub kind: SqlErrorKind,
    /// Human-readable message.
    pub message: String,
    /// 1-based line of the offending position.
    pub line: u32,
    /// 1-based column of the offending position.
    pub column: u32,
    /// Structured context (set for unexpected-token errors).
    pub context: Option<ErrorContext>,
}

impl SqlError {
    /// Creates a diagnostic of an arbitrary kind.
    #[must_use]
    pub fn new(kind: SqlErrorKind, message: impl Into<String>, at: Location) -> Self {
        Self {
            kind,
            message: message.into(),
            line: at.line,
            column: at.column,
            context: None,
        }
    }

    /// Creates a general syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, at: Location) -> Self {
        Self::new(SqlErrorKind::Syntax, message, at)
    }

    /// Creates a lexical error.
    #[must_use]
    pub fn lexical(message: impl Into<String>, at: Location) -> Self {
        Self::new(SqlErrorKind::Lexical, message, at)
    }

    /// Creates an "unexpected token" error with expected/actual context.
    #[must_use]
    pub fn unexpected_token(
        expected: impl Into<String>,
        actual: impl Into<String>,
        at: Location,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self {
            kind: SqlErrorKind::UnexpectedToken,
            message: format!("Unexpected token: expected {expected}, found {actual}"),
            line: at.line,
            column: at.column,
            context: Some(ErrorContext { expected, actual }),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_end(expected: impl Into<String>, at: Location) -> Self {
        let expected = expected.into();
        Self {
            kind: SqlErrorKind::UnexpectedEnd,
            message: format!("Unexpected end of input: expected {expected}"),
            line: at.line,
            column: at.column,
            context: None,
        }
    }

    /// Creates an unterminated-string error at the opening quote.
    #[must_use]
    pub fn unterminated_string(at: Location) -> Self {
        Self::new(
            SqlErrorKind::UnterminatedString,
            "Unterminated string literal",
            at,
        )
    }

    /// Creates an empty-input error, always positioned at 1:1.
    #[must_use]
    pub fn empty_input() -> Self {
        Self::new(
            SqlErrorKind::EmptyInput,
            "Input contains no SQL statement",
            Location::default(),
        )
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>, at: Location) -> Self {
        Self::new(SqlErrorKind::Validation, message, at)
    }

    /// Wraps an internal failure as a diagnostic.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(SqlErrorKind::Unexpected, message, Location::default())
    }
}
