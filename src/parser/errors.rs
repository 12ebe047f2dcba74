use nom::error::{ContextError, ErrorKind};
use thiserror::Error;

use super::common::token;
use crate::interval::BoundsError;

/// Category of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The input contains a character or token that is not part of the formula language
    Lexical,

    /// The tokens are valid but do not form a formula
    Syntax,

    /// A temporal operator has a lower bound greater than its upper bound
    Bounds,
}

/// Error produced when a string cannot be parsed into a formula
///
/// Every variant records the byte offset into the input where the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("lexical error at offset {offset}: {message}")]
    Lexical { offset: usize, message: String },

    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("invalid interval at offset {offset}: {source}")]
    Bounds { offset: usize, source: BoundsError },
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::Lexical { .. } => ParseErrorKind::Lexical,
            Self::Syntax { .. } => ParseErrorKind::Syntax,
            Self::Bounds { .. } => ParseErrorKind::Bounds,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Self::Lexical { offset, .. } | Self::Syntax { offset, .. } | Self::Bounds { offset, .. } => *offset,
        }
    }

    /// Build an error describing the failure at `rest`, a suffix of `input`
    pub(crate) fn at(input: &str, rest: &str, reason: Reason) -> Self {
        let rest = rest.trim_start();
        let offset = input.len() - rest.len();

        match reason {
            Reason::Lexical(message) => Self::Lexical { offset, message },
            Reason::Bounds(source) => Self::Bounds { offset, source },
            Reason::Nesting(limit) => Self::Syntax {
                offset,
                message: format!("formula nested too deeply, the limit is {} levels", limit),
            },
            Reason::Expected(expected) => Self::unexpected(offset, rest, Some(expected)),
            Reason::Nom(_) => Self::unexpected(offset, rest, None),
        }
    }

    fn unexpected(offset: usize, rest: &str, expected: Option<&str>) -> Self {
        let found = match token(rest) {
            Ok((_, found)) => format!("'{}'", found),
            Err(_) => match rest.chars().next() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    let word = rest
                        .split(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
                        .next()
                        .unwrap_or_default();
                    let message = format!("unrecognized token '{}'", word);
                    return Self::Lexical { offset, message };
                }
                Some(c) => {
                    let message = format!("unrecognized character {:?}", c);
                    return Self::Lexical { offset, message };
                }
                None => "end of input".to_string(),
            },
        };

        let message = match expected {
            Some(expected) => format!("expected {}, found {}", expected, found),
            None => format!("unexpected {}", found),
        };

        Self::Syntax { offset, message }
    }
}

/// Why the grammar rejected the input at a given position
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reason {
    Nom(ErrorKind),
    Expected(&'static str),
    Lexical(String),
    Bounds(BoundsError),
    Nesting(usize),
}

/// Error type threaded through the nom combinators
///
/// When alternatives fail, the error that got furthest into the input is kept so that reported
/// offsets point at the real problem rather than at the start of the last alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GrammarError<'a> {
    pub(crate) input: &'a str,
    pub(crate) reason: Reason,
}

impl<'a> GrammarError<'a> {
    pub(crate) fn lexical(input: &'a str, message: String) -> Self {
        Self {
            input,
            reason: Reason::Lexical(message),
        }
    }

    pub(crate) fn bounds(input: &'a str, error: BoundsError) -> Self {
        Self {
            input,
            reason: Reason::Bounds(error),
        }
    }

    pub(crate) fn nesting(input: &'a str, limit: usize) -> Self {
        Self {
            input,
            reason: Reason::Nesting(limit),
        }
    }
}

impl<'a> nom::error::ParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self {
            input,
            reason: Reason::Nom(kind),
        }
    }

    fn append(_: &'a str, _: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        if self.input.len() < other.input.len() {
            self
        } else {
            other
        }
    }
}

impl<'a> ContextError<&'a str> for GrammarError<'a> {
    fn add_context(_: &'a str, expected: &'static str, other: Self) -> Self {
        match other.reason {
            Reason::Nom(_) => Self {
                input: other.input,
                reason: Reason::Expected(expected),
            },
            _ => other,
        }
    }
}
