//! Parser for the textual formula language
//!
//! The grammar, from lowest to highest precedence:
//!
//! ```text
//! formula  := implies ("<->" implies)*
//! implies  := or ("->" or)*
//! or       := xor ("|" xor)*
//! xor      := and ("^" and)*
//! and      := until ("&" until)*
//! until    := unary (("U" | "R") interval unary)*
//! unary    := "~" unary | ("F" | "G") interval unary | primary
//! primary  := "true" | "false" | "p" digits | "(" formula ")"
//! interval := "[" digits "," digits "]"
//! ```
//!
//! All binary operators are left-associative and whitespace is permitted between any two tokens.
//! Unary operators and parenthesized subformulas may nest at most 64 levels deep. Deeper input is
//! rejected with a syntax error instead of exhausting the stack.

mod common;
mod errors;
mod formula;
mod operators;

use std::str::FromStr;

use log::debug;
use nom::error::{context, ErrorKind};

pub use self::errors::{ParseError, ParseErrorKind};
use self::errors::Reason;
use crate::formula::Formula;

/// Parse a string into a [`Formula`]
///
/// The entire input must form a single formula, otherwise a [`ParseError`] is returned
/// describing the first problem encountered.
///
/// ```rust
/// use mltl::{parse, Formula, Interval, ParseErrorKind};
///
/// let formula = parse("G[0,4](~p1&p2)").unwrap();
/// let expected = Formula::globally(Interval::new(0, 4).unwrap(), !Formula::variable(1) & Formula::variable(2));
///
/// assert_eq!(formula, expected);
/// assert_eq!(parse("G[11,10](~p1)").unwrap_err().kind(), ParseErrorKind::Bounds);
/// ```
pub fn parse(input: &str) -> Result<Formula, ParseError> {
    let result = match context("formula", formula::formula)(input) {
        Ok((rest, parsed)) if rest.is_empty() => Ok(parsed),
        Ok((rest, _)) => Err(ParseError::at(input, rest, Reason::Nom(ErrorKind::Eof))),
        Err(nom::Err::Error(error)) | Err(nom::Err::Failure(error)) => {
            Err(ParseError::at(input, error.input, error.reason))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Syntax {
            offset: input.len(),
            message: "incomplete input".to_string(),
        }),
    };

    match &result {
        Ok(parsed) => debug!("parsed {:?} into {}", input, parsed),
        Err(error) => debug!("failed to parse {:?}: {}", input, error),
    }

    result
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
