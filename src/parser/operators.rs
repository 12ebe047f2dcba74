use nom::combinator::cut;
use nom::error::context;
use nom::Parser;

use super::common::{interval, ParseResult};
use super::errors::GrammarError;
use crate::formula::Formula;
use crate::interval::Interval;

pub(crate) type BoundedBinaryCtor = fn(Formula, Interval, Formula) -> Formula;

/// Apply `subparser` to the input after a required operand, committing once `op` matches
fn operand<'a, S>(subparser: &mut S, input: &'a str) -> ParseResult<'a, Formula>
where
    S: Parser<&'a str, Formula, GrammarError<'a>>,
{
    cut(context("operand", |input: &'a str| subparser.parse(input)))(input)
}

/// Prefix operator without bounds, such as negation
pub(crate) fn unaryop<'a, O, T, S, F>(mut op: O, mut subparser: S, func: F) -> impl FnMut(&'a str) -> ParseResult<'a, Formula>
where
    O: Parser<&'a str, T, GrammarError<'a>>,
    S: Parser<&'a str, Formula, GrammarError<'a>>,
    F: Fn(Formula) -> Formula,
{
    move |input: &'a str| {
        let (next, _) = op.parse(input)?;
        let (rest, subformula) = operand(&mut subparser, next)?;

        Ok((rest, func(subformula)))
    }
}

/// Prefix temporal operator followed by a mandatory interval, such as `F[0,3]`
pub(crate) fn boundedop<'a, O, T, S, F>(mut op: O, mut subparser: S, func: F) -> impl FnMut(&'a str) -> ParseResult<'a, Formula>
where
    O: Parser<&'a str, T, GrammarError<'a>>,
    S: Parser<&'a str, Formula, GrammarError<'a>>,
    F: Fn(Interval, Formula) -> Formula,
{
    move |input: &'a str| {
        let (next, _) = op.parse(input)?;
        let (next, bounds) = cut(interval)(next)?;
        let (rest, subformula) = operand(&mut subparser, next)?;

        Ok((rest, func(bounds, subformula)))
    }
}

/// Left-associative chain of infix operators of a single precedence level
///
/// Parses `operand (op operand)*` and folds the operands from the left using `func`.
pub(crate) fn binop<'a, O, T, S, F>(mut op: O, mut subparser: S, func: F) -> impl FnMut(&'a str) -> ParseResult<'a, Formula>
where
    O: Parser<&'a str, T, GrammarError<'a>>,
    S: Parser<&'a str, Formula, GrammarError<'a>>,
    F: Fn(Formula, Formula) -> Formula,
{
    move |input: &'a str| {
        let (mut rest, mut formula) = subparser.parse(input)?;

        loop {
            let next = match op.parse(rest) {
                Ok((next, _)) => next,
                Err(nom::Err::Error(_)) => return Ok((rest, formula)),
                Err(err) => return Err(err),
            };

            let (next, right) = operand(&mut subparser, next)?;
            rest = next;
            formula = func(formula, right);
        }
    }
}

/// Left-associative chain of bounded infix operators, such as `U[0,3]` and `R[1,2]`
///
/// The operator parser selects the constructor, so operators of the same precedence can be
/// mixed within one chain.
pub(crate) fn bounded_binop<'a, O, S>(mut op: O, mut subparser: S) -> impl FnMut(&'a str) -> ParseResult<'a, Formula>
where
    O: Parser<&'a str, BoundedBinaryCtor, GrammarError<'a>>,
    S: Parser<&'a str, Formula, GrammarError<'a>>,
{
    move |input: &'a str| {
        let (mut rest, mut formula) = subparser.parse(input)?;

        loop {
            let (next, ctor) = match op.parse(rest) {
                Ok(parsed) => parsed,
                Err(nom::Err::Error(_)) => return Ok((rest, formula)),
                Err(err) => return Err(err),
            };

            let (next, bounds) = cut(interval)(next)?;
            let (next, right) = operand(&mut subparser, next)?;
            rest = next;
            formula = ctor(formula, bounds, right);
        }
    }
}
