use std::cell::Cell;

use nom::branch::alt;
use nom::combinator::{cut, value};
use nom::error::context;
use nom::sequence::{pair, preceded};

use super::common::{constant, op0, variable, ParseResult};
use super::errors::GrammarError;
use super::operators::{binop, bounded_binop, boundedop, unaryop, BoundedBinaryCtor};
use crate::formula::Formula;

/// Maximum number of nested unary operators and parenthesized subformulas
pub(crate) const MAX_DEPTH: usize = 64;

thread_local! {
    static DEPTH: Cell<usize> = Cell::new(0);
}

/// Tracks how deeply the grammar has recursed, releasing its level when dropped
struct Nesting;

impl Nesting {
    fn enter(input: &str) -> Result<Self, nom::Err<GrammarError<'_>>> {
        DEPTH.with(|depth| {
            if depth.get() >= MAX_DEPTH {
                return Err(nom::Err::Failure(GrammarError::nesting(input, MAX_DEPTH)));
            }

            depth.set(depth.get() + 1);
            Ok(Nesting)
        })
    }
}

impl Drop for Nesting {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn subformula(input: &str) -> ParseResult<'_, Formula> {
    let body = pair(context("formula", formula), context("')'", op0(")")));
    let mut parser = preceded(op0("("), cut(body));
    let (rest, (inner, _)) = parser(input)?;

    Ok((rest, inner))
}

fn primary(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = alt((constant, variable, subformula));
    parser(input)
}

fn negation(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = unaryop(op0("~"), unary, Formula::negation);
    parser(input)
}

fn finally(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = boundedop(op0("F"), unary, Formula::finally);
    parser(input)
}

fn globally(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = boundedop(op0("G"), unary, Formula::globally);
    parser(input)
}

// Every recursive path of the grammar passes through here
fn unary(input: &str) -> ParseResult<'_, Formula> {
    let _level = Nesting::enter(input)?;
    let mut parser = alt((negation, finally, globally, primary));

    parser(input)
}

fn until(input: &str) -> ParseResult<'_, Formula> {
    let ops = alt((
        value(Formula::until as BoundedBinaryCtor, op0("U")),
        value(Formula::release as BoundedBinaryCtor, op0("R")),
    ));
    let mut parser = bounded_binop(ops, unary);

    parser(input)
}

fn and(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = binop(op0("&"), until, Formula::and);
    parser(input)
}

fn xor(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = binop(op0("^"), and, Formula::xor);
    parser(input)
}

fn or(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = binop(op0("|"), xor, Formula::or);
    parser(input)
}

fn implies(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = binop(op0("->"), or, Formula::implies);
    parser(input)
}

fn equiv(input: &str) -> ParseResult<'_, Formula> {
    let mut parser = binop(op0("<->"), implies, Formula::equiv);
    parser(input)
}

/// Complete formula, the lowest precedence level of the grammar
pub(crate) fn formula(input: &str) -> ParseResult<'_, Formula> {
    equiv(input)
}
