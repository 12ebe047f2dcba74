use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, multispace0, one_of};
use nom::combinator::{recognize, value};
use nom::error::context;
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};

use super::errors::GrammarError;
use crate::formula::Formula;
use crate::interval::Interval;

pub(crate) type ParseResult<'a, T> = IResult<&'a str, T, GrammarError<'a>>;

/// Surround a parser with optional whitespace
pub(crate) fn ws<'a, P, T>(parser: P) -> impl FnMut(&'a str) -> ParseResult<'a, T>
where
    P: Parser<&'a str, T, GrammarError<'a>>,
{
    delimited(multispace0, parser, multispace0)
}

pub(crate) fn op0<'a>(op: &'a str) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
    ws(tag(op))
}

pub(crate) fn integer(input: &str) -> ParseResult<'_, usize> {
    let (rest, digits) = digit1(input)?;

    match digits.parse() {
        Ok(number) => Ok((rest, number)),
        Err(_) => {
            let message = format!("integer {} is too large", digits);
            Err(nom::Err::Failure(GrammarError::lexical(input, message)))
        }
    }
}

pub(crate) fn constant(input: &str) -> ParseResult<'_, Formula> {
    let literal = alt((value(true, tag("true")), value(false, tag("false"))));
    let (rest, literal) = ws(literal)(input)?;

    Ok((rest, Formula::Constant(literal)))
}

/// Propositional variable `p<id>`
pub(crate) fn variable(input: &str) -> ParseResult<'_, Formula> {
    let (start, _) = multispace0(input)?;
    let (after_p, _) = char('p')(start)?;

    let id = match digit1::<_, GrammarError>(after_p) {
        Ok((rest, digits)) => digits.parse::<u32>().map(|id| (rest, id)).map_err(|_| {
            let message = format!("variable id {} is too large", digits);
            GrammarError::lexical(start, message)
        }),
        Err(_) => {
            let message = "expected a numeric variable id after 'p'".to_string();
            Err(GrammarError::lexical(start, message))
        }
    };

    let (rest, id) = id.map_err(nom::Err::Failure)?;
    let (rest, _) = multispace0(rest)?;

    Ok((rest, Formula::Variable(id)))
}

/// Closed interval `[lower,upper]` of a temporal operator
pub(crate) fn interval(input: &str) -> ParseResult<'_, Interval> {
    let (start, _) = multispace0(input)?;
    let (rest, _) = context("'['", op0("["))(start)?;
    let (rest, lower) = context("lower bound", integer)(rest)?;
    let (rest, _) = context("','", op0(","))(rest)?;
    let (rest, upper) = context("upper bound", integer)(rest)?;
    let (rest, _) = context("']'", op0("]"))(rest)?;

    match Interval::new(lower, upper) {
        Ok(bounds) => Ok((rest, bounds)),
        Err(error) => Err(nom::Err::Failure(GrammarError::bounds(start, error))),
    }
}

/// Recognize a single token of the formula language, used to describe unexpected input
pub(crate) fn token(input: &str) -> IResult<&str, &str> {
    let mut parser = alt((
        tag("<->"),
        tag("->"),
        tag("true"),
        tag("false"),
        recognize(pair(char('p'), digit1)),
        digit1,
        recognize(one_of("~&^|FGUR()[],")),
    ));

    parser(input)
}
