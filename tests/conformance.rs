use std::error::Error;

use mltl::trace::{Step, Trace};
use mltl::{parse, Formula, Interval, Kind, ParseError, ParseErrorKind};

fn p(id: u32) -> Formula {
    Formula::variable(id)
}

#[test]
fn globally_scenario() -> Result<(), Box<dyn Error>> {
    let formula = parse("G[0,4](~p1&p2)")?;
    let reparsed = parse(&formula.to_string())?;

    assert_eq!(formula.to_string(), "G[0,4]((~(p1))&(p2))");
    assert_eq!(formula.pretty().to_string(), "G[0,4](~p1 & p2)");
    assert_eq!(reparsed, formula);
    assert_eq!(formula.future_reach(), 5);

    assert!(formula.evaluate(&["101", "101", "001", "101", "101", "001"]));
    assert!(!formula.evaluate(&["101", "101", "001", "101", "111", "001"]));

    assert_eq!(formula.kind(), Kind::Globally);
    assert_eq!(formula.lower_bound(), Some(0));
    assert_eq!(formula.upper_bound(), Some(4));
    assert_eq!(formula.operand().map(|operand| operand.to_string()), Some("(~(p1))&(p2)".to_string()));
    assert_eq!(formula.count(Kind::Variable), 2);
    assert_eq!(formula.size(), 5);
    assert_eq!(formula.depth(), 3);

    Ok(())
}

#[test]
fn release_scenario() -> Result<(), Box<dyn Error>> {
    let formula = parse("(p0&~p1)R[0,3](p2)")?;
    let steps = ["001", "001", "101", "000", "000", "101", "100", "110"];

    assert!(formula.evaluate(&steps));
    assert!(formula.evaluate(&Trace::<Step>::parse_steps(steps)?));
    assert!(formula.evaluate(&Trace::from(steps)));

    Ok(())
}

#[test]
fn globally_short_trace() -> Result<(), Box<dyn Error>> {
    let formula = parse("G[0,1](p0)")?;

    assert!(!formula.evaluate(&["1", "0"]));
    assert!(formula.evaluate(&["1", "1"]));

    let bits = vec![vec![true], vec![false]];
    assert!(!formula.evaluate(&bits));

    Ok(())
}

#[test]
fn invalid_bounds() {
    let error = parse("G[11,10](~p1)").unwrap_err();

    assert_eq!(error.kind(), ParseErrorKind::Bounds);
    assert!(matches!(error, ParseError::Bounds { offset: 1, .. }));
    assert!(error.to_string().contains("lower bound 11 is greater than upper bound 10"));
}

#[test]
fn structural_comparison() -> Result<(), Box<dyn Error>> {
    let f3 = parse("(F[0,2](p3))")?;
    let f1 = parse("(F[0,2](p1))")?;
    let wider = parse("(F[0,3](p3))")?;

    assert_ne!(f3, f1);
    assert!(f1 < f3);
    assert!(f3 < wider);
    assert!(f3 <= wider);
    assert!(wider > f3);
    assert!(wider >= wider.clone());
    assert!(p(9) < !p(0));
    assert!(Formula::constant(true) < p(0));

    Ok(())
}

#[test]
fn modify_copy() -> Result<(), Box<dyn Error>> {
    let original = parse("G[0,4](~p1&p2)")?;
    let mut copy = original.clone();
    let replacement = parse("(~p1&p0|F[0,2](p1))")?;

    let previous = copy.replace_operand(replacement).map_err(|_| "globally has an operand")?;

    assert_eq!(previous.to_string(), "(~(p1))&(p2)");
    assert_eq!(original.pretty().to_string(), "G[0,4](~p1 & p2)");
    assert_eq!(copy.pretty().to_string(), "G[0,4]((~p1 & p0) | F[0,2]p1)");
    assert_eq!(copy.to_string(), "G[0,4](((~(p1))&(p0))|(F[0,2](p1)))");
    assert_eq!(copy.future_reach(), 7);

    if let Some(bounds) = copy.bounds_mut() {
        bounds.set(1, 2)?;
    }

    assert_eq!(copy.bounds(), Some(&Interval::new(1, 2)?));
    assert_eq!(original.bounds(), Some(&Interval::new(0, 4)?));

    Ok(())
}

#[test]
fn build_without_parser() -> Result<(), Box<dyn Error>> {
    let mut formula = Formula::finally(Interval::point(0), p(0));

    formula.replace_operand(p(1)).map_err(|_| "finally has an operand")?;

    if let Some(bounds) = formula.bounds_mut() {
        bounds.set_upper(2)?;
    }

    assert_eq!(formula.pretty().to_string(), "F[0,2]p1");
    assert_eq!(formula, parse("F[0,2](p1)")?);
    assert!(formula.evaluate(&["00", "00", "01"]));
    assert!(!formula.evaluate(&["00", "00", "00", "01"]));

    Ok(())
}

#[test]
fn mutators_preserve_kind() -> Result<(), Box<dyn Error>> {
    let mut leaf = p(3);

    assert_eq!(leaf.set_id(4), Some(3));
    assert_eq!(leaf.set_value(true), None);
    assert_eq!(leaf.replace_operand(p(0)), Err(p(0)));
    assert_eq!(leaf, p(4));

    let mut until = parse("p0 U[2,5] p1")?;

    assert!(until.bounds_mut().map(|bounds| bounds.set_lower(6)).map_or(false, |result| result.is_err()));
    assert_eq!(until.replace_left(p(7)), Ok(p(0)));
    assert_eq!(until.replace_right(p(8)), Ok(p(1)));
    assert_eq!(until.to_string(), "(p7)U[2,5](p8)");
    assert_eq!(until.kind(), Kind::Until);

    Ok(())
}

#[test]
fn from_str() -> Result<(), Box<dyn Error>> {
    let formula: Formula = "p0 -> F[0,3] p1".parse()?;

    assert_eq!(formula, Formula::implies(p(0), Formula::finally(Interval::new(0, 3)?, p(1))));
    assert_eq!("p0 &".parse::<Formula>().map_err(|error| error.kind()), Err(ParseErrorKind::Syntax));

    Ok(())
}

#[test]
fn formulas_are_shareable_across_threads() -> Result<(), Box<dyn Error>> {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Formula>();

    let formula = parse("F[0,2](p0)")?;
    let worker = formula.clone();
    let handle = std::thread::spawn(move || worker.evaluate(&["0", "0", "1"]));

    assert_eq!(handle.join().map_err(|_| "worker panicked")?, formula.evaluate(&["0", "0", "1"]));

    Ok(())
}
