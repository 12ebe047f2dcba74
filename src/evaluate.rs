//! Boolean evaluation of formulas over finite traces
//!
//! A formula is evaluated against a window `[begin, end)` of a trace. Propositional operators
//! combine the values of their operands over the same window, while temporal operators evaluate
//! their operands over suffix windows `[i, end)` where `i` ranges over the interval of the
//! operator shifted by `begin` and clipped to the end of the window.
//!
//! When the window is too short to reach the lower bound of an operator, `Finally` and `Until`
//! are false and their duals `Globally` and `Release` are vacuously true.

use log::trace;

use crate::formula::Formula;
use crate::interval::Interval;
use crate::trace::State;

impl Formula {
    /// Evaluate the formula over an entire trace
    ///
    /// ```rust
    /// use mltl::parse;
    ///
    /// let formula = parse("G[0,1](p0)").unwrap();
    ///
    /// assert!(!formula.evaluate(&["1", "0"]));
    /// assert!(formula.evaluate(&["1", "1"]));
    /// ```
    pub fn evaluate<S>(&self, trace: &[S]) -> bool
    where
        S: State,
    {
        let result = self.evaluate_window(trace, 0, trace.len());
        trace!("{} evaluated to {} over {} steps", self, result, trace.len());

        result
    }

    /// Evaluate the formula over the window `[begin, end)` of a trace
    ///
    /// Windows extending past the end of the trace are clipped to the trace, and a window with
    /// `begin > end` is treated as empty.
    pub fn evaluate_window<S>(&self, trace: &[S], begin: usize, end: usize) -> bool
    where
        S: State,
    {
        let end = end.min(trace.len());
        let begin = begin.min(end);

        self.eval(trace, begin, end)
    }

    // Callers guarantee begin <= end <= trace.len()
    fn eval<S>(&self, trace: &[S], begin: usize, end: usize) -> bool
    where
        S: State,
    {
        match self {
            Formula::Constant(value) => *value,
            Formula::Variable(id) => variable(trace, *id, begin, end),
            Formula::Negation(operand) => !operand.eval(trace, begin, end),
            Formula::And { left, right } => left.eval(trace, begin, end) && right.eval(trace, begin, end),
            Formula::Xor { left, right } => left.eval(trace, begin, end) != right.eval(trace, begin, end),
            Formula::Or { left, right } => left.eval(trace, begin, end) || right.eval(trace, begin, end),
            Formula::Implies { left, right } => !left.eval(trace, begin, end) || right.eval(trace, begin, end),
            Formula::Equiv { left, right } => left.eval(trace, begin, end) == right.eval(trace, begin, end),
            Formula::Finally { operand, bounds } => {
                reaches(bounds, begin, end) && bounds.window(begin, end).any(|i| operand.eval(trace, i, end))
            }
            Formula::Globally { operand, bounds } => {
                !reaches(bounds, begin, end) || bounds.window(begin, end).all(|i| operand.eval(trace, i, end))
            }
            Formula::Until { left, right, bounds } => {
                if !reaches(bounds, begin, end) {
                    return false;
                }

                let mut indices = bounds.window(begin, end);
                let start = indices.start;

                match indices.find(|&i| right.eval(trace, i, end)) {
                    Some(first) => (start..first).all(|j| left.eval(trace, j, end)),
                    None => false,
                }
            }
            Formula::Release { left, right, bounds } => {
                if !reaches(bounds, begin, end) {
                    return true;
                }

                let mut indices = bounds.window(begin, end);
                let start = indices.start;

                // Either the right operand holds over the whole interval, or the left operand
                // releases it at some step before the right operand first fails.
                match indices.find(|&i| !right.eval(trace, i, end)) {
                    Some(failure) => (start..failure).any(|k| left.eval(trace, k, end)),
                    None => true,
                }
            }
        }
    }
}

fn variable<S>(trace: &[S], id: u32, begin: usize, end: usize) -> bool
where
    S: State,
{
    if begin >= end {
        return false;
    }

    let id = match usize::try_from(id) {
        Ok(id) => id,
        Err(_) => return false,
    };

    trace
        .get(begin)
        .and_then(|state| state.bit(id))
        .unwrap_or(false)
}

/// Whether the window `[begin, end)` is long enough to contain the lower bound offset
fn reaches(bounds: &Interval, begin: usize, end: usize) -> bool {
    end - begin > bounds.lower()
}
