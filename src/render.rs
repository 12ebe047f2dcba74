//! Textual rendering of formulas
//!
//! The [`Display`] implementation of [`Formula`] produces the canonical form, which
//! parenthesizes every operand so that parsing the output reproduces the same formula. The
//! [`Pretty`] adapter drops parentheses that operator precedence makes redundant and adds
//! spacing around binary operators. Pretty output is meant for people and is not guaranteed to
//! parse back into an identical formula.

use std::fmt::{Display, Formatter, Result};

use crate::formula::Formula;

fn symbol(formula: &Formula) -> &'static str {
    formula.kind().symbol().unwrap_or_default()
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Formula::Constant(value) => write!(f, "{}", value),
            Formula::Variable(id) => write!(f, "p{}", id),
            Formula::Negation(operand) => write!(f, "{}({})", symbol(self), operand),
            Formula::Finally { operand, bounds } | Formula::Globally { operand, bounds } => {
                write!(f, "{}{}({})", symbol(self), bounds, operand)
            }
            Formula::And { left, right }
            | Formula::Xor { left, right }
            | Formula::Or { left, right }
            | Formula::Implies { left, right }
            | Formula::Equiv { left, right } => write!(f, "({}){}({})", left, symbol(self), right),
            Formula::Until { left, right, bounds } | Formula::Release { left, right, bounds } => {
                write!(f, "({}){}{}({})", left, symbol(self), bounds, right)
            }
        }
    }
}

/// Human-oriented rendering of a formula, see [`Formula::pretty`]
#[derive(Debug, Clone, Copy)]
pub struct Pretty<'a>(&'a Formula);

impl Formula {
    /// Render the formula with minimal parentheses
    ///
    /// ```rust
    /// use mltl::parse;
    ///
    /// let formula = parse("G[0,4](~p1&p2)").unwrap();
    /// assert_eq!(formula.pretty().to_string(), "G[0,4](~p1 & p2)");
    /// ```
    pub fn pretty(&self) -> Pretty<'_> {
        Pretty(self)
    }
}

impl<'a> Pretty<'a> {
    fn child(&self, f: &mut Formatter<'_>, child: &Formula, parenthesize: bool) -> Result {
        if parenthesize {
            write!(f, "({})", Pretty(child))
        } else {
            write!(f, "{}", Pretty(child))
        }
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let formula = self.0;

        match formula {
            Formula::Constant(_) | Formula::Variable(_) => write!(f, "{}", formula),
            Formula::Negation(operand) => {
                f.write_str(symbol(formula))?;
                self.child(f, operand, operand.is_binary_op())
            }
            Formula::Finally { operand, bounds } | Formula::Globally { operand, bounds } => {
                write!(f, "{}{}", symbol(formula), bounds)?;
                self.child(f, operand, operand.is_binary_op())
            }
            Formula::And { left, right }
            | Formula::Xor { left, right }
            | Formula::Or { left, right }
            | Formula::Implies { left, right }
            | Formula::Equiv { left, right } => {
                let mixed = |child: &Formula| child.is_binary_op() && child.kind() != formula.kind();

                self.child(f, left, mixed(left))?;
                write!(f, " {} ", symbol(formula))?;
                self.child(f, right, mixed(right))
            }
            Formula::Until { left, right, bounds } | Formula::Release { left, right, bounds } => {
                self.child(f, left, left.is_binary_op())?;
                write!(f, " {}{} ", symbol(formula), bounds)?;
                self.child(f, right, right.is_binary_op())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use crate::formula::Formula;
    use crate::interval::Interval;

    fn p(id: u32) -> Formula {
        Formula::variable(id)
    }

    #[test]
    fn canonical() -> Result<(), Box<dyn Error>> {
        let bounds = Interval::new(0, 3)?;

        assert_eq!(Formula::constant(true).to_string(), "true");
        assert_eq!(p(12).to_string(), "p12");
        assert_eq!((!p(1)).to_string(), "~(p1)");
        assert_eq!((p(0) & !p(1)).to_string(), "(p0)&(~(p1))");
        assert_eq!(Formula::implies(p(0), p(1)).to_string(), "(p0)->(p1)");
        assert_eq!(Formula::equiv(p(0), p(1)).to_string(), "(p0)<->(p1)");
        assert_eq!(Formula::finally(bounds, p(2)).to_string(), "F[0,3](p2)");
        assert_eq!(
            Formula::release(p(0) & !p(1), bounds, p(2)).to_string(),
            "((p0)&(~(p1)))R[0,3](p2)"
        );

        Ok(())
    }

    #[test]
    fn pretty() -> Result<(), Box<dyn Error>> {
        let bounds = Interval::new(1, 2)?;

        assert_eq!((!p(1)).pretty().to_string(), "~p1");
        assert_eq!((!(p(0) | p(1))).pretty().to_string(), "~(p0 | p1)");
        assert_eq!((!!p(0)).pretty().to_string(), "~~p0");
        assert_eq!(((p(0) & p(1)) & p(2)).pretty().to_string(), "p0 & p1 & p2");
        assert_eq!(((p(0) | p(1)) & p(2)).pretty().to_string(), "(p0 | p1) & p2");
        assert_eq!((p(0) ^ Formula::finally(bounds, p(1))).pretty().to_string(), "p0 ^ F[1,2]p1");
        assert_eq!(
            Formula::globally(bounds, Formula::until(p(0), bounds, p(1))).pretty().to_string(),
            "G[1,2](p0 U[1,2] p1)"
        );
        assert_eq!(
            Formula::until(p(0) & p(1), bounds, !p(2)).pretty().to_string(),
            "(p0 & p1) U[1,2] ~p2"
        );
        assert_eq!(
            Formula::until(Formula::until(p(0), bounds, p(1)), bounds, p(2)).pretty().to_string(),
            "(p0 U[1,2] p1) U[1,2] p2"
        );

        Ok(())
    }
}
