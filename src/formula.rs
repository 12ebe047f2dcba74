use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::interval::Interval;

/// Kind of a formula node
///
/// The declaration order is the order used when comparing formulas of different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Constant,
    Variable,
    Negation,
    And,
    Xor,
    Or,
    Implies,
    Equiv,
    Finally,
    Globally,
    Until,
    Release,
}

impl Kind {
    pub const ALL: [Kind; 12] = [
        Kind::Constant,
        Kind::Variable,
        Kind::Negation,
        Kind::And,
        Kind::Xor,
        Kind::Or,
        Kind::Implies,
        Kind::Equiv,
        Kind::Finally,
        Kind::Globally,
        Kind::Until,
        Kind::Release,
    ];

    /// Number of operands taken by nodes of this kind
    pub fn arity(self) -> usize {
        match self {
            Kind::Constant | Kind::Variable => 0,
            Kind::Negation | Kind::Finally | Kind::Globally => 1,
            Kind::And | Kind::Xor | Kind::Or | Kind::Implies | Kind::Equiv | Kind::Until | Kind::Release => 2,
        }
    }

    pub fn is_unary_op(self) -> bool {
        self.arity() == 1
    }

    pub fn is_binary_op(self) -> bool {
        self.arity() == 2
    }

    /// Operators without time bounds. Constants and variables are not operators.
    pub fn is_propositional_op(self) -> bool {
        matches!(
            self,
            Kind::Negation | Kind::And | Kind::Xor | Kind::Or | Kind::Implies | Kind::Equiv
        )
    }

    pub fn is_temporal_op(self) -> bool {
        matches!(self, Kind::Finally | Kind::Globally | Kind::Until | Kind::Release)
    }

    /// Operator symbol used when rendering and parsing, `None` for leaves
    pub fn symbol(self) -> Option<&'static str> {
        let symbol = match self {
            Kind::Constant | Kind::Variable => return None,
            Kind::Negation => "~",
            Kind::And => "&",
            Kind::Xor => "^",
            Kind::Or => "|",
            Kind::Implies => "->",
            Kind::Equiv => "<->",
            Kind::Finally => "F",
            Kind::Globally => "G",
            Kind::Until => "U",
            Kind::Release => "R",
        };

        Some(symbol)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Mission-time linear temporal logic formula
///
/// Every node owns its subformulas, so a formula is always a finite tree and cloning a formula
/// produces a fully independent deep copy. Temporal operators carry an [`Interval`], which can
/// only hold bounds with `lower <= upper`.
///
/// Formulas are totally ordered: first by [`Kind`], then by their subformulas from left to
/// right, and finally by their interval. The comparison operators are all derived from this
/// single ordering.
///
/// ```rust
/// use mltl::{Formula, Interval};
///
/// let bounds = Interval::new(0, 4).unwrap();
/// let formula = Formula::globally(bounds, !Formula::variable(1) & Formula::variable(2));
///
/// assert_eq!(formula.to_string(), "G[0,4]((~(p1))&(p2))");
/// assert_eq!(formula.future_reach(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Formula {
    Constant(bool),
    Variable(u32),
    Negation(Box<Formula>),
    And { left: Box<Formula>, right: Box<Formula> },
    Xor { left: Box<Formula>, right: Box<Formula> },
    Or { left: Box<Formula>, right: Box<Formula> },
    Implies { left: Box<Formula>, right: Box<Formula> },
    Equiv { left: Box<Formula>, right: Box<Formula> },
    Finally { operand: Box<Formula>, bounds: Interval },
    Globally { operand: Box<Formula>, bounds: Interval },
    Until { left: Box<Formula>, right: Box<Formula>, bounds: Interval },
    Release { left: Box<Formula>, right: Box<Formula>, bounds: Interval },
}

macro_rules! binary_ctor {
    ($(#[$attr:meta])* $name:ident, $variant:ident) => {
        $(#[$attr])*
        pub fn $name(left: Formula, right: Formula) -> Self {
            Self::$variant {
                left: Box::new(left),
                right: Box::new(right),
            }
        }
    };
}

impl Formula {
    pub fn constant(value: bool) -> Self {
        Self::Constant(value)
    }

    pub fn variable(id: u32) -> Self {
        Self::Variable(id)
    }

    pub fn negation(operand: Formula) -> Self {
        Self::Negation(Box::new(operand))
    }

    binary_ctor!(and, And);
    binary_ctor!(xor, Xor);
    binary_ctor!(or, Or);
    binary_ctor!(implies, Implies);
    binary_ctor!(equiv, Equiv);

    pub fn finally(bounds: Interval, operand: Formula) -> Self {
        Self::Finally {
            operand: Box::new(operand),
            bounds,
        }
    }

    pub fn globally(bounds: Interval, operand: Formula) -> Self {
        Self::Globally {
            operand: Box::new(operand),
            bounds,
        }
    }

    pub fn until(left: Formula, bounds: Interval, right: Formula) -> Self {
        Self::Until {
            left: Box::new(left),
            right: Box::new(right),
            bounds,
        }
    }

    pub fn release(left: Formula, bounds: Interval, right: Formula) -> Self {
        Self::Release {
            left: Box::new(left),
            right: Box::new(right),
            bounds,
        }
    }

    /// Build a binary operator node of the given kind
    ///
    /// Returns `None` when `kind` is not a propositional binary operator.
    ///
    /// ```rust
    /// use mltl::{Formula, Kind};
    ///
    /// let (left, right) = (Formula::variable(0), Formula::variable(1));
    ///
    /// assert_eq!(Formula::binary(Kind::Xor, left.clone(), right.clone()), Some(left.clone() ^ right.clone()));
    /// assert_eq!(Formula::binary(Kind::Until, left, right), None);
    /// ```
    pub fn binary(kind: Kind, left: Formula, right: Formula) -> Option<Self> {
        let ctor = match kind {
            Kind::And => Self::and,
            Kind::Xor => Self::xor,
            Kind::Or => Self::or,
            Kind::Implies => Self::implies,
            Kind::Equiv => Self::equiv,
            _ => return None,
        };

        Some(ctor(left, right))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Constant(_) => Kind::Constant,
            Self::Variable(_) => Kind::Variable,
            Self::Negation(_) => Kind::Negation,
            Self::And { .. } => Kind::And,
            Self::Xor { .. } => Kind::Xor,
            Self::Or { .. } => Kind::Or,
            Self::Implies { .. } => Kind::Implies,
            Self::Equiv { .. } => Kind::Equiv,
            Self::Finally { .. } => Kind::Finally,
            Self::Globally { .. } => Kind::Globally,
            Self::Until { .. } => Kind::Until,
            Self::Release { .. } => Kind::Release,
        }
    }

    pub fn is_unary_op(&self) -> bool {
        self.kind().is_unary_op()
    }

    pub fn is_binary_op(&self) -> bool {
        self.kind().is_binary_op()
    }

    pub fn is_propositional_op(&self) -> bool {
        self.kind().is_propositional_op()
    }

    pub fn is_temporal_op(&self) -> bool {
        self.kind().is_temporal_op()
    }

    /// Operator symbol of this node. Leaves render as themselves.
    pub fn symbol(&self) -> String {
        match self.kind().symbol() {
            Some(symbol) => symbol.to_string(),
            None => self.to_string(),
        }
    }

    pub fn value(&self) -> Option<bool> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Variable(id) => Some(*id),
            _ => None,
        }
    }

    /// Operand of a unary operator
    pub fn operand(&self) -> Option<&Formula> {
        match self {
            Self::Negation(operand) | Self::Finally { operand, .. } | Self::Globally { operand, .. } => Some(operand),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&Formula> {
        self.children().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&Formula> {
        self.children().map(|(_, right)| right)
    }

    fn children(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Self::And { left, right }
            | Self::Xor { left, right }
            | Self::Or { left, right }
            | Self::Implies { left, right }
            | Self::Equiv { left, right }
            | Self::Until { left, right, .. }
            | Self::Release { left, right, .. } => Some((left, right)),
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<(&mut Box<Formula>, &mut Box<Formula>)> {
        match self {
            Self::And { left, right }
            | Self::Xor { left, right }
            | Self::Or { left, right }
            | Self::Implies { left, right }
            | Self::Equiv { left, right }
            | Self::Until { left, right, .. }
            | Self::Release { left, right, .. } => Some((left, right)),
            _ => None,
        }
    }

    fn operand_mut(&mut self) -> Option<&mut Box<Formula>> {
        match self {
            Self::Negation(operand) | Self::Finally { operand, .. } | Self::Globally { operand, .. } => Some(operand),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Option<&Interval> {
        match self {
            Self::Finally { bounds, .. }
            | Self::Globally { bounds, .. }
            | Self::Until { bounds, .. }
            | Self::Release { bounds, .. } => Some(bounds),
            _ => None,
        }
    }

    /// Mutable access to the interval of a temporal operator
    ///
    /// The interval setters reject bounds that would violate `lower <= upper`.
    pub fn bounds_mut(&mut self) -> Option<&mut Interval> {
        match self {
            Self::Finally { bounds, .. }
            | Self::Globally { bounds, .. }
            | Self::Until { bounds, .. }
            | Self::Release { bounds, .. } => Some(bounds),
            _ => None,
        }
    }

    pub fn lower_bound(&self) -> Option<usize> {
        self.bounds().map(Interval::lower)
    }

    pub fn upper_bound(&self) -> Option<usize> {
        self.bounds().map(Interval::upper)
    }

    /// Replace the value of a constant, returning the previous value
    pub fn set_value(&mut self, value: bool) -> Option<bool> {
        match self {
            Self::Constant(current) => Some(std::mem::replace(current, value)),
            _ => None,
        }
    }

    /// Replace the id of a variable, returning the previous id
    pub fn set_id(&mut self, id: u32) -> Option<u32> {
        match self {
            Self::Variable(current) => Some(std::mem::replace(current, id)),
            _ => None,
        }
    }

    /// Replace the operand of a unary operator and return the previous operand
    ///
    /// If this node has no operand the new subformula is handed back as the error value.
    pub fn replace_operand(&mut self, operand: Formula) -> Result<Formula, Formula> {
        match self.operand_mut() {
            Some(current) => Ok(*std::mem::replace(current, Box::new(operand))),
            None => Err(operand),
        }
    }

    /// Replace the left subformula of a binary operator and return the previous one
    pub fn replace_left(&mut self, left: Formula) -> Result<Formula, Formula> {
        match self.children_mut() {
            Some((current, _)) => Ok(*std::mem::replace(current, Box::new(left))),
            None => Err(left),
        }
    }

    /// Replace the right subformula of a binary operator and return the previous one
    pub fn replace_right(&mut self, right: Formula) -> Result<Formula, Formula> {
        match self.children_mut() {
            Some((_, current)) => Ok(*std::mem::replace(current, Box::new(right))),
            None => Err(right),
        }
    }

    /// Number of nodes in the formula
    pub fn size(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Variable(_) => 1,
            Self::Negation(operand) | Self::Finally { operand, .. } | Self::Globally { operand, .. } => {
                1 + operand.size()
            }
            _ => self.children().map_or(1, |(left, right)| 1 + left.size() + right.size()),
        }
    }

    /// Number of edges on the longest path from this node to a leaf
    pub fn depth(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Variable(_) => 0,
            Self::Negation(operand) | Self::Finally { operand, .. } | Self::Globally { operand, .. } => {
                1 + operand.depth()
            }
            _ => self
                .children()
                .map_or(0, |(left, right)| 1 + usize::max(left.depth(), right.depth())),
        }
    }

    /// Number of nodes of the given kind, including this one
    pub fn count(&self, kind: Kind) -> usize {
        let own = usize::from(self.kind() == kind);

        if let Some(operand) = self.operand() {
            own + operand.count(kind)
        } else if let Some((left, right)) = self.children() {
            own + left.count(kind) + right.count(kind)
        } else {
            own
        }
    }

    /// Number of trailing trace steps the formula may examine
    ///
    /// Computed as in Definition 6 of "Mission-time LTL (MLTL) Formula Validation Via Regular
    /// Expressions". Additions saturate at `usize::MAX` instead of overflowing.
    pub fn future_reach(&self) -> usize {
        match self {
            Self::Constant(_) => 0,
            Self::Variable(_) => 1,
            Self::Negation(operand) => operand.future_reach(),
            Self::And { left, right }
            | Self::Xor { left, right }
            | Self::Or { left, right }
            | Self::Implies { left, right }
            | Self::Equiv { left, right } => usize::max(left.future_reach(), right.future_reach()),
            Self::Finally { operand, bounds } | Self::Globally { operand, bounds } => {
                bounds.upper().saturating_add(operand.future_reach())
            }
            Self::Until { left, right, bounds } | Self::Release { left, right, bounds } => {
                let left_reach = left.future_reach();
                let right_reach = right.future_reach();

                // left_reach > right_reach >= 0, so left_reach - 1 cannot underflow
                if left_reach > right_reach {
                    bounds.upper().saturating_add(left_reach - 1)
                } else {
                    bounds.upper().saturating_add(right_reach)
                }
            }
        }
    }
}

impl Not for Formula {
    type Output = Formula;

    fn not(self) -> Self::Output {
        Formula::negation(self)
    }
}

impl BitAnd for Formula {
    type Output = Formula;

    fn bitand(self, rhs: Self) -> Self::Output {
        Formula::and(self, rhs)
    }
}

impl BitOr for Formula {
    type Output = Formula;

    fn bitor(self, rhs: Self) -> Self::Output {
        Formula::or(self, rhs)
    }
}

impl BitXor for Formula {
    type Output = Formula;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Formula::xor(self, rhs)
    }
}

impl From<bool> for Formula {
    fn from(value: bool) -> Self {
        Formula::Constant(value)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{Formula, Kind};
    use crate::interval::Interval;

    fn p(id: u32) -> Formula {
        Formula::variable(id)
    }

    fn sample() -> Result<Formula, Box<dyn Error>> {
        // G[0,4](~p1 & p2) U[1,3] (p0 | true)
        let globally = Formula::globally(Interval::new(0, 4)?, !p(1) & p(2));
        let formula = Formula::until(globally, Interval::new(1, 3)?, p(0) | Formula::constant(true));

        Ok(formula)
    }

    #[test]
    fn kinds() {
        assert_eq!(Kind::ALL.len(), 12);
        assert!(Kind::ALL.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!Kind::Constant.is_propositional_op());
        assert!(!Kind::Variable.is_temporal_op());
        assert!(Kind::Negation.is_unary_op() && Kind::Negation.is_propositional_op());
        assert!(Kind::Release.is_binary_op() && Kind::Release.is_temporal_op());
        assert_eq!(Kind::Equiv.symbol(), Some("<->"));
        assert_eq!(Kind::Variable.symbol(), None);
    }

    #[test]
    fn binary_constructor() {
        for kind in Kind::ALL {
            let built = Formula::binary(kind, p(0), p(1));

            if kind.is_binary_op() && kind.is_propositional_op() {
                let formula = built.unwrap();

                assert_eq!(formula.kind(), kind);
                assert_eq!(formula.left(), Some(&p(0)));
                assert_eq!(formula.right(), Some(&p(1)));
            } else {
                assert_eq!(built, None, "{} has no binary constructor", kind);
            }
        }

        assert_eq!(Formula::binary(Kind::Implies, p(2), p(3)), Some(Formula::implies(p(2), p(3))));
    }

    #[test]
    fn metrics() -> Result<(), Box<dyn Error>> {
        let formula = sample()?;

        assert_eq!(formula.size(), 9);
        assert_eq!(formula.depth(), 4);
        assert_eq!(formula.count(Kind::Variable), 3);
        assert_eq!(formula.count(Kind::Until), 1);
        assert_eq!(formula.count(Kind::Release), 0);
        assert_eq!(Kind::ALL.iter().map(|kind| formula.count(*kind)).sum::<usize>(), formula.size());
        assert_eq!(p(3).depth(), 0);

        Ok(())
    }

    #[test]
    fn future_reach() -> Result<(), Box<dyn Error>> {
        assert_eq!(Formula::constant(false).future_reach(), 0);
        assert_eq!(p(7).future_reach(), 1);
        assert_eq!((!p(1) & p(2)).future_reach(), 1);
        assert_eq!(Formula::finally(Interval::new(2, 6)?, p(0)).future_reach(), 7);

        // left reach 5 exceeds right reach 1
        let left = Formula::globally(Interval::new(0, 4)?, p(0));
        assert_eq!(Formula::until(left, Interval::new(0, 2)?, p(1)).future_reach(), 6);

        // left reach 1 exceeds right reach 0
        let release = Formula::release(p(0), Interval::new(0, 3)?, Formula::constant(true));
        assert_eq!(release.future_reach(), 3);

        let until = Formula::until(Formula::constant(true), Interval::new(0, 3)?, p(1));
        assert_eq!(until.future_reach(), 4);

        let huge = Formula::finally(Interval::new(0, usize::MAX)?, p(0));
        assert_eq!(huge.future_reach(), usize::MAX);

        Ok(())
    }

    #[test]
    fn accessors() -> Result<(), Box<dyn Error>> {
        let formula = sample()?;

        assert_eq!(formula.kind(), Kind::Until);
        assert_eq!(formula.symbol(), "U");
        assert_eq!(formula.lower_bound(), Some(1));
        assert_eq!(formula.upper_bound(), Some(3));
        assert_eq!(formula.left().map(Formula::kind), Some(Kind::Globally));
        assert_eq!(formula.right().and_then(Formula::left), Some(&p(0)));
        assert!(formula.operand().is_none());
        assert_eq!(p(4).id(), Some(4));
        assert_eq!(p(4).symbol(), "p4");
        assert_eq!(Formula::constant(true).value(), Some(true));
        assert_eq!(Formula::constant(true).bounds(), None);

        Ok(())
    }

    #[test]
    fn mutation() -> Result<(), Box<dyn Error>> {
        let mut formula = sample()?;

        let previous = formula.replace_right(p(9)).map_err(|_| "until has a right operand")?;
        assert_eq!(previous, p(0) | Formula::constant(true));
        assert_eq!(formula.right(), Some(&p(9)));

        let bounds = formula.bounds_mut().ok_or("until has bounds")?;
        assert!(bounds.set_lower(4).is_err());
        bounds.set(4, 8)?;
        assert_eq!(formula.lower_bound(), Some(4));
        assert_eq!(formula.kind(), Kind::Until);

        let mut leaf = p(1);
        assert_eq!(leaf.replace_operand(p(2)), Err(p(2)));
        assert_eq!(leaf.set_id(5), Some(1));
        assert_eq!(leaf.set_value(true), None);
        assert!(leaf.bounds_mut().is_none());

        let mut negation = !p(0);
        assert_eq!(negation.replace_operand(p(1)), Ok(p(0)));
        assert_eq!(negation.replace_left(p(2)), Err(p(2)));

        Ok(())
    }

    #[test]
    fn deep_copy_is_independent() -> Result<(), Box<dyn Error>> {
        let original = sample()?;
        let mut copy = original.clone();

        copy.replace_left(p(42)).map_err(|_| "until has a left operand")?;
        if let Some(bounds) = copy.bounds_mut() {
            bounds.set_upper(10)?;
        }

        assert_ne!(copy, original);
        assert_eq!(original, sample()?);
        assert_eq!(original.upper_bound(), Some(3));

        Ok(())
    }

    #[test]
    fn ordering() -> Result<(), Box<dyn Error>> {
        let bounds = Interval::new(0, 2)?;

        assert!(Formula::constant(true) < p(0));
        assert!(Formula::constant(false) < Formula::constant(true));
        assert!(p(1) < p(3));
        assert!(!p(9) < (p(0) & p(0)));
        assert!((p(0) & p(5)) < (p(1) & p(0)));
        assert!((p(0) & p(1)) < (p(0) & p(2)));
        assert!(Formula::finally(bounds, p(1)) < Formula::finally(bounds, p(3)));
        assert!(Formula::finally(Interval::new(0, 9)?, p(1)) < Formula::finally(bounds, p(3)));
        assert!(Formula::finally(bounds, p(3)) < Formula::finally(Interval::new(0, 3)?, p(3)));
        assert!(Formula::finally(Interval::new(5, 5)?, p(3)) > Formula::finally(Interval::new(0, 7)?, p(3)));
        assert!(Formula::until(p(0), Interval::new(0, 9)?, p(1)) < Formula::until(p(0), bounds, p(2)));

        Ok(())
    }
}
