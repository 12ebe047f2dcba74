use std::fmt::{Display, Formatter};
use std::ops::{Deref, Index};
use std::str::FromStr;

use thiserror::Error;

/// Assignment of truth values to the propositional variables at a single time step
///
/// Variable `id` refers to position `id` of the state. States may have different widths within
/// the same trace, and looking up a variable outside the width of a state yields `None`, which
/// evaluation treats as false.
pub trait State {
    /// Number of variables assigned by this state
    fn width(&self) -> usize;

    /// Value of the variable with the given id, if the state assigns one
    fn bit(&self, id: usize) -> Option<bool>;
}

/// Bit-strings such as `"0110"`: the character `'1'` is true and any other character is false.
impl State for str {
    fn width(&self) -> usize {
        self.len()
    }

    fn bit(&self, id: usize) -> Option<bool> {
        self.as_bytes().get(id).map(|byte| *byte == b'1')
    }
}

impl State for String {
    fn width(&self) -> usize {
        self.as_str().width()
    }

    fn bit(&self, id: usize) -> Option<bool> {
        self.as_str().bit(id)
    }
}

impl State for [bool] {
    fn width(&self) -> usize {
        self.len()
    }

    fn bit(&self, id: usize) -> Option<bool> {
        self.get(id).copied()
    }
}

impl State for Vec<bool> {
    fn width(&self) -> usize {
        self.len()
    }

    fn bit(&self, id: usize) -> Option<bool> {
        self.get(id).copied()
    }
}

impl<T> State for &T
where
    T: State + ?Sized,
{
    #[inline]
    fn width(&self) -> usize {
        (**self).width()
    }

    #[inline]
    fn bit(&self, id: usize) -> Option<bool> {
        (**self).bit(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid character {found:?} at position {position} of step, expected '0' or '1'")]
pub struct StepError {
    pub position: usize,
    pub found: char,
}

/// Owned, validated bit-vector state
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step {
    bits: Vec<bool>,
}

impl Step {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Binary expansion of `value` as a step of exactly `width` variables
    ///
    /// The most significant bit comes first. Values that need more than `width` bits are
    /// truncated to their `width` least significant bits, and shorter values are zero-padded.
    ///
    /// ```rust
    /// use mltl::trace::Step;
    ///
    /// assert_eq!(Step::from_int(11, 5).to_string(), "01011");
    /// assert_eq!(Step::from_int(11, 2).to_string(), "11");
    /// ```
    pub fn from_int(value: u64, width: usize) -> Self {
        let bits = (0..width)
            .rev()
            .map(|shift| shift < 64 && (value >> shift) & 1 == 1)
            .collect();

        Self { bits }
    }

    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }
}

impl State for Step {
    fn width(&self) -> usize {
        self.bits.len()
    }

    fn bit(&self, id: usize) -> Option<bool> {
        self.bits.get(id).copied()
    }
}

impl From<Vec<bool>> for Step {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, found)| match found {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(StepError { position, found }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { bits })
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }

        Ok(())
    }
}

/// Finite sequence of states ordered by time step
///
/// A trace dereferences to a slice of its states, so it can be passed anywhere a formula expects
/// `&[S]`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Trace<S> {
    states: Vec<S>,
}

impl<S> Trace<S> {
    pub fn new(states: Vec<S>) -> Self {
        Self { states }
    }

    pub fn get(&self, time: usize) -> Option<&S> {
        self.states.get(time)
    }

    pub fn push(&mut self, state: S) {
        self.states.push(state);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.states.iter()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.states
    }
}

impl Trace<Step> {
    /// Build a trace of validated steps from bit-strings
    ///
    /// ```rust
    /// use mltl::trace::{Trace, Step};
    ///
    /// let trace = Trace::<Step>::parse_steps(["01", "11"]).unwrap();
    /// assert_eq!(trace.len(), 2);
    /// assert!(Trace::<Step>::parse_steps(["0x"]).is_err());
    /// ```
    pub fn parse_steps<I, T>(steps: I) -> Result<Self, StepError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        steps.into_iter().map(|step| step.as_ref().parse()).collect()
    }

    /// Largest state width in the trace, or zero for an empty trace
    pub fn width(&self) -> usize {
        self.states.iter().map(Step::width).max().unwrap_or(0)
    }
}

impl<S> Deref for Trace<S> {
    type Target = [S];

    fn deref(&self) -> &Self::Target {
        &self.states
    }
}

impl<S> AsRef<[S]> for Trace<S> {
    fn as_ref(&self) -> &[S] {
        &self.states
    }
}

impl<S> Index<usize> for Trace<S> {
    type Output = S;

    fn index(&self, index: usize) -> &Self::Output {
        self.states.index(index)
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl<S> IntoIterator for Trace<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<S> FromIterator<S> for Trace<S> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self {
            states: Vec::from_iter(iter),
        }
    }
}

impl<S, const N: usize> From<[S; N]> for Trace<S> {
    fn from(states: [S; N]) -> Self {
        Self::from_iter(states)
    }
}

impl<S> From<Vec<S>> for Trace<S> {
    fn from(states: Vec<S>) -> Self {
        Self { states }
    }
}

impl<S> Default for Trace<S> {
    fn default() -> Self {
        Self { states: Vec::default() }
    }
}
