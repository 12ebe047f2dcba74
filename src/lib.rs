//! Parsing and evaluation of Mission-time Linear Temporal Logic (MLTL) formulas
//!
//! MLTL extends propositional logic with temporal operators whose intervals are bounded by
//! integer time steps. Formulas are represented by the [`Formula`] tree, which can be built
//! programmatically or parsed from text using [`parse`]. A formula is evaluated against a finite
//! [`Trace`] of states, where each state assigns a truth value to the propositional variables
//! `p0`, `p1`, and so on.
//!
//! ```rust
//! use mltl::{parse, Trace};
//!
//! let formula = parse("G[0,4](~p1&p2)").unwrap();
//! let trace = Trace::from(["101", "101", "001", "101", "101", "001"]);
//!
//! assert!(formula.evaluate(&trace));
//! assert_eq!(formula.future_reach(), 5);
//! assert_eq!(formula.to_string(), "G[0,4]((~(p1))&(p2))");
//! ```

#![deny(clippy::all)]

mod evaluate;
pub mod formula;
pub mod interval;
#[cfg(feature = "parser")]
pub mod parser;
pub mod render;
pub mod trace;

pub use crate::formula::{Formula, Kind};
pub use crate::interval::{BoundsError, Interval};
#[cfg(feature = "parser")]
pub use crate::parser::{parse, ParseError, ParseErrorKind};
pub use crate::render::Pretty;
pub use crate::trace::{State, Step, StepError, Trace};
