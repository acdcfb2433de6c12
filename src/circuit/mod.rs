//! # Circuit graph
//!
//! A [`Circuit`] is a DAG of typed gates joined by unit-capacity wires. Everything that
//! analyses it lives here:
//!
//! - [`structure`]: the arena, typed indices and the version counter
//! - [`evaluation`]: input assignment, fixed values and the memoized evaluator
//! - [`simplify`]: constant propagation over fixed gates
//! - [`min_cut`]: the input/output flow reduction and its version-tagged cache
//!
//! Values are state of the gates, not of the topology: fixing, evaluating or resetting
//! never moves the version, so a cached min cut survives any number of evaluations.

pub mod errors;
pub mod evaluation;
pub mod min_cut;
pub mod simplify;
pub mod structure;
#[cfg(test)]
pub mod test_util;

pub use errors::CircuitError;
pub use min_cut::{CutEdge, MinCut};
pub use structure::Circuit;
