use std::fmt;

pub use crate::core::gate_type::GateType;

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Gate {0} not found")]
    GateNotFound(GateId),
    #[error("Gate {gate} expects {expected} predecessors, found {actual}")]
    Arity {
        gate: GateId,
        expected: usize,
        actual: usize,
    },
    #[error("Input gate {0} has no value assigned")]
    UnsetInput(GateId),
    #[error("Gate {0} cannot be evaluated")]
    NotEvaluable(GateId),
}
pub type GateError = Error;

/// Stable gate identity: the type plus a sequence number unique within that type.
///
/// Values live in the circuit arena, never in the key, so the id can be hashed
/// and compared while the gate is being evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateId {
    pub gate_type: GateType,
    pub number: usize,
}

impl GateId {
    pub const fn new(gate_type: GateType, number: usize) -> Self {
        Self { gate_type, number }
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.gate_type, self.number)
    }
}

/// Tri-state gate value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GateValue {
    #[default]
    Unset,
    /// Pinned by the caller, survives [`crate::Circuit::reset_values`]
    Fixed(bool),
    /// Derived by evaluation, dropped on any reset
    Computed(bool),
}

impl GateValue {
    pub fn get(self) -> Option<bool> {
        match self {
            GateValue::Unset => None,
            GateValue::Fixed(v) | GateValue::Computed(v) => Some(v),
        }
    }

    pub fn is_fixed(self) -> bool {
        matches!(self, GateValue::Fixed(_))
    }

    /// Drop a computed value, keep a fixed one
    pub fn reset(self) -> Self {
        match self {
            GateValue::Fixed(v) => GateValue::Fixed(v),
            _ => GateValue::Unset,
        }
    }
}
