use crate::{GateError, GateId, WireError, WireId};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),
    #[error("Operand length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("Expected {expected} input bits, got {actual}")]
    InputLength { expected: usize, actual: usize },
    #[error("Input {gate} is fixed to {fixed}, cannot set it to {requested}")]
    FixedInputConflict {
        gate: GateId,
        fixed: bool,
        requested: bool,
    },
    #[error("Gate {gate} has no other predecessor besides wire {wire}")]
    MissingOtherPredecessor { gate: GateId, wire: WireId },
    #[error("Constant input {0} still drives the circuit after simplification")]
    ConstantNotEliminated(GateId),
    #[error("Invalid bit character {0:?}")]
    InvalidBit(char),
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
    #[error("Message of {bits} bits does not fit a single block (max {max})")]
    MessageTooLong { bits: usize, max: usize },
}
