pub mod attack;
pub mod bits;
mod circuit;
pub mod circuits;
mod core;
pub mod fixing;
mod gadgets;

pub use crate::core::{
    gate::{GateError, GateId, GateValue},
    gate_type::{Folded, GateType},
    wire::{Wire, WireError, WireId},
};

pub use attack::{
    free_input_variants, run_birthday_attack, AttackConfig, AttackError, Collision, InputSource,
    UniformInputs,
};
pub use circuit::{Circuit, CircuitError, CutEdge, MinCut};
pub use circuits::{build_adder, build_md4, build_sha1, test_circuit, weak_circuit, HashFunction};
pub use gadgets::word::rotate_left;
