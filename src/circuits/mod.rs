pub mod adder;
pub mod basic;
pub mod md4;
pub mod padding;
pub mod sha1;

pub use adder::build_adder;
pub use basic::{test_circuit, weak_circuit};
pub use md4::build_md4;
pub use padding::HashFunction;
pub use sha1::build_sha1;

use crate::{Circuit, GateId};

/// INPUT gates for a 32-bit constant; the gate/value pairs are collected for
/// [`Circuit::eliminate_constants`]
pub(crate) fn constant_word(
    circuit: &mut Circuit,
    value: u32,
    constants: &mut Vec<(GateId, bool)>,
) -> Vec<GateId> {
    let word = circuit.issue_inputs(32);
    constants.extend(word.iter().copied().zip(crate::bits::word_to_bits(value)));
    word
}
