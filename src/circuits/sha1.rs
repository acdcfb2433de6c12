use std::array;

use log::debug;

use super::constant_word;
use crate::{gadgets::word::rotate_left, Circuit, CircuitError, GateId};

type Word = Vec<GateId>;

const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

/// Single-block SHA-1 compression.
///
/// Inputs: 16 message words, then the 5 IV words. Outputs: the 5 chaining words, MSB first.
/// Round constants are built as inputs and baked in before returning.
pub fn build_sha1() -> Result<Circuit, CircuitError> {
    let mut circuit = Circuit::default();
    let mut w: Vec<Word> = (0..16).map(|_| circuit.issue_inputs(32)).collect();
    let iv: Vec<Word> = (0..5).map(|_| circuit.issue_inputs(32)).collect();

    let mut constants = Vec::new();
    let k: Vec<Word> = K
        .iter()
        .map(|value| constant_word(&mut circuit, *value, &mut constants))
        .collect();

    for i in 16..80 {
        let mut mixed = circuit.xor_list(&w[i - 3], &w[i - 8])?;
        mixed = circuit.xor_list(&mixed, &w[i - 14])?;
        mixed = circuit.xor_list(&mixed, &w[i - 16])?;
        w.push(rotate_left(&mixed, 1));
    }

    let mut state: [Word; 5] = array::from_fn(|i| iv[i].clone());
    for (i, schedule) in w.iter().enumerate() {
        let [a, b, c, d, e] = state;
        let mixed = match i / 20 {
            0 => circuit.f(&b, &c, &d)?,
            2 => circuit.g(&b, &c, &d)?,
            _ => circuit.h(&b, &c, &d)?,
        };

        let mut t = circuit.add(&rotate_left(&a, 5), &mixed)?;
        t = circuit.add(&t, &e)?;
        t = circuit.add(&t, schedule)?;
        t = circuit.add(&t, &k[i / 20])?;

        state = [t, a, rotate_left(&b, 30), c, d];
    }

    for (h, v) in iv.iter().zip(&state) {
        let sum = circuit.add(h, v)?;
        circuit.make_outputs(&sum)?;
    }

    circuit.eliminate_constants(&constants)?;
    debug!(
        "build_sha1: gates={} wires={} inputs={} outputs={}",
        circuit.gate_count(),
        circuit.wire_count(),
        circuit.inputs().len(),
        circuit.outputs().len()
    );
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::{bits::bits_to_hex, HashFunction};

    #[test]
    fn sha1_abc_and_empty() {
        let mut circuit = build_sha1().unwrap();
        circuit.validate().unwrap();
        assert_eq!(circuit.inputs().len(), HashFunction::Sha1.input_len());
        assert_eq!(circuit.outputs().len(), HashFunction::Sha1.output_len());

        let abc = HashFunction::Sha1.pad_bytes(b"abc").unwrap();
        assert_eq!(
            bits_to_hex(&circuit.get_output_for(&abc).unwrap()),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );

        let empty = HashFunction::Sha1.pad_bytes(b"").unwrap();
        assert_eq!(
            bits_to_hex(&circuit.get_output_for(&empty).unwrap()),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }
}
