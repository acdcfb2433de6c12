use std::array;

use log::debug;

use super::constant_word;
use crate::{gadgets::word::rotate_left, Circuit, CircuitError, GateId};

type Word = Vec<GateId>;

const ROUND_2: u32 = 0x5a827999;
const ROUND_3: u32 = 0x6ed9eba1;

const ORDER: [[usize; 16]; 3] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15],
    [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15],
];

const SHIFTS: [[usize; 4]; 3] = [[3, 7, 11, 19], [3, 5, 9, 13], [3, 9, 11, 15]];

/// Single-block MD4 compression.
///
/// Inputs: 16 message words, then the 4 IV words. Outputs: the 4 chaining words, each
/// emitted little-endian byte first so the output bits read as the usual digest.
/// Round constants are built as inputs and baked in before returning.
pub fn build_md4() -> Result<Circuit, CircuitError> {
    let mut circuit = Circuit::default();
    let x: Vec<Word> = (0..16).map(|_| circuit.issue_inputs(32)).collect();
    let iv: Vec<Word> = (0..4).map(|_| circuit.issue_inputs(32)).collect();

    let mut constants = Vec::new();
    let round_constants = [
        None,
        Some(constant_word(&mut circuit, ROUND_2, &mut constants)),
        Some(constant_word(&mut circuit, ROUND_3, &mut constants)),
    ];

    let mut state: [Word; 4] = array::from_fn(|i| iv[i].clone());
    for (round, order) in ORDER.iter().enumerate() {
        for (step, &k) in order.iter().enumerate() {
            let [a, b, c, d] = state;
            let mixed = match round {
                0 => circuit.f(&b, &c, &d)?,
                1 => circuit.g(&b, &c, &d)?,
                _ => circuit.h(&b, &c, &d)?,
            };

            let mut t = circuit.add(&a, &mixed)?;
            t = circuit.add(&t, &x[k])?;
            if let Some(constant) = &round_constants[round] {
                t = circuit.add(&t, constant)?;
            }

            state = [d, rotate_left(&t, SHIFTS[round][step % 4]), b, c];
        }
    }

    for (h, v) in iv.iter().zip(&state) {
        let sum = circuit.add(h, v)?;
        for lane in (0..4).rev() {
            circuit.make_outputs(&sum[lane * 8..lane * 8 + 8])?;
        }
    }

    circuit.eliminate_constants(&constants)?;
    debug!(
        "build_md4: gates={} wires={} inputs={} outputs={}",
        circuit.gate_count(),
        circuit.wire_count(),
        circuit.inputs().len(),
        circuit.outputs().len()
    );
    Ok(circuit)
}
