//! Ways of pinning circuit inputs before simplification or a collision search.

use std::collections::HashSet;

use log::debug;
use rand::{seq::index, Rng};

use crate::{Circuit, CircuitError, CutEdge, GateId, GateType, HashFunction};

/// Fix every input except the first `message_bits` message bits to the padding,
/// length field and IV of a message of exactly that length.
///
/// Returns the number of inputs fixed.
pub fn fix_padding(
    circuit: &mut Circuit,
    hash: HashFunction,
    message_bits: usize,
) -> Result<usize, CircuitError> {
    let inputs = circuit.inputs();
    if inputs.len() != hash.input_len() {
        return Err(CircuitError::InputLength {
            expected: hash.input_len(),
            actual: inputs.len(),
        });
    }

    let template = hash.pad_bits(&vec![false; message_bits])?;
    let free: HashSet<usize> = (0..message_bits).map(|b| hash.input_index(b)).collect();

    let mut fixed = 0;
    for (i, (id, value)) in inputs.into_iter().zip(template).enumerate() {
        if !free.contains(&i) {
            circuit.fix_value(id, value)?;
            fixed += 1;
        }
    }

    debug!("fix_padding: hash={hash:?} message_bits={message_bits} fixed={fixed}");
    Ok(fixed)
}

/// Fix `count` distinct, not yet fixed inputs to random values
pub fn fix_random_inputs<R: Rng + ?Sized>(
    circuit: &mut Circuit,
    count: usize,
    rng: &mut R,
) -> Result<Vec<GateId>, CircuitError> {
    let mut candidates = Vec::new();
    for id in circuit.inputs() {
        if !circuit.is_fixed(id)? {
            candidates.push(id);
        }
    }

    let count = count.min(candidates.len());
    let mut chosen: Vec<GateId> = index::sample(rng, candidates.len(), count)
        .into_iter()
        .map(|i| candidates[i])
        .collect();
    chosen.sort();

    for id in &chosen {
        circuit.fix_value(*id, rng.random())?;
    }

    debug!("fix_random_inputs: requested={count} fixed={}", chosen.len());
    Ok(chosen)
}

/// Clear every value, then fix each INPUT gate that is an endpoint of a min-cut edge
/// to a random value
pub fn fix_min_cut_inputs<R: Rng + ?Sized>(
    circuit: &mut Circuit,
    rng: &mut R,
) -> Result<Vec<GateId>, CircuitError> {
    circuit.reset_all();

    let mut touched = Vec::new();
    for edge in circuit.min_cut_edges()? {
        let gate = match edge {
            CutEdge::Input(id) => id,
            CutEdge::Wire(w) => circuit.wire(w)?.src,
            CutEdge::Output(_) => continue,
        };
        if gate.gate_type == GateType::Input {
            touched.push(gate);
        }
    }
    touched.sort();
    touched.dedup();

    for id in &touched {
        circuit.fix_value(*id, rng.random())?;
    }

    debug!("fix_min_cut_inputs: fixed={}", touched.len());
    Ok(touched)
}
