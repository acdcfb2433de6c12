use log::debug;

use crate::{Circuit, CircuitError};

/// `x + y mod 2^width`. Inputs are `x` then `y`, outputs the sum, all MSB first.
pub fn build_adder(width: usize) -> Result<Circuit, CircuitError> {
    let mut circuit = Circuit::default();
    let x = circuit.issue_inputs(width);
    let y = circuit.issue_inputs(width);

    let sum = circuit.add(&x, &y)?;
    circuit.make_outputs(&sum)?;

    debug!(
        "build_adder: width={width} gates={} wires={}",
        circuit.gate_count(),
        circuit.wire_count()
    );
    Ok(circuit)
}
