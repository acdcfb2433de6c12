use crate::{Circuit, CircuitError};

/// Four inputs, four outputs:
/// `out0 = in0 ∨ (in1 ∧ in2)` and `out1 = out2 = out3 = in3 ⊕ out0`
pub fn test_circuit() -> Result<Circuit, CircuitError> {
    let mut circuit = Circuit::default();
    let [in0, in1, in2, in3] = [
        circuit.issue_input(),
        circuit.issue_input(),
        circuit.issue_input(),
        circuit.issue_input(),
    ];

    let and = circuit.and(in1, in2)?;
    let or = circuit.or(in0, and)?;
    let xor = circuit.xor(in3, or)?;

    circuit.make_output(or)?;
    circuit.make_outputs(&[xor, xor, xor])?;
    Ok(circuit)
}

/// Three inputs and a single `in0 ⊕ in1` output; `in2` is never read
pub fn weak_circuit() -> Result<Circuit, CircuitError> {
    let mut circuit = Circuit::default();
    let [in0, in1, _in2] = [
        circuit.issue_input(),
        circuit.issue_input(),
        circuit.issue_input(),
    ];

    let xor = circuit.xor(in0, in1)?;
    circuit.make_output(xor)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::bits::string_to_bits;

    #[test]
    fn test_circuit_truth_table() {
        let mut circuit = test_circuit().unwrap();
        circuit.validate().unwrap();

        for bits in 0u8..16 {
            let [a, b, c, d] = [0, 1, 2, 3].map(|i| bits >> i & 1 == 1);
            let or = a | (b & c);
            let xor = d ^ or;
            assert_eq!(
                circuit.get_output_for(&[a, b, c, d]).unwrap(),
                vec![or, xor, xor, xor]
            );
        }
    }

    #[test]
    fn weak_circuit_ignores_last_input() {
        let mut circuit = weak_circuit().unwrap();
        assert_eq!(circuit.inputs().len(), 3);
        for s in ["000", "001"] {
            let input = string_to_bits(s).unwrap();
            assert_eq!(circuit.get_output_for(&input).unwrap(), vec![false]);
        }
        assert_eq!(circuit.get_output_for_str("101").unwrap(), "1");
    }
}
