use crate::{Circuit, CircuitError, GateId, GateType};

impl Circuit {
    pub fn issue_input(&mut self) -> GateId {
        self.add_gate(GateType::Input)
    }

    pub fn issue_inputs(&mut self, count: usize) -> Vec<GateId> {
        (0..count).map(|_| self.issue_input()).collect()
    }

    /// New OUTPUT gate reading `src`
    pub fn make_output(&mut self, src: GateId) -> Result<GateId, CircuitError> {
        let output = self.add_gate(GateType::Output);
        self.add_wire(src, output)?;
        Ok(output)
    }

    pub fn make_outputs(&mut self, src: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        src.iter().map(|s| self.make_output(*s)).collect()
    }

    pub fn not(&mut self, a: GateId) -> Result<GateId, CircuitError> {
        let gate = self.add_gate(GateType::Not);
        self.add_wire(a, gate)?;
        Ok(gate)
    }

    fn binary(&mut self, t: GateType, a: GateId, b: GateId) -> Result<GateId, CircuitError> {
        let gate = self.add_gate(t);
        self.add_wire(a, gate)?;
        self.add_wire(b, gate)?;
        Ok(gate)
    }

    pub fn and(&mut self, a: GateId, b: GateId) -> Result<GateId, CircuitError> {
        self.binary(GateType::And, a, b)
    }

    pub fn or(&mut self, a: GateId, b: GateId) -> Result<GateId, CircuitError> {
        self.binary(GateType::Or, a, b)
    }

    pub fn xor(&mut self, a: GateId, b: GateId) -> Result<GateId, CircuitError> {
        self.binary(GateType::Xor, a, b)
    }

    pub fn nand(&mut self, a: GateId, b: GateId) -> Result<GateId, CircuitError> {
        self.binary(GateType::Nand, a, b)
    }

    pub fn nor(&mut self, a: GateId, b: GateId) -> Result<GateId, CircuitError> {
        self.binary(GateType::Nor, a, b)
    }

    pub fn xnor(&mut self, a: GateId, b: GateId) -> Result<GateId, CircuitError> {
        self.binary(GateType::Xnor, a, b)
    }

    pub fn not_list(&mut self, a: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        a.iter().map(|a| self.not(*a)).collect()
    }

    fn binary_list(
        &mut self,
        t: GateType,
        a: &[GateId],
        b: &[GateId],
    ) -> Result<Vec<GateId>, CircuitError> {
        if a.len() != b.len() {
            return Err(CircuitError::LengthMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        a.iter()
            .zip(b)
            .map(|(a, b)| self.binary(t, *a, *b))
            .collect()
    }

    pub fn and_list(&mut self, a: &[GateId], b: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        self.binary_list(GateType::And, a, b)
    }

    pub fn or_list(&mut self, a: &[GateId], b: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        self.binary_list(GateType::Or, a, b)
    }

    pub fn xor_list(&mut self, a: &[GateId], b: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        self.binary_list(GateType::Xor, a, b)
    }

    pub fn nand_list(&mut self, a: &[GateId], b: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        self.binary_list(GateType::Nand, a, b)
    }

    pub fn nor_list(&mut self, a: &[GateId], b: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        self.binary_list(GateType::Nor, a, b)
    }

    pub fn xnor_list(&mut self, a: &[GateId], b: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        self.binary_list(GateType::Xnor, a, b)
    }

    /// Return (sum, carry)
    pub fn half_adder(&mut self, a: GateId, b: GateId) -> Result<(GateId, GateId), CircuitError> {
        let sum = self.xor(a, b)?;
        let carry = self.and(a, b)?;
        Ok((sum, carry))
    }

    /// Return (sum, carry), carry = (a ∧ b) ∨ ((a ⊕ b) ∧ c)
    pub fn full_adder(
        &mut self,
        a: GateId,
        b: GateId,
        c: GateId,
    ) -> Result<(GateId, GateId), CircuitError> {
        let ab_xor = self.xor(a, b)?;
        let sum = self.xor(ab_xor, c)?;
        let ab_and = self.and(a, b)?;
        let c_and = self.and(ab_xor, c)?;
        let carry = self.or(ab_and, c_and)?;
        Ok((sum, carry))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn not_not() {
        let mut circuit = Circuit::default();
        let a = circuit.issue_input();
        let n = circuit.not(a).unwrap();
        let nn = circuit.not(n).unwrap();
        circuit.make_outputs(&[n, nn]).unwrap();

        assert_eq!(circuit.get_output_for(&[true]).unwrap(), vec![false, true]);
        assert_eq!(circuit.get_output_for(&[false]).unwrap(), vec![true, false]);
    }

    #[test]
    fn single_gates() {
        let mut circuit = Circuit::default();
        let [a, b] = [circuit.issue_input(), circuit.issue_input()];
        let gates = [
            circuit.and(a, b).unwrap(),
            circuit.or(a, b).unwrap(),
            circuit.xor(a, b).unwrap(),
            circuit.nand(a, b).unwrap(),
            circuit.nor(a, b).unwrap(),
            circuit.xnor(a, b).unwrap(),
        ];
        circuit.make_outputs(&gates).unwrap();

        for x in [false, true] {
            for y in [false, true] {
                assert_eq!(
                    circuit.get_output_for(&[x, y]).unwrap(),
                    vec![x & y, x | y, x ^ y, !(x & y), !(x | y), !(x ^ y)]
                );
            }
        }
    }

    #[test]
    fn list_forms_check_length() {
        let mut circuit = Circuit::default();
        let a = circuit.issue_inputs(3);
        let b = circuit.issue_inputs(2);

        assert_eq!(
            circuit.xor_list(&a, &b),
            Err(CircuitError::LengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(circuit.and_list(&a[..2], &b).unwrap().len(), 2);
        assert_eq!(circuit.not_list(&a).unwrap().len(), 3);
    }

    #[test]
    fn adders() {
        let mut circuit = Circuit::default();
        let [a, b, c] = [
            circuit.issue_input(),
            circuit.issue_input(),
            circuit.issue_input(),
        ];
        let (hs, hc) = circuit.half_adder(a, b).unwrap();
        let (fs, fc) = circuit.full_adder(a, b, c).unwrap();
        circuit.make_outputs(&[hs, hc, fs, fc]).unwrap();

        for bits in 0u8..8 {
            let (x, y, z) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let half = x as u8 + y as u8;
            let full = half + z as u8;
            assert_eq!(
                circuit.get_output_for(&[x, y, z]).unwrap(),
                vec![half & 1 == 1, half > 1, full & 1 == 1, full > 1]
            );
        }
    }
}
