//! Word-level builders. A word is a gate list with the most significant bit first.

use crate::{Circuit, CircuitError, GateId};

/// Cyclic left rotation of the gate references; no gates are created
pub fn rotate_left(word: &[GateId], n: usize) -> Vec<GateId> {
    let mut rotated = word.to_vec();
    if !rotated.is_empty() {
        rotated.rotate_left(n % word.len());
    }
    rotated
}

impl Circuit {
    /// Ripple-carry addition modulo 2^len, the carry out of the top bit is dropped
    pub fn add(&mut self, x: &[GateId], y: &[GateId]) -> Result<Vec<GateId>, CircuitError> {
        if x.len() != y.len() {
            return Err(CircuitError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }

        let Some(last) = x.len().checked_sub(1) else {
            return Ok(Vec::new());
        };
        if last == 0 {
            return Ok(vec![self.xor(x[0], y[0])?]);
        }

        let mut sum = Vec::with_capacity(x.len());
        let (s, mut carry) = self.half_adder(x[last], y[last])?;
        sum.push(s);

        for i in (1..last).rev() {
            let (s, c) = self.full_adder(x[i], y[i], carry)?;
            sum.push(s);
            carry = c;
        }

        let top = self.xor(x[0], y[0])?;
        sum.push(self.xor(top, carry)?);

        sum.reverse();
        Ok(sum)
    }

    /// (b ∧ c) ∨ (¬b ∧ d), bitwise
    pub fn f(
        &mut self,
        b: &[GateId],
        c: &[GateId],
        d: &[GateId],
    ) -> Result<Vec<GateId>, CircuitError> {
        let bc = self.and_list(b, c)?;
        let not_b = self.not_list(b)?;
        let nbd = self.and_list(&not_b, d)?;
        self.or_list(&bc, &nbd)
    }

    /// Majority: (b ∧ c) ∨ (b ∧ d) ∨ (c ∧ d), bitwise
    pub fn g(
        &mut self,
        b: &[GateId],
        c: &[GateId],
        d: &[GateId],
    ) -> Result<Vec<GateId>, CircuitError> {
        let bc = self.and_list(b, c)?;
        let bd = self.and_list(b, d)?;
        let cd = self.and_list(c, d)?;
        let bc_bd = self.or_list(&bc, &bd)?;
        self.or_list(&bc_bd, &cd)
    }

    /// Parity: b ⊕ c ⊕ d, bitwise
    pub fn h(
        &mut self,
        b: &[GateId],
        c: &[GateId],
        d: &[GateId],
    ) -> Result<Vec<GateId>, CircuitError> {
        let bc = self.xor_list(b, c)?;
        self.xor_list(&bc, d)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use test_log::test;

    use super::*;
    use crate::{
        bits::{bits_to_word, word_to_bits},
        test_utils::trng,
    };

    fn words(circuit: &mut Circuit, count: usize) -> Vec<Vec<GateId>> {
        (0..count).map(|_| circuit.issue_inputs(32)).collect()
    }

    fn input(values: &[u32]) -> Vec<bool> {
        values.iter().flat_map(|v| word_to_bits(*v)).collect()
    }

    #[test]
    fn add_matches_wrapping_add() {
        let mut circuit = Circuit::default();
        let w = words(&mut circuit, 2);
        let sum = circuit.add(&w[0], &w[1]).unwrap();
        circuit.make_outputs(&sum).unwrap();

        let mut rng = trng();
        let mut cases = vec![
            (0, 0),
            (u32::MAX, 1),
            (u32::MAX, u32::MAX),
            (0x8000_0000, 0x8000_0000),
        ];
        cases.extend((0..64).map(|_| (rng.random::<u32>(), rng.random::<u32>())));

        for (x, y) in cases {
            let out = circuit.get_output_for(&input(&[x, y])).unwrap();
            assert_eq!(bits_to_word(&out), x.wrapping_add(y), "{x:#x} + {y:#x}");
        }
    }

    #[test]
    fn add_narrow_widths() {
        for width in 1..=4usize {
            let mut circuit = Circuit::default();
            let x = circuit.issue_inputs(width);
            let y = circuit.issue_inputs(width);
            let sum = circuit.add(&x, &y).unwrap();
            circuit.make_outputs(&sum).unwrap();

            let modulus = 1u32 << width;
            for a in 0..modulus {
                for b in 0..modulus {
                    let mut bits = word_to_bits(a)[32 - width..].to_vec();
                    bits.extend_from_slice(&word_to_bits(b)[32 - width..]);
                    let out = circuit.get_output_for(&bits).unwrap();
                    assert_eq!(bits_to_word(&out), (a + b) % modulus);
                }
            }
        }
    }

    #[test]
    fn add_length_mismatch() {
        let mut circuit = Circuit::default();
        let x = circuit.issue_inputs(4);
        let y = circuit.issue_inputs(3);
        assert_eq!(
            circuit.add(&x, &y),
            Err(CircuitError::LengthMismatch { left: 4, right: 3 })
        );
    }

    #[test]
    fn rotate_left_identity() {
        let mut circuit = Circuit::default();
        let v = circuit.issue_inputs(32);
        for n in 0..32 {
            let r = rotate_left(&v, n);
            assert_eq!(rotate_left(&r, 32 - n), v);
        }
        assert_eq!(rotate_left(&v, 33), rotate_left(&v, 1));
        assert!(rotate_left(&[], 5).is_empty());
    }

    #[test]
    fn rotate_left_matches_u32() {
        let mut circuit = Circuit::default();
        let v = circuit.issue_inputs(32);
        let r = rotate_left(&v, 5);
        circuit.make_outputs(&r).unwrap();

        let x = 0x8123_4567u32;
        let out = circuit.get_output_for(&word_to_bits(x)).unwrap();
        assert_eq!(bits_to_word(&out), x.rotate_left(5));
    }

    #[test]
    fn round_functions() {
        let mut circuit = Circuit::default();
        let w = words(&mut circuit, 3);
        let f = circuit.f(&w[0], &w[1], &w[2]).unwrap();
        let g = circuit.g(&w[0], &w[1], &w[2]).unwrap();
        let h = circuit.h(&w[0], &w[1], &w[2]).unwrap();
        circuit.make_outputs(&[f, g, h].concat()).unwrap();

        let mut rng = trng();
        for _ in 0..16 {
            let [b, c, d]: [u32; 3] = rng.random();
            let out = circuit.get_output_for(&input(&[b, c, d])).unwrap();
            assert_eq!(bits_to_word(&out[..32]), (b & c) | (!b & d));
            assert_eq!(bits_to_word(&out[32..64]), (b & c) | (b & d) | (c & d));
            assert_eq!(bits_to_word(&out[64..]), b ^ c ^ d);
        }
    }
}
