use log::trace;

use super::structure::Circuit;
use crate::{bits, CircuitError, GateError, GateId, GateType, GateValue};

impl Circuit {
    /// Assign every INPUT gate, in input order. Computed values are dropped first.
    ///
    /// A bit that agrees with a fixed input is accepted, a contradicting one is an error.
    pub fn set_input(&mut self, input: &[bool]) -> Result<(), CircuitError> {
        let inputs = self.inputs();
        if inputs.len() != input.len() {
            return Err(CircuitError::InputLength {
                expected: inputs.len(),
                actual: input.len(),
            });
        }

        self.reset_values();

        for (id, bit) in inputs.into_iter().zip(input.iter().copied()) {
            let node = self.node_mut(id)?;
            match node.value {
                GateValue::Fixed(fixed) if fixed != bit => {
                    return Err(CircuitError::FixedInputConflict {
                        gate: id,
                        fixed,
                        requested: bit,
                    });
                }
                GateValue::Fixed(_) => {}
                _ => node.value = GateValue::Computed(bit),
            }
        }

        Ok(())
    }

    /// Values of all OUTPUT gates, evaluating whatever is still missing
    pub fn get_output(&mut self) -> Result<Vec<bool>, CircuitError> {
        let outputs = self.outputs();
        self.evaluate_to(&outputs)
    }

    pub fn get_output_for(&mut self, input: &[bool]) -> Result<Vec<bool>, CircuitError> {
        self.set_input(input)?;
        self.get_output()
    }

    /// Same as [`Circuit::get_output_for`] with `'0'`/`'1'` strings on both sides
    pub fn get_output_for_str(&mut self, input: &str) -> Result<String, CircuitError> {
        let input = bits::string_to_bits(input)?;
        Ok(bits::bits_to_string(&self.get_output_for(&input)?))
    }

    pub fn fix_value(&mut self, id: GateId, value: bool) -> Result<(), GateError> {
        self.node_mut(id)?.value = GateValue::Fixed(value);
        Ok(())
    }

    pub fn gate_value(&self, id: GateId) -> Result<GateValue, GateError> {
        Ok(self.node(id)?.value)
    }

    pub fn value(&self, id: GateId) -> Result<Option<bool>, GateError> {
        Ok(self.gate_value(id)?.get())
    }

    pub fn is_fixed(&self, id: GateId) -> Result<bool, GateError> {
        Ok(self.gate_value(id)?.is_fixed())
    }

    pub fn gate_values(&self, ids: &[GateId]) -> Result<Vec<Option<bool>>, GateError> {
        ids.iter().map(|id| self.value(*id)).collect()
    }

    /// Every live gate currently carrying a fixed value
    pub fn fixed_gates(&self) -> Vec<GateId> {
        self.gates()
            .filter(|id| matches!(self.gate_value(*id), Ok(GateValue::Fixed(_))))
            .collect()
    }

    /// Forget computed values, keep fixed ones
    pub fn reset_values(&mut self) {
        for node in self.nodes_mut() {
            node.value = node.value.reset();
        }
    }

    /// Forget computed and fixed values alike
    pub fn reset_all(&mut self) {
        for node in self.nodes_mut() {
            node.value = GateValue::Unset;
        }
    }

    /// Value of one gate, memoized on every gate visited.
    ///
    /// Iterative post-order walk, so long adder chains do not grow the call stack.
    pub fn evaluate(&mut self, id: GateId) -> Result<bool, CircuitError> {
        if let Some(v) = self.value(id)? {
            return Ok(v);
        }

        let mut stack = vec![(id, false)];
        while let Some((current, expanded)) = stack.pop() {
            if self.value(current)?.is_some() {
                continue;
            }

            let f = match current.gate_type {
                GateType::Input => return Err(GateError::UnsetInput(current).into()),
                t => t.f().ok_or(GateError::NotEvaluable(current))?,
            };

            let preds = self.predecessors(current)?;
            let expected = current.gate_type.arity().unwrap_or_default();
            if preds.len() != expected {
                return Err(GateError::Arity {
                    gate: current,
                    expected,
                    actual: preds.len(),
                }
                .into());
            }

            if !expanded {
                stack.push((current, true));
                for p in preds {
                    if self.value(p)?.is_none() {
                        stack.push((p, false));
                    }
                }
                continue;
            }

            let operand = |i: usize| -> Result<bool, CircuitError> {
                let p = preds[i.min(preds.len() - 1)];
                self.value(p)?.ok_or(GateError::UnsetInput(p).into())
            };
            let result = f(operand(0)?, operand(1)?);
            trace!("evaluate: {current} = {result}");
            self.node_mut(current)?.value = GateValue::Computed(result);
        }

        Ok(self.value(id)?.unwrap_or_default())
    }

    /// Evaluate every OUTPUT gate
    pub fn evaluate_circuit(&mut self) -> Result<(), CircuitError> {
        for id in self.outputs() {
            self.evaluate(id)?;
        }
        Ok(())
    }

    /// Evaluate only what the given gates depend on
    pub fn evaluate_to(&mut self, ids: &[GateId]) -> Result<Vec<bool>, CircuitError> {
        ids.iter().map(|id| self.evaluate(*id)).collect()
    }
}
