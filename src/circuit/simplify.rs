use std::collections::VecDeque;

use log::{debug, trace};

use super::structure::Circuit;
use crate::{CircuitError, Folded, GateError, GateId, GateType, GateValue, Wire, WireId};

#[derive(Default)]
struct Worklist {
    /// Wires whose source carries a fixed value
    wires: VecDeque<WireId>,
    /// Binary gates that may have ended up reading the same gate twice
    collapse: VecDeque<GateId>,
}

impl Circuit {
    /// Constant propagation from every fixed gate.
    ///
    /// Rewrites the graph so it computes the same outputs for every assignment of the
    /// non-fixed inputs, and returns the inputs that no longer reach any gate. Running it
    /// again without new fixed values changes nothing and returns the same list.
    pub fn simplify(&mut self) -> Result<Vec<GateId>, CircuitError> {
        let (gates, wires) = (self.gate_count(), self.wire_count());

        let mut passes = 0;
        loop {
            let before = self.version();
            self.propagate_constants()?;
            passes += 1;
            if self.version() == before {
                break;
            }
        }

        let free = self.free_inputs();
        debug!(
            "simplify: passes={passes} gates={gates}->{} wires={wires}->{} free_inputs={}",
            self.gate_count(),
            self.wire_count(),
            free.len()
        );
        Ok(free)
    }

    /// Non-fixed inputs without successors, in input order
    pub fn free_inputs(&self) -> Vec<GateId> {
        self.inputs()
            .into_iter()
            .filter(|id| !matches!(self.gate_value(*id), Ok(GateValue::Fixed(_))))
            .filter(|id| matches!(self.out_wires(*id), Ok(w) if w.is_empty()))
            .collect()
    }

    /// Fix `constants`, propagate them, then drop the constant inputs from the circuit.
    ///
    /// Every value is reset afterwards. Fails if a constant still drives some gate,
    /// which happens only when an output is itself constant.
    pub fn eliminate_constants(
        &mut self,
        constants: &[(GateId, bool)],
    ) -> Result<(), CircuitError> {
        for (id, value) in constants {
            self.fix_value(*id, *value)?;
        }
        self.simplify()?;

        for (id, _) in constants {
            if !self.out_wires(*id)?.is_empty() {
                return Err(CircuitError::ConstantNotEliminated(*id));
            }
            self.remove_gate(*id)?;
        }
        self.reset_all();

        debug!(
            "eliminate_constants: constants={} gates={} wires={}",
            constants.len(),
            self.gate_count(),
            self.wire_count()
        );
        Ok(())
    }

    fn propagate_constants(&mut self) -> Result<(), CircuitError> {
        let mut work = Worklist::default();
        for id in self.fixed_gates() {
            if matches!(id.gate_type, GateType::Output | GateType::Sink) {
                continue;
            }
            work.wires.extend(self.out_wires(id)?.iter().copied());
        }

        loop {
            if let Some(w) = work.wires.pop_front() {
                self.propagate_wire(w, &mut work)?;
            } else if let Some(g) = work.collapse.pop_front() {
                self.collapse_parallel(g, &mut work)?;
            } else {
                return Ok(());
            }
        }
    }

    fn propagate_wire(&mut self, w: WireId, work: &mut Worklist) -> Result<(), CircuitError> {
        // already rewired away
        let Ok(Wire { src, dst }) = self.wire(w) else {
            return Ok(());
        };
        let GateValue::Fixed(v) = self.gate_value(src)? else {
            return Ok(());
        };

        match dst.gate_type {
            GateType::Output => {
                let node = self.node_mut(dst)?;
                if !node.value.is_fixed() {
                    node.value = GateValue::Computed(v);
                }
            }
            GateType::Not => {
                self.node_mut(dst)?.value = GateValue::Fixed(!v);
                work.wires.extend(self.out_wires(dst)?.iter().copied());
            }
            GateType::Input | GateType::Sink => {}
            t => {
                // a pinned gate already propagates its own value
                if self.is_fixed(dst)? {
                    return Ok(());
                }
                let other = self.other_predecessor(dst, w)?;
                let folded = t.fold(v).ok_or(GateError::NotEvaluable(dst))?;
                trace!("simplify: {dst} with {src}={v} folds to {folded:?}");

                match folded {
                    Folded::Constant(r) => {
                        let target = if r == v {
                            src
                        } else {
                            self.insert_not(src, work)?
                        };
                        self.redirect(dst, target, work)?;
                    }
                    Folded::Other => self.redirect(dst, other, work)?,
                    Folded::NotOther => {
                        let not = self.insert_not(other, work)?;
                        self.redirect(dst, not, work)?;
                    }
                }

                self.prune_upward(other)?;
                self.prune_upward(src)?;
            }
        }
        Ok(())
    }

    fn other_predecessor(&self, gate: GateId, wire: WireId) -> Result<GateId, CircuitError> {
        let in_wires = self.in_wires(gate)?;
        match in_wires.len() {
            2 => {}
            1 => return Err(CircuitError::MissingOtherPredecessor { gate, wire }),
            actual => {
                return Err(GateError::Arity {
                    gate,
                    expected: 2,
                    actual,
                }
                .into())
            }
        }

        let other = in_wires
            .iter()
            .copied()
            .find(|w| *w != wire)
            .ok_or(CircuitError::MissingOtherPredecessor { gate, wire })?;
        Ok(self.wire(other)?.src)
    }

    /// Make every consumer of `from` read `to` instead, then drop `from`
    fn redirect(
        &mut self,
        from: GateId,
        to: GateId,
        work: &mut Worklist,
    ) -> Result<(), CircuitError> {
        let to_fixed = self.is_fixed(to)?;

        for w in self.out_wires(from)?.to_vec() {
            let dst = self.remove_wire(w)?.dst;
            let parallel = self.find_wire(to, dst).is_some();
            let new = self.add_wire(to, dst)?;
            trace!("simplify: rewire {from}->{dst} as {to}->{dst}");

            if to_fixed {
                work.wires.push_back(new);
            } else if parallel {
                work.collapse.push_back(dst);
            }
        }

        self.remove_gate(from)?;
        self.prune_upward(to)
    }

    fn insert_not(&mut self, src: GateId, work: &mut Worklist) -> Result<GateId, CircuitError> {
        let not = self.add_gate(GateType::Not);
        let w = self.add_wire(src, not)?;
        if self.is_fixed(src)? {
            work.wires.push_back(w);
        }
        Ok(not)
    }

    /// `op(o, o)` for a non-constant `o`. XOR and XNOR would need a constant source and stay as is.
    fn collapse_parallel(&mut self, gate: GateId, work: &mut Worklist) -> Result<(), CircuitError> {
        if !self.contains(gate) || self.is_fixed(gate)? {
            return Ok(());
        }
        let operand = match self.predecessors(gate)?.as_slice() {
            [a, b] if a == b => *a,
            _ => return Ok(()),
        };
        if self.is_fixed(operand)? {
            return Ok(());
        }

        match gate.gate_type {
            GateType::And | GateType::Or => self.redirect(gate, operand, work),
            GateType::Nand | GateType::Nor => {
                let not = self.insert_not(operand, work)?;
                self.redirect(gate, not, work)
            }
            _ => Ok(()),
        }
    }

    /// Remove gates left without successors, walking towards the inputs.
    /// Inputs, outputs and terminals are never removed here.
    fn prune_upward(&mut self, start: GateId) -> Result<(), CircuitError> {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if !self.contains(id)
                || matches!(
                    id.gate_type,
                    GateType::Input | GateType::Output | GateType::Sink
                )
                || !self.out_wires(id)?.is_empty()
            {
                continue;
            }

            let preds = self.predecessors(id)?;
            self.remove_gate(id)?;
            trace!("simplify: prune {id}");
            stack.extend(preds);
        }
        Ok(())
    }
}
