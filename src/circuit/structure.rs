use crate::{
    circuit::min_cut::MinCut, CircuitError, GateError, GateId, GateType, GateValue, Wire,
    WireError, WireId,
};

#[derive(Clone, Debug, Default)]
pub(crate) struct GateNode {
    in_wires: Vec<WireId>,
    out_wires: Vec<WireId>,
    pub(crate) value: GateValue,
}

/// Gate-level DAG.
///
/// Gates live in one arena per [`GateType`], addressed by [`GateId::number`]; removed slots
/// stay `None` so numbers are never reused. Every structural mutation goes through the
/// methods below and bumps [`Circuit::version`], which is what keeps the min-cut cache honest.
#[derive(Clone, Debug, Default)]
pub struct Circuit {
    gates: [Vec<Option<GateNode>>; GateType::COUNT],
    live_gates: [usize; GateType::COUNT],
    wires: Vec<Option<Wire>>,
    live_wires: usize,
    version: u64,
    pub(super) min_cut: Option<(u64, MinCut)>,
}

impl Circuit {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn add_gate(&mut self, gate_type: GateType) -> GateId {
        let arena = &mut self.gates[gate_type.index()];
        let id = GateId::new(gate_type, arena.len());
        arena.push(Some(GateNode::default()));
        self.live_gates[gate_type.index()] += 1;
        self.version += 1;
        id
    }

    /// Remove a gate together with every incident wire; one version bump per call
    pub fn remove_gate(&mut self, id: GateId) -> Result<(), CircuitError> {
        let node = self.gates[id.gate_type.index()]
            .get_mut(id.number)
            .and_then(Option::take)
            .ok_or(GateError::GateNotFound(id))?;
        self.live_gates[id.gate_type.index()] -= 1;

        for w in node.in_wires.into_iter().chain(node.out_wires) {
            // a self-loop would show up twice, the second detach is a no-op
            if let Some(wire) = self.wires.get_mut(w.0).and_then(Option::take) {
                self.live_wires -= 1;
                let other = if wire.src == id { wire.dst } else { wire.src };
                if let Some(other) = self.node_slot_mut(other) {
                    other.in_wires.retain(|x| *x != w);
                    other.out_wires.retain(|x| *x != w);
                }
            }
        }

        self.version += 1;
        Ok(())
    }

    /// Connect `src` to `dst`. Parallel wires between the same pair are allowed,
    /// see [`Circuit::find_wire`] to detect them.
    pub fn add_wire(&mut self, src: GateId, dst: GateId) -> Result<WireId, CircuitError> {
        self.node(src)?;
        self.node(dst)?;

        let id = WireId(self.wires.len());
        self.wires.push(Some(Wire::new(src, dst)));
        self.live_wires += 1;

        self.node_mut(src)?.out_wires.push(id);
        self.node_mut(dst)?.in_wires.push(id);

        self.version += 1;
        Ok(id)
    }

    pub fn remove_wire(&mut self, id: WireId) -> Result<Wire, CircuitError> {
        let wire = self
            .wires
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(WireError::WireNotFound(id))?;
        self.live_wires -= 1;

        self.node_mut(wire.src)?.out_wires.retain(|w| *w != id);
        self.node_mut(wire.dst)?.in_wires.retain(|w| *w != id);

        self.version += 1;
        Ok(wire)
    }

    /// First live wire going from `src` to `dst`
    pub fn find_wire(&self, src: GateId, dst: GateId) -> Option<WireId> {
        self.node(dst)
            .ok()?
            .in_wires
            .iter()
            .copied()
            .find(|w| matches!(self.wire(*w), Ok(wire) if wire.src == src))
    }

    pub fn wire(&self, id: WireId) -> Result<Wire, WireError> {
        self.wires
            .get(id.0)
            .copied()
            .flatten()
            .ok_or(WireError::WireNotFound(id))
    }

    pub fn contains(&self, id: GateId) -> bool {
        self.node_slot(id).is_some()
    }

    pub fn contains_wire(&self, id: WireId) -> bool {
        self.wire(id).is_ok()
    }

    pub fn in_wires(&self, id: GateId) -> Result<&[WireId], GateError> {
        Ok(&self.node(id)?.in_wires)
    }

    pub fn out_wires(&self, id: GateId) -> Result<&[WireId], GateError> {
        Ok(&self.node(id)?.out_wires)
    }

    /// Source gates of the incoming wires, in wire insertion order
    pub fn predecessors(&self, id: GateId) -> Result<Vec<GateId>, CircuitError> {
        self.in_wires(id)?
            .iter()
            .map(|w| {
                self.wire(*w)
                    .map(|wire| wire.src)
                    .map_err(CircuitError::from)
            })
            .collect()
    }

    pub fn successors(&self, id: GateId) -> Result<Vec<GateId>, CircuitError> {
        self.out_wires(id)?
            .iter()
            .map(|w| {
                self.wire(*w)
                    .map(|wire| wire.dst)
                    .map_err(CircuitError::from)
            })
            .collect()
    }

    /// Live gates of one type, by ascending number
    pub fn gates_of(&self, gate_type: GateType) -> impl Iterator<Item = GateId> + '_ {
        self.gates[gate_type.index()]
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(move |(number, _)| GateId::new(gate_type, number))
    }

    /// Every live gate, grouped by type
    pub fn gates(&self) -> impl Iterator<Item = GateId> + '_ {
        GateType::ALL.into_iter().flat_map(|t| self.gates_of(t))
    }

    pub fn wires(&self) -> impl Iterator<Item = (WireId, Wire)> + '_ {
        self.wires
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.map(|w| (WireId(i), w)))
    }

    pub fn inputs(&self) -> Vec<GateId> {
        self.gates_of(GateType::Input).collect()
    }

    pub fn outputs(&self) -> Vec<GateId> {
        self.gates_of(GateType::Output).collect()
    }

    pub fn gate_count(&self) -> usize {
        self.live_gates.iter().sum()
    }

    pub fn gate_count_of(&self, gate_type: GateType) -> usize {
        self.live_gates[gate_type.index()]
    }

    pub fn wire_count(&self) -> usize {
        self.live_wires
    }

    /// Check predecessor counts of every gate against its type
    pub fn validate(&self) -> Result<(), CircuitError> {
        for id in self.gates() {
            let Some(expected) = id.gate_type.arity() else {
                continue;
            };
            let actual = self.in_wires(id)?.len();
            if actual != expected {
                return Err(GateError::Arity {
                    gate: id,
                    expected,
                    actual,
                }
                .into());
            }
        }
        Ok(())
    }

    pub(crate) fn node(&self, id: GateId) -> Result<&GateNode, GateError> {
        self.node_slot(id).ok_or(GateError::GateNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: GateId) -> Result<&mut GateNode, GateError> {
        self.node_slot_mut(id).ok_or(GateError::GateNotFound(id))
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut GateNode> {
        self.gates.iter_mut().flatten().flatten()
    }

    fn node_slot(&self, id: GateId) -> Option<&GateNode> {
        self.gates[id.gate_type.index()]
            .get(id.number)
            .and_then(Option::as_ref)
    }

    fn node_slot_mut(&mut self, id: GateId) -> Option<&mut GateNode> {
        self.gates[id.gate_type.index()]
            .get_mut(id.number)
            .and_then(Option::as_mut)
    }
}
