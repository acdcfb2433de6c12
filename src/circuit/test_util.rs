use std::collections::HashSet;

use rand::Rng;

use super::{min_cut::CutEdge, structure::Circuit};
use crate::{GateId, GateValue};

/// Random assignment that agrees with every fixed input
pub fn random_input(circuit: &Circuit, rng: &mut impl Rng) -> Vec<bool> {
    circuit
        .inputs()
        .into_iter()
        .map(|id| match circuit.gate_value(id).unwrap() {
            GateValue::Fixed(v) => v,
            _ => rng.random(),
        })
        .collect()
}

/// Walk from every input over wires outside the cut and check that no output is
/// reached through an edge that is not cut
pub fn assert_cut_disconnects(circuit: &Circuit, cut: &[CutEdge]) {
    let cut: HashSet<CutEdge> = cut.iter().copied().collect();

    let mut seen: HashSet<GateId> = circuit
        .inputs()
        .into_iter()
        .filter(|id| !cut.contains(&CutEdge::Input(*id)))
        .collect();
    let mut stack: Vec<GateId> = seen.iter().copied().collect();

    while let Some(id) = stack.pop() {
        for w in circuit.out_wires(id).unwrap() {
            if cut.contains(&CutEdge::Wire(*w)) {
                continue;
            }
            let dst = circuit.wire(*w).unwrap().dst;
            if seen.insert(dst) {
                stack.push(dst);
            }
        }
    }

    for output in circuit.outputs() {
        assert!(
            !seen.contains(&output) || cut.contains(&CutEdge::Output(output)),
            "output {output} reachable around the cut"
        );
    }
}
