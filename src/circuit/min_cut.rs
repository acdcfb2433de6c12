use std::collections::{HashMap, VecDeque};

use bitvec::prelude::*;
use log::debug;

use super::structure::Circuit;
use crate::{CircuitError, GateError, GateId, GateType, WireId};

/// One edge of the flow network that crosses the minimum cut.
///
/// The terminal edges exist only while the cut is computed, so they are named by the
/// INPUT or OUTPUT gate they touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CutEdge {
    /// Source terminal to an INPUT gate
    Input(GateId),
    Wire(WireId),
    /// An OUTPUT gate to the sink terminal
    Output(GateId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinCut {
    edges: Vec<CutEdge>,
    max_flow: usize,
}

impl MinCut {
    /// Cut edges, sorted
    pub fn edges(&self) -> &[CutEdge] {
        &self.edges
    }

    pub fn max_flow(&self) -> usize {
        self.max_flow
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Residual network with arcs stored in forward/reverse pairs: arc `2k` is the
/// forward arc of edge `k`, arc `2k + 1` its reverse.
struct FlowNetwork {
    adjacency: Vec<Vec<usize>>,
    head: Vec<usize>,
    capacity: Vec<u32>,
}

impl FlowNetwork {
    fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            head: Vec::new(),
            capacity: Vec::new(),
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, capacity: u32) {
        let arc = self.head.len();
        self.head.extend([to, from]);
        self.capacity.extend([capacity, 0]);
        self.adjacency[from].push(arc);
        self.adjacency[to].push(arc + 1);
    }

    fn tail(&self, arc: usize) -> usize {
        self.head[arc ^ 1]
    }

    /// Shortest augmenting path, as arcs indexed by the node they reach
    fn bfs(&self, source: usize, sink: usize) -> Option<Vec<Option<usize>>> {
        let mut parent = vec![None; self.adjacency.len()];
        let mut visited = bitvec![0; self.adjacency.len()];
        visited.set(source, true);

        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            if node == sink {
                return Some(parent);
            }
            for &arc in &self.adjacency[node] {
                let next = self.head[arc];
                if self.capacity[arc] > 0 && !visited[next] {
                    visited.set(next, true);
                    parent[next] = Some(arc);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Edmonds–Karp
    fn max_flow(&mut self, source: usize, sink: usize) -> usize {
        let mut flow = 0;
        while let Some(parent) = self.bfs(source, sink) {
            let mut path = Vec::new();
            let mut node = sink;
            while let Some(arc) = parent[node] {
                path.push(arc);
                node = self.tail(arc);
            }

            let bottleneck = path
                .iter()
                .map(|arc| self.capacity[*arc])
                .min()
                .unwrap_or_default();
            for arc in path {
                self.capacity[arc] -= bottleneck;
                self.capacity[arc ^ 1] += bottleneck;
            }
            flow += bottleneck as usize;
        }
        flow
    }

    fn reachable(&self, source: usize) -> BitVec {
        let mut seen = bitvec![0; self.adjacency.len()];
        seen.set(source, true);
        let mut stack = vec![source];
        while let Some(node) = stack.pop() {
            for &arc in &self.adjacency[node] {
                let next = self.head[arc];
                if self.capacity[arc] > 0 && !seen[next] {
                    seen.set(next, true);
                    stack.push(next);
                }
            }
        }
        seen
    }
}

impl Circuit {
    /// Minimum set of unit edges separating all inputs from all outputs.
    ///
    /// Cached against [`Circuit::version`]; any structural change since the last call
    /// triggers a recomputation.
    pub fn min_cut(&mut self) -> Result<&MinCut, CircuitError> {
        let entry = match self.min_cut.take() {
            Some((version, cut)) if version == self.version() => (version, cut),
            _ => {
                let cut = self.compute_min_cut()?;
                (self.version(), cut)
            }
        };
        Ok(&self.min_cut.insert(entry).1)
    }

    pub fn min_cut_edges(&mut self) -> Result<Vec<CutEdge>, CircuitError> {
        Ok(self.min_cut()?.edges().to_vec())
    }

    /// Values carried by the cut edges under the current input assignment, in edge order.
    ///
    /// Only the gates feeding the cut are evaluated.
    pub fn min_cut_values(&mut self) -> Result<Vec<bool>, CircuitError> {
        let sources = self
            .min_cut_edges()?
            .into_iter()
            .map(|edge| self.cut_edge_source(edge))
            .collect::<Result<Vec<_>, _>>()?;
        self.evaluate_to(&sources)
    }

    pub fn min_cut_values_for(&mut self, input: &[bool]) -> Result<Vec<bool>, CircuitError> {
        self.set_input(input)?;
        self.min_cut_values()
    }

    /// Gate whose value travels along `edge`
    pub fn cut_edge_source(&self, edge: CutEdge) -> Result<GateId, CircuitError> {
        match edge {
            CutEdge::Input(id) | CutEdge::Output(id) => Ok(id),
            CutEdge::Wire(w) => Ok(self.wire(w)?.src),
        }
    }

    /// Attach the terminals, solve the flow, detach them again. The terminals are
    /// removed even when solving fails.
    fn compute_min_cut(&mut self) -> Result<MinCut, CircuitError> {
        let source = self.add_gate(GateType::Sink);
        let sink = self.add_gate(GateType::Sink);

        let cut = self
            .attach_terminals(source, sink)
            .and_then(|terminals| self.solve_min_cut(source, sink, &terminals));

        self.remove_gate(source)?;
        self.remove_gate(sink)?;
        let cut = cut?;

        debug!(
            "min_cut: gates={} wires={} max_flow={} edges={}",
            self.gate_count(),
            self.wire_count(),
            cut.max_flow,
            cut.edges.len()
        );
        Ok(cut)
    }

    fn attach_terminals(
        &mut self,
        source: GateId,
        sink: GateId,
    ) -> Result<HashMap<WireId, CutEdge>, CircuitError> {
        let mut terminals = HashMap::new();
        for input in self.inputs() {
            terminals.insert(self.add_wire(source, input)?, CutEdge::Input(input));
        }
        for output in self.outputs() {
            terminals.insert(self.add_wire(output, sink)?, CutEdge::Output(output));
        }
        Ok(terminals)
    }

    fn solve_min_cut(
        &self,
        source: GateId,
        sink: GateId,
        terminals: &HashMap<WireId, CutEdge>,
    ) -> Result<MinCut, CircuitError> {
        let index: HashMap<GateId, usize> =
            self.gates().enumerate().map(|(i, id)| (id, i)).collect();
        let node = |id: GateId| index.get(&id).copied().ok_or(GateError::GateNotFound(id));

        let mut network = FlowNetwork::new(index.len());
        let mut edge_wires = Vec::with_capacity(self.wire_count());
        for (id, wire) in self.wires() {
            network.add_edge(node(wire.src)?, node(wire.dst)?, 1);
            edge_wires.push(id);
        }

        let (s, t) = (node(source)?, node(sink)?);
        let max_flow = network.max_flow(s, t);
        let reachable = network.reachable(s);

        let mut edges = edge_wires
            .iter()
            .enumerate()
            .filter(|(k, _)| {
                let arc = 2 * k;
                reachable[network.tail(arc)] && !reachable[network.head[arc]]
            })
            .map(|(_, w)| terminals.get(w).copied().unwrap_or(CutEdge::Wire(*w)))
            .collect::<Vec<_>>();
        edges.sort();

        Ok(MinCut { edges, max_flow })
    }
}
