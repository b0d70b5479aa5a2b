use super::{Algorithm, AlgorithmKind, Step, Trace, TreeEdge, WeightedEdge, incidence, lightest_first};
use crate::collections::OrderedPriorityQueue;
use crate::graph::{GraphModel, VertexHighlight, VertexIdx, VisitState};

type Frontier = OrderedPriorityQueue<WeightedEdge, fn(&WeightedEdge, &WeightedEdge) -> std::cmp::Ordering>;

/// Prim's minimum spanning tree grown from a root, ignoring edge direction.
///
/// The tree only ever covers the root's component. Suspends after the root
/// and after every accepted edge.
pub struct Prim {
	root: VertexIdx,
	started: bool,
	incident: Vec<Vec<(VertexIdx, f64)>>,
	frontier: Frontier,
	pushed: u64,
	trace: Trace,
}

impl Prim {
	/// Tree grown from `root`.
	pub fn new(root: VertexIdx) -> Self {
		Self {
			root,
			started: false,
			incident: Vec::new(),
			frontier: OrderedPriorityQueue::new(lightest_first),
			pushed: 0,
			trace: Trace::default(),
		}
	}

	fn in_tree(graph: &GraphModel, idx: VertexIdx) -> bool {
		matches!(graph.state(idx), VisitState::Tree { .. })
	}

	fn push_incident(&mut self, graph: &GraphModel, vertex: VertexIdx) {
		for &(other, weight) in &self.incident[vertex.index()] {
			if Self::in_tree(graph, other) {
				continue;
			}
			self.frontier.push(WeightedEdge {
				source: vertex,
				target: other,
				weight,
				seq: self.pushed,
			});
			self.pushed += 1;
		}
	}
}

impl Algorithm for Prim {
	fn kind(&self) -> AlgorithmKind {
		AlgorithmKind::Prim
	}

	fn step(&mut self, graph: &mut GraphModel) -> Option<Step> {
		if !self.started {
			self.started = true;
			self.incident = incidence(graph);
			graph.set_state(
				self.root,
				VisitState::Tree {
					distance: 0.0,
					predecessor: None,
				},
			);
			graph.set_highlight(self.root, VertexHighlight::Explored);
			self.trace.discovered.push(self.root);
			self.push_incident(graph, self.root);
			return Some(Step::Root(self.root));
		}

		while let Some(edge) = self.frontier.pop() {
			let (from, joining) = match (
				Self::in_tree(graph, edge.source),
				Self::in_tree(graph, edge.target),
			) {
				(true, false) => (edge.source, edge.target),
				(false, true) => (edge.target, edge.source),
				_ => continue,
			};

			graph.set_state(
				joining,
				VisitState::Tree {
					distance: edge.weight,
					predecessor: Some(from),
				},
			);
			graph.set_highlight(joining, VertexHighlight::Explored);
			graph.highlight_between(from, joining);

			let accepted = TreeEdge {
				source: from,
				target: joining,
				weight: edge.weight,
			};
			self.trace.discovered.push(joining);
			self.trace.tree.push(accepted);
			self.push_incident(graph, joining);
			return Some(Step::Accepted(accepted));
		}
		None
	}

	fn trace(&self) -> &Trace {
		&self.trace
	}
}
