use super::{Algorithm, AlgorithmKind, Step, Trace, TreeEdge, WeightedEdge, lightest_first};
use crate::collections::{DisjointSet, OrderedPriorityQueue};
use crate::graph::{GraphModel, VertexHighlight, VertexIdx, VisitState};

type Candidates =
	OrderedPriorityQueue<WeightedEdge, fn(&WeightedEdge, &WeightedEdge) -> std::cmp::Ordering>;

/// Kruskal's minimum spanning forest over every stored arc.
///
/// Arcs stored in both directions enter the queue twice; the second copy
/// always finds its endpoints connected and is dropped. Suspends after every
/// accepted edge.
pub struct Kruskal {
	started: bool,
	components: DisjointSet<VertexIdx>,
	candidates: Candidates,
	trace: Trace,
}

impl Default for Kruskal {
	fn default() -> Self {
		Self::new()
	}
}

impl Kruskal {
	/// Spanning forest over every edge of the graph.
	pub fn new() -> Self {
		Self {
			started: false,
			components: DisjointSet::new(),
			candidates: OrderedPriorityQueue::new(lightest_first),
			trace: Trace::default(),
		}
	}

	fn prepare(&mut self, graph: &GraphModel) {
		for (idx, _) in graph.vertices() {
			self.components.add(idx);
		}
		let edges = graph
			.edges()
			.zip(0u64..)
			.map(|((source, target, weight), seq)| WeightedEdge {
				source,
				target,
				weight,
				seq,
			})
			.collect();
		self.candidates = OrderedPriorityQueue::from_vec(edges, lightest_first);
	}
}

impl Algorithm for Kruskal {
	fn kind(&self) -> AlgorithmKind {
		AlgorithmKind::Kruskal
	}

	fn step(&mut self, graph: &mut GraphModel) -> Option<Step> {
		if !self.started {
			self.started = true;
			self.prepare(graph);
		}

		while let Some(edge) = self.candidates.pop() {
			if !self.components.union(&edge.source, &edge.target) {
				continue;
			}

			for vertex in [edge.source, edge.target] {
				if !graph.state(vertex).is_seen() {
					graph.set_state(vertex, VisitState::Visited);
					self.trace.discovered.push(vertex);
				}
				graph.set_highlight(vertex, VertexHighlight::Explored);
			}
			graph.highlight_between(edge.source, edge.target);

			let accepted = TreeEdge {
				source: edge.source,
				target: edge.target,
				weight: edge.weight,
			};
			self.trace.tree.push(accepted);
			return Some(Step::Accepted(accepted));
		}
		None
	}

	fn trace(&self) -> &Trace {
		&self.trace
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::algorithms::testing::{drain, graph};
	use crate::graph::GraphOptions;

	#[test]
	fn accepts_each_undirected_edge_once() {
		let mut graph = graph(
			GraphOptions::undirected(),
			json!({ "a": [{ "b": [1], "c": [5] }], "b": [{ "c": [1] }] }),
		);
		let mut kruskal = Kruskal::new();
		let steps = drain(&mut kruskal, &mut graph);

		assert_eq!(steps.len(), 2);
		assert_eq!(kruskal.trace().total_weight(), 2.0);
		let a = graph.vertex_by_id("a").unwrap();
		assert!(a.edges()[0].is_highlighted());
		assert!(!a.edges()[1].is_highlighted());
	}

	#[test]
	fn spans_every_component() {
		let mut graph = graph(
			GraphOptions::undirected(),
			json!({ "a": [{ "b": [4], "e": [2] }], "c": [{ "d": [1] }] }),
		);
		let mut kruskal = Kruskal::new();
		drain(&mut kruskal, &mut graph);

		assert_eq!(kruskal.trace().tree.len(), graph.len() - 2);
		assert_eq!(kruskal.trace().total_weight(), 7.0);
		let weights: Vec<f64> = kruskal.trace().tree.iter().map(|edge| edge.weight).collect();
		assert_eq!(weights, vec![1.0, 2.0, 4.0]);
	}

	#[test]
	fn edgeless_graph_finishes_immediately() {
		let mut graph = GraphModel::default();
		graph.create_vertex("solo", None).unwrap();
		let mut kruskal = Kruskal::new();
		assert!(drain(&mut kruskal, &mut graph).is_empty());
	}
}
