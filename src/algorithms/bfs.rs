use super::{Algorithm, AlgorithmKind, Step, Trace};
use crate::collections::FifoQueue;
use crate::graph::{Edge, GraphModel, VertexHighlight, VertexIdx, VisitState};

/// Breadth-first traversal. Suspends after every newly discovered neighbor.
pub struct Bfs {
	source: VertexIdx,
	started: bool,
	queue: FifoQueue<VertexIdx>,
	/// Vertex being expanded and the next edge slot to examine.
	cursor: Option<(VertexIdx, usize)>,
	trace: Trace,
}

impl Bfs {
	/// Traversal rooted at `source`.
	pub fn new(source: VertexIdx) -> Self {
		Self {
			source,
			started: false,
			queue: FifoQueue::new(),
			cursor: None,
			trace: Trace::default(),
		}
	}
}

impl Algorithm for Bfs {
	fn kind(&self) -> AlgorithmKind {
		AlgorithmKind::Bfs
	}

	fn step(&mut self, graph: &mut GraphModel) -> Option<Step> {
		if !self.started {
			self.started = true;
			graph.set_state(self.source, VisitState::Visited);
			graph.set_highlight(self.source, VertexHighlight::Frontier);
			self.queue.enqueue(self.source);
			self.trace.discovered.push(self.source);
			return Some(Step::Root(self.source));
		}

		loop {
			let (vertex, mut slot) = match self.cursor.take() {
				Some(cursor) => cursor,
				None => {
					let vertex = self.queue.dequeue()?;
					graph.set_highlight(vertex, VertexHighlight::Active);
					(vertex, 0)
				}
			};

			while let Some(target) = graph.edge_at(vertex, slot).map(Edge::target) {
				slot += 1;
				if graph.state(target).is_seen() {
					continue;
				}
				graph.highlight_edge_at(vertex, slot - 1);
				graph.set_state(target, VisitState::Visited);
				graph.set_highlight(target, VertexHighlight::Frontier);
				self.queue.enqueue(target);
				self.trace.discovered.push(target);
				self.cursor = Some((vertex, slot));
				return Some(Step::Discovered {
					from: vertex,
					to: target,
				});
			}

			graph.set_state(vertex, VisitState::Explored);
			graph.set_highlight(vertex, VertexHighlight::Explored);
			self.trace.explored.push(vertex);
		}
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
	fn visits_neighbors_in_insertion_order() {
		let mut graph = graph(GraphOptions::default(), json!({ "a": [{ "b": [1], "c": [1] }] }));
		let mut bfs = Bfs::new(graph.index_of("a").unwrap());
		let steps = drain(&mut bfs, &mut graph);

		assert_eq!(bfs.trace().discovered_ids(&graph), vec!["a", "b", "c"]);
		assert_eq!(bfs.trace().explored_ids(&graph), vec!["a", "b", "c"]);
		assert_eq!(steps.len(), 3);
		assert!(matches!(steps[0], Step::Root(_)));
	}

	#[test]
	fn levels_come_out_in_order() {
		let mut graph = graph(
			GraphOptions::default(),
			json!({
				"a": [{ "c": [1], "b": [1] }],
				"b": [{ "e": [1], "a": [1] }],
				"c": [{ "d": [1], "e": [1] }],
				"d": [{ "f": [1] }],
				"e": [{ "f": [1] }],
			}),
		);
		let mut bfs = Bfs::new(graph.index_of("a").unwrap());
		drain(&mut bfs, &mut graph);

		assert_eq!(bfs.trace().discovered_ids(&graph), vec!["a", "c", "b", "d", "e", "f"]);
	}

	#[test]
	fn unreachable_vertices_stay_unvisited() {
		let mut graph = graph(
			GraphOptions::default(),
			json!({ "a": [{ "b": [1] }], "g": [{ "a": [6] }] }),
		);
		let mut bfs = Bfs::new(graph.index_of("a").unwrap());
		drain(&mut bfs, &mut graph);

		let g = graph.vertex_by_id("g").unwrap();
		assert_eq!(g.state(), VisitState::Unvisited);
		assert_eq!(g.highlight(), None);
		assert_eq!(graph.vertex_by_id("b").unwrap().state(), VisitState::Explored);
	}

	#[test]
	fn cycles_are_discovered_once() {
		let mut graph = graph(
			GraphOptions::undirected(),
			json!({ "a": [{ "b": [1] }], "b": [{ "c": [1] }], "c": [{ "a": [1] }] }),
		);
		let mut bfs = Bfs::new(graph.index_of("b").unwrap());
		let steps = drain(&mut bfs, &mut graph);

		assert_eq!(bfs.trace().discovered_ids(&graph), vec!["b", "a", "c"]);
		assert_eq!(steps.len(), 3);
	}
}
