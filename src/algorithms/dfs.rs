use super::{Algorithm, AlgorithmKind, Step, Trace};
use crate::graph::{Edge, GraphModel, VertexHighlight, VertexIdx, VisitState};

/// Iterative depth-first traversal on an explicit stack.
///
/// A popped vertex pushes every unseen neighbor, one step boundary per push,
/// then is marked explored at its own step boundary. Discovery therefore
/// follows the stack, not recursive pre-order.
pub struct Dfs {
	source: VertexIdx,
	started: bool,
	stack: Vec<VertexIdx>,
	cursor: Option<(VertexIdx, usize)>,
	trace: Trace,
}

impl Dfs {
	/// Traversal rooted at `source`.
	pub fn new(source: VertexIdx) -> Self {
		Self {
			source,
			started: false,
			stack: Vec::new(),
			cursor: None,
			trace: Trace::default(),
		}
	}
}

impl Algorithm for Dfs {
	fn kind(&self) -> AlgorithmKind {
		AlgorithmKind::Dfs
	}

	fn step(&mut self, graph: &mut GraphModel) -> Option<Step> {
		if !self.started {
			self.started = true;
			graph.set_state(self.source, VisitState::Visited);
			graph.set_highlight(self.source, VertexHighlight::Frontier);
			self.stack.push(self.source);
			self.trace.discovered.push(self.source);
			return Some(Step::Root(self.source));
		}

		let (vertex, mut slot) = match self.cursor.take() {
			Some(cursor) => cursor,
			None => {
				let vertex = self.stack.pop()?;
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
			self.stack.push(target);
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
		Some(Step::Explored(vertex))
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
	fn chain_is_unambiguous() {
		let mut graph = graph(
			GraphOptions::default(),
			json!({ "a": [{ "b": [1] }], "b": [{ "c": [1] }] }),
		);
		let mut dfs = Dfs::new(graph.index_of("a").unwrap());
		drain(&mut dfs, &mut graph);

		assert_eq!(dfs.trace().discovered_ids(&graph), vec!["a", "b", "c"]);
		assert_eq!(dfs.trace().explored_ids(&graph), vec!["a", "b", "c"]);
	}

	#[test]
	fn follows_stack_semantics() {
		let mut graph = graph(
			GraphOptions::default(),
			json!({
				"a": [{ "b": [1], "c": [1] }],
				"b": [{ "d": [1] }],
				"c": [{ "e": [1] }],
			}),
		);
		let a = graph.index_of("a").unwrap();
		let mut dfs = Dfs::new(a);
		let steps = drain(&mut dfs, &mut graph);

		// both children of `a` are pushed before either is expanded, and the
		// last one pushed is expanded first
		assert_eq!(dfs.trace().discovered_ids(&graph), vec!["a", "b", "c", "e", "d"]);
		assert_eq!(dfs.trace().explored_ids(&graph), vec!["a", "c", "e", "b", "d"]);
		assert_eq!(steps[0], Step::Root(a));
		assert_eq!(steps[3], Step::Explored(a));
		// one boundary for the root, one per push, one per explored vertex
		assert_eq!(steps.len(), 1 + 4 + 5);
	}

	#[test]
	fn every_reachable_vertex_explored_once() {
		let mut graph = graph(
			GraphOptions::undirected(),
			json!({
				"a": [{ "b": [1], "d": [6], "e": [2], "f": [3] }],
				"b": [{ "c": [7], "e": [5], "f": [1] }],
				"c": [{ "e": [9] }],
				"d": [{ "f": [2] }],
				"g": [{ "b": [6] }],
			}),
		);
		let mut dfs = Dfs::new(graph.index_of("a").unwrap());
		drain(&mut dfs, &mut graph);

		let mut explored = dfs.trace().explored_ids(&graph);
		explored.sort_unstable();
		assert_eq!(explored, vec!["a", "b", "c", "d", "e", "f", "g"]);
		assert_eq!(dfs.trace().discovered.len(), 7);
	}
}
