//! Steppable graph algorithms.
//!
//! Each algorithm is a state machine: every call to [`Algorithm::step`]
//! performs the mutations up to the next step boundary and reports what it
//! did, so the caller can redraw and wait before asking for more.

mod bfs;
mod dfs;
mod kruskal;
mod prim;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub use bfs::Bfs;
pub use dfs::Dfs;
pub use kruskal::Kruskal;
pub use prim::Prim;

use crate::error::GraphError;
use crate::graph::{GraphModel, VertexIdx};

/// The algorithms a run can execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
	/// Breadth-first traversal.
	Bfs,
	/// Depth-first traversal.
	Dfs,
	/// Prim's minimum spanning tree.
	Prim,
	/// Kruskal's minimum spanning forest.
	Kruskal,
}

impl AlgorithmKind {
	/// Every kind, in control order.
	pub const ALL: [AlgorithmKind; 4] = [
		AlgorithmKind::Bfs,
		AlgorithmKind::Dfs,
		AlgorithmKind::Prim,
		AlgorithmKind::Kruskal,
	];

	/// Control label shown in the UI.
	pub fn label(self) -> &'static str {
		match self {
			AlgorithmKind::Bfs => "BFS",
			AlgorithmKind::Dfs => "DFS",
			AlgorithmKind::Prim => "MSTPRIM",
			AlgorithmKind::Kruskal => "MSTKRUSKAL",
		}
	}

	/// Spanning-tree algorithms read the graph as undirected.
	pub fn is_spanning_tree(self) -> bool {
		matches!(self, AlgorithmKind::Prim | AlgorithmKind::Kruskal)
	}

	/// Fresh state machine for this kind, rooted at `source`.
	pub fn build(self, source: VertexIdx) -> Box<dyn Algorithm> {
		match self {
			AlgorithmKind::Bfs => Box::new(Bfs::new(source)),
			AlgorithmKind::Dfs => Box::new(Dfs::new(source)),
			AlgorithmKind::Prim => Box::new(Prim::new(source)),
			AlgorithmKind::Kruskal => Box::new(Kruskal::new()),
		}
	}
}

impl fmt::Display for AlgorithmKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

impl FromStr for AlgorithmKind {
	type Err = GraphError;

	fn from_str(name: &str) -> Result<Self, Self::Err> {
		match name.to_ascii_lowercase().as_str() {
			"bfs" => Ok(AlgorithmKind::Bfs),
			"dfs" => Ok(AlgorithmKind::Dfs),
			"mstprim" | "prim" => Ok(AlgorithmKind::Prim),
			"mstkruskal" | "kruskal" => Ok(AlgorithmKind::Kruskal),
			_ => Err(GraphError::UnknownAlgorithm(name.to_string())),
		}
	}
}

/// Edge accepted into a spanning tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeEdge {
	/// Endpoint already in the tree when the edge was accepted.
	pub source: VertexIdx,
	/// Endpoint the edge brought into the tree.
	pub target: VertexIdx,
	/// Edge weight.
	pub weight: f64,
}

/// What happened since the previous step boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
	/// The root was marked.
	Root(VertexIdx),
	/// `to` was reached for the first time through `from`.
	Discovered { from: VertexIdx, to: VertexIdx },
	/// Every neighbor of the vertex has been processed.
	Explored(VertexIdx),
	/// An edge joined the spanning tree.
	Accepted(TreeEdge),
}

/// Orders of discovery and exploration, and the accepted tree edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
	/// Vertices in the order they were first reached.
	pub discovered: Vec<VertexIdx>,
	/// Vertices in the order they were finished.
	pub explored: Vec<VertexIdx>,
	/// Accepted spanning-tree edges, in acceptance order.
	pub tree: Vec<TreeEdge>,
}

impl Trace {
	/// Sum of the accepted tree edge weights.
	pub fn total_weight(&self) -> f64 {
		self.tree.iter().map(|edge| edge.weight).sum()
	}

	/// Discovery order as vertex ids.
	pub fn discovered_ids<'g>(&self, graph: &'g GraphModel) -> Vec<&'g str> {
		self.discovered.iter().map(|&idx| graph.id_of(idx)).collect()
	}

	/// Exploration order as vertex ids.
	pub fn explored_ids<'g>(&self, graph: &'g GraphModel) -> Vec<&'g str> {
		self.explored.iter().map(|&idx| graph.id_of(idx)).collect()
	}
}

/// A resumable algorithm over a [`GraphModel`].
pub trait Algorithm {
	/// Which algorithm this is.
	fn kind(&self) -> AlgorithmKind;

	/// Runs up to the next step boundary. `None` means the algorithm has
	/// finished and further calls keep returning `None`.
	fn step(&mut self, graph: &mut GraphModel) -> Option<Step>;

	/// What the algorithm has done so far.
	fn trace(&self) -> &Trace;
}

/// Frontier or candidate edge. `seq` is the push order and breaks weight
/// ties first-in first-out.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WeightedEdge {
	/// Endpoint already in the tree when the edge was accepted.
	pub source: VertexIdx,
	/// Endpoint the edge brought into the tree.
	pub target: VertexIdx,
	/// Edge weight.
	pub weight: f64,
	pub seq: u64,
}

pub(crate) fn lightest_first(a: &WeightedEdge, b: &WeightedEdge) -> Ordering {
	a.weight.total_cmp(&b.weight).then(a.seq.cmp(&b.seq))
}

/// Incident edges of every vertex with direction ignored. An arc stored in
/// both directions shows up twice, which the acceptance tests tolerate.
pub(crate) fn incidence(graph: &GraphModel) -> Vec<Vec<(VertexIdx, f64)>> {
	let mut incident = vec![Vec::new(); graph.len()];
	for (source, target, weight) in graph.edges() {
		incident[source.index()].push((target, weight));
		incident[target.index()].push((source, weight));
	}
	incident
}

#[cfg(test)]
pub(crate) mod testing {
	use serde_json::Value;

	use super::{Algorithm, Step};
	use crate::graph::{GraphModel, GraphOptions};

	pub fn graph(options: GraphOptions, data: Value) -> GraphModel {
		let mut graph = GraphModel::new(options);
		graph.populate_from_value(&data).unwrap();
		graph
	}

	pub fn drain(algorithm: &mut dyn Algorithm, graph: &mut GraphModel) -> Vec<Step> {
		let steps: Vec<Step> = std::iter::from_fn(|| algorithm.step(graph)).collect();
		assert_eq!(algorithm.step(graph), None);
		steps
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_control_names() {
		assert_eq!("BFS".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Bfs));
		assert_eq!("mstPrim".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Prim));
		assert_eq!("kruskal".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Kruskal));
		assert_eq!(
			"dijkstra".parse::<AlgorithmKind>(),
			Err(GraphError::UnknownAlgorithm("dijkstra".into()))
		);
		for kind in AlgorithmKind::ALL {
			assert_eq!(kind.to_string().parse::<AlgorithmKind>(), Ok(kind));
		}
	}
}
