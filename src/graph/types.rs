use std::fmt;

use super::style::{EdgeStyle, VertexHighlight, VertexStyle};

/// Dense handle of a vertex inside one [`GraphModel`](super::GraphModel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIdx(pub(crate) usize);

impl VertexIdx {
	/// Position of the vertex in creation order.
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for VertexIdx {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Identity of the run currently holding a graph's run lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunId(pub(crate) u64);

/// Point in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal offset from the left edge.
	pub x: f64,
	/// Vertical offset from the top edge.
	pub y: f64,
}

impl Position {
	/// Point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Position) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}
}

/// Canvas extent used for random placement and fitting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Default for Bounds {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
		}
	}
}

/// Per-run bookkeeping on a vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum VisitState {
	#[default]
	Unvisited,
	Visited,
	Explored,
	/// Joined a spanning tree through `predecessor` at cost `distance`.
	Tree {
		distance: f64,
		predecessor: Option<VertexIdx>,
	},
}

impl VisitState {
	/// Whether a traversal has already reached this vertex.
	pub fn is_seen(self) -> bool {
		!matches!(self, VisitState::Unvisited)
	}
}

/// Outgoing arc stored on its source vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub(crate) target: VertexIdx,
	pub(crate) weight: f64,
	pub(crate) style: EdgeStyle,
	pub(crate) highlighted: bool,
}

impl Edge {
	/// Vertex the arc points at.
	pub fn target(&self) -> VertexIdx {
		self.target
	}

	/// Arc weight.
	pub fn weight(&self) -> f64 {
		self.weight
	}

	/// Base style, without run highlights.
	pub fn style(&self) -> &EdgeStyle {
		&self.style
	}

	/// Whether the active or last run marked this edge.
	pub fn is_highlighted(&self) -> bool {
		self.highlighted
	}
}

/// A vertex with its outgoing arcs.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
	pub(crate) id: String,
	pub(crate) position: Position,
	pub(crate) pinned: bool,
	pub(crate) style: VertexStyle,
	pub(crate) state: VisitState,
	pub(crate) highlight: Option<VertexHighlight>,
	pub(crate) edges: Vec<Edge>,
}

impl Vertex {
	/// Vertex id.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Current position.
	pub fn position(&self) -> Position {
		self.position
	}

	/// Vertices placed explicitly are left alone by the layout engine.
	pub fn is_pinned(&self) -> bool {
		self.pinned
	}

	/// Base style, without run highlights.
	pub fn style(&self) -> &VertexStyle {
		&self.style
	}

	/// Visit state of the current run.
	pub fn state(&self) -> VisitState {
		self.state
	}

	/// Run highlight, if any.
	pub fn highlight(&self) -> Option<VertexHighlight> {
		self.highlight
	}

	/// Outgoing edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub(crate) fn edge_slot(&self, target: VertexIdx) -> Option<usize> {
		self.edges.iter().position(|edge| edge.target == target)
	}
}
