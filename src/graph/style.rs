//! Default styles and the highlight palette.

/// How a vertex is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexStyle {
	/// Circle radius in pixels.
	pub radius: f64,
	/// Circle fill.
	pub fill_color: String,
	/// Circle outline.
	pub border_color: String,
	/// Outline width in pixels.
	pub border_width: f64,
	/// Label color.
	pub text_color: String,
	/// Label font, CSS syntax.
	pub text_font: String,
}

impl Default for VertexStyle {
	fn default() -> Self {
		Self {
			radius: 20.0,
			fill_color: "white".into(),
			border_color: "black".into(),
			border_width: 3.0,
			text_color: "black".into(),
			text_font: "20px Arial".into(),
		}
	}
}

/// How an edge is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Stroke color.
	pub color: String,
	/// Stroke width in pixels.
	pub width: f64,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			color: "black".into(),
			width: 3.0,
		}
	}
}

/// Graph-wide settings applied when vertices and edges are created.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
	/// When `false`, every inserted edge is mirrored.
	pub directed: bool,
	/// Style given to new vertices.
	pub vertex: VertexStyle,
	/// Style given to new edges.
	pub edge: EdgeStyle,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			directed: true,
			vertex: VertexStyle::default(),
			edge: EdgeStyle::default(),
		}
	}
}

impl GraphOptions {
	/// Default options for an undirected graph.
	pub fn undirected() -> Self {
		Self {
			directed: false,
			..Self::default()
		}
	}
}

/// Overlay a run puts on a vertex. Base styles are never rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexHighlight {
	/// Discovered, waiting to be expanded.
	Frontier,
	/// Currently being expanded.
	Active,
	/// Fully expanded, or part of a spanning tree.
	Explored,
}

/// Border of the vertex being expanded.
pub const ACTIVE_COLOR: &str = "red";
/// Border of discovered, unexpanded vertices.
pub const FRONTIER_COLOR: &str = "blue";
/// Fill of finished vertices.
pub const EXPLORED_FILL: &str = "lightgrey";
/// Label color of the grabbed vertex.
pub const SELECTED_TEXT: &str = "red";
/// Stroke of highlighted edges.
pub const TREE_EDGE_COLOR: &str = "red";

impl VertexStyle {
	/// This style with `highlight` and selection applied on top.
	pub fn with_overlay(&self, highlight: Option<VertexHighlight>, selected: bool) -> Self {
		let mut style = self.clone();
		match highlight {
			Some(VertexHighlight::Frontier) => style.border_color = FRONTIER_COLOR.into(),
			Some(VertexHighlight::Active) => style.border_color = ACTIVE_COLOR.into(),
			Some(VertexHighlight::Explored) => {
				style.border_color = ACTIVE_COLOR.into();
				style.fill_color = EXPLORED_FILL.into();
			}
			None => {}
		}
		if selected {
			style.text_color = SELECTED_TEXT.into();
		}
		style
	}
}

impl EdgeStyle {
	/// This style with the run highlight applied on top.
	pub fn with_overlay(&self, highlighted: bool) -> Self {
		let mut style = self.clone();
		if highlighted {
			style.color = TREE_EDGE_COLOR.into();
		}
		style
	}
}
