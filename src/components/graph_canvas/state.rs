use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};

use crate::error::Result;
use crate::graph::{AdjacencyData, Bounds, GraphModel, GraphOptions, Position, VertexIdx};
use crate::layout::LayoutEngine;
use crate::runner::AlgorithmRunner;

/// Distance from the canvas edge that stray vertices are pulled back to.
pub const FIT_MARGIN: f64 = 40.0;

/// Size of an unsized HTML canvas. Sample positions are written against it
/// and scaled to the real canvas afterwards.
pub const AUTHORING_BOUNDS: Bounds = Bounds {
	width: 300.0,
	height: 150.0,
};

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub vertex: Option<VertexIdx>,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub last: Position,
}

/// Per-canvas state: the graph, reached through its runner, plus pointer
/// interaction.
pub struct CanvasState {
	pub runner: Rc<AlgorithmRunner>,
	pub drag: DragState,
	pub pan: PanState,
	/// Shared with renderers so hover effects follow the pointer.
	pub pointer: Rc<Cell<Position>>,
	/// Canvas size waiting for the active run to finish.
	pub pending_resize: Option<Bounds>,
}

impl CanvasState {
	pub fn new(
		data: &AdjacencyData,
		options: GraphOptions,
		seed: u64,
		width: f64,
		height: f64,
	) -> Result<Self> {
		let mut graph = GraphModel::with_seed(options, seed);
		graph.set_bounds(AUTHORING_BOUNDS);
		graph.populate_from_adjacency(data)?;
		LayoutEngine::default().apply(&mut graph)?;
		graph.rescale(Bounds { width, height })?;
		graph.fit_to_bounds(FIT_MARGIN)?;

		Ok(Self {
			runner: Rc::new(AlgorithmRunner::new(Rc::new(RefCell::new(graph)))),
			drag: DragState::default(),
			pan: PanState::default(),
			pointer: Rc::new(Cell::new(Position::default())),
			pending_resize: None,
		})
	}

	pub fn graph(&self) -> &Rc<RefCell<GraphModel>> {
		self.runner.graph()
	}

	/// A press while a run is playing cancels it. Otherwise it grabs the
	/// vertex under the pointer, or starts panning.
	pub fn pointer_down(&mut self, at: Position) {
		self.pointer.set(at);
		if self.runner.cancel_current() {
			info!("pointer press cancelled the active run");
			return;
		}

		let mut graph = self.runner.graph().borrow_mut();
		match graph.vertex_at(at) {
			Some(idx) => {
				if let Err(err) = graph.select(idx) {
					warn!("cannot grab {}: {err}", graph.id_of(idx));
					return;
				}
				self.drag = DragState {
					active: true,
					vertex: Some(idx),
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					last: at,
				};
			}
		}
	}

	pub fn pointer_move(&mut self, at: Position) {
		self.pointer.set(at);
		let mut graph = self.runner.graph().borrow_mut();
		if let (true, Some(idx)) = (self.drag.active, self.drag.vertex) {
			if let Err(err) = graph.move_vertex(idx, at) {
				debug!("drag ignored: {err}");
			}
		} else if self.pan.active {
			let (dx, dy) = (at.x - self.pan.last.x, at.y - self.pan.last.y);
			if let Err(err) = graph.translate(dx, dy) {
				debug!("pan ignored: {err}");
			}
			self.pan.last = at;
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.runner.graph().borrow_mut().clear_selection();
	}

	/// Scales the graph to a new canvas size. While a run holds the graph the
	/// size is kept for [`apply_pending_resize`](Self::apply_pending_resize).
	pub fn resize(&mut self, bounds: Bounds) {
		let mut graph = self.runner.graph().borrow_mut();
		match graph.rescale(bounds) {
			Ok(()) => self.pending_resize = None,
			Err(err) => {
				debug!("resize deferred: {err}");
				self.pending_resize = Some(bounds);
			}
		}
	}

	pub fn apply_pending_resize(&mut self) {
		if let Some(bounds) = self.pending_resize.take() {
			self.resize(bounds);
		}
	}
}
