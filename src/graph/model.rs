use std::collections::HashMap;

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use super::adjacency::AdjacencyData;
use super::style::{EdgeStyle, GraphOptions, VertexHighlight};
use super::types::{Bounds, Edge, Position, RunId, Vertex, VertexIdx, VisitState};
use crate::error::{GraphError, Result};
use crate::runner::Renderer;

const DEFAULT_SEED: u64 = 0x6772_6170_685f_6a73;

/// One entry of [`GraphModel::neighbors_of`].
#[derive(Clone, Copy, Debug)]
pub struct Neighbor<'a> {
	/// Target vertex id.
	pub id: &'a str,
	/// Target vertex handle.
	pub idx: VertexIdx,
	/// Edge weight.
	pub weight: f64,
	/// Base edge style.
	pub style: &'a EdgeStyle,
}

/// Adjacency-list graph owning every vertex, edge and per-run visit state.
///
/// Structural and positional mutation is refused while a run holds the
/// run lock; the holder mutates visit state and highlights through
/// crate-private methods.
#[derive(Debug)]
pub struct GraphModel {
	options: GraphOptions,
	bounds: Bounds,
	vertices: Vec<Vertex>,
	index: HashMap<String, VertexIdx>,
	rng: SmallRng,
	active_run: Option<RunId>,
	selected: Option<VertexIdx>,
}

impl Default for GraphModel {
	fn default() -> Self {
		Self::new(GraphOptions::default())
	}
}

impl GraphModel {
	/// Empty graph with the default placement seed.
	pub fn new(options: GraphOptions) -> Self {
		Self::with_seed(options, DEFAULT_SEED)
	}

	/// Graph whose random placements are reproducible from `seed`.
	pub fn with_seed(options: GraphOptions, seed: u64) -> Self {
		Self {
			options,
			bounds: Bounds::default(),
			vertices: Vec::new(),
			index: HashMap::new(),
			rng: SmallRng::seed_from_u64(seed),
			active_run: None,
			selected: None,
		}
	}

	/// Options new vertices and edges are created with.
	pub fn options(&self) -> &GraphOptions {
		&self.options
	}

	/// Whether edges are read as one-way right now.
	pub fn is_directed(&self) -> bool {
		self.options.directed
	}

	/// Canvas bounds used for placement and fitting.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Sets the canvas extent used for random placement without moving anything.
	pub fn set_bounds(&mut self, bounds: Bounds) {
		self.bounds = bounds;
	}

	/// Number of vertices.
	pub fn len(&self) -> usize {
		self.vertices.len()
	}

	/// Whether the graph has no vertices.
	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	/// Number of stored arcs; mirrored edges count twice.
	pub fn edge_count(&self) -> usize {
		self.vertices.iter().map(|vertex| vertex.edges.len()).sum()
	}

	/// Whether a vertex named `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Handle of the vertex named `id`.
	pub fn index_of(&self, id: &str) -> Option<VertexIdx> {
		self.index.get(id).copied()
	}

	/// Vertex behind a handle.
	pub fn vertex(&self, idx: VertexIdx) -> Option<&Vertex> {
		self.vertices.get(idx.0)
	}

	/// Vertex named `id`.
	pub fn vertex_by_id(&self, id: &str) -> Option<&Vertex> {
		self.index_of(id).and_then(|idx| self.vertex(idx))
	}

	/// Every vertex in creation order.
	pub fn vertices(&self) -> impl Iterator<Item = (VertexIdx, &Vertex)> {
		self.vertices
			.iter()
			.enumerate()
			.map(|(i, vertex)| (VertexIdx(i), vertex))
	}

	/// Every stored arc as `(source, target, weight)`, source by source.
	pub fn edges(&self) -> impl Iterator<Item = (VertexIdx, VertexIdx, f64)> + '_ {
		self.vertices().flat_map(|(source, vertex)| {
			vertex
				.edges
				.iter()
				.map(move |edge| (source, edge.target, edge.weight))
		})
	}

	/// Id of `idx`. Handles only come from this graph, so a miss is a bug in
	/// the caller; it yields an empty id rather than a panic.
	pub fn id_of(&self, idx: VertexIdx) -> &str {
		self.vertex(idx).map(Vertex::id).unwrap_or_default()
	}

	/// Outgoing neighbors of `id` in edge-insertion order.
	pub fn neighbors_of(&self, id: &str) -> Result<impl Iterator<Item = Neighbor<'_>> + '_> {
		let vertex = self
			.vertex_by_id(id)
			.ok_or_else(|| GraphError::VertexNotFound(id.to_string()))?;
		Ok(vertex.edges.iter().map(move |edge| Neighbor {
			id: self.id_of(edge.target),
			idx: edge.target,
			weight: edge.weight,
			style: &edge.style,
		}))
	}

	/// Whether a run holds the run lock.
	pub fn is_locked(&self) -> bool {
		self.active_run.is_some()
	}

	/// Run holding the lock, if any.
	pub fn active_run(&self) -> Option<RunId> {
		self.active_run
	}

	pub(crate) fn ensure_unlocked(&self, action: &str) -> Result<()> {
		if let Some(run) = self.active_run {
			warn!("rejected {action}: run {:?} holds the graph", run);
			return Err(GraphError::RunAlreadyActive);
		}
		Ok(())
	}

	/// Adds a vertex at `position`, or at a random point inside the bounds.
	pub fn create_vertex(&mut self, id: &str, position: Option<Position>) -> Result<VertexIdx> {
		self.ensure_unlocked("vertex creation")?;
		if self.contains(id) {
			return Err(GraphError::DuplicateVertex(id.to_string()));
		}
		Ok(self.insert_vertex(id, position))
	}

	fn insert_vertex(&mut self, id: &str, position: Option<Position>) -> VertexIdx {
		let pinned = position.is_some();
		let position = position.unwrap_or_else(|| self.random_position());
		let idx = VertexIdx(self.vertices.len());
		self.vertices.push(Vertex {
			id: id.to_string(),
			position,
			pinned,
			style: self.options.vertex.clone(),
			state: VisitState::Unvisited,
			highlight: None,
			edges: Vec::new(),
		});
		self.index.insert(id.to_string(), idx);
		idx
	}

	fn random_position(&mut self) -> Position {
		let Bounds { width, height } = self.bounds;
		let x = if width > 0.0 {
			self.rng.gen_range(0.0..width).floor()
		} else {
			0.0
		};
		let y = if height > 0.0 {
			self.rng.gen_range(0.0..height).floor()
		} else {
			0.0
		};
		Position::new(x, y)
	}

	/// Adds `source -> target`, creating missing endpoints. A missing target
	/// is placed at `target_position` when given. Undirected graphs also get
	/// the mirror arc; an already stored mirror takes the new weight and keeps
	/// its style. Direction is graph-wide, set by [`GraphOptions::directed`].
	pub fn add_edge(
		&mut self,
		source: &str,
		target: &str,
		weight: f64,
		target_position: Option<Position>,
	) -> Result<()> {
		self.ensure_unlocked("edge insertion")?;
		check_edge(source, target, weight)?;
		let source = self.get_or_insert(source, None);
		let target = self.get_or_insert(target, target_position);
		self.link(source, target, weight);
		Ok(())
	}

	/// Bulk [`add_edge`](Self::add_edge). Everything is validated before the
	/// first vertex is created; ids that already exist are reused.
	pub fn populate_from_adjacency(&mut self, data: &AdjacencyData) -> Result<()> {
		self.ensure_unlocked("population")?;
		for record in &data.records {
			for edge in &record.edges {
				check_edge(&record.id, &edge.target, edge.weight)?;
			}
		}

		for record in &data.records {
			let source = self.get_or_insert(&record.id, record.position);
			for edge in &record.edges {
				let target = self.get_or_insert(&edge.target, edge.position);
				self.link(source, target, edge.weight);
			}
		}
		debug!(
			"populated graph: {} vertices, {} arcs",
			self.vertices.len(),
			self.edge_count()
		);
		Ok(())
	}

	/// Parses a JSON payload and populates from it.
	pub fn populate_from_value(&mut self, value: &Value) -> Result<()> {
		let data = AdjacencyData::from_value(value)?;
		self.populate_from_adjacency(&data)
	}

	fn get_or_insert(&mut self, id: &str, position: Option<Position>) -> VertexIdx {
		match self.index_of(id) {
			Some(idx) => idx,
			None => self.insert_vertex(id, position),
		}
	}

	fn link(&mut self, source: VertexIdx, target: VertexIdx, weight: f64) {
		let style = self.options.edge.clone();
		let vertex = &mut self.vertices[source.0];
		match vertex.edge_slot(target) {
			Some(slot) => {
				vertex.edges[slot].weight = weight;
				vertex.edges[slot].style = style.clone();
			}
			None => vertex.edges.push(Edge {
				target,
				weight,
				style: style.clone(),
				highlighted: false,
			}),
		}

		if !self.options.directed {
			let mirror = &mut self.vertices[target.0];
			if let Some(slot) = mirror.edge_slot(source) {
				mirror.edges[slot].weight = weight;
			} else {
				mirror.edges.push(Edge {
					target: source,
					weight,
					style,
					highlighted: false,
				});
			}
		}
	}

	/// Puts every vertex back to [`VisitState::Unvisited`].
	pub fn reset_visit_state(&mut self) -> Result<()> {
		self.ensure_unlocked("visit state reset")?;
		self.clear_visit_state();
		Ok(())
	}

	/// Drops every run highlight from vertices and edges.
	pub fn clear_highlights(&mut self) -> Result<()> {
		self.ensure_unlocked("highlight reset")?;
		self.clear_run_highlights();
		Ok(())
	}

	/// First vertex whose hit box contains `position`.
	pub fn vertex_at(&self, position: Position) -> Option<VertexIdx> {
		self.vertices().find_map(|(idx, vertex)| {
			let reach = vertex.style.radius;
			let hit = (vertex.position.x - position.x).abs() <= reach
				&& (vertex.position.y - position.y).abs() <= reach;
			hit.then_some(idx)
		})
	}

	/// Vertex grabbed by the pointer.
	pub fn selected(&self) -> Option<VertexIdx> {
		self.selected
	}

	/// Marks `idx` as grabbed. Refused while locked.
	pub fn select(&mut self, idx: VertexIdx) -> Result<()> {
		self.ensure_unlocked("selection")?;
		self.checked(idx)?;
		self.selected = Some(idx);
		Ok(())
	}

	/// Releases the grabbed vertex.
	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// Drags one vertex to `position`. The vertex becomes pinned.
	pub fn move_vertex(&mut self, idx: VertexIdx, position: Position) -> Result<()> {
		self.ensure_unlocked("vertex move")?;
		self.checked(idx)?;
		let vertex = &mut self.vertices[idx.0];
		vertex.position = position;
		vertex.pinned = true;
		Ok(())
	}

	/// Pans the whole graph.
	pub fn translate(&mut self, dx: f64, dy: f64) -> Result<()> {
		self.ensure_unlocked("pan")?;
		for vertex in &mut self.vertices {
			vertex.position.x += dx;
			vertex.position.y += dy;
		}
		Ok(())
	}

	/// Adopts `bounds`, scaling every position proportionally.
	pub fn rescale(&mut self, bounds: Bounds) -> Result<()> {
		self.ensure_unlocked("rescale")?;
		let old = self.bounds;
		if old.width > 0.0 && old.height > 0.0 {
			for vertex in &mut self.vertices {
				vertex.position.x = vertex.position.x / old.width * bounds.width;
				vertex.position.y = vertex.position.y / old.height * bounds.height;
			}
		}
		self.bounds = bounds;
		Ok(())
	}

	/// Brings out-of-bounds vertices `margin` inside the nearest edge.
	pub fn fit_to_bounds(&mut self, margin: f64) -> Result<()> {
		self.ensure_unlocked("fit")?;
		let Bounds { width, height } = self.bounds;
		for vertex in &mut self.vertices {
			let position = &mut vertex.position;
			if position.x < 0.0 {
				position.x = margin;
			} else if position.x > width {
				position.x = width - margin;
			}
			if position.y < 0.0 {
				position.y = margin;
			} else if position.y > height {
				position.y = height - margin;
			}
		}
		Ok(())
	}

	/// Redraws everything: edges first, then vertices on top.
	pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
		renderer.clear();
		for vertex in &self.vertices {
			for edge in &vertex.edges {
				let target = self.vertices[edge.target.0].position;
				renderer.draw_edge(
					edge.weight,
					vertex.position,
					target,
					&edge.style.with_overlay(edge.highlighted),
					self.options.directed,
				);
			}
		}
		for (idx, vertex) in self.vertices() {
			let style = vertex
				.style
				.with_overlay(vertex.highlight, self.selected == Some(idx));
			renderer.draw_vertex(&vertex.id, vertex.position, &style);
		}
	}

	fn checked(&self, idx: VertexIdx) -> Result<&Vertex> {
		self.vertex(idx)
			.ok_or_else(|| GraphError::VertexNotFound(idx.to_string()))
	}

	pub(crate) fn acquire_lock(&mut self, run: RunId) -> Result<()> {
		if self.active_run.is_some() {
			return Err(GraphError::RunAlreadyActive);
		}
		self.active_run = Some(run);
		self.selected = None;
		Ok(())
	}

	pub(crate) fn release_lock(&mut self, run: RunId) {
		if self.active_run == Some(run) {
			self.active_run = None;
		}
	}

	pub(crate) fn set_directed(&mut self, directed: bool) {
		self.options.directed = directed;
	}

	pub(crate) fn clear_visit_state(&mut self) {
		for vertex in &mut self.vertices {
			vertex.state = VisitState::Unvisited;
		}
	}

	pub(crate) fn clear_run_highlights(&mut self) {
		for vertex in &mut self.vertices {
			vertex.highlight = None;
			for edge in &mut vertex.edges {
				edge.highlighted = false;
			}
		}
	}

	pub(crate) fn state(&self, idx: VertexIdx) -> VisitState {
		self.vertices[idx.0].state
	}

	pub(crate) fn set_state(&mut self, idx: VertexIdx, state: VisitState) {
		self.vertices[idx.0].state = state;
	}

	pub(crate) fn set_highlight(&mut self, idx: VertexIdx, highlight: VertexHighlight) {
		self.vertices[idx.0].highlight = Some(highlight);
	}

	pub(crate) fn edge_at(&self, source: VertexIdx, slot: usize) -> Option<&Edge> {
		self.vertices[source.0].edges.get(slot)
	}

	pub(crate) fn highlight_edge_at(&mut self, source: VertexIdx, slot: usize) {
		if let Some(edge) = self.vertices[source.0].edges.get_mut(slot) {
			edge.highlighted = true;
		}
	}

	/// Highlights `a -> b` and `b -> a`, whichever are stored.
	pub(crate) fn highlight_between(&mut self, a: VertexIdx, b: VertexIdx) {
		for (from, to) in [(a, b), (b, a)] {
			if let Some(slot) = self.vertices[from.0].edge_slot(to) {
				self.vertices[from.0].edges[slot].highlighted = true;
			}
		}
	}

	pub(crate) fn positions(&self) -> Vec<Position> {
		self.vertices.iter().map(|vertex| vertex.position).collect()
	}

	/// Writes back layout output, skipping pinned vertices.
	pub(crate) fn apply_positions(&mut self, positions: &[Position]) -> Result<()> {
		self.ensure_unlocked("layout")?;
		for (vertex, &position) in self.vertices.iter_mut().zip(positions) {
			if !vertex.pinned {
				vertex.position = position;
			}
		}
		Ok(())
	}
}

fn check_edge(source: &str, target: &str, weight: f64) -> Result<()> {
	if source == target {
		return Err(GraphError::SelfLoop(source.to_string()));
	}
	if !weight.is_finite() || weight <= 0.0 {
		return Err(GraphError::InvalidWeight {
			from: source.to_string(),
			to: target.to_string(),
			weight,
		});
	}
	Ok(())
}
