//! Eades spring-embedder layout.
//!
//! Adjacent vertices pull on each other with a spring whose force grows with
//! the log of their distance over the edge weight; every other pair repels
//! with inverse-square strength. Forces for one iteration are computed from
//! the positions at the start of that iteration and applied together.

use std::collections::HashMap;

use log::debug;

use crate::error::Result;
use crate::graph::{GraphModel, Position};

/// Tuning constants for [`LayoutEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Number of simultaneous-update rounds.
	pub iterations: usize,
	/// Spring constant.
	pub spring: f64,
	/// Repulsion constant.
	pub repulsion: f64,
	/// Fraction of the summed force applied per iteration.
	pub damping: f64,
	/// Pixels per unit of edge weight; forces are computed in those units.
	pub length_scale: f64,
	/// Largest move of a single vertex in one iteration, in pixels.
	pub max_step: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			iterations: 100,
			spring: 2.0,
			repulsion: 1.0,
			damping: 0.1,
			length_scale: 20.0,
			max_step: 30.0,
		}
	}
}

const MIN_DISTANCE: f64 = 1e-6;

/// Force-directed placement for unpinned vertices.
pub struct LayoutEngine {
	config: LayoutConfig,
}

impl Default for LayoutEngine {
	fn default() -> Self {
		Self::new(LayoutConfig::default())
	}
}

impl LayoutEngine {
	/// Engine with `config`.
	pub fn new(config: LayoutConfig) -> Self {
		Self { config }
	}

	/// Current tuning.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Lays out every unpinned vertex of `graph`. Refused while a run holds
	/// the graph.
	pub fn apply(&self, graph: &mut GraphModel) -> Result<()> {
		graph.ensure_unlocked("layout")?;
		let pinned: Vec<bool> = graph.vertices().map(|(_, vertex)| vertex.is_pinned()).collect();
		let springs = springs(graph);
		let mut positions = graph.positions();

		for _ in 0..self.config.iterations {
			let moves = self.displacements(&positions, &springs);
			for ((position, delta), &pinned) in positions.iter_mut().zip(moves).zip(&pinned) {
				if !pinned {
					position.x += delta.x;
					position.y += delta.y;
				}
			}
		}

		debug!(
			"layout: {} iterations over {} vertices",
			self.config.iterations,
			positions.len()
		);
		graph.apply_positions(&positions)
	}

	/// Pixel displacement of every vertex for one iteration.
	fn displacements(&self, positions: &[Position], springs: &HashMap<(usize, usize), f64>) -> Vec<Position> {
		let scale = self.config.length_scale;
		positions
			.iter()
			.enumerate()
			.map(|(v, &pv)| {
				let mut force = Position::default();
				for (u, &pu) in positions.iter().enumerate() {
					if u == v {
						continue;
					}
					let distance = pv.distance(pu) / scale;
					if distance < MIN_DISTANCE {
						continue;
					}
					let (ux, uy) = ((pu.x - pv.x) / scale / distance, (pu.y - pv.y) / scale / distance);
					let magnitude = match springs.get(&(v.min(u), v.max(u))) {
						Some(&weight) => self.config.spring * (distance / weight).log10(),
						None => -self.config.repulsion / (distance * distance),
					};
					force.x += magnitude * ux;
					force.y += magnitude * uy;
				}
				self.clamp(Position::new(
					force.x * self.config.damping * scale,
					force.y * self.config.damping * scale,
				))
			})
			.collect()
	}

	fn clamp(&self, delta: Position) -> Position {
		let length = delta.x.hypot(delta.y);
		if length <= self.config.max_step || length == 0.0 {
			return delta;
		}
		let factor = self.config.max_step / length;
		Position::new(delta.x * factor, delta.y * factor)
	}
}

/// Undirected adjacency keyed by `(min, max)` index, keeping the lighter
/// weight when both directions are stored.
fn springs(graph: &GraphModel) -> HashMap<(usize, usize), f64> {
	let mut springs = HashMap::new();
	for (source, target, weight) in graph.edges() {
		let (a, b) = (source.index(), target.index());
		springs
			.entry((a.min(b), a.max(b)))
			.and_modify(|current: &mut f64| *current = current.min(weight))
			.or_insert(weight);
	}
	springs
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::error::GraphError;
	use crate::graph::{GraphOptions, RunId};

	fn pair(data: serde_json::Value) -> GraphModel {
		let mut graph = GraphModel::with_seed(GraphOptions::undirected(), 3);
		graph.populate_from_value(&data).unwrap();
		graph
	}

	#[test]
	fn is_deterministic() {
		let data = json!({ "a": [{ "b": [2], "c": [3] }], "b": [{ "d": [1] }] });
		let mut first = pair(data.clone());
		let mut second = pair(data);
		LayoutEngine::default().apply(&mut first).unwrap();
		LayoutEngine::default().apply(&mut second).unwrap();
		assert_eq!(first.positions(), second.positions());
	}

	#[test]
	fn springs_pull_and_strangers_push() {
		let mut graph = GraphModel::with_seed(GraphOptions::undirected(), 3);
		graph.create_vertex("a", None).unwrap();
		graph.create_vertex("b", None).unwrap();
		graph.create_vertex("c", None).unwrap();
		graph.create_vertex("d", None).unwrap();
		graph.add_edge("a", "b", 1.0, None).unwrap();

		let a = graph.index_of("a").unwrap();
		let b = graph.index_of("b").unwrap();
		let c = graph.index_of("c").unwrap();
		let d = graph.index_of("d").unwrap();
		let far = 600.0;
		let mut positions = graph.positions();
		positions[a.index()] = Position::new(0.0, 0.0);
		positions[b.index()] = Position::new(far, 0.0);
		positions[c.index()] = Position::new(0.0, 300.0);
		positions[d.index()] = Position::new(5.0, 300.0);

		let engine = LayoutEngine::default();
		let moves = engine.displacements(&positions, &springs(&graph));
		assert!(moves[a.index()].x > 0.0);
		assert!(moves[b.index()].x < 0.0);
		assert!(moves[c.index()].x < 0.0);
		assert!(moves[d.index()].x > 0.0);
	}

	#[test]
	fn forces_apply_simultaneously() {
		let mut graph = pair(json!({ "a": [{ "b": [1] }] }));
		let a = graph.index_of("a").unwrap();
		let b = graph.index_of("b").unwrap();
		let before = graph.positions();
		let midpoint = Position::new(
			(before[a.index()].x + before[b.index()].x) / 2.0,
			(before[a.index()].y + before[b.index()].y) / 2.0,
		);

		LayoutEngine::new(LayoutConfig {
			iterations: 5,
			..LayoutConfig::default()
		})
		.apply(&mut graph)
		.unwrap();

		let after = graph.positions();
		let moved = Position::new(
			(after[a.index()].x + after[b.index()].x) / 2.0,
			(after[a.index()].y + after[b.index()].y) / 2.0,
		);
		assert!((moved.x - midpoint.x).abs() < 1e-9);
		assert!((moved.y - midpoint.y).abs() < 1e-9);
	}

	#[test]
	fn pinned_vertices_stay_put() {
		let mut graph = pair(json!({ "a": [{ "b": [1], "c": [1] }, 400, 300] }));
		LayoutEngine::default().apply(&mut graph).unwrap();
		assert_eq!(graph.vertex_by_id("a").unwrap().position(), Position::new(400.0, 300.0));
	}

	#[test]
	fn refused_while_locked() {
		let mut graph = pair(json!({ "a": [{ "b": [1] }] }));
		let before = graph.positions();
		graph.acquire_lock(RunId(9)).unwrap();
		assert_eq!(
			LayoutEngine::default().apply(&mut graph),
			Err(GraphError::RunAlreadyActive)
		);
		assert_eq!(graph.positions(), before);
	}
}
