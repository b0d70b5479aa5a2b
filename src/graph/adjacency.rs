//! The adjacency-list interchange format.
//!
//! A payload maps each vertex id to `[edges, x?, y?]`, where `edges` maps a
//! neighbor id to `[weight, x?, y?]`:
//!
//! ```json
//! { "a": [{ "b": [6, 50, 20], "c": [3] }, 100, 10], "b": [{ "d": [3] }] }
//! ```
//!
//! Positions are optional; a vertex without both coordinates is placed at
//! random. Key order is preserved and becomes the traversal tie-break order.

use serde_json::{Map, Value};

use super::types::Position;
use crate::error::{GraphError, Result};

/// One neighbor entry of a [`VertexRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
	/// Target vertex id.
	pub target: String,
	/// Edge weight.
	pub weight: f64,
	/// Placement hint for the target if it has to be created.
	pub position: Option<Position>,
}

/// One top-level entry of an [`AdjacencyData`] payload.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexRecord {
	/// Source vertex id.
	pub id: String,
	/// Outgoing edges in key order.
	pub edges: Vec<EdgeRecord>,
	/// Placement hint, used only if the vertex is created here.
	pub position: Option<Position>,
}

impl VertexRecord {
	/// Record for `id` with no edges and no position.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			edges: Vec::new(),
			position: None,
		}
	}

	/// Sets the position hint.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.position = Some(Position::new(x, y));
		self
	}

	/// Adds an edge.
	pub fn edge(mut self, target: impl Into<String>, weight: f64) -> Self {
		self.edges.push(EdgeRecord {
			target: target.into(),
			weight,
			position: None,
		});
		self
	}

	/// Adds an edge whose target is placed at `(x, y)` if it is new.
	pub fn edge_at(mut self, target: impl Into<String>, weight: f64, x: f64, y: f64) -> Self {
		self.edges.push(EdgeRecord {
			target: target.into(),
			weight,
			position: Some(Position::new(x, y)),
		});
		self
	}
}

/// Ordered adjacency-list payload accepted by
/// [`GraphModel::populate_from_adjacency`](super::GraphModel::populate_from_adjacency).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyData {
	/// Vertex records in insertion order.
	pub records: Vec<VertexRecord>,
}

impl AdjacencyData {
	/// Empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a record.
	pub fn with(mut self, record: VertexRecord) -> Self {
		self.records.push(record);
		self
	}

	/// Parses a JSON document in the interchange format.
	pub fn from_json_str(input: &str) -> Result<Self> {
		let value: Value = serde_json::from_str(input)
			.map_err(|err| GraphError::InvalidSourceData(err.to_string()))?;
		Self::from_value(&value)
	}

	/// Validates and converts an already parsed JSON value.
	pub fn from_value(value: &Value) -> Result<Self> {
		let Value::Object(vertices) = value else {
			return Err(invalid(
				"expected an object mapping vertex ids to `[edges, x?, y?]`",
			));
		};

		let mut records = Vec::with_capacity(vertices.len());
		for (id, record) in vertices {
			let Some(parts) = record.as_array() else {
				return Err(invalid(format!("`{id}`: expected `[edges, x?, y?]`")));
			};
			let Some(Value::Object(edges)) = parts.first() else {
				return Err(invalid(format!("`{id}`: first element must be an edge map")));
			};
			let position = position_hint(&parts[1..])
				.map_err(|what| invalid(format!("`{id}`: {what}")))?;
			records.push(VertexRecord {
				id: id.clone(),
				edges: edge_records(id, edges)?,
				position,
			});
		}
		Ok(Self { records })
	}

	/// Number of distinct vertex ids mentioned, as sources or targets.
	pub fn vertex_count(&self) -> usize {
		let mut seen: Vec<&str> = Vec::new();
		for record in &self.records {
			for id in std::iter::once(record.id.as_str())
				.chain(record.edges.iter().map(|edge| edge.target.as_str()))
			{
				if !seen.contains(&id) {
					seen.push(id);
				}
			}
		}
		seen.len()
	}
}

fn edge_records(source: &str, edges: &Map<String, Value>) -> Result<Vec<EdgeRecord>> {
	edges
		.iter()
		.map(|(target, entry)| {
			let context = |what: &str| invalid(format!("`{source}` -> `{target}`: {what}"));
			let Some(parts) = entry.as_array() else {
				return Err(context("expected `[weight, x?, y?]`"));
			};
			let Some(weight) = parts.first().and_then(Value::as_f64) else {
				return Err(context("weight must be a number"));
			};
			let position = position_hint(&parts[1..]).map_err(|what| context(what))?;
			Ok(EdgeRecord {
				target: target.clone(),
				weight,
				position,
			})
		})
		.collect()
}

/// Reads the optional trailing `x, y` pair. Both must be present for a hint.
fn position_hint(coords: &[Value]) -> std::result::Result<Option<Position>, &'static str> {
	let coord = |value: Option<&Value>| match value {
		None | Some(Value::Null) => Ok(None),
		Some(value) => value.as_f64().map(Some).ok_or("coordinates must be numbers"),
	};
	match (coord(coords.first())?, coord(coords.get(1))?) {
		(Some(x), Some(y)) => Ok(Some(Position::new(x, y))),
		_ => Ok(None),
	}
}

fn invalid(message: impl Into<String>) -> GraphError {
	GraphError::InvalidSourceData(message.into())
}
