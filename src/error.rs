//! Errors raised by the graph engine.

use thiserror::Error;

/// Everything that can go wrong when building a graph or starting a run.
///
/// All of these are raised before any state is touched, so a failed call
/// never leaves a partially mutated graph behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
	/// An algorithm or lookup named a vertex the graph does not contain.
	#[error("vertex `{0}` is not in the graph")]
	VertexNotFound(String),

	/// The ingestion payload does not have the adjacency-list shape.
	#[error("invalid adjacency data: {0}")]
	InvalidSourceData(String),

	/// Low-level vertex creation was asked to create an existing id.
	#[error("vertex `{0}` already exists")]
	DuplicateVertex(String),

	/// The run lock is held by another run.
	#[error("an algorithm run is already active on this graph")]
	RunAlreadyActive,

	/// An algorithm name that does not map to a known kind.
	#[error("unknown algorithm `{0}`")]
	UnknownAlgorithm(String),

	/// An edge from a vertex to itself.
	#[error("self-loop on vertex `{0}` is not supported")]
	SelfLoop(String),

	/// Edge weights must be finite and strictly positive.
	#[error("edge `{from}` -> `{to}` has invalid weight {weight}")]
	InvalidWeight {
		/// Source vertex id.
		from: String,
		/// Target vertex id.
		to: String,
		/// The rejected weight.
		weight: f64,
	},
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
