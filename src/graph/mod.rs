//! The mutable adjacency-list graph the runners and renderer work on.

mod adjacency;
mod model;
pub mod style;
mod types;

pub use adjacency::{AdjacencyData, EdgeRecord, VertexRecord};
pub use model::{GraphModel, Neighbor};
pub use style::{EdgeStyle, GraphOptions, VertexHighlight, VertexStyle};
pub use types::{Bounds, Edge, Position, RunId, Vertex, VertexIdx, VisitState};
