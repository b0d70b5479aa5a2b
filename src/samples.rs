//! Demo graphs shown on the home page.

use crate::graph::{AdjacencyData, VertexRecord};

/// Seven people and who they infect, for the traversal demos.
pub fn disease_spread() -> AdjacencyData {
	AdjacencyData::new()
		.with(VertexRecord::new("a").edge("b", 1.0).edge("d", 6.0).edge("e", 2.0).edge("f", 3.0))
		.with(VertexRecord::new("b").edge("c", 7.0).edge("e", 5.0).edge("f", 1.0))
		.with(VertexRecord::new("c").edge("e", 9.0))
		.with(VertexRecord::new("d").edge("f", 2.0))
		.with(VertexRecord::new("g").edge("b", 6.0))
}

/// Binary-ish tree with fixed positions.
pub fn tree() -> AdjacencyData {
	AdjacencyData::new()
		.with(
			VertexRecord::new("a")
				.at(100.0, 10.0)
				.edge_at("b", 6.0, 50.0, 20.0)
				.edge_at("c", 3.0, 150.0, 20.0),
		)
		.with(VertexRecord::new("b").edge_at("d", 3.0, 30.0, 50.0).edge_at("e", 20.0, 70.0, 50.0))
		.with(VertexRecord::new("c").edge_at("f", 4.0, 130.0, 50.0).edge_at("g", 20.0, 170.0, 50.0))
		.with(VertexRecord::new("d").edge_at("h", 10.0, 20.0, 70.0).edge_at("i", 1.0, 40.0, 70.0))
		.with(VertexRecord::new("g").edge_at("j", 1.0, 190.0, 80.0))
		.with(VertexRecord::new("j").edge_at("k", 3.0, 220.0, 100.0))
}

/// Ten vertices with many competing weights, for the spanning-tree demos.
pub fn spanning_tree() -> AdjacencyData {
	AdjacencyData::new()
		.with(
			VertexRecord::new("a")
				.at(20.0, 150.0)
				.edge_at("b", 3.0, 50.0, 130.0)
				.edge_at("d", 6.0, 60.0, 70.0)
				.edge_at("e", 9.0, 200.0, 200.0),
		)
		.with(
			VertexRecord::new("b")
				.edge_at("c", 2.0, 80.0, 100.0)
				.edge_at("d", 4.0, 60.0, 70.0)
				.edge_at("e", 9.0, 200.0, 200.0)
				.edge_at("f", 9.0, 210.0, 150.0),
		)
		.with(
			VertexRecord::new("c")
				.edge_at("d", 2.0, 60.0, 70.0)
				.edge_at("g", 9.0, 210.0, 20.0)
				.edge_at("f", 8.0, 210.0, 150.0),
		)
		.with(VertexRecord::new("d").edge_at("g", 9.0, 210.0, 20.0))
		.with(VertexRecord::new("e").edge_at("f", 8.0, 210.0, 150.0).edge_at("j", 18.0, 300.0, 50.0))
		.with(
			VertexRecord::new("f")
				.edge_at("g", 7.0, 210.0, 20.0)
				.edge_at("i", 9.0, 260.0, 50.0)
				.edge_at("j", 10.0, 300.0, 50.0),
		)
		.with(VertexRecord::new("g").edge_at("h", 4.0, 260.0, 20.0).edge_at("i", 5.0, 260.0, 50.0))
		.with(VertexRecord::new("h").edge_at("i", 1.0, 260.0, 50.0).edge_at("j", 13.0, 300.0, 50.0))
		.with(VertexRecord::new("i").edge_at("j", 3.0, 300.0, 50.0))
}

/// A long infection chain `a -> b -> ... -> z` through doubled letters.
pub fn large_disease_chain() -> AdjacencyData {
	let mut ids: Vec<String> = ('a'..='y').map(String::from).collect();
	ids.extend(('a'..='y').map(|c| format!("{c}{c}")));
	ids.push("z".into());

	ids.windows(2).fold(AdjacencyData::new(), |data, pair| {
		data.with(VertexRecord::new(pair[0].as_str()).edge(pair[1].as_str(), 1.0))
	})
}
