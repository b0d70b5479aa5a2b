use leptos::prelude::*;

use crate::algorithms::AlgorithmKind;
use crate::components::graph_canvas::GraphCanvas;
use crate::graph::GraphOptions;
use crate::samples;

/// Demo page: one canvas per sample graph.
#[component]
pub fn Home() -> impl IntoView {
	let traversals = vec![AlgorithmKind::Bfs, AlgorithmKind::Dfs];
	let spanning = vec![AlgorithmKind::Prim, AlgorithmKind::Kruskal];

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="graph-page">
				<h1>"Graph algorithms, step by step"</h1>
				<p class="subtitle">
					"Pick an algorithm to watch it run from vertex a. Click the canvas to stop a run. Drag vertices to move them, drag the background to pan."
				</p>
				<GraphCanvas
					data=samples::disease_spread()
					title="Disease spread"
					algorithms=traversals.clone()
				/>
				<GraphCanvas data=samples::tree() title="Tree" algorithms=traversals />
				<GraphCanvas
					data=samples::spanning_tree()
					title="Minimum spanning tree"
					options=GraphOptions::undirected()
					algorithms=spanning
				/>
				<GraphCanvas
					data=samples::large_disease_chain()
					title="Long chain"
					width=900.0
					height=500.0
				/>
			</main>
		</ErrorBoundary>
	}
}
