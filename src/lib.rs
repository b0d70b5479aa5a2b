//! Step-by-step graph algorithm visualizer.
//!
//! The engine ([`graph`], [`algorithms`], [`runner`]) is plain Rust and runs
//! anywhere; the Leptos client-side app draws it onto canvases.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod algorithms;
pub mod collections;
pub mod error;
pub mod graph;
pub mod layout;
pub mod runner;
pub mod samples;

mod components;
mod pages;

pub use algorithms::{Algorithm, AlgorithmKind, Step, Trace, TreeEdge};
pub use error::{GraphError, Result};
pub use graph::{AdjacencyData, GraphModel, GraphOptions, Position, VisitState};
pub use layout::{LayoutConfig, LayoutEngine};
pub use runner::{AlgorithmRunner, AnimationScheduler, Run, RunHandle, RunStatus, SchedulerConfig};

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the demo page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="Graph algorithms, step by step" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
