use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::clock::BrowserClock;
use super::render::CanvasRenderer;
use super::state::CanvasState;
use crate::algorithms::AlgorithmKind;
use crate::graph::{AdjacencyData, Bounds, GraphOptions, Position};
use crate::runner::{AnimationScheduler, SchedulerConfig};

/// Laid-out size of the canvas element, if it has one.
fn measure(canvas: &HtmlCanvasElement) -> Option<Bounds> {
	let (width, height) = (canvas.offset_width() as f64, canvas.offset_height() as f64);
	(width > 0.0 && height > 0.0).then_some(Bounds { width, height })
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Position {
	let rect = canvas.get_bounding_client_rect();
	Position::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// One graph on a canvas, with a button per algorithm.
///
/// Pressing the canvas while an algorithm plays cancels it. Otherwise a
/// press grabs a vertex or pans the graph.
#[component]
pub fn GraphCanvas(
	data: AdjacencyData,
	#[prop(into)] title: String,
	#[prop(default = GraphOptions::default())] options: GraphOptions,
	#[prop(default = AlgorithmKind::ALL.to_vec())] algorithms: Vec<AlgorithmKind>,
	#[prop(into, default = "a".into())] source: String,
	#[prop(default = 600.0)] width: f64,
	#[prop(default = 400.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let renderer: Rc<RefCell<Option<CanvasRenderer>>> = Rc::new(RefCell::new(None));
	let size = Rc::new(Cell::new(Bounds { width, height }));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (status, set_status) = signal(String::new());

	let redraw: Rc<dyn Fn()> = {
		let (state, renderer) = (state.clone(), renderer.clone());
		Rc::new(move || {
			if let (Some(s), Some(r)) = (state.borrow().as_ref(), renderer.borrow_mut().as_mut()) {
				s.graph().borrow().draw(r);
			}
		})
	};

	let (state_init, renderer_init, size_init, redraw_init) =
		(state.clone(), renderer.clone(), size.clone(), redraw.clone());
	let (resize_cb_init, title_init) = (resize_cb.clone(), title.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let bounds = measure(&canvas).unwrap_or(Bounds { width, height });
		canvas.set_width(bounds.width as u32);
		canvas.set_height(bounds.height as u32);
		size_init.set(bounds);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			error!("{title_init}: canvas has no 2d context");
			return;
		};

		let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
		match CanvasState::new(&data, options.clone(), seed, bounds.width, bounds.height) {
			Ok(s) => {
				let mut r = CanvasRenderer::new(ctx, size_init.clone(), s.pointer.clone());
				s.graph().borrow().draw(&mut r);
				info!("{title_init}: {} vertices", s.graph().borrow().len());
				*renderer_init.borrow_mut() = Some(r);
				*state_init.borrow_mut() = Some(s);
			}
			Err(err) => {
				error!("{title_init}: {err}");
				set_status.set(err.to_string());
				return;
			}
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let (state_resize, size_resize, redraw_resize) =
			(state_init.clone(), size_init.clone(), redraw_init.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(bounds) = measure(&canvas) else {
				return;
			};
			if bounds == size_resize.get() {
				return;
			}
			canvas.set_width(bounds.width as u32);
			canvas.set_height(bounds.height as u32);
			size_resize.set(bounds);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(bounds);
			}
			redraw_resize();
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	let start: Rc<dyn Fn(AlgorithmKind)> = {
		let (state, renderer, redraw) = (state.clone(), renderer.clone(), redraw.clone());
		Rc::new(move |kind| {
			let Some(runner) = state.borrow().as_ref().map(|s| s.runner.clone()) else {
				return;
			};
			let Some(mut renderer) = renderer.borrow().clone() else {
				return;
			};
			match runner.start(kind, &source) {
				Ok(run) => {
					set_status.set(format!("{kind} from {source}"));
					let (state, redraw) = (state.clone(), redraw.clone());
					spawn_local(async move {
						let scheduler =
							AnimationScheduler::new(BrowserClock, SchedulerConfig::default());
						let outcome = runner.animate(run, &scheduler, &mut renderer).await;
						set_status.set(format!("{kind} {outcome:?}"));
						if let Some(ref mut s) = *state.borrow_mut() {
							s.apply_pending_resize();
						}
						redraw();
					});
				}
				Err(err) => {
					warn!("{kind}: {err}");
					set_status.set(err.to_string());
				}
			}
		})
	};

	let (state_md, redraw_md) = (state.clone(), redraw.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let at = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(at);
		}
		redraw_md();
	};

	let (state_mm, redraw_mm) = (state.clone(), redraw.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let at = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(at);
		}
		redraw_mm();
	};

	let (state_mu, redraw_mu) = (state.clone(), redraw.clone());
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
		redraw_mu();
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_up();
		}
		redraw();
	};

	view! {
		<section class="graph-demo">
			<h2>{title}</h2>
			<ul class="graph-algorithms">
				{algorithms
					.into_iter()
					.map(|kind| {
						let start = start.clone();
						view! {
							<li>
								<button on:click=move |_| start(kind)>{kind.label()}</button>
							</li>
						}
					})
					.collect_view()}
			</ul>
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style=format!(
					"display: block; width: 100%; max-width: {width}px; height: {height}px; cursor: grab; border: 1px solid #ccc;",
				)
			/>
			<p class="graph-status">{move || status.get()}</p>
		</section>
	}
}
