//! Run lifecycle: the run lock, cancellation and the control API.

mod scheduler;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};

pub use scheduler::{AnimationScheduler, Clock, ImmediateClock, Renderer, SchedulerConfig};

use crate::algorithms::{Algorithm, AlgorithmKind, Step, Trace};
use crate::error::{GraphError, Result};
use crate::graph::{GraphModel, RunId};

/// Observable state of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
	/// No run has been started.
	Idle,
	/// Started and not yet finished.
	Running,
	/// Stopped early; visit state and highlights were cleared.
	Cancelled,
	/// Ran to the end; highlights stay on screen.
	Completed,
}

impl RunStatus {
	/// Whether the run has ended either way.
	pub fn is_finished(self) -> bool {
		matches!(self, RunStatus::Cancelled | RunStatus::Completed)
	}
}

#[derive(Debug)]
struct RunShared {
	id: RunId,
	kind: AlgorithmKind,
	status: Cell<RunStatus>,
	cancel_requested: Cell<bool>,
	report: RefCell<Option<Trace>>,
}

/// Cheap, clonable view of a run for whoever needs to watch or cancel it.
#[derive(Clone, Debug)]
pub struct RunHandle {
	shared: Rc<RunShared>,
}

impl RunHandle {
	/// Identity of the run.
	pub fn id(&self) -> RunId {
		self.shared.id
	}

	/// Algorithm being run.
	pub fn kind(&self) -> AlgorithmKind {
		self.shared.kind
	}

	pub fn status(&self) -> RunStatus {
		self.shared.status.get()
	}

	/// Asks the run to stop. Honored at the run's next step boundary.
	pub fn cancel(&self) {
		if self.status() == RunStatus::Running {
			self.shared.cancel_requested.set(true);
		}
	}

	/// Whether a cancel is waiting for the next step boundary.
	pub fn is_cancel_requested(&self) -> bool {
		self.shared.cancel_requested.get()
	}

	/// Trace of a finished run.
	pub fn report(&self) -> Option<Trace> {
		self.shared.report.borrow().clone()
	}
}

/// Outcome of one [`Run::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progress {
	/// A step boundary was reached.
	Stepped(Step),
	/// The run is over.
	Finished(RunStatus),
}

/// A started algorithm holding its graph's run lock.
///
/// Drive it with [`Run::advance`] (or an [`AnimationScheduler`]) until it
/// reports [`Progress::Finished`]; finishing releases the lock. A run dropped
/// before it finishes is cancelled on drop.
pub struct Run {
	handle: RunHandle,
	graph: Weak<RefCell<GraphModel>>,
	algorithm: Box<dyn Algorithm>,
	restore_directed: Option<bool>,
	steps: usize,
}

impl fmt::Debug for Run {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Run")
			.field("id", &self.handle.id())
			.field("kind", &self.handle.kind())
			.field("status", &self.handle.status())
			.field("steps", &self.steps)
			.finish()
	}
}

impl Run {
	/// Validates, takes the run lock and resets visit state. Nothing is
	/// touched if validation fails.
	fn start(
		shared: &Rc<RefCell<GraphModel>>,
		id: RunId,
		kind: AlgorithmKind,
		source: &str,
	) -> Result<Self> {
		let mut guard = shared.borrow_mut();
		let graph = &mut *guard;
		let Some(source_idx) = graph.index_of(source) else {
			warn!("{kind} rejected: unknown source `{source}`");
			return Err(GraphError::VertexNotFound(source.to_string()));
		};
		if graph.is_locked() {
			warn!("{kind} rejected: graph already has an active run");
			return Err(GraphError::RunAlreadyActive);
		}
		graph.acquire_lock(id)?;
		graph.clear_visit_state();
		graph.clear_run_highlights();

		let restore_directed = (kind.is_spanning_tree() && graph.is_directed()).then(|| {
			graph.set_directed(false);
			true
		});

		info!("run {:?}: {kind} from `{source}`", id);
		Ok(Self {
			handle: RunHandle {
				shared: Rc::new(RunShared {
					id,
					kind,
					status: Cell::new(RunStatus::Running),
					cancel_requested: Cell::new(false),
					report: RefCell::new(None),
				}),
			},
			graph: Rc::downgrade(shared),
			algorithm: kind.build(source_idx),
			restore_directed,
			steps: 0,
		})
	}

	/// Handle for watching or cancelling this run.
	pub fn handle(&self) -> RunHandle {
		self.handle.clone()
	}

	pub fn status(&self) -> RunStatus {
		self.handle.status()
	}

	/// What the algorithm has done so far.
	pub fn trace(&self) -> &Trace {
		self.algorithm.trace()
	}

	/// Step boundaries passed so far.
	pub fn steps(&self) -> usize {
		self.steps
	}

	/// Honors a pending cancellation, otherwise runs to the next step
	/// boundary.
	pub fn advance(&mut self, graph: &mut GraphModel) -> Progress {
		let status = self.status();
		if status != RunStatus::Running {
			return Progress::Finished(status);
		}
		if self.handle.is_cancel_requested() {
			return Progress::Finished(self.finish(graph, RunStatus::Cancelled));
		}
		match self.algorithm.step(graph) {
			Some(step) => {
				self.steps += 1;
				debug!("run {:?} step {}: {:?}", self.handle.id(), self.steps, step);
				Progress::Stepped(step)
			}
			None => Progress::Finished(self.finish(graph, RunStatus::Completed)),
		}
	}

	/// Cancels right away. Only possible between steps, which is the only
	/// time the caller can hold the run.
	pub fn cancel(&mut self, graph: &mut GraphModel) -> RunStatus {
		self.handle.cancel();
		match self.advance(graph) {
			Progress::Finished(status) => status,
			Progress::Stepped(_) => self.status(),
		}
	}

	/// Advances without pausing until the run finishes.
	pub fn run_to_end(&mut self, graph: &mut GraphModel) -> RunStatus {
		loop {
			if let Progress::Finished(status) = self.advance(graph) {
				return status;
			}
		}
	}

	fn finish(&mut self, graph: &mut GraphModel, status: RunStatus) -> RunStatus {
		graph.clear_visit_state();
		if status == RunStatus::Cancelled {
			graph.clear_run_highlights();
		}
		if let Some(directed) = self.restore_directed.take() {
			graph.set_directed(directed);
		}
		graph.release_lock(self.handle.id());

		let shared = &self.handle.shared;
		shared.status.set(status);
		shared.cancel_requested.set(false);
		*shared.report.borrow_mut() = Some(self.algorithm.trace().clone());
		info!(
			"run {:?}: {} {:?} after {} steps",
			shared.id, shared.kind, status, self.steps
		);
		status
	}
}

impl Drop for Run {
	fn drop(&mut self) {
		if self.status() != RunStatus::Running {
			return;
		}
		let Some(graph) = self.graph.upgrade() else {
			return;
		};
		match graph.try_borrow_mut() {
			Ok(mut graph) => {
				info!("run {:?}: dropped while running", self.handle.id());
				self.finish(&mut graph, RunStatus::Cancelled);
			}
			Err(_) => warn!(
				"run {:?}: dropped while its graph is borrowed, lock kept",
				self.handle.id()
			),
		}
	}
}

/// Control surface for one shared graph: start runs, cancel them, watch
/// their status.
pub struct AlgorithmRunner {
	graph: Rc<RefCell<GraphModel>>,
	next_id: Cell<u64>,
	current: RefCell<Option<RunHandle>>,
}

impl AlgorithmRunner {
	/// Runner for `graph`.
	pub fn new(graph: Rc<RefCell<GraphModel>>) -> Self {
		Self {
			graph,
			next_id: Cell::new(1),
			current: RefCell::new(None),
		}
	}

	/// The shared graph.
	pub fn graph(&self) -> &Rc<RefCell<GraphModel>> {
		&self.graph
	}

	/// Starts `kind` from `source`. A second run while one is active is
	/// rejected, not queued.
	pub fn start(&self, kind: AlgorithmKind, source: &str) -> Result<Run> {
		let id = RunId(self.next_id.get());
		let run = Run::start(&self.graph, id, kind, source)?;
		self.next_id.set(id.0 + 1);
		*self.current.borrow_mut() = Some(run.handle());
		Ok(run)
	}

	/// Like [`start`](Self::start), naming the algorithm as the controls do.
	pub fn start_named(&self, name: &str, source: &str) -> Result<Run> {
		self.start(name.parse()?, source)
	}

	/// Requests cancellation of `handle`.
	pub fn cancel(&self, handle: &RunHandle) {
		info!("run {:?}: cancel requested", handle.id());
		handle.cancel();
	}

	/// Cancels the most recent run if it is still going.
	pub fn cancel_current(&self) -> bool {
		match self.current() {
			Some(handle) if handle.status() == RunStatus::Running => {
				self.cancel(&handle);
				true
			}
			_ => false,
		}
	}

	/// Handle of the most recent run.
	pub fn current(&self) -> Option<RunHandle> {
		self.current.borrow().clone()
	}

	/// Status of the most recent run, `Idle` before the first one.
	pub fn status(&self) -> RunStatus {
		self.current()
			.map(|handle| handle.status())
			.unwrap_or(RunStatus::Idle)
	}

	/// Plays `run` through `scheduler`, redrawing on `renderer`.
	pub async fn animate<C, R>(&self, run: Run, scheduler: &AnimationScheduler<C>, renderer: &mut R) -> RunStatus
	where
		C: Clock,
		R: Renderer + ?Sized,
	{
		scheduler.drive(&self.graph, run, renderer).await
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::graph::{GraphOptions, Position, VisitState};

	fn shared(options: GraphOptions, data: serde_json::Value) -> Rc<RefCell<GraphModel>> {
		let mut graph = GraphModel::new(options);
		graph.populate_from_value(&data).unwrap();
		Rc::new(RefCell::new(graph))
	}

	#[test]
	fn unknown_source_touches_nothing() {
		let graph = shared(GraphOptions::default(), json!({ "a": [{ "b": [1] }] }));
		let runner = AlgorithmRunner::new(graph.clone());
		for kind in AlgorithmKind::ALL {
			assert_eq!(
				runner.start(kind, "nonexistent").unwrap_err(),
				GraphError::VertexNotFound("nonexistent".into())
			);
		}
		let graph = graph.borrow();
		assert!(!graph.is_locked());
		assert!(graph.vertices().all(|(_, v)| v.state() == VisitState::Unvisited));
		assert_eq!(runner.status(), RunStatus::Idle);
	}

	#[test]
	fn second_run_is_rejected_while_active() {
		let graph = shared(GraphOptions::default(), json!({ "a": [{ "b": [1] }] }));
		let runner = AlgorithmRunner::new(graph.clone());
		let mut run = runner.start(AlgorithmKind::Bfs, "a").unwrap();
		assert_eq!(
			runner.start(AlgorithmKind::Dfs, "a").unwrap_err(),
			GraphError::RunAlreadyActive
		);

		assert_eq!(run.run_to_end(&mut graph.borrow_mut()), RunStatus::Completed);
		assert!(runner.start(AlgorithmKind::Dfs, "a").is_ok());
	}

	#[test]
	fn completion_resets_state_but_keeps_highlights() {
		let graph = shared(GraphOptions::default(), json!({ "a": [{ "b": [1], "c": [1] }] }));
		let runner = AlgorithmRunner::new(graph.clone());
		let mut run = runner.start(AlgorithmKind::Bfs, "a").unwrap();
		let handle = run.handle();
		run.run_to_end(&mut graph.borrow_mut());

		assert_eq!(handle.status(), RunStatus::Completed);
		let report = handle.report().unwrap();
		assert_eq!(report.discovered_ids(&graph.borrow()), vec!["a", "b", "c"]);

		let graph = graph.borrow();
		assert!(!graph.is_locked());
		assert!(graph.vertices().all(|(_, v)| v.state() == VisitState::Unvisited));
		assert!(graph.vertices().all(|(_, v)| v.highlight().is_some()));
	}

	#[test]
	fn cancel_takes_effect_at_the_next_boundary() {
		let graph = shared(
			GraphOptions::default(),
			json!({ "a": [{ "b": [1], "c": [1] }], "b": [{ "d": [1] }] }),
		);
		let runner = AlgorithmRunner::new(graph.clone());
		let mut run = runner.start(AlgorithmKind::Bfs, "a").unwrap();
		let handle = run.handle();

		run.advance(&mut graph.borrow_mut());
		run.advance(&mut graph.borrow_mut());
		assert!(runner.cancel_current());
		assert_eq!(handle.status(), RunStatus::Running);
		assert!(graph.borrow().is_locked());

		assert_eq!(
			run.advance(&mut graph.borrow_mut()),
			Progress::Finished(RunStatus::Cancelled)
		);
		assert_eq!(runner.status(), RunStatus::Cancelled);
		assert_eq!(run.steps(), 2);
		{
			let graph = graph.borrow();
			assert!(!graph.is_locked());
			assert!(graph.vertices().all(|(_, v)| v.state() == VisitState::Unvisited));
			assert!(graph.vertices().all(|(_, v)| v.highlight().is_none()));
		}
		assert_eq!(
			run.advance(&mut graph.borrow_mut()),
			Progress::Finished(RunStatus::Cancelled)
		);
	}

	#[test]
	fn spanning_tree_runs_restore_direction() {
		let graph = shared(GraphOptions::default(), json!({ "a": [{ "b": [1] }] }));
		let runner = AlgorithmRunner::new(graph.clone());
		let mut run = runner.start_named("mstkruskal", "a").unwrap();
		assert!(!graph.borrow().is_directed());
		run.run_to_end(&mut graph.borrow_mut());
		assert!(graph.borrow().is_directed());

		let mut run = runner.start(AlgorithmKind::Prim, "a").unwrap();
		assert!(!graph.borrow().is_directed());
		assert_eq!(run.cancel(&mut graph.borrow_mut()), RunStatus::Cancelled);
		assert!(graph.borrow().is_directed());
	}

	#[test]
	fn dropping_an_unfinished_run_cancels_it() {
		let graph = shared(GraphOptions::default(), json!({ "a": [{ "b": [1], "c": [1] }] }));
		let runner = AlgorithmRunner::new(graph.clone());
		let mut run = runner.start(AlgorithmKind::Bfs, "a").unwrap();
		let handle = run.handle();
		run.advance(&mut graph.borrow_mut());
		drop(run);

		runner.cancel(&handle);
		assert_eq!(handle.status(), RunStatus::Cancelled);
		{
			let graph = graph.borrow();
			assert!(!graph.is_locked());
			assert!(graph.vertices().all(|(_, v)| v.state() == VisitState::Unvisited));
		}
		let b = graph.borrow().index_of("b").unwrap();
		assert!(graph.borrow_mut().move_vertex(b, Position::new(1.0, 1.0)).is_ok());
		assert!(runner.start(AlgorithmKind::Dfs, "a").is_ok());
	}

	#[test]
	fn dropping_a_finished_run_changes_nothing() {
		let graph = shared(GraphOptions::default(), json!({ "a": [{ "b": [1] }] }));
		let runner = AlgorithmRunner::new(graph.clone());
		let mut run = runner.start(AlgorithmKind::Bfs, "a").unwrap();
		let handle = run.handle();
		run.run_to_end(&mut graph.borrow_mut());
		drop(run);
		assert_eq!(handle.status(), RunStatus::Completed);
		assert!(graph.borrow().vertices().all(|(_, v)| v.highlight().is_some()));
	}

	#[test]
	fn unknown_names_are_typed_errors() {
		let graph = shared(GraphOptions::default(), json!({ "a": [{ "b": [1] }] }));
		let runner = AlgorithmRunner::new(graph);
		assert_eq!(
			runner.start_named("topo", "a").unwrap_err(),
			GraphError::UnknownAlgorithm("topo".into())
		);
	}
}
