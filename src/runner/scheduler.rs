use std::cell::RefCell;
use std::future::{Future, Ready, ready};
use std::time::Duration;

use super::{Progress, Run, RunStatus};
use crate::graph::{EdgeStyle, GraphModel, Position, VertexStyle};

/// Drawing surface the graph is redrawn onto. Write-only.
pub trait Renderer {
	/// Wipes the surface before a full redraw.
	fn clear(&mut self);

	/// Draws one vertex with its label.
	fn draw_vertex(&mut self, id: &str, position: Position, style: &VertexStyle);

	/// Draws one arc, with an arrowhead when `directed`.
	fn draw_edge(
		&mut self,
		weight: f64,
		source: Position,
		target: Position,
		style: &EdgeStyle,
		directed: bool,
	);
}

/// Source of delays between step boundaries.
pub trait Clock {
	type Sleep: Future<Output = ()>;

	/// Future that resolves once `delay` has elapsed.
	fn after(&self, delay: Duration) -> Self::Sleep;
}

/// Clock whose delays resolve immediately, for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateClock;

impl Clock for ImmediateClock {
	type Sleep = Ready<()>;

	fn after(&self, _delay: Duration) -> Self::Sleep {
		ready(())
	}
}

/// Pacing of an animated run.
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
	/// Pause after every step boundary.
	pub step_delay: Duration,
	/// Pause between the initial redraw and the first step.
	pub settle_delay: Duration,
}

impl Default for SchedulerConfig {
	fn default() -> Self {
		Self {
			step_delay: Duration::from_millis(500),
			settle_delay: Duration::ZERO,
		}
	}
}

/// Interleaves run steps with redraws at a fixed pace.
pub struct AnimationScheduler<C> {
	clock: C,
	config: SchedulerConfig,
}

impl<C: Clock> AnimationScheduler<C> {
	/// Scheduler pausing on `clock`.
	pub fn new(clock: C, config: SchedulerConfig) -> Self {
		Self { clock, config }
	}

	/// Current pacing.
	pub fn config(&self) -> &SchedulerConfig {
		&self.config
	}

	/// Plays `run` to the end.
	///
	/// Each step is followed by a full redraw and then `step_delay`. The
	/// graph is only borrowed while stepping or drawing, never across a
	/// wait, so cancellation and other reads can happen during the pause.
	pub async fn drive<R: Renderer + ?Sized>(
		&self,
		graph: &RefCell<GraphModel>,
		mut run: Run,
		renderer: &mut R,
	) -> RunStatus {
		graph.borrow().draw(renderer);
		if !self.config.settle_delay.is_zero() {
			self.clock.after(self.config.settle_delay).await;
		}

		loop {
			let progress = run.advance(&mut graph.borrow_mut());
			graph.borrow().draw(renderer);
			match progress {
				Progress::Stepped(_) => self.clock.after(self.config.step_delay).await,
				Progress::Finished(status) => return status,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use futures::executor::block_on;
	use serde_json::json;

	use super::*;
	use crate::algorithms::AlgorithmKind;
	use crate::graph::{GraphOptions, VisitState};
	use crate::runner::{AlgorithmRunner, RunHandle};

	/// Records every requested delay and can cancel a run on the n-th one.
	#[derive(Default)]
	struct ScriptedClock {
		delays: RefCell<Vec<Duration>>,
		cancel_on: Option<(usize, RunHandle)>,
	}

	impl Clock for &ScriptedClock {
		type Sleep = Ready<()>;

		fn after(&self, delay: Duration) -> Self::Sleep {
			let mut delays = self.delays.borrow_mut();
			delays.push(delay);
			if let Some((n, handle)) = &self.cancel_on {
				if delays.len() == *n {
					handle.cancel();
				}
			}
			ready(())
		}
	}

	/// Snapshot of the frontier-colored vertices at every redraw.
	#[derive(Default)]
	struct Frames {
		frames: Vec<Vec<String>>,
	}

	impl Renderer for Frames {
		fn clear(&mut self) {
			self.frames.push(Vec::new());
		}

		fn draw_vertex(&mut self, id: &str, _: Position, style: &VertexStyle) {
			if let Some(frame) = self.frames.last_mut() {
				frame.push(format!("{id}:{}", style.border_color));
			}
		}

		fn draw_edge(&mut self, _: f64, _: Position, _: Position, _: &EdgeStyle, _: bool) {}
	}

	fn runner(data: serde_json::Value) -> AlgorithmRunner {
		let mut graph = GraphModel::new(GraphOptions::default());
		graph.populate_from_value(&data).unwrap();
		AlgorithmRunner::new(Rc::new(RefCell::new(graph)))
	}

	#[test]
	fn waits_once_per_step_and_redraws_after_each() {
		let runner = runner(json!({ "a": [{ "b": [1], "c": [1] }] }));
		let clock = ScriptedClock::default();
		let scheduler = AnimationScheduler::new(&clock, SchedulerConfig::default());
		let mut frames = Frames::default();

		let run = runner.start(AlgorithmKind::Bfs, "a").unwrap();
		let status = block_on(runner.animate(run, &scheduler, &mut frames));

		assert_eq!(status, RunStatus::Completed);
		assert_eq!(*clock.delays.borrow(), vec![Duration::from_millis(500); 3]);
		// initial frame, one per step, one for completion
		assert_eq!(frames.frames.len(), 5);
		assert_eq!(frames.frames[1], vec!["a:blue", "b:black", "c:black"]);
		assert_eq!(frames.frames[2], vec!["a:red", "b:blue", "c:black"]);
	}

	#[test]
	fn cancel_during_a_pause_stops_before_the_next_step() {
		let runner = runner(json!({ "a": [{ "b": [1], "c": [1] }], "c": [{ "d": [1] }] }));
		let run = runner.start(AlgorithmKind::Bfs, "a").unwrap();
		let clock = ScriptedClock {
			cancel_on: Some((2, run.handle())),
			..ScriptedClock::default()
		};
		let scheduler = AnimationScheduler::new(&clock, SchedulerConfig::default());
		let mut frames = Frames::default();

		let status = block_on(runner.animate(run, &scheduler, &mut frames));

		assert_eq!(status, RunStatus::Cancelled);
		assert_eq!(clock.delays.borrow().len(), 2);
		let graph = runner.graph().borrow();
		assert!(!graph.is_locked());
		assert!(graph.vertices().all(|(_, v)| v.state() == VisitState::Unvisited));
		assert!(frames.frames.last().unwrap().iter().all(|v| v.ends_with(":black")));
	}

	#[test]
	fn settle_delay_precedes_the_first_step() {
		let runner = runner(json!({ "a": [{ "b": [1] }] }));
		let clock = ScriptedClock::default();
		let scheduler = AnimationScheduler::new(
			&clock,
			SchedulerConfig {
				step_delay: Duration::from_millis(100),
				settle_delay: Duration::from_secs(1),
			},
		);
		let run = runner.start(AlgorithmKind::Dfs, "a").unwrap();
		block_on(scheduler.drive(runner.graph(), run, &mut Frames::default()));

		let delays = clock.delays.borrow();
		assert_eq!(delays[0], Duration::from_secs(1));
		assert!(delays[1..].iter().all(|&d| d == Duration::from_millis(100)));
	}
}
