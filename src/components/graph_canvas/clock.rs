use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::runner::Clock;

/// [`Clock`] backed by `window.setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
	type Sleep = Timeout;

	fn after(&self, delay: Duration) -> Self::Sleep {
		Timeout::new(delay)
	}
}

#[derive(Default)]
struct TimeoutState {
	fired: bool,
	waker: Option<Waker>,
}

pub struct Timeout {
	state: Rc<RefCell<TimeoutState>>,
}

impl Timeout {
	fn new(delay: Duration) -> Self {
		let state = Rc::new(RefCell::new(TimeoutState::default()));
		let fired = state.clone();
		let callback = Closure::once_into_js(move || {
			let waker = {
				let mut state = fired.borrow_mut();
				state.fired = true;
				state.waker.take()
			};
			if let Some(waker) = waker {
				waker.wake();
			}
		});

		let millis = delay.as_millis().min(i32::MAX as u128) as i32;
		let scheduled = web_sys::window().map(|window| {
			window.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.unchecked_ref(),
				millis,
			)
		});
		if !matches!(scheduled, Some(Ok(_))) {
			warn!("setTimeout unavailable, continuing without a pause");
			state.borrow_mut().fired = true;
		}
		Self { state }
	}
}

impl Future for Timeout {
	type Output = ();

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
		let mut state = self.state.borrow_mut();
		if state.fired {
			Poll::Ready(())
		} else {
			state.waker = Some(cx.waker().clone());
			Poll::Pending
		}
	}
}
