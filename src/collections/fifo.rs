use std::collections::VecDeque;

/// First-in first-out queue with amortized `O(1)` operations.
#[derive(Debug, Clone)]
pub struct FifoQueue<T> {
	items: VecDeque<T>,
}

impl<T> Default for FifoQueue<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> FifoQueue<T> {
	/// Empty queue.
	pub fn new() -> Self {
		Self {
			items: VecDeque::new(),
		}
	}

	/// Adds an item at the back.
	pub fn enqueue(&mut self, item: T) {
		self.items.push_back(item);
	}

	/// Removes the front item, or `None` when empty.
	pub fn dequeue(&mut self) -> Option<T> {
		self.items.pop_front()
	}

	/// The front item, or `None` when empty.
	pub fn peek(&self) -> Option<&T> {
		self.items.front()
	}

	/// Number of queued items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the queue is empty.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}
