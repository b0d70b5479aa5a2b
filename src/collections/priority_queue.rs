use std::cmp::Ordering;
use std::fmt;

/// Binary heap ordered by a comparator supplied at construction.
///
/// `pop` and `peek` return the item that compares [`Ordering::Less`] than
/// every other item, so a plain `a.cmp(b)` comparator yields a min-heap and
/// `b.cmp(a)` a max-heap. Items that compare equal come out in no particular
/// order; callers that need FIFO among ties fold a sequence number into the
/// comparison.
pub struct OrderedPriorityQueue<T, F = fn(&T, &T) -> Ordering> {
	data: Vec<T>,
	compare: F,
}

impl<T: Ord> OrderedPriorityQueue<T> {
	/// Min-first queue using the natural ordering of `T`.
	pub fn min_first() -> Self {
		Self::new(|a: &T, b: &T| a.cmp(b))
	}

	/// Max-first queue using the natural ordering of `T`.
	pub fn max_first() -> Self {
		Self::new(|a: &T, b: &T| b.cmp(a))
	}
}

impl<T, F> OrderedPriorityQueue<T, F>
where
	F: Fn(&T, &T) -> Ordering,
{
	/// Empty queue ordered by `compare`.
	pub fn new(compare: F) -> Self {
		Self {
			data: Vec::new(),
			compare,
		}
	}

	/// Builds a queue from existing items in linear time.
	pub fn from_vec(data: Vec<T>, compare: F) -> Self {
		let mut queue = Self { data, compare };
		for pos in (0..queue.data.len() / 2).rev() {
			queue.sift_down(pos);
		}
		queue
	}

	/// Number of queued items.
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Whether the queue is empty.
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Adds an item in `O(log n)`.
	pub fn push(&mut self, item: T) {
		self.data.push(item);
		self.sift_up(self.data.len() - 1);
	}

	/// Removes and returns the first item, or `None` when empty.
	pub fn pop(&mut self) -> Option<T> {
		if self.data.is_empty() {
			return None;
		}
		let last = self.data.len() - 1;
		self.data.swap(0, last);
		let top = self.data.pop();
		if !self.data.is_empty() {
			self.sift_down(0);
		}
		top
	}

	/// The item `pop` would return, or `None` when empty.
	pub fn peek(&self) -> Option<&T> {
		self.data.first()
	}

	fn less(&self, a: usize, b: usize) -> bool {
		(self.compare)(&self.data[a], &self.data[b]) == Ordering::Less
	}

	fn sift_up(&mut self, mut pos: usize) {
		while pos > 0 {
			let parent = (pos - 1) / 2;
			if !self.less(pos, parent) {
				break;
			}
			self.data.swap(pos, parent);
			pos = parent;
		}
	}

	fn sift_down(&mut self, mut pos: usize) {
		let len = self.data.len();
		loop {
			let left = 2 * pos + 1;
			if left >= len {
				break;
			}
			let right = left + 1;
			let best = if right < len && self.less(right, left) {
				right
			} else {
				left
			};
			if !self.less(best, pos) {
				break;
			}
			self.data.swap(pos, best);
			pos = best;
		}
	}

	#[cfg(test)]
	fn holds_heap_property(&self) -> bool {
		(1..self.data.len()).all(|child| !self.less(child, (child - 1) / 2))
	}
}

impl<T: fmt::Debug, F> fmt::Debug for OrderedPriorityQueue<T, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OrderedPriorityQueue")
			.field("len", &self.data.len())
			.field("peek", &self.data.first())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn by_priority(a: &(u32, &'static str), b: &(u32, &'static str)) -> Ordering {
		a.0.cmp(&b.0)
	}

	#[test]
	fn pops_lowest_priority_first() {
		let mut queue = OrderedPriorityQueue::new(by_priority);
		queue.push((5, "x"));
		queue.push((1, "y"));
		queue.push((3, "z"));

		assert_eq!(queue.pop(), Some((1, "y")));
		assert_eq!(queue.pop(), Some((3, "z")));
		assert_eq!(queue.pop(), Some((5, "x")));
		assert_eq!(queue.pop(), None);
	}

	#[test]
	fn comparator_controls_direction() {
		let mut queue = OrderedPriorityQueue::max_first();
		for value in [4, 9, 1, 7] {
			queue.push(value);
		}
		assert_eq!(queue.peek(), Some(&9));
		let drained: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
		assert_eq!(drained, vec![9, 7, 4, 1]);
	}

	#[test]
	fn heap_property_survives_interleaved_operations() {
		let mut queue = OrderedPriorityQueue::min_first();
		let mut pushed = 0;
		let mut popped = Vec::new();
		for round in 0..200u64 {
			let value = (round * 7919 + 13) % 101;
			queue.push(value);
			pushed += 1;
			assert!(queue.holds_heap_property());
			if round % 3 == 0 {
				popped.push(queue.pop().unwrap());
				assert!(queue.holds_heap_property());
			}
		}
		assert!(popped.len() <= pushed);

		let mut last = 0;
		while let Some(value) = queue.pop() {
			assert!(value >= last);
			last = value;
		}
		assert!(queue.is_empty());
	}

	#[test]
	fn from_vec_heapifies() {
		let queue = OrderedPriorityQueue::from_vec(vec![8, 3, 10, 1, 6, 14, 4], |a: &i32, b: &i32| {
			a.cmp(b)
		});
		assert!(queue.holds_heap_property());
		assert_eq!(queue.peek(), Some(&1));
		assert_eq!(queue.len(), 7);
	}

	#[test]
	fn empty_queue_signals_empty() {
		let mut queue: OrderedPriorityQueue<i32> = OrderedPriorityQueue::min_first();
		assert_eq!(queue.peek(), None);
		assert_eq!(queue.pop(), None);
		assert_eq!(queue.len(), 0);
	}
}
