//! Small data structures the algorithm runners are built on.

mod disjoint_set;
mod fifo;
mod priority_queue;

pub use disjoint_set::DisjointSet;
pub use fifo::FifoQueue;
pub use priority_queue::OrderedPriorityQueue;
