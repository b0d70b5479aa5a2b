use std::collections::HashMap;
use std::hash::Hash;

/// Union-find over opaque handles.
///
/// Handles are interned to dense ids on `add`. `union` hangs the smaller
/// tree under the root of the larger one; `find` walks parent links without
/// compressing them, so lookups only need `&self`.
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
	ids: HashMap<T, usize>,
	handles: Vec<T>,
	parent: Vec<usize>,
	size: Vec<usize>,
	sets: usize,
}

impl<T: Eq + Hash + Clone> Default for DisjointSet<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Eq + Hash + Clone> DisjointSet<T> {
	/// Empty structure.
	pub fn new() -> Self {
		Self {
			ids: HashMap::new(),
			handles: Vec::new(),
			parent: Vec::new(),
			size: Vec::new(),
			sets: 0,
		}
	}

	/// Registers `handle` as a singleton set. Returns `false` if it was
	/// already registered, in which case nothing changes.
	pub fn add(&mut self, handle: T) -> bool {
		if self.ids.contains_key(&handle) {
			return false;
		}
		let id = self.handles.len();
		self.ids.insert(handle.clone(), id);
		self.handles.push(handle);
		self.parent.push(id);
		self.size.push(1);
		self.sets += 1;
		true
	}

	/// Whether `handle` has been registered.
	pub fn contains(&self, handle: &T) -> bool {
		self.ids.contains_key(handle)
	}

	/// Id of the root of the set containing `handle`.
	pub fn find(&self, handle: &T) -> Option<usize> {
		self.ids.get(handle).map(|&id| self.root(id))
	}

	fn root(&self, mut id: usize) -> usize {
		while self.parent[id] != id {
			id = self.parent[id];
		}
		id
	}

	/// Whether both handles are registered and share a set.
	pub fn connected(&self, a: &T, b: &T) -> bool {
		match (self.find(a), self.find(b)) {
			(Some(ra), Some(rb)) => ra == rb,
			_ => false,
		}
	}

	/// Merges the sets of `a` and `b`. Returns `true` only when two distinct
	/// sets were merged; already-connected or unregistered handles leave the
	/// structure untouched.
	pub fn union(&mut self, a: &T, b: &T) -> bool {
		let (Some(ra), Some(rb)) = (self.find(a), self.find(b)) else {
			return false;
		};
		if ra == rb {
			return false;
		}
		let (small, large) = if self.size[ra] < self.size[rb] {
			(ra, rb)
		} else {
			(rb, ra)
		};
		self.parent[small] = large;
		self.size[large] += self.size[small];
		self.sets -= 1;
		true
	}

	/// Size of the set containing `handle`.
	pub fn set_size(&self, handle: &T) -> Option<usize> {
		self.find(handle).map(|root| self.size[root])
	}

	/// Number of registered handles.
	pub fn len(&self) -> usize {
		self.handles.len()
	}

	/// Whether nothing has been registered.
	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Number of disjoint sets.
	pub fn set_count(&self) -> usize {
		self.sets
	}

	/// Every set, each listed in registration order. Sets are ordered by
	/// their first registered member.
	pub fn extract(&self) -> Vec<Vec<T>> {
		let mut slots: HashMap<usize, usize> = HashMap::new();
		let mut groups: Vec<Vec<T>> = Vec::new();
		for (id, handle) in self.handles.iter().enumerate() {
			let root = self.root(id);
			let slot = *slots.entry(root).or_insert_with(|| {
				groups.push(Vec::new());
				groups.len() - 1
			});
			groups[slot].push(handle.clone());
		}
		groups
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn roots(set: &DisjointSet<&'static str>, handles: &[&'static str]) -> usize {
		let mut roots: Vec<_> = handles.iter().filter_map(|h| set.find(h)).collect();
		roots.sort_unstable();
		roots.dedup();
		roots.len()
	}

	#[test]
	fn union_connects_and_counts() {
		let handles = ["a", "b", "c", "d"];
		let mut set = DisjointSet::new();
		for handle in handles {
			assert!(set.add(handle));
		}
		assert!(!set.add("a"));
		assert_eq!(roots(&set, &handles), 4);

		assert!(set.union(&"a", &"b"));
		assert!(set.connected(&"a", &"b"));
		assert_eq!(roots(&set, &handles), 3);
		assert_eq!(set.set_count(), 3);

		assert!(!set.union(&"b", &"a"));
		assert_eq!(roots(&set, &handles), 3);

		assert!(set.union(&"c", &"d"));
		assert!(set.union(&"a", &"d"));
		assert!(set.connected(&"b", &"c"));
		assert_eq!(set.set_count(), 1);
		assert_eq!(set.set_size(&"c"), Some(4));
	}

	#[test]
	fn smaller_tree_goes_under_larger_root() {
		let mut set = DisjointSet::new();
		for handle in ["a", "b", "c"] {
			set.add(handle);
		}
		set.union(&"a", &"b");
		let big_root = set.find(&"a");
		set.union(&"c", &"a");
		assert_eq!(set.find(&"c"), big_root);
	}

	#[test]
	fn unregistered_handles_are_never_connected() {
		let mut set = DisjointSet::new();
		set.add(1);
		assert!(!set.connected(&1, &2));
		assert!(!set.union(&1, &2));
		assert_eq!(set.find(&2), None);
		assert!(set.connected(&1, &1));
	}

	#[test]
	fn extract_groups_in_registration_order() {
		let mut set = DisjointSet::new();
		for handle in ["a", "b", "c", "d", "e"] {
			set.add(handle);
		}
		set.union(&"d", &"b");
		set.union(&"e", &"a");
		assert_eq!(set.extract(), vec![vec!["a", "e"], vec!["b", "d"], vec!["c"]]);
	}
}
