use std::fmt;
use super::data_store::*;

/// A named storage unit on the ring
#[derive(Clone, Debug)]
pub struct Node<S = DataStore> {
	name: String,
	store: S
}

impl Node<DataStore> {
	pub fn new(name: &str) -> Self {
		Node::with_store(name, DataStore::new())
	}
}

impl<S: KVStore> Node<S> {
	pub fn with_store(name: &str, store: S) -> Self {
		Node {
			name: name.to_string(),
			store
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn set(&self, key: Key, value: Value) {
		self.store.set(key, value)
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.store.get(key)
	}

	pub fn delete(&self, key: &str) -> Option<Value> {
		self.store.delete(key)
	}

	pub fn len(&self) -> usize {
		self.store.len()
	}

	pub fn is_empty(&self) -> bool {
		self.store.is_empty()
	}
}

impl<S> fmt::Display for Node<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Node({})", self.name)
	}
}
