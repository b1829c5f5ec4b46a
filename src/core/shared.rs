use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use super::{
	data_store::*,
	error::*,
	hasher::*,
	node::Node,
	ring::*
};

/// Thread-safe handle to a ring.
///
/// Membership changes hold the write lock for the whole migration so readers
/// never see a key whose placement moved before its data did.
/// Reads and writes of keys share the read lock.
pub struct SharedRing<S = DataStore, H = Blake3Hasher> {
	inner: Arc<RwLock<Ring<S, H>>>
}

impl<S, H> Clone for SharedRing<S, H> {
	fn clone(&self) -> Self {
		SharedRing {
			inner: self.inner.clone()
		}
	}
}

impl<S: KVStore, H: KeyHasher> SharedRing<S, H> {
	pub fn new(ring: Ring<S, H>) -> Self {
		SharedRing {
			inner: Arc::new(RwLock::new(ring))
		}
	}

	pub fn read(&self) -> RwLockReadGuard<'_, Ring<S, H>> {
		self.inner.read().unwrap()
	}

	pub fn write(&self) -> RwLockWriteGuard<'_, Ring<S, H>> {
		self.inner.write().unwrap()
	}

	pub fn add_node(&self, node: Node<S>) -> RingResult<Vec<Migration>> {
		self.write().add_node(node)
	}

	pub fn remove_node(&self, name: &str) -> RingResult<(Node<S>, Vec<Migration>)> {
		self.write().remove_node(name)
	}

	/// Name of the node owning the key
	pub fn lookup(&self, key: &str) -> Option<String> {
		self.read().lookup(key).map(|n| n.name().to_string())
	}

	/// Store a pair and return the name of its owner
	pub fn put(&self, key: Key, value: Value) -> Option<String> {
		self.read().put(key, value).map(|n| n.name().to_string())
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.read().get(key)
	}

	pub fn delete(&self, key: &str) -> Option<Value> {
		self.read().delete(key)
	}

	pub fn positions(&self) -> Vec<(Digest, String)> {
		self.read().positions()
	}

	pub fn node_names(&self) -> Vec<String> {
		self.read().node_names()
	}

	pub fn node_count(&self) -> usize {
		self.read().node_count()
	}

	pub fn key_count(&self) -> usize {
		self.read().key_count()
	}
}
