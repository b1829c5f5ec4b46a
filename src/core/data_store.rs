use std::{
	collections::HashMap,
	sync::{Arc, RwLock}
};

pub type Key = String;
pub type Value = Vec<u8>;

/// Storage capability a node delegates to
pub trait KVStore {
	fn get(&self, key: &str) -> Option<Value>;
	fn set(&self, key: Key, value: Value);
	fn delete(&self, key: &str) -> Option<Value>;
	/// Snapshot of all entries
	fn entries(&self) -> Vec<(Key, Value)>;
	/// Remove and return all entries
	fn drain(&self) -> Vec<(Key, Value)>;
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Thread-safe key-value data store
#[derive(Clone, Debug, Default)]
pub struct DataStore {
	data: Arc<RwLock<HashMap<Key, Value>>>
}

impl DataStore {
	pub fn new() -> Self {
		DataStore {
			data: Arc::new(RwLock::new(HashMap::new()))
		}
	}
}

impl KVStore for DataStore {
	fn get(&self, key: &str) -> Option<Value> {
		let data = self.data.read().unwrap();
		data.get(key).cloned()
	}

	fn set(&self, key: Key, value: Value) {
		let mut data = self.data.write().unwrap();
		data.insert(key, value);
	}

	fn delete(&self, key: &str) -> Option<Value> {
		let mut data = self.data.write().unwrap();
		data.remove(key)
	}

	fn entries(&self) -> Vec<(Key, Value)> {
		let data = self.data.read().unwrap();
		data.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	fn drain(&self) -> Vec<(Key, Value)> {
		let mut data = self.data.write().unwrap();
		data.drain().collect()
	}

	fn len(&self) -> usize {
		self.data.read().unwrap().len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_set_overwrites() {
		let store = DataStore::new();
		store.set("a".to_string(), vec![1]);
		store.set("a".to_string(), vec![2]);
		assert_eq!(store.get("a"), Some(vec![2]));
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn test_delete_returns_prior_value() {
		let store = DataStore::new();
		store.set("a".to_string(), vec![1]);
		assert_eq!(store.delete("a"), Some(vec![1]));
		assert_eq!(store.delete("a"), None);
		assert_eq!(store.get("a"), None);
		assert!(store.is_empty());
	}

	#[test]
	fn test_drain_empties_store() {
		let store = DataStore::new();
		store.set("a".to_string(), vec![1]);
		store.set("b".to_string(), vec![2]);

		let mut entries = store.drain();
		entries.sort();
		assert_eq!(entries, vec![
			("a".to_string(), vec![1]),
			("b".to_string(), vec![2])
		]);
		assert!(store.is_empty());
	}

	#[test]
	fn test_clones_share_data() {
		let store = DataStore::new();
		let other = store.clone();
		other.set("k".to_string(), b"v".to_vec());
		assert_eq!(store.get("k"), Some(b"v".to_vec()));
		assert_eq!(store.entries().len(), 1);
	}
}
