use std::{
	collections::HashMap,
	fmt
};
use log::{info, warn, debug};
use super::{
	config::*,
	data_store::*,
	error::*,
	hasher::*,
	node::Node
};

/// Position on the ring
pub type Digest = u128;

/// A key that changed owner during a membership change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
	pub key: Key,
	pub from: String,
	pub to: String
}

/// Consistent hashing ring.
///
/// Every node is placed at `config.virtual_nodes` positions, the i-th one at
/// `hash("{name}:{i}")`. A key belongs to the node owning the first position
/// at or after the key's digest, wrapping to the smallest position.
pub struct Ring<S = DataStore, H = Blake3Hasher> {
	config: Config,
	hasher: H,
	// position -> name of the owning node
	placements: HashMap<Digest, String>,
	// keys of placements in ascending order
	positions: Vec<Digest>,
	nodes: HashMap<String, Node<S>>
}

impl Ring {
	/// Create an empty ring with the default hasher
	pub fn new(config: Config) -> RingResult<Self> {
		Ring::with_hasher(config, Blake3Hasher)
	}
}

impl<S: KVStore, H: KeyHasher> Ring<S, H> {
	pub fn with_hasher(config: Config, hasher: H) -> RingResult<Self> {
		config.validate()?;
		Ok(Ring {
			config,
			hasher,
			placements: HashMap::new(),
			positions: Vec::new(),
			nodes: HashMap::new()
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Add a node and move the keys it now owns onto it
	pub fn add_node(&mut self, node: Node<S>) -> RingResult<Vec<Migration>> {
		let name = node.name().to_string();
		if self.nodes.contains_key(&name) {
			return Err(RingError::DuplicateNode(name));
		}

		// hash every label before touching the ring so a failing hasher leaves it as it was
		let placed: Vec<Digest> = (0..self.config.virtual_nodes)
			.map(|i| self.hasher.digest(vnode_label(&name, i).as_bytes()))
			.collect();
		for (i, pos) in placed.into_iter().enumerate() {
			match self.placements.insert(pos, name.clone()) {
				Some(prev) => {
					// Last write wins: the position now belongs to this node only
					warn!("{}: position {:032x} collides with Node({}), taking it over", node, pos, prev);
				},
				None => {
					let index = self.positions.partition_point(|p| *p < pos);
					self.positions.insert(index, pos);
				}
			};
			debug!("{}: placed virtual node {} at {:032x}", node, i, pos);
		}

		info!("{}: added to ring ({} nodes, {} positions)", node, self.nodes.len() + 1, self.positions.len());
		self.nodes.insert(name, node);

		let migrations = match self.config.strategy {
			MigrationStrategy::Full => self.redistribute(),
			MigrationStrategy::Minimal => self.migrate_misplaced()
		};
		Ok(migrations)
	}

	/// Remove a node and hand its keys to their new owners.
	///
	/// The removed node is returned. If it was the last node its data
	/// stays with it since there is nowhere else to put it.
	pub fn remove_node(&mut self, name: &str) -> RingResult<(Node<S>, Vec<Migration>)> {
		let node = self.nodes.remove(name)
			.ok_or_else(|| RingError::NodeNotFound(name.to_string()))?;

		self.placements.retain(|_, owner| owner.as_str() != name);
		let placements = &self.placements;
		self.positions.retain(|p| placements.contains_key(p));
		info!("{}: removed from ring ({} nodes, {} positions)", node, self.nodes.len(), self.positions.len());

		// Nodes stripped of every position by collisions can remain registered
		// while no position is left to own a key
		if self.positions.is_empty() {
			if !node.is_empty() {
				warn!("{}: no positions left on ring, keeping {} keys on it", node, node.len());
			}
			return Ok((node, Vec::new()));
		}

		let mut migrations = Vec::new();
		for (key, value) in node.store().drain() {
			match self.lookup(&key) {
				Some(to) => {
					debug!("{}: moving key {} to {}", node, key, to);
					migrations.push(Migration {
						key: key.clone(),
						from: name.to_string(),
						to: to.name().to_string()
					});
					to.set(key, value);
				},
				None => {
					warn!("{}: no owner for key {}, keeping it", node, key);
					node.set(key, value);
				}
			};
		}
		if self.config.strategy == MigrationStrategy::Full {
			migrations.extend(self.redistribute());
		}

		Ok((node, migrations))
	}

	/// Collect every pair from every node, clear all stores and insert
	/// them again through the normal lookup path
	fn redistribute(&self) -> Vec<Migration> {
		let mut pairs = Vec::new();
		for name in self.node_names() {
			if let Some(node) = self.nodes.get(&name) {
				pairs.extend(
					node.store().drain()
						.into_iter()
						.map(|(k, v)| (name.clone(), k, v))
				);
			}
		}

		let mut migrations = Vec::new();
		for (from, key, value) in pairs {
			match self.lookup(&key) {
				Some(to) => {
					if to.name() != from {
						debug!("Node({}): moving key {} to {}", from, key, to);
						migrations.push(Migration {
							key: key.clone(),
							from,
							to: to.name().to_string()
						});
					}
					to.set(key, value);
				},
				None => {
					// put it back where it was
					warn!("Node({}): no owner for key {}, keeping it", from, key);
					if let Some(node) = self.nodes.get(&from) {
						node.set(key, value);
					}
				}
			};
		}
		migrations
	}

	/// Move only the keys whose owner differs from the node holding them
	fn migrate_misplaced(&self) -> Vec<Migration> {
		let mut migrations = Vec::new();
		for name in self.node_names() {
			let node = match self.nodes.get(&name) {
				Some(n) => n,
				None => continue
			};
			for (key, value) in node.store().entries() {
				let to = match self.lookup(&key) {
					Some(to) if to.name() != name => to,
					_ => continue
				};
				debug!("{}: moving key {} to {}", node, key, to);
				node.delete(&key);
				migrations.push(Migration {
					key: key.clone(),
					from: name.clone(),
					to: to.name().to_string()
				});
				to.set(key, value);
			}
		}
		migrations
	}

	/// Find the owning position and node of a key
	pub fn lookup_position(&self, key: &str) -> Option<(Digest, &Node<S>)> {
		if self.positions.is_empty() {
			return None;
		}

		let digest = self.hasher.digest(key.as_bytes());
		// first position >= digest, wrapping around to the smallest one
		let index = self.positions.partition_point(|p| *p < digest);
		let pos = if index == self.positions.len() {
			self.positions[0]
		} else {
			self.positions[index]
		};
		let name = self.placements.get(&pos)?;
		self.nodes.get(name).map(|node| (pos, node))
	}

	pub fn lookup(&self, key: &str) -> Option<&Node<S>> {
		self.lookup_position(key).map(|(_, node)| node)
	}

	/// Store a pair on its owner.
	/// Returns the owner or None if the ring is empty.
	pub fn put(&self, key: Key, value: Value) -> Option<&Node<S>> {
		let owner = self.lookup(&key)?;
		debug!("{}: set key {}", owner, key);
		owner.set(key, value);
		Some(owner)
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.lookup(key)?.get(key)
	}

	pub fn delete(&self, key: &str) -> Option<Value> {
		self.lookup(key)?.delete(key)
	}

	/// All positions in ascending order with their owners
	pub fn positions(&self) -> Vec<(Digest, String)> {
		self.positions.iter()
			.filter_map(|p| self.placements.get(p).map(|name| (*p, name.clone())))
			.collect()
	}

	/// Entries held by each node, both sorted
	pub fn node_states(&self) -> Vec<(String, Vec<(Key, Value)>)> {
		self.node_names()
			.into_iter()
			.filter_map(|name| {
				let mut entries = self.nodes.get(&name)?.store().entries();
				entries.sort();
				Some((name, entries))
			})
			.collect()
	}

	pub fn node_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.nodes.keys().cloned().collect();
		names.sort();
		names
	}

	pub fn node(&self, name: &str) -> Option<&Node<S>> {
		self.nodes.get(name)
	}

	pub fn contains_node(&self, name: &str) -> bool {
		self.nodes.contains_key(name)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn vnode_count(&self) -> usize {
		self.positions.len()
	}

	pub fn key_count(&self) -> usize {
		self.nodes.values().map(|n| n.len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

impl<S: KVStore, H: KeyHasher> fmt::Display for Ring<S, H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (pos, name) in self.positions() {
			writeln!(f, "Node({}): {:032x}", name, pos)?;
		}
		Ok(())
	}
}

fn vnode_label(name: &str, index: u32) -> String {
	format!("{}:{}", name, index)
}
