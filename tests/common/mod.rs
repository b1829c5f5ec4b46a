#![allow(dead_code)]

use hash_ring::core::{
	config::*,
	Digest,
	Node,
	Ring
};
use rand::prelude::*;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

pub fn build_ring(virtual_nodes: u32, strategy: MigrationStrategy, names: &[&str]) -> Ring {
	let config = Config {
		virtual_nodes,
		strategy
	};
	let mut ring = Ring::new(config).unwrap();
	for name in names {
		ring.add_node(Node::new(name)).unwrap();
	}
	ring
}

// Generate n distinct random keys with their values
pub fn generate_pairs(rng: &mut StdRng, n: usize) -> Vec<(String, Vec<u8>)> {
	(0..n)
		.map(|i| {
			let key = format!("key-{}-{:016x}", i, rng.gen::<u64>());
			let value = rng.gen::<[u8; 8]>().to_vec();
			(key, value)
		})
		.collect()
}

pub fn owners(ring: &Ring, keys: &[String]) -> Vec<String> {
	keys.iter()
		.map(|k| ring.lookup(k).unwrap().name().to_string())
		.collect()
}

// Hand-picked digests: nodes at 100, 200, 300 and keys around them
pub fn table_hasher(data: &[u8]) -> Digest {
	match data {
		b"a:0" => 100,
		b"b:0" => 200,
		b"c:0" => 300,
		b"before-first" => 1,
		b"after-last" => Digest::MAX,
		b"between" => 250,
		_ => 0
	}
}
