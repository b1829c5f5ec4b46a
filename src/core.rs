pub mod node;
pub mod ring;
pub mod config;
pub mod data_store;
pub mod error;
pub mod hasher;
pub mod shared;

pub use node::*;
pub use ring::*;
pub use config::*;
pub use error::*;
pub use hasher::*;
pub use shared::*;

/// Digest of data under the default hasher
pub fn calculate_hash(data: &[u8]) -> Digest {
	Blake3Hasher.digest(data)
}

pub fn construct_node(name: &str) -> Node {
	Node::new(name)
}
