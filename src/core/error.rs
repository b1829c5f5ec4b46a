use thiserror::Error;
use std::result::Result;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RingError {
	#[error("Node {0} is already on the ring")]
	DuplicateNode(String),
	#[error("Node {0} not found")]
	NodeNotFound(String),
	#[error("Invalid config: {0}")]
	InvalidConfig(String)
}

pub type RingResult<T> = Result<T, RingError>;
