use std::{
	default::Default,
	fmt,
	str::FromStr
};
use super::error::*;

/// How keys move after a membership change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationStrategy {
	/// Collect every pair, clear all stores and insert everything again
	Full,
	/// Only move keys whose owner changed
	Minimal
}

impl FromStr for MigrationStrategy {
	type Err = RingError;

	fn from_str(s: &str) -> RingResult<Self> {
		match s {
			"full" => Ok(MigrationStrategy::Full),
			"minimal" => Ok(MigrationStrategy::Minimal),
			_ => Err(RingError::InvalidConfig(format!("unknown migration strategy {}", s)))
		}
	}
}

impl fmt::Display for MigrationStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MigrationStrategy::Full => write!(f, "full"),
			MigrationStrategy::Minimal => write!(f, "minimal")
		}
	}
}

#[derive(Clone, Debug)]
pub struct Config {
	// number of positions per node on the ring (>= 1)
	pub virtual_nodes: u32,
	pub strategy: MigrationStrategy
}

impl Config {
	pub fn validate(&self) -> RingResult<()> {
		if self.virtual_nodes == 0 {
			return Err(RingError::InvalidConfig("virtual_nodes equal to 0".to_string()));
		}
		Ok(())
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			virtual_nodes: 1,
			strategy: MigrationStrategy::Minimal
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config_is_valid() {
		let config = Config::default();
		assert_eq!(config.virtual_nodes, 1);
		assert_eq!(config.strategy, MigrationStrategy::Minimal);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_zero_virtual_nodes_rejected() {
		let config = Config {
			virtual_nodes: 0,
			..Config::default()
		};
		assert!(matches!(config.validate(), Err(RingError::InvalidConfig(_))));
	}

	#[test]
	fn test_parse_strategy() {
		assert_eq!("full".parse::<MigrationStrategy>(), Ok(MigrationStrategy::Full));
		assert_eq!("minimal".parse::<MigrationStrategy>(), Ok(MigrationStrategy::Minimal));
		assert!("lazy".parse::<MigrationStrategy>().is_err());
		assert_eq!(MigrationStrategy::Full.to_string(), "full");
	}
}
