use hash_ring::core::{
	self,
	config::*,
	Ring
};
use clap::Parser;
use inquire::{Text, CustomUserError};
use anyhow::anyhow;
use rand::{Rng, distributions::Alphanumeric};

#[derive(Parser)]
struct Args {
	/// Number of virtual nodes per node
	#[clap(short, long, default_value_t = 1)]
	virtual_nodes: u32,

	/// Migration strategy after membership changes (full or minimal)
	#[clap(short, long, default_value = "minimal")]
	strategy: MigrationStrategy,

	/// Nodes to add on startup (comma separated)
	#[clap(short, long, use_value_delimiter = true)]
	nodes: Vec<String>
}

const COMMANDS: [&str; 10] = [
	"add",
	"remove",
	"set",
	"get",
	"del",
	"lookup",
	"ring",
	"nodes",
	"fill",
	"help"
];

const USAGE: &str = "\
add <name>          add a node
remove <name>       remove a node
set <key> <value>   store a value
get <key>           read a value
del <key>           delete a value
lookup <key>        show the owner of a key
ring                show all positions
nodes               show data on each node
fill <n>            store n random keys
help                show this message";

fn suggest_command(v: &str) -> Result<Vec<String>, CustomUserError> {
	let mut result = Vec::new();
	for command in COMMANDS {
		if v.len() > 0 && command.starts_with(v) {
			result.push(command.to_string());
		}
	}
	Ok(result)
}

fn complete_command(v: &str) -> Result<Option<String>, CustomUserError> {
	let result = suggest_command(v)?;
	let command = if result.len() > 0 {
		Some(result[0].clone() + " ")
	}
	else {
		None
	};
	Ok(command)
}

fn expect_args(words: &[&str], count: usize) -> anyhow::Result<()> {
	if words.len() != count + 1 {
		return Err(anyhow!("{}: invalid number of arguments", words[0]));
	}
	Ok(())
}

fn execute_command(ring: &mut Ring, command: &str) -> anyhow::Result<()> {
	// execute command
	let words: Vec<_> = command.split_whitespace().collect();
	if words.len() == 0 {
		return Err(anyhow!("invalid command"));
	}

	match words[0] {
		"add" => {
			expect_args(&words, 1)?;
			let migrations = ring.add_node(core::construct_node(words[1]))?;
			println!("added {} ({} keys moved)", words[1], migrations.len());
		},
		"remove" => {
			expect_args(&words, 1)?;
			let (node, migrations) = ring.remove_node(words[1])?;
			println!("removed {} ({} keys moved)", node, migrations.len());
		},
		"set" => {
			expect_args(&words, 2)?;
			match ring.put(words[1].to_string(), words[2].as_bytes().to_vec()) {
				Some(node) => println!("{}", node),
				None => return Err(anyhow!("set: ring is empty"))
			};
		},
		"get" => {
			expect_args(&words, 1)?;
			match ring.get(words[1]) {
				Some(v) => println!("{}", String::from_utf8(v)?),
				None => return Err(anyhow!("get: key doesn't exist"))
			};
		},
		"del" => {
			expect_args(&words, 1)?;
			if ring.delete(words[1]).is_none() {
				return Err(anyhow!("del: key doesn't exist"));
			}
		},
		"lookup" => {
			expect_args(&words, 1)?;
			match ring.lookup_position(words[1]) {
				Some((pos, node)) => println!(
					"{:032x} -> {}: {:032x}",
					core::calculate_hash(words[1].as_bytes()),
					node,
					pos
				),
				None => return Err(anyhow!("lookup: ring is empty"))
			};
		},
		"ring" => {
			print!("{}", ring);
		},
		"nodes" => {
			for (name, entries) in ring.node_states() {
				let keys: Vec<_> = entries.iter()
					.map(|(k, v)| format!("{}={}", k, String::from_utf8_lossy(v)))
					.collect();
				println!("Node({}): {{{}}}", name, keys.join(", "));
			}
		},
		"fill" => {
			expect_args(&words, 1)?;
			let count: usize = words[1].parse()?;
			let mut rng = rand::thread_rng();
			for _ in 0..count {
				let key: String = (&mut rng).sample_iter(&Alphanumeric)
					.take(8)
					.map(char::from)
					.collect();
				let value = key.to_lowercase();
				if ring.put(key, value.into_bytes()).is_none() {
					return Err(anyhow!("fill: ring is empty"));
				}
			}
			println!("{} keys on {} nodes", ring.key_count(), ring.node_count());
		},
		"help" => {
			println!("{}", USAGE);
		},
		_ => {
			return Err(anyhow!("invalid command"));
		}
	};
	Ok(())
}


fn main() -> anyhow::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let config = Config {
		virtual_nodes: args.virtual_nodes,
		strategy: args.strategy
	};
	let mut ring = Ring::new(config)?;
	for name in args.nodes.iter() {
		ring.add_node(core::construct_node(name))?;
	}

	loop {
		let command = Text::new("")
			.with_suggester(&suggest_command)
			.with_completer(&complete_command)
			.prompt()?;

		match execute_command(&mut ring, &command) {
			Ok(_) => (),
			Err(e) => println!("Error: {}", e)
		};
	}
}
