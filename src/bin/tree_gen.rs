use std::env;
use std::path::PathBuf;
use std::process;

use tree_traversal::testgen::{self, SEED};

fn main() {
	let dir = env::args_os()
		.nth(1)
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from("."));

	match testgen::write_suite(&dir) {
		Ok(written) => eprintln!("Generated {written} unique testcases (seed={SEED})."),
		Err(err) => {
			eprintln!("{err}");
			process::exit(1);
		}
	}
}
