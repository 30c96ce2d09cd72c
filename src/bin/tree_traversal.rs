use std::io::{self, BufWriter};
use std::process;

fn main() {
	let stdin = io::stdin();
	let stdout = io::stdout();

	if let Err(err) = tree_traversal::solve(stdin.lock(), BufWriter::new(stdout.lock())) {
		eprintln!("{err}");
		process::exit(1);
	}
}
