use std::io::{BufRead, Write};

pub mod error;
pub mod scanner;
pub mod testgen;
pub mod traversal;
pub mod tree;

pub use error::{Error, Result};
pub use scanner::Scanner;
pub use traversal::{TraversalMethod, Traversals};
pub use tree::{NodeId, Tree};

pub fn solve<R, W>(input: R, mut output: W) -> Result<()>
where
	R: BufRead,
	W: Write,
{
	let tree = Tree::read(Scanner::new(input))?;
	let traversals = Traversals::collect(&tree)?;

	write!(output, "{traversals}")?;
	output.flush()?;
	Ok(())
}
