use thiserror::Error;

use crate::tree::NodeId;

#[derive(Debug, Error)]
pub enum Error {
	#[error("input ended before the {0} could be read")]
	Truncated(&'static str),

	#[error("{0} nodes do not fit in a node identifier")]
	TooManyNodes(i64),

	#[error("node {node} is outside of 1..={n}")]
	NodeOutOfRange { node: i64, n: usize },

	#[error("edges do not form a tree: node {0} is reachable twice")]
	Cycle(NodeId),

	#[error("edges do not form a tree: {visited} of {n} nodes reachable from the root")]
	Disconnected { visited: usize, n: usize },

	#[error("node {node} has {children} children, expected 0 or 2")]
	NotFullBinary { node: NodeId, children: usize },

	#[error("could not generate a distinct tree with {0} nodes")]
	DuplicateTree(usize),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
