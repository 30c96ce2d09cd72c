use std::io;

use itertools::Itertools;

use crate::error::{Error, Result};

pub type NodeId = u32;

pub const ROOT: NodeId = 1;

pub const NO_PARENT: NodeId = 0;

/// Slot `0` is reserved so that a node identifier doubles as its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
	adjacency: Vec<Vec<NodeId>>,
}

impl Tree {
	pub fn empty() -> Self {
		Self {
			adjacency: Vec::new(),
		}
	}

	pub fn from_edges<I>(n: usize, edges: I) -> Result<Self>
	where
		I: IntoIterator<Item = (NodeId, NodeId)>,
	{
		if n == 0 {
			return Ok(Self::empty());
		}

		let mut adjacency = vec![Vec::new(); n + 1];
		for (u, v) in edges {
			let u = checked_node(i64::from(u), n)?;
			let v = checked_node(i64::from(v), n)?;
			adjacency[u as usize].push(v);
			adjacency[v as usize].push(u);
		}

		// fixes the child visit order regardless of input order
		for neighbours in adjacency.iter_mut() {
			neighbours.sort_unstable();
		}

		Ok(Self { adjacency })
	}

	pub fn read<I>(tokens: I) -> Result<Self>
	where
		I: IntoIterator<Item = io::Result<i64>>,
	{
		let mut tokens = tokens.into_iter();
		let mut next = |what: &'static str| -> Result<i64> {
			tokens.next().transpose()?.ok_or(Error::Truncated(what))
		};

		let n = next("node count")?;
		if n <= 0 {
			return Ok(Self::empty());
		}
		if n > i64::from(NodeId::MAX) {
			return Err(Error::TooManyNodes(n));
		}
		let n = n as usize;

		let edges: Vec<(NodeId, NodeId)> = (1..n)
			.map(|_| -> Result<(NodeId, NodeId)> {
				let u = checked_node(next("edge start")?, n)?;
				let v = checked_node(next("edge end")?, n)?;
				Ok((u, v))
			})
			.try_collect()?;

		Self::from_edges(n, edges)
	}

	pub fn len(&self) -> usize {
		self.adjacency.len().saturating_sub(1)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
		&self.adjacency[node as usize]
	}

	pub fn child_count(&self, node: NodeId) -> usize {
		let degree = self.neighbours(node).len();
		if node == ROOT {
			degree
		} else {
			degree.saturating_sub(1)
		}
	}

	pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
		self.nodes().flat_map(move |u| {
			self.neighbours(u)
				.iter()
				.copied()
				.filter(move |&v| u < v)
				.map(move |v| (u, v))
		})
	}

	pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
		(ROOT..).take(self.len())
	}
}

fn checked_node(raw: i64, n: usize) -> Result<NodeId> {
	match usize::try_from(raw) {
		Ok(node) if (1..=n).contains(&node) => {
			NodeId::try_from(node).map_err(|_| Error::NodeOutOfRange { node: raw, n })
		}
		_ => Err(Error::NodeOutOfRange { node: raw, n }),
	}
}
