use std::collections::{HashSet, VecDeque};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::traversal::Traversals;
use crate::tree::{NodeId, Tree, ROOT};

pub const SEED: u64 = 2025;

const SIZES: [usize; 24] = [
	5, 7, 9, 11, 15, 21, 31, 33, 47, 63, 65, 127, 255, 511, 1023, 2047, 4095, 8191, 16383, 32767,
	50001, 65535, 99997, 99999,
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Shape {
	Balanced,
	LeftSkew,
	RightSkew,
	Random,
	Comb,
}

impl Shape {
	pub const ALL: [Self; 5] = [
		Self::Balanced,
		Self::LeftSkew,
		Self::RightSkew,
		Self::Random,
		Self::Comb,
	];
}

impl Display for Shape {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Balanced => "balanced",
			Self::LeftSkew => "left-skew",
			Self::RightSkew => "right-skew",
			Self::Random => "random",
			Self::Comb => "comb",
		};
		write!(f, "{name}")
	}
}

// Labels are handed out in creation order, left child first.
fn full_binary_tree(n: usize, shape: Shape, rng: &mut StdRng) -> Vec<(NodeId, NodeId)> {
	assert!(n % 2 == 1, "a full binary tree has an odd number of nodes, got {n}");

	let mut leaves = VecDeque::from([ROOT]);
	let mut edges = Vec::with_capacity(n.saturating_sub(1));
	let mut next_label = ROOT + 1;
	let mut newest_next = true;

	for _ in 0..(n - 1) / 2 {
		let leaf = match shape {
			Shape::Balanced | Shape::LeftSkew => leaves.pop_front(),
			Shape::RightSkew => leaves.pop_back(),
			Shape::Comb => {
				let newest = newest_next;
				newest_next = !newest_next;
				if newest {
					leaves.pop_back()
				} else {
					leaves.pop_front()
				}
			}
			Shape::Random => {
				let idx = rng.gen_range(0..leaves.len());
				leaves.swap_remove_back(idx)
			}
		};
		let Some(leaf) = leaf else {
			unreachable!("a full binary tree always has a leaf to expand")
		};

		let (left, right) = (next_label, next_label + 1);
		next_label += 2;
		edges.push((leaf, left));
		edges.push((leaf, right));

		if shape == Shape::LeftSkew {
			leaves.push_front(left);
			leaves.push_front(right);
		} else {
			leaves.push_back(left);
			leaves.push_back(right);
		}
	}

	edges
}

pub fn check_full_binary(tree: &Tree) -> Result<()> {
	match tree
		.nodes()
		.map(|node| (node, tree.child_count(node)))
		.find(|&(_node, children)| children != 0 && children != 2)
	{
		Some((node, children)) => Err(Error::NotFullBinary { node, children }),
		None => Ok(()),
	}
}

fn signature(edges: &[(NodeId, NodeId)]) -> Vec<(NodeId, NodeId)> {
	edges
		.iter()
		.map(|&(u, v)| (u.min(v), u.max(v)))
		.sorted()
		.collect_vec()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
	pub index: usize,
	pub shape: Shape,
	pub tree: Tree,
	pub traversals: Traversals,
}

impl TestCase {
	pub fn input(&self) -> String {
		let mut input = format!("{}\n", self.tree.len());
		for (u, v) in self.tree.edges() {
			input.push_str(&format!("{u} {v}\n"));
		}
		input
	}

	pub fn write(&self, dir: &Path) -> Result<()> {
		fs::write(input_path(dir, self.index), self.input())?;
		fs::write(output_path(dir, self.index), self.traversals.to_string())?;
		Ok(())
	}

	fn label(&self) -> String {
		match self.tree.len() {
			1 => "trivial".to_owned(),
			3 => "tiny".to_owned(),
			_ => self.shape.to_string(),
		}
	}
}

pub fn input_path(dir: &Path, index: usize) -> PathBuf {
	dir.join("input").join(format!("input{index}.txt"))
}

pub fn output_path(dir: &Path, index: usize) -> PathBuf {
	dir.join("output").join(format!("output{index}.txt"))
}

pub fn plan() -> Vec<(usize, Shape)> {
	[(1, Shape::Balanced), (3, Shape::Balanced)]
		.into_iter()
		.chain(SIZES.into_iter().zip(Shape::ALL.into_iter().cycle()))
		.collect_vec()
}

pub fn generate_with(mut on_case: impl FnMut(&TestCase) -> Result<()>) -> Result<usize> {
	let mut rng = StdRng::seed_from_u64(SEED);
	let mut seen: HashSet<Vec<(NodeId, NodeId)>> = HashSet::new();
	let plan = plan();

	for (index, &(n, shape)) in plan.iter().enumerate() {
		let mut shape = shape;
		let mut edges = full_binary_tree(n, shape, &mut rng);

		if seen.contains(&signature(&edges)) {
			eprintln!("Duplicate tree for n={n}, shape={shape}, regenerating as random");
			shape = Shape::Random;
			edges = full_binary_tree(n, shape, &mut rng);
			if seen.contains(&signature(&edges)) {
				return Err(Error::DuplicateTree(n));
			}
		}
		seen.insert(signature(&edges));

		let tree = Tree::from_edges(n, edges)?;
		check_full_binary(&tree)?;
		let traversals = Traversals::collect(&tree)?;

		on_case(&TestCase {
			index,
			shape,
			tree,
			traversals,
		})?;
	}

	Ok(plan.len())
}

pub fn generate() -> Result<Vec<TestCase>> {
	let mut cases = Vec::new();
	generate_with(|case| {
		cases.push(case.clone());
		Ok(())
	})?;
	Ok(cases)
}

pub fn write_suite(dir: &Path) -> Result<usize> {
	fs::create_dir_all(dir.join("input"))?;
	fs::create_dir_all(dir.join("output"))?;

	generate_with(|case| {
		case.write(dir)?;
		eprintln!(
			"Written testcase {}: n={}, shape={}, edges={}",
			case.index,
			case.tree.len(),
			case.label(),
			case.tree.len().saturating_sub(1)
		);
		Ok(())
	})
}
