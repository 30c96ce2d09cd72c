use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::tree::{NodeId, Tree, NO_PARENT, ROOT};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TraversalMethod {
	InOrder,
	PreOrder,
	PostOrder,
}

impl TraversalMethod {
	pub const OUTPUT_ORDER: [Self; 3] = [Self::InOrder, Self::PreOrder, Self::PostOrder];
}

struct Frame {
	node: NodeId,
	parent: NodeId,
	next_neighbour: usize,
	children: usize,
}

impl Frame {
	fn new(node: NodeId, parent: NodeId) -> Self {
		Self {
			node,
			parent,
			next_neighbour: 0,
			children: 0,
		}
	}

	fn next_child(&mut self, tree: &Tree) -> Option<NodeId> {
		let neighbours = tree.neighbours(self.node);
		while let Some(&neighbour) = neighbours.get(self.next_neighbour) {
			self.next_neighbour += 1;
			if neighbour != self.parent {
				return Some(neighbour);
			}
		}
		None
	}
}

impl Tree {
	/// A node is reported [`TraversalMethod::InOrder`] when it is a leaf, or
	/// right before its second child is entered. Nodes with a single child are
	/// never reported in order.
	pub fn traverse(&self, visitor: &mut impl FnMut(TraversalMethod, NodeId)) -> Result<()> {
		if self.is_empty() {
			return Ok(());
		}

		let mut entered = vec![false; self.len() + 1];
		let mut stack = vec![Frame::new(ROOT, NO_PARENT)];
		entered[ROOT as usize] = true;
		visitor(TraversalMethod::PreOrder, ROOT);
		let mut visited = 1usize;

		while let Some(frame) = stack.last_mut() {
			match frame.next_child(self) {
				Some(child) => {
					if frame.children == 1 {
						visitor(TraversalMethod::InOrder, frame.node);
					}
					frame.children += 1;
					let parent = frame.node;

					if entered[child as usize] {
						return Err(Error::Cycle(child));
					}
					entered[child as usize] = true;
					visited += 1;

					visitor(TraversalMethod::PreOrder, child);
					stack.push(Frame::new(child, parent));
				}
				None => {
					if frame.children == 0 {
						visitor(TraversalMethod::InOrder, frame.node);
					}
					visitor(TraversalMethod::PostOrder, frame.node);
					stack.pop();
				}
			}
		}

		if visited != self.len() {
			return Err(Error::Disconnected {
				visited,
				n: self.len(),
			});
		}

		Ok(())
	}
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Traversals {
	pub in_order: Vec<NodeId>,
	pub pre_order: Vec<NodeId>,
	pub post_order: Vec<NodeId>,
}

impl Traversals {
	pub fn collect(tree: &Tree) -> Result<Self> {
		let mut traversals = Self {
			in_order: Vec::new(),
			pre_order: Vec::with_capacity(tree.len()),
			post_order: Vec::with_capacity(tree.len()),
		};

		tree.traverse(&mut |method, node| traversals.sequence_mut(method).push(node))?;

		Ok(traversals)
	}

	pub fn get(&self, method: TraversalMethod) -> &[NodeId] {
		match method {
			TraversalMethod::InOrder => &self.in_order,
			TraversalMethod::PreOrder => &self.pre_order,
			TraversalMethod::PostOrder => &self.post_order,
		}
	}

	fn sequence_mut(&mut self, method: TraversalMethod) -> &mut Vec<NodeId> {
		match method {
			TraversalMethod::InOrder => &mut self.in_order,
			TraversalMethod::PreOrder => &mut self.pre_order,
			TraversalMethod::PostOrder => &mut self.post_order,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.pre_order.is_empty()
	}
}

impl Display for Traversals {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.is_empty() {
			return Ok(());
		}

		for method in TraversalMethod::OUTPUT_ORDER {
			writeln!(f, "{}", self.get(method).iter().join(" "))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::seq::SliceRandom;
	use rand::{Rng, SeedableRng};
	use std::collections::HashMap;

	fn traversals(n: usize, edges: &[(NodeId, NodeId)]) -> Traversals {
		let tree = Tree::from_edges(n, edges.iter().copied()).unwrap();
		Traversals::collect(&tree).unwrap()
	}

	// every node hangs from an earlier one, labels shuffled
	fn random_edges(n: usize, rng: &mut StdRng) -> Vec<(NodeId, NodeId)> {
		let mut labels = (2..=n as NodeId).collect_vec();
		labels.shuffle(rng);
		labels.insert(0, ROOT);

		(1..n)
			.map(|idx| {
				let parent = labels[rng.gen_range(0..idx)];
				(parent, labels[idx])
			})
			.collect_vec()
	}

	fn parents(tree: &Tree) -> HashMap<NodeId, NodeId> {
		let mut parents = HashMap::new();
		let mut stack = vec![(ROOT, NO_PARENT)];
		while let Some((node, parent)) = stack.pop() {
			parents.insert(node, parent);
			for &child in tree.neighbours(node).iter().filter(|&&v| v != parent) {
				stack.push((child, node));
			}
		}
		parents
	}

	#[test]
	fn single_node() {
		let actual = traversals(1, &[]);

		assert_eq!(actual.in_order, vec![1]);
		assert_eq!(actual.pre_order, vec![1]);
		assert_eq!(actual.post_order, vec![1]);
	}

	#[test]
	fn path_of_three() {
		let actual = traversals(3, &[(1, 2), (2, 3)]);

		assert_eq!(actual.in_order, vec![3]);
		assert_eq!(actual.pre_order, vec![1, 2, 3]);
		assert_eq!(actual.post_order, vec![3, 2, 1]);
	}

	#[test]
	fn root_with_two_leaves() {
		let actual = traversals(3, &[(1, 2), (1, 3)]);

		assert_eq!(actual.in_order, vec![2, 1, 3]);
		assert_eq!(actual.pre_order, vec![1, 2, 3]);
		assert_eq!(actual.post_order, vec![2, 3, 1]);
	}

	#[test]
	fn root_with_three_leaves() {
		let actual = traversals(4, &[(1, 2), (1, 3), (1, 4)]);

		assert_eq!(actual.in_order, vec![2, 1, 3, 4]);
		assert_eq!(actual.pre_order, vec![1, 2, 3, 4]);
		assert_eq!(actual.post_order, vec![2, 3, 4, 1]);
	}

	#[test]
	fn empty_tree() {
		let actual = Traversals::collect(&Tree::empty()).unwrap();

		assert_eq!(actual, Traversals::default());
		assert_eq!(actual.to_string(), "");
	}

	#[test]
	fn full_binary_tree() {
		//       1
		//     /   \
		//    2     3
		//   / \   / \
		//  4   5 6   7
		let actual = traversals(7, &[(3, 7), (1, 3), (2, 5), (3, 6), (1, 2), (2, 4)]);

		assert_eq!(actual.in_order, vec![4, 2, 5, 1, 6, 3, 7]);
		assert_eq!(actual.pre_order, vec![1, 2, 4, 5, 3, 6, 7]);
		assert_eq!(actual.post_order, vec![4, 5, 2, 6, 7, 3, 1]);
	}

	#[test]
	fn children_visited_in_ascending_order() {
		let actual = traversals(5, &[(1, 5), (1, 3), (5, 2), (5, 4)]);

		assert_eq!(actual.pre_order, vec![1, 3, 5, 2, 4]);
		assert_eq!(actual.in_order, vec![3, 1, 2, 5, 4]);
	}

	#[test]
	fn formatted_output() {
		let actual = traversals(4, &[(1, 2), (1, 3), (1, 4)]);

		assert_eq!(actual.to_string(), "2 1 3 4\n1 2 3 4\n2 3 4 1\n");
	}

	#[test]
	fn deep_path_does_not_overflow() {
		let n = 200_000;
		let edges = (1..n as NodeId).map(|u| (u, u + 1)).collect_vec();

		let actual = traversals(n, &edges);

		assert_eq!(actual.in_order, vec![n as NodeId]);
		assert_eq!(actual.pre_order.len(), n);
		assert_eq!(actual.post_order.first(), Some(&(n as NodeId)));
		assert_eq!(actual.post_order.last(), Some(&ROOT));
	}

	#[test]
	fn orders_are_permutations() {
		let mut rng = StdRng::seed_from_u64(7);
		for n in [1, 2, 10, 257, 5_000] {
			let actual = traversals(n, &random_edges(n, &mut rng));
			let all = (1..=n as NodeId).collect_vec();

			assert_eq!(actual.pre_order.iter().copied().sorted().collect_vec(), all);
			assert_eq!(actual.post_order.iter().copied().sorted().collect_vec(), all);
			assert_eq!(actual.pre_order.first(), Some(&ROOT));
			assert_eq!(actual.post_order.last(), Some(&ROOT));
		}
	}

	#[test]
	fn in_order_placement() {
		let mut rng = StdRng::seed_from_u64(11);
		for n in [2, 3, 31, 400, 1_000] {
			let tree = Tree::from_edges(n, random_edges(n, &mut rng)).unwrap();
			let actual = Traversals::collect(&tree).unwrap();
			let parents = parents(&tree);

			let in_position: HashMap<NodeId, usize> = actual
				.in_order
				.iter()
				.enumerate()
				.map(|(idx, &node)| (node, idx))
				.collect();
			assert_eq!(in_position.len(), actual.in_order.len(), "node emitted twice");

			let subtree_of = |child: NodeId| {
				tree.nodes()
					.filter(|&node| {
						let mut current = node;
						while current != NO_PARENT && current != child {
							current = parents[&current];
						}
						current == child
					})
					.filter_map(|node| in_position.get(&node).copied())
					.collect_vec()
			};

			for node in tree.nodes() {
				let children = tree
					.neighbours(node)
					.iter()
					.copied()
					.filter(|&v| v != parents[&node])
					.collect_vec();

				match children[..] {
					[] => assert!(in_position.contains_key(&node), "leaf {node} missing"),
					[_] => assert!(!in_position.contains_key(&node), "{node} has one child"),
					[first, second, ..] => {
						let at = in_position[&node];
						assert!(subtree_of(first).into_iter().all(|idx| idx < at));
						assert!(subtree_of(second).into_iter().all(|idx| idx > at));
					}
				}
			}
		}
	}

	#[test]
	fn edge_order_is_irrelevant() {
		let mut rng = StdRng::seed_from_u64(2025);
		let n = 1_000;
		let mut edges = random_edges(n, &mut rng);
		let expected = traversals(n, &edges).to_string();

		for _ in 0..5 {
			edges.shuffle(&mut rng);
			let flipped = edges
				.iter()
				.map(|&(u, v)| if rng.gen_bool(0.5) { (v, u) } else { (u, v) })
				.collect_vec();

			assert_eq!(traversals(n, &flipped).to_string(), expected);
		}
	}

	#[test]
	fn visitor_sees_every_event_once() {
		let tree = Tree::from_edges(3, [(1, 2), (1, 3)]).unwrap();
		let mut events = Vec::new();

		tree.traverse(&mut |method, node| events.push((method, node)))
			.unwrap();

		use TraversalMethod::*;
		assert_eq!(
			events,
			vec![
				(PreOrder, 1),
				(PreOrder, 2),
				(InOrder, 2),
				(PostOrder, 2),
				(InOrder, 1),
				(PreOrder, 3),
				(InOrder, 3),
				(PostOrder, 3),
				(PostOrder, 1),
			]
		);
	}

	#[test]
	fn rejects_cycle() {
		let tree = Tree::from_edges(4, [(1, 2), (2, 3), (3, 1)]).unwrap();

		assert!(matches!(Traversals::collect(&tree), Err(Error::Cycle(_))));
	}

	#[test]
	fn rejects_disconnected() {
		let tree = Tree::from_edges(4, [(1, 2), (3, 4)]).unwrap();

		assert!(matches!(
			Traversals::collect(&tree),
			Err(Error::Disconnected { visited: 2, n: 4 })
		));
	}
}
