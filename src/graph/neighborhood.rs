//! Hop-limited neighborhood around the focus page.

use std::collections::{HashMap, HashSet, VecDeque};

use super::edges::{Edge, EdgeSet};
use crate::content::{ContentIndex, PageId};

/// How far from the focus page the neighborhood reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
	/// Every page in the index (and every tag node when tags are shown).
	Unbounded,
	/// At most this many undirected edge traversals.
	Hops(u32),
}

impl Depth {
	/// Negative hop counts mean unbounded.
	pub fn from_hops(hops: i32) -> Self {
		u32::try_from(hops).map_or(Depth::Unbounded, Depth::Hops)
	}
}

/// Undirected adjacency over an edge list. Parallel edges give repeated entries.
fn adjacency(edges: &[Edge]) -> HashMap<&PageId, Vec<&PageId>> {
	let mut adj: HashMap<&PageId, Vec<&PageId>> = HashMap::new();
	for edge in edges {
		adj.entry(&edge.source).or_default().push(&edge.target);
		adj.entry(&edge.target).or_default().push(&edge.source);
	}
	adj
}

/// Computes the set of ids to draw around `focus`.
///
/// Bounded mode walks the edge list breadth-first, one level per pass of a
/// `None` sentinel through the queue, following edges in both directions.
pub fn neighborhood(
	edges: &EdgeSet,
	index: &ContentIndex,
	focus: &PageId,
	depth: Depth,
	show_tags: bool,
) -> HashSet<PageId> {
	let hops = match depth {
		Depth::Unbounded => {
			let mut all: HashSet<PageId> = index.ids().cloned().collect();
			if show_tags {
				all.extend(edges.tag_nodes.iter().cloned());
			}
			return all;
		}
		Depth::Hops(hops) => hops,
	};

	let adj = adjacency(&edges.edges);
	let mut found: HashSet<&PageId> = HashSet::new();
	let mut queue: VecDeque<Option<&PageId>> = VecDeque::from([Some(focus), None]);
	let mut remaining = hops;

	while let Some(entry) = queue.pop_front() {
		match entry {
			None => {
				if remaining == 0 {
					break;
				}
				remaining -= 1;
				if !queue.is_empty() {
					queue.push_back(None);
				}
			}
			Some(id) => {
				// A revisit would only enqueue what the first visit already did.
				if found.insert(id) {
					if let Some(next) = adj.get(id) {
						queue.extend(next.iter().map(|&n| Some(n)));
					}
				}
			}
		}
	}

	found.into_iter().cloned().collect()
}
