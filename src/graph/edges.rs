//! Full edge list construction from the content index.

use std::collections::{HashMap, HashSet};

use crate::content::{ContentIndex, PageId};

/// Whether tags become graph nodes, and which tags never do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagOptions {
	pub show: bool,
	pub exclude: HashSet<String>,
}

impl TagOptions {
	pub fn hidden() -> Self {
		Self::default()
	}

	pub fn shown() -> Self {
		Self {
			show: true,
			exclude: HashSet::new(),
		}
	}

	fn includes(&self, tag: &str) -> bool {
		self.show && !self.exclude.contains(tag)
	}
}

/// A directed link between two pages (or a page and a tag node).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	pub source: PageId,
	pub target: PageId,
}

impl Edge {
	pub fn new(source: PageId, target: PageId) -> Self {
		Self { source, target }
	}
}

/// Every edge of the site graph plus the tag nodes they introduced.
#[derive(Clone, Debug, Default)]
pub struct EdgeSet {
	/// In index order. Repeated page pairs are kept.
	pub edges: Vec<Edge>,
	/// Deduplicated, in first-seen order.
	pub tag_nodes: Vec<PageId>,
}

impl EdgeSet {
	/// Incident edge count per id over the whole edge list.
	pub fn degrees(&self) -> HashMap<&PageId, usize> {
		let mut degrees = HashMap::new();
		for edge in &self.edges {
			*degrees.entry(&edge.source).or_insert(0) += 1;
			*degrees.entry(&edge.target).or_insert(0) += 1;
		}
		degrees
	}
}

/// Builds the full edge list. Links to ids missing from the index are dropped.
pub fn build_edges(index: &ContentIndex, tags: &TagOptions) -> EdgeSet {
	let mut set = EdgeSet::default();
	let mut seen_tags = HashSet::new();

	for (source, meta) in index.iter() {
		for target in meta.links.iter().filter(|t| index.contains(t)) {
			set.edges.push(Edge::new(source.clone(), target.clone()));
		}

		for tag in meta.tags.iter().filter(|t| tags.includes(t)) {
			let tag_node = PageId::for_tag(tag);
			if seen_tags.insert(tag_node.clone()) {
				set.tag_nodes.push(tag_node.clone());
			}
			set.edges.push(Edge::new(source.clone(), tag_node));
		}
	}

	set
}
