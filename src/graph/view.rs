//! The bounded node/link set handed to a layout.

use std::collections::{BTreeSet, HashSet};

use super::edges::{Edge, TagOptions, build_edges};
use super::neighborhood::{Depth, neighborhood};
use crate::content::{ContentIndex, PageId};

/// A node to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewNode {
	pub id: PageId,
	/// `#tag` for tag nodes, otherwise the page title, falling back to the id.
	pub text: String,
	pub tags: Vec<String>,
	/// Incident edges in the unfiltered edge list.
	pub degree: usize,
}

impl ViewNode {
	/// Drawn radius: full-graph importance, not subgraph-local.
	pub fn radius(&self) -> f64 {
		2.0 + (self.degree as f64).sqrt()
	}
}

/// Everything one render needs to know about the graph.
#[derive(Clone, Debug, Default)]
pub struct GraphView {
	pub focus: PageId,
	/// Sorted by id.
	pub nodes: Vec<ViewNode>,
	/// Edges with both ends in `nodes`, duplicates kept.
	pub links: Vec<Edge>,
	pub visited: BTreeSet<PageId>,
	/// Outgoing links of the focus page, as listed in the index.
	pub focus_links: Vec<PageId>,
}

/// What to build a view around.
#[derive(Clone, Debug)]
pub struct ViewRequest<'a> {
	pub focus: &'a PageId,
	pub depth: Depth,
	pub tags: &'a TagOptions,
	pub visited: &'a BTreeSet<PageId>,
}

impl GraphView {
	pub fn build(index: &ContentIndex, request: &ViewRequest<'_>) -> Self {
		let edges = build_edges(index, request.tags);
		let members = neighborhood(
			&edges,
			index,
			request.focus,
			request.depth,
			request.tags.show,
		);
		let degrees = edges.degrees();

		let mut nodes: Vec<ViewNode> = members
			.iter()
			.map(|id| {
				let meta = index.get(id);
				let text = match id.tag_name() {
					Some(tag) => format!("#{tag}"),
					None => meta
						.map(|m| m.title.clone())
						.filter(|t| !t.is_empty())
						.unwrap_or_else(|| id.to_string()),
				};
				ViewNode {
					id: id.clone(),
					text,
					tags: meta.map(|m| m.tags.clone()).unwrap_or_default(),
					degree: degrees.get(id).copied().unwrap_or(0),
				}
			})
			.collect();
		nodes.sort_by(|a, b| a.id.cmp(&b.id));

		let links = visible_links(edges.edges, &members);
		let focus_links = index
			.get(request.focus)
			.map(|m| m.links.clone())
			.unwrap_or_default();

		Self {
			focus: request.focus.clone(),
			nodes,
			links,
			visited: request.visited.clone(),
			focus_links,
		}
	}

	pub fn contains(&self, id: &PageId) -> bool {
		self.nodes.binary_search_by(|n| n.id.cmp(id)).is_ok()
	}

	pub fn is_visited(&self, id: &PageId) -> bool {
		self.visited.contains(id)
	}
}

fn visible_links(edges: Vec<Edge>, members: &HashSet<PageId>) -> Vec<Edge> {
	edges
		.into_iter()
		.filter(|e| members.contains(&e.source) && members.contains(&e.target))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content::PageMeta;

	fn sample() -> ContentIndex {
		let page = |title: &str, links: &[&str], tags: &[&str]| PageMeta {
			title: title.to_string(),
			links: links.iter().map(|l| PageId::new(l)).collect(),
			tags: tags.iter().map(|t| t.to_string()).collect(),
		};
		[
			(PageId::new("a"), page("Alpha", &["b", "b"], &["rust"])),
			(PageId::new("b"), page("", &["c"], &[])),
			(PageId::new("c"), page("Gamma", &["d"], &[])),
			(PageId::new("d"), page("Delta", &[], &[])),
		]
		.into_iter()
		.collect()
	}

	fn view(focus: &str, depth: Depth, tags: &TagOptions) -> GraphView {
		let focus = PageId::new(focus);
		let visited = BTreeSet::from([PageId::new("c")]);
		GraphView::build(
			&sample(),
			&ViewRequest {
				focus: &focus,
				depth,
				tags,
				visited: &visited,
			},
		)
	}

	#[test]
	fn links_stay_inside_the_neighborhood() {
		let v = view("a", Depth::Hops(1), &TagOptions::hidden());
		let ids: Vec<_> = v.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["a", "b"]);
		assert_eq!(v.links.len(), 2);
		for link in &v.links {
			assert!(v.contains(&link.source) && v.contains(&link.target));
		}
	}

	#[test]
	fn display_text() {
		let v = view("b", Depth::Unbounded, &TagOptions::shown());
		let text = |id: &str| {
			v.nodes
				.iter()
				.find(|n| n.id.as_str() == id)
				.map(|n| n.text.clone())
				.unwrap()
		};
		assert_eq!(text("a"), "Alpha");
		assert_eq!(text("b"), "b");
		assert_eq!(text("tags/rust"), "#rust");
	}

	#[test]
	fn mixed_case_tags_keep_their_text() {
		let idx: ContentIndex = [(
			PageId::new("a"),
			PageMeta {
				title: "A".to_string(),
				links: Vec::new(),
				tags: vec!["Rust".to_string(), "rust".to_string()],
			},
		)]
		.into_iter()
		.collect();
		let focus = PageId::new("a");
		let tags = TagOptions {
			show: true,
			exclude: ["rust".to_string()].into_iter().collect(),
		};
		let v = GraphView::build(
			&idx,
			&ViewRequest {
				focus: &focus,
				depth: Depth::Hops(1),
				tags: &tags,
				visited: &BTreeSet::new(),
			},
		);
		let nodes: Vec<_> = v.nodes.iter().map(|n| (n.id.as_str(), n.text.as_str())).collect();
		assert_eq!(nodes, vec![("a", "A"), ("tags/Rust", "#Rust")]);
		assert_eq!(v.links.len(), 1);
	}

	#[test]
	fn degree_uses_the_full_edge_list() {
		let v = view("d", Depth::Hops(0), &TagOptions::hidden());
		assert_eq!(v.nodes.len(), 1);
		assert!(v.links.is_empty());
		assert_eq!(v.nodes[0].degree, 1);
		assert_eq!(v.nodes[0].radius(), 3.0);
	}

	#[test]
	fn hiding_tags_returns_the_page_subgraph() {
		let with = view("a", Depth::Hops(2), &TagOptions::shown());
		let without = view("a", Depth::Hops(2), &TagOptions::hidden());
		let page_nodes: Vec<_> = with.nodes.iter().filter(|n| !n.id.is_tag()).cloned().collect();
		let page_links: Vec<_> = with.links.iter().filter(|e| !e.target.is_tag()).cloned().collect();
		assert!(with.nodes.iter().any(|n| n.id.is_tag()));
		assert_eq!(page_links, without.links);
		assert_eq!(
			page_nodes.iter().map(|n| &n.id).collect::<Vec<_>>(),
			without.nodes.iter().map(|n| &n.id).collect::<Vec<_>>()
		);
	}

	#[test]
	fn carries_focus_links_and_visited() {
		let v = view("a", Depth::Hops(1), &TagOptions::hidden());
		assert_eq!(v.focus_links, vec![PageId::new("b"), PageId::new("b")]);
		assert!(v.is_visited(&PageId::new("c")));
		assert!(!v.is_visited(&PageId::new("a")));
	}
}
