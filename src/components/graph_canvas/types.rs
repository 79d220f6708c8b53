//! Input to the graph canvas component.

use std::collections::{BTreeSet, HashMap};

use crate::config::GraphConfig;
use crate::content::{ContentIndex, PageId};
use crate::graph::{GraphView, ViewRequest};
use crate::layout::{LayoutSettings, Scene};

/// Everything the canvas draws for one render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasData {
	pub scene: Scene,
	/// Whether the force simulation moves the nodes.
	pub simulated: bool,
	/// Scene nodes lit up with any hovered node: the focus page's outgoing
	/// links that are on screen.
	pub hover_neighbors: Vec<usize>,
}

impl CanvasData {
	/// Builds the view around `focus` and lays it out as `config` asks.
	pub fn build(
		index: &ContentIndex,
		focus: &PageId,
		config: &GraphConfig,
		visited: &BTreeSet<PageId>,
	) -> Self {
		let tags = config.tag_options();
		let view = GraphView::build(
			index,
			&ViewRequest {
				focus,
				depth: config.depth,
				tags: &tags,
				visited,
			},
		);
		let strategy = config.layout.strategy();
		let scene = strategy.arrange(&view, &LayoutSettings::from_config(config));

		let by_id: HashMap<&PageId, usize> = scene
			.nodes
			.iter()
			.enumerate()
			.filter_map(|(i, n)| Some((n.id.as_ref()?, i)))
			.collect();
		let mut hover_neighbors: Vec<usize> = view
			.focus_links
			.iter()
			.filter_map(|id| by_id.get(id).copied())
			.collect();
		hover_neighbors.sort_unstable();
		hover_neighbors.dedup();

		Self {
			simulated: strategy.simulated(),
			hover_neighbors,
			scene,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::content::PageMeta;
	use crate::graph::Depth;
	use crate::layout::LayoutKind;

	fn index() -> ContentIndex {
		let page = |links: &[&str]| PageMeta {
			title: String::new(),
			links: links.iter().map(|l| PageId::new(l)).collect(),
			tags: Vec::new(),
		};
		[
			(PageId::new("a"), page(&["b", "c", "b"])),
			(PageId::new("b"), page(&[])),
			(PageId::new("c"), page(&["d"])),
			(PageId::new("d"), page(&[])),
		]
		.into_iter()
		.collect()
	}

	#[test]
	fn hover_neighbors_are_focus_links_on_screen() {
		let cfg = GraphConfig {
			depth: Depth::Hops(1),
			..GraphConfig::default()
		};
		let data = CanvasData::build(&index(), &PageId::new("a"), &cfg, &BTreeSet::new());
		assert!(data.simulated);
		let ids: Vec<_> = data
			.hover_neighbors
			.iter()
			.map(|&i| data.scene.nodes[i].id.clone().unwrap())
			.collect();
		assert_eq!(ids, vec![PageId::new("b"), PageId::new("c")]);
	}

	#[test]
	fn tree_layouts_are_static() {
		let cfg = GraphConfig {
			layout: LayoutKind::RadialCluster,
			..GraphConfig::default()
		};
		let data = CanvasData::build(&index(), &PageId::new("d"), &cfg, &BTreeSet::new());
		assert!(!data.simulated);
		assert!(data.hover_neighbors.is_empty());
	}
}
