//! Left-to-right tree with every node hanging off one synthetic root.

use super::hierarchy::Hierarchy;
use super::radial::tree_edges;
use super::scene::{Scene, SceneNode};
use super::tree::tidy;
use super::{LayoutKind, LayoutSettings, LayoutStrategy};
use crate::graph::GraphView;

pub struct HorizontalTree;

impl LayoutStrategy for HorizontalTree {
	fn kind(&self) -> LayoutKind {
		LayoutKind::HorizontalTree
	}

	/// Root on the left, children stacked in one column `node_gap` apart,
	/// the whole drawing centred on the origin.
	fn arrange(&self, view: &GraphView, settings: &LayoutSettings) -> Scene {
		let tree = Hierarchy::flat(view);
		let unit = tidy(&tree);

		let width = settings.ring_step() * 2.0;
		let height = tree.leaves().len().max(1) as f64 * settings.node_gap;

		let nodes = tree
			.nodes
			.iter()
			.enumerate()
			.map(|(i, tn)| {
				let (breadth, depth) = unit[i];
				let x = (depth - 0.5) * width;
				let y = (breadth - 0.5) * height;
				match tn.page {
					Some(page) => SceneNode::page(view, &view.nodes[page], x, y),
					None => SceneNode::scaffold(tree.folder_label(i), x, y),
				}
			})
			.collect();

		Scene {
			nodes,
			edges: tree_edges(&tree),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::content::{ContentIndex, PageId, PageMeta};
	use crate::graph::{Depth, TagOptions, ViewRequest};
	use crate::layout::NodeRole;

	#[test]
	fn one_column_of_children() {
		let index: ContentIndex = ["x/y", "a", "b", "c"]
			.iter()
			.map(|id| (PageId::new(id), PageMeta::default()))
			.collect();
		let focus = PageId::new("a");
		let view = GraphView::build(
			&index,
			&ViewRequest {
				focus: &focus,
				depth: Depth::Unbounded,
				tags: &TagOptions::hidden(),
				visited: &BTreeSet::new(),
			},
		);

		let settings = LayoutSettings::default();
		let scene = HorizontalTree.arrange(&view, &settings);
		assert_eq!(scene.nodes.len(), 5);
		assert_eq!(scene.nodes[0].role, NodeRole::Scaffold);
		assert_eq!(scene.edges, vec![(0, 1), (0, 2), (0, 3), (0, 4)]);

		let root_x = scene.nodes[0].x;
		let column_x = scene.nodes[1].x;
		assert!(column_x > root_x);
		for pair in scene.nodes[1..].windows(2) {
			assert!((pair[0].x - column_x).abs() < 1e-9);
			assert!(pair[1].y > pair[0].y);
		}
		let gap = scene.nodes[2].y - scene.nodes[1].y;
		assert!((gap - settings.node_gap).abs() < 1e-6);
		// centred vertically
		assert!(scene.nodes[0].y.abs() < 1e-9);
	}
}
