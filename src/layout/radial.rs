//! Radial layouts over the site's folder hierarchy.

use std::f64::consts::TAU;

use super::hierarchy::Hierarchy;
use super::scene::{Scene, SceneNode};
use super::tree::{cluster, tidy};
use super::{LayoutKind, LayoutSettings, LayoutStrategy};
use crate::graph::GraphView;

/// Turns unit tree coordinates into a scene on a disc centred at the origin.
///
/// The outer radius grows with depth and with the number of leaves, so labels
/// on the rim keep `node_gap` of arc between them.
pub(super) fn radial_scene(view: &GraphView, tree: &Hierarchy, unit: &[(f64, f64)], settings: &LayoutSettings) -> Scene {
	let by_depth = tree.height() as f64 * settings.ring_step();
	let by_leaves = tree.leaves().len() as f64 * settings.node_gap / TAU;
	let radius = by_depth.max(by_leaves);

	let nodes = tree
		.nodes
		.iter()
		.enumerate()
		.map(|(i, tn)| {
			let (angle, r) = (unit[i].0 * TAU, unit[i].1 * radius);
			let (x, y) = (r * angle.sin(), -r * angle.cos());
			match tn.page {
				Some(page) => SceneNode::page(view, &view.nodes[page], x, y),
				None => SceneNode::scaffold(tree.folder_label(i), x, y),
			}
		})
		.collect();

	Scene {
		nodes,
		edges: tree_edges(tree),
	}
}

pub(super) fn tree_edges(tree: &Hierarchy) -> Vec<(usize, usize)> {
	tree.nodes
		.iter()
		.enumerate()
		.filter_map(|(i, n)| n.parent.map(|p| (p, i)))
		.collect()
}

/// Dendrogram: leaves share the outer ring.
pub struct RadialCluster;

impl LayoutStrategy for RadialCluster {
	fn kind(&self) -> LayoutKind {
		LayoutKind::RadialCluster
	}

	fn arrange(&self, view: &GraphView, settings: &LayoutSettings) -> Scene {
		let tree = Hierarchy::from_paths(view);
		radial_scene(view, &tree, &cluster(&tree), settings)
	}
}

/// Tidy tree: each node's ring is its depth.
pub struct RadialTidy;

impl LayoutStrategy for RadialTidy {
	fn kind(&self) -> LayoutKind {
		LayoutKind::RadialTidy
	}

	fn arrange(&self, view: &GraphView, settings: &LayoutSettings) -> Scene {
		let tree = Hierarchy::from_paths(view);
		radial_scene(view, &tree, &tidy(&tree), settings)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::content::{ContentIndex, PageId, PageMeta};
	use crate::graph::{Depth, TagOptions, ViewRequest};
	use crate::layout::NodeRole;

	fn view(ids: &[&str]) -> GraphView {
		let index: ContentIndex = ids
			.iter()
			.map(|id| (PageId::new(id), PageMeta::default()))
			.collect();
		let focus = PageId::new(ids[0]);
		GraphView::build(
			&index,
			&ViewRequest {
				focus: &focus,
				depth: Depth::Unbounded,
				tags: &TagOptions::hidden(),
				visited: &BTreeSet::new(),
			},
		)
	}

	fn radius(n: &SceneNode) -> f64 {
		(n.x * n.x + n.y * n.y).sqrt()
	}

	#[test]
	fn cluster_leaves_share_a_ring() {
		let v = view(&["a/b/c", "a/d", "e", "index"]);
		let settings = LayoutSettings::default();
		let scene = RadialCluster.arrange(&v, &settings);
		let ring = radius(&scene.nodes[scene.nodes.len() - 1]);
		for id in ["a/b/c", "a/d", "e"] {
			let node = scene.nodes.iter().find(|n| n.id == Some(PageId::new(id))).unwrap();
			assert!((radius(node) - ring).abs() < 1e-6);
		}
		// the index page is the root, at the centre
		let root = &scene.nodes[Hierarchy::ROOT];
		assert_eq!(root.id, Some(PageId::new("index")));
		assert!(radius(root) < 1e-9);
	}

	#[test]
	fn tidy_rings_follow_depth() {
		let v = view(&["a/b/c", "a/d", "e"]);
		let scene = RadialTidy.arrange(&v, &LayoutSettings::default());
		let find = |id: &str| scene.nodes.iter().find(|n| n.id == Some(PageId::new(id))).unwrap();
		let (e, d, c) = (radius(find("e")), radius(find("a/d")), radius(find("a/b/c")));
		assert!(e < d && d < c);
		assert!((d - 2.0 * e).abs() < 1e-6);
	}

	#[test]
	fn folders_are_scaffold_and_edges_follow_the_tree() {
		let v = view(&["a/b", "a/c"]);
		let scene = RadialCluster.arrange(&v, &LayoutSettings::default());
		// root, a (folder), a/b, a/c
		assert_eq!(scene.nodes.len(), 4);
		let scaffold: Vec<_> = scene
			.nodes
			.iter()
			.filter(|n| n.role == NodeRole::Scaffold)
			.map(|n| n.label.as_str())
			.collect();
		assert_eq!(scaffold, vec!["/", "a"]);
		assert_eq!(scene.edges.len(), 3);
	}

	#[test]
	fn rim_grows_with_leaf_count() {
		let few = view(&["a", "b"]);
		let many: Vec<String> = (0..200).map(|i| format!("p{i:03}")).collect();
		let many = view(&many.iter().map(String::as_str).collect::<Vec<_>>());
		let settings = LayoutSettings::default();
		let r_few = radius(&RadialCluster.arrange(&few, &settings).nodes[1]);
		let r_many = radius(&RadialCluster.arrange(&many, &settings).nodes[1]);
		assert!(r_many > r_few);
	}
}
