//! Positioned nodes and edges, the common output of every layout.

use crate::content::PageId;
use crate::graph::{GraphView, ViewNode};

/// Radius of hierarchy joints that stand for no page.
pub const SCAFFOLD_RADIUS: f64 = 2.0;

/// What a node stands for, which decides its color and whether it is clickable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	/// The focus page.
	Current,
	/// A page already seen.
	Visited,
	Tag,
	Plain,
	/// A folder or root synthesized by a tree layout.
	Scaffold,
}

impl NodeRole {
	pub fn of(view: &GraphView, id: &PageId) -> Self {
		if id == &view.focus {
			NodeRole::Current
		} else if id.is_tag() {
			NodeRole::Tag
		} else if view.is_visited(id) {
			NodeRole::Visited
		} else {
			NodeRole::Plain
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	/// `None` for scaffold nodes.
	pub id: Option<PageId>,
	pub label: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub role: NodeRole,
}

impl SceneNode {
	pub fn page(view: &GraphView, node: &ViewNode, x: f64, y: f64) -> Self {
		Self {
			id: Some(node.id.clone()),
			label: node.text.clone(),
			x,
			y,
			radius: node.radius(),
			role: NodeRole::of(view, &node.id),
		}
	}

	pub fn scaffold(label: &str, x: f64, y: f64) -> Self {
		Self {
			id: None,
			label: label.to_string(),
			x,
			y,
			radius: SCAFFOLD_RADIUS,
			role: NodeRole::Scaffold,
		}
	}
}

/// Input to the canvas: nodes with starting positions and the edges between
/// them, as index pairs into `nodes`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<SceneNode>,
	pub edges: Vec<(usize, usize)>,
}
