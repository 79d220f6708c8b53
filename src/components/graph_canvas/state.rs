//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, view
//! transforms for pan/zoom, and highlight state for hover effects with smooth
//! intensity transitions. Static layouts use the same node store with every
//! node anchored and the simulation never stepped.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Theme};
use super::types::CanvasData;
use crate::config::GraphConfig;
use crate::content::PageId;
use crate::layout::{Body, ForceParams, NodeRole};

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// `None` for scaffold nodes, which cannot be clicked.
	pub id: Option<PageId>,
	pub label: String,
	pub color: Color,
	/// World-space radius.
	pub radius: f64,
	pub role: NodeRole,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Set once the pointer has travelled far enough to not count as a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer travel, in screen pixels, below which a press-release is a click.
const CLICK_SLOP: f64 = 3.0;

/// Seconds a node stays lit after it leaves the hover set, so brushing past
/// the edge of a hit zone does not flicker.
const HOLD: f64 = 0.12;
/// Exponential rates per second: ~150ms to 95% lit, ~250ms to 95% dark.
const FADE_IN: f64 = 6.0;
const FADE_OUT: f64 = 4.0;
/// Levels below this are dropped.
const DARK: f64 = 0.005;

/// Smoothed 0..1 levels for a changing set of lit nodes.
#[derive(Clone, Debug, Default)]
struct Fader {
	level: HashMap<DefaultNodeIdx, f64>,
	hold: HashMap<DefaultNodeIdx, f64>,
}

impl Fader {
	fn light(&mut self, lit: &HashSet<DefaultNodeIdx>) {
		for &idx in lit {
			self.hold.insert(idx, HOLD);
		}
	}

	/// Moves every level toward 1 if lit, else toward 0 once its hold expires.
	fn step(&mut self, lit: &HashSet<DefaultNodeIdx>, dt: f64) {
		let rise = 1.0 - (-FADE_IN * dt).exp();
		let decay = (-FADE_OUT * dt).exp();

		for &idx in lit {
			let level = self.level.entry(idx).or_insert(0.0);
			*level += (1.0 - *level) * rise;
		}
		self.hold.retain(|idx, left| {
			if !lit.contains(idx) {
				*left -= dt;
			}
			*left > 0.0
		});
		let hold = &self.hold;
		self.level.retain(|idx, level| {
			if !lit.contains(idx) && !hold.contains_key(idx) {
				*level *= decay;
			}
			*level > DARK
		});
	}

	fn get(&self, idx: DefaultNodeIdx) -> f64 {
		self.level.get(&idx).copied().unwrap_or(0.0)
	}

	fn max(&self) -> f64 {
		self.level.values().copied().fold(0.0, f64::max)
	}
}

/// Hover highlighting with smooth transitions.
///
/// `lit` covers the hovered node and its highlight neighbors; `ring` only the
/// hovered node, which also gets an outline, a larger label and its edges lit.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	targets: HashSet<DefaultNodeIdx>,
	lit: Fader,
	ring: Fader,
}

impl HighlightState {
	/// Hovers `node`, lighting it together with `neighbors`.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		neighbors: impl IntoIterator<Item = DefaultNodeIdx>,
	) {
		if self.hovered_node == node {
			return;
		}
		self.hovered_node = node;
		self.targets.clear();
		if let Some(idx) = node {
			self.targets.insert(idx);
			self.targets.extend(neighbors);
			self.lit.light(&self.targets);
			self.ring.light(&HashSet::from([idx]));
		}
	}

	pub fn tick(&mut self, dt: f64) {
		self.lit.step(&self.targets, dt);
		let hovered: HashSet<_> = self.hovered_node.into_iter().collect();
		self.ring.step(&hovered, dt);
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.lit.get(idx)
	}

	pub fn hover_ring_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.ring.get(idx)
	}

	/// Highlight of an edge: lit while either end is the hovered node.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		self.ring.get(idx1).max(self.ring.get(idx2))
	}

	/// Strongest highlight on screen, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.lit.max()
	}
}

/// Core graph state combining physics simulation with interaction and highlight tracking.
///
/// Rebuilt whenever the canvas receives new data, then mutated each frame by
/// the animation loop.
pub struct GraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub simulated: bool,
	pub focus_on_hover: bool,
	forces: ForceParams,
	/// Scene order; `edges` index into it.
	order: Vec<DefaultNodeIdx>,
	edges: Vec<(usize, usize)>,
	hover_neighbors: Vec<DefaultNodeIdx>,
}

impl GraphState {
	pub fn new(data: &CanvasData, config: &GraphConfig, theme: &Theme, width: f64, height: f64) -> Self {
		let forces = ForceParams {
			repel: config.repel_force,
			center: config.center_force,
			link_distance: config.link_distance,
		};
		let mut graph = ForceGraph::new(forces.simulation_parameters());
		let mut order = Vec::with_capacity(data.scene.nodes.len());

		for node in &data.scene.nodes {
			let idx = graph.add_node(NodeData {
				x: node.x as f32,
				y: node.y as f32,
				mass: 10.0,
				is_anchor: !data.simulated,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: theme.node_color(node.role),
					radius: node.radius,
					role: node.role,
				},
			});
			order.push(idx);
		}

		let mut edges = Vec::with_capacity(data.scene.edges.len());
		for &(a, b) in &data.scene.edges {
			if let (Some(&src), Some(&tgt)) = (order.get(a), order.get(b)) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((a, b));
			}
		}

		let hover_neighbors = data
			.hover_neighbors
			.iter()
			.filter_map(|&i| order.get(i).copied())
			.collect();

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: config.scale,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			simulated: data.simulated,
			focus_on_hover: config.focus_on_hover,
			forces,
			order,
			edges,
			hover_neighbors,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius.max(node.data.user_data.radius);
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Page behind a node, if it stands for one.
	pub fn page_at(&self, idx: DefaultNodeIdx) -> Option<PageId> {
		let mut page = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				page = node.data.user_data.id.clone();
			}
		});
		page
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, self.hover_neighbors.iter().copied());
	}

	pub fn set_anchor(&mut self, idx: DefaultNodeIdx, anchored: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = anchored;
			}
		});
	}

	/// Ends a drag. Simulated nodes are released back to the forces; nodes of
	/// a static layout stay where they were dropped.
	pub fn release_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			if self.simulated {
				self.set_anchor(idx, false);
			}
		}
		self.drag.active = false;
		self.drag.moved = false;
	}

	/// Pointer pressed at screen `(x, y)`: grabs the node under it, or starts
	/// panning the background when `pan` is allowed.
	pub fn press(&mut self, x: f64, y: f64, config: &ScaleConfig, pan: bool) {
		if let Some(idx) = self.node_at_position(x, y, config) {
			let mut start = (0.0, 0.0);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					start = (node.x(), node.y());
				}
			});
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: start.0,
				node_start_y: start.1,
				moved: false,
			};
		} else if pan {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Pointer moved to screen `(x, y)`. Hovers while idle, otherwise moves the
	/// grabbed node (when `drag` is allowed) or the view.
	pub fn move_pointer(&mut self, x: f64, y: f64, config: &ScaleConfig, drag: bool) {
		if self.drag.active {
			let (sx, sy) = (x - self.drag.start_x, y - self.drag.start_y);
			if (sx * sx + sy * sy).sqrt() > CLICK_SLOP {
				self.drag.moved = true;
			}
			let Some(idx) = self.drag.node_idx.filter(|_| drag && self.drag.moved) else {
				return;
			};
			let (nx, ny) = (
				self.drag.node_start_x + (sx / self.transform.k) as f32,
				self.drag.node_start_y + (sy / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		} else {
			let hovered = self.node_at_position(x, y, config);
			self.set_hover(hovered);
		}
	}

	/// Pointer released. Returns the page to open when the press was a click
	/// on a page or tag node.
	pub fn release(&mut self) -> Option<PageId> {
		let clicked = match self.drag.node_idx {
			Some(idx) if self.drag.active && !self.drag.moved => self.page_at(idx),
			_ => None,
		};
		self.release_drag();
		self.pan.active = false;
		clicked
	}

	/// Pointer left the canvas.
	pub fn leave(&mut self) {
		self.release_drag();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Wheel zoom around screen `(x, y)`, clamped to 0.1..10.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		if self.simulated {
			self.graph.update(dt);
			self.apply_constraints();
		}
		self.highlight.tick(dt as f64);
	}

	/// Link rest length and centering, which `force_graph` does not model.
	fn apply_constraints(&mut self) {
		let slot: HashMap<DefaultNodeIdx, usize> =
			self.order.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();
		let mut bodies = vec![
			Body {
				x: 0.0,
				y: 0.0,
				pinned: true,
			};
			self.order.len()
		];
		self.graph.visit_nodes(|node| {
			if let Some(&i) = slot.get(&node.index()) {
				bodies[i] = Body {
					x: node.x() as f64,
					y: node.y() as f64,
					pinned: node.data.is_anchor,
				};
			}
		});

		self.forces.constrain(&mut bodies, &self.edges);

		self.graph.visit_nodes_mut(|node| {
			if let Some(&i) = slot.get(&node.index()) {
				if !node.data.is_anchor {
					node.data.x = bodies[i].x as f32;
					node.data.y = bodies[i].y as f32;
				}
			}
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::{Scene, SceneNode};

	fn data(simulated: bool) -> CanvasData {
		let node = |id: &str, x: f64| SceneNode {
			id: Some(PageId::new(id)),
			label: id.to_string(),
			x,
			y: 0.0,
			radius: 3.0,
			role: NodeRole::Plain,
		};
		CanvasData {
			scene: Scene {
				nodes: vec![node("a", -100.0), node("b", 100.0), node("c", 0.0)],
				edges: vec![(0, 1)],
			},
			simulated,
			hover_neighbors: vec![2],
		}
	}

	fn positions(state: &GraphState) -> Vec<(f32, f32)> {
		let mut out = Vec::new();
		state.graph.visit_nodes(|n| out.push((n.x(), n.y())));
		out
	}

	#[test]
	fn static_layouts_do_not_move() {
		let mut state = GraphState::new(&data(false), &GraphConfig::default(), &Theme::light(), 400.0, 300.0);
		let before = positions(&state);
		for _ in 0..30 {
			state.tick(0.016);
		}
		assert_eq!(positions(&state), before);
	}

	#[test]
	fn hover_lights_focus_links() {
		let mut state = GraphState::new(&data(true), &GraphConfig::default(), &Theme::light(), 400.0, 300.0);
		let a = state.order[0];
		let c = state.order[2];
		state.set_hover(Some(a));
		state.highlight.tick(0.5);
		assert!(state.highlight.node_intensity(a) > 0.9);
		assert!(state.highlight.node_intensity(c) > 0.9);
		assert!(state.highlight.edge_intensity(a, state.order[1]) > 0.9);
		assert_eq!(state.highlight.node_intensity(state.order[1]), 0.0);

		state.set_hover(None);
		for _ in 0..100 {
			state.highlight.tick(0.05);
		}
		assert_eq!(state.highlight.max_intensity(), 0.0);
	}

	#[test]
	fn hit_testing_uses_transform() {
		let state = GraphState::new(&data(false), &GraphConfig { scale: 1.0, ..GraphConfig::default() }, &Theme::light(), 400.0, 300.0);
		let hit = state.node_at_position(300.0, 150.0, &ScaleConfig::default());
		assert_eq!(hit, Some(state.order[1]));
		assert_eq!(state.page_at(state.order[1]), Some(PageId::new("b")));
		assert_eq!(state.node_at_position(250.0, 100.0, &ScaleConfig::default()), None);
	}

	fn at_unit_zoom(simulated: bool) -> GraphState {
		let config = GraphConfig {
			scale: 1.0,
			..GraphConfig::default()
		};
		GraphState::new(&data(simulated), &config, &Theme::light(), 400.0, 300.0)
	}

	fn anchored(state: &GraphState, idx: DefaultNodeIdx) -> bool {
		let mut anchored = false;
		state.graph.visit_nodes(|n| {
			if n.index() == idx {
				anchored = n.data.is_anchor;
			}
		});
		anchored
	}

	#[test]
	fn press_and_release_is_a_click() {
		let mut state = at_unit_zoom(true);
		let scale = ScaleConfig::default();
		state.press(300.0, 150.0, &scale, true);
		state.move_pointer(301.0, 151.0, &scale, true);
		assert_eq!(state.release(), Some(PageId::new("b")));
		assert!(!state.drag.active);
	}

	#[test]
	fn dragging_moves_then_releases_the_node() {
		let mut state = at_unit_zoom(true);
		let scale = ScaleConfig::default();
		let b = state.order[1];
		state.press(300.0, 150.0, &scale, true);
		state.move_pointer(320.0, 150.0, &scale, true);
		assert!(anchored(&state, b));
		assert_eq!(positions(&state)[1], (120.0, 0.0));
		assert_eq!(state.release(), None);
		assert!(!anchored(&state, b));
	}

	#[test]
	fn drag_can_be_disabled() {
		let mut state = at_unit_zoom(false);
		let scale = ScaleConfig::default();
		state.press(300.0, 150.0, &scale, true);
		state.move_pointer(340.0, 150.0, &scale, false);
		assert_eq!(positions(&state)[1], (100.0, 0.0));
		assert_eq!(state.release(), None);
	}

	#[test]
	fn background_drag_pans_when_allowed() {
		let scale = ScaleConfig::default();
		let mut state = at_unit_zoom(false);
		state.press(250.0, 100.0, &scale, true);
		state.move_pointer(260.0, 110.0, &scale, true);
		assert_eq!((state.transform.x, state.transform.y), (210.0, 160.0));
		assert_eq!(state.release(), None);

		let mut fixed = at_unit_zoom(false);
		fixed.press(250.0, 100.0, &scale, false);
		fixed.move_pointer(260.0, 110.0, &scale, true);
		assert_eq!((fixed.transform.x, fixed.transform.y), (200.0, 150.0));
	}

	#[test]
	fn zoom_is_clamped_around_the_cursor() {
		let mut state = at_unit_zoom(false);
		state.zoom_at(200.0, 150.0, -1.0);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		assert_eq!((state.transform.x, state.transform.y), (200.0, 150.0));
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 1.0);
		}
		assert_eq!(state.transform.k, 0.1);
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, -1.0);
		}
		assert_eq!(state.transform.k, 10.0);
	}

	#[test]
	fn scaffold_nodes_are_not_clickable() {
		let mut data = data(false);
		data.scene.nodes[1].id = None;
		let mut state = GraphState::new(
			&data,
			&GraphConfig {
				scale: 1.0,
				..GraphConfig::default()
			},
			&Theme::light(),
			400.0,
			300.0,
		);
		state.press(300.0, 150.0, &ScaleConfig::default(), true);
		assert_eq!(state.release(), None);
	}
}
