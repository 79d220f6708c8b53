//! Force-directed layout.
//!
//! Charge repulsion and integration come from the `force_graph` simulation.
//! The two forces it lacks, a rest length for links and a pull towards the
//! centre, are applied here on a plain slice of bodies after every step.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::SimulationParameters;

use super::scene::{Scene, SceneNode};
use super::{LayoutKind, LayoutSettings, LayoutStrategy};
use crate::content::PageId;
use crate::graph::GraphView;

/// Fraction of a link's length error corrected per step.
const LINK_STRENGTH: f64 = 0.1;

/// Knobs of the live simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
	pub repel: f64,
	pub center: f64,
	pub link_distance: f64,
}

impl ForceParams {
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: (300.0 * self.repel) as f32,
			force_spring: 0.01,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}

	/// Applies link and centering corrections for one step.
	pub fn constrain(&self, bodies: &mut [Body], edges: &[(usize, usize)]) {
		relax_links(bodies, edges, self.link_distance, LINK_STRENGTH);
		pull_to_center(bodies, self.center);
	}
}

/// Position of one simulated node. Pinned bodies are never moved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub pinned: bool,
}

/// Nudges every linked pair towards `distance` apart.
pub fn relax_links(bodies: &mut [Body], edges: &[(usize, usize)], distance: f64, strength: f64) {
	for &(a, b) in edges {
		if a == b {
			continue;
		}
		let (dx, dy) = (bodies[b].x - bodies[a].x, bodies[b].y - bodies[a].y);
		let len = (dx * dx + dy * dy).sqrt().max(1e-6);
		let k = (len - distance) / len * strength;
		let (share_a, share_b) = match (bodies[a].pinned, bodies[b].pinned) {
			(true, true) => continue,
			(true, false) => (0.0, 1.0),
			(false, true) => (1.0, 0.0),
			(false, false) => (0.5, 0.5),
		};
		bodies[a].x += dx * k * share_a;
		bodies[a].y += dy * k * share_a;
		bodies[b].x -= dx * k * share_b;
		bodies[b].y -= dy * k * share_b;
	}
}

/// Shifts free bodies so the mean position moves `strength` of the way to
/// the origin.
pub fn pull_to_center(bodies: &mut [Body], strength: f64) {
	if bodies.is_empty() || strength <= 0.0 {
		return;
	}
	let n = bodies.len() as f64;
	let (mx, my) = bodies
		.iter()
		.fold((0.0, 0.0), |(x, y), b| (x + b.x / n, y + b.y / n));
	for body in bodies.iter_mut().filter(|b| !b.pinned) {
		body.x -= mx * strength;
		body.y -= my * strength;
	}
}

pub struct ForceLayout;

impl LayoutStrategy for ForceLayout {
	fn kind(&self) -> LayoutKind {
		LayoutKind::Force
	}

	/// Nodes start evenly spread on a ring; edges are the rendered links.
	fn arrange(&self, view: &GraphView, settings: &LayoutSettings) -> Scene {
		let n = view.nodes.len();
		let radius = if n > 1 { settings.link_distance.max(10.0) * 3.0 } else { 0.0 };
		let nodes = view
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = i as f64 * 2.0 * PI / n as f64;
				SceneNode::page(view, node, radius * angle.cos(), radius * angle.sin())
			})
			.collect();

		let position: HashMap<&PageId, usize> =
			view.nodes.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();
		let edges = view
			.links
			.iter()
			.filter_map(|l| Some((*position.get(&l.source)?, *position.get(&l.target)?)))
			.collect();

		Scene { nodes, edges }
	}

	fn simulated(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::content::{ContentIndex, PageMeta};
	use crate::graph::{Depth, TagOptions, ViewRequest};
	use crate::layout::NodeRole;

	fn body(x: f64, y: f64) -> Body {
		Body { x, y, pinned: false }
	}

	fn dist(a: &Body, b: &Body) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn links_converge_to_rest_length() {
		let mut bodies = vec![body(0.0, 0.0), body(100.0, 0.0)];
		for _ in 0..200 {
			relax_links(&mut bodies, &[(0, 1)], 30.0, LINK_STRENGTH);
		}
		assert!((dist(&bodies[0], &bodies[1]) - 30.0).abs() < 0.01);
	}

	#[test]
	fn pinned_bodies_stay_put() {
		let mut bodies = vec![
			Body {
				x: 0.0,
				y: 0.0,
				pinned: true,
			},
			body(10.0, 0.0),
		];
		relax_links(&mut bodies, &[(0, 1)], 50.0, 0.5);
		pull_to_center(&mut bodies, 0.5);
		assert_eq!((bodies[0].x, bodies[0].y), (0.0, 0.0));
		assert!(bodies[1].x > 10.0);
	}

	#[test]
	fn centering_moves_the_mean() {
		let mut bodies = vec![body(10.0, 10.0), body(30.0, 10.0)];
		pull_to_center(&mut bodies, 1.0);
		let mx = (bodies[0].x + bodies[1].x) / 2.0;
		let my = (bodies[0].y + bodies[1].y) / 2.0;
		assert!(mx.abs() < 1e-9 && my.abs() < 1e-9);
		assert!((dist(&bodies[0], &bodies[1]) - 20.0).abs() < 1e-9);
	}

	#[test]
	fn arrange_maps_links_to_indices() {
		let page = |links: &[&str]| PageMeta {
			title: String::new(),
			links: links.iter().map(|l| PageId::new(l)).collect(),
			tags: Vec::new(),
		};
		let index: ContentIndex = [
			(PageId::new("a"), page(&["b", "b"])),
			(PageId::new("b"), page(&["c"])),
			(PageId::new("c"), page(&[])),
		]
		.into_iter()
		.collect();
		let focus = PageId::new("b");
		let visited = BTreeSet::from([PageId::new("c")]);
		let view = GraphView::build(
			&index,
			&ViewRequest {
				focus: &focus,
				depth: Depth::Hops(1),
				tags: &TagOptions::hidden(),
				visited: &visited,
			},
		);

		let scene = ForceLayout.arrange(&view, &LayoutSettings::default());
		assert_eq!(scene.nodes.len(), 3);
		assert_eq!(scene.edges, vec![(0, 1), (0, 1), (1, 2)]);
		let roles: Vec<_> = scene.nodes.iter().map(|n| n.role).collect();
		assert_eq!(roles, vec![NodeRole::Plain, NodeRole::Current, NodeRole::Visited]);
		assert!(ForceLayout.simulated());
	}
}
