//! Layout strategies: each turns a [`GraphView`] into a positioned [`Scene`].
//!
//! | kind             | tree                     | edges drawn      | simulated |
//! |------------------|--------------------------|------------------|-----------|
//! | `Force`          | none                     | rendered links   | yes       |
//! | `RadialCluster`  | folder hierarchy         | tree edges       | no        |
//! | `RadialTidy`     | folder hierarchy         | tree edges       | no        |
//! | `HorizontalTree` | flat, one synthetic root | tree edges       | no        |

mod force;
mod hierarchy;
mod horizontal;
mod radial;
mod scene;
mod tree;

pub use force::{Body, ForceLayout, ForceParams};
pub use hierarchy::{Hierarchy, TreeNode};
pub use horizontal::HorizontalTree;
pub use radial::{RadialCluster, RadialTidy};
pub use scene::{NodeRole, Scene, SceneNode};

use crate::config::GraphConfig;
use crate::graph::GraphView;

/// Which strategy a panel uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutKind {
	#[default]
	Force,
	RadialCluster,
	RadialTidy,
	HorizontalTree,
}

impl LayoutKind {
	/// `tree` wins over `radial`; `tidy` only matters together with `radial`.
	pub fn from_flags(radial: bool, tree: bool, tidy: bool) -> Self {
		match (radial, tree, tidy) {
			(_, true, _) => LayoutKind::HorizontalTree,
			(true, false, true) => LayoutKind::RadialTidy,
			(true, false, false) => LayoutKind::RadialCluster,
			(false, false, _) => LayoutKind::Force,
		}
	}

	pub fn strategy(self) -> Box<dyn LayoutStrategy> {
		match self {
			LayoutKind::Force => Box::new(ForceLayout),
			LayoutKind::RadialCluster => Box::new(RadialCluster),
			LayoutKind::RadialTidy => Box::new(RadialTidy),
			LayoutKind::HorizontalTree => Box::new(HorizontalTree),
		}
	}
}

/// Spacing inputs shared by every strategy, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
	pub link_distance: f64,
	/// Minimum distance between neighbouring leaves of a tree layout.
	pub node_gap: f64,
}

impl LayoutSettings {
	pub fn from_config(config: &GraphConfig) -> Self {
		Self {
			link_distance: config.link_distance,
			node_gap: config.font_size * 16.0 * 1.5,
		}
	}

	/// Distance between consecutive rings or columns.
	pub fn ring_step(&self) -> f64 {
		self.link_distance.max(10.0) * 2.0
	}
}

impl Default for LayoutSettings {
	fn default() -> Self {
		Self::from_config(&GraphConfig::default())
	}
}

/// A way of placing a view's nodes.
pub trait LayoutStrategy {
	fn kind(&self) -> LayoutKind;

	fn arrange(&self, view: &GraphView, settings: &LayoutSettings) -> Scene;

	/// Whether the scene keeps moving under the force simulation.
	fn simulated(&self) -> bool {
		false
	}
}
