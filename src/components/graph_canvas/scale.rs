//! Zoom-dependent scaling configuration for graph visuals.
//!
//! This module centralizes all zoom-dependent visual parameters, making it easy to
//! understand and tune how elements behave at different zoom levels.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph. Values in world-space
//!   scale proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.
//!
//! Node radii and label text live in world-space, like the layout itself. Line
//! widths and hit targets are kept usable on screen at any zoom.

use crate::config::GraphConfig;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// `(min_screen_px, max_screen_px)` - use `f64::NEG_INFINITY` or `f64::INFINITY` for unbounded.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	///
	/// The returned value should be used directly in world-space drawing commands
	/// (after the canvas transform has been applied).
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Labels: invisible when zoomed out, fading in as the reader zooms in.
	/// `alpha = max((k * gain - 1) / 3.75, 0)`, capped at 1.
	ZoomIn { gain: f64 },
}

impl AlphaBehavior {
	/// Compute alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::ZoomIn { gain } => ((k * gain - 1.0) / 3.75).clamp(0.0, 1.0),
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeScaleConfig {
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in world units.
	pub label_size: f64,
	/// Label size multiplier for the hovered node.
	pub hover_label_scale: f64,
	/// How resting label alpha scales with zoom.
	pub label_alpha: AlphaBehavior,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeScaleConfig {
	/// Base line width in world units.
	pub line_width: f64,
	pub width_behavior: ScaleBehavior,
}

/// Configuration for hover ring effects.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowScaleConfig {
	/// Stroke width for hover ring in screen pixels.
	pub ring_width: f64,
	/// Ring offset from node edge in screen pixels.
	pub ring_offset: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub glow: GlowScaleConfig,
}

impl ScaleConfig {
	pub fn from_config(config: &GraphConfig) -> Self {
		Self {
			node: NodeScaleConfig {
				hit_radius: 6.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				label_size: config.font_size * 16.0,
				hover_label_scale: 1.5,
				label_alpha: AlphaBehavior::ZoomIn {
					gain: config.opacity_scale,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 1.0,
				width_behavior: ScaleBehavior::Clamped {
					min_screen: 0.5,
					max_screen: 3.0,
				},
			},
			glow: GlowScaleConfig {
				ring_width: 1.5,
				ring_offset: 2.0,
			},
		}
	}
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self::from_config(&GraphConfig::default())
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledValues {
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Resting label font size in world-space.
	pub label_size: f64,
	/// Hovered label font size in world-space.
	pub hover_label_size: f64,
	/// Resting label alpha [0, 1].
	pub label_alpha: f64,
	/// Edge line width in world-space.
	pub edge_line_width: f64,
	/// Hover ring width in world-space.
	pub ring_width: f64,
	/// Hover ring offset in world-space.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_size: config.node.label_size,
			hover_label_size: config.node.label_size * config.node.hover_label_scale,
			label_alpha: config.node.label_alpha.apply(k),
			edge_line_width: config.edge.width_behavior.apply(config.edge.line_width, k),
			ring_width: ScaleBehavior::Screen.apply(config.glow.ring_width, k),
			ring_offset: ScaleBehavior::Screen.apply(config.glow.ring_offset, k),
		}
	}

	pub fn font(size: f64) -> String {
		format!("{size}px sans-serif")
	}
}
