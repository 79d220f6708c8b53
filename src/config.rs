//! Panel configuration read from the mount element's `data-cfg` attribute.
//!
//! The attribute holds JSON, either `{ "local": {..}, "global": {..} }` or a
//! single object applying to the inline panel. Every field is optional; the
//! raw form is validated into [`GraphConfig`] against per-panel defaults.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::graph::{Depth, TagOptions};
use crate::layout::LayoutKind;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid graph configuration: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("`{field}` must be a finite number, got {value}")]
	NotFinite { field: &'static str, value: f64 },
	#[error("`{field}` must be {bound}, got {value}")]
	OutOfRange {
		field: &'static str,
		bound: &'static str,
		value: f64,
	},
	#[error("`depth` must fit in a 32-bit integer, got {0}")]
	DepthRange(i64),
}

/// Validated settings for one graph panel.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	pub drag: bool,
	pub zoom: bool,
	pub depth: Depth,
	/// Initial zoom factor.
	pub scale: f64,
	pub repel_force: f64,
	pub center_force: f64,
	pub link_distance: f64,
	/// Label size in em.
	pub font_size: f64,
	pub opacity_scale: f64,
	pub show_tags: bool,
	pub remove_tags: Vec<String>,
	/// Dim everything but the highlighted nodes while hovering.
	pub focus_on_hover: bool,
	pub layout: LayoutKind,
}

impl GraphConfig {
	/// Defaults for the panel embedded in the page.
	pub fn local_defaults() -> Self {
		Self {
			drag: true,
			zoom: true,
			depth: Depth::Hops(1),
			scale: 1.1,
			repel_force: 0.5,
			center_force: 0.3,
			link_distance: 30.0,
			font_size: 0.6,
			opacity_scale: 1.0,
			show_tags: true,
			remove_tags: Vec::new(),
			focus_on_hover: false,
			layout: LayoutKind::Force,
		}
	}

	/// Defaults for the full-screen overlay.
	pub fn global_defaults() -> Self {
		Self {
			depth: Depth::Unbounded,
			scale: 0.9,
			focus_on_hover: true,
			..Self::local_defaults()
		}
	}

	pub fn tag_options(&self) -> TagOptions {
		TagOptions {
			show: self.show_tags,
			exclude: self.remove_tags.iter().cloned().collect(),
		}
	}

	fn from_raw(raw: RawGraphConfig, defaults: Self) -> Result<Self, ConfigError> {
		let depth = match raw.depth {
			Some(d) => Depth::from_hops(i32::try_from(d).map_err(|_| ConfigError::DepthRange(d))?),
			None => defaults.depth,
		};
		let layout = match (raw.radial, raw.tree, raw.tidy) {
			(None, None, None) => defaults.layout,
			(radial, tree, tidy) => LayoutKind::from_flags(
				radial.unwrap_or(false),
				tree.unwrap_or(false),
				tidy.unwrap_or(false),
			),
		};

		Ok(Self {
			drag: raw.drag.unwrap_or(defaults.drag),
			zoom: raw.zoom.unwrap_or(defaults.zoom),
			depth,
			scale: positive("scale", raw.scale, defaults.scale)?,
			repel_force: non_negative("repelForce", raw.repel_force, defaults.repel_force)?,
			center_force: non_negative("centerForce", raw.center_force, defaults.center_force)?,
			link_distance: non_negative("linkDistance", raw.link_distance, defaults.link_distance)?,
			font_size: positive("fontSize", raw.font_size, defaults.font_size)?,
			opacity_scale: non_negative("opacityScale", raw.opacity_scale, defaults.opacity_scale)?,
			show_tags: raw.show_tags.unwrap_or(defaults.show_tags),
			remove_tags: raw.remove_tags.unwrap_or(defaults.remove_tags),
			focus_on_hover: raw.focus_on_hover.unwrap_or(defaults.focus_on_hover),
			layout,
		})
	}
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self::local_defaults()
	}
}

/// Configuration for both panels of a mount point.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfig {
	pub local: GraphConfig,
	pub global: GraphConfig,
}

impl PanelConfig {
	pub fn defaults() -> Self {
		Self {
			local: GraphConfig::local_defaults(),
			global: GraphConfig::global_defaults(),
		}
	}

	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let value: Value = serde_json::from_str(json)?;
		let split = value
			.as_object()
			.is_some_and(|obj| obj.contains_key("local") || obj.contains_key("global"));

		if split {
			let raw: RawPanelConfig = serde_json::from_value(value)?;
			Ok(Self {
				local: GraphConfig::from_raw(raw.local.unwrap_or_default(), GraphConfig::local_defaults())?,
				global: GraphConfig::from_raw(raw.global.unwrap_or_default(), GraphConfig::global_defaults())?,
			})
		} else {
			let raw: RawGraphConfig = serde_json::from_value(value)?;
			Ok(Self {
				local: GraphConfig::from_raw(raw, GraphConfig::local_defaults())?,
				global: GraphConfig::global_defaults(),
			})
		}
	}
}

impl Default for PanelConfig {
	fn default() -> Self {
		Self::defaults()
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawGraphConfig {
	drag: Option<bool>,
	zoom: Option<bool>,
	depth: Option<i64>,
	scale: Option<f64>,
	repel_force: Option<f64>,
	center_force: Option<f64>,
	link_distance: Option<f64>,
	font_size: Option<f64>,
	opacity_scale: Option<f64>,
	remove_tags: Option<Vec<String>>,
	show_tags: Option<bool>,
	radial: Option<bool>,
	tree: Option<bool>,
	tidy: Option<bool>,
	focus_on_hover: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPanelConfig {
	local: Option<RawGraphConfig>,
	global: Option<RawGraphConfig>,
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
	if value.is_finite() {
		Ok(value)
	} else {
		Err(ConfigError::NotFinite { field, value })
	}
}

fn positive(field: &'static str, value: Option<f64>, default: f64) -> Result<f64, ConfigError> {
	let Some(value) = value else {
		return Ok(default);
	};
	let value = finite(field, value)?;
	if value > 0.0 {
		Ok(value)
	} else {
		Err(ConfigError::OutOfRange {
			field,
			bound: "greater than zero",
			value,
		})
	}
}

fn non_negative(field: &'static str, value: Option<f64>, default: f64) -> Result<f64, ConfigError> {
	let Some(value) = value else {
		return Ok(default);
	};
	let value = finite(field, value)?;
	if value >= 0.0 {
		Ok(value)
	} else {
		Err(ConfigError::OutOfRange {
			field,
			bound: "zero or more",
			value,
		})
	}
}
