//! Colors for the graph canvas.
//!
//! The built-in palette matches a light site theme. When the host page defines
//! the usual CSS custom properties (`--secondary`, `--tertiary`, `--gray`,
//! `--lightgray`, `--light`, `--dark`) those win, so the graph follows the
//! site's own colors and dark mode.

use crate::layout::NodeRole;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses `#rgb`, `#rrggbb` and `rgb()`/`rgba()` notation.
	pub fn parse(color_str: &str) -> Option<Color> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			let channel = |i: usize, len: usize| {
				let part = hex.get(i * len..(i + 1) * len)?;
				let v = u8::from_str_radix(part, 16).ok()?;
				Some(if len == 1 { v * 17 } else { v })
			};
			let len = match hex.len() {
				3 => 1,
				6 => 2,
				_ => return None,
			};
			return Some(Color::rgb(channel(0, len)?, channel(1, len)?, channel(2, len)?));
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		let r = nums.first()?.parse().ok()?;
		let g = nums.get(1)?.parse().ok()?;
		let b = nums.get(2)?.parse().ok()?;
		let a = nums.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);
		Some(Color::rgba(r, g, b, a))
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	pub background: Color,
	/// Resting link color.
	pub link: Color,
	/// Link color while an end is hovered.
	pub link_highlight: Color,
	pub label: Color,
	pub current: Color,
	/// Visited pages and tags.
	pub visited: Color,
	pub plain: Color,
	pub scaffold: Color,
}

impl Theme {
	pub fn light() -> Self {
		Self {
			background: Color::rgb(250, 248, 248),
			link: Color::rgb(229, 229, 229),
			link_highlight: Color::rgb(184, 184, 184),
			label: Color::rgb(43, 43, 43),
			current: Color::rgb(40, 68, 95),
			visited: Color::rgb(132, 165, 157),
			plain: Color::rgb(184, 184, 184),
			scaffold: Color::rgb(229, 229, 229),
		}
	}

	pub fn node_color(&self, role: NodeRole) -> Color {
		match role {
			NodeRole::Current => self.current,
			NodeRole::Visited | NodeRole::Tag => self.visited,
			NodeRole::Plain => self.plain,
			NodeRole::Scaffold => self.scaffold,
		}
	}

	/// Overrides colors from CSS custom properties; `lookup` returns the raw
	/// property value for a name such as `--gray`.
	pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
		let get = |name: &str| lookup(name).as_deref().and_then(Color::parse);
		if let Some(c) = get("--light") {
			self.background = c;
		}
		if let Some(c) = get("--lightgray") {
			self.link = c;
			self.scaffold = c;
		}
		if let Some(c) = get("--gray") {
			self.link_highlight = c;
			self.plain = c;
		}
		if let Some(c) = get("--dark") {
			self.label = c;
		}
		if let Some(c) = get("--secondary") {
			self.current = c;
		}
		if let Some(c) = get("--tertiary") {
			self.visited = c;
		}
		self
	}

	/// Theme for the current document, following its CSS variables.
	pub fn from_document() -> Self {
		let style = web_sys::window().and_then(|w| {
			let root = w.document()?.document_element()?;
			w.get_computed_style(&root).ok().flatten()
		});
		match style {
			Some(style) => Self::light().with_overrides(|name| {
				style
					.get_property_value(name)
					.ok()
					.filter(|v| !v.trim().is_empty())
			}),
			None => Self::light(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
