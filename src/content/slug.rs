//! Page identifiers and the path arithmetic the graph needs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix shared by every synthetic tag node.
pub const TAG_PREFIX: &str = "tags/";

/// Normalized key naming a page within the content index.
///
/// Built from a page path by trimming whitespace, stripping leading `./` and
/// `/`, stripping trailing `/`, collapsing repeated separators and lowercasing.
/// Tag ids lowercase only their `tags/` prefix; `Rust` and `rust` stay
/// distinct tags. A trailing `index` segment is kept; the hierarchy layouts
/// decide what it means.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
	pub fn new(raw: &str) -> Self {
		let trimmed = raw.trim();
		let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
		let joined = trimmed
			.split('/')
			.filter(|segment| !segment.is_empty())
			.collect::<Vec<_>>()
			.join("/");
		match joined.split_once('/') {
			Some((head, tag)) if head.eq_ignore_ascii_case("tags") => Self(format!("{TAG_PREFIX}{tag}")),
			_ => Self(joined.to_lowercase()),
		}
	}

	/// Id of the page served at a URL path below `base`; `/` is `index`.
	pub fn from_url_path(path: &str, base: &str) -> Self {
		let base = base.trim_end_matches('/');
		let rest = path.strip_prefix(base).unwrap_or(path);
		let rest = rest.strip_suffix(".html").unwrap_or(rest);
		let id = Self::new(rest);
		if id.0.is_empty() { Self::new("index") } else { id }
	}

	/// Id of the synthetic node standing for `tag`.
	pub fn for_tag(tag: &str) -> Self {
		Self::new(&format!("{TAG_PREFIX}{tag}"))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_tag(&self) -> bool {
		self.0.starts_with(TAG_PREFIX)
	}

	/// Tag name for a tag node, `None` for ordinary pages.
	pub fn tag_name(&self) -> Option<&str> {
		self.0.strip_prefix(TAG_PREFIX)
	}

	/// Folder path this page occupies in the site hierarchy.
	///
	/// `notes/index` stands for `notes`, the root `index` for the empty path.
	pub fn hierarchy_path(&self) -> &str {
		if self.0 == "index" {
			""
		} else {
			self.0.strip_suffix("/index").unwrap_or(&self.0)
		}
	}

	/// Absolute URL path for this page below `base`.
	pub fn url(&self, base: &str) -> String {
		let base = base.trim_end_matches('/');
		let path = self.hierarchy_path();
		if path.is_empty() {
			format!("{base}/")
		} else {
			format!("{base}/{path}")
		}
	}
}

impl fmt::Display for PageId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for PageId {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

impl<'de> Deserialize<'de> for PageId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Ok(Self::new(&raw))
	}
}

/// Parent of a hierarchy path (`a/b/c` → `a/b`, `a` → ``).
pub fn parent_path(path: &str) -> Option<&str> {
	if path.is_empty() {
		return None;
	}
	Some(path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or(""))
}

/// Last segment of a hierarchy path.
pub fn last_segment(path: &str) -> &str {
	path.rsplit('/').next().unwrap_or(path)
}
