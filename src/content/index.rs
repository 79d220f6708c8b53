//! The content index: page metadata keyed by page id, loaded once per session.

use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Shared};
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Response};

use super::slug::PageId;

/// Failure to obtain the content index.
///
/// Cloneable so a single failed load can be handed to every waiting panel.
#[derive(Clone, Debug, Error)]
pub enum ContentError {
	#[error("no browser window available")]
	NoWindow,
	#[error("content index element #{0} not found")]
	MissingElement(String),
	#[error("fetching {url} failed: {reason}")]
	Fetch { url: String, reason: String },
	#[error("fetching {url} returned HTTP {status}")]
	Status { url: String, status: u16 },
	#[error("failed to parse content index: {0}")]
	Parse(String),
}

impl From<serde_json::Error> for ContentError {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}

/// Metadata for a single page. Extra fields in the feed are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageMeta {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub links: Vec<PageId>,
	#[serde(default)]
	pub tags: Vec<String>,
}

/// Read-only mapping from page id to metadata.
///
/// Ordered by id so every derived structure is deterministic.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ContentIndex {
	pages: BTreeMap<PageId, PageMeta>,
}

impl ContentIndex {
	pub fn from_json(json: &str) -> Result<Self, ContentError> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn get(&self, id: &PageId) -> Option<&PageMeta> {
		self.pages.get(id)
	}

	pub fn contains(&self, id: &PageId) -> bool {
		self.pages.contains_key(id)
	}

	pub fn ids(&self) -> impl Iterator<Item = &PageId> {
		self.pages.keys()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&PageId, &PageMeta)> {
		self.pages.iter()
	}

	pub fn len(&self) -> usize {
		self.pages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pages.is_empty()
	}
}

impl FromIterator<(PageId, PageMeta)> for ContentIndex {
	fn from_iter<I: IntoIterator<Item = (PageId, PageMeta)>>(iter: I) -> Self {
		Self {
			pages: iter.into_iter().collect(),
		}
	}
}

/// Where the content index JSON comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentSource {
	/// Text of a `<script type="application/json">` element with this id.
	Inline(String),
	/// A URL fetched once.
	Url(String),
}

impl ContentSource {
	pub async fn load(self) -> Result<ContentIndex, ContentError> {
		let text = match &self {
			ContentSource::Inline(id) => inline_text(id)?,
			ContentSource::Url(url) => fetch_text(url).await?,
		};
		let index = ContentIndex::from_json(&text)?;
		info!("site-graph: loaded content index with {} pages", index.len());
		Ok(index)
	}
}

fn inline_text(id: &str) -> Result<String, ContentError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(ContentError::NoWindow)?;
	let script: HtmlScriptElement = document
		.get_element_by_id(id)
		.and_then(|el| el.dyn_into().ok())
		.ok_or_else(|| ContentError::MissingElement(id.to_string()))?;
	script.text().map_err(|_| ContentError::MissingElement(id.to_string()))
}

async fn fetch_text(url: &str) -> Result<String, ContentError> {
	let fetch_err = |reason: wasm_bindgen::JsValue| ContentError::Fetch {
		url: url.to_string(),
		reason: format!("{reason:?}"),
	};

	let window = web_sys::window().ok_or(ContentError::NoWindow)?;
	debug!("site-graph: fetching content index from {url}");
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(fetch_err)?
		.dyn_into()
		.map_err(fetch_err)?;
	if !response.ok() {
		return Err(ContentError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	let body = JsFuture::from(response.text().map_err(fetch_err)?)
		.await
		.map_err(fetch_err)?;
	body.as_string().ok_or_else(|| ContentError::Fetch {
		url: url.to_string(),
		reason: "response body is not text".to_string(),
	})
}

type SharedIndex = Shared<LocalBoxFuture<'static, Result<Rc<ContentIndex>, ContentError>>>;

/// Session-scoped, single-initialization handle to the content index.
///
/// The load future runs at most once, on first await. Every clone of the
/// cache and every later call to [`ContentIndexCache::get`] resolves to the
/// same result.
#[derive(Clone)]
pub struct ContentIndexCache {
	shared: SharedIndex,
}

impl ContentIndexCache {
	pub fn new<F>(load: F) -> Self
	where
		F: Future<Output = Result<ContentIndex, ContentError>> + 'static,
	{
		Self {
			shared: async move { load.await.map(Rc::new) }
				.boxed_local()
				.shared(),
		}
	}

	pub fn from_source(source: ContentSource) -> Self {
		Self::new(source.load())
	}

	pub async fn get(&self) -> Result<Rc<ContentIndex>, ContentError> {
		self.shared.clone().await
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	const FEED: &str = r#"{
		"Notes/A": { "title": "A", "links": ["notes/b", "missing"], "tags": ["rust"], "content": "ignored" },
		"notes/b": { "title": "B" }
	}"#;

	#[test]
	fn parses_feed_with_defaults() {
		let index = ContentIndex::from_json(FEED).unwrap();
		assert_eq!(index.len(), 2);
		let a = index.get(&PageId::new("notes/a")).unwrap();
		assert_eq!(a.links, vec![PageId::new("notes/b"), PageId::new("missing")]);
		assert_eq!(a.tags, vec!["rust".to_string()]);
		let b = index.get(&PageId::new("notes/b")).unwrap();
		assert!(b.links.is_empty());
		assert!(b.tags.is_empty());
	}

	#[test]
	fn rejects_garbage() {
		assert!(matches!(
			ContentIndex::from_json("[1, 2]"),
			Err(ContentError::Parse(_))
		));
	}

	#[test]
	fn cache_loads_once() {
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		let cache = ContentIndexCache::new(async move {
			counter.set(counter.get() + 1);
			ContentIndex::from_json(FEED)
		});
		assert_eq!(calls.get(), 0);

		let first = cache.get().now_or_never().unwrap().unwrap();
		let second = cache.clone().get().now_or_never().unwrap().unwrap();
		assert_eq!(calls.get(), 1);
		assert!(Rc::ptr_eq(&first, &second));
	}

	#[test]
	fn cache_shares_failure() {
		let cache = ContentIndexCache::new(async { Err(ContentError::NoWindow) });
		assert!(matches!(
			cache.get().now_or_never().unwrap(),
			Err(ContentError::NoWindow)
		));
		assert!(cache.get().now_or_never().unwrap().is_err());
	}
}
