//! Set of pages the reader has already seen, persisted per browser profile.

use std::cell::RefCell;
use std::collections::BTreeSet;

use log::warn;

use super::slug::PageId;

/// Storage key of the persisted JSON array.
pub const VISITED_KEY: &str = "graph-visited";

/// Key-value storage the visited set is persisted to.
pub trait VisitedBackend {
	fn read(&self, key: &str) -> Option<String>;
	fn write(&self, key: &str, value: &str);
}

/// `window.localStorage`. Every operation is a no-op when storage is
/// unavailable (private mode, sandboxed iframes).
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window()?.local_storage().ok()?
	}
}

impl VisitedBackend for LocalStorage {
	fn read(&self, key: &str) -> Option<String> {
		Self::storage()?.get_item(key).ok()?
	}

	fn write(&self, key: &str, value: &str) {
		if let Some(storage) = Self::storage() {
			if storage.set_item(key, value).is_err() {
				warn!("site-graph: failed to persist visited pages");
			}
		}
	}
}

/// In-process storage, used where no browser storage exists.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	value: RefCell<Option<String>>,
}

impl VisitedBackend for MemoryStorage {
	fn read(&self, _key: &str) -> Option<String> {
		self.value.borrow().clone()
	}

	fn write(&self, _key: &str, value: &str) {
		*self.value.borrow_mut() = Some(value.to_string());
	}
}

/// Visited-page set backed by a [`VisitedBackend`].
///
/// Reads go to the backend every time so several panels sharing one backend
/// agree. Missing or garbled state reads as an empty set.
pub struct VisitedStore<B: VisitedBackend> {
	backend: B,
}

impl<B: VisitedBackend> VisitedStore<B> {
	pub fn new(backend: B) -> Self {
		Self { backend }
	}

	pub fn load(&self) -> BTreeSet<PageId> {
		let Some(raw) = self.backend.read(VISITED_KEY) else {
			return BTreeSet::new();
		};
		match serde_json::from_str::<Vec<PageId>>(&raw) {
			Ok(ids) => ids.into_iter().collect(),
			Err(e) => {
				warn!("site-graph: ignoring unreadable visited state: {e}");
				BTreeSet::new()
			}
		}
	}

	/// Adds `id` and persists immediately.
	pub fn add(&self, id: &PageId) {
		let mut visited = self.load();
		if !visited.insert(id.clone()) {
			return;
		}
		match serde_json::to_string(&visited) {
			Ok(json) => self.backend.write(VISITED_KEY, &json),
			Err(e) => warn!("site-graph: failed to encode visited pages: {e}"),
		}
	}
}
