//! Inputs the graph is built from: page ids, the content index and the
//! visited-page store.

pub mod index;
pub mod slug;
pub mod visited;

pub use index::{ContentError, ContentIndex, ContentIndexCache, ContentSource, PageMeta};
pub use slug::PageId;
pub use visited::{LocalStorage, MemoryStorage, VisitedBackend, VisitedStore};
