//! Graph canvas component.
//!
//! Draws a laid-out [`Scene`](crate::layout::Scene) on an HTML canvas with:
//! - Physics-based node positioning for the force layout
//! - Pan, zoom, node dragging and click-to-navigate
//! - Smooth highlight transitions on hover
//! - Colors taken from the host page's CSS variables
//!
//! # Example
//!
//! ```ignore
//! let data = CanvasData::build(&index, &focus, &config, &visited);
//! view! {
//!     <GraphCanvas data=Signal::stored(data) config=config on_navigate=on_navigate />
//! }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::GraphCanvas;
pub use theme::Theme;
pub use types::CanvasData;
