//! Graph construction: the full edge list, the bounded neighborhood around
//! the focus page, and the filtered view a layout draws.

mod edges;
mod neighborhood;
mod view;

pub use edges::{Edge, EdgeSet, TagOptions, build_edges};
pub use neighborhood::{Depth, neighborhood};
pub use view::{GraphView, ViewNode, ViewRequest};
