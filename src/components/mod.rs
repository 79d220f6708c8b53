//! UI components.

pub mod graph_canvas;
pub mod panel;
