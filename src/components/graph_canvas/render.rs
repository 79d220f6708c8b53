//! Canvas rendering for the graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edge lines (world space)
//! 3. Resting nodes, then highlighted nodes on top
//! 4. Labels, so no node covers a name

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{GraphState, NodeInfo};
use super::theme::Theme;

/// Smooths values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Opacity left to nodes outside the highlight when `focus_on_hover` dims them.
const DIM_ALPHA: f64 = 0.2;

/// Renders the complete graph to the canvas.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, state.transform.k);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale);
	draw_labels(state, ctx, &scale, theme);

	ctx.restore();
}

/// How strongly elements outside the highlight are faded right now.
fn dimming(state: &GraphState) -> f64 {
	if state.focus_on_hover {
		smooth_step(state.highlight.max_intensity())
	} else {
		0.0
	}
}

fn draw_edges(state: &GraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let dim = dimming(state);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));

		let resting = 1.0 - (1.0 - DIM_ALPHA) * dim;
		let alpha = resting + (1.0 - resting) * edge_t;
		let color = theme.link.lerp(theme.link_highlight, edge_t);

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(scale.edge_line_width * (1.0 + edge_t));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	});

	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	let dim = dimming(state);
	let resting = 1.0 - (1.0 - DIM_ALPHA) * dim;

	// Pass 1: non-highlighted nodes
	state.graph.visit_nodes(|node| {
		if state.highlight.node_intensity(node.index()) > 0.001 {
			return;
		}
		draw_node(ctx, &node.data.user_data, node.x() as f64, node.y() as f64, resting);
	});

	// Pass 2: highlighted/transitioning nodes on top
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let node_t = state.highlight.node_intensity(idx);
		if node_t <= 0.001 {
			return;
		}

		let eased_t = smooth_step(node_t);
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		draw_node(ctx, info, x, y, resting + (1.0 - resting) * eased_t);

		let ring_t = smooth_step(state.highlight.hover_ring_intensity(idx));
		if ring_t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, info.radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&info.color.with_alpha(0.8 * ring_t).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	});

	ctx.set_global_alpha(1.0);
}

fn draw_node(ctx: &CanvasRenderingContext2d, info: &NodeInfo, x: f64, y: f64, alpha: f64) {
	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&info.color.to_css());
	ctx.fill();
}

fn draw_labels(state: &GraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let dim = dimming(state);
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	ctx.set_fill_style_str(&theme.label.to_css());

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		if info.label.is_empty() {
			return;
		}

		let node_t = smooth_step(state.highlight.node_intensity(idx));
		let hover_t = smooth_step(state.highlight.hover_ring_intensity(idx));
		let resting = scale.label_alpha * (1.0 - dim);
		let alpha = (resting + (1.0 - resting) * node_t).max(hover_t);
		if alpha < 0.01 {
			return;
		}

		let size = scale.label_size + (scale.hover_label_size - scale.label_size) * hover_t;
		let (x, y) = (node.x() as f64, node.y() as f64);
		ctx.set_global_alpha(alpha);
		ctx.set_font(&ScaledValues::font(size));
		let _ = ctx.fill_text(&info.label, x, y + info.radius + 2.0);
	});

	ctx.set_global_alpha(1.0);
}
