//! Canvas rendering for the co-authorship graph.
//!
//! Draw order: background, edges (dashed for inter-cluster links), nodes
//! (author circles and cluster boxes), labels, then the hover tooltip in
//! screen space.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::adapter::NodeShape;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{GraphSimState, NodeVisual};
use super::theme::GraphTheme;

/// Dash pattern for inter-cluster edges, in world units.
const CLUSTER_EDGE_DASH: (f64, f64) = (6.0, 4.0);

/// Leaf labels are hidden below this zoom level to avoid clutter.
const LEAF_LABEL_MIN_K: f64 = 0.8;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &GraphSimState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &GraphTheme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	draw_tooltip(state, ctx, &scale);
}

fn draw_background(state: &GraphSimState, ctx: &CanvasRenderingContext2d, theme: &GraphTheme) {
	if theme.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &GraphSimState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &GraphTheme,
) {
	let edge_color = theme.edge;

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let style = &edge.user_data;
		ctx.set_stroke_style_str(&edge_color.to_css());
		ctx.set_line_width(scale.edge_width(style.width));

		if style.dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(CLUSTER_EDGE_DASH.0),
				&JsValue::from_f64(CLUSTER_EDGE_DASH.1),
			));
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		// Stop at the node borders rather than their centers.
		let (ux, uy) = (dx / dist, dy / dist);
		let r1 = scale.node_radius(n1.data.user_data.radius);
		let r2 = scale.node_radius(n2.data.user_data.radius);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * r2, y2 - uy * r2);
		ctx.stroke();
	});

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	state: &GraphSimState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &GraphTheme,
) {
	state.graph.visit_nodes(|node| {
		let hovered = state.hovered == Some(node.index());
		draw_node(ctx, &node.data.user_data, node.x() as f64, node.y() as f64, scale, hovered);
	});

	// Labels in a second pass so boxes never cover neighbor text.
	ctx.set_font(&scale.label_font);
	ctx.set_fill_style_str(&theme.label.to_css());
	state.graph.visit_nodes(|node| {
		let visual = &node.data.user_data;
		let hovered = state.hovered == Some(node.index());
		if visual.is_cluster || hovered || scale.k >= LEAF_LABEL_MIN_K {
			let radius = scale.node_radius(visual.radius);
			let _ = ctx.fill_text(
				&visual.label,
				node.x() as f64 + radius + 4.0,
				node.y() as f64 + 3.0,
			);
		}
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	visual: &NodeVisual,
	x: f64,
	y: f64,
	scale: &ScaledValues,
	hovered: bool,
) {
	let radius = scale.node_radius(visual.radius) * if hovered { 1.15 } else { 1.0 };

	match visual.shape {
		NodeShape::Circle => {
			let gradient = ctx
				.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.unwrap();
			gradient
				.add_color_stop(0.0, &visual.fill.lighten(0.3).to_css())
				.unwrap();
			gradient.add_color_stop(0.7, &visual.fill.to_css()).unwrap();
			gradient
				.add_color_stop(1.0, &visual.fill.darken(0.15).to_css())
				.unwrap();

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&visual.border.to_css());
			ctx.set_line_width((1.5 / scale.k).min(radius * 0.3));
			ctx.stroke();
		}
		NodeShape::Box => {
			let side = radius * 2.0;
			ctx.set_fill_style_str(&visual.fill.to_css());
			ctx.fill_rect(x - radius, y - radius, side, side);
			ctx.set_stroke_style_str(&visual.border.to_css());
			ctx.set_line_width((2.0 / scale.k).min(radius * 0.3));
			ctx.stroke_rect(x - radius, y - radius, side, side);
		}
	}
}

fn draw_tooltip(state: &GraphSimState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	let Some(hovered) = state.hovered else {
		return;
	};

	let mut anchor = None;
	state.graph.visit_nodes(|node| {
		if node.index() == hovered {
			let visual = &node.data.user_data;
			let sx = node.x() as f64 * state.transform.k + state.transform.x;
			let sy = node.y() as f64 * state.transform.k + state.transform.y;
			let r = scale.node_radius(visual.radius) * state.transform.k;
			anchor = Some((sx, sy, r, visual.title.clone()));
		}
	});
	let Some((sx, sy, r, title)) = anchor else {
		return;
	};

	let lines: Vec<&str> = title.lines().collect();
	if lines.is_empty() {
		return;
	}

	ctx.set_font("12px sans-serif");
	let mut width: f64 = 0.0;
	for line in &lines {
		if let Ok(metrics) = ctx.measure_text(line) {
			width = width.max(metrics.width());
		}
	}

	let line_height = 16.0;
	let pad = 6.0;
	let box_w = width + pad * 2.0;
	let box_h = lines.len() as f64 * line_height + pad * 2.0;
	// Keep the tooltip inside the canvas.
	let bx = (sx + r + 8.0).min(state.width - box_w - 4.0).max(4.0);
	let by = (sy - box_h / 2.0).min(state.height - box_h - 4.0).max(4.0);

	ctx.set_fill_style_str("rgba(12, 15, 20, 0.92)");
	ctx.fill_rect(bx, by, box_w, box_h);
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.25)");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(bx, by, box_w, box_h);

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, bx + pad, by + pad + (i as f64 + 0.75) * line_height);
	}
}
