//! Translates backend graph payloads into render-ready records.
//!
//! Both adapters are pure and deterministic: node and edge output order is
//! the payload order, and identical payloads produce identical output.

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::api::types::{GraphPayload, NodeId};

use super::theme::{Color, GraphTheme};

/// Labels longer than this are cut off with an ellipsis.
pub const MAX_LABEL_CHARS: usize = 30;

/// Edge widths are capped here regardless of collaboration count.
pub const MAX_EDGE_WIDTH: f64 = 3.0;

/// Radius range for aggregated cluster boxes.
pub const CLUSTER_RADIUS_RANGE: (f64, f64) = (15.0, 40.0);

/// Radius range for individual author circles.
pub const LEAF_RADIUS_RANGE: (f64, f64) = (3.0, 20.0);

/// How a styled node is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
	/// Author nodes.
	Circle,
	/// Aggregated cluster nodes.
	Box,
}

/// A node with all visual attributes resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledNode {
	/// Backend id, used for click dispatch and drill-down.
	pub id: NodeId,
	/// Truncated display label.
	pub label: String,
	/// Multi-line tooltip text.
	pub title: String,
	/// Radius (half-extent for boxes) in world units.
	pub radius: f64,
	/// Draw shape.
	pub shape: NodeShape,
	/// Fill color.
	pub fill: Color,
	/// Border color, a darker companion of the fill.
	pub border: Color,
	/// Whether this node is an aggregated cluster.
	pub is_cluster: bool,
}

/// An edge with its visual attributes resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledEdge {
	/// Source node id.
	pub source: NodeId,
	/// Target node id.
	pub target: NodeId,
	/// Line width, `min(3, weight)`.
	pub width: f64,
	/// Inter-cluster edges are drawn dashed.
	pub dashed: bool,
}

/// Adapter output for the force-directed renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledGraph {
	/// Nodes in payload order.
	pub nodes: Vec<StyledNode>,
	/// Edges in payload order.
	pub edges: Vec<StyledEdge>,
}

/// Hue for an author node: degree 0 maps to 240 (blue), degree 50 and
/// above to 120 (green).
pub fn degree_hue(degree: u32) -> f64 {
	240.0 - (degree as f64 / 50.0).min(1.0) * 120.0
}

fn truncate_label(label: &str) -> String {
	if label.chars().count() <= MAX_LABEL_CHARS {
		label.to_string()
	} else {
		let mut cut: String = label.chars().take(MAX_LABEL_CHARS).collect();
		cut.push('…');
		cut
	}
}

/// Resolve visual attributes for every node and edge in the payload.
pub fn style_graph(payload: &GraphPayload, theme: &GraphTheme) -> StyledGraph {
	let nodes = payload
		.nodes
		.iter()
		.map(|node| {
			let degree = node.effective_degree();
			let raw_label = node
				.label
				.clone()
				.unwrap_or_else(|| format!("Author_{}", node.id));
			let label = truncate_label(&raw_label);

			if node.is_cluster() {
				let size = node.size.unwrap_or(0);
				let (min_r, max_r) = CLUSTER_RADIUS_RANGE;
				StyledNode {
					id: node.id.clone(),
					title: format!(
						"{}\n{} authors, degree {}\nClick to expand",
						label, size, degree
					),
					label,
					radius: (min_r + size as f64 * 0.5).min(max_r),
					shape: NodeShape::Box,
					fill: theme.cluster_fill,
					border: theme.cluster_border,
					is_cluster: true,
				}
			} else {
				let hue = degree_hue(degree);
				let (min_r, max_r) = LEAF_RADIUS_RANGE;
				StyledNode {
					id: node.id.clone(),
					title: format!("{}\ndegree {}", label, degree),
					label,
					radius: (degree as f64).clamp(min_r, max_r),
					shape: NodeShape::Circle,
					fill: Color::hsl(hue, theme.leaf_saturation, theme.leaf_fill_lightness),
					border: Color::hsl(hue, theme.leaf_saturation, theme.leaf_border_lightness),
					is_cluster: false,
				}
			}
		})
		.collect();

	let edges = payload
		.edges
		.iter()
		.map(|edge| StyledEdge {
			source: edge.source.clone(),
			target: edge.target.clone(),
			width: (edge.effective_weight() as f64).min(MAX_EDGE_WIDTH),
			dashed: edge.is_cluster_edge(),
		})
		.collect();

	StyledGraph { nodes, edges }
}

/// Adapter output for the force renderer, or `None` when the payload has no
/// nodes. Empty results show their 0/0 counters without a simulation ever
/// being built.
pub fn renderable_graph(payload: &GraphPayload, theme: &GraphTheme) -> Option<StyledGraph> {
	if payload.nodes.is_empty() {
		None
	} else {
		Some(style_graph(payload, theme))
	}
}

/// Pixel distance from the circle center to each block on its ring, for a
/// diagram of `n` blocks.
pub fn block_ring_radius(n: usize) -> f64 {
	(n as f64).sqrt() * 80.0
}

/// Margin around the block ring, also the center offset.
const BLOCK_MARGIN: f64 = 120.0;

/// A node positioned for the block-diagram renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockNode {
	/// Backend id.
	pub id: NodeId,
	/// Truncated display label.
	pub label: String,
	/// Block center x.
	pub x: f64,
	/// Block center y.
	pub y: f64,
	/// Anchor id for incoming connections.
	pub input_anchor: String,
	/// Anchor id for outgoing connections.
	pub output_anchor: String,
}

/// A connection referencing the anchor ids of two blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockConnection {
	/// Source block id.
	pub source: NodeId,
	/// Target block id.
	pub target: NodeId,
	/// Source block's OUT anchor.
	pub source_anchor: String,
	/// Target block's IN anchor.
	pub target_anchor: String,
}

/// Adapter output for the block-diagram renderer: blocks evenly spaced on a
/// circle, with one IN and one OUT anchor each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockLayout {
	/// Blocks in payload order.
	pub blocks: Vec<BlockNode>,
	/// Connections in payload order.
	pub connections: Vec<BlockConnection>,
	/// Ring radius, `sqrt(n) * 80`.
	pub radius: f64,
	/// Ring center (x and y are equal).
	pub center: f64,
}

/// Lay the payload out as positioned blocks on a circle.
pub fn block_layout(payload: &GraphPayload) -> BlockLayout {
	let n = payload.nodes.len();
	let radius = block_ring_radius(n);
	let center = radius + BLOCK_MARGIN;

	let blocks = payload
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let angle = i as f64 * TAU / n.max(1) as f64;
			let raw_label = node
				.label
				.clone()
				.unwrap_or_else(|| format!("Author_{}", node.id));
			BlockNode {
				id: node.id.clone(),
				label: truncate_label(&raw_label),
				x: center + radius * angle.cos(),
				y: center + radius * angle.sin(),
				input_anchor: format!("{}_in", node.id),
				output_anchor: format!("{}_out", node.id),
			}
		})
		.collect();

	let connections = payload
		.edges
		.iter()
		.map(|edge| BlockConnection {
			source_anchor: format!("{}_out", edge.source),
			target_anchor: format!("{}_in", edge.target),
			source: edge.source.clone(),
			target: edge.target.clone(),
		})
		.collect();

	BlockLayout {
		blocks,
		connections,
		radius,
		center,
	}
}

impl BlockLayout {
	/// Block centers keyed by node id, for drawing connection lines.
	pub fn positions(&self) -> HashMap<NodeId, (f64, f64)> {
		self.blocks
			.iter()
			.map(|b| (b.id.clone(), (b.x, b.y)))
			.collect()
	}

	/// Side length of the square canvas the diagram needs.
	pub fn extent(&self) -> f64 {
		2.0 * self.center
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn payload(json: &str) -> GraphPayload {
		serde_json::from_str(json).unwrap()
	}

	fn sample() -> GraphPayload {
		payload(
			r#"{
				"nodes": [
					{"id": "cluster_0", "label": "Cluster 0 (12 nodes)", "type": "cluster", "size": 12, "degree": 30},
					{"id": 7, "label": "Grace Hopper", "degree": 50},
					{"id": 8, "label": "Alan Turing"}
				],
				"edges": [
					{"source": "cluster_0", "target": 7, "weight": 9},
					{"source": 7, "target": 8}
				],
				"stats": {"num_nodes": 3, "num_edges": 2}
			}"#,
		)
	}

	#[test]
	fn adapter_is_deterministic() {
		let theme = GraphTheme::default();
		let a = style_graph(&sample(), &theme);
		let b = style_graph(&sample(), &theme);
		assert_eq!(a, b);
		let ids: Vec<String> = a.nodes.iter().map(|n| n.id.to_string()).collect();
		assert_eq!(ids, vec!["cluster_0", "7", "8"]);
	}

	#[test]
	fn clusters_are_boxes_with_accent_color() {
		let theme = GraphTheme::default();
		let styled = style_graph(&sample(), &theme);
		let cluster = &styled.nodes[0];
		assert!(cluster.is_cluster);
		assert_eq!(cluster.shape, NodeShape::Box);
		assert_eq!(cluster.fill, theme.cluster_fill);
		assert_eq!(cluster.radius, 15.0 + 12.0 * 0.5);
		assert!(cluster.title.contains("Click to expand"));
	}

	#[test]
	fn cluster_radius_is_capped() {
		let theme = GraphTheme::default();
		let styled = style_graph(
			&payload(
				r#"{"nodes": [{"id": "cluster_1", "type": "cluster", "size": 500}], "edges": []}"#,
			),
			&theme,
		);
		assert_eq!(styled.nodes[0].radius, CLUSTER_RADIUS_RANGE.1);
	}

	#[test]
	fn leaf_color_follows_the_degree_gradient() {
		assert_eq!(degree_hue(0), 240.0);
		assert_eq!(degree_hue(25), 180.0);
		assert_eq!(degree_hue(50), 120.0);
		assert_eq!(degree_hue(200), 120.0);

		let theme = GraphTheme::default();
		let styled = style_graph(&sample(), &theme);
		let busy = &styled.nodes[1];
		assert_eq!(busy.shape, NodeShape::Circle);
		assert_eq!(
			busy.fill,
			Color::hsl(120.0, theme.leaf_saturation, theme.leaf_fill_lightness)
		);
		// Border shares the hue at lower lightness.
		assert_eq!(
			busy.border,
			Color::hsl(120.0, theme.leaf_saturation, theme.leaf_border_lightness)
		);
	}

	#[test]
	fn leaf_radius_is_clamped_with_floor_3() {
		let theme = GraphTheme::default();
		let styled = style_graph(&sample(), &theme);
		// degree 50 caps at 20, missing degree defaults to 1 -> floor 3.
		assert_eq!(styled.nodes[1].radius, 20.0);
		assert_eq!(styled.nodes[2].radius, 3.0);
	}

	#[test]
	fn labels_truncate_at_30_chars() {
		let theme = GraphTheme::default();
		let long = "A".repeat(45);
		let styled = style_graph(
			&payload(&format!(
				r#"{{"nodes": [{{"id": 1, "label": "{}"}}], "edges": []}}"#,
				long
			)),
			&theme,
		);
		assert_eq!(styled.nodes[0].label.chars().count(), MAX_LABEL_CHARS + 1);
		assert!(styled.nodes[0].label.ends_with('…'));
	}

	#[test]
	fn edge_width_is_min_3_weight() {
		let theme = GraphTheme::default();
		let styled = style_graph(&sample(), &theme);
		assert_eq!(styled.edges[0].width, 3.0);
		assert_eq!(styled.edges[1].width, 1.0);
	}

	#[test]
	fn empty_payload_yields_empty_graph() {
		let theme = GraphTheme::default();
		let styled = style_graph(&payload(r#"{"nodes": [], "edges": []}"#), &theme);
		assert!(styled.nodes.is_empty());
		assert!(styled.edges.is_empty());
	}

	#[test]
	fn empty_payload_produces_no_injectable_graph() {
		let theme = GraphTheme::default();
		assert_eq!(
			renderable_graph(&payload(r#"{"nodes": [], "edges": []}"#), &theme),
			None
		);
		assert!(renderable_graph(&sample(), &theme).is_some());
	}

	#[test]
	fn block_ring_radius_is_sqrt_n_times_80() {
		assert_eq!(block_ring_radius(0), 0.0);
		assert_eq!(block_ring_radius(4), 160.0);
		assert_eq!(block_ring_radius(100), 800.0);
	}

	#[test]
	fn block_layout_spaces_blocks_evenly() {
		let layout = block_layout(&sample());
		assert_eq!(layout.blocks.len(), 3);
		let step = TAU / 3.0;
		for (i, block) in layout.blocks.iter().enumerate() {
			let angle = i as f64 * step;
			let expected_x = layout.center + layout.radius * angle.cos();
			let expected_y = layout.center + layout.radius * angle.sin();
			assert!((block.x - expected_x).abs() < 1e-9);
			assert!((block.y - expected_y).abs() < 1e-9);
		}
	}

	#[test]
	fn block_connections_reference_in_and_out_anchors() {
		let layout = block_layout(&sample());
		assert_eq!(layout.blocks[1].input_anchor, "7_in");
		assert_eq!(layout.blocks[1].output_anchor, "7_out");
		let conn = &layout.connections[0];
		assert_eq!(conn.source_anchor, "cluster_0_out");
		assert_eq!(conn.target_anchor, "7_in");
	}
}
