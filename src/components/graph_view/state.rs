//! Simulation state for the force-directed graph view.
//!
//! Wraps the `force_graph` physics simulation with the resolved visual
//! attributes from the adapter, plus view transform and interaction
//! tracking. Recreated from scratch on every data load (destroy before
//! recreate); never mutated from two call sites.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use crate::api::types::NodeId;

use super::adapter::{NodeShape, StyledGraph};
use super::physics::PhysicsProfile;
use super::scale::ScaledValues;
use super::theme::Color;

/// Per-node display attributes attached to each simulation node.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	/// Backend id for click dispatch.
	pub id: NodeId,
	/// Truncated display label.
	pub label: String,
	/// Tooltip text.
	pub title: String,
	/// Base radius in world units.
	pub radius: f64,
	/// Draw shape.
	pub shape: NodeShape,
	/// Fill color.
	pub fill: Color,
	/// Border color.
	pub border: Color,
	/// Whether this node is an aggregated cluster.
	pub is_cluster: bool,
}

/// Per-edge display attributes attached to each simulation edge.
#[derive(Clone, Debug, Default)]
pub struct EdgeVisual {
	/// Base line width.
	pub width: f64,
	/// Inter-cluster edges are drawn dashed.
	pub dashed: bool,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Pan offset x.
	pub x: f64,
	/// Pan offset y.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a drag is active.
	pub active: bool,
	/// Node being dragged.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer x at drag start.
	pub start_x: f64,
	/// Pointer y at drag start.
	pub start_y: f64,
	/// Node x at drag start.
	pub node_start_x: f32,
	/// Node y at drag start.
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is active.
	pub active: bool,
	/// Pointer x at pan start.
	pub start_x: f64,
	/// Pointer y at pan start.
	pub start_y: f64,
	/// Transform x at pan start.
	pub transform_start_x: f64,
	/// Transform y at pan start.
	pub transform_start_y: f64,
}

/// Core graph state combining the physics simulation with view transform
/// and interaction tracking. Ticked each frame until the stabilization
/// budget is spent, then frozen.
pub struct GraphSimState {
	/// The physics simulation carrying visual attributes as user data.
	pub graph: ForceGraph<NodeVisual, EdgeVisual>,
	/// Pan/zoom transform.
	pub transform: ViewTransform,
	/// Active drag, if any.
	pub drag: DragState,
	/// Active pan, if any.
	pub pan: PanState,
	/// Node under the pointer, for tooltip display.
	pub hovered: Option<DefaultNodeIdx>,
	/// Canvas width.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
	/// Physics running flag; cleared when the layout is frozen.
	pub animation_running: bool,
}

impl GraphSimState {
	/// Build a fresh simulation from adapter output. Nodes start evenly
	/// spaced on a small circle around the viewport center, in input order
	/// (deterministic).
	pub fn new(styled: &StyledGraph, width: f64, height: f64, profile: &PhysicsProfile) -> Self {
		let mut graph = ForceGraph::new(profile.simulation_parameters());
		let mut id_to_idx = HashMap::new();

		let count = styled.nodes.len().max(1);
		for (i, node) in styled.nodes.iter().enumerate() {
			let angle = i as f64 * 2.0 * PI / count as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);
			// Heavier clusters drift less when leaf nodes tug on them.
			let mass = 5.0 + node.radius as f32 * 0.5;
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass,
				is_anchor: false,
				user_data: NodeVisual {
					id: node.id.clone(),
					label: node.label.clone(),
					title: node.title.clone(),
					radius: node.radius,
					shape: node.shape,
					fill: node.fill,
					border: node.border,
					is_cluster: node.is_cluster,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for edge in &styled.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeVisual {
							width: edge.width,
							dashed: edge.dashed,
						},
					},
				);
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			animation_running: true,
		}
	}

	/// Convert screen coordinates to graph (world) coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Hit-test a screen position against node radii plus slop.
	pub fn node_at_position(&self, sx: f64, sy: f64, scale: &ScaledValues) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit_radius = scale.node_radius(node.data.user_data.radius) + scale.hit_slop;
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Backend id of the node at a simulation index.
	pub fn node_id_at(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	/// Advance the physics simulation one step.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	/// Freeze the layout: physics stops, positions stay put.
	pub fn freeze(&mut self) {
		self.animation_running = false;
	}

	/// Fit the viewport to the bounding box of all nodes, with a margin.
	pub fn fit_to_content(&mut self) {
		let mut min_x = f64::INFINITY;
		let mut min_y = f64::INFINITY;
		let mut max_x = f64::NEG_INFINITY;
		let mut max_y = f64::NEG_INFINITY;
		let mut any = false;
		self.graph.visit_nodes(|node| {
			any = true;
			let r = node.data.user_data.radius;
			min_x = min_x.min(node.x() as f64 - r);
			min_y = min_y.min(node.y() as f64 - r);
			max_x = max_x.max(node.x() as f64 + r);
			max_y = max_y.max(node.y() as f64 + r);
		});
		if !any {
			self.reset_view();
			return;
		}

		let bw = (max_x - min_x).max(1.0);
		let bh = (max_y - min_y).max(1.0);
		let k = ((self.width / bw).min(self.height / bh) * 0.9).clamp(0.1, 10.0);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// Restore the identity view transform.
	pub fn reset_view(&mut self) {
		self.transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
	}

	/// Track a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
