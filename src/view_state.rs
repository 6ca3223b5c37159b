//! Two-level drill-down state machine: cluster overview vs node detail.
//!
//! The view state decides which backend query a load issues. Clicking a
//! cluster node descends into that cluster; the back button returns to the
//! overview. Turning aggregation off degrades to the flat author graph.

use crate::api::types::NodeId;
use crate::api::{AggregationLevel, GraphFilters, GraphRequest};

/// Which of the two drill-down levels is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrillLevel {
	/// Aggregated overview, one node per cluster.
	#[default]
	Cluster,
	/// Individual authors (inside one cluster, or the whole flat graph).
	Node,
}

/// Drill-down position plus the aggregation toggle.
///
/// Invariant: `cluster_id` is `Some` iff `level == Node` and `aggregated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
	/// Active drill-down level.
	pub level: DrillLevel,
	/// Cluster currently expanded, when drilled in.
	pub cluster_id: Option<i64>,
	/// Whether cluster aggregation is active.
	pub aggregated: bool,
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			level: DrillLevel::Cluster,
			cluster_id: None,
			aggregated: true,
		}
	}
}

impl ViewState {
	/// Handle a node click. Returns `true` when the click descended into a
	/// cluster (the caller should reload); leaf clicks leave the state alone.
	pub fn drill_into(&mut self, node_id: &NodeId) -> bool {
		if !self.aggregated || self.level != DrillLevel::Cluster {
			return false;
		}
		let Some(cluster) = node_id.cluster_number() else {
			return false;
		};
		self.level = DrillLevel::Node;
		self.cluster_id = Some(cluster);
		true
	}

	/// Return from a cluster's members to the cluster overview.
	pub fn back_to_clusters(&mut self) {
		self.level = DrillLevel::Cluster;
		self.cluster_id = None;
	}

	/// Apply the aggregation toggle: on forces the cluster overview, off
	/// forces the flat node view with no cluster selected.
	pub fn set_aggregation(&mut self, on: bool) {
		self.aggregated = on;
		self.cluster_id = None;
		self.level = if on {
			DrillLevel::Cluster
		} else {
			DrillLevel::Node
		};
	}

	/// Whether the back-to-clusters control applies.
	pub fn can_go_back(&self) -> bool {
		self.level == DrillLevel::Node && self.cluster_id.is_some()
	}

	/// Decide the backend query for the current position.
	pub fn request(&self, filters: GraphFilters) -> GraphRequest {
		if !self.aggregated {
			return GraphRequest::Flat { filters };
		}
		match (self.level, self.cluster_id) {
			(DrillLevel::Node, Some(cluster_id)) => GraphRequest::Aggregated {
				filters,
				level: AggregationLevel::Node,
				cluster_id: Some(cluster_id),
			},
			// Node level without a cluster should not happen while
			// aggregated; fall back to the overview query.
			_ => GraphRequest::Aggregated {
				filters,
				level: AggregationLevel::Cluster,
				cluster_id: None,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clicking_a_cluster_descends() {
		let mut state = ViewState::default();
		assert!(state.drill_into(&NodeId::from("cluster_7")));
		assert_eq!(state.level, DrillLevel::Node);
		assert_eq!(state.cluster_id, Some(7));
		assert!(state.can_go_back());
	}

	#[test]
	fn clicking_a_leaf_changes_nothing() {
		let mut state = ViewState::default();
		assert!(!state.drill_into(&NodeId::Int(42)));
		assert_eq!(state, ViewState::default());
	}

	#[test]
	fn residual_cluster_id_is_negative() {
		let mut state = ViewState::default();
		assert!(state.drill_into(&NodeId::from("cluster_-1")));
		assert_eq!(state.cluster_id, Some(-1));
	}

	#[test]
	fn back_returns_to_overview() {
		let mut state = ViewState::default();
		state.drill_into(&NodeId::from("cluster_3"));
		state.back_to_clusters();
		assert_eq!(state.level, DrillLevel::Cluster);
		assert_eq!(state.cluster_id, None);
	}

	#[test]
	fn aggregation_off_while_drilled_clears_cluster() {
		let mut state = ViewState::default();
		state.drill_into(&NodeId::from("cluster_7"));
		state.set_aggregation(false);
		assert_eq!(state.level, DrillLevel::Node);
		assert_eq!(state.cluster_id, None);
		assert!(!state.can_go_back());
	}

	#[test]
	fn aggregation_on_forces_overview() {
		let mut state = ViewState::default();
		state.set_aggregation(false);
		state.set_aggregation(true);
		assert_eq!(state.level, DrillLevel::Cluster);
		assert_eq!(state.cluster_id, None);
	}

	#[test]
	fn request_follows_the_state() {
		let filters = GraphFilters::default();
		let mut state = ViewState::default();
		assert!(matches!(
			state.request(filters.clone()),
			GraphRequest::Aggregated {
				level: AggregationLevel::Cluster,
				cluster_id: None,
				..
			}
		));

		state.drill_into(&NodeId::from("cluster_2"));
		assert!(matches!(
			state.request(filters.clone()),
			GraphRequest::Aggregated {
				level: AggregationLevel::Node,
				cluster_id: Some(2),
				..
			}
		));

		state.set_aggregation(false);
		assert!(matches!(
			state.request(filters),
			GraphRequest::Flat { .. }
		));
	}
}
