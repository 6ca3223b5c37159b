//! Wire types for the graph analysis REST API.
//!
//! The backend returns loosely-typed JSON; optional fields get explicit
//! defaults here (`degree` and `weight` default to 1) instead of ad-hoc
//! fallbacks at each use site.

use std::fmt;

use serde::Deserialize;

/// Prefix marking aggregated cluster nodes in the node id space.
pub const CLUSTER_ID_PREFIX: &str = "cluster_";

/// A node identifier as the backend emits it: the flat graph endpoint uses
/// integer author ids, the aggregated endpoint uses `"cluster_<k>"` strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	/// Integer author id.
	Int(i64),
	/// String id, e.g. `cluster_7`.
	Text(String),
}

impl NodeId {
	/// The cluster number if this id names an aggregated cluster
	/// (`cluster_7` -> `Some(7)`, `cluster_-1` -> `Some(-1)`).
	pub fn cluster_number(&self) -> Option<i64> {
		match self {
			NodeId::Int(_) => None,
			NodeId::Text(s) => s.strip_prefix(CLUSTER_ID_PREFIX)?.parse().ok(),
		}
	}

	/// Whether this id names an aggregated cluster node.
	pub fn is_cluster(&self) -> bool {
		self.cluster_number().is_some()
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Int(n) => write!(f, "{}", n),
			NodeId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for NodeId {
	fn from(n: i64) -> Self {
		NodeId::Int(n)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		NodeId::Text(s.to_string())
	}
}

/// A graph node: either a single author or an aggregated cluster.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Node identifier, referenced by edges.
	pub id: NodeId,
	/// Display label (author name or cluster caption).
	#[serde(default)]
	pub label: Option<String>,
	/// Degree in the (sub)graph. Defaults to 1 when absent.
	#[serde(default)]
	pub degree: Option<u32>,
	/// Member count for cluster nodes.
	#[serde(default)]
	pub size: Option<u32>,
	/// Node kind marker; the backend sets `"cluster"` on aggregated nodes.
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	/// Owning cluster for drilled-down author nodes.
	#[serde(default)]
	pub cluster_id: Option<i64>,
}

impl GraphNode {
	/// Degree with the documented default of 1.
	pub fn effective_degree(&self) -> u32 {
		self.degree.unwrap_or(1)
	}

	/// A node is a cluster if the backend marked it as one or its id
	/// carries the cluster prefix.
	pub fn is_cluster(&self) -> bool {
		self.kind.as_deref() == Some("cluster") || self.id.is_cluster()
	}
}

/// A collaboration edge between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphEdge {
	/// Source node id.
	pub source: NodeId,
	/// Target node id.
	pub target: NodeId,
	/// Collaboration count. Defaults to 1 when absent.
	#[serde(default)]
	pub weight: Option<u32>,
	/// Edge kind marker; `"cluster_edge"` for inter-cluster links.
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
}

impl GraphEdge {
	/// Weight with the documented default of 1.
	pub fn effective_weight(&self) -> u32 {
		self.weight.unwrap_or(1)
	}

	/// Whether this edge links two aggregated clusters.
	pub fn is_cluster_edge(&self) -> bool {
		self.kind.as_deref() == Some("cluster_edge")
	}
}

/// Node/edge counters the backend attaches to every graph response.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GraphStats {
	/// Nodes in the returned graph.
	#[serde(default)]
	pub num_nodes: u64,
	/// Edges in the returned graph.
	#[serde(default)]
	pub num_edges: u64,
	/// Pre-aggregation node count, only on cluster-level responses.
	#[serde(default)]
	pub total_original_nodes: Option<u64>,
}

/// A complete graph response. `nodes` and `edges` are mandatory; an empty
/// `nodes` array is a valid "no results" answer.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphPayload {
	/// Nodes in response order (preserved through the adapter).
	pub nodes: Vec<GraphNode>,
	/// Edges in response order.
	pub edges: Vec<GraphEdge>,
	/// `"cluster"` or `"node"` on aggregated responses.
	#[serde(default)]
	pub level: Option<String>,
	/// Cluster being drilled into, on `level == "node"` responses.
	#[serde(default)]
	pub cluster_id: Option<i64>,
	/// Response counters; zeroed when absent.
	#[serde(default)]
	pub stats: GraphStats,
	/// Inline error message the backend sometimes attaches to 200 responses.
	#[serde(default)]
	pub error: Option<String>,
}

impl GraphPayload {
	/// Node count for display: the backend's counter when present, the
	/// array length otherwise.
	pub fn node_count(&self) -> usize {
		if self.stats.num_nodes > 0 {
			self.stats.num_nodes as usize
		} else {
			self.nodes.len()
		}
	}

	/// Edge count for display, same fallback rule as [`Self::node_count`].
	pub fn edge_count(&self) -> usize {
		if self.stats.num_edges > 0 {
			self.stats.num_edges as usize
		} else {
			self.edges.len()
		}
	}
}

/// One publication entry in an author detail response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Publication {
	/// Publication id.
	pub id: i64,
	/// Title.
	#[serde(default)]
	pub title: String,
	/// Publication year; 0 when unknown.
	#[serde(default)]
	pub year: i32,
	/// Venue name.
	#[serde(default)]
	pub venue: String,
	/// Publication type.
	#[serde(default, rename = "type")]
	pub kind: String,
}

/// One coauthor entry in an author detail response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Coauthor {
	/// Author id of the coauthor.
	pub id: i64,
	/// Coauthor name.
	#[serde(default)]
	pub name: String,
	/// Number of joint publications.
	#[serde(default)]
	pub collaborations: u32,
}

/// Detail record for a single author, display-only.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeDetail {
	/// Author id.
	pub id: i64,
	/// Author name.
	pub name: String,
	/// Total publication count (not bounded by the preview).
	#[serde(default)]
	pub total_publications: u64,
	/// Total coauthor count (not bounded by the preview).
	#[serde(default)]
	pub total_coauthors: u64,
	/// Years with at least one publication, ascending. May be empty.
	#[serde(default)]
	pub years_active: Vec<i32>,
	/// Publications, newest first.
	#[serde(default)]
	pub publications: Vec<Publication>,
	/// Coauthors, most collaborations first.
	#[serde(default)]
	pub coauthors: Vec<Coauthor>,
}

/// Corpus-wide counters from `/api/stats`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ApiStats {
	/// Authors in the corpus.
	#[serde(default)]
	pub total_authors: u64,
	/// Publications in the corpus.
	#[serde(default)]
	pub total_publications: u64,
	/// Nodes in the full co-authorship graph.
	#[serde(default)]
	pub graph_nodes: u64,
	/// Edges in the full co-authorship graph.
	#[serde(default)]
	pub graph_edges: u64,
}

/// One ranked author from `/api/centrality`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CentralityEntry {
	/// Author id.
	pub id: i64,
	/// Author name.
	#[serde(default)]
	pub name: String,
	/// Centrality score for the requested metric.
	#[serde(default)]
	pub centrality: f64,
}

/// Centrality ranking response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CentralityReport {
	/// Metric the ranking was computed for.
	pub metric: String,
	/// Top authors, best first.
	#[serde(default)]
	pub top_authors: Vec<CentralityEntry>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_id_parses_cluster_numbers() {
		assert_eq!(NodeId::from("cluster_7").cluster_number(), Some(7));
		assert_eq!(NodeId::from("cluster_-1").cluster_number(), Some(-1));
		assert_eq!(NodeId::from("author_7").cluster_number(), None);
		assert_eq!(NodeId::Int(7).cluster_number(), None);
	}

	#[test]
	fn node_id_deserializes_both_shapes() {
		let ids: Vec<NodeId> = serde_json::from_str(r#"[12, "cluster_3"]"#).unwrap();
		assert_eq!(ids, vec![NodeId::Int(12), NodeId::from("cluster_3")]);
	}

	#[test]
	fn payload_defaults_apply() {
		let payload: GraphPayload = serde_json::from_str(
			r#"{"nodes": [{"id": 1}], "edges": [{"source": 1, "target": 1}]}"#,
		)
		.unwrap();
		assert_eq!(payload.nodes[0].effective_degree(), 1);
		assert_eq!(payload.edges[0].effective_weight(), 1);
		assert_eq!(payload.stats, GraphStats::default());
		assert!(payload.level.is_none());
	}

	#[test]
	fn payload_without_edges_is_rejected() {
		let res = serde_json::from_str::<GraphPayload>(r#"{"nodes": []}"#);
		assert!(res.is_err());
	}

	#[test]
	fn display_counts_prefer_backend_stats() {
		let counted: GraphPayload = serde_json::from_str(
			r#"{"nodes": [{"id": 1}], "edges": [], "stats": {"num_nodes": 40, "num_edges": 9}}"#,
		)
		.unwrap();
		assert_eq!(counted.node_count(), 40);
		assert_eq!(counted.edge_count(), 9);

		// Absent stats fall back to the array lengths.
		let bare: GraphPayload =
			serde_json::from_str(r#"{"nodes": [{"id": 1}, {"id": 2}], "edges": []}"#).unwrap();
		assert_eq!(bare.node_count(), 2);
		assert_eq!(bare.edge_count(), 0);
	}

	#[test]
	fn cluster_detection_uses_marker_or_prefix() {
		let by_marker: GraphNode =
			serde_json::from_str(r#"{"id": 5, "type": "cluster"}"#).unwrap();
		let by_prefix: GraphNode = serde_json::from_str(r#"{"id": "cluster_5"}"#).unwrap();
		let leaf: GraphNode = serde_json::from_str(r#"{"id": 5}"#).unwrap();
		assert!(by_marker.is_cluster());
		assert!(by_prefix.is_cluster());
		assert!(!leaf.is_cluster());
	}
}
