//! HTTP client for the graph analysis backend.
//!
//! All calls are plain GETs against a fixed base URL. Errors are surfaced as
//! [`ApiError`] values and rendered inline by the caller; there are no
//! retries. Overlapping graph loads are not sequenced: if two loads are in
//! flight the last one to resolve wins.

pub mod types;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

use types::{ApiStats, CentralityReport, GraphPayload, NodeDetail, NodeId};

/// Backend the client talks to when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Node cap applied when the limit filter is left empty.
pub const DEFAULT_LIMIT: u32 = 100;

/// Errors a backend call can produce.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
	/// The request never produced a response (network down, CORS, DNS).
	#[error("request failed: {0}")]
	Request(String),
	/// The backend answered with a non-success status.
	#[error("server returned HTTP {status}")]
	Network {
		/// HTTP status code.
		status: u16,
	},
	/// The response body was not the expected JSON shape
	/// (e.g. missing `nodes`/`edges` arrays).
	#[error("malformed response: {0}")]
	Format(String),
}

/// Optional graph filters; empty values are omitted from query strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphFilters {
	/// Earliest publication year to include.
	pub year_from: Option<i32>,
	/// Latest publication year to include.
	pub year_to: Option<i32>,
	/// Substring match on venue name.
	pub venue: Option<String>,
	/// Node cap; [`DEFAULT_LIMIT`] when `None`.
	pub limit: Option<u32>,
	/// Minimum cluster size for aggregated queries.
	pub min_cluster_size: Option<u32>,
}

/// Aggregation level requested from the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregationLevel {
	/// One node per cluster.
	Cluster,
	/// Individual authors inside one cluster.
	Node,
}

impl AggregationLevel {
	fn as_param(self) -> &'static str {
		match self {
			AggregationLevel::Cluster => "cluster",
			AggregationLevel::Node => "node",
		}
	}
}

/// A fully-decided graph query, produced by the drill-down state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphRequest {
	/// Flat author-level graph from `/api/graph`.
	Flat {
		/// Active filters.
		filters: GraphFilters,
	},
	/// Aggregated graph from `/api/graph_aggregated`.
	Aggregated {
		/// Active filters.
		filters: GraphFilters,
		/// Requested aggregation level.
		level: AggregationLevel,
		/// Cluster to expand when `level` is [`AggregationLevel::Node`].
		cluster_id: Option<i64>,
	},
}

impl GraphRequest {
	/// Path plus query string for this request, relative to the base URL.
	pub fn path_and_query(&self) -> String {
		match self {
			GraphRequest::Flat { filters } => {
				let mut params = Vec::new();
				push_filters(&mut params, filters);
				join_query("/api/graph", &params)
			}
			GraphRequest::Aggregated {
				filters,
				level,
				cluster_id,
			} => {
				let mut params = vec![format!("level={}", level.as_param())];
				if let Some(id) = cluster_id {
					params.push(format!("cluster_id={}", id));
				}
				if let Some(size) = filters.min_cluster_size {
					params.push(format!("min_cluster_size={}", size));
				}
				push_filters(&mut params, filters);
				join_query("/api/graph_aggregated", &params)
			}
		}
	}
}

fn push_filters(params: &mut Vec<String>, filters: &GraphFilters) {
	params.push(format!("limit={}", filters.limit.unwrap_or(DEFAULT_LIMIT)));
	if let Some(year) = filters.year_from {
		params.push(format!("year_from={}", year));
	}
	if let Some(year) = filters.year_to {
		params.push(format!("year_to={}", year));
	}
	if let Some(venue) = filters.venue.as_deref() {
		if !venue.is_empty() {
			params.push(format!("venue={}", urlencode(venue)));
		}
	}
}

fn join_query(path: &str, params: &[String]) -> String {
	if params.is_empty() {
		path.to_string()
	} else {
		format!("{}?{}", path, params.join("&"))
	}
}

/// Minimal percent-encoding for the venue filter (the only free-text param).
fn urlencode(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for byte in value.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
				out.push(byte as char)
			}
			b' ' => out.push('+'),
			_ => out.push_str(&format!("%{:02X}", byte)),
		}
	}
	out
}

/// Thin typed wrapper over the backend's REST endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
}

impl Default for ApiClient {
	fn default() -> Self {
		Self::new(DEFAULT_BASE_URL)
	}
}

impl ApiClient {
	/// Client against the given base URL (no trailing slash).
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
		}
	}

	async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ApiError> {
		let url = format!("{}{}", self.base_url, path_and_query);
		let response = Request::get(&url)
			.send()
			.await
			.map_err(|e| ApiError::Request(e.to_string()))?;
		if !response.ok() {
			return Err(ApiError::Network {
				status: response.status(),
			});
		}
		let body = response
			.text()
			.await
			.map_err(|e| ApiError::Request(e.to_string()))?;
		serde_json::from_str(&body).map_err(|e| ApiError::Format(e.to_string()))
	}

	/// Fetch a graph for the given request.
	pub async fn fetch_graph(&self, request: &GraphRequest) -> Result<GraphPayload, ApiError> {
		self.get_json(&request.path_and_query()).await
	}

	/// Fetch the detail record for a single author.
	pub async fn fetch_node_info(&self, id: &NodeId) -> Result<NodeDetail, ApiError> {
		self.get_json(&format!("/api/node_info/{}", id)).await
	}

	/// Fetch corpus-wide counters.
	pub async fn fetch_stats(&self) -> Result<ApiStats, ApiError> {
		self.get_json("/api/stats").await
	}

	/// Fetch the top authors by the given centrality metric.
	pub async fn fetch_centrality(
		&self,
		metric: &str,
		top: u32,
	) -> Result<CentralityReport, ApiError> {
		self.get_json(&format!("/api/centrality?metric={}&top={}", metric, top))
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flat_query_defaults_limit_and_omits_empty_filters() {
		let request = GraphRequest::Flat {
			filters: GraphFilters::default(),
		};
		assert_eq!(request.path_and_query(), "/api/graph?limit=100");
	}

	#[test]
	fn flat_query_carries_all_set_filters() {
		let request = GraphRequest::Flat {
			filters: GraphFilters {
				year_from: Some(2020),
				year_to: Some(2023),
				venue: Some("CVPR".to_string()),
				limit: Some(200),
				min_cluster_size: Some(3),
			},
		};
		assert_eq!(
			request.path_and_query(),
			"/api/graph?limit=200&year_from=2020&year_to=2023&venue=CVPR"
		);
	}

	#[test]
	fn empty_venue_is_omitted() {
		let request = GraphRequest::Flat {
			filters: GraphFilters {
				venue: Some(String::new()),
				..GraphFilters::default()
			},
		};
		assert!(!request.path_and_query().contains("venue"));
	}

	#[test]
	fn venue_is_percent_encoded() {
		let request = GraphRequest::Flat {
			filters: GraphFilters {
				venue: Some("Conf. on AI & ML".to_string()),
				..GraphFilters::default()
			},
		};
		assert_eq!(
			request.path_and_query(),
			"/api/graph?limit=100&venue=Conf.+on+AI+%26+ML"
		);
	}

	#[test]
	fn aggregated_query_includes_level_and_cluster() {
		let request = GraphRequest::Aggregated {
			filters: GraphFilters {
				min_cluster_size: Some(5),
				..GraphFilters::default()
			},
			level: AggregationLevel::Node,
			cluster_id: Some(-1),
		};
		assert_eq!(
			request.path_and_query(),
			"/api/graph_aggregated?level=node&cluster_id=-1&min_cluster_size=5&limit=100"
		);
	}

	#[test]
	fn cluster_level_query_has_no_cluster_id() {
		let request = GraphRequest::Aggregated {
			filters: GraphFilters::default(),
			level: AggregationLevel::Cluster,
			cluster_id: None,
		};
		assert_eq!(
			request.path_and_query(),
			"/api/graph_aggregated?level=cluster&limit=100"
		);
	}
}
