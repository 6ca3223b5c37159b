//! coauthor-graph: interactive co-authorship network explorer.
//!
//! WASM front-end for a publication-graph REST backend. Fetches flat or
//! cluster-aggregated co-authorship graphs, renders them with a
//! physics-based canvas (or an alternate block diagram), and supports
//! drilling from cluster overview into individual authors.

use leptos::prelude::*;
use leptos_meta::*;
use log::{info, warn, Level};
use wasm_bindgen_futures::spawn_local;

pub mod api;
pub mod components;
pub mod view_state;

use api::types::{ApiStats, CentralityEntry, GraphPayload, NodeDetail, NodeId};
use api::ApiClient;
use components::block_diagram::BlockDiagramView;
use components::controls::ControlsPanel;
use components::detail_panel::DetailPanel;
use components::graph_view::{
	block_layout, renderable_graph, GraphCanvas, GraphTheme, PhysicsProfile, RenderError,
	RenderPhase,
};
use view_state::ViewState;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("coauthor-graph: logging initialized");
}

/// Which renderer draws the current payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Renderer {
	/// Force-directed canvas.
	#[default]
	Force,
	/// Static ring of labeled blocks.
	Blocks,
}

/// Main application component: controls, graph canvas and detail panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let filters = RwSignal::new(api::GraphFilters {
		limit: Some(api::DEFAULT_LIMIT),
		min_cluster_size: Some(3),
		..Default::default()
	});
	let view_state = RwSignal::new(ViewState::default());
	let payload = RwSignal::new(None::<GraphPayload>);
	let fetching = RwSignal::new(false);
	let graph_error = RwSignal::new(None::<String>);

	let phase = RwSignal::new(RenderPhase::default());
	let progress = RwSignal::new(0u8);
	let render_error = RwSignal::new(None::<RenderError>);
	let renderer = RwSignal::new(Renderer::default());
	let reset_epoch = RwSignal::new(0u32);

	let detail = RwSignal::new(None::<NodeDetail>);
	let detail_loading = RwSignal::new(false);
	let detail_error = RwSignal::new(None::<String>);

	let corpus = RwSignal::new(None::<ApiStats>);
	let top_authors = RwSignal::new(Vec::<CentralityEntry>::new());

	let styled = Memo::new(move |_| {
		payload.with(|p| {
			p.as_ref()
				.and_then(|p| renderable_graph(p, &GraphTheme::default()))
		})
	});
	let blocks = Memo::new(move |_| {
		payload.with(|p| p.as_ref().map(block_layout).unwrap_or_default())
	});
	let profile = Memo::new(move |_| {
		let n = payload.with(|p| p.as_ref().map(|p| p.nodes.len()).unwrap_or(0));
		PhysicsProfile::for_node_count(n)
	});
	let node_count = Signal::derive(move || {
		payload.with(|p| p.as_ref().map(|p| p.node_count()).unwrap_or(0))
	});
	let edge_count = Signal::derive(move || {
		payload.with(|p| p.as_ref().map(|p| p.edge_count()).unwrap_or(0))
	});
	let aggregated = Signal::derive(move || view_state.with(|v| v.aggregated));
	let can_go_back = Signal::derive(move || view_state.with(|v| v.can_go_back()));

	// Overlapping loads are not serialized; whichever response lands last
	// wins, and the fetching flag clears with it.
	let on_load = Callback::new(move |_: ()| {
		let request = view_state.with_untracked(|v| v.request(filters.get_untracked()));
		fetching.set(true);
		graph_error.set(None);
		spawn_local(async move {
			let client = ApiClient::default();
			match client.fetch_graph(&request).await {
				Ok(response) => {
					if let Some(message) = response.error.clone() {
						warn!("backend reported: {}", message);
						graph_error.set(Some(message));
					}
					info!(
						"loaded {} nodes, {} edges",
						response.nodes.len(),
						response.edges.len()
					);
					payload.set(Some(response));
				}
				Err(e) => {
					warn!("graph load failed: {}", e);
					graph_error.set(Some(e.to_string()));
				}
			}
			fetching.set(false);
		});
	});

	// Cluster nodes expand; author nodes open the detail panel.
	let on_node_click = Callback::new(move |id: NodeId| {
		let drilled = {
			let mut v = view_state.get_untracked();
			let ok = v.drill_into(&id);
			if ok {
				view_state.set(v);
			}
			ok
		};
		if drilled {
			detail.set(None);
			on_load.run(());
			return;
		}
		if id.is_cluster() {
			return;
		}

		detail_loading.set(true);
		detail_error.set(None);
		spawn_local(async move {
			let client = ApiClient::default();
			match client.fetch_node_info(&id).await {
				Ok(record) => detail.set(Some(record)),
				Err(e) => {
					warn!("node detail load failed: {}", e);
					detail_error.set(Some(e.to_string()));
				}
			}
			detail_loading.set(false);
		});
	});

	let on_reset = Callback::new(move |_: ()| {
		reset_epoch.update(|epoch| *epoch += 1);
	});
	let on_toggle_aggregation = Callback::new(move |on: bool| {
		view_state.update(|v| v.set_aggregation(on));
		detail.set(None);
		on_load.run(());
	});
	let on_back = Callback::new(move |_: ()| {
		view_state.update(|v| v.back_to_clusters());
		detail.set(None);
		on_load.run(());
	});

	// Initial load plus one-shot corpus stats and centrality ranking.
	Effect::new(move |_| {
		on_load.run(());
		spawn_local(async move {
			let client = ApiClient::default();
			match client.fetch_stats().await {
				Ok(stats) => corpus.set(Some(stats)),
				Err(e) => warn!("stats load failed: {}", e),
			}
			match client.fetch_centrality("degree", 5).await {
				Ok(report) => top_authors.set(report.top_authors),
				Err(e) => warn!("centrality load failed: {}", e),
			}
		});
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Co-authorship Network Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<header class="app-header">
			<h1>"Co-authorship Network"</h1>
			<p class="subtitle">
				{move || {
					corpus
						.with(|c| {
							c.as_ref()
								.map(|s| {
									format!(
										"{} authors · {} publications in corpus",
										s.total_authors,
										s.total_publications,
									)
								})
								.unwrap_or_else(|| {
									"Drag nodes to reposition. Scroll to zoom. Click clusters to expand."
										.to_string()
								})
						})
				}}
			</p>
		</header>

		<ControlsPanel
			filters=filters
			aggregated=aggregated
			can_go_back=can_go_back
			fetching=fetching
			on_load=on_load
			on_reset=on_reset
			on_toggle_aggregation=on_toggle_aggregation
			on_back=on_back
		/>

		<div class="main-row">
			<div class="graph-column">
				<div class="graph-toolbar">
					<span class="graph-stats">
						<span id="nodeCount">{move || node_count.get()}</span>
						" nodes · "
						<span id="edgeCount">{move || edge_count.get()}</span>
						" edges"
					</span>
					<button
						class="renderer-toggle"
						on:click=move |_| {
							renderer
								.update(|r| {
									*r = match r {
										Renderer::Force => Renderer::Blocks,
										Renderer::Blocks => Renderer::Force,
									}
								})
						}
					>
						{move || {
							match renderer.get() {
								Renderer::Force => "Switch to block view",
								Renderer::Blocks => "Switch to force view",
							}
						}}
					</button>
				</div>

				<div id="graph-container" class="graph-container">
					{move || match renderer.get() {
						Renderer::Force => {
							view! {
								<GraphCanvas
									data=styled
									profile=profile
									reset_epoch=reset_epoch
									on_node_click=on_node_click
									phase=phase
									progress=progress
									render_error=render_error
								/>
							}
								.into_any()
						}
						Renderer::Blocks => {
							view! {
								<BlockDiagramView layout=blocks on_node_click=on_node_click />
							}
								.into_any()
						}
					}}

					<div
						id="graph-loading"
						class="graph-overlay"
						style:display=move || {
							if fetching.get()
								|| (renderer.get() == Renderer::Force && phase.get().is_busy())
							{
								"flex"
							} else {
								"none"
							}
						}
					>
						<div class="spinner"></div>
						<div
							id="stabilization-progress"
							style:display=move || {
								if phase.get() == RenderPhase::Stabilizing { "block" } else { "none" }
							}
						>
							{move || format!("Stabilizing… {}%", progress.get())}
						</div>
					</div>

					{move || {
						graph_error
							.get()
							.or_else(|| render_error.get().map(|e| e.to_string()))
							.map(|message| {
								view! { <div class="graph-error">{message}</div> }
							})
					}}
				</div>
			</div>

			<aside class="side-column">
				<DetailPanel detail=detail loading=detail_loading error=detail_error />

				<div class="centrality-panel">
					<h4>"Most connected authors"</h4>
					<ol>
						{move || {
							top_authors
								.get()
								.into_iter()
								.map(|entry| {
									view! {
										<li>
											{format!("{} ({:.3})", entry.name, entry.centrality)}
										</li>
									}
								})
								.collect_view()
						}}
					</ol>
				</div>
			</aside>
		</div>
	}
}
