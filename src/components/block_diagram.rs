//! Alternate block-diagram renderer.
//!
//! Lays the same graph out as labeled rectangles on a ring with straight
//! connection lines, trading physics for a stable, immediately readable
//! arrangement. Useful for small drill-down views and for debugging the
//! adapter without the simulation in the way.

use leptos::prelude::*;

use crate::api::types::NodeId;
use crate::components::graph_view::BlockLayout;

const BLOCK_WIDTH: f64 = 150.0;
const BLOCK_HEIGHT: f64 = 40.0;

/// Renders a [`BlockLayout`] as positioned divs over an SVG connection layer.
#[component]
pub fn BlockDiagramView(
	#[prop(into)] layout: Signal<BlockLayout>,
	on_node_click: Callback<NodeId>,
) -> impl IntoView {
	view! {
		<div
			class="block-diagram"
			style:width=move || format!("{}px", layout.with(|l| l.extent()))
			style:height=move || format!("{}px", layout.with(|l| l.extent()))
		>
			<svg
				class="block-connections"
				width=move || layout.with(|l| l.extent()).to_string()
				height=move || layout.with(|l| l.extent()).to_string()
			>
				{move || {
					layout
						.with(|l| {
							let positions = l.positions();
							l.connections
								.iter()
								.filter_map(|connection| {
									let &(x1, y1) = positions.get(&connection.source)?;
									let &(x2, y2) = positions.get(&connection.target)?;
									Some(
										view! {
											<line
												x1=x1.to_string()
												y1=y1.to_string()
												x2=x2.to_string()
												y2=y2.to_string()
											/>
										},
									)
								})
								.collect_view()
						})
				}}
			</svg>
			{move || {
				layout
					.with(|l| {
						l.blocks
							.iter()
							.map(|block| {
								let id = block.id.clone();
								let left = block.x - BLOCK_WIDTH / 2.0;
								let top = block.y - BLOCK_HEIGHT / 2.0;
								view! {
									<div
										class="block-node"
										style=format!(
											"left: {left}px; top: {top}px; width: {BLOCK_WIDTH}px; height: {BLOCK_HEIGHT}px;",
										)
										on:click=move |_| on_node_click.run(id.clone())
									>
										{block.label.clone()}
									</div>
								}
							})
							.collect_view()
					})
			}}
		</div>
	}
}
