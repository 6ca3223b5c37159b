//! Filter and view controls for the network explorer.
//!
//! Edits a shared [`GraphFilters`] signal in place; loading is explicit
//! (button or Enter key), so half-typed filters never trigger a fetch.

use leptos::prelude::*;
use web_sys::KeyboardEvent;

use crate::api::GraphFilters;

/// Parse an optional numeric field, treating empty input as unset.
fn parse_field<T: std::str::FromStr>(raw: &str) -> Option<T> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		None
	} else {
		trimmed.parse().ok()
	}
}

/// Filter inputs, aggregation toggle and load/reset buttons.
#[component]
pub fn ControlsPanel(
	filters: RwSignal<GraphFilters>,
	#[prop(into)] aggregated: Signal<bool>,
	#[prop(into)] can_go_back: Signal<bool>,
	#[prop(into)] fetching: Signal<bool>,
	on_load: Callback<()>,
	on_reset: Callback<()>,
	on_toggle_aggregation: Callback<bool>,
	on_back: Callback<()>,
) -> impl IntoView {
	let load_on_enter = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			on_load.run(());
		}
	};

	view! {
		<div class="controls">
			<div class="control-group">
				<label for="yearFrom">"Year from"</label>
				<input
					type="number"
					id="yearFrom"
					placeholder="e.g. 2015"
					prop:value=move || {
						filters.with(|f| f.year_from.map(|v| v.to_string()).unwrap_or_default())
					}
					on:input=move |ev| {
						filters.update(|f| f.year_from = parse_field(&event_target_value(&ev)))
					}
					on:keydown=load_on_enter
				/>
			</div>
			<div class="control-group">
				<label for="yearTo">"Year to"</label>
				<input
					type="number"
					id="yearTo"
					placeholder="e.g. 2024"
					prop:value=move || {
						filters.with(|f| f.year_to.map(|v| v.to_string()).unwrap_or_default())
					}
					on:input=move |ev| {
						filters.update(|f| f.year_to = parse_field(&event_target_value(&ev)))
					}
					on:keydown=load_on_enter
				/>
			</div>
			<div class="control-group">
				<label for="venue">"Venue"</label>
				<input
					type="text"
					id="venue"
					placeholder="substring match"
					prop:value=move || filters.with(|f| f.venue.clone().unwrap_or_default())
					on:input=move |ev| {
						filters.update(|f| {
							let value = event_target_value(&ev);
							f.venue = if value.trim().is_empty() { None } else { Some(value) };
						})
					}
					on:keydown=load_on_enter
				/>
			</div>
			<div class="control-group">
				<label for="limit">"Author limit"</label>
				<input
					type="number"
					id="limit"
					min="1"
					prop:value=move || {
						filters.with(|f| f.limit.map(|v| v.to_string()).unwrap_or_default())
					}
					on:input=move |ev| {
						filters.update(|f| f.limit = parse_field(&event_target_value(&ev)))
					}
					on:keydown=load_on_enter
				/>
			</div>

			<div class="control-group checkbox">
				<label for="useAggregation">
					<input
						type="checkbox"
						id="useAggregation"
						prop:checked=move || aggregated.get()
						on:change=move |ev| on_toggle_aggregation.run(event_target_checked(&ev))
					/>
					"Cluster view"
				</label>
			</div>
			// Minimum cluster size only applies to the aggregated view.
			<div
				class="control-group"
				id="minClusterSizeGroup"
				style:display=move || if aggregated.get() { "block" } else { "none" }
			>
				<label for="minClusterSize">"Min cluster size"</label>
				<input
					type="number"
					id="minClusterSize"
					min="1"
					prop:value=move || {
						filters
							.with(|f| f.min_cluster_size.map(|v| v.to_string()).unwrap_or_default())
					}
					on:input=move |ev| {
						filters
							.update(|f| f.min_cluster_size = parse_field(&event_target_value(&ev)))
					}
					on:keydown=load_on_enter
				/>
			</div>

			<div class="control-buttons">
				<button
				id="loadGraph"
				prop:disabled=move || fetching.get()
				on:click=move |_| on_load.run(())
			>
					{move || if fetching.get() { "Loading…" } else { "Load graph" }}
				</button>
				<button id="resetView" on:click=move |_| on_reset.run(())>
					"Reset view"
				</button>
				<button
					id="backToClusters"
					style:display=move || if can_go_back.get() { "inline-block" } else { "none" }
					on:click=move |_| on_back.run(())
				>
					"Back to clusters"
				</button>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_and_garbage_fields_parse_to_none() {
		assert_eq!(parse_field::<u32>(""), None);
		assert_eq!(parse_field::<u32>("   "), None);
		assert_eq!(parse_field::<u32>("abc"), None);
		assert_eq!(parse_field::<u32>("2015"), Some(2015));
		assert_eq!(parse_field::<u32>(" 2015 "), Some(2015));
	}
}
