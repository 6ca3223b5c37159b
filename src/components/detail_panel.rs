//! Author detail panel.
//!
//! Detail responses can carry an author's full history; the panel shows a
//! bounded preview (first [`MAX_PREVIEW_ITEMS`] of each list) with "and N
//! more" counters, keeping the DOM size independent of author prolificacy.

use leptos::prelude::*;

use crate::api::types::{Coauthor, NodeDetail, Publication};

/// Publications and coauthors shown before the list is cut off.
pub const MAX_PREVIEW_ITEMS: usize = 10;

/// Bounded, display-ready projection of a [`NodeDetail`].
#[derive(Clone, Debug, PartialEq)]
pub struct DetailPreview {
	/// Author name.
	pub name: String,
	/// Total publication count.
	pub total_publications: u64,
	/// Total coauthor count.
	pub total_coauthors: u64,
	/// `"2009–2024"` style active range, or `"no data"`.
	pub years_label: String,
	/// At most [`MAX_PREVIEW_ITEMS`] publications.
	pub publications: Vec<Publication>,
	/// Publications beyond the preview.
	pub more_publications: usize,
	/// At most [`MAX_PREVIEW_ITEMS`] coauthors.
	pub coauthors: Vec<Coauthor>,
	/// Coauthors beyond the preview.
	pub more_coauthors: usize,
}

impl DetailPreview {
	/// Project a detail response into its bounded preview.
	pub fn from_detail(detail: &NodeDetail) -> Self {
		let years_label = match (detail.years_active.iter().min(), detail.years_active.iter().max())
		{
			(Some(first), Some(last)) => format!("{first}\u{2013}{last}"),
			_ => "no data".to_string(),
		};

		Self {
			name: detail.name.clone(),
			total_publications: detail.total_publications,
			total_coauthors: detail.total_coauthors,
			years_label,
			publications: detail
				.publications
				.iter()
				.take(MAX_PREVIEW_ITEMS)
				.cloned()
				.collect(),
			more_publications: detail.publications.len().saturating_sub(MAX_PREVIEW_ITEMS),
			coauthors: detail
				.coauthors
				.iter()
				.take(MAX_PREVIEW_ITEMS)
				.cloned()
				.collect(),
			more_coauthors: detail.coauthors.len().saturating_sub(MAX_PREVIEW_ITEMS),
		}
	}
}

/// Side panel showing details of the selected author.
#[component]
pub fn DetailPanel(
	#[prop(into)] detail: Signal<Option<NodeDetail>>,
	#[prop(into)] loading: Signal<bool>,
	#[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
	let preview = Memo::new(move |_| detail.with(|d| d.as_ref().map(DetailPreview::from_detail)));

	view! {
		<div id="nodeInfo" class="detail-panel">
			<div
				id="node-loading"
				class="panel-loading"
				style:display=move || if loading.get() { "block" } else { "none" }
			>
				"Loading author details…"
			</div>
			{move || {
				error.get().map(|message| view! { <div class="panel-error">{message}</div> })
			}}
			{move || {
				preview
					.get()
					.map(|p| {
						view! {
							<h3>{p.name.clone()}</h3>
							<p class="detail-summary">
								{format!(
									"{} publications · {} coauthors · active {}",
									p.total_publications,
									p.total_coauthors,
									p.years_label,
								)}
							</p>
							<h4>"Publications"</h4>
							<ul class="detail-list">
								{p
									.publications
									.iter()
									.map(|publication| {
										let year = if publication.year > 0 {
											format!(" ({})", publication.year)
										} else {
											String::new()
										};
										view! {
											<li>{format!("{}{}", publication.title, year)}</li>
										}
									})
									.collect_view()}
							</ul>
							{(p.more_publications > 0)
								.then(|| {
									view! {
										<p class="detail-more">
											{format!("…and {} more", p.more_publications)}
										</p>
									}
								})}
							<h4>"Top coauthors"</h4>
							<ul class="detail-list">
								{p
									.coauthors
									.iter()
									.map(|coauthor| {
										view! {
											<li>
												{format!(
													"{} ({} joint)",
													coauthor.name,
													coauthor.collaborations,
												)}
											</li>
										}
									})
									.collect_view()}
							</ul>
							{(p.more_coauthors > 0)
								.then(|| {
									view! {
										<p class="detail-more">
											{format!("…and {} more", p.more_coauthors)}
										</p>
									}
								})}
						}
					})
			}}
			{move || {
				(detail.with(|d| d.is_none()) && !loading.get() && error.with(|e| e.is_none()))
					.then(|| {
						view! {
							<p class="panel-hint">"Click an author node to see their details."</p>
						}
					})
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn detail(publications: usize, coauthors: usize, years: Vec<i32>) -> NodeDetail {
		NodeDetail {
			id: 1,
			name: "Ada Lovelace".to_string(),
			total_publications: publications as u64,
			total_coauthors: coauthors as u64,
			years_active: years,
			publications: (0..publications)
				.map(|i| Publication {
					id: i as i64,
					title: format!("Paper {i}"),
					year: 2000 + i as i32,
					venue: String::new(),
					kind: String::new(),
				})
				.collect(),
			coauthors: (0..coauthors)
				.map(|i| Coauthor {
					id: i as i64,
					name: format!("Coauthor {i}"),
					collaborations: 1,
				})
				.collect(),
		}
	}

	#[test]
	fn preview_is_bounded_at_ten_items() {
		let preview = DetailPreview::from_detail(&detail(25, 12, vec![2001, 2024]));
		assert_eq!(preview.publications.len(), MAX_PREVIEW_ITEMS);
		assert_eq!(preview.more_publications, 15);
		assert_eq!(preview.coauthors.len(), MAX_PREVIEW_ITEMS);
		assert_eq!(preview.more_coauthors, 2);
		// Totals still report the full counts.
		assert_eq!(preview.total_publications, 25);
	}

	#[test]
	fn short_lists_show_no_more_counter() {
		let preview = DetailPreview::from_detail(&detail(3, 2, vec![2020]));
		assert_eq!(preview.publications.len(), 3);
		assert_eq!(preview.more_publications, 0);
		assert_eq!(preview.more_coauthors, 0);
	}

	#[test]
	fn years_label_spans_min_to_max() {
		let preview = DetailPreview::from_detail(&detail(1, 1, vec![2010, 2003, 2024]));
		assert_eq!(preview.years_label, "2003\u{2013}2024");
	}

	#[test]
	fn empty_years_read_no_data() {
		let preview = DetailPreview::from_detail(&detail(1, 1, vec![]));
		assert_eq!(preview.years_label, "no data");
	}
}
