//! Leptos component owning the graph canvas and its render lifecycle.
//!
//! The component holds the single simulation instance; each data load
//! destroys the previous one and recreates it (never two owners). Because
//! the drawing surface may not exist synchronously after mount, data
//! injection is deferred through bounded readiness polling. Stabilization
//! runs inside a `requestAnimationFrame` loop until the physics budget is
//! spent, then the layout is frozen and the viewport fitted.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use crate::api::types::NodeId;

use super::adapter::StyledGraph;
use super::controller::{
	effective_size, PollBudget, PollOutcome, RenderError, RenderPhase, StabilizationTracker,
	FIT_DELAY_MS, POLL_INTERVAL_MS, POLL_MAX_ATTEMPTS, STABILIZATION_CEILING_MS,
};
use super::physics::PhysicsProfile;
use super::render;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::GraphSimState;
use super::theme::GraphTheme;

/// Pointer travel (px) below which a press-release pair counts as a click.
const CLICK_SLOP_PX: f64 = 4.0;

/// Bundles the simulation with its stabilization tracker and visual config.
struct GraphContext {
	sim: GraphSimState,
	tracker: StabilizationTracker,
	scale: ScaleConfig,
	theme: GraphTheme,
}

/// Interactive force-directed canvas for a styled co-authorship graph.
///
/// `data` carries adapter output (`None` clears the canvas); `phase`,
/// `progress` and `render_error` are written by the controller so the
/// parent can drive overlays. Bumping `reset_epoch` re-fits the viewport.
#[component]
pub fn GraphCanvas(
	#[prop(into)] data: Signal<Option<StyledGraph>>,
	#[prop(into)] profile: Signal<PhysicsProfile>,
	#[prop(into)] reset_epoch: Signal<u32>,
	on_node_click: Callback<NodeId>,
	phase: RwSignal<RenderPhase>,
	progress: RwSignal<u8>,
	render_error: RwSignal<Option<RenderError>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let ceiling: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
	// Pointer press bookkeeping for click-vs-drag discrimination.
	let press: Rc<RefCell<Option<(f64, f64)>>> = Rc::new(RefCell::new(None));

	// Mount: size the canvas, acquire the 2d surface, start the frame loop.
	let (context_init, animate_init) = (context.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = effective_size(
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(0.0),
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(0.0),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		if phase.get_untracked() == RenderPhase::Uninitialized {
			phase.set(RenderPhase::Ready);
		}
		info!("graph canvas ready at {}x{}", w as u32, h as u32);

		let (context_anim, context_fit, animate_inner) =
			(context_init.clone(), context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.sim.animation_running && !c.tracker.is_complete() {
					c.sim.tick(0.016);
					c.tracker.advance(1);
					let pct = c.tracker.percent();
					if progress.get_untracked() != pct {
						progress.set(pct);
					}
					if c.tracker.is_complete() {
						// Budget spent: freeze the layout, then fit the
						// viewport once the freeze has taken effect.
						c.sim.freeze();
						phase.set(RenderPhase::Idle);
						debug!("stabilization complete, freezing layout");
						let fit_context = context_fit.clone();
						Timeout::new(FIT_DELAY_MS, move || {
							if let Some(ref mut c) = *fit_context.borrow_mut() {
								c.sim.fit_to_content();
							}
						})
						.forget();
					}
				}
				render::render(&c.sim, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Dropping the closure breaks the requestAnimationFrame chain when the
	// component unmounts.
	let animate_cleanup = send_wrapper::SendWrapper::new(animate.clone());
	on_cleanup(move || {
		*animate_cleanup.borrow_mut() = None;
	});

	// Data injection with bounded readiness polling.
	let (context_data, ceiling_data) = (context.clone(), ceiling.clone());
	Effect::new(move |_| {
		// Empty graphs never reach the simulation; their counters read 0/0
		// without a stabilization run.
		let styled = data.get().filter(|graph| !graph.nodes.is_empty());

		// Destroy the prior instance and cancel any stale ceiling timeout
		// before polling starts.
		*context_data.borrow_mut() = None;
		*ceiling_data.borrow_mut() = None;
		progress.set(0);

		let Some(styled) = styled else {
			if phase.get_untracked() != RenderPhase::Uninitialized {
				phase.set(RenderPhase::Ready);
			}
			return;
		};

		phase.set(RenderPhase::Rendering);
		render_error.set(None);
		let profile_now = profile.get_untracked();
		let (context_inject, ceiling_inject) = (context_data.clone(), ceiling_data.clone());

		spawn_local(async move {
			let mut budget = PollBudget::new();
			let canvas = loop {
				let ready = canvas_ref.get_untracked().and_then(|c| {
					let canvas: HtmlCanvasElement = c.into();
					match canvas.get_context("2d") {
						Ok(Some(_)) => Some(canvas),
						_ => None,
					}
				});
				if let Some(canvas) = ready {
					break Some(canvas);
				}
				match budget.register_failure() {
					PollOutcome::Retry => TimeoutFuture::new(POLL_INTERVAL_MS).await,
					PollOutcome::Exhausted => break None,
				}
			};

			let Some(canvas) = canvas else {
				warn!(
					"drawing surface never became ready after {} attempts",
					POLL_MAX_ATTEMPTS
				);
				render_error.set(Some(RenderError::CanvasUnavailable));
				phase.set(RenderPhase::Error);
				return;
			};

			let (w, h) = (canvas.width() as f64, canvas.height() as f64);
			let tracker = StabilizationTracker::new(profile_now.stabilization_iterations);
			let sim = GraphSimState::new(&styled, w, h, &profile_now);
			debug!(
				"injecting {} nodes, {} iteration budget",
				styled.nodes.len(),
				profile_now.stabilization_iterations
			);
			*context_inject.borrow_mut() = Some(GraphContext {
				sim,
				tracker,
				scale: ScaleConfig::default(),
				theme: GraphTheme::default(),
			});
			phase.set(RenderPhase::Stabilizing);

			// Ceiling: hide the loading state even if the budget never
			// completes. Replacing the handle cancels any stale timeout.
			let ceiling_context = context_inject.clone();
			*ceiling_inject.borrow_mut() = Some(Timeout::new(STABILIZATION_CEILING_MS, move || {
				if let Some(ref mut c) = *ceiling_context.borrow_mut() {
					if !c.tracker.is_complete() {
						warn!("stabilization ceiling hit, freezing layout early");
						c.tracker.force_complete();
						c.sim.freeze();
						c.sim.fit_to_content();
					}
				}
				progress.set(100);
				if phase.get_untracked() == RenderPhase::Stabilizing {
					phase.set(RenderPhase::Idle);
				}
			}));
		});
	});

	// Reset-view trigger from the parent.
	let context_reset = context.clone();
	Effect::new(move |_| {
		let epoch = reset_epoch.get();
		if epoch == 0 {
			return;
		}
		if let Some(ref mut c) = *context_reset.borrow_mut() {
			c.sim.fit_to_content();
		}
	});

	let (context_md, press_md) = (context.clone(), press.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		*press_md.borrow_mut() = Some((x, y));

		if let Some(ref mut c) = *context_md.borrow_mut() {
			let scale = ScaledValues::new(&c.scale, c.sim.transform.k);
			if let Some(idx) = c.sim.node_at_position(x, y, &scale) {
				c.sim.drag.active = true;
				c.sim.drag.node_idx = Some(idx);
				c.sim.drag.start_x = x;
				c.sim.drag.start_y = y;
				c.sim.graph.visit_nodes(|node| {
					if node.index() == idx {
						c.sim.drag.node_start_x = node.x();
						c.sim.drag.node_start_y = node.y();
					}
				});
			} else {
				c.sim.pan.active = true;
				c.sim.pan.start_x = x;
				c.sim.pan.start_y = y;
				c.sim.pan.transform_start_x = c.sim.transform.x;
				c.sim.pan.transform_start_y = c.sim.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if !c.sim.drag.active {
				let scale = ScaledValues::new(&c.scale, c.sim.transform.k);
				c.sim.hovered = c.sim.node_at_position(x, y, &scale);
			}

			if c.sim.drag.active {
				if let Some(idx) = c.sim.drag.node_idx {
					let (dx, dy) = (
						(x - c.sim.drag.start_x) / c.sim.transform.k,
						(y - c.sim.drag.start_y) / c.sim.transform.k,
					);
					let (nx, ny) = (
						c.sim.drag.node_start_x + dx as f32,
						c.sim.drag.node_start_y + dy as f32,
					);
					c.sim.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if c.sim.pan.active {
				c.sim.transform.x = c.sim.pan.transform_start_x + (x - c.sim.pan.start_x);
				c.sim.transform.y = c.sim.pan.transform_start_y + (y - c.sim.pan.start_y);
			}
		}
	};

	let (context_mu, press_mu) = (context.clone(), press.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let mut clicked = None;
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if let Some((px, py)) = press_mu.borrow_mut().take() {
				let travel = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
				if travel < CLICK_SLOP_PX {
					let scale = ScaledValues::new(&c.scale, c.sim.transform.k);
					clicked = c
						.sim
						.node_at_position(x, y, &scale)
						.and_then(|idx| c.sim.node_id_at(idx));
				}
			}
			c.sim.drag.active = false;
			c.sim.drag.node_idx = None;
			c.sim.pan.active = false;
		}
		if let Some(id) = clicked {
			on_node_click.run(id);
		}
	};

	let (context_ml, press_ml) = (context.clone(), press.clone());
	let on_mouseleave = move |_: MouseEvent| {
		*press_ml.borrow_mut() = None;
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.sim.drag.active = false;
			c.sim.drag.node_idx = None;
			c.sim.pan.active = false;
			c.sim.hovered = None;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.sim.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.sim.transform.k;
			c.sim.transform.x = x - (x - c.sim.transform.x) * ratio;
			c.sim.transform.y = y - (y - c.sim.transform.y) * ratio;
			c.sim.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
