//! Force-directed co-authorship graph component.
//!
//! Renders an interactive collaboration graph on an HTML canvas with:
//! - Physics-based layout sized to the graph (see [`physics`])
//! - Cluster boxes and degree-colored author circles
//! - Pan, zoom, node dragging and click-to-drill interactions
//! - Bounded readiness polling and a stabilization progress feed
//!
//! # Example
//!
//! ```ignore
//! use coauthor_graph::components::graph_view::{GraphCanvas, style_graph};
//!
//! let styled = style_graph(&payload, &GraphTheme::default());
//!
//! view! {
//!     <GraphCanvas
//!         data=Signal::derive(move || Some(styled.clone()))
//!         profile=profile
//!         reset_epoch=reset_epoch
//!         on_node_click=on_node_click
//!         phase=phase
//!         progress=progress
//!         render_error=render_error
//!     />
//! }
//! ```

pub mod adapter;
mod component;
pub mod controller;
pub mod physics;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use adapter::{block_layout, renderable_graph, style_graph, BlockLayout, StyledGraph};
pub use component::GraphCanvas;
pub use controller::{RenderError, RenderPhase};
pub use physics::PhysicsProfile;
pub use theme::GraphTheme;
