//! UI components for the co-authorship network explorer.

pub mod block_diagram;
pub mod controls;
pub mod detail_panel;
pub mod graph_view;
