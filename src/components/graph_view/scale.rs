//! Zoom-dependent scaling for graph visuals.
//!
//! World-space values scale with the canvas transform; screen-space values
//! divide by the zoom factor `k` to stay a constant pixel size.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest allowed on-screen size in pixels.
		min_screen: f64,
		/// Largest allowed on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for a base size at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Scaling configuration for the graph canvas.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// How node radii scale with zoom.
	pub node_behavior: ScaleBehavior,
	/// Extra hit-test slop around a node, in screen pixels.
	pub hit_slop: f64,
	/// How edge line widths scale with zoom.
	pub edge_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Zoom floor for label font scaling.
	pub label_min_k: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: f64::INFINITY,
			},
			hit_slop: 6.0,
			edge_behavior: ScaleBehavior::Screen,
			label_size: 11.0,
			label_min_k: 0.5,
		}
	}
}

/// Pre-computed scale values for one zoom level; build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Hit slop in world units.
	pub hit_slop: f64,
	/// Label font string, e.g. `"11px sans-serif"`.
	pub label_font: String,
	node_behavior: ScaleBehavior,
	edge_behavior: ScaleBehavior,
}

impl ScaledValues {
	/// Compute scaled values for zoom level `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			hit_slop: config.hit_slop / k,
			label_font: format!(
				"{}px sans-serif",
				config.label_size / k.max(config.label_min_k)
			),
			node_behavior: config.node_behavior.clone(),
			edge_behavior: config.edge_behavior.clone(),
		}
	}

	/// World-space radius for a node's base radius.
	pub fn node_radius(&self, base: f64) -> f64 {
		self.node_behavior.apply(base, self.k)
	}

	/// World-space line width for an edge's base width.
	pub fn edge_width(&self, base: f64) -> f64 {
		self.edge_behavior.apply(base, self.k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors_scale_as_documented() {
		assert_eq!(ScaleBehavior::World.apply(10.0, 4.0), 10.0);
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 4.0), 2.5);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 3.0,
			max_screen: 20.0,
		};
		// Zoomed far out the min screen bound takes over.
		assert_eq!(clamped.apply(10.0, 0.1), 3.0 / 0.1);
		// Zoomed far in the max screen bound caps it.
		assert_eq!(clamped.apply(10.0, 10.0), 20.0 / 10.0);
		// In the middle range the base value passes through.
		assert_eq!(clamped.apply(10.0, 1.0), 10.0);
	}

	#[test]
	fn edges_keep_constant_screen_width() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert_eq!(scale.edge_width(3.0), 1.5);
	}
}
