//! Colors and visual style for the graph canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color from RGB channels plus alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Color from hue (degrees), saturation and lightness (0.0 to 1.0).
	pub fn hsl(h: f64, s: f64, l: f64) -> Self {
		let h = h.rem_euclid(360.0);
		let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
		let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
		let m = l - c / 2.0;
		let (r1, g1, b1) = match h {
			h if h < 60.0 => (c, x, 0.0),
			h if h < 120.0 => (x, c, 0.0),
			h if h < 180.0 => (0.0, c, x),
			h if h < 240.0 => (0.0, x, c),
			h if h < 300.0 => (x, 0.0, c),
			_ => (c, 0.0, x),
		};
		Self::rgb(
			((r1 + m) * 255.0).round() as u8,
			((g1 + m) * 255.0).round() as u8,
			((b1 + m) * 255.0).round() as u8,
		)
	}

	/// Same color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white).
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black).
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS representation, hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Visual theme for the graph canvas.
#[derive(Clone, Debug)]
pub struct GraphTheme {
	/// Primary background color.
	pub background: Color,
	/// Secondary background color for the radial gradient.
	pub background_secondary: Color,
	/// Whether the background uses a radial gradient.
	pub use_gradient: bool,
	/// Base edge color.
	pub edge: Color,
	/// Fill for aggregated cluster boxes (fixed accent).
	pub cluster_fill: Color,
	/// Border for aggregated cluster boxes.
	pub cluster_border: Color,
	/// Label text color.
	pub label: Color,
	/// Saturation for degree-gradient author colors.
	pub leaf_saturation: f64,
	/// Fill lightness for author nodes.
	pub leaf_fill_lightness: f64,
	/// Border lightness for author nodes (darker than the fill).
	pub leaf_border_lightness: f64,
}

impl Default for GraphTheme {
	fn default() -> Self {
		Self {
			background: Color::rgb(22, 27, 34),
			background_secondary: Color::rgb(30, 35, 42),
			use_gradient: true,
			edge: Color::rgba(140, 160, 180, 0.5),
			cluster_fill: Color::rgb(230, 81, 0),
			cluster_border: Color::rgb(160, 56, 0),
			label: Color::rgba(255, 255, 255, 0.9),
			leaf_saturation: 0.65,
			leaf_fill_lightness: 0.55,
			leaf_border_lightness: 0.40,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hsl_primaries() {
		assert_eq!(Color::hsl(0.0, 1.0, 0.5), Color::rgb(255, 0, 0));
		assert_eq!(Color::hsl(120.0, 1.0, 0.5), Color::rgb(0, 255, 0));
		assert_eq!(Color::hsl(240.0, 1.0, 0.5), Color::rgb(0, 0, 255));
	}

	#[test]
	fn hsl_lightness_extremes() {
		assert_eq!(Color::hsl(200.0, 0.7, 0.0), Color::rgb(0, 0, 0));
		assert_eq!(Color::hsl(200.0, 0.7, 1.0), Color::rgb(255, 255, 255));
	}

	#[test]
	fn css_formats() {
		assert_eq!(Color::rgb(230, 81, 0).to_css(), "#e65100");
		assert_eq!(Color::rgba(10, 20, 30, 0.5).to_css(), "rgba(10, 20, 30, 0.5)");
	}
}
