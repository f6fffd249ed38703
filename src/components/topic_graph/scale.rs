//! Zoom-dependent sizing for graph visuals.
//!
//! Drawing happens after the camera transform has been applied to the canvas,
//! so every size handed to the renderer is in world units. This module turns
//! the configured sizes into world units for the current zoom level `k`.
//!
//! - [`ScaleBehavior::World`]: scales with zoom.
//! - [`ScaleBehavior::Screen`]: constant pixel size; divides by `k`.
//! - [`ScaleBehavior::Clamped`]: scales with zoom inside pixel bounds.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
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

/// Defines how a label's alpha responds to zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, invisible at `zero_alpha_k`.
	Fade {
		zero_alpha_k: f64,
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Compute alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Configured sizes, before applying the zoom level.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Label font size.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	/// Horizontal/vertical padding of label pills, in pixels.
	pub pill_padding: (f64, f64),
	/// Gap between a node and its label pill, in pixels.
	pub pill_gap: f64,
	/// Edge line width in pixels.
	pub edge_width: f64,
	/// Topic ring stroke width in pixels.
	pub topic_ring_width: f64,
	/// Item hover/selection ring stroke width in pixels.
	pub item_ring_width: f64,
	/// Item ring distance from the node edge, in pixels.
	pub item_ring_offset: f64,
	pub topic_label_alpha: AlphaBehavior,
	pub item_label_alpha: AlphaBehavior,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			label_size: 11.0,
			label_behavior: ScaleBehavior::Clamped {
				min_screen: 9.0,
				max_screen: 18.0,
			},
			pill_padding: (6.0, 3.0),
			pill_gap: 6.0,
			edge_width: 1.2,
			topic_ring_width: 2.0,
			item_ring_width: 1.5,
			item_ring_offset: 4.0,
			topic_label_alpha: AlphaBehavior::Fade {
				zero_alpha_k: 0.35,
				full_alpha_k: 0.6,
			},
			item_label_alpha: AlphaBehavior::Constant,
		}
	}
}

/// Sizes resolved for one zoom level, in world units.
///
/// Create this once per frame and pass it to the drawing functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub label_font_size: f64,
	/// Canvas font string (e.g., "11px sans-serif").
	pub label_font: String,
	pub pill_padding: (f64, f64),
	pub pill_gap: f64,
	pub edge_width: f64,
	pub topic_ring_width: f64,
	pub item_ring_width: f64,
	pub item_ring_offset: f64,
	pub topic_label_alpha: f64,
	pub item_label_alpha: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64, font_family: &str) -> Self {
		let label_font_size = config.label_behavior.apply(config.label_size, k);
		Self {
			k,
			label_font_size,
			label_font: format!("{label_font_size}px {font_family}"),
			pill_padding: (config.pill_padding.0 / k, config.pill_padding.1 / k),
			pill_gap: config.pill_gap / k,
			edge_width: config.edge_width / k,
			topic_ring_width: config.topic_ring_width / k,
			item_ring_width: config.item_ring_width / k,
			item_ring_offset: config.item_ring_offset / k,
			topic_label_alpha: config.topic_label_alpha.apply(k),
			item_label_alpha: config.item_label_alpha.apply(k),
		}
	}
}
