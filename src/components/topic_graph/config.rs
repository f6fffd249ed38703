//! Behavioral constants for layout, camera, animation and interaction.
//!
//! Visual styling lives in [`super::theme`] and zoom-dependent sizing in
//! [`super::scale`]; this module only holds the numbers that change what the
//! engine *does*.

/// Camera zoom limits and wheel step factors.
#[derive(Clone, Debug)]
pub struct CameraConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	/// Factor applied per wheel notch towards the user (zoom in).
	pub zoom_in_factor: f64,
	/// Factor applied per wheel notch away from the user (zoom out).
	pub zoom_out_factor: f64,
}

/// Radial layout parameters. Fractions are relative to `min(width, height)`.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Radius of the topic ring.
	pub topic_ring_fraction: f64,
	/// Base orbit radius of items around their topic.
	pub item_orbit_fraction: f64,
	/// Extra orbit radius per item in the group.
	pub orbit_growth_per_item: f64,
	/// Orbit radius (world units) of items without a topic.
	pub unassigned_orbit_radius: f64,
	pub topic_radius_min: f64,
	pub topic_radius_max: f64,
	pub item_radius_min: f64,
	pub item_radius_max: f64,
}

/// Per-frame animation steps.
#[derive(Clone, Debug)]
pub struct AnimationConfig {
	/// Entrance progress added per frame (0.04 = 25 frames).
	pub entrance_step: f64,
	/// Pulse phase added per frame, in radians.
	pub pulse_step: f64,
}

/// Pointer interaction thresholds.
#[derive(Clone, Debug)]
pub struct InteractionConfig {
	/// Extra hit radius in screen pixels, constant across zoom levels.
	pub hit_tolerance_px: f64,
	/// Pointer travel (screen pixels) after which a drag or pan swallows the
	/// following click.
	pub click_suppress_px: f64,
	/// Item labels longer than this many characters are truncated.
	pub label_max_chars: usize,
}

/// All engine behavior settings.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
	pub camera: CameraConfig,
	pub layout: LayoutConfig,
	pub animation: AnimationConfig,
	pub interaction: InteractionConfig,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.3,
			max_scale: 3.0,
			zoom_in_factor: 1.1,
			zoom_out_factor: 0.9,
		}
	}
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			topic_ring_fraction: 0.28,
			item_orbit_fraction: 0.1,
			orbit_growth_per_item: 2.0,
			unassigned_orbit_radius: 40.0,
			topic_radius_min: 10.0,
			topic_radius_max: 22.0,
			item_radius_min: 4.0,
			item_radius_max: 12.0,
		}
	}
}

impl Default for AnimationConfig {
	fn default() -> Self {
		Self {
			entrance_step: 0.04,
			pulse_step: 0.05,
		}
	}
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			hit_tolerance_px: 6.0,
			click_suppress_px: 4.0,
			label_max_chars: 28,
		}
	}
}
