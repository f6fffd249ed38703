//! Visual theming for the topic graph.
//!
//! Provides colors, palettes, and per-element style configuration.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Blends toward `other` by `t` (clamped to 0..=1), keeping this alpha.
	pub fn mix(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let blend = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
		Self {
			r: blend(self.r, other.r),
			g: blend(self.g, other.g),
			b: blend(self.b, other.b),
			a: self.a,
		}
	}

	pub fn lighten(self, t: f64) -> Self {
		self.mix(Color::rgb(255, 255, 255), t)
	}

	pub fn darken(self, t: f64) -> Self {
		self.mix(Color::rgb(0, 0, 0), t)
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`, `#RGB`) and `rgb()`/`rgba()` functional
	/// notation; anything else comes back as mid gray.
	pub fn parse(color_str: &str) -> Color {
		let s = color_str.trim();
		let channel = |hex: &str| u8::from_str_radix(hex, 16).unwrap_or(128);
		if let Some(hex) = s.strip_prefix('#').filter(|h| h.is_ascii()) {
			match hex.len() {
				6 => {
					return Color::rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6]));
				}
				3 => {
					let short = |i: usize| channel(&hex[i..i + 1]).wrapping_mul(17);
					return Color::rgb(short(0), short(1), short(2));
				}
				_ => {}
			}
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let part = |i: usize| nums.get(i).and_then(|s| s.trim().parse().ok());
			return Color::rgba(
				part(0).unwrap_or(128),
				part(1).unwrap_or(128),
				part(2).unwrap_or(128),
				nums.get(3)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(1.0),
			);
		}
		Color::rgb(128, 128, 128)
	}
}

/// A curated color palette, used for topics that arrive without a color.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted, harmonious palette - slate blues and teals (default)
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	/// Aurora palette - cool teals and purples
	pub fn aurora() -> Self {
		Self {
			colors: vec![
				Color::rgb(100, 145, 135), // Eucalyptus
				Color::rgb(115, 135, 155), // Slate
				Color::rgb(130, 120, 150), // Wisteria
				Color::rgb(105, 140, 145), // Teal
				Color::rgb(120, 130, 160), // Periwinkle
				Color::rgb(125, 145, 140), // Sage
				Color::rgb(110, 125, 155), // Storm
				Color::rgb(135, 140, 150), // Pewter
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(128, 128, 128);
		}
		self.colors[index % self.colors.len()]
	}
}

/// Item colors keyed by source type.
#[derive(Clone, Debug)]
pub struct SourcePalette {
	pub known: Vec<(&'static str, Color)>,
	/// Used for source types not listed in `known`, picked by a stable hash
	/// of the source type so the same type always gets the same color.
	pub fallback: NodePalette,
}

impl SourcePalette {
	pub fn color_for(&self, source_type: &str) -> String {
		let key = source_type.trim().to_ascii_lowercase();
		if let Some((_, color)) = self.known.iter().find(|(name, _)| *name == key) {
			return color.to_css_rgb();
		}
		let hash = key
			.bytes()
			.fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
		self.fallback.get(hash).to_css_rgb()
	}
}

impl Default for SourcePalette {
	fn default() -> Self {
		Self {
			known: vec![
				("note", Color::rgb(129, 199, 132)),
				("web", Color::rgb(100, 181, 246)),
				("pdf", Color::rgb(239, 154, 154)),
				("chat", Color::rgb(206, 147, 216)),
				("code", Color::rgb(255, 204, 128)),
				("email", Color::rgb(128, 203, 196)),
			],
			fallback: NodePalette::slate(),
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Membership edge color
	pub color: Color,
	/// Relation edge color
	pub relation_color: Color,
	/// Alpha for edges outside the highlighted group
	pub base_alpha: f64,
	/// Alpha for edges touching the highlighted group
	pub highlight_alpha: f64,
	/// Line width multiplier for edges touching the highlighted group
	pub highlight_width: f64,
	/// Bow of the curve as a fraction of the edge length (0.0 = straight)
	pub curvature: f64,
}

/// Topic node style.
#[derive(Clone, Debug)]
pub struct TopicStyle {
	/// Halo radius as a multiple of the node radius
	pub halo_scale: f64,
	/// Halo alpha at the node edge
	pub halo_alpha: f64,
	/// Fill alpha inside the ring
	pub fill_alpha: f64,
}

/// Item node style.
#[derive(Clone, Debug)]
pub struct ItemStyle {
	/// Shadow blur in screen pixels
	pub shadow_blur: f64,
	pub shadow_color: Color,
	/// Pulsing ring color for hovered/selected items
	pub ring_color: Color,
	/// Ring radius pulse amplitude as a fraction of the ring offset
	pub pulse_amplitude: f64,
}

/// Label pill style shared by topics and items.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub pill_color: Color,
	pub text_color: Color,
	pub font_family: &'static str,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub topic: TopicStyle,
	pub item: ItemStyle,
	pub label: LabelStyle,
	pub palette: NodePalette,
	pub sources: SourcePalette,
	/// Alpha of nodes outside the highlighted group
	pub dim_alpha: f64,
}

impl Theme {
	/// Clean modern dark theme (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgb(140, 160, 180),
				relation_color: Color::rgb(190, 170, 120),
				base_alpha: 0.35,
				highlight_alpha: 0.85,
				highlight_width: 2.0,
				curvature: 0.12,
			},
			topic: TopicStyle {
				halo_scale: 2.6,
				halo_alpha: 0.35,
				fill_alpha: 0.25,
			},
			item: ItemStyle {
				shadow_blur: 8.0,
				shadow_color: Color::rgba(0, 0, 0, 0.45),
				ring_color: Color::rgb(255, 255, 255),
				pulse_amplitude: 0.6,
			},
			label: LabelStyle {
				pill_color: Color::rgba(16, 20, 26, 0.92),
				text_color: Color::rgb(230, 235, 240),
				font_family: "sans-serif",
			},
			palette: NodePalette::slate(),
			sources: SourcePalette::default(),
			dim_alpha: 0.25,
		}
	}

	/// Flat low-contrast theme without gradients
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(18, 20, 28),
				use_gradient: false,
			},
			edge: EdgeStyle {
				color: Color::rgb(100, 120, 150),
				relation_color: Color::rgb(150, 130, 170),
				base_alpha: 0.3,
				highlight_alpha: 0.8,
				highlight_width: 1.8,
				curvature: 0.1,
			},
			topic: TopicStyle {
				halo_scale: 2.2,
				halo_alpha: 0.25,
				fill_alpha: 0.2,
			},
			item: ItemStyle {
				shadow_blur: 4.0,
				shadow_color: Color::rgba(0, 0, 0, 0.6),
				ring_color: Color::rgb(220, 225, 240),
				pulse_amplitude: 0.4,
			},
			label: LabelStyle {
				pill_color: Color::rgba(10, 12, 18, 0.9),
				text_color: Color::rgb(210, 215, 225),
				font_family: "sans-serif",
			},
			palette: NodePalette::aurora(),
			sources: SourcePalette::default(),
			dim_alpha: 0.2,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
