//! Visual theming for the cinematic scene.
//!
//! A [`Theme`] bundles the accent colors, background gradient, and particle
//! kind that drive every subsystem uniformly. Themes are resolved by name
//! outside the render loop; the engine only ever consumes the descriptor.

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

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Which glyph family a theme's weather particles use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
	/// Six-armed stroked snow crystals.
	Crystal,
	/// Filled bezier hearts with a pulse.
	Heart,
	/// Filled rotating ellipse petals.
	Petal,
	/// Four-armed glowing gold sparks.
	Spark,
}

/// Complete visual theme descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	pub name: &'static str,
	/// Accent color used by the tree, ornaments, and magic overlay.
	pub primary: Color,
	pub secondary: Color,
	/// Radial background wash, inner to outer stop.
	pub gradient: (Color, Color),
	pub particle_kind: ParticleKind,
}

impl Theme {
	/// Sapphire winter night with falling snow crystals (default).
	pub fn winter() -> Self {
		Self {
			name: "winter",
			primary: Color::rgb(0x0e, 0xa5, 0xe9),
			secondary: Color::rgb(0x8b, 0x5c, 0xf6),
			gradient: (Color::rgb(0x0e, 0xa5, 0xe9), Color::rgb(0x8b, 0x5c, 0xf6)),
			particle_kind: ParticleKind::Crystal,
		}
	}

	/// Warm pink theme with pulsing hearts.
	pub fn peace() -> Self {
		Self {
			name: "peace",
			primary: Color::rgb(0xff, 0x69, 0xb4),
			secondary: Color::rgb(0xff, 0x14, 0x93),
			gradient: (Color::rgb(0xff, 0x69, 0xb4), Color::rgb(0xff, 0x14, 0x93)),
			particle_kind: ParticleKind::Heart,
		}
	}

	/// Crimson theme with drifting rose petals.
	pub fn love() -> Self {
		Self {
			name: "love",
			primary: Color::rgb(0xdc, 0x14, 0x3c),
			secondary: Color::rgb(0xff, 0x63, 0x47),
			gradient: (Color::rgb(0xdc, 0x14, 0x3c), Color::rgb(0xff, 0x63, 0x47)),
			particle_kind: ParticleKind::Petal,
		}
	}

	/// Gold theme with twinkling sparks.
	pub fn joy() -> Self {
		Self {
			name: "joy",
			primary: Color::rgb(0xff, 0xd7, 0x00),
			secondary: Color::rgb(0xff, 0xa5, 0x00),
			gradient: (Color::rgb(0xff, 0xd7, 0x00), Color::rgb(0xff, 0xa5, 0x00)),
			particle_kind: ParticleKind::Spark,
		}
	}

	/// Resolves a theme by loose name matching, falling back to [`Theme::winter`].
	///
	/// The narrative layer passes whatever label it has (a mood, a dedication
	/// name); anything it does not recognize gets the default winter night.
	pub fn for_name(name: &str) -> Self {
		let lower = name.to_lowercase();
		if lower.contains("peace") || lower.contains("heart") {
			Self::peace()
		} else if lower.contains("love") || lower.contains("rose") {
			Self::love()
		} else if lower.contains("joy") || lower.contains("gold") {
			Self::joy()
		} else {
			Self::winter()
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::winter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_formats() {
		assert_eq!(Color::rgb(255, 105, 180).to_css(), "#ff69b4");
		assert_eq!(
			Color::rgba(255, 105, 180, 0.5).to_css(),
			"rgba(255, 105, 180, 0.5)"
		);
	}

	#[test]
	fn name_matching_is_case_insensitive() {
		assert_eq!(Theme::for_name("PEACE").particle_kind, ParticleKind::Heart);
		assert_eq!(Theme::for_name("my love").particle_kind, ParticleKind::Petal);
		assert_eq!(Theme::for_name("pure joy").particle_kind, ParticleKind::Spark);
	}

	#[test]
	fn unknown_names_fall_back_to_winter() {
		let theme = Theme::for_name("something else entirely");
		assert_eq!(theme.name, "winter");
		assert_eq!(theme.particle_kind, ParticleKind::Crystal);
	}
}
