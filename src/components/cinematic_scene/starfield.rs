//! Ambient twinkling star background.
//!
//! Stars never move or recycle; only brightness and apparent size oscillate.
//! Each star carries a fixed depth `z` so pointer parallax shifts nearer
//! stars more than distant ones.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

/// Number of stars in the background population.
pub const STAR_COUNT: usize = 300;

/// A fixed-position twinkle point.
#[derive(Clone, Debug)]
struct Star {
	x: f64,
	y: f64,
	/// Parallax depth, `2.0..10.0`; higher means farther, shifts less.
	z: f64,
	size: f64,
	opacity: f64,
	phase: f64,
	rate: f64,
}

impl Star {
	/// Phase-offset sinusoid in `[-1, 1]` driving brightness and size.
	fn twinkle(&self, time: f64) -> f64 {
		(time * self.rate + self.phase).sin()
	}

	/// Current alpha, always within `[0, opacity]`.
	fn brightness(&self, time: f64) -> f64 {
		self.opacity * (0.5 + 0.5 * self.twinkle(time))
	}
}

/// Fixed population of slowly twinkling background stars.
pub struct StarField {
	stars: Vec<Star>,
}

impl StarField {
	pub fn new(width: f64, height: f64) -> Self {
		let mut rng = fastrand::Rng::new();
		let stars = (0..STAR_COUNT)
			.map(|_| Star {
				x: rng.f64() * width,
				y: rng.f64() * height,
				z: rng.f64() * 8.0 + 2.0,
				size: rng.f64() * 1.2 + 0.2,
				opacity: rng.f64() * 0.5 + 0.1,
				phase: rng.f64() * TAU,
				rate: 0.0005 + rng.f64() * 0.002,
			})
			.collect();
		Self { stars }
	}

	pub fn len(&self) -> usize {
		self.stars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stars.is_empty()
	}

	pub fn render(&self, ctx: &CanvasRenderingContext2d, time: f64, pointer: (f64, f64)) {
		for star in &self.stars {
			let twinkle = star.twinkle(time);
			let px = star.x + pointer.0 * (10.0 / star.z);
			let py = star.y + pointer.1 * (10.0 / star.z);
			ctx.begin_path();
			let _ = ctx.arc(px, py, star.size * (1.0 + twinkle * 0.3), 0.0, TAU);
			ctx.set_fill_style_str(&format!(
				"rgba(255, 255, 255, {})",
				star.brightness(time)
			));
			ctx.fill();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn population_and_depth_ranges() {
		let field = StarField::new(800.0, 600.0);
		assert_eq!(field.len(), STAR_COUNT);
		for star in &field.stars {
			assert!((2.0..10.0).contains(&star.z));
			assert!((0.0..=800.0).contains(&star.x));
			assert!((0.0..=600.0).contains(&star.y));
		}
	}

	#[test]
	fn brightness_stays_within_base_opacity() {
		let field = StarField::new(100.0, 100.0);
		for star in &field.stars {
			for step in 0..10_000 {
				let b = star.brightness(step as f64 * 16.0);
				assert!(b >= 0.0 && b <= star.opacity + 1e-12);
			}
		}
	}

	#[test]
	fn degenerate_canvas_pins_stars_at_origin() {
		let field = StarField::new(0.0, 0.0);
		assert_eq!(field.len(), STAR_COUNT);
		for star in &field.stars {
			assert_eq!(star.x, 0.0);
			assert_eq!(star.y, 0.0);
		}
	}
}
