//! Scene state owned by the director.
//!
//! A [`Scene`] exclusively owns every animated subsystem plus the shared
//! frame inputs (canvas size, pointer offset, elapsed time). It is created
//! once when the component mounts, then mutated each frame by the animation
//! loop. Theme and size changes rebuild the particle populations in place;
//! the tree's pose survives both.

use super::config::SceneConfig;
use super::particles::{MoteField, ParticleField};
use super::starfield::StarField;
use super::theme::Theme;
use super::tree::ProceduralTree;

/// Nominal frame duration used to advance scene time, in milliseconds.
pub const FRAME_MS: f64 = 16.0;

/// Positional speed multiplier while in slow mode.
pub const SLOW_FACTOR: f64 = 0.08;

/// All mutable simulation state for one canvas.
pub struct Scene {
	pub width: f64,
	pub height: f64,
	/// Pointer offset from screen center, both axes in `[-0.5, 0.5]`.
	pub pointer: (f64, f64),
	/// Elapsed scene time in milliseconds.
	pub time: f64,
	theme: Theme,
	pub stars: StarField,
	pub weather: ParticleField,
	pub motes: MoteField,
	pub tree: ProceduralTree,
}

impl Scene {
	pub fn new(theme: &Theme, width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			pointer: (0.0, 0.0),
			time: 0.0,
			theme: theme.clone(),
			stars: StarField::new(width, height),
			weather: ParticleField::new(theme.particle_kind, width, height),
			motes: MoteField::new(width, height),
			tree: ProceduralTree::new(),
		}
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Swaps the active theme, discarding in-flight particles. Population
	/// size and kinematics differ per kind, so this is a full rebuild.
	pub fn set_theme(&mut self, theme: &Theme) {
		self.theme = theme.clone();
		self.stars = StarField::new(self.width, self.height);
		self.weather = ParticleField::new(theme.particle_kind, self.width, self.height);
		self.motes = MoteField::new(self.width, self.height);
	}

	/// Destructive resize: all populations respawn at the new dimensions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.stars = StarField::new(width, height);
		self.weather.resize(width, height);
		self.motes = MoteField::new(width, height);
	}

	/// Latest-value pointer write from the mousemove listener.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = (x.clamp(-0.5, 0.5), y.clamp(-0.5, 0.5));
	}

	/// Advances the simulation one frame under the given configuration.
	pub fn tick(&mut self, config: &SceneConfig) {
		self.time += FRAME_MS;
		self.tree.ease_toward(config.tree_side_mode);

		let factor = if config.slow_mode { SLOW_FACTOR } else { 1.0 };
		self.weather.update(factor);
		if config.slow_mode {
			// The overlay only ever runs slowed; that is its whole character
			self.motes.update(self.time, SLOW_FACTOR);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::cinematic_scene::particles::population;
	use crate::components::cinematic_scene::theme::ParticleKind;
	use crate::components::cinematic_scene::tree::SIDE_POSE;

	#[test]
	fn theme_swap_rebuilds_to_new_density() {
		let mut scene = Scene::new(&Theme::winter(), 800.0, 600.0);
		assert_eq!(scene.weather.len(), population(ParticleKind::Crystal));

		scene.set_theme(&Theme::peace());
		assert_eq!(scene.weather.len(), population(ParticleKind::Heart));
		assert_eq!(scene.weather.kind(), ParticleKind::Heart);
		for p in scene.weather.particles() {
			assert_eq!(p.kind(), ParticleKind::Heart);
		}
	}

	#[test]
	fn theme_swap_preserves_tree_pose() {
		let mut scene = Scene::new(&Theme::winter(), 800.0, 600.0);
		let cfg = SceneConfig {
			tree_side_mode: true,
			..SceneConfig::default()
		};
		for _ in 0..300 {
			scene.tick(&cfg);
		}
		let pose = scene.tree.pose();
		assert!((pose - SIDE_POSE).abs() < 0.01);

		scene.set_theme(&Theme::joy());
		assert_eq!(scene.tree.pose(), pose);
	}

	#[test]
	fn degenerate_size_then_resize_recovers() {
		let mut scene = Scene::new(&Theme::love(), 0.0, 0.0);
		let cfg = SceneConfig::default();
		for _ in 0..10 {
			scene.tick(&cfg);
		}
		scene.resize(800.0, 600.0);
		assert_eq!(scene.weather.len(), population(ParticleKind::Petal));
		for p in scene.weather.particles() {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
		}
	}

	#[test]
	fn pointer_writes_are_clamped() {
		let mut scene = Scene::new(&Theme::winter(), 800.0, 600.0);
		scene.set_pointer(3.0, -3.0);
		assert_eq!(scene.pointer, (0.5, -0.5));
	}

	#[test]
	fn slow_mode_advances_motes_and_time() {
		let mut scene = Scene::new(&Theme::winter(), 800.0, 600.0);
		let slow = SceneConfig {
			slow_mode: true,
			..SceneConfig::default()
		};
		scene.tick(&slow);
		scene.tick(&slow);
		assert_eq!(scene.time, 2.0 * FRAME_MS);
	}

	#[test]
	fn motes_drift_at_the_slow_factor() {
		let mut scene = Scene::new(&Theme::winter(), 800.0, 600.0);
		let slow = SceneConfig {
			slow_mode: true,
			..SceneConfig::default()
		};
		let before: Vec<(f64, f64)> = scene.motes.positions().collect();
		scene.tick(&slow);
		// Per-tick caps at the slow factor: vy <= 0.6, |vx| + breeze <= 0.3
		let (dx_cap, dy_cap) = (0.3 * SLOW_FACTOR, 0.6 * SLOW_FACTOR);
		for ((x0, y0), (x1, y1)) in before.into_iter().zip(scene.motes.positions()) {
			let wrapped_x = x1 == 0.0 || x1 == 800.0;
			let wrapped_y = y1 == -10.0;
			assert!(wrapped_x || (x1 - x0).abs() <= dx_cap + 1e-12);
			assert!(wrapped_y || (0.0..=dy_cap + 1e-12).contains(&(y1 - y0)));
		}
	}
}
