//! Theme-driven weather particles and the slow-motion magic overlay.
//!
//! A [`ParticleField`] owns a fixed-size population of particles for one
//! theme. Slots are recycled in place when a particle falls past the bottom
//! of the canvas; the population count never changes after construction.

use std::f64::consts::{PI, TAU};

use web_sys::CanvasRenderingContext2d;

use super::theme::{Color, ParticleKind};

/// Base population for the crystal theme; other kinds scale off this.
pub const BASE_POPULATION: usize = 200;

/// Particles respawn once they fall this far past the bottom edge.
const EXIT_MARGIN: f64 = 20.0;

/// Kind-specific animation state carried by each particle.
#[derive(Clone, Debug)]
pub enum ParticleShape {
	Crystal {
		sway: f64,
		sway_rate: f64,
		rotation: f64,
		rotation_rate: f64,
	},
	Heart {
		color: Color,
		pulse: f64,
		pulse_rate: f64,
	},
	Petal {
		color: Color,
		sway: f64,
		sway_rate: f64,
		rotation: f64,
		rotation_rate: f64,
	},
	Spark {
		pulse: f64,
		pulse_rate: f64,
	},
}

/// One simulated flake, heart, petal, or spark.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub speed: f64,
	pub opacity: f64,
	pub shape: ParticleShape,
}

/// `(min, max)` spawn size range for a particle kind. Used both by the
/// factory and to derive parallax depth from a particle's size.
fn size_range(kind: ParticleKind) -> (f64, f64) {
	match kind {
		ParticleKind::Crystal => (1.0, 5.0),
		ParticleKind::Heart => (10.0, 30.0),
		ParticleKind::Petal => (4.0, 12.0),
		ParticleKind::Spark => (1.0, 4.0),
	}
}

impl Particle {
	/// Creates a fresh particle somewhere on the canvas with kind-appropriate
	/// kinematics. Pure construction; also used to recycle exhausted slots.
	pub fn spawn(kind: ParticleKind, width: f64, height: f64, rng: &mut fastrand::Rng) -> Self {
		let x = rng.f64() * width;
		let y = rng.f64() * height;
		match kind {
			ParticleKind::Crystal => Self {
				x,
				y,
				size: rng.f64() * 4.0 + 1.0,
				speed: rng.f64() + 0.5,
				opacity: rng.f64() * 0.8 + 0.2,
				shape: ParticleShape::Crystal {
					sway: rng.f64() * TAU,
					sway_rate: rng.f64() * 0.02 + 0.01,
					rotation: 0.0,
					rotation_rate: rng.f64() * 0.02 - 0.01,
				},
			},
			ParticleKind::Heart => Self {
				x,
				y,
				size: rng.f64() * 20.0 + 10.0,
				speed: rng.f64() * 2.0 + 1.0,
				opacity: rng.f64() * 0.8 + 0.2,
				shape: ParticleShape::Heart {
					color: Color::rgba(
						255,
						(rng.f64() * 100.0 + 100.0) as u8,
						(rng.f64() * 100.0 + 150.0) as u8,
						0.7,
					),
					pulse: 0.0,
					pulse_rate: rng.f64() * 0.05 + 0.02,
				},
			},
			ParticleKind::Petal => Self {
				x,
				y,
				size: rng.f64() * 8.0 + 4.0,
				speed: rng.f64() * 1.5 + 0.8,
				opacity: rng.f64() * 0.6 + 0.4,
				shape: ParticleShape::Petal {
					color: Color::rgba(
						(rng.f64() * 50.0 + 200.0) as u8,
						(rng.f64() * 30.0 + 50.0) as u8,
						(rng.f64() * 50.0 + 100.0) as u8,
						0.8,
					),
					sway: rng.f64() * TAU,
					sway_rate: rng.f64() * 0.03 + 0.01,
					rotation: rng.f64() * TAU,
					rotation_rate: rng.f64() * 0.01 - 0.005,
				},
			},
			ParticleKind::Spark => Self {
				x,
				y,
				size: rng.f64() * 3.0 + 1.0,
				speed: rng.f64() * 0.5 + 0.2,
				opacity: rng.f64() * 0.9 + 0.1,
				shape: ParticleShape::Spark {
					pulse: 0.0,
					pulse_rate: rng.f64() * 0.1 + 0.05,
				},
			},
		}
	}

	pub fn kind(&self) -> ParticleKind {
		match self.shape {
			ParticleShape::Crystal { .. } => ParticleKind::Crystal,
			ParticleShape::Heart { .. } => ParticleKind::Heart,
			ParticleShape::Petal { .. } => ParticleKind::Petal,
			ParticleShape::Spark { .. } => ParticleKind::Spark,
		}
	}

	/// Parallax depth derived from size: larger particles read as nearer and
	/// shift more under pointer movement. Always in `1.0..=7.0`.
	pub fn depth(&self) -> f64 {
		let (min, max) = size_range(self.kind());
		let near = ((self.size - min) / (max - min)).clamp(0.0, 1.0);
		1.0 + 6.0 * (1.0 - near)
	}
}

/// Fixed-size, self-recycling particle population for one theme.
pub struct ParticleField {
	particles: Vec<Particle>,
	kind: ParticleKind,
	width: f64,
	height: f64,
	rng: fastrand::Rng,
}

/// Population for a particle kind, scaled off [`BASE_POPULATION`].
pub fn population(kind: ParticleKind) -> usize {
	let scale = match kind {
		ParticleKind::Crystal => 1.0,
		ParticleKind::Heart => 0.8,
		ParticleKind::Petal => 0.6,
		ParticleKind::Spark => 1.2,
	};
	(BASE_POPULATION as f64 * scale).round() as usize
}

impl ParticleField {
	pub fn new(kind: ParticleKind, width: f64, height: f64) -> Self {
		let mut rng = fastrand::Rng::new();
		let particles = (0..population(kind))
			.map(|_| Particle::spawn(kind, width, height, &mut rng))
			.collect();
		Self {
			particles,
			kind,
			width,
			height,
			rng,
		}
	}

	pub fn kind(&self) -> ParticleKind {
		self.kind
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Advances every particle one tick. `speed_factor` scales positional
	/// movement only (1.0 normally, ~0.08 in slow mode); phase accumulators
	/// keep running so pulses and rotations stay alive while slowed.
	pub fn update(&mut self, speed_factor: f64) {
		for p in &mut self.particles {
			match &mut p.shape {
				ParticleShape::Crystal {
					sway,
					sway_rate,
					rotation,
					rotation_rate,
				} => {
					p.x += sway.sin() * 0.5 * speed_factor;
					*sway += *sway_rate;
					*rotation += *rotation_rate;
				}
				ParticleShape::Heart { pulse, pulse_rate, .. } => {
					*pulse += *pulse_rate;
				}
				ParticleShape::Petal {
					sway,
					sway_rate,
					rotation,
					rotation_rate,
					..
				} => {
					p.x += sway.sin() * 0.5 * speed_factor;
					*sway += *sway_rate;
					*rotation += *rotation_rate;
				}
				ParticleShape::Spark { pulse, pulse_rate } => {
					*pulse += *pulse_rate;
				}
			}

			p.y += p.speed * speed_factor;

			// Re-enter from above once past the bottom margin
			if p.y > self.height + EXIT_MARGIN {
				*p = Particle::spawn(self.kind, self.width, self.height, &mut self.rng);
				p.y = -EXIT_MARGIN;
			}

			if p.x > self.width {
				p.x = 0.0;
			} else if p.x < 0.0 {
				p.x = self.width;
			}
		}
	}

	/// Destructive resize: the whole population is respawned at the new
	/// dimensions rather than rescaled proportionally.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		for p in &mut self.particles {
			*p = Particle::spawn(self.kind, width, height, &mut self.rng);
		}
	}

	/// Draws every particle with its kind-specific glyph, pointer parallax,
	/// and pulse-scaled size. `alpha_scale` dims the field in ambient mode.
	pub fn render(&self, ctx: &CanvasRenderingContext2d, pointer: (f64, f64), alpha_scale: f64) {
		ctx.save();
		for p in &self.particles {
			ctx.save();

			let depth = p.depth();
			let _ = ctx.translate(
				p.x + pointer.0 * (30.0 / depth),
				p.y + pointer.1 * (30.0 / depth),
			);
			ctx.set_global_alpha((p.opacity * alpha_scale).clamp(0.0, 1.0));

			match &p.shape {
				ParticleShape::Crystal { rotation, .. } => {
					let _ = ctx.rotate(*rotation);
					draw_crystal(ctx, p.size);
				}
				ParticleShape::Heart { color, pulse, .. } => {
					let size = p.size * (1.0 + pulse.sin() * 0.3);
					draw_heart(ctx, size, *color);
				}
				ParticleShape::Petal { color, rotation, .. } => {
					let _ = ctx.rotate(*rotation);
					draw_petal(ctx, p.size, *color);
				}
				ParticleShape::Spark { pulse, .. } => {
					let size = p.size * (1.0 + pulse.sin() * 0.3);
					draw_spark(ctx, size);
				}
			}

			ctx.restore();
		}
		ctx.restore();
	}
}

fn draw_crystal(ctx: &CanvasRenderingContext2d, size: f64) {
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	// Six arms, each with two short side spurs
	for _ in 0..6 {
		ctx.move_to(0.0, 0.0);
		ctx.line_to(0.0, -size);
		ctx.move_to(0.0, 0.0);
		ctx.line_to(size * 0.3, -size * 0.7);
		ctx.move_to(0.0, 0.0);
		ctx.line_to(-size * 0.3, -size * 0.7);
		let _ = ctx.rotate(PI / 3.0);
	}
	ctx.stroke();
}

fn draw_heart(ctx: &CanvasRenderingContext2d, size: f64, color: Color) {
	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	ctx.move_to(0.0, size * 0.3);
	ctx.bezier_curve_to(-size * 0.3, -size * 0.2, -size, size * 0.2, 0.0, size);
	ctx.bezier_curve_to(size, size * 0.2, size * 0.3, -size * 0.2, 0.0, size * 0.3);
	ctx.fill();
}

fn draw_petal(ctx: &CanvasRenderingContext2d, size: f64, color: Color) {
	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	let _ = ctx.ellipse(0.0, 0.0, size * 0.5, size, 0.0, 0.0, TAU);
	ctx.fill();
}

fn draw_spark(ctx: &CanvasRenderingContext2d, size: f64) {
	ctx.set_shadow_color("rgba(255, 215, 0, 0.5)");
	ctx.set_shadow_blur(size * 2.0);
	ctx.set_stroke_style_str("rgba(255, 215, 0, 0.9)");
	ctx.set_line_width(2.0);
	// Four-pointed star
	ctx.begin_path();
	for _ in 0..4 {
		ctx.move_to(0.0, 0.0);
		ctx.line_to(0.0, -size);
		ctx.move_to(0.0, 0.0);
		ctx.line_to(size * 0.7, -size * 0.7);
		let _ = ctx.rotate(PI / 2.0);
	}
	ctx.stroke();
	ctx.set_shadow_blur(0.0);
}

/// A drifting theme-colored mote in the slow-motion overlay.
#[derive(Clone, Debug)]
struct Mote {
	x: f64,
	y: f64,
	z: f64,
	size: f64,
	vx: f64,
	vy: f64,
}

/// Secondary overlay population shown only in slow mode. Simple round motes
/// in the theme accent color, drifting with a shared horizontal breeze.
pub struct MoteField {
	motes: Vec<Mote>,
	width: f64,
	height: f64,
}

/// Overlay population size; deliberately sparse next to the weather field.
pub const MOTE_POPULATION: usize = 60;

impl MoteField {
	pub fn new(width: f64, height: f64) -> Self {
		let mut rng = fastrand::Rng::new();
		let motes = (0..MOTE_POPULATION)
			.map(|_| {
				let z = rng.f64() * 6.0 + 1.0;
				Mote {
					x: rng.f64() * width,
					y: rng.f64() * height,
					z,
					size: 3.0 / (z * 0.5),
					vx: (rng.f64() - 0.5) * 0.5,
					vy: (rng.f64() * 0.4 + 0.2) / z,
				}
			})
			.collect();
		Self {
			motes,
			width,
			height,
		}
	}

	pub fn len(&self) -> usize {
		self.motes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.motes.is_empty()
	}

	/// Current mote positions, in iteration order.
	pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
		self.motes.iter().map(|m| (m.x, m.y))
	}

	pub fn update(&mut self, time: f64, speed_factor: f64) {
		let breeze = (time / 3000.0).sin() * 0.05;
		for m in &mut self.motes {
			m.y += m.vy * speed_factor;
			m.x += (m.vx + breeze) * speed_factor;
			if m.y > self.height {
				m.y = -10.0;
			}
			if m.x > self.width {
				m.x = 0.0;
			} else if m.x < 0.0 {
				m.x = self.width;
			}
		}
	}

	pub fn render(&self, ctx: &CanvasRenderingContext2d, pointer: (f64, f64), accent: Color) {
		let css = accent.with_alpha(0.4).to_css();
		for m in &self.motes {
			ctx.begin_path();
			let _ = ctx.arc(
				m.x + pointer.0 * (30.0 / m.z),
				m.y + pointer.1 * (30.0 / m.z),
				m.size,
				0.0,
				TAU,
			);
			ctx.set_fill_style_str(&css);
			ctx.fill();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn field(kind: ParticleKind) -> ParticleField {
		ParticleField::new(kind, 800.0, 600.0)
	}

	#[test]
	fn population_matches_density_table() {
		assert_eq!(field(ParticleKind::Crystal).len(), 200);
		assert_eq!(field(ParticleKind::Heart).len(), 160);
		assert_eq!(field(ParticleKind::Petal).len(), 120);
		assert_eq!(field(ParticleKind::Spark).len(), 240);
	}

	#[test]
	fn population_is_stable_across_updates() {
		for kind in [
			ParticleKind::Crystal,
			ParticleKind::Heart,
			ParticleKind::Petal,
			ParticleKind::Spark,
		] {
			let mut f = field(kind);
			let n = f.len();
			for _ in 0..2000 {
				f.update(1.0);
			}
			assert_eq!(f.len(), n);
		}
	}

	#[test]
	fn attributes_stay_bounded() {
		let mut f = field(ParticleKind::Heart);
		for _ in 0..1000 {
			f.update(1.0);
			for p in f.particles() {
				assert!(p.opacity >= 0.0 && p.opacity <= 1.0);
				assert!(p.size > 0.0);
				let d = p.depth();
				assert!((1.0..=7.0).contains(&d));
			}
		}
	}

	#[test]
	fn fallen_particles_reenter_from_above() {
		let mut f = field(ParticleKind::Crystal);
		// Park every particle below the exit margin, then step once
		for i in 0..f.len() {
			f.particles[i].y = 700.0;
		}
		f.update(1.0);
		for p in f.particles() {
			assert!(p.y < 0.0, "recycled particle should re-enter above the top");
			assert_eq!(p.kind(), ParticleKind::Crystal);
		}
	}

	#[test]
	fn horizontal_exits_wrap_in_one_update() {
		let mut f = field(ParticleKind::Spark);
		f.particles[0].x = 850.0;
		f.particles[1].x = -30.0;
		f.update(1.0);
		assert_eq!(f.particles[0].x, 0.0);
		assert_eq!(f.particles[1].x, 800.0);
	}

	#[test]
	fn slow_mode_scales_fall_speed() {
		let mut f = field(ParticleKind::Crystal);
		let before: Vec<f64> = f.particles().iter().map(|p| p.y).collect();
		f.update(0.08);
		for (p, y0) in f.particles().iter().zip(before) {
			if p.y >= 0.0 {
				let dy = p.y - y0;
				assert!(dy <= 1.5 * 0.08 + 1e-9, "fall distance {dy} exceeds slow cap");
			}
		}
	}

	#[test]
	fn resize_is_destructive_and_in_bounds() {
		let mut f = ParticleField::new(ParticleKind::Petal, 0.0, 0.0);
		// Degenerate canvas: everything pinned at the origin, no panics
		f.update(1.0);
		for p in f.particles() {
			assert!(p.x.is_finite() && p.y.is_finite());
		}
		f.resize(800.0, 600.0);
		assert_eq!(f.len(), population(ParticleKind::Petal));
		for p in f.particles() {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
		}
	}

	#[test]
	fn spawned_particles_match_kind_distributions() {
		let mut rng = fastrand::Rng::with_seed(7);
		for _ in 0..500 {
			let p = Particle::spawn(ParticleKind::Heart, 800.0, 600.0, &mut rng);
			assert!((10.0..30.0).contains(&p.size));
			assert!((1.0..3.0).contains(&p.speed));
			let ParticleShape::Heart { color, pulse_rate, .. } = p.shape else {
				panic!("heart spawn produced a different shape");
			};
			assert_eq!(color.r, 255);
			assert!((0.02..0.07).contains(&pulse_rate));

			let p = Particle::spawn(ParticleKind::Crystal, 800.0, 600.0, &mut rng);
			assert!((1.0..5.0).contains(&p.size));
			let ParticleShape::Crystal {
				rotation,
				rotation_rate,
				sway_rate,
				..
			} = p.shape
			else {
				panic!("crystal spawn produced a different shape");
			};
			assert_eq!(rotation, 0.0);
			assert!((-0.01..0.01).contains(&rotation_rate));
			assert!((0.01..0.03).contains(&sway_rate));
		}
	}

	#[test]
	fn crystal_rotation_advances_each_tick() {
		let mut f = field(ParticleKind::Crystal);
		for _ in 0..10 {
			f.update(1.0);
		}
		for p in f.particles() {
			let ParticleShape::Crystal {
				rotation,
				rotation_rate,
				..
			} = p.shape
			else {
				panic!("crystal field held a non-crystal particle");
			};
			assert!((rotation - rotation_rate * 10.0).abs() < 1e-12);
		}
	}

	#[test]
	fn motes_wrap_and_keep_population() {
		let mut m = MoteField::new(400.0, 300.0);
		assert_eq!(m.len(), MOTE_POPULATION);
		for _ in 0..5000 {
			m.update(16.0, 1.0);
		}
		assert_eq!(m.len(), MOTE_POPULATION);
		for mote in &m.motes {
			assert!((-10.0..=300.0).contains(&mote.y));
			assert!((0.0..=400.0).contains(&mote.x));
		}
	}
}
