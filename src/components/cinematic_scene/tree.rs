//! Procedural decorative tree.
//!
//! The tree has exactly one piece of continuous state: a horizontal pose
//! fraction that eases toward a centered or side target every frame. All
//! branch geometry, ornaments, the apex star, and the backing glow are
//! recomputed from scratch each draw.

use std::f64::consts::{PI, TAU};

use web_sys::CanvasRenderingContext2d;

use super::theme::{Color, Theme};

/// Horizontal pose target when the tree shares the screen with text.
pub const SIDE_POSE: f64 = 0.18;
/// Horizontal pose target when the tree is the centerpiece.
pub const CENTER_POSE: f64 = 0.5;

/// First-order approach rate applied once per frame; never overshoots.
const EASE_RATE: f64 = 0.02;

const BRANCH_LAYERS: usize = 30;

/// Stateful centerpiece whose horizontal placement eases between two targets.
pub struct ProceduralTree {
	pose: f64,
	rng: fastrand::Rng,
}

impl ProceduralTree {
	pub fn new() -> Self {
		Self {
			pose: CENTER_POSE,
			rng: fastrand::Rng::new(),
		}
	}

	/// Current horizontal position fraction.
	pub fn pose(&self) -> f64 {
		self.pose
	}

	/// Moves the pose one step toward its target. Called every frame whether
	/// or not the tree is visible, so a later reveal resumes from wherever
	/// the pose stabilized.
	pub fn ease_toward(&mut self, side_mode: bool) {
		let target = if side_mode { SIDE_POSE } else { CENTER_POSE };
		self.pose += (target - self.pose) * EASE_RATE;
	}

	/// Redraws the full tree for this frame: glow, branch layers with sway,
	/// periodic ornaments, and the rotating apex star.
	pub fn draw(
		&mut self,
		ctx: &CanvasRenderingContext2d,
		time: f64,
		width: f64,
		height: f64,
		theme: &Theme,
	) {
		let center_x = width * self.pose;
		let base_y = height * 0.88;
		let tree_height = height * 0.55;
		let accent = theme.primary;

		ctx.save();

		self.draw_glow(ctx, center_x, base_y, tree_height, width, height, accent);

		for i in 0..BRANCH_LAYERS {
			let progress = i as f64 / BRANCH_LAYERS as f64;
			let y = base_y - tree_height * progress;
			let max_width = tree_height * (1.0 - progress) * 0.35;
			let sway = (time * 0.0008 + i as f64 * 0.4).sin() * 4.0;

			ctx.begin_path();
			ctx.move_to(center_x - max_width + sway, y);
			let _ = ctx.quadratic_curve_to(center_x + sway, y - 8.0, center_x + max_width + sway, y);
			ctx.set_shadow_blur(12.0);
			if i % 2 == 0 {
				ctx.set_shadow_color(&accent.to_css());
				ctx.set_stroke_style_str(&accent.with_alpha(0.53).to_css());
			} else {
				ctx.set_shadow_color("#ffffff");
				ctx.set_stroke_style_str("rgba(255, 255, 255, 0.13)");
			}
			ctx.set_line_width(1.0);
			ctx.stroke();

			if i % 5 == 0 {
				let side = if self.rng.bool() { 1.0 } else { -1.0 };
				let ball_x = center_x + side * max_width * 0.8 + sway;
				ctx.begin_path();
				let _ = ctx.arc(ball_x, y, 3.0, 0.0, TAU);
				let ball = if i % 10 == 0 {
					Color::rgb(0xef, 0x44, 0x44)
				} else {
					accent
				};
				ctx.set_fill_style_str(&ball.to_css());
				ctx.fill();
			}
		}

		draw_apex_star(ctx, center_x, base_y - tree_height - 15.0, time);

		ctx.restore();
	}

	#[allow(clippy::too_many_arguments)]
	fn draw_glow(
		&self,
		ctx: &CanvasRenderingContext2d,
		center_x: f64,
		base_y: f64,
		tree_height: f64,
		width: f64,
		height: f64,
		accent: Color,
	) {
		let mid_y = base_y - tree_height / 2.0;
		let Ok(glow) =
			ctx.create_radial_gradient(center_x, mid_y, 0.0, center_x, mid_y, tree_height * 0.8)
		else {
			return;
		};
		let _ = glow.add_color_stop(0.0, &accent.with_alpha(0.066).to_css());
		let _ = glow.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
		#[allow(deprecated)]
		ctx.set_fill_style(&glow);
		ctx.fill_rect(0.0, 0.0, width, height);
	}
}

impl Default for ProceduralTree {
	fn default() -> Self {
		Self::new()
	}
}

fn draw_apex_star(ctx: &CanvasRenderingContext2d, x: f64, y: f64, time: f64) {
	ctx.save();
	let _ = ctx.translate(x, y);
	let _ = ctx.rotate(time * 0.0005);
	ctx.set_shadow_blur(40.0);
	ctx.set_shadow_color("#ffffff");
	ctx.set_fill_style_str("#ffffff");
	for _ in 0..4 {
		let _ = ctx.rotate(PI / 2.0);
		ctx.fill_rect(-1.0, -18.0, 2.0, 36.0);
		ctx.fill_rect(-18.0, -1.0, 36.0, 2.0);
	}
	ctx.restore();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pose_converges_to_side_target_without_overshoot() {
		let mut tree = ProceduralTree::new();
		assert_eq!(tree.pose(), CENTER_POSE);
		for _ in 0..230 {
			tree.ease_toward(true);
			assert!(
				tree.pose() >= SIDE_POSE,
				"pose overshot past the side target"
			);
		}
		assert!((tree.pose() - SIDE_POSE).abs() < 0.01);
	}

	#[test]
	fn pose_returns_to_center() {
		let mut tree = ProceduralTree::new();
		for _ in 0..500 {
			tree.ease_toward(true);
		}
		for _ in 0..500 {
			tree.ease_toward(false);
			assert!(tree.pose() <= CENTER_POSE);
		}
		assert!((tree.pose() - CENTER_POSE).abs() < 0.001);
	}

	#[test]
	fn pose_keeps_easing_while_hidden() {
		// Visibility only gates drawing; the scene still eases the pose, so
		// a reveal resumes from wherever the pose had settled.
		let mut tree = ProceduralTree::new();
		tree.ease_toward(true);
		let after_one = tree.pose();
		assert!(after_one < CENTER_POSE);
		tree.ease_toward(true);
		assert!(tree.pose() < after_one);
	}
}
