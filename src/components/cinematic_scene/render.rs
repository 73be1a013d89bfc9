//! Frame compositor for the cinematic scene.
//!
//! One call per animation frame, layering back to front:
//! 1. Night background with a faint theme-colored wash
//! 2. Twinkling stars (deepest parallax layer)
//! 3. The procedural tree, when visible
//! 4. Theme weather particles (dimmed in ambient mode)
//! 5. The magic mote overlay, slow mode only

use web_sys::CanvasRenderingContext2d;

use super::config::SceneConfig;
use super::scene::Scene;

/// Weather particle alpha during a foreground narrative beat.
const ALPHA_ACTIVE: f64 = 0.9;
/// Weather particle alpha while the presentation is ambient.
const ALPHA_AMBIENT: f64 = 0.45;

/// Alpha scale for the weather field in the current presentation mode.
fn weather_alpha(active: bool) -> f64 {
	if active { ALPHA_ACTIVE } else { ALPHA_AMBIENT }
}

/// Renders one complete frame of the scene.
pub fn render(scene: &mut Scene, ctx: &CanvasRenderingContext2d, config: &SceneConfig) {
	draw_background(scene, ctx);

	scene.stars.render(ctx, scene.time, scene.pointer);

	if config.show_tree {
		let (w, h, t) = (scene.width, scene.height, scene.time);
		let theme = scene.theme().clone();
		scene.tree.draw(ctx, t, w, h, &theme);
	}

	scene.weather.render(ctx, scene.pointer, weather_alpha(config.active));

	if config.slow_mode {
		scene.motes.render(ctx, scene.pointer, scene.theme().primary);
	}
}

fn draw_background(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#010409");
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	// Faint radial wash of the theme gradient over the night fill
	let (cx, cy) = (scene.width / 2.0, scene.height / 2.0);
	let radius = scene.width.max(scene.height) * 0.8;
	let Ok(gradient) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) else {
		return;
	};
	let (inner, outer) = scene.theme().gradient;
	let _ = gradient.add_color_stop(0.0, &inner.with_alpha(0.05).to_css());
	let _ = gradient.add_color_stop(1.0, &outer.with_alpha(0.02).to_css());
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ambient_mode_dims_the_weather_field() {
		assert_eq!(weather_alpha(true), 0.9);
		assert_eq!(weather_alpha(false), 0.45);
		assert!(weather_alpha(false) < weather_alpha(true));
	}
}

