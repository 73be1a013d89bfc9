//! winter-scene: theme-driven cinematic scene rendering for the canvas.
//!
//! This crate provides a WASM-based background scene component: an animated
//! star field, falling theme particles, and a procedural tree, composed every
//! frame on a fullscreen canvas and steered by a small configuration surface.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::cinematic_scene::{CinematicScene, SceneConfig, Theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("winter-scene: logging initialized");
}

/// Load the initial scene configuration from a script element with
/// id="scene-config". Expected format: JSON matching [`SceneConfig`].
fn load_scene_config() -> Option<SceneConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("scene-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SceneConfig>(&json_text) {
		Ok(config) => {
			info!(
				"winter-scene: loaded config, theme {:?}, active {}",
				config.theme, config.active
			);
			Some(config)
		}
		Err(e) => {
			warn!("winter-scene: failed to parse scene config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the scene configuration from the DOM and renders the scene fullscreen.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// The narrative layer normally drives this signal; standalone builds
	// start from whatever the host page embedded.
	let config = load_scene_config().unwrap_or_default();
	let config_signal = Signal::derive(move || config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Winter Scene" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-scene">
			<CinematicScene config=config_signal />
		</div>
	}
}
