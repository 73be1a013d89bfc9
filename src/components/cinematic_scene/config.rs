//! Configuration snapshot supplied by the narrative layer.

use serde::Deserialize;

/// Activation and mode flags for the scene, re-read every frame.
///
/// The narrative sequencer owns this state and re-supplies it on every beat
/// change; the engine never writes it back. Latest value wins.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
	/// Foreground beat. When false the weather particles dim to ambient level;
	/// the loop keeps running either way.
	pub active: bool,
	/// Slows particle fall to ~8% and reveals the magic overlay.
	pub slow_mode: bool,
	/// Theme label, resolved via [`Theme::for_name`](super::theme::Theme::for_name).
	/// Changing it rebuilds the particle and star populations.
	pub theme: String,
	/// Whether the tree is drawn at all. Pose state survives hiding.
	pub show_tree: bool,
	/// Eases the tree toward its side position instead of center.
	pub tree_side_mode: bool,
}

impl Default for SceneConfig {
	fn default() -> Self {
		Self {
			active: true,
			slow_mode: false,
			theme: String::new(),
			show_tree: false,
			tree_side_mode: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_camel_case_with_defaults() {
		let cfg: SceneConfig =
			serde_json::from_str(r#"{"slowMode": true, "theme": "joy"}"#).unwrap();
		assert!(cfg.active);
		assert!(cfg.slow_mode);
		assert!(!cfg.show_tree);
		assert_eq!(cfg.theme, "joy");
	}
}
