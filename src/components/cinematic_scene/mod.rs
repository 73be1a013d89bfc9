//! Cinematic scene rendering component.
//!
//! Renders a continuously animated, theme-driven scene on an HTML canvas:
//! - Twinkling star background with pointer parallax
//! - Theme weather particles (snow crystals, hearts, petals, or sparks)
//! - A procedural tree that eases between centered and side placement
//! - A slow-motion "magic" overlay of theme-colored motes
//!
//! The component owns the animation loop and every particle population; the
//! narrative layer only supplies a [`SceneConfig`] snapshot and a theme name.
//!
//! # Example
//!
//! ```ignore
//! use winter_scene::{CinematicScene, SceneConfig};
//!
//! let (config, _set_config) = signal(SceneConfig {
//!     active: true,
//!     show_tree: true,
//!     theme: "joy".into(),
//!     ..SceneConfig::default()
//! });
//!
//! view! { <CinematicScene config=config /> }
//! ```

mod component;
mod config;
mod particles;
mod render;
mod scene;
mod starfield;
pub mod theme;
mod tree;

pub use component::CinematicScene;
pub use config::SceneConfig;
pub use theme::Theme;
