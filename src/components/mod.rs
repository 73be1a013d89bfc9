//! UI components.

pub mod cinematic_scene;
