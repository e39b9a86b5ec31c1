//! Bevy integration
//!
//! Components, resources, systems and the plugin that drive an
//! [`OrbitEngine`](crate::orbit::OrbitEngine) from a Bevy schedule, plus the
//! headless app used when the menu runs on its own thread.

pub mod app;
pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;

pub use app::{create_app, start_orbit_menu};
pub use plugins::{OrbitMenuPlugin, OrbitSet};
