//! Orbit menu plugins

pub mod orbit;

pub use orbit::{OrbitMenuPlugin, OrbitSet};
