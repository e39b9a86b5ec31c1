//! Orbit selector core
//!
//! Pure per-frame math with no engine dependency beyond `bevy::math`:
//!
//! - `anchors`: unit anchor directions from a subdivided icosahedron
//! - `controller`: arcball drag, release decay and snapping
//! - `resolver`: nearest anchor to the facing direction
//! - `instances`: per-tile transforms
//! - `camera`: distance, field of view and screen mapping
//! - `items`: menu items and the glow map
//! - `engine`: the composite driven once per frame

pub mod anchors;
pub mod camera;
pub mod controller;
pub mod engine;
pub mod instances;
pub mod items;
pub mod latch;
pub mod math;
pub mod resolver;

pub use anchors::AnchorLayout;
pub use camera::{CameraRig, ScreenRect};
pub use controller::{OrientationController, SnapState, TouchState};
pub use engine::{OrbitEngine, OrbitEvent, OrbitFrame, OrbitSelectionListener};
pub use instances::{InstanceTransforms, TilePlacement};
pub use items::{Glow, GlowMap, MenuItem};
pub use latch::EdgeLatch;
pub use resolver::nearest_anchor;
