//! Orbit menu systems
//!
//! Per frame: host intake, the engine tick, transform sync, then frame
//! extraction in `Last`.

pub mod animation;
pub mod camera;
pub mod frame_extraction;
pub mod input;
pub mod scene;
pub mod tiles;

pub use animation::advance_orbit;
pub use camera::sync_camera_transform;
pub use frame_extraction::extract_frame;
pub use input::{apply_host_commands, apply_touch_input};
pub use scene::setup_scene;
pub use tiles::sync_tile_transforms;
