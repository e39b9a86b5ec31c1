//! Orbit Menu: 3D orbit selector engine
//!
//! Menu items sit as tiles on a sphere. The user spins the sphere with an
//! arcball drag, it decays and snaps to the nearest item, and the host can
//! steer it to an item programmatically. The crate produces per-tile
//! transforms, camera matrices and selection notifications; drawing is left
//! to the host.
//!
//! Architecture:
//! - The orbit core is plain per-frame math driven by one `tick` per frame
//! - A headless Bevy app can run the core on a background thread
//! - Host commands arrive over a channel, pointer input through lock-free
//!   latches, and notifications leave as serialisable events
//!
//! # Module Structure
//!
//! - `config`: Tuned constants and the serde configuration document
//! - `error`: Crate error type
//! - `orbit`: Orientation controller, resolver, transforms, camera rig, engine
//! - `bridge`: Host-facing handle, commands and shared state
//! - `ecs`: Bevy components, systems, plugin and app setup

pub mod bridge;
pub mod config;
pub mod ecs;
pub mod error;
pub mod orbit;

pub use bridge::{HostCommand, OrbitHandle};
pub use config::OrbitConfig;
pub use ecs::{start_orbit_menu, OrbitMenuPlugin};
pub use error::{OrbitError, Result};
pub use orbit::{OrbitEngine, OrbitEvent, OrbitFrame, OrbitSelectionListener};
