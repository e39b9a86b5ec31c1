//! Bridge layer between the host and the tick thread
//!
//! - `shared_state`: touch latch and frame snapshot shared across threads
//! - `commands`: host commands, the host handle and the engine link

pub mod commands;
pub mod shared_state;

pub use commands::{orbit_channels, EngineLink, HostCommand, OrbitHandle};
pub use shared_state::{FrameSnapshot, SharedFrame, SharedTouchInput, TouchSample};
