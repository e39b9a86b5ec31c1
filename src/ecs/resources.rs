//! Orbit menu resources
//!
//! The engine itself lives in the world as a resource. The host link pieces
//! are optional so the plugin also runs without a host, as in tests.

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::bridge::{HostCommand, SharedFrame, SharedTouchInput};
use crate::orbit::{OrbitEngine, OrbitEvent};

// =============================================================================
// Engine
// =============================================================================

/// The orbit engine driven by the tick systems
#[derive(Resource, Deref, DerefMut)]
pub struct OrbitEngineRes(pub OrbitEngine);

/// Notifications produced by the most recent tick
#[derive(Resource, Default, Deref, DerefMut)]
pub struct FrameEvents(pub Vec<OrbitEvent>);

/// Counter for ticks published to the host
#[derive(Resource, Default)]
pub struct FrameCount(pub u64);

// =============================================================================
// Host Link
// =============================================================================

/// Commands sent by the host
#[derive(Resource, Deref)]
pub struct HostCommandReceiver(pub Receiver<HostCommand>);

/// Notifications sent back to the host
#[derive(Resource, Deref)]
pub struct OrbitEventSender(pub Sender<OrbitEvent>);

/// Pointer latch written by the host
#[derive(Resource, Deref)]
pub struct TouchInputRes(pub SharedTouchInput);

/// Press counter seen by the last intake
#[derive(Resource, Default)]
pub struct TouchIntake {
    pub presses: u32,
}

/// Latest frame handed to the host
#[derive(Resource, Clone, Deref)]
pub struct FrameOutputRes(pub SharedFrame);
