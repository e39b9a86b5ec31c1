//! Orbit tick system

use bevy::log::warn;
use bevy::{prelude::*, time::Time};
use crossbeam_channel::TrySendError;

use crate::config::MAX_FRAME_MS;
use crate::ecs::resources::{FrameEvents, OrbitEngineRes, OrbitEventSender};

/// Advance the engine by the frame delta and forward its notifications
pub fn advance_orbit(
    time: Res<Time>,
    mut engine: ResMut<OrbitEngineRes>,
    mut events: ResMut<FrameEvents>,
    sender: Option<Res<OrbitEventSender>>,
) {
    let delta_ms = (time.delta_secs() * 1000.0).min(MAX_FRAME_MS);

    events.clear();
    engine.tick(delta_ms, &mut events.0);

    let Some(sender) = sender else {
        return;
    };
    let mut dropped = 0usize;
    for event in events.iter() {
        match sender.try_send(*event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => dropped += 1,
            // The host dropped its handle; keep ticking regardless
            Err(TrySendError::Disconnected(_)) => break,
        }
    }
    if dropped > 0 {
        warn!("Event buffer full, dropped {dropped} notification(s)");
    }
}
