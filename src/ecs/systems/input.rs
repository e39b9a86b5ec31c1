//! Host intake systems
//!
//! Commands and pointer state written by the host thread are applied before
//! the tick so they take effect in the same frame.

use bevy::log::warn;
use bevy::prelude::*;

use crate::bridge::TouchSample;
use crate::ecs::resources::{HostCommandReceiver, OrbitEngineRes, TouchInputRes, TouchIntake};
use crate::orbit::{OrbitEngine, TouchState};

/// Apply every queued host command, in order
pub fn apply_host_commands(
    receiver: Option<Res<HostCommandReceiver>>,
    mut engine: ResMut<OrbitEngineRes>,
) {
    let Some(receiver) = receiver else {
        return;
    };

    for command in receiver.try_iter() {
        if let Err(err) = command.clone().apply(&mut engine.0) {
            warn!("Host command {command:?} rejected: {err}");
        }
    }
}

/// Feed the pointer latch into the controller
pub fn apply_touch_input(
    touch: Option<Res<TouchInputRes>>,
    mut intake: ResMut<TouchIntake>,
    mut engine: ResMut<OrbitEngineRes>,
) {
    let Some(touch) = touch else {
        return;
    };
    apply_touch_sample(touch.sample(), &mut intake, &mut engine.0);
}

/// Apply one latch sample.
///
/// A changed press counter starts a new drag even if the previous release
/// was never observed. A held pointer always ends up dragging, even when the
/// press was first sampled before its `down` flag became visible.
pub fn apply_touch_sample(sample: TouchSample, intake: &mut TouchIntake, engine: &mut OrbitEngine) {
    if sample.presses != intake.presses {
        intake.presses = sample.presses;
        engine.touch_down(sample.position);
        if !sample.down {
            // Tapped and released between two ticks
            engine.touch_up();
        }
        return;
    }

    let dragging = engine.touch_state() == TouchState::Dragging;
    match (sample.down, dragging) {
        (true, true) => engine.touch_move(sample.position),
        (true, false) => engine.touch_down(sample.position),
        (false, true) => engine.touch_up(),
        (false, false) => {}
    }
}
