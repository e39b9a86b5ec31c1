//! Frame extraction system
//!
//! Copies the frame data of the last tick into the shared snapshot the host
//! renders from.

use bevy::prelude::*;

use crate::bridge::FrameSnapshot;
use crate::ecs::resources::{FrameCount, FrameOutputRes, OrbitEngineRes};

pub fn extract_frame(
    engine: Res<OrbitEngineRes>,
    output: Option<Res<FrameOutputRes>>,
    mut count: ResMut<FrameCount>,
) {
    let Some(output) = output else { return };

    count.0 += 1;
    let viewport = engine.camera().viewport();
    let center_tile = engine.center_tile_rect(viewport.x as u32, viewport.y as u32);
    output.publish(FrameSnapshot::capture(count.0, &engine.frame(), center_tile));
}
