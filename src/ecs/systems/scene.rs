//! Scene setup system
//!
//! Spawns the camera and one tile entity per anchor. Meshes and materials are
//! left to the host renderer, which reads the same transforms from the frame
//! snapshot.

use bevy::log::info;
use bevy::prelude::*;

use crate::ecs::components::{OrbitCamera, OrbitTile};
use crate::ecs::resources::OrbitEngineRes;

pub fn setup_scene(mut commands: Commands, engine: Res<OrbitEngineRes>) {
    let camera = engine.camera().position();
    commands.spawn((
        Transform::from_translation(camera).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera,
    ));

    for (anchor, matrix) in engine.instances().matrices().iter().enumerate() {
        commands.spawn((Transform::from_matrix(*matrix), OrbitTile { anchor }));
    }

    info!(
        "Orbit scene set up with {} tiles",
        engine.instances().len()
    );
}
