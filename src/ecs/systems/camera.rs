//! Camera sync system

use bevy::prelude::*;

use crate::ecs::components::OrbitCamera;
use crate::ecs::resources::OrbitEngineRes;

/// Place the camera where the rig put it, looking at the sphere centre
pub fn sync_camera_transform(
    engine: Res<OrbitEngineRes>,
    mut camera_query: Query<&mut Transform, With<OrbitCamera>>,
) {
    let position = engine.camera().position();
    for mut transform in camera_query.iter_mut() {
        *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
    }
}
