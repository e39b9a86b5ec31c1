//! Tile sync system

use bevy::prelude::*;

use crate::ecs::components::OrbitTile;
use crate::ecs::resources::OrbitEngineRes;

/// Copy each anchor's instance matrix onto its tile entity
pub fn sync_tile_transforms(
    engine: Res<OrbitEngineRes>,
    mut tiles: Query<(&OrbitTile, &mut Transform)>,
) {
    let matrices = engine.instances().matrices();
    for (tile, mut transform) in tiles.iter_mut() {
        if let Some(matrix) = matrices.get(tile.anchor) {
            *transform = Transform::from_matrix(*matrix);
        }
    }
}
