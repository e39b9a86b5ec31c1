//! Orbit menu components

use bevy::prelude::*;

/// Tile entity attached to one anchor of the layout
///
/// Its `Transform` is rewritten every frame from the instance matrix of
/// `anchor`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitTile {
    pub anchor: usize,
}

/// Marker for the camera that follows the camera rig
#[derive(Component)]
pub struct OrbitCamera;
