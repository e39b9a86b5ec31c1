//! Nearest-item resolution

use bevy::math::{Quat, Vec3};

/// Index of the anchor most aligned with `forward` under `orientation`.
///
/// `forward` is carried into anchor space by the inverse orientation and the
/// anchor with the largest dot product wins; ties keep the lowest index.
/// Returns `None` for an empty anchor list.
pub fn nearest_anchor(orientation: Quat, anchors: &[Vec3], forward: Vec3) -> Option<usize> {
    let local = orientation.conjugate() * forward;

    let mut best = None;
    let mut best_dot = f32::NEG_INFINITY;
    for (index, anchor) in anchors.iter().enumerate() {
        let d = local.dot(*anchor);
        if d > best_dot {
            best_dot = d;
            best = Some(index);
        }
    }
    best
}
