//! Instance transform builder
//!
//! Every frame each anchor is rotated by the current orientation and turned
//! into a rigid transform for its tile: placed on the sphere, oriented along
//! its outward direction with a stable up vector, scaled by depth, and pushed
//! back along its own forward axis. The matrices are written into one
//! contiguous buffer in anchor order.

use bevy::math::{Mat4, Quat, Vec3};

use crate::config::OrbitConfig;
use crate::orbit::anchors::AnchorLayout;

/// Geometry parameters of the tile placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub sphere_radius: f32,
    pub tile_scale: f32,
    pub scale_intensity: f32,
    pub depth_factor: f32,
}

impl TilePlacement {
    pub fn from_config(config: &OrbitConfig) -> Self {
        Self {
            sphere_radius: config.sphere_radius,
            tile_scale: config.tile_scale,
            scale_intensity: config.scale_intensity,
            depth_factor: config.depth_factor,
        }
    }

    /// Scale of a tile whose rotated position is `position`.
    ///
    /// Tiles facing the camera (large |z|) are drawn larger.
    pub fn scale_at(&self, position: Vec3) -> f32 {
        let depth = position.z.abs() / self.sphere_radius;
        (depth * self.scale_intensity + (1.0 - self.scale_intensity)) * self.tile_scale
    }

    /// Distance a tile is pushed along its local forward axis
    pub fn depth_offset(&self) -> f32 {
        self.sphere_radius * self.depth_factor
    }

    /// Transform of the tile anchored at unit direction `anchor`
    pub fn transform(&self, orientation: Quat, anchor: Vec3) -> Mat4 {
        let position = orientation * (anchor * self.sphere_radius);
        let scale = self.scale_at(position);

        let forward = position.normalize();
        // At the poles forward × up vanishes; fall back to world-right
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward).normalize();

        let basis = Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            (-forward).extend(0.0),
            bevy::math::Vec4::W,
        );

        Mat4::from_translation(-position)
            * basis
            * Mat4::from_scale(Vec3::splat(scale))
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -self.depth_offset()))
    }
}

/// Per-frame tile matrices, one per anchor
#[derive(Debug, Clone, Default)]
pub struct InstanceTransforms {
    matrices: Vec<Mat4>,
}

impl InstanceTransforms {
    /// Recompute every matrix for `orientation`; no dirty tracking
    pub fn rebuild(&mut self, placement: &TilePlacement, orientation: Quat, layout: &AnchorLayout) {
        self.matrices.clear();
        self.matrices.extend(
            layout
                .positions()
                .iter()
                .map(|anchor| placement.transform(orientation, *anchor)),
        );
    }

    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

}

/// Column-major floats, 16 per matrix, ready for an instance buffer
pub fn write_matrix_floats(matrices: &[Mat4], out: &mut Vec<f32>) {
    out.clear();
    out.reserve(matrices.len() * 16);
    for matrix in matrices {
        out.extend_from_slice(&matrix.to_cols_array());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> TilePlacement {
        TilePlacement::from_config(&OrbitConfig::default())
    }

    #[test]
    fn front_tile_is_full_size_and_pushed_back() {
        let p = placement();
        let m = p.transform(Quat::IDENTITY, Vec3::NEG_Z);
        let (scale, rotation, translation) = m.to_scale_rotation_translation();

        assert!(scale.abs_diff_eq(Vec3::splat(0.35), 1e-5), "{scale:?}");
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-5), "{rotation:?}");
        // translate(-p) then R * 1.05 along the local forward axis, scaled
        let expected_z = 3.0 - 0.35 * 3.0 * 1.05;
        assert!(
            translation.abs_diff_eq(Vec3::new(0.0, 0.0, expected_z), 1e-5),
            "{translation:?}"
        );
    }

    #[test]
    fn side_tiles_shrink() {
        let p = placement();
        assert!((p.scale_at(Vec3::new(3.0, 0.0, 0.0)) - 0.35 * 0.2).abs() < 1e-6);
        assert!((p.scale_at(Vec3::new(0.0, 0.0, 3.0)) - 0.35).abs() < 1e-6);
    }

    #[test]
    fn basis_is_a_proper_rotation() {
        let p = placement();
        let q = Quat::from_euler(bevy::math::EulerRot::XYZ, 0.3, -1.1, 0.4);
        for anchor in AnchorLayout::icosphere(1).positions() {
            let m = p.transform(q, *anchor);
            assert!(m.is_finite());
            let scale = p.scale_at(q * (*anchor * 3.0));
            let det = m.determinant();
            assert!((det - scale.powi(3)).abs() < 1e-4, "det {det}");
        }
    }

    #[test]
    fn poles_do_not_produce_nan() {
        let p = placement();
        assert!(p.transform(Quat::IDENTITY, Vec3::Y).is_finite());
        assert!(p.transform(Quat::IDENTITY, Vec3::NEG_Y).is_finite());
    }

    #[test]
    fn buffer_follows_anchor_order() {
        let layout = AnchorLayout::icosphere(0);
        let mut instances = InstanceTransforms::default();
        instances.rebuild(&placement(), Quat::IDENTITY, &layout);
        assert_eq!(instances.len(), 12);

        let mut floats = vec![1.0; 3];
        write_matrix_floats(instances.matrices(), &mut floats);
        assert_eq!(floats.len(), 12 * 16);
        assert_eq!(&floats[16..32], &instances.matrices()[1].to_cols_array());
    }
}
