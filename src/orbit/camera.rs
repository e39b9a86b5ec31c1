//! Camera rig
//!
//! The camera sits on the +Z axis looking at the sphere centre. It backs away
//! while the sphere spins and eases back once it settles. The field of view
//! keeps the framed sphere the same apparent size in portrait and landscape.

use bevy::math::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::config::{overlay, CameraTuning};

/// Pixel rectangle on the host surface
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    tuning: CameraTuning,
    reference_frame_ms: f32,
    sphere_radius: f32,
    tile_scale: f32,
    depth_factor: f32,

    distance: f32,
    fov: f32,
    aspect: f32,
    viewport: Vec2,

    view: Mat4,
    projection: Mat4,
}

impl CameraRig {
    pub fn new(
        tuning: CameraTuning,
        reference_frame_ms: f32,
        sphere_radius: f32,
        tile_scale: f32,
        depth_factor: f32,
    ) -> Self {
        let mut rig = Self {
            distance: tuning.base_distance,
            tuning,
            reference_frame_ms,
            sphere_radius,
            tile_scale,
            depth_factor,
            fov: crate::config::camera::DEFAULT_FOV,
            aspect: 1.0,
            viewport: Vec2::ONE,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        rig.refresh_view();
        rig.refresh_projection();
        rig
    }

    /// Ease the camera distance toward its target for one frame.
    ///
    /// While `moving` the target backs away in proportion to `velocity`.
    pub fn update(&mut self, delta_ms: f32, velocity: f32, moving: bool) {
        let time_scale = delta_ms.max(0.0) / self.reference_frame_ms + 0.0001;
        let tuning = &self.tuning;

        let (target, damping) = if moving {
            (
                tuning.base_distance + velocity * tuning.pull_back_gain + tuning.pull_back_offset,
                tuning.moving_damping / time_scale,
            )
        } else {
            (tuning.base_distance, tuning.idle_damping / time_scale)
        };

        self.distance += (target - self.distance) / damping;
        self.refresh_view();
    }

    /// Recompute aspect and field of view for a new surface size.
    /// Empty or non-finite sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.aspect = width / height;

        let framed = self.sphere_radius * self.tuning.framing_height;
        self.fov = if self.aspect > 1.0 {
            2.0 * (framed / self.distance).atan()
        } else {
            2.0 * ((framed / self.aspect) / self.distance).atan()
        };
        self.refresh_projection();
    }

    fn refresh_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y);
    }

    fn refresh_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov, self.aspect, self.tuning.near, self.tuning.far);
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Pixel position of `world` on a `screen` sized surface (y grows down).
    ///
    /// Returns `None` when the point projects to w = 0.
    pub fn world_to_screen(&self, world: Vec3, screen: Vec2) -> Option<Vec2> {
        let clip = self.projection * self.view * world.extend(1.0);
        if clip.w == 0.0 {
            return None;
        }
        let ndc = clip / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen.x,
            (1.0 - ndc.y) * 0.5 * screen.y,
        ))
    }

    /// World position under pixel `point` at normalised device depth `ndc_depth`
    pub fn screen_to_world(&self, point: Vec2, screen: Vec2, ndc_depth: f32) -> Vec3 {
        let ndc = Vec4::new(
            2.0 * point.x / screen.x - 1.0,
            1.0 - 2.0 * point.y / screen.y,
            ndc_depth,
            1.0,
        );
        let world = (self.projection * self.view).inverse() * ndc;
        world.truncate() / world.w
    }

    /// Screen rectangle covering the image of the centred tile.
    ///
    /// The radius uses the shader's disk size and size correction so that host
    /// UI can overlay content on the tile.
    pub fn center_tile_rect(&self, screen_width: u32, screen_height: u32) -> ScreenRect {
        let screen = Vec2::new(screen_width as f32, screen_height as f32);
        let depth = self.sphere_radius * self.depth_factor;
        let center = self
            .world_to_screen(Vec3::new(0.0, 0.0, -depth), screen)
            .unwrap_or(screen * 0.5);

        let fov_scale = (self.fov * 0.5).tan() * depth;
        let radius = (overlay::DISK_RADIUS_WORLD * self.tile_scale * screen.y) / (2.0 * fov_scale)
            * overlay::SHADER_CORRECTION;

        ScreenRect {
            left: (center.x - radius) as i32,
            top: (center.y - radius) as i32,
            right: (center.x + radius) as i32,
            bottom: (center.y + radius) as i32,
        }
    }
}
