//! Configuration constants and settings for the orbit menu
//!
//! The grouped constant modules hold the tuned numbers of the smoothing
//! controller. [`OrbitConfig`] exposes them as a serde document whose defaults
//! are those constants, so a host can override a subset from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{OrbitError, Result};

/// Duration of one reference frame at 60 Hz, in milliseconds
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

/// Longest frame delta fed into the controller, in milliseconds
pub const MAX_FRAME_MS: f32 = 32.0;

/// Target frames per second for the headless tick loop
pub const TARGET_FPS: f64 = 60.0;

/// Notifications buffered for the host before new ones are dropped
pub const EVENT_BUFFER_SIZE: usize = 256;

/// Tile sphere geometry
pub mod layout {
    /// Radius of the sphere the tiles sit on
    pub const SPHERE_RADIUS: f32 = 3.0;

    /// Icosahedron subdivision passes used for the anchor layout
    pub const SUBDIVISIONS: u32 = 1;

    /// Base scale applied to every tile
    pub const TILE_SCALE: f32 = 0.35;

    /// Share of the tile scale driven by depth (the rest is constant)
    pub const SCALE_INTENSITY: f32 = 0.8;

    /// Tiles are pushed this many radii along their local forward axis
    pub const DEPTH_FACTOR: f32 = 1.05;
}

/// Arcball and snap controller tuning
pub mod controller {
    /// Minimum squared damped touch delta that produces a rotation
    pub const TOUCH_DELTA_THRESHOLD: f32 = 0.1;

    /// Fraction of the pending touch delta consumed per reference frame
    pub const DRAG_INTENSITY: f32 = 0.3;

    /// Rotation amplification for drag input
    pub const ROTATION_AMPLIFICATION: f32 = 5.0;

    /// Decay of the touch rotation per reference frame after release
    pub const RELEASE_INTENSITY: f32 = 0.1;

    /// Snap strength when settling on the nearest item
    pub const AUTO_SNAP_INTENSITY: f32 = 0.2;

    /// Snap strength for programmatic selection
    pub const FORCE_SNAP_INTENSITY: f32 = 0.6;

    /// Gain of the distance ease applied to snap strength
    pub const SNAP_EASE_GAIN: f32 = 10.0;

    /// Lower bound of the distance ease
    pub const SNAP_EASE_FLOOR: f32 = 0.1;

    /// Squared distance between target and forward below which a snap is reached
    pub const REACH_DISTANCE_SQ: f32 = 1e-4;

    /// Angular velocity below which a snap is reached
    pub const REACH_VELOCITY: f32 = 1e-3;

    /// Smoothing of the combined rotation used for the velocity signal
    pub const SKEW_INTENSITY: f32 = 0.8;

    /// Smoothing of the angular velocity estimate
    pub const VELOCITY_SMOOTHING: f32 = 0.5;

    /// Radius of the virtual arcball
    pub const ARCBALL_RADIUS: f32 = 2.0;

    /// Angular velocity above which the menu counts as moving
    pub const MOVING_VELOCITY: f32 = 0.01;
}

/// Camera rig settings
pub mod camera {
    /// Resting camera distance from the sphere centre
    pub const BASE_DISTANCE: f32 = 3.0;

    /// Pull-back per unit of angular velocity
    pub const PULL_BACK_GAIN: f32 = 80.0;

    /// Constant pull-back while moving
    pub const PULL_BACK_OFFSET: f32 = 3.1;

    /// Damping divisor while settled
    pub const IDLE_DAMPING: f32 = 5.0;

    /// Damping divisor while moving
    pub const MOVING_DAMPING: f32 = 7.0;

    /// Near clip plane
    pub const NEAR: f32 = 0.1;

    /// Far clip plane
    pub const FAR: f32 = 40.0;

    /// Visible half height of the framing, in sphere radii
    pub const FRAMING_HEIGHT: f32 = 0.4;

    /// Field of view before the first resize (radians)
    pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_4;
}

/// Screen overlay of the centred tile
pub mod overlay {
    /// World radius of the disk image (shader disk radius doubled)
    pub const DISK_RADIUS_WORLD: f32 = 0.5;

    /// Size correction matching the disk fragment shader
    pub const SHADER_CORRECTION: f32 = 5.0;

    /// Gain applied to the angular speed before it reaches the shader
    pub const VELOCITY_UNIFORM_GAIN: f32 = 1.1;
}

/// Tuning of the orientation controller
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ControllerTuning {
    pub touch_delta_threshold: f32,
    pub drag_intensity: f32,
    pub rotation_amplification: f32,
    pub release_intensity: f32,
    pub auto_snap_intensity: f32,
    pub force_snap_intensity: f32,
    pub snap_ease_gain: f32,
    pub snap_ease_floor: f32,
    pub reach_distance_sq: f32,
    pub reach_velocity: f32,
    pub skew_intensity: f32,
    pub velocity_smoothing: f32,
    pub arcball_radius: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        use controller::*;
        Self {
            touch_delta_threshold: TOUCH_DELTA_THRESHOLD,
            drag_intensity: DRAG_INTENSITY,
            rotation_amplification: ROTATION_AMPLIFICATION,
            release_intensity: RELEASE_INTENSITY,
            auto_snap_intensity: AUTO_SNAP_INTENSITY,
            force_snap_intensity: FORCE_SNAP_INTENSITY,
            snap_ease_gain: SNAP_EASE_GAIN,
            snap_ease_floor: SNAP_EASE_FLOOR,
            reach_distance_sq: REACH_DISTANCE_SQ,
            reach_velocity: REACH_VELOCITY,
            skew_intensity: SKEW_INTENSITY,
            velocity_smoothing: VELOCITY_SMOOTHING,
            arcball_radius: ARCBALL_RADIUS,
        }
    }
}

/// Tuning of the camera rig
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CameraTuning {
    pub base_distance: f32,
    pub pull_back_gain: f32,
    pub pull_back_offset: f32,
    pub idle_damping: f32,
    pub moving_damping: f32,
    pub near: f32,
    pub far: f32,
    pub framing_height: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        use camera::*;
        Self {
            base_distance: BASE_DISTANCE,
            pull_back_gain: PULL_BACK_GAIN,
            pull_back_offset: PULL_BACK_OFFSET,
            idle_damping: IDLE_DAMPING,
            moving_damping: MOVING_DAMPING,
            near: NEAR,
            far: FAR,
            framing_height: FRAMING_HEIGHT,
        }
    }
}

/// Complete orbit menu configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    pub sphere_radius: f32,
    pub subdivisions: u32,
    pub tile_scale: f32,
    pub scale_intensity: f32,
    pub depth_factor: f32,
    pub reference_frame_ms: f32,
    pub max_frame_ms: f32,
    pub moving_velocity: f32,
    pub skew_enabled: bool,
    pub controller: ControllerTuning,
    pub camera: CameraTuning,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            sphere_radius: layout::SPHERE_RADIUS,
            subdivisions: layout::SUBDIVISIONS,
            tile_scale: layout::TILE_SCALE,
            scale_intensity: layout::SCALE_INTENSITY,
            depth_factor: layout::DEPTH_FACTOR,
            reference_frame_ms: REFERENCE_FRAME_MS,
            max_frame_ms: MAX_FRAME_MS,
            moving_velocity: controller::MOVING_VELOCITY,
            skew_enabled: true,
            controller: ControllerTuning::default(),
            camera: CameraTuning::default(),
        }
    }
}

impl OrbitConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot integrate with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("sphere_radius", self.sphere_radius),
            ("tile_scale", self.tile_scale),
            ("reference_frame_ms", self.reference_frame_ms),
            ("max_frame_ms", self.max_frame_ms),
            ("controller.arcball_radius", self.controller.arcball_radius),
            ("controller.drag_intensity", self.controller.drag_intensity),
            ("controller.rotation_amplification", self.controller.rotation_amplification),
            ("controller.release_intensity", self.controller.release_intensity),
            ("controller.auto_snap_intensity", self.controller.auto_snap_intensity),
            ("controller.force_snap_intensity", self.controller.force_snap_intensity),
            ("controller.snap_ease_floor", self.controller.snap_ease_floor),
            ("controller.reach_distance_sq", self.controller.reach_distance_sq),
            ("controller.reach_velocity", self.controller.reach_velocity),
            ("controller.velocity_smoothing", self.controller.velocity_smoothing),
            ("camera.base_distance", self.camera.base_distance),
            ("camera.idle_damping", self.camera.idle_damping),
            ("camera.moving_damping", self.camera.moving_damping),
            ("camera.near", self.camera.near),
            ("camera.framing_height", self.camera.framing_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(OrbitError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let non_negative = [
            ("moving_velocity", self.moving_velocity),
            ("controller.touch_delta_threshold", self.controller.touch_delta_threshold),
            ("controller.snap_ease_gain", self.controller.snap_ease_gain),
            ("controller.skew_intensity", self.controller.skew_intensity),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(OrbitError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        let finite = [
            ("depth_factor", self.depth_factor),
            ("camera.far", self.camera.far),
            ("camera.pull_back_gain", self.camera.pull_back_gain),
            ("camera.pull_back_offset", self.camera.pull_back_offset),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(OrbitError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.camera.far <= self.camera.near {
            return Err(OrbitError::InvalidConfig(format!(
                "camera.far ({}) must exceed camera.near ({})",
                self.camera.far, self.camera.near
            )));
        }
        if !(0.0..=1.0).contains(&self.scale_intensity) {
            return Err(OrbitError::InvalidConfig(format!(
                "scale_intensity must be within [0, 1], got {}",
                self.scale_intensity
            )));
        }
        // Each pass quadruples the faces; five passes already give 10k anchors
        if self.subdivisions > 5 {
            return Err(OrbitError::InvalidConfig(format!(
                "subdivisions must be at most 5, got {}",
                self.subdivisions
            )));
        }
        Ok(())
    }
}
