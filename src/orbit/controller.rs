//! Orientation controller
//!
//! Converts pointer drags into rotation of the tile sphere with arcball
//! projection, decays the drag after release, and steers a snap target toward
//! the facing direction until it settles. The controller owns the cumulative
//! orientation and the smoothed angular velocity; it reports "target reached"
//! transitions through an [`EdgeLatch`] so each snap episode produces exactly
//! one notification.

use std::f32::consts::TAU;

use bevy::log::debug;
use bevy::math::{Quat, Vec2, Vec3};

use crate::config::ControllerTuning;
use crate::orbit::anchors::AnchorLayout;
use crate::orbit::latch::EdgeLatch;
use crate::orbit::math::{arcball_project, rotation_angle, rotation_between, FORWARD};

/// Whether a pointer is currently held on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Idle,
    Dragging,
}

/// What the controller is steering toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapState {
    /// Dragging, or nothing to steer toward yet
    None,
    /// Settling on the anchor nearest to the facing direction
    AutoSnapping,
    /// Settling on a programmatically selected anchor
    ForceSnapping,
    /// The last target has been reached and the sphere is at rest
    Reached,
}

/// Arcball orientation state integrated once per frame
#[derive(Debug, Clone)]
pub struct OrientationController {
    tuning: ControllerTuning,
    reference_frame_ms: f32,

    orientation: Quat,
    touch_rotation: Quat,
    smoothed_combined: Quat,
    smoothed_velocity: f32,
    angular_velocity: f32,
    rotation_axis: Vec3,

    touch: TouchState,
    touch_position: Vec2,
    previous_touch_position: Vec2,
    viewport: Vec2,

    snap_target: Option<usize>,
    force_snap: bool,
    target_reached: bool,
    /// Set by an immediate settle; survives one integration step
    pending_reached: bool,
    reached: EdgeLatch,

    skew_enabled: bool,
}

impl OrientationController {
    pub fn new(tuning: ControllerTuning, reference_frame_ms: f32) -> Self {
        Self {
            tuning,
            reference_frame_ms,
            orientation: Quat::IDENTITY,
            touch_rotation: Quat::IDENTITY,
            smoothed_combined: Quat::IDENTITY,
            smoothed_velocity: 0.0,
            angular_velocity: 0.0,
            rotation_axis: Vec3::X,
            touch: TouchState::Idle,
            touch_position: Vec2::ZERO,
            previous_touch_position: Vec2::ZERO,
            viewport: Vec2::ONE,
            snap_target: None,
            force_snap: false,
            target_reached: false,
            pending_reached: false,
            reached: EdgeLatch::default(),
            skew_enabled: true,
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Pointer pressed at `position` (pixels)
    pub fn touch_down(&mut self, position: Vec2) {
        self.touch_position = position;
        self.previous_touch_position = position;
        self.touch = TouchState::Dragging;
    }

    /// Pointer moved; ignored unless a drag is in progress
    pub fn touch_move(&mut self, position: Vec2) {
        if self.touch == TouchState::Dragging {
            self.touch_position = position;
        }
    }

    /// Pointer released or the gesture was cancelled
    pub fn touch_up(&mut self) {
        self.touch = TouchState::Idle;
    }

    /// Surface size used by the arcball projection; empty or non-finite sizes are ignored
    pub fn set_viewport(&mut self, size: Vec2) {
        if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
            self.viewport = size;
        }
    }

    pub fn set_skew_enabled(&mut self, enabled: bool) {
        self.skew_enabled = enabled;
    }

    // =========================================================================
    // Snapping
    // =========================================================================

    /// Settle on `anchor` when idle. Ignored while a forced snap is running.
    pub fn set_auto_target(&mut self, anchor: Option<usize>) {
        if !self.force_snap {
            self.snap_target = anchor;
        }
    }

    /// Steer toward `anchor` with the stronger programmatic intensity.
    ///
    /// With `immediate` the full rotation is applied at once and the target
    /// counts as reached; the notification is delivered by the next
    /// [`advance`](Self::advance).
    pub fn request_snap(&mut self, anchor: usize, immediate: bool, layout: &AnchorLayout) {
        self.snap_target = Some(anchor);
        self.force_snap = true;
        self.reached.rearm();

        if immediate {
            if let Some(direction) = self.world_direction(anchor, layout) {
                let snap = rotation_between(direction, FORWARD, 1.0);
                self.orientation = (snap * self.orientation).normalize();
            }
            self.settle_immediately();
        }
    }

    /// Jump to `orientation` without animation
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
        self.reached.rearm();
        self.settle_immediately();
    }

    fn settle_immediately(&mut self) {
        self.touch_rotation = Quat::IDENTITY;
        self.smoothed_combined = Quat::IDENTITY;
        self.smoothed_velocity = 0.0;
        self.angular_velocity = 0.0;
        self.force_snap = false;
        self.target_reached = true;
        self.pending_reached = true;
        self.snap_target = None;
    }

    // =========================================================================
    // Integration
    // =========================================================================

    /// Integrate one frame of `delta_ms` milliseconds.
    ///
    /// Returns the new "target reached" level when it changed during this
    /// frame. Non-positive deltas leave the orientation untouched but still
    /// deliver pending transitions. An immediate settle is reported even if a
    /// held pointer clears it again in the same frame.
    pub fn advance(&mut self, delta_ms: f32, layout: &AnchorLayout) -> Option<bool> {
        let pending = std::mem::take(&mut self.pending_reached);
        let time_factor = delta_ms / (self.reference_frame_ms + 0.00001);
        if time_factor > 0.0 {
            self.integrate(time_factor, layout);
        }

        let edge = self.reached.observe(pending || self.target_reached);
        if edge == Some(true) {
            debug!("snap target {:?} reached", self.snap_target);
            self.snap_target = None;
        }
        edge
    }

    fn integrate(&mut self, time_factor: f32, layout: &AnchorLayout) {
        let tuning = &self.tuning;
        let mut snap = Quat::IDENTITY;

        match self.touch {
            TouchState::Dragging => {
                self.target_reached = false;

                let drag_intensity = tuning.drag_intensity * time_factor;
                let delta = (self.touch_position - self.previous_touch_position) * drag_intensity;

                if delta.length_squared() > tuning.touch_delta_threshold {
                    let interpolated = self.previous_touch_position + delta;
                    let current =
                        arcball_project(interpolated, self.viewport, tuning.arcball_radius)
                            .normalize();
                    let previous = arcball_project(
                        self.previous_touch_position,
                        self.viewport,
                        tuning.arcball_radius,
                    )
                    .normalize();
                    self.previous_touch_position = interpolated;

                    let amplification = tuning.rotation_amplification / time_factor;
                    self.touch_rotation =
                        rotation_between(current, previous, time_factor * amplification);
                } else {
                    self.touch_rotation = self
                        .touch_rotation
                        .slerp(Quat::IDENTITY, drag_intensity)
                        .normalize();
                }
            }
            TouchState::Idle => {
                if self.force_snap {
                    self.target_reached = false;
                }
                self.touch_rotation = self
                    .touch_rotation
                    .slerp(Quat::IDENTITY, tuning.release_intensity * time_factor)
                    .normalize();

                if let Some(target) = self
                    .snap_target
                    .and_then(|anchor| self.world_direction(anchor, layout))
                {
                    let intensity = if self.force_snap {
                        tuning.force_snap_intensity
                    } else {
                        tuning.auto_snap_intensity
                    };
                    let distance_sq = target.distance_squared(FORWARD);
                    let ease =
                        (1.0 - distance_sq * tuning.snap_ease_gain).max(tuning.snap_ease_floor);
                    snap = rotation_between(target, FORWARD, time_factor * intensity * ease);

                    if distance_sq < tuning.reach_distance_sq
                        && self.angular_velocity < tuning.reach_velocity
                    {
                        self.force_snap = false;
                        self.target_reached = true;
                    }
                }
            }
        }

        // Snap correction is applied on top of the incremental drag
        let combined = snap * self.touch_rotation;
        self.orientation = (combined * self.orientation).normalize();

        let skew = if self.skew_enabled {
            tuning.skew_intensity * time_factor
        } else {
            0.0
        };
        self.smoothed_combined = self.smoothed_combined.slerp(combined, skew).normalize();

        let angle = rotation_angle(self.smoothed_combined);
        let sin_half = (angle / 2.0).sin();
        let mut instant_velocity = 0.0;
        if sin_half > 0.000001 {
            instant_velocity = angle / TAU;
            self.rotation_axis = Vec3::new(
                self.smoothed_combined.x,
                self.smoothed_combined.y,
                self.smoothed_combined.z,
            ) / sin_half;
        }

        let smoothing = tuning.velocity_smoothing * time_factor;
        self.smoothed_velocity += (instant_velocity - self.smoothed_velocity) * smoothing;
        self.angular_velocity = self.smoothed_velocity / time_factor;
    }

    /// Current world direction of `anchor`
    pub fn world_direction(&self, anchor: usize, layout: &AnchorLayout) -> Option<Vec3> {
        layout
            .get(anchor)
            .map(|position| (self.orientation * position).normalize())
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn touch_rotation(&self) -> Quat {
        self.touch_rotation
    }

    /// Smoothed, frame-rate normalised angular speed (turns per frame)
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn rotation_axis(&self) -> Vec3 {
        self.rotation_axis
    }

    pub fn touch_state(&self) -> TouchState {
        self.touch
    }

    pub fn is_touching(&self) -> bool {
        self.touch == TouchState::Dragging
    }

    pub fn is_force_snapping(&self) -> bool {
        self.force_snap
    }

    pub fn target_reached(&self) -> bool {
        self.target_reached
    }

    pub fn snap_target(&self) -> Option<usize> {
        self.snap_target
    }

    pub fn previous_touch_position(&self) -> Vec2 {
        self.previous_touch_position
    }

    pub fn skew_enabled(&self) -> bool {
        self.skew_enabled
    }

    pub fn snap_state(&self) -> SnapState {
        if self.force_snap {
            SnapState::ForceSnapping
        } else if self.is_touching() {
            SnapState::None
        } else if self.target_reached {
            SnapState::Reached
        } else if self.snap_target.is_some() {
            SnapState::AutoSnapping
        } else {
            SnapState::None
        }
    }
}
