//! Shared state between the host and the tick thread
//!
//! Touch input is written by the host's input thread and read once per tick.
//! Each field is a single-writer latch, so no lock is taken on the input
//! path. The latest frame snapshot goes the other way behind a mutex, the
//! same way a rendered frame buffer would.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::orbit::instances::write_matrix_floats;
use crate::orbit::{OrbitFrame, ScreenRect};

// =============================================================================
// Touch Input
// =============================================================================

#[derive(Default)]
struct TouchLatch {
    x: AtomicU32,
    y: AtomicU32,
    down: AtomicBool,
    presses: AtomicU32,
}

/// Pointer state as seen by the tick thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub position: Vec2,
    pub down: bool,
    /// Number of presses since creation; a change means a new gesture started
    pub presses: u32,
}

/// Lock-free pointer latch shared between the host and the tick thread
#[derive(Clone, Default)]
pub struct SharedTouchInput(Arc<TouchLatch>);

impl SharedTouchInput {
    /// Pointer pressed at `position` (pixels).
    ///
    /// `down` is raised before the counter moves, so a reader that sees the
    /// new count also sees the pointer held.
    pub fn press(&self, position: Vec2) {
        self.store_position(position);
        self.0.down.store(true, Ordering::Release);
        self.0.presses.fetch_add(1, Ordering::AcqRel);
    }

    /// Pointer moved while pressed
    pub fn move_to(&self, position: Vec2) {
        self.store_position(position);
    }

    /// Pointer released or cancelled
    pub fn release(&self) {
        self.0.down.store(false, Ordering::Release);
    }

    pub fn sample(&self) -> TouchSample {
        // Counter first; pairs with the store order in `press`
        let presses = self.0.presses.load(Ordering::Acquire);
        let down = self.0.down.load(Ordering::Acquire);
        TouchSample {
            position: Vec2::new(
                f32::from_bits(self.0.x.load(Ordering::Acquire)),
                f32::from_bits(self.0.y.load(Ordering::Acquire)),
            ),
            down,
            presses,
        }
    }

    fn store_position(&self, position: Vec2) {
        self.0.x.store(position.x.to_bits(), Ordering::Release);
        self.0.y.store(position.y.to_bits(), Ordering::Release);
    }
}

// =============================================================================
// Frame Output
// =============================================================================

/// Owned copy of one frame, ready to hand to a renderer on another thread
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// Column-major 4x4 matrices, 16 floats per tile, in anchor order
    pub instances: Vec<f32>,
    pub view: [f32; 16],
    pub projection: [f32; 16],
    pub rotation_axis_velocity: [f32; 4],
    pub active_index: Option<usize>,
    pub moving: bool,
    pub glow: Vec<[f32; 4]>,
    /// Overlay rectangle of the centred tile on the current surface
    pub center_tile: ScreenRect,
}

impl FrameSnapshot {
    pub fn capture(frame_number: u64, frame: &OrbitFrame<'_>, center_tile: ScreenRect) -> Self {
        let mut instances = Vec::new();
        write_matrix_floats(frame.instances, &mut instances);
        Self {
            frame: frame_number,
            instances,
            view: frame.view.to_cols_array(),
            projection: frame.projection.to_cols_array(),
            rotation_axis_velocity: frame.rotation_axis_velocity.to_array(),
            active_index: frame.active_index,
            moving: frame.moving,
            glow: frame.glow.entries().iter().map(|e| e.to_array()).collect(),
            center_tile,
        }
    }

    pub fn tile_count(&self) -> usize {
        self.instances.len() / 16
    }
}

/// Latest frame published by the tick thread
#[derive(Clone, Default)]
pub struct SharedFrame(pub Arc<Mutex<Option<FrameSnapshot>>>);

impl SharedFrame {
    pub fn publish(&self, snapshot: FrameSnapshot) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(snapshot);
        }
    }

    pub fn latest(&self) -> Option<FrameSnapshot> {
        self.0.lock().ok().and_then(|guard| guard.clone())
    }
}
