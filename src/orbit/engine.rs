//! Orbit engine
//!
//! Ties the controller, resolver, transform builder and camera rig together
//! behind one `tick` per rendered frame. Host notifications are delivered
//! synchronously from inside `tick` through an [`OrbitSelectionListener`].

use bevy::log::{debug, info, warn};
use bevy::math::{Mat4, Quat, Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::config::{overlay, OrbitConfig};
use crate::error::{OrbitError, Result};
use crate::orbit::anchors::AnchorLayout;
use crate::orbit::camera::{CameraRig, ScreenRect};
use crate::orbit::controller::{OrientationController, SnapState, TouchState};
use crate::orbit::instances::{InstanceTransforms, TilePlacement};
use crate::orbit::items::{GlowMap, MenuItem};
use crate::orbit::latch::EdgeLatch;
use crate::orbit::math::FORWARD;
use crate::orbit::resolver::nearest_anchor;

/// Receives host-visible notifications from [`OrbitEngine::tick`]
pub trait OrbitSelectionListener {
    /// The sphere settled with item `index` centred
    fn on_selection_settled(&mut self, _index: usize) {}

    /// The snap target was reached (`true`) or left (`false`)
    fn on_snap_target_reached(&mut self, _reached: bool) {}

    /// The sphere started (`true`) or stopped (`false`) moving
    fn on_movement_changed(&mut self, _moving: bool) {}
}

impl OrbitSelectionListener for () {}

/// Notification emitted by the engine, as data
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrbitEvent {
    SelectionSettled { index: usize },
    SnapTargetReached { reached: bool },
    MovementChanged { moving: bool },
}

impl OrbitSelectionListener for Vec<OrbitEvent> {
    fn on_selection_settled(&mut self, index: usize) {
        self.push(OrbitEvent::SelectionSettled { index });
    }

    fn on_snap_target_reached(&mut self, reached: bool) {
        self.push(OrbitEvent::SnapTargetReached { reached });
    }

    fn on_movement_changed(&mut self, moving: bool) {
        self.push(OrbitEvent::MovementChanged { moving });
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct OrbitFrame<'a> {
    pub instances: &'a [Mat4],
    pub view: Mat4,
    pub projection: Mat4,
    /// Rotation axis in xyz, scaled angular speed in w
    pub rotation_axis_velocity: Vec4,
    pub active_index: Option<usize>,
    pub moving: bool,
    pub glow: &'a GlowMap,
}

/// Orientation, snapping and framing state of one orbit menu
#[derive(Debug, Clone)]
pub struct OrbitEngine {
    config: OrbitConfig,
    layout: AnchorLayout,
    controller: OrientationController,
    camera: CameraRig,
    placement: TilePlacement,
    instances: InstanceTransforms,
    glow: GlowMap,
    item_count: usize,
    active_index: Option<usize>,
    movement: EdgeLatch,
}

impl OrbitEngine {
    /// Engine with the icosphere layout described by `config`
    pub fn new(config: OrbitConfig) -> Result<Self> {
        // Validate before building a layout from an unchecked subdivision count
        config.validate()?;
        let layout = AnchorLayout::icosphere(config.subdivisions);
        Self::with_layout(config, layout)
    }

    /// Engine with anchors supplied by a mesh layer
    pub fn with_layout(config: OrbitConfig, layout: AnchorLayout) -> Result<Self> {
        config.validate()?;
        if layout.is_empty() {
            return Err(OrbitError::EmptyLayout);
        }

        let mut controller =
            OrientationController::new(config.controller.clone(), config.reference_frame_ms);
        controller.set_skew_enabled(config.skew_enabled);

        let camera = CameraRig::new(
            config.camera.clone(),
            config.reference_frame_ms,
            config.sphere_radius,
            config.tile_scale,
            config.depth_factor,
        );
        let placement = TilePlacement::from_config(&config);

        let mut instances = InstanceTransforms::default();
        instances.rebuild(&placement, controller.orientation(), &layout);

        info!("Orbit engine created with {} anchors", layout.len());

        Ok(Self {
            config,
            layout,
            controller,
            camera,
            placement,
            instances,
            glow: GlowMap::default(),
            item_count: 0,
            active_index: None,
            movement: EdgeLatch::default(),
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn touch_down(&mut self, position: Vec2) {
        self.controller.touch_down(position);
    }

    pub fn touch_move(&mut self, position: Vec2) {
        self.controller.touch_move(position);
    }

    pub fn touch_up(&mut self) {
        self.controller.touch_up();
    }

    /// Surface resized; drives both the arcball and the camera framing
    pub fn resize(&mut self, width: f32, height: f32) {
        self.controller.set_viewport(Vec2::new(width, height));
        self.camera.resize(width, height);
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Number of items shown on the tiles; anchor `i` shows item `i % count`
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        if self.active_index.is_some_and(|index| index >= count) {
            self.active_index = None;
        }
        if count == 0 {
            self.controller.set_auto_target(None);
        }
        if self.glow.len() != count {
            self.glow = GlowMap::cleared(count);
        }
    }

    /// Replace the items, rebuild the glow map and start settling on `initial`
    pub fn set_items(&mut self, items: &[MenuItem], initial: usize) -> Result<usize> {
        self.set_item_count(items.len());
        self.glow = GlowMap::from_items(items, items.len());
        info!("Orbit menu items set ({} items)", items.len());
        self.select_index(initial, false)
    }

    /// Highlight a single item, or none
    pub fn set_active_glow(&mut self, index: Option<usize>) {
        self.glow = GlowMap::single(index, self.item_count);
    }

    /// Steer item `index` to the front.
    ///
    /// Out-of-range indices are clamped to the last selectable item. With
    /// `immediate` the orientation jumps; the settle notifications follow on
    /// the next tick. Returns the index actually selected.
    pub fn select_index(&mut self, index: usize, immediate: bool) -> Result<usize> {
        let selectable = self.item_count.min(self.layout.len());
        if selectable == 0 {
            warn!("select_index({index}) ignored: no items");
            return Err(OrbitError::NoItems);
        }
        let anchor = if index >= selectable {
            warn!("select_index({index}) out of range, clamped to {}", selectable - 1);
            selectable - 1
        } else {
            index
        };

        self.controller.request_snap(anchor, immediate, &self.layout);
        if immediate {
            self.instances
                .rebuild(&self.placement, self.controller.orientation(), &self.layout);
        }
        Ok(anchor)
    }

    pub fn set_skew_enabled(&mut self, enabled: bool) {
        self.controller.set_skew_enabled(enabled);
    }

    /// Jump to an absolute orientation without animation
    pub fn teleport(&mut self, orientation: Quat) {
        self.controller.set_orientation(orientation);
        self.instances
            .rebuild(&self.placement, self.controller.orientation(), &self.layout);
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance one frame of `delta_ms` milliseconds (clamped to the
    /// configured maximum) and rebuild the frame data.
    pub fn tick(&mut self, delta_ms: f32, listener: &mut dyn OrbitSelectionListener) {
        let delta_ms = delta_ms.clamp(0.0, self.config.max_frame_ms);

        if let Some(reached) = self.controller.advance(delta_ms, &self.layout) {
            listener.on_snap_target_reached(reached);
            if reached && !self.controller.is_touching() {
                if let Some(index) = self.centered_item() {
                    debug!("Selection settled on item {index}");
                    self.active_index = Some(index);
                    listener.on_selection_settled(index);
                }
            }
        }

        let moving = self.is_moving();
        if let Some(moving) = self.movement.observe(moving) {
            debug!("Movement changed: {moving}");
            listener.on_movement_changed(moving);
        }

        // Hand the idle sphere to the nearest anchor
        if self.item_count > 0
            && !self.controller.is_touching()
            && !self.controller.is_force_snapping()
        {
            let nearest = self.nearest_anchor();
            self.controller.set_auto_target(nearest);
        }

        self.camera
            .update(delta_ms, self.controller.angular_velocity(), moving);
        self.instances
            .rebuild(&self.placement, self.controller.orientation(), &self.layout);
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Dragging, spinning above the movement threshold, or force snapping
    pub fn is_moving(&self) -> bool {
        self.controller.is_touching()
            || self.controller.angular_velocity().abs() > self.config.moving_velocity
            || self.controller.is_force_snapping()
    }

    /// Anchor currently closest to the facing direction
    pub fn nearest_anchor(&self) -> Option<usize> {
        nearest_anchor(
            self.controller.orientation(),
            self.layout.positions(),
            FORWARD,
        )
    }

    /// Item shown on the centred anchor; `None` without items
    pub fn centered_item(&self) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        self.nearest_anchor().map(|anchor| anchor % self.item_count)
    }

    pub fn frame(&self) -> OrbitFrame<'_> {
        let axis = self.controller.rotation_axis();
        let speed = self.controller.angular_velocity() * overlay::VELOCITY_UNIFORM_GAIN;
        OrbitFrame {
            instances: self.instances.matrices(),
            view: self.camera.view(),
            projection: self.camera.projection(),
            rotation_axis_velocity: axis.extend(speed),
            active_index: self.active_index,
            moving: self.movement.level(),
            glow: &self.glow,
        }
    }

    /// Pixel rectangle of the centred tile on a `width` × `height` surface
    pub fn center_tile_rect(&self, width: u32, height: u32) -> ScreenRect {
        self.camera.center_tile_rect(width, height)
    }

    pub fn orientation(&self) -> Quat {
        self.controller.orientation()
    }

    pub fn angular_velocity(&self) -> f32 {
        self.controller.angular_velocity()
    }

    pub fn touch_state(&self) -> TouchState {
        self.controller.touch_state()
    }

    pub fn snap_state(&self) -> SnapState {
        self.controller.snap_state()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn layout(&self) -> &AnchorLayout {
        &self.layout
    }

    pub fn instances(&self) -> &InstanceTransforms {
        &self.instances
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn controller(&self) -> &OrientationController {
        &self.controller
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REFERENCE_FRAME_MS;
    use crate::orbit::items::Glow;

    const FRAME: f32 = REFERENCE_FRAME_MS;

    fn engine(items: usize) -> OrbitEngine {
        let mut engine = OrbitEngine::new(OrbitConfig::default()).unwrap();
        engine.resize(1080.0, 1920.0);
        engine.set_item_count(items);
        engine
    }

    fn settled(events: &[OrbitEvent]) -> Vec<usize> {
        events
            .iter()
            .filter_map(|e| match e {
                OrbitEvent::SelectionSettled { index } => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn immediate_select_settles_on_the_next_tick() {
        let mut engine = engine(16);
        let mut events = Vec::new();
        assert_eq!(engine.select_index(7, true).unwrap(), 7);
        assert_eq!(engine.nearest_anchor(), Some(7));

        engine.tick(FRAME, &mut events);
        assert_eq!(engine.nearest_anchor(), Some(7));
        assert_eq!(settled(&events), vec![7]);
        assert_eq!(engine.active_index(), Some(7));

        for _ in 0..100 {
            engine.tick(FRAME, &mut events);
        }
        assert_eq!(settled(&events), vec![7]);
        assert_eq!(engine.snap_state(), SnapState::Reached);
    }

    #[test]
    fn animated_select_converges() {
        let mut engine = engine(16);
        let mut events = Vec::new();
        engine.select_index(11, false).unwrap();
        assert_eq!(engine.snap_state(), SnapState::ForceSnapping);

        let mut ticks = 0;
        while settled(&events).is_empty() {
            engine.tick(FRAME, &mut events);
            ticks += 1;
            assert!(ticks < 1000, "did not converge");
        }
        let direction = engine
            .controller()
            .world_direction(11, engine.layout())
            .unwrap();
        assert!(direction.distance_squared(FORWARD) < 1e-4);
        assert_eq!(settled(&events), vec![11]);

        for _ in 0..200 {
            engine.tick(FRAME, &mut events);
        }
        let reached: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, OrbitEvent::SnapTargetReached { .. }))
            .collect();
        assert_eq!(reached, vec![&OrbitEvent::SnapTargetReached { reached: true }]);
    }

    #[test]
    fn settled_index_wraps_by_item_count() {
        let mut engine = engine(5);
        engine.teleport(Quat::IDENTITY);
        // Turn anchor 13 to the front without going through select_index
        let direction = engine.layout().get(13).unwrap();
        engine.teleport(Quat::from_rotation_arc(direction, FORWARD));
        let mut events = Vec::new();
        engine.tick(FRAME, &mut events);
        assert_eq!(settled(&events), vec![13 % 5]);
    }

    #[test]
    fn out_of_range_select_is_clamped() {
        let mut engine = engine(4);
        assert_eq!(engine.select_index(40, true).unwrap(), 3);
        assert_eq!(engine.nearest_anchor(), Some(3));
    }

    #[test]
    fn zero_items_skip_resolution() {
        let mut engine = engine(0);
        assert!(matches!(
            engine.select_index(0, false),
            Err(OrbitError::NoItems)
        ));

        let mut events = Vec::new();
        engine.teleport(Quat::from_rotation_y(0.3));
        for _ in 0..10 {
            engine.tick(FRAME, &mut events);
        }
        assert!(settled(&events).is_empty());
        assert_eq!(engine.controller().snap_target(), None);
        assert_eq!(engine.centered_item(), None);
    }

    #[test]
    fn idle_sphere_auto_snaps_to_nearest() {
        let mut engine = engine(42);
        let q = Quat::from_euler(bevy::math::EulerRot::XYZ, 0.2, 0.9, 0.0);
        engine.teleport(q);
        let mut events = Vec::new();
        engine.tick(FRAME, &mut events);
        let nearest = engine.nearest_anchor().unwrap();
        assert_eq!(engine.snap_state(), SnapState::Reached);

        // Reached was marked by the teleport; a touch starts a fresh episode
        engine.touch_down(Vec2::new(500.0, 900.0));
        engine.tick(FRAME, &mut events);
        engine.touch_up();
        events.clear();
        for _ in 0..1000 {
            engine.tick(FRAME, &mut events);
        }
        let direction = engine
            .controller()
            .world_direction(nearest, engine.layout())
            .unwrap();
        assert!(direction.distance_squared(FORWARD) < 1e-4);
        assert_eq!(settled(&events), vec![nearest]);
    }

    #[test]
    fn frame_exposes_renderer_inputs() {
        let mut engine = engine(3);
        engine
            .set_items(
                &[
                    MenuItem::new(0),
                    MenuItem::new(1).with_glow(Glow::Default),
                    MenuItem::new(2),
                ],
                2,
            )
            .unwrap();
        engine.tick(FRAME, &mut ());

        let frame = engine.frame();
        assert_eq!(frame.instances.len(), 42);
        assert!(frame.glow.is_glowing(1));
        assert!(frame.moving);
        assert_eq!(frame.view, engine.camera().view());

        engine.set_active_glow(Some(0));
        assert!(engine.frame().glow.is_glowing(0));
        assert!(!engine.frame().glow.is_glowing(1));
    }

    #[test]
    fn events_serialize_as_tagged_json() {
        let json = serde_json::to_string(&OrbitEvent::SelectionSettled { index: 4 }).unwrap();
        assert_eq!(json, r#"{"type":"selection_settled","index":4}"#);
    }
    #[test]
    fn teleport_under_a_held_pointer_still_reports_reached() {
        let mut engine = engine(16);
        let mut events = Vec::new();
        engine.touch_down(Vec2::new(540.0, 960.0));
        engine.tick(FRAME, &mut events);
        events.clear();

        engine.teleport(Quat::from_rotation_x(0.7));
        engine.tick(FRAME, &mut events);
        engine.tick(FRAME, &mut events);
        assert_eq!(
            events,
            vec![
                OrbitEvent::SnapTargetReached { reached: true },
                OrbitEvent::SnapTargetReached { reached: false },
            ]
        );
    }
}
