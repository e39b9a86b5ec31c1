//! Orbit menu plugin
//!
//! Registers the engine resource, the optional host link and the per-frame
//! systems.

use bevy::prelude::*;

use crate::bridge::EngineLink;
use crate::ecs::resources::{
    FrameCount, FrameEvents, FrameOutputRes, HostCommandReceiver, OrbitEngineRes,
    OrbitEventSender, TouchInputRes, TouchIntake,
};
use crate::ecs::systems::*;
use crate::orbit::OrbitEngine;

/// System sets of one orbit frame, run in this order in `Update`
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrbitSet {
    Intake,
    Tick,
    Sync,
}

pub struct OrbitMenuPlugin {
    engine: OrbitEngine,
    link: Option<EngineLink>,
}

impl OrbitMenuPlugin {
    pub fn new(engine: OrbitEngine) -> Self {
        Self { engine, link: None }
    }

    /// Connect the plugin to a host handle
    pub fn with_link(mut self, link: EngineLink) -> Self {
        self.link = Some(link);
        self
    }
}

impl Plugin for OrbitMenuPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitEngineRes(self.engine.clone()));
        app.init_resource::<FrameEvents>();
        app.init_resource::<FrameCount>();
        app.init_resource::<TouchIntake>();

        if let Some(link) = &self.link {
            app.insert_resource(HostCommandReceiver(link.commands.clone()));
            app.insert_resource(OrbitEventSender(link.events.clone()));
            app.insert_resource(TouchInputRes(link.touch.clone()));
            app.insert_resource(FrameOutputRes(link.frame.clone()));
        }

        app.configure_sets(
            Update,
            (OrbitSet::Intake, OrbitSet::Tick, OrbitSet::Sync).chain(),
        );

        app.add_systems(Startup, setup_scene);
        app.add_systems(
            Update,
            (
                (apply_host_commands, apply_touch_input)
                    .chain()
                    .in_set(OrbitSet::Intake),
                advance_orbit.in_set(OrbitSet::Tick),
                (sync_tile_transforms, sync_camera_transform).in_set(OrbitSet::Sync),
            ),
        );
        app.add_systems(Last, extract_frame);
    }
}
