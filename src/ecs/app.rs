//! Bevy application setup and execution
//!
//! The orbit menu runs a headless Bevy loop on its own thread at the target
//! frame rate. The host talks to it only through the returned [`OrbitHandle`].

use std::thread;
use std::time::Duration;

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    log::{info, LogPlugin},
    prelude::*,
};

use crate::bridge::{orbit_channels, EngineLink, OrbitHandle};
use crate::config::{OrbitConfig, TARGET_FPS};
use crate::ecs::plugins::OrbitMenuPlugin;
use crate::error::Result;
use crate::orbit::OrbitEngine;

/// Create and configure the headless orbit menu app
pub fn create_app(engine: OrbitEngine, link: EngineLink) -> App {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TARGET_FPS,
        ))),
    );
    app.add_plugins(LogPlugin::default());
    app.add_plugins(OrbitMenuPlugin::new(engine).with_link(link));

    info!("Orbit menu app configured");
    app
}

/// Start the orbit menu on a background thread.
///
/// The configuration is validated before the thread starts.
pub fn start_orbit_menu(config: OrbitConfig) -> Result<OrbitHandle> {
    let engine = OrbitEngine::new(config)?;
    let (handle, link) = orbit_channels();

    thread::spawn(move || {
        let mut app = create_app(engine, link);
        app.run();
    });

    Ok(handle)
}
