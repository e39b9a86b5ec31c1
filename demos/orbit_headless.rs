//! Headless Orbit Menu Demo
//!
//! Starts the orbit menu on its background thread, plays a short drag through
//! the pointer latch, then selects an item programmatically and prints every
//! notification as JSON.
//!
//! Flow:
//! 1. Configure the surface and the items
//! 2. Drag across the surface and release
//! 3. Wait for the sphere to settle on the nearest item
//! 4. Select an item with an animated snap and wait for it to settle

use std::thread;
use std::time::{Duration, Instant};

use bevy::math::Vec2;
use orbit_menu::orbit::{Glow, MenuItem, OrbitEvent};
use orbit_menu::{start_orbit_menu, OrbitConfig, OrbitHandle};

const WIDTH: f32 = 1080.0;
const HEIGHT: f32 = 1920.0;

fn main() -> orbit_menu::Result<()> {
    println!("=== Headless Orbit Menu ===");

    let handle = start_orbit_menu(OrbitConfig::default())?;
    handle.resize(WIDTH, HEIGHT)?;

    let items: Vec<MenuItem> = (0..8)
        .map(|index| {
            let item = MenuItem::new(index);
            if index == 3 {
                item.with_glow(Glow::Color([0.9, 0.6, 0.1]))
            } else {
                item
            }
        })
        .collect();
    handle.set_items(items, 0)?;
    wait_for_settle(&handle, Duration::from_secs(5));

    println!("Dragging...");
    let mut pointer = Vec2::new(WIDTH * 0.3, HEIGHT * 0.5);
    handle.touch_down(pointer);
    for _ in 0..20 {
        pointer.x += 25.0;
        pointer.y -= 10.0;
        handle.touch_move(pointer);
        thread::sleep(Duration::from_millis(16));
    }
    handle.touch_up();
    wait_for_settle(&handle, Duration::from_secs(10));

    println!("Selecting item 5...");
    handle.select_index(5, false)?;
    wait_for_settle(&handle, Duration::from_secs(10));

    if let Some(frame) = handle.latest_frame() {
        println!(
            "Frame {}: {} tiles, active {:?}, centre tile {:?}",
            frame.frame,
            frame.tile_count(),
            frame.active_index,
            frame.center_tile
        );
    }
    Ok(())
}

/// Print events until a selection settles or `timeout` passes
fn wait_for_settle(handle: &OrbitHandle, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        let Ok(event) = handle.events().recv_timeout(remaining) else {
            break;
        };
        match serde_json::to_string(&event) {
            Ok(json) => println!("  {json}"),
            Err(err) => println!("  <unserialisable event: {err}>"),
        }
        if matches!(event, OrbitEvent::SelectionSettled { .. }) {
            return;
        }
    }
    println!("  (timed out waiting for the selection to settle)");
}
