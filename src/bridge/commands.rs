//! Host commands and the host-side handle
//!
//! Commands travel to the tick thread over a channel and are applied at the
//! start of the next tick, in the order they were sent. Notifications come
//! back as [`OrbitEvent`] values on a second channel.

use bevy::math::{Quat, Vec2};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use super::shared_state::{FrameSnapshot, SharedFrame, SharedTouchInput};
use crate::config::EVENT_BUFFER_SIZE;
use crate::error::{OrbitError, Result};
use crate::orbit::{MenuItem, OrbitEngine, OrbitEvent};

/// Command sent by the host to the orbit engine
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    SelectIndex {
        index: usize,
        #[serde(default)]
        immediate: bool,
    },
    SetItemCount {
        count: usize,
    },
    SetItems {
        items: Vec<MenuItem>,
        #[serde(default)]
        initial: usize,
    },
    SetSkewEnabled {
        enabled: bool,
    },
    /// Absolute orientation as `[x, y, z, w]`
    Teleport {
        orientation: [f32; 4],
    },
    Resize {
        width: f32,
        height: f32,
    },
    SetActiveGlow {
        index: Option<usize>,
    },
}

impl HostCommand {
    /// Parse a command from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply the command to `engine`
    pub fn apply(self, engine: &mut OrbitEngine) -> Result<()> {
        match self {
            HostCommand::SelectIndex { index, immediate } => {
                engine.select_index(index, immediate)?;
            }
            HostCommand::SetItemCount { count } => engine.set_item_count(count),
            HostCommand::SetItems { items, initial } => {
                engine.set_items(&items, initial)?;
            }
            HostCommand::SetSkewEnabled { enabled } => engine.set_skew_enabled(enabled),
            HostCommand::Teleport { orientation } => {
                let orientation = Quat::from_array(orientation);
                if !orientation.is_finite() || orientation.length_squared() == 0.0 {
                    return Err(OrbitError::InvalidConfig(format!(
                        "teleport orientation {orientation:?} is not a rotation"
                    )));
                }
                engine.teleport(orientation);
            }
            HostCommand::Resize { width, height } => engine.resize(width, height),
            HostCommand::SetActiveGlow { index } => engine.set_active_glow(index),
        }
        Ok(())
    }
}

/// Tick-thread side of the host connection
#[derive(Clone)]
pub struct EngineLink {
    pub commands: Receiver<HostCommand>,
    pub events: Sender<OrbitEvent>,
    pub touch: SharedTouchInput,
    pub frame: SharedFrame,
}

/// Host side of the connection to a running orbit menu
#[derive(Clone)]
pub struct OrbitHandle {
    commands: Sender<HostCommand>,
    events: Receiver<OrbitEvent>,
    touch: SharedTouchInput,
    frame: SharedFrame,
}

/// Create a connected host handle and engine link.
///
/// Notifications are buffered up to [`EVENT_BUFFER_SIZE`]; a host that stops
/// draining loses the newest ones instead of growing the queue.
pub fn orbit_channels() -> (OrbitHandle, EngineLink) {
    let (command_tx, command_rx) = unbounded();
    let (event_tx, event_rx) = bounded(EVENT_BUFFER_SIZE);
    let touch = SharedTouchInput::default();
    let frame = SharedFrame::default();

    let handle = OrbitHandle {
        commands: command_tx,
        events: event_rx,
        touch: touch.clone(),
        frame: frame.clone(),
    };
    let link = EngineLink {
        commands: command_rx,
        events: event_tx,
        touch,
        frame,
    };
    (handle, link)
}

impl OrbitHandle {
    pub fn send(&self, command: HostCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| OrbitError::Disconnected)
    }

    /// Send a command given in its JSON form
    pub fn send_json(&self, json: &str) -> Result<()> {
        self.send(HostCommand::from_json(json)?)
    }

    pub fn select_index(&self, index: usize, immediate: bool) -> Result<()> {
        self.send(HostCommand::SelectIndex { index, immediate })
    }

    pub fn set_item_count(&self, count: usize) -> Result<()> {
        self.send(HostCommand::SetItemCount { count })
    }

    pub fn set_items(&self, items: Vec<MenuItem>, initial: usize) -> Result<()> {
        self.send(HostCommand::SetItems { items, initial })
    }

    pub fn set_skew_enabled(&self, enabled: bool) -> Result<()> {
        self.send(HostCommand::SetSkewEnabled { enabled })
    }

    pub fn teleport(&self, orientation: Quat) -> Result<()> {
        self.send(HostCommand::Teleport {
            orientation: orientation.to_array(),
        })
    }

    pub fn resize(&self, width: f32, height: f32) -> Result<()> {
        self.send(HostCommand::Resize { width, height })
    }

    pub fn set_active_glow(&self, index: Option<usize>) -> Result<()> {
        self.send(HostCommand::SetActiveGlow { index })
    }

    pub fn touch_down(&self, position: Vec2) {
        self.touch.press(position);
    }

    pub fn touch_move(&self, position: Vec2) {
        self.touch.move_to(position);
    }

    pub fn touch_up(&self) {
        self.touch.release();
    }

    /// Notifications delivered since the last call
    pub fn drain_events(&self) -> Vec<OrbitEvent> {
        self.events.try_iter().collect()
    }

    /// Blocking access to the notification stream
    pub fn events(&self) -> &Receiver<OrbitEvent> {
        &self.events
    }

    pub fn latest_frame(&self) -> Option<FrameSnapshot> {
        self.frame.latest()
    }
}
