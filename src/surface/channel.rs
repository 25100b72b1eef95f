//! Channel-backed surfaces

use std::sync::Mutex;

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::warn;

use super::command::SurfaceCommand;
use super::traits::RenderSurface;

/// Forwards commands over a crossbeam channel to the map adapter
pub struct ChannelSurface {
    command_tx: Sender<SurfaceCommand>,
}

impl ChannelSurface {
    /// Creates a surface and the receiver the adapter drains
    pub fn new() -> (Self, Receiver<SurfaceCommand>) {
        let (command_tx, command_rx) = unbounded();
        (Self::from_sender(command_tx), command_rx)
    }

    /// Surface over an existing sender, so several producers can share one adapter
    pub fn from_sender(command_tx: Sender<SurfaceCommand>) -> Self {
        Self { command_tx }
    }
}

impl RenderSurface for ChannelSurface {
    fn submit(&self, command: SurfaceCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("render surface receiver dropped; command discarded");
        }
    }
}

/// Keeps every submitted command in memory, for tests and headless runs
#[derive(Default)]
pub struct RecordingSurface {
    commands: Mutex<Vec<SurfaceCommand>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains all recorded commands
    pub fn take(&self) -> Vec<SurfaceCommand> {
        match self.commands.lock() {
            Ok(mut commands) => std::mem::take(&mut *commands),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn snapshot(&self) -> Vec<SurfaceCommand> {
        match self.commands.lock() {
            Ok(commands) => commands.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderSurface for RecordingSurface {
    fn submit(&self, command: SurfaceCommand) {
        match self.commands.lock() {
            Ok(mut commands) => commands.push(command),
            Err(poisoned) => poisoned.into_inner().push(command),
        }
    }
}
