//! Configuration for a synchronized game session.

use crate::SyncError;
use crate::transport::DEFAULT_BUS_CAPACITY;
use derive_getters::Getters;
use peer_tictactoe::{DEFAULT_BOARD_SIZE, DEFAULT_MARKER_CYCLE, GameEngine, Marker};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for one peer.
///
/// Board size and first marker apply to the next new game; identities apply
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Identity tag stamped on outgoing envelopes.
    #[serde(default)]
    local_id: String,

    /// Identity whose envelopes are applied.
    #[serde(default)]
    peer_id: String,

    /// Board edge length (clamped to at least 2).
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Marker that moves first.
    #[serde(default = "default_first_marker")]
    first_marker: Marker,

    /// Turn rotation.
    #[serde(default = "default_marker_cycle")]
    marker_cycle: Vec<Marker>,

    /// Game loop frequency in ticks per second.
    #[serde(default = "default_tick_hz")]
    tick_hz: u32,

    /// Messages buffered per bus topic.
    #[serde(default = "default_bus_capacity")]
    bus_capacity: usize,
}

fn default_board_size() -> usize {
    DEFAULT_BOARD_SIZE
}

fn default_first_marker() -> Marker {
    Marker::O
}

fn default_marker_cycle() -> Vec<Marker> {
    DEFAULT_MARKER_CYCLE.to_vec()
}

fn default_tick_hz() -> u32 {
    60
}

fn default_bus_capacity() -> usize {
    DEFAULT_BUS_CAPACITY
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_id: String::new(),
            peer_id: String::new(),
            board_size: default_board_size(),
            first_marker: default_first_marker(),
            marker_cycle: default_marker_cycle(),
            tick_hz: default_tick_hz(),
            bus_capacity: default_bus_capacity(),
        }
    }
}

impl SyncConfig {
    /// Creates a default configuration with the given identities.
    #[instrument(skip(local_id, peer_id))]
    pub fn new(local_id: impl Into<String>, peer_id: impl Into<String>) -> Self {
        Self {
            local_id: local_id.into(),
            peer_id: peer_id.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SyncError::new(format!("Failed to read config file: {}", e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(local_id = %config.local_id, peer_id = %config.peer_id, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, SyncError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings a game could not start with.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.tick_hz == 0 {
            return Err(SyncError::new("tick_hz must be positive"));
        }
        GameEngine::new(self.board_size, self.marker_cycle.clone(), self.first_marker)?;
        Ok(())
    }

    /// Time between game loop ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }

    /// Replaces the local identity.
    pub fn with_local_id(mut self, id: impl Into<String>) -> Self {
        self.local_id = id.into();
        self
    }

    /// Replaces the selected peer identity.
    pub fn with_peer_id(mut self, id: impl Into<String>) -> Self {
        self.peer_id = id.into();
        self
    }

    /// Replaces the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Replaces the first marker.
    pub fn with_first_marker(mut self, first_marker: Marker) -> Self {
        self.first_marker = first_marker;
        self
    }

    /// Replaces the game loop frequency.
    pub fn with_tick_hz(mut self, tick_hz: u32) -> Self {
        self.tick_hz = tick_hz;
        self
    }
}
