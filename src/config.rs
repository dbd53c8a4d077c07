//! Session configuration.

use crate::crop::SeedKind;
use crate::input::Direction;
use crate::player::Position;
use crate::session::TimeMode;
use serde::{Deserialize, Serialize};

/// Session configuration with all simulation parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // ===== Map =====
    /// ASCII level layout override (None = builtin map).
    pub layout: Option<String>,

    /// Player spawn position.
    pub start_pos: Position,

    /// Player spawn facing.
    pub start_facing: Direction,

    // ===== Starting inventory =====
    /// Wheat seeds at session start.
    pub wheat_seeds: u32,

    /// Carrot seeds at session start.
    pub carrot_seeds: u32,

    /// Pumpkin seeds at session start.
    pub pumpkin_seeds: u32,

    // ===== Growth mechanics =====
    /// When true (default), the watered flag clears on every stage
    /// transition, so each stage must be watered separately. When false,
    /// a single watering carries the crop to maturity.
    pub rewater_each_stage: bool,

    // ===== Timing =====
    /// Time mode for this session.
    pub time_mode: TimeMode,

    /// Default ticks per second for real-time mode.
    pub default_ticks_per_second: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: None,
            start_pos: (19, 5),
            start_facing: Direction::Down,
            wheat_seeds: 5,
            carrot_seeds: 3,
            pumpkin_seeds: 2,
            rewater_each_stage: true,
            time_mode: TimeMode::Logical,
            default_ticks_per_second: 1.0,
        }
    }
}

impl SessionConfig {
    /// Create a config suitable for interactive play: the aging clock
    /// runs off wall time at one tick per second.
    pub fn human_play() -> Self {
        Self {
            time_mode: TimeMode::RealTime {
                ticks_per_second: 1.0,
            },
            ..Default::default()
        }
    }

    /// Create a config with an empty seed pouch, for scenarios that set
    /// up inventory themselves.
    pub fn bare() -> Self {
        Self {
            wheat_seeds: 0,
            carrot_seeds: 0,
            pumpkin_seeds: 0,
            ..Default::default()
        }
    }

    /// Parse a config from TOML. Missing fields fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Starting seed counts per kind.
    pub fn starting_seeds(&self) -> [(SeedKind, u32); 3] {
        [
            (SeedKind::Wheat, self.wheat_seeds),
            (SeedKind::Carrot, self.carrot_seeds),
            (SeedKind::Pumpkin, self.pumpkin_seeds),
        ]
    }
}
