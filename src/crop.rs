//! Crops and their growth-stage state machine.
//!
//! A crop advances through a fixed per-kind schedule of stages. Stage
//! membership is derived from ticks elapsed since planting, gated by the
//! watering requirement: a crop may not leave its current stage until it
//! has been watered since the last stage transition. Unwatered crops
//! stall; they never revert.

use serde::{Deserialize, Serialize};

/// The kinds of seed the player can plant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum SeedKind {
    #[default]
    Wheat,
    Carrot,
    Pumpkin,
}

impl SeedKind {
    /// Ticks spent in each growth stage before the next transition.
    /// The stage after the last entry is mature.
    pub fn stage_ticks(&self) -> &'static [u64] {
        match self {
            SeedKind::Wheat => &[3],
            SeedKind::Carrot => &[2, 3],
            SeedKind::Pumpkin => &[2, 3, 4],
        }
    }

    /// Index of the mature stage.
    pub fn mature_stage(&self) -> u8 {
        self.stage_ticks().len() as u8
    }

    /// Cumulative elapsed-tick threshold for entering `stage`.
    /// `threshold(0) == 0`; entering the mature stage requires the full
    /// schedule to have elapsed.
    pub fn threshold(&self, stage: u8) -> u64 {
        self.stage_ticks()
            .iter()
            .take(stage as usize)
            .copied()
            .sum()
    }

    /// Display name for renderers and menus.
    pub fn name(&self) -> &'static str {
        match self {
            SeedKind::Wheat => "wheat",
            SeedKind::Carrot => "carrot",
            SeedKind::Pumpkin => "pumpkin",
        }
    }

    /// All seed kinds, in a fixed order.
    pub fn all() -> [SeedKind; 3] {
        [SeedKind::Wheat, SeedKind::Carrot, SeedKind::Pumpkin]
    }
}

/// A plant instance growing on a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub kind: SeedKind,
    /// Simulation tick at which the crop was planted.
    pub planted_at_tick: u64,
    /// Whether the crop has been watered since the last stage transition.
    pub watered: bool,
    /// Current growth stage; `kind.mature_stage()` means ready to harvest.
    pub stage: u8,
}

impl Crop {
    /// Create a freshly planted crop at stage 0, unwatered.
    pub fn new(kind: SeedKind, tick: u64) -> Self {
        Self {
            kind,
            planted_at_tick: tick,
            watered: false,
            stage: 0,
        }
    }

    /// Whether the crop has reached its final stage.
    pub fn is_ready(&self) -> bool {
        self.stage >= self.kind.mature_stage()
    }

    /// Mark the crop watered. No-op on mature or already-watered crops.
    /// Returns whether anything changed.
    pub fn water(&mut self) -> bool {
        if self.is_ready() || self.watered {
            return false;
        }
        self.watered = true;
        true
    }

    /// Advance the growth state machine for one global tick.
    ///
    /// At most one stage transition occurs per call, and only when the
    /// elapsed-tick threshold for the next stage has been reached and the
    /// watering gate is satisfied. When `rewater_each_stage` is set the
    /// watered flag is cleared on every transition, so each stage must be
    /// watered separately; otherwise one watering carries the crop to
    /// maturity. Returns whether a stage advance occurred.
    pub fn age(&mut self, current_tick: u64, rewater_each_stage: bool) -> bool {
        if self.is_ready() {
            return false;
        }
        if !self.watered {
            return false;
        }
        let elapsed = current_tick.saturating_sub(self.planted_at_tick);
        if elapsed < self.kind.threshold(self.stage + 1) {
            return false;
        }
        self.stage += 1;
        if rewater_each_stage && !self.is_ready() {
            self.watered = false;
        }
        true
    }

    /// Display glyph for text rendering: `,` seeded, `i` growing, `Y` mature.
    pub fn glyph(&self) -> char {
        if self.is_ready() {
            'Y'
        } else if self.stage == 0 {
            ','
        } else {
            'i'
        }
    }
}
