//! Tools and the cyclable toolbar.

use serde::{Deserialize, Serialize};

/// The player's tools, in toolbar order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    /// Opens seed selection to plant on the facing tile.
    #[default]
    SeedPouch,
    /// Harvests a mature crop.
    Shovel,
    /// Waters a growing crop.
    WateringCan,
    /// Clears any crop with no yield.
    Hoe,
}

impl Tool {
    /// All tools in toolbar order.
    pub fn all() -> [Tool; 4] {
        [Tool::SeedPouch, Tool::Shovel, Tool::WateringCan, Tool::Hoe]
    }

    /// Display name for renderers.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::SeedPouch => "seed pouch",
            Tool::Shovel => "shovel",
            Tool::WateringCan => "watering can",
            Tool::Hoe => "hoe",
        }
    }
}

/// Cycling direction through the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolCycle {
    Next,
    Previous,
}

/// Ordered tool selection with wrap-around navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Toolbar {
    selected: usize,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected tool.
    pub fn selected(&self) -> Tool {
        Tool::all()[self.selected]
    }

    /// Cycle the selection; wraps around in both directions.
    pub fn navigate(&mut self, cycle: ToolCycle) -> Tool {
        let count = Tool::all().len();
        self.selected = match cycle {
            ToolCycle::Next => (self.selected + 1) % count,
            ToolCycle::Previous => (self.selected + count - 1) % count,
        };
        self.selected()
    }
}
