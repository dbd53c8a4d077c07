//! Raw input keys and per-view resolution into semantic commands.
//!
//! The host adapter (terminal, browser, test harness) translates whatever
//! key events it receives into [`Key`] values; everything after that point
//! is exhaustive enum dispatch. Keys with no meaning in the current view
//! resolve to `None` and are ignored.

use serde::{Deserialize, Serialize};

/// Raw key identifiers the simulation understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
}

impl Key {
    /// Parse a key from its host-side name. Unknown names return `None`
    /// and should be dropped by the caller.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            " " | "space" | "Space" => Some(Key::Space),
            "ArrowLeft" | "left" => Some(Key::ArrowLeft),
            "ArrowRight" | "right" => Some(Key::ArrowRight),
            "Escape" | "esc" => Some(Key::Escape),
            "Enter" | "enter" => Some(Key::Enter),
            _ => None,
        }
    }
}

/// A facing / movement direction on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Grid delta for one step in this direction. Y grows downward.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// All directions, in a fixed order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// Semantic command in the map view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapCommand {
    /// Face the direction and step onto the target tile if walkable.
    Move(Direction),
    /// Apply the selected tool to the tile the player is facing.
    UseTool,
    /// Cycle the toolbar forward.
    NextTool,
    /// Cycle the toolbar backward.
    PreviousTool,
}

impl MapCommand {
    /// Resolve a raw key in the map view. Unmapped keys return `None`.
    pub fn resolve(key: Key) -> Option<MapCommand> {
        match key {
            Key::W => Some(MapCommand::Move(Direction::Up)),
            Key::A => Some(MapCommand::Move(Direction::Left)),
            Key::S => Some(MapCommand::Move(Direction::Down)),
            Key::D => Some(MapCommand::Move(Direction::Right)),
            Key::Space => Some(MapCommand::UseTool),
            Key::ArrowLeft => Some(MapCommand::PreviousTool),
            Key::ArrowRight => Some(MapCommand::NextTool),
            Key::Escape | Key::Enter => None,
        }
    }
}

/// Semantic command in the seed-selection view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCommand {
    Next,
    Previous,
    Select,
    Cancel,
}

impl MenuCommand {
    /// Resolve a raw key in the seed-selection view. Unmapped keys return `None`.
    pub fn resolve(key: Key) -> Option<MenuCommand> {
        match key {
            Key::ArrowLeft => Some(MenuCommand::Previous),
            Key::ArrowRight => Some(MenuCommand::Next),
            Key::Escape => Some(MenuCommand::Cancel),
            Key::Enter => Some(MenuCommand::Select),
            Key::W | Key::A | Key::S | Key::D | Key::Space => None,
        }
    }
}
