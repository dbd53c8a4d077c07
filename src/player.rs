//! Player state: grid position and facing direction.
//!
//! The player stores state and nothing else; walkability rules are
//! enforced by the session before `set_position` is called.

use crate::input::Direction;
use serde::{Deserialize, Serialize};

/// Grid position as (x, y). Y grows downward.
pub type Position = (i32, i32);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub facing: Direction,
}

impl Player {
    pub fn new(pos: Position, facing: Direction) -> Self {
        Self { pos, facing }
    }

    /// Unconditional facing update.
    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    /// Unconditional position update.
    pub fn set_position(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// The position one step ahead in the current facing direction.
    pub fn facing_pos(&self) -> Position {
        let (dx, dy) = self.facing.delta();
        (self.pos.0 + dx, self.pos.1 + dy)
    }
}
