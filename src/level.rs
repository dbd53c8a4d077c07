//! The level: a fixed grid of tiles plus the set of planted positions.
//!
//! The planted set exists so the tick path touches only tiles that
//! actually host a crop. Invariant: a position is in the set if and only
//! if its tile has a crop; `mark_planted`/`clear_planted` are the only
//! mutation points and both ends are kept in sync by the session.

use crate::player::Position;
use crate::tile::{Terrain, Tile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The fixed map shipped with the simulation: a pond in the north-west
/// corner, two tilled fields in the middle, scattered rocks.
pub const DEFAULT_LAYOUT: &str = "\
~~~~................
~~~.................
~~....===.===.......
......===.===.......
......===.===.......
......===.===.......
....................
......#......~~.....
.............~~~....
....................
...#................
....................";

/// Error parsing an ASCII level layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout contained no rows.
    Empty,
    /// A row's width differed from the first row's.
    RaggedRow { row: usize, width: usize, expected: usize },
    /// A character with no terrain meaning.
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "layout has no rows"),
            LayoutError::RaggedRow { row, width, expected } => {
                write!(f, "row {} is {} tiles wide, expected {}", row, width, expected)
            }
            LayoutError::UnknownGlyph { glyph, x, y } => {
                write!(f, "unknown terrain glyph {:?} at ({}, {})", glyph, x, y)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Owns the grid of tiles and the planted set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    planted: BTreeSet<Position>,
}

impl Level {
    /// Parse a level from an ASCII layout. Glyphs: `.` grass, `=` soil,
    /// `#` rock, `~` water. Rows must all have the same width.
    pub fn from_layout(layout: &str) -> Result<Level, LayoutError> {
        let rows: Vec<&str> = layout.lines().filter(|l| !l.is_empty()).collect();
        let height = rows.len();
        if height == 0 {
            return Err(LayoutError::Empty);
        }
        let width = rows[0].chars().count();

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    width: row_width,
                    expected: width,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain = match glyph {
                    '.' => Terrain::Grass,
                    '=' => Terrain::Soil,
                    '#' => Terrain::Rock,
                    '~' => Terrain::Water,
                    other => {
                        return Err(LayoutError::UnknownGlyph { glyph: other, x, y });
                    }
                };
                tiles.push(Tile::new(terrain));
            }
        }

        Ok(Level {
            width: width as i32,
            height: height as i32,
            tiles,
            planted: BTreeSet::new(),
        })
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let (x, y) = pos;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Tile at `pos`, `None` out of bounds.
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    /// Mutable tile at `pos`, `None` out of bounds.
    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        match self.index(pos) {
            Some(i) => Some(&mut self.tiles[i]),
            None => None,
        }
    }

    /// Whether the player may stand on `pos`. False out of bounds.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.is_walkable())
    }

    /// Whether a seed may be planted on `pos`. False out of bounds.
    pub fn is_plantable(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.is_plantable())
    }

    /// Register a freshly planted tile in the planted set.
    pub fn mark_planted(&mut self, pos: Position) {
        debug_assert!(self.tile(pos).is_some_and(|t| t.has_crop()));
        self.planted.insert(pos);
    }

    /// Remove a harvested or cleared tile from the planted set.
    pub fn clear_planted(&mut self, pos: Position) {
        debug_assert!(self.tile(pos).is_some_and(|t| !t.has_crop()));
        self.planted.remove(&pos);
    }

    /// Positions currently hosting a crop, in deterministic order.
    pub fn planted_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.planted.iter().copied()
    }

    /// Every tile with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.width;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let pos = (i as i32 % width, i as i32 / width);
            (pos, tile)
        })
    }

    /// Advance every planted crop for one global tick. Returns the
    /// positions whose crop changed stage, with the new stage. Iterates a
    /// snapshot of the planted set so membership never changes mid-pass.
    pub fn age_crops(&mut self, current_tick: u64, rewater_each_stage: bool) -> Vec<(Position, u8)> {
        let snapshot: Vec<Position> = self.planted.iter().copied().collect();
        let mut advanced = Vec::new();
        for pos in snapshot {
            let Some(tile) = self.tile_mut(pos) else {
                debug_assert!(false, "planted set entry out of bounds");
                continue;
            };
            let Some(crop) = tile.crop.as_mut() else {
                debug_assert!(false, "planted set entry has no crop");
                continue;
            };
            if crop.age(current_tick, rewater_each_stage) {
                advanced.push((pos, crop.stage));
            }
        }
        advanced
    }
}

impl Default for Level {
    fn default() -> Self {
        // The builtin layout is validated by tests; a parse failure here
        // is an internal bug and should abort.
        Level::from_layout(DEFAULT_LAYOUT).expect("builtin layout must parse")
    }
}
