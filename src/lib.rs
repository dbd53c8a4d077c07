//! Furrow Core - the logic core of a tile-based farming micro-simulation
//!
//! This crate provides the full simulation state machine: a grid level of
//! tiles, crops with stage-based growth, a seed/harvest inventory, a
//! cyclable toolbar, and a session that dispatches raw key input and the
//! periodic aging tick. Presentation is left to collaborators, which
//! consume [`GameState`] snapshots and [`Event`] change feeds.
//!
//! ## Modules
//!
//! - [`session`] - View state machine, input dispatch, tick processing
//! - [`level`] - Tile grid and the planted set
//! - [`crop`] - Crop growth state machine
//! - [`input`] - Raw keys and per-view command resolution
//! - [`renderer`] - Text and JSON renderers

pub mod config;
pub mod crop;
pub mod input;
pub mod inventory;
pub mod level;
pub mod player;
pub mod renderer;
pub mod session;
pub mod tile;
pub mod tool;

// Core types
pub use config::SessionConfig;
pub use crop::{Crop, SeedKind};
pub use input::{Direction, Key, MapCommand, MenuCommand};
pub use inventory::Inventory;
pub use level::{Level, LayoutError, DEFAULT_LAYOUT};
pub use player::{Player, Position};
pub use session::{Event, GameState, SeedMenu, Session, TimeMode, View};
pub use tile::{Terrain, Tile};
pub use tool::{Tool, ToolCycle, Toolbar};

// Renderers
pub use renderer::{CompactJsonRenderer, JsonRenderer, Renderer, TextRenderer};
