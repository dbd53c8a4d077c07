//! The session: view state machine, key dispatch, and tick processing.
//!
//! Two entry points mutate shared state: [`Session::handle_key`] for
//! discrete input events and [`Session::tick`] for the aging clock. Both
//! run to completion synchronously, so within one session they never
//! interleave partway; a host with real parallelism must serialize calls
//! behind one logical turn per event.

use crate::config::SessionConfig;
use crate::crop::SeedKind;
use crate::input::{Direction, Key, MapCommand, MenuCommand};
use crate::inventory::Inventory;
use crate::level::{Level, LayoutError};
use crate::player::{Player, Position};
use crate::tool::{Tool, Toolbar, ToolCycle};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How the session handles time progression.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum TimeMode {
    /// The clock advances only on explicit `tick()` calls.
    #[default]
    Logical,

    /// The clock advances at a fixed real-time rate via `update()`.
    RealTime { ticks_per_second: f32 },
}

/// Which input surface is currently active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum View {
    #[default]
    Map,
    SeedSelection,
}

/// State change notifications for rendering and modal collaborators.
/// The core emits these; it never reads collaborator state back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ViewChanged(View),
    FacingChanged(Direction),
    Moved(Position),
    ToolChanged(Tool),
    MenuHighlight(SeedKind),
    Planted { pos: Position, kind: SeedKind },
    Watered(Position),
    Harvested { pos: Position, kind: SeedKind },
    Cleared { pos: Position, kind: SeedKind },
    CropAdvanced { pos: Position, stage: u8 },
    CropMatured(Position),
}

/// The seed-selection menu: available seed kinds with counts and a
/// cyclic cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMenu {
    entries: Vec<(SeedKind, u32)>,
    cursor: usize,
}

impl SeedMenu {
    fn new(entries: Vec<(SeedKind, u32)>) -> Self {
        debug_assert!(!entries.is_empty());
        Self { entries, cursor: 0 }
    }

    /// The highlighted seed kind.
    pub fn selected(&self) -> SeedKind {
        self.entries[self.cursor].0
    }

    /// Entries on offer, in presentation order.
    pub fn entries(&self) -> &[(SeedKind, u32)] {
        &self.entries
    }

    fn navigate(&mut self, cmd: MenuCommand) {
        let count = self.entries.len();
        self.cursor = match cmd {
            MenuCommand::Next => (self.cursor + 1) % count,
            MenuCommand::Previous => (self.cursor + count - 1) % count,
            MenuCommand::Select | MenuCommand::Cancel => self.cursor,
        };
    }
}

/// Serializable snapshot of the whole simulation, consumed by renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tick: u64,
    pub view: View,
    pub player_pos: Position,
    pub player_facing: Direction,
    pub selected_tool: Tool,
    pub inventory: Inventory,
    pub level: Level,
    /// Present while the seed-selection view is open.
    pub seed_menu: Option<SeedMenu>,
}

/// Session timing state.
#[derive(Clone, Debug)]
pub struct SessionTiming {
    pub tick: u64,
    pub created_at: Instant,
    pub last_tick_at: Option<Instant>,
    pub tick_accumulator: Duration,
    pub paused: bool,
    pub total_pause_duration: Duration,
}

impl SessionTiming {
    pub fn new() -> Self {
        Self {
            tick: 0,
            created_at: Instant::now(),
            last_tick_at: None,
            tick_accumulator: Duration::ZERO,
            paused: false,
            total_pause_duration: Duration::ZERO,
        }
    }
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// A farming session: owns the level, player, toolbar, and inventory,
/// and routes every input and clock tick to the right component.
pub struct Session {
    /// Session configuration.
    pub config: SessionConfig,
    /// The tile grid.
    pub level: Level,
    /// Player position and facing.
    pub player: Player,
    /// Tool selection.
    pub toolbar: Toolbar,
    /// Seeds and harvested crops.
    pub inventory: Inventory,
    /// Session timing.
    pub timing: SessionTiming,
    view: View,
    /// Tile remembered between opening seed selection and committing it.
    pending_plot: Option<Position>,
    menu: Option<SeedMenu>,
}

impl Session {
    /// Create a new session. Fails only when the configured layout
    /// override does not parse.
    pub fn new(config: SessionConfig) -> Result<Self, LayoutError> {
        let level = match &config.layout {
            Some(layout) => Level::from_layout(layout)?,
            None => Level::default(),
        };
        let mut inventory = Inventory::new();
        for (kind, count) in config.starting_seeds() {
            inventory.add_seeds(kind, count);
        }
        let player = Player::new(config.start_pos, config.start_facing);

        Ok(Self {
            config,
            level,
            player,
            toolbar: Toolbar::new(),
            inventory,
            timing: SessionTiming::new(),
            view: View::Map,
            pending_plot: None,
            menu: None,
        })
    }

    /// The currently active view.
    pub fn view(&self) -> View {
        self.view
    }

    /// The open seed-selection menu, if any.
    pub fn seed_menu(&self) -> Option<&SeedMenu> {
        self.menu.as_ref()
    }

    /// Current simulation tick.
    pub fn current_tick(&self) -> u64 {
        self.timing.tick
    }

    /// Snapshot the full state for collaborators.
    pub fn get_state(&self) -> GameState {
        GameState {
            tick: self.timing.tick,
            view: self.view,
            player_pos: self.player.pos,
            player_facing: self.player.facing,
            selected_tool: self.toolbar.selected(),
            inventory: self.inventory.clone(),
            level: self.level.clone(),
            seed_menu: self.menu.clone(),
        }
    }

    /// Dispatch one raw key press according to the active view.
    /// Unmapped keys and invalid actions change nothing and emit nothing.
    pub fn handle_key(&mut self, key: Key) -> Vec<Event> {
        match self.view {
            View::Map => match MapCommand::resolve(key) {
                Some(cmd) => self.handle_map_command(cmd),
                None => Vec::new(),
            },
            View::SeedSelection => match MenuCommand::resolve(key) {
                Some(cmd) => self.handle_menu_command(cmd),
                None => Vec::new(),
            },
        }
    }

    fn handle_map_command(&mut self, cmd: MapCommand) -> Vec<Event> {
        let mut events = Vec::new();
        match cmd {
            MapCommand::Move(dir) => {
                // Facing updates regardless of whether the step commits.
                self.player.set_facing(dir);
                events.push(Event::FacingChanged(dir));
                let target = self.player.facing_pos();
                if self.level.is_walkable(target) {
                    self.player.set_position(target);
                    events.push(Event::Moved(target));
                }
            }
            MapCommand::UseTool => {
                let target = self.player.facing_pos();
                events.extend(self.use_tool(target));
            }
            MapCommand::NextTool => {
                let tool = self.toolbar.navigate(ToolCycle::Next);
                events.push(Event::ToolChanged(tool));
            }
            MapCommand::PreviousTool => {
                let tool = self.toolbar.navigate(ToolCycle::Previous);
                events.push(Event::ToolChanged(tool));
            }
        }
        events
    }

    /// Apply the selected tool to the tile the player is facing.
    /// Disallowed combinations are silent no-ops.
    fn use_tool(&mut self, target: Position) -> Vec<Event> {
        let mut events = Vec::new();
        match self.toolbar.selected() {
            Tool::SeedPouch => {
                if self.level.is_plantable(target) && self.inventory.has_any_seed() {
                    let entries: Vec<(SeedKind, u32)> = self.inventory.seed_stock().collect();
                    let menu = SeedMenu::new(entries);
                    events.push(Event::MenuHighlight(menu.selected()));
                    self.pending_plot = Some(target);
                    self.menu = Some(menu);
                    self.view = View::SeedSelection;
                    events.push(Event::ViewChanged(View::SeedSelection));
                }
            }
            Tool::Shovel => {
                if let Some(tile) = self.level.tile_mut(target) {
                    if let Some(kind) = tile.take_harvest() {
                        self.level.clear_planted(target);
                        self.inventory.add_harvest(kind);
                        events.push(Event::Harvested { pos: target, kind });
                    }
                }
            }
            Tool::WateringCan => {
                if let Some(tile) = self.level.tile_mut(target) {
                    if tile.water_crop() {
                        events.push(Event::Watered(target));
                    }
                }
            }
            Tool::Hoe => {
                if let Some(tile) = self.level.tile_mut(target) {
                    if let Some(kind) = tile.clear_crop() {
                        self.level.clear_planted(target);
                        events.push(Event::Cleared { pos: target, kind });
                    }
                }
            }
        }
        events
    }

    fn handle_menu_command(&mut self, cmd: MenuCommand) -> Vec<Event> {
        let Some(menu) = self.menu.as_mut() else {
            // Seed-selection view without a menu is an internal bug.
            debug_assert!(false, "seed selection view with no menu");
            self.view = View::Map;
            return Vec::new();
        };

        match cmd {
            MenuCommand::Next | MenuCommand::Previous => {
                menu.navigate(cmd);
                vec![Event::MenuHighlight(menu.selected())]
            }
            MenuCommand::Cancel => {
                self.close_menu();
                vec![Event::ViewChanged(View::Map)]
            }
            MenuCommand::Select => {
                let kind = menu.selected();
                self.commit_planting(kind)
            }
        }
    }

    /// Consume a seed and plant it on the remembered plot, then return
    /// to the map view.
    fn commit_planting(&mut self, kind: SeedKind) -> Vec<Event> {
        let Some(plot) = self.pending_plot else {
            debug_assert!(false, "seed selection with no pending plot");
            self.close_menu();
            return vec![Event::ViewChanged(View::Map)];
        };

        // The menu was built from the seed stock and the plot was
        // plantable when remembered; ticks in between only age existing
        // crops, so both still hold.
        let consumed = self.inventory.remove_seed(kind);
        debug_assert!(consumed, "menu offered a seed the inventory lacks");

        let mut events = Vec::new();
        if consumed {
            let tick = self.timing.tick;
            let planted = self
                .level
                .tile_mut(plot)
                .is_some_and(|tile| tile.plant(kind, tick));
            debug_assert!(planted, "pending plot no longer plantable");
            if planted {
                self.level.mark_planted(plot);
                events.push(Event::Planted { pos: plot, kind });
            }
        }

        self.close_menu();
        events.push(Event::ViewChanged(View::Map));
        events
    }

    fn close_menu(&mut self) {
        self.menu = None;
        self.pending_plot = None;
        self.view = View::Map;
    }

    /// Advance the aging clock by one tick and grow every planted crop.
    pub fn tick(&mut self) -> Vec<Event> {
        self.timing.tick += 1;
        self.timing.last_tick_at = Some(Instant::now());

        let rewater = self.config.rewater_each_stage;
        let advanced = self.level.age_crops(self.timing.tick, rewater);

        let mut events = Vec::new();
        for (pos, stage) in advanced {
            events.push(Event::CropAdvanced { pos, stage });
            if self.level.tile(pos).is_some_and(|t| t.is_crop_ready()) {
                events.push(Event::CropMatured(pos));
            }
        }
        events
    }

    /// Drive the clock from wall time in real-time mode. Accumulates
    /// `delta` and fires whole ticks, bounded per call so a long stall
    /// cannot trigger a catch-up burst.
    pub fn update(&mut self, delta: Duration) -> Vec<Event> {
        match self.config.time_mode {
            TimeMode::Logical => Vec::new(),
            TimeMode::RealTime { ticks_per_second } => {
                if self.timing.paused {
                    self.timing.total_pause_duration += delta;
                    return Vec::new();
                }

                let tick_duration = Duration::from_secs_f32(1.0 / ticks_per_second);
                self.timing.tick_accumulator += delta;

                let mut events = Vec::new();
                const MAX_TICKS_PER_UPDATE: u32 = 10;
                let mut ticks_this_update = 0;

                while self.timing.tick_accumulator >= tick_duration
                    && ticks_this_update < MAX_TICKS_PER_UPDATE
                {
                    self.timing.tick_accumulator -= tick_duration;
                    events.extend(self.tick());
                    ticks_this_update += 1;
                }

                if ticks_this_update >= MAX_TICKS_PER_UPDATE {
                    self.timing.tick_accumulator = Duration::ZERO;
                }

                events
            }
        }
    }

    /// Pause/unpause the real-time clock.
    pub fn set_paused(&mut self, paused: bool) {
        if self.timing.paused && !paused {
            self.timing.tick_accumulator = Duration::ZERO;
        }
        self.timing.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A small map with soil at (1, 0) and a rock wall on the right.
    const TEST_LAYOUT: &str = "\
.=.#
...#
.~.#";

    fn test_session() -> Session {
        let config = SessionConfig {
            layout: Some(TEST_LAYOUT.to_string()),
            start_pos: (0, 1),
            start_facing: Direction::Up,
            wheat_seeds: 1,
            carrot_seeds: 0,
            pumpkin_seeds: 0,
            ..Default::default()
        };
        Session::new(config).unwrap()
    }

    /// Planted set ⇔ tile crop, both directions.
    fn assert_planted_consistency(session: &Session) {
        for pos in session.level.planted_positions() {
            assert!(
                session.level.tile(pos).is_some_and(|t| t.has_crop()),
                "planted set entry {:?} has no crop",
                pos
            );
        }
        for (pos, tile) in session.level.iter() {
            if tile.has_crop() {
                assert!(
                    session.level.planted_positions().any(|p| p == pos),
                    "crop at {:?} missing from planted set",
                    pos
                );
            }
        }
    }

    fn select_tool(session: &mut Session, tool: Tool) {
        while session.toolbar.selected() != tool {
            session.handle_key(Key::ArrowRight);
        }
    }

    #[test]
    fn test_session_creation() {
        let session = Session::new(SessionConfig::default()).unwrap();
        let state = session.get_state();

        assert_eq!(state.tick, 0);
        assert_eq!(state.view, View::Map);
        assert_eq!(state.player_pos, (19, 5));
        assert_eq!(state.selected_tool, Tool::SeedPouch);
        assert_eq!(state.inventory.seed_count(SeedKind::Wheat), 5);
    }

    #[test]
    fn test_bad_layout_is_an_error() {
        let config = SessionConfig {
            layout: Some("..!\n...".to_string()),
            ..Default::default()
        };
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_movement_gating_and_facing() {
        let mut session = test_session();

        session.handle_key(Key::D);
        assert_eq!(session.player.pos, (1, 1));

        // Walking into water: facing updates, position does not.
        let events = session.handle_key(Key::S);
        assert_eq!(session.player.facing, Direction::Down);
        assert_eq!(session.player.pos, (1, 1));
        assert!(events.contains(&Event::FacingChanged(Direction::Down)));
        assert!(!events.iter().any(|e| matches!(e, Event::Moved(_))));

        // Walking into the rock wall: blocked.
        session.handle_key(Key::D);
        assert_eq!(session.player.pos, (2, 1));
        session.handle_key(Key::D);
        assert_eq!(session.player.facing, Direction::Right);
        assert_eq!(session.player.pos, (2, 1));

        // Walking off the map edge: blocked.
        session.player.set_position((0, 0));
        session.handle_key(Key::A);
        assert_eq!(session.player.pos, (0, 0));
        session.handle_key(Key::W);
        assert_eq!(session.player.pos, (0, 0));
    }

    #[test]
    fn test_tool_cycling_is_cyclic() {
        let mut session = test_session();
        assert_eq!(session.toolbar.selected(), Tool::SeedPouch);

        let events = session.handle_key(Key::ArrowLeft);
        assert_eq!(events, vec![Event::ToolChanged(Tool::Hoe)]);

        session.handle_key(Key::ArrowRight);
        assert_eq!(session.toolbar.selected(), Tool::SeedPouch);
    }

    #[test]
    fn test_planting_scenario() {
        let mut session = test_session();
        session.player.set_position((1, 1));
        session.player.set_facing(Direction::Up);
        assert!(session.level.is_plantable((1, 0)));

        let events = session.handle_key(Key::Space);
        assert_eq!(session.view(), View::SeedSelection);
        assert!(events.contains(&Event::ViewChanged(View::SeedSelection)));
        assert!(events.contains(&Event::MenuHighlight(SeedKind::Wheat)));

        let events = session.handle_key(Key::Enter);
        assert_eq!(session.view(), View::Map);
        assert!(events.contains(&Event::Planted {
            pos: (1, 0),
            kind: SeedKind::Wheat
        }));
        assert_eq!(session.inventory.seed_count(SeedKind::Wheat), 0);

        let tile = session.level.tile((1, 0)).unwrap();
        assert!(tile.has_crop());
        assert!(!tile.is_plantable());
        assert_eq!(tile.crop.as_ref().unwrap().stage, 0);
        assert_planted_consistency(&session);
    }

    #[test]
    fn test_menu_cancel_consumes_nothing() {
        let mut session = test_session();
        session.player.set_position((1, 1));
        session.player.set_facing(Direction::Up);

        session.handle_key(Key::Space);
        let events = session.handle_key(Key::Escape);
        assert_eq!(session.view(), View::Map);
        assert_eq!(events, vec![Event::ViewChanged(View::Map)]);
        assert_eq!(session.inventory.seed_count(SeedKind::Wheat), 1);
        assert!(!session.level.tile((1, 0)).unwrap().has_crop());
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let config = SessionConfig {
            layout: Some(TEST_LAYOUT.to_string()),
            start_pos: (1, 1),
            start_facing: Direction::Up,
            wheat_seeds: 2,
            carrot_seeds: 1,
            pumpkin_seeds: 0,
            ..Default::default()
        };
        let mut session = Session::new(config).unwrap();
        session.handle_key(Key::Space);

        let menu = session.seed_menu().unwrap();
        assert_eq!(
            menu.entries(),
            &[(SeedKind::Wheat, 2), (SeedKind::Carrot, 1)]
        );
        assert_eq!(menu.selected(), SeedKind::Wheat);

        session.handle_key(Key::ArrowRight);
        assert_eq!(session.seed_menu().unwrap().selected(), SeedKind::Carrot);
        session.handle_key(Key::ArrowRight);
        assert_eq!(session.seed_menu().unwrap().selected(), SeedKind::Wheat);
        session.handle_key(Key::ArrowLeft);
        assert_eq!(session.seed_menu().unwrap().selected(), SeedKind::Carrot);

        // Map-view keys mean nothing here.
        assert!(session.handle_key(Key::W).is_empty());
        assert_eq!(session.view(), View::SeedSelection);
    }

    #[test]
    fn test_seed_pouch_noops() {
        let mut session = test_session();

        // Facing grass: not plantable.
        session.player.set_position((0, 1));
        session.player.set_facing(Direction::Up);
        assert!(session.handle_key(Key::Space).is_empty());
        assert_eq!(session.view(), View::Map);

        // Facing soil with no seeds left.
        session.inventory.remove_seed(SeedKind::Wheat);
        session.player.set_position((1, 1));
        session.player.set_facing(Direction::Up);
        assert!(session.handle_key(Key::Space).is_empty());
        assert_eq!(session.view(), View::Map);

        // Facing off the map edge.
        session.player.set_position((0, 0));
        session.player.set_facing(Direction::Left);
        assert!(session.handle_key(Key::Space).is_empty());
    }

    #[test]
    fn test_stall_without_water_then_mature() {
        let mut session = test_session();
        session.player.set_position((1, 1));
        session.player.set_facing(Direction::Up);
        session.handle_key(Key::Space);
        session.handle_key(Key::Enter); // wheat planted at tick 0, threshold 3

        assert!(session.tick().is_empty());
        assert!(session.tick().is_empty());
        assert_eq!(session.level.tile((1, 0)).unwrap().crop.as_ref().unwrap().stage, 0);

        select_tool(&mut session, Tool::WateringCan);
        let events = session.handle_key(Key::Space);
        assert_eq!(events, vec![Event::Watered((1, 0))]);

        let events = session.tick();
        assert!(events.contains(&Event::CropAdvanced { pos: (1, 0), stage: 1 }));
        assert!(events.contains(&Event::CropMatured((1, 0))));
        assert!(session.level.tile((1, 0)).unwrap().is_crop_ready());
    }

    #[test]
    fn test_shovel_harvests_only_mature() {
        let mut session = test_session();
        session.player.set_position((1, 1));
        session.player.set_facing(Direction::Up);
        session.handle_key(Key::Space);
        session.handle_key(Key::Enter);

        // Unripe: shovel is a no-op.
        select_tool(&mut session, Tool::Shovel);
        assert!(session.handle_key(Key::Space).is_empty());
        assert_eq!(session.inventory.harvested_count(SeedKind::Wheat), 0);

        // Ripen it, then harvest.
        select_tool(&mut session, Tool::WateringCan);
        session.handle_key(Key::Space);
        session.tick();
        session.tick();
        session.tick();
        assert!(session.level.tile((1, 0)).unwrap().is_crop_ready());

        select_tool(&mut session, Tool::Shovel);
        let events = session.handle_key(Key::Space);
        assert!(events.contains(&Event::Harvested {
            pos: (1, 0),
            kind: SeedKind::Wheat
        }));
        assert_eq!(session.inventory.harvested_count(SeedKind::Wheat), 1);
        assert!(session.level.tile((1, 0)).unwrap().is_plantable());
        assert_eq!(session.level.planted_positions().count(), 0);
        assert_planted_consistency(&session);
    }

    #[test]
    fn test_watering_can_noops() {
        let mut session = test_session();

        // No crop on the facing tile.
        session.player.set_position((1, 1));
        session.player.set_facing(Direction::Up);
        select_tool(&mut session, Tool::WateringCan);
        let before = session.get_state();
        assert!(session.handle_key(Key::Space).is_empty());
        assert_eq!(session.get_state(), before);

        // Already-watered crop.
        select_tool(&mut session, Tool::SeedPouch);
        session.handle_key(Key::Space);
        session.handle_key(Key::Enter);
        select_tool(&mut session, Tool::WateringCan);
        assert_eq!(session.handle_key(Key::Space), vec![Event::Watered((1, 0))]);
        assert!(session.handle_key(Key::Space).is_empty());
    }

    #[test]
    fn test_hoe_clears_unripe_crop() {
        let mut session = test_session();
        session.player.set_position((1, 1));
        session.player.set_facing(Direction::Up);
        session.handle_key(Key::Space);
        session.handle_key(Key::Enter);

        select_tool(&mut session, Tool::Hoe);
        let events = session.handle_key(Key::Space);
        assert_eq!(
            events,
            vec![Event::Cleared {
                pos: (1, 0),
                kind: SeedKind::Wheat
            }]
        );
        assert_eq!(session.inventory.harvested_count(SeedKind::Wheat), 0);
        assert!(session.level.tile((1, 0)).unwrap().is_plantable());
        assert_eq!(session.level.planted_positions().count(), 0);
        assert_planted_consistency(&session);

        // Hoeing the now-empty tile does nothing.
        assert!(session.handle_key(Key::Space).is_empty());
    }

    #[test]
    fn test_realtime_update_fires_whole_ticks() {
        let config = SessionConfig {
            layout: Some(TEST_LAYOUT.to_string()),
            start_pos: (0, 1),
            time_mode: TimeMode::RealTime {
                ticks_per_second: 10.0,
            },
            ..Default::default()
        };
        let mut session = Session::new(config).unwrap();

        session.update(Duration::from_millis(250));
        assert_eq!(session.current_tick(), 2);

        session.set_paused(true);
        session.update(Duration::from_millis(500));
        assert_eq!(session.current_tick(), 2);

        session.set_paused(false);
        session.update(Duration::from_millis(100));
        assert_eq!(session.current_tick(), 3);
    }

    #[test]
    fn test_logical_mode_ignores_update() {
        let mut session = test_session();
        session.update(Duration::from_secs(60));
        assert_eq!(session.current_tick(), 0);
    }
}
