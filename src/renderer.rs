//! Renderers over [`GameState`] snapshots.
//!
//! These are the in-process face of the presentation collaborator: they
//! consume state, the core never reads anything back.

use crate::session::{GameState, View};

/// Trait for rendering game state to various formats.
pub trait Renderer {
    type Output;
    type Error;

    fn render(&self, state: &GameState) -> Result<Self::Output, Self::Error>;
}

/// Text renderer for terminals, logs, and debugging.
pub struct TextRenderer {
    /// Include seed and harvest counts.
    pub show_inventory: bool,
    /// Include the glyph legend.
    pub show_legend: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            show_inventory: true,
            show_legend: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimal() -> Self {
        Self {
            show_inventory: false,
            show_legend: false,
        }
    }

    fn render_grid(&self, state: &GameState) -> String {
        let mut lines = Vec::with_capacity(state.level.height as usize);
        for y in 0..state.level.height {
            let mut line = String::with_capacity(state.level.width as usize);
            for x in 0..state.level.width {
                if (x, y) == state.player_pos {
                    line.push('@');
                } else {
                    let glyph = state
                        .level
                        .tile((x, y))
                        .map(|tile| tile.glyph())
                        .unwrap_or(' ');
                    line.push(glyph);
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl Renderer for TextRenderer {
    type Output = String;
    type Error = std::convert::Infallible;

    fn render(&self, state: &GameState) -> Result<String, Self::Error> {
        let mut output = String::new();

        output.push_str(&format!(
            "Tick: {} | Tool: {} | Pos: ({}, {}) | Facing: {:?}\n",
            state.tick,
            state.selected_tool.name(),
            state.player_pos.0,
            state.player_pos.1,
            state.player_facing,
        ));
        output.push('\n');

        output.push_str(&self.render_grid(state));
        output.push_str("\n\n");

        if state.view == View::SeedSelection {
            if let Some(menu) = &state.seed_menu {
                output.push_str("=== SELECT SEED ===\n");
                for (kind, count) in menu.entries() {
                    let marker = if *kind == menu.selected() { '>' } else { ' ' };
                    output.push_str(&format!("{} {} x{}\n", marker, kind.name(), count));
                }
                output.push('\n');
            }
        }

        if self.show_inventory {
            output.push_str("=== SEEDS ===\n");
            for kind in crate::crop::SeedKind::all() {
                output.push_str(&format!(
                    "{}: {}\n",
                    kind.name(),
                    state.inventory.seed_count(kind)
                ));
            }
            output.push_str("\n=== HARVESTED ===\n");
            for kind in crate::crop::SeedKind::all() {
                output.push_str(&format!(
                    "{}: {}\n",
                    kind.name(),
                    state.inventory.harvested_count(kind)
                ));
            }
            output.push('\n');
        }

        if self.show_legend {
            output.push_str("=== LEGEND ===\n");
            output.push_str("Terrain: . grass  = soil  # rock  ~ water\n");
            output.push_str("Crops:   , seeded  i growing  Y mature\n");
            output.push_str("Player:  @\n");
        }

        Ok(output)
    }
}

/// JSON renderer for structured output.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    type Output = String;
    type Error = serde_json::Error;

    fn render(&self, state: &GameState) -> Result<String, Self::Error> {
        serde_json::to_string_pretty(state)
    }
}

/// Compact JSON renderer (no pretty printing).
pub struct CompactJsonRenderer;

impl Renderer for CompactJsonRenderer {
    type Output = String;
    type Error = serde_json::Error;

    fn render(&self, state: &GameState) -> Result<String, Self::Error> {
        serde_json::to_string(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::session::Session;

    #[test]
    fn test_text_renderer() {
        let session = Session::new(SessionConfig::default()).unwrap();
        let state = session.get_state();

        let renderer = TextRenderer::new();
        let output = renderer.render(&state).unwrap();

        assert!(output.contains("Tick: 0"));
        assert!(output.contains("SEEDS"));
        assert!(output.contains('@'));
    }

    #[test]
    fn test_minimal_renderer_has_no_sections() {
        let session = Session::new(SessionConfig::default()).unwrap();
        let output = TextRenderer::minimal().render(&session.get_state()).unwrap();

        assert!(!output.contains("SEEDS"));
        assert!(!output.contains("LEGEND"));
    }

    #[test]
    fn test_json_renderer() {
        let session = Session::new(SessionConfig::default()).unwrap();
        let state = session.get_state();

        let renderer = JsonRenderer;
        let output = renderer.render(&state).unwrap();

        assert!(output.contains("\"tick\""));
        assert!(output.contains("\"inventory\""));
    }
}
