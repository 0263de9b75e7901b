//! # Display Management
//!
//! Screen management and 2D graphics rendering functionality using macroquad.
//! Everything on screen is drawn from a [`Snapshot`]; the display never
//! touches the session or the engine directly.

use crate::config;
use crate::game::{AttemptStatus, Snapshot, TileKind};
use macroquad::prelude::*;

/// Left and top margin of the board area in pixels.
const BOARD_MARGIN: f32 = 20.0;

/// Macroquad display manager for the game.
///
/// Handles all 2D graphics rendering operations including the level board,
/// the info panel, and the message area.
pub struct MacroquadDisplay {
    /// Preferred tile size in pixels, shrunk to fit large levels
    pub tile_size: f32,
    /// Info panel width in pixels
    pub panel_width: f32,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a new display manager.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::MacroquadDisplay;
    ///
    /// let display = MacroquadDisplay::new();
    /// // Display is ready for rendering
    /// ```
    pub fn new() -> Self {
        Self {
            tile_size: config::TILE_SIZE,
            panel_width: config::PANEL_WIDTH,
            messages: Vec::new(),
            max_messages: 100,
        }
    }

    /// Renders the complete game screen for one frame.
    pub fn render(&self, snapshot: &Snapshot) {
        clear_background(BLACK);

        let tile_size = self.fitted_tile_size(snapshot);
        self.render_board(snapshot, tile_size);
        self.render_panel(snapshot);
        self.render_messages();
        self.render_status_banner(snapshot);
    }

    /// Shrinks the preferred tile size until the level rectangle fits the
    /// area left of the info panel.
    fn fitted_tile_size(&self, snapshot: &Snapshot) -> f32 {
        let available_w = (screen_width() - self.panel_width - BOARD_MARGIN * 2.0).max(1.0);
        let available_h = (screen_height() - BOARD_MARGIN * 2.0 - 100.0).max(1.0);
        let max_w = available_w / snapshot.width.max(1) as f32;
        let max_h = available_h / snapshot.height.max(1) as f32;
        self.tile_size.min(max_w).min(max_h).max(4.0)
    }

    /// Renders the level board and the player marker.
    fn render_board(&self, snapshot: &Snapshot, tile_size: f32) {
        let board_w = snapshot.width as f32 * tile_size;
        let board_h = snapshot.height as f32 * tile_size;

        // Light floor backdrop so dark tiles stay visible.
        draw_rectangle(
            BOARD_MARGIN,
            BOARD_MARGIN,
            board_w,
            board_h,
            Color::from_rgba(235, 228, 210, 255),
        );

        for (position, tile) in &snapshot.tiles {
            let x = BOARD_MARGIN + position.x as f32 * tile_size;
            let y = BOARD_MARGIN + position.y as f32 * tile_size;
            draw_rectangle(x, y, tile_size, tile_size, tile_color(tile.kind));

            // A linked pad gets a lighter core so pairs read as gates.
            if tile.kind == TileKind::Portal && tile.portal.is_some() {
                draw_circle(
                    x + tile_size / 2.0,
                    y + tile_size / 2.0,
                    tile_size * 0.28,
                    Color::from_rgba(216, 128, 216, 255),
                );
            }
        }

        if let Some(player) = snapshot.player {
            draw_circle(
                BOARD_MARGIN + (player.x as f32 + 0.5) * tile_size,
                BOARD_MARGIN + (player.y as f32 + 0.5) * tile_size,
                tile_size * 0.38,
                Color::from_rgba(255, 107, 53, 255),
            );
        }
    }

    /// Renders the info panel on the right side of the screen.
    fn render_panel(&self, snapshot: &Snapshot) {
        let panel_x = screen_width() - self.panel_width + 10.0;
        let mut line_y = 30.0;
        let line_height = 22.0;

        draw_text("MUSHROOM MAN", panel_x, line_y, 28.0, WHITE);
        line_y += line_height * 2.0;

        draw_text(
            &format!(
                "Level {} of {}",
                snapshot.level_index + 1,
                snapshot.level_count
            ),
            panel_x,
            line_y,
            18.0,
            YELLOW,
        );
        line_y += line_height;

        draw_text(&snapshot.title, panel_x, line_y, 18.0, WHITE);
        line_y += line_height;

        draw_text(
            &format!("by {}", snapshot.author),
            panel_x,
            line_y,
            16.0,
            GRAY,
        );
        line_y += line_height * 2.0;

        draw_text(
            &format!("Moves: {}", snapshot.moves),
            panel_x,
            line_y,
            18.0,
            WHITE,
        );
        line_y += line_height;

        let best = match snapshot.best_moves {
            Some(best) => format!("Best: {best}"),
            None => "Best: -".to_string(),
        };
        draw_text(&best, panel_x, line_y, 18.0, WHITE);
        line_y += line_height * 2.0;

        draw_text("Inventory:", panel_x, line_y, 18.0, SKYBLUE);
        line_y += line_height;

        let inventory = snapshot.inventory;
        let counters = [
            format!("Keys: {}", inventory.keys),
            format!("Coins: {}", inventory.currency),
            format!("Cement: {}", inventory.cement),
            format!("Oxygen: {}", inventory.oxygen),
        ];
        for counter in &counters {
            draw_text(counter, panel_x, line_y, 16.0, WHITE);
            line_y += line_height;
        }
        line_y += line_height;

        draw_text("Controls:", panel_x, line_y, 18.0, GREEN);
        line_y += line_height;

        let controls = [
            "WASD/Arrow keys: Move",
            "R: Restart level",
            "N: Next level",
            "ESC/Q: Quit",
        ];
        for control in &controls {
            draw_text(control, panel_x, line_y, 16.0, WHITE);
            line_y += line_height;
        }
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let message_area_y = screen_height() - 80.0;
        let message_count = 3; // Show last 3 messages
        let line_height = 18.0;

        draw_rectangle(
            0.0,
            message_area_y - 10.0,
            screen_width(),
            90.0,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + 8.0 + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, WHITE);
        }
    }

    /// Renders the end-of-attempt overlay when the level is over.
    fn render_status_banner(&self, snapshot: &Snapshot) {
        let (text, hint, color) = match snapshot.status {
            AttemptStatus::Active => return,
            AttemptStatus::Complete => (
                format!("Level complete in {} moves!", snapshot.moves),
                "Press N for the next level",
                GREEN,
            ),
            AttemptStatus::Failed(reason) => {
                (format!("Level lost: {reason}"), "Press R to retry", RED)
            }
        };

        let banner_y = screen_height() / 2.0 - 50.0;
        draw_rectangle(
            0.0,
            banner_y,
            screen_width(),
            100.0,
            Color::new(0.0, 0.0, 0.0, 0.75),
        );

        let title_width = measure_text(&text, None, 32, 1.0).width;
        draw_text(
            &text,
            (screen_width() - title_width) / 2.0,
            banner_y + 42.0,
            32.0,
            color,
        );

        let hint_width = measure_text(hint, None, 18, 1.0).width;
        draw_text(
            hint,
            (screen_width() - hint_width) / 2.0,
            banner_y + 74.0,
            18.0,
            WHITE,
        );
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}

/// Fill color for each tile kind.
fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Wall => Color::from_rgba(139, 69, 19, 255),
        TileKind::Impenetrable => Color::from_rgba(68, 68, 68, 255),
        TileKind::PlayerStart => Color::from_rgba(255, 107, 53, 255),
        TileKind::Exit => Color::from_rgba(0, 255, 0, 255),
        TileKind::Lock => Color::from_rgba(255, 215, 0, 255),
        TileKind::Key => Color::from_rgba(255, 215, 0, 255),
        TileKind::Hole => Color::from_rgba(101, 67, 33, 255),
        TileKind::Cement => Color::from_rgba(128, 128, 128, 255),
        TileKind::Jellybean => Color::from_rgba(255, 20, 147, 255),
        TileKind::Bomb => Color::from_rgba(0, 0, 0, 255),
        TileKind::Dynamite => Color::from_rgba(255, 69, 0, 255),
        TileKind::Guard => Color::from_rgba(139, 0, 0, 255),
        TileKind::Currency => Color::from_rgba(50, 205, 50, 255),
        TileKind::Oxygen => Color::from_rgba(135, 206, 235, 255),
        TileKind::Gun => Color::from_rgba(112, 128, 144, 255),
        TileKind::Water => Color::from_rgba(0, 102, 204, 255),
        TileKind::Portal => Color::from_rgba(128, 0, 128, 255),
    }
}
