//! # Input Module
//!
//! Keyboard handling for player interactions.

use crate::game::Direction;
use macroquad::prelude::*;

/// Input handler for processing player commands.
///
/// Polls the macroquad keyboard state once per frame and converts pressed
/// keys into [`PlayerInput`] values for the game loop.
pub struct InputHandler;

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use mushman::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// // Ready to process input
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Gets the current input if any key is pressed.
    ///
    /// Returns the corresponding player input, or None if no key is pressed.
    pub fn get_input(&self) -> Option<PlayerInput> {
        self.process_macroquad_input()
    }

    /// Processes macroquad input and returns the corresponding player input.
    fn process_macroquad_input(&self) -> Option<PlayerInput> {
        // Check for quit
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            return Some(PlayerInput::Quit);
        }

        // Movement keys - Arrow keys
        if is_key_pressed(KeyCode::Up) {
            return Some(PlayerInput::Move(Direction::Up));
        }
        if is_key_pressed(KeyCode::Down) {
            return Some(PlayerInput::Move(Direction::Down));
        }
        if is_key_pressed(KeyCode::Left) {
            return Some(PlayerInput::Move(Direction::Left));
        }
        if is_key_pressed(KeyCode::Right) {
            return Some(PlayerInput::Move(Direction::Right));
        }

        // Movement keys - WASD
        if is_key_pressed(KeyCode::W) {
            return Some(PlayerInput::Move(Direction::Up));
        }
        if is_key_pressed(KeyCode::S) {
            return Some(PlayerInput::Move(Direction::Down));
        }
        if is_key_pressed(KeyCode::A) {
            return Some(PlayerInput::Move(Direction::Left));
        }
        if is_key_pressed(KeyCode::D) {
            return Some(PlayerInput::Move(Direction::Right));
        }

        // Restart the current level
        if is_key_pressed(KeyCode::R) {
            return Some(PlayerInput::Reset);
        }

        // Skip to the next level
        if is_key_pressed(KeyCode::N) {
            return Some(PlayerInput::NextLevel);
        }

        None
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one cell in the given direction
    Move(Direction),
    /// Restart the current level
    Reset,
    /// Jump to the next level
    NextLevel,
    /// Quit the game
    Quit,
}
