//! # Rendering Module
//!
//! 2D graphics rendering for the game window using macroquad.

pub mod display;

pub use display::*;
