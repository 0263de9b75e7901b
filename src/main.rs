//! # Mushroom Man Main Entry Point
//!
//! Parses the command line, loads the level corpus and the progress store,
//! and runs the macroquad game loop.

use clap::Parser;
use log::info;
use macroquad::prelude::*;
use mushman::{
    parse_corpus, GameSession, InputHandler, JsonFileStore, MacroquadDisplay, MushmanError,
    MushmanResult, Outcome, PlayerInput, DEFAULT_CORPUS,
};
use std::path::PathBuf;

/// Command line arguments for Mushroom Man.
#[derive(Parser, Debug)]
#[command(name = "mushman")]
#[command(about = "A turn-based grid puzzle game of keys, bombs, and portals")]
#[command(version)]
struct Args {
    /// Path to a level corpus file (defaults to the built-in levels)
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Level number to start at (1-based), overriding the saved position
    #[arg(long)]
    level: Option<usize>,

    /// Path of the progress save file
    #[arg(long, default_value = "mushman-save.json")]
    save: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Mushroom Man")]
async fn main() -> MushmanResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    info!("Starting Mushroom Man v{}", mushman::VERSION);

    run_game(args).await
}

/// Runs the main game loop with macroquad graphics.
async fn run_game(args: Args) -> MushmanResult<()> {
    // Configure window for both desktop and mobile
    // On mobile, this will be overridden by the platform
    request_new_screen_size(1024.0, 768.0);
    set_pc_assets_folder("assets");

    let corpus = match &args.levels {
        Some(path) => {
            info!("Loading level corpus from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => DEFAULT_CORPUS.to_string(),
    };

    let levels = parse_corpus(&corpus);
    if levels.is_empty() {
        return Err(MushmanError::InvalidState(
            "the level corpus contains no playable levels".to_string(),
        ));
    }

    let store = JsonFileStore::open(&args.save);
    let mut session = GameSession::new(levels, Box::new(store))?;

    if let Some(number) = args.level {
        session.load_level(number.saturating_sub(1));
    }

    let input_handler = InputHandler::new();
    let mut display = MacroquadDisplay::new();

    display.add_message(format!(
        "Welcome to Mushroom Man! {} levels loaded",
        session.level_count()
    ));
    display.add_message("Reach the green exit in as few moves as you can".to_string());

    // Main game loop
    loop {
        if let Some(input) = input_handler.get_input() {
            match input {
                PlayerInput::Quit => {
                    info!("Player quit the game");
                    break;
                }

                PlayerInput::Reset => {
                    session.reset_current_level();
                    display.add_message("Level restarted".to_string());
                }

                PlayerInput::NextLevel => {
                    if session.advance_level() {
                        let snapshot = session.snapshot();
                        display.add_message(format!(
                            "Level {}: {}",
                            snapshot.level_index + 1,
                            snapshot.title
                        ));
                    } else {
                        display.add_message("No more levels".to_string());
                    }
                }

                PlayerInput::Move(direction) => {
                    let outcome = session.attempt_move(direction);
                    announce(&mut display, outcome, session.state().moves());
                }
            }
        }

        display.render(&session.snapshot());
        next_frame().await;
    }

    info!("Game loop ended");
    Ok(())
}

/// Pushes a message for outcomes worth telling the player about.
fn announce(display: &mut MacroquadDisplay, outcome: Outcome, moves: u32) {
    match outcome {
        Outcome::LevelComplete {
            new_best: true,
            previous_best: Some(previous),
        } => {
            display.add_message(format!("Complete in {moves} moves, beating {previous}!"));
        }
        Outcome::LevelComplete {
            new_best: true,
            previous_best: None,
        } => {
            display.add_message(format!("Complete in {moves} moves!"));
        }
        Outcome::LevelComplete {
            new_best: false, ..
        } => {
            display.add_message(format!("Complete in {moves} moves, no new best"));
        }
        Outcome::LevelFailed(reason) => {
            display.add_message(format!("Level lost: {reason}"));
        }
        Outcome::None | Outcome::Moved | Outcome::Rejected | Outcome::ResourceChanged => {}
    }
}
