mod apple;
mod audio;
mod error;
mod game;
mod input;
mod present;
mod snake;
mod term;

use std::fs::File;

use anyhow::Context;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::input::TermEvents;
use crate::present::Sprites;
use crate::term::TermCanvas;

/// Surface coordinates are pixels and may go negative once the snake leaves the screen.
pub type Px = i32;
pub type Coords = (Px, Px);

const LOG_FILE: &str = "snake.log";

fn main() -> anyhow::Result<()> {
    // The terminal belongs to the game, so logs go to a file
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .context("initializing logger")?;

    info!("Starting snake");

    let sprites = Sprites::load().context("loading sprites")?;
    audio::check_assets().context("loading sound effects")?;
    let mixer = audio::open().context("opening audio")?;

    // Dropping the canvas restores the terminal, including on the error path
    let canvas = TermCanvas::new().context("setting up the terminal")?;
    let mut game = game::SnakeGame::new(canvas, mixer, rand::thread_rng(), sprites);
    game.play(&mut TermEvents)?;

    info!("Quit");
    Ok(())
}
