use std::{thread::sleep, time::Duration};

use log::{debug, info};
use rand::Rng;

use crate::apple::Apple;
use crate::audio::{Cue, Mixer};
use crate::error::GameError;
use crate::input::{dispatch, Command, EventSource};
use crate::present::{
    Font, Sprites, Surface, BACKGROUND_COLOUR, MAIN_FONT_COLOUR, SECONDARY_FONT_COLOUR,
};
use crate::snake::{is_colliding, Snake};

const TICK_PERIOD: Duration = Duration::from_millis(300);

const FONT_FAMILY: &str = "sans";
const SCORE_FONT: Font = Font::new(FONT_FAMILY, 30).bold();
const GAME_OVER_FONT: Font = Font::new(FONT_FAMILY, 60).bold();
const FINAL_SCORE_FONT: Font = Font::new(FONT_FAMILY, 45);
const PLAY_AGAIN_FONT: Font = Font::new(FONT_FAMILY, 30).italic();

const MESSAGE_X: i32 = 200;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// The round ended; waiting for Enter. Snake and apple are already reset.
    GameOver,
}

/// Result of advancing the snake by one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct SnakeGame<S, M, R> {
    surface: S,
    mixer: M,
    rng: R,
    sprites: Sprites,
    snake: Snake,
    apple: Apple,
    phase: Phase,
}

impl<S: Surface, M: Mixer, R: Rng> SnakeGame<S, M, R> {
    pub fn new(surface: S, mixer: M, mut rng: R, sprites: Sprites) -> Self {
        let apple = Apple::new(&mut rng);
        SnakeGame { surface, mixer, rng, sprites, snake: Snake::new(), apple, phase: Phase::Running }
    }

    /// Runs until the player quits, one tick every `TICK_PERIOD`.
    pub fn play<E: EventSource>(&mut self, events: &mut E) -> Result<(), GameError> {
        self.mixer.play_music();
        self.render()?;

        loop {
            let commands = dispatch(events.drain()?);
            if self.tick(&commands)? == Flow::Quit {
                return Ok(());
            }
            sleep(TICK_PERIOD);
        }
    }

    /// One iteration of the loop, minus the sleep. Commands apply in order,
    /// so of several arrows the last one wins.
    pub fn tick(&mut self, commands: &[Command]) -> Result<Flow, GameError> {
        let mut quit = false;

        for &command in commands {
            match (command, self.phase) {
                (Command::Quit, _) => quit = true,
                (Command::Turn(dir), Phase::Running) => self.snake.set_direction(dir),
                (Command::Restart, Phase::GameOver) => self.restart(),
                _ => {}
            }
        }

        if quit {
            return Ok(Flow::Quit);
        }

        if self.phase == Phase::Running {
            match self.advance() {
                StepOutcome::Continue => self.render()?,
                StepOutcome::GameOver => self.game_over()?,
            }
        }

        Ok(Flow::Continue)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    fn advance(&mut self) -> StepOutcome {
        self.snake.step();

        // Judged on the stepped body; the cell added by `grow` is not in place yet
        let bitten = self.snake.bites_itself();

        if is_colliding(self.snake.head(), self.apple.position()) {
            self.snake.grow();
            self.apple.reseat(&mut self.rng);
            self.mixer.play(Cue::Ding);
            debug!("Apple eaten, score {}", self.score());
        }

        if bitten {
            self.mixer.play(Cue::Crash);
            return StepOutcome::GameOver;
        }

        StepOutcome::Continue
    }

    fn render(&mut self) -> Result<(), GameError> {
        self.surface.blit(&self.sprites.background, (0, 0));
        self.snake.render(&mut self.surface, &self.sprites.block);
        self.apple.render(&mut self.surface, &self.sprites.apple);

        let score = SCORE_FONT.render(&format!("Score: {}", self.score()), MAIN_FONT_COLOUR);
        self.surface.blit_text(&score, (0, 0));

        self.surface.flush()
    }

    fn game_over(&mut self) -> Result<(), GameError> {
        let score = self.score();
        info!("Game over, score {}", score);

        self.phase = Phase::GameOver;
        self.mixer.pause_music();

        self.surface.fill(BACKGROUND_COLOUR);
        let lines = [
            GAME_OVER_FONT.render("Game Over", MAIN_FONT_COLOUR),
            FINAL_SCORE_FONT.render(&format!("Your score was {}", score), MAIN_FONT_COLOUR),
            PLAY_AGAIN_FONT.render("Press 'Enter' to play again", SECONDARY_FONT_COLOUR),
        ];
        for (line, y) in lines.iter().zip([300, 400, 450]) {
            self.surface.blit_text(line, (MESSAGE_X, y));
        }
        self.surface.flush()?;

        // Ready for the next round before the player asks for it
        self.snake = Snake::new();
        self.apple.reseat(&mut self.rng);
        Ok(())
    }

    fn restart(&mut self) {
        info!("Restarting");
        self.phase = Phase::Running;
        self.mixer.resume_music();
    }
}
