use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::GameError;
use crate::snake::Direction::{self, *};

/// What the game is asked to do by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind != KeyEventKind::Press {
            return None;
        }

        match ev.code {
            _ if is_ctrl_c(ev) => Some(Command::Quit),
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Right => Some(Command::Turn(Right)),
            KeyCode::Enter => Some(Command::Restart),
            _ => None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Turns raw events into commands, keeping arrival order. Anything that is not
/// a recognised key press is dropped.
pub fn dispatch(events: impl IntoIterator<Item = Event>) -> Vec<Command> {
    events
        .into_iter()
        .filter_map(|ev| match ev {
            Event::Key(key) => Command::from_key_event(&key),
            _ => None,
        })
        .collect()
}

pub trait EventSource {
    /// Every event that arrived since the last call. Never blocks.
    fn drain(&mut self) -> Result<Vec<Event>, GameError>;
}

/// Events from the terminal crossterm is attached to.
pub struct TermEvents;

impl EventSource for TermEvents {
    fn drain(&mut self) -> Result<Vec<Event>, GameError> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            events.push(read()?);
        }

        Ok(events)
    }
}
