use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// An image or sound file could not be opened or decoded.
    #[error("cannot load asset {}: {reason}", path.display())]
    AssetMissing { path: PathBuf, reason: String },
    /// The audio output device could not be opened. Recoverable: play on in silence.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
    /// Reading events from or drawing to the terminal failed.
    #[error("terminal error: {0}")]
    Host(#[from] io::Error),
}

impl GameError {
    pub fn asset(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        GameError::AssetMissing { path: path.into(), reason: reason.to_string() }
    }
}
