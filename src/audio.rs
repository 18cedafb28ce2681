use std::fs::File;

use log::{info, warn};

use crate::error::GameError;

pub const MUSIC: &str = "Resources/Sfx/bg_music_1.mp3";
pub const DING: &str = "Resources/Sfx/ding.mp3";
pub const CRASH: &str = "Resources/Sfx/crash.mp3";

/// One-shot sound effects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Ding,
    Crash,
}

impl Cue {
    pub fn path(self) -> &'static str {
        match self {
            Cue::Ding => DING,
            Cue::Crash => CRASH,
        }
    }
}

/// Playback is fire-and-forget: nothing here waits for a sound to finish.
pub trait Mixer {
    fn play_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn play(&mut self, cue: Cue);
}

impl<M: Mixer + ?Sized> Mixer for Box<M> {
    fn play_music(&mut self) {
        (**self).play_music()
    }

    fn pause_music(&mut self) {
        (**self).pause_music()
    }

    fn resume_music(&mut self) {
        (**self).resume_music()
    }

    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }
}

/// Stands in when there is no audio device.
pub struct Silent;

impl Mixer for Silent {
    fn play_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn play(&mut self, _cue: Cue) {}
}

/// Fails if any sound file is missing, whether or not it will be played.
pub fn check_assets() -> Result<(), GameError> {
    for path in [MUSIC, DING, CRASH] {
        File::open(path).map_err(|e| GameError::asset(path, e))?;
    }
    Ok(())
}

/// The best mixer available. Without an audio device the game carries on
/// silently; a sound file that fails to decode is still fatal.
pub fn open() -> Result<Box<dyn Mixer>, GameError> {
    or_silent(try_open())
}

fn or_silent(opened: Result<Box<dyn Mixer>, GameError>) -> Result<Box<dyn Mixer>, GameError> {
    match opened {
        Err(e @ GameError::AudioUnavailable(_)) => {
            warn!("{}, playing without sound", e);
            Ok(Box::new(Silent))
        }
        other => other,
    }
}

#[cfg(feature = "audio")]
fn try_open() -> Result<Box<dyn Mixer>, GameError> {
    let mixer = rodio_mixer::RodioMixer::new()?;
    info!("Audio output opened");
    Ok(Box::new(mixer))
}

#[cfg(not(feature = "audio"))]
fn try_open() -> Result<Box<dyn Mixer>, GameError> {
    info!("Built without audio support");
    Err(GameError::AudioUnavailable("built without the `audio` feature".into()))
}

#[cfg(feature = "audio")]
mod rodio_mixer {
    use std::fs::File;
    use std::io::BufReader;

    use log::warn;
    use rodio::source::Buffered;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::{Cue, Mixer, CRASH, DING, MUSIC};
    use crate::error::GameError;

    type Clip = Buffered<Decoder<BufReader<File>>>;

    pub struct RodioMixer {
        // Dropping the stream silences everything
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Sink,
        ding: Clip,
        crash: Clip,
    }

    impl RodioMixer {
        pub fn new() -> Result<Self, GameError> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| GameError::AudioUnavailable(e.to_string()))?;
            let music = Sink::try_new(&handle).map_err(|e| GameError::AudioUnavailable(e.to_string()))?;
            music.pause();

            let looped = Decoder::new_looped(open(MUSIC)?).map_err(|e| GameError::asset(MUSIC, e))?;
            music.append(looped);

            Ok(RodioMixer { _stream: stream, handle, music, ding: clip(DING)?, crash: clip(CRASH)? })
        }
    }

    fn open(path: &str) -> Result<BufReader<File>, GameError> {
        let file = File::open(path).map_err(|e| GameError::asset(path, e))?;
        Ok(BufReader::new(file))
    }

    fn clip(path: &str) -> Result<Clip, GameError> {
        let decoder = Decoder::new(open(path)?).map_err(|e| GameError::asset(path, e))?;
        Ok(decoder.buffered())
    }

    impl Mixer for RodioMixer {
        fn play_music(&mut self) {
            self.music.play();
        }

        fn pause_music(&mut self) {
            self.music.pause();
        }

        fn resume_music(&mut self) {
            self.music.play();
        }

        fn play(&mut self, cue: Cue) {
            let clip = match cue {
                Cue::Ding => self.ding.clone(),
                Cue::Crash => self.crash.clone(),
            };

            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(clip);
                    sink.detach();
                }
                Err(e) => warn!("Cannot play {}: {}", cue.path(), e),
            }
        }
    }
}
