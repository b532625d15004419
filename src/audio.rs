//! Sound cues.
//!
//! The game fires three cues and never waits on them. Backends report
//! failures through `PlaybackError`; the session logs and drops them.

use std::fmt;
use thiserror::Error;

/// Named sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    GameOver,
    SpeedBoost,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Jump, Cue::GameOver, Cue::SpeedBoost];

    /// Asset file name for this cue.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Jump => "jump.mp3",
            Self::GameOver => "game_over.mp3",
            Self::SpeedBoost => "boost.mp3",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jump => "jump",
            Self::GameOver => "game over",
            Self::SpeedBoost => "speed boost",
        };
        f.write_str(name)
    }
}

/// Why a cue did not play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("output rejected the {cue} cue: {reason}")]
    Rejected { cue: Cue, reason: String },
    #[error("could not decode the {cue} cue: {reason}")]
    Decode { cue: Cue, reason: String },
}

/// Something that can play a cue from the start.
pub trait CuePlayer {
    fn play_cue(&mut self, cue: Cue) -> Result<(), PlaybackError>;
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play_cue(&mut self, cue: Cue) -> Result<(), PlaybackError> {
        (**self).play_cue(cue)
    }
}

/// Plays nothing. Used when muted or when no output device exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play_cue(&mut self, cue: Cue) -> Result<(), PlaybackError> {
        log::trace!("cue {} (silent)", cue);
        Ok(())
    }
}

/// Records every cue it is asked to play. Optionally fails every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingCuePlayer {
    pub played: Vec<Cue>,
    pub reject_all: bool,
}

impl RecordingCuePlayer {
    pub fn rejecting() -> Self {
        Self {
            played: Vec::new(),
            reject_all: true,
        }
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|&&c| c == cue).count()
    }
}

impl CuePlayer for RecordingCuePlayer {
    fn play_cue(&mut self, cue: Cue) -> Result<(), PlaybackError> {
        self.played.push(cue);
        if self.reject_all {
            return Err(PlaybackError::Rejected {
                cue,
                reason: "playback blocked".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(feature = "audio")]
pub use self::rodio_backend::RodioCuePlayer;

#[cfg(feature = "audio")]
mod rodio_backend {
    use super::{Cue, CuePlayer, PlaybackError};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::collections::HashMap;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    /// Plays cue files from an asset directory through the default output.
    ///
    /// Files are read once up front. A cue whose file failed to load plays
    /// nothing and logs a warning instead.
    pub struct RodioCuePlayer {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        clips: HashMap<Cue, Arc<[u8]>>,
    }

    impl RodioCuePlayer {
        pub fn new(asset_dir: &Path) -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;

            let mut clips = HashMap::new();
            for cue in Cue::ALL {
                let path = asset_dir.join(cue.file_name());
                match fs::read(&path) {
                    Ok(bytes) => {
                        clips.insert(cue, Arc::from(bytes));
                    }
                    Err(e) => log::warn!("Failed to load audio {}: {}", path.display(), e),
                }
            }

            Ok(Self {
                _stream: stream,
                handle,
                clips,
            })
        }
    }

    impl CuePlayer for RodioCuePlayer {
        fn play_cue(&mut self, cue: Cue) -> Result<(), PlaybackError> {
            let Some(bytes) = self.clips.get(&cue) else {
                log::warn!("Sound file not available: {}", cue.file_name());
                return Ok(());
            };

            let source =
                Decoder::new(Cursor::new(Arc::clone(bytes))).map_err(|e| PlaybackError::Decode {
                    cue,
                    reason: e.to_string(),
                })?;
            let sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Rejected {
                cue,
                reason: e.to_string(),
            })?;
            sink.append(source);
            sink.detach();
            Ok(())
        }
    }
}
