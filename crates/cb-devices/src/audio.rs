//! Token sound playback.
//!
//! A token id maps to `<sounds dir>/<token>.<ext>` through a [`SoundLibrary`].
//! [`RodioPlayer`] decodes and plays the file on the default output device;
//! [`CommandPlayer`] hands it to an external program instead. Both block
//! until the sound has finished.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::error::AudioError;

/// Default sound file extension.
pub const DEFAULT_EXTENSION: &str = "mp3";

/// Something that can play the sound for a drawn token.
pub trait SoundPlayer: Send {
    /// Play the sound for `token`, blocking until it finishes.
    fn play(&mut self, token: &str) -> Result<(), AudioError>;

    /// Message of the most recent failure, if any.
    fn last_error(&self) -> Option<&str>;
}

/// Where token sounds live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundLibrary {
    dir: PathBuf,
    extension: String,
}

impl SoundLibrary {
    /// `.mp3` files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// The `resources` directory next to the executable.
    pub fn beside_executable() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("resources")))
            .unwrap_or_else(|| PathBuf::from("resources"));
        Self::new(dir)
    }

    /// Use a different file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Directory sounds are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that would be played for `token`.
    pub fn sound_path(&self, token: &str) -> PathBuf {
        self.dir.join(format!("{token}.{}", self.extension))
    }

    /// The existing sound file for `token`.
    pub fn resolve(&self, token: &str) -> Result<PathBuf, AudioError> {
        if token.trim().is_empty() {
            return Err(AudioError::EmptyToken);
        }
        let path = self.sound_path(token);
        if !path.is_file() {
            return Err(AudioError::MissingSound(path));
        }
        Ok(path)
    }
}

/// Decodes token sounds and plays them on the default output device.
#[derive(Debug, Clone)]
pub struct RodioPlayer {
    library: SoundLibrary,
    last_error: Option<String>,
}

impl RodioPlayer {
    /// Play sounds from `library`.
    pub fn new(library: SoundLibrary) -> Self {
        Self {
            library,
            last_error: None,
        }
    }

    /// The sound library in use.
    pub fn library(&self) -> &SoundLibrary {
        &self.library
    }

    fn run(&self, token: &str) -> Result<(), AudioError> {
        let path = self.library.resolve(token)?;
        let file = File::open(&path).map_err(|source| AudioError::Open {
            path: path.clone(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|source| AudioError::Decode { path: path.clone(), source })?;

        // The stream must outlive the sink.
        let (_stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        debug!(path = %path.display(), "playing token sound");
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&mut self, token: &str) -> Result<(), AudioError> {
        let result = self.run(token);
        if let Err(e) = &result {
            warn!(token, error = %e, "failed to play token sound");
            self.last_error = Some(e.to_string());
        }
        result
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Plays token sounds by running an external program, e.g. `mpv --no-video`.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    library: SoundLibrary,
    program: String,
    args: Vec<String>,
    last_error: Option<String>,
}

impl CommandPlayer {
    /// Run `command_line` with the sound path appended as the last argument.
    ///
    /// Returns `None` for a blank command line.
    pub fn new(library: SoundLibrary, command_line: &str) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            library,
            program,
            args: words.collect(),
            last_error: None,
        })
    }

    fn run(&self, token: &str) -> Result<(), AudioError> {
        let path = self.library.resolve(token)?;

        debug!(program = %self.program, path = %path.display(), "playing token sound");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AudioError::Exit {
                program: self.program.clone(),
                status,
            })
        }
    }
}

impl SoundPlayer for CommandPlayer {
    fn play(&mut self, token: &str) -> Result<(), AudioError> {
        let result = self.run(token);
        if let Err(e) = &result {
            warn!(token, program = %self.program, error = %e, "failed to play token sound");
            self.last_error = Some(e.to_string());
        }
        result
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// A player that plays nothing and remembers what it was asked to play.
#[derive(Debug, Clone, Default)]
pub struct SilentPlayer {
    played: Vec<String>,
}

impl SilentPlayer {
    /// Create a silent player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens passed to [`SoundPlayer::play`], in order.
    pub fn played(&self) -> &[String] {
        &self.played
    }
}

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, token: &str) -> Result<(), AudioError> {
        self.played.push(token.to_string());
        Ok(())
    }

    fn last_error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_path_uses_extension() {
        let library = SoundLibrary::new("/sounds");
        assert_eq!(library.sound_path("skull"), PathBuf::from("/sounds/skull.mp3"));
        let library = library.with_extension("wav");
        assert_eq!(library.sound_path("+1"), PathBuf::from("/sounds/+1.wav"));
    }

    #[test]
    fn resolve_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skull.mp3"), b"").unwrap();
        let library = SoundLibrary::new(dir.path());
        assert_eq!(library.resolve("skull").unwrap(), dir.path().join("skull.mp3"));
        assert!(matches!(library.resolve("tablet"), Err(AudioError::MissingSound(_))));
        assert!(matches!(library.resolve(" "), Err(AudioError::EmptyToken)));
    }

    #[test]
    fn rodio_missing_sound_sets_last_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = RodioPlayer::new(SoundLibrary::new(dir.path()));
        assert!(player.last_error().is_none());
        let err = player.play("skull").unwrap_err();
        assert!(matches!(err, AudioError::MissingSound(_)));
        assert!(player.last_error().unwrap().contains("skull.mp3"));
    }

    #[test]
    fn rodio_rejects_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skull.mp3"), b"not audio at all").unwrap();
        let mut player = RodioPlayer::new(SoundLibrary::new(dir.path()));
        assert!(matches!(player.play("skull"), Err(AudioError::Decode { .. })));
        assert!(player.last_error().unwrap().contains("decode"));
    }

    #[test]
    fn command_line_parsing() {
        let player = CommandPlayer::new(SoundLibrary::new("/sounds"), "mpv --no-video").unwrap();
        assert_eq!(player.program, "mpv");
        assert_eq!(player.args, vec!["--no-video".to_string()]);
        assert!(CommandPlayer::new(SoundLibrary::new("/sounds"), "   ").is_none());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skull.mp3"), b"").unwrap();
        let mut player =
            CommandPlayer::new(SoundLibrary::new(dir.path()), "definitely-not-a-player-binary")
                .unwrap();
        assert!(matches!(player.play("skull"), Err(AudioError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn runs_external_program() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skull.mp3"), b"").unwrap();
        let mut ok = CommandPlayer::new(SoundLibrary::new(dir.path()), "true").unwrap();
        ok.play("skull").unwrap();
        let mut failing = CommandPlayer::new(SoundLibrary::new(dir.path()), "false").unwrap();
        assert!(matches!(failing.play("skull"), Err(AudioError::Exit { .. })));
        assert!(failing.last_error().is_some());
    }

    #[test]
    fn silent_player_records() {
        let mut player = SilentPlayer::new();
        player.play("skull").unwrap();
        player.play("-1").unwrap();
        assert_eq!(player.played(), ["skull".to_string(), "-1".to_string()]);
        assert!(player.last_error().is_none());
    }
}
