//! Error types for the device collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from sound playback.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The token name was empty.
    #[error("invalid token name")]
    EmptyToken,

    /// No sound file exists for the token.
    #[error("no sound file at {0}")]
    MissingSound(PathBuf),

    /// The sound file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Sound file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The sound file is not in a format the decoder understands.
    #[error("failed to decode {path}: {source}")]
    Decode {
        /// Sound file path.
        path: PathBuf,
        /// Decoder failure.
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// No audio output device could be opened.
    #[error("no audio output: {0}")]
    Stream(#[from] rodio::StreamError),

    /// The output device refused a new sink.
    #[error("audio sink failed: {0}")]
    Sink(#[from] rodio::PlayError),

    /// The player program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that was run.
        program: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The player program exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    Exit {
        /// Program that was run.
        program: String,
        /// Its exit status.
        status: std::process::ExitStatus,
    },
}

/// Errors from the serial signal listener.
#[derive(Debug, Error)]
pub enum SerialError {
    /// The port could not be opened.
    #[error("failed to open serial port {port}: {source}")]
    Open {
        /// Port path.
        port: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Ports could not be enumerated.
    #[error("failed to list serial ports: {0}")]
    Enumerate(#[source] std::io::Error),
}
