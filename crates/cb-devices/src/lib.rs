//! Devices around the chaos bag: token sounds and the serial trigger.
//!
//! Both are thin collaborators. Sound playback resolves a token id to a
//! file and plays it, on a background worker when driven through a
//! [`PlaybackQueue`]. The serial listener watches a port for a LOW to HIGH
//! transition and forwards a [`serial::Signal`] over a channel, so the bag
//! itself is only touched from one task.

pub mod audio;
pub mod error;
pub mod playback;
pub mod serial;

pub use audio::{CommandPlayer, RodioPlayer, SilentPlayer, SoundLibrary, SoundPlayer};
pub use error::{AudioError, SerialError};
pub use playback::{PlaybackQueue, Played};
pub use serial::{ListenerConfig, Signal, SignalListener};
