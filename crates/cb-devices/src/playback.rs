//! Background playback of token sounds.
//!
//! A [`PlaybackQueue`] owns a [`SoundPlayer`] on a blocking worker. Tokens
//! are queued without waiting, and each finished sound comes back as a
//! [`Played`] report, so a session loop keeps reading input while audio
//! plays and knows when playback has settled.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::audio::SoundPlayer;
use crate::error::AudioError;

/// Outcome of one queued sound.
#[derive(Debug)]
pub struct Played {
    /// Token whose sound was played.
    pub token: String,
    /// Whether playback succeeded.
    pub result: Result<(), AudioError>,
}

/// Plays queued token sounds one after another on a blocking worker.
#[derive(Debug)]
pub struct PlaybackQueue {
    tokens: Option<mpsc::UnboundedSender<String>>,
    finished: mpsc::UnboundedReceiver<Played>,
    pending: usize,
    worker: Option<JoinHandle<()>>,
}

impl PlaybackQueue {
    /// Start a worker around `player`. Must be called inside a tokio runtime.
    pub fn spawn(mut player: Box<dyn SoundPlayer>) -> Self {
        let (tokens, mut queued) = mpsc::unbounded_channel::<String>();
        let (done, finished) = mpsc::unbounded_channel();

        let worker = tokio::task::spawn_blocking(move || {
            while let Some(token) = queued.blocking_recv() {
                let result = player.play(&token);
                if done.send(Played { token, result }).is_err() {
                    break;
                }
            }
            debug!("playback worker finished");
        });

        Self {
            tokens: Some(tokens),
            finished,
            pending: 0,
            worker: Some(worker),
        }
    }

    /// Queue the sound for `token`.
    pub fn enqueue(&mut self, token: impl Into<String>) {
        let Some(tokens) = &self.tokens else {
            return;
        };
        if tokens.send(token.into()).is_ok() {
            self.pending += 1;
        }
    }

    /// Returns true while any queued sound has not finished.
    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    /// Sounds queued but not yet reported.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Wait for the next finished sound. `None` once the worker has stopped.
    pub async fn finished(&mut self) -> Option<Played> {
        let played = self.finished.recv().await?;
        self.pending = self.pending.saturating_sub(1);
        Some(played)
    }

    /// Stop accepting tokens, let the queued sounds play out, and return
    /// their reports.
    pub async fn close(mut self) -> Vec<Played> {
        self.tokens = None;
        let mut rest = Vec::new();
        while let Some(played) = self.finished().await {
            rest.push(played);
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
        rest
    }
}
