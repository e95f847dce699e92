//! Interactive session: typed commands plus optional serial triggers.
//!
//! The session is only touched from the loop in [`repl`]. Typed lines come
//! from a dedicated stdin thread, triggers from the serial listener task, and
//! finished sounds from the playback worker; all arrive over channels.
//! Serial triggers are ignored while a drawn token's sound is still playing.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use cb_core::{BagSession, Response};
use cb_devices::{
    CommandPlayer, ListenerConfig, PlaybackQueue, Played, RodioPlayer, Signal, SignalListener,
    SilentPlayer, SoundLibrary, SoundPlayer,
};

use super::BagArgs;

pub struct PlayOptions {
    pub sounds: Option<PathBuf>,
    pub player: Option<String>,
    pub mute: bool,
    pub listen: Option<PathBuf>,
    pub debounce: f64,
}

pub fn run(args: &BagArgs, options: PlayOptions) -> Result<(), String> {
    let bag = super::build_bag(args)?;
    let session = BagSession::new(bag);
    let player = build_player(&options)?;

    let listen = match &options.listen {
        Some(port) => {
            let debounce = Duration::try_from_secs_f64(options.debounce)
                .map_err(|_| format!("invalid debounce: {}", options.debounce))?;
            Some(ListenerConfig::new(port).with_debounce(debounce))
        }
        None => None,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    let result = runtime.block_on(repl(session, player, listen));
    // Leftover blocking reads must not hold up exit.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

fn build_player(options: &PlayOptions) -> Result<Box<dyn SoundPlayer>, String> {
    if options.mute {
        return Ok(Box::new(SilentPlayer::new()));
    }
    let library = match &options.sounds {
        Some(dir) => SoundLibrary::new(dir),
        None => SoundLibrary::beside_executable(),
    };
    match &options.player {
        Some(command_line) => CommandPlayer::new(library, command_line)
            .map(|p| Box::new(p) as Box<dyn SoundPlayer>)
            .ok_or_else(|| "empty --player command".to_string()),
        None => Ok(Box::new(RodioPlayer::new(library))),
    }
}

async fn repl(
    mut session: BagSession,
    player: Box<dyn SoundPlayer>,
    listen: Option<ListenerConfig>,
) -> Result<(), String> {
    let (mut listener, mut signals) = match &listen {
        Some(config) => {
            let (listener, signals) = SignalListener::open(config)
                .await
                .map_err(|e| e.to_string())?;
            (Some(listener), Some(signals))
        }
        None => (None, None),
    };
    let mut lines = spawn_stdin_reader();
    let mut playback = PlaybackQueue::spawn(player);

    println!("  {} Chaos Bag Session", "Starting".bold());
    println!(
        "  Scenario: {} | Difficulty: {}",
        session.bag().scenario_name(),
        session.bag().difficulty_name()
    );
    if let Some(config) = &listen {
        println!("  Listening on {}", config.port.display());
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    loop {
        prompt()?;

        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                match session.process(&line) {
                    Ok(response) => {
                        show(&response, &mut playback);
                        if response.quit {
                            break;
                        }
                    }
                    Err(e) => println!("{}\n", e.to_string().yellow()),
                }
            }
            signal = next_signal(&mut signals) => match signal {
                Some(Signal) if playback.is_busy() => {
                    info!(pending = playback.pending(), "ignoring serial trigger while a sound plays");
                    println!("{}\n", "(serial trigger ignored: sound still playing)".dimmed());
                }
                Some(Signal) => {
                    info!("drawing on serial trigger");
                    println!("{}", "(serial trigger)".dimmed());
                    let response = session.draw();
                    show(&response, &mut playback);
                }
                None => {
                    warn!("serial listener ended");
                    println!("{}\n", "Serial listener stopped.".yellow());
                    signals = None;
                }
            },
            Some(played) = playback.finished() => report(&played),
        }
    }

    if let Some(listener) = listener.as_mut() {
        listener.stop().await;
    }
    for played in playback.close().await {
        report(&played);
    }
    Ok(())
}

fn show(response: &Response, playback: &mut PlaybackQueue) {
    if !response.text.is_empty() {
        println!("{}\n", response.text);
    }
    if let Some(token) = &response.drawn {
        playback.enqueue(token.as_str());
    }
}

fn report(played: &Played) {
    if let Err(e) = &played.result {
        println!("{}\n", format!("sound: {e}").yellow());
    }
}

fn prompt() -> Result<(), String> {
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())
}

async fn next_signal(signals: &mut Option<mpsc::Receiver<Signal>>) -> Option<Signal> {
    match signals {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Read stdin lines on a plain thread; the channel closes on EOF.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
