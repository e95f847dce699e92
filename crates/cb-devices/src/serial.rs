//! Serial trigger listener.
//!
//! A microcontroller on a serial line prints `1` while its button (or
//! sensor) is HIGH and `0` otherwise. The listener reads the port, detects
//! each LOW to HIGH transition, and sends one [`Signal`] per accepted
//! transition over an mpsc channel. After a signal it ignores further
//! transitions until the debounce window has elapsed, giving the draw and
//! its sound time to settle.
//!
//! The line is expected to be configured already (baud rate, raw mode),
//! e.g. by `stty -F /dev/ttyUSB0 9600 raw`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::error::SerialError;

/// Default debounce window after an accepted trigger.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(3);

/// Default read buffer size in bytes.
pub const READ_BUFFER_SIZE: usize = 64;

/// Device name prefixes under `/dev` that look like USB serial adapters.
const PORT_PREFIXES: &[&str] = &["ttyUSB", "ttyACM", "cu.usbmodem", "cu.usbserial"];

/// An accepted trigger from the serial line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal;

/// Where and how to listen.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Serial device path.
    pub port: PathBuf,
    /// Quiet period after each accepted trigger.
    pub debounce: Duration,
    /// Bytes read per poll.
    pub buffer_size: usize,
}

impl ListenerConfig {
    /// Listen on `port` with the default debounce window.
    pub fn new(port: impl Into<PathBuf>) -> Self {
        Self {
            port: port.into(),
            debounce: DEFAULT_DEBOUNCE,
            buffer_size: READ_BUFFER_SIZE,
        }
    }

    /// Set the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// A running listener task. Dropping it cancels the task.
#[derive(Debug)]
pub struct SignalListener {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SignalListener {
    /// Open the configured port and start listening.
    pub async fn open(
        config: &ListenerConfig,
    ) -> Result<(Self, mpsc::Receiver<Signal>), SerialError> {
        let port = open_port(&config.port)
            .await
            .map_err(|source| SerialError::Open {
                port: config.port.clone(),
                source,
            })?;
        info!(port = %config.port.display(), debounce = ?config.debounce, "listening for serial triggers");
        Ok(Self::spawn(port, config.debounce, config.buffer_size))
    }

    /// Start listening on any byte stream.
    pub fn spawn<R>(
        reader: R,
        debounce: Duration,
        buffer_size: usize,
    ) -> (Self, mpsc::Receiver<Signal>)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (signals, receiver) = mpsc::channel(8);
        let (shutdown, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(watch(reader, signals, shutdown_rx, debounce, buffer_size));
        let listener = Self {
            shutdown: Some(shutdown),
            task: Some(task),
        };
        (listener, receiver)
    }

    /// Returns true while the listener task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop listening and wait for the task to finish.
    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        debug!("serial listener stopped");
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

type PortReader = Box<dyn AsyncRead + Unpin + Send>;

/// Open a device node for reading.
///
/// Character devices and FIFOs are opened non-blocking and registered with
/// the reactor, so a quiet line never pins a blocking thread and shutdown
/// can always interrupt the read. Regular files (recorded captures) are
/// read through `tokio::fs`.
#[cfg(unix)]
async fn open_port(path: &Path) -> std::io::Result<PortReader> {
    let metadata = tokio::fs::metadata(path).await?;
    if metadata.is_file() {
        return Ok(Box::new(tokio::fs::File::open(path).await?));
    }
    let receiver = tokio::net::unix::pipe::OpenOptions::new()
        .unchecked(true)
        .open_receiver(path)?;
    Ok(Box::new(receiver))
}

#[cfg(not(unix))]
async fn open_port(path: &Path) -> std::io::Result<PortReader> {
    Ok(Box::new(tokio::fs::File::open(path).await?))
}

async fn watch<R>(
    mut reader: R,
    signals: mpsc::Sender<Signal>,
    mut shutdown: oneshot::Receiver<()>,
    debounce: Duration,
    buffer_size: usize,
) where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; buffer_size.max(1)];
    let mut last_high = false;
    let mut settling = false;
    let cooldown = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(cooldown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            () = &mut cooldown, if settling => {
                settling = false;
                debug!("debounce window elapsed");
            }
            read = reader.read(&mut buf) => match read {
                Ok(0) => {
                    info!("serial stream closed");
                    break;
                }
                Ok(n) => {
                    let high = buf[..n].contains(&b'1');
                    trace!(bytes = n, high, "serial data");
                    if high && !last_high && !settling {
                        info!("trigger signal detected");
                        if signals.send(Signal).await.is_err() {
                            debug!("signal receiver dropped");
                            break;
                        }
                        cooldown.as_mut().reset(Instant::now() + debounce);
                        settling = true;
                    }
                    last_high = high;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!(error = %e, "serial read failed");
                    break;
                }
            },
        }
    }
}

/// USB serial devices present on this machine.
pub fn available_ports() -> Result<Vec<PathBuf>, SerialError> {
    ports_in(Path::new("/dev"))
}

fn ports_in(dir: &Path) -> Result<Vec<PathBuf>, SerialError> {
    let mut ports: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(SerialError::Enumerate)?
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            PORT_PREFIXES.iter().any(|p| name.starts_with(p))
        })
        .map(|e| e.path())
        .collect();
    ports.sort();
    Ok(ports)
}
