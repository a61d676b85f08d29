//! Subprocess transport.
//!
//! [`Transport`] is the write half of the boundary with the engine process:
//! fire-and-forget, order-preserving command delivery. Line delivery back is
//! an `mpsc` receiver handed to the orchestrator at construction, which
//! registers the sole consumer (the line pump).

use std::ffi::OsStr;
use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Capacity of the engine-output line channel. A deep search can emit
/// thousands of `info` lines; backpressure here just slows the reader.
const LINE_CHANNEL_CAPACITY: usize = 256;

/// Order-preserving command writer for an engine process.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Write one command line to the engine.
    async fn execute(&self, command: &str) -> io::Result<()>;
}

/// Transport backed by a spawned engine subprocess with piped stdio.
///
/// The child is owned for the transport's lifetime but never killed by it:
/// teardown is the orchestrator's explicit `quit`. Dropping the transport
/// without that leaves the subprocess running.
pub struct ProcessTransport {
    stdin: tokio::sync::Mutex<ChildStdin>,
    _child: Child,
}

impl ProcessTransport {
    /// Spawn the engine binary at `path` and return the transport plus the
    /// stream of its output lines.
    ///
    /// Must be called within a tokio runtime: the stdout reader runs as a
    /// spawned task.
    pub fn spawn(path: impl AsRef<OsStr>) -> io::Result<(Self, mpsc::Receiver<String>)> {
        let mut child = Command::new(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        debug!(path = %path.as_ref().to_string_lossy(), "spawned engine process");

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("engine stdin not captured"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("engine stdout not captured"))?;

        let (tx, rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
        let _ = tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        trace!(line, "engine output");
                        if tx.send(line).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        debug!(error = %err, "engine stdout read failed");
                        break;
                    }
                }
            }
            debug!("engine output stream closed");
        });

        Ok((
            Self {
                stdin: tokio::sync::Mutex::new(stdin),
                _child: child,
            },
            rx,
        ))
    }
}

#[async_trait]
impl Transport for ProcessTransport {
    async fn execute(&self, command: &str) -> io::Result<()> {
        // The async mutex serializes writers, preserving command order.
        let mut stdin = self.stdin.lock().await;
        trace!(command, "engine command");
        stdin.write_all(command.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await
    }
}
