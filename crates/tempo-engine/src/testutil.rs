//! Test doubles: a recording transport and a harness that feeds scripted
//! engine output lines.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::engine::Engine;
use crate::transport::Transport;

/// Transport that records every command instead of talking to a process.
#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    commands: Arc<Mutex<Vec<String>>>,
    fail_next: Arc<AtomicBool>,
}

impl RecordingTransport {
    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }

    /// Make the next `execute` fail with a broken-pipe error.
    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, command: &str) -> io::Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "engine gone"));
        }
        self.commands.lock().push(command.to_string());
        Ok(())
    }
}

/// An engine wired to a recording transport and a scripted line feed.
pub(crate) struct Harness {
    pub(crate) engine: Arc<Engine>,
    pub(crate) transport: RecordingTransport,
    lines: mpsc::Sender<String>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let (lines, rx) = mpsc::channel(64);
        let transport = RecordingTransport::default();
        let engine = Arc::new(Engine::with_transport(Arc::new(transport.clone()), rx));
        Self {
            engine,
            transport,
            lines,
        }
    }

    /// A harness whose engine has completed `start`.
    pub(crate) async fn started() -> Self {
        let h = Self::new();
        let (started, ()) = tokio::join!(h.engine.start(None), async {
            h.wait_for_command("uci").await;
            h.feed("uciok").await;
            h.wait_for_command("isready").await;
            h.feed("readyok").await;
        });
        started.expect("scripted start");
        h
    }

    /// Deliver one engine output line to the pump task.
    pub(crate) async fn feed(&self, line: &str) {
        self.lines.send(line.to_string()).await.expect("pump alive");
    }

    /// Commands recorded so far, in issue order.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.transport.commands()
    }

    /// Yield until the given command has been issued.
    pub(crate) async fn wait_for_command(&self, command: &str) {
        self.wait_for_nth_command(command, 1).await;
    }

    /// Yield until the given command has been issued at least `n` times.
    pub(crate) async fn wait_for_nth_command(&self, command: &str, n: usize) {
        while self
            .transport
            .commands()
            .iter()
            .filter(|c| *c == command)
            .count()
            < n
        {
            tokio::task::yield_now().await;
        }
    }

    /// Yield a few times so the pump task drains everything fed so far.
    pub(crate) async fn settle(&self) {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }
}
