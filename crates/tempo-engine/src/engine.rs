//! The engine orchestrator.
//!
//! Owns exactly one [`Transport`] and one [`EventBus`] for its lifetime and
//! turns the unordered event stream into request/response-shaped operations.
//! Each composite operation registers its subscribers *before* writing any
//! command, so no event can be lost to the reader task, then awaits its
//! terminal event as a one-shot completion.
//!
//! There is no timeout anywhere in this layer: an engine that never answers
//! means an operation that never completes. Callers who need deadlines wrap
//! operations in `tokio::time::timeout`.

use std::ffi::OsStr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument, warn};

use tempo_core::analysis::{Analysis, BestMove, SearchResult};
use tempo_core::errors::EngineError;
use tempo_core::events::{EngineEvent, EventKind};
use tempo_core::options::EngineOption;
use tempo_core::search::{EngineConfig, GoConfig, Position};

use crate::bus::{EventBus, Subscription};
use crate::lifecycle::Lifecycle;
use crate::transport::{ProcessTransport, Transport};

/// Handle to one engine subprocess.
///
/// Teardown is explicit: [`Engine::stop`] sends `quit`. Dropping the handle
/// without stopping leaks the subprocess; there is no implicit
/// finalization.
pub struct Engine {
    transport: Arc<dyn Transport>,
    bus: EventBus,
    state: Mutex<State>,
    options: Mutex<Vec<EngineOption>>,
    /// Outcome of the current startup attempt; late `start` callers wait on
    /// it instead of re-issuing the startup sequence.
    started_tx: watch::Sender<StartSignal>,
}

struct State {
    lifecycle: Lifecycle,
    /// A `start` call is driving the startup sequence.
    start_pending: bool,
}

/// Outcome of a startup attempt, as observed by `start` callers that joined
/// it instead of driving it. Always updated under the state lock so joined
/// callers cannot observe a signal from a different attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StartSignal {
    /// An attempt is in flight (or none has begun).
    Pending,
    /// The most recent attempt completed; the handle is started.
    Started,
    /// The most recent attempt failed and was rolled back.
    Failed,
}

impl Engine {
    /// Spawn the engine binary at `path` and attach a handle to it.
    pub fn spawn(path: impl AsRef<OsStr>) -> Result<Self, EngineError> {
        let (transport, lines) = ProcessTransport::spawn(path).map_err(EngineError::Spawn)?;
        Ok(Self::with_transport(Arc::new(transport), lines))
    }

    /// Attach a handle to an existing transport and output-line stream.
    ///
    /// This is the seam for tests and custom transports. The handle becomes
    /// the sole consumer of `lines`: a pump task decodes each line and
    /// dispatches the resulting event on the handle's bus.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        mut lines: mpsc::Receiver<String>,
    ) -> Self {
        let bus = EventBus::new();
        let pump = bus.clone();
        let _ = tokio::spawn(async move {
            while let Some(line) = lines.recv().await {
                if let Some(event) = tempo_protocol::decode(&line) {
                    pump.dispatch(&event);
                }
            }
            debug!("engine line stream ended");
        });
        let (started_tx, _) = watch::channel(StartSignal::Pending);
        Self {
            transport,
            bus,
            state: Mutex::new(State {
                lifecycle: Lifecycle::Uninitialized,
                start_pending: false,
            }),
            options: Mutex::new(Vec::new()),
            started_tx,
        }
    }

    /// The options discovered by the most recent completed discovery.
    ///
    /// Empty until a discovery's terminal `uciok` has fired.
    #[must_use]
    pub fn options(&self) -> Vec<EngineOption> {
        self.options.lock().clone()
    }

    /// Register a persistent subscriber for raw events of `kind`, e.g. to
    /// stream evaluation updates during a long search.
    pub fn on(
        &self,
        kind: EventKind,
        callback: impl FnMut(&EngineEvent) + Send + 'static,
    ) -> Subscription {
        self.bus.subscribe(kind, callback)
    }

    /// Register a one-shot subscriber for raw events of `kind`.
    pub fn once(&self, kind: EventKind, callback: impl FnOnce(&EngineEvent) + Send + 'static) {
        self.bus.subscribe_once(kind, callback)
    }

    /// Run capability discovery: send `uci` and accumulate `option` events
    /// until the terminal `uciok`.
    ///
    /// The handle's option list is cleared at entry and fully replaced on
    /// completion. Re-invoking while a discovery is in flight restarts
    /// accumulation; each call returns its own complete list.
    #[instrument(skip(self))]
    pub async fn discover_options(&self) -> Result<Vec<EngineOption>, EngineError> {
        let entered = {
            let mut state = self.state.lock();
            if state.lifecycle == Lifecycle::Uninitialized {
                state.lifecycle = Lifecycle::DiscoveringOptions;
                true
            } else {
                false
            }
        };
        let result = self.run_discovery().await;
        if entered {
            // Discovery alone does not make the handle ready; only `start`
            // drives the lifecycle forward from here.
            let mut state = self.state.lock();
            if state.lifecycle == Lifecycle::DiscoveringOptions && !state.start_pending {
                state.lifecycle = Lifecycle::Uninitialized;
            }
        }
        result
    }

    async fn run_discovery(&self) -> Result<Vec<EngineOption>, EngineError> {
        self.options.lock().clear();

        let collected: Arc<Mutex<Vec<EngineOption>>> = Arc::default();
        let sink = Arc::clone(&collected);
        let collector = self.bus.subscribe(EventKind::Option, move |event| {
            if let EngineEvent::Option(option) = event {
                sink.lock().push(option.clone());
            }
        });
        let done = self.wait_for(EventKind::UciOk);

        if let Err(err) = self.execute("uci").await {
            collector.unsubscribe();
            return Err(err);
        }
        let outcome = Self::terminal(done).await;
        collector.unsubscribe();
        let _ = outcome?;

        let discovered = std::mem::take(&mut *collected.lock());
        debug!(count = discovered.len(), "capability discovery complete");
        *self.options.lock() = discovered.clone();
        Ok(discovered)
    }

    /// Start the engine: discover capabilities, apply `config`, and wait for
    /// readiness.
    ///
    /// Idempotent. A handle that is already started returns immediately; a
    /// second call racing an in-flight start waits for the same `readyok`
    /// and completes without re-issuing any command. If the in-flight start
    /// fails, joined callers fail too; the driving caller receives the
    /// underlying error.
    #[instrument(skip_all)]
    pub async fn start(&self, config: Option<&EngineConfig>) -> Result<(), EngineError> {
        let driving = {
            let mut state = self.state.lock();
            if state.lifecycle.is_started() {
                return Ok(());
            }
            if state.start_pending {
                false
            } else {
                state.start_pending = true;
                state.lifecycle = Lifecycle::DiscoveringOptions;
                let _ = self.started_tx.send(StartSignal::Pending);
                true
            }
        };

        if !driving {
            let mut signal = self.started_tx.subscribe();
            let outcome = signal
                .wait_for(|signal| *signal != StartSignal::Pending)
                .await
                .map_err(|_| Self::stream_closed())?;
            return match *outcome {
                StartSignal::Started => Ok(()),
                _ => Err(Self::start_failed()),
            };
        }

        match self.run_start(config).await {
            Ok(()) => {
                let mut state = self.state.lock();
                state.start_pending = false;
                state.lifecycle = Lifecycle::Ready;
                let _ = self.started_tx.send(StartSignal::Started);
                drop(state);
                debug!("engine started");
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock();
                state.start_pending = false;
                state.lifecycle = Lifecycle::Uninitialized;
                let _ = self.started_tx.send(StartSignal::Failed);
                drop(state);
                warn!(error = %err, "engine start failed");
                Err(err)
            }
        }
    }

    async fn run_start(&self, config: Option<&EngineConfig>) -> Result<(), EngineError> {
        let _ = self.run_discovery().await?;

        if let Some(config) = config {
            for command in config.to_commands() {
                self.execute(&command).await?;
            }
        }

        self.state.lock().lifecycle = Lifecycle::AwaitingReady;
        let ready = self.wait_for(EventKind::Ready);
        self.execute("isready").await?;
        let _ = Self::terminal(ready).await?;
        Ok(())
    }

    /// Run one search: send the position, then the search limits, and wait
    /// for the terminal `bestmove`.
    ///
    /// Precondition: the handle is `Ready`. A search requested before
    /// `start` completes fails with [`EngineError::NotStarted`]; one
    /// requested while another is in flight fails with
    /// [`EngineError::Busy`].
    #[instrument(skip_all)]
    pub async fn go(
        &self,
        position: &Position,
        config: &GoConfig,
    ) -> Result<BestMove, EngineError> {
        self.state.lock().lifecycle.begin_search()?;

        let done = self.wait_for(EventKind::BestMove);
        let result = async {
            // Position setup must precede the search command.
            self.execute(&position.to_command()).await?;
            self.execute(&config.to_command()).await?;
            match Self::terminal(done).await? {
                EngineEvent::BestMove(best_move) => Ok(best_move),
                _ => Err(Self::stream_closed()),
            }
        }
        .await;

        self.state.lock().lifecycle.finish_search();
        result
    }

    /// Run a search and synthesize a [`SearchResult`] from the last
    /// evaluation snapshot observed before the terminal bestmove
    /// (latest-wins). Tears the engine down with [`Engine::stop`] once the
    /// bestmove arrives.
    ///
    /// Fails with [`EngineError::NoEvaluation`] when the engine produced a
    /// bestmove without a single evaluation snapshot.
    #[instrument(skip_all)]
    pub async fn analyze_position(
        &self,
        position: &Position,
        config: &GoConfig,
    ) -> Result<SearchResult, EngineError> {
        let latest: Arc<Mutex<Option<Analysis>>> = Arc::default();
        let sink = Arc::clone(&latest);
        let collector = self.bus.subscribe(EventKind::Evaluation, move |event| {
            if let EngineEvent::Evaluation(analysis) = event {
                *sink.lock() = Some(analysis.clone());
            }
        });

        let outcome = self.go(position, config).await;
        collector.unsubscribe();
        let best_move = outcome?;

        self.stop().await?;

        let analysis = latest.lock().take().ok_or(EngineError::NoEvaluation)?;
        Ok(SearchResult {
            position: position.clone(),
            config: config.clone(),
            analysis,
            best_move,
        })
    }

    /// Terminate the engine process by sending `quit`.
    ///
    /// The only teardown path; already-registered one-shot subscribers are
    /// not retracted.
    pub async fn stop(&self) -> Result<(), EngineError> {
        self.execute("quit").await
    }

    /// Register a one-shot waiter for `kind` and return its completion.
    fn wait_for(&self, kind: EventKind) -> oneshot::Receiver<EngineEvent> {
        let (tx, rx) = oneshot::channel();
        self.bus.subscribe_once(kind, move |event| {
            let _ = tx.send(event.clone());
        });
        rx
    }

    async fn terminal(rx: oneshot::Receiver<EngineEvent>) -> Result<EngineEvent, EngineError> {
        rx.await.map_err(|_| Self::stream_closed())
    }

    async fn execute(&self, command: &str) -> Result<(), EngineError> {
        self.transport
            .execute(command)
            .await
            .map_err(EngineError::Transport)
    }

    /// Only reachable if the bus disappears under a pending waiter, which
    /// cannot happen while the handle is borrowed by the operation.
    fn stream_closed() -> EngineError {
        EngineError::Transport(std::io::Error::other("engine event stream closed"))
    }

    /// Error for a `start` caller that joined a failing attempt. The
    /// underlying error went to the driving caller; every startup failure
    /// is a transport failure in this layer.
    fn start_failed() -> EngineError {
        EngineError::Transport(std::io::Error::other("engine start attempt failed"))
    }
}
