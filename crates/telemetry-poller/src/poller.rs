//! Periodic fetch of session and players into a shared view state.
//!
//! Every cycle fans out to both endpoints and fans back in before anything is
//! applied. All state mutations and callbacks run under a single re-entrant
//! gate, and `stop()` flips its flag under that same gate. Once `stop()` has
//! returned no callback fires and the view state is frozen.

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use racedash_telemetry_config::{ClientSettings, FailurePolicy, ScheduleMode};
use racedash_telemetry_core::{Player, Session, TelemetryViewState};
use std::cell::Cell;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::TelemetryApi;
use crate::error::{Endpoint, FetchError, PollError, StartError};

type UpdateCallback = Box<dyn Fn(&TelemetryUpdate) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&PollError) + Send + Sync>;

/// What one applied cycle changed, with the resulting view.
#[derive(Debug, Clone)]
pub struct TelemetryUpdate {
    pub sequence: u64,
    pub session_applied: bool,
    pub players_applied: bool,
    pub view: TelemetryViewState,
}

impl TelemetryUpdate {
    pub fn session(&self) -> Option<&Session> {
        self.view.session()
    }

    pub fn players(&self) -> &[Player] {
        self.view.players()
    }

    pub fn focal_player(&self) -> Option<&Player> {
        self.view.focal_player()
    }
}

/// Poller counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerStats {
    pub cycles_started: u64,
    /// Cycles that changed the view state.
    pub cycles_applied: u64,
    /// Cycles reported through `on_error`.
    pub cycles_failed: u64,
    /// Payloads dropped because a newer cycle was already applied. Errors from
    /// such cycles are still reported and counted as failed.
    pub cycles_discarded: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct GateState {
    stopped: bool,
    last_applied: u64,
}

struct CycleOutcome {
    session: Result<Session, FetchError>,
    players: Result<Vec<Player>, FetchError>,
}

struct Shared {
    gate: ReentrantMutex<Cell<GateState>>,
    view: Arc<RwLock<TelemetryViewState>>,
    policy: FailurePolicy,
    next_sequence: AtomicU64,
    started: AtomicU64,
    applied: AtomicU64,
    failed: AtomicU64,
    discarded: AtomicU64,
    on_update: UpdateCallback,
    on_error: ErrorCallback,
}

impl Shared {
    fn is_stopped(&self) -> bool {
        self.gate.lock().get().stopped
    }

    /// Returns true on the first call.
    fn mark_stopped(&self) -> bool {
        let gate = self.gate.lock();
        let mut state = gate.get();
        if state.stopped {
            return false;
        }
        state.stopped = true;
        gate.set(state);
        true
    }

    fn begin_cycle(&self) -> u64 {
        self.started.fetch_add(1, Ordering::Relaxed);
        self.next_sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn complete(&self, sequence: u64, outcome: CycleOutcome) {
        let gate = self.gate.lock();
        let mut state = gate.get();

        if state.stopped {
            debug!(sequence, "Dropping telemetry cycle finished after stop");
            return;
        }

        let (session, players, error) = split_outcome(self.policy, outcome);
        let has_payload = session.is_some() || players.is_some();

        if sequence <= state.last_applied {
            // errors still reach on_error; only the payload is stale
            if has_payload {
                self.discarded.fetch_add(1, Ordering::Relaxed);
                debug!(
                    sequence,
                    last_applied = state.last_applied,
                    "Discarding stale telemetry cycle"
                );
            }
        } else if has_payload {
            let session_applied = session.is_some();
            let players_applied = players.is_some();
            let view = {
                let mut view = self.view.write();
                if let Some(session) = session {
                    view.apply_session(session);
                }
                if let Some(players) = players {
                    view.apply_players(players, sequence);
                }
                view.clone()
            };
            state.last_applied = sequence;
            gate.set(state);
            self.applied.fetch_add(1, Ordering::Relaxed);

            (self.on_update)(&TelemetryUpdate {
                sequence,
                session_applied,
                players_applied,
                view,
            });
        }

        if let Some(error) = error {
            // on_update may have stopped the poller
            if gate.get().stopped {
                return;
            }
            self.failed.fetch_add(1, Ordering::Relaxed);
            for cause in error.causes() {
                warn!(
                    sequence,
                    endpoint = %cause.endpoint(),
                    error = %cause,
                    "Telemetry fetch failed"
                );
            }
            (self.on_error)(&error);
        }
    }

    fn stats(&self) -> PollerStats {
        PollerStats {
            cycles_started: self.started.load(Ordering::Relaxed),
            cycles_applied: self.applied.load(Ordering::Relaxed),
            cycles_failed: self.failed.load(Ordering::Relaxed),
            cycles_discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

fn split_outcome(
    policy: FailurePolicy,
    outcome: CycleOutcome,
) -> (Option<Session>, Option<Vec<Player>>, Option<PollError>) {
    let CycleOutcome { session, players } = outcome;

    match policy {
        FailurePolicy::Independent => {
            let (session, session_err) = match session {
                Ok(session) => (Some(session), None),
                Err(err) => (None, Some(err)),
            };
            let (players, players_err) = match players {
                Ok(players) => (Some(players), None),
                Err(err) => (None, Some(err)),
            };
            (session, players, PollError::from_parts(session_err, players_err))
        }
        FailurePolicy::AllOrNothing => match (session, players) {
            (Ok(session), Ok(players)) => (Some(session), Some(players), None),
            (session, players) => (
                None,
                None,
                PollError::from_parts(session.err(), players.err()),
            ),
        },
    }
}

async fn bounded<T, F>(endpoint: Endpoint, limit: Duration, request: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(limit, request).await {
        Ok(result) => result,
        Err(_elapsed) => Err(FetchError::Timeout { endpoint }),
    }
}

async fn run_cycle(api: &dyn TelemetryApi, limit: Duration) -> CycleOutcome {
    let (session, players) = tokio::join!(
        bounded(Endpoint::Session, limit, api.fetch_session()),
        bounded(Endpoint::Players, limit, api.fetch_players()),
    );
    CycleOutcome { session, players }
}

struct DriverConfig {
    schedule: ScheduleMode,
    interval: Duration,
    request_timeout: Duration,
}

async fn drive(shared: Arc<Shared>, api: Arc<dyn TelemetryApi>, config: DriverConfig) {
    match config.schedule {
        ScheduleMode::FixedDelay => loop {
            if shared.is_stopped() {
                break;
            }
            let sequence = shared.begin_cycle();
            let outcome = run_cycle(api.as_ref(), config.request_timeout).await;
            shared.complete(sequence, outcome);
            tokio::time::sleep(config.interval).await;
        },
        ScheduleMode::FixedRate => {
            let mut ticker = tokio::time::interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if shared.is_stopped() {
                            break;
                        }
                        let sequence = shared.begin_cycle();
                        let cycle_shared = Arc::clone(&shared);
                        let cycle_api = Arc::clone(&api);
                        let limit = config.request_timeout;
                        in_flight.spawn(async move {
                            let outcome = run_cycle(cycle_api.as_ref(), limit).await;
                            cycle_shared.complete(sequence, outcome);
                        });
                    }
                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                        if let Err(err) = joined
                            && err.is_panic()
                        {
                            warn!(error = %err, "Telemetry cycle panicked");
                        }
                    }
                }
            }
        }
    }
}

/// Entry point for the polling loop.
pub struct TelemetryPoller;

impl TelemetryPoller {
    /// Spawn the polling loop on the current tokio runtime.
    ///
    /// The first cycle starts immediately. Failures never end the loop; they
    /// are logged and handed to `on_error`.
    pub fn start<U, E>(
        api: Arc<dyn TelemetryApi>,
        settings: &ClientSettings,
        on_update: U,
        on_error: E,
    ) -> Result<PollerHandle, StartError>
    where
        U: Fn(&TelemetryUpdate) + Send + Sync + 'static,
        E: Fn(&PollError) + Send + Sync + 'static,
    {
        settings.validate()?;
        let runtime = Handle::try_current()?;

        let shared = Arc::new(Shared {
            gate: ReentrantMutex::new(Cell::new(GateState::default())),
            view: Arc::new(RwLock::new(TelemetryViewState::new())),
            policy: settings.failure_policy,
            next_sequence: AtomicU64::new(0),
            started: AtomicU64::new(0),
            applied: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            on_update: Box::new(on_update),
            on_error: Box::new(on_error),
        });

        let config = DriverConfig {
            schedule: settings.schedule,
            interval: settings.poll_interval(),
            request_timeout: settings.request_timeout(),
        };

        info!(
            api_base = %settings.api_base,
            interval_ms = settings.poll_interval_ms,
            schedule = ?settings.schedule,
            failure_policy = ?settings.failure_policy,
            "Telemetry poller started"
        );
        let driver = runtime.spawn(drive(Arc::clone(&shared), api, config));

        Ok(PollerHandle {
            shared,
            driver: Mutex::new(Some(driver)),
        })
    }

    /// Run a single cycle and return the resulting view.
    ///
    /// Both endpoints must succeed.
    pub async fn poll_once(
        api: &dyn TelemetryApi,
        settings: &ClientSettings,
    ) -> Result<TelemetryViewState, PollError> {
        let outcome = run_cycle(api, settings.request_timeout()).await;

        match (outcome.session, outcome.players) {
            (Ok(session), Ok(players)) => {
                let mut view = TelemetryViewState::new();
                view.apply_session(session);
                view.apply_players(players, 1);
                Ok(view)
            }
            (Err(session), Ok(_)) => Err(PollError::Session(session)),
            (Ok(_), Err(players)) => Err(PollError::Players(players)),
            (Err(session), Err(players)) => Err(PollError::Both { session, players }),
        }
    }
}

/// Control handle for a running poller. Dropping it stops the loop.
pub struct PollerHandle {
    shared: Arc<Shared>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl PollerHandle {
    /// Stop polling and abort in-flight cycles.
    ///
    /// Idempotent, and safe to call from inside a callback.
    pub fn stop(&self) {
        if self.shared.mark_stopped() {
            info!(stats = ?self.shared.stats(), "Telemetry poller stopped");
        }
        if let Some(driver) = self.driver.lock().take() {
            driver.abort();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }

    /// A cloneable handle that can only stop the poller.
    pub fn stop_token(&self) -> StopToken {
        StopToken {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Shared view state; the poller is its only writer.
    pub fn view_state(&self) -> Arc<RwLock<TelemetryViewState>> {
        Arc::clone(&self.shared.view)
    }

    pub fn snapshot(&self) -> TelemetryViewState {
        self.shared.view.read().clone()
    }

    pub fn stats(&self) -> PollerStats {
        self.shared.stats()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Stops the poller from code that does not own the [`PollerHandle`].
///
/// In-flight requests are not aborted; their results are dropped.
#[derive(Clone)]
pub struct StopToken {
    shared: Arc<Shared>,
}

impl StopToken {
    pub fn stop(&self) {
        if self.shared.mark_stopped() {
            info!("Telemetry poller stopped");
        }
    }
}
