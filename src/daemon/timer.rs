//! Timer engine for the eye-rest cycle.
//!
//! This module provides the core timer functionality:
//! - Status transitions (working ↔ rest, pause, cancel)
//! - Countdown with tokio::time::interval
//! - A single owned ticker task, replaced on every transition
//! - Event firing for notifications and the view

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

use crate::types::{Status, TimerSnapshot, TimerState};

/// Cadence of the countdown ticker.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events consumed by the daemon's announce loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Entered the work interval
    WorkStarted {
        /// False when this entry left a pristine cancelled state
        announce: bool,
    },
    /// Entered the rest interval
    RestStarted {
        /// False when this entry left a pristine cancelled state
        announce: bool,
    },
    /// Countdown paused, counters preserved
    Paused,
    /// Timer cancelled and reset
    Cancelled,
    /// One second elapsed on the active countdown
    Tick {
        /// View snapshot after the decrement
        snapshot: TimerSnapshot,
    },
}

// ============================================================================
// Ticker
// ============================================================================

/// A tick message from the active ticker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMsg {
    generation: u64,
}

/// The single periodic ticker, owned by the engine.
///
/// The task is aborted when the handle is stopped or dropped, so a ticker
/// never outlives the transition that replaced it.
struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns a ticker task that sends one tick per elapsed second.
    fn spawn(generation: u64, tick_tx: mpsc::UnboundedSender<TickMsg>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(TICK_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; skip it so the
            // first message arrives a full second after the transition.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tick_tx.send(TickMsg { generation }).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the state machine, the active ticker, and the
/// event channel.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// The single live ticker, present only while working/rest
    ticker: Option<Ticker>,
    /// Bumped on every ticker replacement; stale ticks are discarded
    generation: u64,
    /// Sender handed to spawned tickers
    tick_tx: mpsc::UnboundedSender<TickMsg>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new engine in the cancelled state.
    ///
    /// Returns the engine and the receiving end of its tick channel; feed
    /// the receiver to [`drive`].
    pub fn new(
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> (Self, mpsc::UnboundedReceiver<TickMsg>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let engine = Self {
            state: TimerState::new(),
            ticker: None,
            generation: 0,
            tick_tx,
            event_tx,
        };
        (engine, tick_rx)
    }

    /// Applies the start intent, resuming whichever interval was mid-flight
    /// (work by default).
    ///
    /// A no-op while already working/rest.
    pub fn start(&mut self) -> Result<()> {
        let target = self.state.start_target();
        self.request_status_change(target)
    }

    /// Pauses the running countdown. A no-op unless working/rest.
    pub fn pause(&mut self) -> Result<()> {
        self.request_status_change(Status::Paused)
    }

    /// Cancels the timer: stops the ticker, resets both countdowns, and
    /// re-arms announcement suppression. Idempotent.
    pub fn cancel(&mut self) -> Result<()> {
        self.enter(Status::Cancelled)
    }

    /// Requests a transition to `new`, ignoring requests that are not in
    /// the transition table.
    pub fn request_status_change(&mut self, new: Status) -> Result<()> {
        let legal = match (self.state.status, new) {
            (Status::Cancelled | Status::Paused, Status::Working | Status::Rest) => true,
            (Status::Working | Status::Rest, Status::Paused) => true,
            _ => false,
        };

        if !legal {
            debug!(
                from = self.state.status.as_str(),
                to = new.as_str(),
                "ignoring status change outside the transition table"
            );
            return Ok(());
        }

        self.enter(new)
    }

    /// Handles one tick from the active ticker.
    ///
    /// Ticks carrying a superseded generation are discarded, so no partial
    /// tick is ever applied after a pause or cancel.
    pub fn on_tick(&mut self, msg: TickMsg) -> Result<()> {
        if msg.generation != self.generation {
            debug!("discarding tick from a superseded ticker");
            return Ok(());
        }

        match self.state.status {
            Status::Working => {
                if self.state.tick_work() {
                    self.enter(Status::Rest)?;
                } else {
                    self.send_tick()?;
                }
            }
            Status::Rest => {
                if self.state.tick_rest() {
                    self.enter(Status::Working)?;
                } else {
                    self.send_tick()?;
                }
            }
            Status::Paused | Status::Cancelled => {}
        }

        Ok(())
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Builds the current view snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Performs the transition: stops any running ticker, records the new
    /// status, starts the new ticker if one belongs to it, and emits the
    /// matching event.
    fn enter(&mut self, new: Status) -> Result<()> {
        self.replace_ticker(new.is_active());
        let announce = self.state.transition_to(new);

        let event = match new {
            Status::Working => TimerEvent::WorkStarted { announce },
            Status::Rest => TimerEvent::RestStarted { announce },
            Status::Paused => TimerEvent::Paused,
            Status::Cancelled => TimerEvent::Cancelled,
        };
        self.event_tx
            .send(event)
            .context("failed to send timer event")?;

        Ok(())
    }

    /// Stops the previous ticker (if any) before a new one may start, and
    /// bumps the generation so in-flight ticks from the old one are stale.
    fn replace_ticker(&mut self, active: bool) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.generation = self.generation.wrapping_add(1);
        if active {
            self.ticker = Some(Ticker::spawn(self.generation, self.tick_tx.clone()));
        }
    }

    fn send_tick(&self) -> Result<()> {
        self.event_tx
            .send(TimerEvent::Tick {
                snapshot: self.state.snapshot(),
            })
            .context("failed to send tick event")
    }

    #[cfg(test)]
    fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    #[cfg(test)]
    fn current_tick(&self) -> TickMsg {
        TickMsg {
            generation: self.generation,
        }
    }
}

// ============================================================================
// Drive loop
// ============================================================================

/// Drains tick messages into the shared engine.
///
/// All countdown mutation happens under the engine lock, in response to
/// either a tick message here or an IPC intent in the request handler.
pub async fn drive(
    engine: Arc<Mutex<TimerEngine>>,
    mut ticks: mpsc::UnboundedReceiver<TickMsg>,
) -> Result<()> {
    while let Some(msg) = ticks.recv().await {
        engine.lock().await.on_tick(msg)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{WorkClock, REST_TIME_TOTAL_SECONDS, WORK_TIME_START};

    fn create_engine() -> (
        TimerEngine,
        mpsc::UnboundedReceiver<TickMsg>,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (engine, tick_rx) = TimerEngine::new(event_tx);
        (engine, tick_rx, event_rx)
    }

    // ------------------------------------------------------------------------
    // Intent Tests
    // ------------------------------------------------------------------------

    mod intent_tests {
        use super::*;

        #[tokio::test]
        async fn test_new_engine_is_cancelled_with_no_ticker() {
            let (engine, _ticks, mut events) = create_engine();

            assert_eq!(engine.state().status, Status::Cancelled);
            assert!(engine.ticker.is_none());
            assert!(events.try_recv().is_err());
        }

        #[tokio::test]
        async fn test_first_start_enters_working_without_announcing() {
            let (mut engine, _ticks, mut events) = create_engine();

            engine.start().unwrap();

            assert_eq!(engine.state().status, Status::Working);
            assert!(engine.ticker.is_some());
            assert_eq!(
                events.try_recv().unwrap(),
                TimerEvent::WorkStarted { announce: false }
            );
        }

        #[tokio::test]
        async fn test_start_while_working_is_ignored() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            let _ = events.try_recv();

            engine.start().unwrap();

            assert_eq!(engine.state().status, Status::Working);
            assert!(events.try_recv().is_err());
        }

        #[tokio::test]
        async fn test_pause_stops_ticker_and_keeps_counters() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            let _ = events.try_recv();
            engine.state_mut().work_remaining = WorkClock::new(10, 30);

            engine.pause().unwrap();

            assert_eq!(engine.state().status, Status::Paused);
            assert!(engine.ticker.is_none());
            assert_eq!(engine.state().work_remaining, WorkClock::new(10, 30));
            assert_eq!(events.try_recv().unwrap(), TimerEvent::Paused);
        }

        #[tokio::test]
        async fn test_pause_while_cancelled_is_ignored() {
            let (mut engine, _ticks, mut events) = create_engine();

            engine.pause().unwrap();

            assert_eq!(engine.state().status, Status::Cancelled);
            assert!(events.try_recv().is_err());
        }

        #[tokio::test]
        async fn test_resume_announces() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            engine.pause().unwrap();
            let _ = events.try_recv();
            let _ = events.try_recv();

            engine.start().unwrap();

            assert_eq!(engine.state().status, Status::Working);
            assert_eq!(
                events.try_recv().unwrap(),
                TimerEvent::WorkStarted { announce: true }
            );
        }

        #[tokio::test]
        async fn test_start_resumes_rest_when_paused_mid_rest() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            engine.request_status_change(Status::Paused).unwrap();
            engine.state_mut().transition_to(Status::Rest);
            engine.state_mut().rest_remaining = 12;
            engine.state_mut().transition_to(Status::Paused);
            while events.try_recv().is_ok() {}

            engine.start().unwrap();

            assert_eq!(engine.state().status, Status::Rest);
            assert_eq!(engine.state().rest_remaining, 12);
            assert_eq!(
                events.try_recv().unwrap(),
                TimerEvent::RestStarted { announce: true }
            );
        }

        #[tokio::test]
        async fn test_cancel_resets_everything() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            let _ = events.try_recv();
            engine.state_mut().work_remaining = WorkClock::new(10, 30);

            engine.cancel().unwrap();

            assert_eq!(engine.state().status, Status::Cancelled);
            assert!(engine.ticker.is_none());
            assert_eq!(engine.state().work_remaining, WORK_TIME_START);
            assert_eq!(engine.state().rest_remaining, REST_TIME_TOTAL_SECONDS);
            assert_eq!(events.try_recv().unwrap(), TimerEvent::Cancelled);
        }

        #[tokio::test]
        async fn test_cancel_twice_matches_cancel_once() {
            let (mut engine, _ticks, _events) = create_engine();
            engine.start().unwrap();
            engine.cancel().unwrap();
            let snapshot_once = engine.snapshot();

            engine.cancel().unwrap();

            assert_eq!(engine.snapshot(), snapshot_once);
        }

        #[tokio::test]
        async fn test_start_after_cancel_is_suppressed_again() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            engine.cancel().unwrap();
            while events.try_recv().is_ok() {}

            engine.start().unwrap();

            assert_eq!(
                events.try_recv().unwrap(),
                TimerEvent::WorkStarted { announce: false }
            );
        }

        #[tokio::test]
        async fn test_request_cancelled_status_is_ignored() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            let _ = events.try_recv();

            // Cancel travels through cancel(), not the render status intent.
            engine.request_status_change(Status::Cancelled).unwrap();

            assert_eq!(engine.state().status, Status::Working);
            assert!(events.try_recv().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[tokio::test]
        async fn test_tick_decrements_and_emits_snapshot() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            let _ = events.try_recv();

            engine.on_tick(engine.current_tick()).unwrap();

            assert_eq!(engine.state().work_remaining, WorkClock::new(19, 59));
            match events.try_recv().unwrap() {
                TimerEvent::Tick { snapshot } => {
                    assert_eq!(snapshot.current_display, "19 MIN 59 SEC");
                    assert!(snapshot.is_working_time_elapsed);
                }
                other => panic!("expected tick event, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_work_boundary_rolls_into_rest() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            let _ = events.try_recv();
            engine.state_mut().work_remaining = WorkClock::new(0, 0);

            engine.on_tick(engine.current_tick()).unwrap();

            assert_eq!(engine.state().status, Status::Rest);
            assert_eq!(engine.state().work_remaining, WORK_TIME_START);
            assert_eq!(
                events.try_recv().unwrap(),
                TimerEvent::RestStarted { announce: true }
            );
        }

        #[tokio::test]
        async fn test_rest_boundary_rolls_into_working() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            engine.state_mut().transition_to(Status::Rest);
            engine.state_mut().rest_remaining = 0;
            while events.try_recv().is_ok() {}

            engine.on_tick(engine.current_tick()).unwrap();

            assert_eq!(engine.state().status, Status::Working);
            assert_eq!(engine.state().rest_remaining, REST_TIME_TOTAL_SECONDS);
            assert_eq!(
                events.try_recv().unwrap(),
                TimerEvent::WorkStarted { announce: true }
            );
        }

        #[tokio::test]
        async fn test_stale_tick_is_discarded() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            let stale = engine.current_tick();
            engine.pause().unwrap();
            engine.start().unwrap();
            while events.try_recv().is_ok() {}

            engine.on_tick(stale).unwrap();

            assert_eq!(engine.state().work_remaining, WORK_TIME_START);
            assert!(events.try_recv().is_err());
        }

        #[tokio::test]
        async fn test_tick_while_paused_does_nothing() {
            let (mut engine, _ticks, mut events) = create_engine();
            engine.start().unwrap();
            engine.pause().unwrap();
            while events.try_recv().is_ok() {}

            engine.on_tick(engine.current_tick()).unwrap();

            assert_eq!(engine.state().work_remaining, WORK_TIME_START);
            assert!(events.try_recv().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Integration Tests with the Live Ticker
    // ------------------------------------------------------------------------

    mod integration_tests {
        use super::*;
        use tokio::time::timeout;

        #[tokio::test]
        async fn test_live_ticker_drives_the_countdown() {
            let (event_tx, mut events) = mpsc::unbounded_channel();
            let (engine, tick_rx) = TimerEngine::new(event_tx);
            let engine = Arc::new(Mutex::new(engine));

            let driver = tokio::spawn(drive(engine.clone(), tick_rx));
            engine.lock().await.start().unwrap();

            let result = timeout(Duration::from_secs(3), async {
                loop {
                    if let Some(TimerEvent::Tick { snapshot }) = events.recv().await {
                        return snapshot;
                    }
                }
            })
            .await;

            driver.abort();

            let snapshot = result.expect("should receive a tick within 3s");
            assert_eq!(snapshot.status, Status::Working);
            assert_eq!(snapshot.current_display, "19 MIN 59 SEC");
        }

        #[tokio::test]
        async fn test_no_ticks_while_paused() {
            let (event_tx, mut events) = mpsc::unbounded_channel();
            let (engine, tick_rx) = TimerEngine::new(event_tx);
            let engine = Arc::new(Mutex::new(engine));

            let driver = tokio::spawn(drive(engine.clone(), tick_rx));
            {
                let mut engine = engine.lock().await;
                engine.start().unwrap();
                engine.pause().unwrap();
            }
            while events.try_recv().is_ok() {}

            tokio::time::sleep(Duration::from_millis(1500)).await;
            driver.abort();

            assert!(
                events.try_recv().is_err(),
                "no tick events should arrive while paused"
            );
            assert_eq!(engine.lock().await.state().work_remaining, WORK_TIME_START);
        }
    }
}
