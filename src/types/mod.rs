//! Core data types for the Yeux eye-rest timer.
//!
//! This module defines the data structures used for:
//! - The work/rest status state machine and its countdown values
//! - Derived view values (display string, progress, elapsed flags)
//! - IPC request/response serialization

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Full work interval: 20 minutes.
pub const WORK_TIME_START: WorkClock = WorkClock {
    minutes: 20,
    seconds: 0,
};

/// Full rest interval: 20 seconds.
pub const REST_TIME_TOTAL_SECONDS: u32 = 20;

// ============================================================================
// Status
// ============================================================================

/// Represents the current status of the timer.
///
/// Exactly one status is active at any time; it is the sole driver of which
/// ticker runs and what the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Counting down the 20-minute work interval
    Working,
    /// Counting down the 20-second rest interval
    Rest,
    /// Countdown halted, counters preserved
    Paused,
    /// Idle; both counters at their full starting amounts
    Cancelled,
}

impl Status {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Working => "working",
            Status::Rest => "rest",
            Status::Paused => "paused",
            Status::Cancelled => "cancelled",
        }
    }

    /// Returns true if a ticker should be running in this status.
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Working | Status::Rest)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Cancelled
    }
}

// ============================================================================
// WorkClock
// ============================================================================

/// A minutes/seconds countdown value for the work interval.
///
/// Invariant: `seconds` stays in `[0, 59]`; decrementing borrows a minute
/// when the seconds hand is at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkClock {
    /// Whole minutes remaining
    pub minutes: u32,
    /// Seconds remaining within the current minute (0-59)
    pub seconds: u32,
}

impl WorkClock {
    /// Creates a new clock value.
    pub const fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Total remaining time in seconds.
    pub const fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    /// Returns true when the clock has run down to 0:00.
    pub const fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    /// Decrements by one second, borrowing a minute when the seconds hand
    /// is at zero. Must not be called on a zero clock.
    fn decrement(&mut self) {
        if self.seconds == 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.seconds -= 1;
        }
    }
}

impl fmt::Display for WorkClock {
    /// Formats as "M MIN SS SEC" (minutes unpadded, seconds zero-padded).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MIN {:02} SEC", self.minutes, self.seconds)
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The timer state machine and its countdown values.
///
/// Counters are only mutated by the tick methods or by the cancel reset;
/// the engine guards which method runs in which status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current status
    pub status: Status,
    /// Work countdown, full at 20:00
    pub work_remaining: WorkClock,
    /// Rest countdown in seconds, full at 20
    pub rest_remaining: u32,
    /// Status observed on the previous transition
    prior_status: Status,
    /// False until the first genuine entry into working/rest; cleared by
    /// cancel. Gates announcement suppression.
    has_activated_once: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// Creates the initial state: cancelled, both counters full.
    pub fn new() -> Self {
        Self {
            status: Status::Cancelled,
            work_remaining: WORK_TIME_START,
            rest_remaining: REST_TIME_TOTAL_SECONDS,
            prior_status: Status::Cancelled,
            has_activated_once: false,
        }
    }

    /// Records a transition to `new` and returns whether an entry into
    /// `working`/`rest` should be announced.
    ///
    /// An activation is suppressed only when it leaves a pristine
    /// `cancelled` state: prior status still `cancelled` and no activation
    /// since process start or the last cancel. Callers are responsible for
    /// only requesting transitions that are legal for the current status.
    pub fn transition_to(&mut self, new: Status) -> bool {
        self.prior_status = self.status;
        self.status = new;

        match new {
            Status::Working | Status::Rest => {
                let announce =
                    self.prior_status != Status::Cancelled || self.has_activated_once;
                self.has_activated_once = true;
                announce
            }
            Status::Paused => false,
            Status::Cancelled => {
                self.work_remaining = WORK_TIME_START;
                self.rest_remaining = REST_TIME_TOTAL_SECONDS;
                self.has_activated_once = false;
                false
            }
        }
    }

    /// Advances the work countdown by one tick.
    ///
    /// Returns true when the clock was already at 0:00, in which case the
    /// work counter is reset to full and the caller must transition to
    /// `rest`. The counter never goes negative.
    pub fn tick_work(&mut self) -> bool {
        if self.work_remaining.is_zero() {
            self.work_remaining = WORK_TIME_START;
            true
        } else {
            self.work_remaining.decrement();
            false
        }
    }

    /// Advances the rest countdown by one tick.
    ///
    /// Returns true when the counter was already at 0, in which case the
    /// rest counter is reset to full and the caller must transition to
    /// `working`.
    pub fn tick_rest(&mut self) -> bool {
        if self.rest_remaining == 0 {
            self.rest_remaining = REST_TIME_TOTAL_SECONDS;
            true
        } else {
            self.rest_remaining -= 1;
            false
        }
    }

    /// Resolves the start intent from `paused`/`cancelled`: resume into
    /// whichever interval was mid-flight.
    ///
    /// Rest wins only when the rest counter is drawn down and the work
    /// counter is still full; everything else (including the very first
    /// start) resumes into `working`.
    pub fn start_target(&self) -> Status {
        if self.is_rest_time_elapsed() && !self.is_working_time_elapsed() {
            Status::Rest
        } else {
            Status::Working
        }
    }

    /// The status observed on the previous transition.
    pub fn prior_status(&self) -> Status {
        self.prior_status
    }

    /// True once the engine has genuinely entered working/rest since
    /// process start or the last cancel.
    pub fn has_activated_once(&self) -> bool {
        self.has_activated_once
    }

    // ------------------------------------------------------------------------
    // Derived view values (pure functions of the state snapshot)
    // ------------------------------------------------------------------------

    /// True iff the work countdown has been drawn down below full.
    pub fn is_working_time_elapsed(&self) -> bool {
        self.work_remaining.total_seconds() < WORK_TIME_START.total_seconds()
    }

    /// True iff the rest countdown has been drawn down below full.
    pub fn is_rest_time_elapsed(&self) -> bool {
        self.rest_remaining < REST_TIME_TOTAL_SECONDS
    }

    /// Progress of the active countdown as a percentage in `[0, 100]`.
    ///
    /// For `paused`/`cancelled` the side that is drawn down below full is
    /// shown (work takes priority); a fresh state reads 100.
    pub fn progress_percentage(&self) -> f64 {
        let (remaining, total) = match self.status {
            Status::Working => (
                self.work_remaining.total_seconds(),
                WORK_TIME_START.total_seconds(),
            ),
            Status::Rest => (self.rest_remaining, REST_TIME_TOTAL_SECONDS),
            Status::Paused | Status::Cancelled => {
                self.assert_single_side_drawn();
                if self.is_working_time_elapsed() {
                    (
                        self.work_remaining.total_seconds(),
                        WORK_TIME_START.total_seconds(),
                    )
                } else if self.is_rest_time_elapsed() {
                    (self.rest_remaining, REST_TIME_TOTAL_SECONDS)
                } else {
                    return 100.0;
                }
            }
        };

        if total == 0 {
            return 100.0;
        }
        f64::from(remaining) / f64::from(total) * 100.0
    }

    /// The countdown string shown at the center of the view.
    ///
    /// `working` formats as "M MIN SS SEC", `rest` as "N SEC". While
    /// `paused`/`cancelled`, whichever countdown is drawn down is shown
    /// (work takes priority); a fresh state shows the full work duration.
    pub fn current_display(&self) -> String {
        match self.status {
            Status::Working => self.work_remaining.to_string(),
            Status::Rest => format!("{} SEC", self.rest_remaining),
            Status::Paused | Status::Cancelled => {
                self.assert_single_side_drawn();
                if self.is_working_time_elapsed() {
                    self.work_remaining.to_string()
                } else if self.is_rest_time_elapsed() {
                    format!("{} SEC", self.rest_remaining)
                } else {
                    WORK_TIME_START.to_string()
                }
            }
        }
    }

    /// Builds the read-only view snapshot for the render boundary.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            status: self.status,
            current_display: self.current_display(),
            progress_percentage: self.progress_percentage(),
            is_working_time_elapsed: self.is_working_time_elapsed(),
            is_rest_time_elapsed: self.is_rest_time_elapsed(),
        }
    }

    /// The transition rules reset the inactive counter at the instant of
    /// each work/rest entry, so at most one side can be drawn down while
    /// paused or cancelled.
    fn assert_single_side_drawn(&self) {
        debug_assert!(
            !(self.is_working_time_elapsed() && self.is_rest_time_elapsed()),
            "both countdowns drawn down below full while {}",
            self.status.as_str()
        );
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view data pushed across the render boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Current status
    pub status: Status,
    /// Countdown string, e.g. "19 MIN 59 SEC" or "12 SEC"
    #[serde(rename = "currentDisplay")]
    pub current_display: String,
    /// Circular-progress percentage in `[0, 100]`
    #[serde(rename = "progressPercentage")]
    pub progress_percentage: f64,
    /// Work countdown drawn down below full
    #[serde(rename = "isWorkingTimeElapsed")]
    pub is_working_time_elapsed: bool,
    /// Rest countdown drawn down below full
    #[serde(rename = "isRestTimeElapsed")]
    pub is_rest_time_elapsed: bool,
}

// ============================================================================
// IPC Types
// ============================================================================

/// IPC request from client to daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start or resume the timer (the engine resolves work vs rest)
    Start,
    /// Pause the running countdown
    Pause,
    /// Cancel and reset both countdowns
    Cancel,
    /// Query the current snapshot
    Status,
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Snapshot of the timer after the command was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TimerSnapshot>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<TimerSnapshot>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
