//! Display utilities for the Yeux CLI.
//!
//! This module provides formatted output for:
//! - Success messages for control intents
//! - Error messages
//! - The status snapshot

use crate::types::{IpcResponse, Status, TimerSnapshot};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a success message for the start intent.
    pub fn show_start_success(response: &IpcResponse) {
        if let Some(data) = &response.data {
            match data.status {
                Status::Rest => println!("> Resuming rest interval"),
                _ => println!("> Work interval running"),
            }
            println!("  Countdown: {}", data.current_display);
        } else {
            println!("> {}", response.message);
        }
    }

    /// Shows a success message for the pause intent.
    pub fn show_pause_success(response: &IpcResponse) {
        println!("|| Timer paused");

        if let Some(data) = &response.data {
            println!("  Countdown held at: {}", data.current_display);
        }
    }

    /// Shows a success message for the cancel intent.
    pub fn show_cancel_success(_response: &IpcResponse) {
        println!("[] Timer cancelled, countdowns reset");
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        println!("Yeux 20-20-20 status");
        println!("─────────────────────────────");

        match &response.data {
            Some(data) => {
                println!("Status:    {}", Self::status_label(data.status));
                println!("Countdown: {}", data.current_display);
                println!("Progress:  {}", Self::format_progress(data));
            }
            None => println!("The daemon returned no status data"),
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("x {}", message);
    }

    /// Human label for a status value.
    fn status_label(status: Status) -> &'static str {
        match status {
            Status::Working => "working",
            Status::Rest => "resting",
            Status::Paused => "paused",
            Status::Cancelled => "idle",
        }
    }

    /// Renders the progress percentage with one decimal.
    fn format_progress(data: &TimerSnapshot) -> String {
        format!("{:.1}%", data.progress_percentage)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimerState;

    #[test]
    fn test_status_label() {
        assert_eq!(Display::status_label(Status::Working), "working");
        assert_eq!(Display::status_label(Status::Rest), "resting");
        assert_eq!(Display::status_label(Status::Paused), "paused");
        assert_eq!(Display::status_label(Status::Cancelled), "idle");
    }

    #[test]
    fn test_format_progress() {
        let mut state = TimerState::new();
        state.transition_to(Status::Working);
        state.tick_work();

        let rendered = Display::format_progress(&state.snapshot());
        assert_eq!(rendered, "99.9%");
    }

    #[test]
    fn test_format_progress_full() {
        let rendered = Display::format_progress(&TimerState::new().snapshot());
        assert_eq!(rendered, "100.0%");
    }

    #[test]
    fn test_show_functions_do_not_panic() {
        let snapshot = TimerState::new().snapshot();
        let response = IpcResponse::success("ok", Some(snapshot));

        Display::show_start_success(&response);
        Display::show_pause_success(&response);
        Display::show_cancel_success(&response);
        Display::show_status(&response);
        Display::show_error("boom");

        let empty = IpcResponse::success("ok", None);
        Display::show_start_success(&empty);
        Display::show_status(&empty);
    }
}
