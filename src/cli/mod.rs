//! CLI module for the Yeux timer.
//!
//! This module provides the command-line interface:
//! - `commands`: command definitions using clap derive
//! - `client`: IPC client for daemon communication
//! - `display`: output formatting and display logic

pub mod client;
pub mod commands;
pub mod display;

pub use client::IpcClient;
pub use commands::{Cli, Commands, DaemonArgs};
pub use display::Display;
