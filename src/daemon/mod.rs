//! Daemon module for the eye-rest timer.
//!
//! This module contains the core daemon functionality:
//! - `timer`: timer engine with status transitions and countdown logic
//! - `ipc`: Unix-socket server and request handling

pub mod ipc;
pub mod timer;

pub use ipc::{IpcServer, RequestHandler};
pub use timer::{drive, TimerEngine, TimerEvent};
