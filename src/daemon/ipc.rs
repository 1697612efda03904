//! IPC server for the eye-rest daemon.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for timer intents
//! - Integration with TimerEngine for intent execution

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::types::{IpcRequest, IpcResponse};

use super::timer::TimerEngine;

// ============================================================================
// Constants
// ============================================================================

/// Socket path relative to the home directory
const SOCKET_PATH_IN_HOME: &str = ".yeux/yeux.sock";

/// Maximum request size in bytes (4KB)
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

/// Returns the default daemon socket path (`~/.yeux/yeux.sock`).
pub fn default_socket_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine the home directory")?;
    Ok(home.join(SOCKET_PATH_IN_HOME))
}

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Socket binding error
    #[error("failed to bind socket: {0}")]
    Bind(String),

    /// Read error
    #[error("failed to read request: {0}")]
    Read(String),

    /// Timeout error
    #[error("operation timed out")]
    Timeout,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    /// Unix socket listener
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// If the socket file already exists, it will be removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("failed to remove existing socket: {socket_path:?}"))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create socket directory: {parent:?}"))?;
        }

        let listener = UnixListener::bind(socket_path)
            .map_err(|e| IpcError::Bind(format!("{socket_path:?}: {e}")))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Applies a read timeout to prevent blocking indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = vec![0u8; MAX_REQUEST_SIZE];

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::Read(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            anyhow::bail!("connection closed by client");
        }

        let request: IpcRequest = serde_json::from_slice(&buffer[..n])
            .context("failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("failed to write response")?;
        stream.flush().await.context("failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        // Clean up socket file on drop
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching intents to the TimerEngine.
///
/// Intents outside the transition table are reported back as errors here;
/// the engine itself treats them as no-ops either way.
pub struct RequestHandler {
    /// Shared reference to the timer engine
    engine: Arc<Mutex<TimerEngine>>,
}

impl RequestHandler {
    /// Creates a new request handler with the given timer engine.
    pub fn new(engine: Arc<Mutex<TimerEngine>>) -> Self {
        Self { engine }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Cancel => self.handle_cancel().await,
            IpcRequest::Status => self.handle_status().await,
        }
    }

    /// Handles the start intent.
    async fn handle_start(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if engine.state().status.is_active() {
            return IpcResponse::error("the timer is already running");
        }

        match engine.start() {
            Ok(()) => IpcResponse::success("Timer started", Some(engine.snapshot())),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the pause intent.
    async fn handle_pause(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if !engine.state().status.is_active() {
            return IpcResponse::error("no active interval to pause");
        }

        match engine.pause() {
            Ok(()) => IpcResponse::success("Timer paused", Some(engine.snapshot())),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the cancel intent.
    async fn handle_cancel(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.cancel() {
            Ok(()) => IpcResponse::success("Timer cancelled and reset", Some(engine.snapshot())),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the status query.
    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;
        IpcResponse::success("", Some(engine.snapshot()))
    }
}

// ============================================================================
// Tests
// ============================================================================
