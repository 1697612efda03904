//! Yeux - a 20-20-20 eye-rest reminder for the desktop
//!
//! Every 20 minutes, look at something 20 feet (6 meters) away for
//! 20 seconds. The daemon alternates the two countdowns and announces each
//! transition; the CLI sends control intents and shows the snapshot.

use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::sync::{mpsc, Mutex};

use yeux::cli::{Cli, Commands, DaemonArgs, Display, IpcClient};
use yeux::daemon::ipc::default_socket_path;
use yeux::daemon::{drive, IpcServer, RequestHandler, TimerEngine, TimerEvent};
use yeux::notification::{
    rest_started_content, work_started_content, DesktopNotifier, NotificationGate, Notifier,
};
use yeux::sound::{try_create_player, SoundPlayer};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Start) => {
            let client = IpcClient::new()?;
            let response = client.start().await?;
            show_or_fail(&response, Display::show_start_success)?;
        }
        Some(Commands::Pause) => {
            let client = IpcClient::new()?;
            let response = client.pause().await?;
            show_or_fail(&response, Display::show_pause_success)?;
        }
        Some(Commands::Cancel) => {
            let client = IpcClient::new()?;
            let response = client.cancel().await?;
            show_or_fail(&response, Display::show_cancel_success)?;
        }
        Some(Commands::Status) => {
            let client = IpcClient::new()?;
            let response = client.status().await?;
            Display::show_status(&response);
        }
        Some(Commands::Daemon(args)) => {
            run_daemon(&args).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Prints a success response, or surfaces a daemon-side error.
fn show_or_fail(
    response: &yeux::IpcResponse,
    show: fn(&yeux::IpcResponse),
) -> Result<()> {
    if response.status == "error" {
        anyhow::bail!("{}", response.message);
    }
    show(response);
    Ok(())
}

/// Runs the timer daemon in the foreground.
async fn run_daemon(args: &DaemonArgs) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (engine, tick_rx) = TimerEngine::new(event_tx);
    let engine = Arc::new(Mutex::new(engine));

    // Resolve notification permission once; a denial degrades announcements
    // to no-ops without touching the timer.
    let player = try_create_player(args.no_sound);
    let gate = NotificationGate::init(DesktopNotifier::new(), player).await;
    tokio::spawn(announce_loop(event_rx, gate));

    // Tick drain: the only other place engine state mutates.
    tokio::spawn(drive(engine.clone(), tick_rx));

    let socket_path = default_socket_path()?;
    let server = IpcServer::new(&socket_path)?;
    tracing::info!("daemon listening on {:?}", server.socket_path());

    let handler = Arc::new(RequestHandler::new(engine));

    loop {
        tokio::select! {
            accepted = server.accept() => {
                let mut stream = accepted?;
                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    match IpcServer::receive_request(&mut stream).await {
                        Ok(request) => {
                            let response = handler.handle(request).await;
                            if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
                                tracing::warn!("failed to send IPC response: {e}");
                            }
                        }
                        Err(e) => tracing::warn!("failed to read IPC request: {e}"),
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Consumes timer events and announces the work/rest transitions.
async fn announce_loop<N: Notifier, P: SoundPlayer>(
    mut events: mpsc::UnboundedReceiver<TimerEvent>,
    gate: NotificationGate<N, P>,
) {
    while let Some(event) = events.recv().await {
        match event {
            TimerEvent::RestStarted { announce: true } => {
                gate.announce(&rest_started_content());
            }
            TimerEvent::WorkStarted { announce: true } => {
                gate.announce(&work_started_content());
            }
            TimerEvent::Tick { snapshot } => {
                tracing::trace!(display = %snapshot.current_display, "tick");
            }
            _ => {}
        }
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use yeux::IpcResponse;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["yeux"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["yeux", "status"]);
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["yeux", "--verbose", "status"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_show_or_fail_propagates_daemon_errors() {
        let response = IpcResponse::error("no active interval to pause");

        let result = show_or_fail(&response, Display::show_pause_success);

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("no active interval"));
    }

    #[test]
    fn test_show_or_fail_accepts_success() {
        let response = IpcResponse::success("ok", None);
        assert!(show_or_fail(&response, Display::show_start_success).is_ok());
    }
}
