//! Command definitions for the Yeux CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Yeux - a 20-20-20 eye-rest reminder
#[derive(Parser, Debug)]
#[command(
    name = "yeux",
    version,
    about = "A 20-20-20 eye-rest reminder for the desktop",
    long_about = "A 20-20-20 eye-rest reminder: alternates a 20-minute work \
                  interval with a 20-second rest interval and fires a desktop \
                  notification (with a cue sound) at each transition.\n\
                  Run `yeux daemon` once, then control it with start/pause/cancel.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the cycle, or resume a paused one
    Start,

    /// Pause the running countdown
    Pause,

    /// Cancel the cycle and reset both countdowns
    Cancel,

    /// Show the current countdown and progress
    Status,

    /// Run the timer daemon (foreground)
    #[command(hide = true)]
    Daemon(DaemonArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Daemon Command Arguments
// ============================================================================

/// Arguments for the daemon command
#[derive(Args, Debug, Clone, Default)]
pub struct DaemonArgs {
    /// Disable the announcement cue sound
    #[arg(long)]
    pub no_sound: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::parse_from(["yeux"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_verbose_flag() {
        let cli = Cli::parse_from(["yeux", "--verbose", "status"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_start() {
        let cli = Cli::parse_from(["yeux", "start"]);
        assert!(matches!(cli.command, Some(Commands::Start)));
    }

    #[test]
    fn test_parse_pause() {
        let cli = Cli::parse_from(["yeux", "pause"]);
        assert!(matches!(cli.command, Some(Commands::Pause)));
    }

    #[test]
    fn test_parse_cancel() {
        let cli = Cli::parse_from(["yeux", "cancel"]);
        assert!(matches!(cli.command, Some(Commands::Cancel)));
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::parse_from(["yeux", "status"]);
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn test_parse_daemon_with_no_sound() {
        let cli = Cli::parse_from(["yeux", "daemon", "--no-sound"]);
        match cli.command {
            Some(Commands::Daemon(args)) => assert!(args.no_sound),
            _ => panic!("Expected Daemon command"),
        }
    }

    #[test]
    fn test_parse_daemon_defaults() {
        let cli = Cli::parse_from(["yeux", "daemon"]);
        match cli.command {
            Some(Commands::Daemon(args)) => assert!(!args.no_sound),
            _ => panic!("Expected Daemon command"),
        }
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::parse_from(["yeux", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
