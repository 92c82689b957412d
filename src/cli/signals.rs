//! Shutdown signal handling for the web service

use std::fmt;

use colored::Colorize;

/// Why the service is shutting down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT / Ctrl+C
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "SIGINT"),
            Self::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Wait until the process is asked to stop.
#[cfg(unix)]
pub async fn wait_for_shutdown() -> ShutdownReason {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigint, mut sigterm) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
        _ => {
            let _ = tokio::signal::ctrl_c().await;
            return announce(ShutdownReason::Interrupt);
        }
    };

    let reason = tokio::select! {
        _ = sigint.recv() => ShutdownReason::Interrupt,
        _ = sigterm.recv() => ShutdownReason::Terminate,
    };
    announce(reason)
}

/// Wait until the process is asked to stop.
#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> ShutdownReason {
    let _ = tokio::signal::ctrl_c().await;
    announce(ShutdownReason::Interrupt)
}

fn announce(reason: ShutdownReason) -> ShutdownReason {
    eprintln!("{} Received {} (shutdown)", "↓".cyan(), reason);
    reason
}
