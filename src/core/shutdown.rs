//! # Cross-platform termination signal handling.
//!
//! [`TerminationSignals`] registers interest in the process's termination
//! requests at construction time and completes [`recv`](TerminationSignals::recv)
//! when the first one is delivered.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in a terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (hard stop / core dump request)
//!
//! **Other platforms:**
//! - Ctrl-C via [`tokio::signal::ctrl_c`]
//!
//! Registration happens eagerly in [`TerminationSignals::register`], so a
//! failure to install handlers surfaces before the feed is ever started.

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Listener for the process's termination requests.
#[cfg(unix)]
pub(crate) struct TerminationSignals {
    sigint: Signal,
    sigterm: Signal,
    sigquit: Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    /// Installs the signal handlers.
    pub(crate) fn register() -> std::io::Result<Self> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
            sigquit: signal(SignalKind::quit())?,
        })
    }

    /// Completes when the first termination request is delivered.
    pub(crate) async fn recv(&mut self) {
        tokio::select! {
            _ = self.sigint.recv() => {}
            _ = self.sigterm.recv() => {}
            _ = self.sigquit.recv() => {}
        }
    }
}

/// Listener for the process's termination requests.
#[cfg(not(unix))]
pub(crate) struct TerminationSignals;

#[cfg(not(unix))]
impl TerminationSignals {
    /// Installs the signal handlers.
    pub(crate) fn register() -> std::io::Result<Self> {
        Ok(Self)
    }

    /// Completes when the first termination request is delivered.
    pub(crate) async fn recv(&mut self) {
        let _ = tokio::signal::ctrl_c().await;
    }
}
