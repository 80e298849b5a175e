//! Logout signal plumbing.
//!
//! The HTTP client never talks to a concrete event bus. It holds a
//! [`LogoutNotifier`] capability and fires it once per terminal auth
//! failure; the application shell owns the other end and decides what a
//! logout means (state teardown, navigation back to sign-in).

use tokio::sync::broadcast;

/// Marker event carried by the logout broadcast. No payload: the session is
/// over, everything else the shell already knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutEvent;

/// Capability to announce that the session ended.
///
/// Implementations must tolerate being fired when already logged out.
pub trait LogoutNotifier: Send + Sync {
    fn notify_logout(&self);
}

/// Notifier that drops the signal. The default when nothing is injected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogout;

impl LogoutNotifier for NoopLogout {
    fn notify_logout(&self) {}
}

/// Application-wide logout broadcast.
///
/// Clone one into the client as its notifier and keep another for the shell
/// to [`subscribe`](Self::subscribe) on. Sending with no live subscriber is
/// harmless, which is what makes firing idempotent from the client's side.
///
/// # Example
/// ```
/// use taskline::auth::{LogoutNotifier, SessionEvents};
///
/// let events = SessionEvents::new();
/// let mut logouts = events.subscribe();
///
/// events.notify_logout();
/// assert!(logouts.try_recv().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<LogoutEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    /// New receiver for logout events. Intended for the single shell-level
    /// listener, but nothing stops diagnostics from listening too.
    pub fn subscribe(&self) -> broadcast::Receiver<LogoutEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl LogoutNotifier for SessionEvents {
    fn notify_logout(&self) {
        // A send error only means nobody is listening right now.
        let _ = self.sender.send(LogoutEvent);
    }
}
