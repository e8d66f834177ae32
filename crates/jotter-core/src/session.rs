//! Session state shared by every authenticated component.
//!
//! One [`SessionState`] exists per running client and is handed around as an
//! `Arc`. It has exactly two writers: [`SessionState::establish`] after a
//! successful login and [`SessionState::clear`] on logout or when the server
//! rejects the token. User and token live in a single `Option<Session>`, so
//! one is never present without the other.
//!
//! Transitions are broadcast as [`SessionEvent`]s for any view that wants to
//! react (switch screens, print a prompt, exit).

use std::fmt;
use std::sync::RwLock;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::defaults;
use crate::models::UserIdentity;

/// The authenticated identity and bearer token for this run.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    user: UserIdentity,
    token: String,
}

impl Session {
    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user asked to log out.
    Logout,
    /// The server answered 403 to an authenticated call.
    Unauthorized,
}

/// Session transition broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(UserIdentity),
    SignedOut(SignOutReason),
    /// The view should show its login surface.
    LoginRequired,
}

/// Process-wide holder of the current session.
pub struct SessionState {
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionState {
    /// Empty state: nobody is logged in.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(defaults::SESSION_EVENT_CAPACITY);
        Self {
            current: RwLock::new(None),
            events,
        }
    }

    /// Store user and token together after a successful login.
    pub fn establish(&self, user: UserIdentity, token: String) {
        info!(
            subsystem = "session",
            op = "establish",
            user_id = user.id,
            "Session established"
        );
        {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            *guard = Some(Session {
                user: user.clone(),
                token,
            });
        }
        let _ = self.events.send(SessionEvent::SignedIn(user));
    }

    /// Drop user and token together.
    pub fn clear(&self, reason: SignOutReason) {
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            guard.take()
        };
        info!(
            subsystem = "session",
            op = "clear",
            reason = ?reason,
            had_session = previous.is_some(),
            "Session cleared"
        );
        let _ = self.events.send(SessionEvent::SignedOut(reason));
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.current().map(|s| s.user)
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Emit [`SessionEvent::LoginRequired`] once `delay` has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_login_after(&self, delay: Duration) -> JoinHandle<()> {
        let events = self.events.clone();
        debug!(
            subsystem = "session",
            op = "request_login",
            delay_ms = delay.as_millis() as u64,
            "Scheduling login prompt"
        );
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::LoginRequired);
        })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("current", &self.current())
            .finish()
    }
}
