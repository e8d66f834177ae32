//! # jotter-client
//!
//! Authenticated client for the jotter notes API.
//!
//! This crate provides:
//! - Client configuration from code or `JOTTER_*` environment variables
//! - The credential service (`POST /auth/login`)
//! - The authenticated request middleware (bearer injection, 403 → logout)
//! - Typed notes endpoints behind the [`NotesApi`] trait
//! - The in-memory [`NotesStore`] reconciled with server responses
//! - [`Notice`]s summarising each operation for the user
//!
//! # Example
//!
//! ```rust,no_run
//! use jotter_client::{ClientConfig, JotterClient, Notice};
//! use jotter_core::{Credentials, NoteDraft};
//!
//! #[tokio::main]
//! async fn main() -> jotter_core::Result<()> {
//!     let mut client = JotterClient::new(ClientConfig::from_env())?;
//!     client.login(&Credentials::new("alice", "secret")).await?;
//!     client.notes_mut().load().await?;
//!
//!     let draft = NoteDraft::new("Groceries", "Milk, eggs", vec!["home".into()]);
//!     let result = client.notes_mut().create(draft).await;
//!     println!("{}", Notice::created(&result));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod authenticated;
pub mod config;
pub mod credentials;
pub mod notice;
pub mod store;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use jotter_core::{Credentials, Result, SessionState, UserIdentity};

pub use api::{HttpNotesApi, NotesApi};
pub use authenticated::{ApiRequest, AuthenticatedClient, Operation};
pub use config::ClientConfig;
pub use credentials::CredentialService;
pub use notice::{Notice, NoticeLevel};
pub use store::{NotesStore, NotesView};

/// Everything a view needs, wired to one shared [`SessionState`].
pub struct JotterClient {
    session: Arc<SessionState>,
    credentials: CredentialService,
    notes: NotesStore<HttpNotesApi>,
}

impl JotterClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_session(config, Arc::new(SessionState::new()))
    }

    /// Build around an existing session, e.g. one a view already subscribed to.
    pub fn with_session(config: ClientConfig, session: Arc<SessionState>) -> Result<Self> {
        config.validate()?;
        let http = config.http_client()?;

        let credentials = CredentialService::new(http.clone(), config.clone(), session.clone());
        let authenticated = AuthenticatedClient::new(http, config, session.clone());
        let notes = NotesStore::new(HttpNotesApi::new(authenticated));

        Ok(Self {
            session,
            credentials,
            notes,
        })
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<UserIdentity> {
        self.credentials.login(credentials).await
    }

    /// Clear the session and the notes it owned.
    pub fn logout(&mut self) {
        self.credentials.logout();
        self.notes.clear();
    }

    pub fn notes(&self) -> &NotesStore<HttpNotesApi> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NotesStore<HttpNotesApi> {
        &mut self.notes
    }
}
