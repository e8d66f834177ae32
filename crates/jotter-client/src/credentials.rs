//! Credential exchange against `POST /auth/login`.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tracing::{info, instrument, warn};

use jotter_core::{
    defaults, ApiErrorBody, Credentials, Error, LoginResponse, Result, SessionState,
    SignOutReason, UserIdentity,
};

use crate::config::ClientConfig;

pub const LOGIN_PATH: &str = "/auth/login";

/// Issues sessions for username/password pairs.
///
/// A single attempt per call, no retry. The two failure kinds a caller must
/// tell apart are [`Error::Authentication`] (the server answered and said
/// no) and [`Error::Network`] (the server never answered).
pub struct CredentialService {
    client: Client,
    config: ClientConfig,
    session: Arc<SessionState>,
}

impl CredentialService {
    pub fn new(client: Client, config: ClientConfig, session: Arc<SessionState>) -> Self {
        Self {
            client,
            config,
            session,
        }
    }

    /// Exchange credentials for a session and store it in [`SessionState`].
    ///
    /// Credentials are checked locally first; a rule violation never reaches
    /// the network. On failure the session is left as it was.
    #[instrument(skip(self, credentials), fields(
        subsystem = "client",
        component = "credentials",
        op = "login",
        username = %credentials.username,
    ))]
    pub async fn login(&self, credentials: &Credentials) -> Result<UserIdentity> {
        credentials.validate()?;
        let start = Instant::now();

        let response = self
            .client
            .post(self.config.url(LOGIN_PATH))
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Login request got no response");
                Error::network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read login response: {}", e)))?;

        if !status.is_success() {
            let message = ApiErrorBody::parse(&body)
                .message()
                .unwrap_or(defaults::MSG_INVALID_CREDENTIALS)
                .to_string();
            warn!(
                status = status.as_u16(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Login rejected"
            );
            return Err(Error::Authentication(message));
        }

        let LoginResponse { token, details } = serde_json::from_slice(&body)?;

        info!(
            user_id = details.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Login succeeded"
        );
        self.session.establish(details.clone(), token);
        Ok(details)
    }

    /// End the session locally. No server call is made.
    pub fn logout(&self) {
        self.session.clear(SignOutReason::Logout);
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }
}
