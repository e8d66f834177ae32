//! Authenticated request middleware.
//!
//! Every notes call goes through [`AuthenticatedClient::execute`], the one
//! place that attaches the bearer token and turns a 403 into a logout. No
//! call site handles authorization failures on its own.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use jotter_core::{defaults, ApiErrorBody, Error, Result, SessionState, SignOutReason};

use crate::config::ClientConfig;

/// Logical notes operation, used for logging and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListNotes,
    CreateNote,
    UpdateNote,
    ArchiveNote,
    DeleteNote,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListNotes => "list_notes",
            Self::CreateNote => "create_note",
            Self::UpdateNote => "update_note",
            Self::ArchiveNote => "archive_note",
            Self::DeleteNote => "delete_note",
        }
    }

    /// Message shown when the server fails without saying why.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ListNotes => defaults::MSG_LIST_FAILED,
            Self::CreateNote => defaults::MSG_CREATE_FAILED,
            Self::UpdateNote => defaults::MSG_UPDATE_FAILED,
            Self::ArchiveNote => defaults::MSG_ARCHIVE_FAILED,
            Self::DeleteNote => defaults::MSG_DELETE_FAILED,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound call: operation, method, path and optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub op: Operation,
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(op: Operation, path: impl Into<String>) -> Self {
        Self {
            op,
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(op: Operation, path: impl Into<String>) -> Self {
        Self {
            op,
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    pub fn post<T: Serialize>(op: Operation, path: impl Into<String>, body: &T) -> Result<Self> {
        Ok(Self {
            op,
            method: Method::POST,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub fn put<T: Serialize>(op: Operation, path: impl Into<String>, body: &T) -> Result<Self> {
        Ok(Self {
            op,
            method: Method::PUT,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }
}

/// HTTP client that injects the session token and enforces the 403 policy.
pub struct AuthenticatedClient {
    client: Client,
    config: ClientConfig,
    session: Arc<SessionState>,
}

impl AuthenticatedClient {
    pub fn new(client: Client, config: ClientConfig, session: Arc<SessionState>) -> Self {
        Self {
            client,
            config,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    fn redirect_delay(&self) -> Duration {
        self.config.login_redirect_delay()
    }

    /// Dispatch a request and classify the outcome.
    ///
    /// - 2xx: the raw body, untouched.
    /// - 403: session cleared, login-required event scheduled after the
    ///   configured delay, [`Error::Authorization`] with the server's `msg`
    ///   or the operation's fallback text.
    /// - other error status: [`Error::Server`] with the server's `msg` or the
    ///   operation's fallback text; session untouched.
    /// - no response: [`Error::Network`] carrying the operation's fallback
    ///   text; session untouched.
    pub async fn execute(&self, request: ApiRequest) -> Result<Bytes> {
        let request_id = Uuid::now_v7();
        let start = Instant::now();
        let op = request.op;

        let mut builder = self
            .client
            .request(request.method.clone(), self.config.url(&request.path));
        let has_token = match self.session.bearer_token() {
            Some(token) => {
                builder = builder.bearer_auth(token);
                true
            }
            None => false,
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(
            subsystem = "client",
            component = "authenticated_client",
            op = %op,
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            has_token,
            "Dispatching request"
        );

        let response = builder.send().await.map_err(|e| {
            warn!(
                subsystem = "client",
                component = "authenticated_client",
                op = %op,
                request_id = %request_id,
                error = %e,
                "Request got no response"
            );
            Error::Network {
                message: e.to_string(),
                fallback: op.fallback_message(),
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Error::Network {
            message: format!("Failed to read response body: {}", e),
            fallback: op.fallback_message(),
        })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if status.is_success() {
            info!(
                subsystem = "client",
                component = "authenticated_client",
                op = %op,
                request_id = %request_id,
                status = status.as_u16(),
                duration_ms,
                "Request completed"
            );
            return Ok(body);
        }

        let server_message = ApiErrorBody::parse(&body).message().map(str::to_string);

        if status == StatusCode::FORBIDDEN {
            warn!(
                subsystem = "client",
                component = "authenticated_client",
                op = %op,
                request_id = %request_id,
                status = status.as_u16(),
                duration_ms,
                "Token rejected, clearing session"
            );
            self.session.clear(SignOutReason::Unauthorized);
            self.session.request_login_after(self.redirect_delay());
            return Err(Error::Authorization(
                server_message.unwrap_or_else(|| op.fallback_message().to_string()),
            ));
        }

        warn!(
            subsystem = "client",
            component = "authenticated_client",
            op = %op,
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms,
            "Request failed"
        );
        Err(Error::Server {
            status: status.as_u16(),
            message: server_message.unwrap_or_else(|| op.fallback_message().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_fallbacks_are_distinct() {
        let ops = [
            Operation::ListNotes,
            Operation::CreateNote,
            Operation::UpdateNote,
            Operation::ArchiveNote,
            Operation::DeleteNote,
        ];
        for (i, a) in ops.iter().enumerate() {
            for b in &ops[i + 1..] {
                assert_ne!(a.fallback_message(), b.fallback_message());
            }
        }
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::DeleteNote.to_string(), "delete_note");
    }

    #[test]
    fn test_put_request_serializes_body() {
        let req = ApiRequest::put(
            Operation::ArchiveNote,
            "/notes/3",
            &jotter_core::NotePatch::archive(true),
        )
        .unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.body, Some(serde_json::json!({"isArchived": true})));
    }

    #[test]
    fn test_get_request_has_no_body() {
        let req = ApiRequest::get(Operation::ListNotes, "/notes");
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_none());
    }
}
