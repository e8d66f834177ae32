//! Wire and domain types shared by every jotter crate.
//!
//! Field names follow the notes API's camelCase JSON. Every response the
//! client consumes has an explicit type here, so a shape mismatch fails at
//! the boundary as a deserialization error instead of deep in a caller.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned note identifier.
pub type NoteId = i64;

/// Server-assigned user identifier.
pub type UserId = i64;

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Identity of the logged-in user, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub username: String,
}

/// Username/password pair submitted to `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login payload: `{token, details}`.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub details: UserIdentity,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("details", &self.details)
            .finish()
    }
}

/// Error body returned by the API on failure: `{msg}`.
///
/// Every field is optional; servers and proxies do not always send one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, tolerating empty or non-JSON payloads.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The server's message, if it sent a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref().filter(|m| !m.trim().is_empty())
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// A note owned by the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_archived: bool,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creation date rendered as `YYYY/MM/DD`.
    pub fn display_date(&self) -> String {
        self.created_at.format("%Y/%m/%d").to_string()
    }

    /// Case-insensitive substring match against any tag.
    ///
    /// An empty query matches every note.
    pub fn matches_tag_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Payload for `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }
}

/// Partial payload for `PUT /notes/:id`. Absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl NotePatch {
    /// Full field edit, as submitted by the edit form.
    pub fn edit(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            tags: Some(tags),
            is_archived: None,
        }
    }

    /// Archive flag change only.
    pub fn archive(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
            ..Self::default()
        }
    }

    /// True when the patch touches title, content or tags.
    pub fn edits_fields(&self) -> bool {
        self.title.is_some() || self.content.is_some() || self.tags.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_note() -> Note {
        Note {
            id: 42,
            title: "Groceries".to_string(),
            content: "Milk, eggs".to_string(),
            tags: vec!["Home".to_string(), "shop".to_string()],
            is_archived: false,
            user_id: 1,
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 22, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_note_deserializes_camel_case() {
        let json = r#"{
            "id": 42,
            "title": "Groceries",
            "content": "Milk, eggs",
            "tags": ["Home", "shop"],
            "isArchived": false,
            "userId": 1,
            "createdAt": "2024-03-07T22:15:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note, sample_note());
    }

    #[test]
    fn test_note_missing_field_fails() {
        let json = r#"{"id": 1, "title": "x"}"#;
        assert!(serde_json::from_str::<Note>(json).is_err());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(sample_note().display_date(), "2024/03/07");
    }

    #[test]
    fn test_matches_tag_query_case_insensitive_substring() {
        let note = sample_note();
        assert!(note.matches_tag_query("hom"));
        assert!(note.matches_tag_query("SHOP"));
        assert!(note.matches_tag_query(""));
        assert!(!note.matches_tag_query("work"));
    }

    #[test]
    fn test_login_response_parses_details() {
        let json = r#"{"token": "t1", "details": {"id": 1, "username": "alice"}}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "t1");
        assert_eq!(
            resp.details,
            UserIdentity {
                id: 1,
                username: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("alice", "secret");
        assert!(!format!("{:?}", creds).contains("secret"));

        let resp = LoginResponse {
            token: "t1-very-secret".to_string(),
            details: UserIdentity {
                id: 1,
                username: "alice".to_string(),
            },
        };
        assert!(!format!("{:?}", resp).contains("t1-very-secret"));
    }

    #[test]
    fn test_api_error_body_tolerates_garbage() {
        assert_eq!(ApiErrorBody::parse(b"").message(), None);
        assert_eq!(ApiErrorBody::parse(b"<html>").message(), None);
        assert_eq!(ApiErrorBody::parse(br#"{"msg": "  "}"#).message(), None);
        assert_eq!(
            ApiErrorBody::parse(br#"{"msg": "Note not found"}"#).message(),
            Some("Note not found")
        );
    }

    #[test]
    fn test_archive_patch_serializes_only_flag() {
        let value = serde_json::to_value(NotePatch::archive(true)).unwrap();
        assert_eq!(value, serde_json::json!({"isArchived": true}));
    }

    #[test]
    fn test_edit_patch_serializes_fields() {
        let patch = NotePatch::edit("T", "C", vec!["a".to_string()]);
        assert!(patch.edits_fields());
        let value = serde_json::to_value(patch).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "T", "content": "C", "tags": ["a"]})
        );
    }
}
