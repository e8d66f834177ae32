//! Typed notes endpoints.
//!
//! [`NotesApi`] is the seam between the notes store and the network:
//! [`HttpNotesApi`] talks to the server through the authenticated
//! middleware, tests substitute an in-memory double.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use jotter_core::{Error, Note, NoteDraft, NoteId, NotePatch, Result};

use crate::authenticated::{ApiRequest, AuthenticatedClient, Operation};

pub const NOTES_PATH: &str = "/notes";

fn note_path(id: NoteId) -> String {
    format!("{}/{}", NOTES_PATH, id)
}

/// Remote notes collection of the logged-in user.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// `GET /notes`
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// `POST /notes`; the server assigns id and creation time.
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note>;

    /// `PUT /notes/:id` with only the fields present in `patch`.
    async fn update_note(&self, id: NoteId, patch: &NotePatch) -> Result<Note>;

    /// `DELETE /notes/:id`; the confirmation body is ignored.
    async fn delete_note(&self, id: NoteId) -> Result<()>;
}

/// Parse a response body against its schema.
fn decode<T: DeserializeOwned>(op: Operation, body: &Bytes) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| Error::Deserialization(format!("{} response: {}", op, e)))
}

/// [`NotesApi`] over HTTP.
pub struct HttpNotesApi {
    client: AuthenticatedClient,
}

impl HttpNotesApi {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let op = Operation::ListNotes;
        let body = self.client.execute(ApiRequest::get(op, NOTES_PATH)).await?;
        decode(op, &body)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let op = Operation::CreateNote;
        let body = self
            .client
            .execute(ApiRequest::post(op, NOTES_PATH, draft)?)
            .await?;
        decode(op, &body)
    }

    async fn update_note(&self, id: NoteId, patch: &NotePatch) -> Result<Note> {
        let op = if patch.edits_fields() {
            Operation::UpdateNote
        } else {
            Operation::ArchiveNote
        };
        let body = self
            .client
            .execute(ApiRequest::put(op, note_path(id), patch)?)
            .await?;
        decode(op, &body)
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        self.client
            .execute(ApiRequest::delete(Operation::DeleteNote, note_path(id)))
            .await?;
        Ok(())
    }
}
