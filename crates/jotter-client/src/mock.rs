//! In-memory [`NotesApi`] double for store tests.
//!
//! Replies are scripted in order; every call is recorded so tests can assert
//! that a rejected operation never reached the "network".

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use jotter_core::{Error, Note, NoteDraft, NoteId, NotePatch, Result};

use crate::api::NotesApi;

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List,
    Create(NoteDraft),
    Update(NoteId, NotePatch),
    Delete(NoteId),
}

#[derive(Debug, Clone)]
pub enum MockReply {
    Notes(Vec<Note>),
    Note(Note),
    Deleted,
    /// Error status with an optional server message.
    Status(u16, Option<String>),
}

#[derive(Clone, Default)]
pub struct MockNotesApi {
    calls: Arc<Mutex<Vec<MockCall>>>,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
}

impl MockNotesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        self.push_reply(reply);
        self
    }

    /// Script the next reply on a double already handed to a store.
    pub fn push_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MockCall) -> MockReply {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }
}

fn into_error(status: u16, msg: Option<String>) -> Error {
    if status == 403 {
        Error::Authorization(msg.unwrap_or_default())
    } else {
        Error::Server {
            status,
            message: msg.unwrap_or_else(|| "fallback".to_string()),
        }
    }
}

#[async_trait]
impl NotesApi for MockNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        match self.record(MockCall::List) {
            MockReply::Notes(notes) => Ok(notes),
            MockReply::Status(status, msg) => Err(into_error(status, msg)),
            other => panic!("unexpected reply for list: {:?}", other),
        }
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        match self.record(MockCall::Create(draft.clone())) {
            MockReply::Note(note) => Ok(note),
            MockReply::Status(status, msg) => Err(into_error(status, msg)),
            other => panic!("unexpected reply for create: {:?}", other),
        }
    }

    async fn update_note(&self, id: NoteId, patch: &NotePatch) -> Result<Note> {
        match self.record(MockCall::Update(id, patch.clone())) {
            MockReply::Note(note) => Ok(note),
            MockReply::Status(status, msg) => Err(into_error(status, msg)),
            other => panic!("unexpected reply for update: {:?}", other),
        }
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        match self.record(MockCall::Delete(id)) {
            MockReply::Deleted => Ok(()),
            MockReply::Status(status, msg) => Err(into_error(status, msg)),
            other => panic!("unexpected reply for delete: {:?}", other),
        }
    }
}

/// Build a note with fixed owner and timestamp.
pub fn note(id: NoteId, title: &str, tags: &[&str], is_archived: bool) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: format!("{} body", title),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_archived,
        user_id: 1,
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
    }
}
