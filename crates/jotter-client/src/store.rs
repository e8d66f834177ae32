//! In-memory notes collection reconciled with the server.
//!
//! The server is the source of truth: nothing in the collection changes
//! until the server has answered, and what it answers replaces the local
//! copy. Every mutating method takes `&mut self`, so a store has at most one
//! call in flight and responses are applied in the order they were awaited.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use jotter_core::{Error, Note, NoteDraft, NoteId, NotePatch, Result, TagSet};

use crate::api::NotesApi;

/// Which half of the collection to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotesView {
    #[default]
    Active,
    Archived,
}

impl NotesView {
    fn includes(&self, note: &Note) -> bool {
        match self {
            Self::Active => !note.is_archived,
            Self::Archived => note.is_archived,
        }
    }
}

impl FromStr for NotesView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "active" | "actives" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(Error::Config(format!("Unknown notes view: {}", s))),
        }
    }
}

impl fmt::Display for NotesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// The logged-in user's notes, newest creations first.
pub struct NotesStore<A> {
    api: A,
    notes: Vec<Note>,
}

impl<A: NotesApi> NotesStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes in `view`, in collection order.
    pub fn view(&self, view: NotesView) -> Vec<&Note> {
        self.notes.iter().filter(|n| view.includes(n)).collect()
    }

    /// Notes in `view` with a tag containing `query`, ignoring case.
    pub fn search(&self, view: NotesView, query: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| view.includes(n) && n.matches_tag_query(query))
            .collect()
    }

    /// Forget every note, e.g. on logout.
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Replace the whole collection with the server's.
    pub async fn load(&mut self) -> Result<usize> {
        let notes = self.api.list_notes().await?;
        info!(
            subsystem = "store",
            component = "notes_store",
            op = "load",
            result_count = notes.len(),
            "Notes loaded"
        );
        self.notes = notes;
        Ok(self.notes.len())
    }

    /// Create a note and put the server's copy at the front.
    ///
    /// A draft failing validation (including one without tags) is rejected
    /// before any request is sent.
    pub async fn create(&mut self, draft: NoteDraft) -> Result<Note> {
        draft.validate()?;
        let note = self.api.create_note(&draft).await?;
        info!(
            subsystem = "store",
            component = "notes_store",
            op = "create",
            note_id = note.id,
            "Note created"
        );
        self.notes.insert(0, note.clone());
        Ok(note)
    }

    /// Send a partial update and reconcile the returned note in place.
    ///
    /// If `id` is not in the local collection, or the server answers with a
    /// different note, the answer is returned but nothing local changes.
    pub async fn update(&mut self, id: NoteId, patch: NotePatch) -> Result<Note> {
        patch.validate()?;
        let note = self.api.update_note(id, &patch).await?;
        if note.id != id {
            warn!(
                subsystem = "store",
                component = "notes_store",
                op = "update",
                note_id = id,
                returned_id = note.id,
                "Server returned a different note id, collection left unchanged"
            );
            return Ok(note);
        }
        self.reconcile(id, note.clone());
        Ok(note)
    }

    /// Replace title, content and tags.
    pub async fn edit(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: TagSet,
    ) -> Result<Note> {
        self.update(id, NotePatch::edit(title, content, tags.into_vec()))
            .await
    }

    pub async fn set_archived(&mut self, id: NoteId, archived: bool) -> Result<Note> {
        self.update(id, NotePatch::archive(archived)).await
    }

    /// Flip the archive flag of a note held locally.
    pub async fn toggle_archive(&mut self, id: NoteId) -> Result<Note> {
        let current = self.get(id).ok_or(Error::NoteNotFound(id))?.is_archived;
        self.set_archived(id, !current).await
    }

    /// Delete on the server, then locally. A failed call leaves the
    /// collection as it was.
    pub async fn delete(&mut self, id: NoteId) -> Result<()> {
        self.api.delete_note(id).await?;
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        info!(
            subsystem = "store",
            component = "notes_store",
            op = "delete",
            note_id = id,
            removed = before != self.notes.len(),
            "Note deleted"
        );
        Ok(())
    }

    fn reconcile(&mut self, id: NoteId, note: Note) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(slot) => {
                debug!(
                    subsystem = "store",
                    component = "notes_store",
                    op = "reconcile",
                    note_id = id,
                    "Replacing note with server copy"
                );
                *slot = note;
                true
            }
            None => {
                warn!(
                    subsystem = "store",
                    component = "notes_store",
                    op = "reconcile",
                    note_id = id,
                    "Updated note is not in the local collection"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{note, MockCall, MockNotesApi, MockReply};
    use jotter_core::ValidationError;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    async fn loaded(api: MockNotesApi, notes: Vec<Note>) -> NotesStore<MockNotesApi> {
        let mut store = NotesStore::new(api.with_reply(MockReply::Notes(notes)));
        store.load().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_load_replaces_collection() {
        let api = MockNotesApi::new()
            .with_reply(MockReply::Notes(vec![note(1, "a", &["x"], false)]))
            .with_reply(MockReply::Notes(vec![
                note(2, "b", &["x"], false),
                note(3, "c", &["y"], true),
            ]));
        let mut store = NotesStore::new(api);

        assert_eq!(store.load().await.unwrap(), 1);
        assert_eq!(store.load().await.unwrap(), 2);
        let ids: Vec<_> = store.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_create_prepends_server_note() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![note(1, "Old", &["x"], false)]).await;

        let created = note(42, "Groceries", &["home"], false);
        api.push_reply(MockReply::Note(created.clone()));

        let draft = NoteDraft::new("Groceries", "Milk, eggs", tags(&["home"]));
        let result = store.create(draft.clone()).await.unwrap();

        assert_eq!(result, created);
        assert_eq!(store.notes()[0].id, 42);
        assert_eq!(store.notes()[1].id, 1);
        assert_eq!(api.calls()[1], MockCall::Create(draft));
    }

    #[tokio::test]
    async fn test_create_without_tags_never_dispatches() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![]).await;

        let err = store
            .create(NoteDraft::new("Groceries", "Milk, eggs", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingTags { min: 1 })
        ));
        assert_eq!(api.calls(), vec![MockCall::List]);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_only_matching_entry() {
        let api = MockNotesApi::new();
        let mut store = loaded(
            api.clone(),
            vec![
                note(1, "a", &["x"], false),
                note(2, "b", &["x"], false),
                note(3, "c", &["x"], false),
            ],
        )
        .await;

        let mut server_copy = note(2, "edited", &["y", "z"], false);
        server_copy.content = "server says".to_string();
        api.push_reply(MockReply::Note(server_copy.clone()));

        let result = store
            .edit(2, "edited", "mine", TagSet::try_from(tags(&["y", "z"])).unwrap())
            .await
            .unwrap();

        assert_eq!(result, server_copy);
        assert_eq!(store.notes()[0], note(1, "a", &["x"], false));
        assert_eq!(store.notes()[1], server_copy);
        assert_eq!(store.notes()[2], note(3, "c", &["x"], false));
    }

    #[tokio::test]
    async fn test_update_with_empty_tags_never_dispatches() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![note(1, "a", &["x"], false)]).await;

        let err = store
            .update(1, NotePatch::edit("a", "b", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(api.calls(), vec![MockCall::List]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_local_noop() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![note(1, "a", &["x"], false)]).await;
        api.push_reply(MockReply::Note(note(9, "ghost", &["x"], true)));

        let result = store.set_archived(9, true).await.unwrap();

        assert_eq!(result.id, 9);
        assert_eq!(store.notes(), &[note(1, "a", &["x"], false)]);
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_keeps_collection() {
        let api = MockNotesApi::new();
        let held = vec![note(1, "a", &["x"], false), note(2, "b", &["x"], false)];
        let mut store = loaded(api.clone(), held.clone()).await;
        api.push_reply(MockReply::Note(note(2, "other", &["y"], true)));

        let result = store.set_archived(1, true).await.unwrap();

        assert_eq!(result.id, 2);
        assert_eq!(store.notes(), held.as_slice());
    }

    #[tokio::test]
    async fn test_toggle_archive_sends_inverted_flag() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![note(5, "a", &["x"], false)]).await;
        api.push_reply(MockReply::Note(note(5, "a", &["x"], true)));

        let result = store.toggle_archive(5).await.unwrap();

        assert!(result.is_archived);
        assert!(store.get(5).unwrap().is_archived);
        assert_eq!(
            api.calls()[1],
            MockCall::Update(5, NotePatch::archive(true))
        );
    }

    #[tokio::test]
    async fn test_toggle_archive_unknown_note() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![]).await;

        let err = store.toggle_archive(5).await.unwrap_err();

        assert!(matches!(err, Error::NoteNotFound(5)));
        assert_eq!(api.calls(), vec![MockCall::List]);
    }

    #[tokio::test]
    async fn test_delete_removes_after_confirmation() {
        let api = MockNotesApi::new();
        let mut store = loaded(
            api.clone(),
            vec![note(7, "a", &["x"], false), note(8, "b", &["x"], false)],
        )
        .await;
        api.push_reply(MockReply::Deleted);

        store.delete(7).await.unwrap();

        let ids: Vec<_> = store.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![8]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_collection() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![note(7, "a", &["x"], false)]).await;
        api.push_reply(MockReply::Status(500, None));

        let err = store.delete(7).await.unwrap_err();

        assert!(matches!(err, Error::Server { status: 500, .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_collection() {
        let api = MockNotesApi::new();
        let mut store = loaded(api.clone(), vec![note(1, "a", &["x"], false)]).await;
        api.push_reply(MockReply::Status(403, None));

        let err = store.set_archived(1, true).await.unwrap_err();

        assert!(err.is_authorization());
        assert!(!store.get(1).unwrap().is_archived);
    }

    #[tokio::test]
    async fn test_views_and_search() {
        let api = MockNotesApi::new();
        let store = loaded(
            api,
            vec![
                note(1, "a", &["Home"], false),
                note(2, "b", &["work"], false),
                note(3, "c", &["homework"], true),
            ],
        )
        .await;

        let ids = |notes: Vec<&Note>| notes.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids(store.view(NotesView::Active)), vec![1, 2]);
        assert_eq!(ids(store.view(NotesView::Archived)), vec![3]);
        assert_eq!(ids(store.search(NotesView::Active, "HOME")), vec![1]);
        assert_eq!(ids(store.search(NotesView::Archived, "work")), vec![3]);
        assert_eq!(ids(store.search(NotesView::Active, "")), vec![1, 2]);
        assert!(store.search(NotesView::Active, "nothing").is_empty());
    }

    #[test]
    fn test_notes_view_from_str() {
        assert_eq!("actives".parse::<NotesView>().unwrap(), NotesView::Active);
        assert_eq!("Archived".parse::<NotesView>().unwrap(), NotesView::Archived);
        assert!("trash".parse::<NotesView>().is_err());
    }
}
