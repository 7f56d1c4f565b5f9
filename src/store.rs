//! Store traits for the remote collections.
//!
//! The controllers are written against these traits so the mutate-then-reload
//! cycle can be exercised without a network. `ApiClient` is the production
//! implementation for both.

use dayboard_core::{ApiResult, Event, EventDraft, Note, NoteDraft, ResponseBody};

/// Remote events collection.
pub trait EventStore {
    async fn list_events(&self) -> ApiResult<Vec<Event>>;
    async fn create_event(&self, draft: &EventDraft) -> ApiResult<Event>;
    async fn update_event(&self, id: &str, draft: &EventDraft) -> ApiResult<Event>;
    /// Delete returns whatever body the store sends, best-effort parsed.
    async fn delete_event(&self, id: &str) -> ApiResult<ResponseBody>;
}

/// Remote notes collection.
pub trait NoteStore {
    async fn list_notes(&self) -> ApiResult<Vec<Note>>;
    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note>;
    async fn update_note(&self, id: i64, draft: &NoteDraft) -> ApiResult<Note>;
    async fn delete_note(&self, id: i64) -> ApiResult<ResponseBody>;
}

// Controllers take their store by value; these impls let callers hand over
// a borrowed client instead.

impl<S: EventStore> EventStore for &S {
    async fn list_events(&self) -> ApiResult<Vec<Event>> {
        (**self).list_events().await
    }

    async fn create_event(&self, draft: &EventDraft) -> ApiResult<Event> {
        (**self).create_event(draft).await
    }

    async fn update_event(&self, id: &str, draft: &EventDraft) -> ApiResult<Event> {
        (**self).update_event(id, draft).await
    }

    async fn delete_event(&self, id: &str) -> ApiResult<ResponseBody> {
        (**self).delete_event(id).await
    }
}

impl<S: NoteStore> NoteStore for &S {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        (**self).list_notes().await
    }

    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        (**self).create_note(draft).await
    }

    async fn update_note(&self, id: i64, draft: &NoteDraft) -> ApiResult<Note> {
        (**self).update_note(id, draft).await
    }

    async fn delete_note(&self, id: i64) -> ApiResult<ResponseBody> {
        (**self).delete_note(id).await
    }
}
