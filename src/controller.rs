//! Collection controllers.
//!
//! `CalendarController` and `NotesBoard` own the authoritative in-memory
//! collections and orchestrate the full mutate-then-reload cycle: submit a
//! draft, send create/update/delete through the store, and on success
//! reload the whole collection. On failure everything stays as it was
//! before the attempt - the form remains open and seeded, the collection
//! untouched - so the user can retry.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};

use dayboard_core::note::sort_newest_first;
use dayboard_core::{ApiError, ApiResult, Event, Note, NoteDraft};

use crate::editor::{EventForm, FormSeed, Slot};
use crate::store::{EventStore, NoteStore};

/// Outcome of a save attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Draft persisted and form closed. A reload that fails afterwards is
    /// reported here, not as a save failure - the mutation went through.
    Saved { reload_error: Option<ApiError> },
    /// No form is open.
    NoForm,
    /// A save or delete is already in flight.
    Busy,
}

/// Outcome of a delete attempt.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted { reload_error: Option<ApiError> },
    /// Not confirmed, or the form is not editing a persisted event.
    Cancelled,
    Busy,
}

pub struct CalendarController<S, Tz>
where
    S: EventStore,
    Tz: TimeZone,
{
    store: S,
    tz: Tz,
    events: Vec<Event>,
    form: Option<EventForm<Tz>>,
}

impl<S, Tz> CalendarController<S, Tz>
where
    S: EventStore,
    Tz: TimeZone + Clone,
    Tz::Offset: fmt::Display,
{
    pub fn new(store: S, tz: Tz) -> Self {
        CalendarController {
            store,
            tz,
            events: Vec::new(),
            form: None,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn form(&self) -> Option<&EventForm<Tz>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EventForm<Tz>> {
        self.form.as_mut()
    }

    /// Replace the collection with a fresh load from the store.
    pub async fn load(&mut self) -> ApiResult<()> {
        self.events = self.store.list_events().await?;
        debug!(count = self.events.len(), "loaded events");
        Ok(())
    }

    /// Open the editor for a new event, seeded from a slot when one was
    /// selected.
    pub fn open_new(&mut self, slot: Option<Slot>, now: DateTime<Utc>) {
        let seed = match slot {
            Some(slot) => FormSeed::Slot(slot),
            None => FormSeed::Blank,
        };
        self.form = Some(EventForm::open(seed, self.tz.clone(), now));
    }

    /// Open the editor on an existing event.
    pub fn open_edit(&mut self, event: Event, now: DateTime<Utc>) {
        self.form = Some(EventForm::open(
            FormSeed::Existing(event),
            self.tz.clone(),
            now,
        ));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form: create when the draft has no id, update
    /// otherwise. On success the form closes and the collection reloads.
    pub async fn save(&mut self) -> ApiResult<SaveOutcome> {
        let (draft, target) = {
            let Some(form) = self.form.as_mut() else {
                return Ok(SaveOutcome::NoForm);
            };
            if !form.try_begin() {
                return Ok(SaveOutcome::Busy);
            }
            match form.draft() {
                Ok(draft) => (draft, form.editing_id().map(str::to_string)),
                Err(e) => {
                    form.finish();
                    return Err(e);
                }
            }
        };

        let result = match &target {
            Some(id) => self.store.update_event(id, &draft).await,
            None => self.store.create_event(&draft).await,
        };

        match result {
            Ok(saved) => {
                debug!(id = %saved.id, "event saved");
                self.form = None;
                let reload_error = self.load().await.err();
                Ok(SaveOutcome::Saved { reload_error })
            }
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.finish();
                }
                Err(e)
            }
        }
    }

    /// Delete the event the form is editing. Requires explicit confirmation;
    /// without it no request is made and nothing changes.
    pub async fn delete(&mut self, confirmed: bool) -> ApiResult<DeleteOutcome> {
        if !confirmed {
            return Ok(DeleteOutcome::Cancelled);
        }

        let id = {
            let Some(form) = self.form.as_mut() else {
                return Ok(DeleteOutcome::Cancelled);
            };
            let Some(id) = form.editing_id().map(str::to_string) else {
                return Ok(DeleteOutcome::Cancelled);
            };
            if !form.try_begin() {
                return Ok(DeleteOutcome::Busy);
            }
            id
        };

        match self.store.delete_event(&id).await {
            Ok(_) => {
                debug!(%id, "event deleted");
                self.form = None;
                let reload_error = self.load().await.err();
                Ok(DeleteOutcome::Deleted { reload_error })
            }
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.finish();
                }
                Err(e)
            }
        }
    }
}

pub struct NotesBoard<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
}

impl<S: NoteStore> NotesBoard<S> {
    pub fn new(store: S) -> Self {
        NotesBoard {
            store,
            notes: Vec::new(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Reload the board, newest note first.
    pub async fn load(&mut self) -> ApiResult<()> {
        let mut notes = self.store.list_notes().await?;
        sort_newest_first(&mut notes);
        self.notes = notes;
        debug!(count = self.notes.len(), "loaded notes");
        Ok(())
    }

    pub async fn add(&mut self, text: &str) -> ApiResult<Note> {
        let draft = note_draft(text)?;
        let created = self.store.create_note(&draft).await?;
        if let Err(e) = self.load().await {
            warn!(error = %e, "note saved but reload failed");
        }
        Ok(created)
    }

    pub async fn edit(&mut self, id: i64, text: &str) -> ApiResult<Note> {
        let draft = note_draft(text)?;
        let updated = self.store.update_note(id, &draft).await?;
        if let Err(e) = self.load().await {
            warn!(error = %e, "note saved but reload failed");
        }
        Ok(updated)
    }

    /// Remove a note. Like event deletion, requires explicit confirmation.
    pub async fn remove(&mut self, id: i64, confirmed: bool) -> ApiResult<DeleteOutcome> {
        if !confirmed {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.store.delete_note(id).await?;
        let reload_error = self.load().await.err();
        Ok(DeleteOutcome::Deleted { reload_error })
    }
}

fn note_draft(text: &str) -> ApiResult<NoteDraft> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::Validation("note text is required".to_string()));
    }
    Ok(NoteDraft {
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::TimeZone as _;
    use chrono_tz::Europe::Berlin;
    use chrono_tz::Tz;
    use serde_json::json;

    use dayboard_core::{EventDraft, ResponseBody};

    /// A recorded call to the mock store.
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(serde_json::Value),
        Update(String, serde_json::Value),
        Delete(String),
    }

    /// In-memory events store that records calls and can be configured to
    /// fail mutations.
    #[derive(Default)]
    struct MockEventStore {
        events: Mutex<Vec<Event>>,
        calls: Mutex<Vec<Call>>,
        fail_mutations: bool,
        fail_list: bool,
    }

    impl MockEventStore {
        fn with_events(events: Vec<Event>) -> Self {
            MockEventStore {
                events: Mutex::new(events),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            MockEventStore {
                fail_mutations: true,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn server_error() -> ApiError {
            ApiError::Server {
                status: 500,
                body: ResponseBody::from_text(r#"{"error":"boom"}"#),
            }
        }
    }

    impl EventStore for MockEventStore {
        async fn list_events(&self) -> ApiResult<Vec<Event>> {
            self.calls.lock().unwrap().push(Call::List);
            if self.fail_list {
                return Err(Self::server_error());
            }
            Ok(self.events.lock().unwrap().clone())
        }

        async fn create_event(&self, draft: &EventDraft) -> ApiResult<Event> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Create(serde_json::to_value(draft).unwrap()));
            if self.fail_mutations {
                return Err(Self::server_error());
            }
            let event = Event {
                id: "assigned-1".to_string(),
                title: draft.title.clone().unwrap_or_default(),
                description: draft.description.clone().unwrap_or_default(),
                start: draft.start.unwrap(),
                end: draft.end.unwrap(),
                all_day: draft.all_day.unwrap_or(false),
            };
            self.events.lock().unwrap().push(event.clone());
            Ok(event)
        }

        async fn update_event(&self, id: &str, draft: &EventDraft) -> ApiResult<Event> {
            self.calls.lock().unwrap().push(Call::Update(
                id.to_string(),
                serde_json::to_value(draft).unwrap(),
            ));
            if self.fail_mutations {
                return Err(Self::server_error());
            }
            let mut events = self.events.lock().unwrap();
            let event = events
                .iter_mut()
                .find(|e| e.id == id)
                .expect("unknown event id");
            if let Some(title) = &draft.title {
                event.title = title.clone();
            }
            if let Some(description) = &draft.description {
                event.description = description.clone();
            }
            if let Some(start) = draft.start {
                event.start = start;
            }
            if let Some(end) = draft.end {
                event.end = end;
            }
            if let Some(all_day) = draft.all_day {
                event.all_day = all_day;
            }
            Ok(event.clone())
        }

        async fn delete_event(&self, id: &str) -> ApiResult<ResponseBody> {
            self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
            if self.fail_mutations {
                return Err(Self::server_error());
            }
            self.events.lock().unwrap().retain(|e| e.id != id);
            Ok(ResponseBody::Empty)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn persisted_event() -> Event {
        Event {
            id: "ev-1".to_string(),
            title: "Review".to_string(),
            description: String::new(),
            start: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
            all_day: false,
        }
    }

    #[tokio::test]
    async fn create_sends_utc_adjusted_payload_and_reloads() {
        let store = MockEventStore::default();
        let mut controller = CalendarController::new(&store, Berlin);

        controller.open_new(None, now());
        let form = controller.form_mut().unwrap();
        form.title = "Standup".to_string();
        form.start = "2024-03-01T09:00".to_string();
        form.end = "2024-03-01T09:30".to_string();

        let outcome = controller.save().await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved { reload_error: None }));

        // Berlin 09:00 is 08:00 UTC in March
        assert_eq!(
            store.calls(),
            vec![
                Call::Create(json!({
                    "title": "Standup",
                    "description": "",
                    "start": "2024-03-01T08:00:00.000Z",
                    "end": "2024-03-01T08:30:00.000Z",
                    "allDay": false,
                })),
                Call::List,
            ]
        );

        // Reload picked up the persisted entity with its assigned id
        assert_eq!(controller.events().len(), 1);
        assert!(!controller.events()[0].id.is_empty());
        assert!(controller.form().is_none());
    }

    #[tokio::test]
    async fn update_targets_the_existing_id() {
        let store = MockEventStore::with_events(vec![persisted_event()]);
        let mut controller = CalendarController::new(&store, Tz::UTC);
        controller.load().await.unwrap();

        let event = controller.events()[0].clone();
        controller.open_edit(event, now());
        controller.form_mut().unwrap().title = "Design review".to_string();

        controller.save().await.unwrap();

        let calls = store.calls();
        assert!(matches!(&calls[1], Call::Update(id, _) if id == "ev-1"));
        assert_eq!(controller.events()[0].title, "Design review");
    }

    #[tokio::test]
    async fn failed_save_leaves_form_open_and_collection_unchanged() {
        let store = MockEventStore::failing();
        let mut controller = CalendarController::new(&store, Tz::UTC);

        controller.open_new(None, now());
        let form = controller.form_mut().unwrap();
        form.title = "Standup".to_string();
        form.start = "2024-03-01T09:00".to_string();
        form.end = "2024-03-01T09:30".to_string();

        let err = controller.save().await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));

        let form = controller.form().expect("form should stay open");
        assert_eq!(form.title, "Standup");
        assert!(!form.is_busy());
        assert!(controller.events().is_empty());
        // No reload was attempted after the failure
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn validation_failure_issues_no_request() {
        let store = MockEventStore::default();
        let mut controller = CalendarController::new(&store, Tz::UTC);

        controller.open_new(None, now());
        let form = controller.form_mut().unwrap();
        form.title = "Standup".to_string();
        form.start = "not a timestamp".to_string();

        let err = controller.save().await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.calls().is_empty());
        assert!(!controller.form().unwrap().is_busy());
    }

    #[tokio::test]
    async fn delete_without_confirmation_makes_no_call() {
        let store = MockEventStore::with_events(vec![persisted_event()]);
        let mut controller = CalendarController::new(&store, Tz::UTC);
        controller.load().await.unwrap();

        let event = controller.events()[0].clone();
        controller.open_edit(event, now());

        let outcome = controller.delete(false).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Cancelled));
        // Only the initial load hit the store
        assert_eq!(store.calls(), vec![Call::List]);
        assert_eq!(controller.events().len(), 1);
        assert!(controller.form().is_some());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_reloads() {
        let store = MockEventStore::with_events(vec![persisted_event()]);
        let mut controller = CalendarController::new(&store, Tz::UTC);
        controller.load().await.unwrap();

        let event = controller.events()[0].clone();
        controller.open_edit(event, now());

        let outcome = controller.delete(true).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted { reload_error: None }));
        assert!(controller.events().is_empty());
        assert!(controller.form().is_none());
    }

    #[tokio::test]
    async fn save_still_counts_when_the_reload_fails() {
        let store = MockEventStore {
            fail_list: true,
            ..Default::default()
        };
        let mut controller = CalendarController::new(&store, Tz::UTC);

        controller.open_new(None, now());
        let form = controller.form_mut().unwrap();
        form.title = "Standup".to_string();
        form.start = "2024-03-01T09:00".to_string();
        form.end = "2024-03-01T09:30".to_string();

        let outcome = controller.save().await.unwrap();
        assert!(matches!(
            outcome,
            SaveOutcome::Saved {
                reload_error: Some(ApiError::Server { status: 500, .. })
            }
        ));
        // The save went through and the form closed; only the reload broke.
        assert!(controller.form().is_none());
        assert_eq!(
            store.calls().iter().filter(|c| **c == Call::List).count(),
            1
        );
    }

    #[tokio::test]
    async fn delete_still_counts_when_the_reload_fails() {
        let store = MockEventStore {
            events: Mutex::new(vec![persisted_event()]),
            fail_list: true,
            ..Default::default()
        };
        let mut controller = CalendarController::new(&store, Tz::UTC);
        controller.open_edit(persisted_event(), now());

        let outcome = controller.delete(true).await.unwrap();
        assert!(matches!(
            outcome,
            DeleteOutcome::Deleted {
                reload_error: Some(_)
            }
        ));
        assert!(controller.form().is_none());
        assert!(store.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_save_while_busy_is_refused() {
        let store = MockEventStore::default();
        let mut controller = CalendarController::new(&store, Tz::UTC);
        controller.open_new(None, now());
        controller.form_mut().unwrap().try_begin();

        let outcome = controller.save().await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Busy));
        assert!(store.calls().is_empty());
    }

    // --- Notes board ---

    #[derive(Default)]
    struct MockNoteStore {
        notes: Mutex<Vec<Note>>,
        calls: Mutex<Vec<Call>>,
        next_id: Mutex<i64>,
        fail_mutations: bool,
    }

    impl NoteStore for MockNoteStore {
        async fn list_notes(&self) -> ApiResult<Vec<Note>> {
            self.calls.lock().unwrap().push(Call::List);
            Ok(self.notes.lock().unwrap().clone())
        }

        async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Create(serde_json::to_value(draft).unwrap()));
            if self.fail_mutations {
                return Err(MockEventStore::server_error());
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let note = Note {
                id: *next_id,
                text: draft.text.clone(),
            };
            self.notes.lock().unwrap().push(note.clone());
            Ok(note)
        }

        async fn update_note(&self, id: i64, draft: &NoteDraft) -> ApiResult<Note> {
            self.calls.lock().unwrap().push(Call::Update(
                id.to_string(),
                serde_json::to_value(draft).unwrap(),
            ));
            let mut notes = self.notes.lock().unwrap();
            let note = notes.iter_mut().find(|n| n.id == id).expect("unknown id");
            note.text = draft.text.clone();
            Ok(note.clone())
        }

        async fn delete_note(&self, id: i64) -> ApiResult<ResponseBody> {
            self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
            self.notes.lock().unwrap().retain(|n| n.id != id);
            Ok(ResponseBody::Empty)
        }
    }

    #[tokio::test]
    async fn board_lists_newest_note_first() {
        let store = MockNoteStore::default();
        let mut board = NotesBoard::new(&store);

        board.add("first").await.unwrap();
        board.add("second").await.unwrap();

        let texts: Vec<&str> = board.notes().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn board_reloads_after_every_mutation() {
        let store = MockNoteStore::default();
        let mut board = NotesBoard::new(&store);

        let note = board.add("todo").await.unwrap();
        board.edit(note.id, "done").await.unwrap();
        board.remove(note.id, true).await.unwrap();

        let reloads = store
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == Call::List)
            .count();
        assert_eq!(reloads, 3);
        assert!(board.notes().is_empty());
    }

    #[tokio::test]
    async fn board_rejects_blank_note() {
        let store = MockNoteStore::default();
        let mut board = NotesBoard::new(&store);
        let err = board.add("   ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unconfirmed_note_removal_makes_no_call() {
        let store = MockNoteStore::default();
        let mut board = NotesBoard::new(&store);
        let outcome = board.remove(1, false).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Cancelled));
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_board_mutation_leaves_notes_unchanged() {
        let store = MockNoteStore {
            fail_mutations: true,
            ..Default::default()
        };
        let mut board = NotesBoard::new(&store);
        let err = board.add("todo").await.unwrap_err();
        assert!(matches!(err, ApiError::Server { .. }));
        assert!(board.notes().is_empty());
    }
}
