//! The event editor's form state.
//!
//! A form holds the draft fields for a single event while a human edits
//! them. Timestamps live here as minute-precision local strings; they are
//! parsed back into UTC instants only on submit. The form never performs
//! network I/O - it produces an `EventDraft` and leaves the request to the
//! calendar controller.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};

use dayboard_core::timestamp::{parse_edit_string, to_edit_string};
use dayboard_core::{ApiError, Event, EventDraft};

/// A user-selected time range used to seed a new draft.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slot {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// What the form was opened on.
pub enum FormSeed {
    /// Editing an existing event.
    Existing(Event),
    /// Creating from a selected time range.
    Slot(Slot),
    /// Creating with no context.
    Blank,
}

pub struct EventForm<Tz: TimeZone> {
    tz: Tz,
    /// Id of the event being edited; `None` for a new draft.
    editing: Option<String>,
    pub title: String,
    pub description: String,
    /// Edit representation (`YYYY-MM-DDTHH:MM`, local to `tz`).
    pub start: String,
    pub end: String,
    pub all_day: bool,
    busy: bool,
}

impl<Tz> EventForm<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    /// Open the form, seeding the fields from the given context.
    ///
    /// `now` feeds the slot defaults: a slot without a start begins now,
    /// a slot without an end runs one hour past its start.
    pub fn open(seed: FormSeed, tz: Tz, now: DateTime<Utc>) -> Self {
        let mut form = EventForm {
            tz,
            editing: None,
            title: String::new(),
            description: String::new(),
            start: String::new(),
            end: String::new(),
            all_day: false,
            busy: false,
        };

        match seed {
            FormSeed::Existing(event) => {
                form.editing = Some(event.id);
                form.title = event.title;
                form.description = event.description;
                form.start = to_edit_string(event.start, &form.tz);
                form.end = to_edit_string(event.end, &form.tz);
                form.all_day = event.all_day;
            }
            FormSeed::Slot(slot) => {
                let start = slot.start.unwrap_or(now);
                let end = slot.end.unwrap_or(start + Duration::hours(1));
                form.start = to_edit_string(start, &form.tz);
                form.end = to_edit_string(end, &form.tz);
            }
            FormSeed::Blank => {}
        }

        form
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark a save/delete as in flight. Returns false if one already is,
    /// in which case the caller must not start another.
    pub fn try_begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Clear the busy flag. Called after every attempt, success or failure.
    pub fn finish(&mut self) {
        self.busy = false;
    }

    /// Validate the fields and produce the outgoing draft.
    ///
    /// Title and description are trimmed; an empty title or an unparseable
    /// timestamp is rejected before any request is issued.
    pub fn draft(&self) -> Result<EventDraft, ApiError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::Validation("title is required".to_string()));
        }

        let start = parse_edit_string(&self.start, &self.tz)?;
        let end = parse_edit_string(&self.end, &self.tz)?;

        Ok(EventDraft {
            title: Some(title.to_string()),
            description: Some(self.description.trim().to_string()),
            start: Some(start),
            end: Some(end),
            all_day: Some(self.all_day),
        })
    }
}
