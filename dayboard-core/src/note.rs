//! Notes board types.

use serde::{Deserialize, Serialize};

/// A persisted note, as returned by the notes store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
}

/// An outgoing note payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteDraft {
    pub text: String,
}

/// Sort notes newest-first.
///
/// Orders by id descending, which approximates recency only when the store
/// assigns ids monotonically. Confirm against the actual backend before
/// relying on this for anything stronger than display order.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.id.cmp(&a.id));
}
