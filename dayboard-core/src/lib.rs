//! Core types for dayboard.
//!
//! This crate provides the types shared between the dayboard CLI and any
//! other front end talking to the same stores:
//! - `Event`, `EventDraft` and their wire representations
//! - `Note`, `NoteDraft` for the notes board
//! - `timestamp` for converting between typed instants and the
//!   minute-precision editor strings
//! - `error` for the remote-access error taxonomy

pub mod error;
pub mod event;
pub mod note;
pub mod timestamp;

pub use error::{ApiError, ApiResult, ResponseBody};
pub use event::{Event, EventDraft};
pub use note::{Note, NoteDraft};
