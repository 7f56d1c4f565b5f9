pub mod auth;
pub mod delete;
pub mod edit;
pub mod events;
pub mod new;
pub mod notes;

use std::fmt;

use anyhow::Result;
use chrono::TimeZone;
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;
use tracing::{error, warn};

use dayboard_core::{ApiError, ApiResult};

use crate::editor::EventForm;

/// Log a failed remote call before handing the error up, so every
/// user-facing failure leaves a diagnostic behind.
pub(crate) fn trace_failure<T>(result: ApiResult<T>, what: &str) -> ApiResult<T> {
    result.inspect_err(|e| error!(error = %e, what, "request failed"))
}

/// The mutation landed; only the follow-up reload broke. Report that
/// honestly instead of making the save look failed.
pub(crate) fn warn_reload_failure(e: &ApiError) {
    warn!(error = %e, "reload after successful mutation failed");
    eprintln!(
        "{}",
        format!("Saved, but refreshing the list failed: {e}").yellow()
    );
}

/// Fill in the open form's fields interactively, using the seeded values
/// as defaults so a retry (or an edit) starts from what is already there.
pub(crate) fn prompt_form<Tz>(form: &mut EventForm<Tz>, ask_all_day: bool) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    form.title = Input::new()
        .with_prompt("  Title")
        .with_initial_text(form.title.clone())
        .interact_text()?;

    form.description = Input::new()
        .with_prompt("  Description (optional)")
        .with_initial_text(form.description.clone())
        .allow_empty(true)
        .interact_text()?;

    form.start = Input::new()
        .with_prompt("  Start (YYYY-MM-DDTHH:MM)")
        .with_initial_text(form.start.clone())
        .interact_text()?;

    form.end = Input::new()
        .with_prompt("  End (YYYY-MM-DDTHH:MM)")
        .with_initial_text(form.end.clone())
        .interact_text()?;

    if ask_all_day {
        form.all_day = Confirm::new()
            .with_prompt("  All day?")
            .default(form.all_day)
            .interact()?;
    }

    Ok(())
}
