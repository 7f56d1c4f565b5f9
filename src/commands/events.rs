use anyhow::Result;
use chrono::{DateTime, Local, Utc};

use dayboard_core::Event;
use dayboard_core::timestamp::parse_edit_string;

use crate::client::ApiClient;
use crate::commands::trace_failure;
use crate::controller::CalendarController;
use crate::render::render_list;
use crate::utils::tui::request_spinner;

pub async fn run(client: &ApiClient, from: Option<String>, to: Option<String>) -> Result<()> {
    // Range bounds are interpreted in local time, like the slot args of `new`
    let from = from
        .as_deref()
        .map(|s| parse_edit_string(s, &Local))
        .transpose()?;
    let to = to
        .as_deref()
        .map(|s| parse_edit_string(s, &Local))
        .transpose()?;

    let mut controller = CalendarController::new(client, Local);

    let spinner = request_spinner("Fetching events...");
    let result = controller.load().await;
    spinner.finish_and_clear();
    trace_failure(result, "event list")?;

    let visible = filter_range(controller.events(), from, to);
    println!("{}", render_list(&visible, "No events yet."));
    Ok(())
}

/// Keep the events whose start falls inside the requested range. Both
/// bounds are inclusive; an absent bound leaves that side open.
fn filter_range(
    events: &[Event],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Event> {
    events
        .iter()
        .filter(|e| from.is_none_or(|f| e.start >= f) && to.is_none_or(|t| e.start <= t))
        .cloned()
        .collect()
}
