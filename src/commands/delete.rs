use anyhow::Result;
use chrono::{Local, Utc};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tracing::error;

use crate::client::ApiClient;
use crate::commands::{trace_failure, warn_reload_failure};
use crate::controller::{CalendarController, DeleteOutcome};
use crate::utils::tui::request_spinner;

pub async fn run(client: &ApiClient, id: &str, yes: bool) -> Result<()> {
    let mut controller = CalendarController::new(client, Local);

    let spinner = request_spinner("Fetching events...");
    let result = controller.load().await;
    spinner.finish_and_clear();
    trace_failure(result, "event list")?;

    let event = controller
        .events()
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Event not found: {}", id))?;
    let title = event.title.clone();

    controller.open_edit(event, Utc::now());

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", title))
            .default(false)
            .interact()?;

    let spinner = request_spinner("Deleting...");
    let result = controller.delete(confirmed).await;
    spinner.finish_and_clear();

    match result {
        Ok(DeleteOutcome::Deleted { reload_error }) => {
            println!("{}", format!("Deleted: {}", title).green());
            if let Some(e) = reload_error {
                warn_reload_failure(&e);
            }
            Ok(())
        }
        Ok(_) => {
            println!("Cancelled.");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, id, "delete failed");
            Err(e.into())
        }
    }
}
