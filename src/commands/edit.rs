use anyhow::Result;
use chrono::{Local, Utc};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tracing::error;

use crate::client::ApiClient;
use crate::commands::{prompt_form, trace_failure, warn_reload_failure};
use crate::controller::{CalendarController, SaveOutcome};
use crate::utils::tui::request_spinner;

pub async fn run(client: &ApiClient, id: &str) -> Result<()> {
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

    controller.open_edit(event, Utc::now());

    loop {
        if let Some(form) = controller.form_mut() {
            prompt_form(form, true)?;
        }
        let title = controller
            .form()
            .map(|f| f.title.trim().to_string())
            .unwrap_or_default();

        let spinner = request_spinner("Saving...");
        let result = controller.save().await;
        spinner.finish_and_clear();

        match result {
            Ok(SaveOutcome::Saved { reload_error }) => {
                println!("\n{}", format!("Updated: {}", title).green());
                if let Some(e) = reload_error {
                    warn_reload_failure(&e);
                }
                return Ok(());
            }
            Ok(_) => return Ok(()),
            Err(e) => {
                error!(error = %e, id, "update failed");
                eprintln!("{}", format!("Save failed: {e}").red());
                if !Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?
                {
                    return Err(e.into());
                }
            }
        }
    }
}
