use anyhow::Result;
use chrono::{Local, Utc};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tracing::error;

use dayboard_core::timestamp::parse_edit_string;

use crate::client::ApiClient;
use crate::commands::{prompt_form, warn_reload_failure};
use crate::controller::{CalendarController, SaveOutcome};
use crate::editor::Slot;
use crate::utils::tui::request_spinner;

pub struct NewArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub all_day: bool,
}

pub async fn run(client: &ApiClient, args: NewArgs) -> Result<()> {
    let mut controller = CalendarController::new(client, Local);

    // Start/end given on the command line act as the selected slot
    let slot = match (&args.start, &args.end) {
        (None, None) => None,
        (start, end) => Some(Slot {
            start: start
                .as_deref()
                .map(|s| parse_edit_string(s, &Local))
                .transpose()?,
            end: end
                .as_deref()
                .map(|s| parse_edit_string(s, &Local))
                .transpose()?,
        }),
    };

    let interactive = args.title.is_none() || args.start.is_none();

    controller.open_new(slot, Utc::now());
    if let Some(form) = controller.form_mut() {
        if let Some(title) = args.title {
            form.title = title;
        }
        if let Some(description) = args.description {
            form.description = description;
        }
        form.all_day = args.all_day;
    }

    loop {
        if interactive {
            if let Some(form) = controller.form_mut() {
                prompt_form(form, !args.all_day)?;
            }
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
                if interactive {
                    println!();
                }
                println!("{}", format!("Created: {}", title).green());
                if let Some(e) = reload_error {
                    warn_reload_failure(&e);
                }
                return Ok(());
            }
            Ok(_) => return Ok(()),
            Err(e) => {
                error!(error = %e, "create failed");
                eprintln!("{}", format!("Save failed: {e}").red());
                // Form stays open and seeded; offer a retry
                if !interactive
                    || !Confirm::new()
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
