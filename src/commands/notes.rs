use anyhow::Result;
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;
use tracing::error;

use crate::client::ApiClient;
use crate::commands::{trace_failure, warn_reload_failure};
use crate::controller::{DeleteOutcome, NotesBoard};
use crate::render::render_list;
use crate::utils::tui::request_spinner;

pub async fn run_list(client: &ApiClient) -> Result<()> {
    let mut board = NotesBoard::new(client);

    let spinner = request_spinner("Fetching notes...");
    let result = board.load().await;
    spinner.finish_and_clear();
    trace_failure(result, "note list")?;

    println!("{}", render_list(board.notes(), "No notes yet."));
    Ok(())
}

pub async fn run_add(client: &ApiClient, text: Option<String>) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => Input::new().with_prompt("  Note").interact_text()?,
    };

    let mut board = NotesBoard::new(client);
    let spinner = request_spinner("Saving...");
    let result = board.add(&text).await;
    spinner.finish_and_clear();

    match result {
        Ok(note) => {
            println!("{}", format!("Added note #{}", note.id).green());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "note create failed");
            Err(e.into())
        }
    }
}

pub async fn run_edit(client: &ApiClient, id: i64, text: Option<String>) -> Result<()> {
    let mut board = NotesBoard::new(client);

    let text = match text {
        Some(text) => text,
        None => {
            // Seed the prompt with the current text
            let spinner = request_spinner("Fetching notes...");
            let result = board.load().await;
            spinner.finish_and_clear();
            trace_failure(result, "note list")?;

            let current = board
                .notes()
                .iter()
                .find(|n| n.id == id)
                .map(|n| n.text.clone())
                .ok_or_else(|| anyhow::anyhow!("Note not found: #{}", id))?;

            Input::new()
                .with_prompt("  Note")
                .with_initial_text(current)
                .interact_text()?
        }
    };

    let spinner = request_spinner("Saving...");
    let result = board.edit(id, &text).await;
    spinner.finish_and_clear();

    match result {
        Ok(note) => {
            println!("{}", format!("Updated note #{}", note.id).green());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, id, "note update failed");
            Err(e.into())
        }
    }
}

pub async fn run_rm(client: &ApiClient, id: i64, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete note #{}?", id))
            .default(false)
            .interact()?;

    let mut board = NotesBoard::new(client);
    let spinner = request_spinner("Deleting...");
    let result = board.remove(id, confirmed).await;
    spinner.finish_and_clear();

    match result {
        Ok(DeleteOutcome::Deleted { reload_error }) => {
            println!("{}", format!("Deleted note #{}", id).green());
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
            error!(error = %e, id, "note delete failed");
            Err(e.into())
        }
    }
}
