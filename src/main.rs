mod auth;
mod client;
mod commands;
mod config;
mod controller;
mod editor;
mod render;
mod session;
mod store;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::ApiClient;
use crate::commands::new::NewArgs;
use crate::config::Config;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "dayboard")]
#[command(about = "Manage your dayboard calendar and notes board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive login / registration
    Auth,
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// List calendar events
    Events {
        /// Only show events starting at or after this time (e.g. "2025-03-20T00:00", local)
        #[arg(long)]
        from: Option<String>,

        /// Only show events starting at or before this time
        #[arg(long)]
        to: Option<String>,
    },
    /// Create a new event
    New {
        /// Event title
        #[arg(short, long)]
        title: Option<String>,

        /// Start date/time (e.g. "2025-03-20T15:00", local time)
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time; defaults to one hour after start
        #[arg(short, long)]
        end: Option<String>,

        /// Event description
        #[arg(short, long)]
        description: Option<String>,

        /// Mark as an all-day event
        #[arg(long)]
        all_day: bool,
    },
    /// Edit an existing event
    Edit { id: String },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List notes, newest first
    Notes,
    /// Manage notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Add a note
    Add { text: Option<String> },
    /// Edit a note
    Edit { id: i64, text: Option<String> },
    /// Delete a note
    Rm {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let session = Session::load()?;
    let client = ApiClient::new(&config, session);

    match cli.command {
        Commands::Auth => commands::auth::run(&client).await,
        Commands::Login { email } => commands::auth::run_login(&client, email).await,
        Commands::Register { email } => commands::auth::run_register(&client, email).await,
        Commands::Logout => commands::auth::run_logout(),
        Commands::Events { from, to } => commands::events::run(&client, from, to).await,
        Commands::New {
            title,
            start,
            end,
            description,
            all_day,
        } => {
            commands::new::run(
                &client,
                NewArgs {
                    title,
                    start,
                    end,
                    description,
                    all_day,
                },
            )
            .await
        }
        Commands::Edit { id } => commands::edit::run(&client, &id).await,
        Commands::Delete { id, yes } => commands::delete::run(&client, &id, yes).await,
        Commands::Notes => commands::notes::run_list(&client).await,
        Commands::Note { command } => match command {
            NoteCommands::Add { text } => commands::notes::run_add(&client, text).await,
            NoteCommands::Edit { id, text } => commands::notes::run_edit(&client, id, text).await,
            NoteCommands::Rm { id, yes } => commands::notes::run_rm(&client, id, yes).await,
        },
    }
}
