use anyhow::Result;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use tracing::error;

use crate::auth::{AuthFlow, AuthMode, AuthOutcome, SessionEstablisher};
use crate::client::ApiClient;
use crate::session::Session;

/// Establishes the CLI session: verifies credentials against the login
/// endpoint and persists the returned token.
pub struct CliSessionEstablisher<'a> {
    pub client: &'a ApiClient,
}

impl SessionEstablisher for CliSessionEstablisher<'_> {
    async fn establish(&mut self, email: &str, password: &str) -> Result<()> {
        let token = self.client.login(email, password).await?;
        let mut session = Session::default();
        session.set_token(token);
        session.save()?;
        Ok(())
    }
}

/// Interactive login/registration flow.
pub async fn run(client: &ApiClient) -> Result<()> {
    let choice = Select::new()
        .with_prompt("Account")
        .items(&["Log in", "Create an account"])
        .default(0)
        .interact()?;

    let mode = if choice == 1 {
        AuthMode::Register
    } else {
        AuthMode::Login
    };
    let mut flow = AuthFlow::new(mode);

    loop {
        let label = match flow.mode() {
            AuthMode::Login => "Log in",
            AuthMode::Register => "Create an account",
        };
        println!("\n{}", label.bold());

        let email: String = Input::new().with_prompt("  Email").interact_text()?;
        let password = rpassword::prompt_password("  Password: ")?;

        let mut establisher = CliSessionEstablisher { client };
        match flow.submit(&email, &password, client, &mut establisher).await {
            Ok(AuthOutcome::Registered) => {
                println!("{}", "Account created. Please log in.".green());
                // flow is now in login mode; fall through to the next round
            }
            Ok(AuthOutcome::LoggedIn) => {
                println!("{}", "Logged in.".green());
                return Ok(());
            }
            Err(e) => {
                error!(error = %e, "auth attempt failed");
                eprintln!("{}", format!("Failed: {e}").red());
                // mode is unchanged; let the user retry or give up
                if !dialoguer::Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?
                {
                    anyhow::bail!("aborted");
                }
            }
        }
    }
}

pub async fn run_login(client: &ApiClient, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("  Email").interact_text()?,
    };
    let password = rpassword::prompt_password("  Password: ")?;

    let mut flow = AuthFlow::new(AuthMode::Login);
    let mut establisher = CliSessionEstablisher { client };
    flow.submit(&email, &password, client, &mut establisher)
        .await?;

    println!("{}", "Logged in.".green());
    Ok(())
}

pub async fn run_register(client: &ApiClient, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("  Email").interact_text()?,
    };
    let password = rpassword::prompt_password("  Password: ")?;

    let mut flow = AuthFlow::new(AuthMode::Register);
    let mut establisher = CliSessionEstablisher { client };
    flow.submit(&email, &password, client, &mut establisher)
        .await?;

    println!(
        "{}",
        "Account created. Log in with `dayboard login`.".green()
    );
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let mut session = Session::load()?;
    if !session.is_logged_in() {
        println!("Not logged in.");
        return Ok(());
    }
    session.clear()?;
    println!("{}", "Logged out.".green());
    Ok(())
}
