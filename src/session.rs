//! The locally persisted auth session.
//!
//! Holds the bearer token obtained from the login endpoint. The session is
//! an explicit value injected into the API client at construction; nothing
//! reads it from ambient state. Lifecycle: set and saved on login success,
//! cleared (file removed) on logout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

impl Session {
    pub fn path() -> Result<PathBuf> {
        Ok(Config::base_dir()?.join("session.toml"))
    }

    /// Load the session from disk; absent file means logged out.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Session::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: SessionFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse session at {}", path.display()))?;
        Ok(Session {
            token: Some(file.token),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Persist the current token. A session without a token is not written;
    /// use [`Session::clear`] to log out.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let Some(token) = &self.token else {
            anyhow::bail!("Cannot save a session without a token");
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&SessionFile {
            token: token.clone(),
        })
        .context("Failed to serialize session")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Drop the token and remove the session file.
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}
