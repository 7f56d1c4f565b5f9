//! Login/registration flow.
//!
//! Two modes toggled by the user. Registration posts credentials and, on
//! success, drops the flow back into login mode. Login is delegated to a
//! session establisher - the flow itself never sees or stores the token.
//! A failure in either mode propagates to the caller and leaves the mode
//! unchanged, so the user retries where they were.

use anyhow::Result;

use dayboard_core::ApiResult;

/// Verifies credentials and makes the resulting session current.
///
/// The CLI implementation calls the login endpoint and persists the token;
/// tests substitute their own.
pub trait SessionEstablisher {
    async fn establish(&mut self, email: &str, password: &str) -> Result<()>;
}

/// Creates new accounts.
pub trait RegistrationGateway {
    async fn register(&self, email: &str, password: &str) -> ApiResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    LoggedIn,
    /// Account created; the flow is now in login mode.
    Registered,
}

pub struct AuthFlow {
    mode: AuthMode,
}

impl AuthFlow {
    pub fn new(mode: AuthMode) -> Self {
        AuthFlow { mode }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }

    /// Submit credentials under the current mode.
    pub async fn submit<R, E>(
        &mut self,
        email: &str,
        password: &str,
        registrar: &R,
        establisher: &mut E,
    ) -> Result<AuthOutcome>
    where
        R: RegistrationGateway,
        E: SessionEstablisher,
    {
        match self.mode {
            AuthMode::Register => {
                registrar.register(email, password).await?;
                self.mode = AuthMode::Login;
                Ok(AuthOutcome::Registered)
            }
            AuthMode::Login => {
                establisher.establish(email, password).await?;
                Ok(AuthOutcome::LoggedIn)
            }
        }
    }
}
