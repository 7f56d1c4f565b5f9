//! HTTP client for the events, notes and auth endpoints.
//!
//! All requests go through here. Error semantics are uniform: transport
//! failures become `ApiError::Network`, non-success statuses become
//! `ApiError::Server` carrying a best-effort parsed body, and a success
//! body that does not decode into the expected type is `ApiError::Decode`.
//! Nothing is retried and nothing is recovered at this layer.

use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use dayboard_core::{ApiError, ApiResult, Event, EventDraft, Note, NoteDraft, ResponseBody};

use crate::auth::RegistrationGateway;
use crate::config::Config;
use crate::session::Session;
use crate::store::{EventStore, NoteStore};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    /// Build a client from the resolved config and an explicit session.
    pub fn new(config: &Config, session: Session) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
            session,
        }
    }

    fn events_url(&self) -> String {
        format!("{}/api/events", self.base_url)
    }

    fn notes_url(&self) -> String {
        format!("{}/api/notes", self.base_url)
    }

    fn auth_url(&self, action: &str) -> String {
        format!("{}/api/auth/{}", self.base_url, action)
    }

    /// Attach the bearer token when the session holds one.
    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and read the body, enforcing the shared error semantics.
    async fn dispatch(&self, request: RequestBuilder) -> ApiResult<ResponseBody> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = ResponseBody::from_text(&text);

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    /// Like [`ApiClient::dispatch`], but decodes the success body into `T`.
    async fn dispatch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        match self.dispatch(request).await? {
            ResponseBody::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
            }
            ResponseBody::Text(text) => Err(ApiError::Decode(format!(
                "expected JSON, got: {}",
                text
            ))),
            ResponseBody::Empty => Err(ApiError::Decode("empty response".to_string())),
        }
    }

    /// POST /api/auth/login - returns the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        debug!(email, "logging in");
        let request = self.http.post(self.auth_url("login")).json(
            &serde_json::json!({ "email": email, "password": password }),
        );
        let response: LoginResponse = self.dispatch_json(request).await?;
        Ok(response.token)
    }
}

impl RegistrationGateway for ApiClient {
    /// POST /api/auth/register
    async fn register(&self, email: &str, password: &str) -> ApiResult<()> {
        debug!(email, "registering account");
        let request = self
            .http
            .post(self.auth_url("register"))
            .json(&serde_json::json!({ "email": email, "password": password }));
        self.dispatch(request).await?;
        Ok(())
    }
}

impl EventStore for ApiClient {
    /// GET /api/events
    async fn list_events(&self) -> ApiResult<Vec<Event>> {
        debug!("fetching events");
        self.dispatch_json(self.http.get(self.events_url())).await
    }

    /// POST /api/events
    async fn create_event(&self, draft: &EventDraft) -> ApiResult<Event> {
        debug!(?draft, "creating event");
        self.dispatch_json(self.http.post(self.events_url()).json(draft))
            .await
    }

    /// PUT /api/events/:id
    async fn update_event(&self, id: &str, draft: &EventDraft) -> ApiResult<Event> {
        debug!(id, ?draft, "updating event");
        let url = format!("{}/{}", self.events_url(), id);
        self.dispatch_json(self.http.put(url).json(draft)).await
    }

    /// DELETE /api/events/:id
    async fn delete_event(&self, id: &str) -> ApiResult<ResponseBody> {
        debug!(id, "deleting event");
        let url = format!("{}/{}", self.events_url(), id);
        self.dispatch(self.http.delete(url)).await
    }
}

impl NoteStore for ApiClient {
    /// GET /api/notes
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        debug!("fetching notes");
        self.dispatch_json(self.with_auth(self.http.get(self.notes_url())))
            .await
    }

    /// POST /api/notes
    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        debug!(?draft, "creating note");
        self.dispatch_json(self.with_auth(self.http.post(self.notes_url()).json(draft)))
            .await
    }

    /// PUT /api/notes/:id
    async fn update_note(&self, id: i64, draft: &NoteDraft) -> ApiResult<Note> {
        debug!(id, ?draft, "updating note");
        let url = format!("{}/{}", self.notes_url(), id);
        self.dispatch_json(self.with_auth(self.http.put(url).json(draft)))
            .await
    }

    /// DELETE /api/notes/:id
    async fn delete_note(&self, id: i64) -> ApiResult<ResponseBody> {
        debug!(id, "deleting note");
        let url = format!("{}/{}", self.notes_url(), id);
        self.dispatch(self.with_auth(self.http.delete(url))).await
    }
}
