//! HTTP client for the TaskPro backend.
//!
//! One method per consumed endpoint. Auth endpoints are open; everything
//! under `/api/tasks` carries a bearer token. Error bodies are
//! `{"message": "..."}` and that message is surfaced when present.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    AuthResponse, LoginRequest, RegisterRequest, ReminderRequest, RoadmapRequest,
    RoadmapResponse, Task, TaskRequest, VerifyEmailRequest,
};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error status; the string is its
    /// `message` field when one was sent, otherwise the status line.
    #[error("{0}")]
    Server(String),

    #[error("not logged in (run 'taskpro login' first)")]
    Unauthenticated,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach the bearer token used for task endpoints.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authed(&self, builder: RequestBuilder) -> ApiResult<RequestBuilder> {
        match &self.token {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Err(ApiError::Unauthenticated),
        }
    }

    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .map(|b| b.message);

        match message {
            // A server-reported reason (e.g. "Invalid credentials") beats
            // the generic status mapping.
            Some(msg) => Err(ApiError::Server(msg)),
            None if status == StatusCode::UNAUTHORIZED => Err(ApiError::Unauthenticated),
            None => Err(ApiError::Server(format!("server returned {}", status))),
        }
    }

    async fn json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        Ok(Self::check(response).await?.json().await?)
    }

    // Auth

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthResponse> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(req)
            .send()
            .await?;
        Self::json(resp).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<AuthResponse> {
        let resp = self
            .http
            .post(self.url("/api/auth/register"))
            .json(req)
            .send()
            .await?;
        Self::json(resp).await
    }

    pub async fn verify_email(&self, req: &VerifyEmailRequest) -> ApiResult<AuthResponse> {
        let resp = self
            .http
            .post(self.url("/api/auth/verify-email"))
            .json(req)
            .send()
            .await?;
        Self::json(resp).await
    }

    pub async fn resend_code(&self, email: &str) -> ApiResult<()> {
        let resp = self
            .http
            .post(self.url("/api/auth/resend-code"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    // Tasks

    pub async fn all_tasks(&self) -> ApiResult<Vec<Task>> {
        let req = self.authed(self.http.get(self.url("/api/tasks")))?;
        Self::json(req.send().await?).await
    }

    pub async fn pending_tasks(&self) -> ApiResult<Vec<Task>> {
        let req = self.authed(self.http.get(self.url("/api/tasks/pending")))?;
        Self::json(req.send().await?).await
    }

    pub async fn completed_tasks(&self) -> ApiResult<Vec<Task>> {
        let req = self.authed(self.http.get(self.url("/api/tasks/completed")))?;
        Self::json(req.send().await?).await
    }

    pub async fn get_task(&self, id: i64) -> ApiResult<Task> {
        let req = self.authed(self.http.get(self.url(&format!("/api/tasks/{}", id))))?;
        Self::json(req.send().await?).await
    }

    pub async fn create_task(&self, task: &TaskRequest) -> ApiResult<Task> {
        let req = self.authed(self.http.post(self.url("/api/tasks")).json(task))?;
        Self::json(req.send().await?).await
    }

    pub async fn update_task(&self, id: i64, task: &TaskRequest) -> ApiResult<Task> {
        let req = self.authed(
            self.http
                .put(self.url(&format!("/api/tasks/{}", id)))
                .json(task),
        )?;
        Self::json(req.send().await?).await
    }

    pub async fn delete_task(&self, id: i64) -> ApiResult<()> {
        let req = self.authed(self.http.delete(self.url(&format!("/api/tasks/{}", id))))?;
        Self::check(req.send().await?).await?;
        Ok(())
    }

    pub async fn mark_completed(&self, id: i64) -> ApiResult<Task> {
        let req = self.authed(
            self.http
                .patch(self.url(&format!("/api/tasks/{}/complete", id))),
        )?;
        Self::json(req.send().await?).await
    }

    pub async fn mark_pending(&self, id: i64) -> ApiResult<Task> {
        let req = self.authed(
            self.http
                .patch(self.url(&format!("/api/tasks/{}/pending", id))),
        )?;
        Self::json(req.send().await?).await
    }

    pub async fn generate_roadmap(&self, req: &RoadmapRequest) -> ApiResult<RoadmapResponse> {
        let req = self.authed(
            self.http
                .post(self.url("/api/tasks/generate-roadmap"))
                .json(req),
        )?;
        Self::json(req.send().await?).await
    }

    pub async fn send_reminder(&self, req: &ReminderRequest) -> ApiResult<()> {
        let req = self.authed(
            self.http
                .post(self.url("/api/tasks/send-reminder"))
                .json(req),
        )?;
        Self::check(req.send().await?).await?;
        Ok(())
    }
}
