//! HTTP client for the question backend
//!
//! Thin reqwest wrapper: attaches the bearer token, turns non-success
//! responses into [`ApiError::Rejected`] and encodes [`SubmitRequest`]s as
//! multipart forms.

use super::auth::TokenProvider;
use super::request::{PartBody, SubmitRequest, SubmitTarget};
use super::traits::QuestionApi;
use crate::error::{ApiError, FieldErrors};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Keys in an error body that carry the top-level message, in priority order
const DETAIL_KEYS: [&str; 3] = ["detail", "error", "message"];

/// Client for the question backend REST API
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpApi {
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::ClientBuilder::new().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.tokens.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Body text of a successful response, or the rejection it carries
    async fn success_text(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(text);
        }

        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Err(rejection(status.as_u16(), &body))
    }

    async fn json_body(response: Response) -> Result<Value, ApiError> {
        let text = Self::success_text(response).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        tracing::debug!("GET {path}");
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::json_body(response).await
    }
}

/// Body of an accepted save; anything that is not JSON reads as null
fn saved_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|err| {
        tracing::warn!("save accepted with a non-JSON body: {err}");
        Value::Null
    })
}

/// Build a multipart form from the composed parts, preserving order
fn multipart_form(request: SubmitRequest) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in request.parts {
        form = match part.body {
            PartBody::Text(text) => form.text(part.name, text),
            PartBody::File {
                file_name,
                content_type,
                bytes,
            } => {
                let file = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

/// Interpret an error body as `{detail?, <field>: [messages]}`
pub fn rejection(status: u16, body: &Value) -> ApiError {
    let mut detail = None;
    let mut field_errors = FieldErrors::new();

    if let Value::Object(map) = body {
        detail = DETAIL_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string);

        for (key, value) in map {
            if DETAIL_KEYS.contains(&key.as_str()) {
                continue;
            }
            let messages: Vec<String> = match value {
                Value::String(message) => vec![message.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => Vec::new(),
            };
            if !messages.is_empty() {
                field_errors.insert(key.clone(), messages);
            }
        }
    }

    ApiError::Rejected {
        status,
        detail,
        field_errors,
    }
}

#[async_trait]
impl QuestionApi for HttpApi {
    async fn fetch_subjects(&self) -> Result<Value, ApiError> {
        self.get("core/materias/", &[]).await
    }

    async fn fetch_competencies(&self, subject_id: &str) -> Result<Value, ApiError> {
        self.get("core/competencias/", &[("materia", subject_id)]).await
    }

    async fn submit(&self, request: SubmitRequest) -> Result<Value, ApiError> {
        let method = match request.target {
            SubmitTarget::Create => Method::POST,
            SubmitTarget::Update { .. } => Method::PUT,
        };
        let path = request.target.path();
        tracing::debug!("{method} {path} ({} parts)", request.parts.len());

        let form = multipart_form(request)?;
        let response = self.request(method, &path).multipart(form).send().await?;
        let text = Self::success_text(response).await?;
        Ok(saved_body(&text))
    }
}
