use super::audio::Audio;
use super::completion::Completion;
use super::images::Images;
use super::models::Models;
use super::parameters::Parameters;
use super::response::ApiResponse;
use super::speech::Speech;
use super::streaming::process_streaming_response;
use super::transport::Transport;
use crate::error::{AiHelperError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const ORGANIZATION_HEADER: &str = "openai-organization";

/// Connection settings, built once at startup and moved into the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub access_token: String,
    pub organization_id: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub stream_timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            organization_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: crate::config::defaults::default_request_timeout(),
            stream_timeout_secs: crate::config::defaults::default_stream_timeout(),
        }
    }

    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// reqwest-backed [`Transport`] for an OpenAI-compatible REST API.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.access_token)).map_err(|e| {
                AiHelperError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        if let Some(organization_id) = &config.organization_id {
            headers.insert(
                HeaderName::from_static(ORGANIZATION_HEADER),
                HeaderValue::from_str(organization_id).map_err(|e| {
                    AiHelperError::ConfigError(format!("Invalid organization header: {}", e))
                })?,
            );
        }

        // No client-wide timeout: plain requests are bounded per call and
        // streams per chunk.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn completion(&self) -> Completion<'_> {
        Completion::new(self)
    }

    pub fn speech(&self) -> Speech<'_> {
        Speech::new(self)
    }

    pub fn images(&self) -> Images<'_> {
        Images::new(self)
    }

    pub fn audio(&self) -> Audio<'_> {
        Audio::new(self)
    }

    pub fn models(&self) -> Models<'_> {
        Models::new(self)
    }

    /// Shorthand for `completion().create(parameters)`.
    pub async fn chat(&self, parameters: Parameters) -> Result<ApiResponse> {
        self.completion().create(parameters).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs)
    }

    async fn read_response(response: reqwest::Response) -> Result<ApiResponse> {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false);

        let body = response.bytes().await?;
        if is_json {
            Ok(ApiResponse::Json(serde_json::from_slice(&body)?))
        } else {
            Ok(ApiResponse::Binary(body))
        }
    }
}

#[async_trait]
impl Transport for OpenAiClient {
    async fn json_post(&self, path: &str, parameters: Parameters) -> Result<ApiResponse> {
        let (mut body, stream, files) = parameters.into_parts();
        if !files.is_empty() {
            return Err(AiHelperError::Other(format!(
                "{} takes a JSON body; file uploads need a multipart endpoint",
                path
            )));
        }

        let Some(callback) = stream else {
            tracing::debug!("POST {} (json)", path);
            let response = self
                .http
                .post(self.url(path))
                .timeout(self.request_timeout())
                .json(&body)
                .send()
                .await?;
            let response = check_status(response).await?;
            return Self::read_response(response).await;
        };

        if let Some(object) = body.as_object_mut() {
            object.insert("stream".to_string(), Value::Bool(true));
        }

        // The chunk timeout also covers waiting for the response headers
        tracing::debug!("POST {} (stream)", path);
        let stream_timeout = Duration::from_secs(self.config.stream_timeout_secs);
        let send = self.http.post(self.url(path)).json(&body).send();
        let response = match tokio::time::timeout(stream_timeout, send).await {
            Ok(response) => response?,
            Err(_) => {
                tracing::warn!(
                    "no response headers within {} seconds, giving up",
                    self.config.stream_timeout_secs
                );
                return Err(AiHelperError::Timeout);
            }
        };
        let response = check_status(response).await?;
        let chunks = process_streaming_response(
            Box::pin(response.bytes_stream()),
            self.config.stream_timeout_secs,
            callback,
        )
        .await?;

        Ok(ApiResponse::Json(Value::Array(chunks)))
    }

    async fn multipart_post(&self, path: &str, parameters: Parameters) -> Result<ApiResponse> {
        let (body, stream, files) = parameters.into_parts();
        if stream.is_some() {
            return Err(AiHelperError::Other(format!(
                "{} does not stream; drop the stream callback",
                path
            )));
        }
        let mut form = Form::new();

        if let Value::Object(fields) = body {
            for (name, value) in fields {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                form = form.text(name, text);
            }
        }

        for upload in files {
            let contents = tokio::fs::read(&upload.path).await?;
            let file_name = upload
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let mime = mime_guess::from_path(&upload.path).first_or_octet_stream();
            let part = Part::bytes(contents)
                .file_name(file_name)
                .mime_str(mime.as_ref())?;
            form = form.part(upload.field, part);
        }

        tracing::debug!("POST {} (multipart)", path);
        let response = self
            .http
            .post(self.url(path))
            .timeout(self.request_timeout())
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;
        Self::read_response(response).await
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        tracing::debug!("GET {}", path);
        let response = self
            .http
            .get(self.url(path))
            .timeout(self.request_timeout())
            .send()
            .await?;
        let response = check_status(response).await?;
        Self::read_response(response).await
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Turn a non-2xx response into `ApiError`, preferring the service's own
/// `error.message` over the raw body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or(text);

    tracing::warn!("request failed with status {}: {}", status.as_u16(), message);
    Err(AiHelperError::ApiError {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("audio/mpeg"));
        assert!(!is_json_content_type("application/octet-stream"));
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client =
            OpenAiClient::new(ClientConfig::new("key").with_base_url("http://localhost:8080/v1/"))
                .unwrap();
        assert_eq!(
            client.url("/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_rejects_header_unsafe_token() {
        let result = OpenAiClient::new(ClientConfig::new("bad\nkey"));
        assert!(matches!(result, Err(AiHelperError::ConfigError(_))));
    }
}
