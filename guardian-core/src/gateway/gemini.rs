//! Blocking client for the Gemini `generateContent` REST endpoint.
//!
//! The client owns its own tokio runtime so that synchronous callers (the TUI
//! worker threads, the CLI) can issue requests without being async themselves.

use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================
// Request/response types
// ============================================

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One turn of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Content with a role and a single text part.
    pub fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Role-less content, as used for system instructions.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Text part of a content turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Generation settings; used here to force JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// Constrain the response to JSON matching `schema`.
    pub fn json(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ============================================
// Client
// ============================================

/// HTTP client bound to one endpoint and API key.
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    runtime: tokio::runtime::Runtime,
    http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiClient {
    /// Build a client. Fails if the API key cannot be resolved.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// Build a client with an explicit API key.
    pub fn with_api_key(config: &GeminiConfig, api_key: String) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("gemini-http")
            .enable_all()
            .build()
            .map_err(|e| Error::Gemini(format!("failed to build tokio runtime: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| Error::Gemini(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            runtime,
            http,
        })
    }

    /// URL for a model method, e.g. `.../models/gemini-2.5-flash:generateContent`.
    pub fn url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.endpoint, model, method)
    }

    /// Send one `generateContent` request and return the first candidate's text.
    pub fn generate(&self, model: &str, request: &GenerateRequest) -> Result<String> {
        let url = self.url(model, "generateContent");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| Error::Gemini(format!("invalid api key header: {e}")))?,
        );

        tracing::debug!(model, turns = request.contents.len(), "Sending Gemini request");

        self.runtime.block_on(async {
            let resp = self
                .http
                .post(url)
                .headers(headers)
                .json(request)
                .send()
                .await
                .map_err(|e| Error::Gemini(format!("request failed: {e}")))?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| Error::Gemini(format!("read body failed: {e}")))?;
            if !status.is_success() {
                return Err(Error::Gemini(format!(
                    "API returned {}: {}",
                    status.as_u16(),
                    api_error_message(&body)
                )));
            }
            extract_text(&body)
        })
    }
}

/// Pull the error message out of an error body, or fall back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.to_string(), |e| e.message)
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn extract_text(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(Error::Gemini(format!("API error: {}", error.message)));
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| Error::Gemini("response contained no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::Gemini(format!(
            "response contained no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content::text("user", "hello")],
            system_instruction: Some(Content::instruction("be nice")),
            generation_config: Some(GenerationConfig::json(json!({"type": "OBJECT"}))),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be nice");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_request_omits_optional_fields() {
        let request = GenerateRequest {
            contents: vec![Content::text("user", "hi")],
            system_instruction: None,
            generation_config: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_none());
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "there."}]},
                "finishReason": "STOP"
            }]
        })
        .to_string();
        assert_eq!(extract_text(&body).unwrap(), "Hello, there.");
    }

    #[test]
    fn test_extract_text_errors() {
        let empty = json!({"candidates": []}).to_string();
        assert!(matches!(extract_text(&empty), Err(Error::Gemini(_))));

        let blocked = json!({"candidates": [{"finishReason": "SAFETY"}]}).to_string();
        let err = extract_text(&blocked).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));

        let api = json!({"error": {"message": "quota exceeded"}}).to_string();
        assert!(extract_text(&api).unwrap_err().to_string().contains("quota exceeded"));

        assert!(matches!(extract_text("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_api_error_message_fallback() {
        let body = json!({"error": {"message": "API key not valid"}}).to_string();
        assert_eq!(api_error_message(&body), "API key not valid");
        assert_eq!(api_error_message("<html>oops</html>"), "<html>oops</html>");
    }

    #[test]
    fn test_url_and_debug_redacts_key() {
        let config = GeminiConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::with_api_key(&config, "secret".to_string()).unwrap();
        assert_eq!(
            client.url("gemini-2.5-flash", "generateContent"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!format!("{client:?}").contains("secret"));
    }
}
