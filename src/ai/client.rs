use serde::{Deserialize, Serialize};

use super::AiError;

/// One part of a structured AI request: plain text, or inline document
/// bytes (base64) with their mime type.
#[derive(Debug, Clone)]
pub enum AiPart {
    Text(String),
    InlineData {
        mime_type: String,
        data_base64: String,
    },
}

/// Client for the external text/vision generation service.
///
/// The upstream has unbounded latency, so implementations must bound the
/// request and surface `AiError::Timeout`. Callers run `generate` on a
/// blocking thread.
pub trait AiClient: Send + Sync {
    fn generate(&self, parts: &[AiPart]) -> Result<String, AiError>;
}

/// HTTP client for a Gemini-style `generateContent` endpoint.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }
}

// ── Wire types for generateContent ──────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl AiClient for GeminiClient {
    fn generate(&self, parts: &[AiPart]) -> Result<String, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: parts
                    .iter()
                    .map(|part| match part {
                        AiPart::Text(text) => RequestPart::Text { text: text.clone() },
                        AiPart::InlineData {
                            mime_type,
                            data_base64,
                        } => RequestPart::Inline {
                            inline_data: InlineData {
                                mime_type: mime_type.clone(),
                                data: data_base64.clone(),
                            },
                        },
                    })
                    .collect(),
            }],
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                AiError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                AiError::Timeout(self.timeout_secs)
            } else {
                AiError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AiError::JsonParsing(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Mock AI client for testing — returns a configurable response.
pub struct MockAiClient {
    response: String,
}

impl MockAiClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl AiClient for MockAiClient {
    fn generate(&self, _parts: &[AiPart]) -> Result<String, AiError> {
        if self.response.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(self.response.clone())
    }
}
