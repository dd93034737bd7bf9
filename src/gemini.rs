use crate::utils::build_headers;
use reqwest::{header::HeaderMap, Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Gemini API call failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini API call failed: {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("Gemini API call failed: empty response")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPart {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct GeminiRequestBody {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiApiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

impl GeminiApiResponse {
    /// Text of the first candidate, parts joined and trimmed.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

pub fn build_generate_request(
    prompt: &str,
    image_bytes: &[u8],
    mime_type: &str,
) -> GeminiRequestBody {
    GeminiRequestBody {
        contents: vec![RequestContent {
            parts: vec![
                RequestPart::Text(prompt.to_string()),
                RequestPart::InlineData(InlineData {
                    mime_type: mime_type.to_string(),
                    data: base64::encode(image_bytes),
                }),
            ],
        }],
    }
}

/// Handle to the `generateContent` endpoint of one model. Built once at
/// startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
    model: String,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        base_url: &str,
        model: &str,
        api_key: &str,
    ) -> Result<Self, reqwest::header::InvalidHeaderValue> {
        Ok(GeminiClient {
            client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            headers: build_headers(api_key)?,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_content(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, ModelError> {
        let request_body = build_generate_request(prompt, image_bytes, mime_type);
        log::debug!(
            "POST {} ({} image bytes, {})",
            self.endpoint,
            image_bytes.len(),
            mime_type
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ModelError::Status { status, message });
        }

        let api_response = response.json::<GeminiApiResponse>().await?;
        api_response.text().ok_or(ModelError::EmptyResponse)
    }
}
