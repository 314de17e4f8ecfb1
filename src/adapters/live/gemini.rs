//! Live adapter for the Gemini `generateContent` image editing API.

use std::time::Duration;

use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ApiCredential;
use crate::error::EditError;
use crate::ports::image_editor::{EditFuture, EditRequest, EditResult, ImageBlob, ImageEditor};

/// Default endpoint prefix for Gemini models.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest slice of an unparseable error body kept in a message.
const MAX_BODY_EXCERPT: usize = 500;

/// Live Gemini image editor that calls the Google AI API.
pub struct GeminiEditor {
    client: Client,
    api_key: ApiCredential,
    base_url: String,
}

impl GeminiEditor {
    /// Create a new Gemini editor with the given credential.
    ///
    /// `timeout` bounds each request end to end; `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(api_key: ApiCredential, timeout: Option<Duration>) -> Result<Self, EditError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EditError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, api_key, base_url: GEMINI_API_BASE.to_string() })
    }

    /// Point the editor at a different endpoint prefix.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(&self, request: EditRequest) -> Result<EditResult, EditError> {
        let url = format!("{}/{}:generateContent", self.base_url, request.model);
        let body = GenerateContentRequest::new(&request);

        tracing::debug!(
            model = %request.model,
            mime_type = %request.image.mime_type,
            bytes = request.image.data.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(EditError::Transport(api_error_message(status.as_u16(), &response_text)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| EditError::Transport(format!("Failed to parse response: {e}")))?;

        extract_image(parsed)
    }
}

impl ImageEditor for GeminiEditor {
    fn edit(&self, request: &EditRequest) -> EditFuture<'_> {
        let request = request.clone();
        Box::pin(self.send(request))
    }
}

/// Return the first inline image of the first candidate.
fn extract_image(response: GenerateContentResponse) -> Result<EditResult, EditError> {
    if let Some(reason) = response.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_deref())
    {
        tracing::warn!(block_reason = reason, "Prompt was blocked");
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(EditError::NoImageInResponse);
    };

    let finish_reason = candidate.finish_reason;
    let inline = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .find_map(|part| part.inline_data.filter(|d| !d.data.is_empty()));

    let Some(inline) = inline else {
        tracing::warn!(finish_reason = ?finish_reason, "Response carried no image part");
        return Err(EditError::NoImageInResponse);
    };

    let data = base64::engine::general_purpose::STANDARD
        .decode(&inline.data)
        .map_err(|e| EditError::Transport(format!("Failed to decode base64: {e}")))?;

    Ok(EditResult { image: ImageBlob { data, mime_type: inline.mime_type } })
}

/// Build a diagnostic for a non-2xx response.
fn api_error_message(status: u16, body: &str) -> String {
    if let Ok(ApiErrorBody { error }) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(code) = error.status {
            return format!("API error ({status} {code}): {}", error.message);
        }
        return format!("API error ({status}): {}", error.message);
    }
    format!("API error ({status}): {}", excerpt(body))
}

fn excerpt(body: &str) -> String {
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

// --- Gemini API request types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(request: &'a EditRequest) -> Self {
        let data = base64::engine::general_purpose::STANDARD.encode(&request.image.data);
        Self {
            contents: [RequestContent {
                parts: vec![
                    RequestPart::InlineData(RequestInlineData {
                        mime_type: &request.image.mime_type,
                        data,
                    }),
                    RequestPart::Text(&request.instruction),
                ],
            }],
            generation_config: GenerationConfig { response_modalities: &["IMAGE"] },
        }
    }
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    InlineData(RequestInlineData<'a>),
    Text(&'a str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestInlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: &'static [&'static str],
}

// --- Gemini API response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
    status: Option<String>,
}
