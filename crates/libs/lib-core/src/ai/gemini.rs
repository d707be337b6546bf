//! # Generative AI Wire Format
//!
//! Request and response types for the `generateContent` REST endpoint, plus the
//! [`AiBackend`] trait and its HTTP implementation [`GeminiClient`].
//!
//! Only the fields this client reads or writes are modelled; unknown response
//! fields are ignored.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::GroundingLink;

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::http::build_client;

pub const TEXT_MODEL: &str = "gemini-2.5-flash";
pub const VISION_MODEL: &str = "gemini-2.5-flash-image";

// ========== Request ==========

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Single-turn text prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(vec![Part::text(text)])],
            ..Default::default()
        }
    }

    /// Ask for an `application/json` response body.
    pub fn json_response(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts,
        }
    }

    /// Role-less content, used for the system instruction.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Default::default()
        }
    }

    pub fn function_response(response: FunctionResponse) -> Self {
        Self {
            function_response: Some(response),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Standard base64
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub function_declarations: Vec<FunctionDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<Value>,
}

impl Tool {
    pub fn functions(declarations: Vec<FunctionDeclaration>) -> Self {
        Self {
            function_declarations: declarations,
            google_maps: None,
        }
    }

    /// Maps grounding, enabled with an empty config object.
    pub fn google_maps() -> Self {
        Self {
            function_declarations: Vec::new(),
            google_maps: Some(Value::Object(Default::default())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

// ========== Response ==========

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerateResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Candidate {
    pub content: Content,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GroundingMetadata {
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroundingChunk {
    pub web: Option<GroundingSource>,
    pub maps: Option<GroundingSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroundingSource {
    pub uri: String,
    pub title: Option<String>,
}

impl GenerateResponse {
    fn first(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> String {
        self.first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// First function call requested by the model, if any.
    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.function_call.as_ref())
    }

    /// The model turn, for replaying it in a follow-up request.
    pub fn model_content(&self) -> Option<Content> {
        self.first().map(|c| Content {
            role: Some("model".to_string()),
            parts: c.content.parts.clone(),
        })
    }

    /// Source links from grounding metadata. Untitled sources read "View Map".
    pub fn grounding_links(&self) -> Vec<GroundingLink> {
        let Some(metadata) = self.first().and_then(|c| c.grounding_metadata.as_ref()) else {
            return Vec::new();
        };

        metadata
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref().or(chunk.maps.as_ref()))
            .filter(|source| !source.uri.is_empty())
            .map(|source| GroundingLink {
                title: source
                    .title
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "View Map".to_string()),
                uri: source.uri.clone(),
            })
            .collect()
    }
}

// ========== Backend ==========

#[async_trait]
pub trait AiBackend: Send + Sync {
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse>;
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config, api_key: impl Into<String>) -> Self {
        Self {
            // Chat turns are bounded by the caller; leave headroom above them.
            client: build_client(config.http_timeout().max(std::time::Duration::from_secs(60))),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Client for the configured credential, or `None` in demo mode.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .gemini_api_key
            .as_ref()
            .map(|key| Self::new(config, key.clone()))
    }
}

#[async_trait]
impl AiBackend for GeminiClient {
    #[tracing::instrument(skip(self, request), fields(model = %model))]
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let start = Instant::now();
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "AI backend network error");
                CoreError::from(e)
            })?;

        let status = response.status();
        let duration = start.elapsed();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "AI backend request failed"
            );
            return Err(CoreError::Http {
                status: status.as_u16(),
                message: shared::truncate_text(&body, 200),
            });
        }

        let body = response.json::<GenerateResponse>().await.map_err(|e| {
            tracing::error!(error = %e, "AI backend response parse error");
            CoreError::Decode(e.to_string())
        })?;

        tracing::debug!(
            duration_ms = duration.as_millis(),
            candidates = body.candidates.len(),
            "AI backend responded"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content::user(vec![Part::inline("image/jpeg", "QUJD")])],
            tools: vec![Tool::google_maps()],
            tool_config: Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng { latitude: 23.2599, longitude: 77.4126 },
                },
            }),
            ..Default::default()
        }
        .json_response();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(value["tools"][0]["googleMaps"], json!({}));
        assert_eq!(value["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], 23.2599);
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_helpers() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Namaste" },
                        { "functionCall": { "id": "call-1", "name": "get_current_weather", "args": { "location": "Indore" } } }
                    ]
                },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "maps": { "uri": "https://maps.google.com/?cid=1", "title": "Krishi Kendra" } },
                        { "web": { "uri": "https://example.org/mandi" } },
                        { "retrievedContext": { "uri": "ignored" } }
                    ]
                }
            }]
        }))
        .unwrap();

        assert_eq!(response.text(), "Namaste");
        let call = response.function_call().unwrap();
        assert_eq!(call.id.as_deref(), Some("call-1"));
        assert_eq!(call.args["location"], "Indore");

        let links = response.grounding_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "Krishi Kendra");
        assert_eq!(links[1].title, "View Map");
    }

    #[test]
    fn test_empty_response() {
        let response = GenerateResponse::default();
        assert_eq!(response.text(), "");
        assert!(response.function_call().is_none());
        assert!(response.grounding_links().is_empty());
    }

    #[tokio::test]
    async fn test_client_posts_with_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::from_config(&Config::for_tests(&server.uri())).unwrap();
        let response = client
            .generate(TEXT_MODEL, &GenerateRequest::prompt("hello"))
            .await
            .unwrap();
        assert_eq!(response.text(), "{}");
    }

    #[tokio::test]
    async fn test_client_maps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = GeminiClient::from_config(&Config::for_tests(&server.uri())).unwrap();
        let err = client
            .generate(TEXT_MODEL, &GenerateRequest::prompt("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Http { status: 429, .. }));
    }
}
