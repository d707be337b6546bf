//! # Chat Assistant
//!
//! Conversation with the farming assistant, including one round of tool use.
//!
//! ## Turn Protocol
//!
//! ```text
//! client                                  AI backend
//!   | -- history + message + tools -------->  |
//!   | <------- functionCall(get_current_weather, id) (optional)
//!   |   geocode place, fetch weather          |
//!   | -- functionResponse(id, {result}) ---->  |
//!   | <------------------ final text + grounding
//! ```
//!
//! [`ChatSession`] holds the transcript and refuses a second send while one is in
//! flight, so messages are appended strictly in send-then-receive order.
//! [`ChatAssistant::respond`] never fails: without a credential it answers with a
//! demo reply, and any failure along the way becomes a fixed apology.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{ChatMessage, ChatRole, Coordinates, GroundingLink, Locale};

use super::gemini::{
    AiBackend, Content, FunctionDeclaration, FunctionResponse, GenerateRequest, GenerateResponse,
    LatLng, Part, RetrievalConfig, Tool, ToolConfig, TEXT_MODEL,
};
use crate::canned;
use crate::error::{CoreError, Result};
use crate::resilient::ResilientCall;
use crate::weather::WeatherService;

pub const WEATHER_TOOL: &str = "get_current_weather";
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(30);
pub const CHAT_DEMO_DELAY: Duration = Duration::from_secs(1);

/// Location context used when the user has not provided one.
pub const DEFAULT_LOCATION_CONTEXT: &str = "Indore, Madhya Pradesh";

/// Resolves the assistant's weather tool call into a JSON payload.
#[async_trait]
pub trait WeatherToolResolver: Send + Sync {
    async fn resolve(&self, location: &str) -> Value;
}

#[async_trait]
impl WeatherToolResolver for WeatherService {
    async fn resolve(&self, location: &str) -> Value {
        self.tool_report(location).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatContext {
    /// Free-text location, e.g. the logged-in user's village
    pub location_label: String,
    pub coords: Option<Coordinates>,
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub grounding: Vec<GroundingLink>,
    pub is_demo: bool,
}

// ========== Session ==========

/// A send accepted by [`ChatSession::begin_send`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    /// Transcript before the new message
    pub history: Vec<ChatMessage>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    in_flight: bool,
}

impl ChatSession {
    /// New transcript opening with the assistant's welcome.
    pub fn new(locale: Locale) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(
                "welcome",
                canned::chat_welcome(locale),
                Vec::new(),
            )],
            in_flight: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Append the user's message and mark the session busy.
    ///
    /// Returns `None` for blank input or while a reply is outstanding.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingTurn> {
        let message = text.trim();
        if message.is_empty() || self.in_flight {
            return None;
        }

        let history = self.messages.clone();
        self.messages
            .push(ChatMessage::user(uuid::Uuid::new_v4().to_string(), message));
        self.in_flight = true;

        Some(PendingTurn {
            history,
            message: message.to_string(),
        })
    }

    /// Append the assistant's reply and accept sends again.
    pub fn finish(&mut self, reply: ChatReply) {
        self.messages.push(ChatMessage::assistant(
            uuid::Uuid::new_v4().to_string(),
            reply.text,
            reply.grounding,
        ));
        self.in_flight = false;
    }
}

// ========== Assistant ==========

pub struct ChatAssistant {
    backend: Option<Arc<dyn AiBackend>>,
    weather: Arc<dyn WeatherToolResolver>,
}

impl ChatAssistant {
    pub fn new(backend: Option<Arc<dyn AiBackend>>, weather: Arc<dyn WeatherToolResolver>) -> Self {
        Self { backend, weather }
    }

    pub async fn respond(&self, history: &[ChatMessage], message: &str, ctx: &ChatContext) -> ChatReply {
        let live = self
            .backend
            .as_ref()
            .map(|backend| self.round_trip(backend.as_ref(), history, message, ctx));

        ResilientCall::new("chat")
            .demo_delay(CHAT_DEMO_DELAY)
            .run_split(
                live,
                || ChatReply {
                    text: canned::chat_demo_reply(ctx.locale).to_string(),
                    grounding: Vec::new(),
                    is_demo: true,
                },
                || ChatReply {
                    text: canned::chat_apology(ctx.locale).to_string(),
                    grounding: Vec::new(),
                    is_demo: false,
                },
            )
            .await
            .into_inner()
    }

    async fn round_trip(
        &self,
        backend: &dyn AiBackend,
        history: &[ChatMessage],
        message: &str,
        ctx: &ChatContext,
    ) -> Result<ChatReply> {
        let mut request = build_request(history, message, ctx);
        let mut response = generate(backend, &request).await?;

        if let Some(call) = response.function_call().cloned() {
            if call.name == WEATHER_TOOL {
                let location = call
                    .args
                    .get("location")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .unwrap_or(ctx.location_label.as_str())
                    .to_string();
                tracing::info!(location = %location, call_id = ?call.id, "Resolving weather tool call");

                let result = self.weather.resolve(&location).await;

                if let Some(model_turn) = response.model_content() {
                    request.contents.push(model_turn);
                }
                request.contents.push(Content::user(vec![Part::function_response(
                    FunctionResponse {
                        id: call.id.clone(),
                        name: WEATHER_TOOL.to_string(),
                        response: json!({ "result": result }),
                    },
                )]));

                response = generate(backend, &request).await?;
            } else {
                tracing::warn!(name = %call.name, "Ignoring unknown tool call");
            }
        }

        let text = response.text();
        Ok(ChatReply {
            text: if text.trim().is_empty() { "...".to_string() } else { text },
            grounding: response.grounding_links(),
            is_demo: false,
        })
    }
}

async fn generate(backend: &dyn AiBackend, request: &GenerateRequest) -> Result<GenerateResponse> {
    tokio::time::timeout(CHAT_TIMEOUT, backend.generate(TEXT_MODEL, request))
        .await
        .map_err(|_| CoreError::Timeout("chat backend".to_string()))?
}

fn system_instruction(ctx: &ChatContext) -> String {
    let language = ctx.locale.pick("ENGLISH", "HINDI (Devanagari script)");
    format!(
        "You are 'Maatiputra', a friendly agricultural expert.\n\
         Context Location: {}.\n\
         Response Language: {}.\n\n\
         Rules:\n\
         1. If asked about weather, use '{}'.\n\
         2. If asked about places (shops, mandis, offices) or geography, use the Google Maps tool implicitly.\n\
         3. Keep answers concise, practical, and helpful for Indian farmers.",
        ctx.location_label, language, WEATHER_TOOL
    )
}

fn weather_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: WEATHER_TOOL.to_string(),
        description: "Get the live current weather and daily forecast for a specific location."
            .to_string(),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "location": {
                    "type": "STRING",
                    "description": "The city/town name. If the user refers to 'here' or doesn't specify, use the Context Location."
                }
            },
            "required": ["location"]
        }),
    }
}

fn build_request(history: &[ChatMessage], message: &str, ctx: &ChatContext) -> GenerateRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|m| {
            let text = if m.content.is_empty() { " " } else { m.content.as_str() };
            match m.role {
                ChatRole::User => Content::user(vec![Part::text(text)]),
                ChatRole::Assistant => Content::model(vec![Part::text(text)]),
            }
        })
        .collect();
    contents.push(Content::user(vec![Part::text(message)]));

    let coords = ctx.coords.unwrap_or(Coordinates::FALLBACK);

    GenerateRequest {
        contents,
        system_instruction: Some(Content::system(system_instruction(ctx))),
        tools: vec![Tool::functions(vec![weather_declaration()]), Tool::google_maps()],
        tool_config: Some(ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude: coords.lat,
                    longitude: coords.lon,
                },
            },
        }),
        generation_config: None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::advisory::test_support::ScriptedBackend;
    use super::*;
    use parking_lot::Mutex;

    struct RecordingResolver {
        asked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherToolResolver for RecordingResolver {
        async fn resolve(&self, location: &str) -> Value {
            self.asked.lock().push(location.to_string());
            json!({ "location": "Indore, Madhya Pradesh", "current": { "temp_c": 31.0 } })
        }
    }

    fn resolver() -> Arc<RecordingResolver> {
        Arc::new(RecordingResolver { asked: Mutex::new(Vec::new()) })
    }

    fn ctx(locale: Locale) -> ChatContext {
        ChatContext {
            location_label: DEFAULT_LOCATION_CONTEXT.to_string(),
            coords: None,
            locale,
        }
    }

    fn tool_call_reply(location: Option<&str>) -> Result<GenerateResponse> {
        let args = match location {
            Some(l) => json!({ "location": l }),
            None => json!({}),
        };
        Ok(serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "functionCall": { "id": "call-7", "name": WEATHER_TOOL, "args": args } }]
                }
            }]
        }))?)
    }

    // ========== Session Tests ==========

    #[test]
    fn test_session_single_flight() {
        let mut session = ChatSession::new(Locale::En);
        assert_eq!(session.messages().len(), 1);
        assert!(session.begin_send("   ").is_none());

        let turn = session.begin_send(" Will it rain? ").unwrap();
        assert_eq!(turn.message, "Will it rain?");
        assert_eq!(turn.history.len(), 1);
        assert!(session.begin_send("again").is_none());

        session.finish(ChatReply { text: "No".into(), grounding: Vec::new(), is_demo: false });
        let roles: Vec<ChatRole> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_session_welcome_follows_locale() {
        let session = ChatSession::new(Locale::Hi);
        assert!(session.messages()[0].content.starts_with("नमस्ते"));
    }

    // ========== Round Trip Tests ==========

    #[tokio::test(start_paused = true)]
    async fn test_demo_reply_without_backend() {
        let assistant = ChatAssistant::new(None, resolver());
        let reply = assistant.respond(&[], "hello", &ctx(Locale::Hi)).await;
        assert_eq!(reply.text, canned::chat_demo_reply(Locale::Hi));
        assert!(reply.is_demo);
    }

    #[tokio::test]
    async fn test_tool_call_round_trip() {
        let backend = ScriptedBackend::new(vec![
            tool_call_reply(Some("Indore")),
            ScriptedBackend::text("It is 31°C in Indore."),
        ]);
        let weather = resolver();
        let assistant = ChatAssistant::new(Some(backend.clone()), weather.clone());

        let mut session = ChatSession::new(Locale::En);
        let turn = session.begin_send("Weather in Indore?").unwrap();
        let reply = assistant.respond(&turn.history, &turn.message, &ctx(Locale::En)).await;

        assert_eq!(weather.asked.lock().as_slice(), ["Indore"]);
        {
            let requests = backend.requests.lock();
            assert_eq!(requests.len(), 2);
            let follow_up = &requests[1].1.contents;
            let response_part = follow_up.last().unwrap().parts[0].function_response.as_ref().unwrap();
            assert_eq!(response_part.id.as_deref(), Some("call-7"));
            assert_eq!(response_part.response["result"]["current"]["temp_c"], 31.0);
            assert!(follow_up[follow_up.len() - 2].parts[0].function_call.is_some());
        }
        // Still only the user's message until the reply is applied
        assert_eq!(session.messages().len(), 2);

        session.finish(reply);
        assert_eq!(session.messages().last().unwrap().content, "It is 31°C in Indore.");
    }

    #[tokio::test]
    async fn test_tool_call_without_location_uses_context() {
        let backend = ScriptedBackend::new(vec![tool_call_reply(None), ScriptedBackend::text("")]);
        let weather = resolver();
        let reply = ChatAssistant::new(Some(backend), weather.clone())
            .respond(&[], "How is the weather here?", &ctx(Locale::En))
            .await;

        assert_eq!(weather.asked.lock().as_slice(), [DEFAULT_LOCATION_CONTEXT]);
        assert_eq!(reply.text, "...");
    }

    #[tokio::test]
    async fn test_failure_becomes_apology() {
        let backend = ScriptedBackend::new(vec![
            tool_call_reply(Some("Indore")),
            Err(CoreError::Http { status: 500, message: "boom".into() }),
        ]);
        let reply = ChatAssistant::new(Some(backend), resolver())
            .respond(&[], "Weather?", &ctx(Locale::Hi))
            .await;
        assert_eq!(reply.text, "क्षमा करें, मैं अभी जवाब नहीं दे सकता।");
        assert!(!reply.is_demo);
    }

    #[test]
    fn test_request_shape() {
        let history = vec![
            ChatMessage::assistant("welcome", "Namaste!", Vec::new()),
            ChatMessage::user("u1", ""),
        ];
        let request = build_request(&history, "Mandi near me?", &ctx(Locale::Hi));

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role.as_deref(), Some("model"));
        assert_eq!(request.contents[1].parts[0].text.as_deref(), Some(" "));
        let lat_lng = request.tool_config.unwrap().retrieval_config.lat_lng;
        assert_eq!(lat_lng.latitude, Coordinates::FALLBACK.lat);
        let system = request.system_instruction.unwrap().parts[0].text.clone().unwrap();
        assert!(system.contains("HINDI (Devanagari script)"));
        assert_eq!(request.tools[0].function_declarations[0].name, WEATHER_TOOL);
    }
}
