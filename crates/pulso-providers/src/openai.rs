//! OpenAI-compatible chat-completion provider.
//!
//! Works with OpenAI's API and any compatible endpoint. One round trip per
//! request, with an explicit timeout and a single retry on transient
//! connect/timeout failures.

use async_trait::async_trait;
use pulso_core::{
    config::ProviderConfig,
    context::Context,
    error::PulsoError,
    message::{ChatMessage, Completion, CompletionMetadata},
    traits::Provider,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Pause before retrying a transient failure.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// OpenAI-compatible provider.
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl OpenAiProvider {
    /// Create from config values. The caller checks the credential first.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, PulsoError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PulsoError::Provider(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send the request, retrying only failures that never produced a response.
    async fn send_with_retry(
        &self,
        url: &str,
        body: &ChatCompletionRequest,
    ) -> Result<reqwest::Response, PulsoError> {
        let mut attempt = 0;
        loop {
            let result = self
                .client
                .post(url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await;

            match result {
                Ok(resp) => return Ok(resp),
                Err(e) if is_transient(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "openai: transient failure ({e}), retry {attempt}/{}",
                        self.max_retries
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => {
                    return Err(PulsoError::Provider(format!("openai request failed: {e}")));
                }
            }
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Build OpenAI-format messages from context (system as a message role).
pub(crate) fn build_openai_messages(system: &str, messages: &[ChatMessage]) -> Vec<WireMessage> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.is_empty() {
        out.push(WireMessage {
            role: "system".to_string(),
            content: system.to_string(),
        });
    }
    for m in messages {
        out.push(WireMessage {
            role: m.role.as_str().to_string(),
            content: m.content.clone(),
        });
    }
    out
}

/// Pull a readable message out of an error body, falling back to the raw text.
fn upstream_error_text(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|env| env.error)
        .map(|e| e.describe())
        .unwrap_or_else(|| body.to_string())
}

#[derive(Serialize, Deserialize, Clone)]
pub(crate) struct WireMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
}

#[derive(Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Option<Vec<ChatChoice>>,
    pub model: Option<String>,
    pub usage: Option<ChatUsage>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ChatUsage {
    pub total_tokens: Option<u64>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

/// The `error` object of an OpenAI error envelope. Some proxies send a bare string.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiError {
    Detailed {
        message: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
    },
    Plain(String),
}

impl ApiError {
    fn describe(&self) -> String {
        match self {
            Self::Detailed { message, kind } => match (message, kind) {
                (Some(m), Some(k)) => format!("{k}: {m}"),
                (Some(m), None) => m.clone(),
                (None, Some(k)) => k.clone(),
                (None, None) => "unknown error".to_string(),
            },
            Self::Plain(s) => s.clone(),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, context: &Context) -> Result<Completion, PulsoError> {
        let (system, api_messages) = context.to_api_messages();
        let start = Instant::now();

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_openai_messages(&system, &api_messages),
        };

        let url = self.endpoint();
        debug!("openai: POST {url} model={}", self.model);

        let resp = self.send_with_retry(&url, &body).await?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PulsoError::Provider(format!("openai: failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(PulsoError::Upstream {
                status: status.as_u16(),
                body: upstream_error_text(&text),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| PulsoError::Provider(format!("openai: failed to parse response: {e}")))?;

        if let Some(err) = parsed.error.as_ref() {
            return Err(PulsoError::Upstream {
                status: status.as_u16(),
                body: err.describe(),
            });
        }

        let reply = parsed
            .choices
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.clone())
            .unwrap_or_else(|| {
                warn!("openai: response had no message content");
                String::new()
            });

        Ok(Completion {
            text: reply,
            metadata: CompletionMetadata {
                provider_used: "openai".to_string(),
                tokens_used: parsed.usage.as_ref().and_then(|u| u.total_tokens),
                processing_time_ms: start.elapsed().as_millis() as u64,
                model: parsed.model,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn provider_for(base_url: String, timeout_secs: u64, max_retries: u32) -> OpenAiProvider {
        OpenAiProvider::from_config(&ProviderConfig {
            base_url,
            model: "gpt-test".into(),
            api_key: "sk-test".into(),
            timeout_secs,
            max_retries,
        })
        .unwrap()
    }

    fn sample_context() -> Context {
        let mut ctx = Context::new("hazme una rutina");
        ctx.system_prompt = "Eres un coach.".into();
        ctx.history = vec![ChatMessage::user("hola"), ChatMessage::assistant("¡Hola!")];
        ctx
    }

    #[test]
    fn test_build_openai_messages() {
        let msgs = vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello!"),
            ChatMessage::user("How?"),
        ];
        let wire = build_openai_messages("Be helpful.", &msgs);
        assert_eq!(wire.len(), 4);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[0].content, "Be helpful.");
        assert_eq!(wire[2].role, "assistant");
        assert_eq!(wire[3].role, "user");
    }

    #[test]
    fn test_build_openai_messages_empty_system() {
        let wire = build_openai_messages("", &[ChatMessage::user("Hi")]);
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].role, "user");
    }

    #[test]
    fn test_upstream_error_text_variants() {
        let detailed =
            r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error"}}"#;
        assert_eq!(
            upstream_error_text(detailed),
            "invalid_request_error: Incorrect API key"
        );
        assert_eq!(upstream_error_text(r#"{"error":"quota"}"#), "quota");
        assert_eq!(upstream_error_text("Bad Gateway"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_complete_success_sends_history_and_auth() {
        let seen: Arc<std::sync::Mutex<Option<(String, Value)>>> = Arc::default();
        let seen_handler = Arc::clone(&seen);
        let router = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = Arc::clone(&seen_handler);
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *seen.lock().unwrap() = Some((auth, body));
                    Json(json!({
                        "choices": [{"message": {
                            "role": "assistant",
                            "content": "{\"assistant_message\":\"listo\"}"
                        }}],
                        "model": "gpt-test-0001",
                        "usage": {"total_tokens": 42}
                    }))
                }
            }),
        );
        let base = spawn_stub(router).await;
        let provider = provider_for(base, 5, 0);

        let completion = provider.complete(&sample_context()).await.unwrap();
        assert_eq!(completion.text, "{\"assistant_message\":\"listo\"}");
        assert_eq!(completion.metadata.provider_used, "openai");
        assert_eq!(completion.metadata.tokens_used, Some(42));
        assert_eq!(completion.metadata.model.as_deref(), Some("gpt-test-0001"));

        let (auth, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth, "Bearer sk-test");
        assert_eq!(body["model"], "gpt-test");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[3]["content"], "hazme una rutina");
    }

    #[tokio::test]
    async fn test_complete_non_success_is_upstream_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Incorrect API key", "type": "auth"}})),
                )
            }),
        );
        let provider = provider_for(spawn_stub(router).await, 5, 1);

        match provider.complete(&sample_context()).await {
            Err(PulsoError::Upstream { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "auth: Incorrect API key");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_error_envelope_on_200_is_upstream_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"error": {"message": "model overloaded"}})) }),
        );
        let provider = provider_for(spawn_stub(router).await, 5, 0);

        match provider.complete(&sample_context()).await {
            Err(PulsoError::Upstream { status, body }) => {
                assert_eq!(status, 200);
                assert_eq!(body, "model overloaded");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_missing_content_yields_empty_text() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let provider = provider_for(spawn_stub(router).await, 5, 0);
        let completion = provider.complete(&sample_context()).await.unwrap();
        assert!(completion.text.is_empty());
    }

    #[tokio::test]
    async fn test_complete_connection_refused_is_provider_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = provider_for(format!("http://{addr}/v1"), 2, 1);
        let err = provider.complete(&sample_context()).await.unwrap_err();
        assert!(matches!(err, PulsoError::Provider(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_complete_timeout_retries_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_handler = Arc::clone(&hits);
        let router = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let hits = Arc::clone(&hits_handler);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!({"choices": []}))
                }
            }),
        );
        let provider = provider_for(spawn_stub(router).await, 1, 1);

        let err = provider.complete(&sample_context()).await.unwrap_err();
        assert!(matches!(err, PulsoError::Provider(_)), "got {err:?}");
        assert_eq!(hits.load(Ordering::SeqCst), 2, "one attempt plus one retry");
    }
}
