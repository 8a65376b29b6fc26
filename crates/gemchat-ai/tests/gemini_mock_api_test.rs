//! Gemini client and session against a mocked Generative Language API.

use std::io::Write;
use std::time::Duration;

use gemchat_ai::{
    AiError, ChatSession, GeminiClient, GeminiConfig, GenerativeModel, ImageBlob, ModelProvider,
    Turn, FALLBACK_REPLY,
};
use gemchat_config::{GemchatConfig, SafetyPolicy, SafetySetting};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FLASH_PATH: &str = "/gemini-1.5-flash:generateContent";

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 5,
            "totalTokenCount": 17
        }
    })
}

fn error_response(code: u16, status: &str, message: &str) -> serde_json::Value {
    json!({ "error": { "code": code, "message": message, "status": status } })
}

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiConfig::new("test-api-key").with_base_url(server.uri())).unwrap()
}

fn flash(server: &MockServer, safety: &SafetyPolicy) -> Box<dyn GenerativeModel> {
    client(server)
        .resolve_model("gemini-1.5-flash", safety)
        .map_err(|e| e.to_string())
        .unwrap()
}

#[tokio::test]
async fn generate_content_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Hello" }] }],
            "safetySettings": [{
                "category": "HARM_CATEGORY_HARASSMENT",
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Hi there!")))
        .expect(1)
        .mount(&server)
        .await;

    let policy = SafetyPolicy::new(vec![SafetySetting::new(
        "HARM_CATEGORY_HARASSMENT",
        "BLOCK_MEDIUM_AND_ABOVE",
    )]);
    let response = flash(&server, &policy)
        .generate(&[Turn::user("Hello")])
        .await
        .unwrap();

    assert_eq!(response.content, "Hi there!");
    assert_eq!(response.usage.input_tokens, 12);
    assert_eq!(response.usage.output_tokens, 5);
}

#[tokio::test]
async fn image_is_sent_inline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gemini-pro-vision:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": "Please describe this photo" },
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                ]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("A cat.")))
        .expect(1)
        .mount(&server)
        .await;

    let png = ImageBlob::from_bytes(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    let model = client(&server)
        .resolve_model("gemini-pro-vision", &SafetyPolicy::default())
        .map_err(|e| e.to_string())
        .unwrap();
    let response = model
        .generate(&[Turn::user_with_image("Please describe this photo", png)])
        .await
        .unwrap();

    assert_eq!(response.content, "A cat.");
}

#[tokio::test]
async fn rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_response(
            429,
            "RESOURCE_EXHAUSTED",
            "Quota exceeded",
        )))
        .mount(&server)
        .await;

    let err = flash(&server, &SafetyPolicy::default())
        .generate(&[Turn::user("Hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::RateLimited));
}

#[tokio::test]
async fn unknown_model_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response(
            404,
            "NOT_FOUND",
            "models/gemini-1.5-flash is not found",
        )))
        .mount(&server)
        .await;

    let err = flash(&server, &SafetyPolicy::default())
        .generate(&[Turn::user("Hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::ModelUnavailable(_)));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_response(
            500,
            "INTERNAL",
            "backend exploded",
        )))
        .mount(&server)
        .await;

    let err = flash(&server, &SafetyPolicy::default())
        .generate(&[Turn::user("Hello")])
        .await
        .unwrap_err();
    match err {
        AiError::ApiError(msg) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("backend exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn blocked_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = flash(&server, &SafetyPolicy::default())
        .generate(&[Turn::user("something nasty")])
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Blocked(_)));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = GeminiConfig::new("test-api-key")
        .with_base_url(server.uri())
        .with_request_timeout(Duration::from_millis(200));
    let model = GeminiClient::new(config)
        .unwrap()
        .resolve_model("gemini-1.5-flash", &SafetyPolicy::default())
        .map_err(|e| e.to_string())
        .unwrap();

    let err = model.generate(&[Turn::user("Hello")]).await.unwrap_err();
    assert!(matches!(err, AiError::Timeout));
}

fn session_over(server: &MockServer, policy: &tempfile::NamedTempFile) -> ChatSession {
    let mut config = GemchatConfig::default();
    config.api.base_url = server.uri();
    config.safety.policy_path = policy.path().to_string_lossy().into_owned();
    config.model.env_override = "GEMCHAT_MOCK_TEST_UNSET".into();
    ChatSession::from_config(&config, "test-api-key").unwrap()
}

fn empty_policy() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[]").unwrap();
    file
}

#[tokio::test]
async fn session_chat_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Lisbon Trip Plan")))
        .mount(&server)
        .await;

    let policy = empty_policy();
    let mut session = session_over(&server, &policy);
    session.start_chat();

    assert_eq!(session.send_message("Plan a trip to Lisbon").await, "Lisbon Trip Plan");
    assert_eq!(session.chat_title().await, "Lisbon Trip Plan");
    assert_eq!(session.chat_history().unwrap().len(), 4);
    assert_eq!(session.usage().call_count(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(second["contents"].as_array().unwrap().len(), 3);
    assert!(second.get("safetySettings").is_none());
}

#[tokio::test]
async fn session_returns_fallback_on_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let policy = empty_policy();
    let mut session = session_over(&server, &policy);
    session.start_chat();

    assert_eq!(session.send_message("Hello").await, FALLBACK_REPLY);
    assert_eq!(session.chat_history().unwrap().len(), 0);

    session.set_image(Some(ImageBlob::new("image/jpeg", vec![0xff, 0xd8])));
    assert_eq!(session.describe_image(None).await, FALLBACK_REPLY);
}
