//! Integration tests for the AI Translator service
//!
//! Each test starts the real router on an ephemeral port, backed by a
//! wiremock server standing in for the OpenAI Chat Completions API.

use std::net::SocketAddr;

use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use ai_translator::{
    client::TranslatorClient,
    form::{FormState, Outcome},
    languages::LanguageTable,
    openai::OpenAiClient,
    server::{self, AppState},
    translator::{TranslationRequest, Translator},
};

// ==================== Test Helpers ====================

/// Start the service against a mocked completion API and return its base URL.
async fn spawn_app(openai: &MockServer) -> String {
    let client = OpenAiClient::new(
        reqwest::Client::new(),
        format!("{}/v1/chat/completions", openai.uri()),
        "test-openai-key",
    );
    let translator = Translator::new(LanguageTable::default(), client, "gpt-3.5-turbo");
    let app = server::router(AppState::new(translator));

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    format!("http://{}", addr)
}

/// Create a mock OpenAI success response
fn create_openai_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1705312200,
        "model": "gpt-3.5-turbo",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ]
    })
}

async fn mount_completion(openai: &MockServer, content: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-openai-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response(content)))
        .expect(expected_calls)
        .mount(openai)
        .await;
}

async fn post_translate(base_url: &str, body: serde_json::Value) -> (u16, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/translate", base_url))
        .json(&body)
        .send()
        .await
        .expect("request should reach the service");

    let status = response.status().as_u16();
    let body = response.json().await.expect("body should be JSON");
    (status, body)
}

// ==================== Liveness Endpoint Tests ====================

#[tokio::test]
async fn test_root_endpoint() {
    let openai = MockServer::start().await;
    let base_url = spawn_app(&openai).await;

    let body: serde_json::Value = reqwest::get(format!("{}/", base_url))
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("body should be JSON");

    assert_eq!(body["message"], "AI Translator API is running!");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_endpoint() {
    let openai = MockServer::start().await;
    let base_url = spawn_app(&openai).await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", base_url))
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("body should be JSON");

    assert_eq!(body, serde_json::json!({"status": "healthy", "service": "AI Translator API"}));
}

#[tokio::test]
async fn test_languages_endpoint_lists_table_in_order() {
    let openai = MockServer::start().await;
    let base_url = spawn_app(&openai).await;

    let text = reqwest::get(format!("{}/languages", base_url))
        .await
        .expect("request should succeed")
        .text()
        .await
        .expect("body should be text");

    assert!(text.starts_with(r#"{"languages":{"fr":"French","en":"English""#));

    let body: serde_json::Value = serde_json::from_str(&text).expect("body should be JSON");
    let languages = body["languages"].as_object().expect("languages is an object");
    assert_eq!(languages.len(), 12);
    assert_eq!(languages["ko"], "Korean");
    assert_eq!(languages["ar"], "Arabic");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let openai = MockServer::start().await;
    let base_url = spawn_app(&openai).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/translate", base_url))
        .header("Origin", "http://localhost:8501")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("preflight should reach the service");

    assert!(response.status().is_success());
    let headers = response.headers();
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(header_str("access-control-allow-origin").as_deref(), Some("*"));
    assert_eq!(header_str("access-control-allow-methods").as_deref(), Some("*"));
    assert_eq!(header_str("access-control-allow-headers").as_deref(), Some("*"));
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let openai = MockServer::start().await;
    let base_url = spawn_app(&openai).await;

    let response = reqwest::Client::new()
        .get(format!("{}/languages", base_url))
        .header("Origin", "https://translator.example.com")
        .send()
        .await
        .expect("request should succeed");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

// ==================== Translate Endpoint Tests ====================

#[tokio::test]
async fn test_translate_hello_to_bonjour() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "Bonjour", 1).await;
    let base_url = spawn_app(&openai).await;

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "Hello", "source_language": "en", "target_language": "fr"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        serde_json::json!({
            "original_text": "Hello",
            "translated_text": "Bonjour",
            "source_language": "en",
            "target_language": "fr"
        })
    );
}

#[tokio::test]
async fn test_translate_echoes_languages_regardless_of_model_output() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "Translated from English to German: Hallo", 1).await;
    let base_url = spawn_app(&openai).await;

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "Hello", "source_language": "ja", "target_language": "pt", "model": "gpt-4"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source_language"], "ja");
    assert_eq!(body["target_language"], "pt");
}

#[tokio::test]
async fn test_translate_empty_text_rejected_without_api_call() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base_url = spawn_app(&openai).await;

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "", "source_language": "en", "target_language": "fr"}),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Text cannot be empty");
}

#[tokio::test]
async fn test_translate_unsupported_source_named() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base_url = spawn_app(&openai).await;

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "hi", "source_language": "xx", "target_language": "fr"}),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Source language 'xx' not supported");
}

#[tokio::test]
async fn test_translate_unsupported_target_named() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base_url = spawn_app(&openai).await;

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "hi", "source_language": "en", "target_language": "tlh"}),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Target language 'tlh' not supported");
}

#[tokio::test]
async fn test_translate_length_boundary() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "ok", 1).await;
    let base_url = spawn_app(&openai).await;

    let (status, _) = post_translate(
        &base_url,
        serde_json::json!({"text": "a".repeat(5000), "source_language": "en", "target_language": "fr"}),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "a".repeat(5001), "source_language": "en", "target_language": "fr"}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Text too long (max 5000 characters)");
}

#[tokio::test]
async fn test_translate_upstream_failure_is_500() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .expect(1)
        .mount(&openai)
        .await;
    let base_url = spawn_app(&openai).await;

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "Hello", "source_language": "en", "target_language": "fr"}),
    )
    .await;

    assert_eq!(status, 500);
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.contains("Translation failed"));
    assert!(detail.contains("upstream overloaded"));
}

#[tokio::test]
async fn test_translate_network_failure_is_500() {
    let client = OpenAiClient::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1/v1/chat/completions",
        "test-openai-key",
    );
    let translator = Translator::new(LanguageTable::default(), client, "gpt-3.5-turbo");
    let app = server::router(AppState::new(translator));
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to bind test listener");
    let base_url = format!("http://{}", listener.local_addr().expect("listener has an address"));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"text": "Hello", "source_language": "en", "target_language": "fr"}),
    )
    .await;

    assert_eq!(status, 500);
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.starts_with("Translation failed: "));
    assert!(detail.contains("Failed to send request to OpenAI API"));
}

#[tokio::test]
async fn test_translate_malformed_body_is_422() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base_url = spawn_app(&openai).await;

    let (status, body) = post_translate(
        &base_url,
        serde_json::json!({"source_language": "en", "target_language": "fr"}),
    )
    .await;

    assert_eq!(status, 422);
    assert!(body["detail"].as_str().expect("detail is a string").contains("text"));
}

// ==================== Client Form Workflow Tests ====================

#[tokio::test]
async fn test_form_workflow_against_service() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "  Hola  ", 1).await;
    let base_url = spawn_app(&openai).await;

    let client = TranslatorClient::new(&base_url);
    assert!(client.health().await.is_ok());

    let languages = client.languages().await.expect("languages should load");
    let mut form = FormState::new(languages).expect("languages are not empty");
    form.select_target("es").expect("es is supported");

    let request = form.prepare("Hello").expect("form should submit");
    let outcome = Outcome::from(client.translate(&request).await);

    assert_eq!(
        form.render(&outcome),
        "Original (English):\n  Hello\n\nTranslation (Spanish):\n  Hola"
    );
}

#[tokio::test]
async fn test_form_lists_languages_in_service_order() {
    let openai = MockServer::start().await;
    let base_url = spawn_app(&openai).await;

    let languages = TranslatorClient::new(&base_url)
        .languages()
        .await
        .expect("languages should load");
    let codes: Vec<_> = languages.0.iter().map(|(code, _)| code.as_str()).collect();
    assert_eq!(
        codes,
        ["fr", "en", "es", "de", "it", "pt", "ru", "ja", "ko", "zh", "ar", "hi"]
    );

    let form = FormState::new(languages).expect("languages are not empty");
    assert!(form.language_list().starts_with("  fr  French\n  en  English\n"));
}

#[tokio::test]
async fn test_form_renders_service_error_verbatim() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "unused", 0).await;
    let base_url = spawn_app(&openai).await;

    let client = TranslatorClient::new(&base_url);
    let request = TranslationRequest {
        text: "hi".to_string(),
        source_language: "xx".to_string(),
        target_language: "fr".to_string(),
        model: None,
    };

    let outcome = Outcome::from(client.translate(&request).await);
    assert_eq!(
        outcome,
        Outcome::Failed("Source language 'xx' not supported".to_string())
    );
}

#[tokio::test]
async fn test_form_reports_unreachable_backend() {
    let client = TranslatorClient::new("http://127.0.0.1:1");
    let request = TranslationRequest {
        text: "Hello".to_string(),
        source_language: "en".to_string(),
        target_language: "fr".to_string(),
        model: None,
    };

    let outcome = Outcome::from(client.translate(&request).await);
    assert!(matches!(outcome, Outcome::Unreachable(_)));
    assert!(client.languages().await.is_err());
}
