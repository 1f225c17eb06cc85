//! End-to-end: file config → build_agent → provider HTTP call → SalesResponse,
//! with the provider replaced by a local mock server.

use std::path::Path;

use accessnine_core::file_config::load_config;
use accessnine_core::{build_agent, AppConfig, Query, SalesAgentError, MOCK_PRODUCT_DB};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE_QUESTION: &str = "공구리 깨진데 바르는거 좀 줘봐요. 빨리 굳는걸로.";

fn gemini_secrets() -> AppConfig {
    AppConfig {
        google_api_key: Some("test-google-key".into()),
        openai_api_key: None,
    }
}

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn gemini_round_trip_through_config() {
    let server = MockServer::start().await;
    let model_text = "```json\n{\"thought\": \"공구리 = 콘크리트\", \"answer\": \"강력 콘크리트 보수제 (FastFix 300)을 추천드립니다.\", \"related_tags\": [\"#흙손\", \"#프라이머\", \"#보수/방수\"]}\n```";

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-google-key"))
        .and(body_string_contains("FastFix 300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(model_text)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "accessnine.toml",
        &format!("[model]\nbase_url = \"{}\"\n", server.uri()),
    );
    let file_config = load_config(&dir.path().join("accessnine.toml")).unwrap();

    let (agent, default_context) = build_agent(&file_config, &gemini_secrets()).unwrap();
    assert_eq!(default_context.as_str(), MOCK_PRODUCT_DB);

    let response = agent
        .invoke(&Query::new(SAMPLE_QUESTION, default_context.resolve(None)))
        .await
        .unwrap();

    assert!(response.answer.contains("FastFix"));
    assert_eq!(response.related_tags.len(), 3);
}

#[tokio::test]
async fn custom_prompt_and_corpus_from_config_dir() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("PROMPT-MARKER"))
        .and(body_string_contains("우레탄 방수제"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(
            r##"{"thought": "t", "answer": "우레탄 방수제 추천", "related_tags": ["#방수"]}"##,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "products.txt", "[상품 ID: 201]\n상품명: 우레탄 방수제");
    write(
        dir.path(),
        "sales.md",
        "PROMPT-MARKER\n{{context}}\n질문: {{question}}",
    );
    write(
        dir.path(),
        "accessnine.toml",
        &format!(
            "[model]\nbase_url = \"{}\"\n\n[context]\ncorpus = \"products.txt\"\n\n[prompts]\nsales = \"sales.md\"\n",
            server.uri()
        ),
    );

    let file_config = load_config(&dir.path().join("accessnine.toml")).unwrap();
    let (agent, default_context) = build_agent(&file_config, &gemini_secrets()).unwrap();

    let response = agent
        .invoke_parts("방수제 있어요?", default_context.as_str())
        .await
        .unwrap();
    assert_eq!(response.answer, "우레탄 방수제 추천");
}

#[tokio::test]
async fn provider_error_surfaces_as_model_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let mut file_config = accessnine_core::FileConfig::default();
    file_config.model.base_url = Some(server.uri());

    let (agent, _) = build_agent(&file_config, &gemini_secrets()).unwrap();
    let err = agent.invoke_parts("q", "c").await.unwrap_err();

    assert!(matches!(err, SalesAgentError::Model(_)));
    assert!(err.to_string().contains("API key not valid"));
}

#[tokio::test]
async fn missing_key_fails_each_invocation_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
        .expect(0)
        .mount(&server)
        .await;

    let mut file_config = accessnine_core::FileConfig::default();
    file_config.model.base_url = Some(server.uri());

    let (agent, default_context) = build_agent(&file_config, &AppConfig::default()).unwrap();
    assert_eq!(agent.model_name(), "gemini-1.5-flash");

    for _ in 0..2 {
        let err = agent
            .invoke_parts("반생 있어요?", default_context.as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, SalesAgentError::Config(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }
}

#[test]
fn missing_prompt_file_fails_setup() {
    let mut file_config = accessnine_core::FileConfig::default();
    file_config.prompts.sales = Some("/nonexistent/sales.md".into());

    let err = build_agent(&file_config, &gemini_secrets()).err().unwrap();
    assert!(err.to_string().contains("/nonexistent/sales.md"));
}
