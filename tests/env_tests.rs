//! These tests mutate process environment variables, so they live in their
//! own test binary and serialize on `ENV_LOCK`.

use std::sync::{Mutex, MutexGuard};

use serde_json::json;
use textgen::{ErrorKind, generate_text};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[tokio::test]
async fn generate_text_without_api_key_is_configuration_error() {
    let _guard = lock_env();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // SAFETY: environment access is serialized by ENV_LOCK within this binary.
    unsafe {
        std::env::remove_var("OPENAI_API_KEY");
        std::env::set_var("OPENAI_BASE_URL", format!("{}/v1", server.uri()));
    }

    let err = generate_text("x").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("OPENAI_API_KEY"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn generate_text_reads_key_and_base_url_from_env() {
    let _guard = lock_env();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hello from env!" },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // SAFETY: environment access is serialized by ENV_LOCK within this binary.
    unsafe {
        std::env::set_var("OPENAI_API_KEY", "sk-from-env");
        std::env::set_var("OPENAI_BASE_URL", format!("{}/v1", server.uri()));
    }

    let text = generate_text("Say hello").await.unwrap();

    assert_eq!(text, "Hello from env!");
}
