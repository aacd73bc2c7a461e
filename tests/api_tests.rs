//! HTTP API tests for TravelChat, driving the router with `oneshot`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use travelchat::{
    build_router, ChatClient, Container, ContainerConfig, DomainError, PendingTurn,
};

struct EchoClient {
    calls: AtomicUsize,
}

#[async_trait]
impl ChatClient for EchoClient {
    async fn complete(&self, turn: &PendingTurn) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let question = turn.user_message().map(|m| m.content()).unwrap_or_default();
        Ok(format!("echo: {}", question))
    }
}

/// Replies only after the test releases it.
struct GatedClient {
    release: Notify,
}

#[async_trait]
impl ChatClient for GatedClient {
    async fn complete(&self, _turn: &PendingTurn) -> Result<String, DomainError> {
        self.release.notified().await;
        Ok("늦은 답변".to_string())
    }
}

fn test_app(fallback: Option<&str>) -> (axum::Router, Arc<EchoClient>) {
    let client = Arc::new(EchoClient {
        calls: AtomicUsize::new(0),
    });
    let container = Container::with_chat_client(
        ContainerConfig {
            base_url: "http://localhost:0".to_string(),
            mock_llm: false,
            fallback_api_key: fallback.map(str::to_string),
        },
        client.clone(),
    );
    (build_router(Arc::new(container)), client)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn read_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn create_session(app: &axum::Router, settings: serde_json::Value) -> String {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/sessions", settings))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = read_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app(None);
    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_full_chat_flow() {
    let (app, client) = test_app(None);
    let id = create_session(
        &app,
        serde_json::json!({ "api_key": "sk-test", "languages": ["한국어"] }),
    )
    .await;

    // 1. Send a message
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{}/messages", id),
            serde_json::json!({ "content": "오사카 여행 추천" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["data"]["message_count"], 3);
    assert_eq!(json["data"]["phase"], "idle");
    assert_eq!(json["data"]["user"]["message"]["role"], "user");
    assert_eq!(json["data"]["assistant"]["message"]["content"], "echo: 오사카 여행 추천");
    assert!(json["data"]["assistant"]["html"]
        .as_str()
        .unwrap()
        .contains("chat-bubble assistant"));

    // 2. Session view hides the system message
    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/sessions/{}", id)))
        .await
        .unwrap();
    let json = read_json(response).await;
    let messages = json["data"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m["role"] != "system"));
    assert_eq!(json["data"]["settings"]["has_api_key"], true);
    assert!(json["data"]["settings"].get("api_key").is_none());

    // 3. Export
    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/sessions/{}/export", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"travel_chat_"));
    assert!(disposition.ends_with(".json\""));
    let body = read_text(response).await;
    let exported: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        exported,
        serde_json::json!([
            { "role": "user", "content": "오사카 여행 추천" },
            { "role": "assistant", "content": "echo: 오사카 여행 추천" }
        ])
    );
    assert!(body.contains("오사카"));

    // 4. Reset
    let response = app
        .clone()
        .oneshot(empty_request("POST", &format!("/api/sessions/{}/reset", id)))
        .await
        .unwrap();
    let json = read_json(response).await;
    assert!(json["data"]["messages"].as_array().unwrap().is_empty());

    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_credential_rejects_message() {
    let (app, client) = test_app(None);
    let id = create_session(&app, serde_json::json!({})).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{}/messages", id),
            serde_json::json!({ "content": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "MISSING_CREDENTIAL");
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_settings_update_and_validation() {
    let (app, _) = test_app(Some("sk-env"));
    let id = create_session(&app, serde_json::json!({})).await;
    let uri = format!("/api/sessions/{}/settings", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            serde_json::json!({
                "model": "gpt-4o",
                "temperature": 1.2,
                "languages": ["한국어", "영어"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["data"]["phase"], "idle");
    assert_eq!(json["data"]["settings"]["model"], "gpt-4o");
    assert_eq!(json["data"]["settings"]["languages"], serde_json::json!(["한국어", "영어"]));
    assert!(json["data"]["system_prompt_preview"]
        .as_str()
        .unwrap()
        .contains("한국어, 영어"));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            serde_json::json!({ "temperature": 1.6 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, serde_json::json!({ "model": "gpt-2" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let (app, _) = test_app(None);
    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/sessions/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_root_redirects_to_new_session_page() {
    let (app, _) = test_app(None);
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/sessions/"));

    let response = app
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;
    assert!(html.contains("여행용 멀티링구얼 챗봇"));
    assert!(html.contains("OpenAI API 키를 입력하세요"));
}

#[tokio::test]
async fn test_second_message_while_waiting_is_conflict() {
    let client = Arc::new(GatedClient {
        release: Notify::new(),
    });
    let container = Container::with_chat_client(
        ContainerConfig {
            base_url: "http://localhost:0".to_string(),
            mock_llm: false,
            fallback_api_key: Some("sk-env".to_string()),
        },
        client.clone(),
    );
    let app = build_router(Arc::new(container));
    let id = create_session(&app, serde_json::json!({})).await;
    let messages_uri = format!("/api/sessions/{}/messages", id);

    let first = tokio::spawn(app.clone().oneshot(json_request(
        "POST",
        &messages_uri,
        serde_json::json!({ "content": "첫 질문" }),
    )));

    let mut phase = String::new();
    for _ in 0..100 {
        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/sessions/{}", id)))
            .await
            .unwrap();
        phase = read_json(response).await["data"]["phase"]
            .as_str()
            .unwrap()
            .to_string();
        if phase == "awaiting_response" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(phase, "awaiting_response");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &messages_uri,
            serde_json::json!({ "content": "두 번째 질문" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "SESSION_BUSY");

    client.release.notify_one();
    let response = first.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["data"]["assistant"]["message"]["content"], "늦은 답변");
}
