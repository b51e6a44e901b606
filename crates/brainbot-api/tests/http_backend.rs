use std::time::Duration;

use brainbot_api::{
    ApiError, ChatBackend, CurrentUser, DocumentStore, EvaluationReports, HttpBackend, HttpConfig,
    IdentityBackend, NewUser, Role, SessionCredential, UserDirectory,
};
use brainbot_common::ConversationId;
use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> HttpBackend {
    let config = HttpConfig::new(server.uri())
        .with_timeouts(Duration::from_secs(2), Duration::from_secs(5));
    HttpBackend::new(config).unwrap()
}

fn credential(token: &str) -> SessionCredential {
    SessionCredential {
        token: token.into(),
        user: CurrentUser {
            id: "u1".into(),
            user_name: "ada".into(),
            email: "ada@example.com".into(),
            role: Role::Admin,
        },
        expires_at: Utc::now() + chrono::Duration::hours(1),
    }
}

#[tokio::test]
async fn lists_conversations_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c1", "title": "Billing", "createdAt": "2024-05-01T10:00:00Z" },
            { "id": 7, "title": null, "created_at": "2024-05-02T10:00:00" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = backend(&server).with_credential(Some(credential("tok-1")));
    let convs = api.list_conversations().await.unwrap();
    assert_eq!(convs.len(), 2);
    assert_eq!(convs[0].title.as_deref(), Some("Billing"));
    assert_eq!(convs[1].id.as_str(), "7");
    assert!(convs[1].title.is_none());
}

#[tokio::test]
async fn send_message_posts_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/conversations/c1/messages"))
        .and(body_json(json!({ "prompt": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prompt": "hello",
            "response": "Hi there",
            "timestamp": "2024-05-01T10:00:00Z"
        })))
        .mount(&server)
        .await;

    let api = backend(&server);
    let exchange = api
        .send_message(&ConversationId::new("c1"), "hello")
        .await
        .unwrap();
    assert_eq!(exchange.response, "Hi there");
}

#[tokio::test]
async fn delete_conversation_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/conversations/c9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .mount(&server)
        .await;

    let reply = backend(&server)
        .delete_conversation(&ConversationId::new("c9"))
        .await
        .unwrap();
    assert_eq!(reply.message, "deleted");
}

#[tokio::test]
async fn unauthorized_and_server_errors_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/conversations/c1/messages"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })),
        )
        .mount(&server)
        .await;

    let api = backend(&server);
    assert_eq!(
        api.list_conversations().await.unwrap_err(),
        ApiError::Unauthorized
    );
    assert_eq!(
        api.list_messages(&ConversationId::new("c1")).await.unwrap_err(),
        ApiError::Http {
            status: 500,
            message: "database down".into()
        }
    );
}

#[tokio::test]
async fn login_sends_capitalised_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "UserName": "ada", "Password": "secret123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-9",
            "currentUser": { "id": "u1", "userName": "ada", "role": "Administrator" }
        })))
        .mount(&server)
        .await;

    let resp = backend(&server).login("ada", "secret123").await.unwrap();
    assert_eq!(resp.token, "tok-9");
    assert_eq!(resp.current_user.role, Role::Admin);
}

#[tokio::test]
async fn locked_account_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errorType": "ACCOUNT_LOCKED",
            "message": "locked"
        })))
        .mount(&server)
        .await;

    let err = backend(&server).login("ada", "pw").await.unwrap_err();
    assert_eq!(err, ApiError::AccountLocked);
}

#[tokio::test]
async fn user_list_accepts_wrapped_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "_id": "a", "name": "Ada", "email": "ada@x.io", "isLocked": true }]
        })))
        .mount(&server)
        .await;

    let users = backend(&server).list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(!users[0].toggled_lock());
}

#[tokio::test]
async fn create_user_rejected_by_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Email already registered"
        })))
        .mount(&server)
        .await;

    let user = NewUser {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        role: Role::User,
    };
    let err = backend(&server).create_user(&user).await.unwrap_err();
    assert_eq!(err, ApiError::InvalidInput("Email already registered".into()));
}

#[tokio::test]
async fn invalid_new_user_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let user = NewUser {
        name: "Ada".into(),
        email: "nope".into(),
        role: Role::User,
    };
    assert!(matches!(
        backend(&server).create_user(&user).await,
        Err(ApiError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn uploads_document_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("manual.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "stored" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("manual.pdf");
    std::fs::write(&file, b"%PDF-1.4").unwrap();

    let message = backend(&server).upload_document(&file).await.unwrap();
    assert_eq!(message, "stored");
}

#[tokio::test]
async fn lists_documents_from_wrapped_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{ "fileName": "a.pdf", "uploadedAt": "2024-01-01" }]
        })))
        .mount(&server)
        .await;

    let docs = backend(&server).list_documents().await.unwrap();
    assert_eq!(docs[0].file_name, "a.pdf");
}

#[tokio::test]
async fn fetches_evaluation_chart_image() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a];
    Mock::given(method("GET"))
        .and(path("/api/evaluations/ragas"))
        .and(header("authorization", "Bearer tok-9"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let api = backend(&server).with_credential(Some(credential("tok-9")));
    let chart = api.evaluation_chart().await.unwrap();
    assert_eq!(chart.bytes, png);
    assert_eq!(chart.content_type.as_deref(), Some("image/png"));
    assert_eq!(chart.extension(), "png");
}

#[tokio::test]
async fn evaluation_chart_failures_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/evaluations/ragas"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "admins only" })))
        .mount(&server)
        .await;

    assert_eq!(
        backend(&server).evaluation_chart().await,
        Err(ApiError::Forbidden("admins only".into()))
    );
}

#[tokio::test]
async fn network_failure_is_network_error() {
    let api = HttpBackend::new(
        HttpConfig::new("http://127.0.0.1:1")
            .with_timeouts(Duration::from_millis(200), Duration::from_millis(500)),
    )
    .unwrap();
    assert!(matches!(
        api.list_conversations().await,
        Err(ApiError::Network(_))
    ));
}
