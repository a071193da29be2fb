use leboncoin_api::{ApiError, Client, FailureKind, Request, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "id": 42,
        "email": "jane@example.com",
        "emailVerified": false,
        "createdAt": "2024-03-01T10:15:30"
    })
}

async fn client_for(server: &MockServer) -> Client {
    Client::new(format!("{}/api", server.uri())).unwrap()
}

#[tokio::test]
async fn test_login_posts_credentials_and_decodes_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "jane@example.com",
            "password": "secret1"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "token": "jwt-token",
                "user": user_json()
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let session = client
        .send(Request::auth().login("jane@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(session.token, "jwt-token");
    assert_eq!(session.user.id, 42);
    assert_eq!(session.user.email, "jane@example.com");
}

#[tokio::test]
async fn test_register_accepts_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let user = client
        .send(Request::auth().register("jane@example.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, 42);
}

#[tokio::test]
async fn test_login_unauthorized_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401,
            "error": "Unauthorized",
            "message": "Bad credentials"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .send(Request::auth().login("jane@example.com", "wrong-password"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Unauthorized);
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    match err {
        ApiError::Status(_, Some(body)) => {
            assert_eq!(body.message.as_deref(), Some("Bad credentials"));
        }
        other => panic!("Expected status error with body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_failures_are_classified() {
    let cases = [
        (409, FailureKind::Conflict),
        (400, FailureKind::BadRequest),
        (500, FailureKind::Unknown),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .send(Request::auth().register("jane@example.com", "secret1"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_not_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .send(Request::auth().login("jane@example.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.kind(), FailureKind::Unknown);
}

#[tokio::test]
async fn test_no_listener_is_unreachable() {
    // Bind then drop to get a port nobody is listening on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = Client::new(format!("http://127.0.0.1:{}/api", port)).unwrap();
    let err = client
        .send(Request::auth().login("jane@example.com", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Unreachable);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
    let client = Client::new("http://localhost:8080/api/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080/api");
}
