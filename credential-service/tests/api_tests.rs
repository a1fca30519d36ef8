mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

const RESOURCE: &str = "arn:aws:execute-api:us-east-1:123456789012:api/prod/GET/orders";

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("alice@example.com", "correct horse").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status_code": 201, "data": null }));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_identity() {
    let app = TestApp::spawn().await;

    app.register("alice@example.com", "correct horse").await;
    let response = app.register("alice@example.com", "another password").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "User already exists");
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app.register("", "correct horse").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "email": "alice@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Missing required fields");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("not-an-email", "correct horse").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct horse").await;

    let response = app.login("alice@example.com", "correct horse").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 900);

    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct horse").await;

    let wrong_password = app.login("alice@example.com", "wrong password").await;
    let unknown_identity = app.login("bob@example.com", "correct horse").await;
    let malformed_identity = app.login("bob", "correct horse").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_identity.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(malformed_identity.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = wrong_password.text().await.unwrap();
    let unknown_identity = unknown_identity.text().await.unwrap();
    let malformed_identity = malformed_identity.text().await.unwrap();
    assert_eq!(wrong_password, unknown_identity);
    assert_eq!(wrong_password, malformed_identity);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app.login("alice@example.com", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_authorize_allows_bearer_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "correct horse").await;

    let response = app
        .authorize(Some(&format!("Bearer {}", token)), RESOURCE)
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"],
        json!({
            "principalId": "alice@example.com",
            "policyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Action": ["execute-api:Invoke"],
                    "Effect": "Allow",
                    "Resource": [RESOURCE]
                }]
            }
        })
    );
}

#[tokio::test]
async fn test_authorize_accepts_bare_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "correct horse").await;

    let response = app.authorize(Some(&token), RESOURCE).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["principalId"], "alice@example.com");
}

#[tokio::test]
async fn test_authorize_empty_resource_has_no_statement() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "correct horse").await;

    let response = app.authorize(Some(&format!("Bearer {}", token)), "").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], json!({ "principalId": "alice@example.com" }));
}

#[tokio::test]
async fn test_authorize_without_header() {
    let app = TestApp::spawn().await;

    let missing = app.authorize(None, RESOURCE).await;
    let empty = app.authorize(Some(""), RESOURCE).await;
    let scheme_only = app.authorize(Some("Bearer"), RESOURCE).await;

    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(empty.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(scheme_only.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authorize_tampered_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "correct horse").await;

    let signature_start = token.rfind('.').unwrap() + 1;
    let mut tampered = token.clone().into_bytes();
    tampered[signature_start] = if tampered[signature_start] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app
        .authorize(Some(&format!("Bearer {}", tampered)), RESOURCE)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "status_code": 401, "data": { "message": "Unauthorized" } })
    );
}

#[tokio::test]
async fn test_authorize_token_from_other_secret() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct horse").await;

    let foreign = auth::TokenAuthority::new(
        b"some-other-secret-key-that-is-also-long",
        chrono::Duration::minutes(15),
    );
    let claims = auth::ClaimSet::new()
        .with_claim("email", "alice@example.com")
        .unwrap();
    let token = foreign.issue(&claims).unwrap();

    let response = app
        .authorize(Some(&format!("Bearer {}", token)), RESOURCE)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_wrong_field_type() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "email": 5, "password": "x" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "status_code": 400, "data": { "message": "Invalid request body" } })
    );
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_login_without_content_type() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .body(r#"{"email":"alice@example.com","password":"correct horse"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
    assert_eq!(body["data"]["message"], "Invalid request body");
}

#[tokio::test]
async fn test_authorize_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/authorize")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid request body");
}
