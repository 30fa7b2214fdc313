mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{body_json, member_body, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_member_list_starts_empty() {
    let app = TestApp::new();
    let response = app.get("/member", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_register_member() {
    let app = TestApp::new();
    let (member, token) = app.register(&member_body("reward")).await;

    assert_eq!(member["id"], 1);
    assert_eq!(member["name"], "reward");
    assert_eq!(member["membership"], "gold");
    assert!(member["membership_no"].is_i64());
    assert!(member.get("password_hash").is_none());
    assert!(member.get("password").is_none());

    let claims = app.jwt_service.validate_token(&token).unwrap();
    assert_eq!(claims.member_number().unwrap(), member["membership_no"].as_i64().unwrap());
}

#[tokio::test]
async fn test_created_member_is_listed_once() {
    let app = TestApp::new();
    let (created, _) = app.register(&member_body("alice")).await;

    let members = body_json(app.get("/member", None).await).await;
    let matches = members
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["membership_no"] == created["membership_no"])
        .count();
    assert_eq!(matches, 1);
}

#[tokio::test]
async fn test_get_member_with_own_token() {
    let app = TestApp::new();
    let (created, token) = app.register(&member_body("alice")).await;

    let response = app.get("/member/1", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_get_member_with_someone_elses_token() {
    let app = TestApp::new();
    let (_, alice_token) = app.register(&member_body("alice")).await;
    app.register(&member_body("bob")).await;

    let response = app.get("/member/2", Some(&alice_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error_code"], "FORBIDDEN");
    assert_eq!(body["message"], "invalid token");
}

#[tokio::test]
async fn test_get_member_without_token() {
    let app = TestApp::new();
    app.register(&member_body("alice")).await;

    let response = app.get("/member/1", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();

    let mut weak_password = member_body("alice");
    weak_password["password"] = json!("short");
    let response = app.post_json("/member", &weak_password).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut nameless = member_body("");
    nameless["age"] = json!(30);
    let response = app.post_json("/member", &nameless).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], "VALIDATION_ERROR");

    let response = app.post_json("/member", &json!({ "name": "missing fields" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(body_json(app.get("/member", None).await).await, json!([]));
}

#[tokio::test]
async fn test_login_round_trip() {
    let app = TestApp::new();
    let (member, _) = app.register(&member_body("alice")).await;
    let number = member["membership_no"].as_i64().unwrap();

    let response = app
        .post_json("/login", &json!({ "number": number, "password": "cypher99" }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let login = body_json(response).await;
    assert_eq!(login["number"], number);
    let token = login["token"].as_str().unwrap();

    let response = app.get("/member/1", Some(token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new();
    let (member, _) = app.register(&member_body("alice")).await;

    let response = app
        .post_json(
            "/login",
            &json!({ "number": member["membership_no"], "password": "not-the-password" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error_code"], "INVALID_CREDENTIALS");
}
