mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::{
    send, test_app, RequestSpec, BAD_SHAPE_TOKEN, GOOD_CODE, OFFLINE_TOKEN, OWNER_TOKEN, REVOKED_TOKEN,
};

fn new_post() -> serde_json::Value {
    json!({ "title": "T", "body": "B" })
}

#[tokio::test]
async fn unreachable_provider_redirects_to_sign_in() {
    let app = test_app();

    let res = send(
        &app,
        RequestSpec::new(Method::POST, "/api/posts").token(OFFLINE_TOKEN).json(new_post()),
    )
    .await;

    assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.header(header::LOCATION), Some("/auth/google/sign-in"));
    assert_eq!(app.posts.len(), 0);
}

#[tokio::test]
async fn unexpected_identity_shape_is_unauthorized() {
    let app = test_app();

    let res = send(
        &app,
        RequestSpec::new(Method::POST, "/api/posts").token(BAD_SHAPE_TOKEN).json(new_post()),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn provider_error_payload_is_unauthorized() {
    let app = test_app();

    let res = send(
        &app,
        RequestSpec::new(Method::POST, "/api/posts").token(REVOKED_TOKEN).json(new_post()),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn authentication_runs_before_ownership() {
    let app = test_app();

    // Unknown id, but the credential is checked first
    let res = send(&app, RequestSpec::new(Method::DELETE, "/api/posts/5").token(REVOKED_TOKEN)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = send(&app, RequestSpec::new(Method::DELETE, "/api/posts/5")).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = send(&app, RequestSpec::new(Method::DELETE, "/api/posts/5").token(OWNER_TOKEN)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sign_in_redirects_to_consent_screen() {
    let app = test_app();

    let res = send(&app, RequestSpec::new(Method::GET, "/auth/google/sign-in")).await;

    assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT);
    let location = res.header(header::LOCATION).expect("location header");
    assert!(location.contains("state=test-state"), "unexpected location: {}", location);
}

#[tokio::test]
async fn callback_returns_token_for_valid_code() {
    let app = test_app();

    let res = send(
        &app,
        RequestSpec::new(Method::GET, &format!("/auth/google/callback?code={}", GOOD_CODE)),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "token": "access-123" }));
}

#[tokio::test]
async fn callback_without_usable_code_goes_home() {
    let app = test_app();

    for uri in ["/auth/google/callback?code=nope", "/auth/google/callback"] {
        let res = send(&app, RequestSpec::new(Method::GET, uri)).await;
        assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT, "for {}", uri);
        assert_eq!(res.header(header::LOCATION), Some("/"));
    }
}

#[tokio::test]
async fn root_lists_endpoints() {
    let app = test_app();

    let res = send(&app, RequestSpec::new(Method::GET, "/")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["name"], "Postboard API");
}

#[tokio::test]
async fn health_reports_store_state() {
    let app = test_app();

    let res = send(&app, RequestSpec::new(Method::GET, "/health")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["status"], "ok");

    app.store.set_down(true);
    let res = send(&app, RequestSpec::new(Method::GET, "/health")).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    let body = res.json();
    assert_eq!(body["status"], "degraded");
    assert!(body["database_error"].is_string());
}
