//! Bearer-token guard and method-gating tests for the admin API.
//!
//! These run against the real router over a lazily-connected pool: every
//! request here must be answered before any store access happens.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

const USER_PATH: &str = "/api/admin/users/0a0ffa8a-2ebb-4f45-a6ba-748ba3b90dcc";

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(USER_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(USER_PATH)
                .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_token_is_forbidden() {
    let app = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(USER_PATH)
                .header(header::AUTHORIZATION, common::bearer("not-the-token"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Forbidden");
}

#[tokio::test]
async fn test_non_get_methods_rejected_before_auth() {
    // No Authorization header on purpose: the method gate answers first
    for method in ["POST", "PUT", "PATCH", "DELETE"] {
        let app = common::create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(USER_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method {} should be gated",
            method
        );
        let body = common::body_json(response).await;
        assert_eq!(body["message"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_listing_requires_token_when_enabled() {
    let app = common::create_test_app_with_listing();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/admin/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_gates_methods_when_enabled() {
    let app = common::create_test_app_with_listing();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, common::bearer(common::TEST_ADMIN_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
