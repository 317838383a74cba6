/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Login gate behaviour over HTTP.


use axum::http::StatusCode;
use canvas_auth::decision::epoch;
use canvas_auth::session::TokenField;
use canvas_auth::signed_request::{sign, sign_bytes};
use canvas_auth_types::{APIError, APIResponse, SignedRequestPayload};
use test_helpers::*;
use tower::ServiceExt;

fn signed(payload: &SignedRequestPayload) -> String {
    sign(payload, TEST_APP_SECRET.as_bytes()).expect("sign")
}

fn query_uri(signed_request: &str) -> String {
    format!("{CANVAS_PAGE}?signed_request={signed_request}")
}

#[tokio::test]
async fn first_visit_without_signed_request_redirects() {
    let session = empty_session();
    let app = build_app(test_config(), session.clone());

    let resp = app.oneshot(get(CANVAS_PAGE)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some(expected_redirect()));
    assert!(session_value(&session, TokenField::UserId).is_none());
}

#[tokio::test]
async fn signed_request_with_credentials_is_stored_and_forwarded() {
    let session = empty_session();
    let app = build_app(test_config(), session.clone());
    let payload = SignedRequestPayload::authorized("42", "TKN", 2_000_000_000);

    let resp = app.oneshot(get(&query_uri(&signed(&payload)))).await.unwrap();

    let (status, body) = body_string(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "canvas page:");
    assert_eq!(session_value(&session, TokenField::UserId).as_deref(), Some("42"));
    assert_eq!(
        session_value(&session, TokenField::AccessToken).as_deref(),
        Some("TKN")
    );
    assert_eq!(
        session_value(&session, TokenField::Expires).as_deref(),
        Some("2000000000")
    );
}

#[tokio::test]
async fn form_post_signed_request_is_read_and_body_restored() {
    let session = empty_session();
    let app = build_app(test_config(), session.clone());
    let payload = SignedRequestPayload::authorized("42", "TKN", 2_000_000_000);
    let body = format!("signed_request={}&fb_locale=en_US", signed(&payload));

    let resp = app
        .oneshot(form_post(CANVAS_PAGE, body.clone()))
        .await
        .unwrap();

    let (status, text) = body_string(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, format!("canvas page:{body}"));
    assert_eq!(session_value(&session, TokenField::UserId).as_deref(), Some("42"));
}

#[tokio::test]
async fn large_form_post_with_valid_session_is_forwarded() {
    let session = session_with_token("7", epoch() + 3600);
    let app = build_app(test_config(), session);
    let body = format!("message={}", "x".repeat(70 * 1024));

    let resp = app
        .oneshot(form_post(CANVAS_PAGE, body.clone()))
        .await
        .unwrap();

    let (status, text) = body_string(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, format!("canvas page:{body}"));
}

#[tokio::test]
async fn large_form_post_without_session_redirects() {
    let app = build_app(test_config(), empty_session());
    let body = format!("message={}", "x".repeat(70 * 1024));

    let resp = app.oneshot(form_post(CANVAS_PAGE, body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some(expected_redirect()));
}

#[tokio::test]
async fn unauthorized_payload_with_valid_session_is_forwarded() {
    let session = session_with_token("7", epoch() + 3600);
    let app = build_app(test_config(), session.clone());

    let uri = query_uri(&signed(&SignedRequestPayload::unauthorized()));
    let resp = app.oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(session_value(&session, TokenField::UserId).as_deref(), Some("7"));
}

#[tokio::test]
async fn unauthorized_payload_with_empty_session_redirects() {
    let session = empty_session();
    let app = build_app(test_config(), session.clone());

    let uri = query_uri(&signed(&SignedRequestPayload::unauthorized()));
    let resp = app.oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some(expected_redirect()));
}

#[tokio::test]
async fn token_inside_expiry_margin_redirects() {
    let session = session_with_token("7", epoch() + 10);
    let app = build_app(test_config(), session);

    let resp = app.oneshot(get(CANVAS_PAGE)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn tampered_signed_request_is_a_server_error() {
    let session = session_with_token("7", epoch() + 3600);
    let app = build_app(test_config(), session.clone());

    let forged = sign(
        &SignedRequestPayload::authorized("666", "EVIL", 2_000_000_000),
        b"not-the-app-secret",
    )
    .expect("sign");
    let resp = app.oneshot(get(&query_uri(&forged))).await.unwrap();

    let (status, body): (_, APIResponse<APIError>) = body_json(resp).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.success);
    assert_eq!(body.result.code, "SIGNATURE_MISMATCH");
    assert_eq!(session_value(&session, TokenField::UserId).as_deref(), Some("7"));
    assert_eq!(
        session_value(&session, TokenField::AccessToken).as_deref(),
        Some("stored-token")
    );
}

#[tokio::test]
async fn incomplete_credentials_are_a_server_error() {
    let session = empty_session();
    let app = build_app(test_config(), session.clone());

    let raw = sign_bytes(
        br#"{"algorithm":"HMAC-SHA256","user_id":"42","oauth_token":"TKN"}"#,
        TEST_APP_SECRET.as_bytes(),
    )
    .expect("sign");
    let resp = app.oneshot(get(&query_uri(&raw))).await.unwrap();

    let (status, body): (_, APIResponse<APIError>) = body_json(resp).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.result.code, "INCOMPLETE_CREDENTIALS");
    assert!(session_value(&session, TokenField::UserId).is_none());
}

#[tokio::test]
async fn malformed_signed_request_is_a_server_error() {
    let app = build_app(test_config(), empty_session());

    let resp = app.oneshot(get(&query_uri("no-separator"))).await.unwrap();

    let (status, body): (_, APIResponse<APIError>) = body_json(resp).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.result.code, "MALFORMED_SIGNED_REQUEST");
}

#[tokio::test]
async fn empty_signed_request_param_counts_as_absent() {
    let session = session_with_token("7", epoch() + 3600);
    let app = build_app(test_config(), session);

    let resp = app.oneshot(get(&query_uri(""))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_session_is_a_server_error() {
    let app = build_app_without_session(test_config());

    let resp = app.oneshot(get(CANVAS_PAGE)).await.unwrap();

    let (status, body): (_, APIResponse<APIError>) = body_json(resp).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.result.code, "SESSION_UNAVAILABLE");
}

#[tokio::test]
async fn disabled_enforcement_skips_all_checks() {
    let mut config = test_config();
    config.enforce_login = false;
    let app = build_app_without_session(config);

    let resp = app.oneshot(get(&query_uri("garbage"))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn dev_env_redirect_requests_user_agent_flow() {
    let mut config = test_config();
    config.dev_env = true;
    config.permissions = vec!["email".to_string(), "publish_stream".to_string()];
    let app = build_app(config, empty_session());

    let resp = app.oneshot(get(CANVAS_PAGE)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp).as_deref(),
        Some(
            "https://graph.facebook.com/oauth/authorize?client_id=1234567890\
             &redirect_uri=https://app.example.com/auth/redirect\
             &type=user_agent&scope=email,publish_stream"
        )
    );
}
