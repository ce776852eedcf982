//! Integration tests for logout endpoint

mod common;

use actix_web::{http::header, test};
use serde_json::Value;
use tg_api::app::create_app;

use common::{bearer, test_state, user_claims};

#[actix_web::test]
async fn test_logout_success() {
    let state = test_state();
    let token = state.authenticator.issue(&user_claims()).unwrap();
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header((header::AUTHORIZATION, bearer(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["message"], "Logged out successfully");

    assert!(state.authenticator.revocation_store().is_revoked(&token));
}

#[actix_web::test]
async fn test_logged_out_token_is_rejected() {
    let state = test_state();
    let token = state.authenticator.issue(&user_claims()).unwrap();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header((header::AUTHORIZATION, bearer(&token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((header::AUTHORIZATION, bearer(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid or expired token");

    // A second logout with the same token cannot get past the middleware.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header((header::AUTHORIZATION, bearer(&token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_logout_leaves_other_tokens_alone() {
    let state = test_state();
    let first = state.authenticator.issue(&user_claims()).unwrap();
    let second = state
        .authenticator
        .issue(&user_claims().with("session", "b"))
        .unwrap();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header((header::AUTHORIZATION, bearer(&first)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((header::AUTHORIZATION, bearer(&second)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_logout_requires_authentication() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}
