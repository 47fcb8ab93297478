//! Handler-level tests for the `/auth` endpoint group.

mod common;

use axum::body::to_bytes;
use axum::extract::{Json, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use lanyard_auth::config::AuthConfig;
use lanyard_auth::http::{
    ApiState, logout_handler, refresh_token_handler, signin_handler, signup_handler,
};
use lanyard_auth::middleware::RefreshGuard;

use common::{TestEnv, create_dto, login_dto, test_env};

fn api_state(env: &TestEnv) -> ApiState {
    let config = AuthConfig::default();
    ApiState::new(
        env.auth.clone(),
        env.jwt.clone(),
        config.cookie,
        config.token,
    )
}

#[tokio::test]
async fn test_signup_returns_created_without_hash() {
    let env = test_env();
    let state = api_state(&env);

    let (status, Json(user)) = signup_handler(State(state), Json(create_dto("a@example.com")))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user.email, "a@example.com");

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_conflict_maps_to_409() {
    let env = test_env();
    let state = api_state(&env);

    signup_handler(State(state.clone()), Json(create_dto("a@example.com")))
        .await
        .unwrap();
    let err = signup_handler(State(state), Json(create_dto("a@example.com")))
        .await
        .unwrap_err();

    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signin_sets_header_and_refresh_cookie() {
    let env = test_env();
    let state = api_state(&env);

    env.auth.sign_up(create_dto("a@example.com")).await.unwrap();

    let response = signin_handler(
        State(state),
        CookieJar::default(),
        Json(login_dto("a@example.com")),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let access = response.headers().get("auth_token").unwrap().to_str().unwrap();
    assert!(env.jwt.decode(access).is_ok());

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("refresh_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Secure"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["email"], "a@example.com");
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signin_failures_collapse_to_one_response() {
    let env = test_env();
    let state = api_state(&env);

    env.auth.sign_up(create_dto("a@example.com")).await.unwrap();

    let unknown = signin_handler(
        State(state.clone()),
        CookieJar::default(),
        Json(login_dto("nobody@example.com")),
    )
    .await
    .unwrap_err();

    let wrong = signin_handler(
        State(state),
        CookieJar::default(),
        Json(lanyard_auth::types::LoginUser {
            email: "a@example.com".to_string(),
            password: "wrong".to_string(),
        }),
    )
    .await
    .unwrap_err();

    // Unknown email and bad password are indistinguishable on the wire.
    assert_eq!(unknown.code(), wrong.code());
    assert_eq!(unknown.into_response().status(), StatusCode::FORBIDDEN);
    assert_eq!(wrong.into_response().status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_always_succeeds_and_clears_credentials() {
    let env = test_env();
    let state = api_state(&env);

    // No cookie at all.
    let response = logout_handler(State(state.clone()), CookieJar::default()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("refresh_token="));
    assert!(set_cookie.contains("Max-Age=0"));

    let cleared_header = response.headers().get("auth_token").unwrap();
    assert!(cleared_header.is_empty());

    // A live session is torn down.
    let user = env.auth.sign_up(create_dto("a@example.com")).await.unwrap();
    let outcome = env.auth.sign_in(login_dto("a@example.com")).await.unwrap();

    let jar =
        CookieJar::default().add(Cookie::new("refresh_token", outcome.refresh_token.clone()));
    let response = logout_handler(State(state), jar).await;
    assert_eq!(response.status(), StatusCode::OK);

    let sessions = env
        .storage
        .sessions()
        .find_sessions_by_user(user.id)
        .await
        .unwrap();
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn test_refresh_exchanges_a_bound_token() {
    let env = test_env();
    let state = api_state(&env);

    env.auth.sign_up(create_dto("a@example.com")).await.unwrap();
    let outcome = env.auth.sign_in(login_dto("a@example.com")).await.unwrap();

    let guard = RefreshGuard {
        claims: env.jwt.decode(&outcome.refresh_token).unwrap(),
        token: outcome.refresh_token.clone(),
    };

    let response = refresh_token_handler(State(state), CookieJar::default(), guard)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let access = response.headers().get("auth_token").unwrap().to_str().unwrap();
    assert!(env.jwt.decode(access).is_ok());
}

#[tokio::test]
async fn test_refresh_with_unbound_token_is_403() {
    let env = test_env();
    let state = api_state(&env);

    env.auth.sign_up(create_dto("a@example.com")).await.unwrap();
    let outcome = env.auth.sign_in(login_dto("a@example.com")).await.unwrap();

    // Tear the session down; the token still decodes but no longer binds.
    assert!(env.auth.logout(Some(&outcome.refresh_token)).await);

    let guard = RefreshGuard {
        claims: env.jwt.decode(&outcome.refresh_token).unwrap(),
        token: outcome.refresh_token.clone(),
    };

    let err = refresh_token_handler(State(state), CookieJar::default(), guard)
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
}
