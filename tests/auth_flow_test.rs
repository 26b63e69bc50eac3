// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Discord login flow and session token endpoints

mod common;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use nego_dashboard::auth::{AuthError, JwtIssuer, Session, DEFAULT_AVATAR_URL, SESSION_LIFETIME};
use nego_dashboard::server::ApiError;
use rocket::local::asynchronous::Client;
use rocket::http::{Header, Status};
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client, get_figment, identity, test_config, token_for, JWT_SECRET};

async fn mock_discord(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("code=abc123"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_secret=discord-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "discord-access",
            "token_type": "Bearer",
            "expires_in": 604800,
            "scope": "identify guilds"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .and(header("authorization", "Bearer discord-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "username": "nego",
            "avatar": null
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn location(response: &rocket::local::asynchronous::LocalResponse<'_>) -> String {
    response
        .headers()
        .get_one("Location")
        .expect("Location header")
        .to_string()
}

fn query_params(location: &str) -> HashMap<String, String> {
    let url = Url::parse("http://localhost").unwrap().join(location).unwrap();
    url.query_pairs().into_owned().collect()
}

#[rocket::async_test]
async fn test_login_redirects_to_discord() {
    let discord = MockServer::start().await;
    let client = client(test_config(&discord.uri(), "http://127.0.0.1:9")).await;

    let response = client.get("/api/_auth/login").dispatch().await;
    assert_eq!(response.status(), Status::Found);

    let target = Url::parse(&location(&response)).unwrap();
    assert_eq!(target.host_str(), Some("discord.com"));
    assert_eq!(target.path(), "/api/oauth2/authorize");

    let params: HashMap<String, String> = target.query_pairs().into_owned().collect();
    assert_eq!(params["client_id"], "1234");
    assert_eq!(params["redirect_uri"], "http://localhost:8080/api/_auth/callback");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["scope"], "identify guilds");
}

#[rocket::async_test]
async fn test_callback_mints_verifiable_token() {
    let discord = MockServer::start().await;
    mock_discord(&discord).await;
    let client = client(test_config(&discord.uri(), "http://127.0.0.1:9")).await;

    let response = client.get("/api/_auth/callback?code=abc123").dispatch().await;
    assert_eq!(response.status(), Status::Found);
    let redirect = location(&response);
    assert!(redirect.starts_with("/?token="), "unexpected redirect {}", redirect);
    let token = query_params(&redirect)["token"].clone();

    let response = client
        .get(format!("/api/_auth/user?token={}", token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Token valid");
    assert_eq!(body["id"], "1");
    assert_eq!(body["username"], "nego");
    assert_eq!(body["discriminator"], "0");
    assert_eq!(body["avatarURL"], DEFAULT_AVATAR_URL);
    assert_eq!(body["globalName"], Value::Null);
}

#[rocket::async_test]
async fn test_callback_without_code_is_bad_request() {
    let discord = MockServer::start().await;
    let client = client(test_config(&discord.uri(), "http://127.0.0.1:9")).await;

    for uri in ["/api/_auth/callback", "/api/_auth/callback?code="] {
        let response = client.get(uri).dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(response.into_string().await.unwrap(), "No code provided.");
    }
    assert!(discord.received_requests().await.unwrap().is_empty());
}

#[rocket::async_test]
async fn test_rejected_code_redirects_with_error() {
    let discord = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid \"code\" in request."
        })))
        .mount(&discord)
        .await;
    let client = client(test_config(&discord.uri(), "http://127.0.0.1:9")).await;

    let response = client.get("/api/_auth/callback?code=stale").dispatch().await;
    assert_eq!(response.status(), Status::Found);
    assert_eq!(location(&response), "/?error=auth_failed");
}

#[rocket::async_test]
async fn test_profile_failure_redirects_with_error() {
    let discord = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "discord-access"})),
        )
        .mount(&discord)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "401: Unauthorized"})))
        .mount(&discord)
        .await;
    let client = client(test_config(&discord.uri(), "http://127.0.0.1:9")).await;

    let response = client.get("/api/_auth/callback?code=abc123").dispatch().await;
    assert_eq!(location(&response), "/?error=auth_failed");
}

#[rocket::async_test]
async fn test_user_without_token_is_bad_request() {
    let client = client(test_config("http://127.0.0.1:9", "http://127.0.0.1:9")).await;

    let response = client.get("/api/_auth/user").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({"status": 400, "message": "No token provided"}));
}

#[rocket::async_test]
async fn test_user_with_invalid_token_is_unauthorized() {
    let config = test_config("http://127.0.0.1:9", "http://127.0.0.1:9");
    let expired = JwtIssuer::new(JWT_SECRET.as_bytes(), SESSION_LIFETIME)
        .with_issuer(config.session.issuer.clone())
        .issue_at(&identity("1"), Utc::now() - chrono::Duration::hours(25))
        .unwrap()
        .into_string();
    let foreign = JwtIssuer::new(b"some-other-secret-entirely", SESSION_LIFETIME)
        .with_issuer(config.session.issuer.clone())
        .issue(&identity("1"))
        .unwrap()
        .into_string();
    let client = client(config).await;

    for token in ["garbage", expired.as_str(), foreign.as_str()] {
        let response = client
            .get(format!("/api/_auth/user?token={}", token))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body, json!({"status": 401, "message": "Invalid or expired token"}));
    }
}

#[rocket::async_test]
async fn test_user_accepts_bearer_header() {
    let config = test_config("http://127.0.0.1:9", "http://127.0.0.1:9");
    let token = token_for(&config, "42");
    let client = client(config).await;

    let response = client
        .get("/api/_auth/user")
        .header(Header::new("Authorization", format!("Bearer {}", token)))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["id"], "42");
    assert_eq!(body["globalName"], "Nego");
}

#[rocket::async_test]
async fn test_user_rejects_other_methods() {
    let client = client(test_config("http://127.0.0.1:9", "http://127.0.0.1:9")).await;

    let responses = [
        client.post("/api/_auth/user").dispatch().await,
        client.put("/api/_auth/user").dispatch().await,
        client.delete("/api/_auth/user").dispatch().await,
    ];
    for response in responses {
        assert_eq!(response.status(), Status::MethodNotAllowed);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body, json!({"status": 405, "message": "Method Not Allowed"}));
    }
}

#[rocket::async_test]
async fn test_logout() {
    let client = client(test_config("http://127.0.0.1:9", "http://127.0.0.1:9")).await;

    let response = client.post("/api/_auth/logout").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({"message": "Logged out successfully"}));

    let response = client.get("/api/_auth/logout").dispatch().await;
    assert_eq!(response.status(), Status::MethodNotAllowed);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({"error": "Method not allowed"}));
}

#[rocket::async_test]
async fn test_preflight_carries_cors_headers() {
    let client = client(test_config("http://127.0.0.1:9", "http://127.0.0.1:9")).await;

    let response = client.options("/api/me/balance").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    assert!(response
        .headers()
        .get_one("Access-Control-Allow-Headers")
        .unwrap()
        .contains("Authorization"));
}

#[rocket::async_test]
async fn test_slow_provider_is_cut_off_by_timeout() {
    let discord = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "discord-access"}))
                .set_delay(Duration::from_secs(4)),
        )
        .expect(1)
        .mount(&discord)
        .await;
    let mut config = test_config(&discord.uri(), "http://127.0.0.1:9");
    config.discord.timeout_secs = 1;
    let client = client(config).await;

    let started = Instant::now();
    let response = client.get("/api/_auth/callback?code=abc123").dispatch().await;
    let elapsed = started.elapsed();

    assert_eq!(response.status(), Status::Found);
    assert_eq!(location(&response), "/?error=auth_failed");
    assert!(elapsed < Duration::from_secs(3), "callback took {:?}", elapsed);
}

#[rocket::async_test]
async fn test_empty_bearer_falls_back_to_query() {
    let config = test_config("http://127.0.0.1:9", "http://127.0.0.1:9");
    let token = token_for(&config, "42");
    let client = client(config).await;

    let response = client
        .get(format!("/api/_auth/user?token={}", token))
        .header(Header::new("Authorization", "Bearer "))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["id"], "42");
}

#[rocket::get("/who")]
fn who(session: Result<Session, AuthError>) -> Result<String, ApiError> {
    Ok(session?.identity.id)
}

#[rocket::async_test]
async fn test_unmanaged_session_service_is_server_error() {
    let rocket = rocket::custom(get_figment()).mount("/", rocket::routes![who]);
    let client = Client::tracked(rocket).await.expect("valid rocket instance");

    let response = client.get("/who?token=abc").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({"status": 500, "message": "Internal Server Error"}));
}
