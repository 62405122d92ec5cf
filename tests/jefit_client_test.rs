// ABOUTME: Integration tests for the JEFit HTTP client against a mock server
// ABOUTME: Covers login payloads, cookie auth, calendar filtering, sessions, and re-login on 401
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use jefit_mcp_server::errors::ErrorCode;
use jefit_mcp_server::jefit::{local_midnight_timestamp, JefitClient};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    mount_auth, test_config, SAMPLE_FLIGHT_STREAM, TEST_ACCESS_TOKEN, TEST_PASSWORD_MD5,
    TEST_USERNAME,
};

fn client_for(server: &MockServer, dir: &TempDir) -> JefitClient {
    let config = test_config(&server.uri(), &dir.path().join("exercises_db.json"));
    JefitClient::from_config(&config)
}

fn access_cookie() -> String {
    format!("jefitAccessToken={TEST_ACCESS_TOKEN}")
}

#[tokio::test]
async fn test_login_sends_hashed_password() {
    common::init_test_logging();
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .and(body_json(json!({
            "platform": "web",
            "username": TEST_USERNAME,
            "passwordMd5": TEST_PASSWORD_MD5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server, &dir).login().await.unwrap();

    assert_eq!(token, "tok");
}

#[tokio::test]
async fn test_login_rejection_is_auth_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = client_for(&server, &dir).session().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
    assert!(err.message.contains("bad credentials"));
}

#[tokio::test]
async fn test_session_is_cached() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": TEST_ACCESS_TOKEN})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/user"))
        .and(header("cookie", access_cookie().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 42}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let first = client.session().await.unwrap();
    let second = client.session().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.user_id, "42");
    assert_eq!(first.access_token, TEST_ACCESS_TOKEN);
}

#[tokio::test]
async fn test_user_without_data_is_an_upstream_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/v2/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client_for(&server, &dir).user_id("tok").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_workout_dates_keeps_logged_days() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/42/sessions/calendar"))
        .and(query_param("timezone_offset", "-04:00"))
        .and(header("cookie", access_cookie().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"date": "2025-01-02", "has_logs": true},
                {"date": "2025-01-03", "has_logs": false},
                {"date": "2025-01-04"},
                {"date": "2025-01-05", "has_logs": true}
            ]
        })))
        .mount(&server)
        .await;

    let dates = client_for(&server, &dir).workout_dates().await.unwrap();

    assert_eq!(dates, ["2025-01-02", "2025-01-05"]);
}

#[tokio::test]
async fn test_sessions_for_date_queries_local_midnight() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    let start = local_midnight_timestamp(date).unwrap().to_string();
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/42/sessions"))
        .and(query_param("startDate", start.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"date": 1_735_826_400, "total_time": 60, "logs": []}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sessions = client_for(&server, &dir).sessions_for_date(date).await.unwrap();

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].duration_parts(), (1, 0));
}

#[tokio::test]
async fn test_sessions_without_data_are_empty() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/42/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
    let sessions = client_for(&server, &dir).sessions_for_date(date).await.unwrap();

    assert!(sessions.is_empty());
}

#[tokio::test]
async fn test_flight_stream_request_sets_rsc_header() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/my-jefit/progress/history"))
        .and(header("rsc", "1"))
        .and(header("cookie", access_cookie().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_FLIGHT_STREAM))
        .expect(1)
        .mount(&server)
        .await;

    let stream = client_for(&server, &dir).fetch_flight_stream().await.unwrap();

    assert_eq!(stream, SAMPLE_FLIGHT_STREAM);
}

#[tokio::test]
async fn test_rejected_token_triggers_one_relogin() {
    common::init_test_logging();
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": TEST_ACCESS_TOKEN})),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 42}})))
        .mount(&server)
        .await;
    // First calendar request is rejected, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/api/v2/users/42/sessions/calendar"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/42/sessions/calendar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"date": "2025-01-02", "has_logs": true}]
        })))
        .mount(&server)
        .await;

    let dates = client_for(&server, &dir).workout_dates().await.unwrap();

    assert_eq!(dates, ["2025-01-02"]);
}

#[tokio::test]
async fn test_persistent_rejection_is_auth_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/42/sessions/calendar"))
        .respond_with(ResponseTemplate::new(403))
        .expect(2)
        .mount(&server)
        .await;

    let err = client_for(&server, &dir).workout_dates().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_server_error_is_upstream_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/42/sessions/calendar"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server, &dir).workout_dates().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("boom"));
}
