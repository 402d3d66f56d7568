// Integration tests for the portal client token lifecycle
//
// These tests exercise the login, token caching, and 401 refresh-replay
// behavior against a mock portal.

use chrono::{Duration, Utc};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use tvu_mcp::api::TvuClient;
use tvu_mcp::config::Config;
use tvu_mcp::error::ApiError;

const LOGIN_PATH: &str = "/api/auth/login";
const SCHEDULE_PATH: &str = "/api/sch/w-locdstkbtuanusertheohocky";
const GRADES_PATH: &str = "/public/api/srm/w-locdsdiemsinhvien";
const TUITION_PATH: &str = "/public/api/rms/w-locdstonghophocphisv";

// ==================================================================================================
// Test Helpers
// ==================================================================================================

fn test_config(base_url: &str) -> Config {
    Config {
        student_id: "110121001".to_string(),
        password: "secret".to_string(),
        base_url: base_url.to_string(),
        timeout_secs: 5,
        token_lifetime_secs: 7200,
        current_semester: "20242".to_string(),
        log_level: "info".to_string(),
    }
}

async fn test_client(server: &ServerGuard) -> TvuClient {
    TvuClient::new(&test_config(&server.url())).unwrap()
}

fn login_body(token: &str) -> String {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": 7200
    })
    .to_string()
}

// ==================================================================================================
// Login & Token Caching
// ==================================================================================================

#[tokio::test]
async fn test_first_call_logs_in_exactly_once() {
    let mut server = Server::new_async().await;

    let login = server
        .mock("POST", LOGIN_PATH)
        .with_status(200)
        .with_body(login_body("T1"))
        .expect(1)
        .create_async()
        .await;

    let tuition = server
        .mock("POST", TUITION_PATH)
        .match_header("authorization", "Bearer T1")
        .with_status(200)
        .with_body(r#"{"data":{}}"#)
        .expect(2)
        .create_async()
        .await;

    let client = test_client(&server).await;

    // First call performs the login; the second reuses the cached token
    client.get_tuition().await.unwrap();
    client.get_tuition().await.unwrap();

    login.assert_async().await;
    tuition.assert_async().await;

    let session = client.session_for_testing().await.unwrap();
    assert_eq!(session.token, "T1");
    assert!(session.expires_at > Utc::now());
}

#[tokio::test]
async fn test_valid_token_skips_login() {
    let mut server = Server::new_async().await;

    let login = server
        .mock("POST", LOGIN_PATH)
        .expect(0)
        .create_async()
        .await;

    let tuition = server
        .mock("POST", TUITION_PATH)
        .match_header("authorization", "Bearer CACHED")
        .with_status(200)
        .with_body(r#"{"data":{}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    client
        .set_session_for_testing("CACHED", Utc::now() + Duration::minutes(10))
        .await;

    client.get_tuition().await.unwrap();

    login.assert_async().await;
    tuition.assert_async().await;
}

#[tokio::test]
async fn test_login_sends_form_encoded_credentials() {
    let mut server = Server::new_async().await;

    let login = server
        .mock("POST", LOGIN_PATH)
        .match_header(
            "content-type",
            Matcher::Regex("application/x-www-form-urlencoded".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".to_string(), "110121001".to_string()),
            Matcher::UrlEncoded("password".to_string(), "secret".to_string()),
            Matcher::UrlEncoded("grant_type".to_string(), "password".to_string()),
        ]))
        .with_status(200)
        .with_body(login_body("T1"))
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    let token = client.login().await.unwrap();
    assert_eq!(token, "T1");

    login.assert_async().await;

    let session = client.session_for_testing().await.unwrap();
    assert!(session.expires_at > Utc::now());
}

#[tokio::test]
async fn test_login_without_token_fails() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", LOGIN_PATH)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = test_client(&server).await;
    let err = client.login().await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(_)));
}

// ==================================================================================================
// 401 Refresh & Replay
// ==================================================================================================

#[tokio::test]
async fn test_401_refreshes_and_replays_with_new_token() {
    let mut server = Server::new_async().await;

    // The stale token is rejected once
    let rejected = server
        .mock("POST", TUITION_PATH)
        .match_header("authorization", "Bearer T1")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    // Re-authentication hands out T2
    let login = server
        .mock("POST", LOGIN_PATH)
        .with_status(200)
        .with_body(login_body("T2"))
        .expect(1)
        .create_async()
        .await;

    // The replay carries the refreshed token
    let replayed = server
        .mock("POST", TUITION_PATH)
        .match_header("authorization", "Bearer T2")
        .with_status(200)
        .with_body(r#"{"data":{"ok":true}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    client
        .set_session_for_testing("T1", Utc::now() + Duration::minutes(10))
        .await;

    let value = client.get_tuition().await.unwrap();
    assert_eq!(value["data"]["ok"], true);

    rejected.assert_async().await;
    login.assert_async().await;
    replayed.assert_async().await;
}

#[tokio::test]
async fn test_second_401_surfaces_without_third_attempt() {
    let mut server = Server::new_async().await;

    // Both the original request and the replay are rejected
    let tuition = server
        .mock("POST", TUITION_PATH)
        .with_status(401)
        .with_body("token expired")
        .expect(2)
        .create_async()
        .await;

    let login = server
        .mock("POST", LOGIN_PATH)
        .with_status(200)
        .with_body(login_body("T2"))
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    client
        .set_session_for_testing("T1", Utc::now() + Duration::minutes(10))
        .await;

    let err = client.get_tuition().await.unwrap_err();
    match err {
        ApiError::Status { status, .. } => assert_eq!(status, 401),
        other => panic!("expected Status error, got {:?}", other),
    }

    // expect(2) on the endpoint and expect(1) on login prove there was no
    // second refresh and no third request
    tuition.assert_async().await;
    login.assert_async().await;
}

#[tokio::test]
async fn test_non_401_error_is_not_retried() {
    let mut server = Server::new_async().await;

    let tuition = server
        .mock("POST", TUITION_PATH)
        .with_status(500)
        .with_body("Internal Server Error")
        .expect(1)
        .create_async()
        .await;

    let login = server
        .mock("POST", LOGIN_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(&server).await;
    client
        .set_session_for_testing("T1", Utc::now() + Duration::minutes(10))
        .await;

    let err = client.get_tuition().await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected Status error, got {:?}", other),
    }

    tuition.assert_async().await;
    login.assert_async().await;
}

// ==================================================================================================
// Concurrency
// ==================================================================================================

#[tokio::test]
async fn test_concurrent_calls_with_expired_token_both_complete() {
    let mut server = Server::new_async().await;

    // Racing calls may each trigger a login; both are answered
    server
        .mock("POST", LOGIN_PATH)
        .with_status(200)
        .with_body(login_body("T9"))
        .expect_at_least(1)
        .create_async()
        .await;

    let tuition = server
        .mock("POST", TUITION_PATH)
        .match_header("authorization", "Bearer T9")
        .with_status(200)
        .with_body(r#"{"data":{}}"#)
        .expect(2)
        .create_async()
        .await;

    let client = test_client(&server).await;
    client
        .set_session_for_testing("STALE", Utc::now() - Duration::minutes(1))
        .await;

    let (first, second) = tokio::join!(client.get_tuition(), client.get_tuition());
    first.unwrap();
    second.unwrap();

    tuition.assert_async().await;
}

// ==================================================================================================
// Request Shapes
// ==================================================================================================

#[tokio::test]
async fn test_schedule_request_form_fields() {
    let mut server = Server::new_async().await;

    let schedule = server
        .mock("POST", SCHEDULE_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("filter[hoc_ky]".to_string(), "20251".to_string()),
            Matcher::UrlEncoded("filter[ten_hoc_ky]".to_string(), String::new()),
            Matcher::UrlEncoded("additional[paging][limit]".to_string(), "100".to_string()),
            Matcher::UrlEncoded("additional[paging][page]".to_string(), "1".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"data":{"ds_tuan_tkb":[]}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    client
        .set_session_for_testing("T1", Utc::now() + Duration::minutes(10))
        .await;

    client.get_schedule(Some("20251")).await.unwrap();
    schedule.assert_async().await;
}

#[tokio::test]
async fn test_grades_flag_travels_in_custom_header() {
    let mut server = Server::new_async().await;

    let grades = server
        .mock("POST", GRADES_PATH)
        .match_header("hien_thi_mon_theo_hkdk", "true")
        .match_header("authorization", "Bearer T1")
        .with_status(200)
        .with_body(r#"{"data":{"ds_diem_hocky":[]}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    client
        .set_session_for_testing("T1", Utc::now() + Duration::minutes(10))
        .await;

    client.get_grades(Some(true)).await.unwrap();
    grades.assert_async().await;
}
