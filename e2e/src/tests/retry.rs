use bpt_store_mock::bpt_store::errors::{Error, RequestError};
use bpt_store_mock::bpt_store::{Connection, Method, RequestOptions, StatusCode};
use bpt_store_mock::httpmock::Method::{GET, POST};
use bpt_store_mock::{DEFAULT_TOKEN, DEFAULT_USER_UUID, MockBptStore};
use serde_json::json;
use std::time::Duration;

use super::{REFRESHED_TOKEN, authenticated, refresh_login};

const FILES: &str = "users/{userUuid}/files";

fn files_endpoint() -> String {
    format!("users/{DEFAULT_USER_UUID}/files")
}

fn with_max_attempts(store: &MockBptStore, max_attempts: u32) -> Connection {
    let config = store
        .config_builder()
        .max_attempts(max_attempts)
        .build()
        .unwrap();
    Connection::new(config).unwrap()
}

#[tokio::test]
async fn unauthorized_then_ok_reauthenticates_once() {
    let store = MockBptStore::start().await;
    let mut conn = authenticated(&store).await;
    let login = refresh_login(&store).await;

    let stale = store
        .mock_unauthorized(GET, &files_endpoint(), DEFAULT_TOKEN)
        .await;
    let path = store.path(&files_endpoint());
    let fresh = store
        .server()
        .mock_async(|when, then| {
            when.method(GET)
                .path(path)
                .header("authorization", REFRESHED_TOKEN);
            then.status(200).json_body(json!([]));
        })
        .await;

    let response = conn
        .request(Method::GET, FILES, RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    stale.assert_hits_async(1).await;
    fresh.assert_hits_async(1).await;
    login.assert_hits_async(1).await;
    assert_eq!(conn.session().unwrap().auth_token(), REFRESHED_TOKEN);
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let store = MockBptStore::start().await;
    let login = store.mock_default_login().await;
    let stale = store
        .mock_unauthorized(GET, &files_endpoint(), DEFAULT_TOKEN)
        .await;
    let mut conn = with_max_attempts(&store, 2);

    let err = conn
        .request(Method::GET, FILES, RequestOptions::new())
        .await
        .unwrap_err();

    match &err {
        Error::Request(RequestError::Server { status, message }) => {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "token expired");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_unauthorized());

    // One initial attempt plus one retry per allowed attempt.
    stale.assert_hits_async(3).await;
    // Lazy login plus one forced login per retry.
    login.assert_hits_async(3).await;
}

#[tokio::test]
async fn zero_attempts_never_retries() {
    let store = MockBptStore::start().await;
    let login = store.mock_default_login().await;
    let stale = store
        .mock_unauthorized(GET, &files_endpoint(), DEFAULT_TOKEN)
        .await;
    let mut conn = with_max_attempts(&store, 0);

    let err = conn
        .request(Method::GET, FILES, RequestOptions::new())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    stale.assert_hits_async(1).await;
    login.assert_hits_async(1).await;
}

#[tokio::test]
async fn retry_budget_is_per_call() {
    let store = MockBptStore::start().await;
    let _login = store.mock_default_login().await;
    let stale = store
        .mock_unauthorized(GET, &files_endpoint(), DEFAULT_TOKEN)
        .await;
    let mut conn = with_max_attempts(&store, 1);

    for _ in 0..2 {
        let err = conn
            .request(Method::GET, FILES, RequestOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    // Each call spends its own budget: two attempts per call.
    stale.assert_hits_async(4).await;
}

#[tokio::test]
async fn other_errors_are_not_retried() {
    let store = MockBptStore::start().await;
    let login = store.mock_default_login().await;
    let path = store.path(&files_endpoint());
    let broken = store
        .server()
        .mock_async(|when, then| {
            when.method(GET).path(path);
            then.status(500).body("boom");
        })
        .await;
    let mut conn = store.connection();

    let err = conn
        .request(Method::GET, FILES, RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

    broken.assert_hits_async(1).await;
    login.assert_hits_async(1).await;
}

#[tokio::test]
async fn login_failure_during_retry_propagates() {
    let store = MockBptStore::start().await;
    let mut conn = authenticated(&store).await;
    let rejected = store.mock_login_rejected(403).await;
    let stale = store
        .mock_unauthorized(GET, &files_endpoint(), DEFAULT_TOKEN)
        .await;

    let err = conn
        .request(Method::GET, FILES, RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Authentication(_)));

    stale.assert_hits_async(1).await;
    rejected.assert_hits_async(1).await;
}

#[tokio::test]
async fn options_reach_the_server() {
    let store = MockBptStore::start().await;
    let _login = store.mock_default_login().await;
    let path = store.path("groups");
    let groups = store
        .server()
        .mock_async(|when, then| {
            when.method(POST)
                .path(path)
                .query_param("notify", "false")
                .header("authorization", DEFAULT_TOKEN)
                .header("x-request-id", "abc")
                .json_body(json!({ "name": "invoices" }));
            then.status(201).json_body(json!({ "id": 7 }));
        })
        .await;
    let mut conn = store.connection();

    let options = RequestOptions::new()
        .header(
            "x-request-id".parse().unwrap(),
            "abc".parse().unwrap(),
        )
        .query("notify", "false")
        .json(json!({ "name": "invoices" }));

    let response = conn.request(Method::POST, "groups", options).await.unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], 7);
    groups.assert_hits_async(1).await;
}

#[tokio::test]
async fn absolute_alias_uri_is_used_as_is() {
    let store = MockBptStore::start().await;
    let _login = store.mock_default_login().await;
    let public = store.mock_public_file("abc123", b"hi").await;
    let mut conn = store.connection();

    let response = conn
        .request(Method::GET, "{baseUrl}/files/abc123", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "hi");
    public.assert_hits_async(1).await;
}

#[tokio::test]
async fn transport_errors_are_not_retried() {
    let store = MockBptStore::start().await;
    let login = store.mock_default_login().await;
    let mut conn = with_max_attempts(&store, 3);

    // Nothing listens on port 1.
    let err = conn
        .request(Method::GET, "http://127.0.0.1:1/files", RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request(RequestError::Transport(_))));
    assert_eq!(err.status(), None);

    login.assert_hits_async(1).await;
    assert_eq!(conn.session().unwrap().auth_token(), DEFAULT_TOKEN);
}

#[tokio::test]
async fn unreachable_login_is_a_transport_error() {
    let config = bpt_store_mock::bpt_store::ClientConfig::builder()
        .login("alice")
        .password("secret")
        .url("http://127.0.0.1:1/api/v1/")
        .max_attempts(3)
        .build()
        .unwrap();
    let mut conn = Connection::new(config).unwrap();

    let err = conn
        .request(Method::GET, FILES, RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request(RequestError::Transport(_))));
    assert!(conn.session().is_none());
}

#[tokio::test]
async fn user_agent_carries_the_extra_segment() {
    let store = MockBptStore::start().await;
    let agent = "bpt-store@0.1.0 e2e/1";

    let login_path = store.path("login");
    let login = store
        .server()
        .mock_async(|when, then| {
            when.method(POST).path(login_path).header("user-agent", agent);
            then.status(200)
                .json_body(json!({ "authToken": DEFAULT_TOKEN, "userUuid": DEFAULT_USER_UUID }));
        })
        .await;
    let groups_path = store.path("groups");
    let groups = store
        .server()
        .mock_async(|when, then| {
            when.method(GET).path(groups_path).header("user-agent", agent);
            then.status(200).json_body(json!([]));
        })
        .await;

    let config = store.config_builder().user_agent_extra("e2e/1").build().unwrap();
    let mut conn = Connection::new(config).unwrap();
    conn.request(Method::GET, "groups", RequestOptions::new())
        .await
        .unwrap();

    login.assert_hits_async(1).await;
    groups.assert_hits_async(1).await;
}

#[tokio::test]
async fn request_timeout_bounds_the_login() {
    let store = MockBptStore::start().await;
    let path = store.path("login");
    let _slow_login = store
        .server()
        .mock_async(|when, then| {
            when.method(POST).path(path);
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({ "authToken": DEFAULT_TOKEN, "userUuid": DEFAULT_USER_UUID }));
        })
        .await;

    let config = store
        .config_builder()
        .request_timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let mut conn = Connection::new(config).unwrap();

    let err = conn.ensure_auth(false).await.unwrap_err();
    match err {
        Error::Request(RequestError::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}
