//! End-to-end request pipeline tests against mock backends.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use admin_console_client::api;
use admin_console_client::models::auth::LoginRequest;
use admin_console_client::models::SearchParams;
use admin_console_client::service::RequestDescriptor;
use admin_console_client::session::credentials::CredentialStore;
use admin_console_client::session::surface::SESSION_EXPIRED_MESSAGE;
use admin_console_client::ClientError;

mod common;

use common::{flat, harness, raw, start_programmable_backend, token, RecordedRequest};

fn user_page() -> Value {
    json!({
        "list": [{"id": 1, "admin_user_username": "alice", "admin_user_status": 1}],
        "page": {"current": 1, "request_page_size": 10, "total": 1}
    })
}

async fn unused_backend() -> std::net::SocketAddr {
    start_programmable_backend(|_| async { (404, String::new()) }).await
}

/// Primary backend: the list endpoint accepts only `fresh`; refresh issues
/// `fresh` after `refresh_delay`.
async fn expiring_backend(
    list_calls: Arc<AtomicU32>,
    refresh_calls: Arc<AtomicU32>,
    refresh_delay: Duration,
) -> std::net::SocketAddr {
    start_programmable_backend(move |req: RecordedRequest| {
        let list_calls = list_calls.clone();
        let refresh_calls = refresh_calls.clone();
        async move {
            match req.path.as_str() {
                "/manage/user/list" => {
                    list_calls.fetch_add(1, Ordering::SeqCst);
                    if req.bearer() == Some("fresh") {
                        (200, flat("0000", "ok", user_page()))
                    } else {
                        (200, flat("9999", "token expired", Value::Null))
                    }
                }
                "/auth/refreshToken" => {
                    refresh_calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(refresh_delay).await;
                    if req.body["refreshToken"] == "r1" {
                        (200, flat("0000", "ok", json!({"token": "fresh", "refreshToken": "r2"})))
                    } else {
                        (200, flat("8888", "bad refresh token", Value::Null))
                    }
                }
                _ => (404, String::new()),
            }
        }
    })
    .await
}

#[tokio::test]
async fn test_expired_token_refreshes_and_retries_once() {
    let list_calls = Arc::new(AtomicU32::new(0));
    let refresh_calls = Arc::new(AtomicU32::new(0));
    let primary = expiring_backend(list_calls.clone(), refresh_calls.clone(), Duration::ZERO).await;
    let h = harness(primary, unused_backend().await, Some(token("stale", "r1")));

    let users = api::system::fetch_user_list(h.client.flat(), &SearchParams::page(1, 10))
        .await
        .unwrap();

    assert_eq!(users.list[0].admin_user_username, "alice");
    assert_eq!(list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.store.get().unwrap(), token("fresh", "r2"));
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_concurrent_expired_requests_share_one_refresh() {
    let list_calls = Arc::new(AtomicU32::new(0));
    let refresh_calls = Arc::new(AtomicU32::new(0));
    let primary = expiring_backend(
        list_calls.clone(),
        refresh_calls.clone(),
        Duration::from_millis(150),
    )
    .await;
    let h = harness(primary, unused_backend().await, Some(token("stale", "r1")));

    let mut handles = Vec::new();
    for _ in 0..6 {
        let flat = h.client.flat().clone();
        handles.push(tokio::spawn(async move {
            api::system::fetch_user_list(&flat, &SearchParams::page(1, 10)).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(list_calls.load(Ordering::SeqCst), 12);
    assert_eq!(h.client.flat().refresh_coordinator().generation(), 1);
}

#[tokio::test]
async fn test_refresh_rejected_ends_session() {
    let list_calls = Arc::new(AtomicU32::new(0));
    let refresh_calls = Arc::new(AtomicU32::new(0));
    let primary = expiring_backend(list_calls.clone(), refresh_calls.clone(), Duration::ZERO).await;
    let h = harness(primary, unused_backend().await, Some(token("stale", "revoked")));

    let err = api::system::fetch_user_list(h.client.flat(), &SearchParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::TokenExpired { .. }));
    assert_eq!(list_calls.load(Ordering::SeqCst), 1);
    assert!(h.store.get().is_none());
    assert!(h.navigator.count() >= 1);
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_refresh_endpoint_expired_code_does_not_loop() {
    let refresh_calls = Arc::new(AtomicU32::new(0));
    let rc = refresh_calls.clone();
    let primary = start_programmable_backend(move |req: RecordedRequest| {
        let rc = rc.clone();
        async move {
            if req.path == "/auth/refreshToken" {
                rc.fetch_add(1, Ordering::SeqCst);
            }
            (200, flat("9999", "token expired", Value::Null))
        }
    })
    .await;
    let h = harness(primary, unused_backend().await, Some(token("stale", "r1")));

    let err = h
        .client
        .flat()
        .request_value(RequestDescriptor::post("/manage/role/list"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::TokenExpired { .. }));
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    assert!(!h.client.session().is_logged_in());
}

#[tokio::test]
async fn test_modal_code_shows_single_modal_without_toast() {
    let primary = start_programmable_backend(|_| async {
        (200, flat("7777", "Signed in on another device", Value::Null))
    })
    .await;
    let h = harness(primary, unused_backend().await, Some(token("t", "r")));

    for _ in 0..2 {
        let err = h
            .client
            .flat()
            .request_value(RequestDescriptor::post("/manage/user/list"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::LogoutModal { .. }));
    }

    assert_eq!(h.notifier.modal_count(), 1);
    assert!(h.notifier.errors().is_empty());
    assert_eq!(h.client.session().messages().len(), 1);
    assert!(h.client.session().is_logged_in());

    h.notifier.confirm_modals();
    assert!(h.client.session().messages().is_empty());
    assert!(!h.client.session().is_logged_in());
    assert_eq!(h.navigator.count(), 1);
}

#[tokio::test]
async fn test_silent_logout_code() {
    let primary = start_programmable_backend(|_| async { (200, flat("8888", "kicked", Value::Null)) }).await;
    let h = harness(primary, unused_backend().await, Some(token("t", "r")));

    let err = api::system::delete_user(h.client.flat(), 3).await.unwrap_err();

    assert!(matches!(err, ClientError::LogoutSilent { .. }));
    assert!(h.store.get().is_none());
    assert_eq!(h.navigator.count(), 1);
    assert!(h.notifier.errors().is_empty());
    assert_eq!(h.notifier.modal_count(), 0);
}

#[tokio::test]
async fn test_other_code_notifies_backend_message() {
    let primary = start_programmable_backend(|_| async {
        (200, flat("1001", "Role name already taken", Value::Null))
    })
    .await;
    let h = harness(primary, unused_backend().await, Some(token("t", "r")));

    let err = api::system::delete_role(h.client.flat(), 2).await.unwrap_err();

    assert_eq!(err.backend_code(), Some("1001"));
    assert_eq!(h.notifier.errors(), ["Role name already taken"]);
    assert!(h.client.session().is_logged_in());
}

#[tokio::test]
async fn test_http_error_status_is_notified() {
    let primary = start_programmable_backend(|_| async { (500, "boom".to_string()) }).await;
    let h = harness(primary, unused_backend().await, Some(token("t", "r")));

    let err = api::coupon::fetch_link_list(h.client.flat(), &SearchParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert_eq!(h.notifier.errors(), ["Request failed with status code 500"]);
}

#[tokio::test]
async fn test_outgoing_headers() {
    let seen: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();
    let s = seen.clone();
    let primary = start_programmable_backend(move |req: RecordedRequest| {
        s.lock().unwrap().push(req);
        async { (200, flat("0000", "ok", Value::Null)) }
    })
    .await;
    let h = harness(primary, unused_backend().await, Some(token("abc", "r")));

    h.client
        .flat()
        .request_value(
            RequestDescriptor::post("/manage/user/delete").json_value(json!({"id": 1, "buttonKey": "user:delete"})),
        )
        .await
        .unwrap();
    h.client
        .flat()
        .request_value(RequestDescriptor::get("/manage/router/tree"))
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer abc"));
    assert_eq!(seen[0].button_key.as_deref(), Some("user:delete"));
    assert_eq!(seen[1].button_key.as_deref(), Some("pass"));
    assert_eq!(seen[1].method, "GET");
    assert!(seen[0].request_id.is_some());
    assert_ne!(seen[0].request_id, seen[1].request_id);
}

#[tokio::test]
async fn test_request_timeout() {
    let primary = start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, flat("0000", "ok", Value::Null))
    })
    .await;
    let auth = unused_backend().await;

    let mut config = common::test_config(primary, auth);
    config.timeouts.request_secs = 1;
    let notifier = Arc::new(common::RecordingNotifier::default());
    let client = admin_console_client::ConsoleClient::new(
        &config,
        Arc::new(admin_console_client::session::MemoryCredentialStore::new()),
        Arc::new(common::CountingNavigator::default()),
        notifier.clone(),
    )
    .unwrap();

    let err = client
        .flat()
        .request_value(RequestDescriptor::post("/cps/order/list"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout(1)));
    assert_eq!(notifier.errors(), ["Request timed out after 1 seconds"]);
}

#[tokio::test]
async fn test_auth_login_stores_tokens() {
    let auth = start_programmable_backend(|req: RecordedRequest| async move {
        if req.path == "/auth/login" && req.body["username"] == "admin" {
            (200, raw(200, "", json!({"token": "t1", "refreshToken": "r1"})))
        } else {
            (200, raw(400, "Wrong captcha", Value::Null))
        }
    })
    .await;
    let h = harness(unused_backend().await, auth, None);

    h.client
        .login(&LoginRequest {
            username: "admin".into(),
            password: "secret".into(),
            code: "abcd".into(),
            id: 5,
        })
        .await
        .unwrap();
    assert_eq!(h.store.get().unwrap(), token("t1", "r1"));

    let err = h
        .client
        .login(&LoginRequest {
            username: "mallory".into(),
            password: "x".into(),
            code: "zzzz".into(),
            id: 6,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Backend { .. }));
    assert_eq!(h.notifier.errors(), ["Wrong captcha"]);
    assert!(h.store.get().is_none());
}

#[tokio::test]
async fn test_auth_unauthorized_shows_session_expired() {
    let auth = start_programmable_backend(|_| async { (401, "unauthorized".to_string()) }).await;
    let h = harness(unused_backend().await, auth, Some(token("t", "r")));

    let err = api::auth::fetch_user_info(h.client.auth()).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 401, .. }));
    assert_eq!(h.notifier.errors(), [SESSION_EXPIRED_MESSAGE]);
    assert!(h.store.get().is_none());
    assert_eq!(h.navigator.count(), 1);
}

#[tokio::test]
async fn test_token_replaced_in_flight_replays_without_refresh() {
    let bearers: Arc<Mutex<Vec<String>>> = Arc::default();
    let refresh_calls = Arc::new(AtomicU32::new(0));
    let arrived = Arc::new(tokio::sync::Notify::new());
    let release = Arc::new(tokio::sync::Notify::new());

    let (b, r, a, rel) = (bearers.clone(), refresh_calls.clone(), arrived.clone(), release.clone());
    let primary = start_programmable_backend(move |req: RecordedRequest| {
        let (bearers, refresh_calls, arrived, release) = (b.clone(), r.clone(), a.clone(), rel.clone());
        async move {
            match req.path.as_str() {
                "/manage/user/list" => {
                    let bearer = req.bearer().unwrap_or_default().to_string();
                    bearers.lock().unwrap().push(bearer.clone());
                    if bearer == "second" {
                        return (200, flat("0000", "ok", user_page()));
                    }
                    arrived.notify_one();
                    release.notified().await;
                    (200, flat("9999", "token expired", Value::Null))
                }
                "/auth/refreshToken" => {
                    refresh_calls.fetch_add(1, Ordering::SeqCst);
                    (200, flat("8888", "unexpected refresh", Value::Null))
                }
                _ => (404, String::new()),
            }
        }
    })
    .await;
    let h = harness(primary, unused_backend().await, Some(token("first", "r1")));

    let flat_client = h.client.flat().clone();
    let request = tokio::spawn(async move {
        api::system::fetch_user_list(&flat_client, &SearchParams::page(1, 10)).await
    });

    arrived.notified().await;
    h.store.set(token("second", "r2"));
    release.notify_one();

    let users = request.await.unwrap().unwrap();
    assert_eq!(users.list[0].admin_user_username, "alice");
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(*bearers.lock().unwrap(), ["first", "second"]);
    assert!(h.client.session().is_logged_in());
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_replay_expiring_again_ends_session() {
    let list_calls = Arc::new(AtomicU32::new(0));
    let refresh_calls = Arc::new(AtomicU32::new(0));
    let (l, r) = (list_calls.clone(), refresh_calls.clone());
    let primary = start_programmable_backend(move |req: RecordedRequest| {
        let (list_calls, refresh_calls) = (l.clone(), r.clone());
        async move {
            match req.path.as_str() {
                "/manage/user/list" => {
                    list_calls.fetch_add(1, Ordering::SeqCst);
                    (200, flat("9999", "expired", Value::Null))
                }
                "/auth/refreshToken" => {
                    refresh_calls.fetch_add(1, Ordering::SeqCst);
                    (200, flat("0000", "ok", json!({"token": "fresh", "refreshToken": "r2"})))
                }
                _ => (404, String::new()),
            }
        }
    })
    .await;
    let h = harness(primary, unused_backend().await, Some(token("stale", "r1")));

    let err = api::system::fetch_user_list(h.client.flat(), &SearchParams::page(1, 10))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::TokenExpired { ref code, .. } if code == "9999"));
    assert_eq!(list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    assert!(!h.client.session().is_logged_in());
    assert!(h.notifier.errors().is_empty());
    assert_eq!(h.navigator.count(), 1);
}
