//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use admin_console_client::session::{
    LoginToken, LogoutModal, MemoryCredentialStore, Navigator, Notifier, Toast,
};
use admin_console_client::{ClientConfig, ConsoleClient};

/// What the mock backend saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub button_key: Option<String>,
    pub request_id: Option<String>,
    pub body: Value,
}

impl RecordedRequest {
    pub fn bearer(&self) -> Option<&str> {
        self.authorization.as_deref()?.strip_prefix("Bearer ")
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Start a programmable mock backend on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(RecordedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
            let f = f.clone();
            async move {
                let request = RecordedRequest {
                    method,
                    path: uri.path().to_string(),
                    query: uri.query().map(str::to_string),
                    authorization: header(&headers, "authorization"),
                    button_key: header(&headers, "x-button-key"),
                    request_id: header(&headers, "x-request-id"),
                    body: serde_json::from_slice(&body).unwrap_or(Value::Null),
                };
                let (status, body) = f(request).await;
                (StatusCode::from_u16(status).unwrap(), body)
            }
        },
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Flat envelope body.
pub fn flat(code: &str, msg: &str, data: Value) -> String {
    json!({ "code": code, "msg": msg, "data": data }).to_string()
}

/// Raw envelope body.
pub fn raw(code: i64, msg: &str, data: Value) -> String {
    json!({ "code": code, "msg": msg, "data": data }).to_string()
}

#[derive(Default)]
pub struct CountingNavigator {
    pub redirects: AtomicU32,
}

impl CountingNavigator {
    pub fn count(&self) -> u32 {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records notifications. Modals stay open until the test resolves them.
#[derive(Default)]
pub struct RecordingNotifier {
    pub errors: Mutex<Vec<String>>,
    pub successes: Mutex<Vec<String>>,
    pub modals: Mutex<Vec<LogoutModal>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn modal_count(&self) -> usize {
        self.modals.lock().unwrap().len()
    }

    pub fn confirm_modals(&self) {
        let modals: Vec<LogoutModal> = self.modals.lock().unwrap().drain(..).collect();
        for modal in modals {
            modal.confirm();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, toast: Toast) {
        self.errors.lock().unwrap().push(toast.message().to_string());
    }

    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn modal(&self, modal: LogoutModal) {
        self.modals.lock().unwrap().push(modal);
    }
}

pub struct Harness {
    pub client: ConsoleClient,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<CountingNavigator>,
    pub store: Arc<MemoryCredentialStore>,
}

pub fn token(access: &str, refresh: &str) -> LoginToken {
    LoginToken {
        token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

pub fn test_config(primary: SocketAddr, auth: SocketAddr) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.service.base_url = format!("http://{}", primary);
    config
        .service
        .other_base_urls
        .insert("demo".to_string(), format!("http://{}", auth));
    config.session.redirect_delay_ms = 0;
    config.timeouts.request_secs = 5;
    config
}

/// Client against `primary` (flat) and `auth` (raw), signed in with `initial`.
pub fn harness(primary: SocketAddr, auth: SocketAddr, initial: Option<LoginToken>) -> Harness {
    let config = test_config(primary, auth);
    let store = Arc::new(match initial {
        Some(t) => MemoryCredentialStore::with_token(t),
        None => MemoryCredentialStore::new(),
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(CountingNavigator::default());
    let client = ConsoleClient::new(&config, store.clone(), navigator.clone(), notifier.clone()).unwrap();

    Harness {
        client,
        notifier,
        navigator,
        store,
    }
}
