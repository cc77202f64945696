//! In-process stand-in for the provenance service.

use crate::options::NumbersOptions;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) struct MockBehavior {
    pub pin: (StatusCode, String),
    pub commit: (StatusCode, String),
    pub identity: StatusCode,
    pub pin_delay: Duration,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            pin: (StatusCode::OK, r#"{"cid": "Qm123"}"#.into()),
            commit: (
                StatusCode::OK,
                r#"{"assetCid": "Qm123", "assetTreeCid": "Qt456"}"#.into(),
            ),
            identity: StatusCode::OK,
            pin_delay: Duration::ZERO,
        }
    }
}

#[derive(Default)]
struct Recorded {
    pin_calls: AtomicUsize,
    commit_calls: AtomicUsize,
    identity_calls: AtomicUsize,
    last_authorization: Mutex<Option<String>>,
    last_pin_body: Mutex<Vec<u8>>,
    commits: Mutex<Vec<Value>>,
    events: Mutex<Vec<&'static str>>,
}

struct MockState {
    behavior: MockBehavior,
    recorded: Recorded,
}

impl MockState {
    fn record_authorization(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *self.recorded.last_authorization.lock().unwrap() = value;
    }
}

pub(crate) struct MockProvenance {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockProvenance {
    pub async fn start(behavior: MockBehavior) -> Self {
        let state = Arc::new(MockState {
            behavior,
            recorded: Recorded::default(),
        });
        let app = Router::new()
            .route("/pin", post(pin))
            .route("/commit", post(commit))
            .route("/me", get(identity))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    /// Options pointing every endpoint at this server.
    pub fn options(&self) -> NumbersOptions {
        NumbersOptions {
            pin_url: format!("http://{}/pin", self.addr),
            commit_url: format!("http://{}/commit", self.addr),
            identity_url: format!("http://{}/me", self.addr),
            ..Default::default()
        }
    }

    pub fn pin_calls(&self) -> usize {
        self.state.recorded.pin_calls.load(Ordering::SeqCst)
    }

    pub fn commit_calls(&self) -> usize {
        self.state.recorded.commit_calls.load(Ordering::SeqCst)
    }

    pub fn identity_calls(&self) -> usize {
        self.state.recorded.identity_calls.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.recorded.last_authorization.lock().unwrap().clone()
    }

    pub fn last_pin_body(&self) -> Vec<u8> {
        self.state.recorded.last_pin_body.lock().unwrap().clone()
    }

    /// Endpoint names (`pin`, `commit`) in arrival order.
    pub fn events(&self) -> Vec<&'static str> {
        self.state.recorded.events.lock().unwrap().clone()
    }

    /// Commit bodies in arrival order.
    pub fn commits(&self) -> Vec<Value> {
        self.state.recorded.commits.lock().unwrap().clone()
    }
}

async fn pin(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.recorded.pin_calls.fetch_add(1, Ordering::SeqCst);
    state.recorded.events.lock().unwrap().push("pin");
    state.record_authorization(&headers);
    *state.recorded.last_pin_body.lock().unwrap() = body.to_vec();
    if !state.behavior.pin_delay.is_zero() {
        tokio::time::sleep(state.behavior.pin_delay).await;
    }
    state.behavior.pin.clone()
}

async fn commit(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.recorded.commit_calls.fetch_add(1, Ordering::SeqCst);
    state.recorded.events.lock().unwrap().push("commit");
    state.record_authorization(&headers);
    let parsed = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.recorded.commits.lock().unwrap().push(parsed);
    state.behavior.commit.clone()
}

async fn identity(State(state): State<Arc<MockState>>, headers: HeaderMap) -> StatusCode {
    state.recorded.identity_calls.fetch_add(1, Ordering::SeqCst);
    state.record_authorization(&headers);
    state.behavior.identity
}

/// A complete commit body as the service expects it.
pub(crate) fn sample_commit_body() -> Value {
    json!({
        "captureToken": "abc",
        "assetCid": "Qm123",
        "assetSha256": "00",
        "encodingFormat": "image/png",
        "assetTimestampCreated": 1_700_000_000,
        "assetCreator": "",
        "abstract": "",
        "custom": {
            "generatedThrough": "https://console.instill.tech",
            "generatedBy": "",
            "creatorWallet": "",
            "digitalSourceType": "trainedAlgorithmicMedia",
            "miningPreference": "notAllowed",
            "license": {"name": "", "document": ""}
        },
        "testnet": false
    })
}
