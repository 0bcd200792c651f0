use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

use leaderboard::{build_router, AppState, InMemoryGameRecordRepository, InMemoryPlayerRepository};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub records: Arc<InMemoryGameRecordRepository>,
    pub players: Arc<InMemoryPlayerRepository>,
}

pub struct TestAppBuilder {
    peer: SocketAddr,
    trust_proxy_headers: bool,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            peer: SocketAddr::from(([198, 51, 100, 20], 50000)),
            trust_proxy_headers: false,
        }
    }

    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = peer;
        self
    }

    pub fn trusting_proxy_headers(mut self) -> Self {
        self.trust_proxy_headers = true;
        self
    }

    pub fn build(self) -> TestApp {
        let records = Arc::new(InMemoryGameRecordRepository::new());
        let players = Arc::new(InMemoryPlayerRepository::new());
        let state = AppState::new(records.clone(), players.clone())
            .with_trust_proxy_headers(self.trust_proxy_headers);

        let router = build_router(state).layer(MockConnectInfo(self.peer));

        TestApp {
            router,
            records,
            players,
        }
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    /// Submits a finished game that started at 10:00:00.000 and lasted `seconds`
    pub async fn submit_game(&self, name: &str, moves: i32, seconds: u32, udid: &str) -> StatusCode {
        let over = format!(
            "2024-01-01 {:02}:{:02}:{:02}.000",
            10 + seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        );
        let body = serde_json::json!({
            "name": name,
            "moveCount": moves,
            "createdTime": "2024-01-01 10:00:00.000",
            "overTime": over,
            "udid": udid,
        });
        self.post_json("/game/adddata", &body.to_string()).await.0
    }
}

pub fn udid(seed: char) -> String {
    std::iter::repeat(seed).take(32).collect()
}
