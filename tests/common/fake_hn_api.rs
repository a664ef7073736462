//! Fake Hacker News API server.
//!
//! Spins up a minimal `axum` server on a random port bound to 127.0.0.1.
//! Serves:
//! - `GET /v0/topstories.json` — configured ranked ids (503 when unset)
//! - `GET /v0/item/{id}.json` — configured item body, `null` when unknown

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Clone)]
enum ItemReply {
    Json(serde_json::Value),
    Status(StatusCode),
    Garbage,
}

#[derive(Default)]
struct ApiState {
    top_ids: Option<Vec<i64>>,
    items: HashMap<i64, ItemReply>,
    item_requests: Vec<i64>,
}

pub struct FakeHnApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeHnApi {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/v0/topstories.json", get(top_stories))
            .route("/v0/item/{file}", get(item))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL without a trailing slash, as users tend to write it.
    pub fn base_url(&self) -> String {
        format!("http://{}/v0", self.addr)
    }

    pub async fn set_top_ids(&self, ids: &[i64]) {
        self.state.lock().await.top_ids = Some(ids.to_vec());
    }

    pub async fn add_item(&self, id: i64, body: serde_json::Value) {
        self.state
            .lock()
            .await
            .items
            .insert(id, ItemReply::Json(body));
    }

    pub async fn fail_item(&self, id: i64, status: StatusCode) {
        self.state
            .lock()
            .await
            .items
            .insert(id, ItemReply::Status(status));
    }

    pub async fn garble_item(&self, id: i64) {
        self.state.lock().await.items.insert(id, ItemReply::Garbage);
    }

    pub async fn item_requests(&self) -> Vec<i64> {
        self.state.lock().await.item_requests.clone()
    }
}

async fn top_stories(State(state): State<Arc<Mutex<ApiState>>>) -> Response {
    let state = state.lock().await;
    match &state.top_ids {
        Some(ids) => axum::Json(ids.clone()).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn item(Path(file): Path<String>, State(state): State<Arc<Mutex<ApiState>>>) -> Response {
    let Some(id) = file
        .strip_suffix(".json")
        .and_then(|s| s.parse::<i64>().ok())
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let reply = {
        let mut state = state.lock().await;
        state.item_requests.push(id);
        state.items.get(&id).cloned()
    };

    match reply {
        Some(ItemReply::Json(body)) => axum::Json(body).into_response(),
        Some(ItemReply::Status(status)) => status.into_response(),
        Some(ItemReply::Garbage) => (StatusCode::OK, "{\"id\": ").into_response(),
        None => axum::Json(serde_json::Value::Null).into_response(),
    }
}
