//! Fake text-generation and image-search server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `POST /v1/chat/completions` — the configured completion reply
//! - `GET /search.json` — the configured image-search reply
//!
//! Every call is recorded so tests can assert on request headers and bodies.
//!
//! ```rust,ignore
//! let fake = FakeProvider::start().await.unwrap();
//! fake.reply_completion(200, completion_body(REMEDY_CONTENT)).await;
//! let provider = HttpProvider::new(fake.config("sk-test", "")).unwrap();
//! ```

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use daisy_provider::ProviderConfig;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One recorded completion request.
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

struct ServerState {
    completion: (u16, serde_json::Value),
    image: (u16, serde_json::Value),
    /// Delay applied before answering a completion.
    completion_delay: Duration,
    completions: Vec<RecordedCompletion>,
    image_queries: Vec<HashMap<String, String>>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            completion: (200, serde_json::json!({ "choices": [] })),
            image: (200, serde_json::json!({ "images_results": [] })),
            completion_delay: Duration::ZERO,
            completions: Vec::new(),
            image_queries: Vec::new(),
        }
    }
}

/// Handle to the running fake provider server.
pub struct FakeProvider {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl FakeProvider {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .route("/search.json", get(image_search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Provider settings pointed at this server.
    pub fn config(&self, api_key: &str, image_api_key: &str) -> ProviderConfig {
        ProviderConfig {
            completions_url: format!("{}/v1/chat/completions", self.base_url()),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 800,
            timeout: Duration::from_secs(5),
            image_search_url: format!("{}/search.json", self.base_url()),
            image_engine: "google_images".to_string(),
            api_key: api_key.to_string(),
            image_api_key: image_api_key.to_string(),
        }
    }

    pub async fn reply_completion(&self, status: u16, body: serde_json::Value) {
        self.state.lock().await.completion = (status, body);
    }

    pub async fn reply_image(&self, status: u16, body: serde_json::Value) {
        self.state.lock().await.image = (status, body);
    }

    pub async fn delay_completions(&self, delay: Duration) {
        self.state.lock().await.completion_delay = delay;
    }

    pub async fn completions(&self) -> Vec<RecordedCompletion> {
        self.state.lock().await.completions.clone()
    }

    pub async fn image_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.image_queries.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn completions(
    State(state): State<Arc<Mutex<ServerState>>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let (reply, delay) = {
        let mut state = state.lock().await;
        state.completions.push(RecordedCompletion {
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
        (state.completion.clone(), state.completion_delay)
    };
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    respond(reply)
}

async fn image_search(
    State(state): State<Arc<Mutex<ServerState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let reply = {
        let mut state = state.lock().await;
        state.image_queries.push(params);
        state.image.clone()
    };
    respond(reply)
}

fn respond((status, body): (u16, serde_json::Value)) -> (StatusCode, Json<serde_json::Value>) {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body))
}
