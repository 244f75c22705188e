//! In-memory pet-store service
//!
//! Serves the `/pet` collection the way the public sample service does, so
//! the scenario catalog can run against a private, deterministic target.
//! Stored pets get the service's fills: a category sent without an id gets
//! id 0, and `photoUrls` / `tags` default to empty lists.
//!
//! ```text
//! POST   /pet       insert or replace            -> 200 pet
//! GET    /pet/:id   read                         -> 200 pet | 404
//! PUT    /pet       replace existing             -> 200 pet | 404 (200 in upsert mode)
//! DELETE /pet/:id   remove                       -> 200 | 404 (empty body)
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use petstore_common::{Category, Pet, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Mock service configuration
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Address to listen on; port 0 picks a free port
    pub addr: SocketAddr,

    /// `PUT /pet` creates the pet when it is absent instead of answering 404
    pub upsert_on_update: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            upsert_on_update: false,
        }
    }
}

/// Message body the sample service sends for non-pet answers
#[derive(Debug, Serialize)]
struct ApiMessage {
    code: u16,
    #[serde(rename = "type")]
    kind: &'static str,
    message: String,
}

impl ApiMessage {
    fn new(code: u16, kind: &'static str, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            code,
            kind,
            message: message.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Tag {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    name: Option<String>,
}

/// Pet as the service stores and returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPet {
    id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "photoUrls", default)]
    photo_urls: Vec<String>,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl From<&StoredPet> for Pet {
    fn from(stored: &StoredPet) -> Self {
        Pet {
            id: stored.id,
            name: stored.name.clone(),
            category: stored.category.clone(),
            status: stored.status.clone(),
        }
    }
}

struct MockState {
    pets: RwLock<HashMap<i64, StoredPet>>,
    upsert_on_update: bool,
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/pet", post(create_pet_handler).put(update_pet_handler))
        .route("/pet/:id", get(get_pet_handler).delete(delete_pet_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn create_pet_handler(
    State(state): State<Arc<MockState>>,
    Json(pet): Json<StoredPet>,
) -> Response {
    debug!("mock: store pet {}", pet.id);
    state.pets.write().await.insert(pet.id, pet.clone());
    (StatusCode::OK, Json(pet)).into_response()
}

async fn get_pet_handler(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return pet_not_found();
    };

    match state.pets.read().await.get(&id) {
        Some(pet) => (StatusCode::OK, Json(pet.clone())).into_response(),
        None => pet_not_found(),
    }
}

async fn update_pet_handler(
    State(state): State<Arc<MockState>>,
    Json(pet): Json<StoredPet>,
) -> Response {
    let mut pets = state.pets.write().await;

    if !pets.contains_key(&pet.id) && !state.upsert_on_update {
        return (
            StatusCode::NOT_FOUND,
            ApiMessage::new(404, "unknown", "Pet not found"),
        )
            .into_response();
    }

    pets.insert(pet.id, pet.clone());
    (StatusCode::OK, Json(pet)).into_response()
}

async fn delete_pet_handler(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(parsed) = id.parse::<i64>() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.pets.write().await.remove(&parsed) {
        Some(_) => (StatusCode::OK, ApiMessage::new(200, "unknown", id)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn pet_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        ApiMessage::new(1, "error", "Pet not found"),
    )
        .into_response()
}

/// Handle to a mock service running on a background task
pub struct MockServer {
    base_url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MockServer {
    /// Bind and start serving
    pub async fn spawn(config: MockConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.addr).await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        let state = Arc::new(MockState {
            pets: RwLock::new(HashMap::new()),
            upsert_on_update: config.upsert_on_update,
        });
        let app = router(state.clone());
        let (tx, rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                warn!("mock server error: {}", e);
            }
        });

        info!(
            "Mock pet store listening on {} (upsert_on_update={})",
            base_url, config.upsert_on_update
        );

        Ok(Self {
            base_url,
            state,
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the store currently holds `id`
    pub async fn contains(&self, id: i64) -> bool {
        self.state.pets.read().await.contains_key(&id)
    }

    /// The stored pet with `id`, without the service-only fields
    pub async fn pet(&self, id: i64) -> Option<Pet> {
        self.state.pets.read().await.get(&id).map(Pet::from)
    }

    /// Number of stored pets
    pub async fn pet_count(&self) -> usize {
        self.state.pets.read().await.len()
    }

    /// Stop accepting connections and wait for the serve task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("Mock pet store on {} stopped", self.base_url);
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
