//! In-memory implementation of the todo collection endpoint.
//!
//! Items keep arrival order. Failures answer with `{"error": "..."}` so
//! clients can surface the server's message.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub is_checked: bool,
}

#[derive(Deserialize)]
pub struct NewItem {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type Db = Arc<RwLock<Vec<Item>>>;

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over a caller-supplied store, so tests can seed or inspect it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list_items).post(add_item))
        .route("/todos/{id}", delete(delete_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    Json(db.read().await.clone())
}

async fn add_item(State(db): State<Db>, Json(input): Json<NewItem>) -> Result<Json<Item>, ApiError> {
    if input.title.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "title must not be empty"));
    }
    let item = Item {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        is_checked: false,
    };
    debug!(id = %item.id, "created item");
    db.write().await.push(item.clone());
    Ok(Json(item))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut items = db.write().await;
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
        return Err(api_error(StatusCode::NOT_FOUND, "todo not found"));
    }
    debug!(%id, "deleted item");
    Ok(StatusCode::OK)
}
