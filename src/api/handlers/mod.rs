use axum::{extract::State, response::IntoResponse, Json};

use crate::notebook::Notebook;

// ============================================================
// Health
// ============================================================

pub async fn health(State(notebook): State<Notebook>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "thoughts": notebook.len(),
    }))
}
