use axum::{Router, routing::post};

use crate::{
    routes::admin_route::{
        keys::{delete_key, generate_key, list_keys},
        stats::stats,
    },
    state::AppState,
};

pub mod keys;
pub mod stats;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AdminRequest {
    #[serde(default)]
    pub admin_secret: String,
}

pub fn admin_router(config: AppState) -> Router<AppState> {
    Router::new()
        .route("/generate-key", post(generate_key))
        .route("/delete-key", post(delete_key))
        .route("/keys", post(list_keys))
        .route("/stats", post(stats))
        .with_state(config)
}
