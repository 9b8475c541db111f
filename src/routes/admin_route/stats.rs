use axum::{Json, extract::State};

use crate::{
    errors::Result,
    routes::admin_route::AdminRequest,
    state::AppState,
    utils::{blocking::run_blocking, json_body::JsonBody},
};

#[derive(Debug, Clone, serde::Serialize)]
pub struct StatsResponse {
    status: &'static str,
    total_students: usize,
    verified: usize,
    unverified: usize,
}

pub async fn stats(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AdminRequest>,
) -> Result<Json<StatsResponse>> {
    let admin = state.admin.clone();
    let stats = run_blocking(move || admin.get_stats(&input.admin_secret)).await?;
    Ok(Json(StatsResponse {
        status: "success",
        total_students: stats.total,
        verified: stats.verified,
        unverified: stats.unverified,
    }))
}
