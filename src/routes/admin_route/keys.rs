use axum::{Json, extract::State};

use crate::{
    errors::Result,
    models::volunteer_key::VolunteerKey,
    routes::admin_route::AdminRequest,
    state::AppState,
    utils::{blocking::run_blocking, json_body::JsonBody},
};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GenerateKeyRequest {
    #[serde(default)]
    pub admin_secret: String,
    #[serde(default)]
    pub erp_id: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GenerateKeyResponse {
    status: &'static str,
    pass_key: String,
    erp_id: String,
}

pub async fn generate_key(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<GenerateKeyRequest>,
) -> Result<Json<GenerateKeyResponse>> {
    let admin = state.admin.clone();
    let issued = run_blocking(move || admin.issue_key(&input.admin_secret, &input.erp_id)).await?;
    Ok(Json(GenerateKeyResponse {
        status: "success",
        pass_key: issued.key,
        erp_id: issued.owner_id,
    }))
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DeleteKeyRequest {
    #[serde(default)]
    pub admin_secret: String,
    #[serde(default)]
    pub pass_key: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DeleteKeyResponse {
    status: &'static str,
    message: String,
}

pub async fn delete_key(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DeleteKeyRequest>,
) -> Result<Json<DeleteKeyResponse>> {
    let admin = state.admin.clone();
    let affected =
        run_blocking(move || admin.deactivate_key(&input.admin_secret, &input.pass_key)).await?;
    let message = match affected {
        0 => "No matching key, nothing deactivated".to_string(),
        n => format!("Deactivated {n} key record(s)"),
    };
    Ok(Json(DeleteKeyResponse {
        status: "success",
        message,
    }))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct KeyView {
    erp_id: String,
    pass_key: String,
    active: bool,
}

impl From<VolunteerKey> for KeyView {
    fn from(key: VolunteerKey) -> Self {
        Self {
            erp_id: key.owner_id,
            pass_key: key.key,
            active: key.active,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ListKeysResponse {
    status: &'static str,
    keys: Vec<KeyView>,
}

pub async fn list_keys(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AdminRequest>,
) -> Result<Json<ListKeysResponse>> {
    let admin = state.admin.clone();
    let keys = run_blocking(move || admin.list_keys(&input.admin_secret)).await?;
    Ok(Json(ListKeysResponse {
        status: "success",
        keys: keys.into_iter().map(KeyView::from).collect(),
    }))
}
