use axum::{Json, extract::State};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    errors::Result,
    services::verification::VerificationOutcome,
    state::AppState,
    utils::{blocking::run_blocking, json_body::JsonBody},
};

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub volunteer_key: String,
    /// Scanners may send the code as a JSON number.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub uuid: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VerifyResponse {
    Valid {
        already_verified: bool,
        name: String,
        email: String,
        branch: String,
        uuid: String,
        time: String,
    },
    Invalid,
}

impl From<VerificationOutcome> for VerifyResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        let (already_verified, participant) = match outcome {
            VerificationOutcome::NotFound => return VerifyResponse::Invalid,
            VerificationOutcome::AlreadyVerified(p) => (true, p),
            VerificationOutcome::NewlyVerified(p) => (false, p),
        };
        VerifyResponse::Valid {
            already_verified,
            time: participant.verified_at().unwrap_or_default().to_string(),
            name: participant.name,
            email: participant.contact,
            branch: participant.affiliation,
            uuid: participant.identifier,
        }
    }
}

fn scalar_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub async fn verify(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    let verification = state.verification.clone();
    let outcome =
        run_blocking(move || verification.verify(&input.volunteer_key, &input.uuid)).await?;
    Ok(Json(outcome.into()))
}
