use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Json Rejection Error: {0}")]
    AxumJsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    // ! Auth
    #[error("Invalid admin secret")]
    Unauthorized,
    #[error("Invalid or inactive volunteer key")]
    Forbidden,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let error_body = |message: String| json!({ "status": "error", "message": message });

        let (status, body) = match self {
            Error::StoreUnavailable(message) => {
                error!("Store unavailable: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(message))
            }
            Error::IoError(error) => {
                error!("Io Error:{:#?}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(error.to_string()))
            }
            Error::TaskJoin(error) => {
                error!("Blocking task Error:{:#?}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(error.to_string()))
            }
            Error::Config(message) => {
                error!("Configuration Error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(message))
            }
            Error::AxumJsonRejection(error) => {
                warn!("Axum Json Rejection Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, error_body(error.body_text()))
            }
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, error_body(message)),
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "status": "unauthorized" }),
            ),
            Error::Forbidden => (StatusCode::FORBIDDEN, json!({ "status": "forbidden" })),
        };
        (status, Json(body)).into_response()
    }
}
