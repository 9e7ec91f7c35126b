use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Upload error: {0}")]
    UploadError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg,
                )
            }
            AppError::UploadError(msg) => {
                log::warn!("Upload error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "UPLOAD_ERROR",
                    msg,
                )
            }
            AppError::NotFound(msg) => (actix_web::http::StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::StoreError(msg) => {
                log::error!("Store error: {msg}");
                (actix_web::http::StatusCode::BAD_GATEWAY, "STORE_ERROR", msg)
            }
            AppError::RenderError(msg) => {
                log::error!("Render error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    msg,
                )
            }
            AppError::ReqwestError(err) => {
                log::error!("HTTP request error: {err}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "STORE_ERROR",
                    &"Store request failed".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    &"Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
