use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{storage::StorageError, FolioError};

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Unauthorized: `{0}`")]
    Unauthorized(String),
    #[error("BadRequest: `{0}`")]
    BadRequest(String),
    #[error("`{0}` not found")]
    NotFound(String),
    #[error("Conflict: `{0}`")]
    Conflict(String),
    #[error("Forbidden: `{0}`")]
    Forbidden(String),
    #[error("InternalError: `{0}`")]
    InternalError(String),
    #[error("DBError: `{0}`")]
    StorageError(StorageError),
    /// The site is in maintenance mode and the caller may not bypass it.
    #[error("Site under maintenance")]
    Maintenance { redirect: String },
}

impl From<StorageError> for WebError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::EntityNotFound(msg) => WebError::NotFound(msg),
            StorageError::Conflict(msg) => WebError::Conflict(msg),
            StorageError::InvalidState(msg) => WebError::BadRequest(msg),
            other => WebError::StorageError(other),
        }
    }
}

impl From<std::io::Error> for WebError {
    fn from(e: std::io::Error) -> Self {
        WebError::InternalError(e.to_string())
    }
}

impl From<FolioError> for WebError {
    fn from(e: FolioError) -> Self {
        match e {
            FolioError::StorageError(storage) => storage.into(),
            FolioError::WebError(web) => web,
            FolioError::IdentityError(msg) => WebError::Unauthorized(msg),
            other => WebError::InternalError(other.to_string()),
        }
    }
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Conflict(_) => StatusCode::CONFLICT,
            WebError::Forbidden(_) => StatusCode::FORBIDDEN,
            WebError::Maintenance { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WebError::InternalError(_) | WebError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "message": self.to_string()
        });
        match self {
            WebError::Unauthorized(msg) => {
                body["error"] = json!("Unauthorized");
                body["message"] = json!(msg);
                HttpResponse::Unauthorized().json(body)
            }
            WebError::BadRequest(_) => {
                body["error"] = json!("Bad Request");
                HttpResponse::BadRequest().json(body)
            }
            WebError::NotFound(_) => {
                body["error"] = json!("Not Found");
                HttpResponse::NotFound().json(body)
            }
            WebError::Conflict(msg) => {
                body["error"] = json!("Conflict");
                body["message"] = json!(msg);
                HttpResponse::Conflict().json(body)
            }
            WebError::Forbidden(_) => {
                body["error"] = json!("Forbidden");
                HttpResponse::Forbidden().json(body)
            }
            WebError::Maintenance { redirect } => HttpResponse::ServiceUnavailable()
                .insert_header((header::LOCATION, redirect.as_str()))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .json(json!({
                    "maintenanceMode": true,
                    "redirect": redirect,
                })),
            // Internal details are logged, never returned to the caller.
            WebError::InternalError(detail) => {
                error!(error = %detail, "internal error while handling request");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal Server Error",
                    "message": "An unexpected error occurred",
                }))
            }
            WebError::StorageError(detail) => {
                error!(error = %detail, "storage error while handling request");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Storage Error",
                    "message": "An unexpected error occurred",
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_web_taxonomy() {
        assert!(matches!(
            WebError::from(StorageError::EntityNotFound("Service".into())),
            WebError::NotFound(_)
        ));
        assert!(matches!(
            WebError::from(StorageError::Conflict("slug".into())),
            WebError::Conflict(_)
        ));
        assert!(matches!(
            WebError::from(StorageError::StorageUnavailable),
            WebError::StorageError(_)
        ));
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            WebError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::InternalError("x".into()).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn maintenance_carries_location() {
        let resp = WebError::Maintenance {
            redirect: "/maintenance".into(),
        }
        .error_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/maintenance"
        );
    }
}
