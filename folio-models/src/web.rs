use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// Response code carried in the envelope
pub enum ResponseCode {
    Success = 0,
    Error = 500,
}

/// Envelope returned by every admin endpoint: `{ code, message, data }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip)]
    status: Option<u16>,
}

impl<T> WebResponse<T> {
    pub fn new(code: ResponseCode, message: &str, data: Option<T>) -> Self {
        Self {
            code: code as u16,
            message: message.into(),
            data,
            status: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(ResponseCode::Success, "success", Some(data))
    }

    pub fn ok_with_message(message: &str, data: T) -> Self {
        Self::new(ResponseCode::Success, message, Some(data))
    }

    /// Success with `201 Created` as HTTP status.
    pub fn created(data: T) -> Self {
        Self {
            status: Some(StatusCode::CREATED.as_u16()),
            ..Self::ok(data)
        }
    }

    pub fn ok_empty() -> WebResponse<()> {
        WebResponse::new(ResponseCode::Success, "success", None)
    }

    pub fn error(message: &str) -> Self {
        Self::new(ResponseCode::Error, message, None)
    }
}

impl<T> Responder for WebResponse<T>
where
    T: Serialize,
{
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let status = self
            .status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::OK);
        match serde_json::to_string(&self) {
            Ok(body) => HttpResponse::build(status)
                .content_type("application/json")
                .body(body),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}
