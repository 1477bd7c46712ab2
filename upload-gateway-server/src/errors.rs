use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Every response carries this header; the gateway is called directly from
/// browser origins and requires no credential.
pub const CORS_ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");

#[derive(Debug, Error)]
pub enum UploadErr {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server configuration error")]
    ServiceMisconfigured { message: String },

    #[error("No file provided")]
    MissingFile,

    #[error("File too large. Maximum size is {limit_mb}MB")]
    PayloadTooLarge { limit_mb: u64 },

    #[error("Upload failed")]
    UploadFailed { message: String },
}

impl UploadErr {
    /// Caller-safe detail carried alongside the short error string.
    pub fn detail(&self) -> Option<&str> {
        match self {
            UploadErr::ServiceMisconfigured { message } => Some(message),
            UploadErr::UploadFailed { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl ResponseError for UploadErr {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadErr::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            UploadErr::ServiceMisconfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            UploadErr::MissingFile => StatusCode::BAD_REQUEST,
            UploadErr::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadErr::UploadFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(CORS_ALLOW_ORIGIN)
            .json(ErrorBody {
                error: self.to_string(),
                message: self.detail(),
            })
    }
}
