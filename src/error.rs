use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

/// Request-level failures. The store itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KvError {
    #[error("missing key parameter")]
    MissingKey,
    #[error("key not found")]
    KeyNotFound,
}

impl ResponseError for KvError {
    fn status_code(&self) -> StatusCode {
        match self {
            KvError::MissingKey => StatusCode::BAD_REQUEST,
            KvError::KeyNotFound => StatusCode::NOT_FOUND,
        }
    }

    // Plain-text body terminated by a newline.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(format!("{}\n", self))
    }
}
