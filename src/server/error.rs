use actix_web::HttpResponse;
use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Failure of an API call, rendered as a JSON body with an `error` field
///
/// Validation endpoint failures also carry `"valid": false` so clients that
/// only read `valid` treat them as a rejection.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    InvalidCandidate(String),
    #[error("{0}")]
    ValidatorUnavailable(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidCandidate(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::ValidatorUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::BadRequest(msg) | Self::Upstream(msg) => json!({ "error": msg }),
            Self::InvalidCandidate(msg) | Self::ValidatorUnavailable(msg) => {
                json!({ "valid": false, "error": msg })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
