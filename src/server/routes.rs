use super::AppState;
use super::error::ApiError;
use crate::core::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, is_valid_length};
use crate::oracle::{OracleError, check_candidate};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// `length` as sent by browsers: a number, or a numeric string.
/// Integral floats such as `5.0` count as whole numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LengthField {
    Number(serde_json::Number),
    Text(String),
}

fn whole(value: f64) -> Option<usize> {
    (value.is_finite() && value >= 0.0 && value.fract().abs() < f64::EPSILON)
        .then_some(value as usize)
}

impl LengthField {
    fn as_length(&self) -> Option<usize> {
        match self {
            Self::Number(n) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .or_else(|| n.as_f64().and_then(whole)),
            Self::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    length: Option<LengthField>,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    word: String,
}

#[derive(Debug, Deserialize)]
struct ValidateRequest {
    #[serde(default)]
    word: String,
}

#[derive(Debug, Serialize)]
struct ValidateResponse {
    valid: bool,
}

fn invalid_length() -> ApiError {
    ApiError::BadRequest(format!(
        "Invalid length. Must be between {MIN_WORD_LENGTH} and {MAX_WORD_LENGTH} letters."
    ))
}

async fn generate_word(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, ApiError> {
    let length = body
        .length
        .as_ref()
        .and_then(LengthField::as_length)
        .filter(|&length| is_valid_length(length))
        .ok_or_else(invalid_length)?;

    let word = state
        .source
        .generate_word(length)
        .await
        .map_err(|e| match e {
            OracleError::InvalidLength(_) => invalid_length(),
            other => {
                error!(error = %other, length, "word generation failed");
                ApiError::Upstream("Error generating the word.".to_string())
            }
        })?;

    info!(length, "served word");
    Ok(HttpResponse::Ok().json(GenerateResponse {
        word: word.text().to_string(),
    }))
}

async fn validate_word(
    state: web::Data<AppState>,
    body: web::Json<ValidateRequest>,
) -> Result<HttpResponse, ApiError> {
    let word = body.word.trim().to_lowercase();
    check_candidate(&word).map_err(|_| {
        ApiError::InvalidCandidate(format!(
            "Word must have at least {MIN_WORD_LENGTH} letters."
        ))
    })?;

    let valid = state.validator.is_valid_word(&word).await.map_err(|e| {
        error!(error = %e, "word validation failed");
        ApiError::ValidatorUnavailable("Error validating the word.".to_string())
    })?;

    Ok(HttpResponse::Ok().json(ValidateResponse { valid }))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api")
            .route("/generate-word", web::post().to(generate_word))
            .route("/validate-word", web::post().to(validate_word)),
    );
}
