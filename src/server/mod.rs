//! HTTP service fronting the word oracle
//!
//! Browsers and terminal clients call this service instead of the language
//! model directly, so the API key stays on the server.
//!
//! Routes:
//! - `POST /api/generate-word` `{ "length": 5 }` → `{ "word": "..." }`
//! - `POST /api/validate-word` `{ "word": "..." }` → `{ "valid": bool }`
//! - `GET /health`

mod error;
mod routes;

pub use error::ApiError;
pub use routes::configure_routes;

use crate::oracle::{WordSource, WordValidator};
use actix_cors::Cors;
use actix_web::http::{Uri, header};
use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn WordSource>,
    pub validator: Arc<dyn WordValidator>,
}

/// Listener and CORS settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origins; empty or `*` allows any origin
    pub cors_origins: Vec<String>,
}

/// Register routes plus a JSON extractor config that reports malformed
/// bodies in the API's own error shape
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());
    cfg.app_data(json_config).configure(configure_routes);
}

/// Usable `http(s)://` origins; `None` means any origin is allowed
fn allowed_origins(origins: &[String]) -> Option<Vec<&str>> {
    let entries: Vec<&str> = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty() && *o != "null")
        .collect();
    if entries.contains(&"*") {
        return None;
    }

    let (valid, dropped): (Vec<&str>, Vec<&str>) = entries.into_iter().partition(|o| {
        (o.starts_with("http://") || o.starts_with("https://")) && o.parse::<Uri>().is_ok()
    });
    if !dropped.is_empty() {
        warn!(?dropped, "ignoring malformed CORS origins");
    }
    if valid.is_empty() { None } else { Some(valid) }
}

fn cors(origins: &[String]) -> Cors {
    let Some(origins) = allowed_origins(origins) else {
        return Cors::permissive();
    };

    origins
        .into_iter()
        .fold(Cors::default(), Cors::allowed_origin)
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Serve until SIGINT/SIGTERM
///
/// # Errors
/// Returns an error if the listener cannot bind.
pub async fn run(config: ServerConfig, state: AppState) -> std::io::Result<()> {
    let data = web::Data::new(state);
    let origins = config.cors_origins.clone();

    info!(host = %config.host, port = config.port, "starting word service");

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&origins))
            .app_data(data.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("word service stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::ScriptedOracle;
    use actix_web::test;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    async fn health_with_origin(origins: &[&str], origin: &str) -> (u16, Option<String>) {
        let oracle = Arc::new(ScriptedOracle::new());
        let state = AppState {
            source: oracle.clone(),
            validator: oracle,
        };
        let app = test::init_service(
            App::new()
                .wrap(cors(&strings(origins)))
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, origin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let allowed = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        (resp.status().as_u16(), allowed)
    }

    #[::core::prelude::v1::test]
    fn origin_list_is_filtered() {
        assert_eq!(allowed_origins(&[]), None);
        assert_eq!(allowed_origins(&strings(&["*"])), None);
        assert_eq!(allowed_origins(&strings(&["http://a.test", " * "])), None);
        assert_eq!(allowed_origins(&strings(&["bogus", "null", ""])), None);
        assert_eq!(
            allowed_origins(&strings(&[" http://a.test ", "bogus", "null", "https://b.test"])),
            Some(vec!["http://a.test", "https://b.test"])
        );
    }

    #[actix_web::test]
    async fn wildcard_origin_serves_any_origin() {
        let (status, allowed) = health_with_origin(&["*"], "http://anywhere.test").await;
        assert_eq!(status, 200);
        assert!(allowed.is_some());
    }

    #[actix_web::test]
    async fn malformed_origins_are_skipped() {
        let origins = ["http://a.test", "bogus", "null", "http://bad host"];
        let (status, allowed) = health_with_origin(&origins, "http://a.test").await;
        assert_eq!(status, 200);
        assert_eq!(allowed.as_deref(), Some("http://a.test"));
    }
}
