//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use chicadish_core::config::CorsConfig;

const WILDCARD: &str = "*";

/// Builds a CORS tower layer from configuration.
///
/// Credentials are only allowed when origins, methods, and headers are all
/// explicit lists; browsers reject credentialed wildcard responses.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();
    let mut wildcard = false;

    // Origins
    if is_wildcard(&config.allowed_origins) {
        wildcard = true;
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    // Methods
    if is_wildcard(&config.allowed_methods) {
        wildcard = true;
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        layer = layer.allow_methods(methods);
    }

    // Headers
    if is_wildcard(&config.allowed_headers) {
        wildcard = true;
        layer = layer.allow_headers(Any);
    } else {
        layer = layer.allow_headers(header_names(&config.allowed_headers));
    }

    layer = layer.expose_headers(header_names(&config.exposed_headers));

    if config.allow_credentials {
        if wildcard {
            warn!("CORS credentials disabled because a wildcard is configured");
        } else {
            layer = layer.allow_credentials(true);
        }
    }

    layer.max_age(Duration::from_secs(config.max_age_seconds))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == WILDCARD)
}

fn header_names(values: &[String]) -> Vec<HeaderName> {
    values.iter().filter_map(|h| h.parse().ok()).collect()
}
