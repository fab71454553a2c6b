//! Cross-origin policy for browser front-ends.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// An allowed origin that is not a valid header value.
#[derive(Debug, thiserror::Error)]
#[error("invalid CORS origin `{0}`")]
pub struct InvalidOrigin(pub String);

/// Build the [`CorsLayer`] admitting exactly `origins`.
///
/// Credentials are allowed, so wildcard origins are never produced.
///
/// # Errors
///
/// Returns [`InvalidOrigin`] for the first entry that cannot be used as a
/// header value.
pub fn layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, InvalidOrigin> {
    let origins = origins
        .iter()
        .map(|origin| {
            let origin = origin.as_ref();
            HeaderValue::from_str(origin).map_err(|_| InvalidOrigin(origin.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_credentials(true)
        .allow_headers(vec![ORIGIN, CONTENT_TYPE, AUTHORIZATION])
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(origins))
}
