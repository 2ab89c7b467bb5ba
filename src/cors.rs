//! Cross-origin request settings for browser front-ends.

use axum::http::{
    HeaderValue, Method,
    header::{CONTENT_TYPE, InvalidHeaderValue},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// The origins allowed when none are given on the command line, i.e. the
/// local development servers of the front-end.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

/// Build a CORS layer that lets `origins` call the JSON API.
///
/// # Errors
/// Returns an error if an origin is not a valid header value.
pub fn cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}
