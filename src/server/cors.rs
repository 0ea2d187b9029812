//! CORS headers attached to every response

use axum::{
    extract::Request,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS,
            VARY,
        },
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const VARY_HEADERS: &str = "Origin, Access-Control-Request-Headers, Access-Control-Request-Method";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const DEFAULT_ALLOW_HEADERS: &str = "Content-Type, Accept, X-Requested-With, Authorization";
pub const MAX_AGE: &str = "86400";

/// Middleware that sets the CORS headers, echoing any requested headers
pub async fn cors(request: Request, next: Next) -> Response {
    let allow_headers = request
        .headers()
        .get(ACCESS_CONTROL_REQUEST_HEADERS)
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOW_HEADERS));

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(VARY, HeaderValue::from_static(VARY_HEADERS));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE));

    response
}
