//! Static security headers for the API surface. HSTS is only meaningful
//! behind TLS, so it is attached in production alone.

use std::env;

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const XSS_BLOCK: &str = "1; mode=block";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

fn hsts_enabled() -> bool {
    let production = env::var("RUST_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    if production {
        tracing::info!("Security: HSTS header enabled (production mode)");
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }
    production
}

fn set_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

pub fn with_security_headers(router: Router) -> Router {
    let router = router
        .layer(set_header(header::X_CONTENT_TYPE_OPTIONS, NOSNIFF))
        .layer(set_header(header::X_FRAME_OPTIONS, DENY))
        .layer(set_header(header::X_XSS_PROTECTION, XSS_BLOCK))
        .layer(set_header(header::CONTENT_SECURITY_POLICY, CSP_API_VALUE))
        .layer(set_header(header::REFERRER_POLICY, REFERRER_POLICY_VALUE))
        .layer(set_header(
            HeaderName::from_static("permissions-policy"),
            PERMISSIONS_POLICY_VALUE,
        ));

    if hsts_enabled() {
        router.layer(set_header(header::STRICT_TRANSPORT_SECURITY, HSTS_VALUE))
    } else {
        router
    }
}
