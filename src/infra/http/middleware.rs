use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{error, warn};

use crate::application::error::ErrorReport;

/// Logs every 4xx/5xx response together with the [`ErrorReport`] the
/// handler attached, if any. Successful responses pass through silently.
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let mut response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let report = response.extensions_mut().remove::<ErrorReport>();
    let source = report.as_ref().map_or("unreported", |report| report.source);
    let chain = report.map(|report| report.messages).unwrap_or_default();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        error!(
            target = "brochure::http::response",
            status = status.as_u16(),
            %method,
            %path,
            elapsed_ms,
            source,
            ?chain,
            "request failed"
        );
    } else {
        warn!(
            target = "brochure::http::response",
            status = status.as_u16(),
            %method,
            %path,
            elapsed_ms,
            source,
            ?chain,
            "request rejected"
        );
    }

    response
}
