use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::{HeaderMap, HeaderName, HeaderValue, header};
use tracing::trace;

const FORWARDED_HEADERS: [&str; 3] = ["x-forwarded-host", "x-forwarded-proto", "x-forwarded-prefix"];

pub async fn log_request_middleware(req: Request, next: Next) -> Response {
    let uri = req.uri().clone();
    let method = req.method().clone();
    trace!(
        "Request: uri=[{}], method=[{}], forwarded=[{}], headers=[{:?}]",
        uri,
        method,
        forwarded_summary(req.headers()),
        redacted_headers(req.headers())
    );
    let response = next.run(req).await;
    trace!(
        "Response: uri=[{}], method=[{}], status=[{}]",
        uri,
        method,
        response.status()
    );
    response
}

pub fn redacted_headers(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    let authorization = match headers.get(header::AUTHORIZATION) {
        Some(value) if value.is_empty() => HeaderValue::from_static("AuthorizationEmpty"),
        Some(_) => HeaderValue::from_static("***redacted***"),
        None => HeaderValue::from_static("No authorization header"),
    };
    headers.insert(header::AUTHORIZATION, authorization);
    headers
}

fn forwarded_summary(headers: &HeaderMap) -> String {
    FORWARDED_HEADERS
        .iter()
        .map(|&name| {
            let value = headers
                .get(HeaderName::from_static(name))
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            format!("{name}={value}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
