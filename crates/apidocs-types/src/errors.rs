use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsError {
    InvalidServerUrl(String),
    MalformedForwardedHost(String),
    NoFallbackSecurityScheme(String),
    SocketBindError(String),
    SwaggerUiError(String),
}

impl Error for DocsError {}

impl Display for DocsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DocsError::InvalidServerUrl(msg) => write!(f, "Failed to parse server url: [{msg}]"),
            DocsError::MalformedForwardedHost(msg) => {
                write!(f, "Could not parse host from X-Forwarded-Host: {msg}")
            }
            DocsError::NoFallbackSecurityScheme(kind) => write!(
                f,
                "No security descriptor of kind {kind} and no Basic descriptor to fall back to"
            ),
            DocsError::SocketBindError(msg) => {
                write!(f, "Failed to configure listening socket {msg}")
            }
            DocsError::SwaggerUiError(msg) => write!(f, "Failed to serve Swagger UI: {msg}"),
        }
    }
}

impl IntoResponse for DocsError {
    fn into_response(self) -> Response {
        match &self {
            DocsError::MalformedForwardedHost(reason) => Response::builder()
                .status(self.status_code())
                .body(Body::from(
                    json!({
                        "explanation": format!("Malformed X-Forwarded-Host header: {reason}")
                    })
                    .to_string(),
                )),
            DocsError::NoFallbackSecurityScheme(_) => Response::builder()
                .status(self.status_code())
                .body(Body::from(
                    json!({
                        "explanation": self.to_string()
                    })
                    .to_string(),
                )),
            DocsError::InvalidServerUrl(_)
            | DocsError::SocketBindError(_)
            | DocsError::SwaggerUiError(_) => Response::builder()
                .status(self.status_code())
                .body(Body::empty()),
        }
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

impl DocsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DocsError::InvalidServerUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DocsError::MalformedForwardedHost(_) => StatusCode::BAD_REQUEST,
            DocsError::NoFallbackSecurityScheme(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DocsError::SocketBindError(_) => StatusCode::SERVICE_UNAVAILABLE,
            DocsError::SwaggerUiError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DocsError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use test_case::test_case;

    #[test_case(DocsError::MalformedForwardedHost("empty host".into()), StatusCode::BAD_REQUEST; "malformed forwarded host is a client error")]
    #[test_case(DocsError::NoFallbackSecurityScheme("OAuth".into()), StatusCode::INTERNAL_SERVER_ERROR; "missing fallback is a server error")]
    #[test_case(DocsError::SocketBindError("in use".into()), StatusCode::SERVICE_UNAVAILABLE; "bind failure")]
    #[test_case(DocsError::SwaggerUiError("broken archive".into()), StatusCode::INTERNAL_SERVER_ERROR; "swagger ui failure")]
    #[test_case(DocsError::InvalidServerUrl("no port".into()), StatusCode::INTERNAL_SERVER_ERROR; "invalid server url")]
    fn errors_map_to_status_codes(error: DocsError, expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn missing_fallback_names_requested_kind() {
        let message = DocsError::NoFallbackSecurityScheme("OAuth".into()).to_string();
        assert!(message.contains("OAuth"));
        assert!(message.contains("Basic"));
    }
}
