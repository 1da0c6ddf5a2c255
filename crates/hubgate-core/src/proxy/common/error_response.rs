//! Rendering of [`GatewayError`] as HTTP responses.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use hubgate_types::GatewayError;

use super::header_constants::{ERROR_DIAGNOSTIC, ERROR_DIAGNOSTIC_NAME};

/// Plain-text response carrying the error's status code.
///
/// Length mismatches get the short `bad length` body plus a diagnostic header
/// that browsers are allowed to read.
pub fn error_response(err: &GatewayError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match err {
        GatewayError::LengthMismatch { .. } => {
            let mut response = (status, "bad length").into_response();
            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&err.to_string()) {
                headers.insert(ERROR_DIAGNOSTIC, value);
            }
            headers.insert(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                HeaderValue::from_static(ERROR_DIAGNOSTIC_NAME),
            );
            response
        },
        _ => (status, err.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_response() {
        let response = error_response(&GatewayError::LengthMismatch {
            expected: "100".to_string(),
            actual: "42".to_string(),
        });

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["--error"], "bad len: 42, expect: 100");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_EXPOSE_HEADERS], "--error");
    }

    #[test]
    fn test_upstream_error_is_bad_gateway() {
        let response = error_response(&GatewayError::UpstreamUnreachable {
            upstream: "ghcr.io".to_string(),
            message: "dns error".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_blocked_user_agent_is_forbidden() {
        let response =
            error_response(&GatewayError::BlockedUserAgent { user_agent: "netcraft".to_string() });
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
