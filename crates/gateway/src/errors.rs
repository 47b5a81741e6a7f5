//! Errors raised while talking to the data service, and how they surface to callers.
//!
//! Status translation for data-service responses:
//!
//! | data service          | business error        | status returned |
//! |-----------------------|-----------------------|-----------------|
//! | 404                   | `NotFound`            | 404             |
//! | 400                   | `BadRequest`          | 400             |
//! | 503 and any other 5xx | `ServiceUnavailable`  | 503             |
//! | any other 4xx         | `DataService`         | same status     |
//! | connect/timeout       | `ServiceUnavailable`  | 503             |
//! | undecodable body      | `Decode`              | 500             |

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{http::ApiError, observability::DATA_SERVICE_ERRORS_TOTAL, types::ErrorBody};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Option<BTreeMap<String, String>>,
    },
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("data service error ({status}): {message}")]
    DataService { status: StatusCode, message: String },
    #[error("failed to decode data service response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into(), errors: None }
    }

    /// 400 with a single field error.
    pub fn invalid_field(message: &str, field: &str, reason: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), reason.to_string());
        Self::BadRequest { message: message.to_string(), errors: Some(errors) }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::DataService { status, .. } => *status,
            Self::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn metric_kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest { .. } => "bad_request",
            Self::ServiceUnavailable(_) => "unavailable",
            Self::DataService { .. } => "data_service",
            Self::Decode(_) => "decode",
        }
    }
}

/// Translates a non-success data-service response.
pub fn from_status(status: StatusCode, body: &[u8], url: &str) -> GatewayError {
    let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
    let raw = String::from_utf8_lossy(body).trim().to_string();
    let detail = parsed
        .as_ref()
        .map(|b| b.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| raw.clone());

    if status.is_server_error() {
        error!(%url, status = status.as_u16(), body = %raw, "data service call failed");
    } else {
        warn!(%url, status = status.as_u16(), message = %detail, "data service rejected call");
    }

    let err = match status {
        StatusCode::NOT_FOUND => GatewayError::NotFound(if detail.is_empty() {
            format!("Resource not found in data service: {url}")
        } else {
            detail
        }),
        StatusCode::BAD_REQUEST => GatewayError::BadRequest {
            message: if detail.is_empty() {
                "Invalid request to data service".to_string()
            } else {
                detail
            },
            errors: parsed.and_then(|b| b.errors),
        },
        StatusCode::SERVICE_UNAVAILABLE => {
            GatewayError::ServiceUnavailable(format!("Data service unavailable: {url}"))
        }
        s if s.is_server_error() => GatewayError::ServiceUnavailable(format!(
            "Data service error: {} - {url}",
            s.as_u16()
        )),
        s if s.is_client_error() => GatewayError::DataService { status: s, message: detail },
        s => GatewayError::DataService {
            status: StatusCode::BAD_GATEWAY,
            message: format!("Unexpected data service status {}", s.as_u16()),
        },
    };
    record(&err);
    err
}

/// Connect failures, timeouts and broken bodies.
pub fn from_transport(e: reqwest::Error, url: &str) -> GatewayError {
    warn!(%url, error = %e, timeout = e.is_timeout(), "data service unreachable");
    let err = GatewayError::ServiceUnavailable(format!("Data service unavailable: {url}"));
    DATA_SERVICE_ERRORS_TOTAL.with_label_values(&["transport"]).inc();
    err
}

pub fn record(err: &GatewayError) {
    DATA_SERVICE_ERRORS_TOTAL.with_label_values(&[err.metric_kind()]).inc();
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        let status = e.status();
        match e {
            GatewayError::BadRequest { message, errors } => ApiError {
                status,
                message,
                errors,
            },
            GatewayError::Decode(msg) => {
                error!(error = %msg, "undecodable data service response");
                ApiError::internal("Unexpected response from data service")
            }
            other => ApiError::new(status, other.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://data/data/products/1";

    fn body(status: u16, message: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "timestamp": "2024-01-01T00:00:00.000Z",
            "status": status,
            "error": "x",
            "message": message,
            "path": "/data/products/1"
        }))
        .unwrap()
    }

    #[test]
    fn not_found_keeps_upstream_message() {
        let e = from_status(StatusCode::NOT_FOUND, &body(404, "Product not found with id: 1"), URL);
        assert!(matches!(&e, GatewayError::NotFound(m) if m == "Product not found with id: 1"));
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_forwards_field_errors() {
        let raw = serde_json::to_vec(&serde_json::json!({
            "timestamp": "t", "status": 400, "error": "Bad Request",
            "message": "Product validation failed", "path": "/data/products",
            "errors": {"price": "Product price must be positive"}
        }))
        .unwrap();
        match from_status(StatusCode::BAD_REQUEST, &raw, URL) {
            GatewayError::BadRequest { message, errors } => {
                assert_eq!(message, "Product validation failed");
                assert!(errors.unwrap().contains_key("price"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn server_errors_become_unavailable() {
        for code in [500u16, 502, 503, 504] {
            let s = StatusCode::from_u16(code).unwrap();
            let e = from_status(s, b"", URL);
            assert_eq!(e.status(), StatusCode::SERVICE_UNAVAILABLE, "status {code}");
        }
    }

    #[test]
    fn other_client_errors_keep_status() {
        let e = from_status(StatusCode::CONFLICT, &body(409, "Category already exists"), URL);
        assert_eq!(e.status(), StatusCode::CONFLICT);
        let api = ApiError::from(e);
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert!(api.message.contains("Category already exists"));
    }

    #[test]
    fn plain_text_bodies_are_used_verbatim() {
        let e = from_status(StatusCode::NOT_FOUND, b"nothing here", URL);
        assert!(matches!(e, GatewayError::NotFound(m) if m == "nothing here"));
        let e = from_status(StatusCode::NOT_FOUND, b"", URL);
        assert!(matches!(e, GatewayError::NotFound(m) if m.contains(URL)));
    }

    #[test]
    fn decode_errors_are_internal() {
        let api = ApiError::from(GatewayError::Decode("expected value".into()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
