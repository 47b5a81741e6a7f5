//! Uniform error responses shared by both services.
//!
//! Handlers return [`ApiError`]; the [`render_errors`] middleware turns every 4xx/5xx
//! response leaving a router into an [`ErrorBody`] that carries the request path. Responses
//! produced by axum itself (extractor rejections, 405s) arrive as plain text and are
//! wrapped the same way.

use std::collections::BTreeMap;

use axum::{
    extract::Request,
    http::{header, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use crate::types::ErrorBody;

const REJECTION_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), errors: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 400 carrying a field -> message map.
    pub fn validation(message: impl Into<String>, errors: BTreeMap<String, String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn body(&self, path: &str) -> ErrorBody {
        ErrorBody {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: self.status.as_u16(),
            error: self.status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message.clone(),
            path: path.to_string(),
            errors: self.errors.clone(),
        }
    }

    fn render(self, path: &str) -> Response {
        let body = self.body(path);
        let mut res = (self.status, Json(body)).into_response();
        res.extensions_mut().insert(self);
        res
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // path is filled in by `render_errors`
        self.render("")
    }
}

/// Rewrites every error response into the uniform body and logs it.
pub async fn render_errors(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let res = next.run(req).await;
    let status = res.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return res;
    }

    let err = match res.extensions().get::<ApiError>().cloned() {
        Some(err) => err,
        None => from_rejection(res).await,
    };

    if err.status.is_server_error() {
        tracing::error!(%method, %path, status = err.status.as_u16(), message = %err.message, "request failed");
    } else {
        tracing::warn!(%method, %path, status = err.status.as_u16(), message = %err.message, "request rejected");
    }
    err.render(&path)
}

async fn from_rejection(res: Response) -> ApiError {
    let status = match res.status() {
        StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
        s => s,
    };
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let bytes = axum::body::to_bytes(res.into_body(), REJECTION_BODY_LIMIT)
        .await
        .unwrap_or_default();

    let message = if is_json {
        serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|b| b.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).trim().to_string())
    } else {
        String::from_utf8_lossy(&bytes).trim().to_string()
    };
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("Error").to_string()
    } else {
        message
    };
    ApiError::new(status, message)
}

/// Router fallback for unknown paths.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No handler found for {}", uri.path()))
}
