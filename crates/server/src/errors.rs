use axum::response::{IntoResponse, Response};
use common::http::ApiError;
use models::errors::ModelError;
use service::errors::ServiceError;

/// Handler error for the data service; renders through [`ApiError`].
#[derive(Debug)]
pub struct JsonApiError(pub ApiError);

impl From<ApiError> for JsonApiError {
    fn from(e: ApiError) -> Self { Self(e) }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let api = match e {
            ServiceError::Validation(msg) => ApiError::bad_request(msg),
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Conflict(msg) => ApiError::conflict(msg),
            ServiceError::Model(ModelError::InvalidFields { message, errors }) => {
                ApiError::validation(message, errors)
            }
            ServiceError::Db(msg) => {
                tracing::error!(error = %msg, "database error");
                ApiError::internal("An unexpected error occurred")
            }
        };
        Self(api)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::collections::BTreeMap;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).0.status, status);
        }
    }

    #[test]
    fn field_errors_are_kept() {
        let mut errors = BTreeMap::new();
        errors.insert("price".to_string(), "Product price must be positive".to_string());
        let e = JsonApiError::from(ServiceError::Model(ModelError::InvalidFields {
            message: "Product validation failed".into(),
            errors,
        }));
        assert_eq!(e.0.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.0.message, "Product validation failed");
        assert!(e.0.errors.unwrap().contains_key("price"));
    }

    #[test]
    fn db_details_are_not_leaked() {
        let e = JsonApiError::from(ServiceError::Db("connection refused at 10.0.0.1".into()));
        assert!(!e.0.message.contains("10.0.0.1"));
    }
}
