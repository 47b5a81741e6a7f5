use std::fmt::Display;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, field: &str, value: impl Display) -> Self {
        Self::NotFound(format!("{entity} not found with {field}: {value}"))
    }

    pub fn duplicate(entity: &str, field: &str, value: impl Display) -> Self {
        Self::Conflict(format!("{entity} already exists with {field}: {value}"))
    }
}

/// Maps constraint violations that got past the explicit checks; everything else is a `Db` error.
pub fn db_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => ServiceError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            ServiceError::NotFound("Referenced resource not found".into())
        }
        _ => ServiceError::Db(e.to_string()),
    }
}
