use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Field-level failures, keyed by field name.
    #[error("{message}")]
    InvalidFields {
        message: String,
        errors: BTreeMap<String, String>,
    },
}

/// Collects per-field messages; the first message recorded for a field wins.
#[derive(Debug, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn into_result(self, message: &str) -> Result<(), ModelError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ModelError::InvalidFields { message: message.to_string(), errors: self.0 })
        }
    }
}
