//! Framework-wide error types
//!
//! `FrameworkError` is what handlers, the container and the database layer
//! return. It converts into an `HttpResponse` so controllers can use `?`.

use std::collections::BTreeMap;
use thiserror::Error;

/// Field validation errors
///
/// Maps field names to one or more messages. A `BTreeMap` keeps the field
/// order stable when the errors are rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error for a specific field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for a field, empty if the field is valid
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Convert from the validator crate's errors
    ///
    /// Falls back to a generic message when a rule carries no message.
    pub fn from_validator(errors: &validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
                result.add(field.to_string(), message);
            }
        }
        result
    }

    /// Every message, in field order
    pub fn messages(&self) -> Vec<String> {
        self.errors.values().flatten().cloned().collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Framework-wide error type
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Service not found in the container
    #[error("Service '{type_name}' not registered in container")]
    ServiceNotFound { type_name: &'static str },

    /// Missing route parameter
    #[error("Missing required parameter: {param_name}")]
    ParamError { param_name: String },

    /// Route parameter present but not parseable (400)
    #[error("Invalid parameter '{param}': expected {expected_type}")]
    ParamParse {
        param: String,
        expected_type: &'static str,
    },

    /// Request body could not be read or decoded (400)
    #[error("Malformed request body: {0}")]
    BadRequest(String),

    /// Request body exceeded `ServerConfig::max_body_size` (413)
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Form validation errors (422)
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    View(String),

    /// Generic internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl FrameworkError {
    pub fn service_not_found<T: ?Sized>() -> Self {
        Self::ServiceNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    pub fn param_parse(param: impl Into<String>, expected_type: &'static str) -> Self {
        Self::ParamParse {
            param: param.into(),
            expected_type,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn view(message: impl Into<String>) -> Self {
        Self::View(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ServiceNotFound { .. } => 500,
            Self::ParamError { .. } => 400,
            Self::ParamParse { .. } => 400,
            Self::BadRequest(_) => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Validation(_) => 422,
            Self::Database(_) => 500,
            Self::View(_) => 500,
            Self::Internal { .. } => 500,
        }
    }

    /// Whether the error is the server's fault rather than the client's
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<sea_orm::DbErr> for FrameworkError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<tera::Error> for FrameworkError {
    fn from(e: tera::Error) -> Self {
        // tera nests the useful part of the message in the source chain
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Self::View(message)
    }
}
