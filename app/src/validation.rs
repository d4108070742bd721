//! Field limits for todo records
//!
//! Checked by the service before it touches the store and again by the
//! model's save hook. Lengths count characters, not bytes.

use kit::ValidationErrors;
use serde::Serialize;
use std::fmt;
use validator::{Validate, ValidationError};

pub const TASK_MAX_LENGTH: usize = 32;
pub const DESCRIPTION_MAX_LENGTH: usize = 256;

/// Why a candidate record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationFailure {
    EmptyTask,
    TaskTooLong { length: usize },
    DescriptionTooLong { length: usize },
}

impl ValidationFailure {
    /// Form field the failure belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTask | Self::TaskTooLong { .. } => "task",
            Self::DescriptionTooLong { .. } => "description",
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTask => write!(f, "Task is required."),
            Self::TaskTooLong { .. } => {
                write!(f, "Task must be at most {} characters.", TASK_MAX_LENGTH)
            }
            Self::DescriptionTooLong { .. } => write!(
                f,
                "Description must be at most {} characters.",
                DESCRIPTION_MAX_LENGTH
            ),
        }
    }
}

/// Whitespace alone does not count as a task
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Candidate values for a todo
///
/// A valid task is stored as typed, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct TodoInput {
    #[validate(length(min = 1, max = 32), custom(function = "not_blank"))]
    pub task: String,
    #[validate(length(max = 256))]
    pub description: Option<String>,
}

impl TodoInput {
    /// A blank description means "no description"
    pub fn new(task: &str, description: Option<&str>) -> Self {
        Self {
            task: task.to_string(),
            description: description
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        }
    }

    /// Every failure, task before description
    pub fn failures(&self) -> Vec<ValidationFailure> {
        let errors = match self.validate() {
            Ok(()) => return Vec::new(),
            Err(errors) => ValidationErrors::from_validator(&errors),
        };

        let mut failures = Vec::new();
        if !errors.get("task").is_empty() {
            let length = self.task.chars().count();
            failures.push(if self.task.trim().is_empty() {
                ValidationFailure::EmptyTask
            } else {
                ValidationFailure::TaskTooLong { length }
            });
        }
        if !errors.get("description").is_empty() {
            let length = self
                .description
                .as_deref()
                .map(|d| d.chars().count())
                .unwrap_or_default();
            failures.push(ValidationFailure::DescriptionTooLong { length });
        }
        failures
    }

    /// `Ok(())` or every failure
    pub fn check(&self) -> Result<(), Vec<ValidationFailure>> {
        let failures = self.failures();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

/// Messages keyed by form field, for rendering next to the inputs
pub fn field_errors(failures: &[ValidationFailure]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for failure in failures {
        errors.add(failure.field(), failure.to_string());
    }
    errors
}
