use super::todo_service::Operation;
use crate::validation::ValidationFailure;
use kit::FlashLevel;
use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

pub const STORAGE_MESSAGE: &str =
    "Something went wrong while saving your changes. Please try again.";
pub const LOAD_MESSAGE: &str =
    "Something went wrong while loading your to-do items. Please try again.";

/// Why a todo operation did not happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Todo item not found: ID {id}")]
    NotFound { id: i32 },

    #[error("{}", join_failures(.0))]
    Validation(Vec<ValidationFailure>),

    /// Database failure; the message is for logs only
    #[error("storage failure: {0}")]
    Storage(String),
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl TodoError {
    /// What the user is told when `operation` failed, one notification per
    /// message
    pub fn user_messages(&self, operation: Operation) -> Vec<String> {
        match self {
            Self::NotFound { .. } => vec![self.to_string()],
            Self::Validation(failures) => failures.iter().map(ToString::to_string).collect(),
            Self::Storage(_) if operation.is_read() => vec![LOAD_MESSAGE.to_string()],
            Self::Storage(_) => vec![STORAGE_MESSAGE.to_string()],
        }
    }

    pub fn level(&self) -> FlashLevel {
        match self {
            Self::NotFound { .. } => FlashLevel::Warning,
            Self::Validation(_) | Self::Storage(_) => FlashLevel::Error,
        }
    }

    /// HTTP status for a re-rendered form
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 422,
            Self::Storage(_) => 500,
        }
    }
}

impl From<Vec<ValidationFailure>> for TodoError {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self::Validation(failures)
    }
}

impl From<DbErr> for TodoError {
    fn from(e: DbErr) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<TransactionError<TodoError>> for TodoError {
    fn from(e: TransactionError<TodoError>) -> Self {
        match e {
            TransactionError::Connection(e) => e.into(),
            TransactionError::Transaction(e) => e,
        }
    }
}
