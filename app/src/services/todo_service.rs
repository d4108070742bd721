//! Todo CRUD
//!
//! Operations never fail past this boundary in a way the caller has to
//! unwind: every failure is logged, turned into notifications and handed
//! back as a `TodoError` value (or an empty result for reads).

use super::error::TodoError;
use super::notifier::Notifier;
use crate::models::todos;
use crate::validation::TodoInput;
use kit::DbConnection;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionTrait};
use std::sync::Arc;

/// Service operation, for logs and notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Add,
    GetById,
    Edit,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add => "add",
            Self::GetById => "get_by_id",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// Reads change nothing, so their failures are not about saving
    pub fn is_read(&self) -> bool {
        matches!(self, Self::List | Self::GetById)
    }
}

#[derive(Clone)]
pub struct TodoService {
    db: DbConnection,
    notifier: Arc<dyn Notifier>,
}

impl TodoService {
    pub fn new(db: DbConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Every record, oldest first; empty if the store cannot be read
    pub async fn list(&self) -> Vec<todos::Model> {
        let result = todos::Entity::find()
            .order_by_asc(todos::Column::Id)
            .all(self.db.inner())
            .await
            .map_err(TodoError::from);

        self.finish(Operation::List, None, result).unwrap_or_default()
    }

    /// Validate and insert, returning the stored record with its new id
    pub async fn add(
        &self,
        task: &str,
        description: Option<&str>,
    ) -> Result<todos::Model, TodoError> {
        let input = TodoInput::new(task, description);

        let result = match input.check() {
            Err(failures) => Err(TodoError::Validation(failures)),
            Ok(()) => self
                .db
                .inner()
                .transaction::<_, todos::Model, TodoError>(|txn| {
                    Box::pin(async move {
                        let todo = todos::ActiveModel::from_input(input).insert(txn).await?;
                        Ok(todo)
                    })
                })
                .await
                .map_err(TodoError::from),
        };

        if let Ok(todo) = &result {
            tracing::info!(id = todo.id, "todo added");
        }
        self.finish(Operation::Add, None, result)
    }

    /// The record with `id`, if there is one
    pub async fn get_by_id(&self, id: i32) -> Option<todos::Model> {
        let result = match todos::Entity::find_by_id(id).one(self.db.inner()).await {
            Ok(Some(todo)) => Ok(todo),
            Ok(None) => Err(TodoError::NotFound { id }),
            Err(e) => Err(e.into()),
        };

        self.finish(Operation::GetById, Some(id), result).ok()
    }

    /// Replace task and description of an existing record
    ///
    /// The lookup, the checks and the update share one transaction; on any
    /// failure the record is left as it was.
    pub async fn edit(
        &self,
        id: i32,
        task: &str,
        description: Option<&str>,
    ) -> Result<todos::Model, TodoError> {
        let input = TodoInput::new(task, description);

        let result = self
            .db
            .inner()
            .transaction::<_, todos::Model, TodoError>(move |txn| {
                Box::pin(async move {
                    let existing = todos::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or(TodoError::NotFound { id })?;
                    input.check()?;

                    let mut todo: todos::ActiveModel = existing.into();
                    todo.task = Set(input.task);
                    todo.description = Set(input.description);
                    Ok(todo.update(txn).await?)
                })
            })
            .await
            .map_err(TodoError::from);

        if result.is_ok() {
            tracing::info!(id, "todo updated");
        }
        self.finish(Operation::Edit, Some(id), result)
    }

    /// Remove exactly the record with `id`
    pub async fn delete(&self, id: i32) -> Result<(), TodoError> {
        let result = match todos::Entity::delete_by_id(id).exec(self.db.inner()).await {
            Ok(deleted) if deleted.rows_affected == 0 => Err(TodoError::NotFound { id }),
            Ok(_) => Ok(()),
            Err(e) => Err(e.into()),
        };

        if result.is_ok() {
            tracing::info!(id, "todo deleted");
        }
        self.finish(Operation::Delete, Some(id), result)
    }

    /// Log and notify a failed operation
    fn finish<T>(
        &self,
        operation: Operation,
        id: Option<i32>,
        result: Result<T, TodoError>,
    ) -> Result<T, TodoError> {
        if let Err(err) = &result {
            let operation_name = operation.as_str();
            match err {
                TodoError::Storage(_) => {
                    tracing::error!(operation = operation_name, ?id, error = %err, "todo operation failed")
                }
                TodoError::NotFound { .. } | TodoError::Validation(_) => {
                    tracing::warn!(operation = operation_name, ?id, error = %err, "todo operation rejected")
                }
            }

            let level = err.level();
            for message in err.user_messages(operation) {
                self.notifier.notify(level, &message);
            }
        }
        result
    }
}
