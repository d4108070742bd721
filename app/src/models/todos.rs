//! Todos model
//!
//! The entity lives in `entities::todos`; behaviour is added here.

pub use super::entities::todos::*;

use crate::validation::{TodoInput, ValidationFailure};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

/// Saving re-checks the field limits, so a record that bypassed the
/// service layer still cannot be persisted in an invalid state.
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let (task, task_present) = match &self.task {
            ActiveValue::Set(task) | ActiveValue::Unchanged(task) => (task.clone(), true),
            ActiveValue::NotSet => (String::new(), insert),
        };
        let description = match &self.description {
            ActiveValue::Set(d) | ActiveValue::Unchanged(d) => d.clone(),
            ActiveValue::NotSet => None,
        };

        let mut failures = TodoInput { task, description }.failures();
        if !task_present {
            failures.retain(|f| !matches!(f, ValidationFailure::EmptyTask));
        }

        if failures.is_empty() {
            Ok(self)
        } else {
            let messages: Vec<String> = failures.iter().map(ToString::to_string).collect();
            Err(DbErr::Custom(format!(
                "invalid to_do record: {}",
                messages.join(" ")
            )))
        }
    }
}

impl ActiveModel {
    /// New record from already-checked input
    pub fn from_input(input: TodoInput) -> Self {
        Self {
            task: ActiveValue::Set(input.task),
            description: ActiveValue::Set(input.description),
            ..Default::default()
        }
    }
}
