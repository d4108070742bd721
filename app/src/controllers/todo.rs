//! Todo pages

use crate::services::{TodoError, TodoService};
use crate::validation::field_errors;
use crate::views;
use kit::tera::Context;
use kit::{App, FrameworkError, Redirect, Request, Response, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Submitted add/edit form
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TodoForm {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn todos() -> Result<TodoService, FrameworkError> {
    App::resolve::<TodoService>()
}

fn back_to_list() -> Response {
    Redirect::route("todos.index", &[])?.into()
}

/// Re-render after a failed save
fn failed_form(id: Option<i32>, form: &TodoForm, err: &TodoError) -> Response {
    let errors = match err {
        TodoError::Validation(failures) => field_errors(failures),
        _ => ValidationErrors::new(),
    };
    form_page(id, form, &errors, err.status_code())
}

/// Add or edit form; `id` is set when editing
fn form_page(id: Option<i32>, form: &TodoForm, errors: &ValidationErrors, status: u16) -> Response {
    let mut context = Context::new();
    context.insert("todo_id", &id);
    context.insert("form", form);
    context.insert("errors", &errors.errors);

    let page = views::view()?.response("form.html", &context)?;
    Ok(page.status(status))
}

pub async fn index(_req: Request) -> Response {
    let todos = todos()?.list().await;

    let mut context = Context::new();
    context.insert("todos", &todos);
    Ok(views::view()?.response("index.html", &context)?)
}

pub async fn create(_req: Request) -> Response {
    form_page(None, &TodoForm::default(), &ValidationErrors::new(), 200)
}

pub async fn store(req: Request) -> Response {
    let form: TodoForm = req.form()?;

    match todos()?.add(&form.task, form.description.as_deref()).await {
        Ok(_) => back_to_list(),
        Err(err) => failed_form(None, &form, &err),
    }
}

pub async fn edit(req: Request) -> Response {
    let id: i32 = req.param_as("id")?;

    match todos()?.get_by_id(id).await {
        Some(todo) => {
            let form = TodoForm {
                task: todo.task,
                description: todo.description,
            };
            form_page(Some(id), &form, &ValidationErrors::new(), 200)
        }
        None => back_to_list(),
    }
}

pub async fn update(req: Request) -> Response {
    let id: i32 = req.param_as("id")?;
    let form: TodoForm = req.form()?;

    match todos()?
        .edit(id, &form.task, form.description.as_deref())
        .await
    {
        Ok(_) | Err(TodoError::NotFound { .. }) => back_to_list(),
        Err(err) => failed_form(Some(id), &form, &err),
    }
}

pub async fn destroy(req: Request) -> Response {
    let id: i32 = req.param_as("id")?;

    if let Err(err) = todos()?.delete(id).await {
        tracing::debug!(id, error = %err, "nothing deleted, notification already queued");
    }
    back_to_list()
}

