use kit::expect;
use kit::testing::TestDatabase;
use pretty_assertions::assert_eq;
use sea_orm::ConnectionTrait;
use std::sync::Arc;
use todo_app::migrations::Migrator;
use todo_app::services::error::{LOAD_MESSAGE, STORAGE_MESSAGE};
use todo_app::services::{MemoryNotifier, TodoError, TodoService};
use todo_app::validation::ValidationFailure;

struct Fixture {
    db: TestDatabase,
    notifier: Arc<MemoryNotifier>,
    todos: TodoService,
}

async fn fixture() -> Fixture {
    let db = TestDatabase::fresh::<Migrator>().await.expect("test db");
    let notifier = Arc::new(MemoryNotifier::default());
    let todos = TodoService::new(db.connection(), notifier.clone());
    Fixture {
        db,
        notifier,
        todos,
    }
}

#[tokio::test]
async fn add_then_list_returns_the_record_with_a_fresh_id() {
    let f = fixture().await;

    let first = f.todos.add("Buy milk", Some("2 litres")).await.unwrap();
    let second = f.todos.add("Walk dog", None).await.unwrap();

    expect!(second.id > first.id).to_be_true();

    let listed = f.todos.list().await;
    assert_eq!(listed, vec![first.clone(), second]);
    assert_eq!(listed[0].task, "Buy milk");
    assert_eq!(listed[0].description.as_deref(), Some("2 litres"));
}

#[tokio::test]
async fn add_round_trips_through_get_by_id() {
    let f = fixture().await;

    let added = f.todos.add("Pay rent", Some("before Friday")).await.unwrap();
    let found = f.todos.get_by_id(added.id).await.expect("stored record");

    assert_eq!(found.task, "Pay rent");
    assert_eq!(found.description.as_deref(), Some("before Friday"));
}

#[tokio::test]
async fn blank_description_is_stored_as_null() {
    let f = fixture().await;

    let added = f.todos.add("Call mum", Some("")).await.unwrap();
    expect!(added.description).to_be_none();
}

#[tokio::test]
async fn add_with_empty_task_is_rejected() {
    let f = fixture().await;

    let result = f.todos.add("", Some("no task")).await;

    assert_eq!(
        result,
        Err(TodoError::Validation(vec![ValidationFailure::EmptyTask]))
    );
    expect!(f.todos.list().await).to_be_empty();
    assert_eq!(f.notifier.texts(), vec!["Task is required.".to_string()]);
}

#[tokio::test]
async fn add_with_whitespace_only_task_is_rejected() {
    let f = fixture().await;

    let result = f.todos.add("   ", None).await;

    assert_eq!(
        result,
        Err(TodoError::Validation(vec![ValidationFailure::EmptyTask]))
    );
    expect!(f.todos.list().await).to_be_empty();
    assert_eq!(f.notifier.texts(), vec!["Task is required.".to_string()]);
}

#[tokio::test]
async fn edit_to_whitespace_only_task_keeps_the_original() {
    let f = fixture().await;
    let added = f.todos.add("Buy milk", None).await.unwrap();

    let result = f.todos.edit(added.id, "\t  ", None).await;

    assert_eq!(
        result,
        Err(TodoError::Validation(vec![ValidationFailure::EmptyTask]))
    );
    assert_eq!(f.todos.get_by_id(added.id).await, Some(added));
}

#[tokio::test]
async fn add_with_over_long_fields_reports_both() {
    let f = fixture().await;

    let result = f
        .todos
        .add(&"t".repeat(33), Some(&"d".repeat(257)))
        .await;

    assert_eq!(
        result,
        Err(TodoError::Validation(vec![
            ValidationFailure::TaskTooLong { length: 33 },
            ValidationFailure::DescriptionTooLong { length: 257 },
        ]))
    );
    expect!(f.todos.list().await).to_be_empty();
    assert_eq!(
        f.notifier.texts(),
        vec![
            "Task must be at most 32 characters.".to_string(),
            "Description must be at most 256 characters.".to_string(),
        ]
    );
}

#[tokio::test]
async fn edit_updates_in_place() {
    let f = fixture().await;
    let added = f.todos.add("Buy milk", None).await.unwrap();

    let edited = f
        .todos
        .edit(added.id, "Buy oat milk", Some("the barista one"))
        .await
        .unwrap();

    assert_eq!(edited.id, added.id);
    assert_eq!(f.todos.list().await, vec![edited]);
}

#[tokio::test]
async fn edit_of_missing_id_reports_not_found_and_changes_nothing() {
    let f = fixture().await;
    let added = f.todos.add("Buy milk", None).await.unwrap();

    let result = f.todos.edit(added.id + 100, "Other", None).await;

    assert_eq!(result, Err(TodoError::NotFound { id: added.id + 100 }));
    assert_eq!(f.todos.list().await, vec![added.clone()]);
    assert_eq!(
        f.notifier.texts(),
        vec![format!("Todo item not found: ID {}", added.id + 100)]
    );
}

#[tokio::test]
async fn edit_with_33_character_task_keeps_the_original() {
    let f = fixture().await;
    let added = f.todos.add("Buy milk", Some("2 litres")).await.unwrap();

    let result = f.todos.edit(added.id, &"x".repeat(33), None).await;

    assert_eq!(
        result,
        Err(TodoError::Validation(vec![ValidationFailure::TaskTooLong {
            length: 33
        }]))
    );
    assert_eq!(f.todos.get_by_id(added.id).await, Some(added));
}

#[tokio::test]
async fn delete_removes_exactly_that_record() {
    let f = fixture().await;
    let keep = f.todos.add("Keep me", None).await.unwrap();
    let drop = f.todos.add("Drop me", None).await.unwrap();

    expect!(f.todos.delete(drop.id).await).to_be_ok();

    assert_eq!(f.todos.list().await, vec![keep]);
    expect!(f.notifier.messages()).to_be_empty();
}

#[tokio::test]
async fn delete_of_missing_id_is_a_reported_no_op() {
    let f = fixture().await;
    let keep = f.todos.add("Keep me", None).await.unwrap();

    let result = f.todos.delete(404).await;

    assert_eq!(result, Err(TodoError::NotFound { id: 404 }));
    assert_eq!(f.todos.list().await, vec![keep]);
    assert_eq!(f.notifier.texts(), vec!["Todo item not found: ID 404".to_string()]);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let f = fixture().await;
    let first = f.todos.add("One", None).await.unwrap();
    let second = f.todos.add("Two", None).await.unwrap();

    f.todos.delete(second.id).await.unwrap();
    let third = f.todos.add("Three", None).await.unwrap();

    expect!(third.id > second.id).to_be_true();
    expect!(third.id).to_not_equal(first.id);
}

#[tokio::test]
async fn schema_rejects_invalid_rows_inserted_directly() {
    let f = fixture().await;
    let conn = f.db.inner();

    let too_long = format!(
        "INSERT INTO to_do (task, description) VALUES ('{}', NULL)",
        "t".repeat(33)
    );
    expect!(conn.execute_unprepared(&too_long).await).to_be_err();

    let empty = "INSERT INTO to_do (task, description) VALUES ('', NULL)";
    expect!(conn.execute_unprepared(empty).await).to_be_err();

    let long_description = format!(
        "INSERT INTO to_do (task, description) VALUES ('ok', '{}')",
        "d".repeat(257)
    );
    expect!(conn.execute_unprepared(&long_description).await).to_be_err();

    expect!(f.todos.list().await).to_be_empty();
}

#[tokio::test]
async fn save_hook_rejects_invalid_active_models() {
    use sea_orm::{ActiveModelTrait, Set};
    use todo_app::models::todos;

    let f = fixture().await;

    let invalid = todos::ActiveModel {
        task: Set("t".repeat(40)),
        description: Set(None),
        ..Default::default()
    };
    expect!(invalid.insert(f.db.inner()).await).to_be_err();
    expect!(f.todos.list().await).to_be_empty();
}

#[tokio::test]
async fn storage_failures_are_values_with_notifications() {
    let f = fixture().await;
    let added = f.todos.add("Buy milk", None).await.unwrap();
    f.db.inner()
        .execute_unprepared("DROP TABLE to_do")
        .await
        .unwrap();

    expect!(f.todos.list().await).to_be_empty();
    expect!(matches!(
        f.todos.add("Walk dog", None).await,
        Err(TodoError::Storage(_))
    ))
    .to_be_true();
    expect!(f.todos.get_by_id(added.id).await).to_be_none();
    expect!(matches!(
        f.todos.edit(added.id, "Buy oat milk", None).await,
        Err(TodoError::Storage(_))
    ))
    .to_be_true();
    expect!(matches!(
        f.todos.delete(added.id).await,
        Err(TodoError::Storage(_))
    ))
    .to_be_true();

    assert_eq!(
        f.notifier.texts(),
        vec![
            LOAD_MESSAGE.to_string(),
            STORAGE_MESSAGE.to_string(),
            LOAD_MESSAGE.to_string(),
            STORAGE_MESSAGE.to_string(),
            STORAGE_MESSAGE.to_string(),
        ]
    );
}
