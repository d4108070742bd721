use bytes::Bytes;
use kit::testing::{TestContainer, TestDatabase};
use kit::{expect, HttpResponse, Server};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use todo_app::middleware::SecurityHeadersMiddleware;
use todo_app::migrations::Migrator;
use todo_app::routes;
use todo_app::services::{FlashNotifier, TodoService};

struct TestApp {
    _db: TestDatabase,
    server: Server,
    todos: TodoService,
}

impl TestApp {
    async fn new() -> Self {
        let db = TestDatabase::fresh::<Migrator>().await.expect("test db");
        let todos = TodoService::new(db.connection(), Arc::new(FlashNotifier));
        TestContainer::singleton(todos.clone());

        let server = Server::new(routes::router()).middleware(SecurityHeadersMiddleware);
        Self {
            _db: db,
            server,
            todos,
        }
    }

    async fn get(&self, path: &str) -> HttpResponse {
        self.get_with_cookie(path, None).await
    }

    async fn get_with_cookie(&self, path: &str, cookie: Option<&str>) -> HttpResponse {
        let mut builder = hyper::Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        self.server
            .handle(builder.body(Bytes::new()).unwrap())
            .await
    }

    async fn post_form(&self, path: &str, body: &'static str) -> HttpResponse {
        let request = hyper::Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap();
        self.server.handle(request).await
    }
}

/// `kit_flash=...` from a Set-Cookie header, ready to send back
fn flash_cookie(response: &HttpResponse) -> String {
    response
        .header_value("set-cookie")
        .and_then(|c| c.split(';').next())
        .expect("flash cookie")
        .to_string()
}

#[tokio::test]
async fn list_page_renders_records() {
    let app = TestApp::new().await;
    app.todos.add("Buy milk", Some("2 litres")).await.unwrap();

    for path in ["/", "/index"] {
        let page = app.get(path).await;
        assert_eq!(page.status_code(), 200);
        expect!(page.body_text()).to_contain("Buy milk");
        expect!(page.body_text()).to_contain("2 litres");
        expect!(page.body_text()).to_contain(r#"action="/delete/1""#);
        expect!(page.body_text()).to_contain(r#"href="/edit/1""#);
    }
}

#[tokio::test]
async fn valid_add_redirects_and_is_listed() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/add", "task=Buy+milk&description=2+litres")
        .await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header_value("location"), Some("/"));

    let page = app.get("/").await;
    expect!(page.body_text()).to_contain("Buy milk");
    assert_eq!(app.todos.list().await.len(), 1);
}

#[tokio::test]
async fn invalid_add_rerenders_with_422_and_the_message() {
    let app = TestApp::new().await;

    let response = app.post_form("/add", "task=&description=kept+value").await;

    assert_eq!(response.status_code(), 422);
    expect!(response.body_text()).to_contain("Task is required.");
    expect!(response.body_text()).to_contain(r#"value="kept value""#);
    expect!(response.body_text()).to_contain(r#"class="form-control is-invalid" id="task""#);
    expect!(app.todos.list().await).to_be_empty();
}

#[tokio::test]
async fn edit_form_and_update() {
    let app = TestApp::new().await;
    let todo = app.todos.add("Buy milk", None).await.unwrap();

    let form = app.get(&format!("/edit/{}", todo.id)).await;
    assert_eq!(form.status_code(), 200);
    expect!(form.body_text()).to_contain(r#"value="Buy milk""#);

    let response = app.post_form("/edit/1", "task=Buy+oat+milk&description=").await;
    assert_eq!(response.status_code(), 303);

    let updated = app.todos.get_by_id(todo.id).await.unwrap();
    assert_eq!(updated.task, "Buy oat milk");
    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn invalid_update_keeps_the_record() {
    let app = TestApp::new().await;
    let todo = app.todos.add("Buy milk", None).await.unwrap();

    let response = app
        .post_form("/edit/1", "task=123456789012345678901234567890123")
        .await;

    assert_eq!(response.status_code(), 422);
    expect!(response.body_text()).to_contain("Task must be at most 32 characters.");
    assert_eq!(app.todos.get_by_id(todo.id).await, Some(todo));
}

#[tokio::test]
async fn editing_a_missing_record_redirects_with_a_notification() {
    let app = TestApp::new().await;

    let response = app.get("/edit/42").await;
    assert_eq!(response.status_code(), 303);

    let page = app.get_with_cookie("/", Some(&flash_cookie(&response))).await;
    expect!(page.body_text()).to_contain("Todo item not found: ID 42");
}

#[tokio::test]
async fn deleting_unknown_id_redirects_and_next_page_shows_not_found() {
    let app = TestApp::new().await;

    let response = app.post_form("/delete/999", "").await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header_value("location"), Some("/"));

    let cookie = flash_cookie(&response);
    let page = app.get_with_cookie("/", Some(&cookie)).await;
    expect!(page.body_text()).to_contain("Todo item not found: ID 999");
    expect!(page.header_value("set-cookie").unwrap_or_default()).to_contain("Max-Age=0");

    // Shown once
    let page = app.get("/").await;
    expect!(page.body_text()).to_not_contain("Todo item not found");
}

#[tokio::test]
async fn head_request_does_not_consume_notifications() {
    let app = TestApp::new().await;
    let cookie = flash_cookie(&app.post_form("/delete/7", "").await);

    let head = hyper::Request::builder()
        .method("HEAD")
        .uri("/")
        .header("cookie", cookie.as_str())
        .body(Bytes::new())
        .unwrap();
    let response = app.server.handle(head).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body_text(), "");
    assert_eq!(response.header_value("set-cookie"), None);

    let page = app.get_with_cookie("/", Some(&cookie)).await;
    expect!(page.body_text()).to_contain("Todo item not found: ID 7");
}

#[tokio::test]
async fn delete_removes_the_record() {
    let app = TestApp::new().await;
    let todo = app.todos.add("Buy milk", None).await.unwrap();

    let response = app.post_form(&format!("/delete/{}", todo.id), "").await;

    assert_eq!(response.status_code(), 303);
    expect!(app.todos.list().await).to_be_empty();
}

#[tokio::test]
async fn bad_ids_unknown_paths_and_wrong_methods() {
    let app = TestApp::new().await;

    assert_eq!(app.get("/edit/abc").await.status_code(), 400);
    assert_eq!(app.get("/nowhere").await.status_code(), 404);

    let response = app.get("/delete/1").await;
    assert_eq!(response.status_code(), 405);
    assert_eq!(response.header_value("allow"), Some("POST"));
}

#[tokio::test]
async fn pages_carry_security_headers() {
    let app = TestApp::new().await;

    let page = app.get("/add").await;

    assert_eq!(page.status_code(), 200);
    assert_eq!(page.header_value("x-frame-options"), Some("SAMEORIGIN"));
    expect!(page.header_value("content-security-policy").unwrap_or_default())
        .to_contain("form-action 'self'");
}
