use kit::Router;

use crate::controllers::todo;

/// Every route, named for `Redirect::route` and `url_for`
pub fn router() -> Router {
    Router::new()
        .get("/", todo::index)
        .name("todos.index")
        .get("/index", todo::index)
        .name("todos.list")
        .get("/add", todo::create)
        .name("todos.create")
        .post("/add", todo::store)
        .name("todos.store")
        .get("/edit/{id}", todo::edit)
        .name("todos.edit")
        .post("/edit/{id}", todo::update)
        .name("todos.update")
        .post("/delete/{id}", todo::destroy)
        .name("todos.destroy")
}
