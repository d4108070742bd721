//! Server-rendered HTML views on top of Tera
//!
//! Templates are registered from strings (usually `include_str!`), so the
//! binary carries them. Names ending in `.html` are autoescaped.
//!
//! Every render gets three shared variables:
//!
//! - `app_name` from `AppConfig`
//! - `flashes`, the pending flash messages (taken, so they show once)
//! - the `url_for(name=..., ...)` function for named routes (its output
//!   is a path, pipe it through `safe` inside attributes)

use crate::config::{AppConfig, Config};
use crate::error::FrameworkError;
use crate::flash::Flash;
use crate::http::HttpResponse;
use crate::routing::route;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera, Value};

#[derive(Serialize)]
struct FlashView {
    level: &'static str,
    message: String,
}

/// Compiled template set
#[derive(Clone)]
pub struct View {
    tera: Arc<Tera>,
}

impl View {
    /// Compile `(name, source)` pairs
    ///
    /// Templates may `{% extends %}` each other regardless of order.
    pub fn from_templates(templates: &[(&str, &str)]) -> Result<Self, FrameworkError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.to_vec())?;
        tera.register_function("url_for", url_for);

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render a template to a string
    pub fn render(&self, template: &str, context: &Context) -> Result<String, FrameworkError> {
        let mut context = context.clone();
        let app_name = Config::get::<AppConfig>()
            .map(|c| c.name)
            .unwrap_or_else(|| "To Do".to_string());
        context.insert("app_name", &app_name);

        let flashes: Vec<FlashView> = Flash::take()
            .into_iter()
            .map(|m| FlashView {
                level: m.level.css_class(),
                message: m.message,
            })
            .collect();
        context.insert("flashes", &flashes);

        self.tera.render(template, &context).map_err(|e| {
            let err = FrameworkError::from(e);
            tracing::error!(template, error = %err, "template rendering failed");
            err
        })
    }

    /// Render a template into a 200 HTML response
    pub fn response(&self, template: &str, context: &Context) -> Result<HttpResponse, FrameworkError> {
        self.render(template, context).map(HttpResponse::html)
    }
}

/// `url_for(name="todos.edit", id=3)`
fn url_for(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = args
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("url_for requires a `name` argument"))?;

    let params: Vec<(String, String)> = args
        .iter()
        .filter(|(key, _)| key.as_str() != "name")
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect();
    let params: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    route(name, &params)
        .map(Value::String)
        .ok_or_else(|| tera::Error::msg(format!("unknown route `{}`", name)))
}
