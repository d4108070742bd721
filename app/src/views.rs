//! Compiled page templates

use kit::{FrameworkError, View};
use std::sync::OnceLock;

static VIEW: OnceLock<Result<View, FrameworkError>> = OnceLock::new();

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("form.html", include_str!("../templates/form.html")),
];

/// The app's templates, compiled on first use
pub fn view() -> Result<View, FrameworkError> {
    VIEW.get_or_init(|| View::from_templates(TEMPLATES)).clone()
}
