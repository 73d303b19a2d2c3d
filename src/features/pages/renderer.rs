use axum::response::Html;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use thiserror::Error;

use crate::core::error::AppError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.jinja", include_str!("../../../templates/pages/base.jinja")),
    ("articles.jinja", include_str!("../../../templates/pages/articles.jinja")),
    ("article.jinja", include_str!("../../../templates/pages/article.jinja")),
    ("not_found.jinja", include_str!("../../../templates/pages/not_found.jinja")),
];

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    Render(#[from] minijinja::Error),
}

impl From<PageError> for AppError {
    fn from(e: PageError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Template environment for the HTML pages, compiled once at startup
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, PageError> {
        let mut env = Environment::new();
        // Article bodies are user content
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
            tracing::debug!("Loaded template: {}", name);
        }

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, PageError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|_| PageError::NotFound(name.to_string()))?;

        Ok(Html(template.render(ctx)?))
    }
}
