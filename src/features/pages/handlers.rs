use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::core::error::Result;
use crate::features::articles::services::ArticleService;
use crate::features::categories::services::CategoryService;
use crate::features::pages::context::{
    ArticleListPage, ArticlePage, ArticleView, NotFoundPage, SiteContext,
};
use crate::features::pages::renderer::PageRenderer;

#[derive(Clone)]
pub struct PageState {
    pub renderer: Arc<PageRenderer>,
    pub site: Arc<SiteContext>,
    pub articles: Arc<ArticleService>,
    pub categories: Arc<CategoryService>,
}

impl PageState {
    fn not_found(&self, message: String) -> Result<Response> {
        let html = self
            .renderer
            .render("not_found.jinja", self.site.with(NotFoundPage { message }))?;
        Ok((StatusCode::NOT_FOUND, html).into_response())
    }
}

/// Every listed article
pub async fn index(State(state): State<PageState>) -> Result<Html<String>> {
    let articles = state.articles.get_all().await?;
    let page = ArticleListPage {
        heading: None,
        articles: articles.iter().map(ArticleView::from).collect(),
    };

    Ok(state.renderer.render("articles.jinja", state.site.with(page))?)
}

/// One article by name, listed or not
pub async fn article_page(
    State(state): State<PageState>,
    Path(name): Path<String>,
) -> Result<Response> {
    let Some(article) = state.articles.get_by_name(&name).await? else {
        return state.not_found(format!("There is no article named '{}'.", name));
    };

    let page = ArticlePage {
        article: ArticleView::from(&article),
    };
    Ok(state
        .renderer
        .render("article.jinja", state.site.with(page))?
        .into_response())
}

/// Listed articles of a category and all of its descendants
pub async fn category_page(
    State(state): State<PageState>,
    Path(name): Path<String>,
) -> Result<Response> {
    let Some(category) = state.categories.get_by_name(&name).await? else {
        return state.not_found(format!("There is no category named '{}'.", name));
    };

    let articles = state.articles.get_by_category(&category, true).await?;
    let heading = if category.long_name.is_empty() {
        category.name.clone()
    } else {
        category.long_name.clone()
    };
    let page = ArticleListPage {
        heading: Some(heading),
        articles: articles.iter().map(ArticleView::from).collect(),
    };

    Ok(state
        .renderer
        .render("articles.jinja", state.site.with(page))?
        .into_response())
}
