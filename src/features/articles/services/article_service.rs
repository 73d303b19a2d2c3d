use std::collections::HashSet;
use std::sync::Arc;

use crate::core::error::{handle_database_error, AppError, Result};
use crate::features::articles::models::{Article, ArticleFields, ArticleUpdate};
use crate::features::categories::models::Category;
use crate::modules::persistence::{ArticleStore, CategoryStore};
use crate::shared::time::{next_mtime, now_millis};

/// Service for article operations.
///
/// Multi-article reads (`get_all`, `get_by_category`) only return listed
/// articles: visible and not direct-links-only. Single lookups by id or name
/// return any article.
pub struct ArticleService {
    articles: Arc<dyn ArticleStore>,
    categories: Arc<dyn CategoryStore>,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self {
            articles,
            categories,
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        self.articles.find_article(id).await.map_err(|e| {
            tracing::error!("Failed to get article {}: {:?}", id, e);
            handle_database_error(e)
        })
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Article>> {
        self.articles.find_article_by_name(name).await.map_err(|e| {
            tracing::error!("Failed to get article by name: {:?}", e);
            handle_database_error(e)
        })
    }

    /// Every listed article
    pub async fn get_all(&self) -> Result<Vec<Article>> {
        self.articles.list_listed_articles(None).await.map_err(|e| {
            tracing::error!("Failed to list articles: {:?}", e);
            handle_database_error(e)
        })
    }

    /// Listed articles filed under `category`, and under all of its
    /// descendants when `include_descendants` is set
    pub async fn get_by_category(
        &self,
        category: &Category,
        include_descendants: bool,
    ) -> Result<Vec<Article>> {
        let ids = if include_descendants {
            self.expand_descendants(category.id).await?
        } else {
            vec![category.id]
        };

        self.articles
            .list_listed_articles(Some(&ids))
            .await
            .map_err(|e| {
                tracing::error!("Failed to list articles of category {}: {:?}", category.id, e);
                handle_database_error(e)
            })
    }

    /// Breadth-first closure of `root` over the parent links.
    ///
    /// Only ids not seen before enter the next frontier, so parent cycles end
    /// the walk instead of looping.
    async fn expand_descendants(&self, root: i64) -> Result<Vec<i64>> {
        let mut seen = HashSet::from([root]);
        let mut closure = vec![root];
        let mut frontier = vec![root];

        while !frontier.is_empty() {
            let children = self
                .categories
                .child_category_ids(&frontier)
                .await
                .map_err(handle_database_error)?;

            frontier = children
                .into_iter()
                .filter(|id| seen.insert(*id))
                .collect();
            closure.extend_from_slice(&frontier);
        }

        tracing::debug!(root, size = closure.len(), "Expanded category descendants");
        Ok(closure)
    }

    /// Create an article; a taken name yields [`AppError::AlreadyExists`]
    pub async fn create(&self, fields: ArticleFields) -> Result<Article> {
        let article = self
            .articles
            .insert_article(&fields, now_millis())
            .await
            .map_err(handle_database_error)?;

        tracing::info!(id = article.id, name = %article.name, "Article created");
        Ok(article)
    }

    /// Replace the fields of `article` and bump its mtime
    pub async fn update(&self, article: &Article, update: ArticleUpdate) -> Result<Article> {
        let fields = update.apply_to(article);
        let updated = self
            .articles
            .update_article(article.id, &fields, next_mtime(article.mtime))
            .await
            .map_err(handle_database_error)?
            .ok_or_else(|| {
                AppError::NotFound(format!("Article with id {} not found", article.id))
            })?;

        tracing::info!(id = updated.id, "Article updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .articles
            .delete_article(id)
            .await
            .map_err(handle_database_error)?;

        if deleted {
            tracing::info!(id, "Article deleted");
        }
        Ok(deleted)
    }
}
