use async_trait::async_trait;
use thiserror::Error;

use crate::features::articles::models::{Article, ArticleFields};
use crate::features::categories::models::{Category, CategoryFields};
use crate::shared::constants::ROOT_CATEGORY_ID;

/// Failure reported by a store.
///
/// Uniqueness violations are surfaced structurally so callers never inspect
/// driver message text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint '{constraint}' violated")]
    UniqueViolation { constraint: String },

    #[error(transparent)]
    Database(sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_category(&self, id: i64) -> StoreResult<Option<Category>>;

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Ids of every category whose `parent` is one of `parents`
    async fn child_category_ids(&self, parents: &[i64]) -> StoreResult<Vec<i64>>;

    /// Persist a new category with `ctime = mtime = now`
    async fn insert_category(&self, fields: &CategoryFields, now: i64) -> StoreResult<Category>;

    /// Replace all mutable fields; `None` when the row no longer exists
    async fn update_category(
        &self,
        id: i64,
        fields: &CategoryFields,
        mtime: i64,
    ) -> StoreResult<Option<Category>>;

    async fn delete_category(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_article(&self, id: i64) -> StoreResult<Option<Article>>;

    async fn find_article_by_name(&self, name: &str) -> StoreResult<Option<Article>>;

    /// Articles that are visible and not direct-links-only, optionally limited
    /// to the given category ids
    async fn list_listed_articles(&self, categories: Option<&[i64]>)
        -> StoreResult<Vec<Article>>;

    /// Persist a new article with `ctime = mtime = now`
    async fn insert_article(&self, fields: &ArticleFields, now: i64) -> StoreResult<Article>;

    /// Replace all mutable fields; `None` when the row no longer exists
    async fn update_article(
        &self,
        id: i64,
        fields: &ArticleFields,
        mtime: i64,
    ) -> StoreResult<Option<Article>>;

    async fn delete_article(&self, id: i64) -> StoreResult<bool>;
}

/// A category to seed. `parent` names a category seeded before it.
#[derive(Debug, Clone)]
pub struct SeedCategory {
    pub name: String,
    pub long_name: String,
    pub parent: Option<String>,
}

/// A listed article to seed. `category` names a seeded category.
#[derive(Debug, Clone)]
pub struct SeedArticle {
    pub name: String,
    pub author: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

/// Content that replaces everything in both tables
#[derive(Debug, Clone, Default)]
pub struct ContentSeed {
    pub categories: Vec<SeedCategory>,
    pub articles: Vec<SeedArticle>,
}

/// What [`ContentStore::replace_content`] removed and inserted
#[derive(Debug)]
pub struct ReplacedContent {
    pub deleted_articles: u64,
    pub deleted_categories: u64,
    pub categories: Vec<Category>,
    pub articles: Vec<Article>,
}

/// Id of the seeded category called `name`; unknown or absent names map to the root
fn seeded_category_id(name: Option<&str>, seeded: &[Category]) -> i64 {
    name.and_then(|name| seeded.iter().find(|c| c.name == name))
        .map_or(ROOT_CATEGORY_ID, |c| c.id)
}

impl SeedCategory {
    pub fn fields(&self, seeded: &[Category]) -> CategoryFields {
        CategoryFields {
            name: self.name.clone(),
            long_name: self.long_name.clone(),
            parent: seeded_category_id(self.parent.as_deref(), seeded),
        }
    }
}

impl SeedArticle {
    pub fn fields(&self, seeded: &[Category]) -> ArticleFields {
        ArticleFields {
            name: self.name.clone(),
            author: self.author,
            category: seeded_category_id(self.category.as_deref(), seeded),
            title: self.title.clone(),
            content: self.content.clone(),
            visible: true,
            direct_links_only: false,
        }
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Delete every article and category and insert `seed` with
    /// `ctime = mtime = now`, all or nothing.
    async fn replace_content(&self, seed: &ContentSeed, now: i64) -> StoreResult<ReplacedContent>;
}
