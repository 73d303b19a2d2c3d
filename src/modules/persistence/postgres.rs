use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::{PgExecutor, PgPool};

use super::{
    ArticleStore, CategoryStore, ContentSeed, ContentStore, ReplacedContent, StoreError,
    StoreResult,
};
use crate::features::articles::models::{Article, ArticleFields};
use crate::features::categories::models::{Category, CategoryFields};

const CATEGORY_COLUMNS: &str = "id, name, long_name, parent, ctime, mtime";
const ARTICLE_COLUMNS: &str =
    "id, name, author, category, title, content, visible, direct_links_only, ctime, mtime";

/// Classify a driver error, lifting unique violations into [`StoreError::UniqueViolation`]
fn classify(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.kind() == ErrorKind::UniqueViolation {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::UniqueViolation { constraint };
        }
    }
    StoreError::Database(e)
}

async fn insert_category_row<'e, E>(
    executor: E,
    fields: &CategoryFields,
    now: i64,
) -> StoreResult<Category>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        r#"
        INSERT INTO categories (name, long_name, parent, ctime, mtime)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING {}
        "#,
        CATEGORY_COLUMNS
    );
    sqlx::query_as::<_, Category>(&query)
        .bind(&fields.name)
        .bind(&fields.long_name)
        .bind(fields.parent)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(classify)
}

async fn insert_article_row<'e, E>(
    executor: E,
    fields: &ArticleFields,
    now: i64,
) -> StoreResult<Article>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        r#"
        INSERT INTO articles
            (name, author, category, title, content, visible, direct_links_only, ctime, mtime)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING {}
        "#,
        ARTICLE_COLUMNS
    );
    sqlx::query_as::<_, Article>(&query)
        .bind(&fields.name)
        .bind(fields.author)
        .bind(fields.category)
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(fields.visible)
        .bind(fields.direct_links_only)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(classify)
}

/// PostgreSQL-backed store for categories and articles
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore").field("pool", &"<PgPool>").finish()
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn find_category(&self, id: i64) -> StoreResult<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE name = $1", CATEGORY_COLUMNS);
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let query = format!("SELECT {} FROM categories ORDER BY id", CATEGORY_COLUMNS);
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn child_category_ids(&self, parents: &[i64]) -> StoreResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE parent = ANY($1)")
            .bind(parents)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn insert_category(&self, fields: &CategoryFields, now: i64) -> StoreResult<Category> {
        insert_category_row(&self.pool, fields, now).await
    }

    async fn update_category(
        &self,
        id: i64,
        fields: &CategoryFields,
        mtime: i64,
    ) -> StoreResult<Option<Category>> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = $1, long_name = $2, parent = $3, mtime = $4
            WHERE id = $5
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&fields.name)
            .bind(&fields.long_name)
            .bind(fields.parent)
            .bind(mtime)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn delete_category(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ArticleStore for PgStore {
    async fn find_article(&self, id: i64) -> StoreResult<Option<Article>> {
        let query = format!("SELECT {} FROM articles WHERE id = $1", ARTICLE_COLUMNS);
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_article_by_name(&self, name: &str) -> StoreResult<Option<Article>> {
        let query = format!("SELECT {} FROM articles WHERE name = $1", ARTICLE_COLUMNS);
        sqlx::query_as::<_, Article>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn list_listed_articles(
        &self,
        categories: Option<&[i64]>,
    ) -> StoreResult<Vec<Article>> {
        match categories {
            Some(ids) => {
                let query = format!(
                    r#"
                    SELECT {}
                    FROM articles
                    WHERE visible = TRUE AND direct_links_only = FALSE AND category = ANY($1)
                    ORDER BY id
                    "#,
                    ARTICLE_COLUMNS
                );
                sqlx::query_as::<_, Article>(&query)
                    .bind(ids)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)
            }
            None => {
                let query = format!(
                    r#"
                    SELECT {}
                    FROM articles
                    WHERE visible = TRUE AND direct_links_only = FALSE
                    ORDER BY id
                    "#,
                    ARTICLE_COLUMNS
                );
                sqlx::query_as::<_, Article>(&query)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(classify)
            }
        }
    }

    async fn insert_article(&self, fields: &ArticleFields, now: i64) -> StoreResult<Article> {
        insert_article_row(&self.pool, fields, now).await
    }

    async fn update_article(
        &self,
        id: i64,
        fields: &ArticleFields,
        mtime: i64,
    ) -> StoreResult<Option<Article>> {
        let query = format!(
            r#"
            UPDATE articles
            SET name = $1, author = $2, category = $3, title = $4, content = $5,
                visible = $6, direct_links_only = $7, mtime = $8
            WHERE id = $9
            RETURNING {}
            "#,
            ARTICLE_COLUMNS
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&fields.name)
            .bind(fields.author)
            .bind(fields.category)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(fields.visible)
            .bind(fields.direct_links_only)
            .bind(mtime)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn delete_article(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn replace_content(&self, seed: &ContentSeed, now: i64) -> StoreResult<ReplacedContent> {
        // Dropping the transaction on an early return rolls everything back
        let mut tx = self.pool.begin().await.map_err(classify)?;

        let deleted_articles = sqlx::query("DELETE FROM articles")
            .execute(&mut *tx)
            .await
            .map_err(classify)?
            .rows_affected();
        let deleted_categories = sqlx::query("DELETE FROM categories")
            .execute(&mut *tx)
            .await
            .map_err(classify)?
            .rows_affected();

        let mut categories = Vec::with_capacity(seed.categories.len());
        for entry in &seed.categories {
            let fields = entry.fields(&categories);
            categories.push(insert_category_row(&mut *tx, &fields, now).await?);
        }

        let mut articles = Vec::with_capacity(seed.articles.len());
        for entry in &seed.articles {
            let fields = entry.fields(&categories);
            articles.push(insert_article_row(&mut *tx, &fields, now).await?);
        }

        tx.commit().await.map_err(classify)?;

        Ok(ReplacedContent {
            deleted_articles,
            deleted_categories,
            categories,
            articles,
        })
    }
}
