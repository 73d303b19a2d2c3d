use std::sync::Arc;

use crate::core::error::{handle_database_error, Result};
use crate::features::admin::dtos::ResetSummaryDto;
use crate::modules::persistence::{ContentSeed, ContentStore, SeedArticle, SeedCategory};
use crate::shared::time::now_millis;

/// Seeded categories as (name, long name, parent name). Parents come first.
const SEED_CATEGORIES: &[(&str, &str, Option<&str>)] = &[
    ("food", "Food", None),
    ("animals", "Animals", None),
    ("cats", "Cats", Some("animals")),
    ("big_cats", "Big Cats", Some("cats")),
];

const ARTICLES_PER_CATEGORY: usize = 3;

/// Destructive maintenance over the content tables
pub struct AdminService {
    content: Arc<dyn ContentStore>,
}

impl AdminService {
    pub fn new(content: Arc<dyn ContentStore>) -> Self {
        Self { content }
    }

    /// Replace all content with the demo set, authored by `author`.
    ///
    /// The wipe and the seeding commit together; on failure the previous
    /// content is left untouched.
    pub async fn reset(&self, author: i64) -> Result<ResetSummaryDto> {
        let replaced = self
            .content
            .replace_content(&demo_content(author), now_millis())
            .await
            .map_err(|e| {
                tracing::error!("Content reset failed, rolled back: {:?}", e);
                handle_database_error(e)
            })?;

        tracing::info!(
            deleted_articles = replaced.deleted_articles,
            deleted_categories = replaced.deleted_categories,
            categories = replaced.categories.len(),
            articles = replaced.articles.len(),
            "Seeded demo content"
        );

        Ok(ResetSummaryDto {
            deleted_articles: replaced.deleted_articles,
            deleted_categories: replaced.deleted_categories,
            seeded_categories: replaced.categories.len(),
            seeded_articles: replaced.articles.len(),
        })
    }
}

fn demo_content(author: i64) -> ContentSeed {
    let categories = SEED_CATEGORIES
        .iter()
        .map(|(name, long_name, parent)| SeedCategory {
            name: name.to_string(),
            long_name: long_name.to_string(),
            parent: parent.map(str::to_string),
        })
        .collect::<Vec<_>>();

    let mut articles = Vec::with_capacity(categories.len() * ARTICLES_PER_CATEGORY + 1);
    for category in &categories {
        for i in 0..ARTICLES_PER_CATEGORY {
            articles.push(seed_article(category, i, author));
        }
    }
    articles.push(SeedArticle {
        name: "about".to_string(),
        author,
        title: "About page".to_string(),
        content: "This is about me".to_string(),
        category: None,
    });

    ContentSeed {
        categories,
        articles,
    }
}

fn seed_article(category: &SeedCategory, i: usize, author: i64) -> SeedArticle {
    let content = (0..10)
        .map(|j| format!("{}: {}{}", i, category.name, j))
        .collect::<Vec<_>>()
        .join("\n");

    SeedArticle {
        name: format!("article_{}_{}", category.name, i),
        author,
        title: format!("article {} title about {}", i, category.long_name),
        content,
        category: Some(category.name.clone()),
    }
}
