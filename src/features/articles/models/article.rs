use sqlx::FromRow;

/// Database model for article
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Article {
    pub id: i64,
    pub name: String,
    /// User id of the author
    pub author: i64,
    /// Category id, `0` when uncategorized
    pub category: i64,
    pub title: String,
    pub content: String,
    /// Hidden articles never appear in listings
    pub visible: bool,
    /// Reachable by id or name only, never listed
    pub direct_links_only: bool,
    pub ctime: i64,
    pub mtime: i64,
}

impl Article {
    /// Whether the article may appear in listing and category queries
    pub fn is_listed(&self) -> bool {
        self.visible && !self.direct_links_only
    }
}

/// Every stored field of an article except identity and timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    pub name: String,
    pub author: i64,
    pub category: i64,
    pub title: String,
    pub content: String,
    pub visible: bool,
    pub direct_links_only: bool,
}

/// Replacement values for an update. `author: None` keeps the stored author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleUpdate {
    pub name: String,
    pub author: Option<i64>,
    pub category: i64,
    pub title: String,
    pub content: String,
    pub visible: bool,
    pub direct_links_only: bool,
}

impl ArticleUpdate {
    /// Resolve against the stored article
    pub fn apply_to(self, article: &Article) -> ArticleFields {
        ArticleFields {
            name: self.name,
            author: self.author.unwrap_or(article.author),
            category: self.category,
            title: self.title,
            content: self.content,
            visible: self.visible,
            direct_links_only: self.direct_links_only,
        }
    }
}
