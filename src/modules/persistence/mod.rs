//! Persistence module for CMS content
//!
//! Services depend on the [`CategoryStore`], [`ArticleStore`] and
//! [`ContentStore`] traits; [`PgStore`] is the PostgreSQL implementation
//! wired in at startup.

mod postgres;
mod store;

pub use postgres::PgStore;
pub use store::{
    ArticleStore, CategoryStore, ContentSeed, ContentStore, ReplacedContent, SeedArticle,
    SeedCategory, StoreError, StoreResult,
};
