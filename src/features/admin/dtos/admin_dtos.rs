use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of wiping and reseeding the content tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResetSummaryDto {
    pub deleted_articles: u64,
    pub deleted_categories: u64,
    pub seeded_categories: usize,
    pub seeded_articles: usize,
}
