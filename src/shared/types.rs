use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fields every persisted entity serializes before its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecordMeta {
    pub id: i64,
    /// Creation time, epoch milliseconds
    pub ctime: i64,
    /// Last modification time, epoch milliseconds
    pub mtime: i64,
}

/// JSON body sent with 4xx/5xx responses that carry a message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: String, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message: Some(message),
            errors,
        }
    }
}

/// Query selector shared by the article and category endpoints.
///
/// `id` wins over `name` when both are given.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct LookupQuery {
    /// Exact id lookup
    pub id: Option<i64>,
    /// Exact name lookup
    pub name: Option<String>,
}

impl LookupQuery {
    pub fn is_lookup(&self) -> bool {
        self.id.is_some() || self.name.is_some()
    }
}

/// Query for endpoints that address a single entity by id
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct IdQuery {
    pub id: i64,
}
