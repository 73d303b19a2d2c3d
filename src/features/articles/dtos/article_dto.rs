use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::articles::models::{Article, ArticleFields, ArticleUpdate};
use crate::shared::constants::ROOT_CATEGORY_ID;
use crate::shared::types::RecordMeta;

/// Serialized article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponseDto {
    #[serde(flatten)]
    pub record: RecordMeta,
    pub name: String,
    pub author: i64,
    pub category: i64,
    pub title: String,
    pub content: String,
    pub visible: bool,
    pub direct_links_only: bool,
}

impl From<Article> for ArticleResponseDto {
    fn from(a: Article) -> Self {
        Self {
            record: RecordMeta {
                id: a.id,
                ctime: a.ctime,
                mtime: a.mtime,
            },
            name: a.name,
            author: a.author,
            category: a.category,
            title: a.title,
            content: a.content,
            visible: a.visible,
            direct_links_only: a.direct_links_only,
        }
    }
}

/// Query params for reading articles
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ArticleQueryParams {
    /// Exact id lookup, ignores visibility
    pub id: Option<i64>,
    /// Exact name lookup, ignores visibility
    pub name: Option<String>,
    /// List the articles of this category id
    pub category: Option<i64>,
    /// With `category`: also include articles of every descendant category.
    /// Any value other than `false` or `0` enables it.
    pub descendants: Option<String>,
}

impl ArticleQueryParams {
    pub fn include_descendants(&self) -> bool {
        self.descendants
            .as_deref()
            .is_some_and(|v| !matches!(v.trim(), "false" | "0"))
    }
}

fn default_category() -> i64 {
    ROOT_CATEGORY_ID
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateArticleDto {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 128))]
    pub title: String,

    pub content: String,

    /// Category id, `0` for uncategorized
    #[serde(default = "default_category")]
    pub category: i64,

    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(default)]
    pub direct_links_only: bool,
}

impl CreateArticleDto {
    pub fn into_fields(self, author: i64) -> ArticleFields {
        ArticleFields {
            name: self.name,
            author,
            category: self.category,
            title: self.title,
            content: self.content,
            visible: self.visible,
            direct_links_only: self.direct_links_only,
        }
    }
}

/// Full replacement of an article
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateArticleDto {
    pub id: i64,

    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 128))]
    pub title: String,

    pub content: String,

    pub category: i64,

    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(default)]
    pub direct_links_only: bool,

    /// Present (with any value but `false`): make the requesting user the
    /// author. Absent: the stored author is kept.
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<bool>)]
    pub update_author: Option<Value>,
}

/// Distinguish an explicit `null` from an absent field
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl UpdateArticleDto {
    pub fn into_update(self, requester: i64) -> ArticleUpdate {
        ArticleUpdate {
            name: self.name,
            author: self
                .update_author
                .filter(|v| *v != Value::Bool(false))
                .map(|_| requester),
            category: self.category,
            title: self.title,
            content: self.content,
            visible: self.visible,
            direct_links_only: self.direct_links_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape_includes_visibility_flags() {
        let dto = ArticleResponseDto::from(Article {
            id: 3,
            name: "about".to_string(),
            author: 11,
            category: 0,
            title: "About page".to_string(),
            content: "This is about me".to_string(),
            visible: true,
            direct_links_only: true,
            ctime: 10,
            mtime: 20,
        });

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 3,
                "ctime": 10,
                "mtime": 20,
                "name": "about",
                "author": 11,
                "category": 0,
                "title": "About page",
                "content": "This is about me",
                "visible": true,
                "direct_links_only": true,
            })
        );
    }

    #[test]
    fn test_create_defaults() {
        let dto: CreateArticleDto =
            serde_json::from_str(r#"{"name": "a", "title": "t", "content": "c"}"#).unwrap();
        assert_eq!(dto.category, ROOT_CATEGORY_ID);
        assert!(dto.visible);
        assert!(!dto.direct_links_only);
    }

    #[test]
    fn test_update_author_only_when_requested() {
        let body = r#"{"id": 1, "name": "a", "title": "t", "content": "c", "category": 2}"#;
        let dto: UpdateArticleDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.into_update(42).author, None);

        let body = r#"{"id": 1, "name": "a", "title": "t", "content": "c", "category": 2,
                       "update_author": true}"#;
        let dto: UpdateArticleDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.into_update(42).author, Some(42));

        let body = r#"{"id": 1, "name": "a", "title": "t", "content": "c", "category": 2,
                       "update_author": null}"#;
        let dto: UpdateArticleDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.into_update(42).author, Some(42));

        let body = r#"{"id": 1, "name": "a", "title": "t", "content": "c", "category": 2,
                       "update_author": false}"#;
        let dto: UpdateArticleDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.into_update(42).author, None);
    }

    #[test]
    fn test_descendants_flag() {
        let mut params = ArticleQueryParams::default();
        assert!(!params.include_descendants());

        params.descendants = Some(String::new());
        assert!(params.include_descendants());

        params.descendants = Some("true".to_string());
        assert!(params.include_descendants());

        params.descendants = Some("0".to_string());
        assert!(!params.include_descendants());

        params.descendants = Some("false".to_string());
        assert!(!params.include_descendants());
    }
}
