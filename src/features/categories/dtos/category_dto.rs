use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryFields};
use crate::shared::constants::ROOT_CATEGORY_ID;
use crate::shared::types::RecordMeta;

/// Serialized category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    #[serde(flatten)]
    pub record: RecordMeta,
    pub name: String,
    pub long_name: String,
    pub parent: i64,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            record: RecordMeta {
                id: c.id,
                ctime: c.ctime,
                mtime: c.mtime,
            },
            name: c.name,
            long_name: c.long_name,
            parent: c.parent,
        }
    }
}

fn default_parent() -> i64 {
    ROOT_CATEGORY_ID
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 128))]
    #[serde(default)]
    pub long_name: String,

    /// Parent category id, `0` for a root category
    #[serde(default = "default_parent")]
    pub parent: i64,
}

impl From<CreateCategoryDto> for CategoryFields {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            long_name: dto.long_name,
            parent: dto.parent,
        }
    }
}

/// Full replacement of a category; every field is required
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    pub id: i64,

    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 128))]
    pub long_name: String,

    pub parent: i64,
}

impl From<UpdateCategoryDto> for CategoryFields {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name,
            long_name: dto.long_name,
            parent: dto.parent,
        }
    }
}
