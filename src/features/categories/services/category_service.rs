use std::sync::Arc;

use crate::core::error::{handle_database_error, AppError, Result};
use crate::features::categories::models::{Category, CategoryFields};
use crate::modules::persistence::CategoryStore;
use crate::shared::time::{next_mtime, now_millis};

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.store.find_category(id).await.map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", id, e);
            handle_database_error(e)
        })
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.store.find_category_by_name(name).await.map_err(|e| {
            tracing::error!("Failed to get category by name: {:?}", e);
            handle_database_error(e)
        })
    }

    /// List every category in storage order
    pub async fn get_all(&self) -> Result<Vec<Category>> {
        self.store.list_categories().await.map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            handle_database_error(e)
        })
    }

    /// Create a category; a taken name yields [`AppError::AlreadyExists`]
    pub async fn create(&self, fields: CategoryFields) -> Result<Category> {
        let category = self
            .store
            .insert_category(&fields, now_millis())
            .await
            .map_err(handle_database_error)?;

        tracing::info!(id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Replace name, long_name and parent of `category` and bump its mtime
    pub async fn update(&self, category: &Category, fields: CategoryFields) -> Result<Category> {
        let updated = self
            .store
            .update_category(category.id, &fields, next_mtime(category.mtime))
            .await
            .map_err(handle_database_error)?
            .ok_or_else(|| {
                AppError::NotFound(format!("Category with id {} not found", category.id))
            })?;

        tracing::info!(id = updated.id, "Category updated");
        Ok(updated)
    }

    /// Delete a category. Children and articles keep pointing at the removed id.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .store
            .delete_category(id)
            .await
            .map_err(handle_database_error)?;

        if deleted {
            tracing::info!(id, "Category deleted");
        }
        Ok(deleted)
    }
}
