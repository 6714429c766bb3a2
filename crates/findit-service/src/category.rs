//! Category management. Reads are public; writes are admin-only.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use findit_core::error::AppError;
use findit_database::repositories::category::CategoryRepository;
use findit_entity::category::{Category, CreateCategory, UpdateCategory};

use crate::context::RequestContext;

/// Handles category CRUD.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category repository.
    category_repo: Arc<CategoryRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(category_repo: Arc<CategoryRepository>) -> Self {
        Self { category_repo }
    }

    /// Lists categories by name; inactive ones only when asked.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Category>, AppError> {
        self.category_repo.find_all(include_inactive).await
    }

    /// Gets a category by ID.
    pub async fn get(&self, id: Uuid) -> Result<Category, AppError> {
        self.category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Creates a category.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateCategory,
    ) -> Result<Category, AppError> {
        require_admin(ctx)?;
        let category = self.category_repo.create(&data).await?;
        info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    /// Updates a category.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateCategory,
    ) -> Result<Category, AppError> {
        require_admin(ctx)?;
        let category = self.category_repo.update(id, &data).await?;
        info!(category_id = %id, "Category updated");
        Ok(category)
    }

    /// Deletes a category.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        require_admin(ctx)?;
        if !self.category_repo.delete(id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}

fn require_admin(ctx: &RequestContext) -> Result<(), AppError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin access required"))
    }
}
