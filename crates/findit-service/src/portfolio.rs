//! Portfolio gallery items.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use findit_core::error::AppError;
use findit_database::repositories::portfolio::PortfolioRepository;
use findit_entity::portfolio::{CreatePortfolioItem, PortfolioItem, UpdatePortfolioItem};

use crate::context::RequestContext;
use crate::upload::{PORTFOLIO_DIR, UploadService};

/// Handles portfolio use cases.
#[derive(Debug, Clone)]
pub struct PortfolioService {
    /// Portfolio repository.
    portfolio_repo: Arc<PortfolioRepository>,
    /// Image storage for uploaded items.
    uploads: Arc<UploadService>,
}

/// An uploaded image plus optional captions.
#[derive(Debug, Clone)]
pub struct PortfolioUpload {
    pub data: Bytes,
    pub file_name: String,
    pub content_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PortfolioService {
    /// Creates a new portfolio service.
    pub fn new(portfolio_repo: Arc<PortfolioRepository>, uploads: Arc<UploadService>) -> Self {
        Self {
            portfolio_repo,
            uploads,
        }
    }

    /// A user's live items, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<PortfolioItem>, AppError> {
        self.portfolio_repo.find_by_user(user_id).await
    }

    /// Add an item that points at an existing image URL.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        image_url: String,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<PortfolioItem, AppError> {
        if image_url.trim().is_empty() {
            return Err(AppError::validation("imageUrl is required"));
        }

        let item = self
            .portfolio_repo
            .create(&CreatePortfolioItem {
                user_id: ctx.user_id,
                image_url,
                title,
                description,
            })
            .await?;
        info!(user_id = %ctx.user_id, item_id = %item.id, "Portfolio item created");
        Ok(item)
    }

    /// Store an uploaded image and add it as an item.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        upload: PortfolioUpload,
    ) -> Result<PortfolioItem, AppError> {
        let reference = self
            .uploads
            .save_image(
                upload.data,
                &upload.file_name,
                upload.content_type.as_deref(),
                PORTFOLIO_DIR,
            )
            .await?;

        match self
            .create(ctx, reference.clone(), upload.title, upload.description)
            .await
        {
            Ok(item) => Ok(item),
            Err(e) => {
                self.uploads.delete_reference(&reference).await;
                Err(e)
            }
        }
    }

    /// Edit one's own item.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdatePortfolioItem,
    ) -> Result<PortfolioItem, AppError> {
        self.find_owned(ctx, id, "Cannot update other users portfolio items")
            .await?;
        let item = self.portfolio_repo.update(id, &data).await?;
        info!(item_id = %id, "Portfolio item updated");
        Ok(item)
    }

    /// Soft-delete one's own item.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.find_owned(ctx, id, "Cannot delete other users portfolio items")
            .await?;
        if !self.portfolio_repo.soft_delete(id).await? {
            return Err(AppError::not_found("Portfolio item not found"));
        }
        info!(item_id = %id, "Portfolio item deleted");
        Ok(())
    }

    async fn find_owned(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        forbidden: &str,
    ) -> Result<PortfolioItem, AppError> {
        let item = self
            .portfolio_repo
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Portfolio item not found"))?;
        if item.user_id != ctx.user_id {
            return Err(AppError::forbidden(forbidden));
        }
        Ok(item)
    }
}
