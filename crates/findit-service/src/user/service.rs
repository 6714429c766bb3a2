//! User self-service operations plus public profile reads.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use findit_core::error::AppError;
use findit_core::types::Pagination;
use findit_database::repositories::user::UserRepository;
use findit_entity::user::{UpdateProfile, User, UserStats};

use crate::context::RequestContext;
use crate::upload::{PROFILE_DIR, UploadService};

/// Handles user profile operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Image storage for profile photos.
    uploads: Arc<UploadService>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>, uploads: Arc<UploadService>) -> Self {
        Self { user_repo, uploads }
    }

    /// Lists users.
    pub async fn list_users(&self, page: Pagination) -> Result<Vec<User>, AppError> {
        self.user_repo.find_all(page).await
    }

    /// Gets a user by ID.
    pub async fn get_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.get_user(ctx.user_id).await
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        data: UpdateProfile,
    ) -> Result<User, AppError> {
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(AppError::validation("Name cannot be empty"));
        }

        let user = self.user_repo.update_profile(ctx.user_id, &data).await?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Replace the current user's photo.
    ///
    /// The new image is stored first; the previous one is removed only after
    /// the row points at the new reference.
    pub async fn upload_photo(
        &self,
        ctx: &RequestContext,
        data: Bytes,
        file_name: &str,
        content_type: Option<&str>,
    ) -> Result<User, AppError> {
        let previous = self.get_profile(ctx).await?.user_photo;

        let reference = self
            .uploads
            .save_image(data, file_name, content_type, PROFILE_DIR)
            .await?;
        let user = self
            .user_repo
            .set_photo(ctx.user_id, Some(&reference))
            .await?;

        if let Some(old) = previous {
            self.uploads.delete_reference(&old).await;
        }

        info!(user_id = %ctx.user_id, photo = %reference, "Profile photo updated");
        Ok(user)
    }

    /// Remove the current user's photo.
    pub async fn delete_photo(&self, ctx: &RequestContext) -> Result<User, AppError> {
        let previous = self.get_profile(ctx).await?.user_photo;
        let user = self.user_repo.set_photo(ctx.user_id, None).await?;

        if let Some(old) = previous {
            self.uploads.delete_reference(&old).await;
        }

        info!(user_id = %ctx.user_id, "Profile photo removed");
        Ok(user)
    }

    /// Completed jobs and rating for a user.
    pub async fn stats(&self, user_id: Uuid) -> Result<UserStats, AppError> {
        if !self.user_repo.exists(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        self.user_repo.stats(user_id).await
    }

    /// Delete an account. Users may delete themselves; admins anyone.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        if !ctx.owns_or_admin(user_id) {
            return Err(AppError::forbidden("Cannot delete other users"));
        }

        let photo = self.get_user(user_id).await?.user_photo;
        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        if let Some(old) = photo {
            self.uploads.delete_reference(&old).await;
        }

        info!(user_id = %user_id, deleted_by = %ctx.user_id, "User deleted");
        Ok(())
    }
}
