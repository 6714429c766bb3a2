//! Multipart form extractor for image uploads.

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use bytes::Bytes;

use findit_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the form field carrying the image.
pub const FILE_FIELD: &str = "file";

/// The uploaded file part.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Raw contents.
    pub data: Bytes,
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-supplied MIME type.
    pub content_type: Option<String>,
}

/// A `multipart/form-data` body with one `file` part and optional text fields.
#[derive(Debug, Clone, Default)]
pub struct ImageForm {
    /// The `file` part, if sent.
    pub file: Option<FilePart>,
    /// Every other field, as text.
    pub fields: HashMap<String, String>,
}

impl ImageForm {
    /// The file part, or 400 "No file uploaded".
    pub fn require_file(&mut self) -> Result<FilePart, AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::validation("No file uploaded"))
    }

    /// Remove a text field, treating blank values as absent.
    pub fn take_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name).filter(|v| !v.trim().is_empty())
    }
}

impl FromRequest<AppState> for ImageForm {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let max = state.upload_service.max_file_size();
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let mut form = ImageForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, max))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| multipart_error(e, max))?;
                form.file = Some(FilePart {
                    data,
                    file_name,
                    content_type,
                });
            } else {
                let value = field.text().await.map_err(|e| multipart_error(e, max))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}

fn multipart_error(err: MultipartError, max: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError(AppError::validation(format!("File too large (max {max} bytes)")))
    } else {
        ApiError(AppError::validation(format!(
            "Invalid multipart body: {}",
            err.body_text()
        )))
    }
}
