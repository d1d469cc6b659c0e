//! Reading image files out of `multipart/form-data` requests.

use axum::body::Bytes;
use axum::extract::Multipart;
use shootdesk_core::uploads::{image_dimensions, validate_upload, ImageDimensions, UploadLimits};

use crate::error::{AppError, AppResult};

/// Multipart field name that carries files.
pub const FILE_FIELD: &str = "file";

/// One validated image from an upload request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub bytes: Bytes,
    /// `None` when the header could not be read (e.g. HEIC).
    pub dimensions: Option<ImageDimensions>,
}

impl UploadedImage {
    pub fn width(&self) -> Option<i32> {
        self.dimensions.and_then(|d| i32::try_from(d.width).ok())
    }

    pub fn height(&self) -> Option<i32> {
        self.dimensions.and_then(|d| i32::try_from(d.height).ok())
    }

    pub fn size(&self) -> i64 {
        self.bytes.len() as i64
    }
}

/// Collect every `file` field, validating each against `limits`.
///
/// Other fields are ignored. At least one file is required and no more than
/// `limits.max_uploads_per_request` are accepted.
pub async fn read_images(
    multipart: &mut Multipart,
    limits: &UploadLimits,
) -> AppResult<Vec<UploadedImage>> {
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if images.len() >= limits.max_uploads_per_request {
            return Err(AppError::BadRequest(format!(
                "Too many files (max. {} per request)",
                limits.max_uploads_per_request
            )));
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        validate_upload(
            &original_name,
            content_type.as_deref(),
            bytes.len() as u64,
            limits,
        )?;

        let dimensions = image_dimensions(&bytes);
        images.push(UploadedImage {
            original_name,
            bytes,
            dimensions,
        });
    }

    if images.is_empty() {
        return Err(AppError::BadRequest(
            "No files received in multipart upload".to_string(),
        ));
    }
    Ok(images)
}
