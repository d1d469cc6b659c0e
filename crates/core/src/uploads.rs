//! Upload limits, file validation, and image metadata extraction.

use std::io::Cursor;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default maximum size of a single uploaded file (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Default maximum number of files accepted in one request.
pub const DEFAULT_MAX_UPLOADS_PER_REQUEST: usize = 20;

/// Default accepted file extensions (lowercase, without the dot).
pub const DEFAULT_SUPPORTED_FORMATS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "gif", "tiff", "heic"];

/// MIME types accepted for image uploads.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/tiff",
    "image/heic",
];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    pub max_upload_bytes: u64,
    pub max_uploads_per_request: usize,
    pub supported_formats: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_uploads_per_request: DEFAULT_MAX_UPLOADS_PER_REQUEST,
            supported_formats: DEFAULT_SUPPORTED_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl UploadLimits {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_upload_bytes == 0 {
            return Err(CoreError::Validation(
                "Maximum upload size must be greater than zero".into(),
            ));
        }
        if self.max_uploads_per_request == 0 {
            return Err(CoreError::Validation(
                "Maximum uploads per request must be greater than zero".into(),
            ));
        }
        if self.supported_formats.is_empty() {
            return Err(CoreError::Validation(
                "At least one supported upload format is required".into(),
            ));
        }
        Ok(())
    }

    /// Request body limit large enough for a full batch of maximum-size files.
    pub fn request_body_limit(&self) -> usize {
        let files = self.max_uploads_per_request as u64;
        // 64 KiB of slack per file for multipart framing and text fields.
        let total = files.saturating_mul(self.max_upload_bytes.saturating_add(64 * 1024));
        usize::try_from(total).unwrap_or(usize::MAX)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_formats.iter().any(|f| f == ext)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Lowercased extension of `filename` without the dot, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Check an uploaded file's size, extension and declared MIME type.
pub fn validate_upload(
    filename: &str,
    content_type: Option<&str>,
    size: u64,
    limits: &UploadLimits,
) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation(format!("File '{filename}' is empty")));
    }
    if size > limits.max_upload_bytes {
        return Err(CoreError::Validation(format!(
            "File too large (max. {}MB)",
            limits.max_upload_bytes / 1024 / 1024
        )));
    }

    let ext = extension_of(filename).unwrap_or_default();
    if !limits.supports_extension(&ext) {
        return Err(CoreError::Validation(format!(
            "Format not supported: '{ext}'. Supported: {}",
            limits.supported_formats.join(", ")
        )));
    }

    match content_type {
        Some(mime) if ALLOWED_MIME_TYPES.contains(&mime) => Ok(()),
        _ => Err(CoreError::Validation("Invalid file type".into())),
    }
}

/// Collision-resistant storage name that keeps the original extension.
///
/// Format: `<unix millis>-<32 hex chars><.ext>`.
pub fn secure_filename(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple();
    match extension_of(original) {
        Some(ext) if ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!("{millis}-{random}.{ext}")
        }
        _ => format!("{millis}-{random}"),
    }
}

/// `true` when `path` is relative and cannot escape its base directory.
pub fn is_safe_relative_path(path: &str) -> bool {
    if path.is_empty() || path.contains('\\') || path.contains('\0') {
        return false;
    }
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Pixel dimensions read from the image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Read width and height from the encoded header without decoding pixels.
///
/// Returns `None` for formats the decoder does not handle (e.g. HEIC) or
/// corrupt data.
pub fn image_dimensions(bytes: &[u8]) -> Option<ImageDimensions> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let (width, height) = reader.into_dimensions().ok()?;
    Some(ImageDimensions { width, height })
}
