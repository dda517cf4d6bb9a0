//! Image Upload Handler
//!
//! Validates and stores menu item images under the upload directory.
//! Supported formats: JPEG, PNG, WebP. Files are stored as
//! `<record-id>_<sanitized-stem>.<lower-case-ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use shared::error::ALLOWED_IMAGE_EXTENSIONS;
use shared::util::record_id;
use shared::ValidationError;

use crate::db::StoreError;
use crate::utils::AppResult;

/// A file field taken from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the browser sent, untrusted
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Menu image directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Largest accepted image in bytes
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate and save an upload, returning the stored filename.
    ///
    /// No file, or a file field with an empty name, means "no image" and
    /// returns an empty string without touching the disk.
    pub fn store(&self, upload: Option<&UploadedFile>) -> AppResult<String> {
        let Some(upload) = upload.filter(|u| !u.file_name.is_empty()) else {
            return Ok(String::new());
        };

        let (stem, ext) = split_allowed_name(&upload.file_name)?;
        self.validate_payload(&upload.bytes, &ext)?;

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let stored_name = format!("{}_{}.{}", record_id(), stem, ext);
        let path = self.dir.join(&stored_name);
        fs::write(&path, &upload.bytes).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!(
            original_name = %upload.file_name,
            stored_name = %stored_name,
            size = upload.bytes.len(),
            "Menu image uploaded"
        );

        Ok(stored_name)
    }

    fn validate_payload(&self, data: &[u8], ext: &str) -> Result<(), ValidationError> {
        if data.is_empty() {
            return Err(ValidationError::InvalidImage("empty file".to_string()));
        }

        if data.len() > self.max_bytes {
            tracing::debug!(size = data.len(), max = self.max_bytes, "Upload over size limit");
            return Err(ValidationError::ImageTooLarge {
                max: self.max_bytes,
            });
        }

        // Verify it's actually an image by trying to load it
        image::load_from_memory(data)
            .map_err(|e| ValidationError::InvalidImage(format!("{} ({})", e, ext)))?;

        Ok(())
    }
}

/// Sanitize `file_name` and check its extension against the allow-list.
///
/// Returns the sanitized stem and the lower-cased extension.
fn split_allowed_name(file_name: &str) -> Result<(String, String), ValidationError> {
    let sanitized = sanitize_filename(file_name);
    let path = Path::new(&sanitized);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ValidationError::UnsupportedImageType(
            if ext.is_empty() { file_name.to_string() } else { ext },
        ));
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    Ok((stem, ext))
}

/// Make an uploaded filename safe to use as a single path component.
///
/// Path separators become spaces, non-ASCII characters are dropped,
/// whitespace runs become `_`, anything outside `[A-Za-z0-9._-]` is removed
/// and leading/trailing dots and underscores are trimmed.
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}
