//! Validation errors
//!
//! Raised while turning submitted form data into records. The server renders
//! them inline on the form they came from, so every variant maps to a
//! translation key instead of relying on its English message.

use thiserror::Error;

/// Allowed menu image extensions (lower-case, without the dot)
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid price: '{0}'")]
    InvalidPrice(String),

    #[error("Price must not be negative: {0}")]
    NegativePrice(String),

    #[error("Unsupported image type '{0}'. Supported: jpg, jpeg, png, webp")]
    UnsupportedImageType(String),

    #[error("Invalid image file: {0}")]
    InvalidImage(String),

    /// The upload may have been cut off at the request size limit, so only
    /// the limit is known
    #[error("Image too large (max {max} bytes)")]
    ImageTooLarge { max: usize },
}

impl ValidationError {
    /// Translation key of the message shown to the user
    pub fn translation_key(&self) -> &'static str {
        match self {
            ValidationError::InvalidPrice(_) => "error_invalid_price",
            ValidationError::NegativePrice(_) => "error_negative_price",
            ValidationError::UnsupportedImageType(_) => "error_unsupported_image",
            ValidationError::InvalidImage(_) => "error_invalid_image",
            ValidationError::ImageTooLarge { .. } => "error_image_too_large",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_keys_are_distinct() {
        let errors = [
            ValidationError::InvalidPrice("abc".into()),
            ValidationError::NegativePrice("-1".into()),
            ValidationError::UnsupportedImageType("gif".into()),
            ValidationError::InvalidImage("truncated".into()),
            ValidationError::ImageTooLarge { max: 5 },
        ];
        let mut keys: Vec<_> = errors.iter().map(|e| e.translation_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), errors.len());
    }

    #[test]
    fn test_unsupported_image_message_names_extension() {
        let err = ValidationError::UnsupportedImageType("gif".into());
        assert!(err.to_string().contains("'gif'"));
    }
}
