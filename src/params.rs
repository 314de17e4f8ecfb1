//! Image format and media type helpers.

/// Media types accepted as input images.
pub const SUPPORTED_INPUT_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Validate the output format parameter.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<(), String> {
    match format {
        "jpeg" | "png" | "webp" => Ok(()),
        _ => Err(format!("Unsupported format '{format}'. Valid: jpeg, png, webp")),
    }
}

/// Get the file extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &'static str {
    match format {
        "png" => "png",
        "webp" => "webp",
        // jpeg and any unknown format default to jpg
        _ => "jpg",
    }
}

/// Get the file extension for a media type returned by the model.
#[must_use]
pub fn mime_extension(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        // The Gemini image models return PNG unless told otherwise.
        _ => "png",
    }
}

/// Check if a media type matches the requested output format.
#[must_use]
pub fn mime_matches_format(mime: &str, format: &str) -> bool {
    matches!((mime, format), ("image/jpeg", "jpeg") | ("image/png", "png") | ("image/webp", "webp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_format_valid() {
        assert!(validate_format("jpeg").is_ok());
        assert!(validate_format("png").is_ok());
        assert!(validate_format("webp").is_ok());
    }

    #[test]
    fn validate_format_invalid() {
        assert!(validate_format("gif").is_err());
        assert!(validate_format("bmp").is_err());
    }

    #[test]
    fn format_extension_mapping() {
        assert_eq!(format_extension("jpeg"), "jpg");
        assert_eq!(format_extension("png"), "png");
        assert_eq!(format_extension("webp"), "webp");
    }

    #[test]
    fn mime_extension_mapping() {
        assert_eq!(mime_extension("image/png"), "png");
        assert_eq!(mime_extension("image/jpeg"), "jpg");
        assert_eq!(mime_extension("image/webp"), "webp");
        assert_eq!(mime_extension("application/octet-stream"), "png");
    }

    #[test]
    fn mime_matches() {
        assert!(mime_matches_format("image/jpeg", "jpeg"));
        assert!(mime_matches_format("image/png", "png"));
        assert!(mime_matches_format("image/webp", "webp"));
        assert!(!mime_matches_format("image/jpeg", "png"));
        assert!(!mime_matches_format("image/png", "jpeg"));
    }
}
