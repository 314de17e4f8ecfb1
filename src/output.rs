//! File naming, image saving, and format conversion.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::EditError;
use crate::params::{format_extension, mime_extension, mime_matches_format};
use crate::ports::ImageBlob;

/// Generate an output filename derived from the input file.
///
/// Sanitizes the input file stem to kebab-case, appends `-pixel` and a unix
/// timestamp, and adds `ext`.
#[must_use]
pub fn auto_filename(input: &Path, ext: &str) -> String {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let sanitized = sanitize_for_filename(&stem, 50);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{sanitized}-pixel-{timestamp}.{ext}")
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "image".to_string()
    } else {
        result
    }
}

/// Extension for the saved file: the requested format, or the returned type.
#[must_use]
pub fn output_extension(target_format: Option<&str>, source_mime: &str) -> &'static str {
    target_format.map_or_else(|| mime_extension(source_mime), format_extension)
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, input: &Path, ext: &str) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(input, ext)),
    }
}

/// Save an image to a file, converting format if one is requested and it
/// differs from the image's own.
///
/// # Errors
///
/// Returns an error if the file cannot be written or format conversion fails.
pub fn save_image(
    image: &ImageBlob,
    target_format: Option<&str>,
    output_path: &Path,
) -> Result<(), EditError> {
    match target_format {
        Some(format) if !mime_matches_format(&image.mime_type, format) => {
            convert_and_save(&image.data, format, output_path)
        }
        _ => std::fs::write(output_path, &image.data).map_err(EditError::Io),
    }
}

fn convert_and_save(data: &[u8], target_format: &str, output_path: &Path) -> Result<(), EditError> {
    let img = image::load_from_memory(data)
        .map_err(|e| EditError::ImageConversion(format!("Failed to decode image: {e}")))?;

    let image_format = match target_format {
        "jpeg" => image::ImageFormat::Jpeg,
        "png" => image::ImageFormat::Png,
        "webp" => image::ImageFormat::WebP,
        other => {
            return Err(EditError::ImageConversion(format!("Unsupported format: {other}")));
        }
    };

    // JPEG has no alpha channel; pixel art frequently does.
    let img = if image_format == image::ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };

    img.save_with_format(output_path, image_format)
        .map_err(|e| EditError::ImageConversion(format!("Failed to save as {target_format}: {e}")))
}
