//! Reading the source image from disk.

use std::path::Path;

use image::ImageFormat;

use crate::error::EditError;
use crate::params::SUPPORTED_INPUT_MIME_TYPES;
use crate::ports::ImageBlob;

/// Read an image file and detect its media type from its contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is empty, or is not a PNG,
/// JPEG, or WebP image.
pub fn read_image(path: &Path) -> Result<ImageBlob, EditError> {
    let data = std::fs::read(path).map_err(|e| {
        EditError::Io(std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))
    })?;
    blob_from_bytes(data)
        .map_err(|e| EditError::InvalidArgument(format!("{}: {e}", path.display())))
}

/// Wrap raw bytes in an [`ImageBlob`], sniffing the media type.
///
/// # Errors
///
/// Returns an error if the bytes are empty or not a supported image format.
pub fn blob_from_bytes(data: Vec<u8>) -> Result<ImageBlob, String> {
    if data.is_empty() {
        return Err("file is empty".to_string());
    }
    let format = image::guess_format(&data).map_err(|_| {
        format!("unrecognized image data. Supported: {SUPPORTED_INPUT_MIME_TYPES:?}")
    })?;
    let mime_type = match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::WebP => "image/webp",
        other => {
            return Err(format!(
                "unsupported image format {other:?}. Supported: {SUPPORTED_INPUT_MIME_TYPES:?}"
            ));
        }
    };
    Ok(ImageBlob::new(data, mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(2, 2);
        let mut buf = std::io::Cursor::new(Vec::<u8>::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn detects_png_and_jpeg() {
        let png = blob_from_bytes(encode(ImageFormat::Png)).unwrap();
        assert_eq!(png.mime_type, "image/png");
        let jpeg = blob_from_bytes(encode(ImageFormat::Jpeg)).unwrap();
        assert_eq!(jpeg.mime_type, "image/jpeg");
    }

    #[test]
    fn keeps_bytes_unchanged() {
        let bytes = encode(ImageFormat::Png);
        let blob = blob_from_bytes(bytes.clone()).unwrap();
        assert_eq!(blob.data, bytes);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(blob_from_bytes(Vec::new()).unwrap_err(), "file is empty");
    }

    #[test]
    fn rejects_unsupported_format() {
        let err = blob_from_bytes(encode(ImageFormat::Bmp)).unwrap_err();
        assert!(err.contains("unsupported image format"));
        assert!(blob_from_bytes(b"plain text".to_vec()).is_err());
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_image(Path::new("/nonexistent/photo.png")).unwrap_err();
        assert!(matches!(err, EditError::Io(_)));
        assert!(err.to_string().contains("/nonexistent/photo.png"));
    }

    #[test]
    fn read_image_from_disk() {
        let dir = std::env::temp_dir().join("pixelart_input_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("photo.png");
        std::fs::write(&path, encode(ImageFormat::Png)).unwrap();

        let blob = read_image(&path).unwrap();
        assert_eq!(blob.mime_type, "image/png");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
