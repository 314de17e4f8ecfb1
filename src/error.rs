//! Unified error type for pixelart.

use thiserror::Error;

/// Fixed, user-facing message for a completed response that carried no image.
pub const NO_IMAGE_MESSAGE: &str = "No image data found in the API response.";

/// Errors that can occur while turning an image into pixel art.
#[derive(Debug, Error)]
pub enum EditError {
    /// The remote call could not be completed or returned a fault status.
    #[error("{0}")]
    Transport(String),

    /// The remote call completed but no part carried image data.
    #[error("No image data found in the API response.")]
    NoImageInResponse,

    /// Configuration error, including a missing credential.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),
}

impl From<reqwest::Error> for EditError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("request timed out: {e}"))
        } else if e.is_connect() {
            Self::Transport(format!("connection failed: {e}"))
        } else {
            Self::Transport(format!("network error: {e}"))
        }
    }
}
