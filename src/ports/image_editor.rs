//! Image editor port for remote image-to-image models.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Raw image bytes plus their media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlob {
    /// Raw image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

impl ImageBlob {
    /// Create a blob from bytes and a media type.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self { data, mime_type: mime_type.into() }
    }
}

/// A single edit call: one source image plus the effective instruction.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// The source image.
    pub image: ImageBlob,
    /// The full instruction sent to the model.
    pub instruction: String,
}

/// The image returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditResult {
    /// The edited image.
    pub image: ImageBlob,
}

/// Boxed future type returned by [`ImageEditor::edit`].
pub type EditFuture<'a> = Pin<Box<dyn Future<Output = Result<EditResult, EditError>> + Send + 'a>>;

/// Edits an image according to a text instruction via an external API.
///
/// Each call issues at most one remote request and settles exactly once.
pub trait ImageEditor: Send + Sync {
    /// Edit the image in `request`.
    fn edit(&self, request: &EditRequest) -> EditFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
