//! The pixel-art edit client: instruction composition over an [`ImageEditor`].

use crate::error::EditError;
use crate::ports::{EditRequest, EditResult, ImageBlob, ImageEditor};

/// Instruction every request starts with.
pub const BASE_INSTRUCTION: &str = "convert this image to pixel art";

/// Append the caller's style text to [`BASE_INSTRUCTION`].
///
/// Blank text yields the base alone; anything else is appended verbatim.
#[must_use]
pub fn compose_instruction(style: &str) -> String {
    if style.trim().is_empty() {
        BASE_INSTRUCTION.to_string()
    } else {
        format!("{BASE_INSTRUCTION} {style}")
    }
}

/// Turns images into pixel art through a remote model.
///
/// Holds no mutable state, so one client can serve concurrent calls.
pub struct ImageEditClient {
    editor: Box<dyn ImageEditor>,
    model: String,
}

impl ImageEditClient {
    /// Create a client that sends requests for `model` through `editor`.
    pub fn new(editor: Box<dyn ImageEditor>, model: impl Into<String>) -> Self {
        Self { editor, model: model.into() }
    }

    /// Convert `image` to pixel art, refined by the caller's `instruction`.
    ///
    /// Issues exactly one remote request and never retries.
    ///
    /// # Errors
    ///
    /// - [`EditError::InvalidArgument`] if `image` has no bytes.
    /// - [`EditError::Transport`] if the remote call fails.
    /// - [`EditError::NoImageInResponse`] if the reply carries no image.
    pub async fn edit_image(
        &self,
        image: ImageBlob,
        instruction: &str,
    ) -> Result<EditResult, EditError> {
        if image.data.is_empty() {
            return Err(EditError::InvalidArgument("image is empty".to_string()));
        }

        let request = EditRequest {
            model: self.model.clone(),
            image,
            instruction: compose_instruction(instruction),
        };

        tracing::info!(model = %request.model, instruction = %request.instruction, "Editing image");

        match self.editor.edit(&request).await {
            Ok(result) => {
                tracing::debug!(
                    mime_type = %result.image.mime_type,
                    bytes = result.image.data.len(),
                    "Received edited image"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "Image edit failed");
                Err(e)
            }
        }
    }
}
