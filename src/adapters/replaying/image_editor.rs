//! Replaying adapter for the `ImageEditor` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result, Replayed};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::{EditError, NO_IMAGE_MESSAGE};
use crate::ports::image_editor::{EditFuture, EditRequest, EditResult, ImageEditor};

/// Serves recorded edit results from a cassette.
pub struct ReplayingImageEditor {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageEditor {
    /// Create a replaying editor backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageEditor for ReplayingImageEditor {
    fn edit(&self, _request: &EditRequest) -> EditFuture<'_> {
        let result = next_output(&self.replayer, "image_editor", "edit")
            .and_then(replay_result::<EditResult>)
            .map_err(EditError::Config)
            .and_then(|replayed| match replayed {
                Replayed::Ok(result) => Ok(result),
                Replayed::Err(msg) if msg == NO_IMAGE_MESSAGE => {
                    Err(EditError::NoImageInResponse)
                }
                Replayed::Err(msg) => Err(EditError::Transport(msg)),
            });
        Box::pin(async move { result })
    }
}
