//! Recording adapter for the `ImageEditor` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_editor::{EditFuture, EditRequest, ImageEditor};

/// What a cassette keeps of a request. The source image itself is left out.
#[derive(Serialize)]
struct RecordedEdit<'a> {
    model: &'a str,
    instruction: &'a str,
    mime_type: &'a str,
    bytes: usize,
}

impl<'a> From<&'a EditRequest> for RecordedEdit<'a> {
    fn from(request: &'a EditRequest) -> Self {
        Self {
            model: &request.model,
            instruction: &request.instruction,
            mime_type: &request.image.mime_type,
            bytes: request.image.data.len(),
        }
    }
}

/// Records edit interactions while delegating to an inner implementation.
pub struct RecordingImageEditor {
    inner: Box<dyn ImageEditor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageEditor {
    /// Creates a new recording editor wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageEditor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageEditor for RecordingImageEditor {
    fn edit(&self, request: &EditRequest) -> EditFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.edit(&request).await;
            record_result(
                &self.recorder,
                "image_editor",
                "edit",
                &RecordedEdit::from(&request),
                &result,
            );
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;
    use crate::ports::image_editor::{EditResult, ImageBlob};

    struct FixedEditor;

    impl ImageEditor for FixedEditor {
        fn edit(&self, request: &EditRequest) -> EditFuture<'_> {
            let reply = if request.instruction.ends_with("fail") {
                Err(EditError::NoImageInResponse)
            } else {
                Ok(EditResult { image: ImageBlob::new(vec![1, 2, 3], "image/png") })
            };
            Box::pin(async move { reply })
        }
    }

    fn request(instruction: &str) -> EditRequest {
        EditRequest {
            model: "gemini-2.5-flash-image".into(),
            image: ImageBlob::new(vec![0; 64], "image/jpeg"),
            instruction: instruction.into(),
        }
    }

    #[tokio::test]
    async fn records_summary_and_outcome() {
        let path = std::env::temp_dir().join("pixelart_recording_test/edit.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec", "abc")));
        let editor = RecordingImageEditor::new(Box::new(FixedEditor), Arc::clone(&recorder));

        assert!(editor.edit(&request("ok")).await.is_ok());
        assert!(editor.edit(&request("fail")).await.is_err());
        drop(editor);

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        let written = recorder.finish().unwrap();
        let cassette: crate::cassette::format::Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();

        assert_eq!(cassette.interactions.len(), 2);
        let first = &cassette.interactions[0];
        assert_eq!(first.input["bytes"], 64);
        assert_eq!(first.input["mime_type"], "image/jpeg");
        assert!(first.input.get("data").is_none());
        assert_eq!(first.output["Ok"]["image"]["data"], "AQID");
        assert_eq!(
            cassette.interactions[1].output["Err"],
            "No image data found in the API response."
        );

        let _ = std::fs::remove_dir_all(written.parent().unwrap());
    }
}
