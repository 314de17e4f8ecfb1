//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::adapters::live::gemini::GeminiEditor;
use crate::adapters::recording::image_editor::RecordingImageEditor;
use crate::adapters::replaying::image_editor::ReplayingImageEditor;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::ApiCredential;
use crate::error::EditError;
use crate::ports::ImageEditor;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image editor port.
    pub editor: Box<dyn ImageEditor>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to Gemini with the given credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(credential: ApiCredential, timeout: Option<Duration>) -> Result<Self, EditError> {
        let editor = GeminiEditor::new(credential, timeout)?;
        Ok(Self { editor: Box::new(editor) })
    }

    /// Create a recording context that wraps a live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live adapter cannot be created.
    pub fn recording(
        credential: ApiCredential,
        timeout: Option<Duration>,
    ) -> Result<(Self, RecordingSession), EditError> {
        let live_ctx = Self::live(credential, timeout)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".pixelart/cassettes")
            .join(&timestamp)
            .join("image_editor.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_editor"),
            commit_hash(),
        )));

        let editor = RecordingImageEditor::new(live_ctx.editor, Arc::clone(&recorder));
        Ok((Self { editor: Box::new(editor) }, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, EditError> {
        let replayer = load_cassette(path).map_err(EditError::Config)?;
        let editor = ReplayingImageEditor::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { editor: Box::new(editor) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
