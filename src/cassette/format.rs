//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every port interaction in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name, e.g. `"image_editor"`.
    pub port: String,
    /// Method name, e.g. `"edit"`.
    pub method: String,
    /// Serialized call input.
    #[serde(default)]
    pub input: serde_json::Value,
    /// Serialized result, `{"Ok": ..}` or `{"Err": "message"}`.
    pub output: serde_json::Value,
}
