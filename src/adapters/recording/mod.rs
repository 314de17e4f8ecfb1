//! Recording adapters that capture interactions to cassettes.

pub mod image_editor;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Failures to serialize or to take the lock are logged and the interaction
/// is dropped; recording never changes the outcome of the call.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output_json = match result {
        Ok(v) => serde_json::to_value(v).map(|inner| serde_json::json!({ "Ok": inner })),
        Err(e) => Ok(serde_json::json!({ "Err": e.to_string() })),
    };

    let (input_json, output_json) = match (serde_json::to_value(input), output_json) {
        (Ok(input), Ok(output)) => (input, output),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(port, method, error = %e, "Skipping unserializable interaction");
            return;
        }
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(e) => tracing::warn!(port, method, error = %e, "Recorder lock poisoned"),
    }
}
