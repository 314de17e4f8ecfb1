//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_editor;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;

/// A recorded outcome: the `Ok` payload, or the recorded error message.
pub(crate) enum Replayed<T> {
    Ok(T),
    Err(String),
}

/// Retrieve the next recorded output for a given port and method.
///
/// # Errors
///
/// Returns an error if the cassette has no more interactions for the pair.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().map_err(|e| format!("Replayer lock poisoned: {e}"))?;
    guard.next_interaction(port, method).map(|i| i.output.clone())
}

/// Decode a replayed output using the Ok/Err JSON convention.
///
/// # Errors
///
/// Returns an error if the `Ok` payload does not deserialize as `T`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<Replayed<T>, String> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Ok(Replayed::Err(msg));
    }
    let ok_val = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(ok_val)
        .map(Replayed::Ok)
        .map_err(|e| format!("Malformed cassette output: {e}"))
}
