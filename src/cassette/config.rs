//! Cassette loading.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    let cassette: Cassette = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
    Ok(CassetteReplayer::new(&cassette))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_hand_written_cassette() {
        let dir = std::env::temp_dir().join("pixelart_cassette_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.cassette.yaml");
        std::fs::write(
            &path,
            "name: hand-written\n\
             recorded_at: \"2026-01-01T00:00:00Z\"\n\
             commit: test\n\
             interactions:\n\
             \x20 - seq: 0\n\
             \x20   port: image_editor\n\
             \x20   method: edit\n\
             \x20   output:\n\
             \x20     Err: boom\n",
        )
        .unwrap();

        let mut replayer = load_cassette(&path).unwrap();
        let interaction = replayer.next_interaction("image_editor", "edit").unwrap();
        assert_eq!(interaction.output["Err"], "boom");
        assert!(interaction.input.is_null());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_nonexistent_fails() {
        assert!(load_cassette(Path::new("/nonexistent/cassette.yaml")).is_err());
    }

    #[test]
    fn load_malformed_fails() {
        let path = std::env::temp_dir().join("pixelart_cassette_malformed.yaml");
        std::fs::write(&path, "interactions: [not, a, cassette").unwrap();
        let err = load_cassette(&path).unwrap_err();
        assert!(err.contains("Failed to parse cassette file"));
        let _ = std::fs::remove_file(&path);
    }
}
