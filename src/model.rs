//! Model name resolution and validation.

/// Short name aliases for Gemini image models.
const ALIASES: &[(&str, &str)] = &[
    ("nano-banana", "gemini-2.5-flash-image"),
    ("nano-banana-2", "gemini-3.1-flash-image-preview"),
    ("nano-banana-pro", "gemini-3-pro-image-preview"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(name: &str) -> String {
    ALIASES
        .iter()
        .find(|&&(alias, _)| alias == name)
        .map_or_else(|| name.to_string(), |&(_, full)| full.to_string())
}

/// Check that a resolved model name targets the Gemini API.
///
/// # Errors
///
/// Returns an error if the model name is not a `gemini-*` identifier made
/// of lowercase letters, digits, `.` and `-`. The name becomes a URL path
/// segment, so anything else is refused rather than escaped.
pub fn validate_model(model: &str) -> Result<(), String> {
    let well_formed = model
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-');
    if model.starts_with("gemini") && well_formed {
        Ok(())
    } else {
        let aliases: Vec<&str> = ALIASES.iter().map(|&(alias, _)| alias).collect();
        Err(format!(
            "Unsupported model '{model}'. Expected 'gemini-*' or one of: {}.",
            aliases.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_nano_banana() {
        assert_eq!(resolve_model("nano-banana"), "gemini-2.5-flash-image");
    }

    #[test]
    fn resolve_newer_aliases() {
        assert_eq!(resolve_model("nano-banana-2"), "gemini-3.1-flash-image-preview");
        assert_eq!(resolve_model("nano-banana-pro"), "gemini-3-pro-image-preview");
    }

    #[test]
    fn resolve_exact_name_passthrough() {
        assert_eq!(resolve_model("gemini-3-pro-image-preview"), "gemini-3-pro-image-preview");
    }

    #[test]
    fn validate_gemini_models() {
        assert!(validate_model("gemini-2.5-flash-image").is_ok());
        assert!(validate_model(&resolve_model("nano-banana-pro")).is_ok());
    }

    #[test]
    fn validate_rejects_other_providers() {
        let err = validate_model("gpt-image-1").unwrap_err();
        assert!(err.contains("Unsupported model"));
        assert!(err.contains("nano-banana"));
        assert!(validate_model("dall-e-3").is_err());
    }

    #[test]
    fn validate_rejects_path_and_query_characters() {
        assert!(validate_model("gemini-x/../foo").is_err());
        assert!(validate_model("gemini?key=x").is_err());
        assert!(validate_model("gemini-2.5#frag").is_err());
        assert!(validate_model("gemini 2.5").is_err());
        assert!(validate_model("Gemini-2.5-flash-image").is_err());
    }
}
