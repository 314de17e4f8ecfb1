//! CLI argument parsing with clap.

use std::time::Duration;

use clap::Parser;

/// Turn a photo into pixel art with a Gemini image model.
#[derive(Parser, Debug)]
#[command(name = "pixelart", version, about)]
pub struct Cli {
    /// Source image (PNG, JPEG, or WebP).
    pub input: String,

    /// Extra style instructions, e.g. "16-color palette, SNES style".
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the style instructions.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,

    /// Model name or short alias [default: from config, else nano-banana].
    #[arg(short, long)]
    pub model: Option<String>,

    /// Convert the result to this format: jpeg, png, webp.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Request timeout in seconds; 0 waits indefinitely [default: from config, else 120].
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the style text from the positional argument or the file flag.
    ///
    /// Neither being given is fine: the base instruction is always sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt file cannot be read.
    pub fn resolve_prompt(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path).map(|s| s.trim().to_string())
        } else {
            Ok(String::new())
        }
    }
}

/// Convert a timeout in seconds to a request timeout; `0` means none.
#[must_use]
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
