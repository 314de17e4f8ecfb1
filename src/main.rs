//! Pixelart - turn photos into pixel art with a Gemini image model.

mod adapters;
mod cassette;
mod cli;
mod client;
mod config;
mod context;
mod error;
mod input;
mod model;
mod output;
mod params;
mod ports;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{timeout_from_secs, Cli};
use crate::client::ImageEditClient;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::EditError;
use crate::input::read_image;
use crate::model::{resolve_model, validate_model};
use crate::output::{output_extension, resolve_output_path, save_image};
use crate::params::validate_format;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "pixelart=debug" } else { "pixelart=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), EditError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(EditError::Config)?;

    let model_name = cli.model.as_deref().unwrap_or(&config.defaults.model);
    let model = resolve_model(model_name);
    validate_model(&model).map_err(EditError::InvalidArgument)?;
    tracing::debug!(%model, alias = model_name, "Resolved model");

    let format = cli.format.clone().or_else(|| config.defaults.format.clone());
    if let Some(ref format) = format {
        validate_format(format).map_err(EditError::InvalidArgument)?;
    }

    let timeout = timeout_from_secs(cli.timeout.unwrap_or(config.defaults.timeout_secs));

    // The credential is checked before any input is read or request sent.
    let replay_path = std::env::var("PIXELART_REPLAY").ok();
    let is_recording = std::env::var("PIXELART_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::debug!(cassette = %cassette_path, "Replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::debug!("Recording mode enabled");
        let (ctx, session) = ServiceContext::recording(config.credential()?, timeout)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(config.credential()?, timeout)?, None)
    };

    let input_path = Path::new(&cli.input);
    let image = read_image(input_path)?;
    let style = cli.resolve_prompt()?;

    let client = ImageEditClient::new(ctx.editor, model);
    let result = client.edit_image(image, &style).await;
    drop(client);

    // Write the cassette even when the call failed.
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => tracing::warn!(error = %e, "Failed to save cassette"),
        }
    }

    let result = result?;
    let ext = output_extension(format.as_deref(), &result.image.mime_type);
    let output_path = resolve_output_path(cli.output.as_deref(), input_path, ext);
    save_image(&result.image, format.as_deref(), &output_path)?;
    eprintln!("Saved: {}", output_path.display());

    Ok(())
}
