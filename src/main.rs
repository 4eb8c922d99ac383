//! TextLens - Offline text OCR viewer
//!
//! Loads an image, preprocesses it for recognition, runs Tesseract and shows
//! the recognized text next to the image with every word boxed.

mod app;
mod config;
mod dashboard;
mod error;
mod shared;
mod storage;
mod vision;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::{AppContext, HeadlessOptions, OutputFormat};
use crate::config::AppConfig;

/// TextLens - Offline text OCR viewer
#[derive(Parser, Debug)]
#[command(name = "textlens")]
#[command(about = "Recognize uppercase text and digits in an image with Tesseract")]
struct Args {
    /// Configuration file (defaults to config.toml in the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Process this image without opening a window and print the result
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Output format for --image
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the annotated image as PNG (with --image)
    #[arg(long, requires = "image")]
    save_annotated: Option<PathBuf>,

    /// Write the preprocessed image as PNG (with --image)
    #[arg(long, requires = "image")]
    save_preprocessed: Option<PathBuf>,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.write_default_config {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => storage::get_config_dir()?.join("config.toml"),
        };
        config::save_config(&AppConfig::default(), &path)
            .with_context(|| format!("Failed to write {:?}", path))?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = load_or_create_config(args.config.as_deref())?;
    let context = AppContext::new(config)?;

    if let Some(image) = args.image {
        let options = HeadlessOptions {
            image,
            format: args.format,
            save_annotated: args.save_annotated,
            save_preprocessed: args.save_preprocessed,
        };
        let stdout = std::io::stdout();
        app::run_headless(&context, &options, &mut stdout.lock())?;
        return Ok(());
    }

    info!("TextLens starting...");
    dashboard::run_dashboard(context).map_err(|e| anyhow::anyhow!("Dashboard error: {}", e))?;
    info!("TextLens shutdown complete");

    Ok(())
}

/// Load configuration from an explicit path, the user config directory, or defaults
fn load_or_create_config(explicit: Option<&std::path::Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let config = config::load_config(path).with_context(|| format!("Failed to load {:?}", path))?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_dir) = storage::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            match config::load_config(&config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return Ok(config);
                }
                Err(e) => tracing::warn!("Ignoring unreadable {:?}: {}", config_path, e),
            }
        }
    }
    info!("Using default configuration");
    Ok(AppConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_headless_args() {
        let args = Args::try_parse_from(["textlens", "--image", "scan.png", "--format", "json"]).unwrap();
        assert_eq!(args.image, Some(PathBuf::from("scan.png")));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_save_annotated_requires_image() {
        assert!(Args::try_parse_from(["textlens", "--save-annotated", "out.png"]).is_err());
    }

    #[test]
    fn test_explicit_config_must_load() {
        assert!(load_or_create_config(Some(std::path::Path::new("/nonexistent/textlens.toml"))).is_err());
    }
}
