use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use feedwright::config::Config;
use feedwright::manifest::FeedManifest;
use feedwright::RenderOptions;

/// Get the config directory path (~/.config/feedwright/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedwright"))
}

#[derive(Parser, Debug)]
#[command(name = "feedwright", about = "Render a TOML feed definition as RSS 2.0")]
struct Args {
    /// Feed manifest (TOML)
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Write the feed to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (defaults to ~/.config/feedwright/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Indent output by two spaces, overriding the configured indent
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the rendered feed
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let options = if args.pretty {
        RenderOptions::pretty(2)
    } else {
        config.render_options()
    };

    let manifest = FeedManifest::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;
    let channel = manifest
        .into_channel(&config)
        .context("Invalid feed definition")?;

    match args.output {
        Some(path) => {
            channel
                .write_to_file(&path, &options)
                .with_context(|| format!("Failed to write feed to {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                items = channel.items().len(),
                "Feed written"
            );
        }
        None => {
            let xml = channel.to_xml_with(&options).context("Failed to render feed")?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(xml.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .context("Failed to write feed to stdout")?;
        }
    }

    Ok(())
}
