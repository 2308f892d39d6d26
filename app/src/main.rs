//! poster-wall: generate and upload stylized collage covers for
//! Jellyfin/Emby media libraries.

mod config;
mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "poster-wall",
    version,
    about = "Render collage cover posters for media libraries and push them back to the server"
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Only process the library with this exact name.
    #[arg(long)]
    library: Option<String>,

    /// Render posters but never upload them.
    #[arg(long)]
    no_upload: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::AppConfig::load(&cli.config)?;
    tracing::info!(
        server = %config.server.base_url,
        server_type = %config.server_type,
        "Starting poster-wall"
    );

    let summary = pipeline::run(&config, cli.library.as_deref(), cli.no_upload).await?;
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        uploaded = summary.uploaded,
        "All libraries handled"
    );

    if summary.succeeded == 0 {
        anyhow::bail!("no library could be processed");
    }
    Ok(())
}
