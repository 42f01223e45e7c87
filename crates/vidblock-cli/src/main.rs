//! vidblock CLI: drive a video block against real upload endpoints.
//!
//! Endpoints come from flags, VIDBLOCK_BY_FILE_ENDPOINT and
//! VIDBLOCK_BY_URL_ENDPOINT, or a JSON tool config (`--config`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use vidblock::{settle, BlockParams, UploadOutcome, VideoBlock};
use vidblock_cli::{init_tracing, load_config, read_video_file, TerminalHost};

#[derive(Parser)]
#[command(name = "vidblock", about = "Upload a video through a video block and print the saved record")]
struct Cli {
    /// JSON tool config (camelCase keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Endpoint for file uploads
    #[arg(long, global = true, env = "VIDBLOCK_BY_FILE_ENDPOINT")]
    by_file: Option<String>,

    /// Endpoint for uploads by URL
    #[arg(long, global = true, env = "VIDBLOCK_BY_URL_ENDPOINT")]
    by_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video file from disk
    Upload {
        /// Path to the video file
        file: PathBuf,
    },
    /// Ask the server to fetch a video from a URL
    UploadUrl {
        /// URL of the video
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.by_file, cli.by_url)?;

    let block = VideoBlock::new(BlockParams::new(config, Arc::new(TerminalHost)))
        .context("Invalid video block configuration")?;
    block.render();

    let handle = match cli.command {
        Commands::Upload { file } => block.upload_file(read_video_file(&file).await?),
        Commands::UploadUrl { url } => block.upload_url(&url),
    };

    if let UploadOutcome::Uploaded(result) = settle(handle).await {
        // No real element here; report it ready so the block reaches `filled`.
        if let Some(media) = block.snapshot().media {
            block.media_event(&result.file.url, media.kind.ready_event(), None);
        }
    }

    let record = block.save();
    let out = serde_json::to_string_pretty(&record).context("Serialize record")?;
    println!("{}", out);

    if !VideoBlock::validate(&record) {
        anyhow::bail!("Upload did not produce a valid video record");
    }
    Ok(())
}
