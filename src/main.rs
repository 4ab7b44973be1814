use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use vkdisk::{commands, config, disk, pacing, vk};

#[derive(Parser, Debug)]
#[command(
    name = "vkdisk",
    version,
    about = "Back up VK profile photos to Yandex Disk",
    long_about = "Fetches a user's VK profile photos, picks the highest-resolution variant of each, uploads them to Yandex Disk and writes a JSON summary of the selected URLs"
)]
struct Cli {
    /// VK user id or screen name (prompted interactively when omitted)
    user: Option<String>,

    /// Credentials file holding the VK and Yandex Disk tokens
    #[arg(short, long, env = "VKDISK_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Summary file recording the selected photo URLs
    #[arg(short, long, env = "VKDISK_OUTPUT", default_value = "photos_load.json")]
    output: PathBuf,

    /// Delay before each photo upload, in milliseconds
    #[arg(long, default_value = "250")]
    delay_ms: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args = Cli::parse();

    if args.verbose {
        debug!("Verbose mode enabled");
    }

    let credentials = config::Credentials::load(&args.config)?;

    let vk = vk::VkClient::new(&credentials.vk.token)?;
    let disk = disk::DiskClient::new(&credentials.yandex_disk.token)?;
    let pacer = pacing::Pacer::fixed(Duration::from_millis(args.delay_ms));

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    let result = commands::backup::execute(
        &vk,
        &disk,
        args.user.as_deref(),
        &mut input,
        &args.output,
        &pacer,
    )
    .await;

    if let Err(e) = result {
        // A failed screen-name resolution is reported cleanly with exit
        // status 1; everything else bubbles out of main.
        if let Some(vk::VkError::ScreenNameResolution { .. }) = e.downcast_ref::<vk::VkError>() {
            error!("{e}");
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}
