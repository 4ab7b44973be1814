use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;
use tracing::{info, warn};

use crate::disk::DiskClient;
use crate::error_utils::create_http_client_with_context;
use crate::filename_utils::upload_path;
use crate::media;
use crate::pacing::Pacer;
use crate::selection::{select_max_resolution, ResolutionMap};
use crate::storage;
use crate::vk::{self, UserIdentifier, VkClient};

/// Back up a user's profile photos: resolve the identifier, pick the
/// max-resolution URL of each photo, upload the photos to Yandex Disk and
/// persist the summary.
pub async fn execute(
    vk: &VkClient,
    disk: &DiskClient,
    user: Option<&str>,
    input: &mut dyn BufRead,
    summary_path: &Path,
    pacer: &Pacer,
) -> Result<()> {
    let owner_id = match read_user_identifier(user, input)? {
        UserIdentifier::Id(id) => id,
        UserIdentifier::ScreenName(name) => vk.resolve_screen_name(&name).await?,
    };

    let page = vk.profile_photos(owner_id).await?;

    let map = select_max_resolution(&page);
    info!("Selected {n} photo(s) for upload", n = map.len());

    upload_photos(disk, &map, pacer).await?;

    storage::write_summary(&map, summary_path)?;

    Ok(())
}

/// Read the user identifier from the CLI argument or interactively.
fn read_user_identifier(
    arg: Option<&str>,
    input: &mut dyn BufRead,
) -> Result<UserIdentifier> {
    let raw = match arg {
        Some(value) => value.to_string(),
        None => {
            eprint!("Enter a VK user id or screen name: ");
            let mut line = String::new();
            input
                .read_line(&mut line)
                .context("Failed to read user identifier from input")?;
            line
        }
    };

    vk::parse_user_identifier(&raw)
}

async fn upload_photos(disk: &DiskClient, map: &ResolutionMap, pacer: &Pacer) -> Result<()> {
    let client = create_http_client_with_context()?;

    for (key, url) in map.iter() {
        pacer.pause().await;

        let bytes = media::download_photo(&client, url).await?;

        let path = upload_path(key);
        let link = disk.upload_link(&path).await?;
        let Some(href) = link.href else {
            warn!("No upload href returned for {path}, skipping");
            continue;
        };

        disk.put_bytes(&href, bytes)
            .await
            .with_context(|| format!("Failed to upload {path}"))?;

        info!("Uploaded {path}");
    }

    Ok(())
}
