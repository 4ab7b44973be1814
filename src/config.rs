use crate::error_utils::{get_optional_env_var, parse_json_with_context};
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Bearer tokens for the two services, read once at startup.
///
/// File format:
/// `{"vk": {"token": "..."}, "yandex_disk": {"token": "..."}}`
///
/// The `VK_TOKEN` and `YANDEX_DISK_TOKEN` environment variables take
/// precedence over the file when set.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub vk: Section,
    pub yandex_disk: Section,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub token: String,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to read credentials file {path}",
                path = path.display()
            )
        })?;

        let mut credentials: Credentials = parse_json_with_context(&contents, "credentials")?;
        credentials.apply_overrides(
            get_optional_env_var("VK_TOKEN"),
            get_optional_env_var("YANDEX_DISK_TOKEN"),
        );
        credentials.validate()?;

        Ok(credentials)
    }

    fn apply_overrides(&mut self, vk_token: Option<String>, yandex_disk_token: Option<String>) {
        if let Some(token) = vk_token {
            debug!("Using VK token from environment");
            self.vk.token = token;
        }
        if let Some(token) = yandex_disk_token {
            debug!("Using Yandex Disk token from environment");
            self.yandex_disk.token = token;
        }
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.vk.token.is_empty(), "VK token is empty");
        ensure!(
            !self.yandex_disk.token.is_empty(),
            "Yandex Disk token is empty"
        );
        Ok(())
    }
}
