use crate::error_utils::parse_http_response_json;
use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// VK API specific errors with structured information
#[derive(Debug, Error)]
pub enum VkError {
    #[error("Could not resolve screen name: {message}")]
    ScreenNameResolution { message: String },

    #[error("VK API error {code}: {message}")]
    Api { code: i64, message: String },
}

const VK_API_BASE: &str = "https://api.vk.com";
const VK_API_VERSION: &str = "5.199";

/// Page size for `photos.get`; only the first page is ever fetched.
pub const PROFILE_PAGE_SIZE: u32 = 5;

/// VK wraps every method result in an envelope carrying either `response`
/// or `error`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: Option<T>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error_code: i64,
    error_msg: String,
}

#[derive(Debug, Deserialize)]
struct ResolvedObject {
    object_id: i64,
    #[serde(rename = "type", default)]
    object_type: String,
}

/// One page of `photos.get` results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoPage {
    #[serde(default)]
    pub count: u32,
    pub items: Vec<Photo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,

    /// Upload time, unix seconds.
    pub date: i64,

    pub likes: Likes,

    /// Size variants as returned by the API; order matters for selection.
    #[serde(default)]
    pub sizes: Vec<PhotoSize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Likes {
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSize {
    pub height: u32,

    #[serde(default)]
    pub width: u32,

    pub url: String,

    /// VK size letter (s, m, x, ...); unused by selection.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A user identifier as typed by the user: a literal numeric id is used
/// verbatim, anything else goes through `utils.resolveScreenName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdentifier {
    Id(i64),
    ScreenName(String),
}

/// Classify free-text input as a numeric id or a screen name.
pub fn parse_user_identifier(input: &str) -> Result<UserIdentifier> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        bail!("User identifier cannot be empty");
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let id = trimmed
            .parse::<i64>()
            .with_context(|| format!("Numeric user id out of range: {trimmed}"))?;
        return Ok(UserIdentifier::Id(id));
    }

    Ok(UserIdentifier::ScreenName(trimmed.to_string()))
}

/// VK API client for reading a user's profile photos
pub struct VkClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl VkClient {
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_base_url(access_token, VK_API_BASE)
    }

    /// Base URL override, used by tests to point the client at a mock server.
    pub fn with_base_url(access_token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn method<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<Envelope<T>> {
        let url = format!("{base}/method/{method}", base = self.base_url);
        debug!(%method, "Making request to VK API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("v", VK_API_VERSION),
            ])
            .query(params)
            .send()
            .await
            .with_context(|| format!("Failed to send {method} request to VK API"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("VK API {method} request failed with HTTP status {status}");
        }

        parse_http_response_json(response, &format!("VK API {method}")).await
    }

    /// Resolve a screen name to a numeric object id.
    pub async fn resolve_screen_name(&self, screen_name: &str) -> Result<i64> {
        let envelope: Envelope<ResolvedObject> = self
            .method(
                "utils.resolveScreenName",
                &[("screen_name", screen_name.to_string())],
            )
            .await?;

        if let Some(error) = envelope.error {
            return Err(VkError::ScreenNameResolution {
                message: error.error_msg,
            }
            .into());
        }

        let object = envelope.response.with_context(|| {
            format!("VK resolveScreenName response for {screen_name} is missing the response field")
        })?;

        info!(
            "Resolved screen name {screen_name} to {object_type} id {id}",
            object_type = object.object_type,
            id = object.object_id
        );

        Ok(object.object_id)
    }

    /// Fetch the first page of a user's profile album.
    pub async fn profile_photos(&self, owner_id: i64) -> Result<PhotoPage> {
        let envelope: Envelope<PhotoPage> = self
            .method(
                "photos.get",
                &[
                    ("owner_id", owner_id.to_string()),
                    ("album_id", "profile".to_string()),
                    ("extended", "1".to_string()),
                    ("photo_sizes", "1".to_string()),
                    ("count", PROFILE_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        if let Some(error) = envelope.error {
            return Err(VkError::Api {
                code: error.error_code,
                message: error.error_msg,
            }
            .into());
        }

        let page = envelope
            .response
            .with_context(|| format!("VK photos.get response for owner {owner_id} is missing the response field"))?;

        info!(
            "Fetched {n} profile photo(s) for owner {owner_id}",
            n = page.items.len()
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_identifier() {
        assert_eq!(
            parse_user_identifier("12345").unwrap(),
            UserIdentifier::Id(12345)
        );
        assert_eq!(
            parse_user_identifier("  42  ").unwrap(),
            UserIdentifier::Id(42)
        );
    }

    #[test]
    fn test_parse_screen_name_identifier() {
        assert_eq!(
            parse_user_identifier("durov").unwrap(),
            UserIdentifier::ScreenName("durov".to_string())
        );
        // Mixed input is a screen name, not an id
        assert_eq!(
            parse_user_identifier("id12345").unwrap(),
            UserIdentifier::ScreenName("id12345".to_string())
        );
    }

    #[test]
    fn test_parse_empty_identifier() {
        assert!(parse_user_identifier("").is_err());
        assert!(parse_user_identifier("   ").is_err());
    }

    #[test]
    fn test_parse_photo_page() {
        let page_json = serde_json::json!({
            "count": 2,
            "items": [
                {
                    "id": 456_239_017,
                    "date": 1_577_836_800,
                    "likes": {"count": 10, "user_likes": 0},
                    "sizes": [
                        {"height": 100, "width": 75, "url": "https://sun1.example/a.jpg", "type": "m"},
                        {"height": 200, "width": 150, "url": "https://sun1.example/b.jpg", "type": "x"}
                    ]
                },
                {
                    "id": 456_239_018,
                    "date": 1_580_515_200,
                    "likes": {"count": 5},
                    "sizes": []
                }
            ]
        });

        let page: PhotoPage = serde_json::from_value(page_json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].likes.count, 10);
        assert_eq!(page.items[0].sizes[1].height, 200);
        assert_eq!(page.items[0].sizes[1].kind, "x");
        assert!(page.items[1].sizes.is_empty());
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = serde_json::json!({
            "error": {
                "error_code": 113,
                "error_msg": "Invalid user id",
                "request_params": []
            }
        });

        let envelope: Envelope<ResolvedObject> = serde_json::from_value(body).unwrap();
        assert!(envelope.response.is_none());
        let error = envelope.error.unwrap();
        assert_eq!(error.error_code, 113);
        assert_eq!(error.error_msg, "Invalid user id");
    }

    #[test]
    fn test_photo_missing_likes_fails_decode() {
        let photo_json = serde_json::json!({
            "id": 1,
            "date": 1_577_836_800,
            "sizes": []
        });

        assert!(serde_json::from_value::<Photo>(photo_json).is_err());
    }
}
