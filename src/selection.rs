use crate::datetime_utils::{format_for_display, from_unix_timestamp};
use crate::vk::{PhotoPage, PhotoSize};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

/// Insertion-ordered mapping from display key to a photo URL.
///
/// Display keys are derived from like-counts; when two photos on the same
/// page share a like-count, the later one gets a composite key carrying the
/// photo date, so entries never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionMap {
    entries: Vec<(String, String)>,
}

impl ResolutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert a photo URL under its like-count, falling back to the
    /// `"<likes> + <date>"` composite key when the bare count is already
    /// taken. Returns the key that was used.
    pub fn insert_or_disambiguate(&mut self, likes: i64, date: i64, url: String) -> String {
        let bare = likes.to_string();
        let key = if self.contains_key(&bare) {
            format!("{likes} + {date}")
        } else {
            bare
        };
        self.entries.push((key.clone(), url));
        key
    }
}

impl Serialize for ResolutionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Pick the max-resolution URL of each photo on the page.
///
/// Variants are compared by height with `>=`, so among equal maximum heights
/// the last variant in the listing wins. A photo without size variants is
/// skipped.
pub fn select_max_resolution(page: &PhotoPage) -> ResolutionMap {
    let mut map = ResolutionMap::new();

    for photo in &page.items {
        let Some(best) = max_height_variant(&photo.sizes) else {
            warn!("Photo {id} has no size variants, skipping", id = photo.id);
            continue;
        };

        let key = map.insert_or_disambiguate(photo.likes.count, photo.date, best.url.clone());
        debug!(
            "Selected {height}px variant of photo {id} ({taken}) as \"{key}\"",
            height = best.height,
            id = photo.id,
            taken = format_for_display(&from_unix_timestamp(photo.date)),
        );
    }

    map
}

fn max_height_variant(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    let mut best: Option<&PhotoSize> = None;
    for size in sizes {
        if best.is_none_or(|b| size.height >= b.height) {
            best = Some(size);
        }
    }
    best
}
