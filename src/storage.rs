use crate::error_utils::serialize_to_json_with_context;
use crate::selection::ResolutionMap;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the run summary as a JSON object, overwriting any previous content.
pub fn write_summary(map: &ResolutionMap, path: &Path) -> Result<()> {
    let json = serialize_to_json_with_context(map, "photo summary")?;

    fs::write(path, json).with_context(|| {
        format!("Failed to write summary to {path}", path = path.display())
    })?;

    info!(
        "Saved summary of {n} photo(s) to {path}",
        n = map.len(),
        path = path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_summary_round_trip() {
        let mut map = ResolutionMap::new();
        map.insert_or_disambiguate(10, 1_577_836_800, "https://example.com/b.jpg".to_string());
        map.insert_or_disambiguate(10, 1_580_515_200, "https://example.com/c.jpg".to_string());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photos_load.json");
        write_summary(&map, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::to_value(&map).unwrap());
        assert_eq!(
            written,
            serde_json::json!({
                "10": "https://example.com/b.jpg",
                "10 + 1580515200": "https://example.com/c.jpg"
            })
        );
    }

    #[test]
    fn test_summary_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photos_load.json");
        fs::write(&path, "{\"stale\": \"entry\"}").unwrap();

        let mut map = ResolutionMap::new();
        map.insert_or_disambiguate(1, 100, "https://example.com/a.jpg".to_string());
        write_summary(&map, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"1": "https://example.com/a.jpg"})
        );
    }
}
