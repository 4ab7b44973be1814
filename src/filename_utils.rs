use sanitize_filename::sanitize;

/// Remote folder on Yandex Disk that receives the uploads.
pub const UPLOAD_FOLDER: &str = "image_vk";

/// Build the remote upload path for a display key.
/// Format: image_vk/<key>.jpg
pub fn upload_path(display_key: &str) -> String {
    format!("{UPLOAD_FOLDER}/{name}.jpg", name = sanitize(display_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_path() {
        assert_eq!(upload_path("10"), "image_vk/10.jpg");
    }

    #[test]
    fn test_upload_path_keeps_composite_keys() {
        assert_eq!(
            upload_path("5 + 1580515200"),
            "image_vk/5 + 1580515200.jpg"
        );
    }

    #[test]
    fn test_upload_path_sanitizes_separators() {
        let path = upload_path("weird/key\\name");
        assert_eq!(path, "image_vk/weirdkeyname.jpg");
    }
}
