use crate::core::error::SiakError;
use crate::session::PendingAttachment;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::fs;
use std::path::Path;

/// MIME type sent to the provider for every inline image.
pub const IMAGE_MIME_TYPE: &str = "image/png";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "heic", "heif"];

/// Reads one image file and base64-encodes it for the pending slot.
pub fn encode(path: &Path) -> Result<PendingAttachment, SiakError> {
    if !is_image_path(path) {
        return Err(SiakError::Attachment(format!(
            "Not an image file: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path).map_err(|e| {
        SiakError::Attachment(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(PendingAttachment {
        filename,
        data: strip_data_url_prefix(&BASE64_STANDARD.encode(bytes)).to_string(),
    })
}

/// Drops a `data:<mime>;base64,` prefix if one is present.
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        if let Some((_, payload)) = encoded.split_once(',') {
            return payload;
        }
    }
    encoded
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn encodes_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xray.png");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"hello").unwrap();

        let attachment = encode(&path).unwrap();
        assert_eq!(attachment.filename, "xray.png");
        assert_eq!(attachment.data, "aGVsbG8=");
    }

    #[test]
    fn accepts_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SCAN.JPG");
        fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();
        assert!(encode(&path).is_ok());
    }

    #[test]
    fn rejects_non_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "text").unwrap();
        assert!(matches!(encode(&path), Err(SiakError::Attachment(_))));
    }

    #[test]
    fn missing_file_is_an_attachment_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.png");
        assert!(matches!(encode(&path), Err(SiakError::Attachment(_))));
    }

    #[test]
    fn strips_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    }
}
