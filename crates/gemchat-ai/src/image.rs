//! Image payloads attached to a session.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Raw image bytes plus MIME type.
///
/// Serializes `data` as standard base64.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlob {
    pub mime_type: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl std::fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBlob")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl ImageBlob {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Wrap bytes, sniffing the MIME type from the magic number.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let mime_type = detect_mime_type(&data).to_string();
        Self { mime_type, data }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let data = tokio::fs::read(path.as_ref()).await?;
        Ok(Self::from_bytes(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }
}

fn detect_mime_type(content: &[u8]) -> &'static str {
    match content {
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => "application/octet-stream",
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_formats() {
        let png = ImageBlob::from_bytes(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]);
        assert_eq!(png.mime_type, "image/png");

        let jpeg = ImageBlob::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(jpeg.mime_type, "image/jpeg");

        let gif = ImageBlob::from_bytes(b"GIF89a".to_vec());
        assert_eq!(gif.mime_type, "image/gif");

        let webp = ImageBlob::from_bytes(b"RIFF\x00\x00\x00\x00WEBPVP8 ".to_vec());
        assert_eq!(webp.mime_type, "image/webp");
    }

    #[test]
    fn unknown_or_short_input_is_octet_stream() {
        assert_eq!(
            ImageBlob::from_bytes(vec![1, 2]).mime_type,
            "application/octet-stream"
        );
        // RIFF container that is not WEBP (e.g. WAV)
        assert_eq!(
            ImageBlob::from_bytes(b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec()).mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn base64_encoding() {
        let blob = ImageBlob::new("image/png", b"hello".to_vec());
        assert_eq!(blob.to_base64(), "aGVsbG8=");

        let json = serde_json::to_value(&blob).unwrap();
        assert_eq!(json["data"], "aGVsbG8=");
        assert_eq!(json["mime_type"], "image/png");
    }

    #[test]
    fn debug_does_not_dump_bytes() {
        let blob = ImageBlob::new("image/png", vec![7; 4096]);
        let debug = format!("{blob:?}");
        assert!(debug.contains("len: 4096"));
        assert!(debug.len() < 100);
    }

    #[tokio::test]
    async fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xDB, 0x00]).unwrap();

        let blob = ImageBlob::from_path(&path).await.unwrap();
        assert_eq!(blob.mime_type, "image/jpeg");
        assert_eq!(blob.len(), 5);
    }

    #[tokio::test]
    async fn from_path_missing_file_errors() {
        let err = ImageBlob::from_path("/tmp/nonexistent_gemchat_photo.png")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
