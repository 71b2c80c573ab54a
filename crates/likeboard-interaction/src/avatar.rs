//! Avatar upload encoding.
//!
//! Registration sends the avatar inline as a `data:` URI.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use likeboard_core::{LikeboardError, Result};
use std::path::Path;

/// Largest avatar accepted client-side.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Reads an image file and returns it as a `data:<mime>;base64,...` URI.
pub fn encode_avatar(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    if bytes.is_empty() {
        return Err(LikeboardError::validation(format!(
            "Avatar file is empty: {}",
            path.display()
        )));
    }
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(LikeboardError::validation(format!(
            "Avatar file exceeds {} MB",
            MAX_AVATAR_BYTES / (1024 * 1024)
        )));
    }

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(LikeboardError::validation(format!(
            "Avatar must be an image, got {}",
            mime
        )));
    }

    Ok(format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("me.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let uri = encode_avatar(&path).unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_rejects_empty_and_non_image() {
        let temp_dir = TempDir::new().unwrap();
        let empty = temp_dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(encode_avatar(&empty), Err(LikeboardError::Validation(_))));

        let text = temp_dir.path().join("notes.txt");
        std::fs::write(&text, "hello").unwrap();
        assert!(matches!(encode_avatar(&text), Err(LikeboardError::Validation(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = encode_avatar(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(LikeboardError::Io { .. })));
    }
}
