//! Photo intake and validation

use std::path::Path;

use nutriscan_types::{Error, Result};
use nutriscan_vision::ImageInput;
use tracing::debug;

/// Supported image extensions
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Check if a path is a supported image file
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Validate an image file exists and has a supported extension
pub fn validate_image(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    if !path.is_file() {
        return Err(Error::InvalidImageFormat(format!(
            "{} is not a file",
            path.display()
        )));
    }

    if !is_supported_image(path) {
        return Err(Error::InvalidImageFormat(format!(
            "Unsupported image format: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Read a photo from disk and make sure it decodes
pub fn load_image(path: &Path) -> Result<ImageInput> {
    validate_image(path)?;

    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)?;
    debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        "photo loaded"
    );

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("foto")
        .to_string();
    ImageInput::from_bytes(name, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscan_types::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("rotulo.jpg")));
        assert!(is_supported_image(Path::new("rotulo.JPEG")));
        assert!(is_supported_image(Path::new("painel.png")));
        assert!(is_supported_image(Path::new("bomba.webp")));
        assert!(!is_supported_image(Path::new("notas.txt")));
        assert!(!is_supported_image(Path::new("rotulo")));
    }

    #[test]
    fn test_missing_file() {
        let err = load_image(Path::new("/nonexistent/rotulo.jpg")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_load_real_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rotulo.png");
        image::RgbImage::new(4, 4).save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.name, "rotulo.png");
        assert_eq!(img.mime_type, "image/png");
        assert!(!img.bytes.is_empty());
    }

    #[test]
    fn test_corrupt_image_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rotulo.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = load_image(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}
