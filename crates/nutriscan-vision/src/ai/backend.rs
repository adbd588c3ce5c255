//! Backend abstraction for vision-capable models

use image::ImageFormat;
use nutriscan_types::{Error, Result};

/// An uploaded photo, ready to be sent to a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Original file name, used for multipart uploads and log lines
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageInput {
    /// Wrap raw bytes, sniffing the format from the content.
    ///
    /// Only JPEG, PNG and WEBP are accepted.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let format = image::guess_format(&bytes)?;
        match format {
            ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP => Ok(Self {
                name,
                mime_type: format.to_mime_type().to_string(),
                bytes,
            }),
            other => Err(Error::InvalidImageFormat(format!(
                "{}: unsupported format {:?}",
                name, other
            ))),
        }
    }
}

/// A model that answers one prompt about an ordered set of images.
///
/// Implementations send everything in a single request and never retry.
pub trait VisionBackend {
    fn send_prompt(&self, prompt: &str, images: &[ImageInput]) -> Result<String>;
}

impl<B: VisionBackend + ?Sized> VisionBackend for &B {
    fn send_prompt(&self, prompt: &str, images: &[ImageInput]) -> Result<String> {
        (**self).send_prompt(prompt, images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscan_types::ErrorKind;

    // Smallest valid PNG header is enough for format sniffing
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];
    const GIF_MAGIC: &[u8] = b"GIF89a\x01\x00\x01\x00";

    #[test]
    fn test_png_detected() {
        let img = ImageInput::from_bytes("rotulo.png", PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(img.mime_type, "image/png");
    }

    #[test]
    fn test_jpeg_detected() {
        let img = ImageInput::from_bytes("painel.jpg", JPEG_MAGIC.to_vec()).unwrap();
        assert_eq!(img.mime_type, "image/jpeg");
    }

    #[test]
    fn test_gif_rejected() {
        let err = ImageInput::from_bytes("a.gif", GIF_MAGIC.to_vec()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = ImageInput::from_bytes("a.txt", b"hello".to_vec()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}
