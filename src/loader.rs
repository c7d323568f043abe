//! Decodes an image file into the canonical premultiplied BGRA buffer.

use std::path::Path;

use crate::error::{OverlayError, OverlayResult};
use crate::pixels::PixelBuffer;

/// Loads and decodes `path`, normalizes it to 32bpp BGRA and premultiplies
/// alpha. The intermediate decoded image is dropped before returning; on
/// failure no partial buffer escapes.
pub fn load(path: &Path) -> OverlayResult<PixelBuffer> {
    log::info!("loading image '{}'", path.display());

    let decoded = image::open(path)
        .map_err(|e| OverlayError::Load(format!("{}: {}", path.display(), e)))?;
    let rgba = decoded.into_rgba8();

    let buffer = PixelBuffer::from_straight_rgba(rgba)?;
    log::debug!(
        "decoded {}x{} image ({} bytes per row)",
        buffer.width(),
        buffer.height(),
        buffer.stride()
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlayError;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("desk-overlay-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, OverlayError::Load(_)));
    }

    #[test]
    fn test_corrupt_file_is_load_error() {
        let path = temp_path("corrupt.png");
        std::fs::write(&path, b"this is not an image").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, OverlayError::Load(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_png_round_trip_is_premultiplied_bgra() {
        let path = temp_path("pixel.png");
        let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 128]));
        image.save(&path).unwrap();

        let buffer = load(&path).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (2, 2));
        // Stored as B,G,R,A with each color channel scaled by 128/255.
        assert_eq!(buffer.row(0)[..4], [25, 50, 100, 128]);

        let _ = std::fs::remove_file(&path);
    }
}
