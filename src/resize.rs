//! Uniform bicubic scaling of premultiplied buffers.

use crate::error::{OverlayError, OverlayResult};
use crate::pixels::PixelBuffer;

/// Scales `buffer` uniformly by `factor` using Catmull-Rom (bicubic)
/// interpolation. Target dimensions truncate toward zero and must each be
/// at least 1.
///
/// The resampler runs over the premultiplied channel values as-is. That is
/// deliberate: interpolating straight-alpha colors bleeds the (invisible)
/// color of fully transparent pixels into opaque neighbors and produces
/// halos at cut-out edges.
pub fn resize(buffer: &PixelBuffer, factor: f64) -> OverlayResult<PixelBuffer> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(OverlayError::InvalidDimensions(format!(
            "scale factor {} is not a positive number",
            factor
        )));
    }

    let dst_w = (buffer.width() as f64 * factor).trunc() as i64;
    let dst_h = (buffer.height() as f64 * factor).trunc() as i64;
    if dst_w < 1 || dst_h < 1 {
        return Err(OverlayError::InvalidDimensions(format!(
            "{}x{} scaled by {} collapses to {}x{}",
            buffer.width(),
            buffer.height(),
            factor,
            dst_w,
            dst_h
        )));
    }
    let (dst_w, dst_h) = (dst_w as u32, dst_h as u32);

    // Channel order is irrelevant to the resampler, so the BGRA bytes ride
    // through an Rgba wrapper unchanged.
    let src: image::RgbaImage =
        image::ImageBuffer::from_raw(buffer.width(), buffer.height(), buffer.to_tight_vec())
            .ok_or_else(|| {
                OverlayError::Allocation("source rows do not match the buffer dimensions".into())
            })?;

    let scaled = image::imageops::resize(&src, dst_w, dst_h, image::imageops::FilterType::CatmullRom);
    log::debug!(
        "resized {}x{} -> {}x{} (factor {})",
        buffer.width(),
        buffer.height(),
        dst_w,
        dst_h,
        factor
    );

    PixelBuffer::from_premultiplied_parts(dst_w, dst_h, dst_w as usize * 4, scaled.into_raw())
        .ok_or_else(|| {
            OverlayError::Allocation(format!("cannot build a {}x{} destination buffer", dst_w, dst_h))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_buffer(width: u32, height: u32, px: [u8; 4]) -> PixelBuffer {
        let data = px.repeat((width * height) as usize);
        PixelBuffer::from_premultiplied_parts(width, height, width as usize * 4, data).unwrap()
    }

    #[test]
    fn test_dimensions_truncate() {
        let buf = flat_buffer(1000, 800, [1, 2, 3, 255]);
        let out = resize(&buf, 0.65).unwrap();
        assert_eq!((out.width(), out.height()), (650, 520));
    }

    #[test]
    fn test_upscale_truncates_too() {
        let buf = flat_buffer(3, 3, [1, 2, 3, 255]);
        let out = resize(&buf, 1.5).unwrap();
        // 3 * 1.5 = 4.5 -> 4
        assert_eq!((out.width(), out.height()), (4, 4));
    }

    #[test]
    fn test_degenerate_output_rejected() {
        let buf = flat_buffer(10, 10, [0, 0, 0, 255]);
        let err = resize(&buf, 0.05).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidDimensions(_)));
    }

    #[test]
    fn test_nonpositive_factor_rejected() {
        let buf = flat_buffer(4, 4, [0, 0, 0, 255]);
        assert!(matches!(
            resize(&buf, 0.0).unwrap_err(),
            OverlayError::InvalidDimensions(_)
        ));
        assert!(matches!(
            resize(&buf, -2.0).unwrap_err(),
            OverlayError::InvalidDimensions(_)
        ));
        assert!(matches!(
            resize(&buf, f64::NAN).unwrap_err(),
            OverlayError::InvalidDimensions(_)
        ));
    }

    #[test]
    fn test_flat_opaque_input_stays_flat() {
        let buf = flat_buffer(16, 16, [120, 80, 40, 255]);
        let out = resize(&buf, 0.5).unwrap();
        assert_eq!((out.width(), out.height()), (8, 8));
        for y in 0..out.height() {
            for px in out.row(y).chunks_exact(4) {
                assert_eq!(px, &[120, 80, 40, 255]);
            }
        }
    }

    #[test]
    fn test_output_remains_premultiplied() {
        // Fully transparent premultiplied input is all zeroes; any resample
        // of it must stay all zeroes (no halo reintroduction).
        let buf = flat_buffer(8, 8, [0, 0, 0, 0]);
        let out = resize(&buf, 0.5).unwrap();
        for y in 0..out.height() {
            assert!(out.row(y).iter().all(|b| *b == 0));
        }
    }
}
