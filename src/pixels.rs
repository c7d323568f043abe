//! Premultiplied BGRA pixel grid shared by the load, resize and present stages.

use crate::error::{OverlayError, OverlayResult};

pub const BYTES_PER_PIXEL: usize = 4;

/// Owned 32bpp pixel buffer: 8-bit B,G,R,A per pixel, color channels
/// premultiplied by alpha, rows laid out top-down with an explicit stride.
///
/// Invariants: `stride >= width * 4` and `data.len() == stride * height`.
/// Pixel transforms go through the row accessors rather than per-pixel
/// get/set calls, so cost stays linear in the pixel count.
#[derive(Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Builds a premultiplied BGRA buffer from a straight-alpha RGBA image.
    /// Swizzle and premultiplication are linear passes over the raw bytes.
    pub fn from_straight_rgba(image: image::RgbaImage) -> OverlayResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OverlayError::FormatConversion(format!(
                "decoded image has degenerate dimensions {}x{}",
                width, height
            )));
        }

        let mut data = image.into_raw();
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(OverlayError::FormatConversion(format!(
                "decoded buffer is {} bytes, expected {}",
                data.len(),
                expected
            )));
        }

        for px in data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }

        let mut buffer = Self {
            width,
            height,
            stride: width as usize * BYTES_PER_PIXEL,
            data,
        };
        buffer.premultiply_in_place();
        Ok(buffer)
    }

    /// Wraps bytes that are already premultiplied BGRA. Returns `None` when
    /// the invariants don't hold.
    pub fn from_premultiplied_parts(
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if stride < width as usize * BYTES_PER_PIXEL {
            return None;
        }
        if data.len() != stride * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row; may exceed `width * 4` for alignment.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The visible bytes of row `y` (padding excluded).
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let end = start + self.width as usize * BYTES_PER_PIXEL;
        &mut self.data[start..end]
    }

    /// Premultiplies every color channel by its alpha fraction in place,
    /// truncating toward zero: `channel = (channel * alpha) / 255`. Alpha is
    /// left unchanged.
    pub fn premultiply_in_place(&mut self) {
        for y in 0..self.height {
            for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                premultiply_pixel(px);
            }
        }
    }

    /// Copies the visible pixels into `dst`, honoring both strides: a single
    /// bulk copy when the strides match, row-by-row otherwise.
    pub fn copy_into(&self, dst: &mut [u8], dst_stride: usize) {
        let tight = self.width as usize * BYTES_PER_PIXEL;
        debug_assert!(dst_stride >= tight);
        debug_assert!(dst.len() >= dst_stride * self.height as usize);

        if self.stride == dst_stride {
            let len = self.stride * self.height as usize;
            dst[..len].copy_from_slice(&self.data[..len]);
        } else {
            for y in 0..self.height {
                let start = y as usize * dst_stride;
                dst[start..start + tight].copy_from_slice(self.row(y));
            }
        }
    }

    /// Rows repacked tightly (stride == width * 4), e.g. for handing the
    /// buffer to a resampler that expects packed rows.
    pub fn to_tight_vec(&self) -> Vec<u8> {
        let tight = self.width as usize * BYTES_PER_PIXEL;
        if self.stride == tight {
            return self.data.clone();
        }
        let mut out = vec![0u8; tight * self.height as usize];
        self.copy_into(&mut out, tight);
        out
    }
}

#[inline]
fn premultiply_pixel(px: &mut [u8]) {
    // Integer (c * a) / 255 truncates toward zero exactly like the float
    // formula floor(c * a / 255.0) for u8 inputs.
    let a = px[3] as u16;
    px[0] = ((px[0] as u16 * a) / 255) as u8;
    px[1] = ((px[1] as u16 * a) / 255) as u8;
    px[2] = ((px[2] as u16 * a) / 255) as u8;
}
