//! Scoped GDI resources. Every handle acquired here is paired with its
//! release in a `Drop` impl, so error paths cannot leak device contexts or
//! bitmap sections.

use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::UI::HiDpi::*;
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::error::{OverlayError, OverlayResult};
use crate::pixels::BYTES_PER_PIXEL;

/// Process-wide graphics session token. Created once before any image work,
/// dropped exactly once when the process winds down; holding it proves the
/// screen device context is reachable and carries the primary display
/// metrics captured after the DPI-awareness opt-in.
pub struct GdiSession {
    _screen: ScreenDc,
    screen_width: i32,
    screen_height: i32,
}

impl GdiSession {
    pub fn init() -> OverlayResult<Self> {
        // Opt in to per-monitor DPI awareness before querying any metrics,
        // otherwise the reported resolution is virtualized.
        unsafe {
            let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
        }

        let screen = ScreenDc::acquire().ok_or_else(|| {
            OverlayError::Init("cannot acquire the screen device context".into())
        })?;

        let (width, height) = unsafe {
            (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN))
        };
        if width <= 0 || height <= 0 {
            return Err(OverlayError::Init(format!(
                "primary display reported {}x{}",
                width, height
            )));
        }

        log::debug!("graphics session up, primary display {}x{}", width, height);
        Ok(Self {
            _screen: screen,
            screen_width: width,
            screen_height: height,
        })
    }

    pub fn screen_size(&self) -> (i32, i32) {
        (self.screen_width, self.screen_height)
    }
}

/// `GetDC(NULL)` paired with `ReleaseDC` on drop.
pub struct ScreenDc(HDC);

impl ScreenDc {
    pub fn acquire() -> Option<Self> {
        let hdc = unsafe { GetDC(None) };
        if hdc.is_invalid() {
            None
        } else {
            Some(Self(hdc))
        }
    }

    pub fn hdc(&self) -> HDC {
        self.0
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(None, self.0);
        }
    }
}

/// Memory DC compatible with the screen, deleted on drop.
pub struct MemDc(HDC);

impl MemDc {
    pub fn compatible_with(screen: &ScreenDc) -> Option<Self> {
        let hdc = unsafe { CreateCompatibleDC(screen.hdc()) };
        if hdc.is_invalid() {
            None
        } else {
            Some(Self(hdc))
        }
    }

    pub fn hdc(&self) -> HDC {
        self.0
    }
}

impl Drop for MemDc {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteDC(self.0);
        }
    }
}

/// A 32bpp top-down DIB section selected into a memory DC. Dropping it
/// restores the DC's previous bitmap and deletes the section, so the
/// backing bitmap never outlives a single present call.
pub struct DibSection<'a> {
    dc: &'a MemDc,
    bitmap: HBITMAP,
    old: HGDIOBJ,
    bits: *mut u8,
    stride: usize,
    height: u32,
}

impl<'a> DibSection<'a> {
    pub fn new(screen: &ScreenDc, dc: &'a MemDc, width: u32, height: u32) -> Option<Self> {
        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width as i32,
                // Negative height selects a top-down DIB so that buffer row 0
                // lands on the top visible row, overriding GDI's bottom-up
                // default.
                biHeight: -(height as i32),
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0 as u32,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
        let bitmap = unsafe {
            CreateDIBSection(
                screen.hdc(),
                &bmi,
                DIB_RGB_COLORS,
                &mut bits,
                HANDLE::default(),
                0,
            )
            .ok()?
        };
        if bits.is_null() {
            unsafe {
                let _ = DeleteObject(bitmap);
            }
            return None;
        }

        let old = unsafe { SelectObject(dc.hdc(), bitmap) };
        Some(Self {
            dc,
            bitmap,
            old,
            bits: bits as *mut u8,
            // 32bpp rows need no padding to hit the DWORD boundary.
            stride: width as usize * BYTES_PER_PIXEL,
            height,
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bits_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.bits, self.stride * self.height as usize) }
    }
}

impl Drop for DibSection<'_> {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc.hdc(), self.old);
            let _ = DeleteObject(self.bitmap);
        }
    }
}
