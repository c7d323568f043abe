//! Pushes a premultiplied pixel buffer to the compositor through
//! `UpdateLayeredWindow`.

use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::gdi::{DibSection, MemDc, ScreenDc};
use crate::error::{OverlayError, OverlayResult};
use crate::pixels::PixelBuffer;

/// Composites `buffer` as the window's content at screen position (x, y).
///
/// The DIB section, memory DC and screen DC are all scoped to this call and
/// released on every exit path; repeated presents cannot accumulate GDI
/// handles.
pub fn present(hwnd: HWND, buffer: &PixelBuffer, x: i32, y: i32) -> OverlayResult<()> {
    let screen = ScreenDc::acquire().ok_or_else(|| {
        OverlayError::Allocation("cannot acquire the screen device context".into())
    })?;
    let mem = MemDc::compatible_with(&screen).ok_or_else(|| {
        OverlayError::Allocation("cannot create a memory device context".into())
    })?;
    let mut dib = DibSection::new(&screen, &mem, buffer.width(), buffer.height()).ok_or_else(
        || {
            OverlayError::Allocation(format!(
                "cannot allocate a {}x{} DIB section",
                buffer.width(),
                buffer.height()
            ))
        },
    )?;

    let dst_stride = dib.stride();
    buffer.copy_into(dib.bits_mut(), dst_stride);

    let dst = POINT { x, y };
    let size = SIZE {
        cx: buffer.width() as i32,
        cy: buffer.height() as i32,
    };
    let src = POINT { x: 0, y: 0 };
    // Per-pixel alpha only: constant alpha stays at 255 and AC_SRC_ALPHA
    // tells the blend the channels are already premultiplied.
    let blend = BLENDFUNCTION {
        BlendOp: AC_SRC_OVER as u8,
        BlendFlags: 0,
        SourceConstantAlpha: 255,
        AlphaFormat: AC_SRC_ALPHA as u8,
    };

    let ok = unsafe {
        UpdateLayeredWindow(
            hwnd,
            screen.hdc(),
            Some(&dst),
            Some(&size),
            mem.hdc(),
            Some(&src),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        )
    };
    if !ok.as_bool() {
        let err = windows::core::Error::from_win32();
        log::error!("UpdateLayeredWindow failed: {}", err);
        return Err(OverlayError::Other(anyhow::anyhow!(
            "UpdateLayeredWindow failed: {err}"
        )));
    }

    log::info!(
        "presented {}x{} surface at ({}, {})",
        buffer.width(),
        buffer.height(),
        x,
        y
    );
    Ok(())
}
