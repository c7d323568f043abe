//! Host window for the overlay: class registration, the click-through
//! layered window itself, and the message pump.

use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::error::{OverlayError, OverlayResult};

/// Outcome of classifying a host-delivered window message.
#[derive(Debug, PartialEq, Eq)]
pub enum EventAction {
    /// Destroy notification: stop the message loop so the process can exit.
    Quit,
    /// Anything else defers to the system's default handling.
    DefaultHandling,
}

/// Maps the closed event set {Destroy, Other} to its action. Pure, so the
/// dispatch contract is testable without a live window.
pub fn classify(msg: u32) -> EventAction {
    match msg {
        WM_DESTROY => EventAction::Quit,
        _ => EventAction::DefaultHandling,
    }
}

unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match classify(msg) {
        EventAction::Quit => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        EventAction::DefaultHandling => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Creates the borderless, click-through, topmost, non-activating window at
/// the anchored rect. The window holds no content until the first present.
pub fn create_overlay_window(x: i32, y: i32, width: u32, height: u32) -> OverlayResult<HWND> {
    unsafe {
        let instance = GetModuleHandleW(None)
            .map_err(|e| OverlayError::WindowCreation(format!("GetModuleHandleW failed: {e}")))?;
        let class_name = w!("DeskOverlayWindow");

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(overlay_wnd_proc),
            hInstance: instance,
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or(HCURSOR(0)),
            lpszClassName: class_name,
            ..Default::default()
        };
        // One window per process; a failed re-registration is harmless.
        RegisterClassW(&wc);

        let hwnd = CreateWindowExW(
            WS_EX_LAYERED | WS_EX_TRANSPARENT | WS_EX_TOPMOST | WS_EX_NOACTIVATE,
            class_name,
            PCWSTR::null(),
            WS_POPUP,
            x,
            y,
            width as i32,
            height as i32,
            None,
            None,
            instance,
            None,
        );
        if hwnd.0 == 0 {
            return Err(OverlayError::WindowCreation(format!(
                "CreateWindowExW failed: {}",
                windows::core::Error::from_win32()
            )));
        }

        log::debug!("overlay window created at ({}, {}) size {}x{}", x, y, width, height);
        Ok(hwnd)
    }
}

/// Makes the window visible without stealing focus.
pub fn show(hwnd: HWND) {
    unsafe {
        ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        UpdateWindow(hwnd);
    }
}

/// Pumps messages until the destroy notification posts the quit message;
/// returns the quit code so it can propagate as the process exit status.
pub fn run_message_loop() -> i32 {
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        msg.wParam.0 as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::{WM_PAINT, WM_SIZE};

    #[test]
    fn test_destroy_quits() {
        assert_eq!(classify(WM_DESTROY), EventAction::Quit);
    }

    #[test]
    fn test_other_messages_defer() {
        assert_eq!(classify(WM_PAINT), EventAction::DefaultHandling);
        assert_eq!(classify(WM_SIZE), EventAction::DefaultHandling);
        assert_eq!(classify(0xFFFF), EventAction::DefaultHandling);
    }
}
