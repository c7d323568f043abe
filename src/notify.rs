//! User-facing error notification sink.
//!
//! A release build runs with `windows_subsystem = "windows"`, so stderr is
//! invisible; fatal startup errors go to a message box instead.

#[cfg(target_os = "windows")]
pub fn notify_error(text: &str) {
    use windows::core::PCWSTR;
    use windows::w;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        MessageBoxW(
            None,
            PCWSTR::from_raw(wide.as_ptr()),
            w!("desk-overlay"),
            MB_ICONERROR | MB_OK,
        );
    }
}

#[cfg(not(target_os = "windows"))]
pub fn notify_error(text: &str) {
    eprintln!("desk-overlay: {}", text);
}
