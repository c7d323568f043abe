mod gdi;
mod surface;
mod window;

pub use gdi::GdiSession;
pub use surface::present;
pub use window::{create_overlay_window, run_message_loop, show};
