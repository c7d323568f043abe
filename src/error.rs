/// Convenience result type used across desk-overlay.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy. Every startup error is fatal: it is logged,
/// shown to the user, and mapped to a distinct process exit code.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// The graphics subsystem could not be brought up.
    #[error("graphics subsystem unavailable: {0}")]
    Init(String),

    /// The source image is missing, unreadable, or in an unsupported format.
    #[error("failed to load image: {0}")]
    Load(String),

    /// The decoded image could not be normalized to 32bpp BGRA.
    #[error("failed to convert image: {0}")]
    FormatConversion(String),

    /// Resizing would produce a zero-sized or otherwise degenerate buffer.
    #[error("invalid output dimensions: {0}")]
    InvalidDimensions(String),

    /// A destination buffer or OS surface could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// The OS refused to create the overlay's host window.
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// Wrapped lower-level error from dependencies or the OS.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Process exit code for this failure. Normal shutdown exits 0; each
    /// startup failure class gets its own nonzero code.
    pub fn exit_code(&self) -> i32 {
        match self {
            OverlayError::Init(_) => 2,
            OverlayError::Load(_) | OverlayError::FormatConversion(_) => 3,
            OverlayError::InvalidDimensions(_) | OverlayError::Allocation(_) => 4,
            OverlayError::WindowCreation(_) => 5,
            OverlayError::Other(_) => 1,
        }
    }
}
