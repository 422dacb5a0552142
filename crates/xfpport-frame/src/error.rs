use std::collections::TryReserveError;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended cleanly on a frame boundary.
    #[error("connection closed")]
    ConnectionClosed,

    /// The stream ended part-way through a frame.
    #[error("connection closed mid-frame ({received} of {expected} bytes)")]
    Truncated { expected: usize, received: usize },

    /// A frame buffer could not be allocated.
    #[error("failed to allocate frame buffer: {0}")]
    Alloc(#[from] TryReserveError),
}

impl FrameError {
    /// True when the peer closed its end of the stream, mid-frame or not.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::ConnectionClosed | Self::Truncated { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
