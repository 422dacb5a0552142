use std::io::{ErrorKind, Read};

use bytes::Bytes;

use crate::codec::{Frame, FrameConfig, HEADER_SIZE};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Where the reader is within the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// Collecting the 2-byte length prefix.
    AwaitingHeader { filled: usize },
    /// Collecting `len` payload bytes.
    AwaitingBody { len: usize, filled: usize },
}

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete frames.
/// The reader asks the stream for no more than the current frame still needs,
/// so bytes belonging to the next frame stay in the stream.
pub struct FrameReader<T> {
    inner: T,
    header: [u8; HEADER_SIZE],
    body: Vec<u8>,
    state: ReadState,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self::from_parts(inner, Vec::with_capacity(INITIAL_BUFFER_CAPACITY), config)
    }

    /// Like [`FrameReader::with_config`], but reports allocation failure of the
    /// initial payload buffer instead of aborting.
    pub fn try_with_config(inner: T, config: FrameConfig) -> Result<Self> {
        let mut body = Vec::new();
        body.try_reserve_exact(INITIAL_BUFFER_CAPACITY)?;
        Ok(Self::from_parts(inner, body, config))
    }

    fn from_parts(inner: T, body: Vec<u8>, config: FrameConfig) -> Self {
        Self {
            inner,
            header: [0; HEADER_SIZE],
            body,
            state: ReadState::AwaitingHeader { filled: 0 },
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached between
    /// frames and `Err(FrameError::Truncated)` when it is reached inside one.
    /// If the stream fails with any other error, the bytes accumulated so far
    /// are kept and the next call continues the same frame.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            match self.state {
                ReadState::AwaitingHeader { filled } => {
                    let read = read_some(&mut self.inner, &mut self.header[filled..])?;
                    if read == 0 {
                        return Err(if filled == 0 {
                            FrameError::ConnectionClosed
                        } else {
                            FrameError::Truncated {
                                expected: HEADER_SIZE,
                                received: filled,
                            }
                        });
                    }

                    let filled = filled + read;
                    if filled < HEADER_SIZE {
                        self.state = ReadState::AwaitingHeader { filled };
                        continue;
                    }

                    let len = u16::from_be_bytes(self.header) as usize;
                    self.begin_body(len)?;
                }
                ReadState::AwaitingBody { len, filled } if filled == len => {
                    return Ok(self.take_frame());
                }
                ReadState::AwaitingBody { len, filled } => {
                    let read = read_some(&mut self.inner, &mut self.body[filled..len])?;
                    if read == 0 {
                        return Err(FrameError::Truncated {
                            expected: HEADER_SIZE + len,
                            received: HEADER_SIZE + filled,
                        });
                    }
                    self.state = ReadState::AwaitingBody {
                        len,
                        filled: filled + read,
                    };
                }
            }
        }
    }

    fn begin_body(&mut self, len: usize) -> Result<()> {
        self.state = ReadState::AwaitingHeader { filled: 0 };
        if len > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: len,
                max: self.config.max_payload_size,
            });
        }

        self.body.clear();
        self.body.try_reserve_exact(len)?;
        self.body.resize(len, 0);
        self.state = ReadState::AwaitingBody { len, filled: 0 };
        tracing::trace!(len, "frame header received");
        Ok(())
    }

    fn take_frame(&mut self) -> Frame {
        self.state = ReadState::AwaitingHeader { filled: 0 };
        Frame {
            payload: Bytes::copy_from_slice(&self.body),
        }
    }

    /// Current position within the frame being assembled.
    pub fn state(&self) -> ReadState {
        self.state
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

fn read_some<T: Read>(inner: &mut T, buf: &mut [u8]) -> Result<usize> {
    loop {
        match inner.read(buf) {
            Ok(n) => return Ok(n),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
}
