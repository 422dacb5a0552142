//! Length-prefixed framing for the xfpport pipe protocol.
//!
//! Every message on the wire is a 2-byte big-endian payload length followed by
//! exactly that many payload bytes. The reader reassembles frames across
//! partial reads, so callers only ever see complete payloads.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::{FrameReader, ReadState};
pub use writer::FrameWriter;
