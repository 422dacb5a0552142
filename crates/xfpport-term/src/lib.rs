//! The slice of the Erlang external term format spoken over the port pipe.
//!
//! Requests arrive as `{command_atom, Arg1, ..., ArgN}` and responses leave as
//! `{ok | error, Value}`, each prefixed with the format's version marker. Only
//! the tags needed for that shape are implemented:
//!
//! - tuple headers (small and large)
//! - atoms (Latin-1 and UTF-8, short and long length prefix)
//! - non-negative integers up to `u32::MAX` (small integer, integer, small big)

pub mod decode;
pub mod encode;
pub mod error;
pub mod message;
pub mod tag;

pub use decode::TermReader;
pub use encode::{encode_atom, encode_tuple_header, encode_ulong, encode_version};
pub use error::{Result, TermError};
pub use message::{Request, RequestHeader, Response, Status};
pub use tag::{MAX_ATOM_CHARS, VERSION_MAGIC};
