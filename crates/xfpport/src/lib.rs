//! Port program bridging a supervising runtime to XFP transceiver drivers.
//!
//! The host writes `{Command, Args...}` terms to our stdin, one length-prefixed
//! frame per request; we answer each with an `{ok | error, Value}` frame on
//! stdout before reading the next.
//!
//! # Crate Structure
//!
//! - [`frame`] - u16 length-prefixed framing over byte streams
//! - [`term`] - the external term format subset used for requests and replies
//! - [`device`] - backend trait and the emulated register/pin store
//! - [`dispatch`] - command name to handler table
//! - [`server`] - the one-request-at-a-time serving loop

pub mod dispatch;
pub mod error;
pub mod server;

/// Re-export frame types.
pub mod frame {
    pub use xfpport_frame::*;
}

/// Re-export term codec types.
pub mod term {
    pub use xfpport_term::*;
}

/// Re-export device types.
pub mod device {
    pub use xfpport_device::*;
}

pub use dispatch::{Dispatcher, Handler};
pub use error::{CommandError, ServerError};
pub use server::Server;
