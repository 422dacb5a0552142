//! Request and response shapes of the port protocol.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::decode::TermReader;
use crate::encode::{encode_atom, encode_tuple_header, encode_ulong, encode_version};
use crate::error::{Result, TermError};
use crate::tag::SMALL_ATOM_UTF8_EXT;

/// Outcome atom carried in every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Error => "error",
        }
    }

    /// Write the status as a short UTF-8 atom. Both names are ASCII and well
    /// under the one-byte length limit.
    pub fn encode(self, dst: &mut BytesMut) {
        let name = self.as_str();
        dst.put_u8(SMALL_ATOM_UTF8_EXT);
        dst.put_u8(name.len() as u8);
        dst.put_slice(name.as_bytes());
    }

    pub fn from_atom(atom: &str) -> Option<Self> {
        match atom {
            "ok" => Some(Status::Ok),
            "error" => Some(Status::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{Status, Value}` reply to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub value: u32,
}

impl Response {
    pub fn ok(value: u32) -> Self {
        Self {
            status: Status::Ok,
            value,
        }
    }

    /// The reply for every rejected request; always carries 0.
    pub fn error() -> Self {
        Self {
            status: Status::Error,
            value: 0,
        }
    }

    pub fn encode(&self, dst: &mut BytesMut) {
        encode_version(dst);
        encode_tuple_header(2, dst);
        self.status.encode(dst);
        encode_ulong(self.value, dst);
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(16);
        self.encode(&mut buf);
        buf.freeze()
    }

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut reader = TermReader::new(payload);
        reader.decode_version()?;
        let arity = reader.decode_tuple_header()?;
        if arity != 2 {
            return Err(TermError::UnexpectedArity {
                expected: 2,
                found: arity,
            });
        }
        let atom = reader.decode_atom()?;
        let status = Status::from_atom(&atom).ok_or(TermError::UnknownStatus(atom))?;
        let value = reader.decode_ulong()?;
        Ok(Self { status, value })
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.status, self.value)
    }
}

/// Command name and tuple arity taken from the front of a request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    pub name: String,
    pub arity: usize,
}

/// `{Command, Arg...}` as sent by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub name: String,
    pub args: Vec<u32>,
}

impl Request {
    pub fn new(name: impl Into<String>, args: &[u32]) -> Self {
        Self {
            name: name.into(),
            args: args.to_vec(),
        }
    }

    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        encode_version(dst);
        encode_tuple_header(1 + self.args.len(), dst);
        encode_atom(&self.name, dst)?;
        for &arg in &self.args {
            encode_ulong(arg, dst);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Decode the version marker, tuple header and command atom, returning a
    /// reader positioned at the first argument.
    ///
    /// Arguments are left to the command handler, which knows how many it
    /// needs and how to interpret them.
    pub fn decode_header(payload: &[u8]) -> Result<(RequestHeader, TermReader<'_>)> {
        let mut reader = TermReader::new(payload);
        reader.decode_version()?;
        let arity = reader.decode_tuple_header()?;
        if arity == 0 {
            return Err(TermError::EmptyTuple);
        }
        let name = reader.decode_atom()?;
        Ok((RequestHeader { name, arity }, reader))
    }
}
