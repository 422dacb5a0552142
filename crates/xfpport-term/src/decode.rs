use crate::error::{Result, TermError};
use crate::tag::{
    ATOM_EXT, ATOM_UTF8_EXT, INTEGER_EXT, LARGE_TUPLE_EXT, MAX_ATOM_CHARS, SMALL_ATOM_EXT,
    SMALL_ATOM_UTF8_EXT, SMALL_BIG_EXT, SMALL_INTEGER_EXT, SMALL_TUPLE_EXT, VERSION_MAGIC,
};

/// Cursor over an encoded payload.
///
/// Each `decode_*` call consumes exactly one term. A failed call leaves the
/// cursor where it was, so the caller can report the offending position.
#[derive(Debug, Clone, Copy)]
pub struct TermReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> TermReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Byte offset of the next term.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume the version marker.
    pub fn decode_version(&mut self) -> Result<()> {
        self.atomically(|r| match r.read_u8()? {
            VERSION_MAGIC => Ok(()),
            other => Err(TermError::VersionMismatch(other)),
        })
    }

    /// Consume a tuple header and return its arity.
    pub fn decode_tuple_header(&mut self) -> Result<usize> {
        self.atomically(|r| {
            let position = r.pos;
            match r.read_u8()? {
                SMALL_TUPLE_EXT => Ok(r.read_u8()? as usize),
                LARGE_TUPLE_EXT => Ok(r.read_u32()? as usize),
                found => Err(TermError::UnexpectedTag {
                    expected: "tuple",
                    found,
                    position,
                }),
            }
        })
    }

    /// Consume an atom in any of its four encodings.
    pub fn decode_atom(&mut self) -> Result<String> {
        self.atomically(|r| {
            let position = r.pos;
            let (len, utf8) = match r.read_u8()? {
                ATOM_EXT => (r.read_u16()? as usize, false),
                SMALL_ATOM_EXT => (r.read_u8()? as usize, false),
                ATOM_UTF8_EXT => (r.read_u16()? as usize, true),
                SMALL_ATOM_UTF8_EXT => (r.read_u8()? as usize, true),
                found => {
                    return Err(TermError::UnexpectedTag {
                        expected: "atom",
                        found,
                        position,
                    })
                }
            };

            if !utf8 && len > MAX_ATOM_CHARS {
                return Err(TermError::AtomTooLong(len));
            }
            let bytes = r.take(len)?;

            if !utf8 {
                // Latin-1 maps byte-for-byte onto the first 256 code points.
                return Ok(bytes.iter().map(|&b| char::from(b)).collect());
            }

            let text = std::str::from_utf8(bytes).map_err(|_| TermError::InvalidAtom)?;
            let chars = text.chars().count();
            if chars > MAX_ATOM_CHARS {
                return Err(TermError::AtomTooLong(chars));
            }
            Ok(text.to_owned())
        })
    }

    /// Consume a non-negative integer that fits in 32 bits, whichever integer
    /// tag the sender chose.
    pub fn decode_ulong(&mut self) -> Result<u32> {
        self.atomically(|r| {
            let position = r.pos;
            match r.read_u8()? {
                SMALL_INTEGER_EXT => Ok(u32::from(r.read_u8()?)),
                INTEGER_EXT => {
                    let value = r.read_u32()? as i32;
                    u32::try_from(value).map_err(|_| TermError::NegativeInteger)
                }
                SMALL_BIG_EXT => {
                    let digits = r.read_u8()? as usize;
                    let sign = r.read_u8()?;
                    let magnitude = r.take(digits)?;
                    if sign != 0 {
                        return Err(TermError::NegativeInteger);
                    }
                    big_to_u32(magnitude)
                }
                found => Err(TermError::UnexpectedTag {
                    expected: "integer",
                    found,
                    position,
                }),
            }
        })
    }

    fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let mut probe = *self;
        let value = f(&mut probe)?;
        *self = probe;
        Ok(value)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(TermError::Truncated(self.pos));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Little-endian magnitude digits to `u32`; high zero digits are tolerated.
fn big_to_u32(digits: &[u8]) -> Result<u32> {
    let mut value = 0u32;
    for (i, &digit) in digits.iter().enumerate() {
        if digit == 0 {
            continue;
        }
        if i >= 4 {
            return Err(TermError::IntegerOverflow);
        }
        value |= u32::from(digit) << (8 * i);
    }
    Ok(value)
}
