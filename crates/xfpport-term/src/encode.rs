use bytes::{BufMut, BytesMut};

use crate::error::{Result, TermError};
use crate::tag::{
    ATOM_UTF8_EXT, INTEGER_EXT, LARGE_TUPLE_EXT, MAX_ATOM_CHARS, SMALL_ATOM_UTF8_EXT,
    SMALL_BIG_EXT, SMALL_INTEGER_EXT, SMALL_TUPLE_EXT, VERSION_MAGIC,
};

pub fn encode_version(dst: &mut BytesMut) {
    dst.put_u8(VERSION_MAGIC);
}

pub fn encode_tuple_header(arity: usize, dst: &mut BytesMut) {
    match u8::try_from(arity) {
        Ok(small) => {
            dst.put_u8(SMALL_TUPLE_EXT);
            dst.put_u8(small);
        }
        Err(_) => {
            dst.put_u8(LARGE_TUPLE_EXT);
            dst.put_u32(arity as u32);
        }
    }
}

/// Encode `name` as a UTF-8 atom, using the 1-byte length form when it fits.
pub fn encode_atom(name: &str, dst: &mut BytesMut) -> Result<()> {
    let chars = name.chars().count();
    if chars > MAX_ATOM_CHARS {
        return Err(TermError::AtomTooLong(chars));
    }

    match u8::try_from(name.len()) {
        Ok(len) => {
            dst.put_u8(SMALL_ATOM_UTF8_EXT);
            dst.put_u8(len);
        }
        Err(_) => {
            // 255 characters of up to 4 bytes each always fit in a u16.
            dst.put_u8(ATOM_UTF8_EXT);
            dst.put_u16(name.len() as u16);
        }
    }
    dst.put_slice(name.as_bytes());
    Ok(())
}

/// Encode `value` with the narrowest integer tag that holds it.
pub fn encode_ulong(value: u32, dst: &mut BytesMut) {
    if let Ok(small) = u8::try_from(value) {
        dst.put_u8(SMALL_INTEGER_EXT);
        dst.put_u8(small);
    } else if let Ok(int) = i32::try_from(value) {
        dst.put_u8(INTEGER_EXT);
        dst.put_i32(int);
    } else {
        dst.put_u8(SMALL_BIG_EXT);
        dst.put_u8(4);
        dst.put_u8(0);
        dst.put_u32_le(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::TermReader;

    #[test]
    fn integer_tag_follows_magnitude() {
        let cases: [(u32, &[u8]); 5] = [
            (0, &[97, 0]),
            (255, &[97, 255]),
            (256, &[98, 0, 0, 1, 0]),
            (0x7FFF_FFFF, &[98, 0x7F, 0xFF, 0xFF, 0xFF]),
            (0xDEAD_BEEF, &[110, 4, 0, 0xEF, 0xBE, 0xAD, 0xDE]),
        ];

        for (value, expected) in cases {
            let mut buf = BytesMut::new();
            encode_ulong(value, &mut buf);
            assert_eq!(buf.as_ref(), expected, "value {value:#x}");
        }
    }

    #[test]
    fn encoded_integers_decode_back() {
        for value in [0, 1, 200, 255, 256, 65_535, 1 << 27, i32::MAX as u32, u32::MAX] {
            let mut buf = BytesMut::new();
            encode_ulong(value, &mut buf);
            assert_eq!(TermReader::new(&buf).decode_ulong().unwrap(), value);
        }
    }

    #[test]
    fn short_atom_uses_small_utf8_tag() {
        let mut buf = BytesMut::new();
        encode_atom("ok", &mut buf).unwrap();
        assert_eq!(buf.as_ref(), b"w\x02ok");
    }

    #[test]
    fn multibyte_atom_switches_to_long_length() {
        let name: String = std::iter::repeat('é').take(200).collect();
        let mut buf = BytesMut::new();
        encode_atom(&name, &mut buf).unwrap();

        assert_eq!(&buf[..3], &[ATOM_UTF8_EXT, 0x01, 0x90]);
        assert_eq!(TermReader::new(&buf).decode_atom().unwrap(), name);
    }

    #[test]
    fn oversized_atom_is_rejected() {
        let name = "x".repeat(256);
        let mut buf = BytesMut::new();
        assert_eq!(
            encode_atom(&name, &mut buf).unwrap_err(),
            TermError::AtomTooLong(256)
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn tuple_header_width_follows_arity() {
        let mut buf = BytesMut::new();
        encode_tuple_header(2, &mut buf);
        encode_tuple_header(300, &mut buf);
        assert_eq!(buf.as_ref(), &[104, 2, 105, 0, 0, 1, 0x2C]);
    }
}
