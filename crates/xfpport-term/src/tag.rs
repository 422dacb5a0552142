//! Tag bytes of the external term format.

/// First byte of every encoded term.
pub const VERSION_MAGIC: u8 = 131;

pub const SMALL_INTEGER_EXT: u8 = 97;
pub const INTEGER_EXT: u8 = 98;
pub const ATOM_EXT: u8 = 100;
pub const SMALL_TUPLE_EXT: u8 = 104;
pub const LARGE_TUPLE_EXT: u8 = 105;
pub const SMALL_BIG_EXT: u8 = 110;
pub const SMALL_ATOM_EXT: u8 = 115;
pub const ATOM_UTF8_EXT: u8 = 118;
pub const SMALL_ATOM_UTF8_EXT: u8 = 119;

/// Longest atom the runtime accepts, in characters.
pub const MAX_ATOM_CHARS: usize = 255;
