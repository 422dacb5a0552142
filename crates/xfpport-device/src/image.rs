//! Register map every emulated transceiver powers up with.
//!
//! Offsets 0..128 are the lower memory map; 128..256 is the vendor
//! identification page (table 01h) laid out per the XFP MSA.

use crate::ids::REGISTER_COUNT;

/// Transceiver type identifier (`0x06` = XFP), lower map and page 01h.
const IDENTIFIER: u8 = 0x06;
const LOWER_IDENTIFIER_OFFSET: usize = 0;
const UPPER_IDENTIFIER_OFFSET: usize = 128;

/// Alarm/warning threshold block seeded in the lower map.
const THRESHOLDS_OFFSET: usize = 96;
const THRESHOLDS: [u8; 10] = [0x06, 0x40, 0x00, 0x00, 0x7F, 0xFF, 0x00, 0x00, 0xAF, 0xC8];

const VENDOR_OUI_OFFSET: usize = 165;
const VENDOR_OUI: [u8; 3] = [0x00, 0x00, 0x20];

/// Laser wavelength, in units of 0.05 nm (0x6658 = 1310 nm).
const WAVELENGTH_OFFSET: usize = 186;
const WAVELENGTH: [u8; 2] = [0x66, 0x58];

const DIAGNOSTICS_OFFSET: usize = 220;
const DIAGNOSTICS: [u8; 3] = [0xFF, 0x55, 0xFF];

/// ASCII identification fields of the vendor page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorField {
    Name,
    PartNumber,
    Revision,
    SerialNumber,
    DateCode,
}

impl VendorField {
    pub const ALL: [VendorField; 5] = [
        VendorField::Name,
        VendorField::PartNumber,
        VendorField::Revision,
        VendorField::SerialNumber,
        VendorField::DateCode,
    ];

    /// Byte range of the field within the register map.
    pub const fn range(self) -> std::ops::Range<usize> {
        match self {
            VendorField::Name => 148..164,
            VendorField::PartNumber => 168..184,
            VendorField::Revision => 184..186,
            VendorField::SerialNumber => 196..212,
            VendorField::DateCode => 212..220,
        }
    }

    const fn default_text(self) -> &'static [u8] {
        match self {
            VendorField::Name => b"VENDOR NAME  XFP",
            VendorField::PartNumber => b"VENDOR PARTNUMBE",
            VendorField::Revision => b"01",
            VendorField::SerialNumber => b"VENDOR SERIALNUM",
            VendorField::DateCode => b"DATACODE",
        }
    }
}

/// The register image installed by `reset_all`.
pub const DEFAULT_IMAGE: [u8; REGISTER_COUNT] = build_default_image();

const fn build_default_image() -> [u8; REGISTER_COUNT] {
    let mut image = [0u8; REGISTER_COUNT];
    image[LOWER_IDENTIFIER_OFFSET] = IDENTIFIER;
    image[UPPER_IDENTIFIER_OFFSET] = IDENTIFIER;
    image = put(image, THRESHOLDS_OFFSET, &THRESHOLDS);
    image = put(image, VENDOR_OUI_OFFSET, &VENDOR_OUI);
    image = put(image, WAVELENGTH_OFFSET, &WAVELENGTH);
    image = put(image, DIAGNOSTICS_OFFSET, &DIAGNOSTICS);

    let mut i = 0;
    while i < VendorField::ALL.len() {
        let field = VendorField::ALL[i];
        image = put(image, field.range().start, field.default_text());
        i += 1;
    }
    image
}

const fn put(
    mut image: [u8; REGISTER_COUNT],
    offset: usize,
    bytes: &[u8],
) -> [u8; REGISTER_COUNT] {
    let mut i = 0;
    while i < bytes.len() {
        image[offset + i] = bytes[i];
        i += 1;
    }
    image
}

/// Slice a vendor field out of a register map.
pub fn vendor_field(registers: &[u8; REGISTER_COUNT], field: VendorField) -> &[u8] {
    &registers[field.range()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_mark_an_xfp() {
        assert_eq!(DEFAULT_IMAGE[0], 0x06);
        assert_eq!(DEFAULT_IMAGE[128], 0x06);
    }

    #[test]
    fn vendor_fields_hold_default_text() {
        assert_eq!(
            vendor_field(&DEFAULT_IMAGE, VendorField::Name),
            b"VENDOR NAME  XFP"
        );
        assert_eq!(
            vendor_field(&DEFAULT_IMAGE, VendorField::PartNumber),
            b"VENDOR PARTNUMBE"
        );
        assert_eq!(vendor_field(&DEFAULT_IMAGE, VendorField::Revision), b"01");
        assert_eq!(
            vendor_field(&DEFAULT_IMAGE, VendorField::SerialNumber),
            b"VENDOR SERIALNUM"
        );
        assert_eq!(
            vendor_field(&DEFAULT_IMAGE, VendorField::DateCode),
            b"DATACODE"
        );
    }

    #[test]
    fn vendor_page_rows_match_reference_layout() {
        // Rows 0x90..0xE0 of page 01h, sixteen bytes each.
        let expected: [&[u8; 16]; 5] = [
            b"\x00\x00\x00\x00VENDOR NAME ",
            b" XFP\x00\x00\x00\x20VENDOR P",
            b"ARTNUMBE01\x66\x58\x00\x00\x00\x00",
            b"\x00\x00\x00\x00VENDOR SERIA",
            b"LNUMDATACODE\xFF\x55\xFF\x00",
        ];
        for (row, bytes) in expected.iter().enumerate() {
            let start = 0x90 + row * 16;
            assert_eq!(&DEFAULT_IMAGE[start..start + 16], &bytes[..], "row {start:#x}");
        }
    }

    #[test]
    fn lower_map_thresholds() {
        assert_eq!(
            &DEFAULT_IMAGE[96..106],
            &[0x06, 0x40, 0x00, 0x00, 0x7F, 0xFF, 0x00, 0x00, 0xAF, 0xC8]
        );
    }

    #[test]
    fn unseeded_bytes_are_zero() {
        let seeded = |i: usize| {
            i == 0
                || i == 128
                || (96..106).contains(&i)
                || (148..168).contains(&i)
                || (168..188).contains(&i)
                || (196..223).contains(&i)
        };
        for (i, byte) in DEFAULT_IMAGE.iter().enumerate() {
            if !seeded(i) {
                assert_eq!(*byte, 0, "offset {i}");
            }
        }
    }
}
