//! Bitfield extraction and small signed-field helpers.
//!
//! Operand positions are described by masks in the catalog; the shift is
//! always the position of the mask's lowest set bit, so redundant masks
//! (same shift, different widths) need no special casing.

/// Extract the field selected by `mask`, right-aligned.
#[inline]
pub fn extract_field(word: u16, mask: u16) -> u16 {
    if mask == 0 {
        return 0;
    }
    (word & mask) >> mask.trailing_zeros()
}

/// Sign bit of a 6-bit two's-complement field (Disp6).
#[inline]
pub fn is_neg6(v: u16) -> bool {
    (v >> 5) & 1 == 1
}

/// Magnitude of a 6-bit two's-complement field.
#[inline]
pub fn abs6(v: u16) -> u16 {
    if is_neg6(v) {
        (!v).wrapping_add(1) & 0x3f
    } else {
        v & 0x3f
    }
}

/// Sign bit of a 7-bit two's-complement field (#imm7).
#[inline]
pub fn is_neg7(v: u16) -> bool {
    (v >> 6) & 1 == 1
}

/// Magnitude of a 7-bit two's-complement field.
#[inline]
pub fn abs7(v: u16) -> u16 {
    if is_neg7(v) {
        (!v).wrapping_add(1) & 0x7f
    } else {
        v & 0x7f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_shift_follows_lowest_set_bit() {
        assert_eq!(extract_field(0x8f00, 0x0f00), 0xf);
        assert_eq!(extract_field(0x00e0, 0x00f0), 0xe);
        assert_eq!(extract_field(0x0070, 0x0070), 7);
        assert_eq!(extract_field(0x123f, 0x003f), 0x3f);
        assert_eq!(extract_field(0xffff, 0x0000), 0);
    }

    #[test]
    fn sign6_round_trip() {
        for v in 0u16..0x40 {
            let mag = abs6(v);
            let back = if is_neg6(v) {
                (!mag).wrapping_add(1) & 0x3f
            } else {
                mag
            };
            assert_eq!(back, v);
        }
        assert!(is_neg6(0x3f));
        assert_eq!(abs6(0x3f), 1);
        assert_eq!(abs6(0x20), 0x20); // -32 has no positive counterpart
    }

    #[test]
    fn sign7_round_trip() {
        for v in 0u16..0x80 {
            let mag = abs7(v);
            let back = if is_neg7(v) {
                (!mag).wrapping_add(1) & 0x7f
            } else {
                mag
            };
            assert_eq!(back, v);
        }
        assert!(is_neg7(0x7f));
        assert_eq!(abs7(0x7f), 1);
    }
}
