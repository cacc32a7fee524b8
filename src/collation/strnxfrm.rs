// collation/strnxfrm.rs - Sort key post-processing
// Padding to the requested number of weights, the per-level DESC and
// REVERSE passes and padding to the full buffer.

use crate::ctype::StrxfrmFlags;

/// Complements and/or reverses the bytes of one level.
pub fn desc_and_reverse(key: &mut [u8], flags: StrxfrmFlags, level: usize) {
    if flags.is_desc(level) {
        for b in key.iter_mut() {
            *b = !*b;
        }
    }
    if flags.is_reverse(level) {
        key.reverse();
    }
}

/// Writes `len` bytes of the repeated `pattern` at `dst[pos..]`; the
/// last repetition may be cut short. Returns the new position.
pub fn fill_pattern(dst: &mut [u8], pos: usize, len: usize, pattern: &[u8]) -> usize {
    let end = (pos + len).min(dst.len());
    if pattern.len() == 1 {
        dst[pos..end].fill(pattern[0]);
    } else {
        for (b, p) in dst[pos..end].iter_mut().zip(pattern.iter().cycle()) {
            *b = *p;
        }
    }
    end
}

/// Big-endian bytes of a weight `width` bytes wide.
#[inline]
pub fn weight_bytes(weight: u32, width: usize) -> [u8; 4] {
    let mut out = [0u8; 4];
    let be = weight.to_be_bytes();
    out[..width].copy_from_slice(&be[4 - width..]);
    out
}

/// Finishes a one-level key written to `dst[start..pos]`: pads the
/// remaining `nweights` with `pad`, applies DESC/REVERSE and fills the
/// rest of `dst` on `PAD_TO_MAXLEN`. Returns the key length.
pub fn pad_desc_and_reverse(
    dst: &mut [u8],
    start: usize,
    mut pos: usize,
    nweights: usize,
    flags: StrxfrmFlags,
    level: usize,
    pad: &[u8],
) -> usize {
    if nweights > 0 && pos < dst.len() && flags.contains(StrxfrmFlags::PAD_WITH_SPACE) {
        let fill = (dst.len() - pos).min(nweights * pad.len());
        pos = fill_pattern(dst, pos, fill, pad);
    }
    desc_and_reverse(&mut dst[start..pos], flags, level);
    if flags.contains(StrxfrmFlags::PAD_TO_MAXLEN) && pos < dst.len() {
        let fill = dst.len() - pos;
        pos = fill_pattern(dst, pos, fill, pad);
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desc_complements_and_reverse_flips() {
        let mut k = [0x01, 0x02, 0x03];
        desc_and_reverse(&mut k, StrxfrmFlags::DESC_LEVEL1, 0);
        assert_eq!(k, [0xFE, 0xFD, 0xFC]);
        let mut k = [0x01, 0x02, 0x03];
        desc_and_reverse(&mut k, StrxfrmFlags::REVERSE_LEVEL1 | StrxfrmFlags::DESC_LEVEL1, 0);
        assert_eq!(k, [0xFC, 0xFD, 0xFE]);
        let mut k = [0x01, 0x02];
        desc_and_reverse(&mut k, StrxfrmFlags::DESC_LEVEL2, 0);
        assert_eq!(k, [0x01, 0x02]);
    }

    #[test]
    fn pattern_fill_cuts_last_weight() {
        let mut buf = [0u8; 5];
        assert_eq!(fill_pattern(&mut buf, 0, 5, &[0x02, 0x09]), 5);
        assert_eq!(buf, [0x02, 0x09, 0x02, 0x09, 0x02]);
    }

    #[test]
    fn weight_bytes_are_big_endian() {
        assert_eq!(&weight_bytes(0x1234, 2)[..2], &[0x12, 0x34]);
        assert_eq!(&weight_bytes(0x10FFFF, 3)[..3], &[0x10, 0xFF, 0xFF]);
        assert_eq!(&weight_bytes(0x41, 1)[..1], &[0x41]);
    }

    #[test]
    fn padding_order() {
        let mut buf = [0u8; 6];
        buf[0] = b'a';
        let flags = StrxfrmFlags::PAD_WITH_SPACE | StrxfrmFlags::PAD_TO_MAXLEN | StrxfrmFlags::DESC_LEVEL1;
        let n = pad_desc_and_reverse(&mut buf, 0, 1, 2, flags, 0, b" ");
        assert_eq!(n, 6);
        // Only the key and its weight padding are complemented.
        assert_eq!(buf, [!b'a', !b' ', !b' ', b' ', b' ', b' ']);
    }
}
