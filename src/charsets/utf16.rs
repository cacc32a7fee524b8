// charsets/utf16.rs - UTF-16 charsets
// Big- and little-endian UTF-16 with surrogate-pair validation.

use crate::charset::{CharsetHandler, CharsetInfo};
use crate::charsets::ucs2::lengthsp_mb2_be;
use crate::ctype::{CharsetState, WcT, MAX_UNICODE};
use crate::error::ConvError;
use crate::unicase::UNICASE_DEFAULT;

#[inline(always)]
fn is_high_surrogate(u: u32) -> bool {
    (0xD800..=0xDBFF).contains(&u)
}

#[inline(always)]
fn is_low_surrogate(u: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&u)
}

/// UTF-16 handler, parameterized by byte order.
pub struct Utf16Handler {
    little_endian: bool,
}

pub static UTF16_HANDLER: Utf16Handler = Utf16Handler { little_endian: false };
pub static UTF16LE_HANDLER: Utf16Handler = Utf16Handler { little_endian: true };

impl Utf16Handler {
    #[inline(always)]
    fn unit(&self, s: &[u8]) -> u32 {
        if self.little_endian {
            u16::from_le_bytes([s[0], s[1]]) as u32
        } else {
            u16::from_be_bytes([s[0], s[1]]) as u32
        }
    }

    #[inline(always)]
    fn put_unit(&self, u: u16, out: &mut [u8]) {
        let b = if self.little_endian { u.to_le_bytes() } else { u.to_be_bytes() };
        out[..2].copy_from_slice(&b);
    }
}

impl CharsetHandler for Utf16Handler {
    #[inline]
    fn mb_wc(&self, _cs: &CharsetInfo, s: &[u8]) -> Result<(WcT, usize), ConvError> {
        if s.len() < 2 {
            return Err(ConvError::NeedMoreBytes(2));
        }
        let hi = self.unit(s);
        if is_high_surrogate(hi) {
            if s.len() < 4 {
                return Err(ConvError::NeedMoreBytes(4));
            }
            let lo = self.unit(&s[2..]);
            if !is_low_surrogate(lo) {
                return Err(ConvError::IllegalSequence);
            }
            return Ok(((((hi & 0x3FF) << 10) | (lo & 0x3FF)) + 0x10000, 4));
        }
        if is_low_surrogate(hi) {
            return Err(ConvError::IllegalSequence);
        }
        Ok((hi, 2))
    }

    #[inline]
    fn wc_mb(&self, _cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        if wc <= 0xFFFF {
            if (0xD800..=0xDFFF).contains(&wc) {
                return Err(ConvError::Unencodable);
            }
            if out.len() < 2 {
                return Err(ConvError::NeedMoreBytes(2));
            }
            self.put_unit(wc as u16, out);
            return Ok(2);
        }
        if wc <= MAX_UNICODE {
            if out.len() < 4 {
                return Err(ConvError::NeedMoreBytes(4));
            }
            let v = wc - 0x10000;
            self.put_unit(0xD800 | (v >> 10) as u16, out);
            self.put_unit(0xDC00 | (v & 0x3FF) as u16, &mut out[2..]);
            return Ok(4);
        }
        Err(ConvError::Unencodable)
    }

    fn lengthsp(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        if !self.little_endian {
            return lengthsp_mb2_be(s);
        }
        let mut end = s.len();
        while end >= 2 && s[end - 2] == b' ' && s[end - 1] == 0 {
            end -= 2;
        }
        end
    }
}

pub static CHARSET_UTF16: CharsetInfo = CharsetInfo {
    name: "utf16",
    comment: "UTF-16 Unicode",
    state: CharsetState::COMPILED
        .union(CharsetState::UNICODE)
        .union(CharsetState::UNICODE_SUPPLEMENT)
        .union(CharsetState::NONASCII)
        .union(CharsetState::STRNXFRM),
    mbminlen: 2,
    mbmaxlen: 4,
    caseup_multiply: 1,
    casedn_multiply: 1,
    pad_char: 0x20,
    ctype: None,
    to_lower: None,
    to_upper: None,
    tab_to_uni: None,
    tab_from_uni: &[],
    caseinfo: Some(&UNICASE_DEFAULT),
    handler: &UTF16_HANDLER,
};

pub static CHARSET_UTF16LE: CharsetInfo = CharsetInfo {
    name: "utf16le",
    comment: "UTF-16LE Unicode",
    state: CharsetState::COMPILED
        .union(CharsetState::UNICODE)
        .union(CharsetState::UNICODE_SUPPLEMENT)
        .union(CharsetState::NONASCII)
        .union(CharsetState::STRNXFRM),
    mbminlen: 2,
    mbmaxlen: 4,
    caseup_multiply: 1,
    casedn_multiply: 1,
    pad_char: 0x20,
    ctype: None,
    to_lower: None,
    to_upper: None,
    tab_to_uni: None,
    tab_from_uni: &[],
    caseinfo: Some(&UNICASE_DEFAULT),
    handler: &UTF16LE_HANDLER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrogate_pairs() {
        let cs = &CHARSET_UTF16;
        assert_eq!(cs.mb_wc(&[0xD8, 0x3D, 0xDE, 0x00]), Ok((0x1F600, 4)));
        assert_eq!(CHARSET_UTF16LE.mb_wc(&[0x3D, 0xD8, 0x00, 0xDE]), Ok((0x1F600, 4)));
    }

    #[test]
    fn lone_high_surrogate_needs_four_bytes() {
        assert_eq!(CHARSET_UTF16.mb_wc(&[0xD8, 0x00]), Err(ConvError::NeedMoreBytes(4)));
        assert_eq!(CHARSET_UTF16LE.mb_wc(&[0x00, 0xD8]), Err(ConvError::NeedMoreBytes(4)));
    }

    #[test]
    fn high_surrogate_then_non_surrogate() {
        assert_eq!(CHARSET_UTF16.mb_wc(&[0xD8, 0x00, 0x00, 0x41]), Err(ConvError::IllegalSequence));
    }

    #[test]
    fn lone_low_surrogate() {
        assert_eq!(CHARSET_UTF16.mb_wc(&[0xDC, 0x00, 0x00, 0x41]), Err(ConvError::IllegalSequence));
        assert_eq!(CHARSET_UTF16.mb_wc(&[0xDC, 0x00]), Err(ConvError::IllegalSequence));
    }

    #[test]
    fn encode() {
        let mut out = [0u8; 4];
        assert_eq!(CHARSET_UTF16.wc_mb(0x10437, &mut out), Ok(4));
        assert_eq!(out, [0xD8, 0x01, 0xDC, 0x37]);
        assert_eq!(CHARSET_UTF16LE.wc_mb(0x41, &mut out), Ok(2));
        assert_eq!(&out[..2], &[0x41, 0x00]);
        assert_eq!(CHARSET_UTF16.wc_mb(0xD800, &mut out), Err(ConvError::Unencodable));
        assert_eq!(CHARSET_UTF16.wc_mb(0x10437, &mut out[..3]), Err(ConvError::NeedMoreBytes(4)));
    }

    #[test]
    fn lengthsp_by_byte_order() {
        assert_eq!(CHARSET_UTF16.lengthsp(&[0, 0x61, 0, 0x20]), 2);
        assert_eq!(CHARSET_UTF16LE.lengthsp(&[0x61, 0, 0x20, 0]), 2);
        assert_eq!(CHARSET_UTF16LE.lengthsp(&[0, 0x20]), 2);
    }
}
