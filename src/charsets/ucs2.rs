// charsets/ucs2.rs - UCS-2 charset
// Fixed two-byte big-endian BMP encoding.

use crate::charset::{CharsetHandler, CharsetInfo};
use crate::ctype::{CharsetState, WcT};
use crate::error::ConvError;
use crate::unicase::UNICASE_DEFAULT;

/// Length without trailing big-endian U+0020 units.
pub(crate) fn lengthsp_mb2_be(s: &[u8]) -> usize {
    let mut end = s.len();
    while end >= 2 && s[end - 1] == b' ' && s[end - 2] == 0 {
        end -= 2;
    }
    end
}

pub struct Ucs2Handler;

pub static UCS2_HANDLER: Ucs2Handler = Ucs2Handler;

impl CharsetHandler for Ucs2Handler {
    #[inline]
    fn mb_wc(&self, _cs: &CharsetInfo, s: &[u8]) -> Result<(WcT, usize), ConvError> {
        if s.len() < 2 {
            return Err(ConvError::NeedMoreBytes(2));
        }
        Ok((((s[0] as WcT) << 8) | s[1] as WcT, 2))
    }

    #[inline]
    fn wc_mb(&self, _cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        if wc > 0xFFFF {
            return Err(ConvError::Unencodable);
        }
        if out.len() < 2 {
            return Err(ConvError::NeedMoreBytes(2));
        }
        out[0] = (wc >> 8) as u8;
        out[1] = wc as u8;
        Ok(2)
    }

    fn charlen(&self, _cs: &CharsetInfo, s: &[u8]) -> Result<usize, ConvError> {
        if s.len() < 2 {
            Err(ConvError::NeedMoreBytes(2))
        } else {
            Ok(2)
        }
    }

    fn numchars(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        s.len().div_ceil(2)
    }

    fn charpos(&self, _cs: &CharsetInfo, s: &[u8], pos: usize) -> usize {
        let off = pos * 2;
        if off > s.len() {
            s.len() + 2
        } else {
            off
        }
    }

    fn lengthsp(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        lengthsp_mb2_be(s)
    }
}

pub static CHARSET_UCS2: CharsetInfo = CharsetInfo {
    name: "ucs2",
    comment: "UCS-2 Unicode",
    state: CharsetState::COMPILED
        .union(CharsetState::UNICODE)
        .union(CharsetState::NONASCII)
        .union(CharsetState::STRNXFRM),
    mbminlen: 2,
    mbmaxlen: 2,
    caseup_multiply: 1,
    casedn_multiply: 1,
    pad_char: 0x20,
    ctype: None,
    to_lower: None,
    to_upper: None,
    tab_to_uni: None,
    tab_from_uni: &[],
    caseinfo: Some(&UNICASE_DEFAULT),
    handler: &UCS2_HANDLER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec() {
        assert_eq!(CHARSET_UCS2.mb_wc(&[0x00, 0x41]), Ok((0x41, 2)));
        assert_eq!(CHARSET_UCS2.mb_wc(&[0x4E]), Err(ConvError::NeedMoreBytes(2)));
        let mut out = [0u8; 2];
        assert_eq!(CHARSET_UCS2.wc_mb(0x4E2D, &mut out), Ok(2));
        assert_eq!(out, [0x4E, 0x2D]);
        assert_eq!(CHARSET_UCS2.wc_mb(0x10000, &mut out), Err(ConvError::Unencodable));
    }

    #[test]
    fn trailing_spaces() {
        assert_eq!(CHARSET_UCS2.lengthsp(&[0, 0x61, 0, 0x20, 0, 0x20]), 2);
        assert_eq!(CHARSET_UCS2.lengthsp(&[0x20, 0x00]), 2);
    }

    #[test]
    fn odd_length_counts() {
        assert_eq!(CHARSET_UCS2.numchars(&[0, 0x61, 0]), 2);
        assert_eq!(CHARSET_UCS2.charpos(&[0, 0x61, 0, 0x62], 1), 2);
        assert_eq!(CHARSET_UCS2.charpos(&[0, 0x61], 3), 4);
    }
}
