// charsets/utf32.rs - UTF-32 charset
// Fixed four-byte big-endian encoding.

use crate::charset::{CharsetHandler, CharsetInfo};
use crate::ctype::{CharsetState, WcT, MAX_UNICODE};
use crate::error::ConvError;
use crate::unicase::UNICASE_DEFAULT;

pub struct Utf32Handler;

pub static UTF32_HANDLER: Utf32Handler = Utf32Handler;

impl CharsetHandler for Utf32Handler {
    #[inline]
    fn mb_wc(&self, _cs: &CharsetInfo, s: &[u8]) -> Result<(WcT, usize), ConvError> {
        if s.len() < 4 {
            return Err(ConvError::NeedMoreBytes(4));
        }
        let wc = u32::from_be_bytes([s[0], s[1], s[2], s[3]]);
        if wc > MAX_UNICODE {
            return Err(ConvError::IllegalSequence);
        }
        Ok((wc, 4))
    }

    #[inline]
    fn wc_mb(&self, _cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        if wc > MAX_UNICODE {
            return Err(ConvError::Unencodable);
        }
        if out.len() < 4 {
            return Err(ConvError::NeedMoreBytes(4));
        }
        out[..4].copy_from_slice(&wc.to_be_bytes());
        Ok(4)
    }

    fn numchars(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        s.len().div_ceil(4)
    }

    fn charpos(&self, _cs: &CharsetInfo, s: &[u8], pos: usize) -> usize {
        let off = pos * 4;
        if off > s.len() {
            s.len() + 4
        } else {
            off
        }
    }

    fn lengthsp(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        let mut end = s.len();
        while end >= 4 && s[end - 4..end] == [0, 0, 0, b' '] {
            end -= 4;
        }
        end
    }
}

pub static CHARSET_UTF32: CharsetInfo = CharsetInfo {
    name: "utf32",
    comment: "UTF-32 Unicode",
    state: CharsetState::COMPILED
        .union(CharsetState::UNICODE)
        .union(CharsetState::UNICODE_SUPPLEMENT)
        .union(CharsetState::NONASCII)
        .union(CharsetState::STRNXFRM),
    mbminlen: 4,
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
    handler: &UTF32_HANDLER,
};
