// charsets/utf8.rs - UTF-8 charsets
// utf8mb3 covers U+0000..U+FFFF in up to three bytes; utf8mb4 the full
// Unicode range in up to four. Overlong forms are rejected.

use crate::charset::{CharsetHandler, CharsetInfo};
use crate::ctype::{CharsetState, WcT, MAX_BMP, MAX_UNICODE};
use crate::error::ConvError;
use crate::unicase::UNICASE_DEFAULT;

// === Helpers ===

#[inline(always)]
fn is_cont(b: u8) -> bool {
    (b ^ 0x80) < 0x40
}

/// Decodes one UTF-8 character of at most `maxlen` bytes.
#[inline]
pub(crate) fn utf8_decode(s: &[u8], maxlen: usize) -> Result<(WcT, usize), ConvError> {
    let &c = s.first().ok_or(ConvError::NeedMoreBytes(1))?;
    if c < 0x80 {
        return Ok((c as WcT, 1));
    }
    if c < 0xC2 {
        return Err(ConvError::IllegalSequence);
    }
    if c < 0xE0 {
        if s.len() < 2 {
            return Err(ConvError::NeedMoreBytes(2));
        }
        if !is_cont(s[1]) {
            return Err(ConvError::IllegalSequence);
        }
        return Ok((((c as WcT & 0x1F) << 6) | (s[1] as WcT & 0x3F), 2));
    }
    if c < 0xF0 {
        if s.len() < 3 {
            return Err(ConvError::NeedMoreBytes(3));
        }
        if !(is_cont(s[1]) && is_cont(s[2]) && (c >= 0xE1 || s[1] >= 0xA0)) {
            return Err(ConvError::IllegalSequence);
        }
        let wc = ((c as WcT & 0x0F) << 12) | ((s[1] as WcT & 0x3F) << 6) | (s[2] as WcT & 0x3F);
        return Ok((wc, 3));
    }
    if maxlen >= 4 && c < 0xF5 {
        if s.len() < 4 {
            return Err(ConvError::NeedMoreBytes(4));
        }
        if !(is_cont(s[1])
            && is_cont(s[2])
            && is_cont(s[3])
            && (c >= 0xF1 || s[1] >= 0x90)
            && (c <= 0xF3 || s[1] <= 0x8F))
        {
            return Err(ConvError::IllegalSequence);
        }
        let wc = ((c as WcT & 0x07) << 18)
            | ((s[1] as WcT & 0x3F) << 12)
            | ((s[2] as WcT & 0x3F) << 6)
            | (s[3] as WcT & 0x3F);
        return Ok((wc, 4));
    }
    Err(ConvError::IllegalSequence)
}

#[inline]
pub(crate) fn utf8_encode(wc: WcT, out: &mut [u8], maxchar: WcT) -> Result<usize, ConvError> {
    let len = match wc {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ if wc <= maxchar => 4,
        _ => return Err(ConvError::Unencodable),
    };
    if out.len() < len {
        return Err(ConvError::NeedMoreBytes(len as u8));
    }
    match len {
        1 => out[0] = wc as u8,
        2 => {
            out[0] = 0xC0 | (wc >> 6) as u8;
            out[1] = 0x80 | (wc & 0x3F) as u8;
        }
        3 => {
            out[0] = 0xE0 | (wc >> 12) as u8;
            out[1] = 0x80 | ((wc >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (wc & 0x3F) as u8;
        }
        _ => {
            out[0] = 0xF0 | (wc >> 18) as u8;
            out[1] = 0x80 | ((wc >> 12) & 0x3F) as u8;
            out[2] = 0x80 | ((wc >> 6) & 0x3F) as u8;
            out[3] = 0x80 | (wc & 0x3F) as u8;
        }
    }
    Ok(len)
}

// === Handlers ===

pub struct Utf8Handler {
    maxlen: usize,
    maxchar: WcT,
}

pub static UTF8MB3_HANDLER: Utf8Handler = Utf8Handler { maxlen: 3, maxchar: MAX_BMP };
pub static UTF8MB4_HANDLER: Utf8Handler = Utf8Handler { maxlen: 4, maxchar: MAX_UNICODE };

impl CharsetHandler for Utf8Handler {
    #[inline]
    fn mb_wc(&self, _cs: &CharsetInfo, s: &[u8]) -> Result<(WcT, usize), ConvError> {
        utf8_decode(s, self.maxlen)
    }

    #[inline]
    fn wc_mb(&self, _cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        utf8_encode(wc, out, self.maxchar)
    }

    fn numchars(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        let mut pos = 0;
        let mut count = 0;
        while pos < s.len() {
            pos += utf8_decode(&s[pos..], self.maxlen).map_or(1, |(_, n)| n);
            count += 1;
        }
        count
    }
}

// === Descriptors ===

pub static CHARSET_UTF8MB3: CharsetInfo = CharsetInfo {
    name: "utf8mb3",
    comment: "UTF-8 Unicode, BMP only",
    state: CharsetState::COMPILED.union(CharsetState::UNICODE).union(CharsetState::STRNXFRM),
    mbminlen: 1,
    mbmaxlen: 3,
    caseup_multiply: 1,
    casedn_multiply: 1,
    pad_char: 0x20,
    ctype: None,
    to_lower: None,
    to_upper: None,
    tab_to_uni: None,
    tab_from_uni: &[],
    caseinfo: Some(&UNICASE_DEFAULT),
    handler: &UTF8MB3_HANDLER,
};

pub static CHARSET_UTF8MB4: CharsetInfo = CharsetInfo {
    name: "utf8mb4",
    comment: "UTF-8 Unicode",
    state: CharsetState::COMPILED
        .union(CharsetState::UNICODE)
        .union(CharsetState::UNICODE_SUPPLEMENT)
        .union(CharsetState::STRNXFRM),
    mbminlen: 1,
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
    handler: &UTF8MB4_HANDLER,
};
