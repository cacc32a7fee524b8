// convert.rs - Conversion between charsets
// Everything goes through Unicode: decode with the source codec, encode
// with the target codec. Characters that cannot survive the trip are
// replaced with '?'.
//
//   convert          - whole-string conversion, counts substitutions
//   convert_fix      - bounded conversion with error positions
//   string_repertoire / charset_repertoire
//   wc_to_printable  - escapes for diagnostics

use crate::charset::{CharsetInfo, CopyStatus};
use crate::ctype::{CharsetState, Repertoire, WcT};
use crate::error::ConvError;

/// Status of a bounded conversion; same layout as a bounded copy.
pub type ConvStatus = CopyStatus;

const SUBSTITUTE: WcT = b'?' as WcT;

/// Bytes to skip over a malformed source sequence.
#[inline]
fn skip_len(from_cs: &CharsetInfo, remaining: usize) -> usize {
    from_cs.mbminlen.clamp(1, remaining.max(1))
}

/// Encodes `wc`, falling back to '?' when the target cannot represent it.
/// Returns the bytes written and whether a substitution happened, or
/// `None` when `dst` is full.
fn put(to_cs: &CharsetInfo, wc: WcT, dst: &mut [u8]) -> Option<(usize, bool)> {
    match to_cs.wc_mb(wc, dst) {
        Ok(n) => Some((n, false)),
        Err(ConvError::Unencodable) if wc != SUBSTITUTE => {
            to_cs.wc_mb(SUBSTITUTE, dst).ok().map(|n| (n, true))
        }
        Err(_) => None,
    }
}

/// Converts `src` from `from_cs` into `dst` in `to_cs`.
///
/// Returns the number of bytes written and the number of characters that
/// were replaced with '?'. Stops early when `dst` has no room for the next
/// character.
pub fn convert(to_cs: &CharsetInfo, dst: &mut [u8], from_cs: &CharsetInfo, src: &[u8]) -> (usize, usize) {
    let mut spos = 0;
    let mut dpos = 0;
    let mut errors = 0;
    while spos < src.len() {
        let (wc, len, bad) = match from_cs.mb_wc(&src[spos..]) {
            Ok((wc, len)) => (wc, len, false),
            Err(_) => (SUBSTITUTE, skip_len(from_cs, src.len() - spos), true),
        };
        let Some((n, substituted)) = put(to_cs, wc, &mut dst[dpos..]) else { break };
        if bad || substituted {
            errors += 1;
        }
        spos += len;
        dpos += n;
    }
    (dpos, errors)
}

/// Converts at most `nchars` characters.
///
/// The status records where the source was consumed up to, the first
/// malformed source sequence and the first character the target charset
/// could not represent.
pub fn convert_fix(
    to_cs: &CharsetInfo,
    dst: &mut [u8],
    from_cs: &CharsetInfo,
    src: &[u8],
    nchars: usize,
) -> (usize, ConvStatus) {
    let mut status = ConvStatus::default();
    let mut spos = 0;
    let mut dpos = 0;
    let mut left = nchars;
    while left > 0 && spos < src.len() {
        let (wc, len) = match from_cs.mb_wc(&src[spos..]) {
            Ok(r) => r,
            Err(_) => {
                status.well_formed_error_pos.get_or_insert(spos);
                (SUBSTITUTE, skip_len(from_cs, src.len() - spos))
            }
        };
        let Some((n, substituted)) = put(to_cs, wc, &mut dst[dpos..]) else { break };
        if substituted {
            status.cannot_convert_error_pos.get_or_insert(spos);
        }
        spos += len;
        dpos += n;
        left -= 1;
    }
    status.source_end_pos = spos;
    (dpos, status)
}

// === Repertoire ===

/// `ASCII` when every character of `s` is below U+0080, `UNICODE30`
/// otherwise. Malformed input counts as non-ASCII.
pub fn string_repertoire(cs: &CharsetInfo, s: &[u8]) -> Repertoire {
    if cs.mbminlen == 1 && cs.is_ascii_compatible() {
        return if s.is_ascii() { Repertoire::ASCII } else { Repertoire::UNICODE30 };
    }
    let mut pos = 0;
    while pos < s.len() {
        match cs.mb_wc(&s[pos..]) {
            Ok((wc, len)) if wc < 0x80 => pos += len,
            _ => return Repertoire::UNICODE30,
        }
    }
    Repertoire::ASCII
}

/// Repertoire every string of `cs` fits in.
pub fn charset_repertoire(cs: &CharsetInfo) -> Repertoire {
    if cs.state.contains(CharsetState::PUREASCII) {
        Repertoire::ASCII
    } else {
        Repertoire::UNICODE30
    }
}

// === Diagnostics ===

/// Printable ASCII stays as is; anything else becomes `\XXXX` (BMP) or
/// `\X{XXXXXX}`.
pub fn wc_to_printable_string(wc: WcT) -> String {
    match wc {
        0x20..=0x7E => char::from(wc as u8).to_string(),
        0..=0xFFFF => format!("\\{:04X}", wc),
        _ => format!("\\X{{{:06X}}}", wc),
    }
}

/// Writes the printable form of `wc` into `dst`, encoded in `cs`.
/// Returns the bytes written, or 0 when `dst` is too small for all of it.
pub fn wc_to_printable(cs: &CharsetInfo, wc: WcT, dst: &mut [u8]) -> usize {
    let text = wc_to_printable_string(wc);
    let mut pos = 0;
    for ch in text.bytes() {
        match cs.wc_mb(ch as WcT, &mut dst[pos..]) {
            Ok(n) => pos += n,
            Err(_) => return 0,
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charsets::{CHARSET_ASCII, CHARSET_LATIN1, CHARSET_UCS2, CHARSET_UTF32, CHARSET_UTF8MB3, CHARSET_UTF8MB4};

    #[test]
    fn latin1_to_utf8() {
        let mut dst = [0u8; 16];
        let (n, errors) = convert(&CHARSET_UTF8MB4, &mut dst, &CHARSET_LATIN1, b"caf\xE9");
        assert_eq!(&dst[..n], "café".as_bytes());
        assert_eq!(errors, 0);
    }

    #[test]
    fn unencodable_becomes_question_mark() {
        let mut dst = [0u8; 16];
        let (n, errors) = convert(&CHARSET_LATIN1, &mut dst, &CHARSET_UTF8MB4, "aĀb".as_bytes());
        assert_eq!(&dst[..n], b"a?b");
        assert_eq!(errors, 1);

        let (n, errors) = convert(&CHARSET_UTF8MB3, &mut dst, &CHARSET_UTF8MB4, "x😀".as_bytes());
        assert_eq!(&dst[..n], b"x?");
        assert_eq!(errors, 1);
    }

    #[test]
    fn malformed_source() {
        let mut dst = [0u8; 16];
        let (n, errors) = convert(&CHARSET_LATIN1, &mut dst, &CHARSET_UTF8MB4, b"a\xFFb");
        assert_eq!(&dst[..n], b"a?b");
        assert_eq!(errors, 1);
    }

    #[test]
    fn stops_when_full() {
        let mut dst = [0u8; 5];
        let (n, _) = convert(&CHARSET_UCS2, &mut dst, &CHARSET_LATIN1, b"abc");
        assert_eq!(n, 4);
        assert_eq!(&dst[..4], &[0, b'a', 0, b'b']);
    }

    #[test]
    fn bounded_conversion() {
        let mut dst = [0u8; 32];
        let src = "abĀd".as_bytes();
        let (n, status) = convert_fix(&CHARSET_LATIN1, &mut dst, &CHARSET_UTF8MB4, src, 3);
        assert_eq!(&dst[..n], b"ab?");
        assert_eq!(status.source_end_pos, 4);
        assert_eq!(status.cannot_convert_error_pos, Some(2));
        assert_eq!(status.well_formed_error_pos, None);

        let (n, status) = convert_fix(&CHARSET_UTF32, &mut dst, &CHARSET_UTF8MB4, b"a\xC3", 10);
        assert_eq!(n, 8);
        assert_eq!(&dst[4..8], &[0, 0, 0, b'?']);
        assert_eq!(status.well_formed_error_pos, Some(1));
        assert_eq!(status.source_end_pos, 2);
    }

    #[test]
    fn repertoire() {
        assert_eq!(string_repertoire(&CHARSET_LATIN1, b"plain"), Repertoire::ASCII);
        assert_eq!(string_repertoire(&CHARSET_LATIN1, b"caf\xE9"), Repertoire::UNICODE30);
        assert_eq!(string_repertoire(&CHARSET_UCS2, &[0, b'a', 0, b'b']), Repertoire::ASCII);
        assert_eq!(string_repertoire(&CHARSET_UCS2, &[0, b'a', 0x20, 0xAC]), Repertoire::UNICODE30);
        assert_eq!(charset_repertoire(&CHARSET_ASCII), Repertoire::ASCII);
        assert_eq!(charset_repertoire(&CHARSET_UTF8MB4), Repertoire::UNICODE30);
    }

    #[test]
    fn printable_escapes() {
        assert_eq!(wc_to_printable_string('a' as WcT), "a");
        assert_eq!(wc_to_printable_string(0x0A), "\\000A");
        assert_eq!(wc_to_printable_string(0x20AC), "\\20AC");
        assert_eq!(wc_to_printable_string(0x1F600), "\\X{01F600}");

        let mut dst = [0u8; 16];
        let n = wc_to_printable(&CHARSET_UCS2, 0xE9, &mut dst);
        assert_eq!(n, 10);
        assert_eq!(&dst[..4], &[0, b'\\', 0, b'0']);
        assert_eq!(wc_to_printable(&CHARSET_LATIN1, 0x1F600, &mut dst[..3]), 0);
    }
}
