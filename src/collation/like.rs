// collation/like.rs - LIKE range bounds
//
// Produces the smallest and largest strings a LIKE pattern can match, so
// that an index range scan can be bounded. Three variants by charset
// shape:
//
// | Function             | Charsets                         |
// |----------------------|----------------------------------|
// | `like_range_simple`  | single byte                      |
// | `like_range_mb`      | ASCII compatible multi-byte      |
// | `like_range_generic` | everything else, via the codec   |
//
// A pattern character that may start a contraction cannot be copied
// verbatim: the contraction may sort elsewhere, so the range widens to
// everything from that point on.

use crate::collation::CollationInfo;
use crate::ctype::{LikePattern, LikeRange, WcT, MB_MAXLEN};
use crate::error::ConvError;
use crate::uca::Contractions;

/// Picks the variant for the collation's charset.
pub fn like_range_auto(
    cl: &CollationInfo,
    pattern: &[u8],
    like: &LikePattern,
    min: &mut [u8],
    max: &mut [u8],
) -> Option<LikeRange> {
    let cs = cl.charset;
    if cs.is_8bit() {
        Some(like_range_simple(cl, pattern, like, min, max))
    } else if cs.is_ascii_compatible() {
        Some(like_range_mb(cl, pattern, like, min, max))
    } else {
        like_range_generic(cl, pattern, like, min, max)
    }
}

fn contractions_of(cl: &CollationInfo) -> Option<&Contractions> {
    if cl.uca.is_none() {
        return None;
    }
    cl.uca().filter(|u| u.has_contractions()).map(|u| &u.level(0).contractions)
}

/// Lengths for a pattern that continues with a wildcard at `pos`.
#[inline]
fn wildcard_lengths(cl: &CollationInfo, pos: usize, res_length: usize) -> LikeRange {
    LikeRange { min_length: if cl.is_binary() { pos } else { res_length }, max_length: res_length }
}

// === Single byte ===

pub fn like_range_simple(
    cl: &CollationInfo,
    pattern: &[u8],
    like: &LikePattern,
    min: &mut [u8],
    max: &mut [u8],
) -> LikeRange {
    let res_length = min.len().min(max.len());
    let (mut i, mut n) = (0, 0);
    while i < pattern.len() && n < res_length {
        let c = pattern[i];
        let wc = c as WcT;
        if wc == like.escape && i + 1 < pattern.len() {
            i += 1;
            min[n] = pattern[i];
            max[n] = pattern[i];
        } else if wc == like.w_one {
            min[n] = cl.min_sort_char as u8;
            max[n] = cl.max_sort_char as u8;
        } else if wc == like.w_many {
            let range = wildcard_lengths(cl, n, res_length);
            min[n..res_length].fill(cl.min_sort_char as u8);
            max[n..res_length].fill(cl.max_sort_char as u8);
            return range;
        } else {
            min[n] = c;
            max[n] = c;
        }
        i += 1;
        n += 1;
    }
    min[n..res_length].fill(b' ');
    max[n..res_length].fill(b' ');
    LikeRange { min_length: n, max_length: n }
}

// === ASCII compatible multi-byte ===

/// Fills `max` with the encoded `max_sort_char`, finishing with spaces
/// where a whole character does not fit.
fn pad_max_char(cl: &CollationInfo, max: &mut [u8]) {
    let mut buf = [0u8; MB_MAXLEN];
    let len = cl.charset.wc_mb(cl.max_sort_char, &mut buf).unwrap_or(0);
    if len == 0 {
        max.fill(b' ');
        return;
    }
    let mut chunks = max.chunks_exact_mut(len);
    for chunk in &mut chunks {
        chunk.copy_from_slice(&buf[..len]);
    }
    chunks.into_remainder().fill(b' ');
}

pub fn like_range_mb(
    cl: &CollationInfo,
    pattern: &[u8],
    like: &LikePattern,
    min: &mut [u8],
    max: &mut [u8],
) -> LikeRange {
    let cs = cl.charset;
    let res_length = min.len().min(max.len());
    let contractions = contractions_of(cl);
    let mut charlen = res_length / cs.mbmaxlen.max(1);
    let (mut i, mut n) = (0, 0);

    let fill = |min: &mut [u8], max: &mut [u8], n: usize, range: LikeRange| {
        min[n..res_length].fill(cl.min_sort_char as u8);
        pad_max_char(cl, &mut max[n..res_length]);
        range
    };

    while i < pattern.len() && n < res_length && charlen > 0 {
        let c = pattern[i];
        let wc = c as WcT;
        if wc == like.escape && i + 1 < pattern.len() {
            i += 1;
        } else if wc == like.w_one || wc == like.w_many {
            return fill(min, max, n, wildcard_lengths(cl, n, res_length));
        }

        let len = match cs.charlen(&pattern[i..]) {
            Ok(l) if l > 1 => l,
            _ => 1,
        };
        if len > 1 {
            if n + len > res_length {
                break;
            }
            min[n..n + len].copy_from_slice(&pattern[i..i + len]);
            max[n..n + len].copy_from_slice(&pattern[i..i + len]);
            i += len;
            n += len;
            charlen -= 1;
            continue;
        }

        if let Some(cnt) = contractions {
            if wc != like.escape && cnt.can_be_head(wc) && i + 1 < pattern.len() {
                let next = pattern[i + 1] as WcT;
                let full = LikeRange { min_length: res_length, max_length: res_length };
                if next == like.w_one || next == like.w_many {
                    return fill(min, max, n, full);
                }
                if cnt.can_be_tail(next) && cnt.contraction2_weight(wc, next).is_some() {
                    if charlen == 1 || n + 2 > res_length {
                        return fill(min, max, n, full);
                    }
                    min[n] = c;
                    max[n] = c;
                    i += 1;
                    n += 1;
                    charlen -= 1;
                }
            }
        }

        min[n] = pattern[i];
        max[n] = pattern[i];
        i += 1;
        n += 1;
        charlen -= 1;
    }

    min[n..res_length].fill(b' ');
    max[n..res_length].fill(b' ');
    LikeRange { min_length: n, max_length: n }
}

// === Generic ===

/// Encodes `wc` at `dst[*pos..]`, advancing `pos`. False when it does
/// not fit.
fn put_char(cl: &CollationInfo, dst: &mut [u8], pos: &mut usize, wc: WcT) -> bool {
    match cl.charset.wc_mb(wc, &mut dst[*pos..]) {
        Ok(len) => {
            *pos += len;
            true
        }
        Err(_) => false,
    }
}

/// Fills both bounds up to the last whole code unit with the sort
/// limits; a partial unit at the end is zeroed.
fn pad_min_max(cl: &CollationInfo, min: &mut [u8], max: &mut [u8], min_pos: usize, max_pos: usize, res_length: usize) {
    let cs = cl.charset;
    let diff = res_length % cs.mbminlen.max(1);
    let end = res_length - diff;
    if min_pos < end {
        cs.fill(&mut min[min_pos..end], cl.min_sort_char);
    }
    if max_pos < end {
        cs.fill(&mut max[max_pos..end], cl.max_sort_char);
    }
    min[end.max(min_pos)..res_length].fill(0);
    max[end.max(max_pos)..res_length].fill(0);
}

/// Codec driven variant. `None` when the pattern is malformed.
pub fn like_range_generic(
    cl: &CollationInfo,
    pattern: &[u8],
    like: &LikePattern,
    min: &mut [u8],
    max: &mut [u8],
) -> Option<LikeRange> {
    let cs = cl.charset;
    let res_length = min.len().min(max.len());
    let contractions = contractions_of(cl);
    let mut charlen = res_length / cs.mbmaxlen.max(1);
    let (mut i, mut min_pos, mut max_pos) = (0, 0, 0);

    // Decodes at `i`: `Ok(None)` ends the scan on a truncated tail.
    let decode = |i: usize| -> Option<Option<(WcT, usize)>> {
        match cs.mb_wc(&pattern[i..]) {
            Ok(r) => Some(Some(r)),
            Err(ConvError::NeedMoreBytes(_)) => Some(None),
            Err(_) => None,
        }
    };

    let range = 'scan: loop {
        if i >= pattern.len() || charlen == 0 {
            break 'scan LikeRange { min_length: min_pos, max_length: max_pos };
        }
        let Some((mut wc, len)) = decode(i)? else {
            break 'scan LikeRange { min_length: min_pos, max_length: max_pos };
        };
        i += len;

        if wc == like.escape {
            if i >= pattern.len() {
                break 'scan LikeRange { min_length: min_pos, max_length: max_pos };
            }
            let Some((next, len)) = decode(i)? else {
                break 'scan LikeRange { min_length: min_pos, max_length: max_pos };
            };
            i += len;
            wc = next;
        } else if wc == like.w_one {
            if !put_char(cl, min, &mut min_pos, cl.min_sort_char) || !put_char(cl, max, &mut max_pos, cl.max_sort_char) {
                break 'scan LikeRange { min_length: min_pos, max_length: max_pos };
            }
            charlen -= 1;
            continue;
        } else if wc == like.w_many {
            break 'scan wildcard_lengths(cl, min_pos, res_length);
        } else if let Some(cnt) = contractions {
            if cnt.can_be_head(wc) && i < pattern.len() {
                if let Some(Some((wc2, len2))) = decode(i) {
                    let full = LikeRange { min_length: res_length, max_length: res_length };
                    if wc2 == like.w_one || wc2 == like.w_many {
                        break 'scan full;
                    }
                    if cnt.can_be_tail(wc2) && cnt.contraction2_weight(wc, wc2).is_some() {
                        if charlen == 1 {
                            break 'scan full;
                        }
                        if !put_char(cl, min, &mut min_pos, wc) || !put_char(cl, max, &mut max_pos, wc) {
                            break 'scan LikeRange { min_length: min_pos, max_length: max_pos };
                        }
                        charlen -= 1;
                        i += len2;
                        wc = wc2;
                    }
                }
            }
        }

        if !put_char(cl, min, &mut min_pos, wc) || !put_char(cl, max, &mut max_pos, wc) {
            break 'scan LikeRange { min_length: min_pos, max_length: max_pos };
        }
        charlen -= 1;
    };

    pad_min_max(cl, min, max, min_pos, max_pos, res_length);
    Some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiled::*;

    fn range(cl: &CollationInfo, pattern: &[u8], size: usize) -> (Vec<u8>, Vec<u8>, LikeRange) {
        let mut min = vec![0xAA; size];
        let mut max = vec![0xAA; size];
        let r = cl.like_range(pattern, &LikePattern::default(), &mut min, &mut max).expect("well-formed pattern");
        (min, max, r)
    }

    #[test]
    fn simple_prefix() {
        let (min, max, r) = range(&LATIN1_SWEDISH_CI, b"abc%", 6);
        assert_eq!(&min[..], b"abc\0\0\0");
        assert_eq!(&max[..], b"abc\xFF\xFF\xFF");
        assert_eq!(r, LikeRange { min_length: 6, max_length: 6 });

        let (_, _, r) = range(&LATIN1_BIN, b"abc%", 6);
        assert_eq!(r, LikeRange { min_length: 3, max_length: 6 });
    }

    #[test]
    fn simple_one_and_escape() {
        let (min, max, r) = range(&LATIN1_SWEDISH_CI, b"a_c", 5);
        assert_eq!(&min[..], b"a\0c  ");
        assert_eq!(&max[..], b"a\xFFc  ");
        assert_eq!(r, LikeRange { min_length: 3, max_length: 3 });

        let (min, _, r) = range(&LATIN1_SWEDISH_CI, b"a\\%", 4);
        assert_eq!(&min[..], b"a%  ");
        assert_eq!(r.min_length, 2);
    }

    #[test]
    fn mb_prefix() {
        let (min, max, r) = range(&UTF8MB4_UNICODE_CI, "ñ%".as_bytes(), 12);
        assert_eq!(&min[..2], "ñ".as_bytes());
        assert_eq!(&max[..2], "ñ".as_bytes());
        assert!(min[2..].iter().all(|&b| b == UTF8MB4_UNICODE_CI.min_sort_char as u8));
        assert_eq!(&max[2..5], "\u{FFFF}".as_bytes());
        assert_eq!(max[11], b' ');
        assert_eq!(r, LikeRange { min_length: 12, max_length: 12 });
    }

    #[test]
    fn mb_without_wildcards() {
        let (min, max, r) = range(&UTF8MB4_GENERAL_CI, b"ab", 8);
        assert_eq!(&min[..], b"ab      ");
        assert_eq!(min, max);
        assert_eq!(r, LikeRange { min_length: 2, max_length: 2 });
    }

    #[test]
    fn contraction_head_widens_range() {
        let (min, _, r) = range(&UTF8MB4_CZECH_CI, b"c%", 8);
        assert_eq!(r, LikeRange { min_length: 8, max_length: 8 });
        assert_eq!(min[0], UTF8MB4_CZECH_CI.min_sort_char as u8);
        // Not a contraction: copied as is.
        let (min, _, _) = range(&UTF8MB4_CZECH_CI, b"ca%", 8);
        assert_eq!(&min[..2], b"ca");
    }

    #[test]
    fn generic_ucs2() {
        let pattern = [0x00, b'a', 0x00, b'%'];
        let (min, max, r) = range(&UCS2_GENERAL_CI, &pattern, 8);
        assert_eq!(&min[..2], &[0x00, b'a']);
        assert_eq!(&max[2..], &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(r, LikeRange { min_length: 8, max_length: 8 });

        let (min, max, r) = range(&UCS2_BIN, &pattern, 8);
        assert_eq!(r, LikeRange { min_length: 2, max_length: 8 });
        assert_eq!(&min[..2], &max[..2]);
    }

    #[test]
    fn generic_odd_buffer_zeroes_tail() {
        let pattern = [0x00, b'a'];
        let (min, max, r) = range(&UCS2_GENERAL_CI, &pattern, 5);
        assert_eq!(r, LikeRange { min_length: 2, max_length: 2 });
        assert_eq!(min[4], 0);
        assert_eq!(max[4], 0);
    }

    #[test]
    fn generic_rejects_malformed() {
        let mut min = [0u8; 8];
        let mut max = [0u8; 8];
        // Lone low surrogate.
        let pattern = [0xDC, 0x00, 0x00, b'%'];
        assert!(UTF16_GENERAL_CI.like_range(&pattern, &LikePattern::default(), &mut min, &mut max).is_none());
    }
}
