// collation/strcoll.rs - Byte and code point collations
//
// One generic handler over a `WeightSource`: 8-bit sort-order tables,
// the `general_ci` case-fold weights and plain code points for `_bin`.
// Every character maps to exactly one weight.

use crate::collation::strnxfrm::{pad_desc_and_reverse, weight_bytes};
use crate::collation::wild::wildcmp_generic;
use crate::collation::{instr, sign, CollationHandler, CollationInfo};
use crate::ctype::{hash_add, hash_add_16, LikePattern, MatchPos, StrxfrmFlags, WcT};
use crate::unicase::UNICASE_DEFAULT;

/// Weights of malformed bytes start here, above every character weight.
pub const ILSEQ_WEIGHT_BASE: u32 = 0xFF_0000;

#[inline]
pub fn is_ilseq_weight(w: u32) -> bool {
    w >= ILSEQ_WEIGHT_BASE
}

// === Weight sources ===

pub trait WeightSource: Send + Sync {
    /// Bytes per weight in sort keys.
    fn width(&self) -> usize;

    /// Next character and its byte length, `None` when malformed.
    fn decode(&self, cl: &CollationInfo, s: &[u8]) -> Option<(WcT, usize)>;

    fn weigh(&self, cl: &CollationInfo, wc: WcT) -> u32;

    fn hash_weight(&self, w: u32, nr1: &mut u64, nr2: &mut u64);

    /// Weight and byte length of the next character. A malformed
    /// sequence yields its first byte alone, weighing
    /// `ILSEQ_WEIGHT_BASE + byte`.
    #[inline]
    fn next(&self, cl: &CollationInfo, s: &[u8]) -> (u32, usize) {
        match self.decode(cl, s) {
            Some((wc, len)) => (self.weigh(cl, wc), len),
            None => (ILSEQ_WEIGHT_BASE + s[0] as u32, 1),
        }
    }

    fn space_weight(&self, cl: &CollationInfo) -> u32 {
        self.weigh(cl, cl.charset.pad_char)
    }

    /// Sort key bytes of a weight and their count. Encodings never prefix
    /// one another and keep the weight order under `memcmp`.
    fn key_bytes(&self, w: u32) -> ([u8; 5], usize) {
        let width = self.width();
        let mut out = [0u8; 5];
        out[..width].copy_from_slice(&weight_bytes(w, width)[..width]);
        (out, width)
    }

    /// Most sort key bytes produced per source byte.
    fn key_bytes_per_byte(&self) -> usize {
        self.width()
    }
}

/// Single bytes through the collation's sort order, or as they are.
pub struct SortOrder8;

impl WeightSource for SortOrder8 {
    fn width(&self) -> usize {
        1
    }

    #[inline]
    fn decode(&self, _cl: &CollationInfo, s: &[u8]) -> Option<(WcT, usize)> {
        s.first().map(|&b| (b as WcT, 1))
    }

    #[inline]
    fn weigh(&self, cl: &CollationInfo, wc: WcT) -> u32 {
        match cl.sort_order {
            Some(order) => order[(wc & 0xFF) as usize] as u32,
            None => wc & 0xFF,
        }
    }

    fn hash_weight(&self, w: u32, nr1: &mut u64, nr2: &mut u64) {
        hash_add(nr1, nr2, w);
    }
}

/// Case- and accent-insensitive `general_ci` weights.
pub struct UnicodeCi;

impl WeightSource for UnicodeCi {
    fn width(&self) -> usize {
        2
    }

    #[inline]
    fn decode(&self, cl: &CollationInfo, s: &[u8]) -> Option<(WcT, usize)> {
        cl.charset.mb_wc(s).ok()
    }

    #[inline]
    fn weigh(&self, cl: &CollationInfo, wc: WcT) -> u32 {
        let uni = cl.charset.caseinfo.unwrap_or(&UNICASE_DEFAULT);
        uni.tosort(wc)
    }

    fn hash_weight(&self, w: u32, nr1: &mut u64, nr2: &mut u64) {
        hash_add_16(nr1, nr2, w);
        if w > 0xFFFF {
            hash_add(nr1, nr2, w >> 16);
        }
    }

    // Weights from 0xFFFF up escape with FF FF: three more bytes for a
    // character, FF and the byte for malformed input.
    fn key_bytes(&self, w: u32) -> ([u8; 5], usize) {
        let [_, b2, b1, b0] = w.to_be_bytes();
        if w < 0xFFFF {
            ([b1, b0, 0, 0, 0], 2)
        } else if is_ilseq_weight(w) {
            ([0xFF, 0xFF, 0xFF, b0, 0], 4)
        } else {
            ([0xFF, 0xFF, b2, b1, b0], 5)
        }
    }

    fn key_bytes_per_byte(&self) -> usize {
        4
    }
}

/// Code points, for `_bin` collations of Unicode charsets.
pub struct UnicodeBin;

impl WeightSource for UnicodeBin {
    fn width(&self) -> usize {
        3
    }

    #[inline]
    fn decode(&self, cl: &CollationInfo, s: &[u8]) -> Option<(WcT, usize)> {
        cl.charset.mb_wc(s).ok()
    }

    #[inline]
    fn weigh(&self, _cl: &CollationInfo, wc: WcT) -> u32 {
        wc
    }

    fn hash_weight(&self, w: u32, nr1: &mut u64, nr2: &mut u64) {
        hash_add(nr1, nr2, w & 0xFF);
        hash_add(nr1, nr2, (w >> 8) & 0xFF);
        hash_add(nr1, nr2, w >> 16);
    }
}

// === Handler ===

pub struct StrcollHandler<W> {
    pub source: W,
}

pub static SIMPLE_HANDLER: StrcollHandler<SortOrder8> = StrcollHandler { source: SortOrder8 };
pub static GENERAL_CI_HANDLER: StrcollHandler<UnicodeCi> = StrcollHandler { source: UnicodeCi };
pub static UNICODE_BIN_HANDLER: StrcollHandler<UnicodeBin> = StrcollHandler { source: UnicodeBin };

impl<W: WeightSource> StrcollHandler<W> {
    /// Compares what is left of a string against spaces.
    fn rest_vs_space(&self, cl: &CollationInfo, s: &[u8]) -> i32 {
        let space = self.source.space_weight(cl) as i64;
        let mut i = 0;
        while i < s.len() {
            let (w, len) = self.source.next(cl, &s[i..]);
            if w as i64 != space {
                return sign(w as i64 - space);
            }
            i += len;
        }
        0
    }
}

impl<W: WeightSource> CollationHandler for StrcollHandler<W> {
    fn strnncoll(&self, cl: &CollationInfo, a: &[u8], b: &[u8], b_is_prefix: bool) -> i32 {
        let (mut i, mut j) = (0, 0);
        loop {
            if i >= a.len() {
                return if j < b.len() { -1 } else { 0 };
            }
            if j >= b.len() {
                return if b_is_prefix { 0 } else { 1 };
            }
            let (wa, la) = self.source.next(cl, &a[i..]);
            let (wb, lb) = self.source.next(cl, &b[j..]);
            if wa != wb {
                return sign(wa as i64 - wb as i64);
            }
            i += la;
            j += lb;
        }
    }

    fn strnncollsp(&self, cl: &CollationInfo, a: &[u8], b: &[u8]) -> i32 {
        if cl.is_nopad() {
            return self.strnncoll(cl, a, b, false);
        }
        let (mut i, mut j) = (0, 0);
        loop {
            if i >= a.len() {
                return -self.rest_vs_space(cl, &b[j..]);
            }
            if j >= b.len() {
                return self.rest_vs_space(cl, &a[i..]);
            }
            let (wa, la) = self.source.next(cl, &a[i..]);
            let (wb, lb) = self.source.next(cl, &b[j..]);
            if wa != wb {
                return sign(wa as i64 - wb as i64);
            }
            i += la;
            j += lb;
        }
    }

    fn strnncollsp_nchars(&self, cl: &CollationInfo, a: &[u8], b: &[u8], nchars: usize) -> i32 {
        let space = self.source.space_weight(cl);
        let (mut i, mut j) = (0, 0);
        for _ in 0..nchars {
            if i >= a.len() && j >= b.len() {
                break;
            }
            let wa = if i < a.len() {
                let (w, len) = self.source.next(cl, &a[i..]);
                i += len;
                w
            } else {
                space
            };
            let wb = if j < b.len() {
                let (w, len) = self.source.next(cl, &b[j..]);
                j += len;
                w
            } else {
                space
            };
            if wa != wb {
                return sign(wa as i64 - wb as i64);
            }
        }
        0
    }

    fn strnxfrm(&self, cl: &CollationInfo, dst: &mut [u8], nweights: usize, src: &[u8], flags: StrxfrmFlags) -> usize {
        let width = self.source.width();
        let mut nweights = nweights;
        let mut pos = 0;
        let mut i = 0;
        while nweights > 0 && i < src.len() && pos < dst.len() {
            let (w, len) = self.source.next(cl, &src[i..]);
            let (bytes, size) = self.source.key_bytes(w);
            let n = size.min(dst.len() - pos);
            dst[pos..pos + n].copy_from_slice(&bytes[..n]);
            pos += n;
            i += len;
            nweights -= 1;
        }
        let pad = if cl.is_nopad() { [0u8; 4] } else { weight_bytes(self.source.space_weight(cl), width) };
        pad_desc_and_reverse(dst, 0, pos, nweights, flags, 0, &pad[..width])
    }

    fn strnxfrmlen(&self, cl: &CollationInfo, len: usize) -> usize {
        len * cl.strxfrm_multiply.max(self.source.key_bytes_per_byte())
    }

    fn wildcmp(&self, cl: &CollationInfo, s: &[u8], wild: &[u8], like: &LikePattern) -> i32 {
        let src = &self.source;
        wildcmp_generic(s, wild, like, |b| src.decode(cl, b), |a, b| src.weigh(cl, a) == src.weigh(cl, b))
    }

    fn strcasecmp(&self, cl: &CollationInfo, a: &[u8], b: &[u8]) -> i32 {
        if cl.is_binary() {
            return sign(a.cmp(b) as i64);
        }
        strcasecmp_unicase(cl, a, b)
    }

    fn instr(&self, cl: &CollationInfo, b: &[u8], s: &[u8], matches: &mut [MatchPos]) -> usize {
        if cl.charset.is_8bit() && cl.is_binary() {
            return instr::instr_bin8(b, s, matches);
        }
        instr::instr_generic(cl, b, s, matches)
    }

    fn hash_sort(&self, cl: &CollationInfo, key: &[u8], nr1: &mut u64, nr2: &mut u64) {
        let key = if cl.is_nopad() { key } else { &key[..cl.charset.lengthsp(key)] };
        let mut i = 0;
        while i < key.len() {
            let (w, len) = self.source.next(cl, &key[i..]);
            self.source.hash_weight(w, nr1, nr2);
            i += len;
        }
    }
}

/// Case-insensitive comparison through the charset's case tables.
pub fn strcasecmp_unicase(cl: &CollationInfo, a: &[u8], b: &[u8]) -> i32 {
    let cs = cl.charset;
    if let Some(upper) = cs.to_upper {
        let ua = a.iter().map(|&c| upper[c as usize]);
        let ub = b.iter().map(|&c| upper[c as usize]);
        return sign(ua.cmp(ub) as i64);
    }
    let uni = cs.caseinfo.unwrap_or(&UNICASE_DEFAULT);
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (Ok((wa, la)), Ok((wb, lb))) = (cs.mb_wc(&a[i..]), cs.mb_wc(&b[j..])) else {
            // Compare the rest as bytes.
            return sign(a[i..].cmp(&b[j..]) as i64);
        };
        let (ua, ub) = (uni.toupper(wa), uni.toupper(wb));
        if ua != ub {
            return sign(ua as i64 - ub as i64);
        }
        i += la;
        j += lb;
    }
    sign((a.len() - i) as i64 - (b.len() - j) as i64)
}
