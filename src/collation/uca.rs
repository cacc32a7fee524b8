// collation/uca.rs - UCA collation handler
//
// Compares weight streams produced by `UcaScanner`, one level at a time.
// `levels_for_order` decides how many levels take part: one for the
// classic `_unicode_ci` family, up to three for `uca1400` accent and case
// sensitive variants.

use log::warn;

use crate::collation::strnxfrm::{fill_pattern, pad_desc_and_reverse, weight_bytes};
use crate::collation::wild::wildcmp_generic;
use crate::collation::{sign, CollationHandler, CollationInfo};
use crate::ctype::{hash_add, LikePattern, StrxfrmFlags};
use crate::error::CollationError;
use crate::uca::scanner::{char_weights, UcaScanner};
use crate::uca::tailoring::build_tailored;
use crate::uca::{UcaInfo, UcaVersion};

pub struct UcaHandler;

pub static UCA_HANDLER: UcaHandler = UcaHandler;

/// Separator written between the levels of a multi-level sort key.
const LEVEL_SEPARATOR: [u8; 2] = [0x00, 0x00];

impl UcaHandler {
    #[inline]
    fn levels(cl: &CollationInfo) -> usize {
        cl.levels_for_order.max(1)
    }

    fn strnncoll_onelevel(cl: &CollationInfo, uca: &UcaInfo, level: usize, a: &[u8], b: &[u8], b_is_prefix: bool) -> i32 {
        let mut sa = UcaScanner::new(cl.charset, uca, level, a);
        let mut sb = UcaScanner::new(cl.charset, uca, level, b);
        loop {
            match (sa.next_weight(), sb.next_weight()) {
                (Some(x), Some(y)) if x == y => continue,
                (Some(x), Some(y)) => return sign(x as i64 - y as i64),
                (None, None) => return 0,
                (None, Some(_)) => return -1,
                (Some(_), None) => return if b_is_prefix { 0 } else { 1 },
            }
        }
    }

    fn strnncollsp_onelevel(cl: &CollationInfo, uca: &UcaInfo, level: usize, a: &[u8], b: &[u8]) -> i32 {
        let mut sa = UcaScanner::new(cl.charset, uca, level, a);
        let mut sb = UcaScanner::new(cl.charset, uca, level, b);
        let space = uca.space_weight(level);
        loop {
            match (sa.next_weight(), sb.next_weight()) {
                (Some(x), Some(y)) if x == y => continue,
                (Some(x), Some(y)) => return sign(x as i64 - y as i64),
                (None, None) => return 0,
                (None, Some(y)) => return -rest_vs_space(&mut sb, y, space),
                (Some(x), None) => return rest_vs_space(&mut sa, x, space),
            }
        }
    }

    fn strnncollsp_nchars_onelevel(
        cl: &CollationInfo,
        uca: &UcaInfo,
        level: usize,
        a: &[u8],
        b: &[u8],
        nchars: usize,
    ) -> i32 {
        let mut sa = BoundedScanner::new(UcaScanner::new(cl.charset, uca, level, a), nchars);
        let mut sb = BoundedScanner::new(UcaScanner::new(cl.charset, uca, level, b), nchars);
        // Past the budget a PAD collation sees endless spaces, NOPAD sees the end.
        let pad = (!cl.is_nopad()).then(|| uca.space_weight(level));
        loop {
            let (x, y) = match (sa.next(), sb.next()) {
                (None, None) => return 0,
                (Some(x), Some(y)) => (x, y),
                (None, Some(y)) => match pad {
                    Some(space) => (space, y),
                    None => return -1,
                },
                (Some(x), None) => match pad {
                    Some(space) => (x, space),
                    None => return 1,
                },
            };
            if x != y {
                return sign(x as i64 - y as i64);
            }
        }
    }

    /// Writes the weights of one level and returns the new position.
    fn strnxfrm_onelevel(
        cl: &CollationInfo,
        uca: &UcaInfo,
        level: usize,
        dst: &mut [u8],
        pos: usize,
        nweights: usize,
        src: &[u8],
        flags: StrxfrmFlags,
    ) -> usize {
        let start = pos;
        let mut pos = pos;
        let mut nweights = nweights;
        let mut scanner = UcaScanner::new(cl.charset, uca, level, src);
        while nweights > 0 && pos < dst.len() {
            let Some(w) = scanner.next_weight() else { break };
            let bytes = w.to_be_bytes();
            let n = (dst.len() - pos).min(2);
            dst[pos..pos + n].copy_from_slice(&bytes[..n]);
            pos += n;
            nweights -= 1;
        }
        let pad = if cl.is_nopad() { [0u8; 4] } else { weight_bytes(uca.space_weight(level) as u32, 2) };
        pad_desc_and_reverse(dst, start, pos, nweights, flags, level, &pad[..2])
    }
}

/// Compares the remaining weights of a scanner, starting with `first`,
/// against the space weight.
fn rest_vs_space(scanner: &mut UcaScanner<'_>, first: u16, space: u16) -> i32 {
    let mut w = first;
    loop {
        if w != space {
            return sign(w as i64 - space as i64);
        }
        match scanner.next_weight() {
            Some(next) => w = next,
            None => return 0,
        }
    }
}

/// Weights of the first `nchars` characters of a string. A collation
/// element reaching past the budget ends the scan.
struct BoundedScanner<'a> {
    inner: UcaScanner<'a>,
    left: usize,
    done: bool,
}

impl<'a> BoundedScanner<'a> {
    fn new(inner: UcaScanner<'a>, nchars: usize) -> Self {
        BoundedScanner { inner, left: nchars, done: false }
    }
}

impl Iterator for BoundedScanner<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.done {
            return None;
        }
        // Pending weights of an expansion belong to a counted character.
        if self.left > 0 || self.inner.has_pending() {
            if let Some(r) = self.inner.next_with_nchars(self.left.max(1)) {
                if r.nchars <= self.left {
                    self.left -= r.nchars;
                    return Some(r.weight);
                }
            }
        }
        self.done = true;
        None
    }
}

impl CollationHandler for UcaHandler {
    fn init(&self, cl: &CollationInfo) -> Result<(), CollationError> {
        let Some(rules) = cl.tailoring.as_deref() else { return Ok(()) };
        let version = cl.uca.map_or(UcaVersion::V400, |u| u.version);
        let built = cl.tailored.get_or_init(|| {
            let r = build_tailored(&cl.name, rules, version);
            if let Err(e) = &r {
                warn!("{}", e);
            }
            r
        });
        built.as_ref().map(|_| ()).map_err(Clone::clone)
    }

    fn strnncoll(&self, cl: &CollationInfo, a: &[u8], b: &[u8], b_is_prefix: bool) -> i32 {
        let Some(uca) = cl.uca() else { return sign(a.cmp(b) as i64) };
        for level in 0..Self::levels(cl) {
            let r = Self::strnncoll_onelevel(cl, uca, level, a, b, b_is_prefix);
            if r != 0 {
                return r;
            }
        }
        0
    }

    fn strnncollsp(&self, cl: &CollationInfo, a: &[u8], b: &[u8]) -> i32 {
        if cl.is_nopad() {
            return self.strnncoll(cl, a, b, false);
        }
        let Some(uca) = cl.uca() else { return sign(a.cmp(b) as i64) };
        for level in 0..Self::levels(cl) {
            let r = Self::strnncollsp_onelevel(cl, uca, level, a, b);
            if r != 0 {
                return r;
            }
        }
        0
    }

    fn strnncollsp_nchars(&self, cl: &CollationInfo, a: &[u8], b: &[u8], nchars: usize) -> i32 {
        let Some(uca) = cl.uca() else { return sign(a.cmp(b) as i64) };
        for level in 0..Self::levels(cl) {
            let r = Self::strnncollsp_nchars_onelevel(cl, uca, level, a, b, nchars);
            if r != 0 {
                return r;
            }
        }
        0
    }

    fn strnxfrm(&self, cl: &CollationInfo, dst: &mut [u8], nweights: usize, src: &[u8], flags: StrxfrmFlags) -> usize {
        let Some(uca) = cl.uca() else { return 0 };
        let src = if cl.is_nopad() || !flags.contains(StrxfrmFlags::PAD_WITH_SPACE) {
            src
        } else {
            &src[..cl.charset.lengthsp(src)]
        };
        let levels = Self::levels(cl);
        if levels == 1 {
            return Self::strnxfrm_onelevel(cl, uca, 0, dst, 0, nweights, src, flags);
        }

        let level_flags = flags - StrxfrmFlags::PAD_TO_MAXLEN;
        let mut pos = 0;
        let mut first = true;
        for level in (0..levels).filter(|&l| flags.wants_level(l)) {
            if !first {
                pos = fill_pattern(dst, pos, LEVEL_SEPARATOR.len(), &LEVEL_SEPARATOR);
            }
            first = false;
            pos = Self::strnxfrm_onelevel(cl, uca, level, dst, pos, nweights, src, level_flags);
        }
        if flags.contains(StrxfrmFlags::PAD_TO_MAXLEN) && pos < dst.len() {
            dst[pos..].fill(0);
            pos = dst.len();
        }
        pos
    }

    fn strnxfrmlen(&self, cl: &CollationInfo, len: usize) -> usize {
        let levels = Self::levels(cl);
        let nchars = len.div_ceil(cl.charset.mbminlen.max(1));
        nchars * cl.strxfrm_multiply * levels + LEVEL_SEPARATOR.len() * (levels - 1)
    }

    fn wildcmp(&self, cl: &CollationInfo, s: &[u8], wild: &[u8], like: &LikePattern) -> i32 {
        let cs = cl.charset;
        let Some(uca) = cl.uca() else {
            return wildcmp_generic(s, wild, like, |b| cs.mb_wc(b).ok(), |a, b| a == b);
        };
        let levels = Self::levels(cl);
        wildcmp_generic(
            s,
            wild,
            like,
            |b| cs.mb_wc(b).ok(),
            |a, b| a == b || (0..levels).all(|l| char_weights(uca, l, a) == char_weights(uca, l, b)),
        )
    }

    fn hash_sort(&self, cl: &CollationInfo, key: &[u8], nr1: &mut u64, nr2: &mut u64) {
        let Some(uca) = cl.uca() else { return };
        let mut scanner = UcaScanner::new(cl.charset, uca, 0, key);
        let add = |w: u16, nr1: &mut u64, nr2: &mut u64| {
            hash_add(nr1, nr2, (w >> 8) as u32);
            hash_add(nr1, nr2, (w & 0xFF) as u32);
        };
        if cl.is_nopad() {
            for w in scanner {
                add(w, nr1, nr2);
            }
            return;
        }
        let space = uca.space_weight(0);
        let mut spaces = 0usize;
        while let Some(w) = scanner.next_weight() {
            if w == space {
                spaces += 1;
                continue;
            }
            // Spaces count only when something follows them.
            for _ in 0..spaces {
                add(space, nr1, nr2);
            }
            spaces = 0;
            add(w, nr1, nr2);
        }
    }

    fn propagate(&self, cl: &CollationInfo) -> bool {
        !cl.uca().is_some_and(|u| u.has_contractions())
    }
}
