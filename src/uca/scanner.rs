// uca/scanner.rs - Weight iteration over an encoded string
//
// Decodes one character at a time, resolves contractions and yields the
// weights of one level. Malformed bytes weigh `WEIGHT_ILSEQ` and never
// stop the scan.

use smallvec::SmallVec;

use crate::charset::CharsetInfo;
use crate::ctype::WcT;
use crate::uca::implicit::implicit_weights;
use crate::uca::{UcaInfo, UcaWeightLevel, MAX_CHAR_WEIGHTS, MAX_CONTRACTION_LENGTH, WEIGHT_ILSEQ, WEIGHT_OUT_OF_RANGE};

/// A weight and the number of characters consumed to produce it. Second
/// and later weights of an expansion report zero characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightAndNchars {
    pub weight: u16,
    pub nchars: usize,
}

pub struct UcaScanner<'a> {
    cs: &'a CharsetInfo,
    uca: &'a UcaInfo,
    level: &'a UcaWeightLevel,
    s: &'a [u8],
    pos: usize,
    prev: Option<WcT>,
    // Weights of the current character not yet returned.
    rest: &'a [u16],
    implicit: [u16; 2],
    implicit_pos: usize,
    implicit_len: usize,
}

impl<'a> UcaScanner<'a> {
    pub fn new(cs: &'a CharsetInfo, uca: &'a UcaInfo, level: usize, s: &'a [u8]) -> UcaScanner<'a> {
        UcaScanner {
            cs,
            uca,
            level: uca.level(level),
            s,
            pos: 0,
            prev: None,
            rest: &[],
            implicit: [0; 2],
            implicit_pos: 0,
            implicit_len: 0,
        }
    }

    /// Byte offset of the next undecoded character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Weight of U+0020 on the scanned level.
    #[inline]
    pub fn space_weight(&self) -> u16 {
        self.uca.space_weight(self.level.levelno)
    }

    /// Are weights of an already consumed character still pending?
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.rest.is_empty() || self.implicit_pos < self.implicit_len
    }

    #[inline]
    fn take_pending(&mut self) -> Option<u16> {
        if let Some((&w, tail)) = self.rest.split_first() {
            self.rest = tail;
            return Some(w);
        }
        if self.implicit_pos < self.implicit_len {
            let w = self.implicit[self.implicit_pos];
            self.implicit_pos += 1;
            return Some(w);
        }
        None
    }

    /// The next weight, or `None` at the end of the string.
    #[inline]
    pub fn next_weight(&mut self) -> Option<u16> {
        self.next_with_nchars(usize::MAX).map(|r| r.weight)
    }

    /// The next weight, matching only contractions that end within
    /// `max_chars` characters, ignorables consumed on the way included.
    pub fn next_with_nchars(&mut self, max_chars: usize) -> Option<WeightAndNchars> {
        let mut nchars = 0;
        loop {
            if let Some(weight) = self.take_pending() {
                return Some(WeightAndNchars { weight, nchars });
            }
            if self.pos >= self.s.len() {
                return None;
            }
            let (wc, len) = match self.cs.mb_wc(&self.s[self.pos..]) {
                Ok(r) => r,
                Err(_) => {
                    self.pos = (self.pos + self.cs.mbminlen).min(self.s.len());
                    self.prev = None;
                    return Some(WeightAndNchars { weight: WEIGHT_ILSEQ, nchars: nchars + 1 });
                }
            };
            nchars += 1;
            if wc > self.level.maxchar {
                self.pos += len;
                self.prev = Some(wc);
                return Some(WeightAndNchars { weight: WEIGHT_OUT_OF_RANGE, nchars });
            }

            let level: &'a UcaWeightLevel = self.level;
            let contractions = &level.contractions;
            if !contractions.is_empty() {
                if let Some(prev) = self.prev {
                    if contractions.can_be_previous_context_tail(wc) && contractions.can_be_previous_context_head(prev) {
                        if let Some(c) = contractions.find_with_context(prev, wc) {
                            self.pos += len;
                            self.prev = Some(wc);
                            self.rest = c.weights.as_slice();
                            continue;
                        }
                    }
                }
                let room = max_chars.saturating_sub(nchars - 1);
                if room > 1 && contractions.can_be_head(wc) {
                    if let Some((weights, end, used, last)) = self.find_contraction(wc, len, room) {
                        self.pos = end;
                        self.prev = Some(last);
                        self.rest = weights;
                        nchars += used - 1;
                        continue;
                    }
                }
            }

            self.pos += len;
            self.prev = Some(wc);
            match level.weights(wc) {
                Some(w) => self.rest = w,
                None => {
                    self.implicit_len = implicit_weights(self.uca.version, self.level.levelno, wc, &mut self.implicit);
                    self.implicit_pos = 0;
                }
            }
        }
    }

    /// Longest contraction starting with `wc` at the current position.
    /// Returns its weights, the byte offset past it, its length in
    /// characters and its last character.
    fn find_contraction(&self, wc: WcT, len: usize, max_chars: usize) -> Option<(&'a [u16], usize, usize, WcT)> {
        let level: &'a UcaWeightLevel = self.level;
        let contractions = &level.contractions;
        let limit = max_chars.min(MAX_CONTRACTION_LENGTH);
        let mut chars: SmallVec<[WcT; MAX_CONTRACTION_LENGTH]> = SmallVec::new();
        let mut ends: SmallVec<[usize; MAX_CONTRACTION_LENGTH]> = SmallVec::new();
        chars.push(wc);
        ends.push(self.pos + len);

        let mut p = self.pos + len;
        while chars.len() < limit && p < self.s.len() {
            let Ok((next, l)) = self.cs.mb_wc(&self.s[p..]) else { break };
            let i = chars.len();
            if !contractions.can_be_tail(next) && !contractions.can_be_mid(next, i) {
                break;
            }
            chars.push(next);
            p += l;
            ends.push(p);
        }

        for n in (2..=chars.len()).rev() {
            if !contractions.can_be_tail(chars[n - 1]) {
                continue;
            }
            if let Some(c) = contractions.find(&chars[..n]) {
                return Some((c.weights.as_slice(), ends[n - 1], n, chars[n - 1]));
            }
        }
        None
    }
}

impl Iterator for UcaScanner<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        self.next_weight()
    }
}

/// Weights of a single character on one level, contractions aside.
pub fn char_weights(uca: &UcaInfo, level: usize, wc: WcT) -> SmallVec<[u16; MAX_CHAR_WEIGHTS]> {
    let lv = uca.level(level);
    if wc > lv.maxchar {
        return SmallVec::from_slice(&[WEIGHT_OUT_OF_RANGE]);
    }
    match lv.weights(wc) {
        Some(w) => SmallVec::from_slice(w),
        None => {
            let mut buf = [0u16; 2];
            let n = implicit_weights(uca.version, lv.levelno, wc, &mut buf);
            SmallVec::from_slice(&buf[..n])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charsets::{CHARSET_UTF16, CHARSET_UTF8MB3, CHARSET_UTF8MB4};
    use crate::uca::{Contraction, Contractions, UCA400, UCA520};

    fn weights(uca: &UcaInfo, level: usize, s: &[u8]) -> Vec<u16> {
        UcaScanner::new(&CHARSET_UTF8MB4, uca, level, s).collect()
    }

    #[test]
    fn case_folds_at_primary() {
        assert_eq!(weights(&UCA400, 0, b"abc"), weights(&UCA400, 0, b"ABC"));
        assert_ne!(weights(&UCA400, 2, b"abc"), weights(&UCA400, 2, b"ABC"));
    }

    #[test]
    fn ignorables_are_skipped() {
        assert_eq!(weights(&UCA400, 0, b"a\x01b"), weights(&UCA400, 0, b"ab"));
    }

    #[test]
    fn accent_is_secondary_only() {
        assert_eq!(weights(&UCA400, 0, "é".as_bytes()), weights(&UCA400, 0, b"e"));
        assert_eq!(weights(&UCA400, 1, "é".as_bytes()).len(), 2);
    }

    #[test]
    fn implicit_han() {
        let w = weights(&UCA520, 0, "\u{4E00}".as_bytes());
        assert_eq!(w, vec![0xFB40, 0xCE00]);
    }

    #[test]
    fn supplementary_in_bmp_table() {
        let s = "\u{1F600}".as_bytes();
        let mut sc = UcaScanner::new(&CHARSET_UTF8MB4, &UCA400, 0, s);
        assert_eq!(sc.next_weight(), Some(WEIGHT_OUT_OF_RANGE));
        assert_eq!(sc.next_weight(), None);
    }

    #[test]
    fn bad_bytes_weigh_ilseq() {
        let mut sc = UcaScanner::new(&CHARSET_UTF8MB3, &UCA400, 0, b"\xFFa");
        assert_eq!(sc.next_weight(), Some(WEIGHT_ILSEQ));
        assert!(sc.next_weight().is_some());
        assert_eq!(sc.next_weight(), None);
        // A truncated trailing unit is consumed in one step.
        let mut sc = UcaScanner::new(&CHARSET_UTF16, &UCA400, 0, b"\x00a\x00");
        assert!(sc.next_weight().is_some());
        assert_eq!(sc.next_weight(), Some(WEIGHT_ILSEQ));
        assert_eq!(sc.next_weight(), None);
    }

    #[test]
    fn nchars_counts_ignorables_and_expansions() {
        let mut sc = UcaScanner::new(&CHARSET_UTF8MB4, &UCA400, 0, "\u{1}ß".as_bytes());
        let first = sc.next_with_nchars(6).map(|r| r.nchars);
        let second = sc.next_with_nchars(6).map(|r| r.nchars);
        assert_eq!(first, Some(2));
        assert_eq!(second, Some(0));
        assert!(sc.next_with_nchars(6).is_none());
    }

    fn with_contraction() -> UcaInfo {
        let mut uca = UCA400.clone();
        for lv in uca.levels.iter_mut() {
            let items = vec![Contraction {
                chars: SmallVec::from_slice(&['c' as WcT, 'h' as WcT]),
                weights: SmallVec::from_slice(&[0x1234]),
                with_context: false,
            }];
            lv.contractions = Contractions::new(items);
        }
        uca
    }

    #[test]
    fn contraction_is_one_unit() {
        let uca = with_contraction();
        let mut sc = UcaScanner::new(&CHARSET_UTF8MB4, &uca, 0, b"cha");
        assert_eq!(sc.next_with_nchars(6), Some(WeightAndNchars { weight: 0x1234, nchars: 2 }));
        assert_eq!(sc.offset(), 2);
        // A one character budget splits it.
        let mut sc = UcaScanner::new(&CHARSET_UTF8MB4, &uca, 0, b"cha");
        let r = sc.next_with_nchars(1).map(|r| r.nchars);
        assert_eq!(r, Some(1));
        assert_eq!(sc.offset(), 1);
    }

    #[test]
    fn ignorables_shrink_contraction_room() {
        let uca = with_contraction();
        let mut sc = UcaScanner::new(&CHARSET_UTF8MB4, &uca, 0, b"\x01cha");
        let r = sc.next_with_nchars(2).unwrap();
        assert_ne!(r.weight, 0x1234);
        assert_eq!(r.nchars, 2);
        let mut sc = UcaScanner::new(&CHARSET_UTF8MB4, &uca, 0, b"\x01cha");
        assert_eq!(sc.next_with_nchars(3), Some(WeightAndNchars { weight: 0x1234, nchars: 3 }));
    }

    #[test]
    fn single_char_weights() {
        assert_eq!(char_weights(&UCA400, 0, 'a' as WcT).as_slice(), &weights(&UCA400, 0, b"a")[..]);
        assert_eq!(char_weights(&UCA400, 0, 0x1F600).as_slice(), &[WEIGHT_OUT_OF_RANGE]);
    }
}
