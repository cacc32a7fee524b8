// collation/instr.rs - Substring search
// `instr` reports where a needle starts and ends; positions are byte
// offsets into the haystack, `mb_len` counts characters.

use memchr::memmem;

use crate::collation::CollationInfo;
use crate::ctype::MatchPos;

#[inline]
fn set_match(matches: &mut [MatchPos], i: usize, m: MatchPos) {
    if let Some(slot) = matches.get_mut(i) {
        *slot = m;
    }
}

/// Collation-aware search, stepping through `b` one character at a time
/// and comparing a window of `s.len()` bytes.
pub fn instr_generic(cl: &CollationInfo, b: &[u8], s: &[u8], matches: &mut [MatchPos]) -> usize {
    if s.is_empty() {
        set_match(matches, 0, MatchPos::default());
        return 1;
    }
    if s.len() > b.len() {
        return 0;
    }
    let cs = cl.charset;
    let last = b.len() - s.len();
    let mut pos = 0;
    let mut nchars = 0;
    while pos <= last {
        if cl.strnncoll(&b[pos..pos + s.len()], s, false) == 0 {
            set_match(matches, 0, MatchPos { beg: 0, end: pos, mb_len: nchars });
            set_match(matches, 1, MatchPos { beg: pos, end: pos + s.len(), mb_len: cs.numchars(s) });
            return 2;
        }
        let step = cs.charlen(&b[pos..]).unwrap_or(1).max(1);
        pos += step;
        nchars += 1;
    }
    0
}

/// Byte search for binary 8-bit collations.
pub fn instr_bin8(b: &[u8], s: &[u8], matches: &mut [MatchPos]) -> usize {
    if s.is_empty() {
        set_match(matches, 0, MatchPos::default());
        return 1;
    }
    match memmem::find(b, s) {
        Some(pos) => {
            set_match(matches, 0, MatchPos { beg: 0, end: pos, mb_len: pos });
            set_match(matches, 1, MatchPos { beg: pos, end: pos + s.len(), mb_len: s.len() });
            2
        }
        None => 0,
    }
}
