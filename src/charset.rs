// charset.rs - Charset descriptor and codec trait
// `CharsetInfo` describes one encoding; `CharsetHandler` is the per-family
// operation table (decode, encode, length helpers, case mapping, numeric
// parsing). Default methods implement the multi-byte generic versions.

use once_cell::sync::Lazy;

use crate::charsets::ascii::CTYPE_ASCII;
use crate::ctype::*;
use crate::error::ConvError;
use crate::numeric::{self, NumResult};
use crate::unicase::UnicaseInfo;

/// A charset reference, as held by collations and the registry.
pub type CharsetRef = &'static CharsetInfo;

// === Status records ===

/// Result of scanning for well-formed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WellFormedStatus {
    /// Number of complete characters found.
    pub nchars: usize,
    /// Offset of the first malformed sequence, if scanning stopped on one.
    pub error_pos: Option<usize>,
}

/// Result of `copy_fix` and `convert_fix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyStatus {
    /// How far into the source the copy got.
    pub source_end_pos: usize,
    /// First malformed source sequence.
    pub well_formed_error_pos: Option<usize>,
    /// First source character the target charset could not represent.
    pub cannot_convert_error_pos: Option<usize>,
}

// === Charset descriptor ===

/// Describes one encoding. Immutable; shared by every collation of the
/// charset.
pub struct CharsetInfo {
    pub name: &'static str,
    pub comment: &'static str,
    pub state: CharsetState,
    pub mbminlen: usize,
    pub mbmaxlen: usize,
    pub caseup_multiply: usize,
    pub casedn_multiply: usize,
    /// Code point used for PAD SPACE and `fill`.
    pub pad_char: WcT,
    pub ctype: Option<&'static [u8; 256]>,
    pub to_lower: Option<&'static [u8; 256]>,
    pub to_upper: Option<&'static [u8; 256]>,
    pub tab_to_uni: Option<&'static [u16; 256]>,
    /// Sorted non-identity entries of the reverse 8-bit map.
    pub tab_from_uni: &'static [(u16, u8)],
    pub caseinfo: Option<&'static Lazy<UnicaseInfo>>,
    pub handler: &'static dyn CharsetHandler,
}

impl std::fmt::Debug for CharsetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharsetInfo")
            .field("name", &self.name)
            .field("mbminlen", &self.mbminlen)
            .field("mbmaxlen", &self.mbmaxlen)
            .finish()
    }
}

impl CharsetInfo {
    #[inline]
    pub fn mb_wc(&self, s: &[u8]) -> Result<(WcT, usize), ConvError> {
        self.handler.mb_wc(self, s)
    }

    #[inline]
    pub fn wc_mb(&self, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        self.handler.wc_mb(self, wc, out)
    }

    #[inline]
    pub fn charlen(&self, s: &[u8]) -> Result<usize, ConvError> {
        self.handler.charlen(self, s)
    }

    pub fn numchars(&self, s: &[u8]) -> usize {
        self.handler.numchars(self, s)
    }

    pub fn charpos(&self, s: &[u8], pos: usize) -> usize {
        self.handler.charpos(self, s, pos)
    }

    #[inline]
    pub fn lengthsp(&self, s: &[u8]) -> usize {
        self.handler.lengthsp(self, s)
    }

    pub fn well_formed_char_length(&self, s: &[u8], nchars: usize) -> (usize, WellFormedStatus) {
        self.handler.well_formed_char_length(self, s, nchars)
    }

    /// Byte length of the well-formed prefix of `s`.
    pub fn well_formed_len(&self, s: &[u8]) -> usize {
        self.well_formed_char_length(s, usize::MAX).0
    }

    pub fn copy_fix(&self, dst: &mut [u8], src: &[u8], nchars: usize) -> (usize, CopyStatus) {
        self.handler.copy_fix(self, dst, src, nchars)
    }

    pub fn caseup(&self, src: &[u8], dst: &mut [u8]) -> usize {
        self.handler.caseup(self, src, dst)
    }

    pub fn casedn(&self, src: &[u8], dst: &mut [u8]) -> usize {
        self.handler.casedn(self, src, dst)
    }

    pub fn fill(&self, dst: &mut [u8], wc: WcT) {
        self.handler.fill(self, dst, wc)
    }

    pub fn is_mbchar(&self, s: &[u8]) -> bool {
        self.mbmaxlen > 1 && matches!(self.charlen(s), Ok(n) if n > 1)
    }

    #[inline]
    pub fn is_unicode(&self) -> bool {
        self.state.contains(CharsetState::UNICODE)
    }

    #[inline]
    pub fn is_8bit(&self) -> bool {
        self.mbmaxlen == 1
    }

    /// Does every byte below 0x80 stand for the same ASCII character?
    #[inline]
    pub fn is_ascii_compatible(&self) -> bool {
        self.mbminlen == 1 && !self.state.contains(CharsetState::NONASCII)
    }

    pub fn strntol(&self, s: &[u8], base: u32) -> NumResult<i32> {
        self.handler.strntol(self, s, base)
    }

    pub fn strntoul(&self, s: &[u8], base: u32) -> NumResult<u32> {
        self.handler.strntoul(self, s, base)
    }

    pub fn strntoll(&self, s: &[u8], base: u32) -> NumResult<i64> {
        self.handler.strntoll(self, s, base)
    }

    pub fn strntoull(&self, s: &[u8], base: u32) -> NumResult<u64> {
        self.handler.strntoull(self, s, base)
    }

    pub fn strntod(&self, s: &[u8]) -> NumResult<f64> {
        self.handler.strntod(self, s)
    }
}

// === Handler trait ===

/// Per-encoding-family operation table.
///
/// Only `mb_wc` and `wc_mb` are required. The provided methods work for
/// any charset by decoding characters; families override them where a
/// direct byte-level version exists.
pub trait CharsetHandler: Send + Sync {
    /// Decodes the character at the start of `s`.
    fn mb_wc(&self, cs: &CharsetInfo, s: &[u8]) -> Result<(WcT, usize), ConvError>;

    /// Encodes `wc` into `out`.
    fn wc_mb(&self, cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError>;

    /// Validated byte length of the next character.
    fn charlen(&self, cs: &CharsetInfo, s: &[u8]) -> Result<usize, ConvError> {
        self.mb_wc(cs, s).map(|(_, len)| len)
    }

    /// Number of characters in `s`. A malformed sequence counts as one
    /// character of `mbminlen` bytes.
    fn numchars(&self, cs: &CharsetInfo, s: &[u8]) -> usize {
        let mut pos = 0;
        let mut count = 0;
        while pos < s.len() {
            pos += self.charlen(cs, &s[pos..]).unwrap_or(cs.mbminlen).min(s.len() - pos);
            count += 1;
        }
        count
    }

    /// Byte offset of the `pos`-th character. If `s` holds fewer
    /// characters, the result points `mbminlen` bytes past the end.
    fn charpos(&self, cs: &CharsetInfo, s: &[u8], pos: usize) -> usize {
        let mut off = 0;
        for _ in 0..pos {
            if off >= s.len() {
                return s.len() + cs.mbminlen;
            }
            match self.charlen(cs, &s[off..]) {
                Ok(n) => off += n,
                Err(_) => return s.len() + cs.mbminlen,
            }
        }
        off
    }

    /// Length of `s` without trailing pad characters.
    fn lengthsp(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        lengthsp_8bit(s)
    }

    /// Scans at most `nchars` well-formed characters. Returns the byte
    /// length of the well-formed prefix.
    fn well_formed_char_length(&self, cs: &CharsetInfo, s: &[u8], nchars: usize) -> (usize, WellFormedStatus) {
        let mut status = WellFormedStatus::default();
        let mut pos = 0;
        while status.nchars < nchars && pos < s.len() {
            match self.charlen(cs, &s[pos..]) {
                Ok(n) => {
                    pos += n;
                    status.nchars += 1;
                }
                Err(_) => {
                    status.error_pos = Some(pos);
                    break;
                }
            }
        }
        (pos, status)
    }

    /// Copies up to `nchars` characters, replacing malformed sequences
    /// with `?`.
    fn copy_fix(&self, cs: &CharsetInfo, dst: &mut [u8], src: &[u8], nchars: usize) -> (usize, CopyStatus) {
        copy_fix_mb(cs, dst, src, nchars)
    }

    /// Converts `src` to upper case into `dst`. Returns bytes written.
    fn caseup(&self, cs: &CharsetInfo, src: &[u8], dst: &mut [u8]) -> usize {
        casemap_unicode(cs, src, dst, true)
    }

    /// Converts `src` to lower case into `dst`. Returns bytes written.
    fn casedn(&self, cs: &CharsetInfo, src: &[u8], dst: &mut [u8]) -> usize {
        casemap_unicode(cs, src, dst, false)
    }

    /// Fills `dst` with copies of `wc`. Bytes that cannot hold a whole
    /// character are zeroed.
    fn fill(&self, cs: &CharsetInfo, dst: &mut [u8], wc: WcT) {
        fill_mb(cs, dst, wc)
    }

    /// Number of leading pad characters.
    fn scan_spaces(&self, cs: &CharsetInfo, s: &[u8]) -> usize {
        let mut pos = 0;
        let mut count = 0;
        while pos < s.len() {
            match self.mb_wc(cs, &s[pos..]) {
                Ok((wc, n)) if wc == 0x20 => {
                    pos += n;
                    count += 1;
                }
                _ => break,
            }
        }
        count
    }

    /// ctype bits of the next character and its length.
    fn ctype(&self, cs: &CharsetInfo, s: &[u8]) -> (u8, usize) {
        match self.mb_wc(cs, s) {
            Ok((wc, n)) => (unicode_ctype(wc), n),
            Err(_) => (0, cs.mbminlen.min(s.len())),
        }
    }

    /// Encodes a charset-native code. Unicode charsets treat it as a code
    /// point.
    fn native_to_mb(&self, cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        self.wc_mb(cs, wc, out)
    }

    fn strntol(&self, cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<i32> {
        numeric::strntol(cs, s, base)
    }

    fn strntoul(&self, cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<u32> {
        numeric::strntoul(cs, s, base)
    }

    fn strntoll(&self, cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<i64> {
        numeric::strntoll(cs, s, base)
    }

    fn strntoull(&self, cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<u64> {
        numeric::strntoull(cs, s, base)
    }

    fn strntod(&self, cs: &CharsetInfo, s: &[u8]) -> NumResult<f64> {
        numeric::strntod(cs, s)
    }
}

// === Shared helpers ===

/// Length without trailing 0x20 bytes.
#[inline]
pub fn lengthsp_8bit(s: &[u8]) -> usize {
    s.iter().rposition(|&b| b != b' ').map_or(0, |p| p + 1)
}

/// ctype bits for a code point, ASCII table below 0x80.
pub fn unicode_ctype(wc: WcT) -> u8 {
    if wc < 0x80 {
        return CTYPE_ASCII[wc as usize];
    }
    match char::from_u32(wc) {
        Some(c) if c.is_whitespace() => CTYPE_SPC | CTYPE_B,
        Some(c) if c.is_uppercase() => CTYPE_U,
        Some(c) if c.is_lowercase() => CTYPE_L,
        Some(c) if c.is_alphabetic() => CTYPE_L | CTYPE_U,
        Some(c) if c.is_numeric() => CTYPE_NMR,
        Some(c) if c.is_control() => CTYPE_CTR,
        Some(_) => CTYPE_PNT,
        None => 0,
    }
}

pub(crate) fn fill_mb(cs: &CharsetInfo, dst: &mut [u8], wc: WcT) {
    let mut buf = [0u8; MB_MAXLEN];
    let n = match cs.wc_mb(wc, &mut buf) {
        Ok(n) if n > 0 => n,
        _ => {
            dst.fill(0);
            return;
        }
    };
    let mut chunks = dst.chunks_exact_mut(n);
    for chunk in &mut chunks {
        chunk.copy_from_slice(&buf[..n]);
    }
    chunks.into_remainder().fill(0);
}

/// Upper/lower-cases through the charset's Unicode case table. Characters
/// that do not fit into `dst` stop the conversion.
pub(crate) fn casemap_unicode(cs: &CharsetInfo, src: &[u8], dst: &mut [u8], upper: bool) -> usize {
    let Some(uni) = cs.caseinfo else {
        let n = src.len().min(dst.len());
        dst[..n].copy_from_slice(&src[..n]);
        return n;
    };
    let mut spos = 0;
    let mut dpos = 0;
    while spos < src.len() {
        let (wc, n) = match cs.mb_wc(&src[spos..]) {
            Ok(r) => r,
            Err(_) => break,
        };
        let mapped = if upper { uni.toupper(wc) } else { uni.tolower(wc) };
        match cs.wc_mb(mapped, &mut dst[dpos..]) {
            Ok(m) => dpos += m,
            Err(_) => break,
        }
        spos += n;
    }
    dpos
}

pub(crate) fn copy_fix_mb(cs: &CharsetInfo, dst: &mut [u8], src: &[u8], nchars: usize) -> (usize, CopyStatus) {
    let limit = src.len().min(dst.len());
    let (well_formed, wf) = cs.well_formed_char_length(&src[..limit], nchars);
    dst[..well_formed].copy_from_slice(&src[..well_formed]);
    let mut status = CopyStatus {
        source_end_pos: well_formed,
        well_formed_error_pos: wf.error_pos,
        cannot_convert_error_pos: None,
    };
    if wf.error_pos.is_none() {
        return (well_formed, status);
    }

    // Repair the badly formed tail.
    let mut spos = well_formed;
    let mut dpos = well_formed;
    let mut left = nchars - wf.nchars;
    while left > 0 && spos < src.len() {
        match cs.charlen(&src[spos..]) {
            Ok(n) => {
                if dpos + n > dst.len() {
                    break;
                }
                dst[dpos..dpos + n].copy_from_slice(&src[spos..spos + n]);
                spos += n;
                dpos += n;
            }
            Err(_) => {
                status.well_formed_error_pos.get_or_insert(spos);
                match cs.wc_mb(b'?' as WcT, &mut dst[dpos..]) {
                    Ok(n) => dpos += n,
                    Err(_) => break,
                }
                spos += cs.mbminlen.min(src.len() - spos);
            }
        }
        left -= 1;
    }
    status.source_end_pos = spos;
    (dpos, status)
}

/// Iterates over decoded characters. A malformed sequence yields its
/// error and iteration resumes `mbminlen` bytes later.
pub struct CharIter<'a> {
    cs: &'a CharsetInfo,
    s: &'a [u8],
    pos: usize,
}

impl<'a> CharIter<'a> {
    pub fn new(cs: &'a CharsetInfo, s: &'a [u8]) -> Self {
        CharIter { cs, s, pos: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for CharIter<'_> {
    type Item = Result<WcT, ConvError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.s.len() {
            return None;
        }
        match self.cs.mb_wc(&self.s[self.pos..]) {
            Ok((wc, n)) => {
                self.pos += n;
                Some(Ok(wc))
            }
            Err(e) => {
                self.pos += self.cs.mbminlen.min(self.s.len() - self.pos);
                Some(Err(e))
            }
        }
    }
}
