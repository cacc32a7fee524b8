// collation/mod.rs - Collation descriptors and the handler trait
//
// A `CollationInfo` pairs a charset with the tables and handler that define
// an ordering. Handlers come in two families: the byte/code point ones in
// `strcoll` and the UCA one in `uca`.
//
// | Module       | Purpose                                         |
// |--------------|-------------------------------------------------|
// | [`strcoll`]  | 8-bit, `general_ci` and `_bin` handlers         |
// | [`uca`]      | UCA handlers, one and several levels            |
// | [`strnxfrm`] | Sort key padding, DESC and REVERSE passes       |
// | [`like`]     | LIKE range bounds for index scans               |
// | [`wild`]     | LIKE pattern matching                           |
// | [`instr`]    | Substring search                                |

pub mod instr;
pub mod like;
pub mod strcoll;
pub mod strnxfrm;
pub mod uca;
pub mod wild;

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::{Lazy, OnceCell};

use crate::charset::CharsetInfo;
use crate::ctype::{CharsetState, LikePattern, LikeRange, MatchPos, StrxfrmFlags, WcT, HASH_NR1_INIT, HASH_NR2_INIT};
use crate::error::CollationError;
use crate::uca::UcaInfo;

// === Handler trait ===

/// Operations of one collation family. Every method receives the
/// descriptor it was reached through.
pub trait CollationHandler: Send + Sync {
    /// Builds lazily constructed tables. Called once per collation before
    /// first use; later calls are cheap.
    fn init(&self, _cl: &CollationInfo) -> Result<(), CollationError> {
        Ok(())
    }

    /// Compares `a` and `b`. With `b_is_prefix`, `a` matching all of `b`
    /// compares equal.
    fn strnncoll(&self, cl: &CollationInfo, a: &[u8], b: &[u8], b_is_prefix: bool) -> i32;

    /// Compares with PAD SPACE semantics; NOPAD collations compare like
    /// `strnncoll`.
    fn strnncollsp(&self, cl: &CollationInfo, a: &[u8], b: &[u8]) -> i32;

    /// Compares the first `nchars` characters, both sides padded with
    /// spaces up to `nchars`.
    fn strnncollsp_nchars(&self, cl: &CollationInfo, a: &[u8], b: &[u8], nchars: usize) -> i32;

    /// Writes a sort key for `src` into `dst` and returns its length.
    fn strnxfrm(&self, cl: &CollationInfo, dst: &mut [u8], nweights: usize, src: &[u8], flags: StrxfrmFlags) -> usize;

    /// Upper bound of the sort key length for `len` source bytes.
    fn strnxfrmlen(&self, cl: &CollationInfo, len: usize) -> usize {
        len * cl.strxfrm_multiply
    }

    /// Fills `min` and `max` with the bounds of strings matching the
    /// LIKE `pattern`. `None` when the pattern is malformed.
    fn like_range(
        &self,
        cl: &CollationInfo,
        pattern: &[u8],
        like: &LikePattern,
        min: &mut [u8],
        max: &mut [u8],
    ) -> Option<LikeRange> {
        like::like_range_auto(cl, pattern, like, min, max)
    }

    /// LIKE match: 0 on match, 1 on mismatch, -1 when no further match is
    /// possible.
    fn wildcmp(&self, cl: &CollationInfo, s: &[u8], wild: &[u8], like: &LikePattern) -> i32;

    /// Case-insensitive comparison without padding.
    fn strcasecmp(&self, cl: &CollationInfo, a: &[u8], b: &[u8]) -> i32 {
        strcoll::strcasecmp_unicase(cl, a, b)
    }

    /// Finds `s` in `b`. Returns the number of ranges filled: 0 when not
    /// found, 1 for an empty `s`, 2 otherwise.
    fn instr(&self, cl: &CollationInfo, b: &[u8], s: &[u8], matches: &mut [MatchPos]) -> usize {
        instr::instr_generic(cl, b, s, matches)
    }

    /// Folds `key` into the hash pair, so that equal strings hash alike.
    fn hash_sort(&self, cl: &CollationInfo, key: &[u8], nr1: &mut u64, nr2: &mut u64);

    /// Can equality on this collation be propagated through constants?
    fn propagate(&self, _cl: &CollationInfo) -> bool {
        true
    }

    /// Smallest string of up to `nchars` characters.
    fn min_str(&self, cl: &CollationInfo, dst: &mut [u8], nchars: usize) -> usize {
        if cl.is_nopad() {
            return 0;
        }
        fill_chars(cl, dst, nchars, cl.min_sort_char)
    }

    /// Largest string of up to `nchars` characters.
    fn max_str(&self, cl: &CollationInfo, dst: &mut [u8], nchars: usize) -> usize {
        fill_chars(cl, dst, nchars, cl.max_sort_char)
    }
}

/// Writes up to `nchars` copies of `wc`. For 8-bit charsets `wc` is a
/// byte value.
pub(crate) fn fill_chars(cl: &CollationInfo, dst: &mut [u8], nchars: usize, wc: WcT) -> usize {
    let cs = cl.charset;
    if cs.is_8bit() {
        let n = nchars.min(dst.len());
        dst[..n].fill(wc as u8);
        return n;
    }
    let mut buf = [0u8; crate::ctype::MB_MAXLEN];
    let Ok(len) = cs.wc_mb(wc, &mut buf) else { return 0 };
    let n = nchars.min(dst.len() / len.max(1));
    for chunk in dst[..n * len].chunks_exact_mut(len) {
        chunk.copy_from_slice(&buf[..len]);
    }
    n * len
}

// === Descriptor ===

pub struct CollationInfo {
    pub number: u32,
    /// Id of the PAD SPACE `_ci` collation of the same family.
    pub primary_number: u32,
    /// Id of the `_bin` collation of the same charset.
    pub binary_number: u32,
    pub state: CharsetState,
    pub name: Cow<'static, str>,
    pub comment: &'static str,
    pub charset: &'static CharsetInfo,
    pub sort_order: Option<&'static [u8; 256]>,
    /// Base UCA table, also the base of `tailoring`.
    pub uca: Option<&'static Lazy<UcaInfo>>,
    /// Rule script applied on top of `uca`.
    pub tailoring: Option<Cow<'static, str>>,
    pub strxfrm_multiply: usize,
    pub min_sort_char: WcT,
    pub max_sort_char: WcT,
    pub levels_for_order: usize,
    pub handler: &'static dyn CollationHandler,
    /// Outcome of the one-time tailoring build.
    pub(crate) tailored: OnceCell<Result<UcaInfo, CollationError>>,
}

impl fmt::Debug for CollationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollationInfo")
            .field("number", &self.number)
            .field("name", &self.name)
            .field("charset", &self.charset.name)
            .field("state", &self.state)
            .field("levels_for_order", &self.levels_for_order)
            .field("tailored", &self.tailoring.is_some())
            .finish()
    }
}

impl CollationInfo {
    #[inline]
    pub fn is_nopad(&self) -> bool {
        self.state.contains(CharsetState::NOPAD)
    }

    #[inline]
    pub fn is_binary(&self) -> bool {
        self.state.contains(CharsetState::BINSORT)
    }

    #[inline]
    pub fn is_primary(&self) -> bool {
        self.state.contains(CharsetState::PRIMARY)
    }

    /// Builds lazily constructed tables, reporting tailoring errors.
    pub fn init(&self) -> Result<(), CollationError> {
        self.handler.init(self)
    }

    /// Is the tailored table of this collation built?
    pub fn is_ready(&self) -> bool {
        self.tailoring.is_none() || self.tailored.get().is_some_and(|r| r.is_ok())
    }

    /// Weight tables of a UCA collation. A tailored table is built once, on
    /// first access; a collation whose rules failed to build uses the base
    /// table.
    pub fn uca(&self) -> Option<&UcaInfo> {
        if self.tailoring.is_some() && (self.tailored.get().is_some() || self.init().is_ok()) {
            if let Some(Ok(t)) = self.tailored.get() {
                return Some(t);
            }
        }
        self.uca.map(|l| &**l)
    }

    // === Operations ===

    #[inline]
    pub fn strnncoll(&self, a: &[u8], b: &[u8], b_is_prefix: bool) -> i32 {
        self.handler.strnncoll(self, a, b, b_is_prefix)
    }

    #[inline]
    pub fn strnncollsp(&self, a: &[u8], b: &[u8]) -> i32 {
        self.handler.strnncollsp(self, a, b)
    }

    #[inline]
    pub fn strnncollsp_nchars(&self, a: &[u8], b: &[u8], nchars: usize) -> i32 {
        self.handler.strnncollsp_nchars(self, a, b, nchars)
    }

    #[inline]
    pub fn strnxfrm(&self, dst: &mut [u8], nweights: usize, src: &[u8], flags: StrxfrmFlags) -> usize {
        self.handler.strnxfrm(self, dst, nweights, src, flags)
    }

    #[inline]
    pub fn strnxfrmlen(&self, len: usize) -> usize {
        self.handler.strnxfrmlen(self, len)
    }

    pub fn like_range(&self, pattern: &[u8], like: &LikePattern, min: &mut [u8], max: &mut [u8]) -> Option<LikeRange> {
        self.handler.like_range(self, pattern, like, min, max)
    }

    #[inline]
    pub fn wildcmp(&self, s: &[u8], wild: &[u8], like: &LikePattern) -> i32 {
        self.handler.wildcmp(self, s, wild, like)
    }

    #[inline]
    pub fn strcasecmp(&self, a: &[u8], b: &[u8]) -> i32 {
        self.handler.strcasecmp(self, a, b)
    }

    #[inline]
    pub fn instr(&self, b: &[u8], s: &[u8], matches: &mut [MatchPos]) -> usize {
        self.handler.instr(self, b, s, matches)
    }

    #[inline]
    pub fn hash_sort(&self, key: &[u8], nr1: &mut u64, nr2: &mut u64) {
        self.handler.hash_sort(self, key, nr1, nr2)
    }

    /// Hash of `key` from the standard seed.
    pub fn hash(&self, key: &[u8]) -> u64 {
        let (mut nr1, mut nr2) = (HASH_NR1_INIT, HASH_NR2_INIT);
        self.hash_sort(key, &mut nr1, &mut nr2);
        nr1
    }

    #[inline]
    pub fn propagate(&self) -> bool {
        self.handler.propagate(self)
    }

    #[inline]
    pub fn min_str(&self, dst: &mut [u8], nchars: usize) -> usize {
        self.handler.min_str(self, dst, nchars)
    }

    #[inline]
    pub fn max_str(&self, dst: &mut [u8], nchars: usize) -> usize {
        self.handler.max_str(self, dst, nchars)
    }
}

/// Sign of a weight difference, as returned by comparisons.
#[inline]
pub(crate) fn sign(d: i64) -> i32 {
    match d {
        d if d < 0 => -1,
        0 => 0,
        _ => 1,
    }
}
