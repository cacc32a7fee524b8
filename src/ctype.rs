// ctype.rs - Public types and constants
// Code point type, charset/collation state flags, strnxfrm flags,
// collation id ranges and classic integer return codes.

use bitflags::bitflags;

// === Type aliases ===
pub type WcT = u32;

// === Unicode limits ===
pub const MAX_UNICODE: WcT = 0x10FFFF;
pub const MAX_BMP: WcT = 0xFFFF;
pub const REPLACEMENT_CHARACTER: WcT = 0xFFFD;

/// Longest byte sequence of a single character in any supported charset.
pub const MB_MAXLEN: usize = 6;

// === Classic return codes ===
// Kept for interop with callers that store the integer form.
pub const CS_ILSEQ: i32 = 0;
pub const CS_ILUNI: i32 = 0;
pub const CS_TOOSMALL: i32 = -101;
pub const CS_TOOSMALL2: i32 = -102;
pub const CS_TOOSMALL3: i32 = -103;
pub const CS_TOOSMALL4: i32 = -104;
pub const CS_TOOSMALL5: i32 = -105;
pub const CS_TOOSMALL6: i32 = -106;

#[inline]
pub const fn cs_toosmalln(n: i32) -> i32 {
    CS_TOOSMALL + 1 - n
}

// === ctype bits for 8-bit tables ===
pub const CTYPE_U: u8 = 0o001; // upper
pub const CTYPE_L: u8 = 0o002; // lower
pub const CTYPE_NMR: u8 = 0o004; // digit
pub const CTYPE_SPC: u8 = 0o010; // space
pub const CTYPE_PNT: u8 = 0o020; // punctuation
pub const CTYPE_CTR: u8 = 0o040; // control
pub const CTYPE_B: u8 = 0o100; // blank
pub const CTYPE_X: u8 = 0o200; // hex digit

bitflags! {
    /// Charset and collation state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharsetState: u32 {
        const COMPILED = 1;
        const CONFIG = 2;
        const INDEX = 4;
        const LOADED = 8;
        const BINSORT = 16;
        const PRIMARY = 32;
        const STRNXFRM = 64;
        const UNICODE = 128;
        const READY = 256;
        const AVAILABLE = 512;
        const CSSORT = 1024;
        const HIDDEN = 2048;
        const PUREASCII = 4096;
        const NONASCII = 8192;
        const UNICODE_SUPPLEMENT = 16384;
        const LOWER_SORT = 32768;
        const STRNXFRM_BAD_NWEIGHTS = 0x10000;
        const NOPAD = 0x20000;
        const NON1TO1 = 0x40000;
    }
}

// === strnxfrm flags ===
pub const STRXFRM_NLEVELS: usize = 6;

bitflags! {
    /// Flags controlling `strnxfrm` output.
    ///
    /// `LEVELn` selects which levels are emitted (none set means all),
    /// `DESC_LEVELn` complements a level's bytes and `REVERSE_LEVELn`
    /// reverses them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StrxfrmFlags: u32 {
        const LEVEL1 = 0x0000_0001;
        const LEVEL2 = 0x0000_0002;
        const LEVEL3 = 0x0000_0004;
        const LEVEL4 = 0x0000_0008;
        const LEVEL5 = 0x0000_0010;
        const LEVEL6 = 0x0000_0020;
        const LEVEL_ALL = 0x0000_003F;

        const PAD_WITH_SPACE = 0x0000_0040;
        const PAD_TO_MAXLEN = 0x0000_0080;

        const DESC_LEVEL1 = 0x0000_0100;
        const DESC_LEVEL2 = 0x0000_0200;
        const DESC_LEVEL3 = 0x0000_0400;
        const DESC_LEVEL4 = 0x0000_0800;
        const DESC_LEVEL5 = 0x0000_1000;
        const DESC_LEVEL6 = 0x0000_2000;

        const REVERSE_LEVEL1 = 0x0001_0000;
        const REVERSE_LEVEL2 = 0x0002_0000;
        const REVERSE_LEVEL3 = 0x0004_0000;
        const REVERSE_LEVEL4 = 0x0008_0000;
        const REVERSE_LEVEL5 = 0x0010_0000;
        const REVERSE_LEVEL6 = 0x0020_0000;
    }
}

const STRXFRM_DESC_SHIFT: u32 = 8;
const STRXFRM_REVERSE_SHIFT: u32 = 16;

impl StrxfrmFlags {
    /// Is `level` (0-based) requested? An empty level mask selects all levels.
    #[inline]
    pub fn wants_level(self, level: usize) -> bool {
        let mask = self.bits() & Self::LEVEL_ALL.bits();
        mask == 0 || mask & (1 << level) != 0
    }

    #[inline]
    pub fn is_desc(self, level: usize) -> bool {
        self.bits() & (1 << (level as u32 + STRXFRM_DESC_SHIFT)) != 0
    }

    #[inline]
    pub fn is_reverse(self, level: usize) -> bool {
        self.bits() & (1 << (level as u32 + STRXFRM_REVERSE_SHIFT)) != 0
    }
}

// === Repertoire ===
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Repertoire: u32 {
        /// Pure ASCII, U+0000..U+007F.
        const ASCII = 1;
        /// Extended characters, U+0080..U+FFFF.
        const EXTENDED = 2;
        /// ASCII and extended characters.
        const UNICODE30 = 3;
    }
}

// === Collation id ranges ===
pub const COLLATION_ID_MAX_CLASSIC: u32 = 255;

pub const PAGE2_COLLATION_ID_8BIT: u32 = 0x200;
pub const PAGE2_COLLATION_ID_RESERVED: u32 = 0x220;
pub const PAGE2_COLLATION_ID_UTF8MB3: u32 = 0x240;
pub const PAGE2_COLLATION_ID_UTF8MB4: u32 = 0x260;
pub const PAGE2_COLLATION_ID_UCS2: u32 = 0x280;
pub const PAGE2_COLLATION_ID_UTF16: u32 = 0x2A0;
pub const PAGE2_COLLATION_ID_UTF16LE: u32 = 0x2C0;
pub const PAGE2_COLLATION_ID_UTF32: u32 = 0x2E0;
pub const PAGE2_COLLATION_ID_SIZE: u32 = 32;

pub const NOPAD_ID_OFFSET: u32 = 1024;

/// Id of the NOPAD variant of a classic collation.
#[inline]
pub const fn nopad_id(id: u32) -> u32 {
    NOPAD_ID_OFFSET + id
}

pub const UCA1400_COLLATION_ID_BASE: u32 = 2048;
pub const UCA1400_CHARSET_UTF8MB3: u32 = 0;
pub const UCA1400_CHARSET_UTF8MB4: u32 = 1;
pub const UCA1400_CHARSET_UCS2: u32 = 2;
pub const UCA1400_CHARSET_UTF16: u32 = 3;
pub const UCA1400_CHARSET_UTF32: u32 = 4;

/// Builds a UCA 14.0.0 collation id from its charset code, tailoring
/// number and sensitivity bits.
#[inline]
pub const fn uca1400_id(charset: u32, tailoring: u32, accent_sensitive: bool, case_sensitive: bool, nopad: bool) -> u32 {
    UCA1400_COLLATION_ID_BASE
        + (charset << 8)
        + (tailoring << 3)
        + ((nopad as u32) << 2)
        + ((accent_sensitive as u32) << 1)
        + (case_sensitive as u32)
}

// === LIKE / wildcmp ===
pub const WILD_MATCH: i32 = 0;
pub const WILD_NOMATCH: i32 = 1;
pub const WILD_ABORT: i32 = -1;

pub const DEFAULT_WILD_ESCAPE: WcT = b'\\' as WcT;
pub const DEFAULT_WILD_ONE: WcT = b'_' as WcT;
pub const DEFAULT_WILD_MANY: WcT = b'%' as WcT;

/// Nesting limit for `%` backtracking in `wildcmp`.
pub const WILDCMP_MAX_DEPTH: usize = 256;

/// Wildcard characters of a LIKE pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikePattern {
    pub escape: WcT,
    pub w_one: WcT,
    pub w_many: WcT,
}

impl Default for LikePattern {
    fn default() -> Self {
        LikePattern {
            escape: DEFAULT_WILD_ESCAPE,
            w_one: DEFAULT_WILD_ONE,
            w_many: DEFAULT_WILD_MANY,
        }
    }
}

/// Lengths of the bounds produced by `like_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeRange {
    pub min_length: usize,
    pub max_length: usize,
}

// === instr ===
/// One match range reported by `instr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchPos {
    pub beg: usize,
    pub end: usize,
    pub mb_len: usize,
}

// === Hashing ===
pub const HASH_NR1_INIT: u64 = 1;
pub const HASH_NR2_INIT: u64 = 4;

/// Folds one byte-sized value into the running hash pair.
#[inline(always)]
pub fn hash_add(nr1: &mut u64, nr2: &mut u64, value: u32) {
    *nr1 ^= ((*nr1 & 63).wrapping_add(*nr2))
        .wrapping_mul(value as u64)
        .wrapping_add(*nr1 << 8);
    *nr2 = nr2.wrapping_add(3);
}

/// Folds a 16-bit value, low byte first.
#[inline(always)]
pub fn hash_add_16(nr1: &mut u64, nr2: &mut u64, value: u32) {
    hash_add(nr1, nr2, value & 0xFF);
    hash_add(nr1, nr2, (value >> 8) & 0xFF);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toosmall_codes() {
        assert_eq!(cs_toosmalln(2), CS_TOOSMALL2);
        assert_eq!(cs_toosmalln(4), CS_TOOSMALL4);
        assert_eq!(cs_toosmalln(6), CS_TOOSMALL6);
    }

    #[test]
    fn strxfrm_level_selection() {
        let none = StrxfrmFlags::empty();
        assert!(none.wants_level(0));
        assert!(none.wants_level(2));
        let l2 = StrxfrmFlags::LEVEL2 | StrxfrmFlags::PAD_WITH_SPACE;
        assert!(!l2.wants_level(0));
        assert!(l2.wants_level(1));
    }

    #[test]
    fn strxfrm_desc_and_reverse_bits() {
        let f = StrxfrmFlags::DESC_LEVEL3 | StrxfrmFlags::REVERSE_LEVEL1;
        assert!(f.is_desc(2));
        assert!(!f.is_desc(0));
        assert!(f.is_reverse(0));
        assert!(!f.is_reverse(2));
    }

    #[test]
    fn uca1400_ids() {
        assert_eq!(uca1400_id(UCA1400_CHARSET_UTF8MB4, 0, false, false, false), 2304);
        assert_eq!(uca1400_id(UCA1400_CHARSET_UTF8MB4, 0, true, false, false), 2306);
        assert_eq!(uca1400_id(UCA1400_CHARSET_UTF8MB4, 0, true, true, false), 2307);
        assert_eq!(uca1400_id(UCA1400_CHARSET_UTF8MB4, 0, false, false, true), 2308);
    }

    #[test]
    fn hash_add_is_deterministic() {
        let (mut a1, mut a2) = (HASH_NR1_INIT, HASH_NR2_INIT);
        let (mut b1, mut b2) = (HASH_NR1_INIT, HASH_NR2_INIT);
        hash_add_16(&mut a1, &mut a2, 0x1234);
        hash_add(&mut b1, &mut b2, 0x34);
        hash_add(&mut b1, &mut b2, 0x12);
        assert_eq!((a1, a2), (b1, b2));
        assert_eq!(a2, HASH_NR2_INIT + 6);
    }
}
