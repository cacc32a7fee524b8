// api.rs - Owned-buffer API for ferrocoll.
//
// Wraps the caller-buffer operations of `CollationInfo` and the charset
// codecs with Rust-native types: `Collation`, `LikeBounds`, `Ordering`
// results and `Vec<u8>` / `String` outputs.

use std::cmp::Ordering;
use std::ops::Range;

use log::warn;

use crate::charset::CharsetInfo;
use crate::charsets::CHARSET_UTF8MB4;
use crate::collation::CollationInfo;
use crate::convert::convert;
use crate::ctype::{LikePattern, MatchPos, StrxfrmFlags, WILD_MATCH};
use crate::error::CollationError;
use crate::registry::Registry;

fn ordering(r: i32) -> Ordering {
    r.cmp(&0)
}

/// A collation handle with owned-result helpers.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use ferrocoll::api::Collation;
/// use ferrocoll::compiled::UTF8MB4_GENERAL_CI;
///
/// let coll = Collation::new(&UTF8MB4_GENERAL_CI);
/// assert_eq!(coll.compare("Straße".as_bytes(), "STRASSE".as_bytes()), Ordering::Less);
/// assert_eq!(coll.compare(b"abc", b"ABC  "), Ordering::Equal);
/// assert!(coll.is_like(b"Hello World", b"hello%"));
/// ```
#[derive(Clone, Copy)]
pub struct Collation<'r> {
    info: &'r CollationInfo,
}

impl<'r> Collation<'r> {
    pub fn new(info: &'r CollationInfo) -> Self {
        Collation { info }
    }

    /// The underlying descriptor, for the caller-buffer operations.
    pub fn info(&self) -> &'r CollationInfo {
        self.info
    }

    pub fn name(&self) -> &'r str {
        &self.info.name
    }

    pub fn id(&self) -> u32 {
        self.info.number
    }

    pub fn charset(&self) -> &'static CharsetInfo {
        self.info.charset
    }

    // === Comparison ===

    /// Compares with PAD SPACE semantics (trailing spaces are
    /// insignificant unless the collation is NOPAD).
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        ordering(self.info.strnncollsp(a, b))
    }

    /// Compares every character, trailing spaces included.
    pub fn compare_nopad(&self, a: &[u8], b: &[u8]) -> Ordering {
        ordering(self.info.strnncoll(a, b, false))
    }

    /// Compares the first `nchars` characters of each side.
    pub fn compare_chars(&self, a: &[u8], b: &[u8], nchars: usize) -> Ordering {
        ordering(self.info.strnncollsp_nchars(a, b, nchars))
    }

    pub fn equals(&self, a: &[u8], b: &[u8]) -> bool {
        self.info.strnncollsp(a, b) == 0
    }

    // === Sort keys and hashing ===

    /// Sort key whose byte order matches [`Collation::compare_nopad`].
    pub fn sort_key(&self, s: &[u8]) -> Vec<u8> {
        let mut key = vec![0u8; self.info.strnxfrmlen(s.len())];
        let len = self.info.strnxfrm(&mut key, usize::MAX, s, StrxfrmFlags::empty());
        key.truncate(len);
        key
    }

    /// Fixed-width sort key for strings of up to `nchars` characters.
    /// Byte order matches [`Collation::compare`] for such strings.
    pub fn padded_sort_key(&self, s: &[u8], nchars: usize) -> Vec<u8> {
        let max_len = nchars * self.info.charset.mbmaxlen;
        let mut key = vec![0u8; self.info.strnxfrmlen(max_len)];
        let flags = StrxfrmFlags::PAD_WITH_SPACE | StrxfrmFlags::PAD_TO_MAXLEN;
        let len = self.info.strnxfrm(&mut key, nchars, s, flags);
        key.truncate(len);
        key
    }

    /// Hash that agrees with [`Collation::equals`].
    pub fn hash(&self, s: &[u8]) -> u64 {
        self.info.hash(s)
    }

    // === LIKE ===

    /// LIKE match with the default `\`, `_` and `%`.
    pub fn is_like(&self, s: &[u8], pattern: &[u8]) -> bool {
        self.info.wildcmp(s, pattern, &LikePattern::default()) == WILD_MATCH
    }

    /// Index range bounds for a LIKE pattern, each at most `res_length`
    /// bytes. `None` for malformed patterns.
    pub fn like_bounds(&self, pattern: &[u8], res_length: usize) -> Option<LikeBounds> {
        let mut min = vec![0u8; res_length];
        let mut max = vec![0u8; res_length];
        let range = self.info.like_range(pattern, &LikePattern::default(), &mut min, &mut max)?;
        min.truncate(range.min_length);
        max.truncate(range.max_length);
        Some(LikeBounds { min, max })
    }

    // === Search ===

    /// Byte range of the first occurrence of `needle` in `haystack`.
    pub fn find(&self, haystack: &[u8], needle: &[u8]) -> Option<Range<usize>> {
        let mut m = [MatchPos::default(); 2];
        match self.info.instr(haystack, needle, &mut m) {
            0 => None,
            1 => Some(0..0),
            _ => Some(m[1].beg..m[1].end),
        }
    }

    // === Text ===

    /// Encodes `text` in the collation's charset; see [`encode_str`].
    pub fn encode(&self, text: &str) -> Vec<u8> {
        encode_str(self.info.charset, text)
    }

    /// Decodes `bytes` from the collation's charset; see [`decode_to_string`].
    pub fn decode(&self, bytes: &[u8]) -> String {
        decode_to_string(self.info.charset, bytes)
    }
}

impl std::fmt::Debug for Collation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collation").field("name", &self.name()).field("id", &self.id()).finish()
    }
}

/// Bounds from [`Collation::like_bounds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeBounds {
    pub min: Vec<u8>,
    pub max: Vec<u8>,
}

impl Registry {
    /// Looks up `name` and wraps it in a [`Collation`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use ferrocoll::prelude::*;
    ///
    /// let registry = Registry::init(RegistryConfig::new()).unwrap();
    /// let czech = registry.collation("utf8mb4_czech_ci").unwrap();
    /// assert_eq!(czech.compare(b"chata", b"hrad"), Ordering::Greater);
    /// ```
    pub fn collation(&self, name: &str) -> Result<Collation<'_>, CollationError> {
        self.get_by_name(name).map(Collation::new)
    }
}

// === Conversion ===

/// Converts `src` from `from` to `to`, replacing what cannot be converted
/// with '?'.
pub fn convert_vec(to: &CharsetInfo, from: &CharsetInfo, src: &[u8]) -> Vec<u8> {
    let chars = src.len() / from.mbminlen.max(1) + 1;
    let mut dst = vec![0u8; chars * to.mbmaxlen];
    let (len, errors) = convert(to, &mut dst, from, src);
    if errors > 0 {
        warn!("{} character(s) substituted converting {} to {}", errors, from.name, to.name);
    }
    dst.truncate(len);
    dst
}

/// Encodes a Rust string in `cs`.
///
/// ```
/// use ferrocoll::api::encode_str;
/// use ferrocoll::charsets::CHARSET_UCS2;
///
/// assert_eq!(encode_str(&CHARSET_UCS2, "é"), vec![0x00, 0xE9]);
/// ```
pub fn encode_str(cs: &CharsetInfo, text: &str) -> Vec<u8> {
    convert_vec(cs, &CHARSET_UTF8MB4, text.as_bytes())
}

/// Decodes `bytes` in `cs` into a Rust string.
pub fn decode_to_string(cs: &CharsetInfo, bytes: &[u8]) -> String {
    let utf8 = convert_vec(&CHARSET_UTF8MB4, cs, bytes);
    match String::from_utf8(utf8) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Upper-cases `s` in `cs`.
pub fn to_upper(cs: &CharsetInfo, s: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; s.len() * cs.caseup_multiply.max(1)];
    let len = cs.caseup(s, &mut dst);
    dst.truncate(len);
    dst
}

/// Lower-cases `s` in `cs`.
pub fn to_lower(cs: &CharsetInfo, s: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; s.len() * cs.casedn_multiply.max(1)];
    let len = cs.casedn(s, &mut dst);
    dst.truncate(len);
    dst
}
