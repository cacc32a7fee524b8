// numeric.rs - Number parsing over encoded strings
// `strnto*` decode characters with the charset codec, so the same
// routines serve single-byte and wide encodings alike.

use smallvec::SmallVec;

use crate::charset::CharsetInfo;
use crate::ctype::WcT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumError {
    /// No digits were found; the value is zero.
    NoDigits,
    /// The value does not fit; it is saturated.
    Overflow,
}

/// A parsed number, the byte offset where parsing stopped and the error
/// flag, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumResult<T> {
    pub value: T,
    pub end: usize,
    pub error: Option<NumError>,
}

impl<T> NumResult<T> {
    fn ok(value: T, end: usize) -> Self {
        NumResult { value, end, error: None }
    }

    fn err(value: T, end: usize, error: NumError) -> Self {
        NumResult { value, end, error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// === Cursor ===

struct Cursor<'a> {
    cs: &'a CharsetInfo,
    s: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(cs: &'a CharsetInfo, s: &'a [u8]) -> Self {
        Cursor { cs, s, pos: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<(WcT, usize)> {
        if self.pos >= self.s.len() {
            return None;
        }
        self.cs.mb_wc(&self.s[self.pos..]).ok()
    }

    #[inline]
    fn eat(&mut self, wc: WcT) -> bool {
        match self.peek() {
            Some((c, len)) if c == wc => {
                self.pos += len;
                true
            }
            _ => false,
        }
    }

    fn skip_spaces(&mut self) {
        while let Some((c, len)) = self.peek() {
            if !matches!(c, 0x20 | 0x09..=0x0D) {
                break;
            }
            self.pos += len;
        }
    }

    /// Consumes a sign; true for minus.
    fn sign(&mut self) -> bool {
        if self.eat('-' as WcT) {
            return true;
        }
        self.eat('+' as WcT);
        false
    }

    fn digit(&self, base: u32) -> Option<(u32, usize)> {
        let (c, len) = self.peek()?;
        let d = char::from_u32(c)?.to_digit(base)?;
        Some((d, len))
    }
}

// === Integers ===

/// Magnitude of a signed or unsigned integer. Returns the magnitude, the
/// sign, the end offset and whether any digit was read; `None` magnitude
/// means it overflowed `limit`.
fn parse_magnitude(cs: &CharsetInfo, s: &[u8], base: u32, limit: u64) -> (Option<u64>, bool, usize, bool) {
    let mut cur = Cursor::new(cs, s);
    cur.skip_spaces();
    let negative = cur.sign();
    if !(2..=36).contains(&base) {
        return (Some(0), negative, 0, false);
    }
    let mut value: Option<u64> = Some(0);
    let mut any = false;
    while let Some((d, len)) = cur.digit(base) {
        cur.pos += len;
        any = true;
        value = value
            .and_then(|v| v.checked_mul(base as u64))
            .and_then(|v| v.checked_add(d as u64))
            .filter(|&v| v <= limit);
    }
    (value, negative, if any { cur.pos } else { 0 }, any)
}

fn strnto_signed(cs: &CharsetInfo, s: &[u8], base: u32, min: i64, max: i64) -> NumResult<i64> {
    let limit = min.unsigned_abs();
    let (magnitude, negative, end, any) = parse_magnitude(cs, s, base, limit);
    if !any {
        return NumResult::err(0, 0, NumError::NoDigits);
    }
    match magnitude {
        Some(m) if negative => NumResult::ok((m as i128).wrapping_neg() as i64, end),
        Some(m) if m <= max as u64 => NumResult::ok(m as i64, end),
        _ => NumResult::err(if negative { min } else { max }, end, NumError::Overflow),
    }
}

fn strnto_unsigned(cs: &CharsetInfo, s: &[u8], base: u32, max: u64) -> NumResult<u64> {
    let (magnitude, negative, end, any) = parse_magnitude(cs, s, base, max);
    if !any {
        return NumResult::err(0, 0, NumError::NoDigits);
    }
    match magnitude {
        // A leading minus negates modulo the type width.
        Some(m) if negative => NumResult::ok(m.wrapping_neg() & max, end),
        Some(m) => NumResult::ok(m, end),
        None => NumResult::err(max, end, NumError::Overflow),
    }
}

pub fn strntol(cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<i32> {
    let r = strnto_signed(cs, s, base, i32::MIN as i64, i32::MAX as i64);
    NumResult { value: r.value as i32, end: r.end, error: r.error }
}

pub fn strntoul(cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<u32> {
    let r = strnto_unsigned(cs, s, base, u32::MAX as u64);
    NumResult { value: r.value as u32, end: r.end, error: r.error }
}

pub fn strntoll(cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<i64> {
    strnto_signed(cs, s, base, i64::MIN, i64::MAX)
}

pub fn strntoull(cs: &CharsetInfo, s: &[u8], base: u32) -> NumResult<u64> {
    strnto_unsigned(cs, s, base, u64::MAX)
}

// === Floating point ===

/// Decimal floating point: optional sign, digits with an optional point
/// and an optional exponent. Out of range values saturate to `f64::MAX`.
pub fn strntod(cs: &CharsetInfo, s: &[u8]) -> NumResult<f64> {
    let mut cur = Cursor::new(cs, s);
    let mut text: SmallVec<[u8; 64]> = SmallVec::new();
    cur.skip_spaces();
    if cur.sign() {
        text.push(b'-');
    }

    let mut digits = 0;
    let take_digits = |cur: &mut Cursor<'_>, text: &mut SmallVec<[u8; 64]>| {
        let mut n = 0;
        while let Some((d, len)) = cur.digit(10) {
            cur.pos += len;
            text.push(b'0' + d as u8);
            n += 1;
        }
        n
    };
    digits += take_digits(&mut cur, &mut text);
    if cur.eat('.' as WcT) {
        text.push(b'.');
        digits += take_digits(&mut cur, &mut text);
    }
    if digits == 0 {
        return NumResult::err(0.0, 0, NumError::NoDigits);
    }
    let mantissa_end = cur.pos;

    // An exponent counts only when digits follow it.
    let mut end = mantissa_end;
    if cur.eat('e' as WcT) || cur.eat('E' as WcT) {
        let mark = text.len();
        text.push(b'e');
        if cur.sign() {
            text.push(b'-');
        }
        if take_digits(&mut cur, &mut text) > 0 {
            end = cur.pos;
        } else {
            text.truncate(mark);
        }
    }

    let value = std::str::from_utf8(&text).ok().and_then(|t| t.parse::<f64>().ok()).unwrap_or(0.0);
    if value.is_infinite() {
        let saturated = if value < 0.0 { -f64::MAX } else { f64::MAX };
        return NumResult::err(saturated, end, NumError::Overflow);
    }
    NumResult::ok(value, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charsets::{CHARSET_LATIN1, CHARSET_UCS2, CHARSET_UTF32};

    fn ucs2(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
    }

    #[test]
    fn signed_integers() {
        let r = strntol(&CHARSET_LATIN1, b"  -42abc", 10);
        assert_eq!(r, NumResult { value: -42, end: 5, error: None });
        assert_eq!(strntol(&CHARSET_LATIN1, b"+7", 10).value, 7);
        assert_eq!(strntol(&CHARSET_LATIN1, b"ff", 16).value, 255);
        assert_eq!(strntol(&CHARSET_LATIN1, b"-2147483648", 10).value, i32::MIN);
        assert!(strntol(&CHARSET_LATIN1, b"-2147483648", 10).is_ok());
    }

    #[test]
    fn overflow_saturates() {
        let r = strntol(&CHARSET_LATIN1, b"2147483648", 10);
        assert_eq!(r.value, i32::MAX);
        assert_eq!(r.error, Some(NumError::Overflow));
        let r = strntoll(&CHARSET_LATIN1, b"-99999999999999999999", 10);
        assert_eq!(r.value, i64::MIN);
        assert_eq!(r.error, Some(NumError::Overflow));
        let r = strntoull(&CHARSET_LATIN1, b"18446744073709551616", 10);
        assert_eq!(r.value, u64::MAX);
        assert_eq!(r.end, 20);
    }

    #[test]
    fn unsigned_negation_wraps() {
        assert_eq!(strntoul(&CHARSET_LATIN1, b"-1", 10).value, u32::MAX);
        assert_eq!(strntoull(&CHARSET_LATIN1, b"-1", 10).value, u64::MAX);
    }

    #[test]
    fn no_digits() {
        let r = strntol(&CHARSET_LATIN1, b"  x", 10);
        assert_eq!(r, NumResult { value: 0, end: 0, error: Some(NumError::NoDigits) });
        assert_eq!(strntol(&CHARSET_LATIN1, b"12", 1).error, Some(NumError::NoDigits));
    }

    #[test]
    fn wide_encodings() {
        let s = ucs2(" 123z");
        let r = strntol(&CHARSET_UCS2, &s, 10);
        assert_eq!(r.value, 123);
        assert_eq!(r.end, 8);
        let s: Vec<u8> = "-17".chars().flat_map(|c| (c as u32).to_be_bytes()).collect();
        assert_eq!(strntoll(&CHARSET_UTF32, &s, 10).value, -17);
    }

    #[test]
    fn floats() {
        let r = strntod(&CHARSET_LATIN1, b" 3.25e2x");
        assert_eq!(r.value, 325.0);
        assert_eq!(r.end, 7);
        let r = strntod(&CHARSET_LATIN1, b"-.5e");
        assert_eq!(r.value, -0.5);
        assert_eq!(r.end, 3);
        assert_eq!(strntod(&CHARSET_LATIN1, b"abc").error, Some(NumError::NoDigits));
        let r = strntod(&CHARSET_LATIN1, b"1e999");
        assert_eq!(r.value, f64::MAX);
        assert_eq!(r.error, Some(NumError::Overflow));
        let s = ucs2("2.5");
        assert_eq!(strntod(&CHARSET_UCS2, &s).value, 2.5);
    }
}
