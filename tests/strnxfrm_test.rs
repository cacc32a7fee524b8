// strnxfrm_test.rs - Integration tests for sort key generation.

use ferrocoll::compiled::*;
use ferrocoll::collation::CollationInfo;
use ferrocoll::ctype::StrxfrmFlags;

fn key(cl: &CollationInfo, size: usize, nweights: usize, s: &[u8], flags: StrxfrmFlags) -> Vec<u8> {
    let mut buf = vec![0xEEu8; size];
    let n = cl.strnxfrm(&mut buf, nweights, s, flags);
    buf.truncate(n);
    buf
}

// === 8-bit ===

#[test]
fn latin1_keys_follow_the_sort_order() {
    let cl = &LATIN1_SWEDISH_CI;
    assert_eq!(key(cl, 8, 3, b"abc", StrxfrmFlags::empty()), b"ABC");
    assert_eq!(key(cl, 8, 5, b"abc", StrxfrmFlags::PAD_WITH_SPACE), b"ABC  ");
    assert_eq!(
        key(cl, 8, 5, b"abc", StrxfrmFlags::PAD_WITH_SPACE | StrxfrmFlags::PAD_TO_MAXLEN),
        b"ABC     "
    );
    assert_eq!(key(cl, 8, 3, b"\xE5\xE4\xF6", StrxfrmFlags::empty()), b"[\\]");
}

#[test]
fn latin1_bin_keys_are_the_bytes() {
    assert_eq!(key(&LATIN1_BIN, 8, 8, b"aBc", StrxfrmFlags::empty()), b"aBc");
}

#[test]
fn nweights_and_buffer_limit_the_key() {
    let cl = &LATIN1_SWEDISH_CI;
    assert_eq!(key(cl, 8, 3, b"abcdef", StrxfrmFlags::PAD_WITH_SPACE), b"ABC");
    assert_eq!(key(cl, 2, 6, b"abcdef", StrxfrmFlags::PAD_WITH_SPACE), b"AB");
}

#[test]
fn desc_and_reverse_flags() {
    let cl = &LATIN1_BIN;
    assert_eq!(key(cl, 4, 2, b"ab", StrxfrmFlags::DESC_LEVEL1), vec![!b'a', !b'b']);
    assert_eq!(key(cl, 4, 2, b"ab", StrxfrmFlags::REVERSE_LEVEL1), b"ba");
}

// === Unicode ===

#[test]
fn general_ci_uses_two_byte_weights() {
    let cl = &UTF8MB4_GENERAL_CI;
    assert_eq!(key(cl, 16, 2, b"aB", StrxfrmFlags::empty()), vec![0, b'A', 0, b'B']);
    assert_eq!(
        key(cl, 16, 3, b"aB", StrxfrmFlags::PAD_WITH_SPACE),
        vec![0, b'A', 0, b'B', 0, b' ']
    );
    assert_eq!(key(cl, 16, 1, "é".as_bytes(), StrxfrmFlags::empty()), vec![0, b'E']);
}

#[test]
fn bin_uses_three_byte_code_points() {
    let cl = &UTF8MB4_BIN;
    assert_eq!(key(cl, 16, 1, "é".as_bytes(), StrxfrmFlags::empty()), vec![0, 0, 0xE9]);
    assert_eq!(key(cl, 16, 1, "😀".as_bytes(), StrxfrmFlags::empty()), vec![0x01, 0xF6, 0x00]);
}

#[test]
fn nopad_pads_with_zero_weights() {
    let cl = &UTF8MB4_GENERAL_NOPAD_CI;
    assert_eq!(
        key(cl, 16, 3, b"a", StrxfrmFlags::PAD_WITH_SPACE),
        vec![0, b'A', 0, 0, 0, 0]
    );
}

#[test]
fn malformed_input_is_encoded_in_the_key() {
    let cl = &UTF8MB4_GENERAL_CI;
    assert_eq!(
        key(cl, 16, 8, b"a\xFFb", StrxfrmFlags::empty()),
        vec![0, b'A', 0xFF, 0xFF, 0xFF, 0xFF, 0, b'B']
    );
    assert!(key(cl, 16, 8, b"a\xFFb", StrxfrmFlags::empty()) < key(cl, 16, 8, b"a\xFFc", StrxfrmFlags::empty()));
    assert_eq!(cl.strnncoll(b"a\xFFb", b"a\xFFc", false), -1);
    assert_eq!(key(&UTF8MB4_BIN, 16, 8, b"\xC3", StrxfrmFlags::empty()), vec![0xFF, 0x00, 0xC3]);
}

#[test]
fn utf16_keys_match_utf8_keys() {
    let text = "Grüße";
    let utf16: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
    let a = key(&UTF8MB4_GENERAL_CI, 32, 8, text.as_bytes(), StrxfrmFlags::PAD_WITH_SPACE);
    let b = key(&UTF16_GENERAL_CI, 32, 8, &utf16, StrxfrmFlags::PAD_WITH_SPACE);
    assert_eq!(a, b);
}

// === UCA ===

#[test]
fn uca_keys_trim_trailing_spaces_only_when_padding() {
    let cl = &UTF8MB4_UNICODE_CI;
    let plain = key(cl, 64, 8, b"ab  ", StrxfrmFlags::empty());
    let trimmed = key(cl, 64, 8, b"ab", StrxfrmFlags::empty());
    assert_eq!(plain.len(), 8);
    assert_eq!(trimmed.len(), 4);
    let padded = key(cl, 64, 4, b"ab  ", StrxfrmFlags::PAD_WITH_SPACE);
    let padded_short = key(cl, 64, 4, b"ab", StrxfrmFlags::PAD_WITH_SPACE);
    assert_eq!(padded, padded_short);
}

#[test]
fn uca_level_selection() {
    let cl = &UTF8MB4_UCA1400_AS_CS;
    let all = key(cl, 64, 8, b"a", StrxfrmFlags::empty());
    let primary = key(cl, 64, 8, b"a", StrxfrmFlags::LEVEL1);
    let tertiary = key(cl, 64, 8, b"a", StrxfrmFlags::LEVEL3);
    assert_eq!(all.len(), 10);
    assert_eq!(primary, all[..2].to_vec());
    assert_eq!(tertiary, all[8..].to_vec());
}

#[test]
fn key_length_bounds_hold() {
    let samples: [&[u8]; 4] = [b"", b"abc", "straße".as_bytes(), "日本語😀".as_bytes()];
    for cl in ALL_COLLATIONS.iter() {
        if cl.charset.mbminlen > 1 {
            continue;
        }
        for s in samples {
            let bound = cl.strnxfrmlen(s.len());
            let mut buf = vec![0u8; bound + 16];
            let n = cl.strnxfrm(&mut buf, usize::MAX, s, StrxfrmFlags::empty());
            assert!(n <= bound, "{}: {} > {} for {:02X?}", cl.name, n, bound, s);
        }
    }
}
