// like_test.rs - Integration tests for LIKE matching and range bounds.

use ferrocoll::api::{encode_str, Collation};
use ferrocoll::compiled::*;
use ferrocoll::ctype::{LikePattern, WILD_ABORT, WILD_MATCH, WILD_NOMATCH};

// === wildcmp ===

#[test]
fn wildcards_and_escapes() {
    let cl = &LATIN1_SWEDISH_CI;
    let like = LikePattern::default();
    assert_eq!(cl.wildcmp(b"Hello", b"h%", &like), WILD_MATCH);
    assert_eq!(cl.wildcmp(b"Hello", b"h_llo", &like), WILD_MATCH);
    assert_eq!(cl.wildcmp(b"Hello", b"%l_", &like), WILD_MATCH);
    assert_eq!(cl.wildcmp(b"Hello", b"%x%", &like), WILD_ABORT);
    assert_eq!(cl.wildcmp(b"Hello", b"Help", &like), WILD_NOMATCH);
    assert_eq!(cl.wildcmp(b"50%", b"50\\%", &like), WILD_MATCH);
    assert_eq!(cl.wildcmp(b"500", b"50\\%", &like), WILD_NOMATCH);
    assert_eq!(cl.wildcmp(b"a_b", b"a\\_b", &like), WILD_MATCH);
    assert_eq!(cl.wildcmp(b"axb", b"a\\_b", &like), WILD_NOMATCH);
}

#[test]
fn string_running_out_aborts() {
    let like = LikePattern::default();
    assert_eq!(LATIN1_BIN.wildcmp(b"ab", b"abc", &like), WILD_ABORT);
    assert_eq!(LATIN1_BIN.wildcmp(b"ab", b"ab_", &like), WILD_ABORT);
    assert_eq!(LATIN1_BIN.wildcmp(b"", b"%", &like), WILD_MATCH);
    assert_eq!(LATIN1_BIN.wildcmp(b"", b"", &like), WILD_MATCH);
}

#[test]
fn custom_wildcard_characters() {
    let like = LikePattern { escape: b'!' as u32, w_one: b'?' as u32, w_many: b'*' as u32 };
    let cl = &UTF8MB4_GENERAL_CI;
    assert_eq!(cl.wildcmp(b"report.txt", b"*.TXT", &like), WILD_MATCH);
    assert_eq!(cl.wildcmp(b"a?c", b"a!?c", &like), WILD_MATCH);
    assert_eq!(cl.wildcmp(b"abc", b"a!?c", &like), WILD_NOMATCH);
    assert_eq!(cl.wildcmp(b"100%", b"100%", &like), WILD_MATCH);
}

#[test]
fn multibyte_underscore_eats_one_character() {
    let coll = Collation::new(&UTF8MB4_GENERAL_CI);
    assert!(coll.is_like("añb".as_bytes(), b"a_b"));
    assert!(!coll.is_like("añb".as_bytes(), b"a__b"));
    assert!(coll.is_like("ÅNGSTRÖM".as_bytes(), "%ström".as_bytes()));
}

#[test]
fn binary_collations_match_exactly() {
    let coll = Collation::new(&UTF8MB4_BIN);
    assert!(!coll.is_like(b"ABC", b"abc"));
    assert!(coll.is_like(b"ABC", b"A%"));
}

#[test]
fn utf16_patterns() {
    let coll = Collation::new(&UTF16_GENERAL_CI);
    let s = coll.encode("Grüße");
    assert!(coll.is_like(&s, &coll.encode("GRÜ%")));
    assert!(coll.is_like(&s, &coll.encode("%_E")));
    assert!(!coll.is_like(&s, &coll.encode("%x%")));
}

#[test]
fn deeply_nested_patterns_terminate() {
    let s = vec![b'a'; 300];
    let mut pattern = Vec::new();
    for _ in 0..300 {
        pattern.extend_from_slice(b"%a");
    }
    pattern.push(b'b');
    let r = LATIN1_BIN.wildcmp(&s, &pattern, &LikePattern::default());
    assert_ne!(r, WILD_MATCH);
}

// === like_range ===

#[test]
fn like_range_is_well_formed_for_every_collation() {
    for cl in ALL_COLLATIONS.iter() {
        let cs = cl.charset;
        let pattern = encode_str(cs, "abc%");
        let mut min = [0u8; 32];
        let mut max = [0u8; 32];
        let range = cl
            .like_range(&pattern, &LikePattern::default(), &mut min, &mut max)
            .unwrap_or_else(|| panic!("{}: no range", cl.name));
        let min = &min[..range.min_length];
        let max = &max[..range.max_length];
        assert_eq!(cs.well_formed_len(min), min.len(), "{}: min {:02X?}", cl.name, min);
        assert_eq!(cs.well_formed_len(max), max.len(), "{}: max {:02X?}", cl.name, max);
    }
}

#[test]
fn like_bounds_enclose_matching_strings() {
    let words = ["abc", "abcd", "ABCZ", "abc zzz", "abcé", "abd", "ab", "b"];
    for cl in [&LATIN1_SWEDISH_CI, &UTF8MB4_GENERAL_CI, &UTF8MB4_UNICODE_CI, &UTF8MB4_BIN] {
        let coll = Collation::new(cl);
        let bounds = coll.like_bounds(b"abc%", 32).expect("bounds");
        for w in words {
            let s = coll.encode(w);
            if !coll.is_like(&s, b"abc%") {
                continue;
            }
            assert_ne!(
                cl.strnncollsp(&bounds.min, &s).signum(),
                1,
                "{}: min above {w}",
                coll.name()
            );
            assert_ne!(
                cl.strnncollsp(&s, &bounds.max).signum(),
                1,
                "{}: max below {w}",
                coll.name()
            );
        }
    }
}

#[test]
fn pattern_without_wildcards_gives_a_point_range() {
    let coll = Collation::new(&UTF8MB4_GENERAL_CI);
    let bounds = coll.like_bounds(b"abc", 16).expect("bounds");
    assert_eq!(bounds.min, b"abc");
    assert_eq!(bounds.max, b"abc");
}

#[test]
fn escaped_wildcards_are_literal_in_bounds() {
    let coll = Collation::new(&LATIN1_SWEDISH_CI);
    let bounds = coll.like_bounds(b"5\\%", 8).expect("bounds");
    assert_eq!(bounds.min, b"5%");
    assert_eq!(bounds.max, b"5%");
}

#[test]
fn malformed_utf16_pattern_has_no_range() {
    let coll = Collation::new(&UTF16_GENERAL_CI);
    assert!(coll.like_bounds(b"\xDC\x00\x00%", 16).is_none());
}
