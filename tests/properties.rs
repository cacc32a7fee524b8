// properties.rs - Property tests for codecs, comparison and sort keys.

use std::cmp::Ordering;

use proptest::prelude::*;

use ferrocoll::api::{encode_str, Collation};
use ferrocoll::charsets::{CHARSET_UCS2, CHARSET_UTF16, CHARSET_UTF16LE, CHARSET_UTF32, CHARSET_UTF8MB3, CHARSET_UTF8MB4};
use ferrocoll::compiled::*;
use ferrocoll::convert::convert_fix;
use ferrocoll::ctype::LikePattern;

const TEXT: &str = "[a-zA-Z0-9 ,.\\-àéîõüÅåÖöЖжΩω一丁]{0,12}";

/// Short strings rich in expansions, contractions and ignorables.
const UCA_TEXT: &str = "[abchsCH ßéE\\x01\\xAD]{0,8}";

fn junk() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4)
}

fn escape_like(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

proptest! {
    /// Text survives a trip through every Unicode charset.
    #[test]
    fn prop_unicode_round_trip(s in TEXT) {
        for cs in [&CHARSET_UTF8MB3, &CHARSET_UTF8MB4, &CHARSET_UCS2, &CHARSET_UTF16, &CHARSET_UTF16LE, &CHARSET_UTF32] {
            let bytes = encode_str(cs, &s);
            prop_assert_eq!(cs.well_formed_len(&bytes), bytes.len());
            prop_assert_eq!(cs.numchars(&bytes), s.chars().count());
            prop_assert_eq!(ferrocoll::api::decode_to_string(cs, &bytes), s.clone());
        }
    }

    /// Padded sort keys order strings the way compare does.
    #[test]
    fn prop_sort_keys_follow_compare(a in TEXT, b in TEXT) {
        for cl in [&UTF8MB4_GENERAL_CI, &UTF8MB4_BIN, &UTF8MB4_UNICODE_CI, &UTF8MB4_UNICODE_520_CI, &UTF16_GENERAL_CI] {
            let coll = Collation::new(cl);
            let (x, y) = (coll.encode(&a), coll.encode(&b));
            let by_key = coll.padded_sort_key(&x, 64).cmp(&coll.padded_sort_key(&y, 64));
            prop_assert_eq!(by_key, coll.compare(&x, &y), "{}: {:?} vs {:?}", coll.name(), a, b);
        }
    }

    /// Comparison is antisymmetric, malformed input included.
    #[test]
    fn prop_compare_antisymmetric(a in prop::collection::vec(any::<u8>(), 0..16),
                                  b in prop::collection::vec(any::<u8>(), 0..16)) {
        for cl in ALL_COLLATIONS.iter() {
            let coll = Collation::new(cl);
            prop_assert_eq!(coll.compare(&a, &b), coll.compare(&b, &a).reverse(), "{}", cl.name);
        }
    }

    /// Equal strings hash equally.
    #[test]
    fn prop_equal_strings_hash_equally(s in TEXT, spaces in 0usize..4) {
        let upper = format!("{}{}", s.to_uppercase(), " ".repeat(spaces));
        for cl in [&UTF8MB4_GENERAL_CI, &UTF8MB4_UNICODE_CI, &UTF8MB4_UCA1400_AI_CI, &UTF32_GENERAL_CI] {
            let coll = Collation::new(cl);
            let (x, y) = (coll.encode(&s), coll.encode(&upper));
            if coll.equals(&x, &y) {
                prop_assert_eq!(coll.hash(&x), coll.hash(&y), "{}: {:?}", coll.name(), s);
            }
        }
    }

    /// A string with its wildcards escaped matches itself, and '%' matches anything.
    #[test]
    fn prop_like_matches_itself(s in TEXT) {
        let pattern = escape_like(&s);
        for cl in [&UTF8MB4_GENERAL_CI, &UTF8MB4_BIN, &UTF8MB4_UNICODE_CI, &UTF16_GENERAL_CI] {
            let coll = Collation::new(cl);
            let x = coll.encode(&s);
            prop_assert!(coll.is_like(&x, &coll.encode(&pattern)), "{}: {:?}", coll.name(), s);
            prop_assert!(coll.is_like(&x, &coll.encode("%")));
            prop_assert_eq!(
                cl.wildcmp(&x, &coll.encode(&format!("{}%", pattern)), &LikePattern::default()),
                0
            );
        }
    }

    /// Bounded conversion stops after exactly `nchars` characters.
    #[test]
    fn prop_convert_fix_counts_characters(s in TEXT, nchars in 0usize..16) {
        let src = s.as_bytes();
        let mut dst = [0u8; 64];
        let (n, status) = convert_fix(&CHARSET_UTF16, &mut dst, &CHARSET_UTF8MB4, src, nchars);
        let expect = nchars.min(s.chars().count());
        prop_assert_eq!(CHARSET_UTF16.numchars(&dst[..n]), expect);
        prop_assert_eq!(CHARSET_UTF8MB4.numchars(&src[..status.source_end_pos]), expect);
        prop_assert_eq!(status.well_formed_error_pos, None);
    }

    /// Comparing the first `nchars` characters never looks past them.
    #[test]
    fn prop_compare_chars_ignores_tail(s in TEXT, t1 in TEXT, t2 in TEXT) {
        let coll = Collation::new(&UTF8MB4_GENERAL_CI);
        let n = s.chars().count();
        let a = format!("{}{}", s, t1);
        let b = format!("{}{}", s, t2);
        prop_assert_eq!(coll.compare_chars(a.as_bytes(), b.as_bytes(), n), Ordering::Equal);
    }

    /// Sort keys order strings the way comparison does, for text mixed
    /// with arbitrary bytes.
    #[test]
    fn prop_sort_keys_follow_compare_on_any_bytes(prefix in TEXT, ja in junk(), jb in junk(), ta in TEXT, tb in TEXT) {
        let families = [
            &LATIN1_SWEDISH_CI,
            &UTF8MB4_GENERAL_CI,
            &UTF8MB4_GENERAL_NOPAD_CI,
            &UCS2_GENERAL_CI,
            &UTF8MB4_BIN,
            &UTF16_BIN,
            &UTF8MB4_UNICODE_CI,
            &UTF8MB4_UNICODE_NOPAD_CI,
            &UTF8MB4_CZECH_CI,
            &UTF8MB4_UCA1400_AS_CS,
            &UTF8MB4_UCA1400_NOPAD_AS_CS,
        ];
        for cl in families {
            let coll = Collation::new(cl);
            let x = [coll.encode(&prefix), ja.clone(), coll.encode(&ta)].concat();
            let y = [coll.encode(&prefix), jb.clone(), coll.encode(&tb)].concat();
            let by_key = coll.sort_key(&x).cmp(&coll.sort_key(&y));
            prop_assert_eq!(by_key, coll.compare_nopad(&x, &y), "{}: {:02X?} vs {:02X?}", coll.name(), x, y);
            if cl.levels_for_order <= 1 {
                let by_key = coll.padded_sort_key(&x, 64).cmp(&coll.padded_sort_key(&y, 64));
                prop_assert_eq!(by_key, coll.compare(&x, &y), "{}: {:02X?} vs {:02X?}", coll.name(), x, y);
            }
        }
    }

    /// Comparing `n` characters equals comparing the strings cut to `n`
    /// characters.
    #[test]
    fn prop_compare_chars_matches_truncation(a in UCA_TEXT, b in UCA_TEXT, n in 0usize..10) {
        let cut = |s: &str| s.chars().take(n).collect::<String>();
        let families = [
            &UTF8MB4_UNICODE_CI,
            &UTF8MB4_UNICODE_NOPAD_CI,
            &UTF8MB4_CZECH_CI,
            &UTF8MB4_UCA1400_AS_CS,
            &UTF8MB4_UCA1400_NOPAD_AS_CS,
        ];
        for cl in families {
            let coll = Collation::new(cl);
            let expect = coll.compare(cut(&a).as_bytes(), cut(&b).as_bytes());
            prop_assert_eq!(
                coll.compare_chars(a.as_bytes(), b.as_bytes(), n),
                expect,
                "{}: {:?} vs {:?} at {}",
                coll.name(),
                a,
                b,
                n
            );
        }
    }
}
