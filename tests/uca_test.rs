// uca_test.rs - Integration tests for UCA collations and tailorings.

use std::cmp::Ordering;

use ferrocoll::api::Collation;
use ferrocoll::compiled::*;

fn sorted_by_compare(coll: Collation<'_>, words: &[&str]) -> Vec<String> {
    let mut v: Vec<&str> = words.to_vec();
    v.sort_by(|a, b| coll.compare(a.as_bytes(), b.as_bytes()));
    v.into_iter().map(String::from).collect()
}

fn sorted_by_key(coll: Collation<'_>, words: &[&str]) -> Vec<String> {
    let mut v: Vec<&str> = words.to_vec();
    v.sort_by_key(|w| coll.padded_sort_key(w.as_bytes(), 16));
    v.into_iter().map(String::from).collect()
}

// === Accent and case sensitivity ===

#[test]
fn cafe_under_accent_sensitive_case_insensitive() {
    let coll = Collation::new(&UTF8MB4_UCA1400_AS_CI);
    assert_eq!(coll.compare("café".as_bytes(), "CAFÉ".as_bytes()), Ordering::Equal);
    assert_eq!(coll.compare("café".as_bytes(), b"CAFE"), Ordering::Greater);
    assert_eq!(coll.compare(b"cafe", "CAFÉ".as_bytes()), Ordering::Less);
}

#[test]
fn cafe_under_accent_insensitive() {
    let coll = Collation::new(&UTF8MB4_UCA1400_AI_CI);
    assert!(coll.equals("café".as_bytes(), b"CAFE"));
    assert_eq!(coll.sort_key("café".as_bytes()), coll.sort_key(b"CAFE"));
}

#[test]
fn case_sensitive_puts_lower_case_first() {
    let coll = Collation::new(&UTF8MB4_UCA1400_AS_CS);
    assert_eq!(coll.compare(b"a", b"A"), Ordering::Less);
    assert_eq!(coll.compare(b"A", b"b"), Ordering::Less);
    assert_eq!(
        sorted_by_compare(coll, &["b", "A", "a", "B"]),
        vec!["a", "A", "b", "B"]
    );
}

#[test]
fn multi_level_keys_agree_with_compare() {
    let words = ["côte", "cote", "Côte", "coté", "Cote", "côté", "cot", "cotes"];
    for cl in [&UTF8MB4_UCA1400_AI_CI, &UTF8MB4_UCA1400_AS_CI, &UTF8MB4_UCA1400_AS_CS] {
        let coll = Collation::new(cl);
        let by_key = sorted_by_key(coll, &words);
        for pair in by_key.windows(2) {
            assert_ne!(
                coll.compare(pair[0].as_bytes(), pair[1].as_bytes()),
                Ordering::Greater,
                "{}: {} vs {}",
                coll.name(),
                pair[0],
                pair[1]
            );
        }
    }
}

// === Base table ===

#[test]
fn ignorable_characters_do_not_count() {
    let coll = Collation::new(&UTF8MB4_UNICODE_CI);
    assert!(coll.equals(b"a\x01b", b"ab"));
    assert!(coll.equals("a\u{00AD}b".as_bytes(), b"ab"));
}

#[test]
fn punctuation_before_digits_before_letters() {
    let coll = Collation::new(&UTF8MB4_UNICODE_CI);
    assert_eq!(coll.compare(b"-", b"0"), Ordering::Less);
    assert_eq!(coll.compare(b"9", b"a"), Ordering::Less);
    assert_eq!(coll.compare(b"z", "α".as_bytes()), Ordering::Less);
    assert_eq!(coll.compare("ω".as_bytes(), "а".as_bytes()), Ordering::Less);
}

#[test]
fn han_ideographs_sort_by_code_point_after_letters() {
    let coll = Collation::new(&UTF8MB4_UNICODE_520_CI);
    assert_eq!(coll.compare("一".as_bytes(), "丁".as_bytes()), Ordering::Less);
    assert_eq!(coll.compare("я".as_bytes(), "一".as_bytes()), Ordering::Less);
    // Core Han before the extension blocks.
    assert_eq!(coll.compare("龥".as_bytes(), "㐀".as_bytes()), Ordering::Less);
}

#[test]
fn supplementary_characters_by_uca_version() {
    let old = Collation::new(&UTF8MB4_UNICODE_CI);
    assert!(old.equals("😀".as_bytes(), "😁".as_bytes()));
    let new = Collation::new(&UTF8MB4_UNICODE_520_CI);
    assert_eq!(new.compare("😀".as_bytes(), "😁".as_bytes()), Ordering::Less);
}

#[test]
fn utf16_and_utf8_agree() {
    let u8c = Collation::new(&UTF8MB4_UNICODE_CI);
    let u16c = Collation::new(&UTF16_UNICODE_CI);
    let words = ["Zürich", "zurich", "Ärger", "apfel", "Éclair"];
    for a in words {
        for b in words {
            let x = u8c.compare(a.as_bytes(), b.as_bytes());
            let y = u16c.compare(&u16c.encode(a), &u16c.encode(b));
            assert_eq!(x, y, "{a} vs {b}");
        }
    }
}

// === Tailorings ===

#[test]
fn czech_ch_is_one_letter() {
    let coll = Collation::new(&UTF8MB4_CZECH_CI);
    assert_eq!(coll.compare(b"chata", b"hrad"), Ordering::Greater);
    assert_eq!(coll.compare(b"chata", b"ivan"), Ordering::Less);
    assert_eq!(coll.compare(b"cz", b"cha"), Ordering::Less);
    assert!(coll.equals(b"Chata", b"chata"));
    assert_eq!(coll.compare("čaj".as_bytes(), b"dub"), Ordering::Less);
    assert_eq!(coll.compare("čaj".as_bytes(), b"cz"), Ordering::Greater);
}

#[test]
fn contractions_are_atomic() {
    let coll = Collation::new(&UTF8MB4_CZECH_CI);
    // Prefix comparison never splits "ch".
    assert_ne!(coll.info().strnncoll(b"ch", b"c", true), 0);
    assert_eq!(coll.info().strnncoll(b"cha", b"ch", true), 0);
    // A contraction counts as two characters and only forms when both fit.
    assert_eq!(coll.compare_chars(b"chx", b"chy", 2), Ordering::Equal);
    assert_eq!(coll.compare_chars(b"chx", b"czx", 2), Ordering::Greater);
    assert_eq!(coll.compare_chars(b"chx", b"czx", 1), Ordering::Equal);
    assert_eq!(coll.find(b"xChy", b"ch"), Some(1..3));
}

#[test]
fn spanish2_double_letters() {
    let coll = Collation::new(&UTF8MB4_SPANISH2_CI);
    assert_eq!(coll.compare(b"llama", b"luz"), Ordering::Greater);
    assert_eq!(coll.compare(b"llama", b"mano"), Ordering::Less);
    assert_eq!(coll.compare("ñu".as_bytes(), b"nz"), Ordering::Greater);
    assert_eq!(coll.compare("ñu".as_bytes(), b"oso"), Ordering::Less);
    assert_eq!(
        sorted_by_compare(coll, &["dama", "chico", "cura", "dedo"]),
        vec!["cura", "chico", "dama", "dedo"]
    );
}

#[test]
fn danish_letters_after_z() {
    let coll = Collation::new(&UTF8MB4_DANISH_CI);
    assert_eq!(coll.compare("æble".as_bytes(), b"zebra"), Ordering::Greater);
    assert_eq!(coll.compare("ø".as_bytes(), "æ".as_bytes()), Ordering::Greater);
    assert_eq!(coll.compare("å".as_bytes(), "ø".as_bytes()), Ordering::Greater);
    assert!(coll.equals(b"aalborg", "ålborg".as_bytes()));
    assert!(coll.equals("ü".as_bytes(), b"y"));
}

#[test]
fn tailored_sort_keys_follow_compare() {
    let coll = Collation::new(&UTF8MB4_CZECH_CI);
    let words = ["hrad", "chata", "cesta", "čaj", "ivan", "Chata"];
    let by_key = sorted_by_key(coll, &words);
    let by_cmp = sorted_by_compare(coll, &words);
    for (a, b) in by_key.iter().zip(by_cmp.iter()) {
        assert!(coll.equals(a.as_bytes(), b.as_bytes()), "{a} vs {b}");
    }
}

// === PAD and NOPAD ===

#[test]
fn pad_attribute() {
    let pad = Collation::new(&UTF8MB4_UNICODE_520_CI);
    let nopad = Collation::new(&UTF8MB4_UNICODE_520_NOPAD_CI);
    assert!(pad.equals(b"abc", b"abc   "));
    assert!(!nopad.equals(b"abc", b"abc   "));
    assert_eq!(nopad.compare(b"abc", b"abc "), Ordering::Less);
    assert_eq!(pad.hash(b"abc"), pad.hash(b"abc  "));
}
