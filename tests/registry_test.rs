// registry_test.rs - Integration tests for collation lookup and registration.

use std::cmp::Ordering;

use ferrocoll::ctype::{nopad_id, PAGE2_COLLATION_ID_8BIT, PAGE2_COLLATION_ID_UTF8MB3};
use ferrocoll::prelude::*;

fn registry() -> Registry {
    Registry::init(RegistryConfig::new()).expect("registry")
}

// === Lookup ===

#[test]
fn lookup_by_id_and_name_agree() {
    let r = registry();
    for cl in r.collations() {
        let by_id = r.get_by_id(cl.number).expect("by id");
        let by_name = r.get_by_name(&cl.name).expect("by name");
        assert_eq!(by_id.number, by_name.number, "{}", cl.name);
    }
}

#[test]
fn collations_are_ordered_by_id() {
    let r = registry();
    let ids: Vec<u32> = r.collations().iter().map(|cl| cl.number).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), r.len());
    assert!(!r.is_empty());
}

#[test]
fn nopad_ids_are_offset() {
    let r = registry();
    let nopad = r.get_by_id(nopad_id(8)).expect("latin1 nopad");
    assert_eq!(nopad.name, "latin1_swedish_nopad_ci");
    assert!(nopad.is_nopad());
    assert_eq!(nopad.primary_number, 8);
}

#[test]
fn names_are_case_insensitive_with_utf8_alias() {
    let r = registry();
    assert_eq!(r.get_by_name("UTF8MB4_GENERAL_CI").unwrap().number, 45);
    assert_eq!(r.get_by_name("utf8_bin").unwrap().name, "utf8mb3_bin");
    assert_eq!(r.get_by_name("Utf8_Unicode_Ci").unwrap().name, "utf8mb3_unicode_ci");
}

#[test]
fn unknown_lookups_report_what_was_missing() {
    let r = registry();
    let err = r.get_by_name("klingon_ci").unwrap_err();
    assert_eq!(err, CollationError::UnknownCollation("klingon_ci".into()));
    assert_eq!(err.to_string(), "unknown collation 'klingon_ci'");
    assert_eq!(err.code(), -1);
    assert!(matches!(r.charset_by_name("ebcdic"), Err(CollationError::UnknownCharset(_))));
}

#[test]
fn charset_defaults() {
    let r = registry();
    assert_eq!(r.default_for_charset("latin1", false).unwrap().name, "latin1_swedish_ci");
    assert_eq!(r.default_for_charset("latin1", true).unwrap().name, "latin1_bin");
    assert_eq!(r.default_for_charset("utf16le", false).unwrap().name, "utf16le_general_ci");
    assert_eq!(r.default_for_charset("utf8", true).unwrap().name, "utf8mb3_bin");
}

// === Configuration ===

#[test]
fn configured_default_collation() {
    let r = Registry::init(RegistryConfig::new().default_collation("latin1_bin")).unwrap();
    assert_eq!(r.get_default().name, "latin1_bin");
    let err = Registry::init(RegistryConfig::new().default_collation("nope")).unwrap_err();
    assert!(matches!(err, CollationError::UnknownCollation(_)));
}

#[test]
fn preloading_builds_compiled_tailorings() {
    let r = Registry::init(RegistryConfig::new().preload_tailored(true)).unwrap();
    let czech = r.get_by_name("utf8mb4_czech_ci").unwrap();
    assert!(czech.is_ready());
}

// === Registration ===

#[test]
fn registered_collations_are_usable() {
    let def = CollationDefinition::new("utf8mb3_vowels_first_ci", PAGE2_COLLATION_ID_UTF8MB3 + 3, "utf8", "&[before 1]b < e < i < o < u");
    let r = Registry::init(RegistryConfig::new().definition(def)).unwrap();
    let coll = r.collation("utf8_vowels_first_ci").unwrap();
    assert_eq!(coll.id(), PAGE2_COLLATION_ID_UTF8MB3 + 3);
    assert_eq!(coll.charset().name, "utf8mb3");
    assert_eq!(coll.compare(b"u", b"b"), Ordering::Less);
    assert_eq!(coll.compare(b"a", b"e"), Ordering::Less);
    assert!(coll.equals(b"OSLO", b"oslo"));
    assert_eq!(r.get_by_id(PAGE2_COLLATION_ID_UTF8MB3 + 3).unwrap().name, "utf8mb3_vowels_first_ci");
}

#[test]
fn eight_bit_charsets_use_the_shared_page() {
    let mut r = registry();
    let def = CollationDefinition::new("latin1_custom_ci", PAGE2_COLLATION_ID_8BIT, "latin1", "&z < a");
    assert_eq!(r.add_collation(def), Ok(PAGE2_COLLATION_ID_8BIT));
    let cl = r.get_by_name("latin1_custom_ci").unwrap();
    assert!(cl.strnncoll(b"z", b"a", false) < 0);
    assert!(cl.strnncollsp(b"A ", b"a") == 0);
}

#[test]
fn rejected_definitions() {
    let mut r = registry();
    let before = r.len();

    let taken = CollationDefinition::new("utf8mb4_general_ci", 0x261, "utf8mb4", "&a < b");
    assert!(matches!(r.add_collation(taken), Err(CollationError::DuplicateCollation { .. })));

    let outside = CollationDefinition::new("utf8mb4_x_ci", 0x240, "utf8mb4", "&a < b");
    let err = r.add_collation(outside).unwrap_err();
    assert!(matches!(err, CollationError::IdOutOfRange { id: 0x240, .. }));
    assert_eq!(err.code(), -5);

    let binary = CollationDefinition::new("binary_x", 0x200, "binary", "&a < b");
    assert!(matches!(r.add_collation(binary), Err(CollationError::IdOutOfRange { .. })));

    let charset = CollationDefinition::new("ebcdic_x", 0x200, "ebcdic", "&a < b");
    assert!(matches!(r.add_collation(charset), Err(CollationError::UnknownCharset(_))));

    let syntax = CollationDefinition::new("utf8mb4_y_ci", 0x262, "utf8mb4", "&a < ");
    assert!(matches!(r.add_collation(syntax), Err(CollationError::RuleSyntax { .. })));

    assert_eq!(r.len(), before);
}

#[test]
fn rule_settings_override_the_definition() {
    let def = CollationDefinition::new("utf32_strict_ci", 0x2E5, "utf32", "[strength 3][version 5.2.0] &a < b")
        .version(UcaVersion::V400);
    let r = Registry::init(RegistryConfig::new().definition(def)).unwrap();
    let cl = r.get_by_name("utf32_strict_ci").unwrap();
    assert_eq!(cl.levels_for_order, 3);
    assert_eq!(cl.max_sort_char, UcaVersion::V520.maxchar());
    assert_eq!(cl.binary_number, 61);
    let coll = Collation::new(cl);
    assert_eq!(coll.compare(&coll.encode("a"), &coll.encode("A")), Ordering::Less);
}

#[test]
fn shutdown_consumes_the_registry() {
    let def = CollationDefinition::new("ucs2_tmp_ci", 0x280, "ucs2", "&a < b");
    let r = Registry::init(RegistryConfig::new().definition(def)).unwrap();
    assert!(r.get_by_id(0x280).is_ok());
    r.shutdown();
}
