// compiled.rs - Built-in collations
//
// Every collation the registry knows without a definition: the classic
// ids below 256, their NOPAD twins at `1024 + id` and the UCA 14.0.0
// family at 2048 and up. Tailored entries carry their rule script and
// build the weight tables on first use.

use std::borrow::Cow;

use once_cell::sync::{Lazy, OnceCell};

use crate::charset::CharsetInfo;
use crate::charsets::ascii::SORT_ORDER_ASCII_GENERAL;
use crate::charsets::latin1::SORT_ORDER_LATIN1_SWEDISH;
use crate::charsets::{
    CHARSET_ASCII, CHARSET_BINARY, CHARSET_LATIN1, CHARSET_UCS2, CHARSET_UTF16, CHARSET_UTF16LE, CHARSET_UTF32,
    CHARSET_UTF8MB3, CHARSET_UTF8MB4,
};
use crate::collation::strcoll::{GENERAL_CI_HANDLER, SIMPLE_HANDLER, UNICODE_BIN_HANDLER};
use crate::collation::uca::UCA_HANDLER;
use crate::collation::{CollationHandler, CollationInfo};
use crate::ctype::{nopad_id, uca1400_id, CharsetState, WcT, MAX_BMP, MAX_UNICODE, UCA1400_CHARSET_UTF8MB4};
use crate::uca::{UcaInfo, UCA1400, UCA400, UCA520};

// === Tailorings ===

pub const CZECH_RULES: &str = "&C < \\u010D <<< \\u010C \
     &H < ch <<< cH <<< Ch <<< CH \
     &R < \\u0159 <<< \\u0158 \
     &S < \\u0161 <<< \\u0160 \
     &Z < \\u017E <<< \\u017D";

pub const DANISH_RULES: &str = "&Y << \\u00FC <<< \\u00DC << \\u0171 <<< \\u0170 \
     &Z < \\u00E6 <<< \\u00C6 << \\u00E4 <<< \\u00C4 \
     < \\u00F8 <<< \\u00D8 << \\u00F6 <<< \\u00D6 << \\u0151 <<< \\u0150 \
     < \\u00E5 <<< \\u00C5 << aa <<< Aa <<< AA";

pub const SPANISH2_RULES: &str = "&C < ch <<< Ch <<< CH \
     &L < ll <<< Ll <<< LL \
     &N < \\u00F1 <<< \\u00D1";

// === Construction ===

const PAD_CI: CharsetState = CharsetState::COMPILED.union(CharsetState::PRIMARY);
const PAD_BIN: CharsetState = CharsetState::COMPILED.union(CharsetState::BINSORT);
const UNI_CI: CharsetState = PAD_CI.union(CharsetState::UNICODE);
const UNI_BIN: CharsetState = PAD_BIN.union(CharsetState::UNICODE);
const UNI_UCA: CharsetState = CharsetState::COMPILED.union(CharsetState::UNICODE).union(CharsetState::STRNXFRM);

const fn nopad(state: CharsetState) -> CharsetState {
    state.union(CharsetState::NOPAD)
}

/// Plain data of a compiled collation; tables and handler are passed to
/// [`build`] separately.
#[derive(Clone, Copy)]
struct Def {
    number: u32,
    primary_number: u32,
    binary_number: u32,
    state: CharsetState,
    name: &'static str,
    comment: &'static str,
    tailoring: Option<&'static str>,
    strxfrm_multiply: usize,
    min_sort_char: WcT,
    max_sort_char: WcT,
    levels_for_order: usize,
}

const SIMPLE: Def = Def {
    number: 0,
    primary_number: 0,
    binary_number: 0,
    state: PAD_CI,
    name: "",
    comment: "",
    tailoring: None,
    strxfrm_multiply: 1,
    min_sort_char: 0,
    max_sort_char: 0xFF,
    levels_for_order: 1,
};

const GENERAL: Def = Def { state: UNI_CI, max_sort_char: MAX_BMP, strxfrm_multiply: 2, ..SIMPLE };

const BIN: Def = Def { state: UNI_BIN, max_sort_char: MAX_UNICODE, strxfrm_multiply: 3, ..SIMPLE };

const UCA: Def = Def { state: UNI_UCA, min_sort_char: 0x09, max_sort_char: MAX_BMP, strxfrm_multiply: 8, ..SIMPLE };

const fn build(
    def: Def,
    charset: &'static CharsetInfo,
    sort_order: Option<&'static [u8; 256]>,
    uca: Option<&'static Lazy<UcaInfo>>,
    handler: &'static dyn CollationHandler,
) -> CollationInfo {
    CollationInfo {
        number: def.number,
        primary_number: def.primary_number,
        binary_number: def.binary_number,
        state: def.state,
        name: Cow::Borrowed(def.name),
        comment: def.comment,
        charset,
        sort_order,
        uca,
        tailoring: match def.tailoring {
            Some(rules) => Some(Cow::Borrowed(rules)),
            None => None,
        },
        strxfrm_multiply: def.strxfrm_multiply,
        min_sort_char: def.min_sort_char,
        max_sort_char: def.max_sort_char,
        levels_for_order: def.levels_for_order,
        handler,
        tailored: OnceCell::new(),
    }
}

// === binary ===

pub static BINARY: CollationInfo = build(
    Def {
        number: 63,
        primary_number: 63,
        binary_number: 63,
        state: nopad(PAD_BIN.union(CharsetState::PRIMARY)),
        name: "binary",
        ..SIMPLE
    },
    &CHARSET_BINARY,
    None,
    None,
    &SIMPLE_HANDLER,
);

// === latin1 ===

const LATIN1: Def = Def { primary_number: 8, binary_number: 47, ..SIMPLE };

pub static LATIN1_SWEDISH_CI: CollationInfo = build(
    Def { number: 8, name: "latin1_swedish_ci", ..LATIN1 },
    &CHARSET_LATIN1,
    Some(&SORT_ORDER_LATIN1_SWEDISH),
    None,
    &SIMPLE_HANDLER,
);

pub static LATIN1_BIN: CollationInfo = build(
    Def { number: 47, name: "latin1_bin", state: PAD_BIN, ..LATIN1 },
    &CHARSET_LATIN1,
    None,
    None,
    &SIMPLE_HANDLER,
);

pub static LATIN1_SWEDISH_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(8), name: "latin1_swedish_nopad_ci", state: nopad(PAD_CI), ..LATIN1 },
    &CHARSET_LATIN1,
    Some(&SORT_ORDER_LATIN1_SWEDISH),
    None,
    &SIMPLE_HANDLER,
);

pub static LATIN1_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(47), name: "latin1_nopad_bin", state: nopad(PAD_BIN), ..LATIN1 },
    &CHARSET_LATIN1,
    None,
    None,
    &SIMPLE_HANDLER,
);

// === ascii ===

const ASCII: Def = Def { primary_number: 11, binary_number: 65, max_sort_char: 0x7F, ..SIMPLE };

pub static ASCII_GENERAL_CI: CollationInfo = build(
    Def { number: 11, name: "ascii_general_ci", ..ASCII },
    &CHARSET_ASCII,
    Some(&SORT_ORDER_ASCII_GENERAL),
    None,
    &SIMPLE_HANDLER,
);

pub static ASCII_BIN: CollationInfo = build(
    Def { number: 65, name: "ascii_bin", state: PAD_BIN, ..ASCII },
    &CHARSET_ASCII,
    None,
    None,
    &SIMPLE_HANDLER,
);

pub static ASCII_GENERAL_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(11), name: "ascii_general_nopad_ci", state: nopad(PAD_CI), ..ASCII },
    &CHARSET_ASCII,
    Some(&SORT_ORDER_ASCII_GENERAL),
    None,
    &SIMPLE_HANDLER,
);

pub static ASCII_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(65), name: "ascii_nopad_bin", state: nopad(PAD_BIN), ..ASCII },
    &CHARSET_ASCII,
    None,
    None,
    &SIMPLE_HANDLER,
);

// === utf8mb3 ===

const UTF8MB3_GENERAL: Def = Def { primary_number: 33, binary_number: 83, ..GENERAL };
const UTF8MB3_BIN_DEF: Def = Def { primary_number: 33, binary_number: 83, max_sort_char: MAX_BMP, ..BIN };
const UTF8MB3_UCA: Def = Def { primary_number: 33, binary_number: 83, ..UCA };

pub static UTF8MB3_GENERAL_CI: CollationInfo = build(
    Def { number: 33, name: "utf8mb3_general_ci", ..UTF8MB3_GENERAL },
    &CHARSET_UTF8MB3,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF8MB3_BIN: CollationInfo = build(
    Def { number: 83, name: "utf8mb3_bin", ..UTF8MB3_BIN_DEF },
    &CHARSET_UTF8MB3,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

pub static UTF8MB3_UNICODE_CI: CollationInfo = build(
    Def { number: 192, name: "utf8mb3_unicode_ci", ..UTF8MB3_UCA },
    &CHARSET_UTF8MB3,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB3_CZECH_CI: CollationInfo = build(
    Def { number: 202, name: "utf8mb3_czech_ci", tailoring: Some(CZECH_RULES), ..UTF8MB3_UCA },
    &CHARSET_UTF8MB3,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB3_UNICODE_520_CI: CollationInfo = build(
    Def { number: 214, name: "utf8mb3_unicode_520_ci", ..UTF8MB3_UCA },
    &CHARSET_UTF8MB3,
    None,
    Some(&UCA520),
    &UCA_HANDLER,
);

pub static UTF8MB3_GENERAL_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(33), name: "utf8mb3_general_nopad_ci", state: nopad(UNI_CI), ..UTF8MB3_GENERAL },
    &CHARSET_UTF8MB3,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF8MB3_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(83), name: "utf8mb3_nopad_bin", state: nopad(UNI_BIN), ..UTF8MB3_BIN_DEF },
    &CHARSET_UTF8MB3,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

pub static UTF8MB3_UNICODE_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(192), name: "utf8mb3_unicode_nopad_ci", state: nopad(UNI_UCA), ..UTF8MB3_UCA },
    &CHARSET_UTF8MB3,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB3_UNICODE_520_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(214), name: "utf8mb3_unicode_520_nopad_ci", state: nopad(UNI_UCA), ..UTF8MB3_UCA },
    &CHARSET_UTF8MB3,
    None,
    Some(&UCA520),
    &UCA_HANDLER,
);

// === utf8mb4 ===

const UTF8MB4_GENERAL: Def = Def { primary_number: 45, binary_number: 46, ..GENERAL };
const UTF8MB4_BIN_DEF: Def = Def { primary_number: 45, binary_number: 46, ..BIN };
const UTF8MB4_UCA: Def = Def { primary_number: 45, binary_number: 46, ..UCA };
const UTF8MB4_UCA_FULL: Def = Def { max_sort_char: MAX_UNICODE, ..UTF8MB4_UCA };

pub static UTF8MB4_GENERAL_CI: CollationInfo = build(
    Def { number: 45, name: "utf8mb4_general_ci", ..UTF8MB4_GENERAL },
    &CHARSET_UTF8MB4,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF8MB4_BIN: CollationInfo = build(
    Def { number: 46, name: "utf8mb4_bin", ..UTF8MB4_BIN_DEF },
    &CHARSET_UTF8MB4,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

pub static UTF8MB4_UNICODE_CI: CollationInfo = build(
    Def { number: 224, name: "utf8mb4_unicode_ci", ..UTF8MB4_UCA },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB4_CZECH_CI: CollationInfo = build(
    Def { number: 234, name: "utf8mb4_czech_ci", tailoring: Some(CZECH_RULES), ..UTF8MB4_UCA },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB4_DANISH_CI: CollationInfo = build(
    Def { number: 235, name: "utf8mb4_danish_ci", tailoring: Some(DANISH_RULES), ..UTF8MB4_UCA },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB4_SPANISH2_CI: CollationInfo = build(
    Def { number: 238, name: "utf8mb4_spanish2_ci", tailoring: Some(SPANISH2_RULES), ..UTF8MB4_UCA },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB4_UNICODE_520_CI: CollationInfo = build(
    Def { number: 246, name: "utf8mb4_unicode_520_ci", ..UTF8MB4_UCA_FULL },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA520),
    &UCA_HANDLER,
);

pub static UTF8MB4_GENERAL_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(45), name: "utf8mb4_general_nopad_ci", state: nopad(UNI_CI), ..UTF8MB4_GENERAL },
    &CHARSET_UTF8MB4,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF8MB4_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(46), name: "utf8mb4_nopad_bin", state: nopad(UNI_BIN), ..UTF8MB4_BIN_DEF },
    &CHARSET_UTF8MB4,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

pub static UTF8MB4_UNICODE_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(224), name: "utf8mb4_unicode_nopad_ci", state: nopad(UNI_UCA), ..UTF8MB4_UCA },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF8MB4_UNICODE_520_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(246), name: "utf8mb4_unicode_520_nopad_ci", state: nopad(UNI_UCA), ..UTF8MB4_UCA_FULL },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA520),
    &UCA_HANDLER,
);

// UCA 14.0.0: accent and case sensitivity select how many levels count.

const fn uca1400(accent: bool, case: bool, nopad_variant: bool) -> u32 {
    uca1400_id(UCA1400_CHARSET_UTF8MB4, 0, accent, case, nopad_variant)
}

const UTF8MB4_UCA1400: Def = Def {
    primary_number: uca1400(false, false, false),
    comment: "UCA 14.0.0",
    ..UTF8MB4_UCA_FULL
};

pub static UTF8MB4_UCA1400_AI_CI: CollationInfo = build(
    Def { number: uca1400(false, false, false), name: "utf8mb4_uca1400_ai_ci", ..UTF8MB4_UCA1400 },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA1400),
    &UCA_HANDLER,
);

pub static UTF8MB4_UCA1400_AS_CI: CollationInfo = build(
    Def {
        number: uca1400(true, false, false),
        name: "utf8mb4_uca1400_as_ci",
        levels_for_order: 2,
        ..UTF8MB4_UCA1400
    },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA1400),
    &UCA_HANDLER,
);

pub static UTF8MB4_UCA1400_AS_CS: CollationInfo = build(
    Def {
        number: uca1400(true, true, false),
        name: "utf8mb4_uca1400_as_cs",
        levels_for_order: 3,
        ..UTF8MB4_UCA1400
    },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA1400),
    &UCA_HANDLER,
);

pub static UTF8MB4_UCA1400_NOPAD_AI_CI: CollationInfo = build(
    Def {
        number: uca1400(false, false, true),
        name: "utf8mb4_uca1400_nopad_ai_ci",
        state: nopad(UNI_UCA),
        ..UTF8MB4_UCA1400
    },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA1400),
    &UCA_HANDLER,
);

pub static UTF8MB4_UCA1400_NOPAD_AS_CI: CollationInfo = build(
    Def {
        number: uca1400(true, false, true),
        name: "utf8mb4_uca1400_nopad_as_ci",
        state: nopad(UNI_UCA),
        levels_for_order: 2,
        ..UTF8MB4_UCA1400
    },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA1400),
    &UCA_HANDLER,
);

pub static UTF8MB4_UCA1400_NOPAD_AS_CS: CollationInfo = build(
    Def {
        number: uca1400(true, true, true),
        name: "utf8mb4_uca1400_nopad_as_cs",
        state: nopad(UNI_UCA),
        levels_for_order: 3,
        ..UTF8MB4_UCA1400
    },
    &CHARSET_UTF8MB4,
    None,
    Some(&UCA1400),
    &UCA_HANDLER,
);

// === ucs2 ===

const UCS2_GENERAL: Def = Def { primary_number: 35, binary_number: 90, strxfrm_multiply: 1, ..GENERAL };
const UCS2_BIN_DEF: Def = Def { primary_number: 35, binary_number: 90, max_sort_char: MAX_BMP, strxfrm_multiply: 2, ..BIN };
const UCS2_UCA: Def = Def { primary_number: 35, binary_number: 90, ..UCA };

pub static UCS2_GENERAL_CI: CollationInfo = build(
    Def { number: 35, name: "ucs2_general_ci", ..UCS2_GENERAL },
    &CHARSET_UCS2,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UCS2_BIN: CollationInfo =
    build(Def { number: 90, name: "ucs2_bin", ..UCS2_BIN_DEF }, &CHARSET_UCS2, None, None, &UNICODE_BIN_HANDLER);

pub static UCS2_UNICODE_CI: CollationInfo = build(
    Def { number: 128, name: "ucs2_unicode_ci", ..UCS2_UCA },
    &CHARSET_UCS2,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UCS2_GENERAL_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(35), name: "ucs2_general_nopad_ci", state: nopad(UNI_CI), ..UCS2_GENERAL },
    &CHARSET_UCS2,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UCS2_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(90), name: "ucs2_nopad_bin", state: nopad(UNI_BIN), ..UCS2_BIN_DEF },
    &CHARSET_UCS2,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

pub static UCS2_UNICODE_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(128), name: "ucs2_unicode_nopad_ci", state: nopad(UNI_UCA), ..UCS2_UCA },
    &CHARSET_UCS2,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

// === utf16 ===

const UTF16_GENERAL: Def = Def { primary_number: 54, binary_number: 55, strxfrm_multiply: 1, ..GENERAL };
const UTF16_BIN_DEF: Def = Def { primary_number: 54, binary_number: 55, strxfrm_multiply: 2, ..BIN };
const UTF16_UCA: Def = Def { primary_number: 54, binary_number: 55, ..UCA };

pub static UTF16_GENERAL_CI: CollationInfo = build(
    Def { number: 54, name: "utf16_general_ci", ..UTF16_GENERAL },
    &CHARSET_UTF16,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF16_BIN: CollationInfo =
    build(Def { number: 55, name: "utf16_bin", ..UTF16_BIN_DEF }, &CHARSET_UTF16, None, None, &UNICODE_BIN_HANDLER);

pub static UTF16_UNICODE_CI: CollationInfo = build(
    Def { number: 101, name: "utf16_unicode_ci", ..UTF16_UCA },
    &CHARSET_UTF16,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF16_GENERAL_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(54), name: "utf16_general_nopad_ci", state: nopad(UNI_CI), ..UTF16_GENERAL },
    &CHARSET_UTF16,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF16_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(55), name: "utf16_nopad_bin", state: nopad(UNI_BIN), ..UTF16_BIN_DEF },
    &CHARSET_UTF16,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

pub static UTF16_UNICODE_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(101), name: "utf16_unicode_nopad_ci", state: nopad(UNI_UCA), ..UTF16_UCA },
    &CHARSET_UTF16,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

// === utf16le ===

const UTF16LE_GENERAL: Def = Def { primary_number: 56, binary_number: 62, strxfrm_multiply: 1, ..GENERAL };
const UTF16LE_BIN_DEF: Def = Def { primary_number: 56, binary_number: 62, strxfrm_multiply: 2, ..BIN };

pub static UTF16LE_GENERAL_CI: CollationInfo = build(
    Def { number: 56, name: "utf16le_general_ci", ..UTF16LE_GENERAL },
    &CHARSET_UTF16LE,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF16LE_BIN: CollationInfo =
    build(Def { number: 62, name: "utf16le_bin", ..UTF16LE_BIN_DEF }, &CHARSET_UTF16LE, None, None, &UNICODE_BIN_HANDLER);

pub static UTF16LE_GENERAL_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(56), name: "utf16le_general_nopad_ci", state: nopad(UNI_CI), ..UTF16LE_GENERAL },
    &CHARSET_UTF16LE,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF16LE_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(62), name: "utf16le_nopad_bin", state: nopad(UNI_BIN), ..UTF16LE_BIN_DEF },
    &CHARSET_UTF16LE,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

// === utf32 ===

const UTF32_GENERAL: Def = Def { primary_number: 60, binary_number: 61, strxfrm_multiply: 1, ..GENERAL };
const UTF32_BIN_DEF: Def = Def { primary_number: 60, binary_number: 61, strxfrm_multiply: 1, ..BIN };
const UTF32_UCA: Def = Def { primary_number: 60, binary_number: 61, ..UCA };

pub static UTF32_GENERAL_CI: CollationInfo = build(
    Def { number: 60, name: "utf32_general_ci", ..UTF32_GENERAL },
    &CHARSET_UTF32,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF32_BIN: CollationInfo =
    build(Def { number: 61, name: "utf32_bin", ..UTF32_BIN_DEF }, &CHARSET_UTF32, None, None, &UNICODE_BIN_HANDLER);

pub static UTF32_UNICODE_CI: CollationInfo = build(
    Def { number: 160, name: "utf32_unicode_ci", ..UTF32_UCA },
    &CHARSET_UTF32,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

pub static UTF32_GENERAL_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(60), name: "utf32_general_nopad_ci", state: nopad(UNI_CI), ..UTF32_GENERAL },
    &CHARSET_UTF32,
    None,
    None,
    &GENERAL_CI_HANDLER,
);

pub static UTF32_NOPAD_BIN: CollationInfo = build(
    Def { number: nopad_id(61), name: "utf32_nopad_bin", state: nopad(UNI_BIN), ..UTF32_BIN_DEF },
    &CHARSET_UTF32,
    None,
    None,
    &UNICODE_BIN_HANDLER,
);

pub static UTF32_UNICODE_NOPAD_CI: CollationInfo = build(
    Def { number: nopad_id(160), name: "utf32_unicode_nopad_ci", state: nopad(UNI_UCA), ..UTF32_UCA },
    &CHARSET_UTF32,
    None,
    Some(&UCA400),
    &UCA_HANDLER,
);

// === Index ===

/// Every compiled collation, in id order within each charset.
pub static ALL_COLLATIONS: [&CollationInfo; 57] = [
    &BINARY,
    &LATIN1_SWEDISH_CI,
    &LATIN1_BIN,
    &LATIN1_SWEDISH_NOPAD_CI,
    &LATIN1_NOPAD_BIN,
    &ASCII_GENERAL_CI,
    &ASCII_BIN,
    &ASCII_GENERAL_NOPAD_CI,
    &ASCII_NOPAD_BIN,
    &UTF8MB3_GENERAL_CI,
    &UTF8MB3_BIN,
    &UTF8MB3_UNICODE_CI,
    &UTF8MB3_CZECH_CI,
    &UTF8MB3_UNICODE_520_CI,
    &UTF8MB3_GENERAL_NOPAD_CI,
    &UTF8MB3_NOPAD_BIN,
    &UTF8MB3_UNICODE_NOPAD_CI,
    &UTF8MB3_UNICODE_520_NOPAD_CI,
    &UTF8MB4_GENERAL_CI,
    &UTF8MB4_BIN,
    &UTF8MB4_UNICODE_CI,
    &UTF8MB4_CZECH_CI,
    &UTF8MB4_DANISH_CI,
    &UTF8MB4_SPANISH2_CI,
    &UTF8MB4_UNICODE_520_CI,
    &UTF8MB4_GENERAL_NOPAD_CI,
    &UTF8MB4_NOPAD_BIN,
    &UTF8MB4_UNICODE_NOPAD_CI,
    &UTF8MB4_UNICODE_520_NOPAD_CI,
    &UTF8MB4_UCA1400_AI_CI,
    &UTF8MB4_UCA1400_AS_CI,
    &UTF8MB4_UCA1400_AS_CS,
    &UTF8MB4_UCA1400_NOPAD_AI_CI,
    &UTF8MB4_UCA1400_NOPAD_AS_CI,
    &UTF8MB4_UCA1400_NOPAD_AS_CS,
    &UCS2_GENERAL_CI,
    &UCS2_BIN,
    &UCS2_UNICODE_CI,
    &UCS2_GENERAL_NOPAD_CI,
    &UCS2_NOPAD_BIN,
    &UCS2_UNICODE_NOPAD_CI,
    &UTF16_GENERAL_CI,
    &UTF16_BIN,
    &UTF16_UNICODE_CI,
    &UTF16_GENERAL_NOPAD_CI,
    &UTF16_NOPAD_BIN,
    &UTF16_UNICODE_NOPAD_CI,
    &UTF16LE_GENERAL_CI,
    &UTF16LE_BIN,
    &UTF16LE_GENERAL_NOPAD_CI,
    &UTF16LE_NOPAD_BIN,
    &UTF32_GENERAL_CI,
    &UTF32_BIN,
    &UTF32_UNICODE_CI,
    &UTF32_GENERAL_NOPAD_CI,
    &UTF32_NOPAD_BIN,
    &UTF32_UNICODE_NOPAD_CI,
];
