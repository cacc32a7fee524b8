// uca/ducet.rs - Built-in base collation elements
//
// A compact default element table covering controls, whitespace,
// punctuation, digits, Latin, Greek, Cyrillic, combining diacritics and
// fullwidth ASCII. Everything else is weighted implicitly.
//
// Weight layout, per level:
//   primary    0x0201..0x0DFF variable (whitespace, punctuation, symbols)
//              0x0E00..       digits, then letters, with gaps for tailoring
//              0xFFFD         trailing
//   secondary  0x0020 common, 0x0040.. combining marks
//   tertiary   0x0002 lower, 0x0008 upper, other values for variants

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use smallvec::{smallvec, SmallVec};

use crate::ctype::WcT;
use crate::uca::{LogicalPositions, MAX_CONTRACTION_LENGTH, UCA_LEVELS};
use crate::unicase::{case_pairs, decompositions};

// === Collation elements ===

/// One collation element: primary, secondary and tertiary weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ce(pub [u16; UCA_LEVELS]);

impl Ce {
    pub const fn new(p: u16, s: u16, t: u16) -> Ce {
        Ce([p, s, t])
    }

    #[inline]
    pub fn primary(&self) -> u16 {
        self.0[0]
    }

    #[inline]
    pub fn secondary(&self) -> u16 {
        self.0[1]
    }

    #[inline]
    pub fn tertiary(&self) -> u16 {
        self.0[2]
    }
}

pub type CeSeq = SmallVec<[Ce; 4]>;

/// A contraction in element form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionDef {
    pub chars: SmallVec<[WcT; MAX_CONTRACTION_LENGTH]>,
    pub ces: CeSeq,
    pub with_context: bool,
}

/// Collation elements per code point, plus contractions. Tailoring works
/// on this form before compiling it into page tables.
#[derive(Debug, Clone, Default)]
pub struct CeTable {
    pub chars: BTreeMap<WcT, CeSeq>,
    pub contractions: Vec<ContractionDef>,
}

// === Weight layout ===
pub const PRIMARY_VARIABLE_FIRST: u16 = 0x0201;
pub const PRIMARY_VARIABLE_LAST: u16 = 0x0DFF;
pub const PRIMARY_TRAILING: u16 = 0xFFFD;
const PRIMARY_SPACE: u16 = 0x0209;
const PRIMARY_PUNCT_START: u16 = 0x0220;
const PRIMARY_PUNCT_STEP: u16 = 0x08;
const PRIMARY_DIGIT_START: u16 = 0x0E00;
const PRIMARY_DIGIT_STEP: u16 = 0x20;
const PRIMARY_LATIN_START: u16 = 0x1000;
const PRIMARY_GREEK_START: u16 = 0x2000;
const PRIMARY_CYRILLIC_START: u16 = 0x2800;
const PRIMARY_LETTER_STEP: u16 = 0x40;

pub const SECONDARY_COMMON: u16 = 0x0020;
const SECONDARY_MARK_START: u16 = 0x0040;
const SECONDARY_MARK_STEP: u16 = 2;

pub const TERTIARY_LOWER: u16 = 0x0002;
pub const TERTIARY_UPPER: u16 = 0x0008;
const TERTIARY_WIDE: u16 = 0x0003;
const TERTIARY_WIDE_UPPER: u16 = 0x0009;
const TERTIARY_COMPAT: u16 = 0x0004;
const TERTIARY_COMPAT_UPPER: u16 = 0x000A;
const TERTIARY_FINAL: u16 = 0x0005;
const TERTIARY_SUPER: u16 = 0x0014;
const TERTIARY_FRACTION: u16 = 0x001E;
const TERTIARY_NOBREAK: u16 = 0x001B;

// === Source data ===

static IGNORABLE_RANGES: &[(WcT, WcT)] = &[
    (0x0000, 0x0008),
    (0x000E, 0x001F),
    (0x007F, 0x0084),
    (0x0086, 0x009F),
    (0x00AD, 0x00AD),
    (0x200B, 0x200F),
    (0xFEFF, 0xFEFF),
];

static WHITESPACE: &[WcT] = &[0x0009, 0x000A, 0x000B, 0x000C, 0x000D, 0x0085, 0x2028, 0x2029, 0x0020];

static PUNCTUATION: &[WcT] = &[
    0x005F, 0x002D, 0x2010, 0x2013, 0x2014, 0x002C, 0x003B, 0x003A, 0x0021, 0x00A1, 0x003F, 0x00BF,
    0x002E, 0x2026, 0x00B7, 0x0027, 0x2018, 0x2019, 0x201A, 0x0022, 0x201C, 0x201D, 0x201E, 0x00AB,
    0x00BB, 0x2039, 0x203A, 0x0028, 0x0029, 0x005B, 0x005D, 0x007B, 0x007D, 0x00A7, 0x00B6, 0x0040,
    0x002A, 0x002F, 0x2044, 0x005C, 0x0026, 0x0023, 0x0025, 0x2030, 0x2020, 0x2021, 0x2022, 0x0060,
    0x00B4, 0x02DC, 0x005E, 0x02C6, 0x00A8, 0x00B8, 0x00AF, 0x00B0, 0x00A9, 0x00AE, 0x002B, 0x00B1,
    0x00F7, 0x00D7, 0x003C, 0x003D, 0x003E, 0x00AC, 0x007C, 0x00A6, 0x007E, 0x00A4, 0x00A2, 0x0024,
    0x00A3, 0x00A5, 0x20AC, 0x2122,
];

/// Lower-case Latin letters in primary order. Letters that are not
/// ASCII sit between their neighbours.
static LATIN: &[(WcT, u16)] = &[
    (0x0061, 0x00), (0x00E6, 0x20), (0x0062, 0x40), (0x0063, 0x80), (0x0064, 0xC0), (0x0111, 0xD0),
    (0x00F0, 0xE0), (0x0065, 0x100), (0x0066, 0x140), (0x0067, 0x180), (0x0068, 0x1C0), (0x0127, 0x1E0),
    (0x0069, 0x200), (0x0131, 0x220), (0x006A, 0x240), (0x006B, 0x280), (0x0138, 0x2A0), (0x006C, 0x2C0),
    (0x0140, 0x2D0), (0x0142, 0x2E0), (0x006D, 0x300), (0x006E, 0x340), (0x0149, 0x350), (0x014B, 0x360),
    (0x006F, 0x380), (0x00F8, 0x3A0), (0x0070, 0x3C0), (0x0071, 0x400), (0x0072, 0x440), (0x0073, 0x480),
    (0x0074, 0x4C0), (0x0167, 0x4E0), (0x0075, 0x500), (0x0076, 0x540), (0x0077, 0x580), (0x0078, 0x5C0),
    (0x0079, 0x600), (0x007A, 0x640), (0x00FE, 0x660),
];

static GREEK: &[WcT] = &[
    0x03B1, 0x03B2, 0x03B3, 0x03B4, 0x03B5, 0x03B6, 0x03B7, 0x03B8, 0x03B9, 0x03BA, 0x03BB, 0x03BC,
    0x03BD, 0x03BE, 0x03BF, 0x03C0, 0x03C1, 0x03C3, 0x03C4, 0x03C5, 0x03C6, 0x03C7, 0x03C8, 0x03C9,
];

static CYRILLIC: &[WcT] = &[
    0x0430, 0x0431, 0x0432, 0x0433, 0x0434, 0x0452, 0x0435, 0x0454, 0x0436, 0x0437, 0x0455, 0x0438,
    0x0456, 0x0458, 0x043A, 0x043B, 0x0459, 0x043C, 0x043D, 0x045A, 0x043E, 0x043F, 0x0440, 0x0441,
    0x0442, 0x045B, 0x0443, 0x0444, 0x0445, 0x0446, 0x0447, 0x045F, 0x0448, 0x0449, 0x044A, 0x044B,
    0x044C, 0x044D, 0x044E, 0x044F,
];

/// Combining marks in secondary order; the rest of U+0300..U+036F
/// follows in code point order.
static MARK_ORDER: &[WcT] = &[
    0x0301, 0x0300, 0x0306, 0x0302, 0x030C, 0x030A, 0x0308, 0x030B, 0x0303, 0x0307, 0x0327, 0x0328,
    0x0304,
];

// === Builder ===

pub static BASE_CE_TABLE: Lazy<CeTable> = Lazy::new(build_base_table);

fn single(p: u16, t: u16) -> CeSeq {
    smallvec![Ce::new(p, SECONDARY_COMMON, t)]
}

fn with_tertiary(ces: &CeSeq, t: u16) -> CeSeq {
    ces.iter().map(|ce| Ce::new(ce.primary(), ce.secondary(), t)).collect()
}

fn mark_secondary(mark: WcT) -> u16 {
    let idx = match MARK_ORDER.iter().position(|&m| m == mark) {
        Some(i) => i,
        None => {
            let rest = (0x0300..mark).filter(|m| !MARK_ORDER.contains(m)).count();
            MARK_ORDER.len() + rest
        }
    };
    SECONDARY_MARK_START + SECONDARY_MARK_STEP * idx as u16
}

fn build_base_table() -> CeTable {
    let mut chars: BTreeMap<WcT, CeSeq> = BTreeMap::new();

    for &(first, last) in IGNORABLE_RANGES {
        for wc in first..=last {
            chars.insert(wc, CeSeq::new());
        }
    }

    for (i, &wc) in WHITESPACE.iter().enumerate() {
        chars.insert(wc, single(PRIMARY_VARIABLE_FIRST + i as u16, TERTIARY_LOWER));
    }
    chars.insert(0x00A0, single(PRIMARY_SPACE, TERTIARY_NOBREAK));
    chars.insert(0x3000, single(PRIMARY_SPACE, TERTIARY_WIDE));
    for (i, &wc) in PUNCTUATION.iter().enumerate() {
        chars.insert(wc, single(PRIMARY_PUNCT_START + PRIMARY_PUNCT_STEP * i as u16, TERTIARY_LOWER));
    }

    for d in 0..10u16 {
        chars.insert(0x30 + d as WcT, single(PRIMARY_DIGIT_START + PRIMARY_DIGIT_STEP * d, TERTIARY_LOWER));
    }

    // Letters: lower case first, upper case through the case pairs.
    let mut letters: Vec<(WcT, u16)> = LATIN.iter().map(|&(wc, off)| (wc, PRIMARY_LATIN_START + off)).collect();
    letters.extend(GREEK.iter().enumerate().map(|(i, &wc)| (wc, PRIMARY_GREEK_START + PRIMARY_LETTER_STEP * i as u16)));
    letters.extend(
        CYRILLIC
            .iter()
            .enumerate()
            .map(|(i, &wc)| (wc, PRIMARY_CYRILLIC_START + PRIMARY_LETTER_STEP * i as u16)),
    );
    let uppers: BTreeMap<WcT, WcT> = case_pairs().map(|(u, l)| (l, u)).collect();
    for &(wc, p) in &letters {
        chars.insert(wc, single(p, TERTIARY_LOWER));
        if let Some(&upper) = uppers.get(&wc) {
            chars.insert(upper, single(p, TERTIARY_UPPER));
        }
    }

    // Variants sharing a letter's primary.
    let variant = |chars: &BTreeMap<WcT, CeSeq>, base: WcT, t: u16| chars.get(&base).map(|c| with_tertiary(c, t));
    let variants: &[(WcT, WcT, u16)] = &[
        (0x00AA, 0x61, TERTIARY_SUPER),
        (0x00BA, 0x6F, TERTIARY_SUPER),
        (0x00B9, 0x31, TERTIARY_SUPER),
        (0x00B2, 0x32, TERTIARY_SUPER),
        (0x00B3, 0x33, TERTIARY_SUPER),
        (0x017F, 0x73, TERTIARY_FINAL),
        (0x03C2, 0x03C3, TERTIARY_FINAL),
        (0x00B5, 0x03BC, TERTIARY_COMPAT),
        (0x0130, 0x49, TERTIARY_UPPER),
    ];
    for &(wc, base, t) in variants {
        if let Some(ces) = variant(&chars, base, t) {
            chars.insert(wc, ces);
        }
    }

    // Expansions.
    let expand = |chars: &BTreeMap<WcT, CeSeq>, parts: &[WcT], t: u16| -> CeSeq {
        parts.iter().filter_map(|p| chars.get(p)).flat_map(|c| with_tertiary(c, t)).collect()
    };
    let expansions: &[(WcT, &[WcT], u16)] = &[
        (0x00DF, &[0x73, 0x73], TERTIARY_COMPAT),
        (0x0153, &[0x6F, 0x65], TERTIARY_COMPAT),
        (0x0152, &[0x6F, 0x65], TERTIARY_COMPAT_UPPER),
        (0x0133, &[0x69, 0x6A], TERTIARY_COMPAT),
        (0x0132, &[0x69, 0x6A], TERTIARY_COMPAT_UPPER),
        (0x00BC, &[0x31, 0x2044, 0x34], TERTIARY_FRACTION),
        (0x00BD, &[0x31, 0x2044, 0x32], TERTIARY_FRACTION),
        (0x00BE, &[0x33, 0x2044, 0x34], TERTIARY_FRACTION),
    ];
    for &(wc, parts, t) in expansions {
        let ces = expand(&chars, parts, t);
        chars.insert(wc, ces);
    }

    for mark in 0x0300..=0x036F {
        chars.insert(mark, smallvec![Ce::new(0, mark_secondary(mark), TERTIARY_LOWER)]);
    }

    // Precomposed letters: base letter plus the mark's secondary.
    for (wc, base, mark) in decompositions() {
        if let Some(base_ces) = chars.get(&base).cloned() {
            let mut ces = base_ces;
            ces.push(Ce::new(0, mark_secondary(mark), TERTIARY_LOWER));
            chars.insert(wc, ces);
        }
    }

    // Fullwidth ASCII.
    for wc in 0xFF01..=0xFF5E {
        if let Some(ces) = chars.get(&(wc - 0xFEE0)) {
            let ces: CeSeq = ces
                .iter()
                .map(|ce| {
                    let t = if ce.tertiary() == TERTIARY_UPPER { TERTIARY_WIDE_UPPER } else { TERTIARY_WIDE };
                    Ce::new(ce.primary(), ce.secondary(), t)
                })
                .collect();
            chars.insert(wc, ces);
        }
    }

    chars.insert(0xFFFD, single(PRIMARY_TRAILING, TERTIARY_LOWER));

    CeTable { chars, contractions: Vec::new() }
}

// === Queries ===

impl CeTable {
    /// Collation elements of a character or character sequence, using
    /// contractions where one matches exactly. Characters without entries
    /// get `fallback` elements.
    pub fn lookup_seq(&self, seq: &[WcT], fallback: impl Fn(WcT) -> CeSeq) -> CeSeq {
        if seq.len() > 1 {
            if let Some(c) = self.contractions.iter().find(|c| !c.with_context && c.chars.as_slice() == seq) {
                return c.ces.clone();
            }
        }
        seq.iter()
            .flat_map(|&wc| self.chars.get(&wc).cloned().unwrap_or_else(|| fallback(wc)))
            .collect()
    }

    /// Finds the characters at the logical reset positions.
    pub fn positions(&self) -> LogicalPositions {
        #[derive(Clone, Copy)]
        enum Class {
            TertiaryIgnorable,
            SecondaryIgnorable,
            PrimaryIgnorable,
            Variable,
            Regular,
            Trailing,
        }
        fn update(first: &mut Option<(Ce, WcT)>, last: &mut Option<(Ce, WcT)>, key: Ce, wc: WcT) {
            if first.map_or(true, |(k, w)| (key, wc) < (k, w)) {
                *first = Some((key, wc));
            }
            if last.map_or(true, |(k, w)| (key, wc) > (k, w)) {
                *last = Some((key, wc));
            }
        }

        let mut slots: [(Option<(Ce, WcT)>, Option<(Ce, WcT)>); 6] = [(None, None); 6];
        for (&wc, ces) in &self.chars {
            let key = ces.first().copied().unwrap_or_default();
            let class = if ces.iter().all(|ce| *ce == Ce::default()) {
                Class::TertiaryIgnorable
            } else if key.primary() == 0 && key.secondary() == 0 {
                Class::SecondaryIgnorable
            } else if key.primary() == 0 {
                Class::PrimaryIgnorable
            } else if (PRIMARY_VARIABLE_FIRST..=PRIMARY_VARIABLE_LAST).contains(&key.primary()) {
                Class::Variable
            } else if key.primary() >= PRIMARY_TRAILING {
                Class::Trailing
            } else {
                Class::Regular
            };
            let (first, last) = &mut slots[class as usize];
            update(first, last, key, wc);
        }
        let wc = |slot: Option<(Ce, WcT)>| slot.map(|(_, wc)| wc);
        LogicalPositions {
            first_tertiary_ignorable: wc(slots[0].0),
            last_tertiary_ignorable: wc(slots[0].1),
            first_secondary_ignorable: wc(slots[1].0),
            last_secondary_ignorable: wc(slots[1].1),
            first_primary_ignorable: wc(slots[2].0),
            last_primary_ignorable: wc(slots[2].1),
            first_variable: wc(slots[3].0),
            last_variable: wc(slots[3].1),
            first_non_ignorable: wc(slots[4].0),
            last_non_ignorable: wc(slots[4].1),
            first_trailing: wc(slots[5].0),
            last_trailing: wc(slots[5].1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ces(wc: WcT) -> CeSeq {
        BASE_CE_TABLE.chars.get(&wc).cloned().unwrap_or_default()
    }

    fn primary(wc: WcT) -> u16 {
        ces(wc)[0].primary()
    }

    #[test]
    fn letter_order() {
        assert!(primary('a' as WcT) < primary('b' as WcT));
        assert!(primary('z' as WcT) < primary('α' as WcT));
        assert!(primary('ω' as WcT) < primary('а' as WcT));
        assert!(primary('9' as WcT) < primary('a' as WcT));
        assert!(primary(' ' as WcT) < primary('!' as WcT));
    }

    #[test]
    fn case_is_tertiary() {
        let a = ces('a' as WcT)[0];
        let upper = ces('A' as WcT)[0];
        assert_eq!(a.primary(), upper.primary());
        assert_eq!(a.secondary(), upper.secondary());
        assert!(a.tertiary() < upper.tertiary());
    }

    #[test]
    fn accents_are_secondary() {
        let e = ces('é' as WcT);
        assert_eq!(e.len(), 2);
        assert_eq!(e[0], ces('e' as WcT)[0]);
        assert_eq!(e[1].primary(), 0);
        assert_eq!(e[1].secondary(), mark_secondary(0x0301));
        let upper = ces('É' as WcT);
        assert_eq!(upper[0].tertiary(), TERTIARY_UPPER);
        assert_eq!(upper[1], e[1]);
    }

    #[test]
    fn sharp_s_expands() {
        let ss = ces(0xDF);
        assert_eq!(ss.len(), 2);
        assert_eq!(ss[0].primary(), primary('s' as WcT));
        assert_eq!(ss[1].primary(), primary('s' as WcT));
    }

    #[test]
    fn mark_secondaries_are_distinct() {
        let mut seen: Vec<u16> = (0x0300..=0x036F).map(mark_secondary).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 0x70);
        assert!(seen.iter().all(|&s| s > SECONDARY_COMMON && s < 0x0200));
    }

    #[test]
    fn fullwidth_is_tertiary_variant() {
        let fa = ces(0xFF41)[0];
        assert_eq!(fa.primary(), primary('a' as WcT));
        assert_eq!(fa.tertiary(), TERTIARY_WIDE);
        assert_eq!(ces(0xFF21)[0].tertiary(), TERTIARY_WIDE_UPPER);
    }

    #[test]
    fn logical_positions() {
        let pos = BASE_CE_TABLE.positions();
        assert_eq!(pos.first_tertiary_ignorable, Some(0x0000));
        assert_eq!(pos.first_variable, Some(0x0009));
        assert_eq!(pos.first_non_ignorable, Some(0x0030));
        assert_eq!(pos.first_trailing, Some(0xFFFD));
        assert_eq!(pos.first_primary_ignorable, Some(0x0301));
        assert_eq!(pos.first_secondary_ignorable, None);
    }

    #[test]
    fn lookup_seq_with_fallback() {
        let seq = BASE_CE_TABLE.lookup_seq(&['a' as WcT, 0x4E00], |_| smallvec![Ce::new(0xFB40, 0x20, 0x02)]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[1].primary(), 0xFB40);
    }
}
