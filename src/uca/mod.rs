// uca/mod.rs - Unicode Collation Algorithm weight tables
//
// A `UcaInfo` holds one `UcaWeightLevel` per comparison level. Each level
// maps a code point through a sparse page table to a short weight string,
// and carries the contraction list used for multi-character units.
//
// | Module        | Purpose                                          |
// |---------------|--------------------------------------------------|
// | [`implicit`]  | Implicit weights for characters without entries  |
// | [`ducet`]     | Built-in base collation elements                 |
// | [`scanner`]   | Weight iteration over an encoded string          |
// | [`rules`]     | Tailoring rule parser                            |
// | [`tailoring`] | Applies parsed rules to a base table             |

pub mod ducet;
pub mod implicit;
pub mod rules;
pub mod scanner;
pub mod tailoring;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use smallvec::SmallVec;

use crate::ctype::{WcT, MAX_BMP, MAX_UNICODE};
use ducet::{Ce, CeTable, BASE_CE_TABLE};

// === Limits ===
pub const UCA_LEVELS: usize = 3;
pub const MAX_CONTRACTION_LENGTH: usize = 6;
pub const MAX_CONTRACTION_WEIGHTS: usize = 16;
pub const MAX_CHAR_WEIGHTS: usize = 8;

/// Weight used for a malformed byte sequence.
pub const WEIGHT_ILSEQ: u16 = 0xFFFF;
/// Weight of supplementary characters in tables limited to the BMP.
pub const WEIGHT_OUT_OF_RANGE: u16 = 0xFFFD;

// === Contraction flags ===
const CNT_FLAGS_SIZE: usize = 4096;
const CNT_FLAGS_MASK: WcT = 0xFFF;
const CNT_HEAD: u8 = 1;
const CNT_TAIL: u8 = 2;
const CNT_MID1: u8 = 4;
const PREVIOUS_CONTEXT_HEAD: u8 = 64;
const PREVIOUS_CONTEXT_TAIL: u8 = 128;

// === Versions ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UcaVersion {
    V400,
    V520,
    V1400,
}

impl UcaVersion {
    pub fn maxchar(self) -> WcT {
        match self {
            UcaVersion::V400 => MAX_BMP,
            UcaVersion::V520 | UcaVersion::V1400 => MAX_UNICODE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UcaVersion::V400 => "4.0.0",
            UcaVersion::V520 => "5.2.0",
            UcaVersion::V1400 => "14.0.0",
        }
    }

    pub fn from_name(name: &str) -> Option<UcaVersion> {
        match name {
            "4.0.0" => Some(UcaVersion::V400),
            "5.2.0" => Some(UcaVersion::V520),
            "14.0.0" => Some(UcaVersion::V1400),
            _ => None,
        }
    }

    /// The compiled base table for this version.
    pub fn base(self) -> &'static UcaInfo {
        self.table()
    }

    /// The lazily compiled base table, as referenced by descriptors.
    pub fn table(self) -> &'static Lazy<UcaInfo> {
        match self {
            UcaVersion::V400 => &UCA400,
            UcaVersion::V520 => &UCA520,
            UcaVersion::V1400 => &UCA1400,
        }
    }
}

pub static UCA400: Lazy<UcaInfo> = Lazy::new(|| UcaInfo::compile(&BASE_CE_TABLE, UcaVersion::V400));
pub static UCA520: Lazy<UcaInfo> = Lazy::new(|| UcaInfo::compile(&BASE_CE_TABLE, UcaVersion::V520));
pub static UCA1400: Lazy<UcaInfo> = Lazy::new(|| UcaInfo::compile(&BASE_CE_TABLE, UcaVersion::V1400));

// === Contractions ===

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contraction {
    pub chars: SmallVec<[WcT; MAX_CONTRACTION_LENGTH]>,
    pub weights: SmallVec<[u16; 8]>,
    /// `chars[1]` preceded by `chars[0]`, rather than a two-character unit.
    pub with_context: bool,
}

/// Contraction list of one level, with quick-reject flags indexed by the
/// low 12 bits of a code point.
#[derive(Debug, Clone, Default)]
pub struct Contractions {
    items: Vec<Contraction>,
    flags: Box<[u8]>,
}

impl Contractions {
    pub fn new(items: Vec<Contraction>) -> Contractions {
        if items.is_empty() {
            return Contractions::default();
        }
        let mut flags = vec![0u8; CNT_FLAGS_SIZE].into_boxed_slice();
        for c in &items {
            let idx = |wc: WcT| (wc & CNT_FLAGS_MASK) as usize;
            if c.with_context {
                flags[idx(c.chars[0])] |= PREVIOUS_CONTEXT_HEAD;
                flags[idx(c.chars[1])] |= PREVIOUS_CONTEXT_TAIL;
                continue;
            }
            let last = c.chars.len() - 1;
            flags[idx(c.chars[0])] |= CNT_HEAD;
            flags[idx(c.chars[last])] |= CNT_TAIL;
            for (i, &wc) in c.chars[1..last].iter().enumerate() {
                flags[idx(wc)] |= CNT_MID1 << i;
            }
        }
        Contractions { items, flags }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contraction> {
        self.items.iter()
    }

    #[inline]
    fn flag(&self, wc: WcT) -> u8 {
        if self.flags.is_empty() {
            0
        } else {
            self.flags[(wc & CNT_FLAGS_MASK) as usize]
        }
    }

    #[inline]
    pub fn can_be_head(&self, wc: WcT) -> bool {
        self.flag(wc) & CNT_HEAD != 0
    }

    #[inline]
    pub fn can_be_tail(&self, wc: WcT) -> bool {
        self.flag(wc) & CNT_TAIL != 0
    }

    /// Can `wc` appear at 0-based position `pos` strictly inside a
    /// contraction?
    #[inline]
    pub fn can_be_mid(&self, wc: WcT, pos: usize) -> bool {
        pos >= 1 && pos <= 4 && self.flag(wc) & (CNT_MID1 << (pos - 1)) != 0
    }

    #[inline]
    pub fn can_be_previous_context_head(&self, wc: WcT) -> bool {
        self.flag(wc) & PREVIOUS_CONTEXT_HEAD != 0
    }

    #[inline]
    pub fn can_be_previous_context_tail(&self, wc: WcT) -> bool {
        self.flag(wc) & PREVIOUS_CONTEXT_TAIL != 0
    }

    pub fn find(&self, chars: &[WcT]) -> Option<&Contraction> {
        self.items.iter().find(|c| !c.with_context && c.chars.as_slice() == chars)
    }

    pub fn find_with_context(&self, prev: WcT, wc: WcT) -> Option<&Contraction> {
        self.items
            .iter()
            .find(|c| c.with_context && c.chars[0] == prev && c.chars[1] == wc)
    }

    /// Weights of the two-character contraction `wc1 wc2`.
    pub fn contraction2_weight(&self, wc1: WcT, wc2: WcT) -> Option<&[u16]> {
        self.find(&[wc1, wc2]).map(|c| c.weights.as_slice())
    }
}

// === Weight levels ===

#[derive(Debug, Clone)]
struct WeightPage {
    stride: usize,
    lengths: Box<[u8]>,
    data: Box<[u16]>,
}

#[derive(Debug, Clone)]
pub struct UcaWeightLevel {
    pub maxchar: WcT,
    pub levelno: usize,
    pages: Vec<Option<WeightPage>>,
    pub contractions: Contractions,
}

impl UcaWeightLevel {
    /// Weight string of `wc`. `None` when its page is absent or `wc` is
    /// beyond `maxchar`; an empty slice marks an ignorable character.
    #[inline]
    pub fn weights(&self, wc: WcT) -> Option<&[u16]> {
        if wc > self.maxchar {
            return None;
        }
        let page = self.pages.get((wc >> 8) as usize)?.as_ref()?;
        let i = (wc & 0xFF) as usize;
        let off = i * page.stride;
        Some(&page.data[off..off + page.lengths[i] as usize])
    }

    pub fn has_page(&self, pageno: usize) -> bool {
        matches!(self.pages.get(pageno), Some(Some(_)))
    }
}

// === Logical positions ===

/// Characters at the logical reset positions of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicalPositions {
    pub first_non_ignorable: Option<WcT>,
    pub last_non_ignorable: Option<WcT>,
    pub first_primary_ignorable: Option<WcT>,
    pub last_primary_ignorable: Option<WcT>,
    pub first_secondary_ignorable: Option<WcT>,
    pub last_secondary_ignorable: Option<WcT>,
    pub first_tertiary_ignorable: Option<WcT>,
    pub last_tertiary_ignorable: Option<WcT>,
    pub first_trailing: Option<WcT>,
    pub last_trailing: Option<WcT>,
    pub first_variable: Option<WcT>,
    pub last_variable: Option<WcT>,
}

// === UcaInfo ===

#[derive(Debug, Clone)]
pub struct UcaInfo {
    pub version: UcaVersion,
    pub levels: Vec<UcaWeightLevel>,
    pub positions: LogicalPositions,
    space_weights: [u16; UCA_LEVELS],
}

impl UcaInfo {
    /// Compiles collation elements into per-level page tables.
    pub fn compile(table: &CeTable, version: UcaVersion) -> UcaInfo {
        let maxchar = version.maxchar();
        let npages = (maxchar as usize >> 8) + 1;

        // Group table entries by page.
        let mut by_page: BTreeMap<usize, Vec<(WcT, &[Ce])>> = BTreeMap::new();
        for (&wc, ces) in table.chars.iter().filter(|&(&wc, _)| wc <= maxchar) {
            by_page.entry((wc >> 8) as usize).or_default().push((wc, ces.as_slice()));
        }

        let mut levels = Vec::with_capacity(UCA_LEVELS);
        for level in 0..UCA_LEVELS {
            let mut pages: Vec<Option<WeightPage>> = vec![None; npages];
            for (&pageno, entries) in &by_page {
                pages[pageno] = Some(compile_page(pageno, entries, level, version));
            }
            let contractions = table
                .contractions
                .iter()
                .filter(|c| c.chars.iter().all(|&wc| wc <= maxchar))
                .map(|c| Contraction {
                    chars: c.chars.clone(),
                    weights: level_weights(&c.ces, level).collect(),
                    with_context: c.with_context,
                })
                .collect();
            levels.push(UcaWeightLevel {
                maxchar,
                levelno: level,
                pages,
                contractions: Contractions::new(contractions),
            });
        }

        let mut space_weights = [0u16; UCA_LEVELS];
        for (level, w) in space_weights.iter_mut().enumerate() {
            *w = levels[level].weights(0x20).and_then(|s| s.first().copied()).unwrap_or(0x20);
        }

        UcaInfo { version, levels, positions: table.positions(), space_weights }
    }

    /// Level `i`, clamped to the deepest level present.
    #[inline]
    pub fn level(&self, i: usize) -> &UcaWeightLevel {
        &self.levels[i.min(self.levels.len() - 1)]
    }

    #[inline]
    pub fn maxchar(&self) -> WcT {
        self.levels[0].maxchar
    }

    /// Weight of U+0020 at `level`.
    #[inline]
    pub fn space_weight(&self, level: usize) -> u16 {
        self.space_weights[level.min(UCA_LEVELS - 1)]
    }

    pub fn has_contractions(&self) -> bool {
        !self.levels[0].contractions.is_empty()
    }
}

/// Non-zero weights of a CE sequence at one level.
pub(crate) fn level_weights(ces: &[Ce], level: usize) -> impl Iterator<Item = u16> + '_ {
    ces.iter().map(move |ce| ce.0[level]).filter(|&w| w != 0)
}

fn compile_page(pageno: usize, entries: &[(WcT, &[Ce])], level: usize, version: UcaVersion) -> WeightPage {
    let mut strings: Vec<SmallVec<[u16; 8]>> = (0..256u32)
        .map(|i| {
            let mut implicit = [0u16; 2];
            let n = implicit::implicit_weights(version, level, ((pageno as WcT) << 8) | i, &mut implicit);
            SmallVec::from_slice(&implicit[..n])
        })
        .collect();
    for &(wc, ces) in entries {
        let mut w: SmallVec<[u16; 8]> = level_weights(ces, level).collect();
        w.truncate(MAX_CHAR_WEIGHTS);
        strings[(wc & 0xFF) as usize] = w;
    }
    let stride = strings.iter().map(|s| s.len()).max().unwrap_or(0) + 1;
    let mut data = vec![0u16; 256 * stride].into_boxed_slice();
    let mut lengths = vec![0u8; 256].into_boxed_slice();
    for (i, s) in strings.iter().enumerate() {
        data[i * stride..i * stride + s.len()].copy_from_slice(s);
        lengths[i] = s.len() as u8;
    }
    WeightPage { stride, lengths, data }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions() {
        assert_eq!(UcaVersion::from_name("5.2.0"), Some(UcaVersion::V520));
        assert_eq!(UcaVersion::V400.maxchar(), 0xFFFF);
        assert_eq!(UcaVersion::V1400.name(), "14.0.0");
        assert!(UcaVersion::from_name("9.0.0").is_none());
    }

    #[test]
    fn page_lookup() {
        let uca = &*UCA520;
        let l0 = uca.level(0);
        let a = l0.weights('a' as WcT).map(|w| w.to_vec());
        let upper_a = l0.weights('A' as WcT).map(|w| w.to_vec());
        assert!(a.is_some());
        assert_eq!(a, upper_a);
        // Controls are ignorable, not missing.
        assert_eq!(l0.weights(0x01), Some(&[][..]));
        // CJK has no page and is weighted implicitly.
        assert!(l0.weights(0x4E00).is_none());
    }

    #[test]
    fn gaps_in_present_pages_hold_implicit_weights() {
        let l0 = UCA520.level(0);
        assert!(l0.has_page(0x03));
        assert_eq!(l0.weights(0x0378), Some(&[0xFBC0, 0x8378][..]));
    }

    #[test]
    fn bmp_table_stops_at_maxchar() {
        assert!(UCA400.level(0).weights(0x1F600).is_none());
        assert_eq!(UCA400.maxchar(), 0xFFFF);
        assert_eq!(UCA1400.maxchar(), 0x10FFFF);
    }

    #[test]
    fn space_weights() {
        let uca = &*UCA400;
        assert_eq!(uca.space_weight(1), 0x0020);
        assert_eq!(uca.space_weight(2), 0x0002);
        assert_eq!(Some(&[uca.space_weight(0)][..]), uca.level(0).weights(0x20));
    }

    #[test]
    fn contraction_flags() {
        let items = vec![
            Contraction {
                chars: SmallVec::from_slice(&[0x63, 0x68]),
                weights: SmallVec::from_slice(&[0x1234]),
                with_context: false,
            },
            Contraction {
                chars: SmallVec::from_slice(&[0x6C, 0xB7]),
                weights: SmallVec::from_slice(&[0x2222]),
                with_context: true,
            },
        ];
        let c = Contractions::new(items);
        assert!(c.can_be_head(0x63));
        assert!(c.can_be_tail(0x68));
        assert!(!c.can_be_head(0x68));
        assert!(c.can_be_previous_context_head(0x6C));
        assert!(c.can_be_previous_context_tail(0xB7));
        assert_eq!(c.contraction2_weight(0x63, 0x68), Some(&[0x1234][..]));
        assert!(c.find_with_context(0x6C, 0xB7).is_some());
        assert!(c.find(&[0x6C, 0xB7]).is_none());
    }
}
