// unicase/mod.rs - Unicode case-fold tables
// Sparse 256-entry pages mapping a code point to its upper case, lower
// case and `*_general_ci` sort weight. A missing page means identity.

mod data;

pub(crate) use data::{case_pairs, decompositions};

use once_cell::sync::Lazy;

use crate::ctype::{WcT, MAX_BMP, MAX_UNICODE, REPLACEMENT_CHARACTER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnicaseCharacter {
    pub toupper: WcT,
    pub tolower: WcT,
    pub sort: WcT,
}

pub struct UnicaseInfo {
    pub maxchar: WcT,
    pages: Vec<Option<Box<[UnicaseCharacter]>>>,
}

/// BMP case folding; supplementary characters sort as U+FFFD.
pub static UNICASE_DEFAULT: Lazy<UnicaseInfo> = Lazy::new(|| UnicaseInfo::build(MAX_BMP));

/// Case folding over the full range; supplementary characters sort as
/// themselves.
pub static UNICASE_520: Lazy<UnicaseInfo> = Lazy::new(|| UnicaseInfo::build(MAX_UNICODE));

impl UnicaseInfo {
    fn build(maxchar: WcT) -> UnicaseInfo {
        let mut info = UnicaseInfo { maxchar, pages: vec![None; (maxchar as usize >> 8) + 1] };
        for (upper, lower) in case_pairs() {
            info.entry(upper).tolower = lower;
            let l = info.entry(lower);
            l.toupper = upper;
            l.sort = upper;
        }
        for &(cp, base, _) in &decompositions() {
            let sort = info.toupper(base);
            info.entry(cp).sort = sort;
        }
        for sc in data::SPECIAL_CASES {
            *info.entry(sc.cp) = UnicaseCharacter { toupper: sc.upper, tolower: sc.lower, sort: sc.sort };
        }
        info
    }

    fn entry(&mut self, wc: WcT) -> &mut UnicaseCharacter {
        let pageno = (wc >> 8) as usize;
        let page = self.pages[pageno].get_or_insert_with(|| {
            (0..256u32)
                .map(|i| {
                    let c = ((pageno as WcT) << 8) | i;
                    UnicaseCharacter { toupper: c, tolower: c, sort: c }
                })
                .collect()
        });
        &mut page[(wc & 0xFF) as usize]
    }

    /// The entry for `wc`, or `None` when its page is absent.
    #[inline]
    pub fn get(&self, wc: WcT) -> Option<&UnicaseCharacter> {
        if wc > self.maxchar {
            return None;
        }
        self.pages[(wc >> 8) as usize].as_ref().map(|p| &p[(wc & 0xFF) as usize])
    }

    #[inline]
    pub fn toupper(&self, wc: WcT) -> WcT {
        self.get(wc).map_or(wc, |c| c.toupper)
    }

    #[inline]
    pub fn tolower(&self, wc: WcT) -> WcT {
        self.get(wc).map_or(wc, |c| c.tolower)
    }

    /// Case- and accent-insensitive weight.
    #[inline]
    pub fn tosort(&self, wc: WcT) -> WcT {
        if wc > self.maxchar {
            return REPLACEMENT_CHARACTER;
        }
        self.get(wc).map_or(wc, |c| c.sort)
    }
}
