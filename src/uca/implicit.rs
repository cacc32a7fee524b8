// uca/implicit.rs - Implicit weights
// Characters without table entries get a two-weight primary [AAAA][BBBB]
// computed from their block. The block boundaries differ between the
// 5.2.0-era and 14.0.0-era tables and must stay bit-for-bit stable since
// stored sort keys depend on them.

use crate::ctype::WcT;
use crate::uca::UcaVersion;

pub const IMPLICIT_SECONDARY: u16 = 0x0020;
pub const IMPLICIT_TERTIARY: u16 = 0x0002;
pub const IMPLICIT_QUATERNARY: u16 = 0x0001;

const BASE_CORE_HAN: u16 = 0xFB40;
const BASE_OTHER_HAN: u16 = 0xFB80;
const BASE_UNASSIGNED: u16 = 0xFBC0;
const BASE_TANGUT: u16 = 0xFB00;
const BASE_NUSHU: u16 = 0xFB01;
const BASE_KHITAN: u16 = 0xFB02;

/// CJK compatibility ideographs that sort with the core Han block.
static HAN_COMPAT: [WcT; 12] = [
    0xFA0E, 0xFA0F, 0xFA11, 0xFA13, 0xFA14, 0xFA1F, 0xFA21, 0xFA23, 0xFA24, 0xFA27, 0xFA28, 0xFA29,
];

// === 5.2.0 ===

fn is_core_han_520(wc: WcT) -> bool {
    (0x4E00..=0x9FCB).contains(&wc) || HAN_COMPAT.contains(&wc)
}

fn is_other_han_520(wc: WcT) -> bool {
    matches!(wc,
        0x3400..=0x4DB5
        | 0x20000..=0x2A6D6
        | 0x2A700..=0x2B734
        | 0x2B740..=0x2B81D)
}

#[inline]
fn split(base: u16, wc: WcT) -> [u16; 2] {
    [base + (wc >> 15) as u16, ((wc & 0x7FFF) | 0x8000) as u16]
}

/// Primary implicit weights in the 4.0.0/5.2.0 scheme.
pub fn implicit_primary_520(wc: WcT) -> [u16; 2] {
    let base = if is_core_han_520(wc) {
        BASE_CORE_HAN
    } else if is_other_han_520(wc) {
        BASE_OTHER_HAN
    } else {
        BASE_UNASSIGNED
    };
    split(base, wc)
}

// === 14.0.0 ===

fn is_core_han_1400(wc: WcT) -> bool {
    (0x4E00..=0x9FFF).contains(&wc) || HAN_COMPAT.contains(&wc)
}

fn is_other_han_1400(wc: WcT) -> bool {
    matches!(wc,
        0x3400..=0x4DBF
        | 0x20000..=0x2A6DF
        | 0x2A700..=0x2B738
        | 0x2B740..=0x2B81D
        | 0x2B820..=0x2CEA1
        | 0x2CEB0..=0x2EBE0
        | 0x30000..=0x3134A)
}

fn is_tangut(wc: WcT) -> bool {
    matches!(wc, 0x17000..=0x187F7 | 0x18800..=0x18AFF | 0x18D00..=0x18D08)
}

fn is_nushu(wc: WcT) -> bool {
    (0x1B170..=0x1B2FB).contains(&wc)
}

fn is_khitan(wc: WcT) -> bool {
    (0x18B00..=0x18CD5).contains(&wc)
}

/// Primary implicit weights in the 14.0.0 scheme.
pub fn implicit_primary_1400(wc: WcT) -> [u16; 2] {
    if is_tangut(wc) {
        return [BASE_TANGUT, ((wc - 0x17000) | 0x8000) as u16];
    }
    if is_nushu(wc) {
        return [BASE_NUSHU, ((wc - 0x1B170) | 0x8000) as u16];
    }
    if is_khitan(wc) {
        return [BASE_KHITAN, ((wc - 0x18B00) | 0x8000) as u16];
    }
    let base = if is_core_han_1400(wc) {
        BASE_CORE_HAN
    } else if is_other_han_1400(wc) {
        BASE_OTHER_HAN
    } else {
        BASE_UNASSIGNED
    };
    split(base, wc)
}

/// Implicit weights of `wc` at `level` (0-based). Writes into `out` and
/// returns the number of weights.
pub fn implicit_weights(version: UcaVersion, level: usize, wc: WcT, out: &mut [u16; 2]) -> usize {
    match level {
        0 => {
            *out = match version {
                UcaVersion::V400 | UcaVersion::V520 => implicit_primary_520(wc),
                UcaVersion::V1400 => implicit_primary_1400(wc),
            };
            2
        }
        1 => {
            out[0] = IMPLICIT_SECONDARY;
            1
        }
        2 => {
            out[0] = IMPLICIT_TERTIARY;
            1
        }
        _ => {
            out[0] = IMPLICIT_QUATERNARY;
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_han() {
        assert_eq!(implicit_primary_520(0x4E00), [0xFB40, 0xCE00]);
        assert_eq!(implicit_primary_1400(0x4E00), [0xFB40, 0xCE00]);
        assert_eq!(implicit_primary_520(0xFA0E), [0xFB41, 0xFA0E]);
    }

    #[test]
    fn era_boundaries_differ() {
        // U+9FCC joined the core block after 5.2.0.
        assert_eq!(implicit_primary_520(0x9FCC), [0xFBC1, 0x9FCC]);
        assert_eq!(implicit_primary_1400(0x9FCC), [0xFB41, 0x9FCC]);
        assert_eq!(implicit_primary_520(0x4DB6)[0], 0xFBC0);
        assert_eq!(implicit_primary_1400(0x4DB6)[0], 0xFB80);
    }

    #[test]
    fn other_han_and_unassigned() {
        assert_eq!(implicit_primary_520(0x20000), [0xFB84, 0x8000]);
        assert_eq!(implicit_primary_520(0x3400), [0xFB80, 0xB400]);
        assert_eq!(implicit_primary_520(0x0378), [0xFBC0, 0x8378]);
        assert_eq!(implicit_primary_1400(0x1F600), [0xFBC3, 0xF600]);
    }

    #[test]
    fn block_specific_scripts() {
        assert_eq!(implicit_primary_1400(0x17000), [0xFB00, 0x8000]);
        assert_eq!(implicit_primary_1400(0x18D00), [0xFB00, 0x9D00]);
        assert_eq!(implicit_primary_1400(0x1B170), [0xFB01, 0x8000]);
        assert_eq!(implicit_primary_1400(0x18B05), [0xFB02, 0x8005]);
        // Tangut is ordinary unassigned in the 5.2.0 scheme.
        assert_eq!(implicit_primary_520(0x17000), [0xFBC2, 0xF000]);
    }

    #[test]
    fn lower_levels_are_constant() {
        let mut out = [0u16; 2];
        assert_eq!(implicit_weights(UcaVersion::V520, 1, 0x4E00, &mut out), 1);
        assert_eq!(out[0], IMPLICIT_SECONDARY);
        assert_eq!(implicit_weights(UcaVersion::V1400, 2, 0x4E00, &mut out), 1);
        assert_eq!(out[0], IMPLICIT_TERTIARY);
        assert_eq!(implicit_weights(UcaVersion::V1400, 3, 0x4E00, &mut out), 1);
        assert_eq!(out[0], IMPLICIT_QUATERNARY);
    }
}
