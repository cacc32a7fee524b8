// unicase/data.rs - Source data for the case-fold tables
// Compact range descriptions expanded into pages at first use. The
// decomposition list is shared with the UCA base table builder.

use crate::ctype::WcT;

pub(crate) enum CaseRange {
    /// Upper-case letters `first..=last`, lower case at `+delta`.
    Offset { first: WcT, last: WcT, delta: WcT },
    /// Upper/lower pairs alternating from an upper-case `first`.
    Alternating { first: WcT, last: WcT },
    Pair { upper: WcT, lower: WcT },
}

pub(crate) static CASE_RANGES: &[CaseRange] = &[
    CaseRange::Offset { first: 0x0041, last: 0x005A, delta: 0x20 },
    CaseRange::Offset { first: 0x00C0, last: 0x00D6, delta: 0x20 },
    CaseRange::Offset { first: 0x00D8, last: 0x00DE, delta: 0x20 },
    CaseRange::Alternating { first: 0x0100, last: 0x012F },
    CaseRange::Alternating { first: 0x0132, last: 0x0137 },
    CaseRange::Alternating { first: 0x0139, last: 0x0148 },
    CaseRange::Alternating { first: 0x014A, last: 0x0177 },
    CaseRange::Pair { upper: 0x0178, lower: 0x00FF },
    CaseRange::Alternating { first: 0x0179, last: 0x017E },
    CaseRange::Pair { upper: 0x0386, lower: 0x03AC },
    CaseRange::Offset { first: 0x0388, last: 0x038A, delta: 0x25 },
    CaseRange::Pair { upper: 0x038C, lower: 0x03CC },
    CaseRange::Offset { first: 0x038E, last: 0x038F, delta: 0x3F },
    CaseRange::Offset { first: 0x0391, last: 0x03A1, delta: 0x20 },
    CaseRange::Offset { first: 0x03A3, last: 0x03AB, delta: 0x20 },
    CaseRange::Offset { first: 0x0400, last: 0x040F, delta: 0x50 },
    CaseRange::Offset { first: 0x0410, last: 0x042F, delta: 0x20 },
    CaseRange::Offset { first: 0xFF21, last: 0xFF3A, delta: 0x20 },
];

/// Characters whose mappings do not form a simple pair.
pub(crate) struct SpecialCase {
    pub cp: WcT,
    pub upper: WcT,
    pub lower: WcT,
    pub sort: WcT,
}

pub(crate) static SPECIAL_CASES: &[SpecialCase] = &[
    SpecialCase { cp: 0x00B5, upper: 0x039C, lower: 0x00B5, sort: 0x039C },
    SpecialCase { cp: 0x00DF, upper: 0x00DF, lower: 0x00DF, sort: 0x0053 },
    SpecialCase { cp: 0x0130, upper: 0x0130, lower: 0x0069, sort: 0x0049 },
    SpecialCase { cp: 0x0131, upper: 0x0049, lower: 0x0131, sort: 0x0049 },
    SpecialCase { cp: 0x017F, upper: 0x0053, lower: 0x017F, sort: 0x0053 },
    SpecialCase { cp: 0x03C2, upper: 0x03A3, lower: 0x03C2, sort: 0x03A3 },
];

/// Canonical decompositions of upper-case letters into a base letter and
/// one combining mark. Lower-case forms are derived through the case
/// pairs.
pub(crate) static DECOMPOSITIONS: &[(WcT, WcT, WcT)] = &[
    // Latin-1 Supplement
    (0x00C0, 0x41, 0x0300), (0x00C1, 0x41, 0x0301), (0x00C2, 0x41, 0x0302),
    (0x00C3, 0x41, 0x0303), (0x00C4, 0x41, 0x0308), (0x00C5, 0x41, 0x030A),
    (0x00C7, 0x43, 0x0327), (0x00C8, 0x45, 0x0300), (0x00C9, 0x45, 0x0301),
    (0x00CA, 0x45, 0x0302), (0x00CB, 0x45, 0x0308), (0x00CC, 0x49, 0x0300),
    (0x00CD, 0x49, 0x0301), (0x00CE, 0x49, 0x0302), (0x00CF, 0x49, 0x0308),
    (0x00D1, 0x4E, 0x0303), (0x00D2, 0x4F, 0x0300), (0x00D3, 0x4F, 0x0301),
    (0x00D4, 0x4F, 0x0302), (0x00D5, 0x4F, 0x0303), (0x00D6, 0x4F, 0x0308),
    (0x00D9, 0x55, 0x0300), (0x00DA, 0x55, 0x0301), (0x00DB, 0x55, 0x0302),
    (0x00DC, 0x55, 0x0308), (0x00DD, 0x59, 0x0301),
    // Latin Extended-A
    (0x0100, 0x41, 0x0304), (0x0102, 0x41, 0x0306), (0x0104, 0x41, 0x0328),
    (0x0106, 0x43, 0x0301), (0x0108, 0x43, 0x0302), (0x010A, 0x43, 0x0307),
    (0x010C, 0x43, 0x030C), (0x010E, 0x44, 0x030C), (0x0112, 0x45, 0x0304),
    (0x0114, 0x45, 0x0306), (0x0116, 0x45, 0x0307), (0x0118, 0x45, 0x0328),
    (0x011A, 0x45, 0x030C), (0x011C, 0x47, 0x0302), (0x011E, 0x47, 0x0306),
    (0x0120, 0x47, 0x0307), (0x0122, 0x47, 0x0327), (0x0124, 0x48, 0x0302),
    (0x0128, 0x49, 0x0303), (0x012A, 0x49, 0x0304), (0x012C, 0x49, 0x0306),
    (0x012E, 0x49, 0x0328), (0x0130, 0x49, 0x0307), (0x0134, 0x4A, 0x0302),
    (0x0136, 0x4B, 0x0327), (0x0139, 0x4C, 0x0301), (0x013B, 0x4C, 0x0327),
    (0x013D, 0x4C, 0x030C), (0x0143, 0x4E, 0x0301), (0x0145, 0x4E, 0x0327),
    (0x0147, 0x4E, 0x030C), (0x014C, 0x4F, 0x0304), (0x014E, 0x4F, 0x0306),
    (0x0150, 0x4F, 0x030B), (0x0154, 0x52, 0x0301), (0x0156, 0x52, 0x0327),
    (0x0158, 0x52, 0x030C), (0x015A, 0x53, 0x0301), (0x015C, 0x53, 0x0302),
    (0x015E, 0x53, 0x0327), (0x0160, 0x53, 0x030C), (0x0162, 0x54, 0x0327),
    (0x0164, 0x54, 0x030C), (0x0168, 0x55, 0x0303), (0x016A, 0x55, 0x0304),
    (0x016C, 0x55, 0x0306), (0x016E, 0x55, 0x030A), (0x0170, 0x55, 0x030B),
    (0x0172, 0x55, 0x0328), (0x0174, 0x57, 0x0302), (0x0176, 0x59, 0x0302),
    (0x0178, 0x59, 0x0308), (0x0179, 0x5A, 0x0301), (0x017B, 0x5A, 0x0307),
    (0x017D, 0x5A, 0x030C),
    // Greek
    (0x0386, 0x0391, 0x0301), (0x0388, 0x0395, 0x0301), (0x0389, 0x0397, 0x0301),
    (0x038A, 0x0399, 0x0301), (0x038C, 0x039F, 0x0301), (0x038E, 0x03A5, 0x0301),
    (0x038F, 0x03A9, 0x0301), (0x03AA, 0x0399, 0x0308), (0x03AB, 0x03A5, 0x0308),
    // Cyrillic
    (0x0400, 0x0415, 0x0300), (0x0401, 0x0415, 0x0308), (0x0403, 0x0413, 0x0301),
    (0x0407, 0x0406, 0x0308), (0x040C, 0x041A, 0x0301), (0x040D, 0x0418, 0x0300),
    (0x040E, 0x0423, 0x0306), (0x0419, 0x0418, 0x0306),
];

// === Derived iterators ===

/// Every simple (upper, lower) pair.
pub(crate) fn case_pairs() -> impl Iterator<Item = (WcT, WcT)> {
    CASE_RANGES.iter().flat_map(|r| {
        let v: Vec<(WcT, WcT)> = match *r {
            CaseRange::Offset { first, last, delta } => (first..=last).map(|u| (u, u + delta)).collect(),
            CaseRange::Alternating { first, last } => {
                (first..last).step_by(2).map(|u| (u, u + 1)).collect()
            }
            CaseRange::Pair { upper, lower } => vec![(upper, lower)],
        };
        v
    })
}

/// Lower-case partner of an upper-case letter.
fn simple_lower(upper: WcT) -> Option<WcT> {
    CASE_RANGES.iter().find_map(|r| match *r {
        CaseRange::Offset { first, last, delta } if (first..=last).contains(&upper) => Some(upper + delta),
        CaseRange::Alternating { first, last } if (first..last).contains(&upper) && (upper - first) % 2 == 0 => {
            Some(upper + 1)
        }
        CaseRange::Pair { upper: u, lower } if u == upper => Some(lower),
        _ => None,
    })
}

/// All decompositions, upper-case entries followed by their lower-case
/// counterparts.
pub(crate) fn decompositions() -> Vec<(WcT, WcT, WcT)> {
    let mut out: Vec<(WcT, WcT, WcT)> = DECOMPOSITIONS.to_vec();
    for &(cp, base, mark) in DECOMPOSITIONS {
        // U+0130 lower-cases to a plain 'i'.
        if cp == 0x0130 {
            continue;
        }
        if let (Some(lcp), Some(lbase)) = (simple_lower(cp), simple_lower(base)) {
            out.push((lcp, lbase, mark));
        }
    }
    out
}
