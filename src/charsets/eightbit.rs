// charsets/eightbit.rs - Table-driven 8-bit codec
// Shared by every single-byte charset that carries a to-Unicode table.

use crate::charset::{lengthsp_8bit, CharsetHandler, CharsetInfo, CopyStatus, WellFormedStatus};
use crate::ctype::WcT;
use crate::error::ConvError;

pub struct EightBitHandler;

pub static EIGHTBIT_HANDLER: EightBitHandler = EightBitHandler;

/// Looks up the byte for `wc` in a charset's reverse map.
fn from_uni(cs: &CharsetInfo, wc: WcT) -> Option<u8> {
    if let Some(to_uni) = cs.tab_to_uni {
        if wc < 256 && to_uni[wc as usize] as WcT == wc {
            return Some(wc as u8);
        }
    }
    cs.tab_from_uni
        .binary_search_by_key(&wc, |&(u, _)| u as WcT)
        .ok()
        .map(|i| cs.tab_from_uni[i].1)
}

impl CharsetHandler for EightBitHandler {
    fn mb_wc(&self, cs: &CharsetInfo, s: &[u8]) -> Result<(WcT, usize), ConvError> {
        let &b = s.first().ok_or(ConvError::NeedMoreBytes(1))?;
        let wc = match cs.tab_to_uni {
            Some(t) => t[b as usize] as WcT,
            None => b as WcT,
        };
        if wc == 0 && b != 0 {
            return Err(ConvError::IllegalSequence);
        }
        Ok((wc, 1))
    }

    fn wc_mb(&self, cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        if out.is_empty() {
            return Err(ConvError::NeedMoreBytes(1));
        }
        let b = from_uni(cs, wc).ok_or(ConvError::Unencodable)?;
        out[0] = b;
        Ok(1)
    }

    fn charlen(&self, cs: &CharsetInfo, s: &[u8]) -> Result<usize, ConvError> {
        self.mb_wc(cs, s).map(|_| 1)
    }

    fn numchars(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        s.len()
    }

    fn charpos(&self, _cs: &CharsetInfo, _s: &[u8], pos: usize) -> usize {
        pos
    }

    fn lengthsp(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        lengthsp_8bit(s)
    }

    fn well_formed_char_length(&self, _cs: &CharsetInfo, s: &[u8], nchars: usize) -> (usize, WellFormedStatus) {
        let n = s.len().min(nchars);
        (n, WellFormedStatus { nchars: n, error_pos: None })
    }

    fn copy_fix(&self, _cs: &CharsetInfo, dst: &mut [u8], src: &[u8], nchars: usize) -> (usize, CopyStatus) {
        let n = src.len().min(dst.len()).min(nchars);
        dst[..n].copy_from_slice(&src[..n]);
        (n, CopyStatus { source_end_pos: n, ..CopyStatus::default() })
    }

    fn caseup(&self, cs: &CharsetInfo, src: &[u8], dst: &mut [u8]) -> usize {
        map_bytes(cs.to_upper, src, dst)
    }

    fn casedn(&self, cs: &CharsetInfo, src: &[u8], dst: &mut [u8]) -> usize {
        map_bytes(cs.to_lower, src, dst)
    }

    fn fill(&self, cs: &CharsetInfo, dst: &mut [u8], wc: WcT) {
        dst.fill(from_uni(cs, wc).unwrap_or(0));
    }

    fn scan_spaces(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        s.iter().take_while(|&&b| b == b' ').count()
    }

    fn ctype(&self, cs: &CharsetInfo, s: &[u8]) -> (u8, usize) {
        match (s.first(), cs.ctype) {
            (Some(&b), Some(t)) => (t[b as usize], 1),
            (Some(_), None) => (0, 1),
            (None, _) => (0, 0),
        }
    }

    fn native_to_mb(&self, _cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        if out.is_empty() {
            return Err(ConvError::NeedMoreBytes(1));
        }
        if wc > 0xFF {
            return Err(ConvError::Unencodable);
        }
        out[0] = wc as u8;
        Ok(1)
    }
}

fn map_bytes(table: Option<&'static [u8; 256]>, src: &[u8], dst: &mut [u8]) -> usize {
    let n = src.len().min(dst.len());
    match table {
        Some(t) => {
            for (d, &s) in dst[..n].iter_mut().zip(&src[..n]) {
                *d = t[s as usize];
            }
        }
        None => dst[..n].copy_from_slice(&src[..n]),
    }
    n
}

#[cfg(test)]
mod tests {
    use crate::charsets::{CHARSET_ASCII, CHARSET_LATIN1};
    use crate::ctype::{CTYPE_NMR, CTYPE_U};

    #[test]
    fn case_mapping_latin1() {
        let mut dst = [0u8; 8];
        let n = CHARSET_LATIN1.caseup(b"abc\xE9\xFF", &mut dst);
        assert_eq!(&dst[..n], b"ABC\xC9\xFF");
        let n = CHARSET_LATIN1.casedn(b"\xC0Z", &mut dst);
        assert_eq!(&dst[..n], b"\xE0z");
    }

    #[test]
    fn case_mapping_truncates_to_dst() {
        let mut dst = [0u8; 2];
        assert_eq!(CHARSET_ASCII.caseup(b"abc", &mut dst), 2);
        assert_eq!(&dst, b"AB");
    }

    #[test]
    fn ctype_lookup() {
        let h = CHARSET_LATIN1.handler;
        assert_eq!(h.ctype(&CHARSET_LATIN1, b"7").0 & CTYPE_NMR, CTYPE_NMR);
        assert_eq!(h.ctype(&CHARSET_LATIN1, b"\xC9").0 & CTYPE_U, CTYPE_U);
        assert_eq!(h.ctype(&CHARSET_LATIN1, b""), (0, 0));
    }

    #[test]
    fn charpos_is_identity() {
        assert_eq!(CHARSET_LATIN1.charpos(b"abc", 2), 2);
        assert_eq!(CHARSET_LATIN1.charpos(b"abc", 7), 7);
        assert_eq!(CHARSET_LATIN1.numchars(b"abc"), 3);
    }
}
