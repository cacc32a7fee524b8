// charsets/binary.rs - The binary pseudo-charset
// Every byte stands for itself; the pad character is 0x00.

use crate::charset::{CharsetHandler, CharsetInfo, CopyStatus, WellFormedStatus};
use crate::ctype::{CharsetState, WcT};
use crate::error::ConvError;

pub struct BinaryHandler;

pub static BINARY_HANDLER: BinaryHandler = BinaryHandler;

pub static CHARSET_BINARY: CharsetInfo = CharsetInfo {
    name: "binary",
    comment: "Binary pseudo charset",
    state: CharsetState::COMPILED
        .union(CharsetState::BINSORT)
        .union(CharsetState::PRIMARY)
        .union(CharsetState::NOPAD),
    mbminlen: 1,
    mbmaxlen: 1,
    caseup_multiply: 1,
    casedn_multiply: 1,
    pad_char: 0,
    ctype: None,
    to_lower: None,
    to_upper: None,
    tab_to_uni: None,
    tab_from_uni: &[],
    caseinfo: None,
    handler: &BINARY_HANDLER,
};

impl CharsetHandler for BinaryHandler {
    fn mb_wc(&self, _cs: &CharsetInfo, s: &[u8]) -> Result<(WcT, usize), ConvError> {
        s.first().map(|&b| (b as WcT, 1)).ok_or(ConvError::NeedMoreBytes(1))
    }

    fn wc_mb(&self, _cs: &CharsetInfo, wc: WcT, out: &mut [u8]) -> Result<usize, ConvError> {
        if out.is_empty() {
            return Err(ConvError::NeedMoreBytes(1));
        }
        if wc > 0xFF {
            return Err(ConvError::Unencodable);
        }
        out[0] = wc as u8;
        Ok(1)
    }

    fn numchars(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        s.len()
    }

    fn charpos(&self, _cs: &CharsetInfo, _s: &[u8], pos: usize) -> usize {
        pos
    }

    /// Binary strings have no pad characters to strip.
    fn lengthsp(&self, _cs: &CharsetInfo, s: &[u8]) -> usize {
        s.len()
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

    fn caseup(&self, _cs: &CharsetInfo, src: &[u8], dst: &mut [u8]) -> usize {
        let n = src.len().min(dst.len());
        dst[..n].copy_from_slice(&src[..n]);
        n
    }

    fn casedn(&self, cs: &CharsetInfo, src: &[u8], dst: &mut [u8]) -> usize {
        self.caseup(cs, src, dst)
    }

    fn fill(&self, _cs: &CharsetInfo, dst: &mut [u8], wc: WcT) {
        dst.fill(wc as u8);
    }

    fn ctype(&self, _cs: &CharsetInfo, s: &[u8]) -> (u8, usize) {
        (0, s.len().min(1))
    }
}
