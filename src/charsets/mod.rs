// charsets/mod.rs - Compiled charsets
// One module per encoding family.

pub mod ascii;
pub mod binary;
pub mod eightbit;
pub mod latin1;
pub mod ucs2;
pub mod utf16;
pub mod utf32;
pub mod utf8;

use crate::charset::CharsetInfo;

pub use ascii::CHARSET_ASCII;
pub use binary::CHARSET_BINARY;
pub use latin1::CHARSET_LATIN1;
pub use ucs2::CHARSET_UCS2;
pub use utf16::{CHARSET_UTF16, CHARSET_UTF16LE};
pub use utf32::CHARSET_UTF32;
pub use utf8::{CHARSET_UTF8MB3, CHARSET_UTF8MB4};

/// Every compiled charset, in registration order.
pub static ALL_CHARSETS: [&CharsetInfo; 9] = [
    &CHARSET_BINARY,
    &CHARSET_LATIN1,
    &CHARSET_ASCII,
    &CHARSET_UTF8MB3,
    &CHARSET_UTF8MB4,
    &CHARSET_UCS2,
    &CHARSET_UTF16,
    &CHARSET_UTF16LE,
    &CHARSET_UTF32,
];

/// Finds a compiled charset by name. `utf8` is accepted as an alias of
/// `utf8mb3`.
pub fn find_charset(name: &str) -> Option<&'static CharsetInfo> {
    let name = if name.eq_ignore_ascii_case("utf8") { "utf8mb3" } else { name };
    ALL_CHARSETS.iter().copied().find(|cs| cs.name.eq_ignore_ascii_case(name))
}
