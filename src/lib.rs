//! # Ferrocoll
//!
//! Pure-Rust charset codecs and collations in the MariaDB tradition:
//! 8-bit sort orders, `general_ci`, `_bin`, and the Unicode Collation
//! Algorithm with rule-based tailorings, PAD SPACE and NOPAD variants.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cmp::Ordering;
//! use ferrocoll::prelude::*;
//!
//! let registry = Registry::init(RegistryConfig::new()).unwrap();
//! let coll = registry.collation("utf8mb4_unicode_ci").unwrap();
//! assert_eq!(coll.compare("café".as_bytes(), "CAFE".as_bytes()), Ordering::Equal);
//! assert!(coll.sort_key(b"apple") < coll.sort_key(b"Banana"));
//! ```
//!
//! ## Caller-Buffer API
//!
//! Every operation is also available on [`CollationInfo`] with
//! caller-supplied buffers and the classic integer results:
//!
//! ```rust
//! use ferrocoll::compiled::LATIN1_SWEDISH_CI;
//! use ferrocoll::ctype::StrxfrmFlags;
//!
//! let cl = &LATIN1_SWEDISH_CI;
//! assert_eq!(cl.strnncollsp(b"abc", b"ABC  "), 0);
//!
//! let mut key = [0u8; 8];
//! let len = cl.strnxfrm(&mut key, 8, b"abc", StrxfrmFlags::PAD_WITH_SPACE);
//! assert_eq!(len, 8);
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ctype`] | Shared constants, flags and small types |
//! | [`error`] | `ConvError` and `CollationError` |
//! | [`charset`] | Charset descriptor and codec trait |
//! | [`charsets`] | Compiled charsets: latin1, ascii, utf8, ucs2, utf16, utf32, binary |
//! | [`unicase`] | Case-fold and `general_ci` sort tables |
//! | [`uca`] | UCA weight tables, scanner and tailoring |
//! | [`collation`] | Collation descriptor and handlers |
//! | [`compiled`] | Built-in collations |
//! | [`registry`] | Lookup by id and name, user-defined collations |
//! | [`convert`] | Charset conversion and repertoire |
//! | [`numeric`] | Number parsing over encoded strings |
//! | [`api`] | Owned-buffer helpers |
//!
//! [`CollationInfo`]: collation::CollationInfo

pub mod api;
pub mod charset;
pub mod charsets;
pub mod collation;
pub mod compiled;
pub mod convert;
pub mod ctype;
pub mod error;
pub mod numeric;
pub mod prelude;
pub mod registry;
pub mod uca;
pub mod unicase;
