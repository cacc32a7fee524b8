// prelude.rs - Convenient re-exports for the owned-buffer API.
//
//! # Prelude
//!
//! ```
//! use ferrocoll::prelude::*;
//!
//! let registry = Registry::init(RegistryConfig::new()).unwrap();
//! let coll = registry.get_default();
//! assert_eq!(coll.name, "utf8mb4_general_ci");
//! assert!(Collation::new(coll).equals(b"Straat", b"STRAAT"));
//! ```

pub use crate::api::{decode_to_string, encode_str, Collation, LikeBounds};
pub use crate::charset::CharsetInfo;
pub use crate::collation::CollationInfo;
pub use crate::ctype::{LikePattern, StrxfrmFlags};
pub use crate::error::{CollationError, ConvError};
pub use crate::registry::{CollationDefinition, Registry, RegistryConfig};
pub use crate::uca::UcaVersion;
