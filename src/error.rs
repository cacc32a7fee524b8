// error.rs - Error types for ferrocoll.
//
// `ConvError` is the in-band codec result used on the hot path; it keeps
// the classic integer sentinel for interop. `CollationError` covers the
// cold path: registry lookups, registration and tailoring.

use std::fmt;

use crate::ctype::{CS_ILSEQ, CS_TOOSMALL};

/// Codec failure returned by `mb_wc` / `wc_mb` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvError {
    /// Malformed byte sequence.
    IllegalSequence,
    /// The code point has no encoding in the target charset.
    Unencodable,
    /// At least this many bytes of input (or output space) are required.
    NeedMoreBytes(u8),
}

impl ConvError {
    /// Classic integer form: 0 for ILSEQ/ILUNI, `-100 - n` for TOOSMALL(n).
    pub fn code(self) -> i32 {
        match self {
            ConvError::IllegalSequence | ConvError::Unencodable => CS_ILSEQ,
            ConvError::NeedMoreBytes(n) => CS_TOOSMALL + 1 - n as i32,
        }
    }

    /// Inverse of [`ConvError::code`]. Positive lengths are not errors and
    /// yield `None`. A zero code is reported as `IllegalSequence` since the
    /// integer form does not distinguish it from `Unencodable`.
    pub fn from_code(code: i32) -> Option<ConvError> {
        match code {
            CS_ILSEQ => Some(ConvError::IllegalSequence),
            c if (CS_TOOSMALL - 5..=CS_TOOSMALL).contains(&c) => {
                Some(ConvError::NeedMoreBytes((CS_TOOSMALL + 1 - c) as u8))
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_too_small(self) -> bool {
        matches!(self, ConvError::NeedMoreBytes(_))
    }
}

impl fmt::Display for ConvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvError::IllegalSequence => write!(f, "illegal byte sequence"),
            ConvError::Unencodable => write!(f, "character cannot be encoded"),
            ConvError::NeedMoreBytes(n) => write!(f, "need at least {} bytes", n),
        }
    }
}

impl std::error::Error for ConvError {}

/// Error type for registry and tailoring operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollationError {
    /// No collation with this name is registered.
    UnknownCollation(String),
    /// No collation with this id is registered.
    UnknownCollationId(u32),
    /// No charset with this name exists.
    UnknownCharset(String),
    /// The id or name is already taken.
    DuplicateCollation { id: u32, name: String },
    /// The id is outside the page reserved for the charset.
    IdOutOfRange { id: u32, charset: String },
    /// The tailoring rules could not be parsed.
    RuleSyntax { collation: String, position: usize, message: String },
    /// The tailoring rules parsed but could not be applied.
    Tailoring { collation: String, message: String },
    /// The operation needs a UCA collation.
    NotUca(String),
}

impl fmt::Display for CollationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollationError::UnknownCollation(name) => write!(f, "unknown collation '{}'", name),
            CollationError::UnknownCollationId(id) => write!(f, "unknown collation id {}", id),
            CollationError::UnknownCharset(name) => write!(f, "unknown character set '{}'", name),
            CollationError::DuplicateCollation { id, name } => {
                write!(f, "collation '{}' (id {}) is already registered", name, id)
            }
            CollationError::IdOutOfRange { id, charset } => {
                write!(f, "collation id {} is out of the range allowed for '{}'", id, charset)
            }
            CollationError::RuleSyntax { collation, position, message } => write!(
                f,
                "syntax error in tailoring of '{}' at position {}: {}",
                collation, position, message
            ),
            CollationError::Tailoring { collation, message } => {
                write!(f, "cannot apply tailoring of '{}': {}", collation, message)
            }
            CollationError::NotUca(name) => write!(f, "collation '{}' is not a UCA collation", name),
        }
    }
}

impl std::error::Error for CollationError {}

impl CollationError {
    /// Stable numeric code, for callers that report errors as integers.
    pub fn code(&self) -> i32 {
        match self {
            CollationError::UnknownCollation(_) => -1,
            CollationError::UnknownCollationId(_) => -2,
            CollationError::UnknownCharset(_) => -3,
            CollationError::DuplicateCollation { .. } => -4,
            CollationError::IdOutOfRange { .. } => -5,
            CollationError::RuleSyntax { .. } => -6,
            CollationError::Tailoring { .. } => -7,
            CollationError::NotUca(_) => -8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conv_error_codes() {
        assert_eq!(ConvError::IllegalSequence.code(), 0);
        assert_eq!(ConvError::Unencodable.code(), 0);
        assert_eq!(ConvError::NeedMoreBytes(1).code(), -101);
        assert_eq!(ConvError::NeedMoreBytes(4).code(), -104);
    }

    #[test]
    fn conv_error_from_code() {
        assert_eq!(ConvError::from_code(0), Some(ConvError::IllegalSequence));
        assert_eq!(ConvError::from_code(-102), Some(ConvError::NeedMoreBytes(2)));
        assert_eq!(ConvError::from_code(-106), Some(ConvError::NeedMoreBytes(6)));
        assert_eq!(ConvError::from_code(-107), None);
        assert_eq!(ConvError::from_code(3), None);
    }

    #[test]
    fn conv_error_display() {
        assert_eq!(ConvError::NeedMoreBytes(4).to_string(), "need at least 4 bytes");
        assert!(ConvError::NeedMoreBytes(2).is_too_small());
        assert!(!ConvError::Unencodable.is_too_small());
    }

    #[test]
    fn collation_error_display() {
        let err = CollationError::RuleSyntax {
            collation: "x_ci".to_string(),
            position: 7,
            message: "unexpected '<'".to_string(),
        };
        assert_eq!(err.code(), -6);
        assert!(err.to_string().contains("position 7"));
        assert!(err.to_string().contains("x_ci"));
    }

    #[test]
    fn collation_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&CollationError::UnknownCollationId(999));
        assert_eq!(CollationError::UnknownCollationId(999).to_string(), "unknown collation id 999");
    }
}
