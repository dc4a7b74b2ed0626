//! Modified UTF-8 codec
//!
//! The string encoding used inside NBT payloads. It differs from standard
//! UTF-8 in two ways:
//!
//! - U+0000 is written as the overlong pair `C0 80`, so an encoded string never
//!   contains a zero byte.
//! - Characters outside the Basic Multilingual Plane are split into a UTF-16
//!   surrogate pair and each half is written as its own 3-byte sequence, six
//!   bytes in total. A native 4-byte sequence never appears.
//!
//! ## Decoding policy
//!
//! Structural corruption (truncated sequences, overlong forms, a raw zero byte,
//! unknown lead bytes) aborts decoding with a [`Mutf8Error`]. Surrogate pairing
//! problems, stray continuation bytes and 4-byte lead bytes are repaired with
//! U+FFFD and reported as a [`Mutf8Warning`]; see [`DecodeConfig`] to change
//! how those are handled.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode, Decoded, Decoder};
pub use encoder::{encode, encode_code_points, encode_utf16, encoded_len, encoded_len_code_points};

use std::fmt;

pub(crate) const REPLACEMENT: char = '\u{FFFD}';

/// Decoder configuration
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Turn every recoverable problem into [`Mutf8Error::Rejected`]
    pub strict: bool,
    /// Emit recoverable problems through `tracing` as they are found
    pub log_warnings: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            strict: false,
            log_warnings: true,
        }
    }
}

/// A recoverable problem found while decoding
///
/// Positions are byte offsets into the decoded input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutf8Warning {
    /// A continuation byte where a lead byte was expected; it was skipped
    UnexpectedContinuation { position: usize },
    /// A high surrogate not followed by a low surrogate; replaced with U+FFFD
    LoneHighSurrogate { position: usize, code_point: u32 },
    /// A low surrogate with no pending high surrogate; replaced with U+FFFD
    LoneLowSurrogate { position: usize, code_point: u32 },
    /// A 4-byte lead byte; replaced with U+FFFD
    FourByteSequence { position: usize },
    /// The input ended while a high surrogate was pending; replaced with U+FFFD
    UnterminatedHighSurrogate { position: usize, code_point: u32 },
}

impl fmt::Display for Mutf8Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutf8Warning::UnexpectedContinuation { position } => {
                write!(f, "Skipped unexpected continuation byte at position {}", position)
            }
            Mutf8Warning::LoneHighSurrogate { position, code_point } => {
                write!(
                    f,
                    "Replaced lone high surrogate U+{:04X} at position {}",
                    code_point, position
                )
            }
            Mutf8Warning::LoneLowSurrogate { position, code_point } => {
                write!(
                    f,
                    "Replaced lone low surrogate U+{:04X} at position {}",
                    code_point, position
                )
            }
            Mutf8Warning::FourByteSequence { position } => {
                write!(f, "Replaced unexpected 4-byte sequence at position {}", position)
            }
            Mutf8Warning::UnterminatedHighSurrogate { position, code_point } => {
                write!(
                    f,
                    "Replaced lone high surrogate U+{:04X} at end of text (started at position {})",
                    code_point, position
                )
            }
        }
    }
}

/// Errors raised by the codec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mutf8Error {
    /// Encoding was given a code point in U+D800..=U+DFFF
    #[error("lone surrogate U+{code_point:04X} cannot be encoded")]
    LoneSurrogate { code_point: u32 },

    /// Encoding was given a value above U+10FFFF
    #[error("code point 0x{code_point:X} is outside the Unicode range")]
    CodePointOutOfRange { code_point: u32 },

    /// A literal zero byte; U+0000 must be written as `C0 80`
    #[error("unexpected zero byte at position {position}")]
    NulByte { position: usize },

    /// A multi-byte sequence is missing continuation bytes
    #[error("incomplete {width}-byte sequence at position {position}")]
    Incomplete { position: usize, width: usize },

    /// A multi-byte sequence encodes a value that needs fewer bytes
    #[error("overlong {width}-byte sequence for U+{code_point:04X} at position {position}")]
    Overlong { position: usize, width: usize, code_point: u32 },

    /// A byte that cannot start any sequence
    #[error("invalid lead byte 0x{byte:02X} at position {position}")]
    InvalidLeadByte { position: usize, byte: u8 },

    /// A recoverable problem rejected by a strict decoder
    #[error("{0}")]
    Rejected(Mutf8Warning),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_lenient() {
        let config = DecodeConfig::default();
        assert!(!config.strict);
        assert!(config.log_warnings);
    }

    #[test]
    fn test_warning_messages_name_code_point() {
        let warning = Mutf8Warning::LoneHighSurrogate { position: 3, code_point: 0xD800 };
        assert_eq!(warning.to_string(), "Replaced lone high surrogate U+D800 at position 3");

        let warning = Mutf8Warning::LoneLowSurrogate { position: 0, code_point: 0xDFFF };
        assert!(warning.to_string().contains("lone low surrogate U+DFFF"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Mutf8Error::LoneSurrogate { code_point: 0xDC00 }.to_string(),
            "lone surrogate U+DC00 cannot be encoded"
        );
        assert_eq!(
            Mutf8Error::InvalidLeadByte { position: 7, byte: 0xFF }.to_string(),
            "invalid lead byte 0xFF at position 7"
        );
        let rejected = Mutf8Error::Rejected(Mutf8Warning::FourByteSequence { position: 1 });
        assert_eq!(rejected.to_string(), "Replaced unexpected 4-byte sequence at position 1");
    }
}
